//! Coordinate-notation moves as exchanged with the rules engine.

use std::fmt;
use std::str::FromStr;

use cozy_chess::Square;

use crate::error::RulesError;
use crate::piece_kind::PieceKind;

/// Which side of the board a castling move goes toward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CastleSide {
    KingSide,
    QueenSide,
}

/// A move in coordinate notation: origin, destination, optional promotion.
///
/// Castling is always expressed as the king's two-square step (`e1g1`),
/// never as the king landing on its own rook.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub from: Square,
    pub to: Square,
    pub promotion: Option<PieceKind>,
}

impl Move {
    /// Create a non-promoting move.
    #[inline]
    pub const fn new(from: Square, to: Square) -> Move {
        Move {
            from,
            to,
            promotion: None,
        }
    }

    /// Create a promotion move.
    #[inline]
    pub const fn with_promotion(from: Square, to: Square, kind: PieceKind) -> Move {
        Move {
            from,
            to,
            promotion: Some(kind),
        }
    }

    /// Coordinate notation, e.g. `e2e4` or `e7e8q`.
    pub fn to_uci(self) -> String {
        self.to_string()
    }
}

impl FromStr for Move {
    type Err = RulesError;

    fn from_str(s: &str) -> Result<Move, RulesError> {
        let invalid = || RulesError::InvalidMove {
            uci_move: s.to_string(),
        };

        if !s.is_ascii() || !(4..=5).contains(&s.len()) {
            return Err(invalid());
        }

        let from: Square = s[0..2].parse().map_err(|_| invalid())?;
        let to: Square = s[2..4].parse().map_err(|_| invalid())?;

        let promotion = match s.as_bytes().get(4) {
            None => None,
            Some(&c) => match PieceKind::from_fen_char(c as char) {
                Some(kind @ (PieceKind::Knight | PieceKind::Bishop | PieceKind::Rook | PieceKind::Queen)) => {
                    Some(kind)
                }
                _ => return Err(invalid()),
            },
        };

        Ok(Move { from, to, promotion })
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.promotion {
            Some(kind) => write!(f, "{}{}{}", self.from, self.to, kind.fen_char()),
            None => write!(f, "{}{}", self.from, self.to),
        }
    }
}

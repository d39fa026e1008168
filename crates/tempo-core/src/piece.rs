//! Colored chess piece as held by a shadow board cell.

use std::fmt;

use crate::color::Color;
use crate::piece_kind::PieceKind;

/// A colored chess piece.
///
/// Immutable once created; its value is a pure function of the kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    kind: PieceKind,
    color: Color,
}

impl Piece {
    /// Create a piece from a kind and a color.
    #[inline]
    pub const fn new(kind: PieceKind, color: Color) -> Piece {
        Piece { kind, color }
    }

    /// Parse a FEN character into a piece.
    ///
    /// Uppercase letters produce White pieces; lowercase letters produce Black pieces.
    #[inline]
    pub fn from_fen_char(c: char) -> Option<Piece> {
        let kind = PieceKind::from_fen_char(c)?;
        let color = if c.is_ascii_uppercase() {
            Color::White
        } else {
            Color::Black
        };
        Some(Piece::new(kind, color))
    }

    #[inline]
    pub const fn kind(self) -> PieceKind {
        self.kind
    }

    #[inline]
    pub const fn color(self) -> Color {
        self.color
    }

    /// Material value of the piece.
    #[inline]
    pub const fn value(self) -> i32 {
        self.kind.value()
    }

    /// FEN character: uppercase for White, lowercase for Black.
    #[inline]
    pub fn fen_char(self) -> char {
        match self.color {
            Color::White => self.kind.fen_char().to_ascii_uppercase(),
            Color::Black => self.kind.fen_char(),
        }
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.fen_char())
    }
}

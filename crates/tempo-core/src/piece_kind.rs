//! Piece kinds and their fixed material values.

use std::fmt;

/// The kind of a chess piece, without color information.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum PieceKind {
    Pawn = 0,
    Knight = 1,
    Bishop = 2,
    Rook = 3,
    Queen = 4,
    King = 5,
}

impl PieceKind {
    /// Total number of piece kinds.
    pub const COUNT: usize = 6;

    /// All piece kinds in index order.
    pub const ALL: [PieceKind; 6] = [
        PieceKind::Pawn,
        PieceKind::Knight,
        PieceKind::Bishop,
        PieceKind::Rook,
        PieceKind::Queen,
        PieceKind::King,
    ];

    /// Return the index (0..5).
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Material value used by the ledger.
    ///
    /// | Piece  | Value |
    /// |--------|-------|
    /// | Pawn   |   100 |
    /// | Knight |   300 |
    /// | Bishop |   300 |
    /// | Rook   |   500 |
    /// | Queen  |   900 |
    /// | King   | 10000 |
    #[inline]
    pub const fn value(self) -> i32 {
        match self {
            PieceKind::Pawn => 100,
            PieceKind::Knight => 300,
            PieceKind::Bishop => 300,
            PieceKind::Rook => 500,
            PieceKind::Queen => 900,
            PieceKind::King => 10_000,
        }
    }

    /// Return the FEN character for this piece kind (lowercase).
    #[inline]
    pub const fn fen_char(self) -> char {
        match self {
            PieceKind::Pawn => 'p',
            PieceKind::Knight => 'n',
            PieceKind::Bishop => 'b',
            PieceKind::Rook => 'r',
            PieceKind::Queen => 'q',
            PieceKind::King => 'k',
        }
    }

    /// Parse a FEN character (case-insensitive) into a piece kind.
    #[inline]
    pub fn from_fen_char(c: char) -> Option<PieceKind> {
        match c.to_ascii_lowercase() {
            'p' => Some(PieceKind::Pawn),
            'n' => Some(PieceKind::Knight),
            'b' => Some(PieceKind::Bishop),
            'r' => Some(PieceKind::Rook),
            'q' => Some(PieceKind::Queen),
            'k' => Some(PieceKind::King),
            _ => None,
        }
    }
}

impl From<cozy_chess::Piece> for PieceKind {
    fn from(piece: cozy_chess::Piece) -> PieceKind {
        match piece {
            cozy_chess::Piece::Pawn => PieceKind::Pawn,
            cozy_chess::Piece::Knight => PieceKind::Knight,
            cozy_chess::Piece::Bishop => PieceKind::Bishop,
            cozy_chess::Piece::Rook => PieceKind::Rook,
            cozy_chess::Piece::Queen => PieceKind::Queen,
            cozy_chess::Piece::King => PieceKind::King,
        }
    }
}

impl From<PieceKind> for cozy_chess::Piece {
    fn from(kind: PieceKind) -> cozy_chess::Piece {
        match kind {
            PieceKind::Pawn => cozy_chess::Piece::Pawn,
            PieceKind::Knight => cozy_chess::Piece::Knight,
            PieceKind::Bishop => cozy_chess::Piece::Bishop,
            PieceKind::Rook => cozy_chess::Piece::Rook,
            PieceKind::Queen => cozy_chess::Piece::Queen,
            PieceKind::King => cozy_chess::Piece::King,
        }
    }
}

impl fmt::Display for PieceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.fen_char())
    }
}

#[cfg(test)]
mod tests {
    use super::PieceKind;

    #[test]
    fn values_match_table() {
        let values: Vec<i32> = PieceKind::ALL.iter().map(|k| k.value()).collect();
        assert_eq!(values, vec![100, 300, 300, 500, 900, 10_000]);
    }

    #[test]
    fn full_set_sums_to_baseline() {
        // 8 pawns, 2 knights, 2 bishops, 2 rooks, 1 queen, 1 king
        let total = 8 * PieceKind::Pawn.value()
            + 2 * PieceKind::Knight.value()
            + 2 * PieceKind::Bishop.value()
            + 2 * PieceKind::Rook.value()
            + PieceKind::Queen.value()
            + PieceKind::King.value();
        assert_eq!(total, 13_900);
    }

    #[test]
    fn fen_char_roundtrip() {
        for kind in PieceKind::ALL {
            let c = kind.fen_char();
            assert_eq!(PieceKind::from_fen_char(c), Some(kind));
            assert_eq!(PieceKind::from_fen_char(c.to_ascii_uppercase()), Some(kind));
        }
        assert_eq!(PieceKind::from_fen_char('x'), None);
    }
}

//! Piece-square tables (PST) indexed by destination cell.
//!
//! Tables are laid out in the game's [`Orientation`](tempo_core::Orientation)
//! grid: row 0 is the engine's own back rank in both frames. Positive
//! entries reward moving a piece onto that cell.
//!
//! The king tables are the only mutable ones: every king destination that
//! is scored gets marked down to [`KING_REVISIT_PENALTY`] for the rest of
//! the game, which stops the engine from shuffling its king back and forth.

use tempo_core::{Color, Coord, PieceKind};

/// A single 8×8 table.
pub type Table = [[i32; 8]; 8];

/// Value a king table cell drops to once it has been scored.
pub const KING_REVISIT_PENALTY: i32 = -5;

#[rustfmt::skip]
pub const PAWN_PST: Table = [
    [  0,   0,   0,   0,   0,   0,   0,   0],
    [  5,  10,  10, -20, -20,  10,  10,   5],
    [  5,  -5, -10,   0,   0, -10,  -5,   5],
    [  0,   0,   0,  20,  20,   0,   0,   0],
    [  5,   5,  10,  20,  20,  10,   5,   5],
    [ 10,  10,  10,  15,  15,  10,  10,  10],
    [ 50,  50,  50,  50,  50,  50,  50,  50],
    [  0,   0,   0,   0,   0,   0,   0,   0],
];

#[rustfmt::skip]
pub const KNIGHT_PST: Table = [
    [-50, -40, -30, -30, -30, -30, -40, -50],
    [-40, -20,   0,   5,   5,   0, -20, -40],
    [-30,   5,  10,  15,  15,  10,   5, -30],
    [-30,   0,  15,  20,  20,  15,   0, -30],
    [-30,   5,  15,  20,  20,  15,   5, -30],
    [-30,   0,  10,  15,  15,  10,   0, -30],
    [-40, -20,   0,   0,   0,   0, -20, -40],
    [-50, -40, -30, -30, -30, -30, -40, -50],
];

#[rustfmt::skip]
pub const BISHOP_PST: Table = [
    [-20, -10, -10, -10, -10, -10, -10, -20],
    [-10,   5,   0,   0,   0,   0,   5, -10],
    [-10,  10,  10,  10,  10,  10,  10, -10],
    [-10,   0,  10,  10,  10,  10,   0, -10],
    [-10,   5,   5,  10,  10,   5,   5, -10],
    [-10,   0,   5,  10,  10,   5,   0, -10],
    [-10,   0,   0,   0,   0,   0,   0, -10],
    [-20, -10, -10, -10, -10, -10, -10, -20],
];

#[rustfmt::skip]
pub const ROOK_PST: Table = [
    [  0,   0,   0,   5,   5,   0,   0,   0],
    [ -5,   0,   0,   0,   0,   0,   0,  -5],
    [ -5,   0,   0,   0,   0,   0,   0,  -5],
    [ -5,   0,   0,   0,   0,   0,   0,  -5],
    [ -5,   0,   0,   0,   0,   0,   0,  -5],
    [ -5,   0,   0,   0,   0,   0,   0,  -5],
    [  5,  10,  10,  10,  10,  10,  10,   5],
    [  0,   0,   0,   0,   0,   0,   0,   0],
];

#[rustfmt::skip]
pub const QUEEN_PST: Table = [
    [-20, -10, -10,  -5,  -5, -10, -10, -20],
    [-10,   0,   5,   0,   0,   0,   0, -10],
    [-10,   5,   5,   5,   5,   5,   0, -10],
    [  0,   0,   5,   5,   5,   5,   0,  -5],
    [ -5,   0,   5,   5,   5,   5,   0,  -5],
    [-10,   0,   5,   5,   5,   5,   0, -10],
    [-10,   0,   0,   0,   0,   0,   0, -10],
    [-20, -10, -10,  -5,  -5, -10, -10, -20],
];

/// King table used when the engine plays White (human Black, columns h→a).
#[rustfmt::skip]
pub const KING_PST_WHITE: Table = [
    [  5,  30,   5,   0,   0,  10,  30,   5],
    [ 20,  20,   0,   0,   0,   0,  20,  20],
    [-10, -20, -20, -20, -20, -20, -20, -10],
    [-20, -30, -30, -40, -40, -30, -30, -20],
    [-30, -40, -40, -50, -50, -40, -40, -30],
    [-30, -40, -40, -50, -50, -40, -40, -30],
    [-30, -40, -40, -50, -50, -40, -40, -30],
    [-30, -40, -40, -50, -50, -40, -40, -30],
];

/// King table used when the engine plays Black (human White, columns a→h).
#[rustfmt::skip]
pub const KING_PST_BLACK: Table = [
    [  5,  30,  10,   0,   0,   5,  30,   5],
    [ 20,  20,   0,   0,   0,   0,  20,  20],
    [-10, -20, -20, -20, -20, -20, -20, -10],
    [-20, -30, -30, -40, -40, -30, -30, -20],
    [-30, -40, -40, -50, -50, -40, -40, -30],
    [-30, -40, -40, -50, -50, -40, -40, -30],
    [-30, -40, -40, -50, -50, -40, -40, -30],
    [-30, -40, -40, -50, -50, -40, -40, -30],
];

/// Read-only table for a non-king piece kind.
///
/// Returns `None` for the king, whose tables live in [`KingTables`].
#[inline]
pub fn table(kind: PieceKind) -> Option<&'static Table> {
    match kind {
        PieceKind::Pawn => Some(&PAWN_PST),
        PieceKind::Knight => Some(&KNIGHT_PST),
        PieceKind::Bishop => Some(&BISHOP_PST),
        PieceKind::Rook => Some(&ROOK_PST),
        PieceKind::Queen => Some(&QUEEN_PST),
        PieceKind::King => None,
    }
}

/// Per-game copies of both king tables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KingTables {
    tables: [Table; Color::COUNT],
}

impl KingTables {
    /// Fresh, unmarked tables.
    pub const fn new() -> KingTables {
        KingTables {
            tables: [KING_PST_WHITE, KING_PST_BLACK],
        }
    }

    /// Restore the original values (new game).
    pub fn reset(&mut self) {
        *self = KingTables::new();
    }

    /// Current value of a cell without marking it.
    #[inline]
    pub fn peek(&self, color: Color, coord: Coord) -> i32 {
        self.tables[color.index()][coord.row][coord.col]
    }

    /// Read a cell, then mark it down to [`KING_REVISIT_PENALTY`].
    ///
    /// Cells already below the penalty keep their value, so marking can
    /// only ever make a destination less attractive.
    pub fn take(&mut self, color: Color, coord: Coord) -> i32 {
        let cell = &mut self.tables[color.index()][coord.row][coord.col];
        let points = *cell;
        *cell = points.min(KING_REVISIT_PENALTY);
        points
    }
}

impl Default for KingTables {
    fn default() -> Self {
        Self::new()
    }
}

//! Perspective-dependent grid coordinates.
//!
//! The shadow board and the positional tables are indexed by `(row, col)`
//! in a frame fixed by the human player's color at game start:
//!
//! - human White: row 0 is rank 8, columns run a→h
//! - human Black: row 0 is rank 1, columns run h→a
//!
//! Every index↔notation conversion goes through [`Orientation`] so both
//! frames stay consistent.

use cozy_chess::{File, Rank, Square};

use crate::chess_move::Move;
use crate::color::Color;

/// A `(row, col)` cell of an 8×8 grid in the game's orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Coord {
    pub row: usize,
    pub col: usize,
}

impl Coord {
    /// Create a coordinate. Both components must be below 8.
    #[inline]
    pub const fn new(row: usize, col: usize) -> Coord {
        debug_assert!(row < 8 && col < 8);
        Coord { row, col }
    }
}

/// Which way the grid faces, fixed once per game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Orientation {
    /// Human plays White: row 0 = rank 8, col 0 = file a.
    HumanWhite,
    /// Human plays Black: row 0 = rank 1, col 0 = file h.
    HumanBlack,
}

impl Orientation {
    /// Orientation for a game in which the human plays `human`.
    #[inline]
    pub const fn for_human(human: Color) -> Orientation {
        match human {
            Color::White => Orientation::HumanWhite,
            Color::Black => Orientation::HumanBlack,
        }
    }

    /// The human player's color.
    #[inline]
    pub const fn human(self) -> Color {
        match self {
            Orientation::HumanWhite => Color::White,
            Orientation::HumanBlack => Color::Black,
        }
    }

    /// Grid cell of a board square.
    #[inline]
    pub fn coord(self, sq: Square) -> Coord {
        let file = sq.file() as usize;
        let rank = sq.rank() as usize;
        match self {
            Orientation::HumanWhite => Coord::new(7 - rank, file),
            Orientation::HumanBlack => Coord::new(rank, 7 - file),
        }
    }

    /// Board square of a grid cell.
    #[inline]
    pub fn square(self, coord: Coord) -> Square {
        let (file, rank) = match self {
            Orientation::HumanWhite => (coord.col, 7 - coord.row),
            Orientation::HumanBlack => (7 - coord.col, coord.row),
        };
        Square::new(File::index(file), Rank::index(rank))
    }

    /// Chess notation (`"e4"`) of a grid cell.
    pub fn notation(self, coord: Coord) -> String {
        self.square(coord).to_string()
    }

    /// Grid cell of a chess-notation square, or `None` if malformed.
    pub fn parse_notation(self, s: &str) -> Option<Coord> {
        s.parse::<Square>().ok().map(|sq| self.coord(sq))
    }

    /// Origin and destination cells of a move.
    #[inline]
    pub fn move_coords(self, mv: Move) -> (Coord, Coord) {
        (self.coord(mv.from), self.coord(mv.to))
    }
}

//! The shadow board: the search's own 8×8 piece grid.
//!
//! It mirrors the rules engine's position in the game's [`Orientation`].
//! After every committed move it is re-derived from the serialized
//! position; inside the search it is mutated with [`ShadowBoard::make`]
//! and restored with [`ShadowBoard::unmake`] in strict LIFO order.

use std::fmt;

use cozy_chess::{File, Rank, Square};

use crate::chess_move::Move;
use crate::error::ShadowError;
use crate::orientation::{Coord, Orientation};
use crate::piece::Piece;
use crate::piece_kind::PieceKind;
use crate::position::Position;

/// Everything needed to reverse one [`ShadowBoard::make`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShadowUndo {
    from: Coord,
    to: Coord,
    moved: Piece,
    placed: Piece,
    captured: Option<(Coord, Piece)>,
}

impl ShadowUndo {
    /// The piece that left the origin cell.
    #[inline]
    pub fn moved(&self) -> Piece {
        self.moved
    }

    /// The piece now standing on the destination (differs from
    /// [`moved`](Self::moved) on promotion).
    #[inline]
    pub fn placed(&self) -> Piece {
        self.placed
    }

    /// The captured piece, including an en-passant victim.
    #[inline]
    pub fn captured(&self) -> Option<Piece> {
        self.captured.map(|(_, piece)| piece)
    }

    /// Destination cell.
    #[inline]
    pub fn to(&self) -> Coord {
        self.to
    }
}

/// 8×8 grid of pieces indexed by [`Coord`].
#[derive(Clone, PartialEq, Eq)]
pub struct ShadowBoard {
    cells: [[Option<Piece>; 8]; 8],
    orientation: Orientation,
}

impl ShadowBoard {
    /// An empty grid.
    pub fn empty(orientation: Orientation) -> ShadowBoard {
        ShadowBoard {
            cells: [[None; 8]; 8],
            orientation,
        }
    }

    /// Decode the piece placement of a FEN string.
    pub fn from_fen(fen: &str, orientation: Orientation) -> Result<ShadowBoard, ShadowError> {
        let mut board = ShadowBoard::empty(orientation);
        board.cells = decode_placement(fen, orientation)?;
        Ok(board)
    }

    /// Build a grid mirroring `position`.
    pub fn from_position(
        position: &Position,
        orientation: Orientation,
    ) -> Result<ShadowBoard, ShadowError> {
        ShadowBoard::from_fen(&position.fen(), orientation)
    }

    /// Re-derive every cell from the serialized position.
    pub fn resync(&mut self, position: &Position) -> Result<(), ShadowError> {
        self.cells = decode_placement(&position.fen(), self.orientation)?;
        Ok(())
    }

    #[inline]
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// The piece in a cell.
    #[inline]
    pub fn get(&self, coord: Coord) -> Option<Piece> {
        self.cells[coord.row][coord.col]
    }

    /// The piece on a board square.
    #[inline]
    pub fn piece_at(&self, sq: Square) -> Option<Piece> {
        self.get(self.orientation.coord(sq))
    }

    /// All occupied cells, row by row.
    pub fn pieces(&self) -> impl Iterator<Item = (Coord, Piece)> + '_ {
        self.cells.iter().enumerate().flat_map(|(row, cells)| {
            cells
                .iter()
                .enumerate()
                .filter_map(move |(col, cell)| cell.map(|piece| (Coord::new(row, col), piece)))
        })
    }

    /// Apply a non-castling move in place.
    ///
    /// Castling moves two pieces; callers resync from the position instead.
    pub fn make(&mut self, mv: Move) -> Result<ShadowUndo, ShadowError> {
        let (from, to) = self.orientation.move_coords(mv);
        let moved = self.get(from).ok_or_else(|| ShadowError::EmptyOrigin {
            square: mv.from.to_string(),
        })?;

        let mut captured = self.get(to).map(|piece| (to, piece));
        if captured.is_none() && moved.kind() == PieceKind::Pawn && from.col != to.col {
            // En passant: the victim shares the origin's row and the destination's column.
            let victim = Coord::new(from.row, to.col);
            captured = self.get(victim).map(|piece| (victim, piece));
            self.cells[victim.row][victim.col] = None;
        }

        let placed = match mv.promotion {
            Some(kind) => Piece::new(kind, moved.color()),
            None => moved,
        };

        self.cells[from.row][from.col] = None;
        self.cells[to.row][to.col] = Some(placed);

        Ok(ShadowUndo {
            from,
            to,
            moved,
            placed,
            captured,
        })
    }

    /// Reverse a [`make`](Self::make). Must be called in LIFO order.
    pub fn unmake(&mut self, undo: ShadowUndo) {
        self.cells[undo.to.row][undo.to.col] = None;
        self.cells[undo.from.row][undo.from.col] = Some(undo.moved);
        if let Some((at, piece)) = undo.captured {
            self.cells[at.row][at.col] = Some(piece);
        }
    }

    /// Check that every cell agrees with `position`.
    pub fn verify(&self, position: &Position) -> Result<(), ShadowError> {
        for row in 0..8 {
            for col in 0..8 {
                let coord = Coord::new(row, col);
                let sq = self.orientation.square(coord);
                let expected = position.piece_on(sq);
                let found = self.get(coord);
                if expected != found {
                    return Err(ShadowError::Inconsistent {
                        square: sq.to_string(),
                        expected: expected.map_or('.', Piece::fen_char),
                        found: found.map_or('.', Piece::fen_char),
                    });
                }
            }
        }
        Ok(())
    }
}

/// Decode the first FEN field into a grid in the given orientation.
fn decode_placement(
    fen: &str,
    orientation: Orientation,
) -> Result<[[Option<Piece>; 8]; 8], ShadowError> {
    let placement = fen.split_whitespace().next().unwrap_or_default();
    let malformed = || ShadowError::MalformedPlacement {
        placement: placement.to_string(),
    };

    let ranks: Vec<&str> = placement.split('/').collect();
    if ranks.len() != 8 {
        return Err(malformed());
    }

    let mut cells = [[None; 8]; 8];
    for (rank_index, rank_str) in ranks.iter().enumerate() {
        // FEN ranks run from 8 down to 1
        let rank = Rank::index(7 - rank_index);
        let mut file_index = 0usize;

        for c in rank_str.chars() {
            if let Some(digit) = c.to_digit(10) {
                if !(1..=8).contains(&digit) {
                    return Err(malformed());
                }
                file_index += digit as usize;
            } else {
                let piece = Piece::from_fen_char(c).ok_or_else(malformed)?;
                if file_index >= 8 {
                    return Err(malformed());
                }
                let coord = orientation.coord(Square::new(File::index(file_index), rank));
                cells[coord.row][coord.col] = Some(piece);
                file_index += 1;
            }
        }

        if file_index != 8 {
            return Err(malformed());
        }
    }

    Ok(cells)
}

impl fmt::Display for ShadowBoard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..8 {
            let rank = self.orientation.square(Coord::new(row, 0)).rank() as usize + 1;
            write!(f, "{rank}  ")?;
            for col in 0..8 {
                let c = self.get(Coord::new(row, col)).map_or('.', Piece::fen_char);
                if col < 7 {
                    write!(f, "{c} ")?;
                } else {
                    write!(f, "{c}")?;
                }
            }
            writeln!(f)?;
        }
        write!(f, "  ")?;
        for col in 0..8 {
            let file = self.orientation.notation(Coord::new(0, col));
            write!(f, " {}", &file[..1])?;
        }
        Ok(())
    }
}

impl fmt::Debug for ShadowBoard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "ShadowBoard({:?})", self.orientation)?;
        write!(f, "{self}")
    }
}

//! Core chess types: pieces, board orientation, the shadow board, and the
//! rules engine adapter.

mod chess_move;
mod color;
mod error;
mod orientation;
mod piece;
mod piece_kind;
mod position;
mod shadow;

pub use chess_move::{CastleSide, Move};
pub use color::Color;
pub use cozy_chess::{File, Rank, Square};
pub use error::{RulesError, ShadowError};
pub use orientation::{Coord, Orientation};
pub use piece::Piece;
pub use piece_kind::PieceKind;
pub use position::{Outcome, Position, STARTING_FEN};
pub use shadow::{ShadowBoard, ShadowUndo};

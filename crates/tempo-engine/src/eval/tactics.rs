//! Pawn-attack deterrent for pieces moving onto a square a pawn covers.

use tempo_core::{Coord, Piece, PieceKind, ShadowBoard};

/// Penalty for moving `piece` onto `to` when an opposing pawn attacks it.
///
/// Only knights, bishops, rooks and queens are penalised, by their full
/// value. A single diagonal is inspected one row further from the
/// engine's back rank: the left one, or the right one when the left falls
/// off the board.
pub fn check_pawn_attacks(piece: Piece, to: Coord, shadow: &ShadowBoard) -> i32 {
    if matches!(piece.kind(), PieceKind::Pawn | PieceKind::King) {
        return 0;
    }
    let row = to.row + 1;
    if row >= 8 {
        return 0;
    }

    let col = if to.col >= 1 {
        to.col - 1
    } else if to.col + 1 < 8 {
        to.col + 1
    } else {
        return 0;
    };

    match shadow.get(Coord::new(row, col)) {
        Some(guard) if guard.kind() == PieceKind::Pawn && guard.color() != piece.color() => {
            -piece.value()
        }
        _ => 0,
    }
}

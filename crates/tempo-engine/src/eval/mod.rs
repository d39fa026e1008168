//! Static evaluation and per-move bonuses.

pub mod material;
pub mod pst;
pub mod tactics;

use tempo_core::{CastleSide, Color, Coord, Piece};
use tracing::debug;

use material::MaterialLedger;
use pst::KingTables;

pub use tactics::check_pawn_attacks;

/// Bonus for castling king-side.
pub const KING_SIDE_CASTLE_BONUS: i32 = 30;
/// Bonus for castling queen-side.
pub const QUEEN_SIDE_CASTLE_BONUS: i32 = 10;

/// Per-game evaluation state.
///
/// Owns the mutable king tables and the endgame flag. Both survive between
/// searches and are only cleared by [`Evaluator::new_game`].
#[derive(Debug, Clone, Default)]
pub struct Evaluator {
    king_tables: KingTables,
    endgame: bool,
}

impl Evaluator {
    pub fn new() -> Evaluator {
        Evaluator::default()
    }

    /// Forget all per-game state.
    pub fn new_game(&mut self) {
        self.king_tables.reset();
        self.endgame = false;
    }

    /// Leaf score: material balance from `side`'s point of view.
    #[inline]
    pub fn evaluate(&self, ledger: &MaterialLedger, side: Color) -> i32 {
        ledger.balance(side)
    }

    /// Table bonus for `piece` arriving on `to`.
    ///
    /// King moves read the king table of the piece's colour and mark that
    /// cell down for the rest of the game. Outside the opening and middle
    /// game the king scores nothing.
    pub fn evaluate_position(&mut self, piece: Piece, to: Coord) -> i32 {
        match pst::table(piece.kind()) {
            Some(table) => table[to.row][to.col],
            None if self.endgame => 0,
            None => self.king_tables.take(piece.color(), to),
        }
    }

    /// Fixed bonus for a castling move.
    #[inline]
    pub fn castle_bonus(&self, side: CastleSide) -> i32 {
        match side {
            CastleSide::KingSide => KING_SIDE_CASTLE_BONUS,
            CastleSide::QueenSide => QUEEN_SIDE_CASTLE_BONUS,
        }
    }

    /// Latch the endgame flag once both sides are low on material.
    pub fn update_endgame(&mut self, ledger: &MaterialLedger) {
        if !self.endgame && ledger.is_endgame() {
            debug!(
                white = ledger.remaining(Color::White),
                black = ledger.remaining(Color::Black),
                "entering endgame"
            );
            self.endgame = true;
        }
    }

    #[inline]
    pub fn is_endgame(&self) -> bool {
        self.endgame
    }

    #[inline]
    pub fn king_tables(&self) -> &KingTables {
        &self.king_tables
    }
}

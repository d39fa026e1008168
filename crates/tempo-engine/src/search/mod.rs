//! Fixed-depth minimax search and the two-depth move choice.

pub mod minimax;

use tempo_core::{Color, Move, Position, ShadowBoard, ShadowError};
use tracing::{debug, info};

use crate::eval::Evaluator;
use crate::eval::material::MaterialLedger;

pub use minimax::INF;

/// Result of one fixed-depth search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchResult {
    /// Score from the searching side's perspective.
    pub score: i32,
    /// Best move at the root, `None` at leaves and terminal nodes.
    pub best_move: Option<Move>,
}

impl SearchResult {
    pub(crate) const fn terminal(score: i32) -> SearchResult {
        SearchResult {
            score,
            best_move: None,
        }
    }
}

/// Outcome of [`Searcher::choose_move`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveChoice {
    /// The move to play, `None` if the side to move has no legal moves.
    pub best_move: Option<Move>,
    /// Score of the search whose move was kept.
    pub score: i32,
    /// Nodes visited by both searches together.
    pub nodes: u64,
    /// Result of the deeper search.
    pub deep: SearchResult,
    /// Result of the shallower search.
    pub shallow: SearchResult,
}

/// Search context for one engine turn.
///
/// Borrows the game's shared state mutably for the duration of the search.
/// Every mutation made while exploring a move is reversed before the move's
/// score is returned, so the position, shadow board and ledger come back
/// unchanged. The evaluator's king tables are the exception.
pub struct Searcher<'a> {
    pub(crate) position: &'a mut Position,
    pub(crate) shadow: &'a mut ShadowBoard,
    pub(crate) ledger: &'a mut MaterialLedger,
    pub(crate) evaluator: &'a mut Evaluator,
    pub(crate) side: Color,
    pub(crate) nodes: u64,
}

impl<'a> Searcher<'a> {
    /// Create a searcher maximizing for `side`.
    pub fn new(
        position: &'a mut Position,
        shadow: &'a mut ShadowBoard,
        ledger: &'a mut MaterialLedger,
        evaluator: &'a mut Evaluator,
        side: Color,
    ) -> Searcher<'a> {
        Searcher {
            position,
            shadow,
            ledger,
            evaluator,
            side,
            nodes: 0,
        }
    }

    /// Leaf evaluations plus moves considered since creation.
    #[inline]
    pub fn nodes(&self) -> u64 {
        self.nodes
    }

    /// The side the search maximizes for.
    #[inline]
    pub fn side(&self) -> Color {
        self.side
    }

    /// Full-window search from the root at `depth`.
    pub fn search(&mut self, depth: u8) -> Result<SearchResult, ShadowError> {
        let maximizing = self.position.turn() == self.side;
        let result = self.minimax(depth, -INF, INF, maximizing)?;
        debug!(
            depth,
            score = result.score,
            best_move = ?result.best_move.map(Move::to_uci),
            nodes = self.nodes,
            "search complete"
        );
        Ok(result)
    }

    /// Search at two depths and keep the deeper move only if it scores
    /// strictly better than the shallower one.
    pub fn choose_move(&mut self, deep: u8, shallow: u8) -> Result<MoveChoice, ShadowError> {
        let deep_result = self.search(deep)?;
        let shallow_result = self.search(shallow)?;

        debug_assert_eq!(
            self.shadow.verify(self.position),
            Ok(()),
            "shadow board out of sync after search"
        );

        let kept = if deep_result.score > shallow_result.score {
            deep_result
        } else {
            shallow_result
        };

        info!(
            side = %self.side,
            best_move = ?kept.best_move.map(Move::to_uci),
            score = kept.score,
            deep_score = deep_result.score,
            shallow_score = shallow_result.score,
            nodes = self.nodes,
            "move chosen"
        );

        Ok(MoveChoice {
            best_move: kept.best_move,
            score: kept.score,
            nodes: self.nodes,
            deep: deep_result,
            shallow: shallow_result,
        })
    }
}

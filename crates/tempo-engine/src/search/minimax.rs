//! Minimax with alpha-beta pruning over the shared game state.
//!
//! The maximizing side earns a per-move bonus on top of the child's score:
//! the positional table value plus the pawn-attack penalty, or the castling
//! bonus. The bonus is computed before descending and the child is searched
//! with the window shifted by it, so pruning never changes the result.

use tempo_core::{Move, Piece, ShadowError};

use super::{SearchResult, Searcher};
use crate::eval::check_pawn_attacks;

/// Bound used for the root window and for checkmate scores.
pub const INF: i32 = 999_999;

impl Searcher<'_> {
    /// Depth-limited minimax with alpha-beta pruning.
    ///
    /// `maximizing` is true when the side to move is the searching side.
    /// Leaves score the material balance; a side with no legal moves scores
    /// `-INF`/`+INF` when mated and 0 when stalemated. The first move
    /// reaching the best score is kept.
    pub fn minimax(
        &mut self,
        depth: u8,
        mut alpha: i32,
        mut beta: i32,
        maximizing: bool,
    ) -> Result<SearchResult, ShadowError> {
        if depth == 0 {
            self.nodes += 1;
            let score = self.evaluator.evaluate(self.ledger, self.side);
            return Ok(SearchResult::terminal(score));
        }

        let moves = self.position.legal_moves();
        if moves.is_empty() {
            let score = match (self.position.is_check(), maximizing) {
                (false, _) => 0,
                (true, true) => -INF,
                (true, false) => INF,
            };
            return Ok(SearchResult::terminal(score));
        }

        let mut best: Option<(Move, i32)> = None;
        for mv in moves {
            self.nodes += 1;
            let score = self.explore(mv, depth, alpha, beta, maximizing)?;

            if maximizing {
                if best.is_none_or(|(_, best_score)| score > best_score) {
                    best = Some((mv, score));
                }
                alpha = alpha.max(score);
            } else {
                if best.is_none_or(|(_, best_score)| score < best_score) {
                    best = Some((mv, score));
                }
                beta = beta.min(score);
            }

            if beta <= alpha {
                break;
            }
        }

        Ok(match best {
            Some((mv, score)) => SearchResult {
                score,
                best_move: Some(mv),
            },
            None => SearchResult::terminal(0),
        })
    }

    /// Score one move: make it, search the child, unmake it.
    ///
    /// All state is restored before returning, on the error path too.
    pub(crate) fn explore(
        &mut self,
        mv: Move,
        depth: u8,
        alpha: i32,
        beta: i32,
        maximizing: bool,
    ) -> Result<i32, ShadowError> {
        if let Some(castle) = self.position.castle_side(mv) {
            let bonus = if maximizing {
                self.evaluator.castle_bonus(castle)
            } else {
                0
            };

            self.position.push(mv);
            let child = self
                .shadow
                .resync(self.position)
                .and_then(|()| self.minimax(depth - 1, alpha - bonus, beta - bonus, !maximizing));
            self.position.pop();
            self.shadow.resync(self.position)?;

            return Ok(child?.score + bonus);
        }

        let undo = self.shadow.make(mv)?;
        let mover = undo.moved().color();
        let captured = undo.captured().map_or(0, Piece::value);
        self.ledger.capture(mover, captured);
        if let Some(kind) = mv.promotion {
            self.ledger.promote(mover, kind);
        }

        let bonus = if maximizing {
            let piece = undo.moved();
            self.evaluator.evaluate_position(piece, undo.to())
                + check_pawn_attacks(piece, undo.to(), self.shadow)
        } else {
            0
        };

        self.position.push(mv);
        let child = self.minimax(depth - 1, alpha - bonus, beta - bonus, !maximizing);
        self.position.pop();

        if let Some(kind) = mv.promotion {
            self.ledger.unpromote(mover, kind);
        }
        self.ledger.uncapture(mover, captured);
        self.shadow.unmake(undo);

        Ok(child?.score + bonus)
    }
}

#[cfg(test)]
mod tests {
    use tempo_core::{Color, Move, Orientation, Position, ShadowBoard};

    use super::INF;
    use crate::eval::Evaluator;
    use crate::eval::material::MaterialLedger;
    use crate::search::Searcher;

    fn setup(fen: &str, human: Color) -> (Position, ShadowBoard, MaterialLedger, Evaluator) {
        let position = Position::from_fen(fen).unwrap();
        let shadow = ShadowBoard::from_position(&position, Orientation::for_human(human)).unwrap();
        let ledger = MaterialLedger::from_shadow(&shadow);
        (position, shadow, ledger, Evaluator::new())
    }

    #[test]
    fn mated_maximizer_scores_minus_inf() {
        // Fool's mate, White to move and mated.
        let fen = "rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3";
        let (mut pos, mut shadow, mut ledger, mut eval) = setup(fen, Color::Black);
        let mut searcher = Searcher::new(&mut pos, &mut shadow, &mut ledger, &mut eval, Color::White);
        assert_eq!(searcher.minimax(3, -INF, INF, true).unwrap().score, -INF);
        assert_eq!(searcher.minimax(3, -INF, INF, false).unwrap().score, INF);
    }

    #[test]
    fn stalemate_scores_zero() {
        let fen = "7k/5Q2/6K1/8/8/8/8/8 b - - 0 1";
        let (mut pos, mut shadow, mut ledger, mut eval) = setup(fen, Color::White);
        let mut searcher = Searcher::new(&mut pos, &mut shadow, &mut ledger, &mut eval, Color::Black);
        let result = searcher.minimax(2, -INF, INF, true).unwrap();
        assert_eq!(result.score, 0);
        assert!(result.best_move.is_none());
    }

    #[test]
    fn castling_branch_adds_fixed_bonus() {
        // Engine is Black with only king and rooks; endgame so the king table is silent.
        let fen = "r3k2r/8/8/8/8/8/8/4K3 b kq - 0 1";
        let (mut pos, mut shadow, mut ledger, mut eval) = setup(fen, Color::White);
        eval.update_endgame(&ledger);
        let leaf = eval.evaluate(&ledger, Color::Black);
        let mut searcher = Searcher::new(&mut pos, &mut shadow, &mut ledger, &mut eval, Color::Black);

        let king_side: Move = "e8g8".parse().unwrap();
        let queen_side: Move = "e8c8".parse().unwrap();
        assert_eq!(searcher.explore(king_side, 1, -INF, INF, true).unwrap(), leaf + 30);
        assert_eq!(searcher.explore(queen_side, 1, -INF, INF, true).unwrap(), leaf + 10);
        // The minimizing side gets no bonus.
        assert_eq!(searcher.explore(king_side, 1, -INF, INF, false).unwrap(), leaf);
    }

    #[test]
    fn knight_into_pawn_attack_pays_its_value() {
        // Black knight f6 to e4, covered by the white pawn on d3.
        let fen = "4k3/8/5n2/8/8/3P4/8/4K3 b - - 0 1";
        let (mut pos, mut shadow, mut ledger, mut eval) = setup(fen, Color::White);
        let leaf = eval.evaluate(&ledger, Color::Black);
        let mut searcher = Searcher::new(&mut pos, &mut shadow, &mut ledger, &mut eval, Color::Black);

        let mv: Move = "f6e4".parse().unwrap();
        let knight_pst = 20;
        assert_eq!(searcher.explore(mv, 1, -INF, INF, true).unwrap(), leaf + knight_pst - 300);
    }

    #[test]
    fn explore_restores_state_after_capture_and_promotion() {
        let fen = "1n2k3/P7/8/3pP3/8/8/8/4K3 w - d6 0 2";
        let (mut pos, mut shadow, mut ledger, mut eval) = setup(fen, Color::Black);
        let before = (pos.fen(), shadow.clone(), ledger);
        let mut searcher = Searcher::new(&mut pos, &mut shadow, &mut ledger, &mut eval, Color::White);

        for uci in ["a7b8q", "a7a8n", "e5d6", "e1d2"] {
            let mv: Move = uci.parse().unwrap();
            searcher.explore(mv, 2, -INF, INF, true).unwrap();
        }
        drop(searcher);

        assert_eq!(pos.fen(), before.0);
        assert_eq!(shadow, before.1);
        assert_eq!(ledger, before.2);
        shadow.verify(&pos).unwrap();
    }
}

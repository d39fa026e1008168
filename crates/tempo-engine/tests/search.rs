//! Integration tests for the minimax search.
//!
//! Covers terminal scores, the scripted tactical scenarios, alpha-beta
//! equivalence against an unpruned reference, make/unmake restoration and
//! the per-colour table orientation.

use tempo_core::{Color, Move, Orientation, Position, ShadowBoard};
use tempo_engine::eval::check_pawn_attacks;
use tempo_engine::eval::pst::table;
use tempo_engine::{Evaluator, INF, MaterialLedger, Searcher};

/// Everything a search borrows, built from a FEN.
struct State {
    position: Position,
    shadow: ShadowBoard,
    ledger: MaterialLedger,
    evaluator: Evaluator,
}

impl State {
    fn new(fen: &str, human: Color) -> State {
        let position = Position::from_fen(fen).unwrap();
        let shadow = ShadowBoard::from_position(&position, Orientation::for_human(human)).unwrap();
        let ledger = MaterialLedger::from_shadow(&shadow);
        let mut evaluator = Evaluator::new();
        evaluator.update_endgame(&ledger);
        State {
            position,
            shadow,
            ledger,
            evaluator,
        }
    }

    fn searcher(&mut self, side: Color) -> Searcher<'_> {
        Searcher::new(
            &mut self.position,
            &mut self.shadow,
            &mut self.ledger,
            &mut self.evaluator,
            side,
        )
    }

    /// Plain minimax without pruning, scored the same way as the engine.
    fn unpruned(&mut self, side: Color, depth: u8, maximizing: bool) -> i32 {
        if depth == 0 {
            return self.evaluator.evaluate(&self.ledger, side);
        }
        let moves = self.position.legal_moves();
        if moves.is_empty() {
            return match (self.position.is_check(), maximizing) {
                (false, _) => 0,
                (true, true) => -INF,
                (true, false) => INF,
            };
        }

        let mut best = if maximizing { i32::MIN } else { i32::MAX };
        for mv in moves {
            let score = if let Some(castle) = self.position.castle_side(mv) {
                let bonus = if maximizing { self.evaluator.castle_bonus(castle) } else { 0 };
                self.position.push(mv);
                self.shadow.resync(&self.position).unwrap();
                let child = self.unpruned(side, depth - 1, !maximizing);
                self.position.pop();
                self.shadow.resync(&self.position).unwrap();
                child + bonus
            } else {
                let undo = self.shadow.make(mv).unwrap();
                let mover = undo.moved().color();
                let captured = undo.captured().map_or(0, |piece| piece.value());
                self.ledger.capture(mover, captured);
                if let Some(kind) = mv.promotion {
                    self.ledger.promote(mover, kind);
                }
                let bonus = if maximizing {
                    self.evaluator.evaluate_position(undo.moved(), undo.to())
                        + check_pawn_attacks(undo.moved(), undo.to(), &self.shadow)
                } else {
                    0
                };
                self.position.push(mv);
                let child = self.unpruned(side, depth - 1, !maximizing);
                self.position.pop();
                if let Some(kind) = mv.promotion {
                    self.ledger.unpromote(mover, kind);
                }
                self.ledger.uncapture(mover, captured);
                self.shadow.unmake(undo);
                child + bonus
            };
            best = if maximizing { best.max(score) } else { best.min(score) };
        }
        best
    }
}

fn uci(mv: Option<Move>) -> String {
    mv.map(Move::to_uci).unwrap_or_default()
}

// Positions with both sides at or below the endgame threshold, so no king
// table is touched and repeated searches are exactly reproducible.
const ENDGAME_FENS: &[&str] = &[
    "4k3/pp3ppp/8/3q4/8/2N5/P5PP/3QK3 w - - 0 1",
    "r3k2r/p6p/8/8/8/8/P6P/R3K2R w KQkq - 0 1",
    "r3k3/1p6/8/2n5/4N3/8/1P3P2/R3K3 b - - 0 1",
    "4k3/1P6/8/3pP3/8/8/6p1/4K3 w - d6 0 2",
];

// ── Terminal scores ───────────────────────────────────────────────────────────

#[test]
fn checkmated_searcher_scores_minus_inf() {
    let fen = "rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3";
    let mut state = State::new(fen, Color::Black);
    let result = state.searcher(Color::White).search(4).unwrap();
    assert_eq!(result.score, -999_999);
    assert!(result.best_move.is_none());
}

#[test]
fn checkmated_opponent_scores_plus_inf() {
    let fen = "rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3";
    let mut state = State::new(fen, Color::White);
    let result = state.searcher(Color::Black).search(2).unwrap();
    assert_eq!(result.score, 999_999);
}

#[test]
fn mate_in_one_is_found() {
    let mut state = State::new("6k1/5ppp/8/8/8/8/8/R5K1 w - - 0 1", Color::Black);
    let choice = state.searcher(Color::White).choose_move(2, 1).unwrap();
    assert_eq!(uci(choice.best_move), "a1a8");
    assert_eq!(choice.score, INF);
}

// ── Scenarios ─────────────────────────────────────────────────────────────────

#[test]
fn start_position_leaf_is_level() {
    let mut state = State::new(tempo_core::STARTING_FEN, Color::Black);
    assert_eq!(state.evaluator.evaluate(&state.ledger, Color::White), 0);

    // Depth 1 adds only the best opening bonus: a centre pawn's double step.
    let result = state.searcher(Color::White).search(1).unwrap();
    assert_eq!(result.score, 20);
    let best = uci(result.best_move);
    assert!(best == "d2d4" || best == "e2e4", "unexpected best move {best}");
}

#[test]
fn undefended_queen_is_captured() {
    let fen = "3qk3/8/8/8/3Q4/8/8/4K3 b - - 0 1";

    let mut state = State::new(fen, Color::White);
    let result = state.searcher(Color::Black).search(1).unwrap();
    assert_eq!(uci(result.best_move), "d8d4");
    // Material swing plus the queen table on d4.
    assert_eq!(result.score, 900 + 5);

    let mut state = State::new(fen, Color::White);
    let result = state.searcher(Color::Black).search(3).unwrap();
    assert_eq!(uci(result.best_move), "d8d4");
    assert!(result.score >= 900, "score {} should reflect the queen", result.score);
}

// ── Alpha-beta equivalence ────────────────────────────────────────────────────

#[test]
fn pruning_never_changes_the_score() {
    for fen in ENDGAME_FENS {
        for depth in 1..=3 {
            for side in [Color::White, Color::Black] {
                let mut pruned = State::new(fen, !side);
                let maximizing = pruned.position.turn() == side;
                let result = pruned.searcher(side).search(depth).unwrap();

                let mut full = State::new(fen, !side);
                let expected = full.unpruned(side, depth, maximizing);

                assert_eq!(
                    result.score, expected,
                    "{fen} depth {depth} side {side}: pruned {} != unpruned {expected}",
                    result.score
                );
            }
        }
    }
}

#[test]
fn repeated_searches_are_deterministic() {
    for fen in ENDGAME_FENS {
        let mut state = State::new(fen, Color::Black);
        let first = state.searcher(Color::White).choose_move(3, 1).unwrap();
        let second = state.searcher(Color::White).choose_move(3, 1).unwrap();
        assert_eq!(first, second, "{fen}");
    }
}

#[test]
fn king_table_marks_only_lower_scores() {
    // Black king on f8 with g8 free; g8 is worth 30 the first time only.
    let fen = "rnbq1k1r/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR b KQ - 0 1";
    let mut state = State::new(fen, Color::White);
    assert!(!state.evaluator.is_endgame());

    let leaf = state.evaluator.evaluate(&state.ledger, Color::Black);

    let first = state.searcher(Color::Black).search(1).unwrap();
    assert_eq!(uci(first.best_move), "f8g8");
    assert_eq!(first.score, leaf + 30);

    // g8 is now marked down, so a centre pawn push is best.
    let second = state.searcher(Color::Black).search(1).unwrap();
    assert!(second.score < first.score);
    assert_eq!(second.score, leaf + 20);

    let third = state.searcher(Color::Black).search(1).unwrap();
    assert!(third.score <= second.score);
}

// ── State restoration ─────────────────────────────────────────────────────────

#[test]
fn search_leaves_state_untouched() {
    let fens = ENDGAME_FENS
        .iter()
        .copied()
        .chain([tempo_core::STARTING_FEN, "r3k2r/pppq1ppp/2n5/3pp3/4P3/2N5/PPPQ1PPP/R3K2R w KQkq - 0 1"]);

    for fen in fens {
        for human in [Color::White, Color::Black] {
            let mut state = State::new(fen, human);
            let before = (state.position.fen(), state.shadow.clone(), state.ledger);

            state.searcher(!human).choose_move(3, 1).unwrap();

            assert_eq!(state.position.fen(), before.0, "{fen}");
            assert_eq!(state.shadow, before.1, "{fen}");
            assert_eq!(state.ledger, before.2, "{fen}");
            assert_eq!(state.position.ply(), 0);
            state.shadow.verify(&state.position).unwrap();
        }
    }
}

#[test]
fn every_move_keeps_shadow_in_step() {
    let fens = ENDGAME_FENS.iter().copied().chain([
        tempo_core::STARTING_FEN,
        "r3k2r/pppq1ppp/2n5/3pp3/4P3/2N5/PPPQ1PPP/R3K2R w KQkq - 0 1",
    ]);

    for fen in fens {
        let mut state = State::new(fen, Color::White);
        let shadow_before = state.shadow.clone();
        let ledger_before = state.ledger;

        for mv in state.position.legal_moves() {
            if state.position.castle_side(mv).is_some() {
                state.position.push(mv);
                state.shadow.resync(&state.position).unwrap();
                state.shadow.verify(&state.position).unwrap();
                state.position.pop();
                state.shadow.resync(&state.position).unwrap();
                assert_eq!(state.shadow, shadow_before, "{fen} {mv}");
                continue;
            }

            let undo = state.shadow.make(mv).unwrap();
            let mover = undo.moved().color();
            let captured = undo.captured().map_or(0, |piece| piece.value());
            state.ledger.capture(mover, captured);
            assert_eq!(state.ledger.total(), ledger_before.total() - captured);

            state.position.push(mv);
            state.shadow.verify(&state.position).unwrap();
            state.position.pop();

            state.ledger.uncapture(mover, captured);
            state.shadow.unmake(undo);
            assert_eq!(state.shadow, shadow_before, "{fen} {mv}");
            assert_eq!(state.ledger, ledger_before, "{fen} {mv}");
        }
    }
}

// ── Orientation ───────────────────────────────────────────────────────────────

/// Table value in an absolute frame: the mover's own back rank is row 0 and
/// files run a to h.
fn absolute_pst(mv: Move, color: Color, kind: tempo_core::PieceKind) -> i32 {
    let rank = mv.to.rank() as usize;
    let row = match color {
        Color::White => rank,
        Color::Black => 7 - rank,
    };
    let col = mv.to.file() as usize;
    table(kind).map_or(0, |t| t[row][col])
}

#[test]
fn opening_bonuses_match_absolute_frame_for_both_colours() {
    // Engine White (human Black, mirrored grid) and engine Black (human White).
    let cases = [
        (tempo_core::STARTING_FEN, Color::White),
        ("rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1", Color::Black),
    ];

    for (fen, engine) in cases {
        let mut state = State::new(fen, !engine);
        for mv in state.position.legal_moves() {
            let piece = state.position.piece_on(mv.from).unwrap();
            let coord = state.shadow.orientation().coord(mv.to);
            let relative = state.evaluator.evaluate_position(piece, coord);
            assert_eq!(
                relative,
                absolute_pst(mv, engine, piece.kind()),
                "{engine} {mv}"
            );
        }
    }
}

#[test]
fn castled_king_squares_score_alike_for_both_colours() {
    use tempo_core::{Piece, PieceKind, Square};

    let mut evaluator = Evaluator::new();
    let white_engine = Orientation::for_human(Color::Black);
    let black_engine = Orientation::for_human(Color::White);
    let white_king = Piece::new(PieceKind::King, Color::White);
    let black_king = Piece::new(PieceKind::King, Color::Black);

    let g1 = evaluator.evaluate_position(white_king, white_engine.coord(Square::G1));
    let g8 = evaluator.evaluate_position(black_king, black_engine.coord(Square::G8));
    let c1 = evaluator.evaluate_position(white_king, white_engine.coord(Square::C1));
    let c8 = evaluator.evaluate_position(black_king, black_engine.coord(Square::C8));
    assert_eq!((g1, c1), (30, 10));
    assert_eq!((g8, c8), (30, 10));
}

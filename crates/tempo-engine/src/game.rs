//! One human-versus-engine game.
//!
//! [`Game`] owns everything that lives for the length of a game: the
//! authoritative position, the shadow board, the material ledger and the
//! evaluator's per-game tables. Real moves go through [`Game::commit`],
//! which keeps all four in step.

use std::fmt;

use tempo_core::{
    Color, Move, Orientation, Outcome, Position, RulesError, STARTING_FEN, ShadowBoard,
    ShadowError,
};
use tracing::{debug, info};

use crate::config::{ConfigError, EngineConfig};
use crate::eval::Evaluator;
use crate::eval::material::MaterialLedger;
use crate::search::Searcher;

/// Errors reported by [`Game`] operations.
#[derive(Debug, thiserror::Error)]
pub enum GameError {
    /// No more moves can be played.
    #[error("the game is over: {status}")]
    GameOver {
        /// The final status.
        status: GameStatus,
    },

    /// The human tried to move while the engine is to move.
    #[error("it is not your turn")]
    NotYourTurn,

    /// The engine was asked to move while the human is to move.
    #[error("it is not the engine's turn")]
    NotEngineTurn,

    /// A pawn move to the last rank without a promotion piece.
    #[error("move {uci_move} needs a promotion piece (q, r, b or n)")]
    PromotionRequired {
        /// The incomplete move.
        uci_move: String,
    },

    /// The move is well formed but not legal here.
    #[error("illegal move: {uci_move}")]
    IllegalMove {
        /// The rejected move.
        uci_move: String,
    },

    /// Undo was requested with no moves played.
    #[error("no moves to undo")]
    NothingToUndo,

    /// The rules engine rejected the input.
    #[error(transparent)]
    Rules(#[from] RulesError),

    /// The shadow board lost track of the position.
    #[error(transparent)]
    Shadow(#[from] ShadowError),

    /// The engine configuration is unusable.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Where the game stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    /// Still running with this side to move.
    ToMove(Color),
    /// Finished.
    Over(Outcome),
}

impl GameStatus {
    #[inline]
    pub fn is_over(self) -> bool {
        matches!(self, GameStatus::Over(_))
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameStatus::ToMove(color) => write!(f, "{color}'s turn."),
            GameStatus::Over(Outcome::Checkmate { winner }) => {
                write!(f, "{winner} wins by checkmate.")
            }
            GameStatus::Over(Outcome::Stalemate) => f.write_str("Stalemate, neither side wins."),
            GameStatus::Over(Outcome::FivefoldRepetition) => {
                f.write_str("Draw by five-fold repetition.")
            }
            GameStatus::Over(Outcome::SeventyFiveMoves) => {
                f.write_str("Draw by seventy-five move rule.")
            }
            GameStatus::Over(Outcome::InsufficientMaterial) => {
                f.write_str("Draw by insufficient material.")
            }
        }
    }
}

/// What the engine did on its turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineTurn {
    /// The move played.
    pub mv: Move,
    /// Score of the search that produced it.
    pub score: i32,
    /// Positions evaluated over both searches.
    pub nodes: u64,
}

/// A game between a human and the engine.
pub struct Game {
    position: Position,
    shadow: ShadowBoard,
    ledger: MaterialLedger,
    evaluator: Evaluator,
    human: Color,
    config: EngineConfig,
    /// Ledger before each committed move, for undo.
    snapshots: Vec<MaterialLedger>,
}

impl Game {
    /// Start a game from the standard position.
    pub fn new(human: Color, config: EngineConfig) -> Result<Game, GameError> {
        Game::from_fen(STARTING_FEN, human, config)
    }

    /// Start a game from an arbitrary position.
    pub fn from_fen(fen: &str, human: Color, config: EngineConfig) -> Result<Game, GameError> {
        config.validate()?;
        let position = Position::from_fen(fen)?;
        let shadow = ShadowBoard::from_position(&position, Orientation::for_human(human))?;
        let ledger = MaterialLedger::from_shadow(&shadow);
        let mut evaluator = Evaluator::new();
        evaluator.update_endgame(&ledger);

        info!(human = %human, fen, "new game");
        Ok(Game {
            position,
            shadow,
            ledger,
            evaluator,
            human,
            config,
            snapshots: Vec::new(),
        })
    }

    /// Throw the current game away and start over from the standard position.
    pub fn new_game(&mut self, human: Color) -> Result<(), GameError> {
        *self = Game::new(human, self.config)?;
        Ok(())
    }

    /// Play a move for the human, given in coordinate notation.
    ///
    /// Nothing changes when the move is rejected.
    pub fn play_human(&mut self, input: &str) -> Result<Move, GameError> {
        self.ensure_running()?;
        if self.position.turn() != self.human {
            return Err(GameError::NotYourTurn);
        }

        let mv: Move = input.trim().parse()?;
        let legal = self.position.legal_moves();
        if !legal.contains(&mv) {
            let needs_promotion = mv.promotion.is_none()
                && legal
                    .iter()
                    .any(|m| m.from == mv.from && m.to == mv.to && m.promotion.is_some());
            if needs_promotion {
                return Err(GameError::PromotionRequired {
                    uci_move: mv.to_uci(),
                });
            }
            return Err(GameError::IllegalMove {
                uci_move: mv.to_uci(),
            });
        }

        self.commit(mv)?;
        Ok(mv)
    }

    /// Let the engine choose and play its move.
    pub fn play_engine(&mut self) -> Result<EngineTurn, GameError> {
        self.ensure_running()?;
        let side = self.engine_side();
        if self.position.turn() != side {
            return Err(GameError::NotEngineTurn);
        }

        let choice = Searcher::new(
            &mut self.position,
            &mut self.shadow,
            &mut self.ledger,
            &mut self.evaluator,
            side,
        )
        .choose_move(self.config.deep_depth, self.config.shallow_depth)?;

        let Some(mv) = choice.best_move else {
            return Err(GameError::GameOver {
                status: self.status(),
            });
        };

        self.commit(mv)?;
        Ok(EngineTurn {
            mv,
            score: choice.score,
            nodes: choice.nodes,
        })
    }

    /// Take back the most recent move.
    pub fn undo(&mut self) -> Result<Move, GameError> {
        let snapshot = self.snapshots.pop().ok_or(GameError::NothingToUndo)?;
        let mv = self.position.pop().ok_or(GameError::NothingToUndo)?;
        self.ledger = snapshot;
        self.shadow.resync(&self.position)?;
        debug!(mv = %mv, "undo");
        Ok(mv)
    }

    /// Current status, including how the game ended.
    pub fn status(&self) -> GameStatus {
        match self.position.outcome() {
            Some(outcome) => GameStatus::Over(outcome),
            None => GameStatus::ToMove(self.position.turn()),
        }
    }

    /// Whether it is the human's turn in a running game.
    pub fn is_human_turn(&self) -> bool {
        !self.position.is_game_over() && self.position.turn() == self.human
    }

    /// Whether it is the engine's turn in a running game.
    pub fn is_engine_turn(&self) -> bool {
        !self.position.is_game_over() && self.position.turn() == self.engine_side()
    }

    #[inline]
    pub fn position(&self) -> &Position {
        &self.position
    }

    #[inline]
    pub fn shadow(&self) -> &ShadowBoard {
        &self.shadow
    }

    #[inline]
    pub fn ledger(&self) -> &MaterialLedger {
        &self.ledger
    }

    #[inline]
    pub fn evaluator(&self) -> &Evaluator {
        &self.evaluator
    }

    #[inline]
    pub fn human(&self) -> Color {
        self.human
    }

    #[inline]
    pub fn engine_side(&self) -> Color {
        !self.human
    }

    #[inline]
    pub fn config(&self) -> EngineConfig {
        self.config
    }

    #[inline]
    pub fn is_endgame(&self) -> bool {
        self.evaluator.is_endgame()
    }

    /// Moves committed so far, oldest first.
    pub fn history(&self) -> impl Iterator<Item = Move> + '_ {
        self.position.moves()
    }

    fn ensure_running(&self) -> Result<(), GameError> {
        match self.status() {
            status @ GameStatus::Over(_) => Err(GameError::GameOver { status }),
            GameStatus::ToMove(_) => Ok(()),
        }
    }

    /// Apply a legal move to every piece of game state.
    fn commit(&mut self, mv: Move) -> Result<(), GameError> {
        let mover = self.position.turn();
        let snapshot = self.ledger;

        if self.position.castle_side(mv).is_none() {
            let undo = self.shadow.make(mv)?;
            if let Some(captured) = undo.captured() {
                self.ledger.capture(mover, captured.value());
            }
            if let Some(kind) = mv.promotion {
                self.ledger.promote(mover, kind);
            }
        }

        self.position.push(mv);
        self.snapshots.push(snapshot);
        self.shadow.resync(&self.position)?;
        self.evaluator.update_endgame(&self.ledger);

        debug!(
            mv = %mv,
            side = %mover,
            white = self.ledger.remaining(Color::White),
            black = self.ledger.remaining(Color::Black),
            "move committed"
        );
        Ok(())
    }
}

//! Search, evaluation and game state for tempo.

pub mod config;
pub mod eval;
pub mod game;
pub mod search;

pub use config::{ConfigError, EngineConfig};
pub use eval::Evaluator;
pub use eval::material::MaterialLedger;
pub use game::{EngineTurn, Game, GameError, GameStatus};
pub use search::{INF, MoveChoice, SearchResult, Searcher};

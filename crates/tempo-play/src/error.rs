//! Console front end errors.

use tempo_engine::GameError;

/// Errors that can occur while running a console session.
#[derive(Debug, thiserror::Error)]
pub enum PlayError {
    /// A colour argument was not `white`, `black` or `random`.
    #[error("invalid colour: {value} (expected white, black or random)")]
    InvalidColor {
        /// The rejected argument.
        value: String,
    },

    /// A command that needs an argument was given none.
    #[error("missing argument for {command}")]
    MissingArgument {
        /// The command word.
        command: String,
    },

    /// The game rejected an operation.
    #[error(transparent)]
    Game(#[from] GameError),

    /// Reading input or writing output failed.
    #[error("I/O error: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },
}

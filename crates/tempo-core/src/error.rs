//! Error types for the rules adapter and the shadow board.

/// Errors reported by the rules engine adapter.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RulesError {
    /// The FEN string was rejected by the rules engine.
    #[error("invalid FEN: {fen}")]
    InvalidFen {
        /// The rejected FEN string.
        fen: String,
    },

    /// A move string is not valid coordinate notation.
    #[error("invalid move: {uci_move}")]
    InvalidMove {
        /// The string that failed to parse.
        uci_move: String,
    },

    /// A well-formed move that is not legal in the current position.
    #[error("illegal move: {uci_move}")]
    IllegalMove {
        /// The rejected move in coordinate notation.
        uci_move: String,
    },
}

/// Errors raised when the shadow board cannot mirror the rules engine.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ShadowError {
    /// The piece placement field of a FEN could not be decoded.
    #[error("malformed piece placement: {placement}")]
    MalformedPlacement {
        /// The offending placement field.
        placement: String,
    },

    /// A move was applied from an empty shadow cell.
    #[error("no piece on {square} in shadow board")]
    EmptyOrigin {
        /// Origin square in coordinate notation.
        square: String,
    },

    /// The shadow board diverged from the authoritative position.
    #[error("shadow board diverged at {square}: expected {expected}, found {found}")]
    Inconsistent {
        /// Square in coordinate notation.
        square: String,
        /// FEN character the rules engine reports, or `.` for empty.
        expected: char,
        /// FEN character the shadow board holds, or `.` for empty.
        found: char,
    },
}

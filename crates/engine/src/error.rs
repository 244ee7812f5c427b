//! Error types for the chess engine
//!
//! Covers input validation (board strings, square names, move notation) and
//! move application. Search-time conditions (mate, draw, timeout) are not
//! errors; they are encoded in scores and game states.

use thiserror::Error;

/// Errors that can occur in the chess engine
#[derive(Error, Debug)]
pub enum EngineError {
    /// Board string is not a valid 65-character position encoding
    #[error("invalid board string: {reason}")]
    InvalidBoardString { reason: String },

    /// Square name outside a1..h8
    #[error("invalid square name: {name}")]
    InvalidSquare { name: String },

    /// Move notation does not match any pseudo-legal successor
    #[error("unknown move: {notation}")]
    UnknownMove { notation: String },

    /// Move is pseudo-legal but leaves the mover's own king in check
    #[error("illegal move (king left in check): {notation}")]
    IllegalMove { notation: String },

    /// The position is terminal; no legal move exists
    #[error("no legal move available")]
    NoLegalMove,
}

/// Result type alias for engine operations
pub type EngineResult<T> = Result<T, EngineError>;

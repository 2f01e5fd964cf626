//! Error types for board parsing, check evaluation and the game loop

use thiserror::Error;

use crate::piece::Side;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BoardError {
    #[error("Malformed board: {0}")]
    MalformedBoard(String),

    #[error("Invalid king count: {side} has {count} kings, expected exactly one")]
    InvalidKingCount { side: Side, count: usize },
}

#[derive(Error, Debug)]
pub enum GameLoopError {
    #[error("Board #{board}: {source}")]
    InvalidBoard {
        board: usize,
        #[source]
        source: BoardError,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

//! Error types for the game engine and startup

use std::path::PathBuf;
use thiserror::Error;

/// Reasons a submitted word is refused. The turn stays with the submitter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Word not in dictionary")]
    NotInDictionary,
    #[error("Word already found")]
    AlreadyFound,
    #[error("Word not on board")]
    NotOnBoard,
}

/// Client-visible failures. Display text is sent verbatim in `error` events.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("Game not found")]
    NotFound,
    #[error("Game is full")]
    GameFull,
    #[error("It's not your turn")]
    NotYourTurn,
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("Invalid grid size {size}: must be between 1 and {max}")]
    InvalidGridSize { size: usize, max: usize },
    #[error("Already in a game")]
    AlreadyInGame,
    #[error("Invalid payload for {0}")]
    InvalidPayload(String),
}

#[derive(Debug, Error)]
pub enum DictionaryError {
    #[error("failed to read word list {path}: {source}")]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

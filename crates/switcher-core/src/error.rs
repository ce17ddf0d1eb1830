use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Invalid shortcut: {0}")]
    InvalidShortcut(String),

    #[error("Modal grab unavailable")]
    GrabUnavailable,

    #[error("Need at least two items, got {0}")]
    InsufficientItems(usize),

    #[error("A switcher session is already active")]
    SessionActive,
}

pub type Result<T> = std::result::Result<T, Error>;

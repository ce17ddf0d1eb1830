//! Error types for the switcher CLI.

/// Errors raised while loading or replaying a script
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Core error
    #[error("Core error: {0}")]
    Core(#[from] switcher_core::Error),

    /// Script is well-formed JSON but not a usable session
    #[error("Invalid script: {0}")]
    InvalidScript(String),
}

pub type Result<T> = std::result::Result<T, CliError>;

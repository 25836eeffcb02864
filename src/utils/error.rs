//! Error types for watchpage
//!
//! This module defines the error type shared by the coordinator and its
//! components. We use thiserror for the library error and anyhow at the
//! binary's top level.

use thiserror::Error;

/// Main error type for watchpage
#[derive(Error, Debug)]
pub enum WatchPageError {
    /// The page address does not yield a usable media URL
    #[error("Invalid media URL: {0}")]
    InvalidUrl(String),

    /// External player identifier outside the known set
    #[error("Unknown player: {0}")]
    UnknownPlayer(String),

    /// Clipboard write failed
    #[error("Clipboard error: {0}")]
    Clipboard(String),

    /// File download could not be triggered
    #[error("Download error: {0}")]
    Download(String),

    /// Opening a new browsing context failed
    #[error("Navigation error: {0}")]
    Navigation(String),

    /// Media player widget errors
    #[error("Player error: {0}")]
    Player(String),

    /// Preference storage errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Scripted session errors
    #[error("Session error: {0}")]
    Session(String),

    /// File I/O errors
    #[error("File error: {0}")]
    FileIO(#[from] std::io::Error),

    /// JSON encoding errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl WatchPageError {
    /// Create a player error from string
    pub fn player_error<S: Into<String>>(msg: S) -> Self {
        WatchPageError::Player(msg.into())
    }
}

/// Convenience type alias for Results in watchpage
pub type Result<T> = std::result::Result<T, WatchPageError>;

/// Extension trait for converting other errors to WatchPageError
pub trait IntoPageError<T> {
    /// Convert this error into a WatchPageError with the given context
    fn storage_err(self, context: &str) -> Result<T>;
    fn config_err(self, context: &str) -> Result<T>;
    fn session_err(self, context: &str) -> Result<T>;
}

impl<T, E: std::fmt::Display> IntoPageError<T> for std::result::Result<T, E> {
    fn storage_err(self, context: &str) -> Result<T> {
        self.map_err(|e| WatchPageError::Storage(format!("{}: {}", context, e)))
    }

    fn config_err(self, context: &str) -> Result<T> {
        self.map_err(|e| WatchPageError::Config(format!("{}: {}", context, e)))
    }

    fn session_err(self, context: &str) -> Result<T> {
        self.map_err(|e| WatchPageError::Session(format!("{}: {}", context, e)))
    }
}

//! Error types for LiveTV Core

use crate::types::ViewId;
use thiserror::Error;

/// Result type alias for view and controller operations
pub type Result<T> = std::result::Result<T, Error>;

/// Library error types
///
/// Playback failures reported by the engine are not part of this enum; they
/// are observed through [`crate::engine::EngineListener`] and never returned
/// to callers.
#[derive(Error, Debug)]
pub enum Error {
    // Request errors
    #[error("Invalid URL {url:?}: {reason}")]
    InvalidUrl { url: String, reason: String },

    // Engine errors
    #[error("Failed to create playback engine: {0}")]
    EngineCreation(String),

    // Lifecycle errors
    #[error("Controller already released, cannot {operation}")]
    AlreadyReleased { operation: &'static str },

    #[error("Invalid controller state transition: {from} -> {to}")]
    InvalidStateTransition { from: String, to: String },

    #[error("View {0} already exists")]
    ViewExists(ViewId),

    #[error("Unknown view {0}")]
    UnknownView(ViewId),

    // Configuration errors
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Create an invalid URL error
    pub fn invalid_url(url: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::InvalidUrl {
            url: url.into(),
            reason: reason.into(),
        }
    }

    /// Returns true if this error is a caller bug rather than bad input
    pub fn is_misuse(&self) -> bool {
        matches!(
            self,
            Error::AlreadyReleased { .. }
                | Error::InvalidStateTransition { .. }
                | Error::ViewExists(_)
                | Error::UnknownView(_)
        )
    }

    /// Returns the error code for logs and records
    pub fn error_code(&self) -> &'static str {
        match self {
            Error::InvalidUrl { .. } => "INVALID_URL",
            Error::EngineCreation(_) => "ENGINE_CREATE",
            Error::AlreadyReleased { .. } => "RESOURCE_MISUSE",
            Error::InvalidStateTransition { .. } => "INVALID_STATE",
            Error::ViewExists(_) => "VIEW_EXISTS",
            Error::UnknownView(_) => "UNKNOWN_VIEW",
            Error::InvalidConfig(_) => "INVALID_CONFIG",
            Error::Json(_) => "JSON",
        }
    }
}

//! Playback engine seam
//!
//! The engine owns fetch, demux, decode and render. This crate only issues
//! commands through [`PlaybackEngine`] and receives notifications through an
//! [`EngineListener`], which may be invoked from any engine thread.

mod headless;

pub use headless::{HeadlessEngine, HeadlessEngineFactory};

use crate::{EngineConfig, EngineListener, PlaybackRequest, Result, VideoSurface};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Commands accepted by a playback engine instance
pub trait PlaybackEngine: Send {
    /// Bind the engine's video output to the surface
    fn attach_surface(&mut self, surface: &VideoSurface);

    /// Unbind the video output
    fn detach_surface(&mut self);

    /// Set the active media item
    fn set_request(&mut self, request: &PlaybackRequest);

    /// Start playing as soon as enough is buffered
    fn set_play_when_ready(&mut self, play_when_ready: bool);

    /// Start loading the active item
    fn prepare(&mut self);

    /// Free every engine resource. Called at most once.
    fn release(&mut self);
}

/// Builds engine instances for new views
pub trait EngineFactory: Send + Sync {
    /// Create an idle engine configured per `config`.
    ///
    /// The engine reports errors and playing changes through `listener` for
    /// its whole lifetime.
    fn create(&self, config: &EngineConfig, listener: EngineListener) -> Result<Box<dyn PlaybackEngine>>;
}

/// Notifications delivered by an engine
#[derive(Debug, Clone)]
pub enum EngineEvent {
    /// Buffering, network or decoding failure
    Error(PlaybackError),
    /// Engine started or stopped rendering frames
    IsPlayingChanged(bool),
}

/// Engine failure categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlaybackErrorCode {
    Unspecified,
    RemoteError,
    BehindLiveWindow,
    Timeout,
    IoUnspecified,
    IoNetworkConnectionFailed,
    IoNetworkConnectionTimeout,
    IoInvalidHttpContentType,
    IoBadHttpStatus,
    IoFileNotFound,
    ParsingContainerMalformed,
    ParsingManifestMalformed,
    ParsingContainerUnsupported,
    ParsingManifestUnsupported,
    DecoderInitFailed,
    DecoderQueryFailed,
    DecodingFailed,
    DecodingFormatUnsupported,
    AudioTrackInitFailed,
    AudioTrackWriteFailed,
}

impl PlaybackErrorCode {
    /// Engine-style constant name, e.g. `ERROR_CODE_IO_BAD_HTTP_STATUS`
    pub fn name(&self) -> &'static str {
        match self {
            Self::Unspecified => "ERROR_CODE_UNSPECIFIED",
            Self::RemoteError => "ERROR_CODE_REMOTE_ERROR",
            Self::BehindLiveWindow => "ERROR_CODE_BEHIND_LIVE_WINDOW",
            Self::Timeout => "ERROR_CODE_TIMEOUT",
            Self::IoUnspecified => "ERROR_CODE_IO_UNSPECIFIED",
            Self::IoNetworkConnectionFailed => "ERROR_CODE_IO_NETWORK_CONNECTION_FAILED",
            Self::IoNetworkConnectionTimeout => "ERROR_CODE_IO_NETWORK_CONNECTION_TIMEOUT",
            Self::IoInvalidHttpContentType => "ERROR_CODE_IO_INVALID_HTTP_CONTENT_TYPE",
            Self::IoBadHttpStatus => "ERROR_CODE_IO_BAD_HTTP_STATUS",
            Self::IoFileNotFound => "ERROR_CODE_IO_FILE_NOT_FOUND",
            Self::ParsingContainerMalformed => "ERROR_CODE_PARSING_CONTAINER_MALFORMED",
            Self::ParsingManifestMalformed => "ERROR_CODE_PARSING_MANIFEST_MALFORMED",
            Self::ParsingContainerUnsupported => "ERROR_CODE_PARSING_CONTAINER_UNSUPPORTED",
            Self::ParsingManifestUnsupported => "ERROR_CODE_PARSING_MANIFEST_UNSUPPORTED",
            Self::DecoderInitFailed => "ERROR_CODE_DECODER_INIT_FAILED",
            Self::DecoderQueryFailed => "ERROR_CODE_DECODER_QUERY_FAILED",
            Self::DecodingFailed => "ERROR_CODE_DECODING_FAILED",
            Self::DecodingFormatUnsupported => "ERROR_CODE_DECODING_FORMAT_UNSUPPORTED",
            Self::AudioTrackInitFailed => "ERROR_CODE_AUDIO_TRACK_INIT_FAILED",
            Self::AudioTrackWriteFailed => "ERROR_CODE_AUDIO_TRACK_WRITE_FAILED",
        }
    }
}

/// Failure reported by the engine
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[error("{}: {message}", .code.name())]
pub struct PlaybackError {
    pub code: PlaybackErrorCode,
    /// Human-readable description
    pub message: String,
    /// Underlying cause, if the engine exposed one
    pub cause: Option<String>,
}

impl PlaybackError {
    pub fn new(code: PlaybackErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            cause: None,
        }
    }

    pub fn with_cause(mut self, cause: impl Into<String>) -> Self {
        self.cause = Some(cause.into());
        self
    }

    pub fn code_name(&self) -> &'static str {
        self.code.name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_names() {
        assert_eq!(PlaybackErrorCode::Unspecified.name(), "ERROR_CODE_UNSPECIFIED");
        assert_eq!(
            PlaybackErrorCode::BehindLiveWindow.name(),
            "ERROR_CODE_BEHIND_LIVE_WINDOW"
        );
    }

    #[test]
    fn test_playback_error_display() {
        let error = PlaybackError::new(PlaybackErrorCode::IoBadHttpStatus, "Response code: 403")
            .with_cause("HttpDataSource$InvalidResponseCodeException");

        assert_eq!(error.code_name(), "ERROR_CODE_IO_BAD_HTTP_STATUS");
        assert_eq!(error.to_string(), "ERROR_CODE_IO_BAD_HTTP_STATUS: Response code: 403");
        assert_eq!(
            error.cause.as_deref(),
            Some("HttpDataSource$InvalidResponseCodeException")
        );
    }
}

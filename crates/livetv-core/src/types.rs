//! Core types for LiveTV Core

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Host-assigned identifier of an embedded view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ViewId(pub i64);

impl std::fmt::Display for ViewId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for ViewId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

/// Unique identifier for a playback session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub Uuid);

impl SessionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Streaming protocol hint handed to the playback engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProtocolTag {
    /// HTTP Live Streaming (`.m3u8` playlists)
    Hls,
    /// MPEG-DASH (`.mpd` manifests)
    Dash,
    /// Microsoft Smooth Streaming (`.ism` manifests)
    SmoothStreaming,
    /// No hint, the engine probes the URI itself
    Unspecified,
}

impl ProtocolTag {
    /// MIME type used as the explicit content-type hint
    pub fn mime_type(&self) -> Option<&'static str> {
        match self {
            ProtocolTag::Hls => Some("application/x-mpegURL"),
            ProtocolTag::Dash => Some("application/dash+xml"),
            ProtocolTag::SmoothStreaming => Some("application/vnd.ms-sstr+xml"),
            ProtocolTag::Unspecified => None,
        }
    }

    pub fn is_specified(&self) -> bool {
        *self != ProtocolTag::Unspecified
    }
}

impl std::fmt::Display for ProtocolTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProtocolTag::Hls => write!(f, "HLS"),
            ProtocolTag::Dash => write!(f, "DASH"),
            ProtocolTag::SmoothStreaming => write!(f, "SmoothStreaming"),
            ProtocolTag::Unspecified => write!(f, "Unspecified"),
        }
    }
}

/// Playback controller states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ControllerState {
    /// No engine yet
    Uninitialized,
    /// Engine created and bound to the surface, no active item
    Idle,
    /// Request submitted with auto-start, preparation issued
    Prepared,
    /// Engine reported that it is playing
    Playing,
    /// Engine released, terminal
    Released,
}

impl ControllerState {
    /// Check if transition to target state is valid
    pub fn can_transition_to(&self, target: ControllerState) -> bool {
        use ControllerState::*;
        matches!(
            (self, target),
            (Uninitialized, Idle) |
            (Idle, Prepared) |
            (Prepared, Playing) | (Playing, Prepared) |
            (Uninitialized, Released) | (Idle, Released) | (Prepared, Released) | (Playing, Released)
        )
    }

    pub fn is_released(&self) -> bool {
        *self == ControllerState::Released
    }
}

impl std::fmt::Display for ControllerState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ControllerState::Uninitialized => write!(f, "uninitialized"),
            ControllerState::Idle => write!(f, "idle"),
            ControllerState::Prepared => write!(f, "prepared"),
            ControllerState::Playing => write!(f, "playing"),
            ControllerState::Released => write!(f, "released"),
        }
    }
}

/// How video is scaled inside the surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResizeMode {
    /// Letterbox, keep aspect ratio
    Fit,
    Fill,
    Zoom,
}

/// Presentation options of the output surface
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurfaceOptions {
    /// Show playback controls (the embedding app owns all UI)
    pub use_controller: bool,
    /// Keep the display awake while the surface is shown
    pub keep_screen_on: bool,
    pub resize_mode: ResizeMode,
    /// Color shown while no frame is rendered
    pub shutter_color: String,
    /// Take input focus when composited
    pub request_focus: bool,
}

impl Default for SurfaceOptions {
    fn default() -> Self {
        Self {
            use_controller: false,
            keep_screen_on: true,
            resize_mode: ResizeMode::Fit,
            shutter_color: "#000000".to_string(),
            request_focus: true,
        }
    }
}

/// Renderable surface handed to the host for compositing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoSurface {
    view_id: ViewId,
    options: SurfaceOptions,
}

impl VideoSurface {
    pub fn new(view_id: ViewId, options: SurfaceOptions) -> Self {
        Self { view_id, options }
    }

    pub fn view_id(&self) -> ViewId {
        self.view_id
    }

    pub fn options(&self) -> &SurfaceOptions {
        &self.options
    }
}

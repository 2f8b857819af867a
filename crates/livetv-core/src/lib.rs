//! LiveTV Core - Embeddable Player View
//!
//! This crate turns a view's creation payload into a playing media session:
//! - Protocol resolution for stream URLs (HLS, DASH, Smooth Streaming)
//! - Playback request construction with explicit content-type hints
//! - Playback controller owning one engine instance
//! - View lifecycle binding engine creation and release to the view
//! - Structured playback error reporting
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                          LiveTV Core                            │
//! ├─────────────────────────────────────────────────────────────────┤
//! │                                                                 │
//! │   payload ──► ┌──────────────┐   tag   ┌──────────────┐         │
//! │    {url}      │   Resolver   │ ──────► │   Request    │         │
//! │               └──────────────┘         │   Builder    │         │
//! │                                        └──────┬───────┘         │
//! │                                               │                 │
//! │   ┌──────────────┐  open/close  ┌─────────────┴──┐              │
//! │   │ View Factory │ ───────────► │  Player View   │              │
//! │   └──────────────┘              └─────────────┬──┘              │
//! │                                               │                 │
//! │   ┌──────────────┐   records    ┌─────────────┴──┐   commands   │
//! │   │  Error Sink  │ ◄─────────── │   Controller   │ ──► Engine   │
//! │   └──────────────┘              └────────────────┘ ◄── events   │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```rust
//! use livetv_core::{ControllerState, HeadlessEngineFactory, ViewFactory, ViewId};
//! use serde_json::json;
//!
//! let mut views = ViewFactory::new(HeadlessEngineFactory);
//! let view = views.create(ViewId(1), &json!({ "url": "https://cdn.example/live.m3u8" })).unwrap();
//! assert_eq!(view.controller().state(), ControllerState::Playing);
//! views.dispose(ViewId(1)).unwrap();
//! ```

pub mod config;
pub mod controller;
pub mod engine;
pub mod error;
pub mod factory;
pub mod report;
pub mod request;
pub mod resolver;
pub mod types;
pub mod view;

pub use config::{EngineConfig, ExtensionRendererMode, ViewConfig};
pub use controller::{EngineListener, PlaybackController};
pub use engine::{
    EngineEvent, EngineFactory, HeadlessEngine, HeadlessEngineFactory, PlaybackEngine,
    PlaybackError, PlaybackErrorCode,
};
pub use error::{Error, Result};
pub use factory::ViewFactory;
pub use report::{CollectingSink, ErrorRecord, ErrorSink, TracingSink};
pub use request::{build, PlaybackRequest};
pub use resolver::{infer_content_type, resolve};
pub use types::*;
pub use view::PlayerView;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize the library
pub fn init() {
    tracing::info!(version = VERSION, "LiveTV Core initialized");
}

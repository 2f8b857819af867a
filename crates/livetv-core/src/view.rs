//! Player view - ties one playback session to a view's lifetime
//!
//! [`PlayerView::open`] is the only place a session is created and
//! [`PlayerView::close`] the only place it is released. `close` consumes the
//! view, so the host cannot close it twice or touch the surface afterwards.

use crate::{
    build, resolve, EngineConfig, EngineFactory, ErrorSink, PlaybackController, ProtocolTag,
    Result, SurfaceOptions, ViewConfig, ViewId, VideoSurface,
};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// Embeddable video view backed by one playback engine
#[derive(Debug)]
pub struct PlayerView {
    id: ViewId,
    config: ViewConfig,
    protocol: Option<ProtocolTag>,
    surface: VideoSurface,
    controller: PlaybackController,
}

impl PlayerView {
    /// Construct the view from the host's creation payload.
    ///
    /// A missing or blank `url`, or one the request builder rejects, leaves
    /// the view idle with a blank surface. Only engine creation can fail.
    #[instrument(skip(args, factory, engine_config, sink))]
    pub fn open(
        id: ViewId,
        args: &Value,
        factory: &dyn EngineFactory,
        engine_config: &EngineConfig,
        sink: Arc<dyn ErrorSink>,
    ) -> Result<Self> {
        let config = ViewConfig::from_args(args);
        let surface = VideoSurface::new(id, SurfaceOptions::default());
        let mut controller = PlaybackController::create(factory, engine_config, &surface, sink)?;

        let protocol = config.url().map(resolve);
        match (config.url(), protocol) {
            (Some(url), Some(protocol)) => match build(url, protocol) {
                Ok(request) => {
                    info!(url, %protocol, "Starting playback");
                    controller.submit(request)?;
                }
                Err(e) => {
                    warn!(url, error = %e, "Unusable URL, view stays idle");
                }
            },
            _ => debug!("No URL configured, view stays idle"),
        }

        Ok(Self {
            id,
            config,
            protocol,
            surface,
            controller,
        })
    }

    /// Release the playback session
    #[instrument(skip(self), fields(view_id = %self.id))]
    pub fn close(mut self) -> Result<()> {
        self.controller.release()?;
        info!("View closed");
        Ok(())
    }

    pub fn id(&self) -> ViewId {
        self.id
    }

    pub fn config(&self) -> &ViewConfig {
        &self.config
    }

    /// Resolved protocol of the configured URL, `None` without a URL
    pub fn protocol(&self) -> Option<ProtocolTag> {
        self.protocol
    }

    /// Surface handle for the host to composite
    pub fn surface(&self) -> &VideoSurface {
        &self.surface
    }

    pub fn controller(&self) -> &PlaybackController {
        &self.controller
    }
}

//! Decoder-less engine
//!
//! Accepts every command and renders nothing. With auto-start on, it reports
//! playing as soon as it is prepared. Used by the CLI and by hosts that run
//! without a video pipeline.

use super::{EngineFactory, PlaybackEngine};
use crate::{EngineConfig, EngineListener, PlaybackRequest, Result, ViewId, VideoSurface};
use tracing::{debug, info, warn};

/// Builds [`HeadlessEngine`] instances
#[derive(Debug, Clone, Copy, Default)]
pub struct HeadlessEngineFactory;

impl EngineFactory for HeadlessEngineFactory {
    fn create(&self, config: &EngineConfig, listener: EngineListener) -> Result<Box<dyn PlaybackEngine>> {
        Ok(Box::new(HeadlessEngine::new(config.clone(), listener)))
    }
}

pub struct HeadlessEngine {
    config: EngineConfig,
    listener: EngineListener,
    surface: Option<ViewId>,
    request: Option<PlaybackRequest>,
    play_when_ready: bool,
    playing: bool,
    released: bool,
}

impl HeadlessEngine {
    pub fn new(config: EngineConfig, listener: EngineListener) -> Self {
        debug!(
            user_agent = %config.user_agent,
            cross_protocol_redirects = config.allow_cross_protocol_redirects,
            decoder_fallback = config.enable_decoder_fallback,
            renderer_mode = ?config.extension_renderer_mode,
            "Headless engine created"
        );
        Self {
            config,
            listener,
            surface: None,
            request: None,
            play_when_ready: false,
            playing: false,
            released: false,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }
}

impl PlaybackEngine for HeadlessEngine {
    fn attach_surface(&mut self, surface: &VideoSurface) {
        debug!(view_id = %surface.view_id(), "Surface attached");
        self.surface = Some(surface.view_id());
    }

    fn detach_surface(&mut self) {
        if let Some(view_id) = self.surface.take() {
            debug!(view_id = %view_id, "Surface detached");
        }
    }

    fn set_request(&mut self, request: &PlaybackRequest) {
        debug!(uri = %request.uri(), mime_type = ?request.mime_type(), "Media item set");
        self.request = Some(request.clone());
    }

    fn set_play_when_ready(&mut self, play_when_ready: bool) {
        self.play_when_ready = play_when_ready;
    }

    fn prepare(&mut self) {
        let Some(request) = &self.request else {
            warn!("Prepare without a media item");
            return;
        };

        info!(uri = %request.uri(), "Headless playback prepared");
        if self.play_when_ready && !self.playing {
            self.playing = true;
            self.listener.on_is_playing_changed(true);
        }
    }

    fn release(&mut self) {
        if self.released {
            warn!("Headless engine released twice");
            return;
        }
        self.released = true;
        self.playing = false;
        self.request = None;
        debug!("Headless engine released");
    }
}

//! Playback Controller - owns one engine instance
//!
//! State machine:
//!
//! ```text
//! Uninitialized -> Idle -> Prepared <-> Playing
//!        \          \         \           \
//!         +----------+---------+-----------+--> Released
//! ```
//!
//! Engine callbacks and the release path share one lock. The `Released`
//! state doubles as the released flag: callbacks arriving after it are
//! dropped, and a callback already inside the lock finishes before release
//! proceeds. Engine commands are always issued outside the lock.

use crate::{
    engine::{EngineEvent, EngineFactory, PlaybackEngine, PlaybackError},
    report::{ErrorRecord, ErrorSink},
    ControllerState, EngineConfig, Error, PlaybackRequest, Result, SessionId, ViewId, VideoSurface,
};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::watch;
use tracing::{debug, info, instrument, warn};

struct GateInner {
    state: ControllerState,
    active_request: Option<PlaybackRequest>,
    auto_start: bool,
    error_count: u64,
    last_error: Option<PlaybackError>,
}

/// State shared between the controller and engine callbacks
struct CallbackGate {
    view_id: ViewId,
    session_id: SessionId,
    inner: Mutex<GateInner>,
    state_tx: watch::Sender<ControllerState>,
    sink: Arc<dyn ErrorSink>,
}

impl CallbackGate {
    fn lock(&self) -> MutexGuard<'_, GateInner> {
        // Poisoning only means a sink panicked; release must still go through
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn transition(&self, inner: &mut GateInner, to: ControllerState) -> Result<()> {
        let from = inner.state;
        if !from.can_transition_to(to) {
            return Err(Error::InvalidStateTransition {
                from: from.to_string(),
                to: to.to_string(),
            });
        }

        inner.state = to;
        self.state_tx.send_replace(to);
        info!(view_id = %self.view_id, session_id = %self.session_id, %from, %to, "State transition");
        Ok(())
    }
}

/// Callback endpoint handed to the engine at creation.
///
/// Cheap to clone and safe to call from any thread, before or after the
/// controller is released.
#[derive(Clone)]
pub struct EngineListener {
    gate: Arc<CallbackGate>,
}

impl EngineListener {
    pub fn on_event(&self, event: EngineEvent) {
        let gate = &self.gate;
        let mut inner = gate.lock();

        if inner.state.is_released() {
            debug!(view_id = %gate.view_id, ?event, "Dropping engine event after release");
            return;
        }

        match event {
            EngineEvent::Error(error) => {
                inner.error_count += 1;
                gate.sink.report(&ErrorRecord::new(gate.view_id, gate.session_id, &error));
                inner.last_error = Some(error);
            }
            EngineEvent::IsPlayingChanged(playing) => {
                let target = if playing {
                    ControllerState::Playing
                } else {
                    ControllerState::Prepared
                };
                if inner.state != target {
                    if let Err(e) = gate.transition(&mut inner, target) {
                        debug!(view_id = %gate.view_id, error = %e, "Ignoring playing change");
                    }
                }
            }
        }
    }

    /// Report an engine failure. Never stops or retries playback.
    pub fn on_error(&self, error: PlaybackError) {
        self.on_event(EngineEvent::Error(error));
    }

    pub fn on_is_playing_changed(&self, playing: bool) {
        self.on_event(EngineEvent::IsPlayingChanged(playing));
    }
}

/// Controller for a single engine instance
pub struct PlaybackController {
    gate: Arc<CallbackGate>,
    /// `None` once released
    engine: Option<Box<dyn PlaybackEngine>>,
}

impl PlaybackController {
    /// Create the engine and bind it to `surface`.
    ///
    /// The controller ends up `Idle`: the surface is composited (blank) but
    /// nothing plays until [`submit`](Self::submit).
    #[instrument(skip_all, fields(view_id = %surface.view_id()))]
    pub fn create(
        factory: &dyn EngineFactory,
        config: &EngineConfig,
        surface: &VideoSurface,
        sink: Arc<dyn ErrorSink>,
    ) -> Result<Self> {
        config.validate()?;

        let (state_tx, _) = watch::channel(ControllerState::Uninitialized);
        let gate = Arc::new(CallbackGate {
            view_id: surface.view_id(),
            session_id: SessionId::new(),
            inner: Mutex::new(GateInner {
                state: ControllerState::Uninitialized,
                active_request: None,
                auto_start: false,
                error_count: 0,
                last_error: None,
            }),
            state_tx,
            sink,
        });

        let mut engine = factory.create(
            config,
            EngineListener {
                gate: Arc::clone(&gate),
            },
        )?;
        engine.attach_surface(surface);

        {
            let mut inner = gate.lock();
            gate.transition(&mut inner, ControllerState::Idle)?;
        }

        info!(
            session_id = %gate.session_id,
            user_agent = %config.user_agent,
            "Playback engine created"
        );

        Ok(Self {
            gate,
            engine: Some(engine),
        })
    }

    /// Make `request` the active item and start preparing it with auto-start.
    ///
    /// Only valid once, from `Idle`.
    #[instrument(skip_all, fields(view_id = %self.gate.view_id, uri = %request.uri()))]
    pub fn submit(&mut self, request: PlaybackRequest) -> Result<()> {
        {
            let mut inner = self.gate.lock();
            if inner.state.is_released() {
                warn!("Submit on a released controller");
                return Err(Error::AlreadyReleased { operation: "submit" });
            }
            // State first, so a synchronous engine callback sees Prepared
            self.gate.transition(&mut inner, ControllerState::Prepared)?;
            inner.active_request = Some(request.clone());
            inner.auto_start = true;
        }

        let engine = self
            .engine
            .as_mut()
            .ok_or(Error::AlreadyReleased { operation: "submit" })?;
        engine.set_request(&request);
        engine.set_play_when_ready(true);
        engine.prepare();

        info!(mime_type = ?request.mime_type(), "Playback requested");
        Ok(())
    }

    /// Detach the surface, then release the engine. Exactly once.
    #[instrument(skip_all, fields(view_id = %self.gate.view_id))]
    pub fn release(&mut self) -> Result<()> {
        {
            let mut inner = self.gate.lock();
            if inner.state.is_released() {
                warn!("Release called twice");
                return Err(Error::AlreadyReleased { operation: "release" });
            }
            self.gate.transition(&mut inner, ControllerState::Released)?;
            inner.active_request = None;
            inner.auto_start = false;
        }

        if let Some(mut engine) = self.engine.take() {
            engine.detach_surface();
            engine.release();
        }

        info!(session_id = %self.gate.session_id, "Playback engine released");
        Ok(())
    }

    pub fn view_id(&self) -> ViewId {
        self.gate.view_id
    }

    pub fn session_id(&self) -> SessionId {
        self.gate.session_id
    }

    /// Get current state
    pub fn state(&self) -> ControllerState {
        self.gate.lock().state
    }

    /// Subscribe to state changes
    pub fn subscribe_state(&self) -> watch::Receiver<ControllerState> {
        self.gate.state_tx.subscribe()
    }

    pub fn is_released(&self) -> bool {
        self.state().is_released()
    }

    pub fn active_request(&self) -> Option<PlaybackRequest> {
        self.gate.lock().active_request.clone()
    }

    pub fn has_active_item(&self) -> bool {
        self.gate.lock().active_request.is_some()
    }

    pub fn auto_start(&self) -> bool {
        self.gate.lock().auto_start
    }

    /// Number of engine errors observed
    pub fn error_count(&self) -> u64 {
        self.gate.lock().error_count
    }

    pub fn last_error(&self) -> Option<PlaybackError> {
        self.gate.lock().last_error.clone()
    }
}

impl Drop for PlaybackController {
    fn drop(&mut self) {
        if self.engine.is_some() {
            warn!(view_id = %self.gate.view_id, "Controller dropped without release");
            let _ = self.release();
        }
    }
}

impl std::fmt::Debug for PlaybackController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlaybackController")
            .field("view_id", &self.gate.view_id)
            .field("session_id", &self.gate.session_id)
            .field("state", &self.state())
            .finish()
    }
}

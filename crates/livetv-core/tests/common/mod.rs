//! Recording engine used by the integration tests

#![allow(dead_code)]

use livetv_core::{
    EngineConfig, EngineFactory, EngineListener, Error, PlaybackEngine, PlaybackRequest, Result,
    ViewId, VideoSurface,
};
use std::sync::{Arc, Mutex};

/// Command received by a recording engine
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    AttachSurface(ViewId),
    DetachSurface,
    SetRequest(PlaybackRequest),
    SetPlayWhenReady(bool),
    Prepare,
    Release,
}

#[derive(Clone, Default)]
pub struct CommandLog(Arc<Mutex<Vec<Command>>>);

impl CommandLog {
    fn push(&self, command: Command) {
        self.0.lock().unwrap().push(command);
    }

    pub fn commands(&self) -> Vec<Command> {
        self.0.lock().unwrap().clone()
    }
}

pub struct RecordingEngine {
    log: CommandLog,
}

impl PlaybackEngine for RecordingEngine {
    fn attach_surface(&mut self, surface: &VideoSurface) {
        self.log.push(Command::AttachSurface(surface.view_id()));
    }

    fn detach_surface(&mut self) {
        self.log.push(Command::DetachSurface);
    }

    fn set_request(&mut self, request: &PlaybackRequest) {
        self.log.push(Command::SetRequest(request.clone()));
    }

    fn set_play_when_ready(&mut self, play_when_ready: bool) {
        self.log.push(Command::SetPlayWhenReady(play_when_ready));
    }

    fn prepare(&mut self) {
        self.log.push(Command::Prepare);
    }

    fn release(&mut self) {
        self.log.push(Command::Release);
    }
}

struct CreatedEngine {
    config: EngineConfig,
    log: CommandLog,
    listener: EngineListener,
}

/// Factory remembering every engine it built
#[derive(Default)]
pub struct RecordingEngineFactory {
    created: Mutex<Vec<CreatedEngine>>,
    failure: Option<String>,
}

impl RecordingEngineFactory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Factory whose every `create` fails
    pub fn failing(reason: &str) -> Self {
        Self {
            created: Mutex::new(Vec::new()),
            failure: Some(reason.to_string()),
        }
    }

    pub fn engine_count(&self) -> usize {
        self.created.lock().unwrap().len()
    }

    pub fn commands(&self, index: usize) -> Vec<Command> {
        self.created.lock().unwrap()[index].log.commands()
    }

    pub fn listener(&self, index: usize) -> EngineListener {
        self.created.lock().unwrap()[index].listener.clone()
    }

    pub fn config(&self, index: usize) -> EngineConfig {
        self.created.lock().unwrap()[index].config.clone()
    }

    pub fn release_count(&self, index: usize) -> usize {
        self.commands(index)
            .iter()
            .filter(|c| **c == Command::Release)
            .count()
    }
}

impl EngineFactory for RecordingEngineFactory {
    fn create(&self, config: &EngineConfig, listener: EngineListener) -> Result<Box<dyn PlaybackEngine>> {
        if let Some(reason) = &self.failure {
            return Err(Error::EngineCreation(reason.clone()));
        }

        let log = CommandLog::default();
        self.created.lock().unwrap().push(CreatedEngine {
            config: config.clone(),
            log: log.clone(),
            listener,
        });
        Ok(Box::new(RecordingEngine { log }))
    }
}

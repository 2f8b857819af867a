//! View factory - host-facing registry of live player views

use crate::{
    EngineConfig, EngineFactory, Error, ErrorSink, PlayerView, Result, TracingSink, ViewId,
};
use serde_json::Value;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{info, warn};

/// Creates and disposes player views by host view id
pub struct ViewFactory<F> {
    engine_factory: F,
    engine_config: EngineConfig,
    sink: Arc<dyn ErrorSink>,
    views: HashMap<ViewId, PlayerView>,
}

impl<F: EngineFactory> ViewFactory<F> {
    /// Factory with the default engine configuration, logging errors via `tracing`
    pub fn new(engine_factory: F) -> Self {
        Self {
            engine_factory,
            engine_config: EngineConfig::default(),
            sink: Arc::new(TracingSink),
            views: HashMap::new(),
        }
    }

    pub fn with_engine_config(mut self, engine_config: EngineConfig) -> Self {
        self.engine_config = engine_config;
        self
    }

    pub fn with_sink(mut self, sink: Arc<dyn ErrorSink>) -> Self {
        self.sink = sink;
        self
    }

    /// Open a view for `view_id` from the host's creation payload
    pub fn create(&mut self, view_id: ViewId, args: &Value) -> Result<&PlayerView> {
        match self.views.entry(view_id) {
            Entry::Occupied(_) => {
                warn!(view_id = %view_id, "View already exists");
                Err(Error::ViewExists(view_id))
            }
            Entry::Vacant(slot) => {
                let view = PlayerView::open(
                    view_id,
                    args,
                    &self.engine_factory,
                    &self.engine_config,
                    Arc::clone(&self.sink),
                )?;
                Ok(slot.insert(view))
            }
        }
    }

    /// Close and forget the view. Unknown ids are rejected without side effects.
    pub fn dispose(&mut self, view_id: ViewId) -> Result<()> {
        let Some(view) = self.views.remove(&view_id) else {
            warn!(view_id = %view_id, "Dispose of unknown view");
            return Err(Error::UnknownView(view_id));
        };
        view.close()
    }

    /// Close every view, returning how many were closed
    pub fn dispose_all(&mut self) -> usize {
        let count = self.views.len();
        for (view_id, view) in self.views.drain() {
            if let Err(e) = view.close() {
                warn!(view_id = %view_id, error = %e, "Failed to close view");
            }
        }
        if count > 0 {
            info!(count, "Disposed all views");
        }
        count
    }

    pub fn view(&self, view_id: ViewId) -> Option<&PlayerView> {
        self.views.get(&view_id)
    }

    pub fn len(&self) -> usize {
        self.views.len()
    }

    pub fn is_empty(&self) -> bool {
        self.views.is_empty()
    }

    pub fn engine_factory(&self) -> &F {
        &self.engine_factory
    }
}

//! Playback error reporting
//!
//! Every engine error becomes one [`ErrorRecord`] handed to the view's
//! [`ErrorSink`]. No other telemetry leaves the crate.

use crate::{PlaybackError, SessionId, ViewId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::{Mutex, PoisonError};
use tracing::error;

/// Structured record of one playback error
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorRecord {
    /// Engine-style code name, e.g. `ERROR_CODE_IO_BAD_HTTP_STATUS`
    pub error_code_name: String,
    pub message: String,
    pub cause: Option<String>,
    pub view_id: ViewId,
    pub session_id: SessionId,
    pub timestamp: DateTime<Utc>,
}

impl ErrorRecord {
    pub fn new(view_id: ViewId, session_id: SessionId, error: &PlaybackError) -> Self {
        Self {
            error_code_name: error.code_name().to_string(),
            message: error.message.clone(),
            cause: error.cause.clone(),
            view_id,
            session_id,
            timestamp: Utc::now(),
        }
    }
}

/// Receives playback error records.
///
/// Called from the engine's callback thread while the controller's callback
/// lock is held; implementations must not call back into the controller.
pub trait ErrorSink: Send + Sync {
    fn report(&self, record: &ErrorRecord);
}

/// Logs records through `tracing`
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl ErrorSink for TracingSink {
    fn report(&self, record: &ErrorRecord) {
        error!(
            view_id = %record.view_id,
            session_id = %record.session_id,
            code = %record.error_code_name,
            cause = record.cause.as_deref().unwrap_or("none"),
            "Playback error: {}",
            record.message
        );
    }
}

/// Keeps records in memory until drained
#[derive(Debug, Default)]
pub struct CollectingSink {
    records: Mutex<Vec<ErrorRecord>>,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the collected records
    pub fn records(&self) -> Vec<ErrorRecord> {
        self.records.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// Take all collected records
    pub fn drain(&self) -> Vec<ErrorRecord> {
        std::mem::take(&mut *self.records.lock().unwrap_or_else(PoisonError::into_inner))
    }

    pub fn len(&self) -> usize {
        self.records.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ErrorSink for CollectingSink {
    fn report(&self, record: &ErrorRecord) {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(record.clone());
    }
}

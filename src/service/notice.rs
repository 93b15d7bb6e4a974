// Copyright (c) 2025 - Cowboy AI, Inc.
//! Notice Sink
//!
//! One-line human-readable change and warning notices. Non-fatal anomalies
//! carry a literal `WARNING:` marker; there are no other severity levels.

use std::sync::{Arc, Mutex};
use tracing::{info, warn};

/// Marker carried by non-fatal anomaly notices
pub const WARNING_PREFIX: &str = "WARNING:";

/// Destination for change and warning notices
pub trait NoticeSink: Send + Sync {
    fn emit(&self, message: &str);
}

impl<T: NoticeSink + ?Sized> NoticeSink for Arc<T> {
    fn emit(&self, message: &str) {
        (**self).emit(message)
    }
}

/// Writes notices to `tracing`
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl NoticeSink for TracingSink {
    fn emit(&self, message: &str) {
        if message.contains(WARNING_PREFIX) {
            warn!("{}", message);
        } else {
            info!("{}", message);
        }
    }
}

/// Keeps notices in memory
#[derive(Debug, Default)]
pub struct RecordingSink {
    notices: Mutex<Vec<String>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notices(&self) -> Vec<String> {
        self.notices
            .lock()
            .map(|n| n.clone())
            .unwrap_or_else(|poisoned| poisoned.into_inner().clone())
    }

    /// Notices carrying the warning marker
    pub fn warnings(&self) -> Vec<String> {
        self.notices()
            .into_iter()
            .filter(|n| n.contains(WARNING_PREFIX))
            .collect()
    }

    pub fn clear(&self) {
        match self.notices.lock() {
            Ok(mut n) => n.clear(),
            Err(poisoned) => poisoned.into_inner().clear(),
        }
    }
}

impl NoticeSink for RecordingSink {
    fn emit(&self, message: &str) {
        match self.notices.lock() {
            Ok(mut n) => n.push(message.to_string()),
            Err(poisoned) => poisoned.into_inner().push(message.to_string()),
        }
    }
}

//! In-process seen store.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Duration, Utc};

use super::clock::{Clock, SystemClock};
use super::SeenStore;
use crate::error::Error;
use crate::matcher::Fingerprint;

/// Seen store kept in memory, for embedding and tests.
pub struct MemoryStore {
    entries: Mutex<HashMap<Fingerprint, DateTime<Utc>>>,
    ttl: Duration,
    clock: Arc<dyn Clock>,
}

impl MemoryStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            ttl,
            clock: Arc::new(SystemClock),
        }
    }

    /// Use a different time source.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Number of stored entries, expired ones included.
    pub fn len(&self) -> usize {
        self.entries.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl SeenStore for MemoryStore {
    fn has_been_shown(&self, fingerprint: &Fingerprint) -> Result<bool, Error> {
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        let Some(created) = entries.get(fingerprint).copied() else {
            return Ok(false);
        };

        if self.clock.now() - created < self.ttl {
            return Ok(true);
        }

        entries.remove(fingerprint);
        Ok(false)
    }

    fn mark_shown(&self, fingerprint: &Fingerprint) -> Result<(), Error> {
        let now = self.clock.now();
        self.entries
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(fingerprint.clone(), now);
        Ok(())
    }
}

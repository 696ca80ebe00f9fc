//! Filesystem marker cache.
//!
//! One zero-byte file per fingerprint; its modification time is the moment
//! the advisory was shown.

use std::fs::{self, File};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::SystemTime;

use chrono::{DateTime, Duration, Utc};
use tracing::{debug, warn};

use super::clock::{Clock, SystemClock};
use super::SeenStore;
use crate::error::Error;
use crate::matcher::Fingerprint;

/// Marker directory shared by every hook invocation.
pub struct MarkerStore {
    dir: PathBuf,
    ttl: Duration,
    clock: Arc<dyn Clock>,
}

impl MarkerStore {
    pub fn new(dir: PathBuf, ttl: Duration) -> Self {
        Self {
            dir,
            ttl,
            clock: Arc::new(SystemClock),
        }
    }

    /// Use a different time source.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn marker_path(&self, fingerprint: &Fingerprint) -> PathBuf {
        self.dir.join(fingerprint.as_str())
    }
}

impl SeenStore for MarkerStore {
    fn has_been_shown(&self, fingerprint: &Fingerprint) -> Result<bool, Error> {
        let path = self.marker_path(fingerprint);
        let created = match fs::metadata(&path) {
            Ok(metadata) => metadata.modified().ok().map(DateTime::<Utc>::from),
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(false),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Unreadable marker, treating as expired");
                None
            }
        };

        if let Some(created) = created {
            if self.clock.now() - created < self.ttl {
                return Ok(true);
            }
        }

        match fs::remove_file(&path) {
            Ok(()) => debug!(fingerprint = %fingerprint, "Removed expired marker"),
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => return Err(e.into()),
        }
        Ok(false)
    }

    fn mark_shown(&self, fingerprint: &Fingerprint) -> Result<(), Error> {
        fs::create_dir_all(&self.dir)?;

        let path = self.marker_path(fingerprint);
        let file = File::options()
            .create(true)
            .write(true)
            .truncate(true)
            .open(&path)?;
        file.set_modified(SystemTime::from(self.clock.now()))?;

        debug!(path = %path.display(), "Wrote marker");
        Ok(())
    }
}

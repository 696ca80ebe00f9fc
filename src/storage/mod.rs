//! Seen-advisory cache.
//!
//! Remembers which operation fingerprints already produced an advisory so
//! the same edit is intercepted at most once per TTL window.

pub mod clock;
pub mod marker;
pub mod memory;

pub use clock::{Clock, ManualClock, SystemClock};
pub use marker::MarkerStore;
pub use memory::MemoryStore;

use crate::error::Error;
use crate::matcher::Fingerprint;

/// Key-value store of shown fingerprints with expiry.
pub trait SeenStore {
    /// True iff an unexpired entry exists. Expired entries are removed.
    fn has_been_shown(&self, fingerprint: &Fingerprint) -> Result<bool, Error>;

    /// Record that the advisory for `fingerprint` was shown now.
    fn mark_shown(&self, fingerprint: &Fingerprint) -> Result<(), Error>;
}

//! Validity Module
//!
//! Validity markers, the freshness comparator and expiration windows.

use serde::{Deserialize, Serialize};

// == Validity ==
/// Version/freshness token stored alongside a cached value.
///
/// Markers are compared with [`is_fresh_enough`], a partial order: markers of
/// different shapes never compare, so a key must keep the same shape for as
/// long as it lives in a cache.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Validity {
    /// A single instant, in milliseconds since the Unix epoch
    Timestamp(i64),
    /// A composite token made of ordered parts
    Sequence(Vec<Validity>),
}

impl Validity {
    /// Returns the instant if this marker is a plain timestamp.
    pub fn as_timestamp(&self) -> Option<i64> {
        match self {
            Validity::Timestamp(ts) => Some(*ts),
            Validity::Sequence(_) => None,
        }
    }
}

impl From<i64> for Validity {
    fn from(ts: i64) -> Self {
        Validity::Timestamp(ts)
    }
}

impl From<Vec<Validity>> for Validity {
    fn from(parts: Vec<Validity>) -> Self {
        Validity::Sequence(parts)
    }
}

// == Freshness ==
/// Returns `true` if a copy stored with `stored` satisfies a request for
/// `requested`, i.e. the stored copy is no older than what was asked for.
///
/// - Two timestamps: `requested <= stored`.
/// - Two sequences of the same length: every pair must be fresh enough.
/// - Anything else (mixed shapes, different lengths) is not fresh.
pub fn is_fresh_enough(requested: &Validity, stored: &Validity) -> bool {
    match (requested, stored) {
        (Validity::Timestamp(requested), Validity::Timestamp(stored)) => requested <= stored,
        (Validity::Sequence(requested), Validity::Sequence(stored)) => {
            requested.len() == stored.len()
                && requested
                    .iter()
                    .zip(stored)
                    .all(|(requested, stored)| is_fresh_enough(requested, stored))
        }
        _ => false,
    }
}

// == Expiration ==
/// How long a timestamp-validated entry may be served after its timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Expiration {
    /// Always a hit, whatever the age of the entry
    Never,
    /// Always a miss; the caller opts out of caching for this lookup
    NoCache,
    /// Hit while `now < timestamp + window`, window in milliseconds
    Window(u64),
}

impl Expiration {
    /// Decides whether an entry stamped `stored` is still servable at `now`.
    pub fn is_live(&self, stored: i64, now: i64) -> bool {
        match self {
            Expiration::Never => true,
            Expiration::NoCache => false,
            Expiration::Window(window) => {
                let window = i64::try_from(*window).unwrap_or(i64::MAX);
                i128::from(now) < i128::from(stored) + i128::from(window)
            }
        }
    }
}

// == Utility Functions ==
/// Returns current Unix timestamp in milliseconds.
pub fn current_timestamp_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

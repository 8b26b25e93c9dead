//! Time-bucketed rotation selection
//!
//! Wall-clock time is cut into fixed windows of `ttl` seconds. Every request that
//! lands in the same window gets the same asset, and the window index walks through
//! the asset list in order, wrapping around after the last one.
//!
//! The selection is a pure function of `(now, ttl, count)`, so any number of
//! instances with synchronised clocks and identical asset lists agree on what to
//! serve without talking to each other.

use std::fmt;
use std::num::NonZeroUsize;

/// Rotation period and maximum cache lifetime, in whole seconds.
///
/// Always strictly positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ttl(i64);

impl Ttl {
    /// Returns `None` unless `seconds > 0`.
    pub const fn new(seconds: i64) -> Option<Self> {
        if seconds > 0 {
            Some(Self(seconds))
        } else {
            None
        }
    }

    pub const fn as_secs(self) -> i64 {
        self.0
    }
}

impl fmt::Display for Ttl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}s", self.0)
    }
}

/// Outcome of a rotation lookup for a single instant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rotation {
    /// Window number, `floor(now / ttl)`
    pub bucket: i64,
    /// Asset to serve, in `[0, count)`
    pub index: usize,
    /// Seconds until the next window starts, in `[1, ttl]`
    pub max_age: u64,
}

/// Select the asset index and remaining cache lifetime for `now`.
///
/// Floor division is Euclidean so that timestamps before the epoch still fall
/// into the window that contains them.
pub fn select(now: i64, ttl: Ttl, count: NonZeroUsize) -> Rotation {
    let ttl = ttl.as_secs();
    let bucket = now.div_euclid(ttl);

    let count = i64::try_from(count.get()).unwrap_or(i64::MAX);
    let index = usize::try_from(bucket.rem_euclid(count)).unwrap_or_default();

    // Same as (bucket + 1) * ttl - now, without the overflow near i64::MAX.
    let max_age = ttl - now.rem_euclid(ttl);

    Rotation {
        bucket,
        index,
        max_age: max_age.unsigned_abs(),
    }
}

/// Current Unix time in whole seconds.
pub fn now_unix() -> i64 {
    chrono::Utc::now().timestamp()
}

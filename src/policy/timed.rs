//! Policy C — Time-bounded. Detects rather than prevents.
//!
//! A cycle still forms; it is broken by whichever participant times out
//! first, and that participant abandons its partial set. The deadline
//! delta `Δ` trades false positives (genuine contention misread as
//! deadlock) against detection latency.

use std::time::{Duration, Instant};

use crate::pool::LockPool;
use crate::policy::AcquireOutcome;

/// Policy C: bounded-deadline acquire.
pub struct TimeBounded {
    pub(crate) pool: LockPool,
    delta: Duration,
}

impl TimeBounded {
    /// Wraps `pool`, refusing any acquire that cannot complete within `delta`.
    pub fn new(pool: LockPool, delta: Duration) -> Self {
        Self { pool, delta }
    }

    /// Acquires `l` before `now + delta`, or refuses on timeout.
    pub fn acquire(&self, t: usize, l: usize) -> AcquireOutcome {
        let deadline = Instant::now() + self.delta;
        if self.pool.timedlock(l, deadline) {
            tracing::trace!(thread = t, lock = l, "time-bounded: acquired");
            AcquireOutcome::Ok
        } else {
            tracing::trace!(thread = t, lock = l, "time-bounded: refused, timed out");
            AcquireOutcome::Refused
        }
    }

    /// Releases `l`.
    pub fn release(&self, t: usize, l: usize) {
        self.pool.unlock(l);
        tracing::trace!(thread = t, lock = l, "time-bounded: released");
    }
}

//! Policy A — Unconditional. The negative control.
//!
//! `acquire` blocks on the pool and always succeeds; `release` unlocks.
//! Under any workload with at least two workers each drawing at least two
//! locks from a shared pool, this policy deadlocks with probability 1 as
//! time grows — it is included for comparison, not because it works.

use crate::pool::LockPool;
use crate::policy::AcquireOutcome;

/// Policy A: lock and hope.
pub struct Unconditional {
    pub(crate) pool: LockPool,
}

impl Unconditional {
    /// Wraps `pool`.
    pub fn new(pool: LockPool) -> Self {
        Self { pool }
    }

    /// Blocks until `l` is acquired; never refuses.
    pub fn acquire(&self, t: usize, l: usize) -> AcquireOutcome {
        self.pool.lock(l);
        tracing::trace!(thread = t, lock = l, "unconditional: acquired");
        AcquireOutcome::Ok
    }

    /// Releases `l`.
    pub fn release(&self, t: usize, l: usize) {
        self.pool.unlock(l);
        tracing::trace!(thread = t, lock = l, "unconditional: released");
    }
}

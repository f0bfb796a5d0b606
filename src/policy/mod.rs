//! The policy engine interface and its three interchangeable strategies.
//!
//! A [`Policy`] owns whatever state it needs and exposes `acquire`/`release`
//! for a `(thread, lock)` pair. The worker loop (see [`crate::worker`]) is
//! identical across policies; only what happens inside `acquire` differs.

pub mod matrix;
pub mod timed;
pub mod unconditional;

use crate::pool::LockPool;

/// Outcome of a policy's `acquire` decision.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum AcquireOutcome {
    /// The lock is now held by the caller.
    Ok,
    /// The policy declined the request; no lock is held.
    Refused,
}

impl AcquireOutcome {
    /// True if the outcome is [`AcquireOutcome::Ok`].
    pub fn is_ok(self) -> bool {
        matches!(self, AcquireOutcome::Ok)
    }
}

/// The three fixed policies, dispatched by `match` rather than a trait
/// object: the variant set is closed and known at start-up, so there is no
/// vtable on the hot acquire/release path.
pub enum Policy {
    /// Policy A: lock and hope.
    Unconditional(unconditional::Unconditional),
    /// Policy B: online wait-for-graph cycle prevention.
    Matrix(matrix::Matrix),
    /// Policy C: bounded-deadline acquire.
    TimeBounded(timed::TimeBounded),
}

impl Policy {
    /// Builds the Unconditional policy over `pool`.
    pub fn unconditional(pool: LockPool) -> Self {
        Policy::Unconditional(unconditional::Unconditional::new(pool))
    }

    /// Builds the Matrix policy over `pool`, sized for `threads` workers.
    pub fn matrix(pool: LockPool, threads: usize) -> Self {
        Policy::Matrix(matrix::Matrix::new(pool, threads))
    }

    /// Builds the Matrix policy over `pool`, reporting a resource-exhaustion
    /// error rather than aborting if `W`/`R` cannot be allocated.
    pub fn try_matrix(pool: LockPool, threads: usize) -> Result<Self, crate::error::ArenaError> {
        Ok(Policy::Matrix(matrix::Matrix::try_new(pool, threads)?))
    }

    /// Builds the Time-bounded policy over `pool` with deadline delta `delta`.
    pub fn time_bounded(pool: LockPool, delta: std::time::Duration) -> Self {
        Policy::TimeBounded(timed::TimeBounded::new(pool, delta))
    }

    /// Number of lock slots in the underlying pool.
    pub fn lock_count(&self) -> usize {
        match self {
            Policy::Unconditional(p) => p.pool.len(),
            Policy::Matrix(p) => p.pool.len(),
            Policy::TimeBounded(p) => p.pool.len(),
        }
    }

    /// Attempts to acquire `(t, l)`.
    pub fn acquire(&self, t: usize, l: usize) -> AcquireOutcome {
        match self {
            Policy::Unconditional(p) => p.acquire(t, l),
            Policy::Matrix(p) => p.acquire(t, l),
            Policy::TimeBounded(p) => p.acquire(t, l),
        }
    }

    /// Releases a previously-granted `(t, l)`.
    pub fn release(&self, t: usize, l: usize) {
        match self {
            Policy::Unconditional(p) => p.release(t, l),
            Policy::Matrix(p) => p.release(t, l),
            Policy::TimeBounded(p) => p.release(t, l),
        }
    }
}

//! The primitive pool `P`: a fixed-size array of independent mutexes.
//!
//! `lock`/`timedlock`/`unlock` are free operations addressed by index, the
//! same shape as the design's primitive-pool contract (and the original
//! `pthread_mutex_{lock,timedlock,unlock}` calls it replaces) — a policy
//! commits to holding a lock in `acquire` and releases it in a later,
//! separate `release` call on a different stack frame, so an RAII guard
//! tied to a borrow of the pool would have to outlive the call that created
//! it. Built on `parking_lot`'s raw mutex (`lock_api::RawMutex` /
//! `RawMutexTimed`) rather than `std::sync::Mutex` for exactly this reason:
//! it gives both a guard-free lock/unlock pair and a real deadline-based
//! `try_lock_until`, which `std::sync::Mutex` exposes neither of.

use std::time::Instant;

use lock_api::{RawMutex as _, RawMutexTimed as _};
use parking_lot::RawMutex;

/// A fixed-size array of mutexes, indexed `0..L`. Elements never move once
/// created.
pub struct LockPool {
    cells: Vec<RawMutex>,
}

impl LockPool {
    /// Creates a pool of `l` independent, initially-unlocked mutexes.
    pub fn new(l: usize) -> Self {
        Self {
            cells: (0..l).map(|_| RawMutex::INIT).collect(),
        }
    }

    /// Number of lock slots in the pool.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// True if the pool has no slots.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Blocks until `l` is acquired. Never fails in normal operation.
    pub fn lock(&self, l: usize) {
        self.cells[l].lock();
    }

    /// Acquires `l` before `deadline`, or returns `false` on timeout.
    pub fn timedlock(&self, l: usize, deadline: Instant) -> bool {
        self.cells[l].try_lock_until(deadline)
    }

    /// Releases `l`. The caller must be the current holder.
    pub fn unlock(&self, l: usize) {
        // SAFETY: callers only invoke this after a successful `lock` or
        // `timedlock` on the same index, from the thread that acquired it,
        // per the pool's documented contract.
        unsafe { self.cells[l].unlock() };
    }
}

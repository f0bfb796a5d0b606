//! Policy B — Matrix, the deadlock-prevention core.
//!
//! An online wait-for-graph analyzer: before granting a lock, decide
//! whether granting it could ever close a cycle, and refuse if so. A
//! single global critical section (`state`, below — this *is* `M`, the
//! same mutex that protects `W` also protects `R`) serializes every policy
//! decision.
//!
//! # Why `R` lives in the same `Mutex` as `W`
//!
//! `R` needs no synchronization beyond the global ordering already
//! established by `M` and `P` for correctness — but Rust's
//! aliasing rules still require some `Mutex`/`RefCell` to hand out a `&mut`
//! to `R`'s rows from multiple threads. Both `W` and `R` are already only
//! touched while `M` is held in the acquire/release protocols below, so a
//! second lock would add nothing but the possibility of acquiring them out
//! of order; one `Mutex<MatrixState>` is simpler and free.
//!
//! # Held-lock bookkeeping
//!
//! The pool's mutexes are addressed purely by index (no RAII guard — see
//! [`crate::pool::LockPool`]'s doc comment for why), so there is nothing to
//! hold across the gap between a thread's `acquire` returning and its later
//! `release` call other than the index itself, and `R` already records
//! "does this thread hold this lock" for that purpose. No additional
//! per-thread table is needed.

use parking_lot::Mutex;

use crate::bitmatrix::BitMatrix;
use crate::oracle::reachable;
use crate::pool::LockPool;
use crate::policy::AcquireOutcome;
use crate::recursion::RecursionCounts;

struct MatrixState {
    w: BitMatrix,
    r: RecursionCounts,
}

/// Policy B: online wait-for-graph cycle prevention.
pub struct Matrix {
    pub(crate) pool: LockPool,
    state: Mutex<MatrixState>,
}

impl Matrix {
    /// Builds the Matrix policy over `pool`, sized for `threads` workers,
    /// or reports [`crate::error::ArenaError::Alloc`] rather than aborting
    /// if `W` or `R` cannot be allocated. Reachable here since `W` and `R`
    /// scale with `threads x locks`, the one allocation in the crate whose
    /// size is attacker/user controlled rather than fixed.
    pub fn try_new(pool: LockPool, threads: usize) -> Result<Self, crate::error::ArenaError> {
        let locks = pool.len();
        let w = BitMatrix::try_new(threads, locks)?;
        let r = RecursionCounts::try_new(threads, locks)?;
        Ok(Self {
            pool,
            state: Mutex::new(MatrixState { w, r }),
        })
    }

    /// Builds the Matrix policy over `pool`, aborting on allocation
    /// failure. A convenience wrapper over [`Self::try_new`].
    pub fn new(pool: LockPool, threads: usize) -> Self {
        Self::try_new(pool, threads).expect("matrix policy allocation failed")
    }

    /// Acquire protocol, steps 1-6.
    pub fn acquire(&self, t: usize, l: usize) -> AcquireOutcome {
        {
            let mut guard = self.state.lock();
            if guard.r.get(t, l) > 0 {
                guard.r.enter(t, l);
                return AcquireOutcome::Ok;
            }

            // Step 3: a violation here is a programming error in the
            // worker loop, not a runtime condition — abort, don't refuse.
            assert!(
                !guard.w.get(t, l),
                "thread {t} already claims lock {l} outside R's bookkeeping"
            );

            // Step 4: would granting (t, l) ever let some other claimant
            // of l reach back to t without walking through l itself?
            for t_prime in 0..guard.w.threads() {
                if t_prime == t || !guard.w.get(t_prime, l) {
                    continue;
                }
                if reachable(&guard.w, t_prime, l, t) {
                    tracing::trace!(thread = t, lock = l, via = t_prime, "matrix: refused, would close a cycle");
                    return AcquireOutcome::Refused;
                }
            }

            // Step 5: commit intent before blocking on the primitive.
            guard.w.set(t, l);
            // Step 6 (R before P.lock): consistent bookkeeping before any
            // other observer could see us holding P[l].
            guard.r.enter(t, l);
        }

        self.pool.lock(l);
        tracing::trace!(thread = t, lock = l, "matrix: acquired");
        AcquireOutcome::Ok
    }

    /// Release protocol, steps 1-5.
    pub fn release(&self, t: usize, l: usize) {
        let fully_released = {
            let mut guard = self.state.lock();
            let reached_zero = guard.r.exit(t, l);
            if reached_zero {
                guard.w.clear(t, l);
            }
            reached_zero
        };
        if fully_released {
            self.pool.unlock(l);
            tracing::trace!(thread = t, lock = l, "matrix: released");
        }
    }
}

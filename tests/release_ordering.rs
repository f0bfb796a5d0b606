//! Releasing acquired locks in any permutation, not only LIFO, preserves
//! acyclicity. The worker loop's LIFO choice is conventional, not required
//! by the Matrix protocol itself.

use lockarena::policy::{AcquireOutcome, Policy};
use lockarena::pool::LockPool;

#[test]
fn fifo_release_order_is_just_as_safe_as_lifo() {
    let policy = Policy::matrix(LockPool::new(4), 2);

    assert_eq!(policy.acquire(0, 0), AcquireOutcome::Ok);
    assert_eq!(policy.acquire(0, 1), AcquireOutcome::Ok);
    assert_eq!(policy.acquire(0, 2), AcquireOutcome::Ok);

    // Release in acquisition order (FIFO), the opposite of the worker's
    // conventional LIFO choice.
    policy.release(0, 0);
    policy.release(0, 1);
    policy.release(0, 2);

    // Every lock is fully free again: a second thread can claim all three
    // without being refused.
    assert_eq!(policy.acquire(1, 0), AcquireOutcome::Ok);
    assert_eq!(policy.acquire(1, 1), AcquireOutcome::Ok);
    assert_eq!(policy.acquire(1, 2), AcquireOutcome::Ok);
    policy.release(1, 2);
    policy.release(1, 0);
    policy.release(1, 1);
}

#[test]
fn arbitrary_release_order_does_not_leave_stale_claims() {
    let policy = Policy::matrix(LockPool::new(3), 2);

    assert_eq!(policy.acquire(0, 0), AcquireOutcome::Ok);
    assert_eq!(policy.acquire(0, 1), AcquireOutcome::Ok);
    assert_eq!(policy.acquire(0, 2), AcquireOutcome::Ok);

    // A permutation that is neither LIFO nor FIFO.
    policy.release(0, 1);
    policy.release(0, 0);
    policy.release(0, 2);

    // No stale claims survive release, so a fresh claimant of every lock
    // is accepted.
    for l in 0..3 {
        assert_eq!(policy.acquire(1, l), AcquireOutcome::Ok);
    }
    for l in 0..3 {
        policy.release(1, l);
    }
}

//! The worker loop: identical across all three policies.
//!
//! Per iteration, for worker `t`: record a job start, draw `k` locks
//! uniformly at random, acquire each through the engine, sleep briefly on
//! full success, and release everything acquired in LIFO order (LIFO is
//! conventional, not required — any release order is equally safe).

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use rand::Rng;

use crate::policy::Policy;
use crate::stats::Stats;

/// Runs one worker's loop until `quit` is observed, set by the harness
/// after its run duration elapses. Checked only between jobs: workers are
/// not cancelable mid-job.
pub fn run(thread: usize, policy: &Policy, stats: &Stats, claim: u32, sleep_usec: u64, quit: &Arc<AtomicBool>) {
    let mut rng = rand::thread_rng();
    let locks = policy.lock_count();

    loop {
        stats.record_job_started();

        let k = if claim == 0 { 0 } else { rng.gen_range(0..claim) };
        let mut held = Vec::with_capacity(k as usize);
        let mut all_ok = true;

        for _ in 0..k {
            // `locks == 0` forces `k == 0` above only if the caller already
            // clamped `claim` via `Config::never_claims` (as `harness::run`
            // does before spawning workers) — guard here too so this draw
            // is safe even when called directly with an unclamped `claim`
            // over an empty pool, as the unit test below does.
            if locks == 0 {
                stats.record_failure();
                all_ok = false;
                break;
            }
            let l = rng.gen_range(0..locks);
            match policy.acquire(thread, l) {
                crate::policy::AcquireOutcome::Ok => held.push(l),
                crate::policy::AcquireOutcome::Refused => {
                    stats.record_failure();
                    all_ok = false;
                    break;
                }
            }
        }

        if all_ok && sleep_usec > 0 {
            let usec = rng.gen_range(0..sleep_usec);
            std::thread::sleep(Duration::from_micros(usec));
        }

        while let Some(l) = held.pop() {
            policy.release(thread, l);
        }

        if quit.load(Ordering::Relaxed) {
            return;
        }
    }
}

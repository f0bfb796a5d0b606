//! Validated run configuration.
//!
//! [`Cli`](crate::cli::Cli) parses the command line; this module is the
//! single place semantic validation happens, so that a bad configuration is
//! rejected before any of `P`, `W`, or `R` is allocated and before any
//! thread is spawned.

use std::time::Duration;

use crate::cli::Method;
use crate::error::ArenaError;

/// A fully validated run configuration.
#[derive(Clone, Debug)]
pub struct Config {
    /// Which policy to exercise.
    pub method: Method,
    /// Worker count `T`.
    pub threads: usize,
    /// Lock count `L`.
    pub locks: usize,
    /// Exclusive upper bound `C` on the per-job lock draw.
    pub claim: u32,
    /// Exclusive upper bound on the per-job sleep, in microseconds.
    pub sleep_usec: u64,
    /// Wall-clock duration of the run.
    pub duration: Duration,
    /// Deadline delta for the Time-bounded policy.
    pub timeout: Duration,
}

impl Config {
    /// Validates the configuration, matching the ranges the design accepts
    /// as "degenerate but well-defined" (`threads == 0` or `locks == 0`) and
    /// rejecting values that would make the arena meaningless to run.
    pub fn validate(&self) -> Result<(), ArenaError> {
        if self.locks > u32::MAX as usize {
            return Err(ArenaError::Configuration(format!(
                "locks ({}) exceeds the maximum representable lock count",
                self.locks
            )));
        }
        if self.threads > u32::MAX as usize {
            return Err(ArenaError::Configuration(format!(
                "threads ({}) exceeds the maximum representable thread count",
                self.threads
            )));
        }
        Ok(())
    }

    /// True when a job never draws a lock at all (`claim == 0` or `locks == 0`).
    pub fn never_claims(&self) -> bool {
        self.claim == 0 || self.locks == 0
    }
}

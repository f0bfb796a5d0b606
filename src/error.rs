//! Centralized error type for the arena.
//!
//! Mirrors the error taxonomy from the design: configuration errors and
//! resource-exhaustion errors are the only ones that can terminate the
//! process before any worker thread is spawned. Policy refusals are not
//! errors at all (see [`crate::policy::AcquireOutcome`]) and internal
//! invariant violations are bugs, reported via `panic!`/`assert!` rather
//! than this enum.

use thiserror::Error;

/// Convenience alias for results using the arena's error type.
pub type ArenaResult<T> = std::result::Result<T, ArenaError>;

/// The arena's error taxonomy: only the classes that can terminate the
/// process before a worker thread is spawned.
#[derive(Error, Debug)]
pub enum ArenaError {
    /// An out-of-range or otherwise invalid configuration value.
    #[error("invalid configuration: {0}")]
    Configuration(String),

    /// Allocating `what` for `requested` entries failed.
    #[error("failed to allocate {what} for {requested} entries")]
    Alloc {
        /// Human-readable name of the thing that failed to allocate.
        what: &'static str,
        /// Number of entries that were requested.
        requested: usize,
    },
}

//! Command-line surface.
//!
//! A thin `clap::Parser` derive over the arena's command-line flags. Parsing
//! never touches [`crate::config::Config`]'s semantic validation — `Cli`
//! only enforces what clap can check for free (types, the closed `Method`
//! set). [`Cli::into_config`] does the rest.

use std::time::Duration;

use clap::{Parser, ValueEnum};

use crate::config::Config;

/// Policy under test.
#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
pub enum Method {
    /// Policy A: lock and hope. Deadlocks under contention by design.
    Unconditional = 0,
    /// Policy B: online wait-for-graph cycle prevention.
    Matrix = 1,
    /// Policy C: detect via a bounded-deadline acquire.
    TimeBounded = 2,
}

/// lockArena: compare deadlock-handling policies under mutex contention.
#[derive(Parser, Debug)]
#[command(name = "lockarena", about = "Workbench for lock-contention policies", long_about = None)]
pub struct Cli {
    /// Policy: 0 = Unconditional, 1 = Matrix, 2 = Time-bounded.
    #[arg(short = 'm', long = "method", value_enum, default_value_t = Method::Matrix)]
    pub method: Method,

    /// Worker count.
    #[arg(short = 't', long = "threads", default_value_t = 100)]
    pub threads: usize,

    /// Lock count.
    #[arg(short = 'l', long = "locks", default_value_t = 100)]
    pub locks: usize,

    /// Max locks claimed per job (exclusive upper bound on the uniform draw).
    #[arg(short = 'c', long = "claim", default_value_t = 3)]
    pub claim: u32,

    /// Max sleep microseconds (exclusive upper bound on the uniform draw).
    #[arg(short = 's', long = "sleep-usec", default_value_t = 1000)]
    pub sleep_usec: u64,

    /// Run duration, in seconds.
    #[arg(short = 'd', long = "duration-secs", default_value_t = 1)]
    pub duration_secs: u64,

    /// Time-bounded policy timeout, in nanoseconds.
    #[arg(short = 'T', long = "timeout-nsec", default_value_t = 1_000_000)]
    pub timeout_nsec: u64,
}

impl Cli {
    /// Converts the parsed CLI into a validated [`Config`].
    pub fn into_config(self) -> Result<Config, crate::error::ArenaError> {
        let config = Config {
            method: self.method,
            threads: self.threads,
            locks: self.locks,
            claim: self.claim,
            sleep_usec: self.sleep_usec,
            duration: Duration::from_secs(self.duration_secs),
            timeout: Duration::from_nanos(self.timeout_nsec),
        };
        config.validate()?;
        Ok(config)
    }
}

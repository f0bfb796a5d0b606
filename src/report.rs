//! Console report formatting, kept separate from [`crate::harness`] so the
//! percentage arithmetic (including the zero-jobs-started edge case) is
//! unit-testable without spawning any threads.

/// The final tally for a completed run.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Report {
    /// Total jobs started.
    pub jobs_started: u64,
    /// Total refused/failed jobs.
    pub failures: u64,
}

impl Report {
    /// Jobs that ran to completion.
    pub fn jobs_done(&self) -> u64 {
        self.jobs_started.saturating_sub(self.failures)
    }

    /// Failure percentage of `jobs_started`, `0.0` when no jobs started at
    /// all (the C original's `printf` ratio divides by zero here; this is
    /// a faithful-but-safer port of the same reporting line).
    pub fn failure_pct(&self) -> f64 {
        if self.jobs_started == 0 {
            0.0
        } else {
            100.0 * self.failures as f64 / self.jobs_started as f64
        }
    }

    /// Renders the final report line, e.g.
    /// `"42 jobs done, 3 errors (6.67%)"`.
    pub fn summary_line(&self) -> String {
        format!(
            "{} jobs done, {} errors ({:.2}%)",
            self.jobs_done(),
            self.failures,
            self.failure_pct()
        )
    }
}

/// Logs the start banner summarizing the configuration.
pub fn log_start_banner(config: &crate::config::Config) {
    tracing::info!(
        method = ?config.method,
        threads = config.threads,
        locks = config.locks,
        claim = config.claim,
        sleep_usec = config.sleep_usec,
        duration_secs = config.duration.as_secs(),
        timeout_nsec = config.timeout.as_nanos(),
        "starting lockarena run"
    );
}

/// Logs the final report and the exit note.
pub fn log_report(report: &Report) {
    tracing::info!("{}", report.summary_line());
    tracing::info!("lockarena: attempting to exit");
}

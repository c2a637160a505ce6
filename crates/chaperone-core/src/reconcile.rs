//! Bounded best-effort ownership reconciliation.
//!
//! The loop runs a fixed number of sequential attempts against one
//! directory, sleeping between attempts. Attempt failures are swallowed:
//! the directory may not exist yet, may be owned by another identity, or
//! may be mutated concurrently by the workload that populates it. The next
//! tick retries from scratch either way.

use std::path::PathBuf;
use std::time::Duration;

use chaperone_common::config::ReconcileConfig;

use crate::owner::OwnershipSetter;

/// Outcome counts from a completed reconciliation run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReconcileSummary {
    /// Attempts made. Always equals the configured tick budget.
    pub attempted: u32,
    /// Attempts that applied ownership successfully.
    pub changed: u32,
    /// Attempts that failed and were swallowed.
    pub failed: u32,
}

/// Drives a fixed number of ownership attempts against one directory.
pub struct Reconciler<S> {
    dir: PathBuf,
    ticks: u32,
    interval: Duration,
    setter: S,
}

impl<S: OwnershipSetter> Reconciler<S> {
    /// Creates a reconciler from a config and an ownership capability.
    #[must_use]
    pub fn new(config: &ReconcileConfig, setter: S) -> Self {
        Self {
            dir: config.dir.clone(),
            ticks: config.ticks,
            interval: config.interval(),
            setter,
        }
    }

    /// Runs the loop to completion and returns the outcome counts.
    ///
    /// Attempts are strictly sequential: tick N, including its sleep,
    /// finishes before tick N+1 begins. No sleep follows the final tick.
    /// This method cannot fail and never re-arms; a second call is a new,
    /// independent run.
    pub fn run(&self) -> ReconcileSummary {
        let mut summary = ReconcileSummary::default();
        for tick in 1..=self.ticks {
            summary.attempted += 1;
            match self.setter.set_owner(&self.dir) {
                Ok(()) => {
                    summary.changed += 1;
                    tracing::trace!(tick, dir = %self.dir.display(), "ownership applied");
                }
                Err(e) => {
                    summary.failed += 1;
                    tracing::debug!(tick, error = %e, "ownership attempt failed");
                }
            }
            if tick < self.ticks {
                std::thread::sleep(self.interval);
            }
        }
        tracing::debug!(
            attempted = summary.attempted,
            changed = summary.changed,
            failed = summary.failed,
            dir = %self.dir.display(),
            "reconciliation finished"
        );
        summary
    }
}

//! Configuration model for the reconciliation loop.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::types::UserName;

/// Parameters driving one run of the ownership reconciliation loop.
///
/// All values are deploy-time constants in practice; the CLI exposes them as
/// flags with environment-variable fallbacks because the attempt budget is a
/// heuristic rather than a load-bearing bound.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconcileConfig {
    /// Directory whose ownership is kept reconciled.
    pub dir: PathBuf,
    /// User account that should own the directory.
    pub owner: UserName,
    /// Number of reconciliation attempts before the loop exits.
    pub ticks: u32,
    /// Seconds slept between consecutive attempts.
    pub interval_secs: u64,
}

impl ReconcileConfig {
    /// Returns the sleep interval between attempts.
    #[must_use]
    pub const fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }
}

impl Default for ReconcileConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from(crate::constants::DEFAULT_MANAGED_DIR),
            owner: UserName::new(crate::constants::DEFAULT_OWNER),
            ticks: crate::constants::DEFAULT_TICKS,
            interval_secs: crate::constants::DEFAULT_INTERVAL_SECS,
        }
    }
}

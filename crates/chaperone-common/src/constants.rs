//! Deploy-time constants and default parameters.

/// Default directory whose ownership is kept reconciled.
pub const DEFAULT_MANAGED_DIR: &str = "/home/dev";

/// Default user account that should own the managed directory.
pub const DEFAULT_OWNER: &str = "dev";

/// Default number of reconciliation attempts after container start.
pub const DEFAULT_TICKS: u32 = 60;

/// Default interval between reconciliation attempts, in seconds.
pub const DEFAULT_INTERVAL_SECS: u64 = 1;

/// Environment variable overriding the managed directory.
pub const ENV_MANAGED_DIR: &str = "CHAPERONE_MANAGED_DIR";

/// Environment variable overriding the target owner.
pub const ENV_OWNER: &str = "CHAPERONE_OWNER";

/// Environment variable overriding the attempt count.
pub const ENV_TICKS: &str = "CHAPERONE_TICKS";

/// Environment variable overriding the attempt interval.
pub const ENV_INTERVAL_SECS: &str = "CHAPERONE_INTERVAL_SECS";

/// Application name used in CLI output.
pub const APP_NAME: &str = "chaperone";

/// Binary name for the CLI.
pub const BIN_NAME: &str = "chap";

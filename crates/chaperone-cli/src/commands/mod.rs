//! CLI command definitions and dispatch.

pub mod check;
pub mod reconcile;
pub mod run;

use std::path::PathBuf;

use chaperone_common::config::ReconcileConfig;
use chaperone_common::constants;
use chaperone_common::types::UserName;
use clap::{Args, Parser, Subcommand};

/// chaperone — container entrypoint wrapper with ownership reconciliation.
#[derive(Parser, Debug)]
#[command(name = "chap", version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Launch the ownership loop in the background, then exec a command.
    Run(run::RunArgs),
    /// Run the ownership reconciliation loop in the foreground.
    Reconcile(reconcile::ReconcileArgs),
    /// Report the current ownership of the managed directory.
    Check(check::CheckArgs),
}

/// Reconciliation parameters shared by `run` and `reconcile`.
///
/// All of these are deploy-time constants in practice; the flags and
/// environment fallbacks exist because the attempt budget is a heuristic,
/// not a load-bearing bound.
#[derive(Args, Debug, Clone)]
pub struct LoopArgs {
    /// Directory whose ownership is kept reconciled.
    #[arg(long, env = constants::ENV_MANAGED_DIR, default_value = constants::DEFAULT_MANAGED_DIR)]
    pub dir: PathBuf,

    /// User account that should own the directory.
    #[arg(long, env = constants::ENV_OWNER, default_value = constants::DEFAULT_OWNER)]
    pub owner: String,

    /// Number of reconciliation attempts before the loop exits.
    #[arg(long, env = constants::ENV_TICKS, default_value_t = constants::DEFAULT_TICKS)]
    pub ticks: u32,

    /// Seconds to sleep between attempts.
    #[arg(long, env = constants::ENV_INTERVAL_SECS, default_value_t = constants::DEFAULT_INTERVAL_SECS)]
    pub interval: u64,
}

impl LoopArgs {
    /// Builds the reconciliation config from parsed arguments.
    #[must_use]
    pub fn to_config(&self) -> ReconcileConfig {
        ReconcileConfig {
            dir: self.dir.clone(),
            owner: UserName::new(self.owner.as_str()),
            ticks: self.ticks,
            interval_secs: self.interval,
        }
    }
}

/// Dispatches the parsed CLI command to its handler.
///
/// # Errors
///
/// Returns an error if the command execution fails.
pub fn execute(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Command::Run(args) => run::execute(args),
        Command::Reconcile(args) => reconcile::execute(args),
        Command::Check(args) => check::execute(args),
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn loop_args_defaults_match_config_defaults() {
        let cli = Cli::parse_from(["chap", "reconcile"]);
        let Command::Reconcile(args) = cli.command else {
            panic!("expected reconcile");
        };
        assert_eq!(args.loop_args.to_config(), ReconcileConfig::default());
    }

    #[test]
    fn run_collects_trailing_command_vector() {
        let cli = Cli::parse_from(["chap", "run", "--ticks", "5", "--", "sh", "-c", "exit 0"]);
        let Command::Run(args) = cli.command else {
            panic!("expected run");
        };
        assert_eq!(args.loop_args.ticks, 5);
        assert_eq!(args.command, ["sh", "-c", "exit 0"]);
    }
}

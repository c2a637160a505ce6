//! `chap run` — launch the reconciler, then exec the primary workload.

use std::process::{Child, Command, Stdio};

use chaperone_common::config::ReconcileConfig;
use chaperone_common::error::ChaperoneError;
use clap::Args;

use super::LoopArgs;

/// Arguments for the `run` command.
#[derive(Args, Debug)]
pub struct RunArgs {
    /// Reconciliation parameters.
    #[command(flatten)]
    pub loop_args: LoopArgs,

    /// Command to exec once the reconciler is launched.
    #[arg(required = true, trailing_var_arg = true, value_name = "COMMAND")]
    pub command: Vec<String>,
}

/// Executes the `run` command.
///
/// Spawns the reconciliation loop as a detached child process, then
/// replaces this process with the requested command. The command starts
/// immediately; it never waits for a reconciliation tick.
///
/// # Errors
///
/// Returns an error only for an empty command vector. A failed exec exits
/// directly with the conventional entrypoint codes: 127 when the program
/// is missing, 126 when it is not executable.
pub fn execute(args: RunArgs) -> anyhow::Result<()> {
    let config = args.loop_args.to_config();

    // The child handle is deliberately dropped without a wait: the
    // reconciler exits on its own after its final tick, or dies with the
    // container's process group. It survives the exec below because exec
    // keeps children. A launch failure only degrades ownership
    // convenience, so the workload starts regardless.
    if let Err(e) = spawn_reconciler(&config) {
        tracing::warn!(error = %e, "reconciler could not be launched");
    }

    match chaperone_core::exec::hand_off(&args.command) {
        Ok(()) => Ok(()),
        Err(ChaperoneError::Exec { command, source }) => {
            let code = match source.kind() {
                std::io::ErrorKind::NotFound => 127,
                std::io::ErrorKind::PermissionDenied => 126,
                _ => 1,
            };
            eprintln!("chap: failed to exec {command}: {source}");
            std::process::exit(code);
        }
        Err(e) => Err(e.into()),
    }
}

/// Launches `chap reconcile` as a detached background process.
///
/// All standard streams are nulled so the reconciler holds no handle to
/// the workload's stdio. Diagnostics come from running `chap reconcile`
/// in the foreground instead.
fn spawn_reconciler(config: &ReconcileConfig) -> anyhow::Result<Child> {
    let exe = std::env::current_exe()?;
    let child = Command::new(exe)
        .arg("reconcile")
        .arg("--dir")
        .arg(&config.dir)
        .arg("--owner")
        .arg(config.owner.as_str())
        .arg("--ticks")
        .arg(config.ticks.to_string())
        .arg("--interval")
        .arg(config.interval_secs.to_string())
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()?;
    tracing::debug!(pid = child.id(), dir = %config.dir.display(), "reconciler launched");
    Ok(child)
}

//! `chap reconcile` — run the ownership loop in the foreground.
//!
//! This is the process `chap run` launches in the background. It can also
//! be invoked directly when debugging a container.

use chaperone_core::owner::FsOwnershipSetter;
use chaperone_core::reconcile::Reconciler;
use clap::Args;

use super::LoopArgs;

/// Arguments for the `reconcile` command.
#[derive(Args, Debug)]
pub struct ReconcileArgs {
    /// Reconciliation parameters.
    #[command(flatten)]
    pub loop_args: LoopArgs,
}

/// Executes the `reconcile` command.
///
/// Runs the full attempt budget and exits cleanly regardless of how many
/// attempts failed.
///
/// # Errors
///
/// Never returns an error; attempt failures are swallowed by contract.
pub fn execute(args: ReconcileArgs) -> anyhow::Result<()> {
    let config = args.loop_args.to_config();
    tracing::info!(
        dir = %config.dir.display(),
        owner = %config.owner,
        ticks = config.ticks,
        interval_secs = config.interval_secs,
        "reconciliation loop starting"
    );

    let setter = FsOwnershipSetter::new(config.owner.clone());
    let summary = Reconciler::new(&config, setter).run();

    tracing::info!(
        attempted = summary.attempted,
        changed = summary.changed,
        failed = summary.failed,
        "reconciliation loop finished"
    );
    Ok(())
}

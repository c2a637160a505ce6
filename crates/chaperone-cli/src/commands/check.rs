//! `chap check` — report ownership state of the managed directory.

use std::path::PathBuf;

use chaperone_common::constants;
use chaperone_common::types::UserName;
use chaperone_core::owner::{self, OwnershipReport};
use clap::Args;

use crate::output;

/// Arguments for the `check` command.
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Directory to inspect.
    #[arg(long, env = constants::ENV_MANAGED_DIR, default_value = constants::DEFAULT_MANAGED_DIR)]
    pub dir: PathBuf,

    /// User account that should own the directory.
    #[arg(long, env = constants::ENV_OWNER, default_value = constants::DEFAULT_OWNER)]
    pub owner: String,

    /// Emit the report as JSON.
    #[arg(long)]
    pub json: bool,
}

const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";
const GREEN: &str = "\x1b[32m";
const RED: &str = "\x1b[31m";
const RESET: &str = "\x1b[0m";

/// Executes the `check` command.
///
/// Prints the ownership report and exits non-zero if the tree is not
/// consistently owned by the desired account, so the command can gate
/// scripts.
///
/// # Errors
///
/// Returns an error if the tree cannot be traversed or ownership is
/// inconsistent.
pub fn execute(args: CheckArgs) -> anyhow::Result<()> {
    let desired = UserName::new(args.owner.as_str());
    let report = owner::inspect(&args.dir, &desired)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }

    if report.consistent {
        Ok(())
    } else {
        Err(anyhow::anyhow!(
            "ownership of {} is not consistent with user '{}'",
            report.path.display(),
            report.desired_owner
        ))
    }
}

fn print_report(report: &OwnershipReport) {
    let status = if report.consistent {
        format!("{GREEN}consistent{RESET}")
    } else {
        format!("{RED}inconsistent{RESET}")
    };

    eprintln!();
    eprintln!(
        "  {BOLD}{}{RESET} {DIM}(desired owner: {}){RESET}",
        report.path.display(),
        report.desired_owner
    );
    eprintln!();
    eprintln!("    exists:      {}", report.exists);
    eprintln!("    desired uid: {}", output::format_uid(report.desired_uid));
    eprintln!("    current uid: {}", output::format_uid(report.current_uid));
    eprintln!("    mismatched:  {}", report.mismatched);
    eprintln!("    status:      {status}");
    eprintln!();
}

//! Process image hand-off to the primary workload.

use chaperone_common::error::{ChaperoneError, Result};

/// Replaces the current process image with `command`.
///
/// On success this function does not return: the PID, standard streams, and
/// signal disposition all pass to the new image, so the wrapped command
/// behaves — and exits — as if it had been invoked directly. Child
/// processes spawned before the call survive it.
///
/// # Errors
///
/// Returns an error if the command vector is empty or the exec itself
/// fails (program missing, not executable).
#[cfg(unix)]
pub fn hand_off(command: &[String]) -> Result<()> {
    use std::os::unix::process::CommandExt;

    let Some((program, args)) = command.split_first() else {
        return Err(ChaperoneError::Config {
            message: "hand-off command is empty".into(),
        });
    };

    tracing::debug!(cmd = ?command, "handing off to primary workload");
    let err = std::process::Command::new(program).args(args).exec();
    Err(ChaperoneError::Exec {
        command: program.clone(),
        source: err,
    })
}

/// Replaces the current process image with `command`.
///
/// On non-Unix platforms, returns an error because process image
/// replacement requires `execvp`.
///
/// # Errors
///
/// Always returns an error on non-Unix platforms.
#[cfg(not(unix))]
pub fn hand_off(command: &[String]) -> Result<()> {
    let _ = command;
    Err(ChaperoneError::Config {
        message: "Unix required for process hand-off".into(),
    })
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    #[test]
    fn empty_command_is_rejected() {
        let err = hand_off(&[]).expect_err("empty command");
        assert!(matches!(err, ChaperoneError::Config { .. }));
    }

    #[test]
    fn missing_program_reports_exec_failure() {
        // exec of a nonexistent program fails in-process and returns.
        let command = vec!["/no/such/program-a8f2".to_string()];
        let err = hand_off(&command).expect_err("missing program");
        match err {
            ChaperoneError::Exec { command, source } => {
                assert_eq!(command, "/no/such/program-a8f2");
                assert_eq!(source.kind(), std::io::ErrorKind::NotFound);
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}

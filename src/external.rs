use crate::command::{CommandRunner, EXIT_NOT_STARTED, ExitCode};
use crate::env::Environment;
use anyhow::{Context, Result};
use std::ffi::{OsStr, OsString};
use std::process::{Command, ExitStatus};
use tracing::{debug, warn};

/// Runs commands as child processes that share this process's standard streams.
///
/// Each call spawns exactly one process and blocks until it exits. Output is not captured,
/// so child output interleaves with the runner's own.
pub struct ProcessRunner {
    env: Environment,
}

impl ProcessRunner {
    pub fn new(env: Environment) -> Self {
        Self { env }
    }

    fn spawn_and_wait(&self, program: &OsStr, args: &[OsString]) -> Result<ExitCode> {
        let mut child = Command::new(program)
            .args(args)
            .envs(&self.env.vars)
            .current_dir(&self.env.current_dir)
            .spawn()?;
        let exit_status = child.wait().context("failed to wait for child")?;
        match exit_status.code() {
            Some(x) => Ok(x),
            None => Ok(terminated_by_signal(exit_status)),
        }
    }
}

impl CommandRunner for ProcessRunner {
    fn run(&mut self, words: &[OsString]) -> ExitCode {
        let Some((program, args)) = words.split_first() else {
            return EXIT_NOT_STARTED;
        };
        let name = program.to_string_lossy();
        debug!(program = %name, ?args, "spawning");
        match self.spawn_and_wait(program, args) {
            Ok(code) => {
                debug!(program = %name, code, "child exited");
                code
            }
            Err(e) => {
                warn!(program = %name, err = %e, "command did not run");
                eprintln!("{name}: {e:#}");
                EXIT_NOT_STARTED
            }
        }
    }
}

#[cfg(unix)]
fn terminated_by_signal(exit_status: ExitStatus) -> ExitCode {
    use std::os::unix::process::ExitStatusExt;
    if let Some(signal) = ExitStatusExt::signal(&exit_status) {
        128 + signal
    } else if ExitStatusExt::core_dumped(&exit_status) {
        255
    } else {
        EXIT_NOT_STARTED
    }
}

#[cfg(not(unix))]
fn terminated_by_signal(_exit_status: ExitStatus) -> ExitCode {
    EXIT_NOT_STARTED
}

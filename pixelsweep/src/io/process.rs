//! Process-runner abstraction for invoking the image tool.
//!
//! The [`ProcessRunner`] trait decouples the sweep from actual process
//! spawning. Tests use scripted runners that record argument vectors and
//! return predetermined outcomes.

use std::ffi::OsString;
use std::process::{Command, Stdio};
use std::time::Duration;

use anyhow::{Context, Result, anyhow, bail};
use tracing::{debug, error, instrument, warn};
use wait_timeout::ChildExt;

/// Abstraction over how the tool is run.
pub trait ProcessRunner {
    /// Run `command` (program followed by its arguments) to completion.
    ///
    /// `Ok(())` means the tool exited successfully. Any other outcome is an
    /// error carrying a diagnostic.
    fn run(&self, command: &[OsString]) -> Result<()>;
}

/// Runner that spawns a child process and waits for it.
///
/// The child inherits stdout and stderr; only its exit status is inspected.
pub struct SubprocessRunner {
    timeout: Duration,
}

impl SubprocessRunner {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

impl ProcessRunner for SubprocessRunner {
    #[instrument(skip_all, fields(timeout_secs = self.timeout.as_secs()))]
    fn run(&self, command: &[OsString]) -> Result<()> {
        let (program, args) = command
            .split_first()
            .ok_or_else(|| anyhow!("empty command"))?;
        let program_name = program.to_string_lossy();

        debug!(program = %program_name, "spawning child process");
        let mut child = match Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .spawn()
        {
            Ok(c) => c,
            Err(e) => {
                error!(err = %e, program = %program_name, "failed to spawn command");
                return Err(e).with_context(|| format!("spawn {program_name}"));
            }
        };

        let status = match child.wait_timeout(self.timeout).context("wait for command")? {
            Some(status) => status,
            None => {
                warn!(
                    timeout_secs = self.timeout.as_secs(),
                    "command timed out, killing"
                );
                child.kill().context("kill command")?;
                child.wait().context("wait command after kill")?;
                bail!("{program_name} timed out after {:?}", self.timeout);
            }
        };

        debug!(exit_code = ?status.code(), "command finished");
        if !status.success() {
            bail!("{program_name} failed with {status}");
        }
        Ok(())
    }
}

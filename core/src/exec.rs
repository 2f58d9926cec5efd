use std::process::{Command, ExitStatus, Stdio};
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

use crate::invocation::Invocation;

/// How a single invocation ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ExitState {
    Exited { code: i32 },
    /// Killed without an exit code; `signal` is only known on Unix.
    Terminated { signal: Option<i32> },
    LaunchFailed { error: String },
    Skipped,
}

impl ExitState {
    pub fn from_status(status: ExitStatus) -> Self {
        match status.code() {
            Some(code) => ExitState::Exited { code },
            None => ExitState::Terminated {
                signal: termination_signal(&status),
            },
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ExitState::Exited { code: 0 })
    }
}

#[cfg(unix)]
fn termination_signal(status: &ExitStatus) -> Option<i32> {
    use std::os::unix::process::ExitStatusExt;
    status.signal()
}

#[cfg(not(unix))]
fn termination_signal(_status: &ExitStatus) -> Option<i32> {
    None
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionOutcome {
    pub state: ExitState,
    pub duration: Duration,
}

/// Runs invocations to completion.
///
/// Implementations never fail: anything that goes wrong is folded into the
/// returned outcome so the sweep can carry on with the next invocation.
pub trait Executor {
    fn execute(&mut self, invocation: &Invocation) -> ExecutionOutcome;
}

/// Launches each benchmark as a child process sharing this process's standard
/// streams and blocks until it exits. There is no timeout.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessExecutor;

impl Executor for ProcessExecutor {
    fn execute(&mut self, invocation: &Invocation) -> ExecutionOutcome {
        let started = Instant::now();
        let status = Command::new(invocation.program())
            .args(invocation.args())
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status();
        let duration = started.elapsed();

        let state = match status {
            Ok(status) => {
                let state = ExitState::from_status(status);
                if !state.is_success() {
                    tracing::warn!("{} exited with {}", invocation.command_line(), status);
                }
                state
            }
            Err(err) => {
                // Same spot a shell would report "not found".
                eprintln!("{}: {}", invocation.program().display(), err);
                tracing::warn!("failed to launch {}: {}", invocation.command_line(), err);
                ExitState::LaunchFailed { error: err.to_string() }
            }
        };

        ExecutionOutcome { state, duration }
    }
}

/// Echo-only executor used for `--dry-run`.
#[derive(Debug, Default, Clone, Copy)]
pub struct DryRunExecutor;

impl Executor for DryRunExecutor {
    fn execute(&mut self, _invocation: &Invocation) -> ExecutionOutcome {
        ExecutionOutcome {
            state: ExitState::Skipped,
            duration: Duration::ZERO,
        }
    }
}

//! Turning a child's termination status into a completion line.

use std::fmt;
use std::io::Write;
use std::process::ExitStatus;

/// Conventional process exit code type used by this crate.
pub type ExitCode = i32;

/// How a launched command ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExitOutcome {
    /// The child exited on its own with this code.
    Exited(ExitCode),
    /// The child was killed by this signal.
    Signaled(i32),
    /// The status could not be collected.
    WaitFailed(String),
}

impl From<ExitStatus> for ExitOutcome {
    fn from(status: ExitStatus) -> Self {
        match status.code() {
            Some(code) => ExitOutcome::Exited(code),
            None => terminated_by_signal(status),
        }
    }
}

#[cfg(unix)]
fn terminated_by_signal(status: ExitStatus) -> ExitOutcome {
    use std::os::unix::process::ExitStatusExt;
    match status.signal() {
        Some(signal) => ExitOutcome::Signaled(signal),
        None => ExitOutcome::WaitFailed(format!("unrecognized status {status}")),
    }
}

#[cfg(not(unix))]
fn terminated_by_signal(status: ExitStatus) -> ExitOutcome {
    ExitOutcome::WaitFailed(format!("unrecognized status {status}"))
}

impl fmt::Display for ExitOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExitOutcome::Exited(code) => write!(f, "exited with code {code}"),
            ExitOutcome::Signaled(signal) => write!(f, "killed by signal {signal}"),
            ExitOutcome::WaitFailed(reason) => write!(f, "status unavailable: {reason}"),
        }
    }
}

/// Print the completion line for `name`.
///
/// Only a normal exit produces output. A signal or a lost status is logged
/// and otherwise left silent, matching how the interpreter has always behaved.
pub fn report(out: &mut dyn Write, name: &str, outcome: &ExitOutcome) -> std::io::Result<()> {
    match outcome {
        ExitOutcome::Exited(code) => {
            tracing::debug!(command = name, code, "command finished");
            writeln!(out, "{name} finished with code {code}")?;
            out.flush()
        }
        other => {
            tracing::warn!(command = name, outcome = %other, "no completion report");
            Ok(())
        }
    }
}

//! Starting utilities as child processes.

use crate::dispatch::TokenList;
use crate::error::SpawnError;
use crate::report::{ExitCode, ExitOutcome};
use std::io::{self, ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::process::{Child, Command, Stdio};

/// Exit code reported when the utility's executable cannot be run at all.
pub const EXEC_FAILURE_CODE: ExitCode = 1;

/// Maps a whitelisted command name to the executable that implements it.
pub trait CommandResolver {
    fn resolve(&self, name: &str) -> PathBuf;
}

/// Looks for utilities inside a single directory.
///
/// With the default directory `.` a command `mostra` resolves to `./mostra`.
#[derive(Debug, Clone)]
pub struct DirResolver {
    dir: PathBuf,
}

impl DirResolver {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl CommandResolver for DirResolver {
    fn resolve(&self, name: &str) -> PathBuf {
        self.dir.join(name)
    }
}

/// A launched command the interpreter is responsible for.
pub trait ChildHandle {
    /// Block until this child terminates and release it.
    ///
    /// `err` is the interpreter's error stream, for failures reported on the
    /// child's behalf. Only writing to it can fail.
    fn wait(self: Box<Self>, err: &mut dyn Write) -> io::Result<ExitOutcome>;
}

/// Launches commands. Launching never waits; waiting goes through the handle.
pub trait Launcher {
    fn launch(&self, tokens: &TokenList) -> Result<Box<dyn ChildHandle>, SpawnError>;
}

/// Launcher backed by real operating-system processes.
///
/// The child inherits the interpreter's standard streams and sees the command
/// name as its `argv[0]`.
pub struct ProcessLauncher<R> {
    resolver: R,
}

impl<R: CommandResolver> ProcessLauncher<R> {
    pub fn new(resolver: R) -> Self {
        Self { resolver }
    }
}

impl<R: CommandResolver> Launcher for ProcessLauncher<R> {
    fn launch(&self, tokens: &TokenList) -> Result<Box<dyn ChildHandle>, SpawnError> {
        let path = self.resolver.resolve(tokens.name());
        tracing::debug!(path = %path.display(), args = ?tokens.args(), "spawning");

        match spawn(&path, tokens) {
            Ok(child) => Ok(Box::new(RunningChild(child))),
            Err(err) if is_exec_failure(&err) => {
                tracing::debug!(path = %path.display(), error = %err, "executable unusable");
                Ok(Box::new(ExecFailed))
            }
            Err(source) => Err(SpawnError { path, source }),
        }
    }
}

fn spawn(path: &Path, tokens: &TokenList) -> io::Result<Child> {
    let mut cmd = Command::new(path);
    cmd.args(tokens.args())
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit());
    set_arg0(&mut cmd, tokens.name());
    cmd.spawn()
}

#[cfg(unix)]
fn set_arg0(cmd: &mut Command, name: &str) {
    use std::os::unix::process::CommandExt;
    cmd.arg0(name);
}

#[cfg(not(unix))]
fn set_arg0(_cmd: &mut Command, _name: &str) {}

/// Errors that mean the program image could not be loaded, as opposed to the
/// system being unable to create a process at all.
fn is_exec_failure(err: &io::Error) -> bool {
    matches!(
        err.kind(),
        ErrorKind::NotFound | ErrorKind::PermissionDenied | ErrorKind::IsADirectory
    ) || is_bad_executable_format(err)
}

#[cfg(unix)]
fn is_bad_executable_format(err: &io::Error) -> bool {
    // ENOEXEC
    err.raw_os_error() == Some(8)
}

#[cfg(not(unix))]
fn is_bad_executable_format(_err: &io::Error) -> bool {
    false
}

struct RunningChild(Child);

impl ChildHandle for RunningChild {
    fn wait(mut self: Box<Self>, _err: &mut dyn Write) -> io::Result<ExitOutcome> {
        Ok(match self.0.wait() {
            Ok(status) => status.into(),
            Err(err) => ExitOutcome::WaitFailed(err.to_string()),
        })
    }
}

/// Stands in for a child whose exec step failed: it reports the failure on
/// the error stream and ends with [`EXEC_FAILURE_CODE`].
struct ExecFailed;

impl ChildHandle for ExecFailed {
    fn wait(self: Box<Self>, err: &mut dyn Write) -> io::Result<ExitOutcome> {
        writeln!(err, "error executing command")?;
        err.flush()?;
        Ok(ExitOutcome::Exited(EXEC_FAILURE_CODE))
    }
}

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Failure to obtain the next line from the input stream.
///
/// Read failures are never fatal on their own; the loop reports them and asks
/// for another line.
#[derive(Debug, Error)]
pub enum ReadError {
    #[error("line editor: {0}")]
    Editor(#[from] rustyline::error::ReadlineError),
    #[error("input stream: {0}")]
    Io(#[from] io::Error),
}

/// The operating system refused to create a process for a command.
#[derive(Debug, Error)]
#[error("{}: {source}", .path.display())]
pub struct SpawnError {
    pub path: PathBuf,
    #[source]
    pub source: io::Error,
}

use crate::config::Config;
use crate::dispatch::{self, Dispatch, TokenList};
use crate::launcher::Launcher;
use crate::reader::LineSource;
use crate::report;
use anyhow::Result;
use std::ffi::OsStr;
use std::io::Write;

/// Whether the loop should keep reading after a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// The read-dispatch-report loop.
///
/// Lines come from a [`LineSource`], whitelisted commands go to a
/// [`Launcher`], and all of the interpreter's own messages are written to the
/// `out`/`err` streams it was built with. Exactly one child is in flight at a
/// time: every launch is waited on and reported before the next prompt.
pub struct Interpreter {
    config: Config,
    source: Box<dyn LineSource>,
    launcher: Box<dyn Launcher>,
    out: Box<dyn Write>,
    err: Box<dyn Write>,
}

impl Interpreter {
    pub fn new(
        config: Config,
        source: Box<dyn LineSource>,
        launcher: Box<dyn Launcher>,
        out: Box<dyn Write>,
        err: Box<dyn Write>,
    ) -> Self {
        Self {
            config,
            source,
            launcher,
            out,
            err,
        }
    }

    /// Interpreter writing to the process's standard output and error.
    pub fn with_stdio(
        config: Config,
        source: Box<dyn LineSource>,
        launcher: Box<dyn Launcher>,
    ) -> Self {
        Self::new(
            config,
            source,
            launcher,
            Box::new(std::io::stdout()),
            Box::new(std::io::stderr()),
        )
    }

    /// Read and run lines until `termina`, end of input, or too many
    /// consecutive failures of the input stream itself.
    ///
    /// Only a failure to write to the interpreter's own streams is an error.
    pub fn repl(&mut self) -> Result<()> {
        let mut failures = 0u32;

        loop {
            match self.source.read_line(&self.config.prompt) {
                Ok(Some(line)) => {
                    failures = 0;
                    if self.step(&line)? == Flow::Quit {
                        tracing::debug!("quit requested");
                        break;
                    }
                }
                Ok(None) => {
                    tracing::debug!("end of input");
                    break;
                }
                Err(err) => {
                    failures += 1;
                    tracing::warn!(error = %err, failures, "failed to read command");
                    writeln!(self.err, "error reading command")?;
                    if failures >= self.config.max_read_failures {
                        tracing::warn!("input keeps failing, ending session");
                        break;
                    }
                }
            }
        }

        Ok(())
    }

    /// Handle a single line with its terminator already stripped.
    pub fn step(&mut self, line: impl AsRef<OsStr>) -> Result<Flow> {
        let dispatch = dispatch::classify(line);
        tracing::debug!(?dispatch, "dispatching");

        match dispatch {
            Dispatch::Empty => {}
            Dispatch::Quit => return Ok(Flow::Quit),
            Dispatch::Help => self.help()?,
            Dispatch::Unrecognized(name) => {
                writeln!(self.err, "command not recognized: {name}")?;
                writeln!(self.out, "\nType 'help' to see the available commands")?;
            }
            Dispatch::External(tokens) => self.run_external(&tokens)?,
        }

        self.out.flush()?;
        Ok(Flow::Continue)
    }

    fn help(&mut self) -> Result<()> {
        writeln!(self.out, "Available commands:")?;
        for name in dispatch::EXTERNAL_COMMANDS {
            writeln!(self.out, "- {name}")?;
        }
        Ok(())
    }

    fn run_external(&mut self, tokens: &TokenList) -> Result<()> {
        // The child shares our stdout; anything buffered must land first.
        self.out.flush()?;

        match self.launcher.launch(tokens) {
            Ok(child) => {
                let outcome = child.wait(&mut *self.err)?;
                report::report(&mut *self.out, tokens.name(), &outcome)?;
            }
            Err(err) => {
                tracing::warn!(error = %err, "spawn failed");
                writeln!(self.err, "error creating a new process: {err}")?;
            }
        }
        Ok(())
    }
}

//! A restricted command interpreter for a fixed family of file utilities.
//!
//! The interpreter reads one line at a time, checks the first word against a
//! whitelist of utility names and runs the matching executable from the
//! commands directory as a child process, waiting for it and printing its exit
//! code. Two words are handled in-process: `help` lists the utilities and
//! `termina` ends the session.
//!
//! The main entry point is [`Interpreter`]. Its collaborators sit behind the
//! traits in [`reader`] and [`launcher`] so the loop can be driven without a
//! terminal or real child processes.

pub mod config;
pub mod dispatch;
pub mod error;
mod interpreter;
pub mod launcher;
pub mod reader;
pub mod report;

/// Just a convenient re-export of the interactive command runner.
///
/// See [`Interpreter`] for the high-level API.
pub use interpreter::{Flow, Interpreter};

#[cfg(test)]
pub(crate) mod test_support;

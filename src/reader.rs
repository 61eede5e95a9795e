//! Sources of command lines.

use crate::error::ReadError;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use std::ffi::OsString;
use std::io::{BufRead, Write};

/// Something that hands the interpreter one line per iteration.
pub trait LineSource {
    /// Show `prompt`, block for a line and return it without its terminator.
    ///
    /// `Ok(None)` means the input is exhausted. Errors come from the stream
    /// itself; a line is never rejected for its contents.
    fn read_line(&mut self, prompt: &str) -> Result<Option<OsString>, ReadError>;
}

/// Interactive source backed by a `rustyline` editor.
///
/// History lives only in memory for the length of the session.
pub struct EditorSource {
    editor: DefaultEditor,
}

impl EditorSource {
    pub fn new() -> Result<Self, ReadError> {
        Ok(Self {
            editor: DefaultEditor::new()?,
        })
    }
}

impl LineSource for EditorSource {
    fn read_line(&mut self, prompt: &str) -> Result<Option<OsString>, ReadError> {
        match self.editor.readline(prompt) {
            Ok(line) => {
                if !line.trim().is_empty() {
                    self.editor.add_history_entry(line.as_str())?;
                }
                Ok(Some(line.into()))
            }
            // Ctrl-C drops whatever was typed and the loop prompts again.
            Err(ReadlineError::Interrupted) => Ok(Some(OsString::new())),
            Err(ReadlineError::Eof) => Ok(None),
            Err(err) => Err(err.into()),
        }
    }
}

/// Non-interactive source reading from any buffered stream.
///
/// Lines are taken as raw bytes, so input in any encoding is passed on
/// unchanged. The prompt is written to `prompt_out` before every read so
/// transcripts look the same as an interactive session.
pub struct PlainSource<R, W> {
    input: R,
    prompt_out: W,
}

impl<R: BufRead, W: Write> PlainSource<R, W> {
    pub fn new(input: R, prompt_out: W) -> Self {
        Self { input, prompt_out }
    }
}

impl<R: BufRead, W: Write> LineSource for PlainSource<R, W> {
    fn read_line(&mut self, prompt: &str) -> Result<Option<OsString>, ReadError> {
        self.prompt_out.write_all(prompt.as_bytes())?;
        self.prompt_out.flush()?;

        let mut line = Vec::new();
        if self.input.read_until(b'\n', &mut line)? == 0 {
            return Ok(None);
        }
        if line.last() == Some(&b'\n') {
            line.pop();
        }
        if line.last() == Some(&b'\r') {
            line.pop();
        }
        Ok(Some(bytes_to_os_string(line)))
    }
}

#[cfg(unix)]
fn bytes_to_os_string(bytes: Vec<u8>) -> OsString {
    use std::os::unix::ffi::OsStringExt;
    OsString::from_vec(bytes)
}

#[cfg(not(unix))]
fn bytes_to_os_string(bytes: Vec<u8>) -> OsString {
    String::from_utf8_lossy(&bytes).into_owned().into()
}

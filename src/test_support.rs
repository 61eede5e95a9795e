//! In-memory stand-ins for the interpreter's collaborators.

use crate::dispatch::TokenList;
use crate::error::{ReadError, SpawnError};
use crate::launcher::{ChildHandle, Launcher};
use crate::reader::LineSource;
use crate::report::ExitOutcome;
use std::cell::RefCell;
use std::collections::VecDeque;
use std::ffi::OsString;
use std::io::{self, Write};
use std::rc::Rc;

/// Writer whose bytes stay readable through any of its clones.
#[derive(Clone, Default)]
pub struct SharedBuffer {
    buf: Rc<RefCell<Vec<u8>>>,
}

impl SharedBuffer {
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.buf.borrow()).into_owned()
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        self.buf.borrow_mut().extend_from_slice(data);
        Ok(data.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// One scripted answer from [`ScriptedSource`].
pub enum Scripted {
    /// Raw line bytes, terminator already stripped.
    Line(&'static [u8]),
    /// A failure of the stream itself.
    Fail,
}

/// Line source that replays a fixed script, echoing prompts into `out`, and
/// reports end-of-input once the script is exhausted.
pub struct ScriptedSource {
    script: VecDeque<Scripted>,
    out: SharedBuffer,
    pub reads: Rc<RefCell<usize>>,
}

impl ScriptedSource {
    pub fn new(script: Vec<Scripted>, out: SharedBuffer) -> Self {
        Self {
            script: script.into(),
            out,
            reads: Rc::default(),
        }
    }
}

impl LineSource for ScriptedSource {
    fn read_line(&mut self, prompt: &str) -> Result<Option<OsString>, ReadError> {
        *self.reads.borrow_mut() += 1;
        self.out.write_all(prompt.as_bytes())?;
        match self.script.pop_front() {
            Some(Scripted::Line(line)) => Ok(Some(to_os_string(line))),
            Some(Scripted::Fail) => Err(io::Error::other("scripted failure").into()),
            None => Ok(None),
        }
    }
}

#[cfg(unix)]
fn to_os_string(raw: &[u8]) -> OsString {
    use std::os::unix::ffi::OsStrExt;
    std::ffi::OsStr::from_bytes(raw).to_owned()
}

#[cfg(not(unix))]
fn to_os_string(raw: &[u8]) -> OsString {
    String::from_utf8_lossy(raw).into_owned().into()
}

/// What [`FakeLauncher`] should do for a command name.
#[derive(Clone)]
pub enum Behavior {
    Finish(ExitOutcome),
    RefuseSpawn,
}

/// Launcher that records every launch and answers from a table, writing a
/// marker into `out` when a child is waited on.
pub struct FakeLauncher {
    behaviors: Vec<(&'static str, Behavior)>,
    out: SharedBuffer,
    pub launched: Rc<RefCell<Vec<Vec<OsString>>>>,
}

impl FakeLauncher {
    pub fn new(behaviors: Vec<(&'static str, Behavior)>, out: SharedBuffer) -> Self {
        Self {
            behaviors,
            out,
            launched: Rc::default(),
        }
    }
}

impl Launcher for FakeLauncher {
    fn launch(&self, tokens: &TokenList) -> Result<Box<dyn ChildHandle>, SpawnError> {
        self.launched.borrow_mut().push(tokens.argv());
        let behavior = self
            .behaviors
            .iter()
            .find(|(name, _)| *name == tokens.name())
            .map(|(_, b)| b.clone())
            .unwrap_or(Behavior::Finish(ExitOutcome::Exited(0)));
        match behavior {
            Behavior::Finish(outcome) => Ok(Box::new(FakeChild {
                name: tokens.name().to_string(),
                outcome,
                out: self.out.clone(),
            })),
            Behavior::RefuseSpawn => Err(SpawnError {
                path: format!("./{}", tokens.name()).into(),
                source: io::Error::new(io::ErrorKind::WouldBlock, "Resource temporarily unavailable"),
            }),
        }
    }
}

struct FakeChild {
    name: String,
    outcome: ExitOutcome,
    out: SharedBuffer,
}

impl ChildHandle for FakeChild {
    fn wait(mut self: Box<Self>, _err: &mut dyn Write) -> io::Result<ExitOutcome> {
        writeln!(self.out, "[{} ran]", self.name)?;
        Ok(self.outcome)
    }
}

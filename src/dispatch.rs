//! Tokenizing and classifying one input line.
//!
//! Lines are handled as `OsStr` so arguments reach the child byte-for-byte,
//! whatever their encoding.

use std::ffi::{OsStr, OsString};

/// Names of the external utilities, in the order `help` lists them.
pub const EXTERNAL_COMMANDS: [&str; 7] = [
    "mostra",
    "copia",
    "acrescenta",
    "conta",
    "apaga",
    "informa",
    "lista",
];

/// Reserved word that ends the session.
pub const QUIT: &str = "termina";

/// Reserved word that prints the list of utilities.
pub const HELP: &str = "help";

/// The whitelisted utility called `name`, if there is one.
pub fn external(name: &OsStr) -> Option<&'static str> {
    EXTERNAL_COMMANDS.into_iter().find(|known| name == *known)
}

/// Split `line` on runs of ASCII whitespace, dropping empty fields.
#[cfg(unix)]
pub fn words(line: &OsStr) -> Vec<OsString> {
    use std::os::unix::ffi::OsStrExt;
    line.as_bytes()
        .split(u8::is_ascii_whitespace)
        .filter(|word| !word.is_empty())
        .map(|word| OsStr::from_bytes(word).to_owned())
        .collect()
}

#[cfg(not(unix))]
pub fn words(line: &OsStr) -> Vec<OsString> {
    line.to_string_lossy()
        .split_ascii_whitespace()
        .map(OsString::from)
        .collect()
}

/// Argument vector of a whitelisted command.
///
/// The name is always one of [`EXTERNAL_COMMANDS`]; the arguments are kept
/// exactly as typed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenList {
    name: &'static str,
    args: Vec<OsString>,
}

impl TokenList {
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn args(&self) -> &[OsString] {
        &self.args
    }

    /// Full argument vector, command name included.
    pub fn argv(&self) -> Vec<OsString> {
        std::iter::once(OsString::from(self.name))
            .chain(self.args.iter().cloned())
            .collect()
    }
}

/// What the interpreter should do with a line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dispatch {
    /// Nothing but whitespace.
    Empty,
    Quit,
    Help,
    /// A whitelisted utility to run as a child process.
    External(TokenList),
    /// Anything else; carries the offending command name.
    Unrecognized(String),
}

/// Classify a line that has already had its terminator stripped.
///
/// `termina` and `help` are only recognized when they are the whole line, so
/// `termina now` falls through to the whitelist check and is rejected.
pub fn classify(line: impl AsRef<OsStr>) -> Dispatch {
    let line = line.as_ref();
    if line == QUIT {
        return Dispatch::Quit;
    }
    if line == HELP {
        return Dispatch::Help;
    }

    let mut words = words(line).into_iter();
    let Some(first) = words.next() else {
        return Dispatch::Empty;
    };
    match external(&first) {
        Some(name) => Dispatch::External(TokenList {
            name,
            args: words.collect(),
        }),
        None => Dispatch::Unrecognized(first.to_string_lossy().into_owned()),
    }
}

use argh::FromArgs;
use std::path::PathBuf;

pub const DEFAULT_PROMPT: &str = "% ";
pub const DEFAULT_MAX_READ_FAILURES: u32 = 16;
pub const DEFAULT_LOG_FILTER: &str = "error";

/// Environment variable that overrides `--log`.
pub const LOG_ENV: &str = "UTILITY_SHELL_LOG";

#[derive(FromArgs, Debug)]
/// Restricted interpreter for the mostra/copia/acrescenta/conta/apaga/informa/lista utilities.
pub struct Args {
    #[argh(option, default = "DEFAULT_PROMPT.to_string()")]
    /// text printed before each command line.
    pub prompt: String,

    #[argh(option, default = "PathBuf::from(\".\")")]
    /// directory holding the utility executables. Defaults to the current directory.
    pub commands_dir: PathBuf,

    #[argh(switch)]
    /// read commands without the line editor, even on a terminal.
    pub plain: bool,

    #[argh(option, default = "DEFAULT_MAX_READ_FAILURES")]
    /// consecutive read failures tolerated before the session ends.
    pub max_read_failures: u32,

    #[argh(option, default = "DEFAULT_LOG_FILTER.to_string()")]
    /// tracing filter, e.g. "warn" or "debug". UTILITY_SHELL_LOG takes precedence.
    pub log: String,
}

/// Settings the interpreter loop itself cares about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub prompt: String,
    pub max_read_failures: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            prompt: DEFAULT_PROMPT.to_string(),
            max_read_failures: DEFAULT_MAX_READ_FAILURES,
        }
    }
}

impl From<&Args> for Config {
    fn from(args: &Args) -> Self {
        Self {
            prompt: args.prompt.clone(),
            max_read_failures: args.max_read_failures.max(1),
        }
    }
}

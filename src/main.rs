use anyhow::Result;
use std::io::IsTerminal;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};
use utility_shell::Interpreter;
use utility_shell::config::{Args, Config, LOG_ENV};
use utility_shell::launcher::{DirResolver, ProcessLauncher};
use utility_shell::reader::{EditorSource, LineSource, PlainSource};

fn main() -> Result<()> {
    let args: Args = argh::from_env();

    let filter = EnvFilter::try_from_env(LOG_ENV).or_else(|_| EnvFilter::try_new(&args.log))?;
    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(std::io::stderr().is_terminal()),
        )
        .with(filter)
        .init();

    let source: Box<dyn LineSource> = if args.plain || !std::io::stdin().is_terminal() {
        Box::new(PlainSource::new(std::io::stdin().lock(), std::io::stdout()))
    } else {
        Box::new(EditorSource::new()?)
    };
    let launcher = ProcessLauncher::new(DirResolver::new(&args.commands_dir));

    tracing::debug!(?args, "starting session");
    Interpreter::with_stdio(Config::from(&args), source, Box::new(launcher)).repl()
}

//! Skirmish -- randomized multi-faction chess matches over a line protocol.
//!
//! Reads commands from stdin and writes responses to stdout. Diagnostics go
//! to stderr through `tracing`; set `RUST_LOG` to raise the level. An
//! optional argument names a JSON level table to use instead of the
//! built-in levels.

use std::io::{self, BufRead};
use std::path::Path;
use std::process::ExitCode;

use tracing_subscriber::EnvFilter;

use skirmish::engine::{CommandError, Engine};
use skirmish::level::load_levels;
use skirmish::protocol::parser::{parse_command, Command};

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let mut engine = match std::env::args().nth(1) {
        Some(path) => match load_levels(Path::new(&path)) {
            Ok(levels) => Engine::with_levels(levels),
            Err(e) => {
                tracing::error!(path = %path, error = %e, "failed to load levels");
                return ExitCode::FAILURE;
            }
        },
        None => Engine::new(),
    };

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());

    for line in stdin.lock().lines() {
        let line = match line {
            Ok(l) => l,
            Err(_) => break,
        };

        let cmd = match parse_command(&line) {
            Some(c) => c,
            None => continue,
        };

        let result: Result<(), CommandError> = match cmd {
            Command::Levels => engine.handle_levels(&mut out).map_err(Into::into),
            Command::NewGame { level, seed } => engine.new_game(level, seed),
            Command::SetOption { name, value } => engine.set_option(&name, &value),
            Command::Step { count } => engine.handle_step(count, &mut out),
            Command::Run => engine.handle_run(&mut out),
            Command::Board => engine.handle_board(&mut out),
            Command::Status => engine.handle_status(&mut out),
            Command::Quit => break,
        };

        if let Err(e) = result {
            tracing::warn!(command = line.trim(), error = %e, "command failed");
        }
    }

    ExitCode::SUCCESS
}

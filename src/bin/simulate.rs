//! Batch simulation CLI.
//!
//! Plays computer-vs-computer matches of one level and writes the records
//! as JSONL.
//!
//! Usage:
//!   cargo run --release --bin simulate -- [OPTIONS]
//!
//! Options:
//!   --level N          Level index in the table (default: 0)
//!   --levels FILE      JSON level table (default: built-in levels)
//!   --sandbox          Play the 8x8 sandbox match instead of a level
//!   --matches N        Number of matches to play (default: 10)
//!   --threads N        Number of parallel threads (default: 4)
//!   --seed N           Base seed, 0 for entropy (default: 0)
//!   --max-quiet N      Quiet turns before a draw (default: 200)
//!   --check-avoidance  Reject moves that leave the king capturable
//!   --record-moves     Include every move in the records
//!   --output FILE      Output file path (default: stdout)
//!   --quiet            Suppress progress and summary output

use std::env;
use std::fs::File;
use std::io::{self, BufWriter};
use std::path::Path;
use std::process::ExitCode;
use std::str::FromStr;
use std::time::Instant;

use tracing_subscriber::EnvFilter;

use skirmish::level::{builtin_levels, load_levels, sandbox};
use skirmish::simulate::{self, SimulationConfig};

/// Parses the value following flag `args[i]`.
fn value<T: FromStr>(args: &[String], i: usize) -> Result<T, String> {
    let flag = &args[i];
    let raw = args.get(i + 1).ok_or_else(|| format!("missing value for {}", flag))?;
    raw.parse()
        .map_err(|_| format!("invalid {} value: '{}'", flag, raw))
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    match run(env::args().collect()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: Vec<String>) -> Result<(), String> {
    let mut config = SimulationConfig::default();
    let mut level_index = 0usize;
    let mut levels_path: Option<String> = None;
    let mut use_sandbox = false;
    let mut output_path: Option<String> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--level" => {
                level_index = value(&args, i)?;
                i += 1;
            }
            "--levels" => {
                levels_path = Some(value(&args, i)?);
                i += 1;
            }
            "--sandbox" => use_sandbox = true,
            "--matches" => {
                config.matches = value(&args, i)?;
                i += 1;
            }
            "--threads" => {
                config.threads = value(&args, i)?;
                i += 1;
            }
            "--seed" => {
                config.seed = value(&args, i)?;
                i += 1;
            }
            "--max-quiet" => {
                config.game.max_quiet_moves = value(&args, i)?;
                i += 1;
            }
            "--check-avoidance" => config.game.check_avoidance = true,
            "--record-moves" => config.record_moves = true,
            "--output" => {
                output_path = Some(value(&args, i)?);
                i += 1;
            }
            "--quiet" => config.quiet = true,
            "--help" | "-h" => {
                print_usage();
                return Ok(());
            }
            other => {
                print_usage();
                return Err(format!("unknown argument: {}", other));
            }
        }
        i += 1;
    }

    let level = if use_sandbox {
        sandbox()
    } else {
        let levels = match &levels_path {
            Some(path) => load_levels(Path::new(path)).map_err(|e| e.to_string())?,
            None => builtin_levels(),
        };
        levels
            .get(level_index)
            .cloned()
            .ok_or_else(|| format!("no level {}; {} available", level_index, levels.len()))?
    };

    if !config.quiet {
        tracing::info!(
            "Simulating {} matches of {} ({} squares, {}x{}), {} threads",
            config.matches,
            level.name,
            level.squares,
            level.width,
            level.height,
            config.threads
        );
    }

    let start = Instant::now();
    let records = simulate::run_matches(&level, &config).map_err(|e| e.to_string())?;

    if !config.quiet {
        tracing::info!(
            "Completed {} matches in {:.1}s",
            records.len(),
            start.elapsed().as_secs_f64()
        );
        simulate::log_summary(&simulate::summarize(&records));
    }

    match output_path {
        Some(path) => {
            let file = File::create(&path)
                .map_err(|e| format!("failed to create {}: {}", path, e))?;
            let mut writer = BufWriter::new(file);
            simulate::write_jsonl(&records, &mut writer).map_err(|e| e.to_string())?;
            if !config.quiet {
                tracing::info!("Wrote {} matches to {}", records.len(), path);
            }
        }
        None => {
            let stdout = io::stdout();
            let mut writer = BufWriter::new(stdout.lock());
            simulate::write_jsonl(&records, &mut writer).map_err(|e| e.to_string())?;
        }
    }
    Ok(())
}

fn print_usage() {
    eprintln!("Usage: simulate [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --level N          Level index in the table (default: 0)");
    eprintln!("  --levels FILE      JSON level table (default: built-in levels)");
    eprintln!("  --sandbox          Play the 8x8 sandbox match instead of a level");
    eprintln!("  --matches N        Number of matches to play (default: 10)");
    eprintln!("  --threads N        Number of parallel threads (default: 4)");
    eprintln!("  --seed N           Base seed, 0 for entropy (default: 0)");
    eprintln!("  --max-quiet N      Quiet turns before a draw (default: 200)");
    eprintln!("  --check-avoidance  Reject moves that leave the king capturable");
    eprintln!("  --record-moves     Include every move in the records");
    eprintln!("  --output FILE      Output file path (default: stdout)");
    eprintln!("  --quiet            Suppress progress and summary output");
    eprintln!("  --help             Show this help");
}

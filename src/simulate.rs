//! Batch match simulation.
//!
//! Plays many computer-vs-computer matches of one level, optionally in
//! parallel, and records each as a `MatchRecord`. Records serialize as JSONL
//! for offline analysis of level balance.

use std::io::Write;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

use serde::{Deserialize, Serialize};

use crate::board::{Faction, PieceKind, Square};
use crate::game::{Game, MatchConfig, Outcome, TurnEvent};
use crate::level::{LevelDef, LevelError};

/// Errors that stop a batch before any match is played.
#[derive(Debug, thiserror::Error)]
pub enum SimulationError {
    #[error(transparent)]
    Level(#[from] LevelError),

    #[error("failed to build thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

/// Configuration for a batch of matches.
#[derive(Debug, Clone)]
pub struct SimulationConfig {
    /// Number of matches to play.
    pub matches: usize,
    /// Number of parallel threads; 1 plays sequentially.
    pub threads: usize,
    /// Base seed. Match `i` uses `seed + i`, wrapping past zero to 1;
    /// 0 draws a fresh seed per match.
    pub seed: u64,
    /// Keep the full move list in each record.
    pub record_moves: bool,
    /// Suppress per-match progress logging.
    pub quiet: bool,
    /// Options for every match. Its `seed` is ignored.
    pub game: MatchConfig,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        SimulationConfig {
            matches: 10,
            threads: 4,
            seed: 0,
            record_moves: false,
            quiet: false,
            game: MatchConfig::default(),
        }
    }
}

/// One move in a recorded match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveEntry {
    pub faction: Faction,
    pub piece: PieceKind,
    pub from: Square,
    pub to: Square,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub capture: Option<Faction>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub captured: Option<PieceKind>,
}

/// A completed match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchRecord {
    pub match_id: usize,
    pub level: String,
    /// Seed that reproduces this match.
    pub seed: u64,
    pub outcome: Outcome,
    /// The last faction standing, if only one is.
    pub winner: Option<Faction>,
    pub survivors: Vec<Faction>,
    /// Factions in order of elimination.
    pub eliminated: Vec<Faction>,
    pub moves: u32,
    pub captures: u32,
    pub board_squares: usize,
    /// Pieces placed per faction at setup.
    pub placed: Vec<(Faction, usize)>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub log: Vec<MoveEntry>,
}

/// Plays one match of `level` with `config` to completion.
pub fn play_match(
    level: &LevelDef,
    config: &MatchConfig,
    match_id: usize,
    record_moves: bool,
) -> Result<MatchRecord, LevelError> {
    let game = Game::new(level, config.clone())?;
    Ok(record_match(game, &level.name, match_id, record_moves))
}

fn record_match(mut game: Game, level: &str, match_id: usize, record_moves: bool) -> MatchRecord {
    let board_squares = game.board().len();
    let placed = game.placed().to_vec();
    let mut eliminated = Vec::new();
    let mut log = Vec::new();
    let mut captures = 0;

    let outcome = loop {
        match game.step() {
            TurnEvent::Moved {
                faction,
                mv,
                piece,
                captured,
                ..
            } => {
                if mv.is_capture() {
                    captures += 1;
                }
                if record_moves {
                    log.push(MoveEntry {
                        faction,
                        piece,
                        from: mv.from,
                        to: mv.to,
                        capture: mv.capture,
                        captured,
                    });
                }
            }
            TurnEvent::Eliminated { faction } => eliminated.push(faction),
            TurnEvent::Finished(outcome) => break outcome,
        }
    };

    let survivors = game.alive_factions();
    MatchRecord {
        match_id,
        level: level.to_string(),
        seed: game.config().seed,
        outcome,
        winner: match survivors.as_slice() {
            [only] => Some(*only),
            _ => None,
        },
        survivors,
        eliminated,
        moves: game.move_count(),
        captures,
        board_squares,
        placed,
        log,
    }
}

/// Seed for match `i`. Never 0, since a 0 seed means entropy.
fn match_seed(base: u64, i: usize) -> u64 {
    if base == 0 {
        return rand::random::<u64>().max(1);
    }
    match base.wrapping_add(i as u64) {
        0 => 1,
        s => s,
    }
}

fn log_match(record: &MatchRecord, done: usize, total: usize, started: Instant) {
    tracing::info!(
        "Match {}/{}: {} after {} moves, seed {} ({:.2}s)",
        done,
        total,
        record.outcome.name(),
        record.moves,
        record.seed,
        started.elapsed().as_secs_f64()
    );
}

/// Plays the batch and returns the records ordered by match id.
pub fn run_matches(
    level: &LevelDef,
    config: &SimulationConfig,
) -> Result<Vec<MatchRecord>, SimulationError> {
    let mut records = Vec::with_capacity(config.matches);
    run_matches_with_callback(level, config, |record| records.push(record))?;
    records.sort_by_key(|r| r.match_id);
    Ok(records)
}

/// Plays the batch, handing each record to `on_match` as it completes.
///
/// With more than one thread, records arrive in completion order.
pub fn run_matches_with_callback<F>(
    level: &LevelDef,
    config: &SimulationConfig,
    on_match: F,
) -> Result<(), SimulationError>
where
    F: FnMut(MatchRecord) + Send,
{
    level.validate()?;
    if config.threads > 1 {
        run_parallel(level, config, on_match)
    } else {
        run_sequential(level, config, on_match);
        Ok(())
    }
}

fn run_sequential<F>(level: &LevelDef, config: &SimulationConfig, mut on_match: F)
where
    F: FnMut(MatchRecord),
{
    for i in 0..config.matches {
        let started = Instant::now();
        let record = play_one(level, config, i);
        if !config.quiet {
            log_match(&record, i + 1, config.matches, started);
        }
        on_match(record);
    }
}

fn run_parallel<F>(
    level: &LevelDef,
    config: &SimulationConfig,
    mut on_match: F,
) -> Result<(), SimulationError>
where
    F: FnMut(MatchRecord) + Send,
{
    use rayon::prelude::*;
    use std::sync::mpsc;

    let pool = rayon::ThreadPoolBuilder::new().num_threads(config.threads).build()?;
    let completed = AtomicUsize::new(0);
    let (tx, rx) = mpsc::channel::<MatchRecord>();

    std::thread::scope(|scope| {
        scope.spawn(move || {
            pool.install(|| {
                (0..config.matches).into_par_iter().for_each_with(tx, |tx, i| {
                    let started = Instant::now();
                    let record = play_one(level, config, i);
                    if !config.quiet {
                        let n = completed.fetch_add(1, Ordering::Relaxed) + 1;
                        log_match(&record, n, config.matches, started);
                    }
                    let _ = tx.send(record);
                });
            });
        });

        for record in rx {
            on_match(record);
        }
    });
    Ok(())
}

/// Match `i` of a batch whose level has already been validated.
fn play_one(level: &LevelDef, config: &SimulationConfig, i: usize) -> MatchRecord {
    let game_config = MatchConfig {
        seed: match_seed(config.seed, i),
        ..config.game.clone()
    };
    let game = Game::build(level, game_config);
    record_match(game, &level.name, i, config.record_moves)
}

/// Writes records as JSONL, one object per line.
pub fn write_jsonl<W: Write>(records: &[MatchRecord], out: &mut W) -> std::io::Result<()> {
    for record in records {
        serde_json::to_writer(&mut *out, record)?;
        writeln!(out)?;
    }
    out.flush()
}

/// Aggregate results of a batch.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Summary {
    pub matches: usize,
    pub wins: usize,
    pub losses: usize,
    pub draws: usize,
    pub avg_moves: f64,
    pub avg_captures: f64,
}

pub fn summarize(records: &[MatchRecord]) -> Summary {
    let mut summary = Summary {
        matches: records.len(),
        ..Default::default()
    };
    let mut moves = 0u64;
    let mut captures = 0u64;
    for record in records {
        match record.outcome {
            Outcome::Win => summary.wins += 1,
            Outcome::Lose => summary.losses += 1,
            Outcome::Draw => summary.draws += 1,
        }
        moves += u64::from(record.moves);
        captures += u64::from(record.captures);
    }
    let n = records.len().max(1) as f64;
    summary.avg_moves = moves as f64 / n;
    summary.avg_captures = captures as f64 / n;
    summary
}

/// Logs a summary at info level.
pub fn log_summary(summary: &Summary) {
    let pct = |n: usize| 100.0 * n as f64 / summary.matches.max(1) as f64;
    tracing::info!("=== Simulation Summary ===");
    tracing::info!("Matches: {}", summary.matches);
    tracing::info!("Avg moves/match: {:.1}", summary.avg_moves);
    tracing::info!("Avg captures/match: {:.1}", summary.avg_captures);
    tracing::info!("Wins: {} ({:.1}%)", summary.wins, pct(summary.wins));
    tracing::info!("Losses: {} ({:.1}%)", summary.losses, pct(summary.losses));
    tracing::info!("Draws: {} ({:.1}%)", summary.draws, pct(summary.draws));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::level::builtin_levels;

    fn config(matches: usize, threads: usize) -> SimulationConfig {
        SimulationConfig {
            matches,
            threads,
            seed: 42,
            quiet: true,
            ..Default::default()
        }
    }

    #[test]
    fn play_single_match_completes() {
        let level = &builtin_levels()[0];
        let game = MatchConfig {
            seed: 7,
            ..Default::default()
        };
        let record = play_match(level, &game, 0, true).unwrap();
        assert_eq!(record.seed, 7);
        assert_eq!(record.level, "Level One");
        assert_eq!(record.log.len() as u32, record.moves);
        assert_eq!(
            record.log.iter().filter(|m| m.capture.is_some()).count() as u32,
            record.captures
        );
        match record.outcome {
            Outcome::Win => assert_eq!(record.survivors, vec![Faction::White]),
            Outcome::Lose => assert!(!record.survivors.contains(&Faction::White)),
            Outcome::Draw => assert_eq!(record.survivors.len(), 2),
        }
        assert!(record.board_squares <= 20);
    }

    #[test]
    fn sequential_and_parallel_agree() {
        let level = &builtin_levels()[1];
        let a = run_matches(level, &config(6, 1)).unwrap();
        let b = run_matches(level, &config(6, 3)).unwrap();
        assert_eq!(a, b);
        let seeds: Vec<u64> = a.iter().map(|r| r.seed).collect();
        assert_eq!(seeds, vec![42, 43, 44, 45, 46, 47]);
    }

    #[test]
    fn seeds_skip_zero_when_wrapping() {
        let batch = SimulationConfig {
            seed: u64::MAX,
            ..config(2, 1)
        };
        let records = run_matches(&builtin_levels()[0], &batch).unwrap();
        let seeds: Vec<u64> = records.iter().map(|r| r.seed).collect();
        assert_eq!(seeds, vec![u64::MAX, 1]);
        assert_eq!(match_seed(u64::MAX - 1, 2), 1);
    }

    #[test]
    fn invalid_level_stops_batch() {
        let mut level = builtin_levels()[0].clone();
        level.opponents.clear();
        assert!(matches!(
            run_matches(&level, &config(2, 1)),
            Err(SimulationError::Level(LevelError::NoOpponents(_)))
        ));
    }

    #[test]
    fn jsonl_one_line_per_record() {
        let records = run_matches(&builtin_levels()[0], &config(3, 1)).unwrap();
        let mut buf = Vec::new();
        write_jsonl(&records, &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        for (line, record) in lines.iter().zip(&records) {
            let parsed: MatchRecord = serde_json::from_str(line).unwrap();
            assert_eq!(&parsed, record);
            assert!(!line.contains("\"log\""));
        }
    }

    #[test]
    fn summarize_counts_outcomes() {
        let records = run_matches(&builtin_levels()[0], &config(8, 2)).unwrap();
        let summary = summarize(&records);
        assert_eq!(summary.matches, 8);
        assert_eq!(summary.wins + summary.losses + summary.draws, 8);
        assert!(summary.avg_moves > 0.0);
        assert_eq!(summarize(&[]), Summary::default());
    }
}

//! Session state management.
//!
//! Holds the level table, the match options, and the current match, and
//! answers the session commands. Output goes to any `Write` so the handlers
//! can be driven from tests.

use std::io::{self, Write};

use crate::game::{Game, MatchConfig, TurnEvent};
use crate::level::{builtin_levels, LevelDef, LevelError};
use crate::protocol::report::{format_event, format_level, format_status, render_board};

/// Errors raised by session commands. None of them end the session.
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("no level {0}; {1} available")]
    UnknownLevel(usize, usize),

    #[error("no match in progress")]
    NoGame,

    #[error("unknown option '{0}'")]
    UnknownOption(String),

    #[error("invalid value '{value}' for option {name}")]
    InvalidValue { name: String, value: String },

    #[error(transparent)]
    Level(#[from] LevelError),

    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Holds the mutable state of a session between commands.
pub struct Engine {
    levels: Vec<LevelDef>,
    config: MatchConfig,
    game: Option<Game>,
}

impl Default for Engine {
    fn default() -> Self {
        Engine::new()
    }
}

impl Engine {
    /// Creates a session over the built-in levels.
    pub fn new() -> Self {
        Engine::with_levels(builtin_levels())
    }

    pub fn with_levels(levels: Vec<LevelDef>) -> Self {
        Engine {
            levels,
            config: MatchConfig::default(),
            game: None,
        }
    }

    pub fn levels(&self) -> &[LevelDef] {
        &self.levels
    }

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    pub fn game(&self) -> Option<&Game> {
        self.game.as_ref()
    }

    /// Starts a new match, replacing any match in progress. `seed` overrides
    /// the configured seed for this match only.
    pub fn new_game(&mut self, level: usize, seed: Option<u64>) -> Result<(), CommandError> {
        let def = self
            .levels
            .get(level)
            .ok_or(CommandError::UnknownLevel(level, self.levels.len()))?;
        let mut config = self.config.clone();
        if let Some(seed) = seed {
            config.seed = seed;
        }
        self.game = Some(Game::new(def, config)?);
        Ok(())
    }

    /// Sets a match option. Takes effect at the next `newgame`.
    ///
    /// Options: `Seed`, `MaxQuietMoves`, `CheckAvoidance`, `BackRankKings`.
    pub fn set_option(&mut self, name: &str, value: &str) -> Result<(), CommandError> {
        let invalid = || CommandError::InvalidValue {
            name: name.to_string(),
            value: value.to_string(),
        };
        match name {
            "Seed" => self.config.seed = value.parse().map_err(|_| invalid())?,
            "MaxQuietMoves" => {
                self.config.max_quiet_moves = value.parse().map_err(|_| invalid())?
            }
            "CheckAvoidance" => {
                self.config.check_avoidance = parse_bool(value).ok_or_else(invalid)?
            }
            "BackRankKings" => {
                self.config.back_rank_kings = parse_bool(value).ok_or_else(invalid)?
            }
            _ => return Err(CommandError::UnknownOption(name.to_string())),
        }
        Ok(())
    }

    /// Writes one `level` line per table entry.
    pub fn handle_levels<W: Write>(&self, out: &mut W) -> io::Result<()> {
        for (i, level) in self.levels.iter().enumerate() {
            writeln!(out, "{}", format_level(i, level))?;
        }
        out.flush()
    }

    /// Plays up to `count` turns, writing one line per event. Stops early
    /// once the outcome has been reported.
    pub fn handle_step<W: Write>(&mut self, count: u32, out: &mut W) -> Result<(), CommandError> {
        let game = self.game.as_mut().ok_or(CommandError::NoGame)?;
        for _ in 0..count {
            let event = game.step();
            writeln!(out, "{}", format_event(&event))?;
            if matches!(event, TurnEvent::Finished(_)) {
                break;
            }
        }
        out.flush()?;
        Ok(())
    }

    /// Plays the match to the end, writing every event including the final
    /// `outcome` line.
    pub fn handle_run<W: Write>(&mut self, out: &mut W) -> Result<(), CommandError> {
        let game = self.game.as_mut().ok_or(CommandError::NoGame)?;
        loop {
            let event = game.step();
            writeln!(out, "{}", format_event(&event))?;
            if matches!(event, TurnEvent::Finished(_)) {
                break;
            }
        }
        out.flush()?;
        Ok(())
    }

    pub fn handle_board<W: Write>(&self, out: &mut W) -> Result<(), CommandError> {
        let game = self.game.as_ref().ok_or(CommandError::NoGame)?;
        write!(out, "{}", render_board(game))?;
        out.flush()?;
        Ok(())
    }

    pub fn handle_status<W: Write>(&self, out: &mut W) -> Result<(), CommandError> {
        let game = self.game.as_ref().ok_or(CommandError::NoGame)?;
        writeln!(out, "{}", format_status(game))?;
        out.flush()?;
        Ok(())
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value {
        "true" | "on" | "1" => Some(true),
        "false" | "off" | "0" => Some(false),
        _ => None,
    }
}

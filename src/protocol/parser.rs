//! Command parser.
//!
//! Turns raw input lines into `Command` values for the session loop.

/// A parsed command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// List the available levels.
    Levels,

    /// Start a match on level `level`, optionally overriding the seed.
    NewGame { level: usize, seed: Option<u64> },

    /// Set a match option: `option <name> <value>`.
    SetOption { name: String, value: String },

    /// Play `count` turns of the current match.
    Step { count: u32 },

    /// Play the current match to the end.
    Run,

    /// Print the board.
    Board,

    /// Print turn, counters and active factions.
    Status,

    /// Terminate the session.
    Quit,
}

/// Parses a single line of input into a `Command`.
///
/// Returns `None` for empty lines, unrecognized commands, and malformed
/// arguments; the latter two are logged.
pub fn parse_command(line: &str) -> Option<Command> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    let (&head, args) = tokens.split_first()?;

    match head {
        "levels" => Some(Command::Levels),
        "run" => Some(Command::Run),
        "board" => Some(Command::Board),
        "status" => Some(Command::Status),
        "quit" => Some(Command::Quit),

        "newgame" => parse_newgame(args),
        "option" => parse_option(args),
        "step" => parse_step(args),

        other => {
            tracing::warn!(command = other, "unknown command");
            None
        }
    }
}

/// Parses `newgame <level> [seed]`.
fn parse_newgame(args: &[&str]) -> Option<Command> {
    let Some(level) = args.first().and_then(|t| t.parse::<usize>().ok()) else {
        tracing::warn!("malformed newgame: expected 'newgame <level> [seed]'");
        return None;
    };
    let seed = match args.get(1) {
        Some(t) => match t.parse::<u64>() {
            Ok(v) => Some(v),
            Err(_) => {
                tracing::warn!(value = *t, "invalid seed");
                return None;
            }
        },
        None => None,
    };
    Some(Command::NewGame { level, seed })
}

/// Parses `option <name> <value>`.
fn parse_option(args: &[&str]) -> Option<Command> {
    match args {
        [name, value] => Some(Command::SetOption {
            name: name.to_string(),
            value: value.to_string(),
        }),
        _ => {
            tracing::warn!("malformed option: expected 'option <name> <value>'");
            None
        }
    }
}

/// Parses `step [n]`; `n` defaults to 1.
fn parse_step(args: &[&str]) -> Option<Command> {
    match args.first() {
        None => Some(Command::Step { count: 1 }),
        Some(t) => match t.parse::<u32>() {
            Ok(count) => Some(Command::Step { count }),
            Err(_) => {
                tracing::warn!(value = *t, "invalid step count");
                None
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_simple_commands() {
        assert_eq!(parse_command("levels"), Some(Command::Levels));
        assert_eq!(parse_command("run"), Some(Command::Run));
        assert_eq!(parse_command("  board  "), Some(Command::Board));
        assert_eq!(parse_command("status"), Some(Command::Status));
        assert_eq!(parse_command("quit"), Some(Command::Quit));
    }

    #[test]
    fn parse_empty_and_unknown() {
        assert_eq!(parse_command(""), None);
        assert_eq!(parse_command("   \t "), None);
        assert_eq!(parse_command("castle kingside"), None);
    }

    #[test]
    fn parse_newgame() {
        assert_eq!(
            parse_command("newgame 2"),
            Some(Command::NewGame {
                level: 2,
                seed: None,
            })
        );
        assert_eq!(
            parse_command("newgame 0 1234"),
            Some(Command::NewGame {
                level: 0,
                seed: Some(1234)
            })
        );
        assert_eq!(parse_command("newgame"), None);
        assert_eq!(parse_command("newgame one"), None);
        assert_eq!(parse_command("newgame 1 x"), None);
    }

    #[test]
    fn parse_option() {
        assert_eq!(
            parse_command("option CheckAvoidance true"),
            Some(Command::SetOption {
                name: "CheckAvoidance".to_string(),
                value: "true".to_string()
            })
        );
        assert_eq!(parse_command("option MaxQuietMoves"), None);
        assert_eq!(parse_command("option a b c"), None);
    }

    #[test]
    fn parse_step() {
        assert_eq!(parse_command("step"), Some(Command::Step { count: 1 }));
        assert_eq!(parse_command("step 25"), Some(Command::Step { count: 25 }));
        assert_eq!(parse_command("step -1"), None);
    }
}

//! Text output for the session protocol.
//!
//! ```text
//! move white queen 3,4 3,1
//! move red knight 2,2 4,3 capture white pawn
//! eliminated yellow
//! outcome win
//! ```

use std::fmt::Write as _;

use crate::game::{Game, TurnEvent};
use crate::level::LevelDef;

/// Formats one turn event as a protocol line (without newline).
pub fn format_event(event: &TurnEvent) -> String {
    match *event {
        TurnEvent::Moved {
            faction,
            mv,
            piece,
            captured,
            ..
        } => {
            let mut line = format!(
                "move {} {} {} {}",
                faction.name(),
                piece.name(),
                mv.from,
                mv.to
            );
            if let (Some(victim), Some(kind)) = (mv.capture, captured) {
                let _ = write!(line, " capture {} {}", victim.name(), kind.name());
            }
            line
        }
        TurnEvent::Eliminated { faction } => format!("eliminated {}", faction.name()),
        TurnEvent::Finished(outcome) => format!("outcome {}", outcome.name()),
    }
}

/// Formats a level table entry: `level <i> <squares> <w>x<h> <opponents> reward <r> name <name>`.
pub fn format_level(index: usize, level: &LevelDef) -> String {
    let opponents: Vec<&str> = level.opponents.iter().map(|o| o.faction.name()).collect();
    format!(
        "level {} {} {}x{} {} reward {} name {}",
        index,
        level.squares,
        level.width,
        level.height,
        opponents.join(","),
        level.reward,
        level.name
    )
}

/// Formats the match counters: whose turn, moves played, quiet streak and
/// the active factions. Finished matches append their outcome.
pub fn format_status(game: &Game) -> String {
    let alive: Vec<&str> = game.alive_factions().iter().map(|f| f.name()).collect();
    let mut line = format!(
        "status turn {} moves {} quiet {} alive {}",
        game.next_faction().map_or("none", |f| f.name()),
        game.move_count(),
        game.quiet_moves(),
        alive.join(",")
    );
    if let Some(outcome) = game.outcome() {
        let _ = write!(line, " outcome {}", outcome.name());
    }
    line
}

/// Renders the board of a match. Pieces of eliminated factions are drawn
/// with the dead marker.
pub fn render_board(game: &Game) -> String {
    let mut text = String::new();
    let _ = game.board().write_diagram(&mut text, |sq| game.display_owner(sq));
    text
}

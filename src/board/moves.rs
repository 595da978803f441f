//! Move values and execution records.

use serde::{Deserialize, Serialize};

use super::piece::{Faction, PieceKind};
use super::square::Square;

/// A single piece relocation.
///
/// `capture` names the faction whose piece stood on `to` when the move was
/// generated; it is `None` for quiet moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub from: Square,
    pub to: Square,
    pub capture: Option<Faction>,
}

impl Move {
    pub const fn quiet(from: Square, to: Square) -> Self {
        Move {
            from,
            to,
            capture: None,
        }
    }

    pub const fn capturing(from: Square, to: Square, victim: Faction) -> Self {
        Move {
            from,
            to,
            capture: Some(victim),
        }
    }

    pub const fn is_capture(&self) -> bool {
        self.capture.is_some()
    }
}

/// A captured piece and where it sat in its owner's list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Captured {
    pub faction: Faction,
    pub kind: PieceKind,
    pub index: usize,
}

/// Everything needed to reverse an applied move exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MoveRecord {
    pub mv: Move,
    pub faction: Faction,
    pub mover_index: usize,
    pub moved: PieceKind,
    pub captured: Option<Captured>,
}

impl MoveRecord {
    /// Kind of the piece taken by this move, if any.
    pub fn captured_kind(&self) -> Option<PieceKind> {
        self.captured.map(|c| c.kind)
    }
}

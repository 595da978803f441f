//! Level definitions.
//!
//! A level names the board to grow (target square count and bounds), the
//! player's army, and the opponent roster with their armies. The built-in
//! table ships with the engine; additional tables load from JSON:
//!
//! ```json
//! [{"name": "Duel", "squares": 30, "width": 6, "height": 6,
//!   "opponents": [{"faction": "red", "pieces": ["king", "rook"]}],
//!   "reward": 5}]
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::board::{Faction, PieceKind};
use crate::setup::Army;

/// Errors that can occur while loading or validating levels.
#[derive(Debug, thiserror::Error)]
pub enum LevelError {
    #[error("failed to read level file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse level JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("level '{0}' has empty bounds {1}x{2}")]
    EmptyBounds(String, i32, i32),

    #[error("level '{0}' has no opponents")]
    NoOpponents(String),

    #[error("level '{0}' registers {1} more than once")]
    DuplicateFaction(String, &'static str),

    #[error("level '{0}' uses the dead sentinel as a faction")]
    SentinelFaction(String),
}

/// One opponent and its starting pieces.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpponentDef {
    pub faction: Faction,
    pub pieces: Vec<PieceKind>,
}

/// A playable level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelDef {
    pub name: String,
    /// Target number of playable squares to grow.
    pub squares: usize,
    pub width: i32,
    pub height: i32,
    #[serde(default = "default_player")]
    pub player: Faction,
    #[serde(default = "default_player_pieces")]
    pub player_pieces: Vec<PieceKind>,
    pub opponents: Vec<OpponentDef>,
    #[serde(default)]
    pub reward: u32,
}

fn default_player() -> Faction {
    Faction::White
}

fn default_player_pieces() -> Vec<PieceKind> {
    vec![
        PieceKind::King,
        PieceKind::Queen,
        PieceKind::Queen,
        PieceKind::Rook,
        PieceKind::Bishop,
    ]
}

impl LevelDef {
    /// Checks bounds and roster. Square counts larger than the bounds are
    /// allowed; growth just stops early.
    pub fn validate(&self) -> Result<(), LevelError> {
        if self.width <= 0 || self.height <= 0 {
            return Err(LevelError::EmptyBounds(self.name.clone(), self.width, self.height));
        }
        if self.opponents.is_empty() {
            return Err(LevelError::NoOpponents(self.name.clone()));
        }
        let roster = self.roster();
        for (i, f) in roster.iter().enumerate() {
            if f.is_sentinel() {
                return Err(LevelError::SentinelFaction(self.name.clone()));
            }
            if roster[..i].contains(f) {
                return Err(LevelError::DuplicateFaction(self.name.clone(), f.name()));
            }
        }
        Ok(())
    }

    /// Player first, then opponents in listed order.
    pub fn roster(&self) -> Vec<Faction> {
        std::iter::once(self.player)
            .chain(self.opponents.iter().map(|o| o.faction))
            .collect()
    }

    /// Armies in roster order, ready for setup.
    pub fn armies(&self) -> Vec<Army> {
        std::iter::once(Army {
            faction: self.player,
            pieces: self.player_pieces.clone(),
        })
        .chain(self.opponents.iter().map(|o| Army {
            faction: o.faction,
            pieces: o.pieces.clone(),
        }))
        .collect()
    }
}

fn army(king: bool, spec: &[(PieceKind, usize)]) -> Vec<PieceKind> {
    let mut pieces = Vec::new();
    if king {
        pieces.push(PieceKind::King);
    }
    for &(kind, n) in spec {
        pieces.extend(std::iter::repeat(kind).take(n));
    }
    pieces
}

/// The campaign levels shipped with the engine.
pub fn builtin_levels() -> Vec<LevelDef> {
    let pawns = army(true, &[(PieceKind::Pawn, 4)]);
    let knights = army(true, &[(PieceKind::Knight, 2), (PieceKind::Pawn, 2)]);
    vec![
        LevelDef {
            name: "Level One".to_string(),
            squares: 20,
            width: 5,
            height: 5,
            player: default_player(),
            player_pieces: default_player_pieces(),
            opponents: vec![OpponentDef {
                faction: Faction::Red,
                pieces: pawns.clone(),
            }],
            reward: 1,
        },
        LevelDef {
            name: "Level Two".to_string(),
            squares: 20,
            width: 7,
            height: 5,
            player: default_player(),
            player_pieces: default_player_pieces(),
            opponents: vec![OpponentDef {
                faction: Faction::Yellow,
                pieces: knights.clone(),
            }],
            reward: 2,
        },
        LevelDef {
            name: "Level Three".to_string(),
            squares: 65,
            width: 10,
            height: 8,
            player: default_player(),
            player_pieces: default_player_pieces(),
            opponents: vec![
                OpponentDef {
                    faction: Faction::Red,
                    pieces: pawns,
                },
                OpponentDef {
                    faction: Faction::Yellow,
                    pieces: knights,
                },
            ],
            reward: 3,
        },
    ]
}

/// A free-for-all on a full 8x8: White against Red and Blue.
pub fn sandbox() -> LevelDef {
    LevelDef {
        name: "Sandbox".to_string(),
        squares: 64,
        width: 8,
        height: 8,
        player: Faction::White,
        player_pieces: default_player_pieces(),
        opponents: vec![
            OpponentDef {
                faction: Faction::Red,
                pieces: default_player_pieces(),
            },
            OpponentDef {
                faction: Faction::Blue,
                pieces: army(true, &[(PieceKind::Pawn, 3), (PieceKind::Knight, 1)]),
            },
        ],
        reward: 0,
    }
}

/// Loads and validates a level table from a JSON file.
pub fn load_levels(path: &Path) -> Result<Vec<LevelDef>, LevelError> {
    let data = fs::read_to_string(path)?;
    load_levels_from_str(&data)
}

/// Parses and validates a level table from a JSON string.
pub fn load_levels_from_str(json: &str) -> Result<Vec<LevelDef>, LevelError> {
    let levels: Vec<LevelDef> = serde_json::from_str(json)?;
    for level in &levels {
        level.validate()?;
    }
    Ok(levels)
}

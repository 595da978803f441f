//! Factions, piece kinds, and the fixed movement rule table.
//!
//! Both enums are closed: the rule set is finite, so movement is described
//! as data (`Movement`) rather than through per-piece trait objects.

use serde::{Deserialize, Serialize};

/// Number of faction variants, including the `Dead` display sentinel.
pub const FACTION_COUNT: usize = 9;

/// A side in the match, identified by its colour.
///
/// `Dead` is only used by renderers to draw an eliminated faction's pieces.
/// It is never registered and never owns squares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum Faction {
    White = 0,
    Black = 1,
    Red = 2,
    Yellow = 3,
    Green = 4,
    Cyan = 5,
    Blue = 6,
    Magenta = 7,
    Dead = 8,
}

impl Faction {
    /// Returns the lowercase colour name.
    pub const fn name(self) -> &'static str {
        match self {
            Faction::White => "white",
            Faction::Black => "black",
            Faction::Red => "red",
            Faction::Yellow => "yellow",
            Faction::Green => "green",
            Faction::Cyan => "cyan",
            Faction::Blue => "blue",
            Faction::Magenta => "magenta",
            Faction::Dead => "dead",
        }
    }

    /// Single lowercase character used in board diagrams.
    pub const fn diagram_char(self) -> char {
        match self {
            Faction::White => 'w',
            Faction::Black => 'k',
            Faction::Red => 'r',
            Faction::Yellow => 'y',
            Faction::Green => 'g',
            Faction::Cyan => 'c',
            Faction::Blue => 'b',
            Faction::Magenta => 'm',
            Faction::Dead => 'x',
        }
    }

    /// Returns true for the display-only sentinel.
    pub const fn is_sentinel(self) -> bool {
        matches!(self, Faction::Dead)
    }
}

/// The six chess piece kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum PieceKind {
    Pawn = 0,
    Knight = 1,
    Bishop = 2,
    Rook = 3,
    Queen = 4,
    King = 5,
}

/// Knight jumps, clockwise from "one right, two down".
pub const KNIGHT_OFFSETS: [(i32, i32); 8] = [
    (1, 2),
    (2, 1),
    (2, -1),
    (1, -2),
    (-1, -2),
    (-2, -1),
    (-2, 1),
    (-1, 2),
];

/// The eight neighbouring squares.
pub const KING_OFFSETS: [(i32, i32); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

pub const ROOK_DIRECTIONS: [(i32, i32); 4] = [(0, -1), (1, 0), (0, 1), (-1, 0)];

pub const BISHOP_DIRECTIONS: [(i32, i32); 4] = [(1, -1), (1, 1), (-1, 1), (-1, -1)];

pub const QUEEN_DIRECTIONS: [(i32, i32); 8] = [
    (0, -1),
    (1, 0),
    (0, 1),
    (-1, 0),
    (1, -1),
    (1, 1),
    (-1, 1),
    (-1, -1),
];

/// How a piece kind generates destinations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Movement {
    /// One step forward, diagonal forward captures.
    Pawn,
    /// A fixed set of single-hop offsets.
    Leaper(&'static [(i32, i32)]),
    /// Repeats each direction until blocked.
    Slider(&'static [(i32, i32)]),
}

impl PieceKind {
    /// Returns the movement rule for this kind.
    pub const fn movement(self) -> Movement {
        match self {
            PieceKind::Pawn => Movement::Pawn,
            PieceKind::Knight => Movement::Leaper(&KNIGHT_OFFSETS),
            PieceKind::King => Movement::Leaper(&KING_OFFSETS),
            PieceKind::Bishop => Movement::Slider(&BISHOP_DIRECTIONS),
            PieceKind::Rook => Movement::Slider(&ROOK_DIRECTIONS),
            PieceKind::Queen => Movement::Slider(&QUEEN_DIRECTIONS),
        }
    }

    /// Uppercase letter used in diagrams and protocol output.
    pub const fn letter(self) -> char {
        match self {
            PieceKind::Pawn => 'P',
            PieceKind::Knight => 'N',
            PieceKind::Bishop => 'B',
            PieceKind::Rook => 'R',
            PieceKind::Queen => 'Q',
            PieceKind::King => 'K',
        }
    }

    /// Returns the lowercase name.
    pub const fn name(self) -> &'static str {
        match self {
            PieceKind::Pawn => "pawn",
            PieceKind::Knight => "knight",
            PieceKind::Bishop => "bishop",
            PieceKind::Rook => "rook",
            PieceKind::Queen => "queen",
            PieceKind::King => "king",
        }
    }
}

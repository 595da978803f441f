//! Board representation and game-state types.
//!
//! Contains squares and regions, factions and piece kinds with their
//! movement rules, moves, and the paired board / piece-set state.

pub mod moves;
pub mod piece;
pub mod square;
pub mod state;

pub use moves::{Captured, Move, MoveRecord};
pub use piece::{
    Faction, Movement, PieceKind, BISHOP_DIRECTIONS, FACTION_COUNT, KING_OFFSETS,
    KNIGHT_OFFSETS, QUEEN_DIRECTIONS, ROOK_DIRECTIONS,
};
pub use square::{Region, Square};
pub use state::{Board, BoardState, InvariantViolation, PieceSets};

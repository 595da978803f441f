//! Skirmish engine library.
//!
//! Grows random connected boards, places faction armies on them, and plays
//! free-for-all chess matches between computer-controlled factions. Exposes
//! the board representation, setup, move generation, selection, and the
//! match and session layers for use by the binaries and integration tests.

pub mod board;
pub mod engine;
pub mod execute;
pub mod game;
pub mod level;
pub mod movegen;
pub mod protocol;
pub mod search;
pub mod setup;
pub mod simulate;

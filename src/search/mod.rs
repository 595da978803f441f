//! Move selection.
//!
//! A greedy one-ply heuristic: take a capture if one exists, otherwise
//! set up a capture, otherwise move at random.

pub mod selector;

pub use selector::{candidate_moves, classify, select_move, Candidates, Tier};

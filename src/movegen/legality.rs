//! Optional king-safety filter.
//!
//! Each candidate is tried on the position, every other registered
//! faction's pseudo moves are generated, and the candidate is rejected if
//! any of them would capture the mover's king. The position is restored
//! after every trial.
//!
//! Cost is O(candidates x opponent move generation); acceptable for boards
//! of up to a few hundred squares.

use crate::board::{BoardState, Faction, Move};
use crate::execute::speculate;
use crate::movegen::pseudo_moves;

/// Returns true if any other faction could capture `faction`'s king.
/// A faction without a king is never in check.
pub fn king_capturable(state: &BoardState, faction: Faction) -> bool {
    let Some(king) = state.king_square(faction) else {
        return false;
    };
    state
        .pieces()
        .roster()
        .iter()
        .filter(|&&other| other != faction)
        .any(|&other| {
            pseudo_moves(state, other)
                .iter()
                .any(|m| m.to == king && m.capture == Some(faction))
        })
}

/// Keeps the moves after which `faction`'s king cannot be captured.
pub fn filter_legal(state: &mut BoardState, faction: Faction, moves: &[Move]) -> Vec<Move> {
    moves
        .iter()
        .copied()
        .filter(|&mv| !speculate(state, faction, mv, |s| king_capturable(s, faction)))
        .collect()
}

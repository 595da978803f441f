//! Greedy three-tier move selection.
//!
//! Captures are preferred over attacks, attacks over anything else; ties
//! are broken uniformly at random. An attack is a move after which the
//! mover has a capturing move available on its next turn. There is no
//! lookahead beyond that single ply.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::board::{BoardState, Faction, Move};
use crate::execute::speculate;
use crate::movegen::{any_capture, filter_legal, pseudo_moves};

/// Which tier a selected move came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tier {
    Capture,
    Attack,
    Any,
}

/// Moves available to a faction, grouped by tier.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Candidates {
    pub captures: Vec<Move>,
    pub attacks: Vec<Move>,
    pub all: Vec<Move>,
}

impl Candidates {
    /// The highest non-empty tier, or `None` when the faction has no moves.
    pub fn best_tier(&self) -> Option<(Tier, &[Move])> {
        if !self.captures.is_empty() {
            Some((Tier::Capture, &self.captures))
        } else if !self.attacks.is_empty() {
            Some((Tier::Attack, &self.attacks))
        } else if !self.all.is_empty() {
            Some((Tier::Any, &self.all))
        } else {
            None
        }
    }
}

/// Moves the faction may choose from this turn, optionally filtered for
/// king safety.
pub fn candidate_moves(
    state: &mut BoardState,
    faction: Faction,
    check_avoidance: bool,
) -> Vec<Move> {
    let moves = pseudo_moves(state, faction);
    if check_avoidance {
        filter_legal(state, faction, &moves)
    } else {
        moves
    }
}

/// Sorts the faction's moves into tiers.
///
/// Attacks are only computed when there are no captures, since they would
/// never be chosen otherwise.
pub fn classify(state: &mut BoardState, faction: Faction, check_avoidance: bool) -> Candidates {
    let all = candidate_moves(state, faction, check_avoidance);
    let captures: Vec<Move> = all.iter().copied().filter(|m| m.is_capture()).collect();

    let attacks = if captures.is_empty() {
        all.iter()
            .copied()
            .filter(|&mv| speculate(state, faction, mv, |s| any_capture(s, faction)))
            .collect()
    } else {
        Vec::new()
    };

    Candidates {
        captures,
        attacks,
        all,
    }
}

/// Picks a move for `faction`, or `None` if it has none.
///
/// Draws from `rng` exactly once when a move exists.
pub fn select_move(
    state: &mut BoardState,
    faction: Faction,
    check_avoidance: bool,
    rng: &mut impl Rng,
) -> Option<(Tier, Move)> {
    let candidates = classify(state, faction, check_avoidance);
    let (tier, pool) = candidates.best_tier()?;
    pool.choose(rng).map(|mv| (tier, *mv))
}

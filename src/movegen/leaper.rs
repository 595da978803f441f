//! Moves for pieces with a fixed offset table (knight, king).

use crate::board::{BoardState, Faction, Move, Square};

/// Appends one move per offset whose target is on the board and not held
/// by the mover's own faction.
pub fn leaper_moves(
    state: &BoardState,
    faction: Faction,
    from: Square,
    offsets: &[(i32, i32)],
    out: &mut Vec<Move>,
) {
    let board = state.board();
    for &(dx, dy) in offsets {
        let target = from.offset(dx, dy);
        if !board.is_playable(target) {
            continue;
        }
        match state.owner_of(target) {
            None => out.push(Move::quiet(from, target)),
            Some(owner) if owner != faction => out.push(Move::capturing(from, target, owner)),
            Some(_) => {}
        }
    }
}

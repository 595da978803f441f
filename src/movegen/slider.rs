//! Moves for pieces that slide until blocked (bishop, rook, queen).

use crate::board::{BoardState, Faction, Move, Square};

/// Walks each direction from `from`, adding every empty square, stopping at
/// the first square off the board or occupied. An occupied stopping square
/// is added as a capture only if another faction holds it.
pub fn slider_moves(
    state: &BoardState,
    faction: Faction,
    from: Square,
    directions: &[(i32, i32)],
    out: &mut Vec<Move>,
) {
    let board = state.board();
    for &(dx, dy) in directions {
        let mut target = from.offset(dx, dy);
        while board.is_playable(target) {
            match state.owner_of(target) {
                None => out.push(Move::quiet(from, target)),
                Some(owner) => {
                    if owner != faction {
                        out.push(Move::capturing(from, target, owner));
                    }
                    break;
                }
            }
            target = target.offset(dx, dy);
        }
    }
}

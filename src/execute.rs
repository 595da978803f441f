//! Move application and exact reversal.
//!
//! `apply_move` is the only path by which a match position changes after
//! setup. It returns a `MoveRecord` carrying the list indices touched, so
//! `undo_move` can restore the board and every faction's list order
//! exactly. Calls that do not match the current position are programming
//! errors and panic.

use crate::board::{BoardState, Captured, Faction, Move, MoveRecord};

/// Applies `mv` for `faction` and returns the record needed to undo it.
///
/// The origin is cleared, the destination receives the moving piece, and
/// the mover's list entry is substituted in place. For a capture, the
/// destination is then removed from the victim's list and its index kept.
///
/// Panics if the faction does not own `mv.from`, or if the capture tag does
/// not match who holds `mv.to`.
pub fn apply_move(state: &mut BoardState, faction: Faction, mv: Move) -> MoveRecord {
    let (board, pieces) = state.parts_mut();

    let mover_index = pieces
        .index_of(faction, mv.from)
        .unwrap_or_else(|| panic!("{} does not own {}", faction.name(), mv.from));
    let moved = board
        .piece_at(mv.from)
        .unwrap_or_else(|| panic!("no piece on {} to move", mv.from));

    match (mv.capture, pieces.owner_of(mv.to)) {
        (None, None) => {}
        (Some(victim), Some(owner)) if victim == owner && victim != faction => {}
        (tag, owner) => panic!(
            "move {} -> {} tagged {:?} but destination held by {:?}",
            mv.from, mv.to, tag, owner
        ),
    }

    board.set(mv.from, None);
    let previous = board.set(mv.to, Some(moved));
    pieces.replace(faction, mover_index, mv.to);

    let captured = mv.capture.map(|victim| {
        let index = pieces
            .index_of(victim, mv.to)
            .unwrap_or_else(|| panic!("{} lost track of {}", victim.name(), mv.to));
        pieces.remove_at(victim, index);
        Captured {
            faction: victim,
            kind: previous.unwrap_or_else(|| panic!("capture on empty square {}", mv.to)),
            index,
        }
    });

    MoveRecord {
        mv,
        faction,
        mover_index,
        moved,
        captured,
    }
}

/// Reverses a move previously applied with `apply_move`.
///
/// Records must be undone in reverse order of application. Panics if the
/// position does not look like the one the record left behind.
pub fn undo_move(state: &mut BoardState, record: &MoveRecord) {
    let mv = record.mv;
    let (board, pieces) = state.parts_mut();

    assert_eq!(
        pieces.squares_of(record.faction).get(record.mover_index),
        Some(&mv.to),
        "undo of {} -> {} without a matching apply",
        mv.from,
        mv.to
    );
    assert_eq!(board.piece_at(mv.to), Some(record.moved), "moved piece missing on {}", mv.to);
    assert!(board.is_vacant(mv.from), "origin {} is no longer empty", mv.from);

    board.set(mv.to, record.captured.map(|c| c.kind));
    board.set(mv.from, Some(record.moved));
    pieces.replace(record.faction, record.mover_index, mv.from);

    if let Some(c) = record.captured {
        pieces.insert_at(c.faction, c.index, mv.to);
    }
}

/// Applies a move, runs `f` on the resulting position, then undoes it.
pub fn speculate<R>(
    state: &mut BoardState,
    faction: Faction,
    mv: Move,
    f: impl FnOnce(&BoardState) -> R,
) -> R {
    let record = apply_move(state, faction, mv);
    let result = f(state);
    undo_move(state, &record);
    result
}

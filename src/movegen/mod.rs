//! Pseudo-legal move generation.
//!
//! Generates every move a faction's pieces can make under their movement
//! rules and board occupancy, without checking king safety. The optional
//! king-safety filter lives in `legality`.

pub mod leaper;
pub mod legality;
pub mod pawn;
pub mod slider;

use crate::board::{BoardState, Faction, Move, Movement, Square};

pub use legality::filter_legal;

/// Appends the pseudo-legal moves of the piece on `from`.
///
/// Does nothing for an empty or off-board square.
pub fn piece_moves(state: &BoardState, faction: Faction, from: Square, out: &mut Vec<Move>) {
    let Some(kind) = state.piece_at(from) else {
        return;
    };
    match kind.movement() {
        Movement::Pawn => pawn::pawn_moves(state, faction, from, out),
        Movement::Leaper(offsets) => leaper::leaper_moves(state, faction, from, offsets, out),
        Movement::Slider(directions) => slider::slider_moves(state, faction, from, directions, out),
    }
}

/// Generates all pseudo-legal moves for a faction, piece by piece in the
/// order of its square list.
pub fn pseudo_moves(state: &BoardState, faction: Faction) -> Vec<Move> {
    let mut moves = Vec::new();
    for &from in state.pieces().squares_of(faction) {
        piece_moves(state, faction, from, &mut moves);
    }
    moves
}

/// Returns true if the faction has at least one capturing pseudo move.
pub fn any_capture(state: &BoardState, faction: Faction) -> bool {
    let mut buf = Vec::new();
    for &from in state.pieces().squares_of(faction) {
        buf.clear();
        piece_moves(state, faction, from, &mut buf);
        if buf.iter().any(|m| m.is_capture()) {
            return true;
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Board, PieceKind};
    use std::collections::HashSet;

    #[test]
    fn knight_at_three_three_on_full_board() {
        let mut state = BoardState::new(Board::filled(8, 8), &[Faction::White]);
        state.place(Faction::White, Square::new(3, 3), PieceKind::Knight);
        let moves = pseudo_moves(&state, Faction::White);

        let expected: HashSet<Square> = [
            (4, 5),
            (5, 4),
            (5, 2),
            (4, 1),
            (2, 1),
            (1, 2),
            (1, 4),
            (2, 5),
        ]
        .into_iter()
        .map(Square::from)
        .collect();
        let got: HashSet<Square> = moves.iter().map(|m| m.to).collect();
        assert_eq!(moves.len(), 8);
        assert_eq!(got, expected);
        assert!(moves.iter().all(|m| m.from == Square::new(3, 3) && m.capture.is_none()));
    }

    #[test]
    fn moves_follow_list_order() {
        let mut state = BoardState::new(Board::filled(4, 4), &[Faction::White, Faction::Red]);
        state.place(Faction::White, Square::new(3, 3), PieceKind::Pawn);
        state.place(Faction::White, Square::new(0, 3), PieceKind::Pawn);
        let moves = pseudo_moves(&state, Faction::White);
        assert_eq!(
            moves,
            vec![
                Move::quiet(Square::new(3, 3), Square::new(3, 2)),
                Move::quiet(Square::new(0, 3), Square::new(0, 2)),
            ]
        );
    }

    #[test]
    fn capture_tags_name_the_victim() {
        let mut state = BoardState::new(
            Board::filled(5, 5),
            &[Faction::White, Faction::Red, Faction::Blue],
        );
        state.place(Faction::White, Square::new(2, 2), PieceKind::Queen);
        state.place(Faction::Red, Square::new(2, 0), PieceKind::Pawn);
        state.place(Faction::Blue, Square::new(4, 4), PieceKind::Pawn);
        let moves = pseudo_moves(&state, Faction::White);
        let captures: HashSet<(Square, Faction)> = moves
            .iter()
            .filter_map(|m| m.capture.map(|c| (m.to, c)))
            .collect();
        assert_eq!(
            captures,
            [(Square::new(2, 0), Faction::Red), (Square::new(4, 4), Faction::Blue)]
                .into_iter()
                .collect()
        );
        assert!(any_capture(&state, Faction::White));
    }

    #[test]
    fn no_pieces_no_moves() {
        let state = BoardState::new(Board::filled(4, 4), &[Faction::White, Faction::Red]);
        assert!(pseudo_moves(&state, Faction::Red).is_empty());
        assert!(!any_capture(&state, Faction::Red));
    }

    #[test]
    fn any_capture_false_without_contact() {
        let mut state = BoardState::new(Board::filled(8, 8), &[Faction::White, Faction::Red]);
        state.place(Faction::White, Square::new(0, 7), PieceKind::King);
        state.place(Faction::Red, Square::new(7, 0), PieceKind::King);
        assert!(!any_capture(&state, Faction::White));
    }
}

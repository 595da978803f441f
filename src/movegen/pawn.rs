//! Pawn move generation.

use crate::board::{BoardState, Faction, Move, Square};

/// Appends the pawn moves from `from`: one step forward onto an empty
/// square, and the two forward diagonals when they hold another faction's
/// piece. No double step, en passant, or promotion.
pub fn pawn_moves(state: &BoardState, faction: Faction, from: Square, out: &mut Vec<Move>) {
    let dy = state.pieces().pawn_direction(faction);
    let board = state.board();

    let ahead = from.offset(0, dy);
    if board.is_vacant(ahead) {
        out.push(Move::quiet(from, ahead));
    }

    for dx in [-1, 1] {
        let target = from.offset(dx, dy);
        if let Some(owner) = state.owner_of(target) {
            if owner != faction {
                out.push(Move::capturing(from, target, owner));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Board, PieceKind};

    fn state() -> BoardState {
        BoardState::new(Board::filled(5, 5), &[Faction::White, Faction::Red])
    }

    #[test]
    fn player_pawn_moves_up() {
        let mut s = state();
        s.place(Faction::White, Square::new(2, 2), PieceKind::Pawn);
        let mut out = Vec::new();
        pawn_moves(&s, Faction::White, Square::new(2, 2), &mut out);
        assert_eq!(out, vec![Move::quiet(Square::new(2, 2), Square::new(2, 1))]);
    }

    #[test]
    fn opponent_pawn_moves_down() {
        let mut s = state();
        s.place(Faction::Red, Square::new(2, 2), PieceKind::Pawn);
        let mut out = Vec::new();
        pawn_moves(&s, Faction::Red, Square::new(2, 2), &mut out);
        assert_eq!(out, vec![Move::quiet(Square::new(2, 2), Square::new(2, 3))]);
    }

    #[test]
    fn blocked_pawn_cannot_capture_forward() {
        let mut s = state();
        s.place(Faction::White, Square::new(2, 2), PieceKind::Pawn);
        s.place(Faction::Red, Square::new(2, 1), PieceKind::Rook);
        let mut out = Vec::new();
        pawn_moves(&s, Faction::White, Square::new(2, 2), &mut out);
        assert!(out.is_empty());
    }

    #[test]
    fn diagonal_captures_only_enemies() {
        let mut s = state();
        s.place(Faction::White, Square::new(2, 2), PieceKind::Pawn);
        s.place(Faction::Red, Square::new(1, 1), PieceKind::Knight);
        s.place(Faction::White, Square::new(3, 1), PieceKind::Knight);
        let mut out = Vec::new();
        pawn_moves(&s, Faction::White, Square::new(2, 2), &mut out);
        assert_eq!(
            out,
            vec![
                Move::quiet(Square::new(2, 2), Square::new(2, 1)),
                Move::capturing(Square::new(2, 2), Square::new(1, 1), Faction::Red),
            ]
        );
    }

    #[test]
    fn pawn_on_edge_has_no_moves() {
        let mut s = state();
        s.place(Faction::White, Square::new(0, 0), PieceKind::Pawn);
        let mut out = Vec::new();
        pawn_moves(&s, Faction::White, Square::new(0, 0), &mut out);
        assert!(out.is_empty());
    }
}

//! Randomized flood growth of irregular boards.
//!
//! Growth starts at the centre of the bounds and repeatedly claims a random
//! square from the frontier, so every board is orthogonally connected.

use std::collections::{HashSet, VecDeque};

use rand::Rng;

use crate::board::{Board, Square};

/// Neighbour expansion order. Part of the replay contract: changing it
/// changes every seeded board.
const GROWTH_DIRECTIONS: [(i32, i32); 4] = [(0, 1), (0, -1), (1, 0), (-1, 0)];

/// Grows a board of up to `target` squares inside `width` x `height`.
///
/// Each iteration removes a uniformly random frontier entry (the rest keep
/// insertion order), makes it playable, and enqueues its unseen in-bounds
/// neighbours. If the frontier runs dry first, the smaller board is returned.
pub fn generate_board(target: usize, width: i32, height: i32, rng: &mut impl Rng) -> Board {
    let mut board = Board::empty(width, height);
    if width <= 0 || height <= 0 {
        if target > 0 {
            tracing::warn!(width, height, "board bounds are empty, no squares grown");
        }
        return board;
    }

    let start = Square::new(width / 2, height / 2);
    let mut frontier = vec![start];
    let mut seen: HashSet<Square> = HashSet::new();
    seen.insert(start);

    let mut grown = 0usize;
    while grown < target && !frontier.is_empty() {
        let idx = rng.gen_range(0..frontier.len());
        let square = frontier.remove(idx);
        board.add_square(square);

        for (dx, dy) in GROWTH_DIRECTIONS {
            let adj = square.offset(dx, dy);
            if adj.x < 0 || adj.x >= width || adj.y < 0 || adj.y >= height {
                continue;
            }
            if seen.insert(adj) {
                frontier.push(adj);
            }
        }

        grown += 1;
    }

    if grown < target {
        tracing::warn!(
            target_squares = target,
            grown,
            width,
            height,
            "too many squares to fit within bounds"
        );
    }

    board
}

/// Returns every playable square orthogonally reachable from `start`.
pub fn flood_fill(board: &Board, start: Square) -> HashSet<Square> {
    let mut reached = HashSet::new();
    if !board.is_playable(start) {
        return reached;
    }
    let mut queue = VecDeque::new();
    reached.insert(start);
    queue.push_back(start);
    while let Some(sq) = queue.pop_front() {
        for (dx, dy) in GROWTH_DIRECTIONS {
            let adj = sq.offset(dx, dy);
            if board.is_playable(adj) && reached.insert(adj) {
                queue.push_back(adj);
            }
        }
    }
    reached
}

/// Returns true if every playable square is reachable from every other.
pub fn is_connected(board: &Board) -> bool {
    match board.squares().next() {
        Some(first) => flood_fill(board, first).len() == board.len(),
        None => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn fills_small_bounds_completely() {
        let mut rng = StdRng::seed_from_u64(7);
        let board = generate_board(25, 5, 5, &mut rng);
        assert_eq!(board.len(), 25);
        assert_eq!(flood_fill(&board, Square::new(2, 2)).len(), 25);
    }

    #[test]
    fn starts_at_centre() {
        let mut rng = StdRng::seed_from_u64(1);
        let board = generate_board(1, 7, 4, &mut rng);
        assert_eq!(board.squares().collect::<Vec<_>>(), vec![Square::new(3, 2)]);
    }

    #[test]
    fn stops_at_target() {
        let mut rng = StdRng::seed_from_u64(3);
        let board = generate_board(20, 10, 10, &mut rng);
        assert_eq!(board.len(), 20);
        assert!(is_connected(&board));
        assert_eq!(board.width(), 10);
        assert_eq!(board.height(), 10);
    }

    #[test]
    fn shortfall_returns_smaller_board() {
        let mut rng = StdRng::seed_from_u64(3);
        let board = generate_board(50, 4, 3, &mut rng);
        assert_eq!(board.len(), 12);
    }

    #[test]
    fn degenerate_inputs_give_empty_board() {
        let mut rng = StdRng::seed_from_u64(3);
        assert!(generate_board(0, 8, 8, &mut rng).is_empty());
        assert!(generate_board(10, 0, 8, &mut rng).is_empty());
        assert!(generate_board(10, 8, -1, &mut rng).is_empty());
    }

    #[test]
    fn squares_stay_in_bounds() {
        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let board = generate_board(40, 9, 6, &mut rng);
            assert!(board.squares().all(|sq| board.bounds().contains(sq)));
            assert!(is_connected(&board));
        }
    }

    #[test]
    fn same_seed_same_board() {
        let a = generate_board(30, 8, 8, &mut StdRng::seed_from_u64(99));
        let b = generate_board(30, 8, 8, &mut StdRng::seed_from_u64(99));
        assert_eq!(a, b);
    }

    #[test]
    fn flood_fill_from_off_board_is_empty() {
        let board = Board::filled(2, 2);
        assert!(flood_fill(&board, Square::new(5, 5)).is_empty());
        assert_eq!(flood_fill(&board, Square::new(0, 0)).len(), 4);
    }

    #[test]
    fn disconnected_board_is_detected() {
        let mut board = Board::empty(3, 1);
        board.add_square(Square::new(0, 0));
        board.add_square(Square::new(2, 0));
        assert!(!is_connected(&board));
    }
}

//! Match setup: board growth, territory assignment, and piece placement.
//!
//! Random draws happen in a fixed order: board growth first, then each
//! army in roster order (king rank choice, then the placement shuffle).

pub mod growth;
pub mod placement;
pub mod regions;

use rand::Rng;

use crate::board::{BoardState, Faction, PieceKind, Region};

pub use growth::{flood_fill, generate_board, is_connected};
pub use placement::{open_squares, place_king, place_pieces};
pub use regions::{assign_regions, region_of};

/// A faction and the pieces it starts with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Army {
    pub faction: Faction,
    pub pieces: Vec<PieceKind>,
}

/// The populated starting position of a match.
#[derive(Debug, Clone)]
pub struct Setup {
    pub state: BoardState,
    pub regions: Vec<(Faction, Region)>,
    /// Pieces actually placed per faction, in roster order.
    pub placed: Vec<(Faction, usize)>,
}

/// Grows a board and populates it with `armies`. The first army is the
/// player.
///
/// With `back_rank_kings`, the first king of each army goes on its back
/// line and the rest of the army is scattered; otherwise the whole list is
/// scattered.
pub fn build_match(
    squares: usize,
    width: i32,
    height: i32,
    armies: &[Army],
    back_rank_kings: bool,
    rng: &mut impl Rng,
) -> Setup {
    let board = generate_board(squares, width, height, rng);
    let roster: Vec<Faction> = armies.iter().map(|a| a.faction).collect();
    let mut state = BoardState::new(board, &roster);

    let (player, opponents) = match roster.split_first() {
        Some((p, rest)) => (*p, rest),
        None => {
            return Setup {
                state,
                regions: Vec::new(),
                placed: Vec::new(),
            }
        }
    };
    let regions = assign_regions(width, height, player, opponents);

    let mut placed = Vec::with_capacity(armies.len());
    for (i, army) in armies.iter().enumerate() {
        let Some(region) = region_of(&regions, army.faction) else {
            continue;
        };

        let mut pieces = army.pieces.clone();
        let mut count = 0;
        if back_rank_kings {
            if let Some(k) = pieces.iter().position(|p| *p == PieceKind::King) {
                pieces.remove(k);
                if place_king(&mut state, army.faction, region, i == 0, rng).is_some() {
                    count += 1;
                }
            }
        }
        count += place_pieces(&mut state, army.faction, region, &pieces, rng);

        tracing::debug!(
            faction = army.faction.name(),
            requested = army.pieces.len(),
            placed = count,
            "army placed"
        );
        placed.push((army.faction, count));
    }

    Setup {
        state,
        regions,
        placed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn armies() -> Vec<Army> {
        vec![
            Army {
                faction: Faction::White,
                pieces: vec![PieceKind::King, PieceKind::Queen, PieceKind::Rook],
            },
            Army {
                faction: Faction::Red,
                pieces: vec![PieceKind::King, PieceKind::Pawn, PieceKind::Pawn],
            },
            Army {
                faction: Faction::Blue,
                pieces: vec![PieceKind::Knight, PieceKind::Pawn],
            },
        ]
    }

    #[test]
    fn full_board_places_every_piece() {
        let mut rng = StdRng::seed_from_u64(5);
        let setup = build_match(64, 8, 8, &armies(), true, &mut rng);
        assert_eq!(setup.state.board().len(), 64);
        assert_eq!(
            setup.placed,
            vec![(Faction::White, 3), (Faction::Red, 3), (Faction::Blue, 2)]
        );
        assert_eq!(setup.state.board().occupied_count(), 8);
        assert!(setup.state.verify().is_ok());
    }

    #[test]
    fn armies_start_inside_their_regions() {
        for seed in 0..10 {
            let mut rng = StdRng::seed_from_u64(seed);
            let setup = build_match(48, 8, 8, &armies(), true, &mut rng);
            for (faction, region) in &setup.regions {
                for sq in setup.state.pieces().squares_of(*faction) {
                    assert!(region.contains(*sq), "{} outside region of {}", sq, faction.name());
                }
            }
        }
    }

    #[test]
    fn back_rank_king_is_listed_first() {
        let mut rng = StdRng::seed_from_u64(11);
        let setup = build_match(64, 8, 8, &armies(), true, &mut rng);
        let white = setup.state.pieces().squares_of(Faction::White);
        assert_eq!(setup.state.piece_at(white[0]), Some(PieceKind::King));
        assert_eq!(white[0].y, 7);
        let red = setup.state.pieces().squares_of(Faction::Red);
        assert_eq!(red[0].y, 0);
    }

    #[test]
    fn same_seed_same_setup() {
        let a = build_match(40, 8, 8, &armies(), true, &mut StdRng::seed_from_u64(8));
        let b = build_match(40, 8, 8, &armies(), true, &mut StdRng::seed_from_u64(8));
        assert_eq!(a.state, b.state);
        assert_eq!(a.regions, b.regions);
    }

    #[test]
    fn no_armies_gives_bare_board() {
        let setup = build_match(10, 5, 5, &[], true, &mut StdRng::seed_from_u64(1));
        assert_eq!(setup.state.board().len(), 10);
        assert!(setup.regions.is_empty());
    }
}

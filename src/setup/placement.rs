//! Random placement of starting pieces inside a faction's region.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::board::{BoardState, Faction, PieceKind, Region, Square};

/// Empty playable squares inside the region, in board order.
pub fn open_squares(state: &BoardState, region: Region) -> Vec<Square> {
    state
        .board()
        .cells()
        .filter(|(sq, piece)| piece.is_none() && region.contains(*sq))
        .map(|(sq, _)| sq)
        .collect()
}

/// Scatters `pieces` over the open squares of `region`.
///
/// Candidates are shuffled once and popped from the back, one per piece.
/// Pieces left over when candidates run out are dropped. Returns the number
/// actually placed.
pub fn place_pieces(
    state: &mut BoardState,
    faction: Faction,
    region: Region,
    pieces: &[PieceKind],
    rng: &mut impl Rng,
) -> usize {
    let mut candidates = open_squares(state, region);
    candidates.shuffle(rng);

    let mut placed = 0;
    for &kind in pieces {
        let Some(square) = candidates.pop() else {
            tracing::warn!(
                faction = faction.name(),
                requested = pieces.len(),
                placed,
                "not enough open squares to place pieces"
            );
            break;
        };
        assert!(
            state.place(faction, square, kind),
            "placement of {} on {} rejected",
            faction.name(),
            square
        );
        placed += 1;
    }
    placed
}

/// Puts a king on the faction's back line.
///
/// The player's back line is the largest open rank of its region; an
/// opponent's is the smallest. The square is chosen uniformly along that
/// rank. Returns `None` without drawing from `rng` if the region is full.
pub fn place_king(
    state: &mut BoardState,
    faction: Faction,
    region: Region,
    is_player: bool,
    rng: &mut impl Rng,
) -> Option<Square> {
    let open = open_squares(state, region);
    let rank = if is_player {
        open.iter().map(|sq| sq.y).max()?
    } else {
        open.iter().map(|sq| sq.y).min()?
    };

    let line: Vec<Square> = open.into_iter().filter(|sq| sq.y == rank).collect();
    let square = *line.choose(rng)?;
    assert!(
        state.place(faction, square, PieceKind::King),
        "king placement of {} on {} rejected",
        faction.name(),
        square
    );
    Some(square)
}

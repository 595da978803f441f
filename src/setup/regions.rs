//! Starting-territory assignment.

use crate::board::{Faction, Region};

/// Splits the bounds into one region per faction.
///
/// The player takes the bottom half: rows from `height / 2` down to the
/// edge. Opponents share the top half in equal-width columns, in roster
/// order; the last opponent also takes any leftover columns. The result is
/// ordered player first.
pub fn assign_regions(
    width: i32,
    height: i32,
    player: Faction,
    opponents: &[Faction],
) -> Vec<(Faction, Region)> {
    let half = height / 2;
    let mut regions = Vec::with_capacity(opponents.len() + 1);
    regions.push((player, Region::new(0, half, width, height - half)));

    if opponents.is_empty() {
        return regions;
    }

    let n = opponents.len() as i32;
    let column = width / n;
    for (i, &faction) in opponents.iter().enumerate() {
        let i = i as i32;
        let x = column * i;
        let w = if i == n - 1 { width - x } else { column };
        regions.push((faction, Region::new(x, 0, w, half)));
    }

    regions
}

/// Looks up a faction's region in an assignment.
pub fn region_of(regions: &[(Faction, Region)], faction: Faction) -> Option<Region> {
    regions.iter().find(|(f, _)| *f == faction).map(|(_, r)| *r)
}

//! Board coordinates and placement regions.

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

/// A board coordinate. `y` grows downward, so the player's side of the
/// board has the larger ranks.
///
/// Squares order by rank first, then by file. This is the iteration order of
/// every board and is relied on for reproducible placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Square {
    pub x: i32,
    pub y: i32,
}

impl Square {
    pub const fn new(x: i32, y: i32) -> Self {
        Square { x, y }
    }

    /// Returns the square displaced by `(dx, dy)`. No bounds are implied.
    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Square {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

impl Ord for Square {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.y, self.x).cmp(&(other.y, other.x))
    }
}

impl PartialOrd for Square {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.x, self.y)
    }
}

impl From<(i32, i32)> for Square {
    fn from((x, y): (i32, i32)) -> Self {
        Square { x, y }
    }
}

/// An axis-aligned rectangle of board territory assigned to one faction.
///
/// Only used while placing starting pieces; movement ignores regions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Region {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Region {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Region {
            x,
            y,
            width,
            height,
        }
    }

    /// Returns true if the square lies inside the half-open rectangle.
    pub const fn contains(&self, square: Square) -> bool {
        square.x >= self.x
            && square.x < self.x + self.width
            && square.y >= self.y
            && square.y < self.y + self.height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn squares_order_by_rank_then_file() {
        let mut squares = vec![
            Square::new(2, 1),
            Square::new(0, 2),
            Square::new(5, 0),
            Square::new(1, 1),
        ];
        squares.sort();
        assert_eq!(
            squares,
            vec![
                Square::new(5, 0),
                Square::new(1, 1),
                Square::new(2, 1),
                Square::new(0, 2),
            ]
        );
    }

    #[test]
    fn offset_and_display() {
        let sq = Square::new(3, 3).offset(-1, 2);
        assert_eq!(sq, Square::new(2, 5));
        assert_eq!(sq.to_string(), "2,5");
    }

    #[test]
    fn region_contains_is_half_open() {
        let region = Region::new(2, 0, 3, 4);
        assert!(region.contains(Square::new(2, 0)));
        assert!(region.contains(Square::new(4, 3)));
        assert!(!region.contains(Square::new(5, 0)));
        assert!(!region.contains(Square::new(2, 4)));
        assert!(!region.contains(Square::new(1, 2)));
    }
}

//! Tile coordinates and the eight-direction compass.
//!
//! The grid uses `x` growing east and `y` growing north, so a step north
//! increases `y` by one. All coordinate arithmetic is checked; a step that
//! would leave the `i32` range yields `None` instead of wrapping.

use serde::{Deserialize, Serialize};

/// A tile position on a map grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TileCoord {
    /// Column, growing east.
    pub x: i32,
    /// Row, growing north.
    pub y: i32,
}

impl TileCoord {
    /// Create a coordinate from its two components.
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Per-axis offset from `self` to `other` (`other - self`).
    ///
    /// Returns `None` if either subtraction overflows.
    pub const fn delta_to(self, other: Self) -> Option<(i32, i32)> {
        let Some(dx) = other.x.checked_sub(self.x) else {
            return None;
        };
        let Some(dy) = other.y.checked_sub(self.y) else {
            return None;
        };
        Some((dx, dy))
    }

    /// Whether `other` is this tile or one of its eight neighbours.
    pub fn is_adjacent_or_same(self, other: Self) -> bool {
        self.delta_to(other)
            .is_some_and(|(dx, dy)| dx.unsigned_abs() <= 1 && dy.unsigned_abs() <= 1)
    }

    /// The tile one step away in `direction`.
    pub const fn step(self, direction: Direction) -> Option<Self> {
        let (dx, dy) = direction.offset();
        let Some(x) = self.x.checked_add(dx) else {
            return None;
        };
        let Some(y) = self.y.checked_add(dy) else {
            return None;
        };
        Some(Self { x, y })
    }

    /// All neighbouring tiles, in compass order starting north.
    pub fn neighbors(self) -> impl Iterator<Item = (Direction, Self)> {
        Direction::ALL
            .into_iter()
            .filter_map(move |dir| self.step(dir).map(|tile| (dir, tile)))
    }
}

impl core::fmt::Display for TileCoord {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// One of the eight compass directions an entity can step in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// +y.
    N,
    /// +x, +y.
    NE,
    /// +x.
    E,
    /// +x, -y.
    SE,
    /// -y.
    S,
    /// -x, -y.
    SW,
    /// -x.
    W,
    /// -x, +y.
    NW,
}

impl Direction {
    /// All directions, clockwise from north.
    pub const ALL: [Self; 8] = [
        Self::N,
        Self::NE,
        Self::E,
        Self::SE,
        Self::S,
        Self::SW,
        Self::W,
        Self::NW,
    ];

    /// Resolve a single-tile offset to a direction.
    ///
    /// Each axis must be -1, 0, or 1. Returns `None` for the zero offset
    /// and for anything further than one tile away.
    pub const fn from_delta(dx: i32, dy: i32) -> Option<Self> {
        match (dx, dy) {
            (0, 1) => Some(Self::N),
            (1, 1) => Some(Self::NE),
            (1, 0) => Some(Self::E),
            (1, -1) => Some(Self::SE),
            (0, -1) => Some(Self::S),
            (-1, -1) => Some(Self::SW),
            (-1, 0) => Some(Self::W),
            (-1, 1) => Some(Self::NW),
            _ => None,
        }
    }

    /// The `(dx, dy)` offset of one step in this direction.
    pub const fn offset(self) -> (i32, i32) {
        match self {
            Self::N => (0, 1),
            Self::NE => (1, 1),
            Self::E => (1, 0),
            Self::SE => (1, -1),
            Self::S => (0, -1),
            Self::SW => (-1, -1),
            Self::W => (-1, 0),
            Self::NW => (-1, 1),
        }
    }

    /// Whether this is a diagonal direction.
    pub const fn is_diagonal(self) -> bool {
        matches!(self, Self::NE | Self::SE | Self::SW | Self::NW)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_delta_inverts_offset() {
        for dir in Direction::ALL {
            let (dx, dy) = dir.offset();
            assert_eq!(Direction::from_delta(dx, dy), Some(dir));
        }
    }

    #[test]
    fn zero_and_far_deltas_have_no_direction() {
        assert_eq!(Direction::from_delta(0, 0), None);
        assert_eq!(Direction::from_delta(2, 0), None);
        assert_eq!(Direction::from_delta(-1, -2), None);
    }

    #[test]
    fn north_increases_y() {
        let start = TileCoord::new(5, 5);
        assert_eq!(start.step(Direction::N), Some(TileCoord::new(5, 6)));
        assert_eq!(start.step(Direction::SW), Some(TileCoord::new(4, 4)));
    }

    #[test]
    fn step_overflow_is_none() {
        let edge = TileCoord::new(i32::MAX, 0);
        assert_eq!(edge.step(Direction::E), None);
        assert_eq!(edge.step(Direction::W), Some(TileCoord::new(i32::MAX - 1, 0)));
    }

    #[test]
    fn delta_and_adjacency() {
        let a = TileCoord::new(1, 1);
        assert_eq!(a.delta_to(TileCoord::new(3, 0)), Some((2, -1)));
        assert!(a.is_adjacent_or_same(TileCoord::new(2, 2)));
        assert!(a.is_adjacent_or_same(a));
        assert!(!a.is_adjacent_or_same(TileCoord::new(1, 3)));
    }

    #[test]
    fn neighbors_yields_eight_tiles() {
        let tiles: Vec<_> = TileCoord::new(0, 0).neighbors().collect();
        assert_eq!(tiles.len(), 8);
        assert_eq!(tiles.first(), Some(&(Direction::N, TileCoord::new(0, 1))));
    }

    #[test]
    fn diagonals() {
        assert!(Direction::NE.is_diagonal());
        assert!(!Direction::W.is_diagonal());
    }
}

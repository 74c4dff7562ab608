//! Tile maps: a bounded grid with static obstacles.
//!
//! A [`TileMap`] knows its size and which tiles are blocked by terrain.
//! Dynamic occupancy (other avatars) is tracked by the
//! [`World`](crate::World) and passed to path finding as a predicate.

use std::collections::{BTreeMap, BTreeSet, VecDeque};

use cadence_actions::WalkPath;
use cadence_types::{MapId, TileCoord};
use serde::{Deserialize, Serialize};

/// A rectangular grid of tiles, `0..width` by `0..height`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileMap {
    id: MapId,
    name: String,
    width: u32,
    height: u32,
    blocked: BTreeSet<TileCoord>,
}

impl TileMap {
    /// Create an empty map of the given size.
    pub fn new(name: impl Into<String>, width: u32, height: u32) -> Self {
        Self {
            id: MapId::new(),
            name: name.into(),
            width,
            height,
            blocked: BTreeSet::new(),
        }
    }

    /// Mark tiles as blocked by terrain.
    #[must_use]
    pub fn with_blocked(mut self, tiles: impl IntoIterator<Item = TileCoord>) -> Self {
        self.blocked.extend(tiles);
        self
    }

    /// Map id.
    pub const fn id(&self) -> MapId {
        self.id
    }

    /// Map name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Width in tiles.
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Height in tiles.
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Whether `tile` lies inside the map.
    pub fn contains(&self, tile: TileCoord) -> bool {
        let inside = |v: i32, len: u32| u32::try_from(v).is_ok_and(|v| v < len);
        inside(tile.x, self.width) && inside(tile.y, self.height)
    }

    /// Whether `tile` is outside the map or blocked by terrain.
    pub fn is_blocked(&self, tile: TileCoord) -> bool {
        !self.contains(tile) || self.blocked.contains(&tile)
    }

    /// Find a shortest eight-way path from `start` to `goal`.
    ///
    /// Tiles are walkable when they are inside the map, not blocked, and
    /// accepted by `is_free`. `start` itself is never tested. The returned
    /// path begins with `start` and ends with `goal`; `None` means the goal
    /// can't be reached.
    pub fn find_path(
        &self,
        start: TileCoord,
        goal: TileCoord,
        is_free: impl Fn(TileCoord) -> bool,
    ) -> Option<WalkPath> {
        if start == goal {
            return Some(WalkPath::new([start]));
        }
        if self.is_blocked(goal) || !is_free(goal) {
            return None;
        }

        let mut prev: BTreeMap<TileCoord, TileCoord> = BTreeMap::new();
        let mut queue = VecDeque::from([start]);

        'search: while let Some(current) = queue.pop_front() {
            for (_, next) in current.neighbors() {
                if next == start || prev.contains_key(&next) {
                    continue;
                }
                if self.is_blocked(next) || !is_free(next) {
                    continue;
                }
                prev.insert(next, current);
                if next == goal {
                    break 'search;
                }
                queue.push_back(next);
            }
        }

        // Walk predecessors back from the goal.
        let mut tiles = VecDeque::from([goal]);
        let mut current = goal;
        while let Some(&predecessor) = prev.get(&current) {
            tiles.push_front(predecessor);
            if predecessor == start {
                return Some(WalkPath::new(tiles));
            }
            current = predecessor;
        }
        None
    }
}

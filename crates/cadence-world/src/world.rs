//! The [`World`]: registry of maps and avatars.
//!
//! `World` is the reference implementation of
//! [`ActionWorld`]. Actions resolve their targets through it by id, so an
//! avatar removed mid-action simply stops resolving. Occupancy combines
//! static map obstacles with every avatar standing on the map.

use std::collections::BTreeMap;
use std::sync::Arc;

use cadence_actions::{
    ActionTarget, ActionWorld, HarvestAction, Timestamp, WalkAction, WalkPath,
};
use cadence_types::{EntityId, HarvestableResource, MapId, TileCoord};
use tracing::{debug, info};

use crate::avatar::Avatar;
use crate::error::WorldError;
use crate::tile_map::TileMap;

/// All maps and avatars known to the server.
#[derive(Debug, Default)]
pub struct World {
    maps: BTreeMap<MapId, TileMap>,
    avatars: BTreeMap<EntityId, Avatar>,
}

impl World {
    /// Create an empty world.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a map and return its id.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::DuplicateMap`] if a map with the same id exists.
    pub fn add_map(&mut self, map: TileMap) -> Result<MapId, WorldError> {
        let id = map.id();
        if self.maps.contains_key(&id) {
            return Err(WorldError::DuplicateMap(id));
        }
        info!(map_id = %id, name = map.name(), width = map.width(), height = map.height(), "Map added");
        self.maps.insert(id, map);
        Ok(id)
    }

    /// Look up a map.
    pub fn map(&self, id: MapId) -> Option<&TileMap> {
        self.maps.get(&id)
    }

    /// Place an avatar in the world and return its id.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::MapNotFound`] if the avatar's map is unknown,
    /// or [`WorldError::TileUnavailable`] if its tile is blocked or taken.
    pub fn spawn_avatar(&mut self, avatar: Avatar) -> Result<EntityId, WorldError> {
        let map = avatar.map();
        let tile = avatar.position();
        if !self.maps.contains_key(&map) {
            return Err(WorldError::MapNotFound(map));
        }
        if self.is_occupied(map, tile) {
            return Err(WorldError::TileUnavailable { map, tile });
        }
        let id = avatar.id();
        info!(entity = %id, name = avatar.name(), %tile, "Avatar spawned");
        self.avatars.insert(id, avatar);
        Ok(id)
    }

    /// Remove an avatar. Actions still targeting it stop on their next run.
    pub fn remove_avatar(&mut self, id: EntityId) -> Option<Avatar> {
        let removed = self.avatars.remove(&id);
        if removed.is_some() {
            info!(entity = %id, "Avatar removed");
        }
        removed
    }

    /// Look up an avatar.
    pub fn avatar(&self, id: EntityId) -> Option<&Avatar> {
        self.avatars.get(&id)
    }

    /// Look up an avatar for mutation.
    pub fn avatar_mut(&mut self, id: EntityId) -> Option<&mut Avatar> {
        self.avatars.get_mut(&id)
    }

    /// Iterate over all avatars in id order.
    pub fn avatars(&self) -> impl Iterator<Item = &Avatar> {
        self.avatars.values()
    }

    /// Plan a route for `entity` to `goal`, treating other avatars as
    /// obstacles.
    ///
    /// The returned path starts on the avatar's current tile.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::EntityNotFound`], [`WorldError::MapNotFound`],
    /// or [`WorldError::NoPath`] when the goal can't be reached.
    pub fn plan_walk(&self, entity: EntityId, goal: TileCoord) -> Result<WalkPath, WorldError> {
        let avatar = self
            .avatars
            .get(&entity)
            .ok_or(WorldError::EntityNotFound(entity))?;
        let map_id = avatar.map();
        let map = self
            .maps
            .get(&map_id)
            .ok_or(WorldError::MapNotFound(map_id))?;
        let start = avatar.position();

        let path = map
            .find_path(start, goal, |tile| !self.avatar_at(map_id, tile))
            .ok_or(WorldError::NoPath {
                from: start,
                to: goal,
            })?;
        debug!(%entity, from = %start, to = %goal, tiles = path.remaining(), "Walk planned");
        Ok(path)
    }

    /// Plan a route and build a [`WalkAction`] for it.
    ///
    /// # Errors
    ///
    /// Propagates [`World::plan_walk`] failures and action registration
    /// errors.
    pub fn command_walk_to(
        &mut self,
        entity: EntityId,
        goal: TileCoord,
        now: Timestamp,
    ) -> Result<WalkAction, WorldError> {
        let path = self.plan_walk(entity, goal)?;
        Ok(WalkAction::new(self, entity, path, now)?)
    }

    /// Build a [`HarvestAction`] for `entity` on `resource`.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::EntityNotFound`] for unknown avatars, or the
    /// action error if the resource definition is invalid.
    pub fn command_harvest(
        &mut self,
        entity: EntityId,
        resource: Arc<HarvestableResource>,
        now: Timestamp,
    ) -> Result<HarvestAction, WorldError> {
        if !self.avatars.contains_key(&entity) {
            return Err(WorldError::EntityNotFound(entity));
        }
        Ok(HarvestAction::new(self, entity, resource, now)?)
    }

    fn avatar_at(&self, map: MapId, tile: TileCoord) -> bool {
        self.avatars
            .values()
            .any(|a| a.map() == map && a.position() == tile)
    }
}

impl ActionWorld for World {
    fn target(&self, entity: EntityId) -> Option<&dyn ActionTarget> {
        self.avatars
            .get(&entity)
            .map(|a| a as &dyn ActionTarget)
    }

    fn target_mut(&mut self, entity: EntityId) -> Option<&mut dyn ActionTarget> {
        self.avatars
            .get_mut(&entity)
            .map(|a| a as &mut dyn ActionTarget)
    }

    fn is_occupied(&self, map: MapId, tile: TileCoord) -> bool {
        self.maps
            .get(&map)
            .is_none_or(|m| m.is_blocked(tile))
            || self.avatar_at(map, tile)
    }
}

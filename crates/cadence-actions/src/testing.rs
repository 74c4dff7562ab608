//! In-memory collaborators that record every call, for unit tests.

#![allow(clippy::unwrap_used)]

use std::collections::{BTreeMap, BTreeSet};

use cadence_types::{
    ActionId, Direction, EntityId, HarvestableResource, MapId, OutgoingMessage, TileCoord,
};

use crate::world::{ActionTarget, ActionWorld};

#[derive(Debug, Clone)]
pub(crate) struct FakeEntity {
    pub location: TileCoord,
    pub map: MapId,
    pub current_action: Option<ActionId>,
    pub stand_ups: u32,
    pub steps: Vec<Direction>,
    pub success_rate: f64,
    pub cycle_ms: u64,
    pub harvested: u32,
    pub messages: Vec<OutgoingMessage>,
}

impl ActionTarget for FakeEntity {
    fn location(&self) -> TileCoord {
        self.location
    }

    fn map(&self) -> MapId {
        self.map
    }

    fn set_current_action(&mut self, action: ActionId) {
        self.current_action = Some(action);
    }

    fn stand_up(&mut self) {
        self.stand_ups = self.stand_ups.saturating_add(1);
    }

    fn take_step(&mut self, direction: Direction) {
        self.steps.push(direction);
        if let Some(next) = self.location.step(direction) {
            self.location = next;
        }
    }

    fn harvest_success_rate(&self, _resource: &HarvestableResource) -> f64 {
        self.success_rate
    }

    fn harvest_cycle_ms(&self, _resource: &HarvestableResource) -> u64 {
        self.cycle_ms
    }

    fn harvest_item(&mut self, _resource: &HarvestableResource) {
        self.harvested = self.harvested.saturating_add(1);
    }

    fn enqueue_message(&mut self, message: OutgoingMessage) {
        self.messages.push(message);
    }
}

/// Occupancy is a plain tile set; entities never block each other.
#[derive(Debug, Default)]
pub(crate) struct FakeWorld {
    pub map: MapId,
    pub entities: BTreeMap<EntityId, FakeEntity>,
    pub occupied: BTreeSet<TileCoord>,
}

impl FakeWorld {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn spawn_at(&mut self, x: i32, y: i32) -> EntityId {
        let id = EntityId::new();
        self.entities.insert(
            id,
            FakeEntity {
                location: TileCoord::new(x, y),
                map: self.map,
                current_action: None,
                stand_ups: 0,
                steps: Vec::new(),
                success_rate: 1.0,
                cycle_ms: 1000,
                harvested: 0,
                messages: Vec::new(),
            },
        );
        id
    }

    #[allow(clippy::unwrap_used)]
    pub fn entity(&self, id: EntityId) -> &FakeEntity {
        self.entities.get(&id).unwrap()
    }

    #[allow(clippy::unwrap_used)]
    pub fn entity_mut(&mut self, id: EntityId) -> &mut FakeEntity {
        self.entities.get_mut(&id).unwrap()
    }

    pub fn occupy(&mut self, x: i32, y: i32) {
        self.occupied.insert(TileCoord::new(x, y));
    }
}

impl ActionWorld for FakeWorld {
    fn target(&self, entity: EntityId) -> Option<&dyn ActionTarget> {
        self.entities
            .get(&entity)
            .map(|e| e as &dyn ActionTarget)
    }

    fn target_mut(&mut self, entity: EntityId) -> Option<&mut dyn ActionTarget> {
        self.entities
            .get_mut(&entity)
            .map(|e| e as &mut dyn ActionTarget)
    }

    fn is_occupied(&self, map: MapId, tile: TileCoord) -> bool {
        map == self.map && self.occupied.contains(&tile)
    }
}

//! Avatars: the entities time-based actions drive.
//!
//! An [`Avatar`] stands on one tile of one map, carries an inventory,
//! levels a harvesting skill, and collects outgoing messages in an inbox
//! until the messaging layer drains them.

use std::collections::BTreeMap;

use cadence_actions::ActionTarget;
use cadence_types::{
    ActionId, Channel, Direction, EntityId, HarvestableResource, MapId, OutgoingMessage,
    TextColor, TileCoord,
};
use serde::Serialize;
use tracing::{debug, info};

use crate::inventory;
use crate::skills::HarvestSkill;

/// Default number of items an avatar can carry.
pub const DEFAULT_CARRY_CAPACITY: u32 = 50;

/// Body posture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Posture {
    /// Sitting; walking stands the avatar up first.
    Sitting,
    /// Standing.
    Standing,
}

/// A player or NPC character.
#[derive(Debug, Clone, Serialize)]
pub struct Avatar {
    id: EntityId,
    name: String,
    map: MapId,
    position: TileCoord,
    posture: Posture,
    skill: HarvestSkill,
    inventory: BTreeMap<String, u32>,
    carry_capacity: u32,
    #[serde(skip)]
    inbox: Vec<OutgoingMessage>,
    current_action: Option<ActionId>,
}

impl Avatar {
    /// Create a sitting avatar with an empty inventory.
    pub fn new(name: impl Into<String>, map: MapId, position: TileCoord) -> Self {
        Self {
            id: EntityId::new(),
            name: name.into(),
            map,
            position,
            posture: Posture::Sitting,
            skill: HarvestSkill::new(),
            inventory: BTreeMap::new(),
            carry_capacity: DEFAULT_CARRY_CAPACITY,
            inbox: Vec::new(),
            current_action: None,
        }
    }

    /// Replace the starting harvest skill.
    #[must_use]
    pub fn with_skill(mut self, skill: HarvestSkill) -> Self {
        self.skill = skill;
        self
    }

    /// Replace the carry capacity.
    #[must_use]
    pub fn with_carry_capacity(mut self, capacity: u32) -> Self {
        self.carry_capacity = capacity;
        self
    }

    /// The avatar's entity handle.
    pub const fn id(&self) -> EntityId {
        self.id
    }

    /// Display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Current tile.
    pub const fn position(&self) -> TileCoord {
        self.position
    }

    /// Current posture.
    pub const fn posture(&self) -> Posture {
        self.posture
    }

    /// Make the avatar sit down.
    pub const fn sit_down(&mut self) {
        self.posture = Posture::Sitting;
    }

    /// Harvesting skill.
    pub const fn skill(&self) -> &HarvestSkill {
        &self.skill
    }

    /// Carried items by key.
    pub const fn inventory(&self) -> &BTreeMap<String, u32> {
        &self.inventory
    }

    /// Quantity of one item carried.
    pub fn item_count(&self, key: &str) -> u32 {
        inventory::quantity(&self.inventory, key)
    }

    /// The most recently registered action.
    pub const fn current_action(&self) -> Option<ActionId> {
        self.current_action
    }

    /// Messages waiting for delivery.
    pub fn inbox(&self) -> &[OutgoingMessage] {
        &self.inbox
    }

    /// Take all waiting messages, leaving the inbox empty.
    pub fn drain_inbox(&mut self) -> Vec<OutgoingMessage> {
        core::mem::take(&mut self.inbox)
    }
}

impl ActionTarget for Avatar {
    fn location(&self) -> TileCoord {
        self.position
    }

    fn map(&self) -> MapId {
        self.map
    }

    fn set_current_action(&mut self, action: ActionId) {
        self.current_action = Some(action);
    }

    fn stand_up(&mut self) {
        self.posture = Posture::Standing;
    }

    fn take_step(&mut self, direction: Direction) {
        if let Some(next) = self.position.step(direction) {
            self.position = next;
        }
    }

    fn harvest_success_rate(&self, resource: &HarvestableResource) -> f64 {
        resource.success_rate_at(self.skill.level())
    }

    fn harvest_cycle_ms(&self, resource: &HarvestableResource) -> u64 {
        resource.cycle_ms_at(self.skill.level())
    }

    fn harvest_item(&mut self, resource: &HarvestableResource) {
        let item = &resource.harvested_item;
        if let Err(err) = inventory::add_item(&mut self.inventory, self.carry_capacity, &item.key, 1)
        {
            debug!(entity = %self.id, error = %err, "Harvested item does not fit");
            self.inbox.push(OutgoingMessage::raw_text(
                Channel::Local,
                TextColor::Red1,
                "Your inventory is full",
            ));
            return;
        }
        self.inbox.push(OutgoingMessage::harvested(&item.name));

        match self.skill.add_xp(resource.xp_per_harvest) {
            Ok(Some(level)) => {
                info!(entity = %self.id, name = %self.name, level, "Harvesting skill level up");
                self.inbox.push(OutgoingMessage::raw_text(
                    Channel::Local,
                    TextColor::Green1,
                    format!("Your harvesting skill is now level {level}"),
                ));
            }
            Ok(None) => {}
            Err(err) => debug!(entity = %self.id, error = %err, "Harvest xp not awarded"),
        }
    }

    fn enqueue_message(&mut self, message: OutgoingMessage) {
        self.inbox.push(message);
    }
}

//! Contracts the action core needs from the rest of the server.
//!
//! Actions hold an [`EntityId`] rather than the entity itself and resolve
//! it through an [`ActionWorld`] every time they run. If the entity is
//! gone, the lookup returns `None` and the action stops.

use cadence_types::{
    ActionId, Direction, EntityId, HarvestableResource, MapId, OutgoingMessage, TileCoord,
};

/// What an action can ask of, or do to, its target entity.
pub trait ActionTarget {
    /// The tile the entity currently stands on.
    fn location(&self) -> TileCoord;

    /// The map the entity is currently on.
    fn map(&self) -> MapId;

    /// Record `action` as the entity's current action. Last writer wins.
    fn set_current_action(&mut self, action: ActionId);

    /// Switch the entity to a standing posture.
    fn stand_up(&mut self);

    /// Move the entity one tile in `direction`.
    fn take_step(&mut self, direction: Direction);

    /// Probability in `[0, 1]` that one harvest roll on `resource` succeeds.
    fn harvest_success_rate(&self, resource: &HarvestableResource) -> f64;

    /// Milliseconds between harvest rolls on `resource`.
    fn harvest_cycle_ms(&self, resource: &HarvestableResource) -> u64;

    /// Grant the item produced by one successful roll on `resource`.
    fn harvest_item(&mut self, resource: &HarvestableResource);

    /// Queue a message for delivery to the entity's client.
    fn enqueue_message(&mut self, message: OutgoingMessage);
}

/// Entity registry plus map occupancy, as seen by actions.
pub trait ActionWorld {
    /// Resolve an entity handle for reading.
    fn target(&self, entity: EntityId) -> Option<&dyn ActionTarget>;

    /// Resolve an entity handle for mutation.
    fn target_mut(&mut self, entity: EntityId) -> Option<&mut dyn ActionTarget>;

    /// Whether `tile` on `map` is blocked or taken by another occupant.
    fn is_occupied(&self, map: MapId, tile: TileCoord) -> bool;
}

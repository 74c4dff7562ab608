//! Error types for the `cadence-world` crate.

use cadence_types::{EntityId, MapId, TileCoord};

/// Errors that can occur during world operations.
#[derive(Debug, thiserror::Error)]
pub enum WorldError {
    /// A map was not found in the registry.
    #[error("map not found: {0}")]
    MapNotFound(MapId),

    /// A map with the same id is already registered.
    #[error("duplicate map id: {0}")]
    DuplicateMap(MapId),

    /// An entity was not found in the registry.
    #[error("entity not found: {0}")]
    EntityNotFound(EntityId),

    /// The tile is outside the map, blocked, or occupied.
    #[error("tile {tile} on map {map} is not available")]
    TileUnavailable {
        /// The map.
        map: MapId,
        /// The rejected tile.
        tile: TileCoord,
    },

    /// No walkable route exists between two tiles.
    #[error("no path from {from} to {to}")]
    NoPath {
        /// Start tile.
        from: TileCoord,
        /// Goal tile.
        to: TileCoord,
    },

    /// The item does not fit in the inventory.
    #[error("cannot add {attempted} x {item}: load {current_load}/{capacity}")]
    InventoryFull {
        /// Item key.
        item: String,
        /// Quantity that was being added.
        attempted: u32,
        /// Load before the addition.
        current_load: u32,
        /// Carry capacity.
        capacity: u32,
    },

    /// Arithmetic overflow during a checked operation.
    #[error("arithmetic overflow in {context}")]
    ArithmeticOverflow {
        /// Where the overflow happened.
        context: &'static str,
    },

    /// Building an action failed.
    #[error("action error: {source}")]
    Action {
        /// The underlying action error.
        #[from]
        source: cadence_actions::ActionError,
    },
}

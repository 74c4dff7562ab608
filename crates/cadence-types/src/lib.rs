//! Shared type definitions for the Cadence action engine.
//!
//! This crate holds the value types that flow between the action core,
//! the reference world, and the engine binary. Nothing here performs I/O
//! or owns simulation state.
//!
//! # Modules
//!
//! - [`ids`] -- Type-safe UUID wrappers for entities, maps, and actions
//! - [`geometry`] -- Tile coordinates and the eight-direction compass
//! - [`resource`] -- Item and harvestable resource definitions
//! - [`message`] -- Outgoing notification messages queued on entities

pub mod geometry;
pub mod ids;
pub mod message;
pub mod resource;

pub use geometry::{Direction, TileCoord};
pub use ids::{ActionId, EntityId, MapId};
pub use message::{Channel, OutgoingMessage, TextColor};
pub use resource::{HarvestableResource, ItemDefinition, ResourceDefinitionError};

//! In-memory collaborators for the Cadence action engine.
//!
//! The action core only sees entities and maps through the
//! [`ActionWorld`](cadence_actions::ActionWorld) contract. This crate
//! provides a complete implementation of that contract: avatars with
//! position, posture, skill, inventory, and a message inbox; tile maps
//! with blocked tiles and path finding; and a [`World`] registry tying
//! them together.
//!
//! # Modules
//!
//! - [`avatar`] -- [`Avatar`], the entity actions drive
//! - [`error`] -- Error types for world operations ([`WorldError`])
//! - [`inventory`] -- Item counts with carry capacity
//! - [`skills`] -- [`HarvestSkill`] levels and experience
//! - [`tile_map`] -- [`TileMap`] grid and path finding
//! - [`world`] -- [`World`], the entity and map registry

pub mod avatar;
pub mod error;
pub mod inventory;
pub mod skills;
pub mod tile_map;
pub mod world;

pub use avatar::{Avatar, Posture};
pub use error::WorldError;
pub use skills::{HarvestSkill, MAX_SKILL_LEVEL};
pub use tile_map::TileMap;
pub use world::World;

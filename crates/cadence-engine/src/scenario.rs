//! Builds the starting world from configuration and issues each avatar's
//! first command.

use std::collections::BTreeMap;
use std::sync::Arc;

use cadence_actions::ActionManager;
use cadence_types::{EntityId, HarvestableResource, TileCoord};
use cadence_world::{Avatar, HarvestSkill, TileMap, World, WorldError};
use tracing::{debug, info, warn};

use crate::config::{AvatarCommand, CadenceConfig};
use crate::error::EngineError;

/// An avatar placed at startup with the command it will receive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpawnedAvatar {
    /// Registry id.
    pub id: EntityId,
    /// Display name.
    pub name: String,
    /// Startup command.
    pub command: AvatarCommand,
}

/// The world plus everything needed to start its avatars.
#[derive(Debug)]
pub struct Scenario {
    /// The populated world.
    pub world: World,
    /// Spawned avatars in config order.
    pub avatars: Vec<SpawnedAvatar>,
    resources: BTreeMap<String, Arc<HarvestableResource>>,
}

impl Scenario {
    /// Create the map, register resources, and spawn every avatar.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::UnknownResource`] if a harvest command names a
    /// resource that is not configured, or [`EngineError::World`] if an
    /// avatar can't be placed.
    pub fn build(config: &CadenceConfig) -> Result<Self, EngineError> {
        let resources: BTreeMap<String, Arc<HarvestableResource>> = config
            .resources
            .iter()
            .map(|r| (r.name.clone(), Arc::new(r.clone())))
            .collect();

        let missing = config.avatars.iter().find_map(|a| match &a.command {
            AvatarCommand::Harvest { resource } if config.resource(resource).is_none() => {
                Some((a.name.clone(), resource.clone()))
            }
            _ => None,
        });
        if let Some((avatar, resource)) = missing {
            return Err(EngineError::UnknownResource { avatar, resource });
        }

        let mut world = World::new();
        let map = TileMap::new(&config.map.name, config.map.width, config.map.height)
            .with_blocked(config.map.blocked.iter().copied());
        let map_id = world.add_map(map)?;

        let mut avatars = Vec::with_capacity(config.avatars.len());
        for entry in &config.avatars {
            let mut avatar = Avatar::new(&entry.name, map_id, TileCoord::new(entry.x, entry.y))
                .with_skill(HarvestSkill::at_level(entry.skill_level));
            if let Some(capacity) = entry.carry_capacity {
                avatar = avatar.with_carry_capacity(capacity);
            }
            let id = world.spawn_avatar(avatar)?;
            avatars.push(SpawnedAvatar {
                id,
                name: entry.name.clone(),
                command: entry.command.clone(),
            });
        }

        info!(
            avatars = avatars.len(),
            resources = resources.len(),
            "Scenario built"
        );
        Ok(Self {
            world,
            avatars,
            resources,
        })
    }

    /// Turn every avatar's startup command into an action on `manager`.
    ///
    /// Walks with no route are skipped with a warning. Returns the number
    /// of actions added.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::World`] if an action can't be built for any
    /// other reason.
    pub fn issue_commands(&mut self, manager: &mut ActionManager) -> Result<usize, EngineError> {
        let now = manager.now();
        let mut issued: usize = 0;

        for spawned in &self.avatars {
            match &spawned.command {
                AvatarCommand::WalkTo { x, y } => {
                    let goal = TileCoord::new(*x, *y);
                    match self.world.command_walk_to(spawned.id, goal, now) {
                        Ok(walk) => manager.add_action(Box::new(walk)),
                        Err(WorldError::NoPath { from, to }) => {
                            warn!(avatar = %spawned.name, %from, %to, "No route, walk not issued");
                            continue;
                        }
                        Err(err) => return Err(err.into()),
                    }
                }
                AvatarCommand::Harvest { resource } => {
                    let definition = self.resources.get(resource).cloned().ok_or_else(|| {
                        EngineError::UnknownResource {
                            avatar: spawned.name.clone(),
                            resource: resource.clone(),
                        }
                    })?;
                    let harvest = self.world.command_harvest(spawned.id, definition, now)?;
                    manager.add_action(Box::new(harvest));
                }
                AvatarCommand::Idle => {
                    debug!(avatar = %spawned.name, "Avatar idle");
                    continue;
                }
            }
            issued = issued.saturating_add(1);
        }

        info!(issued, "Startup commands issued");
        Ok(issued)
    }
}

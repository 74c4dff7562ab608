//! Configuration loading and typed config structures for the engine.
//!
//! The configuration lives in `cadence-config.yaml` (or the path named by
//! `CADENCE_CONFIG`). Every section and field has a default, so an empty
//! file, or no file at all, yields a runnable demo scenario.

use std::collections::BTreeSet;
use std::path::Path;

use cadence_types::{HarvestableResource, ItemDefinition, ResourceDefinitionError, TileCoord};
use serde::Deserialize;

/// Environment variable that overrides `engine.seed`.
pub const SEED_ENV: &str = "CADENCE_SEED";

/// Environment variable that selects the config file path.
pub const CONFIG_PATH_ENV: &str = "CADENCE_CONFIG";

/// Config file used when [`CONFIG_PATH_ENV`] is unset.
pub const DEFAULT_CONFIG_PATH: &str = "cadence-config.yaml";

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },

    /// An environment override could not be parsed.
    #[error("invalid value {value:?} for {var}: {source}")]
    InvalidEnv {
        /// The variable name.
        var: &'static str,
        /// The rejected value.
        value: String,
        /// The parse failure.
        source: std::num::ParseIntError,
    },

    /// A resource definition is out of range.
    #[error("invalid resource: {source}")]
    Resource {
        /// The underlying validation error.
        #[from]
        source: ResourceDefinitionError,
    },

    /// Two resources share a name.
    #[error("duplicate resource name {name:?}")]
    DuplicateResource {
        /// The repeated name.
        name: String,
    },

    /// The map has a zero dimension.
    #[error("map must be at least 1x1, got {width}x{height}")]
    EmptyMap {
        /// Configured width.
        width: u32,
        /// Configured height.
        height: u32,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level engine configuration, mirroring `cadence-config.yaml`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CadenceConfig {
    /// Tick loop settings.
    #[serde(default)]
    pub engine: EngineSettings,

    /// Log level and output format.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// The single map avatars live on.
    #[serde(default)]
    pub map: MapConfig,

    /// Harvestable resource definitions, referenced by name.
    #[serde(default = "default_resources")]
    pub resources: Vec<HarvestableResource>,

    /// Avatars to spawn and the command each starts with.
    #[serde(default = "default_avatars")]
    pub avatars: Vec<AvatarConfig>,
}

impl Default for CadenceConfig {
    fn default() -> Self {
        Self {
            engine: EngineSettings::default(),
            logging: LoggingConfig::default(),
            map: MapConfig::default(),
            resources: default_resources(),
            avatars: default_avatars(),
        }
    }
}

impl CadenceConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// `CADENCE_SEED` overrides `engine.seed` when set.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read,
    /// [`ConfigError::Yaml`] if the content is not valid YAML, or a
    /// validation error.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML, or a
    /// validation error.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        let mut config: Self = serde_yml::from_str(yaml)?;
        config.apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    /// Apply environment variable overrides.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidEnv`] if `CADENCE_SEED` is not a `u64`.
    pub fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        self.apply_seed_override(std::env::var(SEED_ENV).ok())
    }

    fn apply_seed_override(&mut self, raw: Option<String>) -> Result<(), ConfigError> {
        if let Some(value) = raw {
            let parsed = value.trim().parse();
            self.engine.seed = parsed.map_err(|source| ConfigError::InvalidEnv {
                var: SEED_ENV,
                value,
                source,
            })?;
        }
        Ok(())
    }

    /// Check map dimensions and resource definitions.
    ///
    /// # Errors
    ///
    /// Returns the first problem found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.map.width == 0 || self.map.height == 0 {
            return Err(ConfigError::EmptyMap {
                width: self.map.width,
                height: self.map.height,
            });
        }
        let mut names = BTreeSet::new();
        for resource in &self.resources {
            resource.validate()?;
            if !names.insert(resource.name.as_str()) {
                return Err(ConfigError::DuplicateResource {
                    name: resource.name.clone(),
                });
            }
        }
        Ok(())
    }

    /// Look up a resource definition by name.
    pub fn resource(&self, name: &str) -> Option<&HarvestableResource> {
        self.resources.iter().find(|r| r.name == name)
    }
}

/// Tick loop settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct EngineSettings {
    /// Milliseconds between manager passes.
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,

    /// Stop after this many ticks. Zero means unbounded.
    #[serde(default)]
    pub max_ticks: u64,

    /// Seed for the manager's random source.
    #[serde(default = "default_seed")]
    pub seed: u64,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            tick_interval_ms: default_tick_interval_ms(),
            max_ticks: 0,
            seed: default_seed(),
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Pretty,
    /// One JSON object per event.
    Json,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Level filter used when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Output format.
    #[serde(default)]
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
        }
    }
}

/// Map dimensions and terrain.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MapConfig {
    /// Map name.
    #[serde(default = "default_map_name")]
    pub name: String,

    /// Width in tiles.
    #[serde(default = "default_map_size")]
    pub width: u32,

    /// Height in tiles.
    #[serde(default = "default_map_size")]
    pub height: u32,

    /// Tiles blocked by terrain.
    #[serde(default)]
    pub blocked: Vec<TileCoord>,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            name: default_map_name(),
            width: default_map_size(),
            height: default_map_size(),
            blocked: vec![TileCoord::new(4, 3), TileCoord::new(4, 4), TileCoord::new(4, 5)],
        }
    }
}

/// One avatar to spawn.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AvatarConfig {
    /// Display name.
    pub name: String,
    /// Spawn column.
    pub x: i32,
    /// Spawn row.
    pub y: i32,
    /// Starting harvesting level.
    #[serde(default)]
    pub skill_level: u32,
    /// Carry capacity; the avatar default when absent.
    #[serde(default)]
    pub carry_capacity: Option<u32>,
    /// Command issued at startup.
    #[serde(default)]
    pub command: AvatarCommand,
}

/// A command issued to an avatar at startup.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AvatarCommand {
    /// Walk to a tile.
    WalkTo {
        /// Goal column.
        x: i32,
        /// Goal row.
        y: i32,
    },
    /// Harvest a configured resource until stopped.
    Harvest {
        /// Resource name.
        resource: String,
    },
    /// Do nothing.
    #[default]
    Idle,
}

const fn default_tick_interval_ms() -> u64 {
    100
}

const fn default_seed() -> u64 {
    42
}

fn default_log_level() -> String {
    "info".to_owned()
}

fn default_map_name() -> String {
    "meadow".to_owned()
}

const fn default_map_size() -> u32 {
    12
}

fn default_resources() -> Vec<HarvestableResource> {
    vec![HarvestableResource {
        name: "Oak Tree".to_owned(),
        harvested_item: ItemDefinition::new("oak_log", "Oak Log"),
        base_success_rate: 0.4,
        success_rate_per_level: 0.03,
        max_success_rate: 0.95,
        base_cycle_ms: 2_000,
        cycle_ms_per_level: 50,
        min_cycle_ms: 1_000,
        xp_per_harvest: 25,
    }]
}

fn default_avatars() -> Vec<AvatarConfig> {
    vec![
        AvatarConfig {
            name: "Ada".to_owned(),
            x: 1,
            y: 4,
            skill_level: 0,
            carry_capacity: None,
            command: AvatarCommand::WalkTo { x: 8, y: 4 },
        },
        AvatarConfig {
            name: "Bram".to_owned(),
            x: 6,
            y: 9,
            skill_level: 2,
            carry_capacity: None,
            command: AvatarCommand::Harvest {
                resource: "Oak Tree".to_owned(),
            },
        },
    ]
}

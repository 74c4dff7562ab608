//! Error types for the engine binary.
//!
//! [`EngineError`] wraps every failure mode of startup and the tick loop
//! so `main` can propagate with `?`.

use crate::config::ConfigError;

/// Top-level error for the engine binary.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Configuration loading failed.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: ConfigError,
    },

    /// Building the world or issuing a command failed.
    #[error("world error: {source}")]
    World {
        /// The underlying world error.
        #[from]
        source: cadence_world::WorldError,
    },

    /// An avatar command names a resource that is not configured.
    #[error("avatar {avatar} wants to harvest unknown resource {resource:?}")]
    UnknownResource {
        /// Avatar name from the config.
        avatar: String,
        /// The resource name that failed to resolve.
        resource: String,
    },

    /// The final summary could not be serialized.
    #[error("summary serialization failed: {source}")]
    Summary {
        /// The underlying JSON error.
        #[from]
        source: serde_json::Error,
    },
}

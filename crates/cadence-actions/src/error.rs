//! Error types for the `cadence-actions` crate.
//!
//! Only construction can fail. Problems found while an action runs are
//! reported as a [`StopReason`](crate::StopReason), not as errors.

use cadence_types::EntityId;
use cadence_types::resource::ResourceDefinitionError;

/// Errors raised while constructing an action.
#[derive(Debug, thiserror::Error)]
pub enum ActionError {
    /// The target entity does not resolve in the world.
    #[error("target entity not found: {entity}")]
    TargetNotFound {
        /// The handle that failed to resolve.
        entity: EntityId,
    },

    /// The harvest resource definition is unusable.
    #[error("invalid resource definition: {source}")]
    InvalidResource {
        /// The underlying validation error.
        #[from]
        source: ResourceDefinitionError,
    },
}

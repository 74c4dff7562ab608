//! Item and harvestable resource definitions.
//!
//! A [`HarvestableResource`] is read-only configuration. Harvest actions
//! share it through an `Arc` and never mutate it; the entity harvesting
//! it combines these base values with its own skill level.

use serde::{Deserialize, Serialize};

/// Hard ceiling for any configured success rate.
const SUCCESS_RATE_CEILING: f64 = 1.0;

/// Errors found while validating a resource definition.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ResourceDefinitionError {
    /// A probability was outside `[0, 1]` or not finite.
    #[error("resource {resource}: {field} must be within [0, 1], got {value}")]
    RateOutOfRange {
        /// Name of the offending resource.
        resource: String,
        /// Name of the offending field.
        field: &'static str,
        /// The rejected value.
        value: f64,
    },

    /// The minimum cycle time is greater than the base cycle time.
    #[error("resource {resource}: min_cycle_ms ({min}) exceeds base_cycle_ms ({base})")]
    CycleBounds {
        /// Name of the offending resource.
        resource: String,
        /// Configured minimum.
        min: u64,
        /// Configured base.
        base: u64,
    },
}

/// An item that can end up in an entity's inventory.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ItemDefinition {
    /// Stable key used for inventory bookkeeping (e.g. `"log"`).
    pub key: String,
    /// Display name used in player-facing messages (e.g. `"Log"`).
    pub name: String,
}

impl ItemDefinition {
    /// Create an item definition.
    pub fn new(key: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            name: name.into(),
        }
    }
}

/// Static configuration for a resource that can be harvested over time.
///
/// Success rate at skill level `L` is
/// `min(base_success_rate + L * success_rate_per_level, max_success_rate)`.
/// Cycle time at level `L` is
/// `max(base_cycle_ms - L * cycle_ms_per_level, min_cycle_ms)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HarvestableResource {
    /// Resource name (e.g. `"oak tree"`).
    pub name: String,
    /// The item granted on a successful harvest roll.
    pub harvested_item: ItemDefinition,
    /// Success probability at skill level 0.
    pub base_success_rate: f64,
    /// Success probability gained per skill level.
    #[serde(default)]
    pub success_rate_per_level: f64,
    /// Upper bound on the success probability.
    #[serde(default = "default_max_success_rate")]
    pub max_success_rate: f64,
    /// Milliseconds between harvest rolls at skill level 0.
    pub base_cycle_ms: u64,
    /// Milliseconds shaved off the cycle per skill level.
    #[serde(default)]
    pub cycle_ms_per_level: u64,
    /// Lower bound on the cycle time.
    #[serde(default)]
    pub min_cycle_ms: u64,
    /// Skill experience awarded per harvested item.
    #[serde(default = "default_xp_per_harvest")]
    pub xp_per_harvest: u32,
}

const fn default_max_success_rate() -> f64 {
    SUCCESS_RATE_CEILING
}

const fn default_xp_per_harvest() -> u32 {
    10
}

impl HarvestableResource {
    /// Success probability for an entity at the given skill level.
    pub fn success_rate_at(&self, level: u32) -> f64 {
        let rate = self
            .success_rate_per_level
            .mul_add(f64::from(level), self.base_success_rate);
        rate.min(self.max_success_rate).min(SUCCESS_RATE_CEILING).max(0.0)
    }

    /// Harvest cycle length in milliseconds at the given skill level.
    pub fn cycle_ms_at(&self, level: u32) -> u64 {
        let reduction = self.cycle_ms_per_level.saturating_mul(u64::from(level));
        self.base_cycle_ms
            .saturating_sub(reduction)
            .max(self.min_cycle_ms)
    }

    /// Check the definition for values a harvest can't work with.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceDefinitionError`] if a rate is outside `[0, 1]` or
    /// the cycle bounds are inverted.
    pub fn validate(&self) -> Result<(), ResourceDefinitionError> {
        for (field, value) in [
            ("base_success_rate", self.base_success_rate),
            ("success_rate_per_level", self.success_rate_per_level),
            ("max_success_rate", self.max_success_rate),
        ] {
            if !(0.0..=SUCCESS_RATE_CEILING).contains(&value) {
                return Err(ResourceDefinitionError::RateOutOfRange {
                    resource: self.name.clone(),
                    field,
                    value,
                });
            }
        }
        if self.min_cycle_ms > self.base_cycle_ms {
            return Err(ResourceDefinitionError::CycleBounds {
                resource: self.name.clone(),
                min: self.min_cycle_ms,
                base: self.base_cycle_ms,
            });
        }
        Ok(())
    }
}

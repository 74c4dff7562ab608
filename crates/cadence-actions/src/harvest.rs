//! Harvesting a resource over time.
//!
//! Every cycle a [`HarvestAction`] rolls once against its success rate and
//! grants the harvested item on success. After each roll the rate and the
//! cycle length are read again from the entity, so skill gained while
//! harvesting takes effect on the next cycle. A harvest never ends on its
//! own; it runs until canceled.

use std::sync::Arc;

use cadence_types::{EntityId, HarvestableResource, OutgoingMessage};
use rand::Rng;
use tracing::trace;

use crate::action::{ActionContext, ActionCore, ActionKind, Progress, StopReason, TimedAction};
use crate::clock::Timestamp;
use crate::error::ActionError;
use crate::world::{ActionTarget, ActionWorld};

/// Repeatedly harvests one resource for one entity.
#[derive(Debug)]
pub struct HarvestAction {
    core: ActionCore,
    resource: Arc<HarvestableResource>,
    success_rate: f64,
    cycle_ms: u64,
}

impl HarvestAction {
    /// Create a harvest for `entity` and register it as the entity's
    /// current action.
    ///
    /// # Errors
    ///
    /// Returns [`ActionError::InvalidResource`] if the definition fails
    /// validation, or [`ActionError::TargetNotFound`] if `entity` does not
    /// resolve.
    pub fn new(
        world: &mut dyn ActionWorld,
        entity: EntityId,
        resource: Arc<HarvestableResource>,
        now: Timestamp,
    ) -> Result<Self, ActionError> {
        resource.validate()?;
        let core = ActionCore::register(world, entity, now)?;
        let target = world
            .target(entity)
            .ok_or(ActionError::TargetNotFound { entity })?;
        let (success_rate, cycle_ms) = parameters(target, &resource);
        Ok(Self {
            core,
            resource,
            success_rate,
            cycle_ms,
        })
    }

    /// The resource being harvested.
    pub fn resource(&self) -> &HarvestableResource {
        &self.resource
    }

    /// Current probability that a roll succeeds.
    pub const fn success_rate(&self) -> f64 {
        self.success_rate
    }

    /// Current milliseconds between rolls.
    pub const fn cycle_ms(&self) -> u64 {
        self.cycle_ms
    }
}

/// Read the live success rate and cycle length from the entity.
fn parameters(target: &dyn ActionTarget, resource: &HarvestableResource) -> (f64, u64) {
    (
        target.harvest_success_rate(resource),
        target.harvest_cycle_ms(resource),
    )
}

impl TimedAction for HarvestAction {
    fn core(&self) -> &ActionCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut ActionCore {
        &mut self.core
    }

    fn kind(&self) -> ActionKind {
        ActionKind::Harvest
    }

    fn execute(&mut self, ctx: &mut ActionContext<'_>) -> Progress {
        if self.core.is_canceled() {
            return Progress::Stop(StopReason::Canceled);
        }

        if self.core.millis_since_last(ctx.now) <= self.cycle_ms {
            return Progress::Continue;
        }

        let entity = self.core.target();
        let Some(target) = ctx.world.target_mut(entity) else {
            return Progress::Stop(StopReason::TargetMissing);
        };

        let roll: f64 = ctx.rng.random();
        if roll <= self.success_rate {
            target.harvest_item(&self.resource);
            trace!(%entity, resource = %self.resource.name, roll, "Harvest roll succeeded");
        }

        (self.success_rate, self.cycle_ms) = parameters(target, &self.resource);
        self.core.mark_executed(ctx.now);
        Progress::Continue
    }

    fn cancel(&mut self, world: &mut dyn ActionWorld) {
        if !self.core.cancel() {
            return;
        }
        if let Some(target) = world.target_mut(self.core.target()) {
            target.enqueue_message(OutgoingMessage::stopped_harvesting(
                &self.resource.harvested_item.name,
            ));
        }
    }
}

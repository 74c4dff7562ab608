//! The time-based action contract.
//!
//! Every action is a small state machine:
//!
//! ```text
//! Running --cancel()--> Canceled
//!    |                     |
//!    +--execute() = Stop---+--> Finished (removed by the manager)
//! ```
//!
//! There is no way back to `Running`. Concrete actions embed an
//! [`ActionCore`] for the shared state (target, timestamp, cancel flag)
//! and implement [`TimedAction`] on top of it.

use cadence_types::{ActionId, EntityId};
use rand::RngCore;
use serde::{Deserialize, Serialize};

use crate::clock::Timestamp;
use crate::error::ActionError;
use crate::world::ActionWorld;

/// Result of one `execute` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Progress {
    /// Keep the action in the active set.
    Continue,
    /// Retire the action after this tick.
    Stop(StopReason),
}

impl Progress {
    /// `true` for [`Progress::Continue`].
    pub const fn is_running(self) -> bool {
        matches!(self, Self::Continue)
    }
}

/// Why an action reported stop.
///
/// To the manager every reason means the same thing: remove the action.
/// The distinction is kept for logging and for callers that want to know
/// how a command ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StopReason {
    /// The walk path ran out of tiles.
    PathComplete,
    /// The next tile on the path was occupied.
    Obstructed,
    /// The next tile on the path was not adjacent to the entity.
    CorruptedPath,
    /// `cancel` was called.
    Canceled,
    /// The target entity no longer exists.
    TargetMissing,
}

/// The kind of a concrete action, for logging and reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActionKind {
    /// [`WalkAction`](crate::WalkAction).
    Walk,
    /// [`HarvestAction`](crate::HarvestAction).
    Harvest,
}

/// Everything an action may touch during one `execute` call.
pub struct ActionContext<'a> {
    /// Entity registry and map occupancy.
    pub world: &'a mut dyn ActionWorld,
    /// The time of the current tick.
    pub now: Timestamp,
    /// Random source for probabilistic actions.
    pub rng: &'a mut dyn RngCore,
}

/// A unit of incremental work bound to one entity.
///
/// `execute` is called at most once per tick and must return without
/// blocking.
pub trait TimedAction: Send {
    /// Shared action state.
    fn core(&self) -> &ActionCore;

    /// Shared action state, mutably.
    fn core_mut(&mut self) -> &mut ActionCore;

    /// The concrete kind of this action.
    fn kind(&self) -> ActionKind;

    /// Advance the action by one tick.
    fn execute(&mut self, ctx: &mut ActionContext<'_>) -> Progress;

    /// Request early termination. Takes effect on the next `execute`.
    ///
    /// Overrides must keep the base behaviour of marking the core canceled.
    fn cancel(&mut self, world: &mut dyn ActionWorld) {
        let _ = world;
        self.core_mut().cancel();
    }

    /// Unique id of this action.
    fn id(&self) -> ActionId {
        self.core().id()
    }

    /// The entity this action drives.
    fn target(&self) -> EntityId {
        self.core().target()
    }

    /// Whether `cancel` has been called.
    fn is_canceled(&self) -> bool {
        self.core().is_canceled()
    }
}

/// State shared by every action: identity, target handle, the last time
/// the action did work, and the cancel flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionCore {
    id: ActionId,
    target: EntityId,
    last_executed: Timestamp,
    canceled: bool,
}

impl ActionCore {
    /// Create the core for a new action and register it as the target's
    /// current action.
    ///
    /// # Errors
    ///
    /// Returns [`ActionError::TargetNotFound`] if `target` does not
    /// resolve. Nothing is registered in that case.
    pub fn register(
        world: &mut dyn ActionWorld,
        target: EntityId,
        now: Timestamp,
    ) -> Result<Self, ActionError> {
        let entity = world
            .target_mut(target)
            .ok_or(ActionError::TargetNotFound { entity: target })?;
        let id = ActionId::new();
        entity.set_current_action(id);
        Ok(Self {
            id,
            target,
            last_executed: now,
            canceled: false,
        })
    }

    /// Unique id of the action.
    pub const fn id(&self) -> ActionId {
        self.id
    }

    /// The entity handle the action drives.
    pub const fn target(&self) -> EntityId {
        self.target
    }

    /// When the action last did work.
    pub const fn last_executed(&self) -> Timestamp {
        self.last_executed
    }

    /// Milliseconds since the action last did work.
    pub const fn millis_since_last(&self, now: Timestamp) -> u64 {
        now.millis_since(self.last_executed)
    }

    /// Record `now` as the last time the action did work.
    ///
    /// The stored timestamp never moves backwards.
    pub fn mark_executed(&mut self, now: Timestamp) {
        self.last_executed = self.last_executed.max(now);
    }

    /// Whether the action has been canceled.
    pub const fn is_canceled(&self) -> bool {
        self.canceled
    }

    /// Mark the action canceled.
    ///
    /// Returns `true` only for the call that flipped the flag, so callers
    /// can fire one-time side effects.
    pub const fn cancel(&mut self) -> bool {
        let first = !self.canceled;
        self.canceled = true;
        first
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::testing::FakeWorld;

    #[test]
    fn register_sets_current_action() {
        let mut world = FakeWorld::new();
        let entity = world.spawn_at(0, 0);
        let core = ActionCore::register(&mut world, entity, Timestamp::ZERO).unwrap();
        assert_eq!(world.entity(entity).current_action, Some(core.id()));
        assert_eq!(core.target(), entity);
        assert!(!core.is_canceled());
    }

    #[test]
    fn register_fails_for_unknown_entity() {
        let mut world = FakeWorld::new();
        let missing = EntityId::new();
        let result = ActionCore::register(&mut world, missing, Timestamp::ZERO);
        assert!(matches!(
            result,
            Err(ActionError::TargetNotFound { entity }) if entity == missing
        ));
    }

    #[test]
    fn last_registration_wins() {
        let mut world = FakeWorld::new();
        let entity = world.spawn_at(0, 0);
        let _first = ActionCore::register(&mut world, entity, Timestamp::ZERO).unwrap();
        let second = ActionCore::register(&mut world, entity, Timestamp::ZERO).unwrap();
        assert_eq!(world.entity(entity).current_action, Some(second.id()));
    }

    #[test]
    fn cancel_is_one_way_and_reports_first_call() {
        let mut world = FakeWorld::new();
        let entity = world.spawn_at(0, 0);
        let mut core = ActionCore::register(&mut world, entity, Timestamp::ZERO).unwrap();
        assert!(core.cancel());
        assert!(!core.cancel());
        assert!(core.is_canceled());
    }

    #[test]
    fn timestamp_is_monotonic() {
        let mut world = FakeWorld::new();
        let entity = world.spawn_at(0, 0);
        let mut core =
            ActionCore::register(&mut world, entity, Timestamp::from_millis(1000)).unwrap();
        assert_eq!(core.millis_since_last(Timestamp::from_millis(1400)), 400);
        core.mark_executed(Timestamp::from_millis(500));
        assert_eq!(core.last_executed(), Timestamp::from_millis(1000));
        core.mark_executed(Timestamp::from_millis(2000));
        assert_eq!(core.last_executed(), Timestamp::from_millis(2000));
    }

    #[test]
    fn progress_running_flag() {
        assert!(Progress::Continue.is_running());
        assert!(!Progress::Stop(StopReason::Canceled).is_running());
    }
}

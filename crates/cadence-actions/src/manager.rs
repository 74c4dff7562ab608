//! The per-tick action scheduler.
//!
//! [`ActionManager`] keeps the active actions in activation order and
//! runs every one of them once per call to
//! [`execute_actions`](ActionManager::execute_actions). Actions that
//! report stop are collected during the pass and removed only after it,
//! so an action finishing never changes which other actions run in the
//! same tick.
//!
//! The manager owns the random source and the clock that actions see.
//! Seeding the random source makes a run reproducible.

use cadence_types::{ActionId, EntityId};
use rand::SeedableRng;
use rand::rngs::SmallRng;
use serde::Serialize;
use tracing::debug;

use crate::action::{ActionContext, ActionKind, Progress, StopReason, TimedAction};
use crate::clock::{Clock, Timestamp};
use crate::world::ActionWorld;

/// An action removed from the active set at the end of a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RetiredAction {
    /// The retired action.
    pub action_id: ActionId,
    /// The entity it was driving.
    pub entity: EntityId,
    /// What kind of action it was.
    pub kind: ActionKind,
    /// Why it stopped.
    pub reason: StopReason,
}

/// Summary of one [`ActionManager::execute_actions`] pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TickReport {
    /// Sequence number of the pass, starting at 1.
    pub tick: u64,
    /// Clock reading the pass ran at.
    pub now: Timestamp,
    /// Number of actions executed during the pass.
    pub executed: usize,
    /// Actions retired after the pass, in execution order.
    pub retired: Vec<RetiredAction>,
    /// Number of actions still active after the pass.
    pub still_active: usize,
}

/// Drives a set of time-based actions, one pass per server tick.
///
/// `execute_actions` takes `&mut self`, so a manager can never be ticked
/// re-entrantly or from two places at once.
pub struct ActionManager {
    active: Vec<Box<dyn TimedAction>>,
    pending_removal: Vec<RetiredAction>,
    rng: SmallRng,
    clock: Box<dyn Clock>,
    ticks: u64,
}

impl core::fmt::Debug for ActionManager {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ActionManager")
            .field("active", &self.active.len())
            .field("ticks", &self.ticks)
            .finish_non_exhaustive()
    }
}

impl ActionManager {
    /// Create a manager reading time from `clock` and rolling dice with a
    /// random source seeded from `seed`.
    pub fn new(clock: impl Clock + 'static, seed: u64) -> Self {
        Self::with_rng(clock, SmallRng::seed_from_u64(seed))
    }

    /// Create a manager with an explicit random source.
    pub fn with_rng(clock: impl Clock + 'static, rng: SmallRng) -> Self {
        Self {
            active: Vec::new(),
            pending_removal: Vec::new(),
            rng,
            clock: Box::new(clock),
            ticks: 0,
        }
    }

    /// Current reading of the manager's clock. Pass this to action
    /// constructors so new actions share the manager's time base.
    pub fn now(&self) -> Timestamp {
        self.clock.now()
    }

    /// Append an action to the active set.
    ///
    /// No duplicate check is made: adding the same entity twice runs two
    /// actions for it.
    pub fn add_action(&mut self, action: Box<dyn TimedAction>) {
        debug!(
            action_id = %action.id(),
            entity = %action.target(),
            kind = ?action.kind(),
            "Action added"
        );
        self.active.push(action);
    }

    /// Cancel every other action driving the same entity, then append
    /// `action`. Returns how many actions were canceled.
    pub fn add_exclusive(
        &mut self,
        action: Box<dyn TimedAction>,
        world: &mut dyn ActionWorld,
    ) -> usize {
        let canceled = self.cancel_entity(action.target(), world);
        self.add_action(action);
        canceled
    }

    /// Cancel the active action with the given id.
    ///
    /// The action stays in the active set until its next `execute`
    /// reports stop. Returns `false` if no such action is active.
    pub fn cancel(&mut self, action_id: ActionId, world: &mut dyn ActionWorld) -> bool {
        let Some(action) = self.active.iter_mut().find(|a| a.id() == action_id) else {
            return false;
        };
        action.cancel(world);
        true
    }

    /// Cancel every not-yet-canceled action driving `entity`. Returns how
    /// many were canceled.
    pub fn cancel_entity(&mut self, entity: EntityId, world: &mut dyn ActionWorld) -> usize {
        let mut canceled: usize = 0;
        for action in self
            .active
            .iter_mut()
            .filter(|a| a.target() == entity && !a.is_canceled())
        {
            action.cancel(world);
            canceled = canceled.saturating_add(1);
        }
        canceled
    }

    /// Run one tick: execute every active action in activation order, then
    /// retire those that reported stop.
    pub fn execute_actions(&mut self, world: &mut dyn ActionWorld) -> TickReport {
        self.ticks = self.ticks.saturating_add(1);
        let now = self.clock.now();
        let executed = self.active.len();

        let mut ctx = ActionContext {
            world,
            now,
            rng: &mut self.rng,
        };
        for action in &mut self.active {
            if let Progress::Stop(reason) = action.execute(&mut ctx) {
                self.pending_removal.push(RetiredAction {
                    action_id: action.id(),
                    entity: action.target(),
                    kind: action.kind(),
                    reason,
                });
            }
        }

        let pending = &self.pending_removal;
        self.active
            .retain(|action| !pending.iter().any(|r| r.action_id == action.id()));
        let retired: Vec<RetiredAction> = self.pending_removal.drain(..).collect();

        for r in &retired {
            debug!(
                action_id = %r.action_id,
                entity = %r.entity,
                kind = ?r.kind,
                reason = ?r.reason,
                "Action retired"
            );
        }

        TickReport {
            tick: self.ticks,
            now,
            executed,
            retired,
            still_active: self.active.len(),
        }
    }

    /// Number of active actions.
    pub fn len(&self) -> usize {
        self.active.len()
    }

    /// Whether no actions are active.
    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    /// Whether an action with this id is active.
    pub fn contains(&self, action_id: ActionId) -> bool {
        self.active.iter().any(|a| a.id() == action_id)
    }

    /// Ids of the active actions driving `entity`, in activation order.
    pub fn actions_for(&self, entity: EntityId) -> Vec<ActionId> {
        self.active
            .iter()
            .filter(|a| a.target() == entity)
            .map(|a| a.id())
            .collect()
    }

    /// Number of passes run so far.
    pub const fn ticks(&self) -> u64 {
        self.ticks
    }
}

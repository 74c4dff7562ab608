//! Walking along a precomputed path.
//!
//! A [`WalkAction`] turns a [`WalkPath`] into single-tile step commands,
//! one every [`WALK_STEP_INTERVAL_MS`]. When a tick arrives late the
//! action catches up by issuing one step per whole interval that has
//! passed. Walking stops when the path runs out, the next tile is taken,
//! or the path jumps more than one tile.
//!
//! Blocked tiles are not routed around; the walk simply ends.

use std::collections::VecDeque;

use cadence_types::{Direction, EntityId, TileCoord};
use tracing::{debug, warn};

use crate::action::{ActionContext, ActionCore, ActionKind, Progress, StopReason, TimedAction};
use crate::clock::Timestamp;
use crate::error::ActionError;
use crate::world::ActionWorld;

/// Milliseconds between two step commands.
pub const WALK_STEP_INTERVAL_MS: u64 = 250;

/// A forward-only queue of tiles to walk through.
///
/// The first tile is expected to be the walker's starting location and is
/// dropped when the walk begins. Tiles are consumed as they are pulled and
/// can't be replayed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WalkPath {
    tiles: VecDeque<TileCoord>,
}

impl WalkPath {
    /// Build a path from tiles in walking order.
    pub fn new(tiles: impl IntoIterator<Item = TileCoord>) -> Self {
        Self {
            tiles: tiles.into_iter().collect(),
        }
    }

    /// Number of tiles not yet consumed.
    pub fn remaining(&self) -> usize {
        self.tiles.len()
    }

    /// Whether every tile has been consumed.
    pub fn is_exhausted(&self) -> bool {
        self.tiles.is_empty()
    }

    /// The next tile, without consuming it.
    pub fn peek(&self) -> Option<TileCoord> {
        self.tiles.front().copied()
    }

    /// The last tile of the path, if any remain.
    pub fn destination(&self) -> Option<TileCoord> {
        self.tiles.back().copied()
    }
}

impl Iterator for WalkPath {
    type Item = TileCoord;

    fn next(&mut self) -> Option<TileCoord> {
        self.tiles.pop_front()
    }
}

impl FromIterator<TileCoord> for WalkPath {
    fn from_iter<I: IntoIterator<Item = TileCoord>>(iter: I) -> Self {
        Self::new(iter)
    }
}

/// Moves an entity along a [`WalkPath`], one tile per step interval.
#[derive(Debug)]
pub struct WalkAction {
    core: ActionCore,
    path: WalkPath,
    first_step: bool,
}

impl WalkAction {
    /// Create a walk for `entity` and register it as the entity's current
    /// action.
    ///
    /// # Errors
    ///
    /// Returns [`ActionError::TargetNotFound`] if `entity` does not resolve.
    pub fn new(
        world: &mut dyn ActionWorld,
        entity: EntityId,
        path: WalkPath,
        now: Timestamp,
    ) -> Result<Self, ActionError> {
        let core = ActionCore::register(world, entity, now)?;
        Ok(Self {
            core,
            path,
            first_step: true,
        })
    }

    /// The tiles still to be walked.
    pub const fn path(&self) -> &WalkPath {
        &self.path
    }

    /// Pull the next tile and issue the step towards it.
    fn step_once(&mut self, world: &mut dyn ActionWorld) -> Result<(), StopReason> {
        let Some(next) = self.path.next() else {
            return Err(StopReason::PathComplete);
        };

        let entity = self.core.target();
        let target = world.target(entity).ok_or(StopReason::TargetMissing)?;
        let (map, here) = (target.map(), target.location());

        // The entity's own tile never blocks it.
        if next != here && world.is_occupied(map, next) {
            debug!(%entity, tile = %next, "Walk blocked by occupied tile");
            return Err(StopReason::Obstructed);
        }

        let Some((dx, dy)) = here
            .delta_to(next)
            .filter(|(dx, dy)| dx.unsigned_abs() <= 1 && dy.unsigned_abs() <= 1)
        else {
            warn!(%entity, from = %here, to = %next, "Walk path is not contiguous");
            return Err(StopReason::CorruptedPath);
        };

        // Already on the tile: nothing to send.
        let Some(direction) = Direction::from_delta(dx, dy) else {
            return Ok(());
        };

        world
            .target_mut(entity)
            .ok_or(StopReason::TargetMissing)?
            .take_step(direction);
        Ok(())
    }
}

impl TimedAction for WalkAction {
    fn core(&self) -> &ActionCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut ActionCore {
        &mut self.core
    }

    fn kind(&self) -> ActionKind {
        ActionKind::Walk
    }

    fn execute(&mut self, ctx: &mut ActionContext<'_>) -> Progress {
        if self.core.is_canceled() {
            return Progress::Stop(StopReason::Canceled);
        }

        let elapsed = self.core.millis_since_last(ctx.now);
        if elapsed < WALK_STEP_INTERVAL_MS && !self.first_step {
            return Progress::Continue;
        }

        let mut moves = elapsed.checked_div(WALK_STEP_INTERVAL_MS).unwrap_or(0);

        if self.first_step {
            self.first_step = false;
            moves = moves.saturating_add(1);
            // The head of the path is where the entity already stands.
            let _ = self.path.next();
            match ctx.world.target_mut(self.core.target()) {
                Some(target) => target.stand_up(),
                None => return Progress::Stop(StopReason::TargetMissing),
            }
        }

        for _ in 0..moves {
            if let Err(reason) = self.step_once(ctx.world) {
                return Progress::Stop(reason);
            }
        }

        self.core.mark_executed(ctx.now);
        Progress::Continue
    }
}

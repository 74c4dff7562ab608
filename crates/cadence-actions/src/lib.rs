//! Time-based action engine for the Cadence simulation server.
//!
//! Long-running entity commands (walking a path, harvesting a resource)
//! can't finish inside a single client message. They are modelled as
//! [`TimedAction`]s that an [`ActionManager`] advances once per server
//! tick. Each action paces itself against the wall clock, so its cadence
//! does not depend on how often the driver ticks.
//!
//! # Modules
//!
//! - [`action`] -- The [`TimedAction`] contract, shared [`ActionCore`]
//!   state, and completion reporting ([`Progress`], [`StopReason`]).
//! - [`clock`] -- Millisecond [`Timestamp`]s and injectable [`Clock`]s.
//! - [`error`] -- Construction errors ([`ActionError`]).
//! - [`harvest`] -- [`HarvestAction`], the probabilistic harvesting loop.
//! - [`manager`] -- [`ActionManager`], the per-tick scheduler.
//! - [`walk`] -- [`WalkAction`] and [`WalkPath`], step-by-step movement.
//! - [`world`] -- Collaborator contracts ([`ActionWorld`], [`ActionTarget`]).

pub mod action;
pub mod clock;
pub mod error;
pub mod harvest;
pub mod manager;
pub mod walk;
pub mod world;

#[cfg(test)]
mod testing;

pub use action::{ActionContext, ActionCore, ActionKind, Progress, StopReason, TimedAction};
pub use clock::{Clock, ManualClock, SystemClock, Timestamp};
pub use error::ActionError;
pub use harvest::HarvestAction;
pub use manager::{ActionManager, RetiredAction, TickReport};
pub use walk::{WALK_STEP_INTERVAL_MS, WalkAction, WalkPath};
pub use world::{ActionTarget, ActionWorld};

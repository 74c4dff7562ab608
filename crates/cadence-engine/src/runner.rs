//! Tick loop driving the action manager.
//!
//! [`run_engine`] calls [`ActionManager::execute_actions`] once per tick
//! and sleeps `tick_interval_ms` between passes. The loop ends when:
//!
//! - **Bounded run**: `max_ticks` ticks have executed (zero means unbounded)
//! - **Idle**: no actions remain active
//! - **Shutdown**: the caller's shutdown future resolves (Ctrl-C in `main`)

use std::future::Future;
use std::time::Duration;

use cadence_actions::{ActionManager, TickReport};
use cadence_world::World;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::config::EngineSettings;

/// Why the tick loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RunEndReason {
    /// `max_ticks` was reached.
    MaxTicksReached,
    /// Every action finished.
    Idle,
    /// The shutdown signal fired.
    Shutdown,
}

/// Outcome of a run.
#[derive(Debug)]
pub struct RunResult {
    /// Why the loop ended.
    pub end_reason: RunEndReason,
    /// Number of ticks executed.
    pub total_ticks: u64,
    /// Report of the last tick, if any ran.
    pub final_report: Option<TickReport>,
}

/// Hook called after every tick.
pub trait TickCallback: Send {
    /// Called with the tick's report and mutable access to the world.
    fn on_tick(&mut self, report: &TickReport, world: &mut World);
}

/// Delivers queued avatar messages by logging them.
pub struct InboxLogger;

impl TickCallback for InboxLogger {
    fn on_tick(&mut self, report: &TickReport, world: &mut World) {
        let ids: Vec<_> = world.avatars().map(cadence_world::Avatar::id).collect();
        for id in ids {
            let Some(avatar) = world.avatar_mut(id) else {
                continue;
            };
            let name = avatar.name().to_owned();
            for message in avatar.drain_inbox() {
                info!(tick = report.tick, avatar = %name, text = message.text(), "Message");
            }
        }
        for retired in &report.retired {
            debug!(
                tick = report.tick,
                entity = %retired.entity,
                kind = ?retired.kind,
                reason = ?retired.reason,
                "Action finished"
            );
        }
    }
}

/// Run the tick loop until a termination condition is met.
pub async fn run_engine(
    manager: &mut ActionManager,
    world: &mut World,
    settings: &EngineSettings,
    callback: &mut dyn TickCallback,
    shutdown: impl Future<Output = ()>,
) -> RunResult {
    let interval = Duration::from_millis(settings.tick_interval_ms);
    let mut total_ticks: u64 = 0;
    let mut final_report: Option<TickReport> = None;
    tokio::pin!(shutdown);

    info!(
        tick_interval_ms = settings.tick_interval_ms,
        max_ticks = settings.max_ticks,
        active_actions = manager.len(),
        "Engine starting"
    );

    let end_reason = loop {
        if manager.is_empty() {
            info!(tick = total_ticks, "No active actions left");
            break RunEndReason::Idle;
        }

        let report = manager.execute_actions(world);
        total_ticks = total_ticks.saturating_add(1);
        callback.on_tick(&report, world);
        final_report = Some(report);

        if settings.max_ticks > 0 && total_ticks >= settings.max_ticks {
            info!(tick = total_ticks, max_ticks = settings.max_ticks, "Tick limit reached");
            break RunEndReason::MaxTicksReached;
        }
        if manager.is_empty() {
            info!(tick = total_ticks, "No active actions left");
            break RunEndReason::Idle;
        }

        tokio::select! {
            biased;
            () = &mut shutdown => {
                info!(tick = total_ticks, "Shutdown requested");
                break RunEndReason::Shutdown;
            }
            () = tokio::time::sleep(interval) => {}
        }
    };

    RunResult {
        end_reason,
        total_ticks,
        final_report,
    }
}

/// Log the outcome of a run.
pub fn log_run_end(result: &RunResult) {
    info!(
        reason = ?result.end_reason,
        total_ticks = result.total_ticks,
        "Engine stopped"
    );
    match &result.final_report {
        Some(report) => info!(
            tick = report.tick,
            now_ms = report.now.as_millis(),
            still_active = report.still_active,
            "Final tick report"
        ),
        None => warn!("Engine stopped with no ticks executed"),
    }
}

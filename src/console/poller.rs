//! # Stats Poller
//!
//! Keeps the server statistics snapshot fresh while a stats view is open:
//! one fetch immediately, then one per interval (30 seconds by default).
//!
//! The poller runs under a child scope of the context it was started from.
//! It stops when [`PollerHandle::stop`] is called, when the handle is
//! dropped, or when the parent scope is cancelled.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::console::cancel::CancelScope;
use crate::console::context::DataContext;

/// Background stats refresher
pub struct StatsPoller;

impl StatsPoller {
    /// Start polling with the interval from the context's configuration
    pub fn from_config(ctx: &DataContext) -> PollerHandle {
        let interval = ctx.client().config().app().stats_poll_interval;
        Self::spawn(ctx, interval)
    }

    pub fn spawn(ctx: &DataContext, period: Duration) -> PollerHandle {
        let scope = ctx.scope().child();
        let ctx = ctx.with_scope(scope.clone());
        let ticks = Arc::new(AtomicU64::new(0));
        let task_ticks = Arc::clone(&ticks);

        let task = tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            tracing::debug!(?period, "stats poller started");

            loop {
                tokio::select! {
                    biased;
                    _ = ctx.scope().cancelled() => break,
                    _ = interval.tick() => {}
                }

                // Failures are recorded on the context; keep polling.
                if let Err(e) = ctx.fetch_stats().await {
                    if e.is_cancelled() {
                        break;
                    }
                    tracing::debug!(error = %e, "stats poll failed");
                }
                task_ticks.fetch_add(1, Ordering::Relaxed);
            }

            tracing::debug!("stats poller stopped");
        });

        PollerHandle {
            scope,
            task: Some(task),
            ticks,
        }
    }
}

/// Handle to a running poller; dropping it stops the poller
#[derive(Debug)]
pub struct PollerHandle {
    scope: CancelScope,
    task: Option<JoinHandle<()>>,
    ticks: Arc<AtomicU64>,
}

impl PollerHandle {
    /// Number of completed polls
    pub fn ticks(&self) -> u64 {
        self.ticks.load(Ordering::Relaxed)
    }

    pub fn is_active(&self) -> bool {
        !self.scope.is_cancelled() && self.task.as_ref().is_some_and(|t| !t.is_finished())
    }

    /// Stop polling; an in-flight fetch is abandoned without committing
    pub fn stop(&self) {
        self.scope.cancel();
    }

    /// Stop and wait for the task to exit
    pub async fn shutdown(mut self) {
        self.scope.cancel();
        if let Some(task) = self.task.take() {
            let _ = task.await;
        }
    }
}

impl Drop for PollerHandle {
    fn drop(&mut self) {
        self.scope.cancel();
    }
}

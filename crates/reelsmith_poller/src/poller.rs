//! Poller and its handle.

use chrono::Utc;
use derive_getters::Getters;
use reelsmith_core::Settings;
use reelsmith_interface::GenerationApi;
use reelsmith_store::SharedTaskStore;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{watch, RwLock};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, instrument, warn};

/// Polling cadence and limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Getters)]
pub struct PollConfig {
    /// Time between ticks
    interval: Duration,
    /// Mark a task failed after this many polls without a terminal status
    max_attempts: Option<u32>,
}

impl PollConfig {
    /// Poll every `interval`, indefinitely.
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            max_attempts: None,
        }
    }

    /// Give up on a task after `attempts` polls.
    pub fn with_max_attempts(mut self, attempts: u32) -> Self {
        self.max_attempts = Some(attempts.max(1));
        self
    }
}

impl Default for PollConfig {
    fn default() -> Self {
        Self::new(Duration::from_secs(5))
    }
}

/// What one tick did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickSummary {
    /// Status queries issued
    pub queried: usize,
    /// Tasks whose record changed
    pub updated: usize,
    /// Tasks that reached a terminal status
    pub finished: usize,
    /// Queries that failed
    pub failed: usize,
    /// Tasks marked failed for exceeding the attempt ceiling
    pub gave_up: usize,
}

/// Reconciles the shared task list with remote job status.
#[derive(Clone)]
pub struct Poller {
    api: Arc<dyn GenerationApi>,
    tasks: SharedTaskStore,
    settings: Arc<RwLock<Settings>>,
    config: PollConfig,
}

impl std::fmt::Debug for Poller {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Poller")
            .field("provider", &self.api.provider_name())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl Poller {
    /// Create a poller. `settings` is read at every tick, so changes apply
    /// without a restart.
    pub fn new(
        api: Arc<dyn GenerationApi>,
        tasks: SharedTaskStore,
        settings: Arc<RwLock<Settings>>,
        config: PollConfig,
    ) -> Self {
        Self {
            api,
            tasks,
            settings,
            config,
        }
    }

    /// Polling configuration.
    pub fn config(&self) -> &PollConfig {
        &self.config
    }

    /// Run one polling pass over every non-terminal task.
    ///
    /// `attempts` carries per-task poll counts between ticks. Never fails:
    /// query and persistence errors are logged and counted.
    #[instrument(skip_all)]
    pub async fn tick(&self, attempts: &mut HashMap<String, u32>) -> TickSummary {
        let mut summary = TickSummary::default();
        let pending = self.tasks.pending().await;
        attempts.retain(|id, _| pending.iter().any(|t| t.id() == id));
        if pending.is_empty() {
            return summary;
        }

        let settings = self.settings.read().await.clone();
        if !settings.is_configured() {
            debug!(pending = pending.len(), "Settings incomplete, skipping poll");
            return summary;
        }

        for task in pending {
            let id = task.id().as_str();
            summary.queried += 1;

            match self.api.query_status(&settings, id).await {
                Ok(report) => match self.tasks.apply_report(id, &report, Utc::now()).await {
                    Ok(Some(updated)) => {
                        summary.updated += 1;
                        if updated.is_terminal() {
                            summary.finished += 1;
                            attempts.remove(id);
                            continue;
                        }
                    }
                    Ok(None) => {}
                    Err(e) => warn!(id, error = %e, "Failed to persist task update"),
                },
                Err(e) => {
                    summary.failed += 1;
                    warn!(id, error = %e.user_message(), "Status query failed, keeping last known state");
                }
            }

            if let Some(max) = self.config.max_attempts {
                let count = attempts.entry(id.to_string()).or_insert(0);
                *count += 1;
                if *count >= max {
                    attempts.remove(id);
                    if self.give_up(id, max).await {
                        summary.gave_up += 1;
                    }
                }
            }
        }

        debug!(?summary, "Poll tick complete");
        summary
    }

    async fn give_up(&self, id: &str, max: u32) -> bool {
        let reason = format!("Gave up after {} status checks without a final result", max);
        match self.tasks.update(id, |task| task.give_up(reason, Utc::now())).await {
            Ok(Some(_)) => {
                warn!(id, max, "Polling ceiling reached, task marked failed");
                true
            }
            Ok(None) => false,
            Err(e) => {
                warn!(id, error = %e, "Failed to persist give-up");
                false
            }
        }
    }

    /// Start the polling loop.
    ///
    /// The first tick fires immediately. Whenever the task list revision
    /// changes the interval restarts; a tick in progress always runs to the
    /// end, so ticks never overlap.
    pub fn spawn(self) -> PollerHandle {
        let (stop_tx, mut stop_rx) = watch::channel(false);
        let mut revisions = self.tasks.subscribe();

        info!(interval = ?self.config.interval, max_attempts = ?self.config.max_attempts, "Starting poller");
        let handle = tokio::spawn(async move {
            let mut timer = tokio::time::interval(self.config.interval);
            timer.set_missed_tick_behavior(MissedTickBehavior::Delay);
            let mut attempts = HashMap::new();

            loop {
                tokio::select! {
                    _ = timer.tick() => {
                        self.tick(&mut attempts).await;
                    }
                    changed = revisions.changed() => {
                        if changed.is_err() {
                            break;
                        }
                        debug!("Task list changed, restarting poll interval");
                        timer.reset();
                    }
                    _ = stop_rx.changed() => break,
                }
            }
            info!("Poller stopped");
        });

        PollerHandle {
            stop: stop_tx,
            handle,
        }
    }
}

/// Running polling loop.
///
/// Dropping the handle ends the loop after any tick in progress.
#[derive(Debug)]
pub struct PollerHandle {
    stop: watch::Sender<bool>,
    handle: JoinHandle<()>,
}

impl PollerHandle {
    /// Stop the loop and wait for it to finish its current tick.
    pub async fn stop(self) {
        let _ = self.stop.send(true);
        if let Err(e) = self.handle.await {
            warn!(error = %e, "Poller task ended abnormally");
        }
    }

    /// Whether the loop has ended.
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

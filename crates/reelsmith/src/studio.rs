//! Application state.

use crate::{BatchFailure, BatchOutcome};
use chrono::Utc;
use reelsmith_client::ApiClient;
use reelsmith_config::ReelsmithConfig;
use reelsmith_core::{
    Character, ModelVariant, OptimizeMode, Orientation, Settings, Task, VideoJob, VideoJobBuilder,
};
use reelsmith_error::{ApiError, ApiErrorKind, ReelsmithResult, StoryboardError, StoryboardErrorKind};
use reelsmith_interface::{GenerationApi, SnapshotKey, SnapshotStore};
use reelsmith_poller::{PollConfig, Poller, PollerHandle};
use reelsmith_store::{load_snapshot, save_snapshot, CharacterStore, JsonFileStore, SharedTaskStore};
use reelsmith_storyboard::Storyboard;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::{debug, info, instrument, warn};

/// Settings, tasks, and characters, with the remote API and persistence
/// injected.
///
/// Every change to settings, tasks, or characters rewrites that record's
/// snapshot in full.
#[derive(Clone)]
pub struct Studio {
    config: ReelsmithConfig,
    api: Arc<dyn GenerationApi>,
    snapshots: Arc<dyn SnapshotStore>,
    settings: Arc<RwLock<Settings>>,
    characters: Arc<RwLock<CharacterStore>>,
    tasks: SharedTaskStore,
}

impl std::fmt::Debug for Studio {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Studio")
            .field("provider", &self.api.provider_name())
            .field("tasks", &self.tasks)
            .finish_non_exhaustive()
    }
}

/// Overlay persisted settings on configured ones, field by field.
fn merge_settings(configured: Settings, persisted: Option<Settings>) -> Settings {
    let Some(persisted) = persisted else {
        return configured;
    };
    Settings {
        base_url: if persisted.base_url.trim().is_empty() {
            configured.base_url
        } else {
            persisted.base_url
        },
        api_key: if persisted.api_key.trim().is_empty() {
            configured.api_key
        } else {
            persisted.api_key
        },
    }
}

impl Studio {
    /// Open the studio with the HTTP client and snapshot files in the
    /// configured data directory.
    #[instrument(skip(config))]
    pub async fn open(config: ReelsmithConfig) -> ReelsmithResult<Self> {
        let api = ApiClient::with_options(config.request_timeout(), config.api.optimizer_model.clone())?;
        let snapshots = JsonFileStore::new(config.data_dir())?;
        info!(dir = %snapshots.dir().display(), "Opening studio");
        Ok(Self::with_parts(config, Arc::new(api), Arc::new(snapshots)).await)
    }

    /// Assemble the studio from explicit parts, loading saved state.
    pub async fn with_parts(
        config: ReelsmithConfig,
        api: Arc<dyn GenerationApi>,
        snapshots: Arc<dyn SnapshotStore>,
    ) -> Self {
        let persisted: Option<Settings> =
            load_snapshot(snapshots.as_ref(), SnapshotKey::Settings).await;
        let settings = merge_settings(config.settings(), persisted);
        let characters: CharacterStore =
            load_snapshot(snapshots.as_ref(), SnapshotKey::Characters).await;
        let tasks = SharedTaskStore::load(snapshots.clone()).await;
        debug!(
            configured = settings.is_configured(),
            characters = characters.len(),
            "Loaded saved state"
        );

        Self {
            config,
            api,
            snapshots,
            settings: Arc::new(RwLock::new(settings)),
            characters: Arc::new(RwLock::new(characters)),
            tasks,
        }
    }

    /// Configuration the studio was opened with.
    pub fn config(&self) -> &ReelsmithConfig {
        &self.config
    }

    /// Current connection settings.
    pub async fn settings(&self) -> Settings {
        self.settings.read().await.clone()
    }

    /// Replace connection settings and persist them.
    ///
    /// The new settings apply immediately; a failed save is logged.
    #[instrument(skip(self, settings), fields(base_url = %settings.base_url))]
    pub async fn update_settings(&self, settings: Settings) {
        let mut current = self.settings.write().await;
        *current = settings;
        match save_snapshot(self.snapshots.as_ref(), SnapshotKey::Settings, &*current).await {
            Ok(()) => info!("Settings saved"),
            Err(e) => warn!(error = %e, "Settings updated but not saved"),
        }
    }

    /// Rewrite prompt text for `mode`.
    ///
    /// Never fails: on any error, or an empty answer, the input comes back
    /// unchanged.
    #[instrument(skip(self, text), fields(chars = text.len()))]
    pub async fn optimize_prompt(&self, text: &str, mode: OptimizeMode) -> String {
        let settings = self.settings().await;
        match self.api.optimize_prompt(&settings, text, mode).await {
            Ok(optimized) if !optimized.trim().is_empty() => optimized,
            Ok(_) => text.to_string(),
            Err(e) => {
                warn!(error = %e.user_message(), "Prompt optimization failed, keeping original");
                text.to_string()
            }
        }
    }

    /// Job builder prefilled with the configured defaults.
    pub fn job(&self, prompt: impl Into<String>) -> VideoJobBuilder {
        let defaults = &self.config.jobs;
        let mut builder = VideoJob::builder();
        builder
            .prompt(prompt)
            .model(defaults.default_model)
            .seconds(defaults.default_seconds)
            .orientation(defaults.default_orientation)
            .watermark(defaults.watermark);
        builder
    }

    /// Submit one video job and track it.
    ///
    /// Fails only when the remote service rejects the job. Once it is
    /// created the task is tracked even if saving the task list fails.
    #[instrument(skip(self, job), fields(model = %job.model, seconds = job.seconds))]
    pub async fn submit_video(&self, job: VideoJob) -> ReelsmithResult<Task> {
        let settings = self.settings().await;
        let handle = self.api.create_video(&settings, &job).await?;
        let task = Task::new(
            handle.id,
            handle.status,
            job.prompt,
            job.model,
            job.orientation,
            job.seconds,
            Utc::now(),
        );
        if let Err(e) = self.tasks.insert(task.clone()).await {
            warn!(id = %task.id(), error = %e, "Task list not saved after submission");
        }
        info!(id = %task.id(), "Video job submitted");
        Ok(task)
    }

    /// Submit jobs one after another with the configured delay between them.
    ///
    /// Stops at the first failure; tasks already submitted stay tracked.
    pub async fn submit_batch(&self, jobs: Vec<VideoJob>) -> BatchOutcome {
        self.submit_batch_with_delay(jobs, self.config.batch_delay())
            .await
    }

    /// [`submit_batch`](Self::submit_batch) with an explicit delay.
    #[instrument(skip(self, jobs), fields(jobs = jobs.len()))]
    pub async fn submit_batch_with_delay(&self, jobs: Vec<VideoJob>, delay: Duration) -> BatchOutcome {
        let mut outcome = BatchOutcome::default();
        for (index, job) in jobs.into_iter().enumerate() {
            if index > 0 && !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
            match self.submit_video(job).await {
                Ok(task) => outcome.submitted.push(task),
                Err(error) => {
                    warn!(index, error = %error.user_message(), "Batch stopped");
                    outcome.failure = Some(BatchFailure { index, error });
                    break;
                }
            }
        }
        info!(submitted = outcome.submitted.len(), complete = outcome.is_complete(), "Batch finished");
        outcome
    }

    /// Submit the finalized preview of a storyboard.
    ///
    /// The storyboard must be in preview; its target duration becomes the
    /// video duration.
    pub async fn submit_storyboard(
        &self,
        storyboard: &Storyboard,
        model: ModelVariant,
        orientation: Orientation,
    ) -> ReelsmithResult<Task> {
        let prompt = storyboard.finalize()?;
        let seconds = *storyboard.target();
        if !model.supports(seconds) {
            return Err(StoryboardError::new(StoryboardErrorKind::UnsupportedDuration {
                model: model.to_string(),
                seconds,
            })
            .into());
        }
        let job = VideoJob::builder()
            .model(model)
            .prompt(prompt)
            .seconds(seconds)
            .orientation(orientation)
            .watermark(self.config.jobs.watermark)
            .build()
            .map_err(|e| ApiError::new(ApiErrorKind::InvalidInput(e.to_string())))?;
        self.submit_video(job).await
    }

    /// Every tracked task, newest first.
    pub async fn tasks(&self) -> Vec<Task> {
        self.tasks.list().await
    }

    /// Stop tracking a task. Returns the removed task, if it existed.
    pub async fn delete_task(&self, id: &str) -> ReelsmithResult<Option<Task>> {
        self.tasks.remove(id).await
    }

    /// Stop tracking every completed or failed task.
    pub async fn clear_finished(&self) -> ReelsmithResult<usize> {
        self.tasks.clear_finished().await
    }

    /// The shared task list used by the poller.
    pub fn task_store(&self) -> &SharedTaskStore {
        &self.tasks
    }

    /// Cached characters, newest first.
    pub async fn characters(&self) -> Vec<Character> {
        self.characters.read().await.characters().to_vec()
    }

    /// Create a character from a clip and cache it.
    ///
    /// Fails only when the remote call fails; a failed cache save is logged.
    #[instrument(skip(self))]
    pub async fn create_character(&self, source_url: &str, start: f64, end: f64) -> ReelsmithResult<Character> {
        let settings = self.settings().await;
        let character = self
            .api
            .create_character(&settings, source_url, start, end)
            .await?;

        let mut characters = self.characters.write().await;
        characters.upsert(character.clone());
        if let Err(e) = save_snapshot(self.snapshots.as_ref(), SnapshotKey::Characters, &*characters).await {
            warn!(error = %e, "Character cache not saved");
        }
        info!(handle = %character.handle(), "Character cached");
        Ok(character)
    }

    /// Drop a cached character.
    pub async fn remove_character(&self, id: &str) -> ReelsmithResult<Option<Character>> {
        let mut characters = self.characters.write().await;
        let removed = characters.remove(id);
        if removed.is_some() {
            save_snapshot(self.snapshots.as_ref(), SnapshotKey::Characters, &*characters).await?;
        }
        Ok(removed)
    }

    /// Start the polling loop with the configured interval and ceiling.
    pub fn start_polling(&self) -> PollerHandle {
        let mut config = PollConfig::new(self.config.poll_interval());
        if let Some(max) = self.config.polling.max_attempts {
            config = config.with_max_attempts(max);
        }
        self.poller(config).spawn()
    }

    /// A poller over this studio's tasks and settings.
    pub fn poller(&self, config: PollConfig) -> Poller {
        Poller::new(
            self.api.clone(),
            self.tasks.clone(),
            self.settings.clone(),
            config,
        )
    }
}

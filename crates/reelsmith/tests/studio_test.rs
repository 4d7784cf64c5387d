//! Studio behaviour against a fake generation API and in-memory snapshots.

use async_trait::async_trait;
use reelsmith::{
    ApiError, ApiErrorKind, Character, GenerationApi, JobHandle, MemoryStore, ModelVariant,
    OptimizeMode, Orientation, ReelsmithConfig, ReelsmithResult, Settings, SnapshotKey,
    SnapshotStore, StatusReport, StorageError, StorageErrorKind, Storyboard, StoryboardErrorKind,
    Studio, TaskStatus, VideoJob,
};
use serde_json::json;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Accepts every job except those whose prompt mentions "reject".
#[derive(Default)]
struct FakeApi {
    submitted: Mutex<Vec<VideoJob>>,
    optimizer_down: bool,
}

impl FakeApi {
    fn prompts(&self) -> Vec<String> {
        self.submitted
            .lock()
            .unwrap()
            .iter()
            .map(|job| job.prompt.clone())
            .collect()
    }
}

#[async_trait]
impl GenerationApi for FakeApi {
    async fn optimize_prompt(
        &self,
        _settings: &Settings,
        text: &str,
        _mode: OptimizeMode,
    ) -> ReelsmithResult<String> {
        if self.optimizer_down {
            return Err(ApiError::new(ApiErrorKind::Connectivity {
                base_url: "https://api.example".to_string(),
                reason: "connection refused".to_string(),
            })
            .into());
        }
        Ok(format!("{}, golden hour, slow dolly in", text))
    }

    async fn create_video(&self, _settings: &Settings, job: &VideoJob) -> ReelsmithResult<JobHandle> {
        if job.prompt.contains("reject") {
            return Err(ApiError::new(ApiErrorKind::Status {
                status_code: 400,
                message: "prompt rejected".to_string(),
            })
            .into());
        }
        let mut submitted = self.submitted.lock().unwrap();
        submitted.push(job.clone());
        Ok(JobHandle {
            id: format!("video_{}", submitted.len()),
            status: TaskStatus::Pending,
        })
    }

    async fn create_character(
        &self,
        _settings: &Settings,
        source_url: &str,
        _start: f64,
        _end: f64,
    ) -> ReelsmithResult<Character> {
        Ok(Character {
            id: "char_1".to_string(),
            username: "moss.cat".to_string(),
            profile_picture_url: String::new(),
            permalink: source_url.to_string(),
            description: None,
        })
    }

    async fn query_status(&self, _settings: &Settings, _job_id: &str) -> ReelsmithResult<StatusReport> {
        Ok(StatusReport::new(TaskStatus::Processing))
    }

    fn provider_name(&self) -> &'static str {
        "fake"
    }
}

/// Snapshot store on a read-only disk: nothing saved, every write fails.
struct ReadOnlyStore;

#[async_trait]
impl SnapshotStore for ReadOnlyStore {
    async fn read(&self, _key: SnapshotKey) -> ReelsmithResult<Option<String>> {
        Ok(None)
    }

    async fn write(&self, key: SnapshotKey, _contents: &str) -> ReelsmithResult<()> {
        Err(StorageError::new(StorageErrorKind::Write(format!("{}: read-only file system", key))).into())
    }

    async fn remove(&self, _key: SnapshotKey) -> ReelsmithResult<()> {
        Ok(())
    }
}

fn config() -> ReelsmithConfig {
    ReelsmithConfig::from_toml("[api]\napi_key = \"sk-test\"\n[batch]\ndelay_ms = 1\n")
        .expect("valid config")
}

async fn studio(api: Arc<FakeApi>, snapshots: Arc<MemoryStore>) -> Studio {
    Studio::with_parts(config(), api, snapshots).await
}

#[tokio::test]
async fn optimize_falls_back_to_original_text() -> anyhow::Result<()> {
    let working = studio(Arc::new(FakeApi::default()), Arc::new(MemoryStore::new())).await;
    let optimized = working.optimize_prompt("a fox", OptimizeMode::Single).await;
    assert_eq!(optimized, "a fox, golden hour, slow dolly in");

    let down = Arc::new(FakeApi {
        optimizer_down: true,
        ..FakeApi::default()
    });
    let degraded = studio(down, Arc::new(MemoryStore::new())).await;
    assert_eq!(degraded.optimize_prompt("a fox", OptimizeMode::Single).await, "a fox");
    Ok(())
}

#[tokio::test]
async fn submitted_job_becomes_tracked_task() -> anyhow::Result<()> {
    let api = Arc::new(FakeApi::default());
    let snapshots = Arc::new(MemoryStore::new());
    let studio = studio(api.clone(), snapshots.clone()).await;

    let job = studio.job("a paper boat in the rain").build()?;
    assert_eq!(job.model, ModelVariant::Sora2);
    assert_eq!(job.seconds, 10);

    let task = studio.submit_video(job).await?;
    assert_eq!(task.id(), "video_1");
    assert_eq!(task.status(), &TaskStatus::Pending);
    assert_eq!(studio.tasks().await.len(), 1);
    assert!(snapshots.read(SnapshotKey::Tasks).await?.is_some());

    assert!(studio.delete_task("video_1").await?.is_some());
    assert!(studio.tasks().await.is_empty());
    Ok(())
}

#[tokio::test]
async fn batch_stops_at_first_failure() -> anyhow::Result<()> {
    let api = Arc::new(FakeApi::default());
    let studio = studio(api.clone(), Arc::new(MemoryStore::new())).await;

    let jobs = vec![
        studio.job("first shot").build()?,
        studio.job("please reject this").build()?,
        studio.job("never sent").build()?,
    ];
    let outcome = studio.submit_batch(jobs).await;

    assert!(!outcome.is_complete());
    assert_eq!(outcome.submitted.len(), 1);
    let failure = outcome.failure.expect("batch failed");
    assert_eq!(failure.index, 1);
    assert_eq!(failure.error.as_api().and_then(|e| e.kind.status_code()), Some(400));
    assert_eq!(api.prompts(), vec!["first shot".to_string()]);
    assert_eq!(studio.tasks().await.len(), 1);
    Ok(())
}

#[tokio::test]
async fn saved_settings_override_configured_ones() -> anyhow::Result<()> {
    let snapshots = Arc::new(MemoryStore::new());
    let first = studio(Arc::new(FakeApi::default()), snapshots.clone()).await;
    assert_eq!(first.settings().await.api_key, "sk-test");

    first
        .update_settings(Settings::new("https://proxy.example", "sk-saved"))
        .await;

    let reopened = studio(Arc::new(FakeApi::default()), snapshots).await;
    assert_eq!(
        reopened.settings().await,
        Settings::new("https://proxy.example", "sk-saved")
    );
    Ok(())
}

#[tokio::test]
async fn characters_are_cached_across_restarts() -> anyhow::Result<()> {
    let snapshots = Arc::new(MemoryStore::new());
    let first = studio(Arc::new(FakeApi::default()), snapshots.clone()).await;
    let character = first
        .create_character("https://cdn.example/clip.mp4", 1.0, 3.0)
        .await?;
    assert_eq!(character.handle(), "@moss.cat");

    let reopened = studio(Arc::new(FakeApi::default()), snapshots).await;
    assert_eq!(reopened.characters().await, vec![character]);
    assert!(reopened.remove_character("char_1").await?.is_some());
    assert!(reopened.characters().await.is_empty());
    Ok(())
}

#[tokio::test]
async fn storyboard_submits_its_preview() -> anyhow::Result<()> {
    let api = Arc::new(FakeApi::default());
    let studio = studio(api.clone(), Arc::new(MemoryStore::new())).await;

    let mut board = Storyboard::new(10)?;
    let first = board.segments()[0].id;
    board.set_description(first, "a lighthouse at dusk")?;

    let unprepared = studio
        .submit_storyboard(&board, ModelVariant::Sora2, Orientation::Portrait)
        .await;
    assert!(unprepared.is_err(), "edit view cannot be submitted");

    board.enter_preview()?;
    let task = studio
        .submit_storyboard(&board, ModelVariant::Sora2, Orientation::Portrait)
        .await?;
    assert_eq!(task.seconds(), &10);
    assert_eq!(api.prompts(), vec!["[0s-10s] a lighthouse at dusk".to_string()]);
    Ok(())
}

#[tokio::test]
async fn end_to_end_submit_and_poll() -> anyhow::Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/videos"))
        .and(header("authorization", "Bearer sk-live"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "video_42",
            "status": "queued"
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/videos/video_42"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "completed",
            "progress": 100,
            "video_url": "https://cdn.example/video_42.mp4"
        })))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir()?;
    let config = ReelsmithConfig::from_toml(&format!(
        "[api]\nbase_url = \"{}\"\napi_key = \"sk-live\"\n[polling]\ninterval_secs = 1\n[storage]\ndata_dir = \"{}\"\n",
        server.uri(),
        dir.path().display()
    ))?;
    let studio = Studio::open(config.clone()).await?;

    let task = studio.submit_video(studio.job("a kite over dunes").build()?).await?;
    assert_eq!(task.id(), "video_42");

    let poller = studio.start_polling();
    let finished = tokio::time::timeout(Duration::from_secs(5), async {
        loop {
            let done = studio
                .task_store()
                .get("video_42")
                .await
                .is_some_and(|t| t.is_terminal());
            if done {
                break;
            }
            tokio::time::sleep(Duration::from_millis(20)).await;
        }
    })
    .await;
    poller.stop().await;
    assert!(finished.is_ok(), "task never completed");

    let reopened = Studio::open(config).await?;
    let stored = reopened.tasks().await;
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].status(), &TaskStatus::Completed);
    assert_eq!(
        stored[0].video_url().as_deref(),
        Some("https://cdn.example/video_42.mp4")
    );
    assert!(stored[0].completed_at().is_some());
    Ok(())
}

#[tokio::test]
async fn failed_save_does_not_fail_remote_actions() -> anyhow::Result<()> {
    let api = Arc::new(FakeApi::default());
    let studio = Studio::with_parts(config(), api.clone(), Arc::new(ReadOnlyStore)).await;

    let task = studio.submit_video(studio.job("first shot").build()?).await?;
    assert_eq!(task.id(), "video_1");
    assert_eq!(studio.tasks().await.len(), 1);

    let outcome = studio
        .submit_batch(vec![
            studio.job("second shot").build()?,
            studio.job("third shot").build()?,
        ])
        .await;
    assert!(outcome.is_complete());
    assert_eq!(outcome.submitted.len(), 2);
    assert_eq!(api.prompts().len(), 3);
    assert_eq!(studio.tasks().await.len(), 3);

    let character = studio
        .create_character("https://cdn.example/clip.mp4", 0.0, 2.0)
        .await?;
    assert_eq!(studio.characters().await, vec![character]);

    studio
        .update_settings(Settings::new("https://proxy.example", "sk-new"))
        .await;
    assert_eq!(studio.settings().await.api_key, "sk-new");
    Ok(())
}

#[tokio::test]
async fn storyboard_longer_than_model_allows_is_rejected() -> anyhow::Result<()> {
    let api = Arc::new(FakeApi::default());
    let studio = studio(api.clone(), Arc::new(MemoryStore::new())).await;

    let mut board = Storyboard::new(25)?;
    let first = board.segments()[0].id;
    board.set_description(first, "a long pan across the harbor")?;
    board.enter_preview()?;

    let err = studio
        .submit_storyboard(&board, ModelVariant::Sora2, Orientation::Landscape)
        .await
        .unwrap_err();
    let kind = &err.as_storyboard().expect("storyboard error").kind;
    assert!(matches!(kind, StoryboardErrorKind::UnsupportedDuration { seconds: 25, .. }));
    assert!(api.prompts().is_empty());
    Ok(())
}

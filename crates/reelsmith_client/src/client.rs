//! HTTP implementation of [`GenerationApi`].

use crate::{
    decode_data_url, normalize_status, translate_status, translate_transport, ApiMetrics,
    CharacterRequest, ChatCompletionRequest, ChatCompletionResponse, CreateCharacterResponse,
    CreateVideoResponse, StatusResponse,
};
use async_trait::async_trait;
use reelsmith_core::{
    Character, JobHandle, OptimizeMode, ReferenceImage, Settings, StatusReport, TaskStatus,
    VideoJob,
};
use reelsmith_error::{ApiError, ApiErrorKind, ConfigError, ReelsmithResult};
use reelsmith_interface::GenerationApi;
use reqwest::multipart::{Form, Part};
use serde::de::DeserializeOwned;
use std::time::{Duration, Instant};
use tracing::{debug, instrument, warn};

/// Per-request timeout used by [`ApiClient::new`].
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Chat model used by [`ApiClient::new`] for prompt optimization.
pub const DEFAULT_OPTIMIZER_MODEL: &str = "gpt-4o-mini";

/// Client for the remote generation API.
///
/// Holds no connection settings of its own: base URL and key are passed with
/// every call, so settings can change at any time.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    optimizer_model: String,
}

impl ApiClient {
    /// Create a client with the default timeout and optimizer model.
    pub fn new() -> ReelsmithResult<Self> {
        Self::with_options(DEFAULT_TIMEOUT, DEFAULT_OPTIMIZER_MODEL)
    }

    /// Create a client with a request timeout and optimizer model.
    pub fn with_options(timeout: Duration, optimizer_model: impl Into<String>) -> ReelsmithResult<Self> {
        let optimizer_model = optimizer_model.into();
        debug!(timeout_secs = timeout.as_secs(), %optimizer_model, "Creating API client");
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ConfigError::new(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self {
            client,
            optimizer_model,
        })
    }

    /// Chat model used for prompt optimization.
    pub fn optimizer_model(&self) -> &str {
        &self.optimizer_model
    }

    /// Send a request and decode a JSON success body.
    async fn execute<T: DeserializeOwned>(
        &self,
        operation: &'static str,
        settings: &Settings,
        url: &str,
        request: reqwest::RequestBuilder,
    ) -> Result<T, ApiError> {
        let metrics = ApiMetrics::get();
        let start = Instant::now();
        let result = self.send(settings, url, request).await;
        metrics.record_request(operation, start.elapsed().as_secs_f64());

        let result = result.and_then(|body| {
            serde_json::from_str::<T>(&body).map_err(|e| {
                ApiError::new(ApiErrorKind::Decode(format!(
                    "{} response from {}: {}",
                    operation, url, e
                )))
            })
        });
        if let Err(e) = &result {
            metrics.record_error(operation, &e.kind);
        }
        result
    }

    async fn send(
        &self,
        settings: &Settings,
        url: &str,
        request: reqwest::RequestBuilder,
    ) -> Result<String, ApiError> {
        debug!(url, "Sending request");
        let response = request
            .header("Authorization", format!("Bearer {}", settings.api_key.trim()))
            .send()
            .await
            .map_err(|e| {
                warn!(url, error = %e, "Request failed before a response");
                translate_transport(&settings.base_url, &e)
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| translate_transport(&settings.base_url, &e))?;

        if !status.is_success() {
            warn!(url, status = status.as_u16(), "Server returned error");
            return Err(translate_status(status, url, &body));
        }
        Ok(body)
    }
}

fn require_credentials(settings: &Settings) -> Result<(), ApiError> {
    if settings.base_url.trim().is_empty() {
        return Err(ApiError::new(ApiErrorKind::MissingCredentials(
            "base URL is not set".to_string(),
        )));
    }
    if settings.api_key.trim().is_empty() {
        return Err(ApiError::new(ApiErrorKind::MissingCredentials(
            "API key is not set".to_string(),
        )));
    }
    Ok(())
}

fn invalid(message: impl Into<String>) -> ApiError {
    ApiError::new(ApiErrorKind::InvalidInput(message.into()))
}

/// Multipart body for a video job.
fn video_form(job: &VideoJob) -> Result<Form, ApiError> {
    let mut form = Form::new()
        .text("model", job.model.to_string())
        .text("prompt", job.prompt.clone())
        .text("seconds", job.seconds.to_string())
        .text("size", job.orientation.size_code())
        .text("watermark", job.watermark.to_string());

    match &job.reference {
        Some(ReferenceImage::DataUrl(url)) => {
            let image = decode_data_url(url)?;
            let file_name = image.file_name();
            let part = Part::bytes(image.bytes)
                .file_name(file_name)
                .mime_str(&image.mime)
                .map_err(|e| invalid(format!("reference image MIME type: {}", e)))?;
            form = form.part("input_reference", part);
        }
        Some(ReferenceImage::Url(url)) => {
            form = form.text("image_url", url.clone());
        }
        None => {}
    }

    if let Some(cameo) = &job.cameo {
        form = form
            .text("character_url", cameo.url.clone())
            .text("character_timestamps", cameo.timestamps());
    }
    Ok(form)
}

#[async_trait]
impl GenerationApi for ApiClient {
    #[instrument(skip(self, settings, text), fields(mode = %mode, chars = text.len()))]
    async fn optimize_prompt(
        &self,
        settings: &Settings,
        text: &str,
        mode: OptimizeMode,
    ) -> ReelsmithResult<String> {
        if text.trim().is_empty() {
            return Ok(text.to_string());
        }
        require_credentials(settings)?;

        let url = settings.endpoint("v1/chat/completions");
        let body = ChatCompletionRequest::optimize(self.optimizer_model.as_str(), mode, text);
        let request = self.client.post(&url).json(&body);
        let response: ChatCompletionResponse = self
            .execute("optimize_prompt", settings, &url, request)
            .await?;

        let optimized = response
            .first_content()
            .ok_or_else(|| ApiError::new(ApiErrorKind::Decode("completion has no content".to_string())))?;
        debug!(chars = optimized.len(), "Prompt optimized");
        Ok(optimized.to_string())
    }

    #[instrument(skip(self, settings, job), fields(model = %job.model, seconds = job.seconds))]
    async fn create_video(&self, settings: &Settings, job: &VideoJob) -> ReelsmithResult<JobHandle> {
        require_credentials(settings)?;
        if job.prompt.trim().is_empty() {
            return Err(invalid("prompt must not be empty").into());
        }
        if !job.model.supports(job.seconds) {
            return Err(invalid(format!("{} does not offer {}s videos", job.model, job.seconds)).into());
        }

        let url = settings.endpoint("v1/videos");
        let form = video_form(job)?;
        let request = self.client.post(&url).multipart(form);
        let response: CreateVideoResponse =
            self.execute("create_video", settings, &url, request).await?;

        let status = response
            .status
            .as_deref()
            .and_then(TaskStatus::from_remote)
            .unwrap_or(TaskStatus::Pending);
        debug!(id = %response.id, %status, "Video job created");
        Ok(JobHandle {
            id: response.id,
            status,
        })
    }

    #[instrument(skip(self, settings))]
    async fn create_character(
        &self,
        settings: &Settings,
        source_url: &str,
        start: f64,
        end: f64,
    ) -> ReelsmithResult<Character> {
        require_credentials(settings)?;
        if source_url.trim().is_empty() {
            return Err(invalid("character source URL must not be empty").into());
        }
        if !start.is_finite() || !end.is_finite() || start < 0.0 || end <= start {
            return Err(invalid(format!(
                "character clip must satisfy 0 <= start < end, got {}..{}",
                start, end
            ))
            .into());
        }

        let url = settings.endpoint("v1/characters");
        let body = CharacterRequest::new(source_url, start, end);
        let request = self.client.post(&url).json(&body);
        let response: CreateCharacterResponse = self
            .execute("create_character", settings, &url, request)
            .await?;

        debug!(id = %response.id, username = %response.username, "Character created");
        Ok(response.into())
    }

    #[instrument(skip(self, settings))]
    async fn query_status(&self, settings: &Settings, job_id: &str) -> ReelsmithResult<StatusReport> {
        require_credentials(settings)?;
        let job_id = job_id.trim();
        if job_id.is_empty() {
            return Err(invalid("job id must not be empty").into());
        }

        let url = settings.endpoint(&format!("v1/videos/{}", job_id));
        let request = self.client.get(&url);
        let response: StatusResponse = self.execute("query_status", settings, &url, request).await?;

        let report = normalize_status(response);
        debug!(status = %report.status, progress = ?report.progress, "Status received");
        Ok(report)
    }

    fn provider_name(&self) -> &'static str {
        "openai"
    }
}

//! Configuration structures and loading.

use config::{Config, Environment, File, FileFormat};
use reelsmith_core::{ModelVariant, Orientation, Settings};
use reelsmith_error::{ConfigError, ReelsmithError, ReelsmithResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, instrument};

/// Bundled default configuration
const DEFAULT_CONFIG: &str = include_str!("../../../reelsmith.toml");

/// Remote API connection.
///
/// # Example
///
/// ```toml
/// [api]
/// base_url = "https://api.openai.com"
/// api_key = "sk-..."
/// optimizer_model = "gpt-4o-mini"
/// timeout_secs = 60
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL of the remote API
    pub base_url: String,
    /// Bearer token. Usually left out of files and set via environment.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    /// Chat model used for prompt optimization
    pub optimizer_model: String,
    /// Per-request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.openai.com".to_string(),
            api_key: None,
            optimizer_model: "gpt-4o-mini".to_string(),
            timeout_secs: 60,
        }
    }
}

/// Defaults applied to new jobs.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct JobsConfig {
    /// Model preselected for new jobs
    pub default_model: ModelVariant,
    /// Duration preselected for new jobs
    pub default_seconds: u32,
    /// Orientation preselected for new jobs
    pub default_orientation: Orientation,
    /// Whether outputs carry a watermark
    pub watermark: bool,
}

impl Default for JobsConfig {
    fn default() -> Self {
        Self {
            default_model: ModelVariant::Sora2,
            default_seconds: 10,
            default_orientation: Orientation::Landscape,
            watermark: false,
        }
    }
}

/// Status polling.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct PollingConfig {
    /// Seconds between polling ticks
    pub interval_secs: u64,
    /// Give up on a task after this many polls without a terminal status.
    /// Unset means poll until the remote service answers.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_attempts: Option<u32>,
}

impl Default for PollingConfig {
    fn default() -> Self {
        Self {
            interval_secs: 5,
            max_attempts: None,
        }
    }
}

/// Batch submission.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct BatchConfig {
    /// Pause between consecutive submissions in milliseconds
    pub delay_ms: u64,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self { delay_ms: 1500 }
    }
}

/// Snapshot storage.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Directory holding the snapshot files. Defaults to the platform data directory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
}

/// Top-level reelsmith configuration.
///
/// # Example
///
/// ```no_run
/// use reelsmith_config::ReelsmithConfig;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let config = ReelsmithConfig::load()?;
/// println!("Polling every {:?}", config.poll_interval());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct ReelsmithConfig {
    /// Remote API connection
    pub api: ApiConfig,
    /// Job defaults
    pub jobs: JobsConfig,
    /// Status polling
    pub polling: PollingConfig,
    /// Batch submission
    pub batch: BatchConfig,
    /// Snapshot storage
    pub storage: StorageConfig,
}

impl ReelsmithConfig {
    /// Load configuration with precedence: environment > current dir > home dir > bundled defaults.
    ///
    /// User config files are optional and silently skipped if not found.
    #[instrument]
    pub fn load() -> ReelsmithResult<Self> {
        debug!("Loading configuration with precedence: env > current dir > home dir > bundled defaults");

        let mut builder =
            Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml));

        if let Some(home) = dirs::home_dir() {
            let home_config = home.join(".config/reelsmith/reelsmith.toml");
            builder = builder.add_source(File::from(home_config).required(false));
        }

        builder = builder
            .add_source(File::with_name("reelsmith").required(false))
            .add_source(
                Environment::with_prefix("REELSMITH")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            );

        Self::finish(builder.build())
    }

    /// Load bundled defaults overlaid with one configuration file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed, or validated.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> ReelsmithResult<Self> {
        debug!("Loading configuration from file");

        let built = Config::builder()
            .add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml))
            .add_source(File::from(path.as_ref()))
            .build();
        Self::finish(built)
    }

    /// Load bundled defaults overlaid with TOML text.
    ///
    /// # Errors
    ///
    /// Returns an error if the text cannot be parsed or validated.
    pub fn from_toml(overrides: &str) -> ReelsmithResult<Self> {
        let built = Config::builder()
            .add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml))
            .add_source(File::from_str(overrides, FileFormat::Toml))
            .build();
        Self::finish(built)
    }

    fn finish(built: Result<Config, config::ConfigError>) -> ReelsmithResult<Self> {
        let config: Self = built
            .map_err(|e| {
                ReelsmithError::from(ConfigError::new(format!(
                    "Failed to build configuration: {}",
                    e
                )))
            })?
            .try_deserialize()
            .map_err(|e| {
                ReelsmithError::from(ConfigError::new(format!(
                    "Failed to parse configuration: {}",
                    e
                )))
            })?;
        config.validate()?;
        Ok(config)
    }

    /// Check values that deserialize fine but cannot work.
    ///
    /// # Errors
    ///
    /// Returns a configuration error naming the first offending key.
    pub fn validate(&self) -> ReelsmithResult<()> {
        if self.polling.interval_secs == 0 {
            return Err(ConfigError::invalid("polling.interval_secs", "must be at least 1").into());
        }
        if self.polling.max_attempts == Some(0) {
            return Err(ConfigError::invalid("polling.max_attempts", "must be at least 1 when set").into());
        }
        if self.api.timeout_secs == 0 {
            return Err(ConfigError::invalid("api.timeout_secs", "must be at least 1").into());
        }
        if !self.jobs.default_model.supports(self.jobs.default_seconds) {
            return Err(ConfigError::invalid(
                "jobs.default_seconds",
                format!(
                    "= {} is not offered by {}",
                    self.jobs.default_seconds, self.jobs.default_model
                ),
            )
            .into());
        }
        Ok(())
    }

    /// Connection settings seeded from configuration.
    pub fn settings(&self) -> Settings {
        Settings::new(
            self.api.base_url.clone(),
            self.api.api_key.clone().unwrap_or_default(),
        )
    }

    /// Directory for snapshot files.
    pub fn data_dir(&self) -> PathBuf {
        self.storage.data_dir.clone().unwrap_or_else(|| {
            dirs::data_dir()
                .unwrap_or_else(std::env::temp_dir)
                .join("reelsmith")
        })
    }

    /// Interval between polling ticks.
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.polling.interval_secs)
    }

    /// Pause between batch submissions.
    pub fn batch_delay(&self) -> Duration {
        Duration::from_millis(self.batch.delay_ms)
    }

    /// Per-request timeout.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.api.timeout_secs)
    }
}

//! Configuration error types.

/// Configuration that failed to load or cannot work.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Configuration Error: {} at line {} in {}", message, line, file)]
pub struct ConfigError {
    /// What went wrong
    pub message: String,
    /// Dotted key of the offending value, when one is known
    pub key: Option<String>,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl ConfigError {
    /// A load or parse failure not tied to one key.
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let location = std::panic::Location::caller();
        Self {
            message: message.into(),
            key: None,
            line: location.line(),
            file: location.file(),
        }
    }

    /// A value that parsed but is unusable.
    ///
    /// # Examples
    ///
    /// ```
    /// use reelsmith_error::ConfigError;
    ///
    /// let err = ConfigError::invalid("polling.interval_secs", "must be at least 1");
    /// assert_eq!(err.message, "polling.interval_secs must be at least 1");
    /// assert_eq!(err.key.as_deref(), Some("polling.interval_secs"));
    /// ```
    #[track_caller]
    pub fn invalid(key: &str, requirement: impl std::fmt::Display) -> Self {
        let mut err = Self::new(format!("{} {}", key, requirement));
        err.key = Some(key.to_string());
        err
    }
}

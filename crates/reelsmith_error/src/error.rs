//! Top-level error wrapper types.

use crate::{ApiError, ConfigError, StorageError, StoryboardError};

/// Every error a reelsmith operation can return.
///
/// # Examples
///
/// ```
/// use reelsmith_error::{ReelsmithError, StoryboardError, StoryboardErrorKind};
///
/// let err: ReelsmithError = StoryboardError::new(StoryboardErrorKind::LastSegment).into();
/// assert!(err.as_storyboard().is_some());
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum ReelsmithErrorKind {
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
    /// Remote API error
    #[from(ApiError)]
    Api(ApiError),
    /// Storyboard validation error
    #[from(StoryboardError)]
    Storyboard(StoryboardError),
    /// Snapshot persistence error
    #[from(StorageError)]
    Storage(StorageError),
}

/// Reelsmith error with kind discrimination.
///
/// # Examples
///
/// ```
/// use reelsmith_error::{ReelsmithResult, ConfigError};
///
/// fn might_fail() -> ReelsmithResult<()> {
///     Err(ConfigError::new("Missing field"))?
/// }
///
/// assert!(might_fail().is_err());
/// ```
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Reelsmith Error: {}", _0)]
pub struct ReelsmithError(Box<ReelsmithErrorKind>);

impl ReelsmithError {
    /// Create a new error from a kind.
    pub fn new(kind: ReelsmithErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &ReelsmithErrorKind {
        &self.0
    }

    /// The remote API error, if this is one.
    pub fn as_api(&self) -> Option<&ApiError> {
        match self.kind() {
            ReelsmithErrorKind::Api(e) => Some(e),
            _ => None,
        }
    }

    /// The storyboard validation error, if this is one.
    pub fn as_storyboard(&self) -> Option<&StoryboardError> {
        match self.kind() {
            ReelsmithErrorKind::Storyboard(e) => Some(e),
            _ => None,
        }
    }

    /// A message suitable for inline display, without source locations.
    pub fn user_message(&self) -> String {
        match self.kind() {
            ReelsmithErrorKind::Api(e) => e.kind.to_string(),
            ReelsmithErrorKind::Storyboard(e) => e.kind.to_string(),
            ReelsmithErrorKind::Storage(e) => e.kind.to_string(),
            ReelsmithErrorKind::Config(e) => e.message.clone(),
        }
    }
}

// Generic From implementation for any type that converts to ReelsmithErrorKind
impl<T> From<T> for ReelsmithError
where
    T: Into<ReelsmithErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for reelsmith operations.
pub type ReelsmithResult<T> = std::result::Result<T, ReelsmithError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ApiErrorKind, StoryboardErrorKind};

    #[test]
    fn user_message_strips_location() {
        let err: ReelsmithError = ApiError::new(ApiErrorKind::Status {
            status_code: 500,
            message: "boom".to_string(),
        })
        .into();
        assert_eq!(err.user_message(), "HTTP 500 error: boom");
        assert!(err.to_string().contains("line"));
    }

    #[test]
    fn accessors_match_kind() {
        let err: ReelsmithError = StoryboardError::new(StoryboardErrorKind::EmptyPreview).into();
        assert!(err.as_storyboard().is_some());
        assert!(err.as_api().is_none());
    }
}

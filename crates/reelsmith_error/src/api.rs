//! Remote generation API error types.

/// Remote API error conditions.
///
/// Every failure of an outbound call is translated into one of these kinds so
/// callers can show a human-readable message without inspecting HTTP details.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum ApiErrorKind {
    /// The request never produced a response (DNS, refused connection, TLS, timeout, CORS proxy)
    #[display(
        "Could not reach {}: {}. Check the network connection and that the server allows cross-origin requests",
        base_url,
        reason
    )]
    Connectivity {
        /// Base URL the request was sent to
        base_url: String,
        /// Transport-level reason
        reason: String,
    },
    /// The endpoint does not exist, which almost always means a wrong base URL
    #[display("Endpoint not found (404) at {}. Check the base URL in settings", url)]
    NotFound {
        /// Full URL that returned 404
        url: String,
    },
    /// Any other non-success status
    #[display("HTTP {} error: {}", status_code, message)]
    Status {
        /// HTTP status code
        status_code: u16,
        /// Message extracted from the body, or a status fallback
        message: String,
    },
    /// The response body could not be decoded
    #[display("Failed to decode response: {}", _0)]
    Decode(String),
    /// A request parameter was rejected before sending
    #[display("Invalid input: {}", _0)]
    InvalidInput(String),
    /// Base URL or API key is missing from settings
    #[display("Missing credentials: {}", _0)]
    MissingCredentials(String),
}

impl ApiErrorKind {
    /// Returns true for failures where no HTTP response was received.
    pub fn is_connectivity(&self) -> bool {
        matches!(self, ApiErrorKind::Connectivity { .. })
    }

    /// HTTP status code associated with this error, if any.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            ApiErrorKind::NotFound { .. } => Some(404),
            ApiErrorKind::Status { status_code, .. } => Some(*status_code),
            _ => None,
        }
    }
}

/// Remote API error with source location tracking.
///
/// # Examples
///
/// ```
/// use reelsmith_error::{ApiError, ApiErrorKind};
///
/// let err = ApiError::new(ApiErrorKind::NotFound {
///     url: "https://example.invalid/v1/videos".to_string(),
/// });
/// assert!(format!("{}", err).contains("base URL"));
/// assert_eq!(err.kind.status_code(), Some(404));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("API Error: {} at line {} in {}", kind, line, file)]
pub struct ApiError {
    /// The kind of error that occurred
    pub kind: ApiErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl ApiError {
    /// Create a new ApiError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: ApiErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// The message meant for the user, without location details.
    pub fn user_message(&self) -> String {
        self.kind.to_string()
    }
}

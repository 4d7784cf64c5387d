//! Metrics for remote API calls.

use opentelemetry::{
    global,
    metrics::{Counter, Histogram, Meter},
    KeyValue,
};
use reelsmith_error::ApiErrorKind;
use std::sync::OnceLock;

static METRICS: OnceLock<ApiMetrics> = OnceLock::new();

/// Request, error, and latency instruments labeled by operation.
#[derive(Clone)]
pub struct ApiMetrics {
    /// Meter handle kept alive for metric instruments
    _meter: Meter,
    /// Total API requests
    pub requests: Counter<u64>,
    /// Failed API requests
    pub errors: Counter<u64>,
    /// API call duration in seconds
    pub duration: Histogram<f64>,
}

impl ApiMetrics {
    fn init() -> Self {
        let meter = global::meter("reelsmith_api");

        Self {
            _meter: meter.clone(),
            requests: meter
                .u64_counter("api.requests")
                .with_description("Total generation API requests")
                .build(),
            errors: meter
                .u64_counter("api.errors")
                .with_description("Failed generation API requests")
                .build(),
            duration: meter
                .f64_histogram("api.duration")
                .with_unit("seconds")
                .with_description("Generation API call duration")
                .build(),
        }
    }

    /// Get the global API metrics instance.
    pub fn get() -> &'static Self {
        METRICS.get_or_init(Self::init)
    }

    /// Record a completed request, successful or not.
    pub fn record_request(&self, operation: &'static str, duration_secs: f64) {
        let labels = &[KeyValue::new("operation", operation)];
        self.requests.add(1, labels);
        self.duration.record(duration_secs, labels);
    }

    /// Record a failed request.
    pub fn record_error(&self, operation: &'static str, error: &ApiErrorKind) {
        let labels = &[
            KeyValue::new("operation", operation),
            KeyValue::new("error_type", classify_error(error)),
        ];
        self.errors.add(1, labels);
    }
}

impl Default for ApiMetrics {
    fn default() -> Self {
        Self::get().clone()
    }
}

/// Classify an API error for metrics labeling.
///
/// Returns one of: "not_found", "auth", "network", "rate_limit", "server",
/// "invalid_request", "unknown"
pub fn classify_error(error: &ApiErrorKind) -> &'static str {
    match error {
        ApiErrorKind::NotFound { .. } => "not_found",
        ApiErrorKind::Connectivity { .. } => "network",
        ApiErrorKind::MissingCredentials(_) => "auth",
        ApiErrorKind::InvalidInput(_) => "invalid_request",
        ApiErrorKind::Decode(_) => "unknown",
        ApiErrorKind::Status { status_code, .. } => match *status_code {
            401 | 403 => "auth",
            429 => "rate_limit",
            400..=499 => "invalid_request",
            500..=599 => "server",
            _ => "unknown",
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status(code: u16) -> ApiErrorKind {
        ApiErrorKind::Status {
            status_code: code,
            message: String::new(),
        }
    }

    #[test]
    fn classifies_status_codes() {
        assert_eq!(classify_error(&status(401)), "auth");
        assert_eq!(classify_error(&status(429)), "rate_limit");
        assert_eq!(classify_error(&status(422)), "invalid_request");
        assert_eq!(classify_error(&status(503)), "server");
    }

    #[test]
    fn classifies_transport() {
        let err = ApiErrorKind::Connectivity {
            base_url: "https://x".to_string(),
            reason: "refused".to_string(),
        };
        assert_eq!(classify_error(&err), "network");
    }
}

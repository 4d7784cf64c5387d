//! Job status responses and their normalization.

use chrono::{DateTime, Utc};
use reelsmith_core::{StatusReport, TaskStatus};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use tracing::warn;

/// Status response in either shape the remote service returns.
///
/// # Examples
///
/// ```
/// use reelsmith_client::{normalize_status, StatusResponse};
/// use reelsmith_core::TaskStatus;
///
/// let flat: StatusResponse =
///     serde_json::from_str(r#"{"status":"completed","video_url":"https://x/y.mp4"}"#).unwrap();
/// let nested: StatusResponse =
///     serde_json::from_str(r#"{"detail":{"status":"completed","url":"https://x/y.mp4"}}"#).unwrap();
///
/// assert_eq!(normalize_status(flat), normalize_status(nested));
/// assert_eq!(normalize_status(
///     serde_json::from_str(r#"{"status":"queued"}"#).unwrap()
/// ).status, TaskStatus::Pending);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StatusResponse {
    /// Fields wrapped in a `detail` object
    Nested {
        /// Wrapped status fields
        detail: StatusFields,
    },
    /// Fields at the top level
    Flat(StatusFields),
}

/// Status fields as sent by the remote service. Every field is optional.
///
/// Apart from `status`, a field whose value has an unexpected type is
/// dropped with a warning instead of failing the whole response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatusFields {
    /// Remote status string
    pub status: Option<String>,
    /// Progress percentage as a number or numeric text
    #[serde(alias = "progress_pct", deserialize_with = "lenient")]
    pub progress: Option<Numeric>,
    /// Output video URL
    #[serde(deserialize_with = "lenient")]
    pub video_url: Option<String>,
    /// Output URL under its generic name
    #[serde(deserialize_with = "lenient")]
    pub url: Option<String>,
    /// Output URLs
    #[serde(deserialize_with = "lenient")]
    pub output: Option<OneOrMany>,
    /// Output URLs under the plural name
    #[serde(deserialize_with = "lenient")]
    pub outputs: Option<OneOrMany>,
    /// Thumbnail URL
    #[serde(alias = "thumbnail", deserialize_with = "lenient")]
    pub thumbnail_url: Option<String>,
    /// Failure reason
    #[serde(deserialize_with = "lenient")]
    pub failure_reason: Option<String>,
    /// Error string or object
    #[serde(deserialize_with = "lenient")]
    pub error: Option<ErrorField>,
    /// Failure reason under its short name
    #[serde(deserialize_with = "lenient")]
    pub reason: Option<String>,
    /// Completion time as Unix seconds or RFC 3339 text
    #[serde(deserialize_with = "lenient")]
    pub completed_at: Option<Timestamp>,
}

/// Deserialize an optional field, turning a value of the wrong type into `None`.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    if value.is_null() {
        return Ok(None);
    }
    match serde_json::from_value(value) {
        Ok(parsed) => Ok(Some(parsed)),
        Err(e) => {
            warn!(error = %e, "Ignoring malformed status field");
            Ok(None)
        }
    }
}

/// A number sent either as JSON number or as text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Numeric {
    /// JSON number
    Number(f64),
    /// Numeric text such as `"45"` or `"12.5%"`
    Text(String),
}

impl Numeric {
    /// The finite value, if there is one.
    pub fn value(&self) -> Option<f64> {
        let value = match self {
            Numeric::Number(n) => *n,
            Numeric::Text(text) => text.trim().trim_end_matches('%').trim().parse().ok()?,
        };
        value.is_finite().then_some(value)
    }
}

/// A single URL or a list of them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany {
    /// One URL
    One(String),
    /// Several URLs, first wins
    Many(Vec<String>),
}

impl OneOrMany {
    fn first(&self) -> Option<&str> {
        match self {
            OneOrMany::One(url) => Some(url),
            OneOrMany::Many(urls) => urls.first().map(String::as_str),
        }
    }
}

/// `error` as a bare string or an object with a message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ErrorField {
    /// Bare message
    Text(String),
    /// Object with an optional message
    Object {
        /// Message text
        #[serde(default)]
        message: Option<String>,
    },
}

/// Remote timestamp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Timestamp {
    /// Seconds since the Unix epoch, possibly fractional
    Unix(f64),
    /// RFC 3339 text or Unix seconds as text
    Text(String),
}

fn from_unix_seconds(secs: f64) -> Option<DateTime<Utc>> {
    if !secs.is_finite() {
        return None;
    }
    let whole = secs.floor();
    let nanos = ((secs - whole) * 1e9).round().min(999_999_999.0) as u32;
    DateTime::from_timestamp(whole as i64, nanos)
}

impl Timestamp {
    fn to_utc(&self) -> Option<DateTime<Utc>> {
        match self {
            Timestamp::Unix(secs) => from_unix_seconds(*secs),
            Timestamp::Text(text) => {
                let text = text.trim();
                DateTime::parse_from_rfc3339(text)
                    .ok()
                    .map(|at| at.with_timezone(&Utc))
                    .or_else(|| text.parse().ok().and_then(from_unix_seconds))
            }
        }
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Normalize either response shape into one [`StatusReport`].
///
/// Unknown status strings map to `processing` so the task keeps being polled.
pub fn normalize_status(response: StatusResponse) -> StatusReport {
    let fields = match response {
        StatusResponse::Nested { detail } => detail,
        StatusResponse::Flat(fields) => fields,
    };

    let status = match non_blank(fields.status.as_deref()) {
        Some(raw) => TaskStatus::from_remote(raw).unwrap_or_else(|| {
            warn!(status = raw, "Unknown remote status, treating as processing");
            TaskStatus::Processing
        }),
        None => {
            warn!("Status response without a status field, treating as processing");
            TaskStatus::Processing
        }
    };

    let mut report = StatusReport::new(status);

    if let Some(progress) = fields.progress.as_ref().and_then(Numeric::value) {
        report = report.with_progress(progress.clamp(0.0, 100.0).round() as u8);
    }

    let video_url = non_blank(fields.video_url.as_deref())
        .or_else(|| non_blank(fields.url.as_deref()))
        .or_else(|| non_blank(fields.output.as_ref().and_then(OneOrMany::first)))
        .or_else(|| non_blank(fields.outputs.as_ref().and_then(OneOrMany::first)));
    if let Some(url) = video_url {
        report = report.with_video_url(url);
    }

    if let Some(url) = non_blank(fields.thumbnail_url.as_deref()) {
        report = report.with_thumbnail_url(url);
    }

    let error_message = match &fields.error {
        Some(ErrorField::Text(text)) => Some(text.as_str()),
        Some(ErrorField::Object { message }) => message.as_deref(),
        None => None,
    };
    let failure = non_blank(fields.failure_reason.as_deref())
        .or_else(|| non_blank(error_message))
        .or_else(|| non_blank(fields.reason.as_deref()));
    if let Some(reason) = failure {
        report = report.with_failure_reason(reason);
    }

    if let Some(at) = fields.completed_at.as_ref().and_then(Timestamp::to_utc) {
        report = report.with_completed_at(at);
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> StatusReport {
        normalize_status(serde_json::from_str(json).unwrap())
    }

    #[test]
    fn flat_completed() {
        let report = parse(r#"{"status":"completed","video_url":"https://x/y.mp4"}"#);
        assert_eq!(report.status, TaskStatus::Completed);
        assert_eq!(report.video_url.as_deref(), Some("https://x/y.mp4"));
    }

    #[test]
    fn nested_progress_pct() {
        let report = parse(r#"{"detail":{"status":"in_progress","progress_pct":42.6}}"#);
        assert_eq!(report.status, TaskStatus::Processing);
        assert_eq!(report.progress, Some(43));
    }

    #[test]
    fn output_array_first_wins() {
        let report = parse(r#"{"status":"succeeded","outputs":["https://a","https://b"]}"#);
        assert_eq!(report.video_url.as_deref(), Some("https://a"));
    }

    #[test]
    fn failure_reason_from_error_object() {
        let report = parse(r#"{"status":"failed","error":{"message":"moderation"}}"#);
        assert_eq!(report.status, TaskStatus::Failed);
        assert_eq!(report.failure_reason.as_deref(), Some("moderation"));
    }

    #[test]
    fn failure_reason_from_error_string() {
        let report = parse(r#"{"status":"error","error":"quota"}"#);
        assert_eq!(report.failure_reason.as_deref(), Some("quota"));
    }

    #[test]
    fn unknown_status_keeps_polling() {
        assert_eq!(parse(r#"{"status":"warming_up"}"#).status, TaskStatus::Processing);
        assert_eq!(parse(r#"{}"#).status, TaskStatus::Processing);
    }

    #[test]
    fn completion_time_unix_and_text() {
        let unix = parse(r#"{"status":"completed","completed_at":1700000000}"#);
        assert_eq!(
            unix.completed_at,
            DateTime::from_timestamp(1_700_000_000, 0)
        );
        let text = parse(r#"{"status":"completed","completed_at":"2023-11-14T22:13:20Z"}"#);
        assert_eq!(text.completed_at, unix.completed_at);
    }

    #[test]
    fn progress_is_clamped() {
        assert_eq!(parse(r#"{"status":"processing","progress":250}"#).progress, Some(100));
        assert_eq!(parse(r#"{"status":"processing","progress":-3}"#).progress, Some(0));
    }

    #[test]
    fn fractional_completion_time_still_completes() {
        let report = parse(
            r#"{"status":"completed","video_url":"https://x/y.mp4","completed_at":1700000000.5}"#,
        );
        assert_eq!(report.status, TaskStatus::Completed);
        assert_eq!(report.video_url.as_deref(), Some("https://x/y.mp4"));
        assert_eq!(
            report.completed_at,
            DateTime::from_timestamp(1_700_000_000, 500_000_000)
        );
    }

    #[test]
    fn progress_as_text() {
        assert_eq!(parse(r#"{"status":"in_progress","progress":"45"}"#).progress, Some(45));
        assert_eq!(parse(r#"{"status":"in_progress","progress":"12.5%"}"#).progress, Some(13));
        assert_eq!(parse(r#"{"status":"in_progress","progress":"soon"}"#).progress, None);
    }

    #[test]
    fn mistyped_optional_fields_are_dropped() {
        let report = parse(
            r#"{"detail":{"status":"completed","url":"https://x/y.mp4","thumbnail_url":7,"completed_at":{"at":1},"error":[1]}}"#,
        );
        assert_eq!(report.status, TaskStatus::Completed);
        assert_eq!(report.video_url.as_deref(), Some("https://x/y.mp4"));
        assert_eq!(report.thumbnail_url, None);
        assert_eq!(report.completed_at, None);
        assert_eq!(report.failure_reason, None);
    }

    #[test]
    fn string_detail_falls_back_to_flat() {
        let report = parse(r#"{"status":"queued","detail":"waiting for capacity"}"#);
        assert_eq!(report.status, TaskStatus::Pending);
    }
}

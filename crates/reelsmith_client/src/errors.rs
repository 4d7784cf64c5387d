//! Translation of failed calls into user-facing API errors.

use reelsmith_error::{ApiError, ApiErrorKind};
use reqwest::StatusCode;
use serde_json::Value;

/// Best-effort extraction of an error message from a response body.
///
/// Looks at `error.message`, `error` (string), `message`, then `detail`
/// (string or `{message}`). Non-JSON bodies are used as-is when short.
///
/// # Examples
///
/// ```
/// use reelsmith_client::extract_error_message;
///
/// assert_eq!(
///     extract_error_message(r#"{"error":{"message":"Invalid size"}}"#).as_deref(),
///     Some("Invalid size")
/// );
/// assert_eq!(extract_error_message("").as_deref(), None);
/// ```
pub fn extract_error_message(body: &str) -> Option<String> {
    let body = body.trim();
    if body.is_empty() {
        return None;
    }

    let Ok(json) = serde_json::from_str::<Value>(body) else {
        return (body.len() <= 300 && !body.starts_with('<')).then(|| body.to_string());
    };

    let candidates = [
        json.pointer("/error/message"),
        json.get("error"),
        json.get("message"),
        json.pointer("/detail/message"),
        json.get("detail"),
    ];
    candidates
        .into_iter()
        .flatten()
        .filter_map(Value::as_str)
        .map(str::trim)
        .find(|message| !message.is_empty())
        .map(str::to_string)
}

/// Translate a non-success response.
#[track_caller]
pub fn translate_status(status: StatusCode, url: &str, body: &str) -> ApiError {
    if status == StatusCode::NOT_FOUND {
        return ApiError::new(ApiErrorKind::NotFound {
            url: url.to_string(),
        });
    }
    let message = extract_error_message(body)
        .unwrap_or_else(|| format!("request failed with status {}", status.as_u16()));
    ApiError::new(ApiErrorKind::Status {
        status_code: status.as_u16(),
        message,
    })
}

/// Translate a transport failure (no response received).
#[track_caller]
pub fn translate_transport(base_url: &str, error: &reqwest::Error) -> ApiError {
    let reason = if error.is_timeout() {
        "request timed out".to_string()
    } else if error.is_connect() {
        "connection failed".to_string()
    } else {
        error.to_string()
    };
    ApiError::new(ApiErrorKind::Connectivity {
        base_url: base_url.to_string(),
        reason,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_hints_at_base_url() {
        let err = translate_status(StatusCode::NOT_FOUND, "https://x/v1/videos", "{}");
        assert!(err.user_message().contains("base URL"));
    }

    #[test]
    fn message_fields_in_order() {
        assert_eq!(
            extract_error_message(r#"{"error":"bad key"}"#).as_deref(),
            Some("bad key")
        );
        assert_eq!(
            extract_error_message(r#"{"message":"slow down"}"#).as_deref(),
            Some("slow down")
        );
        assert_eq!(
            extract_error_message(r#"{"detail":"no such model"}"#).as_deref(),
            Some("no such model")
        );
        assert_eq!(
            extract_error_message(r#"{"detail":{"message":"nested"}}"#).as_deref(),
            Some("nested")
        );
    }

    #[test]
    fn falls_back_to_status_code() {
        let err = translate_status(StatusCode::BAD_GATEWAY, "https://x", "<html>oops</html>");
        assert_eq!(
            err.kind,
            ApiErrorKind::Status {
                status_code: 502,
                message: "request failed with status 502".to_string()
            }
        );
    }

    #[test]
    fn plain_text_body_is_used() {
        assert_eq!(
            extract_error_message("upstream unavailable").as_deref(),
            Some("upstream unavailable")
        );
    }
}

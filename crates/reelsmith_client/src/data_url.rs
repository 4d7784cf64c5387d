//! Inline `data:` URL decoding for reference images.

use base64::Engine as _;
use reelsmith_error::{ApiError, ApiErrorKind};

/// Binary image decoded from a data URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineImage {
    /// Decoded bytes
    pub bytes: Vec<u8>,
    /// MIME type from the URL header
    pub mime: String,
}

impl InlineImage {
    /// File extension matching the MIME type.
    pub fn extension(&self) -> &str {
        match self.mime.as_str() {
            "image/jpeg" | "image/jpg" => "jpg",
            "image/png" => "png",
            "image/webp" => "webp",
            "image/gif" => "gif",
            other => other
                .strip_prefix("image/")
                .filter(|ext| !ext.is_empty() && ext.chars().all(|c| c.is_ascii_alphanumeric()))
                .unwrap_or("bin"),
        }
    }

    /// File name sent with the multipart part.
    pub fn file_name(&self) -> String {
        format!("reference.{}", self.extension())
    }
}

/// Decode a `data:<mime>;base64,<payload>` URL.
///
/// # Examples
///
/// ```
/// use reelsmith_client::decode_data_url;
///
/// let image = decode_data_url("data:image/png;base64,iVBORw0K").unwrap();
/// assert_eq!(image.mime, "image/png");
/// assert_eq!(image.file_name(), "reference.png");
/// assert!(decode_data_url("https://example.com/a.png").is_err());
/// ```
pub fn decode_data_url(url: &str) -> Result<InlineImage, ApiError> {
    let invalid = |reason: &str| {
        ApiError::new(ApiErrorKind::InvalidInput(format!(
            "reference image is not a valid data URL: {}",
            reason
        )))
    };

    let rest = url
        .trim()
        .strip_prefix("data:")
        .ok_or_else(|| invalid("missing data: prefix"))?;
    let (header, payload) = rest
        .split_once(',')
        .ok_or_else(|| invalid("missing payload"))?;
    let mime = header
        .strip_suffix(";base64")
        .ok_or_else(|| invalid("payload is not base64"))?;
    let mime = if mime.is_empty() {
        "application/octet-stream"
    } else {
        mime
    };

    let cleaned: String = payload.chars().filter(|c| !c.is_whitespace()).collect();
    let bytes = base64::engine::general_purpose::STANDARD
        .decode(cleaned)
        .map_err(|e| invalid(&e.to_string()))?;
    if bytes.is_empty() {
        return Err(invalid("empty payload"));
    }

    Ok(InlineImage {
        bytes,
        mime: mime.to_ascii_lowercase(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_jpeg() {
        let image = decode_data_url("data:image/jpeg;base64,/9j/4AAQ").unwrap();
        assert_eq!(image.extension(), "jpg");
        assert_eq!(image.bytes[..2], [0xff, 0xd8]);
    }

    #[test]
    fn rejects_bad_base64() {
        let err = decode_data_url("data:image/png;base64,***").unwrap_err();
        assert!(matches!(err.kind, ApiErrorKind::InvalidInput(_)));
    }

    #[test]
    fn rejects_non_base64_encoding() {
        assert!(decode_data_url("data:text/plain,hello").is_err());
    }
}

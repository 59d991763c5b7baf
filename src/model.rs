//! Metadata records describing uploaded images and their server-generated
//! renditions, plus decoding of the upload endpoint's response.
//!
//! The server owns this schema; the client only stores and renders it.

use serde::{Deserialize, Serialize};

use crate::error::UploadError;

/// One rendition of an uploaded image.
///
/// `formats` lists the available encodings for this rendition in preference
/// order; the first entry is the default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageVariant {
    /// Pixel width of this rendition (0 when the server did not report one)
    #[serde(default)]
    pub width: u32,

    /// Pixel height of this rendition (0 when the server did not report one)
    #[serde(default)]
    pub height: u32,

    /// Available encodings, preferred first (e.g. "webp", "avif", "jpg")
    #[serde(default)]
    pub formats: Vec<String>,
}

impl ImageVariant {
    /// The preferred encoding, or an empty string if the server sent none.
    pub fn preferred_format(&self) -> &str {
        self.formats.first().map(String::as_str).unwrap_or_default()
    }
}

/// One uploaded asset and its derived renditions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadedImage {
    /// Content-addressed identifier assigned by the server, used as a URL
    /// path segment. Never generated client-side.
    pub hash: String,

    /// Base name (without extension) used to construct URLs
    pub filename: String,

    /// The unmodified upload
    pub original: ImageVariant,

    /// Server-generated resized/transcoded renditions, in server order
    #[serde(default)]
    pub variants: Vec<ImageVariant>,
}

/// Decode the upload endpoint's response body into a tagged result.
///
/// The server signals failure in-band with `{"error": "<message>"}`, so the
/// body is inspected before deserializing into [`UploadedImage`]. A body
/// that is not valid JSON, or valid JSON that matches neither shape, maps to
/// [`UploadError::Request`].
pub fn decode_upload_response(body: &str) -> Result<UploadedImage, UploadError> {
    let value: serde_json::Value =
        serde_json::from_str(body).map_err(|e| UploadError::Request(e.to_string()))?;

    if let Some(message) = value.get("error").and_then(error_message) {
        return Err(UploadError::Server(message));
    }

    serde_json::from_value(value).map_err(|e| UploadError::Request(e.to_string()))
}

/// The server only signals failure with a truthy `error` value; `null`,
/// `false`, `0` and `""` do not count.
fn error_message(error: &serde_json::Value) -> Option<String> {
    use serde_json::Value;

    match error {
        Value::Null | Value::Bool(false) => None,
        Value::String(s) if s.is_empty() => None,
        Value::Number(n) if n.as_f64() == Some(0.0) => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_success_response() {
        let body = r#"{"hash":"abc","filename":"pic","original":{"width":500,"formats":["webp"]},"variants":[]}"#;
        let record = decode_upload_response(body).expect("should decode");

        assert_eq!(record.hash, "abc");
        assert_eq!(record.filename, "pic");
        assert_eq!(record.original.width, 500);
        assert_eq!(record.original.height, 0); // absent defaults to 0
        assert_eq!(record.original.preferred_format(), "webp");
        assert!(record.variants.is_empty());
    }

    #[test]
    fn test_decode_server_error() {
        let err = decode_upload_response(r#"{"error":"too large"}"#).unwrap_err();
        match err {
            UploadError::Server(msg) => assert_eq!(msg, "too large"),
            other => panic!("expected server error, got {:?}", other),
        }
    }

    #[test]
    fn test_decode_non_string_error_field() {
        let err = decode_upload_response(r#"{"error":413}"#).unwrap_err();
        match err {
            UploadError::Server(msg) => assert_eq!(msg, "413"),
            other => panic!("expected server error, got {:?}", other),
        }
    }

    #[test]
    fn test_falsy_error_field_is_not_an_error() {
        let body = r#"{"error":null,"hash":"abc","filename":"pic","original":{"width":500,"formats":["webp"]},"variants":[]}"#;
        let record = decode_upload_response(body).expect("null error field should decode");
        assert_eq!(record.hash, "abc");
    }

    #[test]
    fn test_decode_invalid_json_is_request_failure() {
        let err = decode_upload_response("<html>502 Bad Gateway</html>").unwrap_err();
        assert!(matches!(err, UploadError::Request(_)));
        assert_eq!(err.user_message(), "upload request failed");
    }

    #[test]
    fn test_decode_wrong_shape_is_request_failure() {
        // Valid JSON but neither an error body nor an UploadedImage
        let err = decode_upload_response(r#"{"status":"ok"}"#).unwrap_err();
        assert!(matches!(err, UploadError::Request(_)));
    }

    #[test]
    fn test_record_serialization_roundtrip() {
        let record = UploadedImage {
            hash: "deadbeef".to_string(),
            filename: "sunset".to_string(),
            original: ImageVariant {
                width: 4032,
                height: 3024,
                formats: vec!["jpg".to_string()],
            },
            variants: vec![ImageVariant {
                width: 800,
                height: 600,
                formats: vec!["webp".to_string(), "jpg".to_string()],
            }],
        };

        let json = serde_json::to_string(&record).expect("serialize");
        let loaded: UploadedImage = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(loaded, record);
    }
}

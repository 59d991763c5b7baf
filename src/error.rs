//! Error types for the upload and storage paths.

/// Errors that terminate a single upload attempt.
///
/// Every variant is terminal: no retry is attempted, the gallery cache is
/// left untouched, and the message surfaces through the status line.
#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    /// The server replied with an explicit `error` field.
    #[error("{0}")]
    Server(String),

    /// Transport failure or a response body that is not a valid record.
    #[error("upload request failed: {0}")]
    Request(String),
}

impl UploadError {
    /// Text shown to the user in the status line (without the "Error: "
    /// prefix, which the status renderer adds).
    pub fn user_message(&self) -> String {
        match self {
            UploadError::Server(msg) => msg.clone(),
            // Transport details go to the log, not the status line.
            UploadError::Request(_) => "upload request failed".to_string(),
        }
    }
}

/// Errors that can occur when reading or writing the gallery cache.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Cache serialization error
    #[error("failed to serialize gallery cache: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Backend storage error (localStorage in the browser)
    #[error("storage error: {0}")]
    Storage(String),
}

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum SkyltError {
    #[error("failed to load code table from {path}: {reason}")]
    TableLoad { path: PathBuf, reason: String },

    #[error("failed to load chemical records from {path}: {reason}")]
    RecordsLoad { path: PathBuf, reason: String },

    #[error("no record available for identifier '{id}'")]
    RecordNotFound { id: String },

    #[error("invalid chemical identifier '{id}'")]
    InvalidIdentifier { id: String },

    #[error("'{0}' is not a valid hazard or precaution code")]
    InvalidCode(String),

    #[error("retrieval failed for '{id}': {reason}")]
    Retrieval { id: String, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

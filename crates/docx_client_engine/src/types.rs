use std::fmt;
use std::path::PathBuf;

use serde::Deserialize;

/// Reason used when a failed response carries no usable `detail`.
pub const GENERIC_FAILURE_REASON: &str = "Conversion failed";

/// What to upload: the file's bytes are read from `path` when the request runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadRequest {
    pub file_name: String,
    pub content_type: Option<String>,
    pub path: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct ConvertedMetadata {
    pub title: Option<String>,
    #[serde(rename = "type")]
    pub content_type: Option<String>,
    pub description: Option<String>,
    pub seo_title: Option<String>,
    pub seo_description: Option<String>,
}

/// Success body of the conversion endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ConvertedDocument {
    pub html: String,
    #[serde(default)]
    pub metadata: ConvertedMetadata,
    #[serde(default)]
    pub warnings: Vec<String>,
}

/// Failure body of the conversion endpoint. `detail` is not always a string
/// (request validation errors report a list).
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    pub detail: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestStage {
    ReadingInput,
    Uploading,
    Decoding,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    Progress { stage: RequestStage },
    ConversionCompleted {
        result: Result<ConvertedDocument, ConversionFailure>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionFailure {
    pub kind: FailureKind,
    /// Human-readable reason shown after the "Conversion failed: " prefix.
    pub message: String,
}

impl ConversionFailure {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for ConversionFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.message, self.kind)
    }
}

impl std::error::Error for ConversionFailure {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidEndpoint,
    ReadInput,
    HttpStatus(u16),
    Timeout,
    TooLarge { max_bytes: u64, actual: Option<u64> },
    Decode,
    Network,
    /// The request never produced an outcome of its own (panic, stopped engine).
    Internal,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidEndpoint => write!(f, "invalid endpoint"),
            FailureKind::ReadInput => write!(f, "input unreadable"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::TooLarge { max_bytes, actual } => {
                write!(f, "response too large (max {max_bytes}, actual {actual:?})")
            }
            FailureKind::Decode => write!(f, "malformed response"),
            FailureKind::Network => write!(f, "network error"),
            FailureKind::Internal => write!(f, "internal error"),
        }
    }
}

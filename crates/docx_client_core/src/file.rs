use std::path::PathBuf;

use crate::ClientError;

/// Required suffix for document files, compared case-insensitively.
pub const ACCEPTED_EXTENSION: &str = ".docx";
pub const DOCX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

const SIZE_UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];

/// A file handle offered by a pick or a drop, not yet validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileCandidate {
    pub name: String,
    pub size: u64,
    pub content_type: Option<String>,
    pub path: PathBuf,
}

impl FileCandidate {
    pub fn new(name: impl Into<String>, size: u64, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            size,
            content_type: None,
            path: path.into(),
        }
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }
}

/// A candidate that passed the accepted-type check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile(FileCandidate);

impl SelectedFile {
    pub fn validate(candidate: FileCandidate) -> Result<Self, ClientError> {
        if has_accepted_extension(&candidate.name) {
            Ok(Self(candidate))
        } else {
            Err(ClientError::Validation {
                file_name: candidate.name,
            })
        }
    }

    pub fn name(&self) -> &str {
        &self.0.name
    }

    pub fn size(&self) -> u64 {
        self.0.size
    }

    pub fn content_type(&self) -> Option<&str> {
        self.0.content_type.as_deref()
    }

    pub fn path(&self) -> &std::path::Path {
        &self.0.path
    }
}

pub fn has_accepted_extension(name: &str) -> bool {
    name.to_lowercase().ends_with(ACCEPTED_EXTENSION)
}

/// Human-readable size with binary prefixes, at most two decimals, trailing zeros dropped.
pub fn format_file_size(bytes: u64) -> String {
    if bytes == 0 {
        return "0 Bytes".to_string();
    }
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < SIZE_UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    let fixed = format!("{value:.2}");
    let trimmed = fixed.trim_end_matches('0').trim_end_matches('.');
    format!("{trimmed} {}", SIZE_UNITS[unit])
}

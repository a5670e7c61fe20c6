use thiserror::Error;

/// Errors surfaced to the user as transient notices. `Display` is the notice text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    #[error("Please select a DOCX file.")]
    Validation { file_name: String },
    #[error("Conversion failed: {reason}")]
    Conversion { reason: String },
    /// Recovered locally through the select-text fallback; never shown as a notice.
    #[error("{0}")]
    Clipboard(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notice_texts() {
        let invalid = ClientError::Validation {
            file_name: "notes.pdf".to_string(),
        };
        assert_eq!(invalid.to_string(), "Please select a DOCX file.");
        let failed = ClientError::Conversion {
            reason: "Unsupported format".to_string(),
        };
        assert_eq!(failed.to_string(), "Conversion failed: Unsupported format");
    }

    #[test]
    fn clipboard_reason_is_passed_through() {
        let err = ClientError::Clipboard("clipboard unavailable: no display".to_string());
        assert_eq!(err.to_string(), "clipboard unavailable: no display");
    }
}

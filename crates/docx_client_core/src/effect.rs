use std::time::Duration;

use crate::SelectedFile;

/// How long an error notice stays visible.
pub const NOTICE_DURATION: Duration = Duration::from_secs(5);
/// How long the copy action shows its confirmation label.
pub const COPY_FEEDBACK_DURATION: Duration = Duration::from_secs(2);

/// Identifies one scheduled deferred action. Issued from a monotonic counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimerId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Timer {
    NoticeExpiry(TimerId),
    CopyLabelRevert(TimerId),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Upload the selected file to the conversion endpoint.
    UploadForConversion { file: SelectedFile },
    /// Run the syntax highlighter over freshly presented markup.
    HighlightMarkup { markup: String },
    /// Bring the results area into view.
    RevealResults,
    WriteClipboard { text: String },
    /// Clipboard fallback: expose the raw markup so the user can copy it by hand.
    SelectMarkupText { markup: String },
    ScheduleTimer { timer: Timer, after: Duration },
}

use std::fmt;
use std::str::FromStr;

use client_logging::{client_debug, client_warn};

use crate::effect::{COPY_FEEDBACK_DURATION, NOTICE_DURATION};
use crate::view_model::{self, AppViewModel};
use crate::{ClientError, Effect, SelectedFile, Timer, TimerId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RequestState {
    #[default]
    Idle,
    InFlight,
}

/// Result views. Exactly one is active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Markup,
    Preview,
    Metadata,
}

impl Tab {
    pub const ALL: [Tab; 3] = [Tab::Markup, Tab::Preview, Tab::Metadata];

    pub fn name(self) -> &'static str {
        match self {
            Tab::Markup => "markup",
            Tab::Preview => "preview",
            Tab::Metadata => "metadata",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Tab::Markup => "HTML",
            Tab::Preview => "Preview",
            Tab::Metadata => "Metadata",
        }
    }
}

impl fmt::Display for Tab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Tab {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "markup" | "html" => Ok(Tab::Markup),
            "preview" => Ok(Tab::Preview),
            "metadata" | "meta" => Ok(Tab::Metadata),
            other => Err(format!("unknown tab '{other}'")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DocumentMetadata {
    pub title: Option<String>,
    pub content_type: Option<String>,
    pub description: Option<String>,
    pub seo_title: Option<String>,
    pub seo_description: Option<String>,
}

/// One successful conversion. Replaced wholesale, never patched.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ConversionResult {
    pub markup: String,
    pub metadata: DocumentMetadata,
    /// Manual follow-up actions, in the order the service reported them.
    pub warnings: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CopyLabel {
    #[default]
    Idle,
    Copied,
    TextSelected,
}

impl CopyLabel {
    pub fn text(self) -> &'static str {
        match self {
            CopyLabel::Idle => "📋 Copy to Clipboard",
            CopyLabel::Copied => "✓ Copied!",
            CopyLabel::TextSelected => "📋 Text Selected",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub id: TimerId,
    pub message: String,
}

/// Session-scoped controller state. Lives as long as the session; a new session starts
/// from `AppState::new()`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    selected: Option<SelectedFile>,
    request: RequestState,
    result: Option<ConversionResult>,
    active_tab: Tab,
    drop_hover: bool,
    notice: Option<Notice>,
    copy_label: CopyLabel,
    copy_label_timer: Option<TimerId>,
    next_timer_id: u64,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> AppViewModel {
        view_model::build(self)
    }

    pub fn selected_file(&self) -> Option<&SelectedFile> {
        self.selected.as_ref()
    }

    pub fn request_state(&self) -> RequestState {
        self.request
    }

    pub fn result(&self) -> Option<&ConversionResult> {
        self.result.as_ref()
    }

    pub fn active_tab(&self) -> Tab {
        self.active_tab
    }

    pub fn drop_hover(&self) -> bool {
        self.drop_hover
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn copy_label(&self) -> CopyLabel {
        self.copy_label
    }

    /// The conversion trigger is enabled iff a file is selected and nothing is in flight.
    pub fn can_convert(&self) -> bool {
        self.selected.is_some() && self.request == RequestState::Idle
    }

    /// Returns whether a render is pending and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn select(&mut self, file: SelectedFile) {
        client_debug!("Selected {} ({} bytes)", file.name(), file.size());
        self.selected = Some(file);
        self.mark_dirty();
    }

    pub(crate) fn set_drop_hover(&mut self, hover: bool) {
        if self.drop_hover != hover {
            self.drop_hover = hover;
            self.mark_dirty();
        }
    }

    /// Moves to `InFlight` and hands back the file to upload.
    pub(crate) fn begin_conversion(&mut self) -> Option<SelectedFile> {
        if !self.can_convert() {
            return None;
        }
        let file = self.selected.clone()?;
        client_debug!("Request state Idle -> InFlight for {}", file.name());
        self.request = RequestState::InFlight;
        self.mark_dirty();
        Some(file)
    }

    pub(crate) fn finish_conversion(&mut self) {
        client_debug!("Request state {:?} -> Idle", self.request);
        self.request = RequestState::Idle;
        self.mark_dirty();
    }

    pub(crate) fn present(&mut self, result: ConversionResult) {
        self.result = Some(result);
        self.active_tab = Tab::Markup;
        self.mark_dirty();
    }

    pub(crate) fn switch_tab(&mut self, tab: Tab) {
        if self.active_tab != tab {
            client_debug!("Active tab {} -> {}", self.active_tab, tab);
            self.active_tab = tab;
            self.mark_dirty();
        }
    }

    /// Replaces any visible notice and schedules its expiry.
    pub(crate) fn show_error(&mut self, error: ClientError) -> Effect {
        client_warn!("{error}");
        let id = self.issue_timer_id();
        self.notice = Some(Notice {
            id,
            message: error.to_string(),
        });
        self.mark_dirty();
        Effect::ScheduleTimer {
            timer: Timer::NoticeExpiry(id),
            after: NOTICE_DURATION,
        }
    }

    pub(crate) fn set_copy_feedback(&mut self, label: CopyLabel) -> Effect {
        let id = self.issue_timer_id();
        self.copy_label = label;
        self.copy_label_timer = Some(id);
        self.mark_dirty();
        Effect::ScheduleTimer {
            timer: Timer::CopyLabelRevert(id),
            after: COPY_FEEDBACK_DURATION,
        }
    }

    /// Applies an elapsed timer. Timers superseded by a newer notice or label are ignored.
    pub(crate) fn expire(&mut self, timer: Timer) {
        match timer {
            Timer::NoticeExpiry(id) => {
                if self.notice.as_ref().is_some_and(|notice| notice.id == id) {
                    self.notice = None;
                    self.mark_dirty();
                }
            }
            Timer::CopyLabelRevert(id) => {
                if self.copy_label_timer == Some(id) {
                    self.copy_label = CopyLabel::Idle;
                    self.copy_label_timer = None;
                    self.mark_dirty();
                }
            }
        }
    }

    fn issue_timer_id(&mut self) -> TimerId {
        self.next_timer_id += 1;
        TimerId(self.next_timer_id)
    }
}

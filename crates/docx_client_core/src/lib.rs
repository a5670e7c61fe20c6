//! DOCX client core: pure state machine and view-model helpers.
mod effect;
mod error;
mod file;
mod msg;
mod state;
mod update;
mod view_model;

pub use effect::{Effect, Timer, TimerId, COPY_FEEDBACK_DURATION, NOTICE_DURATION};
pub use error::ClientError;
pub use file::{
    format_file_size, has_accepted_extension, FileCandidate, SelectedFile, ACCEPTED_EXTENSION,
    DOCX_CONTENT_TYPE,
};
pub use msg::Msg;
pub use state::{
    AppState, ConversionResult, CopyLabel, DocumentMetadata, Notice, RequestState, Tab,
};
pub use update::update;
pub use view_model::{
    AppViewModel, DropZoneView, FileSummaryView, MetadataField, MetadataView, ResultsView,
    TabView, NOT_SPECIFIED,
};

use crate::{ConversionResult, FileCandidate, Tab, Timer};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User finished the file chooser; `None` when it was dismissed.
    FilePicked(Option<FileCandidate>),
    /// A drag entered the drop target.
    DragEntered,
    /// A drag left the drop target without dropping.
    DragLeft,
    /// Files were dropped on the drop target. Only the first one is considered.
    FilesDropped(Vec<FileCandidate>),
    /// User triggered conversion.
    ConvertClicked,
    /// The in-flight conversion resolved. `Err` carries the failure reason.
    ConversionFinished(Result<ConversionResult, String>),
    /// User switched result views.
    TabSelected(Tab),
    /// User asked to copy the markup.
    CopyClicked,
    /// The clipboard write resolved. `Err` carries the reason it was refused.
    ClipboardWriteFinished(Result<(), String>),
    /// A scheduled deferred action is due.
    TimerElapsed(Timer),
    /// Fallback for placeholder wiring.
    NoOp,
}

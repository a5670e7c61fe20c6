//! DOCX client engine: conversion service IO and external collaborators.
mod clipboard;
mod engine;
mod highlight;
mod preview;
mod types;
mod upload;

pub use clipboard::{ArboardClipboard, ClipboardError, ClipboardWriter};
pub use engine::{probe_service, EngineHandle};
pub use highlight::{HighlightError, Highlighter, PlainHighlighter, SyntectHighlighter};
pub use preview::{prepare_preview, MAX_PREVIEW_CONTENT};
pub use types::{
    ConversionFailure, ConvertedDocument, ConvertedMetadata, EngineEvent, FailureKind,
    RequestStage, UploadRequest, GENERIC_FAILURE_REASON,
};
pub use upload::{EventSink, ReqwestUploader, UploadSettings, Uploader};

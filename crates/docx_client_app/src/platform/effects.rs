use std::sync::{mpsc, Arc};
use std::thread;

use client_logging::{client_debug, client_info, client_warn};
use docx_client_core::{ConversionResult, DocumentMetadata, Effect, Msg};
use docx_client_engine::{
    ArboardClipboard, ClipboardWriter, ConvertedDocument, EngineEvent, EngineHandle, EventSink,
    Highlighter, PlainHighlighter, SyntectHighlighter, UploadRequest,
};

use super::app::AppEvent;
use super::config::ClientConfig;
use super::ui::render::RenderCache;

/// Executes core effects against the engine, the clipboard, timers and the screen cache.
pub struct EffectRunner {
    engine: EngineHandle,
    clipboard: Arc<dyn ClipboardWriter>,
    highlighter: Box<dyn Highlighter>,
    event_tx: mpsc::Sender<AppEvent>,
}

impl EffectRunner {
    pub fn new(config: &ClientConfig, event_tx: mpsc::Sender<AppEvent>) -> anyhow::Result<Self> {
        let sink: Arc<dyn EventSink> = Arc::new(EngineEventForwarder {
            tx: event_tx.clone(),
        });
        let engine = EngineHandle::new(config.upload.clone(), sink)?;
        Ok(Self {
            engine,
            clipboard: Arc::new(ArboardClipboard),
            highlighter: build_highlighter(config),
            event_tx,
        })
    }

    pub fn run(&self, effects: Vec<Effect>, cache: &mut RenderCache) {
        for effect in effects {
            match effect {
                Effect::UploadForConversion { file } => {
                    client_info!("UploadForConversion name={} size={}", file.name(), file.size());
                    self.engine.convert(UploadRequest {
                        file_name: file.name().to_string(),
                        content_type: file.content_type().map(str::to_owned),
                        path: file.path().to_path_buf(),
                    });
                }
                Effect::HighlightMarkup { markup } => {
                    cache.highlighted_markup = Some(self.highlighter.highlight(&markup));
                }
                Effect::RevealResults => {
                    cache.reveal = true;
                }
                Effect::WriteClipboard { text } => self.write_clipboard(text),
                Effect::SelectMarkupText { markup } => {
                    cache.selection = Some(markup);
                }
                Effect::ScheduleTimer { timer, after } => {
                    client_debug!("Scheduling {:?} in {:?}", timer, after);
                    let tx = self.event_tx.clone();
                    thread::spawn(move || {
                        thread::sleep(after);
                        let _ = tx.send(AppEvent::Msg(Msg::TimerElapsed(timer)));
                    });
                }
            }
        }
    }

    fn write_clipboard(&self, text: String) {
        let clipboard = self.clipboard.clone();
        let tx = self.event_tx.clone();
        thread::spawn(move || {
            let result = clipboard.write_text(&text).map_err(|err| err.to_string());
            let _ = tx.send(AppEvent::Msg(Msg::ClipboardWriteFinished(result)));
        });
    }
}

fn build_highlighter(config: &ClientConfig) -> Box<dyn Highlighter> {
    if !config.color {
        return Box::new(PlainHighlighter);
    }
    match SyntectHighlighter::new(&config.highlight_theme) {
        Ok(highlighter) => Box::new(highlighter),
        Err(err) => {
            client_warn!(
                "{err}; available: {}",
                SyntectHighlighter::available_themes().join(", ")
            );
            Box::new(PlainHighlighter)
        }
    }
}

struct EngineEventForwarder {
    tx: mpsc::Sender<AppEvent>,
}

impl EventSink for EngineEventForwarder {
    fn emit(&self, event: EngineEvent) {
        match event {
            EngineEvent::Progress { stage } => {
                client_debug!("Conversion stage {:?}", stage);
            }
            EngineEvent::ConversionCompleted { result } => {
                let outcome = result.map(map_document).map_err(|failure| failure.message);
                let _ = self
                    .tx
                    .send(AppEvent::Msg(Msg::ConversionFinished(outcome)));
            }
        }
    }
}

fn map_document(doc: ConvertedDocument) -> ConversionResult {
    ConversionResult {
        markup: doc.html,
        metadata: DocumentMetadata {
            title: doc.metadata.title,
            content_type: doc.metadata.content_type,
            description: doc.metadata.description,
            seo_title: doc.metadata.seo_title,
            seo_description: doc.metadata.seo_description,
        },
        warnings: doc.warnings,
    }
}

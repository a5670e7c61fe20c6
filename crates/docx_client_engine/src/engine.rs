use std::io;
use std::panic::AssertUnwindSafe;
use std::sync::{mpsc, Arc};
use std::thread;

use client_logging::{client_error, client_info, client_warn};
use futures_util::FutureExt;

use crate::upload::{EventSink, ReqwestUploader, UploadSettings, Uploader};
use crate::{ConversionFailure, EngineEvent, FailureKind, UploadRequest};

const ENGINE_STOPPED_REASON: &str = "conversion engine stopped";
const UNEXPECTED_FAILURE_REASON: &str = "unexpected error during upload";

enum EngineCommand {
    Convert { request: UploadRequest },
}

/// Runs conversion requests on a dedicated tokio runtime and reports through an `EventSink`.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    sink: Arc<dyn EventSink>,
}

impl EngineHandle {
    pub fn new(settings: UploadSettings, sink: Arc<dyn EventSink>) -> io::Result<Self> {
        Self::with_uploader(Arc::new(ReqwestUploader::new(settings)), sink)
    }

    pub fn with_uploader(
        uploader: Arc<dyn Uploader>,
        sink: Arc<dyn EventSink>,
    ) -> io::Result<Self> {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let runtime = tokio::runtime::Runtime::new()?;
        let engine_sink = sink.clone();

        thread::Builder::new()
            .name("docx-engine".to_string())
            .spawn(move || {
                while let Ok(command) = cmd_rx.recv() {
                    let uploader = uploader.clone();
                    let sink = engine_sink.clone();
                    runtime.spawn(async move {
                        handle_command(uploader.as_ref(), command, sink.as_ref()).await;
                    });
                }
            })?;

        Ok(Self { cmd_tx, sink })
    }

    /// Queues a conversion. Exactly one `ConversionCompleted` follows every call.
    pub fn convert(&self, request: UploadRequest) {
        if let Err(mpsc::SendError(EngineCommand::Convert { request })) =
            self.cmd_tx.send(EngineCommand::Convert { request })
        {
            client_error!("Engine thread is gone; cannot convert {}", request.file_name);
            self.sink.emit(EngineEvent::ConversionCompleted {
                result: Err(ConversionFailure::new(FailureKind::Internal, ENGINE_STOPPED_REASON)),
            });
        }
    }
}

async fn handle_command(uploader: &dyn Uploader, command: EngineCommand, sink: &dyn EventSink) {
    match command {
        EngineCommand::Convert { request } => {
            let result = AssertUnwindSafe(uploader.convert(&request, sink))
                .catch_unwind()
                .await
                .unwrap_or_else(|_| {
                    Err(ConversionFailure::new(FailureKind::Internal, UNEXPECTED_FAILURE_REASON))
                });
            match &result {
                Ok(doc) => client_info!(
                    "Converted {}: {} bytes of markup, {} warnings",
                    request.file_name,
                    doc.html.len(),
                    doc.warnings.len()
                ),
                Err(failure) => {
                    client_warn!("Conversion of {} failed: {}", request.file_name, failure)
                }
            }
            sink.emit(EngineEvent::ConversionCompleted { result });
        }
    }
}

/// Blocking health probe against the service behind `settings.endpoint`.
pub fn probe_service(settings: UploadSettings) -> Result<String, ConversionFailure> {
    let runtime = tokio::runtime::Runtime::new()
        .map_err(|err| ConversionFailure::new(FailureKind::Network, err.to_string()))?;
    let uploader = ReqwestUploader::new(settings);
    runtime.block_on(uploader.check_health())
}

use std::time::Duration;

use client_logging::{client_debug, client_info};
use futures_util::StreamExt;
use reqwest::multipart::{Form, Part};
use reqwest::Url;

use crate::types::ErrorBody;
use crate::{
    ConversionFailure, ConvertedDocument, EngineEvent, FailureKind, RequestStage, UploadRequest,
    GENERIC_FAILURE_REASON,
};

const FILE_FIELD: &str = "file";
const HEALTH_PATH: &str = "/health";

#[derive(Debug, Clone)]
pub struct UploadSettings {
    pub endpoint: String,
    pub connect_timeout: Option<Duration>,
    /// Overall request limit. `None` lets a hung service keep the request open.
    pub request_timeout: Option<Duration>,
    pub max_response_bytes: u64,
}

impl Default for UploadSettings {
    fn default() -> Self {
        Self {
            endpoint: "http://127.0.0.1:8000/api/convert".to_string(),
            connect_timeout: Some(Duration::from_secs(10)),
            request_timeout: None,
            max_response_bytes: 32 * 1024 * 1024,
        }
    }
}

pub trait EventSink: Send + Sync {
    fn emit(&self, event: EngineEvent);
}

#[async_trait::async_trait]
pub trait Uploader: Send + Sync {
    async fn convert(
        &self,
        request: &UploadRequest,
        sink: &dyn EventSink,
    ) -> Result<ConvertedDocument, ConversionFailure>;
}

#[derive(Debug, Clone)]
pub struct ReqwestUploader {
    settings: UploadSettings,
}

impl ReqwestUploader {
    pub fn new(settings: UploadSettings) -> Self {
        Self { settings }
    }

    /// Queries the service health route next to the conversion endpoint.
    pub async fn check_health(&self) -> Result<String, ConversionFailure> {
        let url = self
            .endpoint()?
            .join(HEALTH_PATH)
            .map_err(|err| ConversionFailure::new(FailureKind::InvalidEndpoint, err.to_string()))?;
        let response = self
            .build_client()?
            .get(url)
            .send()
            .await
            .map_err(map_reqwest_error)?;
        let status = response.status();
        let body = self.read_body(response).await?;
        if !status.is_success() {
            return Err(ConversionFailure::new(
                FailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }
        let value: serde_json::Value = serde_json::from_slice(&body)
            .map_err(|err| ConversionFailure::new(FailureKind::Decode, err.to_string()))?;
        Ok(value
            .get("status")
            .and_then(|status| status.as_str())
            .unwrap_or("unknown")
            .to_string())
    }

    fn endpoint(&self) -> Result<Url, ConversionFailure> {
        Url::parse(&self.settings.endpoint)
            .map_err(|err| ConversionFailure::new(FailureKind::InvalidEndpoint, err.to_string()))
    }

    fn build_client(&self) -> Result<reqwest::Client, ConversionFailure> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = self.settings.connect_timeout {
            builder = builder.connect_timeout(timeout);
        }
        if let Some(timeout) = self.settings.request_timeout {
            builder = builder.timeout(timeout);
        }
        builder
            .build()
            .map_err(|err| ConversionFailure::new(FailureKind::Network, err.to_string()))
    }

    async fn build_form(&self, request: &UploadRequest) -> Result<Form, ConversionFailure> {
        let bytes = tokio::fs::read(&request.path).await.map_err(|err| {
            ConversionFailure::new(
                FailureKind::ReadInput,
                format!("could not read {}: {err}", request.file_name),
            )
        })?;
        client_debug!("Read {} bytes from {:?}", bytes.len(), request.path);

        let mut part = Part::bytes(bytes).file_name(request.file_name.clone());
        if let Some(content_type) = request.content_type.as_deref() {
            part = part
                .mime_str(content_type)
                .map_err(|err| ConversionFailure::new(FailureKind::ReadInput, err.to_string()))?;
        }
        Ok(Form::new().part(FILE_FIELD, part))
    }

    async fn read_body(&self, response: reqwest::Response) -> Result<Vec<u8>, ConversionFailure> {
        let max_bytes = self.settings.max_response_bytes;
        if let Some(content_len) = response.content_length() {
            if content_len > max_bytes {
                return Err(ConversionFailure::new(
                    FailureKind::TooLarge {
                        max_bytes,
                        actual: Some(content_len),
                    },
                    "response too large",
                ));
            }
        }

        let mut body = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            let next_len = body.len() as u64 + chunk.len() as u64;
            if next_len > max_bytes {
                return Err(ConversionFailure::new(
                    FailureKind::TooLarge {
                        max_bytes,
                        actual: Some(next_len),
                    },
                    "response too large",
                ));
            }
            body.extend_from_slice(&chunk);
        }
        Ok(body)
    }
}

#[async_trait::async_trait]
impl Uploader for ReqwestUploader {
    async fn convert(
        &self,
        request: &UploadRequest,
        sink: &dyn EventSink,
    ) -> Result<ConvertedDocument, ConversionFailure> {
        let endpoint = self.endpoint()?;
        let client = self.build_client()?;

        sink.emit(EngineEvent::Progress {
            stage: RequestStage::ReadingInput,
        });
        let form = self.build_form(request).await?;

        sink.emit(EngineEvent::Progress {
            stage: RequestStage::Uploading,
        });
        client_info!("Uploading {} to {}", request.file_name, endpoint);
        let response = client
            .post(endpoint)
            .multipart(form)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        let body = self.read_body(response).await?;
        sink.emit(EngineEvent::Progress {
            stage: RequestStage::Decoding,
        });

        if !status.is_success() {
            return Err(ConversionFailure::new(
                FailureKind::HttpStatus(status.as_u16()),
                failure_reason(&body),
            ));
        }

        serde_json::from_slice(&body).map_err(|err| {
            ConversionFailure::new(FailureKind::Decode, format!("invalid response: {err}"))
        })
    }
}

/// The service's `detail` string when present and non-empty, else the generic reason.
pub(crate) fn failure_reason(body: &[u8]) -> String {
    serde_json::from_slice::<ErrorBody>(body)
        .ok()
        .and_then(|error| error.detail)
        .and_then(|detail| detail.as_str().map(str::to_owned))
        .filter(|detail| !detail.is_empty())
        .unwrap_or_else(|| GENERIC_FAILURE_REASON.to_string())
}

fn map_reqwest_error(err: reqwest::Error) -> ConversionFailure {
    if err.is_timeout() {
        return ConversionFailure::new(FailureKind::Timeout, err.to_string());
    }
    ConversionFailure::new(FailureKind::Network, err.to_string())
}

use std::{io, path::Path, time::Duration};

use async_trait::async_trait;
use reqwest::{multipart, Client, Response};
use shared::{domain::ArtifactRef, error::ServiceErrorBody, protocol::UploadEnvelope};
use thiserror::Error;
use tracing::{debug, info};
use url::Url;

pub const DEFAULT_UPLOAD_TIMEOUT: Duration = Duration::from_millis(30_000);
const UPLOAD_PATH: [&str; 2] = ["api", "upload"];
const DOWNLOAD_PATH: [&str; 2] = ["api", "download"];
const UPLOAD_FIELD: &str = "file";

/// A document picked by the user, ready to be sent as a single multipart part.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadFile {
    pub name: String,
    pub bytes: Vec<u8>,
}

impl UploadFile {
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            bytes,
        }
    }

    pub async fn read(path: &Path) -> io::Result<Self> {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .ok_or_else(|| {
                io::Error::new(
                    io::ErrorKind::InvalidInput,
                    format!("'{}' does not name a file", path.display()),
                )
            })?;
        let bytes = tokio::fs::read(path).await?;
        Ok(Self { name, bytes })
    }

    /// File-picker style filter check. Case-insensitive; the leading dot is
    /// optional.
    pub fn has_extension(&self, extension: &str) -> bool {
        let wanted = extension.trim_start_matches('.');
        Path::new(&self.name)
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case(wanted))
    }

    fn mime_type(&self) -> String {
        mime_guess::from_path(&self.name)
            .first_or_octet_stream()
            .essence_str()
            .to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    #[error("server responded with status {status}")]
    Status { status: u16, detail: Option<String> },
    #[error("no response from server: {0}")]
    NoResponse(String),
    #[error("failed to build request: {0}")]
    Construction(String),
    #[error("failed to decode response: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_builder() {
            Self::Construction(err.to_string())
        } else if err.is_decode() {
            Self::Decode(err.to_string())
        } else {
            // timeouts, refused connections and truncated bodies all mean the
            // request left but no usable response came back
            Self::NoResponse(err.to_string())
        }
    }
}

#[async_trait]
pub trait AnalysisTransport: Send + Sync {
    async fn upload(&self, file: UploadFile) -> Result<UploadEnvelope, TransportError>;
    async fn fetch_artifact(&self, artifact: &ArtifactRef) -> Result<Vec<u8>, TransportError>;
}

pub struct HttpAnalysisTransport {
    http: Client,
    base_url: String,
    upload_timeout: Duration,
}

impl HttpAnalysisTransport {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_upload_timeout(base_url, DEFAULT_UPLOAD_TIMEOUT)
    }

    pub fn with_upload_timeout(base_url: impl Into<String>, upload_timeout: Duration) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.into(),
            upload_timeout,
        }
    }

    fn endpoint<'a>(
        &self,
        segments: impl IntoIterator<Item = &'a str>,
    ) -> Result<Url, TransportError> {
        let mut url = Url::parse(self.base_url.trim()).map_err(|e| {
            TransportError::Construction(format!("invalid server url '{}': {e}", self.base_url))
        })?;
        url.path_segments_mut()
            .map_err(|()| {
                TransportError::Construction(format!(
                    "server url '{}' cannot carry a path",
                    self.base_url
                ))
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }
}

async fn ensure_success(response: Response) -> Result<Response, TransportError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.bytes().await.unwrap_or_default();
    let detail = serde_json::from_slice::<ServiceErrorBody>(&body)
        .ok()
        .and_then(|body| body.detail_text());
    Err(TransportError::Status {
        status: status.as_u16(),
        detail,
    })
}

#[async_trait]
impl AnalysisTransport for HttpAnalysisTransport {
    async fn upload(&self, file: UploadFile) -> Result<UploadEnvelope, TransportError> {
        let url = self.endpoint(UPLOAD_PATH)?;
        let mime_type = file.mime_type();
        let size_bytes = file.bytes.len();
        let part = multipart::Part::bytes(file.bytes)
            .file_name(file.name.clone())
            .mime_str(&mime_type)?;
        let form = multipart::Form::new().part(UPLOAD_FIELD, part);

        info!(%url, filename = %file.name, size_bytes, "uploading document for analysis");
        let response = self
            .http
            .post(url)
            .multipart(form)
            .timeout(self.upload_timeout)
            .send()
            .await?;
        let response = ensure_success(response).await?;
        let body = response.bytes().await?;
        debug!(body_len = body.len(), "received analysis envelope");
        serde_json::from_slice(&body).map_err(|e| TransportError::Decode(e.to_string()))
    }

    async fn fetch_artifact(&self, artifact: &ArtifactRef) -> Result<Vec<u8>, TransportError> {
        let url = self.endpoint(DOWNLOAD_PATH.into_iter().chain([artifact.as_str()]))?;
        info!(%url, %artifact, "fetching optimization artifact");
        let response = self.http.get(url).send().await?;
        let bytes = ensure_success(response).await?.bytes().await?;
        Ok(bytes.to_vec())
    }
}

#[cfg(test)]
#[path = "tests/transport_tests.rs"]
mod tests;

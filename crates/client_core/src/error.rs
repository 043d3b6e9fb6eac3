use thiserror::Error;

pub(crate) const MISSING_MESSAGE_LABEL: &str = "no message provided";
pub(crate) const MISSING_DETAIL_LABEL: &str = "unknown error";

/// Every failure a session can surface to the user.
///
/// The `Display` text is what ends up in the notification banner.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("Analysis failed: {message}")]
    LogicalFailure { message: String },
    #[error("Upload failed: {status} - {detail}")]
    HttpStatusFailure { status: u16, detail: String },
    #[error("Server unreachable; make sure the analysis service is running")]
    Unreachable { reason: String },
    #[error("Request error: {reason}")]
    RequestConstructionFailure { reason: String },
    #[error("Invalid response from analysis service: {reason}")]
    InvalidResponse { reason: String },
    #[error("Nothing to download")]
    NoArtifact,
    #[error("Artifact download failed")]
    DownloadTransportFailure { reason: String },
    #[error("Failed to save artifact {name}: {reason}")]
    ArtifactSaveFailure { name: String, reason: String },
}

impl SessionError {
    pub fn logical(message: Option<String>) -> Self {
        Self::LogicalFailure {
            message: message
                .filter(|m| !m.trim().is_empty())
                .unwrap_or_else(|| MISSING_MESSAGE_LABEL.to_string()),
        }
    }

    pub fn http_status(status: u16, detail: Option<String>) -> Self {
        Self::HttpStatusFailure {
            status,
            detail: detail
                .filter(|d| !d.trim().is_empty())
                .unwrap_or_else(|| MISSING_DETAIL_LABEL.to_string()),
        }
    }

    /// Underlying cause for logging; the `Display` text stays user-facing.
    pub fn reason(&self) -> Option<&str> {
        match self {
            Self::Unreachable { reason }
            | Self::RequestConstructionFailure { reason }
            | Self::InvalidResponse { reason }
            | Self::DownloadTransportFailure { reason }
            | Self::ArtifactSaveFailure { reason, .. } => Some(reason.as_str()),
            _ => None,
        }
    }
}

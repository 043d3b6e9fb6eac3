//! Drives one analysis session: upload, interpret the envelope, remember the
//! artifact, download it on request.
//!
//! Outcomes are reported twice: through the returned value and, fire and
//! forget, through the notification channel that banner-style front ends
//! listen on. The session lock is never held across a network call.

use std::{path::PathBuf, sync::Arc};

use shared::{
    domain::ArtifactRef,
    protocol::{AnalysisResult, UploadEnvelope},
};
use tokio::sync::{broadcast, Mutex};
use tracing::{debug, info, warn};

use crate::{
    error::SessionError,
    session::Session,
    sink::ArtifactSink,
    transport::{AnalysisTransport, TransportError, UploadFile},
};

const NOTIFICATION_CAPACITY: usize = 64;
const ANALYSIS_COMPLETE_TEXT: &str = "Analysis complete";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub level: NotificationLevel,
    pub text: String,
}

impl Notification {
    fn success(text: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Success,
            text: text.into(),
        }
    }

    fn error(error: &SessionError) -> Self {
        Self {
            level: NotificationLevel::Error,
            text: error.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Analyzed,
    Failed(SessionError),
    /// A newer submission started before this one finished; its outcome was
    /// dropped.
    Superseded,
}

pub struct SessionController {
    transport: Arc<dyn AnalysisTransport>,
    sink: Arc<dyn ArtifactSink>,
    session: Mutex<Session>,
    notifications: broadcast::Sender<Notification>,
}

impl SessionController {
    pub fn new(transport: Arc<dyn AnalysisTransport>, sink: Arc<dyn ArtifactSink>) -> Self {
        let (notifications, _) = broadcast::channel(NOTIFICATION_CAPACITY);
        Self {
            transport,
            sink,
            session: Mutex::new(Session::new()),
            notifications,
        }
    }

    pub fn subscribe_notifications(&self) -> broadcast::Receiver<Notification> {
        self.notifications.subscribe()
    }

    pub async fn snapshot(&self) -> Session {
        self.session.lock().await.snapshot()
    }

    pub async fn submit(&self, file: UploadFile) -> SubmitOutcome {
        let ticket = self.session.lock().await.begin_upload();
        info!(
            ticket = ticket.sequence(),
            filename = %file.name,
            "analysis submission started"
        );

        let outcome = match self.transport.upload(file).await {
            Ok(envelope) => interpret_envelope(envelope),
            Err(err) => Err(upload_error(err)),
        };

        let applied = {
            let mut session = self.session.lock().await;
            match outcome {
                Ok((result, artifact)) => session
                    .complete(ticket, result, artifact)
                    .map(|()| None),
                Err(error) => session
                    .fail(ticket, error.clone())
                    .map(|()| Some(error)),
            }
        };

        match applied {
            Ok(None) => {
                info!(ticket = ticket.sequence(), "analysis applied to session");
                self.notify(Notification::success(ANALYSIS_COMPLETE_TEXT));
                SubmitOutcome::Analyzed
            }
            Ok(Some(error)) => {
                warn!(
                    ticket = ticket.sequence(),
                    error = %error,
                    reason = error.reason().unwrap_or_default(),
                    "analysis failed"
                );
                self.notify(Notification::error(&error));
                SubmitOutcome::Failed(error)
            }
            Err(stale) => {
                debug!(%stale, "discarding outcome of superseded submission");
                SubmitOutcome::Superseded
            }
        }
    }

    /// Downloads the artifact of the last successful analysis and hands it to
    /// the sink. Never changes the session phase.
    pub async fn retrieve_artifact(&self) -> Result<PathBuf, SessionError> {
        let result = self.fetch_and_save().await;
        match &result {
            Ok(path) => {
                self.notify(Notification::success(format!(
                    "Saved artifact to {}",
                    path.display()
                )));
            }
            Err(error) => {
                warn!(
                    error = %error,
                    reason = error.reason().unwrap_or_default(),
                    "artifact retrieval failed"
                );
                self.notify(Notification::error(error));
            }
        }
        result
    }

    async fn fetch_and_save(&self) -> Result<PathBuf, SessionError> {
        let artifact = self
            .session
            .lock()
            .await
            .artifact_ref()
            .cloned()
            .ok_or(SessionError::NoArtifact)?;

        let bytes = self
            .transport
            .fetch_artifact(&artifact)
            .await
            .map_err(|err| SessionError::DownloadTransportFailure {
                reason: describe_transport_error(&err),
            })?;

        self.sink
            .save(artifact.as_str(), &bytes)
            .await
            .map_err(|err| SessionError::ArtifactSaveFailure {
                name: artifact.to_string(),
                reason: err.to_string(),
            })
    }

    fn notify(&self, notification: Notification) {
        // no subscribers is fine
        let _ = self.notifications.send(notification);
    }
}

fn interpret_envelope(
    envelope: UploadEnvelope,
) -> Result<(AnalysisResult, ArtifactRef), SessionError> {
    if !envelope.is_success() {
        return Err(SessionError::logical(envelope.message));
    }
    if let Some(completed_at) = envelope.timestamp {
        debug!(%completed_at, "service reported completion time");
    }
    let artifact = envelope
        .artifact_ref()
        .ok_or_else(|| SessionError::InvalidResponse {
            reason: "success response without optimized_file".to_string(),
        })?;
    let result = envelope.data.ok_or_else(|| SessionError::InvalidResponse {
        reason: "success response without analysis data".to_string(),
    })?;
    Ok((result, artifact))
}

fn upload_error(err: TransportError) -> SessionError {
    match err {
        TransportError::Status { status, detail } => SessionError::http_status(status, detail),
        TransportError::NoResponse(reason) => SessionError::Unreachable { reason },
        TransportError::Construction(reason) => {
            SessionError::RequestConstructionFailure { reason }
        }
        TransportError::Decode(reason) => SessionError::InvalidResponse { reason },
    }
}

fn describe_transport_error(err: &TransportError) -> String {
    match err {
        TransportError::Status {
            detail: Some(detail),
            ..
        } => format!("{err}: {detail}"),
        _ => err.to_string(),
    }
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;

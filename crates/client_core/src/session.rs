//! Session state container.
//!
//! A [`Session`] only changes through its transition methods. Every upload is
//! tagged with an [`UploadTicket`]; completions carrying any ticket other than
//! the outstanding one are rejected so that an older request resolving late
//! can never overwrite the outcome of a newer one.

use shared::{domain::ArtifactRef, protocol::AnalysisResult};
use thiserror::Error;

use crate::error::SessionError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Uploading,
    Analyzed,
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct UploadTicket(u64);

impl UploadTicket {
    pub fn sequence(self) -> u64 {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("upload ticket {ticket:?} is no longer outstanding")]
pub struct StaleTicket {
    pub ticket: UploadTicket,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum SessionState {
    Idle,
    Uploading {
        ticket: UploadTicket,
    },
    Analyzed {
        result: AnalysisResult,
        artifact: ArtifactRef,
    },
    Failed {
        error: SessionError,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    state: SessionState,
    last_ticket: u64,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        Self {
            state: SessionState::Idle,
            last_ticket: 0,
        }
    }

    pub fn phase(&self) -> Phase {
        match self.state {
            SessionState::Idle => Phase::Idle,
            SessionState::Uploading { .. } => Phase::Uploading,
            SessionState::Analyzed { .. } => Phase::Analyzed,
            SessionState::Failed { .. } => Phase::Failed,
        }
    }

    pub fn result(&self) -> Option<&AnalysisResult> {
        match &self.state {
            SessionState::Analyzed { result, .. } => Some(result),
            _ => None,
        }
    }

    pub fn artifact_ref(&self) -> Option<&ArtifactRef> {
        match &self.state {
            SessionState::Analyzed { artifact, .. } => Some(artifact),
            _ => None,
        }
    }

    pub fn last_error(&self) -> Option<&SessionError> {
        match &self.state {
            SessionState::Failed { error } => Some(error),
            _ => None,
        }
    }

    /// True while an upload is outstanding; front ends should not offer a new
    /// submission in this phase.
    pub fn is_busy(&self) -> bool {
        matches!(self.state, SessionState::Uploading { .. })
    }

    pub fn outstanding_ticket(&self) -> Option<UploadTicket> {
        match self.state {
            SessionState::Uploading { ticket } => Some(ticket),
            _ => None,
        }
    }

    /// Enters `Uploading` from any phase, dropping any previous result or
    /// error. Any ticket issued before this call becomes stale.
    pub fn begin_upload(&mut self) -> UploadTicket {
        self.last_ticket += 1;
        let ticket = UploadTicket(self.last_ticket);
        self.state = SessionState::Uploading { ticket };
        ticket
    }

    pub fn complete(
        &mut self,
        ticket: UploadTicket,
        result: AnalysisResult,
        artifact: ArtifactRef,
    ) -> Result<(), StaleTicket> {
        self.ensure_outstanding(ticket)?;
        self.state = SessionState::Analyzed { result, artifact };
        Ok(())
    }

    pub fn fail(&mut self, ticket: UploadTicket, error: SessionError) -> Result<(), StaleTicket> {
        self.ensure_outstanding(ticket)?;
        self.state = SessionState::Failed { error };
        Ok(())
    }

    /// Owned copy for readers that must not hold the controller's lock.
    pub fn snapshot(&self) -> Session {
        self.clone()
    }

    fn ensure_outstanding(&self, ticket: UploadTicket) -> Result<(), StaleTicket> {
        if self.outstanding_ticket() == Some(ticket) {
            Ok(())
        } else {
            Err(StaleTicket { ticket })
        }
    }
}

#[cfg(test)]
#[path = "tests/session_tests.rs"]
mod tests;

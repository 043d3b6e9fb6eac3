//! Client side of the test-case quality analysis workflow: submit a mind-map
//! document, track the session it starts, present the scores, download the
//! generated optimization artifact.

pub mod controller;
pub mod error;
pub mod presenter;
pub mod session;
pub mod sink;
pub mod transport;

pub use controller::{Notification, NotificationLevel, SessionController, SubmitOutcome};
pub use error::SessionError;
pub use presenter::{present, Indicator, IndicatorKind, Percent, QualityReport};
pub use session::{Phase, Session, UploadTicket};
pub use sink::{ArtifactSink, FsArtifactSink};
pub use transport::{
    AnalysisTransport, HttpAnalysisTransport, TransportError, UploadFile, DEFAULT_UPLOAD_TIMEOUT,
};

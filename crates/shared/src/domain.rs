use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InvalidArtifactRef {
    #[error("artifact reference must not be empty")]
    Empty,
    #[error("artifact reference must not be a '.' or '..' path segment")]
    DotSegment,
}

/// Opaque name of a generated optimization artifact, as handed out by the
/// analysis service and echoed back on download.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ArtifactRef(String);

impl ArtifactRef {
    /// `.` and `..` are refused since they cannot be sent as a single URL
    /// path segment.
    pub fn new(raw: impl Into<String>) -> Result<Self, InvalidArtifactRef> {
        let raw = raw.into();
        match raw.as_str() {
            "" => Err(InvalidArtifactRef::Empty),
            "." | ".." => Err(InvalidArtifactRef::DotSegment),
            _ => Ok(Self(raw)),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ArtifactRef {
    type Error = InvalidArtifactRef;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ArtifactRef> for String {
    fn from(value: ArtifactRef) -> Self {
        value.0
    }
}

impl fmt::Display for ArtifactRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

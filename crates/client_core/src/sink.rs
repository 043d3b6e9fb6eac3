use std::{
    io,
    path::{Path, PathBuf},
};

use async_trait::async_trait;
use tracing::info;

/// Where downloaded artifacts end up on the user's machine.
#[async_trait]
pub trait ArtifactSink: Send + Sync {
    async fn save(&self, name: &str, bytes: &[u8]) -> io::Result<PathBuf>;
}

pub struct FsArtifactSink {
    dir: PathBuf,
}

impl FsArtifactSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Keeps only the final component of `name` so a reference handed out by
    /// the service can never write outside `dir`.
    pub fn target_path(&self, name: &str) -> io::Result<PathBuf> {
        let file_name = Path::new(name)
            .file_name()
            .filter(|n| !n.is_empty())
            .ok_or_else(|| {
                io::Error::new(
                    io::ErrorKind::InvalidInput,
                    format!("artifact name '{name}' has no usable file name"),
                )
            })?;
        Ok(self.dir.join(file_name))
    }
}

#[async_trait]
impl ArtifactSink for FsArtifactSink {
    async fn save(&self, name: &str, bytes: &[u8]) -> io::Result<PathBuf> {
        let path = self.target_path(name)?;
        tokio::fs::create_dir_all(&self.dir).await?;
        tokio::fs::write(&path, bytes).await?;
        info!(path = %path.display(), size_bytes = bytes.len(), "saved artifact");
        Ok(path)
    }
}

#[cfg(test)]
#[path = "tests/sink_tests.rs"]
mod tests;

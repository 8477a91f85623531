//! Local-filesystem blob source.

use std::io::ErrorKind;
use std::path::PathBuf;

use bytes::Bytes;

use crate::{BlobError, BlobSource};

/// Serves blobs from a directory on local disk.
///
/// The root must live outside any publicly served tree; this source is the
/// final fallback for self-hosted and development deployments.
pub struct LocalDiskSource {
    root: PathBuf,
}

impl LocalDiskSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

#[async_trait::async_trait]
impl BlobSource for LocalDiskSource {
    fn name(&self) -> &'static str {
        "local"
    }

    async fn fetch(&self, key: &str) -> Result<Option<Bytes>, BlobError> {
        let path = self.root.join(key);
        match tokio::fs::read(&path).await {
            Ok(data) => Ok(Some(Bytes::from(data))),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(BlobError::Io(err)),
        }
    }
}

//! Blob storage for protected book files.
//!
//! One logical file can live in two places: an object-storage bucket
//! (managed hosting) or a local directory outside any publicly served tree
//! (self-hosted / dev). [`BlobResolver`] hides the difference behind an
//! ordered provider list so callers never branch on deployment shape.

pub mod local;
pub mod resolver;
pub mod s3;

pub use local::LocalDiskSource;
pub use resolver::BlobResolver;
pub use s3::S3Source;

use bytes::Bytes;

/// Error type for blob source failures.
///
/// A missing object is not an error: sources report it as `Ok(None)` so the
/// resolver can fall through to the next provider.
#[derive(Debug, thiserror::Error)]
pub enum BlobError {
    /// The backing service rejected or failed the request.
    #[error("blob backend error: {0}")]
    Backend(String),

    /// Local filesystem failure other than a missing file.
    #[error("blob I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// A single place blobs can be fetched from.
#[async_trait::async_trait]
pub trait BlobSource: Send + Sync {
    /// Short name used in logs (`"s3"`, `"local"`).
    fn name(&self) -> &'static str;

    /// Fetch the object at `key`. `Ok(None)` means the source does not have
    /// it; errors mean the source could not answer.
    async fn fetch(&self, key: &str) -> Result<Option<Bytes>, BlobError>;
}

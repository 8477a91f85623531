//! Ordered multi-source blob resolution.

use bytes::Bytes;

use crate::{BlobError, BlobSource};

/// Tries an ordered list of blob sources until one has the object.
///
/// A source that errors is logged and skipped, so an object-storage outage
/// degrades to the local fallback instead of failing the download.
pub struct BlobResolver {
    sources: Vec<Box<dyn BlobSource>>,
}

impl BlobResolver {
    pub fn new(sources: Vec<Box<dyn BlobSource>>) -> Self {
        Self { sources }
    }

    /// Fetch `key` from the first source that has it. `Ok(None)` means no
    /// configured source holds the object.
    pub async fn resolve(&self, key: &str) -> Result<Option<Bytes>, BlobError> {
        for source in &self.sources {
            match source.fetch(key).await {
                Ok(Some(bytes)) => {
                    tracing::debug!(source = source.name(), key, size = bytes.len(), "Blob resolved");
                    return Ok(Some(bytes));
                }
                Ok(None) => {
                    tracing::debug!(source = source.name(), key, "Blob miss, trying next source");
                }
                Err(err) => {
                    tracing::warn!(
                        source = source.name(),
                        key,
                        error = %err,
                        "Blob source failed, trying next source",
                    );
                }
            }
        }
        Ok(None)
    }
}

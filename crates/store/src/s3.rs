//! S3 object-storage blob source.

use bytes::Bytes;

use crate::{BlobError, BlobSource};

/// Serves blobs from an S3 bucket.
pub struct S3Source {
    client: aws_sdk_s3::Client,
    bucket: String,
}

impl S3Source {
    /// Build a source against `bucket` using ambient AWS configuration
    /// (environment credentials, region, etc.).
    pub async fn from_env(bucket: impl Into<String>) -> Self {
        let config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
        Self {
            client: aws_sdk_s3::Client::new(&config),
            bucket: bucket.into(),
        }
    }

    pub fn new(client: aws_sdk_s3::Client, bucket: impl Into<String>) -> Self {
        Self {
            client,
            bucket: bucket.into(),
        }
    }
}

#[async_trait::async_trait]
impl BlobSource for S3Source {
    fn name(&self) -> &'static str {
        "s3"
    }

    async fn fetch(&self, key: &str) -> Result<Option<Bytes>, BlobError> {
        let result = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await;

        match result {
            Ok(output) => {
                let aggregated = output
                    .body
                    .collect()
                    .await
                    .map_err(|err| BlobError::Backend(err.to_string()))?;
                Ok(Some(aggregated.into_bytes()))
            }
            Err(err) => {
                let service_err = err.into_service_error();
                if service_err.is_no_such_key() {
                    Ok(None)
                } else {
                    Err(BlobError::Backend(service_err.to_string()))
                }
            }
        }
    }
}

use std::time::Duration;

use aws_sdk_s3::{
    Client,
    config::{BehaviorVersion, Credentials, Region},
    presigning::PresigningConfig,
    primitives::ByteStream,
};
use bytes::Bytes;
use tracing::instrument;

use crate::domain::{
    common::{ObjectStorageConfig, entities::app_errors::CoreError},
    storage::{entities::PresignedUrl, ports::ObjectStoragePort},
};

/// S3-compatible blob store holding scan photos in a single bucket.
#[derive(Clone)]
pub struct MinioObjectStorage {
    client: Client,
    bucket: String,
}

/// Endpoint with an explicit scheme and no trailing slash.
fn endpoint_url(endpoint: &str, use_ssl: bool) -> String {
    let endpoint = endpoint.trim_end_matches('/');
    if endpoint.starts_with("http://") || endpoint.starts_with("https://") {
        endpoint.to_string()
    } else if use_ssl {
        format!("https://{endpoint}")
    } else {
        format!("http://{endpoint}")
    }
}

fn classify(error_msg: &str) -> &'static str {
    if error_msg.contains("dispatch failure") {
        "HTTP client dispatch failure - check endpoint URL and network connectivity"
    } else if error_msg.contains("timeout") {
        "Request timeout - check network connection and MinIO server status"
    } else if error_msg.contains("connection") {
        "Connection error - check MinIO endpoint and network"
    } else {
        "Unknown error"
    }
}

impl MinioObjectStorage {
    pub fn new(config: ObjectStorageConfig) -> Self {
        let credentials = Credentials::new(
            &config.access_key,
            &config.secret_key,
            None,
            None,
            "pantrylens",
        );

        let endpoint = endpoint_url(&config.endpoint, config.use_ssl);

        tracing::info!(
            endpoint = %endpoint,
            region = %config.region,
            bucket = %config.bucket,
            "Initializing MinIO client"
        );

        let s3_config = aws_sdk_s3::Config::builder()
            .behavior_version(BehaviorVersion::latest())
            .region(Region::new(config.region.clone()))
            .credentials_provider(credentials)
            .endpoint_url(endpoint)
            .force_path_style(true)
            .build();

        Self {
            client: Client::from_conf(s3_config),
            bucket: config.bucket,
        }
    }

    /// Create the bucket when it does not exist yet.
    pub async fn ensure_bucket(&self) -> Result<(), CoreError> {
        if self
            .client
            .head_bucket()
            .bucket(&self.bucket)
            .send()
            .await
            .is_ok()
        {
            return Ok(());
        }

        tracing::info!(bucket = %self.bucket, "Creating bucket");
        self.client
            .create_bucket()
            .bucket(&self.bucket)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(error = %e, bucket = %self.bucket, "Failed to create bucket");
                CoreError::ObjectStorage(format!("Failed to create bucket: {e}"))
            })?;
        Ok(())
    }
}

impl ObjectStoragePort for MinioObjectStorage {
    #[instrument(skip(self, payload), fields(bucket = %self.bucket, size = payload.len()))]
    async fn put_object(
        &self,
        object_key: &str,
        payload: Bytes,
        content_type: &str,
    ) -> Result<(), CoreError> {
        let payload_size = payload.len();

        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(object_key)
            .content_type(content_type)
            .body(ByteStream::from(payload))
            .send()
            .await
            .map_err(|e| {
                let error_kind = classify(&e.to_string());
                tracing::error!(
                    error = %e,
                    error_kind = %error_kind,
                    object_key = %object_key,
                    payload_size = payload_size,
                    "Failed to upload object"
                );
                CoreError::ObjectStorage(format!("Failed to upload object: {e} ({error_kind})"))
            })?;

        tracing::info!(object_key = %object_key, "Object uploaded");
        Ok(())
    }

    #[instrument(skip(self), fields(bucket = %self.bucket))]
    async fn presign_get_url(
        &self,
        object_key: &str,
        expires_in: Duration,
    ) -> Result<PresignedUrl, CoreError> {
        let presigning_config = PresigningConfig::expires_in(expires_in)
            .map_err(|e| CoreError::ObjectStorage(format!("Invalid expiration: {e}")))?;

        let presigned_request = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(object_key)
            .presigned(presigning_config)
            .await
            .map_err(|e| {
                tracing::error!(
                    error = %e,
                    object_key = %object_key,
                    "Failed to generate presigned GET URL"
                );
                CoreError::ObjectStorage(format!("Failed to generate presigned URL: {e}"))
            })?;

        Ok(PresignedUrl {
            url: presigned_request.uri().to_string(),
            expires_in_seconds: expires_in.as_secs(),
        })
    }

    #[instrument(skip(self), fields(bucket = %self.bucket))]
    async fn delete_object(&self, object_key: &str) -> Result<(), CoreError> {
        self.client
            .delete_object()
            .bucket(&self.bucket)
            .key(object_key)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(error = %e, object_key = %object_key, "Failed to delete object");
                CoreError::ObjectStorage(format!("Failed to delete object: {e}"))
            })?;

        tracing::info!(object_key = %object_key, "Object deleted");
        Ok(())
    }
}

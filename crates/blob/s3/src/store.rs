use async_trait::async_trait;
use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::primitives::ByteStream;
use bytes::Bytes;
use futures::StreamExt;
use tokio_util::io::ReaderStream;
use tracing::{debug, error, info, instrument};

use stockroom_blob::{BlobError, BlobObject, BlobStore, classify_backend_error};

use crate::auth::build_client_config;
use crate::config::S3Config;

/// Objects are served as downloads rather than rendered inline.
const CONTENT_DISPOSITION: &str = "attachment";

/// S3-backed implementation of [`BlobStore`].
pub struct S3BlobStore {
    config: S3Config,
    client: aws_sdk_s3::Client,
}

impl std::fmt::Debug for S3BlobStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("S3BlobStore")
            .field("config", &self.config)
            .field("client", &"<S3Client>")
            .finish()
    }
}

impl S3BlobStore {
    /// Create a new `S3BlobStore` by building an AWS SDK client.
    pub async fn new(config: S3Config) -> Self {
        let client_config = build_client_config(&config).await;
        let client = aws_sdk_s3::Client::from_conf(client_config);
        Self { config, client }
    }

    /// Create an `S3BlobStore` with a pre-built client.
    pub fn with_client(config: S3Config, client: aws_sdk_s3::Client) -> Self {
        Self { config, client }
    }
}

#[async_trait]
impl BlobStore for S3BlobStore {
    fn base_url(&self) -> String {
        self.config.base_url()
    }

    #[instrument(skip(self, data), fields(bucket = %self.config.bucket, size = data.len()))]
    async fn put(&self, key: &str, content_type: &str, data: Bytes) -> Result<(), BlobError> {
        let content_length = i64::try_from(data.len()).unwrap_or(i64::MAX);
        debug!("uploading object to S3");

        self.client
            .put_object()
            .bucket(&self.config.bucket)
            .key(key)
            .content_type(content_type)
            .content_length(content_length)
            .content_disposition(CONTENT_DISPOSITION)
            .body(ByteStream::from(data))
            .send()
            .await
            .map_err(|e| {
                let message = DisplayErrorContext(&e).to_string();
                error!(error = %message, "S3 put_object failed");
                classify_backend_error(&message)
            })?;

        info!("S3 object uploaded");
        Ok(())
    }

    #[instrument(skip(self), fields(bucket = %self.config.bucket))]
    async fn get(&self, key: &str) -> Result<BlobObject, BlobError> {
        let output = self
            .client
            .get_object()
            .bucket(&self.config.bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| {
                let no_such_key = e.as_service_error().is_some_and(|s| s.is_no_such_key());
                let status_404 = e.raw_response().is_some_and(|r| r.status().as_u16() == 404);
                if no_such_key || status_404 {
                    debug!("S3 object not found");
                    return BlobError::NotFound(key.to_owned());
                }
                let message = DisplayErrorContext(&e).to_string();
                error!(error = %message, "S3 get_object failed");
                classify_backend_error(&message)
            })?;

        let content_type = output
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_owned();
        let content_length = output
            .content_length()
            .and_then(|len| u64::try_from(len).ok())
            .unwrap_or(0);

        let body = ReaderStream::new(output.body.into_async_read())
            .map(|chunk| chunk.map_err(|e| BlobError::Connection(e.to_string())))
            .boxed();

        debug!(content_length, "S3 object opened");
        Ok(BlobObject {
            content_type,
            content_length,
            body,
        })
    }

    #[instrument(skip(self), fields(bucket = %self.config.bucket))]
    async fn delete(&self, key: &str) -> Result<(), BlobError> {
        self.client
            .delete_object()
            .bucket(&self.config.bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| {
                let message = DisplayErrorContext(&e).to_string();
                error!(error = %message, "S3 delete_object failed");
                classify_backend_error(&message)
            })?;

        info!("S3 object deleted");
        Ok(())
    }
}

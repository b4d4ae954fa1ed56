use std::fmt;

use bytes::{Bytes, BytesMut};
use futures::stream::{self, BoxStream, StreamExt};

use crate::error::BlobError;

/// Streaming body of a blob.
pub type BlobBody = BoxStream<'static, Result<Bytes, BlobError>>;

/// A blob fetched from a store: its stored metadata plus a body stream.
pub struct BlobObject {
    /// MIME type recorded when the blob was written.
    pub content_type: String,
    /// Size in bytes as reported by the store.
    pub content_length: u64,
    /// The blob content.
    pub body: BlobBody,
}

impl fmt::Debug for BlobObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BlobObject")
            .field("content_type", &self.content_type)
            .field("content_length", &self.content_length)
            .field("body", &"<stream>")
            .finish()
    }
}

impl BlobObject {
    /// Wrap an in-memory buffer as a single-chunk object.
    pub fn from_bytes(content_type: impl Into<String>, data: Bytes) -> Self {
        Self {
            content_type: content_type.into(),
            content_length: data.len() as u64,
            body: stream::once(async move { Ok(data) }).boxed(),
        }
    }

    /// Drain the body into a contiguous buffer.
    pub async fn collect(mut self) -> Result<Bytes, BlobError> {
        let capacity = usize::try_from(self.content_length).unwrap_or(0);
        let mut buf = BytesMut::with_capacity(capacity);
        while let Some(chunk) = self.body.next().await {
            buf.extend_from_slice(&chunk?);
        }
        Ok(buf.freeze())
    }
}

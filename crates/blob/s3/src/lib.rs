//! S3-compatible [`BlobStore`](stockroom_blob::BlobStore) backend.
//!
//! Works with AWS S3 and with MinIO-style servers reached through an
//! endpoint override.

mod auth;
mod config;
mod store;

pub use auth::build_client_config;
pub use config::S3Config;
pub use store::S3BlobStore;

use serde::Deserialize;

/// Configuration for the blob store holding product images.
///
/// # Example
///
/// ```toml
/// [blob]
/// backend = "s3"
/// bucket = "products"
/// endpoint_url = "http://localhost:9000"
/// access_key = "minioadmin"
/// secret_key = "minioadmin"
/// ```
#[derive(Deserialize)]
pub struct BlobConfig {
    /// Which backend to use: `"memory"` or `"s3"`.
    #[serde(default = "default_backend")]
    pub backend: String,
    /// Bucket every image is written to.
    #[serde(default = "default_bucket")]
    pub bucket: String,
    /// Region for the S3 client. S3-compatible servers accept any value.
    #[serde(default = "default_region")]
    pub region: String,
    /// Endpoint override for S3-compatible servers.
    pub endpoint_url: Option<String>,
    /// Static access key. When unset the AWS environment chain is used.
    pub access_key: Option<String>,
    /// Static secret key, paired with `access_key`.
    pub secret_key: Option<String>,
    /// Address buckets as `endpoint/bucket`.
    #[serde(default = "default_force_path_style")]
    pub force_path_style: bool,
    /// Base for durable image URLs when clients reach the store through
    /// another host than `endpoint_url`.
    pub public_url: Option<String>,
}

impl Default for BlobConfig {
    fn default() -> Self {
        Self {
            backend: default_backend(),
            bucket: default_bucket(),
            region: default_region(),
            endpoint_url: None,
            access_key: None,
            secret_key: None,
            force_path_style: default_force_path_style(),
            public_url: None,
        }
    }
}

impl std::fmt::Debug for BlobConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BlobConfig")
            .field("backend", &self.backend)
            .field("bucket", &self.bucket)
            .field("region", &self.region)
            .field("endpoint_url", &self.endpoint_url)
            .field("access_key", &self.access_key)
            .field("secret_key", &self.secret_key.as_ref().map(|_| "[REDACTED]"))
            .field("force_path_style", &self.force_path_style)
            .field("public_url", &self.public_url)
            .finish()
    }
}

fn default_backend() -> String {
    "memory".to_owned()
}

fn default_bucket() -> String {
    "products".to_owned()
}

fn default_region() -> String {
    "us-east-1".to_owned()
}

fn default_force_path_style() -> bool {
    true
}

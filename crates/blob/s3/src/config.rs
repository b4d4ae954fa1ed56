use serde::{Deserialize, Serialize};

/// Configuration for the S3-compatible blob store.
///
/// Works against AWS S3 as well as MinIO and other S3-compatible servers
/// (set `endpoint_url` and keep `force_path_style` enabled).
#[derive(Clone, Serialize, Deserialize)]
pub struct S3Config {
    /// Region (e.g. `"us-east-1"`). MinIO accepts any value.
    pub region: String,

    /// Bucket every product image is written to.
    pub bucket: String,

    /// Endpoint override for S3-compatible servers (e.g. `http://localhost:9000`).
    #[serde(default)]
    pub endpoint_url: Option<String>,

    /// Static access key. When unset the standard AWS credential chain is used.
    #[serde(default)]
    pub access_key: Option<String>,

    /// Static secret key, paired with `access_key`.
    #[serde(default)]
    pub secret_key: Option<String>,

    /// Address buckets as `endpoint/bucket` instead of `bucket.endpoint`.
    #[serde(default = "default_force_path_style")]
    pub force_path_style: bool,

    /// Base used for durable references instead of `endpoint_url`, for
    /// deployments where clients reach the store through another host.
    #[serde(default)]
    pub public_url: Option<String>,
}

impl std::fmt::Debug for S3Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("S3Config")
            .field("region", &self.region)
            .field("bucket", &self.bucket)
            .field("endpoint_url", &self.endpoint_url)
            .field("access_key", &self.access_key)
            .field("secret_key", &self.secret_key.as_ref().map(|_| "[REDACTED]"))
            .field("force_path_style", &self.force_path_style)
            .field("public_url", &self.public_url)
            .finish()
    }
}

fn default_force_path_style() -> bool {
    true
}

impl S3Config {
    /// Create a new `S3Config` for `bucket` in `region`.
    pub fn new(region: impl Into<String>, bucket: impl Into<String>) -> Self {
        Self {
            region: region.into(),
            bucket: bucket.into(),
            endpoint_url: None,
            access_key: None,
            secret_key: None,
            force_path_style: default_force_path_style(),
            public_url: None,
        }
    }

    /// Set an endpoint URL override (MinIO, `LocalStack`).
    #[must_use]
    pub fn with_endpoint_url(mut self, endpoint_url: impl Into<String>) -> Self {
        self.endpoint_url = Some(endpoint_url.into());
        self
    }

    /// Use static credentials instead of the environment chain.
    #[must_use]
    pub fn with_credentials(
        mut self,
        access_key: impl Into<String>,
        secret_key: impl Into<String>,
    ) -> Self {
        self.access_key = Some(access_key.into());
        self.secret_key = Some(secret_key.into());
        self
    }

    /// Set the public base for durable references.
    #[must_use]
    pub fn with_public_url(mut self, public_url: impl Into<String>) -> Self {
        self.public_url = Some(public_url.into());
        self
    }

    /// Endpoint clients see: the public URL, the endpoint override, or the
    /// regional AWS endpoint, without a trailing slash.
    pub fn public_endpoint(&self) -> String {
        self.public_url
            .as_deref()
            .or(self.endpoint_url.as_deref())
            .map_or_else(
                || format!("https://s3.{}.amazonaws.com", self.region),
                |url| url.trim_end_matches('/').to_owned(),
            )
    }

    /// Base of every durable reference: `endpoint/bucket`.
    pub fn base_url(&self) -> String {
        format!("{}/{}", self.public_endpoint(), self.bucket)
    }
}

use aws_sdk_s3::config::Credentials;
use tracing::debug;

use crate::config::S3Config;

/// Build an S3 client configuration from the given [`S3Config`].
///
/// Uses static credentials when both keys are configured and the standard
/// AWS environment credential chain otherwise. An endpoint override switches
/// the client to the S3-compatible server it names.
pub async fn build_client_config(config: &S3Config) -> aws_sdk_s3::Config {
    let mut loader = aws_config::from_env().region(aws_config::Region::new(config.region.clone()));

    if let Some(endpoint) = &config.endpoint_url {
        debug!(endpoint = %endpoint, "using custom S3 endpoint");
        loader = loader.endpoint_url(endpoint);
    }

    if let (Some(access_key), Some(secret_key)) = (&config.access_key, &config.secret_key) {
        debug!("using static S3 credentials");
        loader = loader.credentials_provider(Credentials::new(
            access_key,
            secret_key,
            None,
            None,
            "stockroom-static",
        ));
    }

    let sdk_config = loader.load().await;

    aws_sdk_s3::config::Builder::from(&sdk_config)
        .force_path_style(config.force_path_style)
        .build()
}

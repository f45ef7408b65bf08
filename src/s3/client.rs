use crate::config::StoreConfig;
use crate::errors::{GifshareError, Result};
use crate::s3::models::S3Backend;
use crate::utils::log_utils::{Logger, mask_secret};
use aws_config::retry::RetryConfig;
use aws_credential_types::Credentials;
use aws_sdk_s3::Client;
use aws_sdk_s3::config::{BehaviorVersion, Region};

impl S3Backend {
    /// Create a client for the bucket described by `config`
    pub fn new(config: &StoreConfig, logger: Logger) -> Result<Self> {
        logger.debug("Creating S3 client with these parameters:");
        logger.debug(&format!("Bucket: {}", config.bucket));
        logger.debug(&format!("Region: {}", config.region));
        if let Some(endpoint) = &config.endpoint {
            logger.debug(&format!("Endpoint: {}", endpoint));
        }
        logger.debug(&format!("Key ID: {}", mask_secret(&config.access_id)));

        let credentials = Credentials::new(
            config.access_id.clone(),
            config.secret_access_key.clone(),
            None, // No session token
            None, // No expiry
            "GifshareStaticCredentials",
        );

        let mut builder = aws_sdk_s3::Config::builder()
            .region(Region::new(config.region.clone()))
            .credentials_provider(credentials)
            .retry_config(RetryConfig::standard().with_max_attempts(3))
            .behavior_version(BehaviorVersion::latest());

        // S3-compatible stores generally only support path-style addressing
        if let Some(endpoint) = &config.endpoint {
            builder = builder.endpoint_url(endpoint).force_path_style(true);
        }

        Self::from_client(
            Client::from_conf(builder.build()),
            &config.bucket,
            &config.region,
            logger,
        )
    }

    /// Wrap an already configured SDK client
    pub fn from_client(client: Client, bucket: &str, region: &str, logger: Logger) -> Result<Self> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| GifshareError::storage("runtime setup", e))?;

        Ok(Self {
            bucket_name: bucket.to_string(),
            region: region.to_string(),
            client,
            runtime,
            logger,
        })
    }
}

//! Object storage connection configuration.

use clap::Args;
use s3backup_opendal::{DEFAULT_REGION, S3Config};

use crate::TRACING_TARGET_CONFIG;

/// Object storage configuration.
///
/// # Environment Variables
///
/// - `S3_BUCKET` - Bucket holding the backups
/// - `AWS_DEFAULT_REGION` - Bucket region (default: us-east-1)
/// - `AWS_ENDPOINT_URL` - Endpoint for S3-compatible services (MinIO, R2)
/// - `AWS_ACCESS_KEY_ID` / `AWS_SECRET_ACCESS_KEY` - Static credentials
/// - `AWS_SESSION_TOKEN` - Session token for temporary credentials
///
/// # Examples
///
/// ```bash
/// s3backup --bucket backups list
///
/// AWS_ENDPOINT_URL=http://localhost:9000 S3_BUCKET=backups s3backup list
/// ```
#[derive(Debug, Clone, Args)]
#[must_use = "config does nothing unless you use it"]
pub struct StorageConfig {
    /// Bucket name.
    #[arg(long, env = "S3_BUCKET", global = true)]
    pub bucket: Option<String>,

    /// Bucket region.
    #[arg(long, env = "AWS_DEFAULT_REGION", global = true, default_value = DEFAULT_REGION)]
    pub region: String,

    /// Custom endpoint URL for S3-compatible storage.
    #[arg(long, env = "AWS_ENDPOINT_URL", global = true)]
    pub endpoint: Option<String>,

    /// Access key ID.
    #[arg(long, env = "AWS_ACCESS_KEY_ID", global = true, hide_env_values = true)]
    pub access_key_id: Option<String>,

    /// Secret access key.
    #[arg(long, env = "AWS_SECRET_ACCESS_KEY", global = true, hide_env_values = true)]
    pub secret_access_key: Option<String>,

    /// Session token for temporary credentials.
    #[arg(long, env = "AWS_SESSION_TOKEN", global = true, hide_env_values = true)]
    pub session_token: Option<String>,
}

impl StorageConfig {
    /// Converts the arguments into a validated backend configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if no bucket is given or the resulting
    /// configuration is invalid.
    pub fn to_s3_config(&self) -> anyhow::Result<S3Config> {
        let bucket = self
            .bucket
            .as_deref()
            .filter(|bucket| !bucket.trim().is_empty())
            .ok_or_else(|| anyhow::anyhow!("missing bucket: pass --bucket or set S3_BUCKET"))?;

        let mut config = S3Config::new(bucket, &self.region);

        if let Some(ref endpoint) = self.endpoint {
            config = config.with_endpoint(endpoint);
        }

        if let (Some(id), Some(secret)) = (&self.access_key_id, &self.secret_access_key) {
            config = config.with_credentials(id, secret);
        } else {
            config.access_key_id.clone_from(&self.access_key_id);
            config.secret_access_key.clone_from(&self.secret_access_key);
        }

        if let Some(ref session_token) = self.session_token {
            config = config.with_session_token(session_token);
        }

        config.validate()?;
        Ok(config)
    }

    /// Logs storage configuration at debug level (no secrets).
    pub fn log(&self) {
        tracing::debug!(
            target: TRACING_TARGET_CONFIG,
            bucket = ?self.bucket,
            region = %self.region,
            endpoint = ?self.endpoint,
            static_credentials = self.access_key_id.is_some(),
            session_token = self.session_token.is_some(),
            "Storage configuration"
        );
    }
}

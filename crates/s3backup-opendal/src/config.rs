//! S3 storage configuration.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{StorageError, StorageResult};

/// Region used when none is configured.
pub const DEFAULT_REGION: &str = "us-east-1";

/// Amazon S3 (or S3-compatible) configuration.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct S3Config {
    /// Bucket name.
    pub bucket: String,
    /// AWS region.
    #[serde(default = "default_region")]
    pub region: String,
    /// Custom endpoint URL (for S3-compatible storage like MinIO, R2).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
    /// Access key ID.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access_key_id: Option<String>,
    /// Secret access key.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secret_access_key: Option<String>,
    /// Session token for temporary credentials.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_token: Option<String>,
}

fn default_region() -> String {
    DEFAULT_REGION.to_owned()
}

impl S3Config {
    /// Creates a new S3 configuration.
    pub fn new(bucket: impl Into<String>, region: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            region: region.into(),
            endpoint: None,
            access_key_id: None,
            secret_access_key: None,
            session_token: None,
        }
    }

    /// Sets the custom endpoint (for S3-compatible storage).
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Sets the access credentials.
    pub fn with_credentials(
        mut self,
        access_key_id: impl Into<String>,
        secret_access_key: impl Into<String>,
    ) -> Self {
        self.access_key_id = Some(access_key_id.into());
        self.secret_access_key = Some(secret_access_key.into());
        self
    }

    /// Sets the session token.
    pub fn with_session_token(mut self, session_token: impl Into<String>) -> Self {
        self.session_token = Some(session_token.into());
        self
    }

    /// Returns whether static credentials are configured.
    pub fn has_credentials(&self) -> bool {
        self.access_key_id.is_some() && self.secret_access_key.is_some()
    }

    /// Validates the configuration before any remote call is made.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Init`] if the bucket or region is empty, the
    /// endpoint is not an `http(s)` URL, or only half of the key pair is set.
    pub fn validate(&self) -> StorageResult<()> {
        if self.bucket.trim().is_empty() {
            return Err(StorageError::init("bucket name must not be empty"));
        }

        if self.region.trim().is_empty() {
            return Err(StorageError::init("region must not be empty"));
        }

        if let Some(ref endpoint) = self.endpoint {
            let url = url::Url::parse(endpoint)
                .map_err(|e| StorageError::init(format!("invalid endpoint '{endpoint}': {e}")))?;

            if !matches!(url.scheme(), "http" | "https") {
                return Err(StorageError::init(format!(
                    "endpoint '{endpoint}' must use http or https"
                )));
            }
        }

        match (&self.access_key_id, &self.secret_access_key) {
            (Some(_), None) | (None, Some(_)) => Err(StorageError::init(
                "access key id and secret access key must be provided together",
            )),
            _ => Ok(()),
        }
    }
}

impl fmt::Debug for S3Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("S3Config")
            .field("bucket", &self.bucket)
            .field("region", &self.region)
            .field("endpoint", &self.endpoint)
            .field("has_credentials", &self.has_credentials())
            .field("has_session_token", &self.session_token.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_minimal_config() {
        assert!(S3Config::new("backups", DEFAULT_REGION).validate().is_ok());
    }

    #[test]
    fn rejects_empty_bucket_and_region() {
        assert!(S3Config::new("  ", "eu-west-1").validate().is_err());
        assert!(S3Config::new("backups", "").validate().is_err());
    }

    #[test]
    fn endpoint_must_be_http_url() {
        let config = S3Config::new("backups", "auto").with_endpoint("http://localhost:9000");
        assert!(config.validate().is_ok());

        let config = S3Config::new("backups", "auto").with_endpoint("localhost:9000");
        assert!(config.validate().is_err());

        let config = S3Config::new("backups", "auto").with_endpoint("ftp://example.com");
        assert!(config.validate().is_err());
    }

    #[test]
    fn credentials_come_in_pairs() {
        let mut config = S3Config::new("backups", "auto").with_credentials("id", "secret");
        assert!(config.validate().is_ok());

        config.secret_access_key = None;
        assert!(config.validate().is_err());
    }

    #[test]
    fn debug_hides_secrets() {
        let config = S3Config::new("backups", "auto")
            .with_credentials("AKIDEXAMPLE", "very-secret")
            .with_session_token("token");
        let debug = format!("{config:?}");

        assert!(!debug.contains("very-secret"));
        assert!(!debug.contains("AKIDEXAMPLE"));
        assert!(debug.contains("has_credentials: true"));
    }

    #[test]
    fn deserializes_with_default_region() {
        let config: S3Config = serde_json::from_str(r#"{"bucket":"backups"}"#).unwrap();
        assert_eq!(config.region, DEFAULT_REGION);
        assert_eq!(config.endpoint, None);
    }
}

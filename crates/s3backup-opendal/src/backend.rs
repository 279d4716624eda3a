//! Storage backend implementation.

use std::collections::HashMap;

use async_trait::async_trait;
use bytes::Bytes;
use futures::TryStreamExt;
use opendal::{Entry, Metadata, Operator, services};
use s3backup_core::{ObjectHead, ObjectRecord, ObjectStore};

use crate::TRACING_TARGET;
use crate::config::S3Config;
use crate::error::{StorageError, StorageResult};

/// S3 storage backend that wraps an OpenDAL operator.
///
/// Keys are resolved relative to the bucket root.
#[derive(Clone)]
pub struct StorageBackend {
    operator: Operator,
    config: S3Config,
}

impl StorageBackend {
    /// Creates a new storage backend from configuration.
    ///
    /// No request is sent; connectivity problems surface on the first call.
    pub fn new(config: S3Config) -> StorageResult<Self> {
        config.validate()?;
        let operator = Self::create_operator(&config)?;

        tracing::debug!(
            target: TRACING_TARGET,
            bucket = %config.bucket,
            region = %config.region,
            endpoint = ?config.endpoint,
            static_credentials = config.has_credentials(),
            "Storage backend initialized"
        );

        Ok(Self { operator, config })
    }

    /// Returns the configuration for this backend.
    pub fn config(&self) -> &S3Config {
        &self.config
    }

    /// Creates an OpenDAL S3 operator based on configuration.
    fn create_operator(config: &S3Config) -> StorageResult<Operator> {
        let mut builder = services::S3::default()
            .bucket(&config.bucket)
            .region(&config.region)
            .root("/");

        if let Some(ref endpoint) = config.endpoint {
            builder = builder.endpoint(endpoint);
        }

        if let Some(ref access_key_id) = config.access_key_id {
            builder = builder.access_key_id(access_key_id);
        }

        if let Some(ref secret_access_key) = config.secret_access_key {
            builder = builder.secret_access_key(secret_access_key);
        }

        if let Some(ref session_token) = config.session_token {
            builder = builder.session_token(session_token);
        }

        Operator::new(builder)
            .map(|op| op.finish())
            .map_err(|e| StorageError::init(e.to_string()))
    }

    /// Converts a listing entry into an object record.
    fn record(entry: &Entry) -> ObjectRecord {
        let meta = entry.metadata();
        ObjectRecord::new(entry.path(), meta.content_length(), last_modified(meta))
    }
}

/// Converts the OpenDAL modification time into a jiff timestamp.
///
/// Sub-second precision is kept so uploads within the same second still
/// order correctly during retention.
fn last_modified(meta: &Metadata) -> Option<jiff::Timestamp> {
    meta.last_modified().and_then(|dt| {
        let nanos = i32::try_from(dt.timestamp_subsec_nanos()).ok()?;
        jiff::Timestamp::new(dt.timestamp(), nanos).ok()
    })
}

#[async_trait]
impl ObjectStore for StorageBackend {
    fn bucket(&self) -> &str {
        &self.config.bucket
    }

    async fn list(&self, prefix: &str) -> s3backup_core::Result<Vec<ObjectRecord>> {
        tracing::debug!(
            target: TRACING_TARGET,
            prefix = %prefix,
            "Listing objects"
        );

        let entries: Vec<Entry> = self
            .operator
            .lister_with(prefix)
            .recursive(true)
            .await
            .map_err(StorageError::from)?
            .try_collect()
            .await
            .map_err(StorageError::from)?;

        let records: Vec<_> = entries
            .iter()
            .filter(|entry| !entry.metadata().is_dir())
            .map(Self::record)
            .collect();

        tracing::debug!(
            target: TRACING_TARGET,
            prefix = %prefix,
            count = records.len(),
            "Listing complete"
        );

        Ok(records)
    }

    async fn head(&self, key: &str) -> s3backup_core::Result<ObjectHead> {
        tracing::debug!(
            target: TRACING_TARGET,
            key = %key,
            "Fetching object metadata"
        );

        let meta = self.operator.stat(key).await.map_err(StorageError::from)?;
        let user_metadata = meta.user_metadata().cloned().unwrap_or_default();

        Ok(ObjectHead::new(user_metadata))
    }

    async fn put(
        &self,
        key: &str,
        body: Bytes,
        metadata: HashMap<String, String>,
    ) -> s3backup_core::Result<()> {
        let size = body.len();
        tracing::debug!(
            target: TRACING_TARGET,
            key = %key,
            size,
            "Writing object"
        );

        self.operator
            .write_with(key, body)
            .user_metadata(metadata)
            .await
            .map_err(StorageError::from)?;

        tracing::debug!(
            target: TRACING_TARGET,
            key = %key,
            "Object write complete"
        );

        Ok(())
    }

    async fn delete(&self, key: &str) -> s3backup_core::Result<()> {
        tracing::debug!(
            target: TRACING_TARGET,
            key = %key,
            "Deleting object"
        );

        self.operator.delete(key).await.map_err(StorageError::from)?;

        tracing::debug!(
            target: TRACING_TARGET,
            key = %key,
            "Object deleted"
        );

        Ok(())
    }
}

impl std::fmt::Debug for StorageBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StorageBackend")
            .field("bucket", &self.config.bucket)
            .field("region", &self.config.region)
            .field("endpoint", &self.config.endpoint)
            .finish()
    }
}

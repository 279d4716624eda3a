//! Object store abstraction used by the backup commands.

use std::collections::HashMap;

use async_trait::async_trait;
use bytes::Bytes;

use crate::Result;
use crate::object::{ObjectHead, ObjectRecord};

/// The four object-storage calls the backup commands are built from.
///
/// Implementations address objects by key relative to the bucket root and
/// must not retry: the first failure is returned to the caller.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Returns the bucket this store operates on.
    fn bucket(&self) -> &str;

    /// Lists every object whose key starts with `prefix`, in key order.
    ///
    /// An empty prefix lists the whole bucket.
    async fn list(&self, prefix: &str) -> Result<Vec<ObjectRecord>>;

    /// Fetches the user metadata of a single object.
    async fn head(&self, key: &str) -> Result<ObjectHead>;

    /// Uploads `body` under `key` with the given user metadata.
    async fn put(&self, key: &str, body: Bytes, metadata: HashMap<String, String>) -> Result<()>;

    /// Deletes the object stored under `key`.
    async fn delete(&self, key: &str) -> Result<()>;
}

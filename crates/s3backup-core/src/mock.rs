//! In-memory object store for testing.
//!
//! This module is only available when the `test-utils` feature is enabled:
//!
//! ```toml
//! [dev-dependencies]
//! s3backup-core = { version = "...", features = ["test-utils"] }
//! ```

use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use bytes::Bytes;
use jiff::Timestamp;
use tokio::sync::Mutex;

use crate::object::{ObjectHead, ObjectRecord};
use crate::store::ObjectStore;
use crate::{Error, Result};

/// A stored object.
#[derive(Debug, Clone)]
pub struct MemoryObject {
    /// Object body.
    pub body: Bytes,
    /// Last modification time.
    pub last_modified: Timestamp,
    /// User metadata.
    pub user_metadata: HashMap<String, String>,
}

/// [`ObjectStore`] backed by a sorted map.
///
/// Uploads are stamped with the current time; use [`MemoryStore::insert`]
/// to seed objects with explicit timestamps.
#[derive(Debug, Default)]
pub struct MemoryStore {
    bucket: String,
    objects: Mutex<BTreeMap<String, MemoryObject>>,
}

impl MemoryStore {
    /// Creates an empty store for `bucket`.
    pub fn new(bucket: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            objects: Mutex::default(),
        }
    }

    /// Inserts an object directly, bypassing [`ObjectStore::put`].
    pub async fn insert(
        &self,
        key: impl Into<String>,
        body: impl Into<Bytes>,
        last_modified: Timestamp,
        user_metadata: HashMap<String, String>,
    ) {
        let object = MemoryObject {
            body: body.into(),
            last_modified,
            user_metadata,
        };
        self.objects.lock().await.insert(key.into(), object);
    }

    /// Returns a copy of the object stored under `key`.
    pub async fn get(&self, key: &str) -> Option<MemoryObject> {
        self.objects.lock().await.get(key).cloned()
    }

    /// Returns every stored key in order.
    pub async fn keys(&self) -> Vec<String> {
        self.objects.lock().await.keys().cloned().collect()
    }
}

#[async_trait]
impl ObjectStore for MemoryStore {
    fn bucket(&self) -> &str {
        &self.bucket
    }

    async fn list(&self, prefix: &str) -> Result<Vec<ObjectRecord>> {
        let objects = self.objects.lock().await;
        let records = objects
            .iter()
            .filter(|(key, _)| key.starts_with(prefix))
            .map(|(key, object)| {
                ObjectRecord::new(
                    key.clone(),
                    object.body.len() as u64,
                    Some(object.last_modified),
                )
            })
            .collect();

        Ok(records)
    }

    async fn head(&self, key: &str) -> Result<ObjectHead> {
        let objects = self.objects.lock().await;
        let object = objects
            .get(key)
            .ok_or_else(|| Error::not_found().with_message(key.to_owned()))?;

        Ok(ObjectHead::new(object.user_metadata.clone()))
    }

    async fn put(&self, key: &str, body: Bytes, metadata: HashMap<String, String>) -> Result<()> {
        self.insert(key, body, Timestamp::now(), metadata).await;
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<()> {
        self.objects.lock().await.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;
    use crate::object::group_metadata;

    #[tokio::test]
    async fn put_list_head_delete() {
        let store = MemoryStore::new("bucket");
        store
            .put("daily/a.tar", Bytes::from_static(b"abc"), group_metadata("db"))
            .await
            .unwrap();
        store
            .put("weekly/b.tar", Bytes::from_static(b"x"), HashMap::new())
            .await
            .unwrap();

        let daily = store.list("daily/").await.unwrap();
        assert_eq!(daily.len(), 1);
        assert_eq!(daily[0].key, "daily/a.tar");
        assert_eq!(daily[0].size, 3);

        assert_eq!(store.list("").await.unwrap().len(), 2);
        assert_eq!(store.head("daily/a.tar").await.unwrap().group(), Some("db"));
        assert_eq!(store.head("weekly/b.tar").await.unwrap().group(), None);

        store.delete("daily/a.tar").await.unwrap();
        assert_eq!(store.keys().await, ["weekly/b.tar"]);
    }

    #[tokio::test]
    async fn head_of_missing_key_is_not_found() {
        let store = MemoryStore::new("bucket");
        let err = store.head("missing").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }
}

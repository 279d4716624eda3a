//! Remote object records and key helpers.

use std::collections::HashMap;
use std::path::{Component, Path};

use jiff::Timestamp;
use serde::Serialize;

/// User metadata entry holding the backup group label.
///
/// Object stores normalize metadata names to lower case, so the key is
/// stored and looked up in lower case.
pub const GROUP_METADATA_KEY: &str = "group";

/// An object as returned by a listing call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ObjectRecord {
    /// Object key relative to the bucket root.
    pub key: String,
    /// Object size in bytes.
    pub size: u64,
    /// Last modification time, if the backend reports one.
    pub last_modified: Option<Timestamp>,
}

impl ObjectRecord {
    /// Creates a new object record.
    pub fn new(key: impl Into<String>, size: u64, last_modified: Option<Timestamp>) -> Self {
        Self {
            key: key.into(),
            size,
            last_modified,
        }
    }
}

/// Result of a head call: the metadata attached to a single object.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ObjectHead {
    /// User-defined metadata, keyed by lower-case name.
    pub user_metadata: HashMap<String, String>,
}

impl ObjectHead {
    /// Creates a head from a user metadata map.
    pub fn new(user_metadata: HashMap<String, String>) -> Self {
        Self { user_metadata }
    }

    /// Returns the group label, if the object carries one.
    pub fn group(&self) -> Option<&str> {
        self.user_metadata
            .get(GROUP_METADATA_KEY)
            .map(String::as_str)
    }
}

/// Builds the user metadata stored alongside an uploaded backup.
pub fn group_metadata(group: &str) -> HashMap<String, String> {
    HashMap::from([(GROUP_METADATA_KEY.to_owned(), group.to_owned())])
}

/// Joins a destination prefix and a local path into an object key.
///
/// The result is lexically cleaned: `.` components are dropped, `..`
/// removes the preceding component, and the key never starts with `/`.
pub fn object_key(destination: &str, path: &Path) -> String {
    let mut parts: Vec<String> = Vec::new();

    for segment in destination.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                parts.pop();
            }
            name => parts.push(name.to_owned()),
        }
    }

    for component in path.components() {
        match component {
            Component::Normal(name) => parts.push(name.to_string_lossy().into_owned()),
            Component::ParentDir => {
                parts.pop();
            }
            Component::RootDir | Component::CurDir | Component::Prefix(_) => {}
        }
    }

    parts.join("/")
}

/// Normalizes a user supplied listing prefix.
///
/// Leading slashes are dropped so `/` and the empty string both address the
/// whole bucket, while a trailing slash is kept to scope to a directory.
pub fn normalize_prefix(prefix: &str) -> &str {
    prefix.trim_start_matches('/')
}

/// Formats an object address as `s3://<bucket>/<key>`.
pub fn object_url(bucket: &str, key: &str) -> String {
    format!("s3://{}/{}", bucket.trim_end_matches('/'), key.trim_start_matches('/'))
}

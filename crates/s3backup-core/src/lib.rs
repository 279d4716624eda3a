#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

/// Tracing target for local source discovery.
pub const TRACING_TARGET_SOURCE: &str = "s3backup_core::source";

mod error;
mod object;
mod retention;
mod size;
mod source;
mod store;

#[cfg(any(test, feature = "test-utils"))]
#[cfg_attr(docsrs, doc(cfg(feature = "test-utils")))]
pub mod mock;

#[doc(hidden)]
pub mod prelude;

pub use error::{BoxedError, Error, ErrorKind, Result};
pub use object::{
    GROUP_METADATA_KEY, ObjectHead, ObjectRecord, group_metadata, normalize_prefix, object_key,
    object_url,
};
pub use retention::select_expired;
pub use size::ByteSize;
pub use source::{SourceFile, expand_sources};
pub use store::ObjectStore;

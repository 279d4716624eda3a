#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

mod backend;
mod config;
mod error;

#[doc(hidden)]
pub mod prelude;

pub use backend::StorageBackend;
pub use config::{DEFAULT_REGION, S3Config};
pub use error::{StorageError, StorageResult};

/// Tracing target for storage operations.
pub const TRACING_TARGET: &str = "s3backup_opendal";

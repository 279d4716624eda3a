//! Prelude module for convenient imports.

pub use crate::error::{Error, ErrorKind, Result};
pub use crate::object::{ObjectHead, ObjectRecord};
pub use crate::size::ByteSize;
pub use crate::store::ObjectStore;

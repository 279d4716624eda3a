//! Storage error types.

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Errors that can occur during storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// Failed to initialize the storage backend.
    #[error("storage initialization failed: {0}")]
    Init(String),

    /// Object not found.
    #[error("not found: {0}")]
    NotFound(String),

    /// Permission denied.
    #[error("permission denied: {0}")]
    PermissionDenied(String),

    /// Backend-specific error.
    #[error("backend error: {0}")]
    Backend(opendal::Error),
}

impl StorageError {
    /// Creates a new initialization error.
    pub fn init(msg: impl Into<String>) -> Self {
        Self::Init(msg.into())
    }
}

impl From<opendal::Error> for StorageError {
    fn from(err: opendal::Error) -> Self {
        use opendal::ErrorKind;

        match err.kind() {
            ErrorKind::NotFound => Self::NotFound(err.to_string()),
            ErrorKind::PermissionDenied => Self::PermissionDenied(err.to_string()),
            ErrorKind::ConfigInvalid => Self::Init(err.to_string()),
            _ => Self::Backend(err),
        }
    }
}

impl From<StorageError> for s3backup_core::Error {
    fn from(err: StorageError) -> Self {
        use s3backup_core::Error;

        let base = match &err {
            StorageError::Init(_) => Error::configuration(),
            StorageError::NotFound(_) => Error::not_found(),
            StorageError::PermissionDenied(_) => Error::permission_denied(),
            StorageError::Backend(_) => Error::storage(),
        };

        base.with_message(err.to_string()).with_source(err)
    }
}

#[cfg(test)]
mod tests {
    use s3backup_core::ErrorKind;

    use super::*;

    #[test]
    fn opendal_kinds_are_classified() {
        let err = opendal::Error::new(opendal::ErrorKind::NotFound, "no such key");
        assert!(matches!(StorageError::from(err), StorageError::NotFound(_)));

        let err = opendal::Error::new(opendal::ErrorKind::PermissionDenied, "403");
        assert!(matches!(
            StorageError::from(err),
            StorageError::PermissionDenied(_)
        ));

        let err = opendal::Error::new(opendal::ErrorKind::Unexpected, "500");
        assert!(matches!(StorageError::from(err), StorageError::Backend(_)));
    }

    #[test]
    fn converts_into_core_error() {
        let err: s3backup_core::Error = StorageError::init("no bucket").into();
        assert_eq!(err.kind(), ErrorKind::Configuration);
        assert!(err.to_string().contains("no bucket"));

        let missing = opendal::Error::new(opendal::ErrorKind::NotFound, "a/b");
        let err: s3backup_core::Error = StorageError::from(missing).into();
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert_eq!(err.kind_str(), "not_found");
    }
}

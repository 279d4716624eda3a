//! Local backup source discovery.

use std::path::PathBuf;

use crate::{Error, Result, TRACING_TARGET_SOURCE};

/// A regular file selected for upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    /// Path as produced by the glob expansion.
    pub path: PathBuf,
    /// File size in bytes at discovery time.
    pub size: u64,
}

/// Expands a glob pattern into the files to upload.
///
/// Matches come back in lexicographic order. Every match is inspected
/// without following symlinks and directories are skipped. A pattern that
/// matches nothing yields an empty list.
///
/// # Errors
///
/// Returns [`ErrorKind::InvalidInput`] for a malformed pattern and an I/O
/// error if a match cannot be read or inspected.
///
/// [`ErrorKind::InvalidInput`]: crate::ErrorKind::InvalidInput
pub fn expand_sources(pattern: &str) -> Result<Vec<SourceFile>> {
    let paths = glob::glob(pattern).map_err(|err| {
        Error::invalid_input()
            .with_message(format!("invalid source pattern '{pattern}': {err}"))
            .with_source(err)
    })?;

    let mut sources = Vec::new();
    for entry in paths {
        let path = entry.map_err(|err| {
            let message = format!("cannot read {}: {err}", err.path().display());
            Error::from(err.into_error()).with_message(message)
        })?;

        let metadata = std::fs::symlink_metadata(&path)?;
        if metadata.is_dir() {
            tracing::debug!(
                target: TRACING_TARGET_SOURCE,
                path = %path.display(),
                "skipping directory"
            );
            continue;
        }

        sources.push(SourceFile {
            path,
            size: metadata.len(),
        });
    }

    Ok(sources)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;
    use crate::ErrorKind;

    fn pattern(dir: &tempfile::TempDir, glob: &str) -> String {
        dir.path().join(glob).to_string_lossy().into_owned()
    }

    #[test]
    fn expands_files_in_order_and_skips_directories() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("b.sql"), b"bb").unwrap();
        fs::write(dir.path().join("a.sql"), b"a").unwrap();
        fs::create_dir(dir.path().join("nested.sql")).unwrap();

        let sources = expand_sources(&pattern(&dir, "*.sql")).unwrap();

        let names: Vec<_> = sources
            .iter()
            .map(|s| s.path.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, ["a.sql", "b.sql"]);
        assert_eq!(sources[0].size, 1);
        assert_eq!(sources[1].size, 2);
    }

    #[test]
    fn filters_by_pattern() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("db.tar.gz"), b"x").unwrap();
        fs::write(dir.path().join("notes.txt"), b"x").unwrap();

        let sources = expand_sources(&pattern(&dir, "*.tar.gz")).unwrap();
        assert_eq!(sources.len(), 1);
        assert!(sources[0].path.ends_with("db.tar.gz"));
    }

    #[test]
    fn no_match_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let sources = expand_sources(&pattern(&dir, "*.bak")).unwrap();
        assert!(sources.is_empty());
    }

    #[test]
    fn literal_path_matches_single_file() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("dump.sql"), b"dump").unwrap();

        let sources = expand_sources(&pattern(&dir, "dump.sql")).unwrap();
        assert_eq!(sources.len(), 1);
        assert_eq!(sources[0].size, 4);
    }

    #[test]
    fn malformed_pattern_is_invalid_input() {
        let err = expand_sources("backups/[").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
    }
}

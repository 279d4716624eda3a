//! Create command - upload group-tagged backups.

use anyhow::Context;
use bytes::Bytes;
use clap::Args;
use s3backup_core::{
    ByteSize, ObjectStore, SourceFile, expand_sources, group_metadata, object_key, object_url,
};

use super::clean::{self, CleanArgs};
use crate::TRACING_TARGET_COMMAND;

/// Arguments for the create command.
#[derive(Debug, Clone, Args)]
pub struct CreateArgs {
    /// Glob pattern selecting the files to upload.
    #[arg(long, default_value = "*")]
    pub src: String,

    /// Group label stored with each upload.
    #[arg(long, default_value = "")]
    pub group: String,

    /// Destination prefix inside the bucket.
    #[arg(long, default_value = "/")]
    pub dst: String,

    /// Retire old backups of the group after uploading.
    #[arg(long)]
    pub clean: bool,

    /// Number of newest backups to keep when cleaning.
    #[arg(long, default_value_t = 0)]
    pub keep: usize,
}

impl CreateArgs {
    /// Returns the clean arguments matching this upload.
    fn clean_args(&self) -> CleanArgs {
        CleanArgs {
            group: self.group.clone(),
            keep: self.keep,
            dst: self.dst.clone(),
        }
    }
}

/// Execute the create command.
///
/// # Errors
///
/// Returns an error for an invalid pattern, an unreadable file, or the
/// first failed upload. When `--clean` is set, clean errors propagate too.
pub async fn execute(args: &CreateArgs, store: &dyn ObjectStore) -> anyhow::Result<()> {
    let sources = expand_sources(&args.src)
        .with_context(|| format!("failed to expand source pattern '{}'", args.src))?;

    if sources.is_empty() {
        tracing::warn!(
            target: TRACING_TARGET_COMMAND,
            pattern = %args.src,
            "no files matched the source pattern"
        );
    }

    for source in &sources {
        upload(store, source, args).await?;
    }

    if args.clean {
        clean::execute(&args.clean_args(), store).await?;
    }

    Ok(())
}

/// Uploads a single source file under the destination prefix.
async fn upload(
    store: &dyn ObjectStore,
    source: &SourceFile,
    args: &CreateArgs,
) -> anyhow::Result<()> {
    let key = object_key(&args.dst, &source.path);
    let url = object_url(store.bucket(), &key);
    let path = source.path.display();
    let size = ByteSize(source.size);

    tracing::info!(
        target: TRACING_TARGET_COMMAND,
        key = %key,
        bytes = source.size,
        group = %args.group,
        "upload {path} to {url} (size: {size}, group: {})",
        args.group
    );

    let body = tokio::fs::read(&source.path)
        .await
        .with_context(|| format!("failed to read {path}"))?;

    store
        .put(&key, Bytes::from(body), group_metadata(&args.group))
        .await
        .with_context(|| format!("failed to upload {path} to {url}"))
}

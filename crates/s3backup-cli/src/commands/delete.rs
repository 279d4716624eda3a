//! Delete command - remove everything under a prefix.

use anyhow::Context;
use clap::Args;
use s3backup_core::{ObjectStore, normalize_prefix};

use super::delete_object;

/// Arguments for the delete command.
#[derive(Debug, Clone, Args)]
pub struct DeleteArgs {
    /// Key prefix to delete; empty deletes the whole bucket.
    #[arg(long, default_value = "")]
    pub prefix: String,
}

/// Execute the delete command.
///
/// # Errors
///
/// Returns the listing failure or the first delete failure.
pub async fn execute(args: &DeleteArgs, store: &dyn ObjectStore) -> anyhow::Result<()> {
    let prefix = normalize_prefix(&args.prefix);
    let objects = store
        .list(prefix)
        .await
        .with_context(|| format!("failed to list objects under '{prefix}'"))?;

    for object in &objects {
        delete_object(store, object).await?;
    }

    Ok(())
}

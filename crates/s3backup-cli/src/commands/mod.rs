//! Backup commands.
//!
//! Every command is a linear sequence of object store calls. Calls are
//! awaited one at a time and the first failure aborts the command.

pub mod clean;
pub mod create;
pub mod delete;
pub mod list;

use anyhow::Context;
use clap::Subcommand;
use s3backup_core::{ByteSize, ObjectRecord, ObjectStore, object_url};

pub use self::clean::CleanArgs;
pub use self::create::CreateArgs;
pub use self::delete::DeleteArgs;
pub use self::list::ListArgs;
use crate::TRACING_TARGET_COMMAND;

/// CLI subcommands.
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Upload files matching a pattern as group-tagged backups.
    Create(CreateArgs),
    /// List objects under a prefix with their group.
    List(ListArgs),
    /// Retire the oldest backups of a group beyond a retention count.
    Clean(CleanArgs),
    /// Delete every object under a prefix.
    Delete(DeleteArgs),
}

impl Command {
    /// Returns the command name used in logs.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Create(_) => "create",
            Self::List(_) => "list",
            Self::Clean(_) => "clean",
            Self::Delete(_) => "delete",
        }
    }

    /// Runs the command against `store`.
    pub async fn execute(self, store: &dyn ObjectStore) -> anyhow::Result<()> {
        tracing::debug!(
            target: TRACING_TARGET_COMMAND,
            command = self.name(),
            bucket = store.bucket(),
            "Executing command"
        );

        match self {
            Self::Create(args) => create::execute(&args, store).await,
            Self::List(args) => list::execute(&args, store).await,
            Self::Clean(args) => clean::execute(&args, store).await,
            Self::Delete(args) => delete::execute(&args, store).await,
        }
    }
}

/// Deletes a single listed object, logging it first.
async fn delete_object(store: &dyn ObjectStore, object: &ObjectRecord) -> anyhow::Result<()> {
    let url = object_url(store.bucket(), &object.key);
    let size = ByteSize(object.size);

    tracing::info!(
        target: TRACING_TARGET_COMMAND,
        key = %object.key,
        bytes = object.size,
        "delete {url} (size: {size})"
    );

    store
        .delete(&object.key)
        .await
        .with_context(|| format!("failed to delete {url}"))
}

//! Clean command - retire old backups of a group.

use anyhow::Context;
use clap::Args;
use s3backup_core::{ObjectStore, normalize_prefix, select_expired};

use super::delete_object;
use crate::TRACING_TARGET_COMMAND;

/// Arguments for the clean command.
#[derive(Debug, Clone, Args)]
pub struct CleanArgs {
    /// Group whose backups are retired.
    #[arg(long, default_value = "")]
    pub group: String,

    /// Number of newest backups to keep.
    #[arg(long, default_value_t = 0)]
    pub keep: usize,

    /// Prefix the group's backups live under.
    #[arg(long = "dst", default_value = "/")]
    pub dst: String,
}

/// Execute the clean command.
///
/// Objects under the prefix are inspected one by one; those tagged with the
/// group are sorted oldest first and all but the newest `keep` are deleted.
///
/// # Errors
///
/// Returns the first listing, head or delete failure.
pub async fn execute(args: &CleanArgs, store: &dyn ObjectStore) -> anyhow::Result<()> {
    let prefix = normalize_prefix(&args.dst);
    let objects = store
        .list(prefix)
        .await
        .with_context(|| format!("failed to list objects under '{prefix}'"))?;

    let mut grouped = Vec::new();
    for object in objects {
        let head = store
            .head(&object.key)
            .await
            .with_context(|| format!("failed to read metadata of '{}'", object.key))?;

        if head.group() == Some(args.group.as_str()) {
            grouped.push(object);
        }
    }

    let found = grouped.len();
    let expired = select_expired(grouped, args.keep);

    tracing::debug!(
        target: TRACING_TARGET_COMMAND,
        group = %args.group,
        keep = args.keep,
        found,
        expired = expired.len(),
        "Retention selection"
    );

    for object in &expired {
        delete_object(store, object).await?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use jiff::Timestamp;
    use s3backup_core::group_metadata;
    use s3backup_core::mock::MemoryStore;

    use super::*;

    fn at(second: i64) -> Timestamp {
        Timestamp::from_second(second).unwrap()
    }

    fn args(group: &str, keep: usize, dst: &str) -> CleanArgs {
        CleanArgs {
            group: group.to_owned(),
            keep,
            dst: dst.to_owned(),
        }
    }

    async fn seeded() -> MemoryStore {
        let store = MemoryStore::new("backups");
        let backups = [
            ("db/1.sql", 100),
            ("db/3.sql", 300),
            ("db/2.sql", 200),
            ("db/4.sql", 400),
        ];
        for (key, second) in backups {
            store.insert(key, "x", at(second), group_metadata("db")).await;
        }
        store.insert("db/web.tar", "x", at(50), group_metadata("web")).await;
        store.insert("db/untagged", "x", at(10), HashMap::new()).await;
        store.insert("other/old.sql", "x", at(1), group_metadata("db")).await;
        store
    }

    #[tokio::test]
    async fn keeps_newest_of_group() {
        let store = seeded().await;
        execute(&args("db", 2, "/db"), &store).await.unwrap();

        assert_eq!(
            store.keys().await,
            ["db/3.sql", "db/4.sql", "db/untagged", "db/web.tar", "other/old.sql"]
        );
    }

    #[tokio::test]
    async fn root_destination_spans_the_bucket() {
        let store = seeded().await;
        execute(&args("db", 1, "/"), &store).await.unwrap();

        assert_eq!(store.keys().await, ["db/4.sql", "db/untagged", "db/web.tar"]);
    }

    #[tokio::test]
    async fn keep_larger_than_group_deletes_nothing() {
        let store = seeded().await;
        execute(&args("db", 10, "/"), &store).await.unwrap();

        assert_eq!(store.keys().await.len(), 7);
    }

    #[tokio::test]
    async fn keep_zero_deletes_whole_group() {
        let store = seeded().await;
        execute(&args("web", 0, "/"), &store).await.unwrap();

        assert!(store.get("db/web.tar").await.is_none());
        assert_eq!(store.keys().await.len(), 6);
    }

    #[tokio::test]
    async fn unknown_group_deletes_nothing() {
        let store = seeded().await;
        execute(&args("missing", 0, "/"), &store).await.unwrap();

        assert_eq!(store.keys().await.len(), 7);
    }

    #[tokio::test]
    async fn empty_group_spares_untagged_objects() {
        let store = MemoryStore::new("backups");
        store.insert("tagged-empty", "x", at(10), group_metadata("")).await;
        store.insert("untagged", "x", at(5), HashMap::new()).await;

        execute(&args("", 0, "/"), &store).await.unwrap();

        assert_eq!(store.keys().await, ["untagged"]);
    }
}

//! List command - show objects with their group.

use anyhow::Context;
use clap::Args;
use comfy_table::Table;
use comfy_table::presets::NOTHING;
use jiff::Timestamp;
use s3backup_core::{ByteSize, ObjectStore, normalize_prefix};
use serde::Serialize;

/// Placeholder printed for a missing group or timestamp.
const MISSING: &str = "-";

/// Arguments for the list command.
#[derive(Debug, Clone, Args)]
pub struct ListArgs {
    /// Key prefix to list; empty lists the whole bucket.
    #[arg(long, default_value = "")]
    pub prefix: String,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,
}

/// Output format.
#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Aligned columns.
    #[default]
    Table,
    /// JSON array.
    Json,
}

/// A listed object with its group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListRow {
    /// Object key.
    pub name: String,
    /// Last modification time.
    pub last_modified: Option<Timestamp>,
    /// Human readable size.
    pub size: String,
    /// Size in bytes.
    pub size_bytes: u64,
    /// Group label, if tagged.
    pub group: Option<String>,
}

/// Execute the list command.
///
/// # Errors
///
/// Returns the listing failure or the first head failure.
pub async fn execute(args: &ListArgs, store: &dyn ObjectStore) -> anyhow::Result<()> {
    let rows = collect_rows(&args.prefix, store).await?;
    println!("{}", render(&rows, args.format)?);
    Ok(())
}

/// Lists objects under `prefix` and fetches the group of each one.
async fn collect_rows(prefix: &str, store: &dyn ObjectStore) -> anyhow::Result<Vec<ListRow>> {
    let prefix = normalize_prefix(prefix);
    let objects = store
        .list(prefix)
        .await
        .with_context(|| format!("failed to list objects under '{prefix}'"))?;

    let mut rows = Vec::with_capacity(objects.len());
    for object in objects {
        let head = store
            .head(&object.key)
            .await
            .with_context(|| format!("failed to read metadata of '{}'", object.key))?;

        rows.push(ListRow {
            size: ByteSize(object.size).to_string(),
            size_bytes: object.size,
            group: head.group().map(str::to_owned),
            last_modified: object.last_modified,
            name: object.key,
        });
    }

    Ok(rows)
}

/// Renders rows in the requested format.
fn render(rows: &[ListRow], format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(rows)?),
        OutputFormat::Table => {
            let mut table = Table::new();
            table.load_preset(NOTHING);
            table.set_header(vec!["Name", "Last modified", "Size", "Group"]);

            for row in rows {
                table.add_row(vec![
                    row.name.clone(),
                    row.last_modified
                        .map_or_else(|| MISSING.to_owned(), |ts| ts.to_string()),
                    row.size.clone(),
                    row.group.clone().unwrap_or_else(|| MISSING.to_owned()),
                ]);
            }

            Ok(table.to_string())
        }
    }
}

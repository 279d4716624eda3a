//! CLI configuration management.
//!
//! ```text
//! Cli
//! ├── storage: StorageConfig  # Bucket, region, endpoint, credentials
//! └── command: Command        # create | list | clean | delete
//! ```
//!
//! All storage options can be provided via CLI arguments or environment
//! variables. Use `--help` to see all available options.
//!
//! # Example
//!
//! ```bash
//! # Upload nightly dumps and keep the 7 newest of the group
//! s3backup --bucket backups create --src 'dumps/*.sql.gz' --dst nightly \
//!          --group postgres --clean --keep 7
//!
//! # Or via environment variables
//! S3_BUCKET=backups s3backup list --prefix nightly/
//! ```

mod storage;

use std::process;

use anyhow::Context;
use clap::Parser;
use s3backup_opendal::S3Config;
pub use storage::StorageConfig;

use crate::commands::Command;
use crate::{TRACING_TARGET_CONFIG, TRACING_TARGET_STARTUP};

/// Complete CLI configuration.
#[derive(Debug, Clone, Parser)]
#[command(name = "s3backup")]
#[command(about = "Upload, list, retire and delete grouped backups in an S3 bucket")]
#[command(version)]
pub struct Cli {
    /// Object storage connection configuration.
    #[clap(flatten)]
    pub storage: StorageConfig,

    /// Command to execute.
    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Loads environment variables from .env file (if enabled) and parses CLI arguments.
    ///
    /// The .env file is loaded before clap parses arguments so its values
    /// can act as environment defaults.
    pub fn init() -> Self {
        Self::load_dotenv();
        Self::parse()
    }

    /// Loads environment variables from .env file if the dotenv feature is enabled.
    #[cfg(feature = "dotenv")]
    fn load_dotenv() {
        if let Err(err) = dotenvy::dotenv()
            && !err.not_found()
        {
            eprintln!("Warning: failed to load .env file: {err}");
        }
    }

    /// No-op when dotenv feature is disabled.
    #[cfg(not(feature = "dotenv"))]
    fn load_dotenv() {}

    /// Validates all configuration values and returns the storage configuration.
    pub fn validate(&self) -> anyhow::Result<S3Config> {
        self.storage
            .to_s3_config()
            .context("invalid storage configuration")
    }

    /// Logs configuration at debug level (no sensitive information).
    pub fn log(&self) {
        Self::log_build_info();
        self.storage.log();

        tracing::debug!(
            target: TRACING_TARGET_CONFIG,
            command = ?self.command,
            "Command configuration"
        );
    }

    /// Logs build information at debug level.
    fn log_build_info() {
        tracing::debug!(
            target: TRACING_TARGET_STARTUP,
            version = env!("CARGO_PKG_VERSION"),
            pid = process::id(),
            arch = std::env::consts::ARCH,
            os = std::env::consts::OS,
            features = ?Self::enabled_features(),
            "Build information"
        );
    }

    /// Returns a list of enabled compile-time features.
    fn enabled_features() -> Vec<&'static str> {
        [cfg!(feature = "dotenv").then_some("dotenv")]
            .into_iter()
            .flatten()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::list::OutputFormat;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args.iter().copied()).unwrap()
    }

    #[test]
    fn create_defaults() {
        let cli = parse(&["s3backup", "--bucket", "backups", "create"]);

        let Command::Create(args) = cli.command else {
            panic!("expected create command");
        };
        assert_eq!(args.src, "*");
        assert_eq!(args.dst, "/");
        assert_eq!(args.group, "");
        assert!(!args.clean);
        assert_eq!(args.keep, 0);
        assert_eq!(cli.storage.bucket.as_deref(), Some("backups"));
    }

    #[test]
    fn bucket_is_accepted_after_subcommand() {
        let cli = parse(&[
            "s3backup", "clean", "--group", "db", "--keep", "3", "--bucket", "archive",
        ]);

        assert_eq!(cli.storage.bucket.as_deref(), Some("archive"));
        let Command::Clean(args) = cli.command else {
            panic!("expected clean command");
        };
        assert_eq!(args.group, "db");
        assert_eq!(args.keep, 3);
        assert_eq!(args.dst, "/");
    }

    #[test]
    fn list_and_delete_prefix_default_to_whole_bucket() {
        let cli = parse(&["s3backup", "--bucket", "b", "list"]);
        let Command::List(args) = cli.command else {
            panic!("expected list command");
        };
        assert_eq!(args.prefix, "");
        assert!(matches!(args.format, OutputFormat::Table));

        let cli = parse(&["s3backup", "--bucket", "b", "delete", "--prefix", "tmp/"]);
        let Command::Delete(args) = cli.command else {
            panic!("expected delete command");
        };
        assert_eq!(args.prefix, "tmp/");
    }

    #[test]
    fn list_accepts_json_format() {
        let cli = parse(&["s3backup", "--bucket", "b", "list", "--format", "json"]);
        let Command::List(args) = cli.command else {
            panic!("expected list command");
        };
        assert!(matches!(args.format, OutputFormat::Json));
    }

    #[test]
    fn rejects_negative_keep() {
        assert!(Cli::try_parse_from(["s3backup", "clean", "--keep", "-1"]).is_err());
    }

    #[test]
    fn validate_builds_storage_config() {
        let cli = parse(&[
            "s3backup",
            "--bucket",
            "backups",
            "--region",
            "eu-central-1",
            "--endpoint",
            "http://localhost:9000",
            "--access-key-id",
            "id",
            "--secret-access-key",
            "secret",
            "delete",
        ]);

        let config = cli.validate().unwrap();
        assert_eq!(config.bucket, "backups");
        assert_eq!(config.region, "eu-central-1");
        assert_eq!(config.endpoint.as_deref(), Some("http://localhost:9000"));
        assert!(config.has_credentials());
    }

    #[test]
    fn validate_rejects_half_credentials() {
        let cli = parse(&[
            "s3backup",
            "--bucket",
            "backups",
            "--access-key-id",
            "id",
            "list",
        ]);
        assert!(cli.validate().is_err());
    }
}

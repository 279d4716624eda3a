#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

mod commands;
mod config;
mod telemetry;

use std::process;

use anyhow::Context;
use s3backup_opendal::StorageBackend;

use crate::config::Cli;

// Tracing target constants
pub const TRACING_TARGET_STARTUP: &str = "s3backup_cli::startup";
pub const TRACING_TARGET_SHUTDOWN: &str = "s3backup_cli::shutdown";
pub const TRACING_TARGET_CONFIG: &str = "s3backup_cli::config";
pub const TRACING_TARGET_COMMAND: &str = "s3backup_cli::command";

fn main() {
    let Err(error) = run() else {
        process::exit(0);
    };

    if tracing::enabled!(tracing::Level::ERROR) {
        let kind = error
            .downcast_ref::<s3backup_core::Error>()
            .map(s3backup_core::Error::kind_str);

        tracing::error!(
            target: TRACING_TARGET_SHUTDOWN,
            error = %format!("{error:#}"),
            kind,
            "command failed"
        );
    } else {
        eprintln!("Error: {error:#}");
    }

    process::exit(1);
}

/// Main application entry point.
fn run() -> anyhow::Result<()> {
    let cli = Cli::init();

    telemetry::init_tracing()?;
    cli.log();

    let config = cli.validate()?;
    let backend = StorageBackend::new(config).context("failed to create storage backend")?;

    // Calls are issued strictly one after another; a single thread suffices.
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to start async runtime")?;

    runtime.block_on(cli.command.execute(&backend))
}

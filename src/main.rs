// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

use anyhow::{Context, Result};
use clap::Parser;
use std::fmt::Write as _;
use std::path::Path;
use tracing::{debug, info, warn};
use zonesync::{
    config::{Cli, Command},
    constants::{ENV_LOG_FORMAT, TOKIO_WORKER_THREADS},
    metrics::gather_metrics,
    plan::Changes,
    provider::Route53Provider,
    route53::{
        client::Route53Client,
        signing::Credentials,
        Route53Api,
    },
};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Build Tokio runtime with custom thread names
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(TOKIO_WORKER_THREADS)
        .thread_name("zonesync")
        .enable_all()
        .build()?;

    runtime.block_on(async_main(cli))
}

async fn async_main(cli: Cli) -> Result<()> {
    init_logging();

    info!(command = ?cli.command, dry_run = cli.dry_run, "Starting zonesync");

    debug!(endpoint = %cli.endpoint_url, region = %cli.region, "Initializing Route 53 client");
    let credentials = Credentials::from_env().context("Failed to load AWS credentials")?;
    let client = Route53Client::new(&cli.endpoint_url, credentials, &cli.region)
        .context("Failed to create Route 53 client")?;
    let provider = Route53Provider::new(client, cli.provider_config());

    let result = run(&cli.command, &provider).await;

    if let Some(path) = &cli.metrics_file {
        write_metrics(path).await?;
    }

    print!("{}", result?);
    Ok(())
}

/// Initialize logging.
///
/// Respects `RUST_LOG` (default `info`) and `RUST_LOG_FORMAT` (`json` or `text`).
fn init_logging() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let log_format = std::env::var(ENV_LOG_FORMAT).unwrap_or_else(|_| "text".to_string());

    match log_format.to_lowercase().as_str() {
        "json" => {
            tracing_subscriber::fmt()
                .with_env_filter(env_filter)
                .with_file(true)
                .with_line_number(true)
                .with_thread_names(true)
                .with_target(false)
                .with_writer(std::io::stderr)
                .json()
                .init();
        }
        _ => {
            tracing_subscriber::fmt()
                .with_env_filter(env_filter)
                .with_file(true)
                .with_line_number(true)
                .with_thread_names(true)
                .with_target(false)
                .with_writer(std::io::stderr)
                .with_ansi(true)
                .compact()
                .init();
        }
    }
}

/// Run one subcommand and return what it prints on stdout.
async fn run<C: Route53Api>(command: &Command, provider: &Route53Provider<C>) -> Result<String> {
    let mut output = String::new();

    match command {
        Command::Apply { plan } => {
            let changes = Changes::load(plan).await?;
            let summary = provider.apply_changes(&changes).await?;

            for change in summary.changes() {
                writeln!(output, "{change}")?;
            }

            info!(
                zones = summary.batches.len(),
                submitted = summary.submitted_batches(),
                unmatched = summary.unmatched,
                limited = summary.limited,
                "Reconciliation finished"
            );
            if !summary.failed_zones.is_empty() {
                warn!(
                    failed_zones = ?summary.failed_zones,
                    "Some zones were not updated; they will be retried on the next run"
                );
            }
        }
        Command::Records => {
            let endpoints = provider.records().await?;
            output = serde_yaml::to_string(&endpoints).context("Failed to render records")?;
        }
        Command::Zones => {
            for zone in provider.zones().await? {
                writeln!(output, "{}\t{}\t{}", zone.id, zone.name, zone.zone_type)?;
            }
        }
    }

    Ok(output)
}

/// Write the metrics registry in Prometheus text format.
async fn write_metrics(path: &Path) -> Result<()> {
    let metrics = gather_metrics().context("Failed to gather metrics")?;
    tokio::fs::write(path, metrics)
        .await
        .with_context(|| format!("Failed to write metrics to {}", path.display()))?;
    debug!(path = %path.display(), "Metrics written");
    Ok(())
}

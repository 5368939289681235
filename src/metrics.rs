// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Prometheus metrics for zonesync.
//!
//! All metrics carry the `zonesync` namespace prefix and live in
//! [`METRICS_REGISTRY`]. zonesync runs as a one-shot job, so the CLI renders
//! the registry with [`gather_metrics`] into a textfile-collector file instead
//! of serving `/metrics`.
//!
//! # Metrics Categories
//!
//! - **Reconciliation Metrics** - Passes and their duration
//! - **Change Metrics** - Changes submitted and dropped
//! - **Batch Metrics** - Change batches by outcome
//!
//! # Example
//!
//! ```rust,no_run
//! use zonesync::metrics::{gather_metrics, record_batch, BATCH_OUTCOME_DRY_RUN};
//!
//! record_batch(BATCH_OUTCOME_DRY_RUN);
//! println!("{}", gather_metrics().unwrap());
//! ```

use crate::changes::Change;
use prometheus::{CounterVec, Encoder, HistogramOpts, HistogramVec, Opts, Registry, TextEncoder};
use std::sync::LazyLock;
use std::time::Duration;

// ============================================================================
// Metric Name Constants
// ============================================================================

/// Namespace prefix for all zonesync metrics
const METRICS_NAMESPACE: &str = "zonesync";

/// Batch was accepted by Route 53
pub const BATCH_OUTCOME_SUBMITTED: &str = "submitted";

/// Batch was rejected or could not be sent
pub const BATCH_OUTCOME_FAILED: &str = "failed";

/// Batch was only logged
pub const BATCH_OUTCOME_DRY_RUN: &str = "dry_run";

/// Change had no owning hosted zone
pub const DROP_REASON_NO_ZONE: &str = "no_zone";

/// Change did not fit into its zone's batch
pub const DROP_REASON_LIMIT: &str = "limit";

// ============================================================================
// Global Metrics Registry
// ============================================================================

/// Global Prometheus metrics registry
pub static METRICS_REGISTRY: LazyLock<Registry> = LazyLock::new(Registry::new);

fn register_counter_vec(name: &str, help: &str, labels: &[&str]) -> CounterVec {
    let opts = Opts::new(format!("{METRICS_NAMESPACE}_{name}"), help);
    let counter = CounterVec::new(opts, labels).unwrap_or_else(|e| panic!("invalid metric {name}: {e}"));
    METRICS_REGISTRY
        .register(Box::new(counter.clone()))
        .unwrap_or_else(|e| panic!("failed to register metric {name}: {e}"));
    counter
}

// ============================================================================
// Reconciliation Metrics
// ============================================================================

/// Total number of reconciliation passes by status
///
/// Labels:
/// - `status`: Outcome (`success`, `error`)
pub static RECONCILIATIONS_TOTAL: LazyLock<CounterVec> = LazyLock::new(|| {
    register_counter_vec(
        "reconciliations_total",
        "Total number of reconciliation passes by status",
        &["status"],
    )
});

/// Duration of reconciliation passes in seconds
pub static RECONCILIATION_DURATION_SECONDS: LazyLock<HistogramVec> = LazyLock::new(|| {
    let name = "reconciliation_duration_seconds";
    let opts = HistogramOpts::new(
        format!("{METRICS_NAMESPACE}_{name}"),
        "Duration of reconciliation passes in seconds by status",
    )
    .buckets(vec![0.01, 0.1, 0.5, 1.0, 2.0, 5.0, 10.0, 30.0, 60.0, 120.0]);
    let histogram =
        HistogramVec::new(opts, &["status"]).unwrap_or_else(|e| panic!("invalid metric {name}: {e}"));
    METRICS_REGISTRY
        .register(Box::new(histogram.clone()))
        .unwrap_or_else(|e| panic!("failed to register metric {name}: {e}"));
    histogram
});

// ============================================================================
// Change Metrics
// ============================================================================

/// Total number of changes accepted by Route 53
///
/// Labels:
/// - `action`: `CREATE`, `UPSERT` or `DELETE`
pub static CHANGES_SUBMITTED_TOTAL: LazyLock<CounterVec> = LazyLock::new(|| {
    register_counter_vec(
        "changes_submitted_total",
        "Total number of record changes accepted by Route 53 by action",
        &["action"],
    )
});

/// Total number of changes dropped before submission
///
/// Labels:
/// - `reason`: `no_zone` or `limit`
pub static CHANGES_DROPPED_TOTAL: LazyLock<CounterVec> = LazyLock::new(|| {
    register_counter_vec(
        "changes_dropped_total",
        "Total number of record changes dropped before submission by reason",
        &["reason"],
    )
});

// ============================================================================
// Batch Metrics
// ============================================================================

/// Total number of per-zone change batches
///
/// Labels:
/// - `outcome`: `submitted`, `failed` or `dry_run`
pub static BATCHES_TOTAL: LazyLock<CounterVec> = LazyLock::new(|| {
    register_counter_vec(
        "change_batches_total",
        "Total number of per-zone change batches by outcome",
        &["outcome"],
    )
});

// ============================================================================
// Helper Functions
// ============================================================================

/// Record a completed reconciliation pass
pub fn record_reconciliation_success(duration: Duration) {
    RECONCILIATIONS_TOTAL.with_label_values(&["success"]).inc();
    RECONCILIATION_DURATION_SECONDS
        .with_label_values(&["success"])
        .observe(duration.as_secs_f64());
}

/// Record a reconciliation pass that returned an error
pub fn record_reconciliation_error(duration: Duration) {
    RECONCILIATIONS_TOTAL.with_label_values(&["error"]).inc();
    RECONCILIATION_DURATION_SECONDS
        .with_label_values(&["error"])
        .observe(duration.as_secs_f64());
}

/// Count the changes of an accepted batch by action
pub fn record_changes_submitted(changes: &[Change]) {
    for change in changes {
        CHANGES_SUBMITTED_TOTAL
            .with_label_values(&[change.action.as_str()])
            .inc();
    }
}

/// Record dropped changes
///
/// # Arguments
/// * `reason` - [`DROP_REASON_NO_ZONE`] or [`DROP_REASON_LIMIT`]
/// * `count` - Number of changes dropped
#[allow(clippy::cast_precision_loss)]
pub fn record_changes_dropped(reason: &str, count: usize) {
    if count > 0 {
        CHANGES_DROPPED_TOTAL
            .with_label_values(&[reason])
            .inc_by(count as f64);
    }
}

/// Record one per-zone batch
///
/// # Arguments
/// * `outcome` - One of the `BATCH_OUTCOME_*` constants
pub fn record_batch(outcome: &str) {
    BATCHES_TOTAL.with_label_values(&[outcome]).inc();
}

/// Gather and encode all metrics in Prometheus text format
///
/// # Errors
/// Returns error if encoding fails
pub fn gather_metrics() -> Result<String, prometheus::Error> {
    let encoder = TextEncoder::new();
    let metric_families = METRICS_REGISTRY.gather();
    let mut buffer = Vec::new();
    encoder.encode(&metric_families, &mut buffer)?;
    String::from_utf8(buffer).map_err(|e| prometheus::Error::Msg(format!("UTF-8 error: {e}")))
}

#[cfg(test)]
#[path = "metrics_tests.rs"]
mod metrics_tests;

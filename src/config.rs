// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Command line configuration.
//!
//! Every option can also be set through an environment variable, which is how
//! zonesync is usually configured when it runs as a scheduled job.

use crate::constants::{ROUTE53_ENDPOINT, ROUTE53_SIGNING_REGION};
use crate::provider::{FailurePolicy, ProviderConfig};
use crate::zones::{DomainFilter, ZoneType, ZoneTypeFilter};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "zonesync")]
#[command(about = "Reconcile planned DNS record changes into AWS Route 53 hosted zones", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Only manage zones under this domain (repeatable)
    #[arg(
        long = "domain-filter",
        env = "ZONESYNC_DOMAIN_FILTER",
        value_delimiter = ',',
        global = true
    )]
    pub domain_filter: Vec<String>,

    /// Only manage public or private zones
    #[arg(long, env = "ZONESYNC_ZONE_TYPE", global = true)]
    pub zone_type: Option<ZoneType>,

    /// Log the changes without submitting them
    #[arg(long, env = "ZONESYNC_DRY_RUN", global = true)]
    pub dry_run: bool,

    /// Abort on the first zone whose change batch is rejected
    #[arg(long, env = "ZONESYNC_FAIL_FAST", global = true)]
    pub fail_fast: bool,

    /// Route 53 API endpoint
    #[arg(long, env = "ZONESYNC_ENDPOINT_URL", default_value = ROUTE53_ENDPOINT, global = true)]
    pub endpoint_url: String,

    /// Region used to sign requests. Independent of `AWS_REGION`, which
    /// names the workload's region rather than Route 53's.
    #[arg(
        long,
        env = "ZONESYNC_SIGNING_REGION",
        default_value = ROUTE53_SIGNING_REGION,
        global = true
    )]
    pub region: String,

    /// Write Prometheus metrics to this file when done
    #[arg(long, env = "ZONESYNC_METRICS_FILE", global = true)]
    pub metrics_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand, PartialEq, Eq)]
pub enum Command {
    /// Apply a plan of record changes
    Apply {
        /// Plan file (YAML or JSON)
        #[arg(long)]
        plan: PathBuf,
    },

    /// Print the managed records of every selected zone as YAML
    Records,

    /// Print the selected hosted zones
    Zones,
}

impl Cli {
    /// Provider settings derived from the command line.
    #[must_use]
    pub fn provider_config(&self) -> ProviderConfig {
        ProviderConfig {
            domain_filter: DomainFilter::new(&self.domain_filter),
            zone_type_filter: ZoneTypeFilter(self.zone_type),
            dry_run: self.dry_run,
            failure_policy: if self.fail_fast {
                FailurePolicy::FailFast
            } else {
                FailurePolicy::PartialFailureTolerant
            },
            ..ProviderConfig::default()
        }
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod config_tests;

// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! # zonesync - DNS change reconciler for AWS Route 53
//!
//! zonesync takes the record changes computed by an external planner and
//! applies them to Route 53 hosted zones.
//!
//! ## Overview
//!
//! A reconciliation pass:
//!
//! - converts generic [`endpoint::Endpoint`]s into Route 53 [`changes::Change`]s,
//!   turning CNAMEs to known load balancers into alias records
//! - routes every change to the hosted zone with the longest matching suffix
//! - caps each zone's batch at the Route 53 per-call limit without splitting
//!   changes of one record name, and orders it deterministically
//! - submits one batch per zone, tolerating per-zone failures by default
//!
//! ## Modules
//!
//! - [`endpoint`] - Generic desired records
//! - [`plan`] - Change plans produced by the planner
//! - [`changes`] - Route 53 changes and endpoint conversion
//! - [`canonical_zones`] - Load balancer alias zones by region
//! - [`zones`] - Hosted zones, filters and suffix lookup
//! - [`records`] - Listed record sets back to endpoints
//! - [`provider`] - The reconciliation pipeline
//! - [`route53`] - Route 53 API trait and HTTP client
//! - [`config`] - Command line configuration
//! - [`metrics`] - Prometheus metrics
//!
//! ## Example
//!
//! ```rust,no_run
//! use zonesync::endpoint::{Endpoint, RecordType};
//! use zonesync::plan::Changes;
//! use zonesync::provider::{ProviderConfig, Route53Provider};
//! use zonesync::route53::client::Route53Client;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let provider = Route53Provider::new(
//!     Route53Client::from_env()?,
//!     ProviderConfig {
//!         dry_run: true,
//!         ..ProviderConfig::default()
//!     },
//! );
//!
//! let plan = Changes {
//!     create: vec![Endpoint::new("app.example.com.", "1.2.3.4", RecordType::A)],
//!     ..Changes::default()
//! };
//!
//! for change in provider.apply_changes(&plan).await?.changes() {
//!     println!("{change}");
//! }
//! # Ok(())
//! # }
//! ```

pub mod canonical_zones;
pub mod changes;
pub mod config;
pub mod constants;
pub mod endpoint;
pub mod errors;
pub mod metrics;
pub mod plan;
pub mod provider;
pub mod records;
pub mod route53;
pub mod zones;

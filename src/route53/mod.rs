// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! AWS Route 53 as seen by the reconciler.
//!
//! The reconciler only needs three calls from the zone service: list hosted
//! zones, list the record sets of a zone, and submit one change batch. They are
//! expressed by the [`Route53Api`] trait so the reconciliation pipeline can be
//! tested against an in-memory implementation.
//!
//! - [`client`] - HTTP implementation against the Route 53 REST API
//! - [`signing`] - AWS Signature Version 4
//! - [`wire`] - XML request and response bodies
//!
//! # Example
//!
//! ```rust,no_run
//! use zonesync::route53::{client::Route53Client, Route53Api};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let client = Route53Client::from_env()?;
//! for zone in client.list_hosted_zones().await? {
//!     println!("{} {}", zone.id, zone.name);
//! }
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod signing;
pub mod wire;

use crate::changes::Change;
use crate::errors::Route53Error;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// A hosted zone as returned by `ListHostedZones`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostedZone {
    /// Zone id without the `/hostedzone/` prefix
    pub id: String,
    /// Zone apex with trailing dot
    pub name: String,
    pub private_zone: bool,
}

/// Alias target of a listed record set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordSetAlias {
    pub dns_name: String,
    pub hosted_zone_id: String,
}

/// A record set as returned by `ListResourceRecordSets`.
///
/// Names are reported exactly as Route 53 lists them, including the `\052`
/// wildcard escape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordSet {
    pub name: String,
    /// Record type as listed (may be a type zonesync does not know)
    pub record_type: String,
    pub ttl: Option<i64>,
    pub values: Vec<String>,
    pub alias_target: Option<RecordSetAlias>,
}

/// The subset of the Route 53 API the reconciler uses.
///
/// Implementations hide pagination: list calls return fully materialized
/// results. `change_resource_record_sets` submits one batch which Route 53
/// applies atomically; the changes must be sent in the given order.
#[async_trait]
pub trait Route53Api: Send + Sync {
    /// List every hosted zone of the account.
    async fn list_hosted_zones(&self) -> Result<Vec<HostedZone>, Route53Error>;

    /// List every record set of one hosted zone.
    async fn list_resource_record_sets(&self, zone_id: &str) -> Result<Vec<RecordSet>, Route53Error>;

    /// Submit one change batch to one hosted zone.
    async fn change_resource_record_sets(
        &self,
        zone_id: &str,
        changes: &[Change],
    ) -> Result<(), Route53Error>;
}

#[async_trait]
impl<T: Route53Api + ?Sized> Route53Api for std::sync::Arc<T> {
    async fn list_hosted_zones(&self) -> Result<Vec<HostedZone>, Route53Error> {
        (**self).list_hosted_zones().await
    }

    async fn list_resource_record_sets(&self, zone_id: &str) -> Result<Vec<RecordSet>, Route53Error> {
        (**self).list_resource_record_sets(zone_id).await
    }

    async fn change_resource_record_sets(
        &self,
        zone_id: &str,
        changes: &[Change],
    ) -> Result<(), Route53Error> {
        (**self).change_resource_record_sets(zone_id, changes).await
    }
}

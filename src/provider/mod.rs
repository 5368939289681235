// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Route 53 provider: reconciles planned endpoint changes against hosted zones.
//!
//! # Architecture
//!
//! One reconciliation pass runs sequentially:
//!
//! 1. **Build** - endpoints become [`Change`]s (creates, then upserts, then deletes)
//! 2. **List zones** - hosted zones are listed fresh and filtered; a listing
//!    error aborts the pass
//! 3. **Assign** - [`assign::changes_by_zone`] buckets changes by owning zone
//! 4. **Limit** - [`limit::limit_change_set`] caps and orders each bucket
//! 5. **Submit** - each zone's batch is sent (or only logged in dry-run mode);
//!    a rejected batch is handled according to the [`FailurePolicy`]
//!
//! Nothing is retried. Changes dropped for lack of a zone or by the batch
//! limit are reported in the [`SubmitSummary`] and expected to be picked up by
//! the next pass.
//!
//! # Example
//!
//! ```rust,no_run
//! use zonesync::endpoint::{Endpoint, RecordType};
//! use zonesync::provider::{ProviderConfig, Route53Provider};
//! use zonesync::route53::client::Route53Client;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let provider = Route53Provider::new(Route53Client::from_env()?, ProviderConfig::default());
//! let summary = provider
//!     .create_records(&[Endpoint::new("app.example.com.", "1.2.3.4", RecordType::A)])
//!     .await?;
//! println!("{} zone(s) updated", summary.submitted_batches());
//! # Ok(())
//! # }
//! ```

pub mod assign;
pub mod limit;

use crate::canonical_zones::CanonicalZones;
use crate::changes::{build_changes, Change, ChangeAction};
use crate::constants::MAX_CHANGE_COUNT;
use crate::endpoint::Endpoint;
use crate::errors::ProviderError;
use crate::metrics::{
    record_batch, record_changes_dropped, record_changes_submitted, record_reconciliation_error,
    record_reconciliation_success, BATCH_OUTCOME_DRY_RUN, BATCH_OUTCOME_FAILED,
    BATCH_OUTCOME_SUBMITTED, DROP_REASON_LIMIT, DROP_REASON_NO_ZONE,
};
use crate::plan::Changes;
use crate::records::endpoints_from_record_set;
use crate::route53::{HostedZone, Route53Api};
use crate::zones::{DomainFilter, Zone, ZoneRegistry, ZoneType, ZoneTypeFilter};
use std::time::Instant;
use tracing::{debug, error, info};

/// What to do when Route 53 rejects one zone's batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Log the failure, record the zone in [`SubmitSummary::failed_zones`] and
    /// carry on with the remaining zones. The pass still succeeds.
    #[default]
    PartialFailureTolerant,
    /// Stop at the first rejected batch and return
    /// [`ProviderError::ChangeBatchFailed`]. Batches already sent stay applied.
    FailFast,
}

/// Provider settings.
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    /// Only zones under these domains are considered
    pub domain_filter: DomainFilter,
    /// Only zones of this type are considered
    pub zone_type_filter: ZoneTypeFilter,
    /// Log the change set without submitting it
    pub dry_run: bool,
    pub failure_policy: FailurePolicy,
    /// Maximum number of changes per zone and pass
    pub max_batch_size: usize,
    /// Load balancer hostname suffix → alias hosted zone
    pub canonical_zones: CanonicalZones,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            domain_filter: DomainFilter::default(),
            zone_type_filter: ZoneTypeFilter::default(),
            dry_run: false,
            failure_policy: FailurePolicy::default(),
            max_batch_size: MAX_CHANGE_COUNT,
            canonical_zones: CanonicalZones::default(),
        }
    }
}

/// The batch computed for one zone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZoneBatch {
    pub zone_id: String,
    pub zone_name: String,
    /// Changes in submission order
    pub changes: Vec<Change>,
    /// Whether Route 53 accepted the batch (always false in dry-run mode)
    pub submitted: bool,
}

/// Outcome of one reconciliation pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubmitSummary {
    /// One entry per zone that had changes, in ascending zone id order
    pub batches: Vec<ZoneBatch>,
    /// Zones whose batch was rejected
    pub failed_zones: Vec<String>,
    /// Changes without an owning zone
    pub unmatched: usize,
    /// Changes left out by the batch size limit
    pub limited: usize,
}

impl SubmitSummary {
    /// Number of batches Route 53 accepted.
    #[must_use]
    pub fn submitted_batches(&self) -> usize {
        self.batches.iter().filter(|b| b.submitted).count()
    }

    /// All planned changes across zones, in submission order.
    pub fn changes(&self) -> impl Iterator<Item = &Change> {
        self.batches.iter().flat_map(|b| b.changes.iter())
    }
}

/// Applies endpoint changes to Route 53 hosted zones.
#[derive(Debug)]
pub struct Route53Provider<C> {
    client: C,
    config: ProviderConfig,
}

impl<C: Route53Api> Route53Provider<C> {
    #[must_use]
    pub fn new(client: C, config: ProviderConfig) -> Self {
        Self { client, config }
    }

    #[must_use]
    pub fn config(&self) -> &ProviderConfig {
        &self.config
    }

    /// List hosted zones accepted by the zone type and domain filters, by ascending id.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::ZoneListingFailed`] if Route 53 cannot be queried.
    pub async fn zones(&self) -> Result<Vec<Zone>, ProviderError> {
        let hosted_zones = self
            .client
            .list_hosted_zones()
            .await
            .map_err(|source| ProviderError::ZoneListingFailed { source })?;

        let total = hosted_zones.len();
        let mut zones: Vec<Zone> = hosted_zones
            .into_iter()
            .map(zone_from_hosted_zone)
            .filter(|zone| self.config.zone_type_filter.matches(zone.zone_type))
            .filter(|zone| self.config.domain_filter.matches(&zone.name))
            .collect();
        zones.sort_by(|a, b| a.id.cmp(&b.id));

        debug!(total, selected = zones.len(), "Listed hosted zones");
        Ok(zones)
    }

    /// List the managed records of every selected zone as endpoints.
    ///
    /// # Errors
    ///
    /// Returns an error if zones or the record sets of any zone cannot be listed.
    pub async fn records(&self) -> Result<Vec<Endpoint>, ProviderError> {
        let mut endpoints = Vec::new();

        for zone in self.zones().await? {
            let record_sets = self
                .client
                .list_resource_record_sets(&zone.id)
                .await
                .map_err(|source| ProviderError::RecordListingFailed {
                    zone_id: zone.id.clone(),
                    source,
                })?;

            let before = endpoints.len();
            endpoints.extend(record_sets.iter().flat_map(endpoints_from_record_set));
            debug!(
                zone_id = %zone.id,
                zone_name = %zone.name,
                record_sets = record_sets.len(),
                endpoints = endpoints.len() - before,
                "Listed records"
            );
        }

        Ok(endpoints)
    }

    /// Create `endpoints`.
    ///
    /// # Errors
    ///
    /// See [`Route53Provider::submit_changes`].
    pub async fn create_records(&self, endpoints: &[Endpoint]) -> Result<SubmitSummary, ProviderError> {
        self.submit_changes(self.build(ChangeAction::Create, endpoints))
            .await
    }

    /// Upsert `new`. `old` is accepted for symmetry with the planner's output;
    /// Route 53 upserts replace the record set without needing it.
    ///
    /// # Errors
    ///
    /// See [`Route53Provider::submit_changes`].
    pub async fn update_records(
        &self,
        new: &[Endpoint],
        _old: &[Endpoint],
    ) -> Result<SubmitSummary, ProviderError> {
        self.submit_changes(self.build(ChangeAction::Upsert, new))
            .await
    }

    /// Delete `endpoints`.
    ///
    /// # Errors
    ///
    /// See [`Route53Provider::submit_changes`].
    pub async fn delete_records(&self, endpoints: &[Endpoint]) -> Result<SubmitSummary, ProviderError> {
        self.submit_changes(self.build(ChangeAction::Delete, endpoints))
            .await
    }

    /// Apply a full plan: creates, then upserts of `update_new`, then deletes.
    ///
    /// # Errors
    ///
    /// See [`Route53Provider::submit_changes`].
    pub async fn apply_changes(&self, changes: &Changes) -> Result<SubmitSummary, ProviderError> {
        let mut combined = self.build(ChangeAction::Create, &changes.create);
        combined.extend(self.build(ChangeAction::Upsert, &changes.update_new));
        combined.extend(self.build(ChangeAction::Delete, &changes.delete));

        self.submit_changes(combined).await
    }

    /// Assign, limit and submit a flat list of changes.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::ZoneListingFailed`] if zones cannot be listed,
    /// and [`ProviderError::ChangeBatchFailed`] for a rejected batch under
    /// [`FailurePolicy::FailFast`].
    pub async fn submit_changes(&self, changes: Vec<Change>) -> Result<SubmitSummary, ProviderError> {
        if changes.is_empty() {
            info!("All records are already up to date");
            return Ok(SubmitSummary::default());
        }

        let start = Instant::now();
        let result = self.submit_nonempty(changes).await;
        match &result {
            Ok(_) => record_reconciliation_success(start.elapsed()),
            Err(_) => record_reconciliation_error(start.elapsed()),
        }
        result
    }

    async fn submit_nonempty(&self, changes: Vec<Change>) -> Result<SubmitSummary, ProviderError> {
        let zones = self.zones().await?;

        let total = changes.len();
        let registry: ZoneRegistry = zones.iter().collect();
        let by_zone = assign::assign_changes(&registry, changes);

        let mut summary = SubmitSummary {
            unmatched: total - by_zone.values().map(Vec::len).sum::<usize>(),
            ..SubmitSummary::default()
        };
        record_changes_dropped(DROP_REASON_NO_ZONE, summary.unmatched);

        for (zone_id, zone_changes) in by_zone {
            let zone_name = registry.zone_name(&zone_id).unwrap_or_default().to_string();

            let pending = zone_changes.len();
            let batch = limit::limit_change_set(zone_changes, self.config.max_batch_size);
            let limited = pending - batch.len();
            summary.limited += limited;
            record_changes_dropped(DROP_REASON_LIMIT, limited);

            for change in &batch {
                info!(zone_id = %zone_id, zone_name = %zone_name, dry_run = self.config.dry_run, "Desired change: {change}");
            }

            let mut zone_batch = ZoneBatch {
                zone_id,
                zone_name,
                changes: batch,
                submitted: false,
            };

            if self.config.dry_run {
                record_batch(BATCH_OUTCOME_DRY_RUN);
                summary.batches.push(zone_batch);
                continue;
            }

            match self
                .client
                .change_resource_record_sets(&zone_batch.zone_id, &zone_batch.changes)
                .await
            {
                Ok(()) => {
                    info!(
                        zone_id = %zone_batch.zone_id,
                        zone_name = %zone_batch.zone_name,
                        changes = zone_batch.changes.len(),
                        "Records in zone {} were successfully updated",
                        zone_batch.zone_name
                    );
                    record_batch(BATCH_OUTCOME_SUBMITTED);
                    record_changes_submitted(&zone_batch.changes);
                    zone_batch.submitted = true;
                }
                Err(source) => {
                    error!(
                        zone_id = %zone_batch.zone_id,
                        zone_name = %zone_batch.zone_name,
                        changes = zone_batch.changes.len(),
                        error = %source,
                        "Failed to submit change batch"
                    );
                    record_batch(BATCH_OUTCOME_FAILED);

                    if self.config.failure_policy == FailurePolicy::FailFast {
                        return Err(ProviderError::ChangeBatchFailed {
                            zone_id: zone_batch.zone_id,
                            zone_name: zone_batch.zone_name,
                            change_count: zone_batch.changes.len(),
                            source,
                        });
                    }
                    summary.failed_zones.push(zone_batch.zone_id.clone());
                }
            }

            summary.batches.push(zone_batch);
        }

        Ok(summary)
    }

    fn build(&self, action: ChangeAction, endpoints: &[Endpoint]) -> Vec<Change> {
        build_changes(action, endpoints, &self.config.canonical_zones)
    }
}

fn zone_from_hosted_zone(zone: HostedZone) -> Zone {
    let zone_type = if zone.private_zone {
        ZoneType::Private
    } else {
        ZoneType::Public
    };
    Zone::new(zone.id, zone.name, zone_type)
}

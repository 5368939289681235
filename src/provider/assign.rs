// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Partitioning of a flat change list into per-zone batches.

use crate::changes::Change;
use crate::zones::{ensure_trailing_dot, Zone, ZoneRegistry};
use std::collections::BTreeMap;
use tracing::debug;

/// Split `changes` into one bucket per owning zone, keyed by zone id.
///
/// Each change goes to the zone with the longest suffix matching its record
/// name. Changes outside every zone are dropped. Zones that receive no change
/// are absent from the result.
///
/// # Example
///
/// ```rust
/// use zonesync::canonical_zones::CanonicalZones;
/// use zonesync::changes::{build_change, ChangeAction};
/// use zonesync::endpoint::{Endpoint, RecordType};
/// use zonesync::provider::assign::changes_by_zone;
/// use zonesync::zones::{Zone, ZoneType};
///
/// let zones = vec![Zone::new("z1", "example.com.", ZoneType::Public)];
/// let changes = vec![
///     build_change(ChangeAction::Create, &Endpoint::new("foo.example.com.", "1.2.3.4", RecordType::A), &CanonicalZones::default()),
///     build_change(ChangeAction::Create, &Endpoint::new("foo.unknown-domain.com.", "1.2.3.4", RecordType::A), &CanonicalZones::default()),
/// ];
///
/// let buckets = changes_by_zone(&zones, changes);
/// assert_eq!(buckets.len(), 1);
/// assert_eq!(buckets["z1"].len(), 1);
/// ```
#[must_use]
pub fn changes_by_zone(zones: &[Zone], changes: Vec<Change>) -> BTreeMap<String, Vec<Change>> {
    let registry: ZoneRegistry = zones.iter().collect();
    assign_changes(&registry, changes)
}

/// Split `changes` by owning zone using an already built registry.
///
/// Same result as [`changes_by_zone`]; callers that also need
/// [`ZoneRegistry::zone_name`] build the registry once and pass it here.
#[must_use]
pub fn assign_changes(registry: &ZoneRegistry, changes: Vec<Change>) -> BTreeMap<String, Vec<Change>> {
    let mut buckets: BTreeMap<String, Vec<Change>> = BTreeMap::new();

    for change in changes {
        let hostname = ensure_trailing_dot(change.name());
        match registry.find_zone(&hostname) {
            Some(zone_id) => buckets.entry(zone_id.to_string()).or_default().push(change),
            None => {
                debug!(
                    change = %change,
                    "Skipping record because no hosted zone matching record DNS name was detected"
                );
            }
        }
    }

    buckets
}

#[cfg(test)]
#[path = "assign_tests.rs"]
mod assign_tests;

// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Per-zone batch size limiting and deterministic change ordering.
//!
//! Route 53 accepts a bounded number of changes per `ChangeResourceRecordSets`
//! call. When a zone has more pending changes than that, whole record-name
//! groups are selected in name order until the batch is full; the rest wait
//! for the next reconciliation pass. A group is never split, so a DELETE and
//! CREATE of the same name always travel together.

use crate::changes::Change;
use std::cmp::Ordering;
use std::collections::BTreeMap;
use tracing::warn;

/// Cap `changes` at `limit` entries and order them for submission.
///
/// The result never exceeds `limit`, contains every change of each record
/// name it includes, and is sorted with [`sort_changes_by_action_name_type`].
/// When `changes` already fits, nothing is dropped.
///
/// # Example
///
/// ```rust
/// use zonesync::canonical_zones::CanonicalZones;
/// use zonesync::changes::{build_change, ChangeAction};
/// use zonesync::endpoint::{Endpoint, RecordType};
/// use zonesync::provider::limit::limit_change_set;
///
/// let zones = CanonicalZones::default();
/// let changes = vec![
///     build_change(ChangeAction::Create, &Endpoint::new("b.example.com.", "1.1.1.1", RecordType::A), &zones),
///     build_change(ChangeAction::Create, &Endpoint::new("a.example.com.", "2.2.2.2", RecordType::A), &zones),
///     build_change(ChangeAction::Delete, &Endpoint::new("a.example.com.", "3.3.3.3", RecordType::A), &zones),
/// ];
///
/// let limited = limit_change_set(changes, 2);
/// assert_eq!(limited.len(), 2);
/// assert!(limited.iter().all(|c| c.name() == "a.example.com."));
/// ```
#[must_use]
pub fn limit_change_set(changes: Vec<Change>, limit: usize) -> Vec<Change> {
    if changes.len() <= limit {
        let mut changes = changes;
        sort_changes_by_action_name_type(&mut changes);
        return changes;
    }

    warn!(count = changes.len(), limit, "Initial change batch count is {}", changes.len());

    let mut by_name: BTreeMap<String, Vec<Change>> = BTreeMap::new();
    for change in changes {
        by_name.entry(change.name().to_string()).or_default().push(change);
    }

    let mut limited: Vec<Change> = Vec::with_capacity(limit);
    for group in by_name.into_values() {
        if limit - limited.len() >= group.len() {
            limited.extend(group);
        }
    }
    sort_changes_by_action_name_type(&mut limited);

    warn!(count = limited.len(), limit, "Limited change batch count to {}", limited.len());

    limited
}

/// Sort by action wire name, record name and record type, ascending.
///
/// Changes equal on those keys are ordered by their values (or alias target)
/// and TTL, so the result does not depend on the input order.
pub fn sort_changes_by_action_name_type(changes: &mut [Change]) {
    changes.sort_by(compare_changes);
}

fn compare_changes(a: &Change, b: &Change) -> Ordering {
    a.action
        .as_str()
        .cmp(b.action.as_str())
        .then_with(|| a.name().cmp(b.name()))
        .then_with(|| a.record_type().as_str().cmp(b.record_type().as_str()))
        .then_with(|| a.record_set.records.cmp(&b.record_set.records))
        .then_with(|| alias_key(a).cmp(&alias_key(b)))
        .then_with(|| a.record_set.ttl.cmp(&b.record_set.ttl))
}

fn alias_key(change: &Change) -> Option<(&str, &str, bool)> {
    change
        .record_set
        .alias_target
        .as_ref()
        .map(|t| (t.dns_name.as_str(), t.hosted_zone_id.as_str(), t.evaluate_target_health))
}

#[cfg(test)]
#[path = "limit_tests.rs"]
mod limit_tests;

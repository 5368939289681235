// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Common test utilities for integration tests
//!
//! [`InMemoryRoute53`] keeps hosted zones and their record sets in memory and
//! applies change batches the way Route 53 does: a batch is validated as a
//! whole and either fully applied or rejected.

#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Mutex;
use zonesync::changes::{Change, ChangeAction};
use zonesync::errors::Route53Error;
use zonesync::route53::{HostedZone, RecordSet, RecordSetAlias, Route53Api};

/// (record name, record type)
type RecordKey = (String, String);

#[derive(Default)]
pub struct InMemoryRoute53 {
    zones: Vec<HostedZone>,
    records: Mutex<BTreeMap<String, BTreeMap<RecordKey, RecordSet>>>,
    /// Every accepted batch, in submission order
    batches: Mutex<Vec<(String, Vec<Change>)>>,
    /// Number of change calls, accepted or not
    change_calls: Mutex<usize>,
    fail_listing: bool,
}

impl InMemoryRoute53 {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a hosted zone.
    pub fn with_zone(mut self, id: &str, name: &str, private_zone: bool) -> Self {
        self.zones.push(HostedZone {
            id: id.to_string(),
            name: name.to_string(),
            private_zone,
        });
        self.records
            .lock()
            .unwrap()
            .insert(id.to_string(), BTreeMap::new());
        self
    }

    /// Seed a literal record set.
    pub fn with_record(self, zone_id: &str, name: &str, record_type: &str, values: &[&str]) -> Self {
        let record_set = RecordSet {
            name: name.to_string(),
            record_type: record_type.to_string(),
            ttl: Some(300),
            values: values.iter().map(ToString::to_string).collect(),
            alias_target: None,
        };
        self.records
            .lock()
            .unwrap()
            .entry(zone_id.to_string())
            .or_default()
            .insert((name.to_string(), record_type.to_string()), record_set);
        self
    }

    /// Make zone listing fail.
    pub fn failing_listing(mut self) -> Self {
        self.fail_listing = true;
        self
    }

    pub fn batches(&self) -> Vec<(String, Vec<Change>)> {
        self.batches.lock().unwrap().clone()
    }

    pub fn change_calls(&self) -> usize {
        *self.change_calls.lock().unwrap()
    }

    pub fn record(&self, zone_id: &str, name: &str, record_type: &str) -> Option<RecordSet> {
        self.records
            .lock()
            .unwrap()
            .get(zone_id)
            .and_then(|zone| zone.get(&(name.to_string(), record_type.to_string())))
            .cloned()
    }
}

fn rejected(zone_id: &str, message: String) -> Route53Error {
    Route53Error::ApiError {
        url: format!("memory:///2013-04-01/hostedzone/{zone_id}/rrset"),
        status_code: 400,
        code: "InvalidChangeBatch".to_string(),
        message,
    }
}

fn record_set_from_change(change: &Change) -> RecordSet {
    let rrset = &change.record_set;
    RecordSet {
        name: rrset.name.clone(),
        record_type: rrset.record_type.as_str().to_string(),
        ttl: rrset.ttl,
        values: rrset.records.clone(),
        alias_target: rrset.alias_target.as_ref().map(|alias| RecordSetAlias {
            dns_name: format!("{}.", alias.dns_name.trim_end_matches('.')),
            hosted_zone_id: alias.hosted_zone_id.clone(),
        }),
    }
}

#[async_trait]
impl Route53Api for InMemoryRoute53 {
    async fn list_hosted_zones(&self) -> Result<Vec<HostedZone>, Route53Error> {
        if self.fail_listing {
            return Err(Route53Error::HttpConnectionFailed {
                url: "memory:///2013-04-01/hostedzone".to_string(),
                reason: "connection refused".to_string(),
            });
        }
        Ok(self.zones.clone())
    }

    async fn list_resource_record_sets(&self, zone_id: &str) -> Result<Vec<RecordSet>, Route53Error> {
        self.records
            .lock()
            .unwrap()
            .get(zone_id)
            .map(|zone| zone.values().cloned().collect())
            .ok_or_else(|| rejected(zone_id, "No hosted zone found".to_string()))
    }

    async fn change_resource_record_sets(
        &self,
        zone_id: &str,
        changes: &[Change],
    ) -> Result<(), Route53Error> {
        *self.change_calls.lock().unwrap() += 1;

        let mut all = self.records.lock().unwrap();
        let current = all
            .get(zone_id)
            .ok_or_else(|| rejected(zone_id, "No hosted zone found".to_string()))?;

        // Apply to a copy so a rejected batch leaves the zone untouched.
        let mut next = current.clone();
        for change in changes {
            let key = (
                change.name().to_string(),
                change.record_type().as_str().to_string(),
            );
            match change.action {
                ChangeAction::Create => {
                    if next.contains_key(&key) {
                        return Err(rejected(
                            zone_id,
                            format!("Tried to create resource record set {key:?} but it already exists"),
                        ));
                    }
                    next.insert(key, record_set_from_change(change));
                }
                ChangeAction::Upsert => {
                    next.insert(key, record_set_from_change(change));
                }
                ChangeAction::Delete => {
                    if next.remove(&key).is_none() {
                        return Err(rejected(
                            zone_id,
                            format!("Tried to delete resource record set {key:?} but it was not found"),
                        ));
                    }
                }
            }
        }

        all.insert(zone_id.to_string(), next);
        self.batches
            .lock()
            .unwrap()
            .push((zone_id.to_string(), changes.to_vec()));
        Ok(())
    }
}

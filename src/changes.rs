// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Route 53 change records and their construction from endpoints.
//!
//! A [`Change`] is one mutation of one record set. [`build_change`] converts a
//! generic [`Endpoint`] into a change:
//!
//! - a CNAME whose target is a known load balancer hostname becomes an **alias**
//!   A record pointing at the load balancer, with target health evaluation on;
//! - anything else becomes a **literal** record carrying the endpoint's value and
//!   its TTL (or the 300 second default).
//!
//! # Example
//!
//! ```rust
//! use zonesync::canonical_zones::CanonicalZones;
//! use zonesync::changes::{build_change, ChangeAction};
//! use zonesync::endpoint::{Endpoint, RecordType};
//!
//! let zones = CanonicalZones::default();
//!
//! let ep = Endpoint::new("app.example.com.", "1.2.3.4", RecordType::A);
//! let change = build_change(ChangeAction::Create, &ep, &zones);
//! assert_eq!(change.to_string(), "Create A app.example.com. -> 1.2.3.4");
//!
//! let ep = Endpoint::new(
//!     "lb.example.com.",
//!     "my-lb.us-east-1.elb.amazonaws.com",
//!     RecordType::Cname,
//! );
//! let change = build_change(ChangeAction::Upsert, &ep, &zones);
//! assert!(change.is_alias());
//! ```

use crate::canonical_zones::CanonicalZones;
use crate::constants::{DEFAULT_DNS_RECORD_TTL_SECS, EVALUATE_TARGET_HEALTH};
use crate::endpoint::{Endpoint, RecordType};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of mutation applied to a record set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ChangeAction {
    Create,
    Upsert,
    Delete,
}

impl ChangeAction {
    /// Wire name sent to Route 53. Changes are ordered by this string.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Create => "CREATE",
            Self::Upsert => "UPSERT",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for ChangeAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Create => write!(f, "Create"),
            Self::Upsert => write!(f, "Upsert"),
            Self::Delete => write!(f, "Delete"),
        }
    }
}

/// Target of an alias record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AliasTarget {
    /// Hostname of the aliased resource
    pub dns_name: String,
    /// Canonical hosted zone of the aliased resource
    pub hosted_zone_id: String,
    pub evaluate_target_health: bool,
}

/// The record set a change applies to.
///
/// Exactly one of `records` and `alias_target` is populated.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceRecordSet {
    /// Record name, sent as given (Route 53 escapes it itself)
    pub name: String,
    pub record_type: RecordType,
    /// TTL in seconds; absent for alias records
    pub ttl: Option<i64>,
    /// Literal values
    pub records: Vec<String>,
    pub alias_target: Option<AliasTarget>,
}

/// One provider-specific mutation of one record set.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Change {
    pub action: ChangeAction,
    pub record_set: ResourceRecordSet,
}

impl Change {
    /// Record name of the change.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.record_set.name
    }

    #[must_use]
    pub fn record_type(&self) -> RecordType {
        self.record_set.record_type
    }

    #[must_use]
    pub fn is_alias(&self) -> bool {
        self.record_set.alias_target.is_some()
    }
}

impl fmt::Display for Change {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} -> ",
            self.action, self.record_set.record_type, self.record_set.name
        )?;
        match &self.record_set.alias_target {
            Some(alias) => write!(f, "alias {} ({})", alias.dns_name, alias.hosted_zone_id),
            None => f.write_str(&self.record_set.records.join(", ")),
        }
    }
}

/// Convert one endpoint into a change with the given action.
#[must_use]
pub fn build_change(action: ChangeAction, endpoint: &Endpoint, canonical_zones: &CanonicalZones) -> Change {
    let record_set = match load_balancer_zone(endpoint, canonical_zones) {
        Some(hosted_zone_id) => ResourceRecordSet {
            name: endpoint.dns_name.clone(),
            record_type: RecordType::A,
            ttl: None,
            records: Vec::new(),
            alias_target: Some(AliasTarget {
                dns_name: endpoint.target.clone(),
                hosted_zone_id: hosted_zone_id.to_string(),
                evaluate_target_health: EVALUATE_TARGET_HEALTH,
            }),
        },
        None => {
            let ttl = match endpoint.record_ttl {
                Some(ttl) if endpoint.is_ttl_configured() => ttl,
                _ => DEFAULT_DNS_RECORD_TTL_SECS,
            };
            ResourceRecordSet {
                name: endpoint.dns_name.clone(),
                record_type: endpoint.record_type,
                ttl: Some(i64::from(ttl)),
                records: vec![endpoint.target.clone()],
                alias_target: None,
            }
        }
    };

    Change { action, record_set }
}

/// Convert every endpoint into a change sharing one action.
#[must_use]
pub fn build_changes(
    action: ChangeAction,
    endpoints: &[Endpoint],
    canonical_zones: &CanonicalZones,
) -> Vec<Change> {
    endpoints
        .iter()
        .map(|endpoint| build_change(action, endpoint, canonical_zones))
        .collect()
}

/// Canonical zone of the load balancer a CNAME endpoint points at.
fn load_balancer_zone<'a>(endpoint: &Endpoint, canonical_zones: &'a CanonicalZones) -> Option<&'a str> {
    if endpoint.record_type != RecordType::Cname {
        return None;
    }
    canonical_zones.lookup(&endpoint.target)
}

#[cfg(test)]
#[path = "changes_tests.rs"]
mod changes_tests;

// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Hosted zones, zone filters and hostname-to-zone lookup.
//!
//! # Architecture
//!
//! Every reconciliation pass lists the hosted zones fresh, drops the ones the
//! configured [`DomainFilter`] and [`ZoneTypeFilter`] reject, and indexes the
//! rest in a [`ZoneRegistry`]. The registry answers "which zone owns this
//! hostname" with a longest-suffix match, so a delegated subdomain zone wins
//! over its parent.
//!
//! # Example
//!
//! ```rust
//! use zonesync::zones::ZoneRegistry;
//!
//! let mut registry = ZoneRegistry::new();
//! registry.add("z1", "example.com.");
//! registry.add("z2", "sub.example.com.");
//!
//! assert_eq!(registry.find_zone("app.sub.example.com."), Some("z2"));
//! assert_eq!(registry.find_zone("www.example.com"), Some("z1"));
//! assert_eq!(registry.find_zone("www.example.org."), None);
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use tracing::warn;

/// Visibility of a hosted zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ZoneType {
    Public,
    Private,
}

impl fmt::Display for ZoneType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Public => write!(f, "public"),
            Self::Private => write!(f, "private"),
        }
    }
}

/// Returned when a zone type string is neither `public` nor `private`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown zone type '{0}' (expected 'public' or 'private')")]
pub struct UnknownZoneType(pub String);

impl FromStr for ZoneType {
    type Err = UnknownZoneType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "public" => Ok(Self::Public),
            "private" => Ok(Self::Private),
            _ => Err(UnknownZoneType(s.to_string())),
        }
    }
}

/// A hosted zone as seen by one reconciliation pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Zone {
    /// Zone id without the `/hostedzone/` prefix (e.g., "Z1D633PJN98FT9")
    pub id: String,
    /// Zone apex with a trailing dot (e.g., "example.com.")
    pub name: String,
    /// Public or private zone
    pub zone_type: ZoneType,
}

impl Zone {
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>, zone_type: ZoneType) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            zone_type,
        }
    }
}

/// Append a trailing dot to `name` unless it already has one.
#[must_use]
pub fn ensure_trailing_dot(name: &str) -> String {
    if name.ends_with('.') {
        name.to_string()
    } else {
        format!("{name}.")
    }
}

/// Restricts reconciliation to zones under a set of domains.
///
/// An empty filter matches every zone.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DomainFilter {
    filters: Vec<String>,
}

impl DomainFilter {
    /// Build a filter from user supplied domains.
    ///
    /// Entries are trimmed, lowercased and stripped of their trailing dot;
    /// blank entries are ignored.
    #[must_use]
    pub fn new<I, S>(domains: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let filters = domains
            .into_iter()
            .map(|d| d.as_ref().trim().trim_end_matches('.').to_ascii_lowercase())
            .filter(|d| !d.is_empty())
            .collect();
        Self { filters }
    }

    /// Whether `domain` is one of the configured domains or lies below one.
    ///
    /// Matching happens on a label boundary, as in [`ZoneRegistry::find_zone`]:
    /// `badexample.com` is not under `example.com`.
    #[must_use]
    pub fn matches(&self, domain: &str) -> bool {
        if self.filters.is_empty() {
            return true;
        }
        let domain = domain.trim_end_matches('.').to_ascii_lowercase();
        self.filters.iter().any(|filter| {
            domain
                .strip_suffix(filter.as_str())
                .is_some_and(|rest| rest.is_empty() || rest.ends_with('.'))
        })
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }
}

/// Restricts reconciliation to public or private zones; `None` accepts both.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ZoneTypeFilter(pub Option<ZoneType>);

impl ZoneTypeFilter {
    #[must_use]
    pub fn matches(&self, zone_type: ZoneType) -> bool {
        self.0.is_none_or(|wanted| wanted == zone_type)
    }
}

/// Bidirectional zone id ⇄ zone suffix index with longest-suffix lookup.
///
/// Suffixes are unique: registering a suffix a second time under a different id
/// keeps the first registration and logs a warning, so lookups never depend on
/// registration order between equal-length matches.
#[derive(Debug, Clone, Default)]
pub struct ZoneRegistry {
    /// Normalized suffix (lowercase, trailing dot) → zone id
    by_suffix: BTreeMap<String, String>,
    /// Zone id → zone name as registered
    by_id: BTreeMap<String, String>,
}

impl ZoneRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a zone.
    pub fn add(&mut self, zone_id: &str, zone_suffix: &str) {
        let suffix = ensure_trailing_dot(zone_suffix).to_ascii_lowercase();
        if let Some(existing) = self.by_suffix.get(&suffix) {
            if existing != zone_id {
                warn!(
                    zone_id = %zone_id,
                    existing_zone_id = %existing,
                    suffix = %suffix,
                    "Ignoring zone with a suffix that is already registered"
                );
            }
            return;
        }
        self.by_suffix.insert(suffix, zone_id.to_string());
        self.by_id
            .insert(zone_id.to_string(), zone_suffix.to_string());
    }

    /// Find the zone owning `hostname`.
    ///
    /// The hostname is normalized to carry a trailing dot. A zone matches when
    /// the hostname is its apex or lies below it on a label boundary; among the
    /// matching zones the one with the longest suffix wins.
    #[must_use]
    pub fn find_zone(&self, hostname: &str) -> Option<&str> {
        let hostname = ensure_trailing_dot(hostname).to_ascii_lowercase();

        self.by_suffix
            .iter()
            .filter(|(suffix, _)| is_within(&hostname, suffix))
            .max_by_key(|(suffix, _)| suffix.len())
            .map(|(_, zone_id)| zone_id.as_str())
    }

    /// Reverse lookup: the registered name of `zone_id`.
    #[must_use]
    pub fn zone_name(&self, zone_id: &str) -> Option<&str> {
        self.by_id.get(zone_id).map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
}

impl<'a> FromIterator<&'a Zone> for ZoneRegistry {
    fn from_iter<T: IntoIterator<Item = &'a Zone>>(iter: T) -> Self {
        let mut registry = Self::new();
        for zone in iter {
            registry.add(&zone.id, &zone.name);
        }
        registry
    }
}

/// `hostname` equals `suffix` or ends with `"." + suffix`. Both carry a trailing dot.
fn is_within(hostname: &str, suffix: &str) -> bool {
    if hostname == suffix {
        return true;
    }
    // The root zone "." contains every name.
    if suffix == "." {
        return true;
    }
    hostname
        .strip_suffix(suffix)
        .is_some_and(|head| head.ends_with('.'))
}

#[cfg(test)]
#[path = "zones_tests.rs"]
mod zones_tests;

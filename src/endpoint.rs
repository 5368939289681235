// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Generic DNS endpoints as produced by the planner.
//!
//! An [`Endpoint`] describes one desired record independent of any DNS
//! provider. The provider layer turns endpoints into Route 53 changes and turns
//! listed Route 53 record sets back into endpoints.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// DNS record types understood by zonesync.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RecordType {
    A,
    Aaaa,
    Cname,
    Txt,
    Mx,
    Ns,
    Srv,
    Caa,
    Ptr,
    Soa,
    Spf,
}

impl RecordType {
    /// Wire name of the record type, as Route 53 spells it.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::A => "A",
            Self::Aaaa => "AAAA",
            Self::Cname => "CNAME",
            Self::Txt => "TXT",
            Self::Mx => "MX",
            Self::Ns => "NS",
            Self::Srv => "SRV",
            Self::Caa => "CAA",
            Self::Ptr => "PTR",
            Self::Soa => "SOA",
            Self::Spf => "SPF",
        }
    }

    /// Whether records of this type are read back from the zone service.
    ///
    /// Only A, CNAME and TXT records are owned by zonesync; NS/SOA and friends
    /// are left alone when listing.
    #[must_use]
    pub const fn is_managed(self) -> bool {
        matches!(self, Self::A | Self::Cname | Self::Txt)
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string is not a known record type.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown DNS record type '{0}'")]
pub struct UnknownRecordType(pub String);

impl FromStr for RecordType {
    type Err = UnknownRecordType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "A" => Ok(Self::A),
            "AAAA" => Ok(Self::Aaaa),
            "CNAME" => Ok(Self::Cname),
            "TXT" => Ok(Self::Txt),
            "MX" => Ok(Self::Mx),
            "NS" => Ok(Self::Ns),
            "SRV" => Ok(Self::Srv),
            "CAA" => Ok(Self::Caa),
            "PTR" => Ok(Self::Ptr),
            "SOA" => Ok(Self::Soa),
            "SPF" => Ok(Self::Spf),
            _ => Err(UnknownRecordType(s.to_string())),
        }
    }
}

/// One desired DNS record.
///
/// # Example
///
/// ```rust
/// use zonesync::endpoint::{Endpoint, RecordType};
///
/// let ep = Endpoint::new("app.example.com.", "1.2.3.4", RecordType::A);
/// assert!(!ep.is_ttl_configured());
///
/// let ep = ep.with_ttl(60);
/// assert_eq!(ep.record_ttl, Some(60));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Endpoint {
    /// Fully qualified record name (e.g., "app.example.com.")
    pub dns_name: String,
    /// Record value: an address, hostname or text
    pub target: String,
    /// Record type
    pub record_type: RecordType,
    /// TTL in seconds, `None` when the planner did not configure one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub record_ttl: Option<i32>,
}

impl Endpoint {
    #[must_use]
    pub fn new(dns_name: impl Into<String>, target: impl Into<String>, record_type: RecordType) -> Self {
        Self {
            dns_name: dns_name.into(),
            target: target.into(),
            record_type,
            record_ttl: None,
        }
    }

    #[must_use]
    pub fn with_ttl(mut self, ttl: i32) -> Self {
        self.record_ttl = Some(ttl);
        self
    }

    /// A TTL is configured when the planner set a positive value.
    #[must_use]
    pub fn is_ttl_configured(&self) -> bool {
        matches!(self.record_ttl, Some(ttl) if ttl > 0)
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} -> {}", self.record_type, self.dns_name, self.target)?;
        if let Some(ttl) = self.record_ttl {
            write!(f, " (ttl {ttl})")?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "endpoint_tests.rs"]
mod endpoint_tests;

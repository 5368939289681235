// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Canonical hosted zones of AWS Elastic Load Balancers.
//!
//! Route 53 alias records that point at a load balancer must name the hosted
//! zone AWS uses for that region's load balancer hostnames. The table below is
//! published by AWS (one zone per region) and never changes at runtime; it is
//! wrapped in an immutable [`CanonicalZones`] value that the provider receives
//! as configuration.
//!
//! See: <https://docs.aws.amazon.com/general/latest/gr/rande.html>

use crate::constants::ELB_HOSTNAME_SUFFIX;

/// Region → canonical hosted zone id for `<region>.elb.amazonaws.com`.
const ELB_CANONICAL_ZONES: &[(&str, &str)] = &[
    ("us-east-1", "Z35SXDOTRQ7X7K"),
    ("us-east-2", "Z3AADJGX6KTTL2"),
    ("us-west-1", "Z368ELLRRE2KJ0"),
    ("us-west-2", "Z1H1FL5HABSF5"),
    ("ca-central-1", "ZQSVJUPU6J1EY"),
    ("ap-south-1", "ZP97RAFLXTNZK"),
    ("ap-northeast-2", "ZWKZPGTI48KDX"),
    ("ap-southeast-1", "Z1LMS91P8CMLE5"),
    ("ap-southeast-2", "Z1GM3OXH4ZPM65"),
    ("ap-northeast-1", "Z14GRHDCWA56QT"),
    ("eu-central-1", "Z215JYRZR1TBD5"),
    ("eu-west-1", "Z32O12XQLNTSW2"),
    ("eu-west-2", "ZHURV8PSTC4K8"),
    ("sa-east-1", "Z2P70J7HTTTPLU"),
];

/// Lookup table from load balancer hostname suffix to canonical zone id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanonicalZones {
    /// (hostname suffix, zone id), e.g. (".us-east-1.elb.amazonaws.com", "Z35SXDOTRQ7X7K")
    entries: Vec<(String, String)>,
}

impl CanonicalZones {
    /// Build a table from explicit (suffix, zone id) pairs.
    #[must_use]
    pub fn from_entries<I, S, Z>(entries: I) -> Self
    where
        I: IntoIterator<Item = (S, Z)>,
        S: Into<String>,
        Z: Into<String>,
    {
        Self {
            entries: entries
                .into_iter()
                .map(|(suffix, zone)| (suffix.into(), zone.into()))
                .collect(),
        }
    }

    /// Canonical zone id for `hostname`, if it is a known load balancer hostname.
    ///
    /// A trailing dot on `hostname` is ignored.
    #[must_use]
    pub fn lookup(&self, hostname: &str) -> Option<&str> {
        let hostname = hostname.trim_end_matches('.');
        self.entries
            .iter()
            .find(|(suffix, _)| hostname.ends_with(suffix.as_str()))
            .map(|(_, zone)| zone.as_str())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for CanonicalZones {
    /// The AWS published ELB table.
    fn default() -> Self {
        Self::from_entries(
            ELB_CANONICAL_ZONES
                .iter()
                .map(|(region, zone)| (format!(".{region}{ELB_HOSTNAME_SUFFIX}"), *zone)),
        )
    }
}

#[cfg(test)]
#[path = "canonical_zones_tests.rs"]
mod canonical_zones_tests;

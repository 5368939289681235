// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Conversion of listed Route 53 record sets back into endpoints.
//!
//! Only managed record types (A, CNAME, TXT) are reported. A literal record
//! set yields one endpoint per value; an alias record set yields a single
//! CNAME endpoint pointing at the alias target.

use crate::constants::ESCAPED_WILDCARD;
use crate::endpoint::{Endpoint, RecordType};
use crate::route53::RecordSet;
use tracing::trace;

/// Undo Route 53's escaping of a leading wildcard label.
///
/// Route 53 lists `*.example.com.` as `\052.example.com.`. Only a leading
/// escape is replaced, and only once.
///
/// # Example
///
/// ```rust
/// use zonesync::records::wildcard_unescape;
///
/// assert_eq!(wildcard_unescape("\\052.example.com."), "*.example.com.");
/// assert_eq!(wildcard_unescape("a.\\052.example.com."), "a.\\052.example.com.");
/// ```
#[must_use]
pub fn wildcard_unescape(name: &str) -> String {
    match name.strip_prefix(ESCAPED_WILDCARD) {
        Some(rest) => format!("*{rest}"),
        None => name.to_string(),
    }
}

/// Endpoints described by one listed record set.
///
/// Returns nothing for record types zonesync does not manage.
#[must_use]
pub fn endpoints_from_record_set(record_set: &RecordSet) -> Vec<Endpoint> {
    let record_type = match record_set.record_type.parse::<RecordType>() {
        Ok(record_type) if record_type.is_managed() => record_type,
        _ => {
            trace!(
                name = %record_set.name,
                record_type = %record_set.record_type,
                "Skipping unmanaged record set"
            );
            return Vec::new();
        }
    };

    let name = wildcard_unescape(&record_set.name);
    let ttl = record_set.ttl.and_then(|ttl| i32::try_from(ttl).ok());

    let mut endpoints: Vec<Endpoint> = record_set
        .values
        .iter()
        .map(|value| Endpoint {
            dns_name: name.clone(),
            target: value.clone(),
            record_type,
            record_ttl: ttl,
        })
        .collect();

    if let Some(alias) = &record_set.alias_target {
        endpoints.push(Endpoint {
            dns_name: name,
            target: alias.dns_name.trim_end_matches('.').to_string(),
            record_type: RecordType::Cname,
            record_ttl: ttl,
        });
    }

    endpoints
}

#[cfg(test)]
#[path = "records_tests.rs"]
mod records_tests;

// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! XML bodies of the Route 53 REST API (version 2013-04-01).
//!
//! Response structs only declare the elements zonesync reads; everything else
//! in the documents is ignored. Request structs declare their fields in the
//! order the Route 53 schema requires.

use super::{HostedZone, RecordSet, RecordSetAlias};
use crate::changes::Change;
use crate::constants::{HOSTED_ZONE_ID_PREFIX, ROUTE53_XML_NAMESPACE};
use crate::errors::Route53Error;
use serde::{Deserialize, Serialize};

// ============================================================================
// ListHostedZones
// ============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ListHostedZonesResponse {
    #[serde(default)]
    pub hosted_zones: HostedZonesElement,
    #[serde(default)]
    pub is_truncated: bool,
    #[serde(default)]
    pub next_marker: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct HostedZonesElement {
    #[serde(rename = "HostedZone", default)]
    pub hosted_zone: Vec<HostedZoneElement>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct HostedZoneElement {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub config: Option<HostedZoneConfigElement>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct HostedZoneConfigElement {
    #[serde(default)]
    pub private_zone: bool,
}

impl From<HostedZoneElement> for HostedZone {
    fn from(zone: HostedZoneElement) -> Self {
        Self {
            id: strip_hosted_zone_prefix(&zone.id).to_string(),
            name: zone.name,
            private_zone: zone.config.is_some_and(|c| c.private_zone),
        }
    }
}

/// `/hostedzone/Z123` → `Z123`. Bare ids are returned unchanged.
#[must_use]
pub fn strip_hosted_zone_prefix(id: &str) -> &str {
    id.strip_prefix(HOSTED_ZONE_ID_PREFIX).unwrap_or(id)
}

// ============================================================================
// ListResourceRecordSets
// ============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ListResourceRecordSetsResponse {
    #[serde(default)]
    pub resource_record_sets: ResourceRecordSetsElement,
    #[serde(default)]
    pub is_truncated: bool,
    #[serde(default)]
    pub next_record_name: Option<String>,
    #[serde(default)]
    pub next_record_type: Option<String>,
    #[serde(default)]
    pub next_record_identifier: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ResourceRecordSetsElement {
    #[serde(rename = "ResourceRecordSet", default)]
    pub resource_record_set: Vec<ResourceRecordSetElement>,
}

#[derive(Debug, Deserialize)]
pub struct ResourceRecordSetElement {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Type")]
    pub record_type: String,
    #[serde(rename = "TTL", default)]
    pub ttl: Option<i64>,
    #[serde(rename = "ResourceRecords", default)]
    pub resource_records: Option<ResourceRecordsElement>,
    #[serde(rename = "AliasTarget", default)]
    pub alias_target: Option<AliasTargetElement>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ResourceRecordsElement {
    #[serde(rename = "ResourceRecord", default)]
    pub resource_record: Vec<ResourceRecordElement>,
}

#[derive(Debug, Deserialize)]
pub struct ResourceRecordElement {
    #[serde(rename = "Value")]
    pub value: String,
}

#[derive(Debug, Deserialize)]
pub struct AliasTargetElement {
    #[serde(rename = "HostedZoneId")]
    pub hosted_zone_id: String,
    #[serde(rename = "DNSName")]
    pub dns_name: String,
}

impl From<ResourceRecordSetElement> for RecordSet {
    fn from(rrset: ResourceRecordSetElement) -> Self {
        Self {
            name: rrset.name,
            record_type: rrset.record_type,
            ttl: rrset.ttl,
            values: rrset
                .resource_records
                .map(|r| r.resource_record.into_iter().map(|rr| rr.value).collect())
                .unwrap_or_default(),
            alias_target: rrset.alias_target.map(|alias| RecordSetAlias {
                dns_name: alias.dns_name,
                hosted_zone_id: alias.hosted_zone_id,
            }),
        }
    }
}

// ============================================================================
// ChangeResourceRecordSets
// ============================================================================

#[derive(Debug, Serialize)]
#[serde(rename = "ChangeResourceRecordSetsRequest")]
pub struct ChangeResourceRecordSetsRequest<'a> {
    #[serde(rename = "@xmlns")]
    pub xmlns: &'static str,
    #[serde(rename = "ChangeBatch")]
    pub change_batch: ChangeBatchElement<'a>,
}

#[derive(Debug, Serialize)]
pub struct ChangeBatchElement<'a> {
    #[serde(rename = "Comment", skip_serializing_if = "Option::is_none")]
    pub comment: Option<&'a str>,
    #[serde(rename = "Changes")]
    pub changes: ChangesElement<'a>,
}

#[derive(Debug, Serialize)]
pub struct ChangesElement<'a> {
    #[serde(rename = "Change")]
    pub change: Vec<ChangeElement<'a>>,
}

#[derive(Debug, Serialize)]
pub struct ChangeElement<'a> {
    #[serde(rename = "Action")]
    pub action: &'static str,
    #[serde(rename = "ResourceRecordSet")]
    pub resource_record_set: ResourceRecordSetBody<'a>,
}

#[derive(Debug, Serialize)]
pub struct ResourceRecordSetBody<'a> {
    #[serde(rename = "Name")]
    pub name: &'a str,
    #[serde(rename = "Type")]
    pub record_type: &'static str,
    #[serde(rename = "TTL", skip_serializing_if = "Option::is_none")]
    pub ttl: Option<i64>,
    #[serde(rename = "ResourceRecords", skip_serializing_if = "Option::is_none")]
    pub resource_records: Option<ResourceRecordsBody<'a>>,
    #[serde(rename = "AliasTarget", skip_serializing_if = "Option::is_none")]
    pub alias_target: Option<AliasTargetBody<'a>>,
}

#[derive(Debug, Serialize)]
pub struct ResourceRecordsBody<'a> {
    #[serde(rename = "ResourceRecord")]
    pub resource_record: Vec<ResourceRecordBody<'a>>,
}

#[derive(Debug, Serialize)]
pub struct ResourceRecordBody<'a> {
    #[serde(rename = "Value")]
    pub value: &'a str,
}

#[derive(Debug, Serialize)]
pub struct AliasTargetBody<'a> {
    #[serde(rename = "HostedZoneId")]
    pub hosted_zone_id: &'a str,
    #[serde(rename = "DNSName")]
    pub dns_name: &'a str,
    #[serde(rename = "EvaluateTargetHealth")]
    pub evaluate_target_health: bool,
}

impl<'a> From<&'a Change> for ChangeElement<'a> {
    fn from(change: &'a Change) -> Self {
        let rrset = &change.record_set;
        let resource_records = (!rrset.records.is_empty()).then(|| ResourceRecordsBody {
            resource_record: rrset
                .records
                .iter()
                .map(|value| ResourceRecordBody { value })
                .collect(),
        });

        Self {
            action: change.action.as_str(),
            resource_record_set: ResourceRecordSetBody {
                name: &rrset.name,
                record_type: rrset.record_type.as_str(),
                ttl: rrset.ttl,
                resource_records,
                alias_target: rrset.alias_target.as_ref().map(|alias| AliasTargetBody {
                    hosted_zone_id: &alias.hosted_zone_id,
                    dns_name: &alias.dns_name,
                    evaluate_target_health: alias.evaluate_target_health,
                }),
            },
        }
    }
}

/// Serialize a change batch, preserving the order of `changes`.
///
/// # Errors
///
/// Returns an error if the XML serializer fails.
pub fn encode_change_batch(changes: &[Change], comment: Option<&str>) -> Result<String, Route53Error> {
    let request = ChangeResourceRecordSetsRequest {
        xmlns: ROUTE53_XML_NAMESPACE,
        change_batch: ChangeBatchElement {
            comment,
            changes: ChangesElement {
                change: changes.iter().map(ChangeElement::from).collect(),
            },
        },
    };

    quick_xml::se::to_string(&request).map_err(|e| Route53Error::RequestEncoding {
        operation: "ChangeResourceRecordSets".to_string(),
        reason: e.to_string(),
    })
}

// ============================================================================
// Error responses
// ============================================================================

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    #[serde(rename = "Error")]
    error: ErrorElement,
}

#[derive(Debug, Deserialize)]
struct ErrorElement {
    #[serde(rename = "Code", default)]
    code: String,
    #[serde(rename = "Message", default)]
    message: String,
}

#[derive(Debug, Deserialize)]
struct InvalidChangeBatchResponse {
    #[serde(rename = "Messages")]
    messages: MessagesElement,
}

#[derive(Debug, Deserialize)]
struct MessagesElement {
    #[serde(rename = "Message", default)]
    message: Vec<String>,
}

/// Extract `(code, message)` from a Route 53 error body.
///
/// Handles the generic `ErrorResponse` document and the `InvalidChangeBatch`
/// document `ChangeResourceRecordSets` returns; anything else yields an empty
/// code and the trimmed body as message.
#[must_use]
pub fn parse_error_body(body: &str) -> (String, String) {
    if let Ok(response) = quick_xml::de::from_str::<ErrorResponse>(body) {
        return (response.error.code, response.error.message);
    }
    if let Ok(response) = quick_xml::de::from_str::<InvalidChangeBatchResponse>(body) {
        return (
            "InvalidChangeBatch".to_string(),
            response.messages.message.join("; "),
        );
    }
    (String::new(), body.trim().to_string())
}

/// Parse a response document, naming the operation in the error.
///
/// # Errors
///
/// Returns [`Route53Error::MalformedResponse`] if the body does not match `T`.
pub fn decode<T: for<'de> Deserialize<'de>>(operation: &str, body: &str) -> Result<T, Route53Error> {
    quick_xml::de::from_str(body).map_err(|e| Route53Error::MalformedResponse {
        operation: operation.to_string(),
        reason: e.to_string(),
    })
}

#[cfg(test)]
#[path = "wire_tests.rs"]
mod wire_tests;

// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Error types for zonesync.
//!
//! This module provides specialized error types for:
//! - Route 53 HTTP API operations (signing, transport, API error responses)
//! - Reconciliation passes (zone listing, record listing, change submission)
//!
//! Only zone and record listing failures abort a reconciliation pass. A failed
//! change batch is reported through [`ProviderError::ChangeBatchFailed`] only
//! when the provider runs with the fail-fast policy; otherwise it is logged and
//! counted.

use thiserror::Error;

/// Errors that can occur while talking to the Route 53 API.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Route53Error {
    /// A required credential environment variable is not set
    #[error("Missing AWS credentials: environment variable {variable} is not set")]
    MissingCredentials {
        /// Name of the missing variable
        variable: String,
    },

    /// The configured API endpoint is not a usable URL
    #[error("Invalid Route 53 endpoint '{endpoint}': {reason}")]
    InvalidEndpoint {
        /// The endpoint as configured
        endpoint: String,
        /// Why it was rejected
        reason: String,
    },

    /// The HTTP request could not be sent or its response could not be read
    ///
    /// Covers DNS resolution failures, refused connections, TLS errors and
    /// timeouts enforced by the HTTP client.
    #[error("HTTP connection to {url} failed: {reason}")]
    HttpConnectionFailed {
        /// The request URL
        url: String,
        /// Reason for the connection failure
        reason: String,
    },

    /// Route 53 answered with a non-success status
    ///
    /// `code` is the Route 53 error code (e.g., `InvalidChangeBatch`,
    /// `Throttling`) when the body could be parsed, empty otherwise.
    #[error("Route 53 returned HTTP {status_code} for {url}: {code} {message}")]
    ApiError {
        /// The request URL
        url: String,
        /// HTTP status code
        status_code: u16,
        /// Route 53 error code
        code: String,
        /// Error message or raw response body
        message: String,
    },

    /// A response body did not match the expected XML document
    #[error("Malformed {operation} response: {reason}")]
    MalformedResponse {
        /// The API operation (e.g., "ListHostedZones")
        operation: String,
        /// Parser error
        reason: String,
    },

    /// A request body could not be serialized
    #[error("Failed to encode {operation} request: {reason}")]
    RequestEncoding {
        /// The API operation
        operation: String,
        /// Serializer error
        reason: String,
    },
}

/// Errors surfaced by a reconciliation pass.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProviderError {
    /// Hosted zones could not be listed; nothing was applied
    #[error("Failed to list hosted zones: {source}")]
    ZoneListingFailed {
        #[source]
        source: Route53Error,
    },

    /// Record sets of a zone could not be listed
    #[error("Failed to list record sets of zone {zone_id}: {source}")]
    RecordListingFailed {
        /// The zone being listed
        zone_id: String,
        #[source]
        source: Route53Error,
    },

    /// A change batch was rejected (only returned under the fail-fast policy)
    #[error("Failed to submit {change_count} changes to zone {zone_name} ({zone_id}): {source}")]
    ChangeBatchFailed {
        /// The zone the batch was sent to
        zone_id: String,
        /// Name of that zone
        zone_name: String,
        /// Number of changes in the rejected batch
        change_count: usize,
        #[source]
        source: Route53Error,
    },
}

#[cfg(test)]
#[path = "errors_tests.rs"]
mod errors_tests;

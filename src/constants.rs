// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Global constants for zonesync.
//!
//! This module contains all numeric and string constants used throughout the codebase.
//! Constants are organized by category for easy maintenance.

// ============================================================================
// Record Constants
// ============================================================================

/// Default TTL for literal DNS records when the endpoint does not configure one (5 minutes)
pub const DEFAULT_DNS_RECORD_TTL_SECS: i32 = 300;

/// Whether alias records pointing at load balancers ask Route 53 to evaluate target health
pub const EVALUATE_TARGET_HEALTH: bool = true;

/// Hostname suffix shared by every AWS Elastic Load Balancer
pub const ELB_HOSTNAME_SUFFIX: &str = ".elb.amazonaws.com";

/// Escape sequence Route 53 uses for a leading `*` label in listed record names
pub const ESCAPED_WILDCARD: &str = "\\052";

// ============================================================================
// Route 53 API Constants
// ============================================================================

/// Maximum number of changes Route 53 accepts in one `ChangeResourceRecordSets` call
pub const MAX_CHANGE_COUNT: usize = 4000;

/// Default Route 53 API endpoint
pub const ROUTE53_ENDPOINT: &str = "https://route53.amazonaws.com";

/// Route 53 REST API version, used as the first path segment
pub const ROUTE53_API_VERSION: &str = "2013-04-01";

/// XML namespace of Route 53 request bodies
pub const ROUTE53_XML_NAMESPACE: &str = "https://route53.amazonaws.com/doc/2013-04-01/";

/// Route 53 is a global service; requests are always signed for this region
pub const ROUTE53_SIGNING_REGION: &str = "us-east-1";

/// Service name used in the SigV4 credential scope
pub const ROUTE53_SERVICE_NAME: &str = "route53";

/// Prefix Route 53 puts in front of hosted zone ids (`/hostedzone/Z123`)
pub const HOSTED_ZONE_ID_PREFIX: &str = "/hostedzone/";

/// HTTP request timeout for Route 53 API calls
pub const ROUTE53_REQUEST_TIMEOUT_SECS: u64 = 30;

// ============================================================================
// Environment Variables
// ============================================================================

/// AWS access key id
pub const ENV_AWS_ACCESS_KEY_ID: &str = "AWS_ACCESS_KEY_ID";

/// AWS secret access key
pub const ENV_AWS_SECRET_ACCESS_KEY: &str = "AWS_SECRET_ACCESS_KEY";

/// Optional AWS session token for temporary credentials
pub const ENV_AWS_SESSION_TOKEN: &str = "AWS_SESSION_TOKEN";

/// Log output format selector (`json` or `text`)
pub const ENV_LOG_FORMAT: &str = "RUST_LOG_FORMAT";

// ============================================================================
// Runtime Constants
// ============================================================================

/// Number of worker threads for Tokio runtime
pub const TOKIO_WORKER_THREADS: usize = 2;

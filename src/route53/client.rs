// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! HTTP client for the Route 53 REST API.
//!
//! [`Route53Client`] implements [`Route53Api`] on top of `reqwest`. Every
//! request is signed with SigV4; list operations follow Route 53's pagination
//! markers until the result is no longer truncated. Nothing is retried: a
//! failed call is returned to the reconciler, which decides what to do with it.

use super::signing::{sign_request, Credentials};
use super::wire::{
    decode, encode_change_batch, parse_error_body, strip_hosted_zone_prefix,
    ListHostedZonesResponse, ListResourceRecordSetsResponse,
};
use super::{HostedZone, RecordSet, Route53Api};
use crate::changes::Change;
use crate::constants::{
    ROUTE53_API_VERSION, ROUTE53_ENDPOINT, ROUTE53_REQUEST_TIMEOUT_SECS, ROUTE53_SERVICE_NAME,
    ROUTE53_SIGNING_REGION,
};
use crate::errors::Route53Error;
use async_trait::async_trait;
use chrono::Utc;
use reqwest::Client as HttpClient;
use std::time::Duration;
use tracing::{debug, error};
use url::Url;

/// Comment attached to every change batch
const CHANGE_BATCH_COMMENT: &str = "Managed by zonesync";

/// Route 53 API client.
#[derive(Debug, Clone)]
pub struct Route53Client {
    http: HttpClient,
    endpoint: Url,
    credentials: Credentials,
    region: String,
}

impl Route53Client {
    /// Create a client for `endpoint` (scheme and authority, e.g. `https://route53.amazonaws.com`).
    ///
    /// # Errors
    ///
    /// Returns an error if the endpoint is not an absolute http(s) URL or the
    /// HTTP client cannot be built.
    pub fn new(endpoint: &str, credentials: Credentials, region: &str) -> Result<Self, Route53Error> {
        let invalid = |reason: String| Route53Error::InvalidEndpoint {
            endpoint: endpoint.to_string(),
            reason,
        };

        let endpoint_url = Url::parse(endpoint).map_err(|e| invalid(e.to_string()))?;
        if !matches!(endpoint_url.scheme(), "http" | "https") || endpoint_url.host_str().is_none() {
            return Err(invalid("expected an http(s) URL with a host".to_string()));
        }

        let http = HttpClient::builder()
            .timeout(Duration::from_secs(ROUTE53_REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| invalid(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            http,
            endpoint: endpoint_url,
            credentials,
            region: region.to_string(),
        })
    }

    /// Create a client for the public Route 53 endpoint using credentials from the environment.
    ///
    /// # Errors
    ///
    /// Returns an error if credentials are missing.
    pub fn from_env() -> Result<Self, Route53Error> {
        Self::new(ROUTE53_ENDPOINT, Credentials::from_env()?, ROUTE53_SIGNING_REGION)
    }

    /// Build `<endpoint>/2013-04-01/<path>?<query>` with a canonically encoded query.
    fn url(&self, path: &str, query: &[(&str, &str)]) -> Url {
        let mut url = self.endpoint.clone();
        url.set_path(&format!("/{ROUTE53_API_VERSION}/{path}"));
        if query.is_empty() {
            url.set_query(None);
        } else {
            let mut pairs: Vec<(String, String)> = query
                .iter()
                .map(|(k, v)| (urlencoding::encode(k).into_owned(), urlencoding::encode(v).into_owned()))
                .collect();
            pairs.sort();
            let query = pairs
                .iter()
                .map(|(k, v)| format!("{k}={v}"))
                .collect::<Vec<_>>()
                .join("&");
            url.set_query(Some(&query));
        }
        url
    }

    /// Send one signed request and return the response body.
    async fn send(&self, method: reqwest::Method, url: Url, body: Option<String>) -> Result<String, Route53Error> {
        let payload = body.as_deref().unwrap_or_default();
        let signed = sign_request(
            method.as_str(),
            &url,
            payload,
            &self.credentials,
            &self.region,
            ROUTE53_SERVICE_NAME,
            Utc::now(),
        );

        debug!(method = %method, url = %url, body_len = payload.len(), "Route 53 API request");

        let mut request = self
            .http
            .request(method.clone(), url.clone())
            .header("X-Amz-Date", &signed.amz_date)
            .header("Authorization", &signed.authorization);
        if let Some(token) = &signed.security_token {
            request = request.header("X-Amz-Security-Token", token);
        }
        if let Some(body) = body {
            request = request.header("Content-Type", "application/xml").body(body);
        }

        let response = request
            .send()
            .await
            .map_err(|e| Route53Error::HttpConnectionFailed {
                url: url.to_string(),
                reason: e.to_string(),
            })?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| Route53Error::HttpConnectionFailed {
                url: url.to_string(),
                reason: format!("failed to read response body: {e}"),
            })?;

        if !status.is_success() {
            let (code, message) = parse_error_body(&text);
            error!(
                method = %method,
                url = %url,
                status = %status,
                code = %code,
                error = %message,
                "Route 53 API request failed"
            );
            return Err(Route53Error::ApiError {
                url: url.to_string(),
                status_code: status.as_u16(),
                code,
                message,
            });
        }

        debug!(method = %method, url = %url, status = %status, response_len = text.len(), "Route 53 API request successful");
        Ok(text)
    }
}

#[async_trait]
impl Route53Api for Route53Client {
    async fn list_hosted_zones(&self) -> Result<Vec<HostedZone>, Route53Error> {
        let mut zones = Vec::new();
        let mut marker: Option<String> = None;
        let mut page_count = 0;

        loop {
            page_count += 1;
            let query: Vec<(&str, &str)> = marker.iter().map(|m| ("marker", m.as_str())).collect();
            let body = self
                .send(reqwest::Method::GET, self.url("hostedzone", &query), None)
                .await?;
            let page: ListHostedZonesResponse = decode("ListHostedZones", &body)?;

            zones.extend(page.hosted_zones.hosted_zone.into_iter().map(HostedZone::from));

            debug!(page = page_count, total_zones = zones.len(), "Fetched hosted zone page");

            match page.next_marker {
                Some(next) if page.is_truncated => marker = Some(next),
                _ => break,
            }
        }

        Ok(zones)
    }

    async fn list_resource_record_sets(&self, zone_id: &str) -> Result<Vec<RecordSet>, Route53Error> {
        let path = format!("hostedzone/{}/rrset", strip_hosted_zone_prefix(zone_id));
        let mut record_sets = Vec::new();
        let mut start: Option<(String, Option<String>, Option<String>)> = None;
        let mut page_count = 0;

        loop {
            page_count += 1;
            let mut query: Vec<(&str, &str)> = Vec::new();
            if let Some((name, record_type, identifier)) = &start {
                query.push(("name", name.as_str()));
                if let Some(record_type) = record_type {
                    query.push(("type", record_type.as_str()));
                }
                if let Some(identifier) = identifier {
                    query.push(("identifier", identifier.as_str()));
                }
            }

            let body = self
                .send(reqwest::Method::GET, self.url(&path, &query), None)
                .await?;
            let page: ListResourceRecordSetsResponse = decode("ListResourceRecordSets", &body)?;

            record_sets.extend(
                page.resource_record_sets
                    .resource_record_set
                    .into_iter()
                    .map(RecordSet::from),
            );

            debug!(
                zone_id = %zone_id,
                page = page_count,
                total_record_sets = record_sets.len(),
                "Fetched record set page"
            );

            match page.next_record_name {
                Some(name) if page.is_truncated => {
                    start = Some((name, page.next_record_type, page.next_record_identifier));
                }
                _ => break,
            }
        }

        Ok(record_sets)
    }

    async fn change_resource_record_sets(
        &self,
        zone_id: &str,
        changes: &[Change],
    ) -> Result<(), Route53Error> {
        let body = encode_change_batch(changes, Some(CHANGE_BATCH_COMMENT))?;
        let path = format!("hostedzone/{}/rrset", strip_hosted_zone_prefix(zone_id));
        self.send(reqwest::Method::POST, self.url(&path, &[]), Some(body))
            .await?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "client_tests.rs"]
mod client_tests;

// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Route 53 HTTP client tests against a mock server.

use wiremock::matchers::{body_string_contains, header, header_exists, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};
use zonesync::canonical_zones::CanonicalZones;
use zonesync::changes::{build_change, ChangeAction};
use zonesync::endpoint::{Endpoint, RecordType};
use zonesync::errors::Route53Error;
use zonesync::route53::client::Route53Client;
use zonesync::route53::signing::Credentials;
use zonesync::route53::Route53Api;

// ============================================================================
// Helper Functions
// ============================================================================

fn client(server: &MockServer) -> Route53Client {
    let mut credentials = Credentials::new("AKIDEXAMPLE", "secret");
    credentials.session_token = Some("session".to_string());
    Route53Client::new(&server.uri(), credentials, "us-east-1").expect("valid endpoint")
}

fn xml(body: String) -> ResponseTemplate {
    ResponseTemplate::new(200)
        .insert_header("content-type", "text/xml")
        .set_body_string(body)
}

fn hosted_zones_page(zones: &[(&str, &str)], next_marker: Option<&str>) -> String {
    let zones: String = zones
        .iter()
        .map(|(id, name)| {
            format!(
                "<HostedZone><Id>/hostedzone/{id}</Id><Name>{name}</Name><CallerReference>r</CallerReference>\
                 <Config><PrivateZone>false</PrivateZone></Config><ResourceRecordSetCount>2</ResourceRecordSetCount></HostedZone>"
            )
        })
        .collect();
    let truncated = match next_marker {
        Some(marker) => format!("<IsTruncated>true</IsTruncated><NextMarker>{marker}</NextMarker>"),
        None => "<IsTruncated>false</IsTruncated>".to_string(),
    };
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<ListHostedZonesResponse xmlns="https://route53.amazonaws.com/doc/2013-04-01/"><HostedZones>{zones}</HostedZones>{truncated}<MaxItems>1</MaxItems></ListHostedZonesResponse>"#
    )
}

fn record_sets_page(names: &[&str], next: Option<(&str, &str)>) -> String {
    let sets: String = names
        .iter()
        .map(|name| {
            format!(
                "<ResourceRecordSet><Name>{name}</Name><Type>A</Type><TTL>300</TTL>\
                 <ResourceRecords><ResourceRecord><Value>192.0.2.1</Value></ResourceRecord></ResourceRecords></ResourceRecordSet>"
            )
        })
        .collect();
    let truncated = match next {
        Some((name, record_type)) => format!(
            "<IsTruncated>true</IsTruncated><NextRecordName>{name}</NextRecordName><NextRecordType>{record_type}</NextRecordType>"
        ),
        None => "<IsTruncated>false</IsTruncated>".to_string(),
    };
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<ListResourceRecordSetsResponse xmlns="https://route53.amazonaws.com/doc/2013-04-01/"><ResourceRecordSets>{sets}</ResourceRecordSets>{truncated}<MaxItems>1</MaxItems></ListResourceRecordSetsResponse>"#
    )
}

// ============================================================================
// Tests
// ============================================================================

#[tokio::test]
async fn test_list_hosted_zones_follows_markers() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/2013-04-01/hostedzone"))
        .and(query_param("marker", "Z2"))
        .respond_with(xml(hosted_zones_page(&[("Z2", "example.org.")], None)))
        .with_priority(1)
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/2013-04-01/hostedzone"))
        .and(header_exists("authorization"))
        .and(header_exists("x-amz-date"))
        .and(header("x-amz-security-token", "session"))
        .respond_with(xml(hosted_zones_page(&[("Z1", "example.com.")], Some("Z2"))))
        .expect(1)
        .mount(&server)
        .await;

    let zones = client(&server).list_hosted_zones().await.unwrap();

    let ids: Vec<&str> = zones.iter().map(|z| z.id.as_str()).collect();
    assert_eq!(ids, vec!["Z1", "Z2"]);
    assert_eq!(zones[1].name, "example.org.");
}

#[tokio::test]
async fn test_list_record_sets_follows_name_and_type() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/2013-04-01/hostedzone/Z1/rrset"))
        .and(query_param("name", "b.example.com."))
        .and(query_param("type", "A"))
        .respond_with(xml(record_sets_page(&["b.example.com."], None)))
        .with_priority(1)
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/2013-04-01/hostedzone/Z1/rrset"))
        .respond_with(xml(record_sets_page(
            &["a.example.com."],
            Some(("b.example.com.", "A")),
        )))
        .expect(1)
        .mount(&server)
        .await;

    let sets = client(&server)
        .list_resource_record_sets("/hostedzone/Z1")
        .await
        .unwrap();

    let names: Vec<&str> = sets.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["a.example.com.", "b.example.com."]);
    assert_eq!(sets[0].values, vec!["192.0.2.1"]);
}

#[tokio::test]
async fn test_change_batch_is_posted_as_xml() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/2013-04-01/hostedzone/Z1/rrset"))
        .and(header("content-type", "application/xml"))
        .and(header_exists("authorization"))
        .and(body_string_contains("<Action>UPSERT</Action>"))
        .and(body_string_contains("<Name>app.example.com.</Name>"))
        .respond_with(xml(
            r#"<?xml version="1.0" encoding="UTF-8"?>
<ChangeResourceRecordSetsResponse xmlns="https://route53.amazonaws.com/doc/2013-04-01/"><ChangeInfo><Id>/change/C1</Id><Status>PENDING</Status><SubmittedAt>2024-01-01T00:00:00Z</SubmittedAt></ChangeInfo></ChangeResourceRecordSetsResponse>"#
                .to_string(),
        ))
        .expect(1)
        .mount(&server)
        .await;

    let change = build_change(
        ChangeAction::Upsert,
        &Endpoint::new("app.example.com.", "192.0.2.7", RecordType::A),
        &CanonicalZones::default(),
    );

    client(&server)
        .change_resource_record_sets("Z1", &[change])
        .await
        .unwrap();
}

#[tokio::test]
async fn test_rejected_batch_maps_to_api_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/2013-04-01/hostedzone/Z1/rrset"))
        .respond_with(ResponseTemplate::new(400).set_body_string(
            r#"<?xml version="1.0"?>
<InvalidChangeBatch xmlns="https://route53.amazonaws.com/doc/2013-04-01/"><Messages><Message>Tried to create resource record set [name='app.example.com.', type='A'] but it already exists</Message></Messages><RequestId>r-1</RequestId></InvalidChangeBatch>"#,
        ))
        .mount(&server)
        .await;

    let change = build_change(
        ChangeAction::Create,
        &Endpoint::new("app.example.com.", "192.0.2.7", RecordType::A),
        &CanonicalZones::default(),
    );

    let err = client(&server)
        .change_resource_record_sets("Z1", &[change])
        .await
        .unwrap_err();

    match err {
        Route53Error::ApiError {
            status_code,
            code,
            message,
            ..
        } => {
            assert_eq!(status_code, 400);
            assert_eq!(code, "InvalidChangeBatch");
            assert!(message.contains("already exists"));
        }
        other => panic!("unexpected error {other:?}"),
    }
}

#[tokio::test]
async fn test_throttling_error_body_is_parsed() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/2013-04-01/hostedzone"))
        .respond_with(ResponseTemplate::new(400).set_body_string(
            "<ErrorResponse><Error><Type>Sender</Type><Code>Throttling</Code><Message>Rate exceeded</Message></Error></ErrorResponse>",
        ))
        .mount(&server)
        .await;

    let err = client(&server).list_hosted_zones().await.unwrap_err();
    assert!(matches!(err, Route53Error::ApiError { ref code, .. } if code == "Throttling"));
}

#[tokio::test]
async fn test_malformed_response_is_reported() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/2013-04-01/hostedzone"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            "<ListHostedZonesResponse><IsTruncated>maybe</IsTruncated></ListHostedZonesResponse>",
        ))
        .mount(&server)
        .await;

    let err = client(&server).list_hosted_zones().await.unwrap_err();
    assert!(matches!(err, Route53Error::MalformedResponse { .. }));
}

#[tokio::test]
async fn test_unreachable_endpoint_is_connection_failure() {
    let client = Route53Client::new(
        "http://127.0.0.1:9",
        Credentials::new("AKIDEXAMPLE", "secret"),
        "us-east-1",
    )
    .unwrap();

    let err = client.list_hosted_zones().await.unwrap_err();
    assert!(matches!(err, Route53Error::HttpConnectionFailed { .. }));
}

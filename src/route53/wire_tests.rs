// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Unit tests for `wire.rs`

#[cfg(test)]
mod tests {
    use crate::canonical_zones::CanonicalZones;
    use crate::changes::{build_change, ChangeAction};
    use crate::endpoint::{Endpoint, RecordType};
    use crate::route53::wire::{
        decode, encode_change_batch, parse_error_body, strip_hosted_zone_prefix,
        ListHostedZonesResponse, ListResourceRecordSetsResponse,
    };
    use crate::route53::{HostedZone, RecordSet, RecordSetAlias};

    const LIST_HOSTED_ZONES: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<ListHostedZonesResponse xmlns="https://route53.amazonaws.com/doc/2013-04-01/">
  <HostedZones>
    <HostedZone>
      <Id>/hostedzone/Z1PA6795UKMFR9</Id>
      <Name>example.com.</Name>
      <CallerReference>ref-1</CallerReference>
      <Config>
        <Comment>public zone</Comment>
        <PrivateZone>false</PrivateZone>
      </Config>
      <ResourceRecordSetCount>4</ResourceRecordSetCount>
    </HostedZone>
    <HostedZone>
      <Id>/hostedzone/Z2682N5HXP0BZ4</Id>
      <Name>internal.example.com.</Name>
      <CallerReference>ref-2</CallerReference>
      <Config>
        <PrivateZone>true</PrivateZone>
      </Config>
      <ResourceRecordSetCount>2</ResourceRecordSetCount>
    </HostedZone>
  </HostedZones>
  <IsTruncated>true</IsTruncated>
  <NextMarker>Z3M3LMPEXAMPLE</NextMarker>
  <MaxItems>2</MaxItems>
</ListHostedZonesResponse>"#;

    const LIST_RECORD_SETS: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<ListResourceRecordSetsResponse xmlns="https://route53.amazonaws.com/doc/2013-04-01/">
  <ResourceRecordSets>
    <ResourceRecordSet>
      <Name>\052.example.com.</Name>
      <Type>A</Type>
      <TTL>300</TTL>
      <ResourceRecords>
        <ResourceRecord><Value>192.0.2.1</Value></ResourceRecord>
        <ResourceRecord><Value>192.0.2.2</Value></ResourceRecord>
      </ResourceRecords>
    </ResourceRecordSet>
    <ResourceRecordSet>
      <Name>lb.example.com.</Name>
      <Type>A</Type>
      <AliasTarget>
        <HostedZoneId>Z35SXDOTRQ7X7K</HostedZoneId>
        <DNSName>my-lb.us-east-1.elb.amazonaws.com.</DNSName>
        <EvaluateTargetHealth>true</EvaluateTargetHealth>
      </AliasTarget>
    </ResourceRecordSet>
  </ResourceRecordSets>
  <IsTruncated>false</IsTruncated>
  <MaxItems>100</MaxItems>
</ListResourceRecordSetsResponse>"#;

    #[test]
    fn test_strip_hosted_zone_prefix() {
        assert_eq!(strip_hosted_zone_prefix("/hostedzone/Z123"), "Z123");
        assert_eq!(strip_hosted_zone_prefix("Z123"), "Z123");
    }

    #[test]
    fn test_decode_list_hosted_zones() {
        let response: ListHostedZonesResponse =
            decode("ListHostedZones", LIST_HOSTED_ZONES).unwrap();

        assert!(response.is_truncated);
        assert_eq!(response.next_marker.as_deref(), Some("Z3M3LMPEXAMPLE"));

        let zones: Vec<HostedZone> = response
            .hosted_zones
            .hosted_zone
            .into_iter()
            .map(HostedZone::from)
            .collect();
        assert_eq!(
            zones,
            vec![
                HostedZone {
                    id: "Z1PA6795UKMFR9".to_string(),
                    name: "example.com.".to_string(),
                    private_zone: false,
                },
                HostedZone {
                    id: "Z2682N5HXP0BZ4".to_string(),
                    name: "internal.example.com.".to_string(),
                    private_zone: true,
                },
            ]
        );
    }

    #[test]
    fn test_decode_empty_hosted_zone_list() {
        let response: ListHostedZonesResponse = decode(
            "ListHostedZones",
            "<ListHostedZonesResponse><HostedZones></HostedZones><IsTruncated>false</IsTruncated></ListHostedZonesResponse>",
        )
        .unwrap();
        assert!(response.hosted_zones.hosted_zone.is_empty());
        assert!(!response.is_truncated);
    }

    #[test]
    fn test_decode_list_record_sets() {
        let response: ListResourceRecordSetsResponse =
            decode("ListResourceRecordSets", LIST_RECORD_SETS).unwrap();

        assert!(!response.is_truncated);
        let sets: Vec<RecordSet> = response
            .resource_record_sets
            .resource_record_set
            .into_iter()
            .map(RecordSet::from)
            .collect();

        assert_eq!(sets.len(), 2);
        assert_eq!(sets[0].name, "\\052.example.com.");
        assert_eq!(sets[0].ttl, Some(300));
        assert_eq!(sets[0].values, vec!["192.0.2.1", "192.0.2.2"]);
        assert_eq!(sets[0].alias_target, None);

        assert!(sets[1].values.is_empty());
        assert_eq!(sets[1].ttl, None);
        assert_eq!(
            sets[1].alias_target,
            Some(RecordSetAlias {
                dns_name: "my-lb.us-east-1.elb.amazonaws.com.".to_string(),
                hosted_zone_id: "Z35SXDOTRQ7X7K".to_string(),
            })
        );
    }

    #[test]
    fn test_decode_garbage_is_malformed() {
        let result: Result<ListHostedZonesResponse, _> = decode(
            "ListHostedZones",
            "<ListHostedZonesResponse><IsTruncated>maybe</IsTruncated></ListHostedZonesResponse>",
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_encode_literal_and_alias_changes_in_order() {
        let zones = CanonicalZones::default();
        let changes = vec![
            build_change(
                ChangeAction::Create,
                &Endpoint::new("app.example.com.", "1.2.3.4", RecordType::A),
                &zones,
            ),
            build_change(
                ChangeAction::Delete,
                &Endpoint::new(
                    "lb.example.com.",
                    "my-lb.us-east-1.elb.amazonaws.com",
                    RecordType::Cname,
                ),
                &zones,
            ),
        ];

        let body = encode_change_batch(&changes, Some("zonesync")).unwrap();

        assert!(body.starts_with("<ChangeResourceRecordSetsRequest"));
        assert!(body.contains(r#"xmlns="https://route53.amazonaws.com/doc/2013-04-01/""#));
        assert!(body.contains("<Comment>zonesync</Comment>"));
        assert!(body.contains("<Name>app.example.com.</Name>"));
        assert!(body.contains("<TTL>300</TTL>"));
        assert!(body.contains("<Value>1.2.3.4</Value>"));
        assert!(body.contains("<HostedZoneId>Z35SXDOTRQ7X7K</HostedZoneId>"));
        assert!(body.contains("<EvaluateTargetHealth>true</EvaluateTargetHealth>"));
        assert_eq!(body.matches("<TTL>").count(), 1, "alias records carry no TTL");

        let create = body.find("<Action>CREATE</Action>").unwrap();
        let delete = body.find("<Action>DELETE</Action>").unwrap();
        assert!(create < delete);
    }

    #[test]
    fn test_encode_without_comment() {
        let body = encode_change_batch(&[], None).unwrap();
        assert!(!body.contains("<Comment>"));
    }

    #[test]
    fn test_parse_generic_error_body() {
        let body = r#"<?xml version="1.0"?>
<ErrorResponse xmlns="https://route53.amazonaws.com/doc/2013-04-01/">
  <Error>
    <Type>Sender</Type>
    <Code>Throttling</Code>
    <Message>Rate exceeded</Message>
  </Error>
  <RequestId>b25f48e8-84fd-11e6-80d9-574e0c4664cb</RequestId>
</ErrorResponse>"#;
        assert_eq!(
            parse_error_body(body),
            ("Throttling".to_string(), "Rate exceeded".to_string())
        );
    }

    #[test]
    fn test_parse_invalid_change_batch_body() {
        let body = r#"<?xml version="1.0"?>
<InvalidChangeBatch xmlns="https://route53.amazonaws.com/doc/2013-04-01/">
  <Messages>
    <Message>Tried to create resource record set [name='app.example.com.', type='A'] but it already exists</Message>
  </Messages>
  <RequestId>b25f48e8-84fd-11e6-80d9-574e0c4664cb</RequestId>
</InvalidChangeBatch>"#;
        let (code, message) = parse_error_body(body);
        assert_eq!(code, "InvalidChangeBatch");
        assert!(message.contains("already exists"));
    }

    #[test]
    fn test_parse_unknown_error_body() {
        assert_eq!(
            parse_error_body("  service unavailable \n"),
            (String::new(), "service unavailable".to_string())
        );
    }
}

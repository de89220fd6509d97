//! Property-based tests using proptest
//!
//! These tests verify principal parsing and the fixed shape of report rows
//! using randomized inputs.

use proptest::prelude::*;
use qsaudit::report::{write_csv, AccessRow, MembershipRow, ResourceKind};
use qsaudit::resource::{Principal, ResourcePermission};

/// Names as QuickSight allows them: no '/' and no ':'
fn arb_name() -> impl Strategy<Value = String> {
    "[A-Za-z0-9@._+=,-]{1,32}"
}

fn arb_principal_type() -> impl Strategy<Value = String> {
    prop_oneof![Just("user".to_string()), Just("group".to_string())]
}

fn arb_region() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("us-east-1".to_string()),
        Just("eu-west-1".to_string()),
        Just("ap-southeast-2".to_string()),
    ]
}

proptest! {
    /// Type, namespace and name are recovered from a well-formed ARN
    #[test]
    fn parse_recovers_components(
        region in arb_region(),
        account in "[0-9]{12}",
        principal_type in arb_principal_type(),
        namespace in arb_name(),
        name in arb_name(),
    ) {
        let arn = format!(
            "arn:aws:quicksight:{}:{}:{}/{}/{}",
            region, account, principal_type, namespace, name
        );
        let principal = Principal::parse(&arn).unwrap();
        prop_assert_eq!(principal.principal_type, principal_type);
        prop_assert_eq!(principal.namespace, namespace);
        prop_assert_eq!(principal.name, name);
    }

    /// Identifiers without a '/' are always rejected
    #[test]
    fn parse_rejects_single_segment(identifier in "[A-Za-z0-9:._-]{0,64}") {
        prop_assert!(Principal::parse(&identifier).is_err());
    }

    /// Identifiers whose first segment has no ':' are always rejected
    #[test]
    fn parse_rejects_missing_colon(
        first in "[A-Za-z0-9._-]{1,16}",
        rest in prop::collection::vec(arb_name(), 1..4),
    ) {
        let identifier = format!("{}/{}", first, rest.join("/"));
        prop_assert!(Principal::parse(&identifier).is_err());
    }

    /// Every access row reads back as exactly five fields, whatever the names contain
    #[test]
    fn access_rows_have_five_fields(
        resource_name in "[ -~]{1,40}",
        principal_type in arb_principal_type(),
        namespace in arb_name(),
        name in arb_name(),
    ) {
        let permission = ResourcePermission {
            principal: format!(
                "arn:aws:quicksight:us-east-1:111122223333:{}/{}/{}",
                principal_type, namespace, name
            ),
            actions: vec![],
        };
        let row = AccessRow::from_permission(ResourceKind::Dataset, &resource_name, &permission).unwrap();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("object_access.csv");
        write_csv(&path, &[row]).unwrap();

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .from_path(&path)
            .unwrap();
        let records: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
        prop_assert_eq!(records.len(), 1);
        prop_assert_eq!(records[0].len(), 5);
        prop_assert_eq!(&records[0][0], "dataset");
        prop_assert_eq!(&records[0][1], resource_name.as_str());
        prop_assert_eq!(&records[0][4], namespace.as_str());
    }

    /// Membership rows read back as two fields in input order
    #[test]
    fn membership_rows_round_trip_in_order(
        pairs in prop::collection::vec(("[ -~]{1,20}", "[ -~]{1,20}"), 0..20),
    ) {
        let rows: Vec<MembershipRow> = pairs
            .iter()
            .map(|(group, member)| MembershipRow { group: group.clone(), member: member.clone() })
            .collect();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("group_membership.csv");
        write_csv(&path, &rows).unwrap();

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .from_path(&path)
            .unwrap();
        let read: Vec<(String, String)> = reader
            .records()
            .map(|r| {
                let r = r.unwrap();
                (r[0].to_string(), r[1].to_string())
            })
            .collect();
        prop_assert_eq!(read, pairs);
    }
}

//! Contract Test: Reconciliation Policies
//!
//! This test verifies the observable command lists of the four policies.
//!
//! Constraints verified:
//! - `merged` only adds, and never touches unlisted interfaces
//! - `replaced` removes stale state of listed interfaces only
//! - `overridden` leaves the device holding exactly the desired interfaces
//! - `deleted` strips listed interfaces, or all of them when none are listed
//!
//! If this test fails, the command lists sent to devices have changed.

mod common;

use common::*;
use lldp_core::model::{InterfaceConfig, Policy};
use lldp_core::traits::{ConfigApplier, FactProvider};
use lldp_core::{MemoryDevice, ReconcileEngine};
use std::collections::BTreeSet;

#[test]
fn merged_disables_interface_with_unchanged_location() {
    let have = vec![elin("eth0", 911).with_enable(true)];
    let want = vec![elin("eth0", 911).with_enable(false)];

    assert_eq!(
        reconcile(Policy::Merged, &want, &have),
        vec!["set service lldp interface eth0 disable"]
    );
}

#[test]
fn merged_configures_civic_location_on_new_interface() {
    let want = vec![civic("eth1", "US", &[(6, "CA")]).with_enable(true)];

    assert_eq!(
        reconcile(Policy::Merged, &want, &[]),
        vec![
            "set service lldp interface eth1 location civic-based country-code US",
            "set service lldp interface eth1 location civic-based ca-type 6 ca-value CA",
        ]
    );
}

#[test]
fn overridden_removes_location_of_unlisted_interface() {
    let have = vec![coordinate("eth2", &[("latitude", "40.0")])];

    let commands = reconcile(Policy::Overridden, &[], &have);
    assert!(commands.contains(&"delete service lldp interface eth2 location".to_string()));

    // Listing the interface without a location has the same effect
    let commands = reconcile(Policy::Overridden, &[InterfaceConfig::new("eth2")], &have);
    assert_eq!(commands, vec!["delete service lldp interface eth2 location"]);
}

#[test]
fn merged_keeps_observed_state_missing_from_want() {
    let have = vec![
        civic("eth1", "US", &[(6, "CA"), (3, "Sunnyvale")]),
        elin("eth2", 5),
    ];
    let want = vec![civic("eth1", "US", &[(6, "CA")])];

    assert!(reconcile(Policy::Merged, &want, &have).is_empty());
}

#[test]
fn replaced_removes_stale_entries_before_adding() {
    let have = vec![
        civic("eth1", "US", &[(6, "CA"), (3, "Sunnyvale")]),
        elin("eth2", 5),
    ];
    let want = vec![civic("eth1", "US", &[(6, "CA"), (1, "Santa Clara")])];

    assert_eq!(
        reconcile(Policy::Replaced, &want, &have),
        vec![
            "delete service lldp interface eth1 location civic-based ca-type 3",
            "set service lldp interface eth1 location civic-based ca-type 1 ca-value Santa Clara",
        ]
    );
}

#[test]
fn replaced_switches_location_variant() {
    let have = vec![coordinate("eth0", &[("latitude", "33.524449N")])];
    let want = vec![elin("eth0", 911)];

    assert_eq!(
        reconcile(Policy::Replaced, &want, &have),
        vec![
            "delete service lldp interface eth0 location",
            "set service lldp interface eth0 location elin 0000000911",
        ]
    );
}

#[test]
fn overridden_purges_unlisted_before_reconciling_listed() {
    let have = vec![
        elin("eth0", 1),
        elin("eth1", 2).with_enable(false),
    ];
    let want = vec![elin("eth0", 3)];

    assert_eq!(
        reconcile(Policy::Overridden, &want, &have),
        vec![
            "delete service lldp interface eth1 location",
            "delete service lldp interface eth1 disable",
            "delete service lldp interface eth0 location",
            "set service lldp interface eth0 location elin 0000000003",
        ]
    );
}

#[test]
fn deleted_strips_listed_interfaces_only() {
    let have = vec![elin("eth0", 1).with_enable(false), elin("eth1", 2)];
    let want = vec![InterfaceConfig::new("eth0"), InterfaceConfig::new("eth9")];

    assert_eq!(
        reconcile(Policy::Deleted, &want, &have),
        vec![
            "delete service lldp interface eth0 location",
            "delete service lldp interface eth0 disable",
        ]
    );
}

#[test]
fn deleted_without_want_strips_everything() {
    let have = vec![elin("eth0", 1), coordinate("eth1", &[("altitude", "2200")])];

    assert_eq!(
        reconcile(Policy::Deleted, &[], &have),
        vec![
            "delete service lldp interface eth0 location",
            "delete service lldp interface eth1 location",
        ]
    );
}

#[test]
fn deleted_with_nothing_observed_is_a_no_op() {
    assert!(reconcile(Policy::Deleted, &[], &[]).is_empty());
}

#[tokio::test]
async fn overridden_leaves_exactly_the_desired_interfaces() {
    let device = MemoryDevice::with_records(vec![
        elin("eth0", 1),
        civic("eth1", "US", &[(6, "CA")]),
        coordinate("eth2", &[("latitude", "40.0")]).with_enable(false),
        InterfaceConfig::new("eth5").with_enable(false),
    ]);
    let want = vec![
        InterfaceConfig::new("eth0").with_enable(false),
        elin("eth3", 5),
        civic("eth5", "DE", &[(1, "Bayern")]),
    ];

    let engine = ReconcileEngine::default();
    let have = device.gather().await.unwrap();
    let commands = engine.reconcile(Policy::Overridden, &want, &have).unwrap();
    device.apply(&commands, true).await.unwrap();

    let names: BTreeSet<String> = device
        .gather()
        .await
        .unwrap()
        .into_iter()
        .map(|record| record.name)
        .collect();
    let expected: BTreeSet<String> = want.iter().map(|record| record.name.clone()).collect();
    assert_eq!(names, expected);
}

use crate::*;
use poietic_variant::{ValueType, Variant};
use std::collections::BTreeMap;

#[test]
fn id_issuer_is_monotonic() {
    let mut issuer = IdIssuer::new();
    assert_eq!(issuer.next(), 0);
    assert_eq!(issuer.next(), 1);
    assert_eq!(issuer.next(), 2);
}

#[test]
fn id_issuer_resumes_after_existing_ids() {
    let mut issuer = IdIssuer::resuming_after([3u64, 1, 7].into_iter()).unwrap();
    assert_eq!(issuer.next(), 8);
}

#[test]
fn derive_snapshot_keeps_object_id_new_snapshot_id() {
    let obj = ObjectId::from_raw(1);
    let snap = Snapshot::new(
        obj,
        SnapshotId::from_raw(1),
        "Stock",
        Structure::Node,
        None,
        BTreeMap::new(),
        SnapshotState::Frozen,
    );
    let derived = snap.derive(SnapshotId::from_raw(2), SnapshotState::Transient);
    assert_eq!(derived.object_id(), obj);
    assert_eq!(derived.snapshot_id(), SnapshotId::from_raw(2));
}

#[test]
fn transient_object_rejects_unknown_attribute() {
    let mut obj = TransientObject::new(
        ObjectId::from_raw(0),
        "Stock",
        Structure::Node,
        None,
        BTreeMap::new(),
    );
    let err = obj
        .set_attribute("bogus", Variant::Int(1), None)
        .unwrap_err();
    assert_eq!(err, ObjectError::UnknownAttribute("bogus".to_string()));
}

#[test]
fn transient_object_rejects_type_mismatch() {
    let mut obj = TransientObject::new(
        ObjectId::from_raw(0),
        "Stock",
        Structure::Node,
        None,
        BTreeMap::new(),
    );
    let err = obj
        .set_attribute("formula", Variant::Bool(true), Some(ValueType::STRING))
        .unwrap_err();
    assert!(matches!(err, ObjectError::AttributeTypeMismatch { .. }));
}

#[test]
fn transient_object_accepts_declared_attribute() {
    let mut obj = TransientObject::new(
        ObjectId::from_raw(0),
        "Stock",
        Structure::Node,
        None,
        BTreeMap::new(),
    );
    obj.set_attribute(
        "formula",
        Variant::String("100".to_string()),
        Some(ValueType::STRING),
    )
    .unwrap();
    assert_eq!(
        obj.attribute("formula"),
        Some(&Variant::String("100".to_string()))
    );
}

#[test]
fn ordered_set_prunes_advisory_reference_without_removing_owner_dependency() {
    let owner = ObjectId::from_raw(0);
    let item = ObjectId::from_raw(1);
    let mut structure = Structure::OrderedSet {
        owner,
        items: vec![item],
    };
    structure.prune_advisory_reference(item);
    assert_eq!(structure, Structure::OrderedSet { owner, items: vec![] });
    assert_eq!(structure.dependencies(), vec![owner]);
}

#[test]
fn edge_structural_dependencies_are_origin_and_target() {
    let origin = ObjectId::from_raw(0);
    let target = ObjectId::from_raw(1);
    let structure = Structure::Edge { origin, target };
    assert_eq!(structure.dependencies(), vec![origin, target]);
}

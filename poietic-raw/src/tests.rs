use crate::{extract, extract_selection, RawFrame};
use poietic_metamodel::{Attribute, Metamodel, ObjectType, StructuralType, Trait};
use poietic_object::Structure;
use poietic_store::{Design, StoreConfig, TransientFrame};
use poietic_variant::{ValueType, Variant};
use std::collections::{BTreeMap, HashSet};

fn metamodel() -> Metamodel<TransientFrame> {
    let mut m = Metamodel::new("StockFlow").with_version("1.0.0");
    m.add_trait(Trait::new("Formula").with_attribute(Attribute::new("level", ValueType::DOUBLE).optional()));
    m.add_object_type(ObjectType::new("Stock", StructuralType::Node).with_trait("Formula"));
    m.add_object_type(ObjectType::new("Flow", StructuralType::Edge));
    m.add_object_type(ObjectType::new("Group", StructuralType::OrderedSet));
    m
}

fn design_with_two_stocks_and_a_flow() -> (Design, poietic_object::ObjectId, poietic_object::ObjectId) {
    let mut design = Design::new(metamodel(), StoreConfig::default());
    let mut frame = design.create_frame(None).unwrap();
    let a = design
        .create(&mut frame, "Stock", Structure::Node, None, BTreeMap::new())
        .unwrap();
    let b = design
        .create(&mut frame, "Stock", Structure::Node, None, BTreeMap::new())
        .unwrap();
    design
        .create(&mut frame, "Flow", Structure::Edge { origin: a, target: b }, None, BTreeMap::new())
        .unwrap();
    design.accept(&mut frame).unwrap();
    (design, a, b)
}

#[test]
fn extracts_metamodel_identity_and_current_frame_reference() {
    let (design, _, _) = design_with_two_stocks_and_a_flow();
    let raw = extract(&design);

    assert_eq!(raw.metamodel_name, "StockFlow");
    assert_eq!(raw.metamodel_version.as_deref(), Some("1.0.0"));
    assert_eq!(raw.system_references.get("current_frame"), Some(&design.current_frame_id()));
}

#[test]
fn extracts_every_snapshot_and_the_current_frame_snapshot_list() {
    let (design, _, _) = design_with_two_stocks_and_a_flow();
    let raw = extract(&design);

    assert_eq!(raw.snapshots.len(), 3);
    let current_frame: &RawFrame = raw
        .frames
        .iter()
        .find(|f| f.id == design.current_frame_id())
        .expect("current frame is present");
    assert_eq!(current_frame.snapshots.len(), 3);
}

#[test]
fn named_frame_is_recorded_in_user_references() {
    let (mut design, _, _) = design_with_two_stocks_and_a_flow();
    let current = design.current_frame_id();
    design.name_frame(current, "released").unwrap();

    let raw = extract(&design);
    assert_eq!(raw.user_references.get("released"), Some(&current));
}

#[test]
fn undo_history_is_exposed_as_a_system_list() {
    let (mut design, a, _) = design_with_two_stocks_and_a_flow();
    let mut frame = design.create_frame(None).unwrap();
    design.remove_cascading(&mut frame, a).unwrap();
    design.accept(&mut frame).unwrap();

    let raw = extract(&design);
    assert_eq!(raw.system_lists.get("undo").map(Vec::len), Some(2));
    assert!(raw.system_lists.get("redo").unwrap().is_empty());
}

#[test]
fn selection_pruning_drops_an_edge_whose_endpoint_is_unselected_but_keeps_the_node() {
    let (design, a, _b) = design_with_two_stocks_and_a_flow();
    let mut selected = HashSet::new();
    selected.insert(a);

    let raw = extract_selection(&design, &selected);

    assert_eq!(raw.snapshots.len(), 1);
    assert_eq!(raw.snapshots[0].id, a);
}

#[test]
fn selection_pruning_prunes_unknown_ordered_set_items_and_keeps_the_set() {
    let mut design = Design::new(metamodel(), StoreConfig::default());
    let mut frame = design.create_frame(None).unwrap();
    let owner = design
        .create(&mut frame, "Stock", Structure::Node, None, BTreeMap::new())
        .unwrap();
    let item_kept = design
        .create(&mut frame, "Stock", Structure::Node, None, BTreeMap::new())
        .unwrap();
    let item_dropped = design
        .create(&mut frame, "Stock", Structure::Node, None, BTreeMap::new())
        .unwrap();
    let set = design
        .create(
            &mut frame,
            "Group",
            Structure::OrderedSet { owner, items: vec![item_kept, item_dropped] },
            None,
            BTreeMap::new(),
        )
        .unwrap();
    design.accept(&mut frame).unwrap();

    let mut selected = HashSet::new();
    selected.insert(owner);
    selected.insert(item_kept);
    selected.insert(set);

    let raw = extract_selection(&design, &selected);
    let set_snapshot = raw.snapshots.iter().find(|s| s.id == set).unwrap();
    match &set_snapshot.structure {
        Structure::OrderedSet { items, .. } => assert_eq!(items, &vec![item_kept]),
        other => panic!("expected an ordered set, got {other:?}"),
    }
}

#[test]
fn selection_pruning_clears_a_parent_reference_outside_the_selection() {
    let mut design = Design::new(metamodel(), StoreConfig::default());
    let mut frame = design.create_frame(None).unwrap();
    let parent = design
        .create(&mut frame, "Stock", Structure::Node, None, BTreeMap::new())
        .unwrap();
    let child = design
        .create(&mut frame, "Stock", Structure::Node, Some(parent), BTreeMap::new())
        .unwrap();
    design.accept(&mut frame).unwrap();

    let mut selected = HashSet::new();
    selected.insert(child);

    let raw = extract_selection(&design, &selected);
    let child_snapshot = raw.snapshots.iter().find(|s| s.id == child).unwrap();
    assert_eq!(child_snapshot.parent, None);
}

#[test]
fn raw_design_round_trips_through_json() {
    let (design, _, _) = design_with_two_stocks_and_a_flow();
    let raw = extract(&design);

    let json = serde_json::to_string(&raw).unwrap();
    let restored: crate::RawDesign = serde_json::from_str(&json).unwrap();
    assert_eq!(restored, raw);
}

#[test]
fn attribute_values_survive_extraction() {
    let mut design = Design::new(metamodel(), StoreConfig::default());
    let mut frame = design.create_frame(None).unwrap();
    let mut attrs = BTreeMap::new();
    attrs.insert("level".to_string(), Variant::Double(42.0));
    let id = design.create(&mut frame, "Stock", Structure::Node, None, attrs).unwrap();
    design.accept(&mut frame).unwrap();

    let raw = extract(&design);
    let snapshot = raw.snapshots.iter().find(|s| s.id == id).unwrap();
    assert_eq!(snapshot.attributes.get("level"), Some(&Variant::Double(42.0)));
}

use crate::{
    Attribute, Cardinality, Constraint, EdgeRule, MergeConflict, Metamodel, ObjectType,
    Requirement, StructuralType, Trait,
};
use poietic_graph::FrameView;
use poietic_object::{ObjectId, Snapshot, SnapshotId, SnapshotState, Structure};
use poietic_predicates::Predicate;
use poietic_variant::ValueType;
use std::collections::BTreeMap;

struct TestFrame {
    objects: BTreeMap<ObjectId, Snapshot>,
}

impl TestFrame {
    fn new() -> Self {
        TestFrame {
            objects: BTreeMap::new(),
        }
    }

    fn add(&mut self, id: u64, type_name: &str, structure: Structure) -> ObjectId {
        let object_id = ObjectId::from_raw(id);
        let snap = Snapshot::new(
            object_id,
            SnapshotId::from_raw(id),
            type_name,
            structure,
            None,
            BTreeMap::new(),
            SnapshotState::Frozen,
        );
        self.objects.insert(object_id, snap);
        object_id
    }
}

impl FrameView for TestFrame {
    type Object = Snapshot;

    fn object_ids(&self) -> impl Iterator<Item = ObjectId> {
        self.objects.keys().copied()
    }

    fn get(&self, id: ObjectId) -> Option<&Snapshot> {
        self.objects.get(&id)
    }
}

fn stock_flow_metamodel() -> Metamodel<TestFrame> {
    let mut metamodel = Metamodel::new("stock-and-flow");
    metamodel.add_trait(
        Trait::new("Named").with_attribute(Attribute::new("name", ValueType::STRING)),
    );
    metamodel.add_object_type(
        ObjectType::new("Stock", StructuralType::Node).with_trait("Named"),
    );
    metamodel.add_object_type(ObjectType::new("Flow", StructuralType::Edge));
    metamodel.add_edge_rule(
        EdgeRule::new("Flow")
            .allow_origin_type("Stock")
            .allow_target_type("Stock")
            .with_origin_cardinality(Cardinality::AtMost(1)),
    );
    metamodel
}

#[test]
fn object_type_and_trait_lookup_are_linear_by_name() {
    let metamodel = stock_flow_metamodel();
    assert_eq!(metamodel.object_type("Stock").unwrap().name(), "Stock");
    assert!(metamodel.object_type("Cloud").is_none());
    assert_eq!(metamodel.trait_def("Named").unwrap().attributes().len(), 1);
}

#[test]
fn structural_type_matches_concrete_structure() {
    assert!(StructuralType::Node.matches(&Structure::Node));
    assert!(!StructuralType::Node.matches(&Structure::Unstructured));
    let edge = Structure::Edge {
        origin: ObjectId::from_raw(0),
        target: ObjectId::from_raw(1),
    };
    assert!(StructuralType::Edge.matches(&edge));
}

#[test]
fn edge_rule_rejects_disallowed_endpoint_types() {
    let metamodel = stock_flow_metamodel();
    let rule = metamodel.edge_rules_for("Flow").next().unwrap();
    assert!(rule
        .check_endpoint_types(ObjectId::from_raw(2), "Stock", "Stock")
        .is_ok());
    assert!(rule
        .check_endpoint_types(ObjectId::from_raw(2), "Cloud", "Stock")
        .is_err());
}

#[test]
fn cardinality_bounds() {
    assert!(Cardinality::AtMost(1).is_satisfied_by(0));
    assert!(Cardinality::AtMost(1).is_satisfied_by(1));
    assert!(!Cardinality::AtMost(1).is_satisfied_by(2));
    assert!(Cardinality::Exactly(2).is_satisfied_by(2));
    assert!(!Cardinality::Exactly(2).is_satisfied_by(1));
}

#[test]
fn constraint_check_collects_violators_in_frame_order() {
    let mut frame = TestFrame::new();
    let cloud = frame.add(0, "Cloud", Structure::Node);
    let stock = frame.add(1, "Stock", Structure::Node);

    let constraint = Constraint::new(
        "only-stocks",
        Predicate::Any,
        Requirement::AllSatisfy(Predicate::is_type(["Stock"])),
    );
    assert_eq!(constraint.check(&frame), vec![cloud]);
    let _ = stock;
}

#[test]
fn validate_mergeability_flags_incompatible_object_types() {
    let base = stock_flow_metamodel();
    let mut conflicting = Metamodel::new("alt");
    conflicting.add_object_type(ObjectType::new("Stock", StructuralType::Edge));

    let conflicts = base.validate_mergeability(&conflicting);
    assert_eq!(conflicts, vec![MergeConflict::IncompatibleObjectType("Stock".to_string())]);
}

#[test]
fn merge_overrides_same_named_definitions_and_accumulates_edge_rules() {
    let base = stock_flow_metamodel();
    let mut addition = Metamodel::new("extension").with_version("2");
    addition.add_object_type(ObjectType::new("Cloud", StructuralType::Node));
    addition.add_edge_rule(EdgeRule::new("Fills"));

    let merged = base.merge(&addition);
    assert!(merged.object_type("Stock").is_some());
    assert!(merged.object_type("Cloud").is_some());
    assert_eq!(merged.edge_rules().count(), 2);
    assert_eq!(merged.version(), Some("2"));
}

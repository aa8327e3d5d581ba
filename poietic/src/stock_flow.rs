//! A ready-made Stock-and-Flow metamodel: `Stock` and `Auxiliary` nodes connected by
//! `Flow` edges, each carrying a `formula` expression. Intended for examples and
//! quick experiments, not as the one true domain this crate supports.

use poietic_metamodel::{
    Attribute, Constraint, EdgeRule, Metamodel, ObjectType, Requirement, StructuralType, Trait,
};
use poietic_predicates::Predicate;
use poietic_store::TransientFrame;
use poietic_variant::ValueType;

/// `Stock` and `Auxiliary` nodes, `Flow` edges; every node carries an optional
/// `formula` string and `Flow`s may only connect `Stock`s.
pub fn stock_flow_metamodel() -> Metamodel<TransientFrame> {
    let mut m = Metamodel::new("StockFlow").with_version("1.0.0");

    m.add_trait(
        Trait::new("Formula").with_attribute(Attribute::new("formula", ValueType::STRING).optional()),
    );
    m.add_trait(Trait::new("Named").with_attribute(Attribute::new("name", ValueType::STRING)));

    m.add_object_type(
        ObjectType::new("Stock", StructuralType::Node)
            .with_trait("Named")
            .with_trait("Formula"),
    );
    m.add_object_type(
        ObjectType::new("Auxiliary", StructuralType::Node)
            .with_trait("Named")
            .with_trait("Formula"),
    );
    m.add_object_type(ObjectType::new("Flow", StructuralType::Edge).with_trait("Formula"));

    m.add_edge_rule(EdgeRule::new("Flow").allow_origin_type("Stock").allow_target_type("Stock"));

    m.add_constraint(Constraint::new(
        "flow_origin_is_stock",
        Predicate::is_type(["Flow"]),
        Requirement::EdgeEndpointTypes {
            origin: Some(Predicate::is_type(["Stock"])),
            target: None,
            edge: None,
        },
    ));
    m.add_constraint(Constraint::new(
        "flow_target_is_stock",
        Predicate::is_type(["Flow"]),
        Requirement::EdgeEndpointTypes {
            origin: None,
            target: Some(Predicate::is_type(["Stock"])),
            edge: None,
        },
    ));

    m
}

#[cfg(test)]
mod tests {
    use super::*;
    use poietic_object::Structure;
    use poietic_store::{Design, StoreConfig};
    use poietic_variant::Variant;
    use std::collections::BTreeMap;

    fn named(name: &str) -> BTreeMap<String, Variant> {
        let mut attrs = BTreeMap::new();
        attrs.insert("name".to_string(), Variant::String(name.to_string()));
        attrs
    }

    #[test]
    fn flow_between_two_stocks_is_accepted() {
        let mut design = Design::new(stock_flow_metamodel(), StoreConfig::default());
        let mut frame = design.create_frame(None).unwrap();

        let a = design.create(&mut frame, "Stock", Structure::Node, None, named("A")).unwrap();
        let b = design.create(&mut frame, "Stock", Structure::Node, None, named("B")).unwrap();

        design
            .create(&mut frame, "Flow", Structure::Edge { origin: a, target: b }, None, BTreeMap::new())
            .unwrap();

        assert!(design.accept(&mut frame).is_ok());
    }

    #[test]
    fn flow_into_an_auxiliary_is_rejected() {
        let mut design = Design::new(stock_flow_metamodel(), StoreConfig::default());
        let mut frame = design.create_frame(None).unwrap();

        let a = design.create(&mut frame, "Stock", Structure::Node, None, named("A")).unwrap();
        let b = design.create(&mut frame, "Auxiliary", Structure::Node, None, named("Aux")).unwrap();

        design
            .create(&mut frame, "Flow", Structure::Edge { origin: a, target: b }, None, BTreeMap::new())
            .unwrap();

        assert!(design.accept(&mut frame).is_err());
    }
}

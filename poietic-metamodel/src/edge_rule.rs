//! [EdgeRule]: static endpoint-type and cardinality rules for one edge type.

use poietic_object::ObjectId;
use thiserror::Error;

/// Bound on how many matching edges a node's neighbourhood may carry, checked by the
/// versioned store during `accept`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cardinality {
    Unbounded,
    AtMost(usize),
    Exactly(usize),
}

impl Cardinality {
    pub fn is_satisfied_by(&self, count: usize) -> bool {
        match self {
            Cardinality::Unbounded => true,
            Cardinality::AtMost(max) => count <= *max,
            Cardinality::Exactly(n) => count == *n,
        }
    }
}

/// A static rule for one edge object type: which origin/target types are allowed, and
/// an optional cardinality bound on how many such edges a node may have.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EdgeRule {
    edge_type: String,
    allowed_origin_types: Vec<String>,
    allowed_target_types: Vec<String>,
    origin_cardinality: Cardinality,
    target_cardinality: Cardinality,
}

impl EdgeRule {
    pub fn new(edge_type: impl Into<String>) -> Self {
        EdgeRule {
            edge_type: edge_type.into(),
            allowed_origin_types: Vec::new(),
            allowed_target_types: Vec::new(),
            origin_cardinality: Cardinality::Unbounded,
            target_cardinality: Cardinality::Unbounded,
        }
    }

    pub fn allow_origin_type(mut self, type_name: impl Into<String>) -> Self {
        self.allowed_origin_types.push(type_name.into());
        self
    }

    pub fn allow_target_type(mut self, type_name: impl Into<String>) -> Self {
        self.allowed_target_types.push(type_name.into());
        self
    }

    pub fn with_origin_cardinality(mut self, cardinality: Cardinality) -> Self {
        self.origin_cardinality = cardinality;
        self
    }

    pub fn with_target_cardinality(mut self, cardinality: Cardinality) -> Self {
        self.target_cardinality = cardinality;
        self
    }

    pub fn edge_type(&self) -> &str {
        &self.edge_type
    }

    pub fn allows_origin_type(&self, type_name: &str) -> bool {
        self.allowed_origin_types.is_empty() || self.allowed_origin_types.iter().any(|t| t == type_name)
    }

    pub fn allows_target_type(&self, type_name: &str) -> bool {
        self.allowed_target_types.is_empty() || self.allowed_target_types.iter().any(|t| t == type_name)
    }

    pub fn origin_cardinality(&self) -> Cardinality {
        self.origin_cardinality
    }

    pub fn target_cardinality(&self) -> Cardinality {
        self.target_cardinality
    }

    /// Validates endpoint types for one edge instance; cardinality is checked
    /// separately by the store, which has neighbourhood counts to hand.
    pub fn check_endpoint_types(
        &self,
        edge_id: ObjectId,
        origin_type: &str,
        target_type: &str,
    ) -> Result<(), EdgeRuleViolation> {
        if !self.allows_origin_type(origin_type) {
            return Err(EdgeRuleViolation {
                edge_id,
                rule: self.clone(),
            });
        }
        if !self.allows_target_type(target_type) {
            return Err(EdgeRuleViolation {
                edge_id,
                rule: self.clone(),
            });
        }
        Ok(())
    }
}

/// Reported by `accept`'s edge-rule pass when an edge's endpoint types violate the
/// rule for its edge type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("edge {edge_id:?} violates rule for edge type {:?}", rule.edge_type())]
pub struct EdgeRuleViolation {
    pub edge_id: ObjectId,
    pub rule: EdgeRule,
}

/// Reported by `accept`'s edge-rule pass when a node's neighbourhood has too many (or
/// too few) edges of this edge type on its origin or target side.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("node {node_id:?} violates neighbourhood cardinality for edge type {:?}", rule.edge_type())]
pub struct EdgeCardinalityViolation {
    pub node_id: ObjectId,
    pub rule: EdgeRule,
}

//! [Predicate]: composable matchers over a single object, read against its frame.

use poietic_graph::FrameView;
use poietic_object::{ObjectId, ObjectView, Structure};
use std::collections::BTreeSet;
use std::rc::Rc;

/// A boolean test over one object, evaluated in the context of the frame it lives in.
///
/// Open recursion via `And`/`Or`/`Not`, mirroring how the object model's own
/// `Structure` composes.
pub enum Predicate<F: FrameView> {
    Any,
    /// Matches objects whose type is in this precomputed set (resolved from a trait
    /// name by the caller holding the metamodel).
    HasTrait(Rc<BTreeSet<String>>),
    IsType(Rc<BTreeSet<String>>),
    EdgeObject {
        origin: Option<Box<Predicate<F>>>,
        target: Option<Box<Predicate<F>>>,
        edge: Option<Box<Predicate<F>>>,
    },
    Function(Rc<dyn Fn(&F::Object, &F) -> bool>),
    And(Box<Predicate<F>>, Box<Predicate<F>>),
    Or(Box<Predicate<F>>, Box<Predicate<F>>),
    Not(Box<Predicate<F>>),
}

impl<F: FrameView> Clone for Predicate<F> {
    fn clone(&self) -> Self {
        match self {
            Predicate::Any => Predicate::Any,
            Predicate::HasTrait(types) => Predicate::HasTrait(types.clone()),
            Predicate::IsType(types) => Predicate::IsType(types.clone()),
            Predicate::EdgeObject { origin, target, edge } => Predicate::EdgeObject {
                origin: origin.clone(),
                target: target.clone(),
                edge: edge.clone(),
            },
            Predicate::Function(f) => Predicate::Function(f.clone()),
            Predicate::And(a, b) => Predicate::And(a.clone(), b.clone()),
            Predicate::Or(a, b) => Predicate::Or(a.clone(), b.clone()),
            Predicate::Not(a) => Predicate::Not(a.clone()),
        }
    }
}

impl<F: FrameView> Predicate<F> {
    pub fn is_type(types: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Predicate::IsType(Rc::new(types.into_iter().map(Into::into).collect()))
    }

    pub fn has_trait(satisfying_types: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Predicate::HasTrait(Rc::new(satisfying_types.into_iter().map(Into::into).collect()))
    }

    pub fn function(f: impl Fn(&F::Object, &F) -> bool + 'static) -> Self {
        Predicate::Function(Rc::new(f))
    }

    pub fn and(self, other: Predicate<F>) -> Self {
        Predicate::And(Box::new(self), Box::new(other))
    }

    pub fn or(self, other: Predicate<F>) -> Self {
        Predicate::Or(Box::new(self), Box::new(other))
    }

    pub fn not(self) -> Self {
        Predicate::Not(Box::new(self))
    }

    /// Evaluates the predicate against `object`, which must live in `frame`.
    pub fn matches(&self, object: &F::Object, frame: &F) -> bool {
        match self {
            Predicate::Any => true,
            Predicate::HasTrait(types) => types.contains(object.type_name()),
            Predicate::IsType(types) => types.contains(object.type_name()),
            Predicate::EdgeObject { origin, target, edge } => {
                let Structure::Edge { origin: origin_id, target: target_id } = object.structure()
                else {
                    return false;
                };
                Self::endpoint_matches(edge, object, frame)
                    && Self::ref_matches(origin, *origin_id, frame)
                    && Self::ref_matches(target, *target_id, frame)
            }
            Predicate::Function(f) => f(object, frame),
            Predicate::And(a, b) => a.matches(object, frame) && b.matches(object, frame),
            Predicate::Or(a, b) => a.matches(object, frame) || b.matches(object, frame),
            Predicate::Not(a) => !a.matches(object, frame),
        }
    }

    fn endpoint_matches(predicate: &Option<Box<Predicate<F>>>, object: &F::Object, frame: &F) -> bool {
        match predicate {
            None => true,
            Some(p) => p.matches(object, frame),
        }
    }

    fn ref_matches(predicate: &Option<Box<Predicate<F>>>, id: ObjectId, frame: &F) -> bool {
        match predicate {
            None => true,
            Some(p) => frame.get(id).is_some_and(|o| p.matches(o, frame)),
        }
    }
}

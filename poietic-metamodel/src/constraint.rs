//! [Constraint]: a named match predicate paired with the requirement it enforces.

use poietic_graph::FrameView;
use poietic_object::ObjectId;
pub use poietic_predicates::Requirement;
use poietic_predicates::Predicate;

/// One named constraint: `match` selects which objects are in scope, `requirement`
/// checks them and reports violators.
pub struct Constraint<F: FrameView> {
    name: String,
    abstract_: String,
    match_predicate: Predicate<F>,
    requirement: Requirement<F>,
}

impl<F: FrameView> Constraint<F> {
    pub fn new(name: impl Into<String>, match_predicate: Predicate<F>, requirement: Requirement<F>) -> Self {
        Constraint {
            name: name.into(),
            abstract_: String::new(),
            match_predicate,
            requirement,
        }
    }

    pub fn with_abstract(mut self, abstract_: impl Into<String>) -> Self {
        self.abstract_ = abstract_.into();
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn abstract_text(&self) -> &str {
        &self.abstract_
    }

    /// Runs the constraint against `frame`: selects objects matching `match`, in frame
    /// order, then hands them to the requirement. Returns the violating object ids.
    pub fn check(&self, frame: &F) -> Vec<ObjectId> {
        let matched: Vec<ObjectId> = frame
            .object_ids()
            .filter(|id| {
                frame
                    .get(*id)
                    .is_some_and(|o| self.match_predicate.matches(o, frame))
            })
            .collect();
        self.requirement.check(frame, &matched)
    }
}

impl<F: FrameView> Clone for Constraint<F> {
    fn clone(&self) -> Self {
        Constraint {
            name: self.name.clone(),
            abstract_: self.abstract_.clone(),
            match_predicate: self.match_predicate.clone(),
            requirement: self.requirement.clone(),
        }
    }
}

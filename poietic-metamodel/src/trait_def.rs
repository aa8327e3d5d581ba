//! [Trait]: a named set of attribute declarations, shared across object types.

use poietic_variant::{Variant, ValueType};

/// One attribute declaration within a [Trait].
#[derive(Debug, Clone, PartialEq)]
pub struct Attribute {
    name: String,
    value_type: ValueType,
    default: Option<Variant>,
    optional: bool,
    abstract_: String,
}

impl Attribute {
    pub fn new(name: impl Into<String>, value_type: ValueType) -> Self {
        Attribute {
            name: name.into(),
            value_type,
            default: None,
            optional: false,
            abstract_: String::new(),
        }
    }

    pub fn with_default(mut self, default: Variant) -> Self {
        self.default = Some(default);
        self
    }

    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    pub fn with_abstract(mut self, abstract_: impl Into<String>) -> Self {
        self.abstract_ = abstract_.into();
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value_type(&self) -> ValueType {
        self.value_type
    }

    pub fn default(&self) -> Option<&Variant> {
        self.default.as_ref()
    }

    pub fn is_optional(&self) -> bool {
        self.optional
    }

    /// True if an attribute of this kind must be present on an instance: neither
    /// optional nor carrying a default to fall back on.
    pub fn is_required(&self) -> bool {
        !self.optional && self.default.is_none()
    }

    pub fn abstract_text(&self) -> &str {
        &self.abstract_
    }
}

/// A named collection of [Attribute] declarations. Object types compose traits; traits
/// share one flat attribute namespace per object type.
#[derive(Debug, Clone, PartialEq)]
pub struct Trait {
    name: String,
    abstract_: String,
    attributes: Vec<Attribute>,
}

impl Trait {
    pub fn new(name: impl Into<String>) -> Self {
        Trait {
            name: name.into(),
            abstract_: String::new(),
            attributes: Vec::new(),
        }
    }

    pub fn with_abstract(mut self, abstract_: impl Into<String>) -> Self {
        self.abstract_ = abstract_.into();
        self
    }

    pub fn with_attribute(mut self, attribute: Attribute) -> Self {
        self.attributes.push(attribute);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn abstract_text(&self) -> &str {
        &self.abstract_
    }

    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    pub fn attribute(&self, name: &str) -> Option<&Attribute> {
        self.attributes.iter().find(|a| a.name() == name)
    }
}

//! Reflected type tags for [crate::Variant].

/// The atomic (non-array) kinds a [crate::Variant] can carry.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AtomType {
    Bool,
    Int,
    Double,
    String,
    Point,
}

impl std::fmt::Display for AtomType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            AtomType::Bool => "bool",
            AtomType::Int => "int",
            AtomType::Double => "double",
            AtomType::String => "string",
            AtomType::Point => "point",
        };
        write!(f, "{name}")
    }
}

/// `ValueType` is the reflected type tag used by trait schemas and the expression
/// binder. Arrays are homogeneous: every element shares the same [AtomType].
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueType {
    Atom(AtomType),
    Array(AtomType),
}

impl ValueType {
    pub const BOOL: ValueType = ValueType::Atom(AtomType::Bool);
    pub const INT: ValueType = ValueType::Atom(AtomType::Int);
    pub const DOUBLE: ValueType = ValueType::Atom(AtomType::Double);
    pub const STRING: ValueType = ValueType::Atom(AtomType::String);
    pub const POINT: ValueType = ValueType::Atom(AtomType::Point);

    pub fn atom(self) -> AtomType {
        match self {
            ValueType::Atom(a) => a,
            ValueType::Array(a) => a,
        }
    }

    pub fn is_array(self) -> bool {
        matches!(self, ValueType::Array(_))
    }
}

impl std::fmt::Display for ValueType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValueType::Atom(a) => write!(f, "{a}"),
            ValueType::Array(a) => write!(f, "[{a}]"),
        }
    }
}

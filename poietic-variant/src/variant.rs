//! [Variant]: the tagged value domain for object attributes and expression literals.

use crate::point::Point;
use crate::value_type::{AtomType, ValueType};
use ordered_float::OrderedFloat;
use thiserror::Error;

/// Failure converting one [Variant] representation into another, or parsing a string
/// into a typed value.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ConversionError {
    #[error("cannot convert {from} to {to}")]
    IncompatibleType { from: ValueType, to: ValueType },
    #[error("value is nil, expected {expected}")]
    WasNil { expected: ValueType },
    #[error("cannot parse {text:?} as {target}")]
    ParseFailure { text: String, target: AtomType },
    #[error("array elements have mismatched types: expected {expected}, found {found}")]
    MismatchedElementType { expected: AtomType, found: AtomType },
}

/// A tagged value: `nil`, an atom (`bool`, `int`, `double`, `string`, `point`), or a
/// homogeneous array of atoms.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub enum Variant {
    Nil,
    Bool(bool),
    Int(i64),
    Double(f64),
    String(String),
    Point(Point),
    BoolArray(Vec<bool>),
    IntArray(Vec<i64>),
    DoubleArray(Vec<f64>),
    StringArray(Vec<String>),
    PointArray(Vec<Point>),
}

impl Variant {
    pub fn value_type(&self) -> Option<ValueType> {
        use Variant::*;
        Some(match self {
            Nil => return None,
            Bool(_) => ValueType::Atom(AtomType::Bool),
            Int(_) => ValueType::Atom(AtomType::Int),
            Double(_) => ValueType::Atom(AtomType::Double),
            String(_) => ValueType::Atom(AtomType::String),
            Point(_) => ValueType::Atom(AtomType::Point),
            BoolArray(_) => ValueType::Array(AtomType::Bool),
            IntArray(_) => ValueType::Array(AtomType::Int),
            DoubleArray(_) => ValueType::Array(AtomType::Double),
            StringArray(_) => ValueType::Array(AtomType::String),
            PointArray(_) => ValueType::Array(AtomType::Point),
        })
    }

    pub fn is_nil(&self) -> bool {
        matches!(self, Variant::Nil)
    }

    /// Checks the value against a declared [ValueType]. `nil` matches any type (the
    /// caller is responsible for rejecting `nil` where an attribute is non-optional).
    pub fn matches_type(&self, expected: ValueType) -> bool {
        match self.value_type() {
            None => true,
            Some(actual) => actual == expected,
        }
    }

    pub fn as_bool(&self) -> Result<bool, ConversionError> {
        match self {
            Variant::Bool(v) => Ok(*v),
            Variant::String(s) => parse_bool(s),
            Variant::Nil => Err(ConversionError::WasNil {
                expected: ValueType::BOOL,
            }),
            other => Err(ConversionError::IncompatibleType {
                from: other.value_type().expect("checked Nil above"),
                to: ValueType::BOOL,
            }),
        }
    }

    pub fn as_int(&self) -> Result<i64, ConversionError> {
        match self {
            Variant::Int(v) => Ok(*v),
            Variant::String(s) => s.trim().parse::<i64>().map_err(|_| ConversionError::ParseFailure {
                text: s.clone(),
                target: AtomType::Int,
            }),
            Variant::Nil => Err(ConversionError::WasNil {
                expected: ValueType::INT,
            }),
            other => Err(ConversionError::IncompatibleType {
                from: other.value_type().expect("checked Nil above"),
                to: ValueType::INT,
            }),
        }
    }

    pub fn as_double(&self) -> Result<f64, ConversionError> {
        match self {
            Variant::Double(v) => Ok(*v),
            Variant::Int(v) => Ok(*v as f64),
            Variant::String(s) => s.trim().parse::<f64>().map_err(|_| ConversionError::ParseFailure {
                text: s.clone(),
                target: AtomType::Double,
            }),
            Variant::Nil => Err(ConversionError::WasNil {
                expected: ValueType::DOUBLE,
            }),
            other => Err(ConversionError::IncompatibleType {
                from: other.value_type().expect("checked Nil above"),
                to: ValueType::DOUBLE,
            }),
        }
    }

    pub fn as_string(&self) -> Result<std::borrow::Cow<'_, str>, ConversionError> {
        match self {
            Variant::String(v) => Ok(std::borrow::Cow::Borrowed(v)),
            Variant::Bool(v) => Ok(std::borrow::Cow::Owned(v.to_string())),
            Variant::Int(v) => Ok(std::borrow::Cow::Owned(v.to_string())),
            Variant::Double(v) => Ok(std::borrow::Cow::Owned(v.to_string())),
            Variant::Point(p) => Ok(std::borrow::Cow::Owned(p.to_string())),
            Variant::Nil => Err(ConversionError::WasNil {
                expected: ValueType::STRING,
            }),
            other => Err(ConversionError::IncompatibleType {
                from: other.value_type().expect("checked Nil above"),
                to: ValueType::STRING,
            }),
        }
    }

    pub fn as_point(&self) -> Result<Point, ConversionError> {
        match self {
            Variant::Point(v) => Ok(*v),
            Variant::String(s) => parse_point(s),
            Variant::Nil => Err(ConversionError::WasNil {
                expected: ValueType::POINT,
            }),
            other => Err(ConversionError::IncompatibleType {
                from: other.value_type().expect("checked Nil above"),
                to: ValueType::POINT,
            }),
        }
    }

    /// Converts to the given declared [ValueType]. Atom-to-atom conversion reuses
    /// `as_*`; array-to-array conversion proceeds element-wise and fails on the first
    /// element that can't be converted to the target's element type.
    pub fn convert_to(&self, target: ValueType) -> Result<Variant, ConversionError> {
        match target {
            ValueType::Atom(AtomType::Bool) => self.as_bool().map(Variant::Bool),
            ValueType::Atom(AtomType::Int) => self.as_int().map(Variant::Int),
            ValueType::Atom(AtomType::Double) => self.as_double().map(Variant::Double),
            ValueType::Atom(AtomType::String) => {
                self.as_string().map(|s| Variant::String(s.into_owned()))
            }
            ValueType::Atom(AtomType::Point) => self.as_point().map(Variant::Point),
            ValueType::Array(atom) => self.convert_array_to(atom),
        }
    }

    fn convert_array_to(&self, atom: AtomType) -> Result<Variant, ConversionError> {
        let elements: Vec<Variant> = match self {
            Variant::BoolArray(v) => v.iter().map(|x| Variant::Bool(*x)).collect(),
            Variant::IntArray(v) => v.iter().map(|x| Variant::Int(*x)).collect(),
            Variant::DoubleArray(v) => v.iter().map(|x| Variant::Double(*x)).collect(),
            Variant::StringArray(v) => v.iter().map(|x| Variant::String(x.clone())).collect(),
            Variant::PointArray(v) => v.iter().map(|x| Variant::Point(*x)).collect(),
            other => {
                return Err(ConversionError::IncompatibleType {
                    from: other.value_type().unwrap_or(ValueType::Array(atom)),
                    to: ValueType::Array(atom),
                })
            }
        };
        let converted: Result<Vec<Variant>, ConversionError> = elements
            .iter()
            .map(|e| {
                e.convert_to(ValueType::Atom(atom)).map_err(|_| {
                    ConversionError::MismatchedElementType {
                        expected: atom,
                        found: e.value_type().map(|t| t.atom()).unwrap_or(atom),
                    }
                })
            })
            .collect();
        let converted = converted?;
        Ok(match atom {
            AtomType::Bool => Variant::BoolArray(
                converted.into_iter().map(|v| v.as_bool().unwrap()).collect(),
            ),
            AtomType::Int => {
                Variant::IntArray(converted.into_iter().map(|v| v.as_int().unwrap()).collect())
            }
            AtomType::Double => Variant::DoubleArray(
                converted.into_iter().map(|v| v.as_double().unwrap()).collect(),
            ),
            AtomType::String => Variant::StringArray(
                converted
                    .into_iter()
                    .map(|v| v.as_string().unwrap().into_owned())
                    .collect(),
            ),
            AtomType::Point => Variant::PointArray(
                converted.into_iter().map(|v| v.as_point().unwrap()).collect(),
            ),
        })
    }

    /// Total ordering key: variants compare equal only within the same tag, and `Nil`
    /// sorts before everything else. Used to give [Variant] a total `Ord` despite
    /// carrying `f64`.
    fn order_key(&self) -> (u8, OrderKey) {
        use Variant::*;
        match self {
            Nil => (0, OrderKey::Unit),
            Bool(v) => (1, OrderKey::Bool(*v)),
            Int(v) => (2, OrderKey::Int(*v)),
            Double(v) => (3, OrderKey::Double(OrderedFloat(*v))),
            String(v) => (4, OrderKey::Str(v.clone())),
            Point(v) => (5, OrderKey::Point(OrderedFloat(v.x), OrderedFloat(v.y))),
            BoolArray(v) => (6, OrderKey::BoolArr(v.clone())),
            IntArray(v) => (7, OrderKey::IntArr(v.clone())),
            DoubleArray(v) => (
                8,
                OrderKey::DoubleArr(v.iter().copied().map(OrderedFloat).collect()),
            ),
            StringArray(v) => (9, OrderKey::StrArr(v.clone())),
            PointArray(v) => (
                10,
                OrderKey::PointArr(
                    v.iter()
                        .map(|p| (OrderedFloat(p.x), OrderedFloat(p.y)))
                        .collect(),
                ),
            ),
        }
    }
}

#[derive(PartialEq, Eq, PartialOrd, Ord)]
enum OrderKey {
    Unit,
    Bool(bool),
    Int(i64),
    Double(OrderedFloat<f64>),
    Str(String),
    Point(OrderedFloat<f64>, OrderedFloat<f64>),
    BoolArr(Vec<bool>),
    IntArr(Vec<i64>),
    DoubleArr(Vec<OrderedFloat<f64>>),
    StrArr(Vec<String>),
    PointArr(Vec<(OrderedFloat<f64>, OrderedFloat<f64>)>),
}

impl Eq for Variant {}

impl PartialOrd for Variant {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Variant {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.order_key().cmp(&other.order_key())
    }
}

impl From<bool> for Variant {
    fn from(v: bool) -> Self {
        Variant::Bool(v)
    }
}
impl From<i64> for Variant {
    fn from(v: i64) -> Self {
        Variant::Int(v)
    }
}
impl From<f64> for Variant {
    fn from(v: f64) -> Self {
        Variant::Double(v)
    }
}
impl From<String> for Variant {
    fn from(v: String) -> Self {
        Variant::String(v)
    }
}
impl From<Point> for Variant {
    fn from(v: Point) -> Self {
        Variant::Point(v)
    }
}

fn parse_bool(s: &str) -> Result<bool, ConversionError> {
    match s.trim() {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(ConversionError::ParseFailure {
            text: s.to_string(),
            target: AtomType::Bool,
        }),
    }
}

fn parse_point(s: &str) -> Result<Point, ConversionError> {
    let inner = s.trim().trim_start_matches('(').trim_end_matches(')');
    let mut parts = inner.split(',');
    let (Some(x_str), Some(y_str), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(ConversionError::ParseFailure {
            text: s.to_string(),
            target: AtomType::Point,
        });
    };
    let x = x_str.trim().parse::<f64>().map_err(|_| ConversionError::ParseFailure {
        text: s.to_string(),
        target: AtomType::Point,
    })?;
    let y = y_str.trim().parse::<f64>().map_err(|_| ConversionError::ParseFailure {
        text: s.to_string(),
        target: AtomType::Point,
    })?;
    Ok(Point::new(x, y))
}

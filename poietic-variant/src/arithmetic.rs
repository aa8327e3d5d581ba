//! Numeric arithmetic over [crate::Variant], as used by the expression binder's
//! built-in function table (see `poietic-expr-bind`).
//!
//! `int` arithmetic promotes to `double` as soon as either operand is a `double`.
//! Integer division/modulo by zero is an error; double division by zero yields `NaN`
//! (IEEE-754 semantics), never an error.

use crate::value_type::ValueType;
use crate::variant::{ConversionError, Variant};
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ArithmeticError {
    #[error("division by zero")]
    DivisionByZero,
    #[error(transparent)]
    Conversion(#[from] ConversionError),
    #[error("arithmetic requires a numeric operand, found {0}")]
    NotNumeric(ValueType),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Numeric {
    Int,
    Double,
}

fn numeric_kind(v: &Variant) -> Result<Numeric, ArithmeticError> {
    match v {
        Variant::Int(_) => Ok(Numeric::Int),
        Variant::Double(_) => Ok(Numeric::Double),
        other => Err(ArithmeticError::NotNumeric(
            other.value_type().unwrap_or(ValueType::INT),
        )),
    }
}

/// Promotes both operands to `double` if either one is a `double`; otherwise keeps
/// both as `int`.
fn promote(a: &Variant, b: &Variant) -> Result<(Numeric, f64, f64), ArithmeticError> {
    let ka = numeric_kind(a)?;
    let kb = numeric_kind(b)?;
    let kind = if ka == Numeric::Double || kb == Numeric::Double {
        Numeric::Double
    } else {
        Numeric::Int
    };
    Ok((kind, a.as_double()?, b.as_double()?))
}

fn from_numeric(kind: Numeric, value: f64) -> Variant {
    match kind {
        Numeric::Int => Variant::Int(value as i64),
        Numeric::Double => Variant::Double(value),
    }
}

pub fn add(a: &Variant, b: &Variant) -> Result<Variant, ArithmeticError> {
    let (kind, x, y) = promote(a, b)?;
    Ok(from_numeric(kind, x + y))
}

pub fn sub(a: &Variant, b: &Variant) -> Result<Variant, ArithmeticError> {
    let (kind, x, y) = promote(a, b)?;
    Ok(from_numeric(kind, x - y))
}

pub fn mul(a: &Variant, b: &Variant) -> Result<Variant, ArithmeticError> {
    let (kind, x, y) = promote(a, b)?;
    Ok(from_numeric(kind, x * y))
}

pub fn div(a: &Variant, b: &Variant) -> Result<Variant, ArithmeticError> {
    let (kind, x, y) = promote(a, b)?;
    match kind {
        Numeric::Double => Ok(Variant::Double(if y == 0.0 { f64::NAN } else { x / y })),
        Numeric::Int => {
            if y == 0.0 {
                Err(ArithmeticError::DivisionByZero)
            } else {
                Ok(Variant::Int((x as i64) / (y as i64)))
            }
        }
    }
}

pub fn rem(a: &Variant, b: &Variant) -> Result<Variant, ArithmeticError> {
    let (kind, x, y) = promote(a, b)?;
    match kind {
        Numeric::Double => Ok(Variant::Double(if y == 0.0 { f64::NAN } else { x % y })),
        Numeric::Int => {
            if y == 0.0 {
                Err(ArithmeticError::DivisionByZero)
            } else {
                Ok(Variant::Int((x as i64) % (y as i64)))
            }
        }
    }
}

pub fn neg(a: &Variant) -> Result<Variant, ArithmeticError> {
    match numeric_kind(a)? {
        Numeric::Int => Ok(Variant::Int(-a.as_int()?)),
        Numeric::Double => Ok(Variant::Double(-a.as_double()?)),
    }
}

pub fn eq(a: &Variant, b: &Variant) -> Result<Variant, ArithmeticError> {
    let (_, x, y) = promote(a, b)?;
    Ok(Variant::Bool(x == y))
}

pub fn ne(a: &Variant, b: &Variant) -> Result<Variant, ArithmeticError> {
    let (_, x, y) = promote(a, b)?;
    Ok(Variant::Bool(x != y))
}

pub fn lt(a: &Variant, b: &Variant) -> Result<Variant, ArithmeticError> {
    let (_, x, y) = promote(a, b)?;
    Ok(Variant::Bool(x < y))
}

pub fn le(a: &Variant, b: &Variant) -> Result<Variant, ArithmeticError> {
    let (_, x, y) = promote(a, b)?;
    Ok(Variant::Bool(x <= y))
}

pub fn gt(a: &Variant, b: &Variant) -> Result<Variant, ArithmeticError> {
    let (_, x, y) = promote(a, b)?;
    Ok(Variant::Bool(x > y))
}

pub fn ge(a: &Variant, b: &Variant) -> Result<Variant, ArithmeticError> {
    let (_, x, y) = promote(a, b)?;
    Ok(Variant::Bool(x >= y))
}

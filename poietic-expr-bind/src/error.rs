use poietic_variant::ValueType;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum BindError {
    #[error("unknown variable {0:?}")]
    UnknownVariable(String),
    #[error("unknown function {0:?}")]
    UnknownFunction(String),
    #[error("function {function:?} expects {expected} argument(s), found {found}")]
    ArityMismatch { function: String, expected: usize, found: usize },
    #[error("function {function:?} argument {index} expects {expected}, found {found}")]
    ArgumentTypeMismatch { function: String, index: usize, expected: ValueType, found: ValueType },
}

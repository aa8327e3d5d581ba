//! Resolves an unbound [poietic_expr::Expr] tree into a [BoundExpression].

use crate::bound_expr::{BoundExpr, BoundExpression};
use crate::bound_ref::BoundRef;
use crate::error::BindError;
use crate::function::FunctionSignature;
use poietic_expr::{Expr, Literal, UnaryOp};
use poietic_variant::ValueType;
use std::collections::{BTreeSet, HashMap};

/// Binds expression trees against a fixed set of variables and callable functions.
///
/// Operators desugar to calls against an internal, fixed table (`__add`, `__lt`,
/// ...) that is not part of `functions` and is never subject to arity or argument
/// type checks: the grammar already guarantees those calls are well-formed.
pub struct Binder<'a> {
    variables: &'a HashMap<String, BoundRef>,
    functions: &'a HashMap<String, FunctionSignature>,
}

impl<'a> Binder<'a> {
    pub fn new(
        variables: &'a HashMap<String, BoundRef>,
        functions: &'a HashMap<String, FunctionSignature>,
    ) -> Self {
        Binder { variables, functions }
    }

    pub fn bind(&self, expr: &Expr) -> Result<BoundExpression, BindError> {
        let mut all_variables = BTreeSet::new();
        let root = self.bind_expr(expr, &mut all_variables)?;
        Ok(BoundExpression { root, all_variables })
    }

    fn bind_expr(&self, expr: &Expr, vars: &mut BTreeSet<String>) -> Result<BoundExpr, BindError> {
        match expr {
            Expr::Literal { value, .. } => Ok(BoundExpr::Literal(*value)),

            Expr::Variable { name, .. } => {
                let bound_ref = *self
                    .variables
                    .get(name)
                    .ok_or_else(|| BindError::UnknownVariable(name.clone()))?;
                vars.insert(name.clone());
                Ok(BoundExpr::Variable(bound_ref))
            }

            Expr::Call { name, args, .. } => {
                let signature = self
                    .functions
                    .get(name)
                    .ok_or_else(|| BindError::UnknownFunction(name.clone()))?;
                if args.len() != signature.arity {
                    return Err(BindError::ArityMismatch {
                        function: name.clone(),
                        expected: signature.arity,
                        found: args.len(),
                    });
                }
                let bound_args = args
                    .iter()
                    .map(|arg| self.bind_expr(arg, vars))
                    .collect::<Result<Vec<_>, _>>()?;
                for (index, (arg, expected)) in bound_args.iter().zip(&signature.arg_types).enumerate() {
                    if let Some(found) = static_type(arg) {
                        if found != *expected {
                            return Err(BindError::ArgumentTypeMismatch {
                                function: name.clone(),
                                index,
                                expected: *expected,
                                found,
                            });
                        }
                    }
                }
                Ok(BoundExpr::Call { function: name.clone(), args: bound_args })
            }

            Expr::Unary { op: UnaryOp::Neg, operand, .. } => {
                let bound_operand = self.bind_expr(operand, vars)?;
                Ok(BoundExpr::Call { function: "__neg".to_string(), args: vec![bound_operand] })
            }

            Expr::Binary { op, left, right, .. } => {
                let bound_left = self.bind_expr(left, vars)?;
                let bound_right = self.bind_expr(right, vars)?;
                Ok(BoundExpr::Call {
                    function: op.function_name().to_string(),
                    args: vec![bound_left, bound_right],
                })
            }
        }
    }
}

/// The statically-known type of a bound sub-expression, where one exists. Object
/// and built-in variable references carry no static type here; their values are
/// only known at evaluation time, so argument type checks are skipped for them
/// rather than rejected.
fn static_type(expr: &BoundExpr) -> Option<ValueType> {
    match expr {
        BoundExpr::Literal(Literal::Int(_)) => Some(ValueType::INT),
        BoundExpr::Literal(Literal::Double(_)) => Some(ValueType::DOUBLE),
        BoundExpr::Variable(_) | BoundExpr::Call { .. } => None,
    }
}

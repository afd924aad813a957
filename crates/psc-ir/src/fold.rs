//! Constant folding.
//!
//! A deliberately small partial evaluator: it substitutes identifier
//! bindings, evaluates literal boolean and integer operations, and
//! nothing else. Backends use it for dead-branch elimination and for
//! resolving loop bounds; it is not a general optimizer.

use alloc::collections::BTreeMap;
use alloc::vec::Vec;

use crate::context::Context;
use crate::expr::{ConditionOp, Expression, UnaryOp};
use crate::function::FunctionParameterSignature;
use crate::ident::Identifier;
use crate::typing::type_of;

/// Fold `expression` as far as the current identifier bindings allow.
/// Never fails; an expression that cannot be reduced comes back with its
/// children simplified.
pub fn simplify(
    expression: &Expression,
    context: &Context,
    bindings: &BTreeMap<Identifier, Expression>,
) -> Expression {
    match expression {
        Expression::Identifier(identifier) => match bindings.get(identifier) {
            // Pass-through bindings are Raw, so this recursion only ever
            // steps through substitution bindings.
            Some(bound) => simplify(bound, context, bindings),
            None => expression.clone(),
        },
        Expression::Condition { op, left, right } => {
            let left = simplify(left, context, bindings);
            let right = simplify(right, context, bindings);
            match (op, &left) {
                (ConditionOp::And, Expression::Boolean(true)) => right,
                (ConditionOp::And, Expression::Boolean(false)) => Expression::Boolean(false),
                (ConditionOp::Or, Expression::Boolean(true)) => Expression::Boolean(true),
                (ConditionOp::Or, Expression::Boolean(false)) => right,
                _ => Expression::condition(*op, left, right),
            }
        }
        Expression::Unary { op, value } => {
            let value = simplify(value, context, bindings);
            match (op, &value) {
                (UnaryOp::Not, Expression::Boolean(b)) => Expression::Boolean(!b),
                (UnaryOp::Negative, Expression::Integer(i)) => {
                    Expression::Integer(i.wrapping_neg())
                }
                (UnaryOp::Negative, Expression::Decimal(d)) => Expression::Decimal(-d),
                (UnaryOp::Positive, Expression::Integer(_))
                | (UnaryOp::Positive, Expression::Decimal(_)) => value,
                _ => Expression::unary(*op, value),
            }
        }
        Expression::Ternary {
            condition,
            truthy,
            falsy,
        } => match simplify(condition, context, bindings) {
            Expression::Boolean(true) => simplify(truthy, context, bindings),
            Expression::Boolean(false) => simplify(falsy, context, bindings),
            condition => Expression::Ternary {
                condition: alloc::boxed::Box::new(condition),
                truthy: alloc::boxed::Box::new(simplify(truthy, context, bindings)),
                falsy: alloc::boxed::Box::new(simplify(falsy, context, bindings)),
            },
        },
        Expression::Call { name, arguments } => {
            let arguments: Vec<Expression> = arguments
                .iter()
                .map(|a| simplify(a, context, bindings))
                .collect();
            if let Some(folded) = fold_call(name, &arguments, context) {
                return folded;
            }
            Expression::Call {
                name: name.clone(),
                arguments,
            }
        }
        Expression::Member { value, name } => Expression::Member {
            value: alloc::boxed::Box::new(simplify(value, context, bindings)),
            name: name.clone(),
        },
        Expression::ArrayAccess { array, index } => Expression::ArrayAccess {
            array: array.clone(),
            index: alloc::boxed::Box::new(simplify(index, context, bindings)),
        },
        Expression::Assignment { left, right } => Expression::Assignment {
            left: left.clone(),
            right: alloc::boxed::Box::new(simplify(right, context, bindings)),
        },
        Expression::Return(value) => {
            Expression::Return(alloc::boxed::Box::new(simplify(value, context, bindings)))
        }
        _ => expression.clone(),
    }
}

/// Apply a registered folding rule when one exists for the resolved
/// signature of this call.
fn fold_call(name: &str, arguments: &[Expression], context: &Context) -> Option<Expression> {
    let mut parameters = Vec::with_capacity(arguments.len());
    for argument in arguments {
        parameters.push(type_of(argument, context).ok()?);
    }
    let signature = FunctionParameterSignature::new(name, parameters);
    let exported = context.lookup(&signature)?;
    let rule = context.fold_rule(exported)?;
    rule(arguments)
}

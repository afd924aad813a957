//! Expression compilation.
//!
//! Total over every expression variant. Sub-expressions nested inside a
//! binary, unary, ternary or assignment context are packed in explicit
//! parentheses, so operator precedence never has to be computed.

use alloc::format;
use alloc::string::{String, ToString};
use alloc::vec::Vec;

use psc_ir::{
    type_of, ConditionOp, Expression, FunctionParameterSignature, Identifier, UnaryOp,
};

use crate::builtins::direct_call;
use crate::error::{GenError, GenResult};
use crate::program::Session;

impl Session<'_> {
    /// Compile one expression to target text.
    pub(crate) fn expression(&self, expression: &Expression) -> GenResult<String> {
        match expression {
            Expression::Boolean(value) => Ok(value.to_string()),
            Expression::Integer(value) => Ok(value.to_string()),
            Expression::Decimal(value) => Ok(decimal(*value)),
            Expression::Identifier(identifier) => self.variable(identifier),
            Expression::Member { value, name } => {
                Ok(format!("{}.{}", self.pack(value)?, name))
            }
            Expression::ArrayAccess { array, index } => Ok(format!(
                "{}[{}]",
                self.pack(array)?,
                self.expression(index)?
            )),
            Expression::Condition { op, left, right } => {
                let operator = match op {
                    ConditionOp::And => "&&",
                    ConditionOp::Or => "||",
                };
                self.combine(left, right, operator)
            }
            Expression::Assignment { left, right } => {
                self.combine_not_packed(left, right, "=")
            }
            Expression::Unary { op, value } => {
                let value = self.pack(value)?;
                Ok(match op {
                    UnaryOp::IncrementGet => format!("++{}", value),
                    UnaryOp::DecrementGet => format!("--{}", value),
                    UnaryOp::GetIncrement => format!("{}++", value),
                    UnaryOp::GetDecrement => format!("{}--", value),
                    UnaryOp::Positive => format!("+{}", value),
                    UnaryOp::Negative => format!("-{}", value),
                    UnaryOp::BitNot => format!("~{}", value),
                    UnaryOp::Not => format!("!{}", value),
                })
            }
            Expression::Ternary {
                condition,
                truthy,
                falsy,
            } => Ok(format!(
                "{} ? {} : {}",
                self.pack(condition)?,
                self.pack(truthy)?,
                self.pack(falsy)?
            )),
            Expression::Call { name, arguments } => self.call(name, arguments),
            Expression::ArrayLiteral(elements) => {
                let mut compiled = Vec::with_capacity(elements.len());
                for element in elements {
                    compiled.push(self.expression(element)?);
                }
                Ok(format!("({})", compiled.join(", ")))
            }
            Expression::Return(value) => Ok(format!("return {}", self.pack(value)?)),
            Expression::Void => Ok(String::new()),
            Expression::Raw { code, .. } => Ok(code.clone()),
        }
    }

    /// Resolve an identifier through the environment.
    fn variable(&self, identifier: &Identifier) -> GenResult<String> {
        match self.env.get(identifier) {
            Some(bound) => self.expression(bound),
            None => Err(GenError::unknown_identifier(identifier.name.clone())),
        }
    }

    /// Resolve a call: exact overload lookup on the computed argument
    /// types, then native builtin, then per-program implementation, then
    /// a direct call by declared name.
    fn call(&self, name: &str, arguments: &[Expression]) -> GenResult<String> {
        let mut compiled = Vec::with_capacity(arguments.len());
        for argument in arguments {
            compiled.push(self.expression(argument)?);
        }
        let mut parameters = Vec::with_capacity(arguments.len());
        for argument in arguments {
            parameters.push(type_of(argument, self.context)?);
        }
        let signature = FunctionParameterSignature::new(name, parameters);
        let resolved = self
            .context
            .lookup(&signature)
            .ok_or_else(|| GenError::unmatched_function(signature.to_string()))?;
        if let Some(native) = self.builtins.get(resolved) {
            return Ok(native(&compiled));
        }
        if let Some(specialized) = self.implementations.get(resolved) {
            return Ok(specialized(&compiled));
        }
        Ok(direct_call(&resolved.name, &compiled))
    }

    fn combine(
        &self,
        left: &Expression,
        right: &Expression,
        operator: &str,
    ) -> GenResult<String> {
        Ok(format!(
            "{} {} {}",
            self.pack(left)?,
            operator,
            self.pack(right)?
        ))
    }

    fn combine_not_packed(
        &self,
        left: &Expression,
        right: &Expression,
        operator: &str,
    ) -> GenResult<String> {
        Ok(format!(
            "{} {} {}",
            self.expression(left)?,
            operator,
            self.pack(right)?
        ))
    }

    /// Wrap a compiled sub-expression in parentheses.
    pub(crate) fn pack(&self, expression: &Expression) -> GenResult<String> {
        Ok(format!("({})", self.expression(expression)?))
    }
}

/// The target grammar requires a decimal point in floating literals.
fn decimal(value: f64) -> String {
    let text = value.to_string();
    if text.contains('.') {
        text
    } else {
        format!("{}.0", text)
    }
}

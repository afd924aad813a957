//! Expression type computation.
//!
//! Computes the exported type of an expression against a context. The
//! tree is assumed to have been type-checked by the front-end; this pass
//! only projects types, it does not validate operand compatibility.

use alloc::format;

use crate::context::Context;
use crate::error::{IrError, IrResult};
use crate::expr::{Expression, UnaryOp};
use crate::function::FunctionParameterSignature;
use crate::types::{TypeExported, Types};

/// Compute the exported type of `expression`.
pub fn type_of(expression: &Expression, context: &Context) -> IrResult<TypeExported> {
    match expression {
        Expression::Boolean(_) => Ok(TypeExported::new(Types::Boolean)),
        Expression::Integer(_) => Ok(TypeExported::new(Types::Int)),
        Expression::Decimal(_) => Ok(TypeExported::new(Types::Float)),
        Expression::Identifier(identifier) => Ok(identifier.ty.exported()),
        Expression::Member { value, name } => member_type(type_of(value, context)?, name),
        Expression::ArrayAccess { array, .. } => index_type(type_of(array, context)?),
        Expression::Condition { .. } => Ok(TypeExported::new(Types::Boolean)),
        Expression::Assignment { left, .. } => type_of(left, context),
        Expression::Unary { op, value } => match op {
            UnaryOp::Not => Ok(TypeExported::new(Types::Boolean)),
            _ => type_of(value, context),
        },
        Expression::Ternary { truthy, .. } => type_of(truthy, context),
        Expression::Call { name, arguments } => {
            let mut parameters = alloc::vec::Vec::with_capacity(arguments.len());
            for argument in arguments {
                parameters.push(type_of(argument, context)?);
            }
            let signature = FunctionParameterSignature::new(name.clone(), parameters);
            context
                .lookup(&signature)
                .map(|exported| exported.returned)
                .ok_or_else(|| IrError::unknown_function(format!("{}", signature)))
        }
        Expression::ArrayLiteral(elements) => {
            let first = elements.first().ok_or(IrError::EmptyArrayLiteral)?;
            let element = type_of(first, context)?;
            Ok(TypeExported::array(element.kind))
        }
        Expression::Return(_) => Ok(TypeExported::new(Types::Void)),
        Expression::Void => Ok(TypeExported::new(Types::Void)),
        Expression::Raw { ty, .. } => Ok(*ty),
    }
}

/// Type a component selection such as `v.xyz` or `color.r`.
fn member_type(base: TypeExported, member: &str) -> IrResult<TypeExported> {
    if base.array {
        return Err(IrError::invalid_member(format!(
            "{} has no member {}",
            base, member
        )));
    }
    let size = base.kind.vector_size();
    let component = base.kind.component();
    if let (Some(size), Some(component)) = (size, component) {
        if let Some(kind) = swizzle(component, size, member) {
            return Ok(TypeExported::new(kind));
        }
    }
    Err(IrError::invalid_member(format!(
        "{} has no member {}",
        base, member
    )))
}

/// Resolve a swizzle against one of the three component alphabets.
fn swizzle(component: Types, size: usize, member: &str) -> Option<Types> {
    if member.is_empty() || member.len() > 4 {
        return None;
    }
    for alphabet in ["xyzw", "rgba", "stpq"] {
        let in_range = member
            .chars()
            .all(|c| alphabet.find(c).map_or(false, |i| i < size));
        if in_range {
            return if member.len() == 1 {
                Some(component)
            } else {
                Types::vector(component, member.len())
            };
        }
    }
    None
}

/// Type an array, matrix-column or vector-component access.
fn index_type(base: TypeExported) -> IrResult<TypeExported> {
    if base.array {
        return Ok(TypeExported::new(base.kind));
    }
    if let Some(column) = base.kind.matrix_column() {
        return Ok(TypeExported::new(column));
    }
    if let Some(component) = base.kind.component() {
        return Ok(TypeExported::new(component));
    }
    Err(IrError::not_indexable(format!("{}", base)))
}

#[cfg(test)]
mod tests {
    use alloc::boxed::Box;
    use alloc::vec;

    use super::*;
    use crate::ident::Identifier;
    use crate::types::Type;

    fn context() -> Context {
        Context::stdlib_only()
    }

    #[test]
    fn test_literal_types() {
        assert_eq!(
            type_of(&Expression::Boolean(true), &context()).unwrap(),
            TypeExported::new(Types::Boolean)
        );
        assert_eq!(
            type_of(&Expression::Integer(3), &context()).unwrap(),
            TypeExported::new(Types::Int)
        );
        assert_eq!(
            type_of(&Expression::Decimal(0.5), &context()).unwrap(),
            TypeExported::new(Types::Float)
        );
    }

    #[test]
    fn test_swizzle_types() {
        let v = Identifier::new("v", Type::new(Types::Vector4));
        let one = type_of(
            &Expression::member(Expression::identifier(&v), "x"),
            &context(),
        )
        .unwrap();
        assert_eq!(one, TypeExported::new(Types::Float));
        let three = type_of(
            &Expression::member(Expression::identifier(&v), "rgb"),
            &context(),
        )
        .unwrap();
        assert_eq!(three, TypeExported::new(Types::Vector3));
    }

    #[test]
    fn test_swizzle_out_of_range() {
        let v = Identifier::new("v", Type::new(Types::Vector2));
        let result = type_of(
            &Expression::member(Expression::identifier(&v), "z"),
            &context(),
        );
        assert!(matches!(result, Err(IrError::InvalidMember(_))));
    }

    #[test]
    fn test_mixed_alphabet_rejected() {
        let v = Identifier::new("v", Type::new(Types::Vector4));
        let result = type_of(
            &Expression::member(Expression::identifier(&v), "xg"),
            &context(),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_array_and_matrix_indexing() {
        let bones = Identifier::new(
            "bones",
            Type::new(Types::Matrix4).with_array(Expression::Integer(8)),
        );
        let element = type_of(
            &Expression::ArrayAccess {
                array: Box::new(Expression::identifier(&bones)),
                index: Box::new(Expression::Integer(0)),
            },
            &context(),
        )
        .unwrap();
        assert_eq!(element, TypeExported::new(Types::Matrix4));

        let m = Identifier::new("m", Type::new(Types::Matrix3));
        let column = type_of(
            &Expression::ArrayAccess {
                array: Box::new(Expression::identifier(&m)),
                index: Box::new(Expression::Integer(1)),
            },
            &context(),
        )
        .unwrap();
        assert_eq!(column, TypeExported::new(Types::Vector3));
    }

    #[test]
    fn test_call_type_resolves_overload() {
        let ty = type_of(
            &Expression::call(
                "plus",
                vec![Expression::Decimal(1.0), Expression::Decimal(2.0)],
            ),
            &context(),
        )
        .unwrap();
        assert_eq!(ty, TypeExported::new(Types::Float));

        let ty = type_of(
            &Expression::call("plus", vec![Expression::Integer(1), Expression::Integer(2)]),
            &context(),
        )
        .unwrap();
        assert_eq!(ty, TypeExported::new(Types::Int));
    }

    #[test]
    fn test_unknown_call_reports_signature() {
        let result = type_of(
            &Expression::call("plus", vec![Expression::Boolean(true), Expression::Integer(1)]),
            &context(),
        );
        match result {
            Err(IrError::UnknownFunction(signature)) => {
                assert_eq!(signature, "plus(bool, int)");
            }
            other => panic!("expected UnknownFunction, got {:?}", other),
        }
    }
}

//! The abstract standard-library catalogue.
//!
//! Declares every callable signature the shader language knows about:
//! the operator functions the front-end lowers infix syntax to, value
//! constructors, texture sampling and the component-wise math builtins.
//! Backends must provide a concrete implementation for every signature
//! declared here; that completeness is validated when a backend is
//! constructed.
//!
//! Integer and boolean signatures that can participate in loop bounds
//! and availability guards register compile-time folding rules.

use alloc::vec::Vec;

use crate::context::ConstFold;
use crate::expr::Expression;
use crate::function::FunctionExportedSignature;
use crate::types::{TypeExported, Types};

/// One abstract declaration: a signature plus an optional folding rule.
pub struct StdFunction {
    pub signature: FunctionExportedSignature,
    pub fold: Option<ConstFold>,
}

const FLOAT_VECTORS: [Types; 3] = [Types::Vector2, Types::Vector3, Types::Vector4];
const INT_VECTORS: [Types; 3] = [Types::Vector2i, Types::Vector3i, Types::Vector4i];
const BOOL_VECTORS: [Types; 3] = [Types::Vector2b, Types::Vector3b, Types::Vector4b];
const MATRICES: [(Types, Types); 3] = [
    (Types::Matrix2, Types::Vector2),
    (Types::Matrix3, Types::Vector3),
    (Types::Matrix4, Types::Vector4),
];

/// Names of the binary arithmetic operator functions.
pub const ARITHMETIC: [&str; 4] = ["plus", "minus", "times", "division"];

/// Names of the ordering comparison operator functions.
pub const COMPARISONS: [&str; 4] = ["less_than", "less_equal", "greater_than", "greater_equal"];

/// The full catalogue, rebuilt on each call; callers cache the result.
pub fn functions() -> Vec<StdFunction> {
    let mut out = Vec::new();

    arithmetic(&mut out);
    comparisons(&mut out);
    bitwise(&mut out);
    constructors(&mut out);
    math(&mut out);
    geometric(&mut out);

    declare(
        &mut out,
        "texture",
        Types::Vector4,
        &[Types::Texture2, Types::Vector2],
    );

    out
}

fn declare(out: &mut Vec<StdFunction>, name: &str, returned: Types, parameters: &[Types]) {
    out.push(StdFunction {
        signature: signature(name, returned, parameters),
        fold: None,
    });
}

fn declare_fold(
    out: &mut Vec<StdFunction>,
    name: &str,
    returned: Types,
    parameters: &[Types],
    fold: ConstFold,
) {
    out.push(StdFunction {
        signature: signature(name, returned, parameters),
        fold: Some(fold),
    });
}

fn signature(name: &str, returned: Types, parameters: &[Types]) -> FunctionExportedSignature {
    FunctionExportedSignature::new(
        name,
        TypeExported::new(returned),
        parameters.iter().map(|p| TypeExported::new(*p)).collect(),
    )
}

fn arithmetic(out: &mut Vec<StdFunction>) {
    for op in ARITHMETIC {
        declare(out, op, Types::Float, &[Types::Float, Types::Float]);
        declare_fold(out, op, Types::Int, &[Types::Int, Types::Int], int_op(op));
        for vector in FLOAT_VECTORS {
            declare(out, op, vector, &[vector, vector]);
            declare(out, op, vector, &[vector, Types::Float]);
            declare(out, op, vector, &[Types::Float, vector]);
        }
        for vector in INT_VECTORS {
            declare(out, op, vector, &[vector, vector]);
            declare(out, op, vector, &[vector, Types::Int]);
            declare(out, op, vector, &[Types::Int, vector]);
        }
    }
    for (matrix, column) in MATRICES {
        declare(out, "plus", matrix, &[matrix, matrix]);
        declare(out, "minus", matrix, &[matrix, matrix]);
        declare(out, "times", matrix, &[matrix, matrix]);
        declare(out, "times", column, &[matrix, column]);
        declare(out, "times", column, &[column, matrix]);
        declare(out, "times", matrix, &[matrix, Types::Float]);
        declare(out, "times", matrix, &[Types::Float, matrix]);
    }

    declare_fold(
        out,
        "modulo",
        Types::Int,
        &[Types::Int, Types::Int],
        fold_int_modulo,
    );
    declare(out, "modulo", Types::Float, &[Types::Float, Types::Float]);
    for vector in FLOAT_VECTORS {
        declare(out, "modulo", vector, &[vector, vector]);
        declare(out, "modulo", vector, &[vector, Types::Float]);
    }
}

fn comparisons(out: &mut Vec<StdFunction>) {
    for op in COMPARISONS {
        declare_fold(
            out,
            op,
            Types::Boolean,
            &[Types::Int, Types::Int],
            int_comparison(op),
        );
        declare(out, op, Types::Boolean, &[Types::Float, Types::Float]);
    }

    for op in ["equals", "not_equals"] {
        declare_fold(
            out,
            op,
            Types::Boolean,
            &[Types::Int, Types::Int],
            equality(op),
        );
        declare_fold(
            out,
            op,
            Types::Boolean,
            &[Types::Boolean, Types::Boolean],
            equality(op),
        );
        declare(out, op, Types::Boolean, &[Types::Float, Types::Float]);
        for vector in FLOAT_VECTORS
            .iter()
            .chain(INT_VECTORS.iter())
            .chain(BOOL_VECTORS.iter())
        {
            declare(out, op, Types::Boolean, &[*vector, *vector]);
        }
    }
}

fn bitwise(out: &mut Vec<StdFunction>) {
    for op in ["bit_and", "bit_or", "bit_xor", "shift_left", "shift_right"] {
        declare(out, op, Types::Int, &[Types::Int, Types::Int]);
    }
}

fn constructors(out: &mut Vec<StdFunction>) {
    declare(out, "float", Types::Float, &[Types::Int]);
    declare(out, "int", Types::Int, &[Types::Float]);

    declare(out, "vector2", Types::Vector2, &[Types::Float, Types::Float]);
    declare(out, "vector2", Types::Vector2, &[Types::Float]);

    declare(
        out,
        "vector3",
        Types::Vector3,
        &[Types::Float, Types::Float, Types::Float],
    );
    declare(out, "vector3", Types::Vector3, &[Types::Vector2, Types::Float]);
    declare(out, "vector3", Types::Vector3, &[Types::Float, Types::Vector2]);
    declare(out, "vector3", Types::Vector3, &[Types::Float]);

    declare(
        out,
        "vector4",
        Types::Vector4,
        &[Types::Float, Types::Float, Types::Float, Types::Float],
    );
    declare(out, "vector4", Types::Vector4, &[Types::Vector3, Types::Float]);
    declare(out, "vector4", Types::Vector4, &[Types::Float, Types::Vector3]);
    declare(out, "vector4", Types::Vector4, &[Types::Vector2, Types::Vector2]);
    declare(
        out,
        "vector4",
        Types::Vector4,
        &[Types::Vector2, Types::Float, Types::Float],
    );
    declare(out, "vector4", Types::Vector4, &[Types::Float]);

    declare(out, "matrix2", Types::Matrix2, &[Types::Vector2, Types::Vector2]);
    declare(out, "matrix2", Types::Matrix2, &[Types::Float]);
    declare(
        out,
        "matrix3",
        Types::Matrix3,
        &[Types::Vector3, Types::Vector3, Types::Vector3],
    );
    declare(out, "matrix3", Types::Matrix3, &[Types::Float]);
    declare(
        out,
        "matrix4",
        Types::Matrix4,
        &[Types::Vector4, Types::Vector4, Types::Vector4, Types::Vector4],
    );
    declare(out, "matrix4", Types::Matrix4, &[Types::Float]);
}

fn math(out: &mut Vec<StdFunction>) {
    let unary = [
        "abs",
        "sign",
        "floor",
        "ceil",
        "fract",
        "sqrt",
        "inversesqrt",
        "sin",
        "cos",
        "tan",
        "asin",
        "acos",
        "atan",
        "exp",
        "log",
        "exp2",
        "log2",
    ];
    for name in unary {
        declare(out, name, Types::Float, &[Types::Float]);
        for vector in FLOAT_VECTORS {
            declare(out, name, vector, &[vector]);
        }
    }
    declare(out, "abs", Types::Int, &[Types::Int]);
    declare(out, "sign", Types::Int, &[Types::Int]);

    for name in ["pow", "atan", "min", "max", "step"] {
        declare(out, name, Types::Float, &[Types::Float, Types::Float]);
        for vector in FLOAT_VECTORS {
            declare(out, name, vector, &[vector, vector]);
        }
    }
    for name in ["min", "max"] {
        declare(out, name, Types::Int, &[Types::Int, Types::Int]);
        for vector in FLOAT_VECTORS {
            declare(out, name, vector, &[vector, Types::Float]);
        }
    }
    for vector in FLOAT_VECTORS {
        declare(out, "step", vector, &[Types::Float, vector]);
    }

    for name in ["clamp", "mix", "smoothstep"] {
        declare(
            out,
            name,
            Types::Float,
            &[Types::Float, Types::Float, Types::Float],
        );
        for vector in FLOAT_VECTORS {
            declare(out, name, vector, &[vector, vector, vector]);
        }
    }
    for vector in FLOAT_VECTORS {
        declare(out, "clamp", vector, &[vector, Types::Float, Types::Float]);
        declare(out, "mix", vector, &[vector, vector, Types::Float]);
        declare(
            out,
            "smoothstep",
            vector,
            &[Types::Float, Types::Float, vector],
        );
    }
    declare(
        out,
        "clamp",
        Types::Int,
        &[Types::Int, Types::Int, Types::Int],
    );
}

fn geometric(out: &mut Vec<StdFunction>) {
    for vector in FLOAT_VECTORS {
        declare(out, "dot", Types::Float, &[vector, vector]);
        declare(out, "length", Types::Float, &[vector]);
        declare(out, "distance", Types::Float, &[vector, vector]);
        declare(out, "normalize", vector, &[vector]);
        declare(out, "reflect", vector, &[vector, vector]);
        declare(out, "refract", vector, &[vector, vector, Types::Float]);
    }
    declare(
        out,
        "cross",
        Types::Vector3,
        &[Types::Vector3, Types::Vector3],
    );
}

fn int_op(name: &str) -> ConstFold {
    match name {
        "plus" => fold_int_plus,
        "minus" => fold_int_minus,
        "times" => fold_int_times,
        "division" => fold_int_division,
        _ => fold_never,
    }
}

fn int_comparison(name: &str) -> ConstFold {
    match name {
        "less_than" => fold_int_less,
        "less_equal" => fold_int_less_equal,
        "greater_than" => fold_int_greater,
        "greater_equal" => fold_int_greater_equal,
        _ => fold_never,
    }
}

fn equality(name: &str) -> ConstFold {
    match name {
        "equals" => fold_equals,
        "not_equals" => fold_not_equals,
        _ => fold_never,
    }
}

fn integers(arguments: &[Expression]) -> Option<(i64, i64)> {
    match arguments {
        [Expression::Integer(a), Expression::Integer(b)] => Some((*a, *b)),
        _ => None,
    }
}

fn fold_never(_: &[Expression]) -> Option<Expression> {
    None
}

fn fold_int_plus(arguments: &[Expression]) -> Option<Expression> {
    let (a, b) = integers(arguments)?;
    Some(Expression::Integer(a.wrapping_add(b)))
}

fn fold_int_minus(arguments: &[Expression]) -> Option<Expression> {
    let (a, b) = integers(arguments)?;
    Some(Expression::Integer(a.wrapping_sub(b)))
}

fn fold_int_times(arguments: &[Expression]) -> Option<Expression> {
    let (a, b) = integers(arguments)?;
    Some(Expression::Integer(a.wrapping_mul(b)))
}

fn fold_int_division(arguments: &[Expression]) -> Option<Expression> {
    let (a, b) = integers(arguments)?;
    a.checked_div(b).map(Expression::Integer)
}

fn fold_int_modulo(arguments: &[Expression]) -> Option<Expression> {
    let (a, b) = integers(arguments)?;
    a.checked_rem(b).map(Expression::Integer)
}

fn fold_int_less(arguments: &[Expression]) -> Option<Expression> {
    let (a, b) = integers(arguments)?;
    Some(Expression::Boolean(a < b))
}

fn fold_int_less_equal(arguments: &[Expression]) -> Option<Expression> {
    let (a, b) = integers(arguments)?;
    Some(Expression::Boolean(a <= b))
}

fn fold_int_greater(arguments: &[Expression]) -> Option<Expression> {
    let (a, b) = integers(arguments)?;
    Some(Expression::Boolean(a > b))
}

fn fold_int_greater_equal(arguments: &[Expression]) -> Option<Expression> {
    let (a, b) = integers(arguments)?;
    Some(Expression::Boolean(a >= b))
}

fn fold_equals(arguments: &[Expression]) -> Option<Expression> {
    match arguments {
        [Expression::Integer(a), Expression::Integer(b)] => Some(Expression::Boolean(a == b)),
        [Expression::Boolean(a), Expression::Boolean(b)] => Some(Expression::Boolean(a == b)),
        _ => None,
    }
}

fn fold_not_equals(arguments: &[Expression]) -> Option<Expression> {
    match arguments {
        [Expression::Integer(a), Expression::Integer(b)] => Some(Expression::Boolean(a != b)),
        [Expression::Boolean(a), Expression::Boolean(b)] => Some(Expression::Boolean(a != b)),
        _ => None,
    }
}

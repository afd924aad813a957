//! Native GLSL implementations of the standard library.
//!
//! Every abstract signature declared by `psc_ir::stdlib` gets a
//! code-generation closure here; construction fails on any gap so an
//! unimplemented builtin can never reach generation time. Operator
//! functions render as parenthesized infix expressions, everything else
//! as a direct call.

use alloc::boxed::Box;
use alloc::collections::BTreeMap;
use alloc::format;
use alloc::string::{String, ToString};

use psc_ir::{stdlib, FunctionExportedSignature, Types};

use crate::error::{GenError, GenResult};
use crate::program::Dialect;

/// A code-generation closure: compiled argument strings in, target
/// expression text out.
pub(crate) type BuiltinFn = Box<dyn Fn(&[String]) -> String + Send + Sync>;

pub(crate) type BuiltinTable = BTreeMap<FunctionExportedSignature, BuiltinFn>;

/// Build the implementation table for one dialect and validate it
/// against the abstract catalogue.
pub(crate) fn native_implementations(dialect: Dialect) -> GenResult<BuiltinTable> {
    let mut table = BTreeMap::new();
    for function in stdlib::functions() {
        match native(dialect, &function.signature) {
            Some(implementation) => {
                table.insert(function.signature, implementation);
            }
            None => {
                return Err(GenError::MissingBuiltin(function.signature.to_string()));
            }
        }
    }
    Ok(table)
}

/// Direct call emission, also used for user-defined functions.
pub(crate) fn direct_call(name: &str, arguments: &[String]) -> String {
    format!("{}({})", name, arguments.join(", "))
}

// Both dialects currently share one implementation set; the dialect
// parameter is the seam a third target would hook into.
fn native(dialect: Dialect, signature: &FunctionExportedSignature) -> Option<BuiltinFn> {
    let _ = dialect;
    match signature.name.as_str() {
        "plus" => Some(infix("+")),
        "minus" => Some(infix("-")),
        "times" => Some(infix("*")),
        "division" => Some(infix("/")),
        // `%` exists for integers only; floats use the mod() builtin.
        "modulo" => Some(
            if signature.parameters.first()?.kind == Types::Int {
                infix("%")
            } else {
                call("mod")
            },
        ),
        "less_than" => Some(infix("<")),
        "less_equal" => Some(infix("<=")),
        "greater_than" => Some(infix(">")),
        "greater_equal" => Some(infix(">=")),
        "equals" => Some(infix("==")),
        "not_equals" => Some(infix("!=")),
        "bit_and" => Some(infix("&")),
        "bit_or" => Some(infix("|")),
        "bit_xor" => Some(infix("^")),
        "shift_left" => Some(infix("<<")),
        "shift_right" => Some(infix(">>")),
        "float" => Some(call("float")),
        "int" => Some(call("int")),
        "vector2" => Some(call("vec2")),
        "vector3" => Some(call("vec3")),
        "vector4" => Some(call("vec4")),
        "matrix2" => Some(call("mat2")),
        "matrix3" => Some(call("mat3")),
        "matrix4" => Some(call("mat4")),
        "texture" => Some(call("texture")),
        name @ ("abs" | "sign" | "floor" | "ceil" | "fract" | "sqrt" | "inversesqrt"
        | "sin" | "cos" | "tan" | "asin" | "acos" | "atan" | "exp" | "log" | "exp2"
        | "log2" | "pow" | "min" | "max" | "step" | "clamp" | "mix" | "smoothstep"
        | "dot" | "cross" | "normalize" | "length" | "distance" | "reflect"
        | "refract") => Some(call_owned(name.to_string())),
        _ => None,
    }
}

/// `(a OP b)`: self-parenthesizing, so nesting stays unambiguous.
fn infix(operator: &'static str) -> BuiltinFn {
    Box::new(move |arguments| {
        format!("({} {} {})", arguments[0], operator, arguments[1])
    })
}

fn call(name: &'static str) -> BuiltinFn {
    Box::new(move |arguments| direct_call(name, arguments))
}

fn call_owned(name: String) -> BuiltinFn {
    Box::new(move |arguments| direct_call(&name, arguments))
}

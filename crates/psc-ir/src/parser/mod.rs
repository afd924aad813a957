//! Textual form of the shader IR.
//!
//! Parses a compact serialization of `CompiledShader`, used by tests and
//! file-based tests. The format is the IR written down, not a shader
//! language: operators that the IR represents as calls are written as
//! calls.
//!
//! ```text
//! shader {
//!     property vec3 tint;
//!     uniform 0 mat4 uniform_matrix;
//!
//!     const float pi = 3.14159;
//!
//!     fn float luminance(vec3 c) {
//!         return dot(c, vector3(0.2126, 0.7152, 0.0722));
//!     }
//!
//!     vertex(0 vec4 attribute_position, 1 vec2 attribute_coord) {
//!         varying_coord = attribute_coord;
//!         out_Position = times(uniform_matrix, attribute_position);
//!     }
//!
//!     fragment(vec2 varying_coord) {
//!         out_color = vector4(times(tint, luminance(tint)), 1.0);
//!     }
//!
//!     outputs(0 vec4 out_color);
//! }
//! ```
//!
//! Stage and output parameters take an optional leading binding slot and
//! an optional trailing `if <guard>` availability expression. `for`
//! loops are written `for (i, start, end)` and compile to fixed-bound
//! loops over `[start, end)`.

mod ast;
mod expression;
mod module;
mod primitives;
mod resolve;
mod statement;

use alloc::format;
use alloc::string::String;

use crate::expr::Expression;
use crate::shader::CompiledShader;

/// Error produced while parsing or resolving the textual IR.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    pub message: String,
}

impl ParseError {
    pub(crate) fn new(message: impl Into<String>) -> Self {
        ParseError {
            message: message.into(),
        }
    }

    fn from_nom(error: nom::Err<nom::error::Error<&str>>) -> Self {
        match error {
            nom::Err::Error(e) | nom::Err::Failure(e) => {
                ParseError::new(format!("Parse error at: {}", snippet(e.input)))
            }
            nom::Err::Incomplete(_) => ParseError::new("Unexpected end of input"),
        }
    }
}

impl core::fmt::Display for ParseError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.message)
    }
}

fn snippet(input: &str) -> &str {
    match input.char_indices().nth(40) {
        Some((end, _)) => &input[..end],
        None => input,
    }
    .trim_end()
}

/// Parse a complete `shader { ... }` block into a `CompiledShader`.
pub fn parse_shader(input: &str) -> Result<CompiledShader, ParseError> {
    let (rest, items) = module::shader(input).map_err(ParseError::from_nom)?;
    if !rest.trim().is_empty() {
        return Err(ParseError::new(format!(
            "Unexpected trailing input: {}",
            snippet(rest)
        )));
    }
    resolve::resolve_shader(&items)
}

/// Parse a standalone value expression, e.g. a property value. Names are
/// rejected: a value must be built from literals and constructors.
pub fn parse_value_expression(input: &str) -> Result<Expression, ParseError> {
    let (rest, _) = primitives::blank(input).map_err(ParseError::from_nom)?;
    let (rest, raw) = expression::expression(rest).map_err(ParseError::from_nom)?;
    if !rest.trim().is_empty() {
        return Err(ParseError::new(format!(
            "Unexpected trailing input: {}",
            snippet(rest)
        )));
    }
    resolve::Resolver::new().resolve_expr(&raw)
}

//! Shader intermediate representation.
//!
//! This crate defines the typed IR a shader front-end produces and a
//! backend consumes:
//! - Types (`Types`, `Type`, `TypeExported`) and precision classes
//! - Identifiers and scopes
//! - Expressions and statements (closed unions)
//! - Function and stage signatures, `CompiledShader`
//! - Expression typing and the constant folder used for dead-branch
//!   elimination and loop-bound resolution
//! - The abstract standard-library catalogue backends must implement
//! - A textual IR parser for tests and file-based tests

#![no_std]

extern crate alloc;

mod context;
mod error;
mod expr;
mod fold;
mod function;
mod ident;
mod parser;
mod shader;
pub mod stdlib;
mod stmt;
mod types;
mod typing;

pub use context::{ConstFold, Context};
pub use error::{IrError, IrResult};
pub use expr::{ConditionOp, Expression, UnaryOp};
pub use fold::simplify;
pub use function::{
    FunctionExportedSignature, FunctionParameterSignature, FunctionSignature, ShaderFunction,
};
pub use ident::{Identifier, Scope};
pub use parser::{parse_shader, parse_value_expression, ParseError};
pub use shader::{
    CompiledShader, Property, ShaderParameter, ShaderSignature, ShaderStage, Uniform,
};
pub use stmt::Statement;
pub use types::{Precision, Type, TypeExported, Types};
pub use typing::type_of;

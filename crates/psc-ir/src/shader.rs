//! The compiled shader program: the input contract of a backend.

use alloc::collections::BTreeMap;
use alloc::vec::Vec;

use crate::expr::Expression;
use crate::function::{FunctionExportedSignature, FunctionParameterSignature, ShaderFunction};
use crate::ident::{Identifier, Scope};
use crate::stmt::Statement;

/// One parameter of a stage or output interface.
#[derive(Debug, Clone, PartialEq)]
pub struct ShaderParameter {
    pub identifier: Identifier,
    /// Binding slot, or `-1` for an implicit location.
    pub location: i32,
    /// Availability guard; the parameter is skipped unless this folds to
    /// the literal `true`.
    pub available: Expression,
}

impl ShaderParameter {
    pub fn new(identifier: Identifier, location: i32) -> Self {
        ShaderParameter {
            identifier,
            location,
            available: Expression::Boolean(true),
        }
    }

    pub fn with_guard(mut self, available: Expression) -> Self {
        self.available = available;
        self
    }
}

/// Input/output interface of a stage.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ShaderSignature {
    pub parameters: Vec<ShaderParameter>,
}

/// A per-draw read-only stage input.
#[derive(Debug, Clone, PartialEq)]
pub struct Uniform {
    pub identifier: Identifier,
    pub available: Expression,
}

impl Uniform {
    pub fn new(identifier: Identifier) -> Self {
        Uniform {
            identifier,
            available: Expression::Boolean(true),
        }
    }
}

/// A generation-time constant whose concrete value the caller supplies.
#[derive(Debug, Clone, PartialEq)]
pub struct Property {
    pub identifier: Identifier,
}

/// One half of the pipeline program: interface signature plus body.
#[derive(Debug, Clone, PartialEq)]
pub struct ShaderStage {
    pub signature: ShaderSignature,
    pub body: Statement,
}

/// A fully resolved shader program, ready for a backend.
#[derive(Debug, Clone, Default)]
pub struct CompiledShader {
    pub properties: Vec<Property>,
    /// Top-level declaration statements, in source order.
    pub declarations: Vec<Statement>,
    pub functions: Vec<ShaderFunction>,
    pub vertex: Option<ShaderStage>,
    pub fragment: Option<ShaderStage>,
    pub outputs: Option<ShaderSignature>,
    /// All identifiers visible at the top level, including the implicit
    /// built-ins (`out_Position`, `varying_Fragment`).
    pub scope: Scope,
    uniforms: Vec<Option<Uniform>>,
}

impl CompiledShader {
    pub fn new() -> Self {
        CompiledShader::default()
    }

    /// The ordered uniform list. Indices are declaration order and are
    /// preserved across `None` slots so callers can derive native
    /// binding locations from them.
    pub fn uniforms(&self) -> &[Option<Uniform>] {
        &self.uniforms
    }

    pub fn set_uniforms(&mut self, uniforms: Vec<Option<Uniform>>) {
        self.uniforms = uniforms;
    }

    /// Overload table of the user-defined functions.
    pub fn function_map(
        &self,
    ) -> BTreeMap<FunctionParameterSignature, FunctionExportedSignature> {
        self.functions
            .iter()
            .map(|f| (f.signature.parameter_signature(), f.signature.exported()))
            .collect()
    }
}

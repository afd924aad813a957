//! Typing and folding context.
//!
//! Combines the user-defined function table of one shader with the
//! standard-library catalogue. Built once per `generate` call and read
//! by expression typing, constant folding and call resolution.

use alloc::collections::BTreeMap;
use alloc::vec::Vec;

use crate::expr::Expression;
use crate::function::{FunctionExportedSignature, FunctionParameterSignature};
use crate::shader::CompiledShader;
use crate::stdlib;

/// A compile-time evaluation rule for one standard-library signature.
/// Returns `None` when the arguments do not reduce to literals.
pub type ConstFold = fn(&[Expression]) -> Option<Expression>;

/// Overload table plus folding rules.
#[derive(Clone)]
pub struct Context {
    functions: BTreeMap<FunctionParameterSignature, FunctionExportedSignature>,
    folds: BTreeMap<FunctionExportedSignature, ConstFold>,
}

impl Context {
    /// Context for one shader. Lookup is exact on name and parameter
    /// types; a user function with a stdlib-identical signature wins by
    /// insertion order here.
    pub fn new(shader: &CompiledShader) -> Self {
        let mut functions = BTreeMap::new();
        let mut folds = BTreeMap::new();
        for function in stdlib::functions() {
            functions.insert(function.signature.call(), function.signature.clone());
            if let Some(fold) = function.fold {
                folds.insert(function.signature, fold);
            }
        }
        for (call, exported) in shader.function_map() {
            functions.insert(call, exported);
        }
        Context { functions, folds }
    }

    /// Context with only the standard library, for callers without a
    /// shader at hand (tests, property value typing).
    pub fn stdlib_only() -> Self {
        Context::new(&CompiledShader::new())
    }

    /// Exact overload lookup: name plus parameter types, no coercion.
    pub fn lookup(
        &self,
        signature: &FunctionParameterSignature,
    ) -> Option<&FunctionExportedSignature> {
        self.functions.get(signature)
    }

    /// Compile-time evaluation rule for a resolved signature, if any.
    pub fn fold_rule(&self, signature: &FunctionExportedSignature) -> Option<ConstFold> {
        self.folds.get(signature).copied()
    }

    /// All known exported signatures, for backend validation.
    pub fn signatures(&self) -> Vec<&FunctionExportedSignature> {
        self.functions.values().collect()
    }
}

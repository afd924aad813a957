//! Function signatures.
//!
//! `FunctionParameterSignature` (name + exported parameter types) is the
//! overload-lookup key; `FunctionExportedSignature` adds the return type
//! and keys implementation tables.

use alloc::string::String;
use alloc::vec::Vec;

use crate::ident::Identifier;
use crate::stmt::Statement;
use crate::types::{Type, TypeExported};

/// Full declaration-side signature of a user-defined function.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionSignature {
    pub name: String,
    /// Parameters; each identifier carries its declared type.
    pub parameters: Vec<Identifier>,
    pub returned: Type,
}

impl FunctionSignature {
    pub fn exported(&self) -> FunctionExportedSignature {
        FunctionExportedSignature {
            name: self.name.clone(),
            returned: self.returned.exported(),
            parameters: self.parameters.iter().map(|p| p.ty.exported()).collect(),
        }
    }

    pub fn parameter_signature(&self) -> FunctionParameterSignature {
        FunctionParameterSignature {
            name: self.name.clone(),
            parameters: self.parameters.iter().map(|p| p.ty.exported()).collect(),
        }
    }
}

/// Name, return type and parameter types: the key for implementation
/// tables.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FunctionExportedSignature {
    pub name: String,
    pub returned: TypeExported,
    pub parameters: Vec<TypeExported>,
}

impl FunctionExportedSignature {
    pub fn new(
        name: impl Into<String>,
        returned: TypeExported,
        parameters: Vec<TypeExported>,
    ) -> Self {
        FunctionExportedSignature {
            name: name.into(),
            returned,
            parameters,
        }
    }

    /// The overload-lookup key of this signature.
    pub fn call(&self) -> FunctionParameterSignature {
        FunctionParameterSignature {
            name: self.name.clone(),
            parameters: self.parameters.clone(),
        }
    }
}

impl core::fmt::Display for FunctionExportedSignature {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{} -> {}", self.call(), self.returned)
    }
}

/// Name plus exported parameter types, the overload-lookup key built at
/// a call site from the computed argument types.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FunctionParameterSignature {
    pub name: String,
    pub parameters: Vec<TypeExported>,
}

impl FunctionParameterSignature {
    pub fn new(name: impl Into<String>, parameters: Vec<TypeExported>) -> Self {
        FunctionParameterSignature {
            name: name.into(),
            parameters,
        }
    }
}

impl core::fmt::Display for FunctionParameterSignature {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}(", self.name)?;
        for (i, parameter) in self.parameters.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", parameter)?;
        }
        f.write_str(")")
    }
}

/// A user-defined function: signature plus compound body.
#[derive(Debug, Clone, PartialEq)]
pub struct ShaderFunction {
    pub signature: FunctionSignature,
    pub body: Statement,
}

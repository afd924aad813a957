//! Error types for GLSL generation.

use alloc::string::String;

use psc_ir::{IrError, TypeExported};

use crate::program::Stage;

/// Result type for GLSL generation operations.
pub type GenResult<T> = Result<T, GenError>;

/// Error that aborts a `generate` call. All failures are fatal to the
/// current call; no partial output reaches the caller.
#[derive(Debug, Clone, PartialEq)]
pub enum GenError {
    /// An identifier was referenced with no binding installed.
    UnknownIdentifier(String),
    /// A declared property got no caller-supplied value.
    MissingProperty(String),
    /// A property value's computed type differs from the declaration.
    PropertyTypeMismatch {
        name: String,
        declared: TypeExported,
        value: TypeExported,
    },
    /// No function signature matches a call's name and argument types.
    UnmatchedFunction(String),
    /// An expression that must fold to an integer literal did not.
    NonConstant(String),
    /// The IR does not define the requested stage.
    MissingStage(Stage),
    /// The IR does not define an output interface.
    MissingOutputs,
    /// A standard-library signature has no native implementation;
    /// raised at generator construction, never during generation.
    MissingBuiltin(String),
    /// Typing failure from the IR layer.
    Type(IrError),
}

impl GenError {
    pub fn unknown_identifier(name: impl Into<String>) -> Self {
        GenError::UnknownIdentifier(name.into())
    }

    pub fn missing_property(name: impl Into<String>) -> Self {
        GenError::MissingProperty(name.into())
    }

    pub fn unmatched_function(signature: impl Into<String>) -> Self {
        GenError::UnmatchedFunction(signature.into())
    }

    pub fn non_constant(expression: impl Into<String>) -> Self {
        GenError::NonConstant(expression.into())
    }
}

impl From<IrError> for GenError {
    fn from(error: IrError) -> Self {
        GenError::Type(error)
    }
}

impl core::fmt::Display for GenError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            GenError::UnknownIdentifier(name) => write!(f, "Unknown identifier: {}", name),
            GenError::MissingProperty(name) => {
                write!(f, "No value defined for property: {}", name)
            }
            GenError::PropertyTypeMismatch {
                name,
                declared,
                value,
            } => write!(
                f,
                "Property declaration for {} and value type conflict: {} <-> {}",
                name, declared, value
            ),
            GenError::UnmatchedFunction(signature) => {
                write!(f, "No function for given arguments: {}", signature)
            }
            GenError::NonConstant(expression) => write!(
                f,
                "Expression has to be integer at compile time: {}",
                expression
            ),
            GenError::MissingStage(stage) => write!(f, "No {} shader", stage),
            GenError::MissingOutputs => write!(f, "No outputs"),
            GenError::MissingBuiltin(signature) => {
                write!(f, "Standard function not implemented: {}", signature)
            }
            GenError::Type(error) => write!(f, "{}", error),
        }
    }
}

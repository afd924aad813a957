//! Error types for IR analyses.

use alloc::string::String;

/// Result type for IR analyses.
pub type IrResult<T> = Result<T, IrError>;

/// Error raised while typing or folding an expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IrError {
    /// No function matches a call's name and computed argument types.
    UnknownFunction(String),
    /// Member access that is not a valid component selection.
    InvalidMember(String),
    /// Array access on a type that cannot be indexed.
    NotIndexable(String),
    /// An array literal with no elements has no type.
    EmptyArrayLiteral,
}

impl IrError {
    pub fn unknown_function(signature: impl Into<String>) -> Self {
        IrError::UnknownFunction(signature.into())
    }

    pub fn invalid_member(msg: impl Into<String>) -> Self {
        IrError::InvalidMember(msg.into())
    }

    pub fn not_indexable(msg: impl Into<String>) -> Self {
        IrError::NotIndexable(msg.into())
    }
}

impl core::fmt::Display for IrError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            IrError::UnknownFunction(signature) => {
                write!(f, "No function for given arguments: {}", signature)
            }
            IrError::InvalidMember(msg) => write!(f, "Invalid member access: {}", msg),
            IrError::NotIndexable(msg) => write!(f, "Type cannot be indexed: {}", msg),
            IrError::EmptyArrayLiteral => write!(f, "Empty array literal has no type"),
        }
    }
}

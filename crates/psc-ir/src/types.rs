//! Shader type system.
//!
//! `Types` is the closed set of shader value kinds. `Type` wraps a kind
//! with declaration modifiers (constness, precision, array length), and
//! `TypeExported` is the modifier-free projection used for expression
//! typing and overload matching.

use alloc::boxed::Box;

use crate::expr::Expression;

/// A shader value kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Types {
    Void,
    Float,
    Int,
    Boolean,
    Vector2,
    Vector2b,
    Vector2i,
    Matrix2,
    Vector3,
    Vector3b,
    Vector3i,
    Matrix3,
    Vector4,
    Vector4b,
    Vector4i,
    Matrix4,
    Texture2,
}

impl Types {
    /// Name of this kind in the textual IR form.
    pub fn name(self) -> &'static str {
        match self {
            Types::Void => "void",
            Types::Float => "float",
            Types::Int => "int",
            Types::Boolean => "bool",
            Types::Vector2 => "vec2",
            Types::Vector2b => "bvec2",
            Types::Vector2i => "ivec2",
            Types::Matrix2 => "mat2",
            Types::Vector3 => "vec3",
            Types::Vector3b => "bvec3",
            Types::Vector3i => "ivec3",
            Types::Matrix3 => "mat3",
            Types::Vector4 => "vec4",
            Types::Vector4b => "bvec4",
            Types::Vector4i => "ivec4",
            Types::Matrix4 => "mat4",
            Types::Texture2 => "sampler2D",
        }
    }

    /// Component count for vector kinds, `None` for everything else.
    pub fn vector_size(self) -> Option<usize> {
        match self {
            Types::Vector2 | Types::Vector2b | Types::Vector2i => Some(2),
            Types::Vector3 | Types::Vector3b | Types::Vector3i => Some(3),
            Types::Vector4 | Types::Vector4b | Types::Vector4i => Some(4),
            _ => None,
        }
    }

    /// Scalar component kind for vector kinds.
    pub fn component(self) -> Option<Types> {
        match self {
            Types::Vector2 | Types::Vector3 | Types::Vector4 => Some(Types::Float),
            Types::Vector2b | Types::Vector3b | Types::Vector4b => Some(Types::Boolean),
            Types::Vector2i | Types::Vector3i | Types::Vector4i => Some(Types::Int),
            _ => None,
        }
    }

    /// Vector kind for a scalar component kind and a size in 2..=4.
    pub fn vector(component: Types, size: usize) -> Option<Types> {
        match (component, size) {
            (Types::Float, 2) => Some(Types::Vector2),
            (Types::Float, 3) => Some(Types::Vector3),
            (Types::Float, 4) => Some(Types::Vector4),
            (Types::Boolean, 2) => Some(Types::Vector2b),
            (Types::Boolean, 3) => Some(Types::Vector3b),
            (Types::Boolean, 4) => Some(Types::Vector4b),
            (Types::Int, 2) => Some(Types::Vector2i),
            (Types::Int, 3) => Some(Types::Vector3i),
            (Types::Int, 4) => Some(Types::Vector4i),
            _ => None,
        }
    }

    /// Column vector kind for matrix kinds.
    pub fn matrix_column(self) -> Option<Types> {
        match self {
            Types::Matrix2 => Some(Types::Vector2),
            Types::Matrix3 => Some(Types::Vector3),
            Types::Matrix4 => Some(Types::Vector4),
            _ => None,
        }
    }

    /// Exported form of this kind (non-array).
    pub fn exported(self) -> TypeExported {
        TypeExported {
            kind: self,
            array: false,
        }
    }
}

impl core::fmt::Display for Types {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

/// Precision class of a declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Precision {
    Low,
    Medium,
    High,
}

impl Default for Precision {
    fn default() -> Self {
        Precision::Medium
    }
}

/// A declared type: a kind plus declaration modifiers.
#[derive(Debug, Clone, PartialEq)]
pub struct Type {
    pub kind: Types,
    pub constant: bool,
    pub precision: Precision,
    /// Compile-time array length, present for array declarations.
    pub array: Option<Box<Expression>>,
}

impl Type {
    /// A plain mutable type of medium precision.
    pub fn new(kind: Types) -> Self {
        Type {
            kind,
            constant: false,
            precision: Precision::Medium,
            array: None,
        }
    }

    pub fn constant(kind: Types) -> Self {
        Type {
            constant: true,
            ..Type::new(kind)
        }
    }

    pub fn with_precision(mut self, precision: Precision) -> Self {
        self.precision = precision;
        self
    }

    pub fn with_array(mut self, length: Expression) -> Self {
        self.array = Some(Box::new(length));
        self
    }

    /// The modifier-free projection used for typing and overload keys.
    pub fn exported(&self) -> TypeExported {
        TypeExported {
            kind: self.kind,
            array: self.array.is_some(),
        }
    }
}

/// Modifier-free type: a kind plus an array flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TypeExported {
    pub kind: Types,
    pub array: bool,
}

impl TypeExported {
    pub fn new(kind: Types) -> Self {
        TypeExported { kind, array: false }
    }

    pub fn array(kind: Types) -> Self {
        TypeExported { kind, array: true }
    }
}

impl core::fmt::Display for TypeExported {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        if self.array {
            write!(f, "{}[]", self.kind)
        } else {
            write!(f, "{}", self.kind)
        }
    }
}

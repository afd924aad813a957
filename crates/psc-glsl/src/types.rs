//! Type and qualifier projection.
//!
//! Renders a declared `Type` into a GLSL declaration fragment in a fixed
//! order: constness keyword, dialect-conditional precision keyword, base
//! type keyword, and an optional trailing array length.

use alloc::format;
use alloc::string::String;

use psc_ir::{Precision, Type, Types};

use crate::error::GenResult;
use crate::program::{Dialect, Session};

/// GLSL keyword for a shader value kind.
pub(crate) fn base_type(kind: Types) -> &'static str {
    match kind {
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

pub(crate) fn precision_keyword(precision: Precision) -> &'static str {
    match precision {
        Precision::Low => "lowp",
        Precision::Medium => "mediump",
        Precision::High => "highp",
    }
}

/// The target grammar allows precision qualifiers on numeric and sampler
/// types only.
pub(crate) fn precision_allowed(kind: Types) -> bool {
    !matches!(
        kind,
        Types::Void | Types::Boolean | Types::Vector2b | Types::Vector3b | Types::Vector4b
    )
}

impl Session<'_> {
    /// Qualifiers plus base keyword, without a declared name.
    pub(crate) fn type_prefix(&self, ty: &Type) -> String {
        let mut out = String::with_capacity(24);
        if ty.constant {
            out.push_str("const ");
        }
        if self.dialect == Dialect::Gles300 && precision_allowed(ty.kind) {
            out.push_str(precision_keyword(ty.precision));
            out.push(' ');
        }
        out.push_str(base_type(ty.kind));
        out
    }

    /// Full declaration fragment: qualifiers, base keyword, name, and an
    /// array length when the type carries one.
    pub(crate) fn type_decl(&self, ty: &Type, name: &str) -> GenResult<String> {
        let mut out = self.type_prefix(ty);
        out.push(' ');
        out.push_str(name);
        if let Some(length) = &ty.array {
            out.push_str(&format!("[{}]", self.expression(length)?));
        }
        Ok(out)
    }
}

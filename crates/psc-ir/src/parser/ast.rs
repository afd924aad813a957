//! Untyped syntax tree produced by the text parsers.
//!
//! Names are plain strings here; the resolver turns them into
//! identifiers with declared types and builds the `CompiledShader`.

use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;

use crate::expr::{ConditionOp, UnaryOp};
use crate::types::{Precision, Types};

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum RawExpr {
    Boolean(bool),
    Integer(i64),
    Decimal(f64),
    Name(String),
    Member(Box<RawExpr>, String),
    Index(Box<RawExpr>, Box<RawExpr>),
    Condition(ConditionOp, Box<RawExpr>, Box<RawExpr>),
    Assign(Box<RawExpr>, Box<RawExpr>),
    Unary(UnaryOp, Box<RawExpr>),
    Ternary(Box<RawExpr>, Box<RawExpr>, Box<RawExpr>),
    Call(String, Vec<RawExpr>),
    Array(Vec<RawExpr>),
    Return(Box<RawExpr>),
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum RawStmt {
    Compound(Vec<RawStmt>),
    If(RawExpr, Box<RawStmt>, Option<Box<RawStmt>>),
    For {
        index: String,
        start: RawExpr,
        end: RawExpr,
        body: Box<RawStmt>,
    },
    Decl {
        ty: RawType,
        name: String,
        array: Option<RawExpr>,
        init: Option<RawExpr>,
    },
    Expr(RawExpr),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct RawType {
    pub constant: bool,
    pub precision: Option<Precision>,
    pub kind: Types,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct RawParam {
    pub location: i32,
    pub ty: RawType,
    pub name: String,
    pub available: Option<RawExpr>,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum RawItem {
    Property(RawType, String),
    Uniform {
        slot: usize,
        ty: RawType,
        name: String,
        array: Option<RawExpr>,
        available: Option<RawExpr>,
    },
    Declaration(RawStmt),
    Function {
        returned: RawType,
        name: String,
        parameters: Vec<(RawType, String)>,
        body: RawStmt,
    },
    Vertex(Vec<RawParam>, RawStmt),
    Fragment(Vec<RawParam>, RawStmt),
    Outputs(Vec<RawParam>),
}

//! Name resolution: untyped syntax → IR.
//!
//! Declares every top-level name (properties, uniforms, stage and output
//! parameters, top-level declarations) before resolving any body, so a
//! vertex body can write varyings that only the fragment signature
//! declares. Within bodies, blocks open child scopes and later
//! declarations shadow earlier ones.

use alloc::boxed::Box;
use alloc::collections::BTreeMap;
use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

use crate::expr::Expression;
use crate::function::{FunctionSignature, ShaderFunction};
use crate::ident::{Identifier, Scope};
use crate::parser::ast::{RawExpr, RawItem, RawParam, RawStmt, RawType};
use crate::parser::ParseError;
use crate::shader::{
    CompiledShader, Property, ShaderParameter, ShaderSignature, ShaderStage, Uniform,
};
use crate::stmt::Statement;
use crate::types::{Type, Types};

pub(crate) struct Resolver {
    scopes: Vec<BTreeMap<String, Identifier>>,
}

impl Resolver {
    pub(crate) fn new() -> Self {
        Resolver {
            scopes: alloc::vec![BTreeMap::new()],
        }
    }

    fn push(&mut self) {
        self.scopes.push(BTreeMap::new());
    }

    fn pop(&mut self) {
        self.scopes.pop();
    }

    fn lookup(&self, name: &str) -> Option<&Identifier> {
        self.scopes.iter().rev().find_map(|scope| scope.get(name))
    }

    /// Declare into the innermost scope; shadowing outer scopes is fine,
    /// redeclaring within the same scope is not.
    fn declare(&mut self, name: &str, ty: Type) -> Result<Identifier, ParseError> {
        let scope = self.scopes.last_mut().expect("scope stack is never empty");
        if scope.contains_key(name) {
            return Err(ParseError::new(format!(
                "Duplicate declaration of '{}'",
                name
            )));
        }
        let identifier = Identifier::new(name, ty);
        scope.insert(String::from(name), identifier.clone());
        Ok(identifier)
    }

    pub(crate) fn resolve_expr(&mut self, raw: &RawExpr) -> Result<Expression, ParseError> {
        Ok(match raw {
            RawExpr::Boolean(b) => Expression::Boolean(*b),
            RawExpr::Integer(i) => Expression::Integer(*i),
            RawExpr::Decimal(d) => Expression::Decimal(*d),
            RawExpr::Name(name) => {
                let identifier = self.lookup(name).ok_or_else(|| {
                    ParseError::new(format!("Unknown identifier: {}", name))
                })?;
                Expression::Identifier(identifier.clone())
            }
            RawExpr::Member(value, name) => Expression::Member {
                value: Box::new(self.resolve_expr(value)?),
                name: name.clone(),
            },
            RawExpr::Index(array, index) => Expression::ArrayAccess {
                array: Box::new(self.resolve_expr(array)?),
                index: Box::new(self.resolve_expr(index)?),
            },
            RawExpr::Condition(op, left, right) => Expression::Condition {
                op: *op,
                left: Box::new(self.resolve_expr(left)?),
                right: Box::new(self.resolve_expr(right)?),
            },
            RawExpr::Assign(left, right) => Expression::Assignment {
                left: Box::new(self.resolve_expr(left)?),
                right: Box::new(self.resolve_expr(right)?),
            },
            RawExpr::Unary(op, value) => Expression::Unary {
                op: *op,
                value: Box::new(self.resolve_expr(value)?),
            },
            RawExpr::Ternary(condition, truthy, falsy) => Expression::Ternary {
                condition: Box::new(self.resolve_expr(condition)?),
                truthy: Box::new(self.resolve_expr(truthy)?),
                falsy: Box::new(self.resolve_expr(falsy)?),
            },
            RawExpr::Call(name, arguments) => {
                let mut resolved = Vec::with_capacity(arguments.len());
                for argument in arguments {
                    resolved.push(self.resolve_expr(argument)?);
                }
                Expression::Call {
                    name: name.clone(),
                    arguments: resolved,
                }
            }
            RawExpr::Array(elements) => {
                let mut resolved = Vec::with_capacity(elements.len());
                for element in elements {
                    resolved.push(self.resolve_expr(element)?);
                }
                Expression::ArrayLiteral(resolved)
            }
            RawExpr::Return(value) => Expression::Return(Box::new(self.resolve_expr(value)?)),
        })
    }

    fn resolve_stmt(&mut self, raw: &RawStmt) -> Result<Statement, ParseError> {
        Ok(match raw {
            RawStmt::Compound(statements) => {
                self.push();
                let mut resolved = Vec::with_capacity(statements.len());
                for statement in statements {
                    resolved.push(self.resolve_stmt(statement)?);
                }
                self.pop();
                Statement::Compound(resolved)
            }
            RawStmt::If(condition, then_branch, else_branch) => Statement::If {
                condition: self.resolve_expr(condition)?,
                then_branch: Box::new(self.resolve_stmt(then_branch)?),
                else_branch: match else_branch {
                    Some(branch) => Some(Box::new(self.resolve_stmt(branch)?)),
                    None => None,
                },
            },
            RawStmt::For {
                index,
                start,
                end,
                body,
            } => {
                let start = self.resolve_expr(start)?;
                let end = self.resolve_expr(end)?;
                self.push();
                let index = self.declare(index, Type::new(Types::Int))?;
                let body = Box::new(self.resolve_stmt(body)?);
                self.pop();
                Statement::LoopFixed {
                    index,
                    start,
                    end,
                    body,
                }
            }
            RawStmt::Decl { .. } => self.resolve_declaration(raw)?,
            RawStmt::Expr(expression) => Statement::Expression(self.resolve_expr(expression)?),
        })
    }

    /// Resolve a declaration statement, declaring its name into the
    /// current scope. The initializer is resolved first so a declaration
    /// cannot reference itself.
    fn resolve_declaration(&mut self, raw: &RawStmt) -> Result<Statement, ParseError> {
        let (ty, name, array, init) = match raw {
            RawStmt::Decl {
                ty,
                name,
                array,
                init,
            } => (ty, name, array, init),
            _ => return Err(ParseError::new("expected a declaration")),
        };
        let array = match array {
            Some(length) => Some(self.resolve_expr(length)?),
            None => None,
        };
        let initializer = match init {
            Some(init) => Some(self.resolve_expr(init)?),
            None => None,
        };
        let is_array = array.is_some();
        let identifier = self.declare(name, make_type(*ty, array))?;
        Ok(if is_array {
            Statement::ArrayDeclaration {
                identifier,
                initializer,
            }
        } else {
            Statement::Declaration {
                identifier,
                initializer,
            }
        })
    }
}

fn make_type(raw: RawType, array: Option<Expression>) -> Type {
    let mut ty = Type::new(raw.kind);
    ty.constant = raw.constant;
    if let Some(precision) = raw.precision {
        ty.precision = precision;
    }
    ty.array = array.map(Box::new);
    ty
}

/// Resolve a parsed item list into a `CompiledShader`.
pub(crate) fn resolve_shader(items: &[RawItem]) -> Result<CompiledShader, ParseError> {
    let mut resolver = Resolver::new();
    let mut shader = CompiledShader::new();
    let mut scope = Scope::new();

    // Implicit built-ins visible to every stage.
    for built_in in ["out_Position", "varying_Fragment"] {
        let identifier = resolver.declare(built_in, Type::new(Types::Vector4))?;
        scope.add(&identifier);
    }

    let mut uniforms: Vec<Option<Uniform>> = Vec::new();
    let mut functions: Vec<(&RawItem, FunctionSignature)> = Vec::new();
    let mut stages: Vec<(&RawItem, ShaderSignature)> = Vec::new();

    // First pass: declare every top-level name and resolve interface
    // guards, so stage bodies can reference either stage's parameters.
    for item in items {
        match item {
            RawItem::Property(ty, name) => {
                let identifier = resolver.declare(name, make_type(*ty, None))?;
                scope.add(&identifier);
                shader.properties.push(Property {
                    identifier,
                });
            }
            RawItem::Uniform {
                slot,
                ty,
                name,
                array,
                available,
            } => {
                let array = match array {
                    Some(length) => Some(resolver.resolve_expr(length)?),
                    None => None,
                };
                let identifier = resolver.declare(name, make_type(*ty, array))?;
                scope.add(&identifier);
                let mut uniform = Uniform::new(identifier);
                if let Some(guard) = available {
                    uniform.available = resolver.resolve_expr(guard)?;
                }
                if uniforms.len() <= *slot {
                    uniforms.resize(*slot + 1, None);
                }
                if uniforms[*slot].is_some() {
                    return Err(ParseError::new(format!(
                        "Duplicate uniform slot: {}",
                        slot
                    )));
                }
                uniforms[*slot] = Some(uniform);
            }
            RawItem::Declaration(statement) => {
                let resolved = resolver.resolve_declaration(statement)?;
                match &resolved {
                    Statement::Declaration { identifier, .. }
                    | Statement::ArrayDeclaration { identifier, .. } => {
                        scope.add(identifier);
                    }
                    _ => {}
                }
                shader.declarations.push(resolved);
            }
            RawItem::Vertex(parameters, _) | RawItem::Fragment(parameters, _) => {
                let signature = resolve_signature(&mut resolver, &mut scope, parameters)?;
                stages.push((item, signature));
            }
            RawItem::Outputs(parameters) => {
                let signature = resolve_signature(&mut resolver, &mut scope, parameters)?;
                shader.outputs = Some(signature);
            }
            RawItem::Function { .. } => {}
        }
    }

    // Second pass: function signatures and bodies.
    for item in items {
        if let RawItem::Function {
            returned,
            name,
            parameters,
            ..
        } = item
        {
            resolver.push();
            let mut identifiers = Vec::with_capacity(parameters.len());
            for (ty, parameter_name) in parameters {
                identifiers.push(resolver.declare(parameter_name, make_type(*ty, None))?);
            }
            resolver.pop();
            functions.push((
                item,
                FunctionSignature {
                    name: name.clone(),
                    parameters: identifiers,
                    returned: make_type(*returned, None),
                },
            ));
        }
    }
    for (item, signature) in functions {
        if let RawItem::Function { body, .. } = item {
            resolver.push();
            for parameter in &signature.parameters {
                let frame = resolver.scopes.last_mut().expect("scope stack is never empty");
                frame.insert(parameter.name.clone(), parameter.clone());
            }
            let body = resolver.resolve_stmt(body)?;
            resolver.pop();
            shader.functions.push(ShaderFunction { signature, body });
        }
    }

    // Third pass: stage bodies, with every interface name in scope.
    for (item, signature) in stages {
        match item {
            RawItem::Vertex(_, body) => {
                let body = resolver.resolve_stmt(body)?;
                shader.vertex = Some(ShaderStage { signature, body });
            }
            RawItem::Fragment(_, body) => {
                let body = resolver.resolve_stmt(body)?;
                shader.fragment = Some(ShaderStage { signature, body });
            }
            _ => {}
        }
    }

    shader.set_uniforms(uniforms);
    shader.scope = scope;
    Ok(shader)
}

fn resolve_signature(
    resolver: &mut Resolver,
    scope: &mut Scope,
    parameters: &[RawParam],
) -> Result<ShaderSignature, ParseError> {
    let mut resolved = Vec::with_capacity(parameters.len());
    for parameter in parameters {
        let identifier = resolver.declare(&parameter.name, make_type(parameter.ty, None))?;
        scope.add(&identifier);
        let mut shader_parameter = ShaderParameter::new(identifier, parameter.location);
        if let Some(guard) = &parameter.available {
            shader_parameter.available = resolver.resolve_expr(guard)?;
        }
        resolved.push(shader_parameter);
    }
    Ok(ShaderSignature {
        parameters: resolved,
    })
}

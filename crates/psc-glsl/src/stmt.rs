//! Statement compilation.
//!
//! Conditionals whose guard folds to a literal emit only the live
//! branch. Fixed-bound loops are fully unrolled: the target language
//! never sees a loop construct for them.

use alloc::format;

use psc_ir::{simplify, Expression, Statement};

use crate::error::{GenError, GenResult};
use crate::program::Session;
use crate::types::base_type;

impl Session<'_> {
    /// Compile one statement at the given indent level.
    pub(crate) fn statement(&mut self, statement: &Statement, level: usize) -> GenResult<()> {
        match statement {
            Statement::Compound(statements) => {
                self.println(level, "{");
                for statement in statements {
                    self.statement(statement, level + 1)?;
                }
                self.println(level, "}");
                Ok(())
            }
            Statement::If {
                condition,
                then_branch,
                else_branch,
            } => self.if_statement(condition, then_branch, else_branch.as_deref(), level),
            Statement::LoopFixed {
                index,
                start,
                end,
                body,
            } => self.loop_fixed(index, start, end, body, level),
            Statement::Declaration {
                identifier,
                initializer,
            } => {
                self.env.bind_passthrough(identifier);
                let declaration = self.type_decl(&identifier.ty, &identifier.name)?;
                match initializer {
                    None => self.println(level, &format!("{};", declaration)),
                    Some(initializer) => {
                        let value = self.expression(initializer)?;
                        self.println(level, &format!("{} = {};", declaration, value));
                    }
                }
                Ok(())
            }
            Statement::ArrayDeclaration {
                identifier,
                initializer,
            } => {
                self.env.bind_passthrough(identifier);
                let declaration = self.type_decl(&identifier.ty, &identifier.name)?;
                match initializer {
                    None => self.println(level, &format!("{};", declaration)),
                    Some(initializer) => {
                        let elements = self.expression(initializer)?;
                        self.println(
                            level,
                            &format!(
                                "{} = {}[]{};",
                                declaration,
                                base_type(identifier.ty.kind),
                                elements
                            ),
                        );
                    }
                }
                Ok(())
            }
            Statement::Expression(expression) => {
                let text = self.expression(expression)?;
                self.println(level, &format!("{};", text));
                Ok(())
            }
        }
    }

    /// Emit a conditional, eliminating a branch when the guard folds to
    /// a boolean literal. The dead branch produces no output at all.
    fn if_statement(
        &mut self,
        condition: &Expression,
        then_branch: &Statement,
        else_branch: Option<&Statement>,
        level: usize,
    ) -> GenResult<()> {
        let condition = simplify(condition, self.context, self.env.bindings());
        if let Expression::Boolean(value) = condition {
            return if value {
                self.statement(then_branch, level)
            } else if let Some(else_branch) = else_branch {
                self.statement(else_branch, level)
            } else {
                Ok(())
            };
        }
        let guard = self.expression(&condition)?;
        self.println(level, &format!("if({})", guard));
        self.statement(then_branch, level)?;
        if let Some(else_branch) = else_branch {
            self.println(level, "else");
            self.statement(else_branch, level)?;
        }
        Ok(())
    }

    /// Unroll a fixed-bound loop: one body copy per iteration, with the
    /// index rebound to the iteration's literal each time.
    fn loop_fixed(
        &mut self,
        index: &psc_ir::Identifier,
        start: &Expression,
        end: &Expression,
        body: &Statement,
        level: usize,
    ) -> GenResult<()> {
        let start = self.integer(start)?;
        let end = self.integer(end)?;
        for i in start..end {
            self.env.bind(index, Expression::Integer(i));
            self.statement(body, level)?;
        }
        Ok(())
    }

    /// Fold an expression that is structurally required to be an integer
    /// literal at generation time.
    pub(crate) fn integer(&self, expression: &Expression) -> GenResult<i64> {
        match simplify(expression, self.context, self.env.bindings()) {
            Expression::Integer(value) => Ok(value),
            other => Err(GenError::non_constant(format!("{:?}", other))),
        }
    }
}

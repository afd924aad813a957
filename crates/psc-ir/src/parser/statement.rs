//! Statement parsers.

use alloc::boxed::Box;
use alloc::string::ToString;

use nom::branch::alt;
use nom::combinator::{map, opt};
use nom::multi::many0;
use nom::sequence::{delimited, preceded, terminated, tuple};
use nom::IResult;

use crate::parser::ast::RawStmt;
use crate::parser::expression::expression;
use crate::parser::primitives::{keyword, raw_type, sym, word};

/// Parse one statement.
pub(crate) fn statement(input: &str) -> IResult<&str, RawStmt> {
    alt((
        compound,
        if_statement,
        for_statement,
        declaration,
        expression_statement,
    ))(input)
}

/// Parse a braced block.
pub(crate) fn compound(input: &str) -> IResult<&str, RawStmt> {
    map(
        delimited(sym("{"), many0(statement), sym("}")),
        RawStmt::Compound,
    )(input)
}

fn if_statement(input: &str) -> IResult<&str, RawStmt> {
    let (rest, _) = keyword("if")(input)?;
    let (rest, condition) = delimited(sym("("), expression, sym(")"))(rest)?;
    let (rest, then_branch) = statement(rest)?;
    let (rest, else_branch) = opt(preceded(keyword("else"), statement))(rest)?;
    Ok((
        rest,
        RawStmt::If(
            condition,
            Box::new(then_branch),
            else_branch.map(Box::new),
        ),
    ))
}

/// `for (i, start, end) body`: a fixed-bound loop over `[start, end)`.
fn for_statement(input: &str) -> IResult<&str, RawStmt> {
    let (rest, _) = keyword("for")(input)?;
    let (rest, (index, _, start, _, end)) = delimited(
        sym("("),
        tuple((word, sym(","), expression, sym(","), expression)),
        sym(")"),
    )(rest)?;
    let (rest, body) = statement(rest)?;
    Ok((
        rest,
        RawStmt::For {
            index: index.to_string(),
            start,
            end,
            body: Box::new(body),
        },
    ))
}

/// Parse a declaration statement. Fails without consuming a statement
/// when the leading word is not a type, letting expression statements
/// take over.
pub(crate) fn declaration(input: &str) -> IResult<&str, RawStmt> {
    let (rest, ty) = raw_type(input)?;
    let (rest, name) = word(rest)?;
    let (rest, array) = opt(delimited(sym("["), expression, sym("]")))(rest)?;
    let (rest, init) = opt(preceded(sym("="), expression))(rest)?;
    let (rest, _) = sym(";")(rest)?;
    Ok((
        rest,
        RawStmt::Decl {
            ty,
            name: name.to_string(),
            array,
            init,
        },
    ))
}

fn expression_statement(input: &str) -> IResult<&str, RawStmt> {
    map(terminated(expression, sym(";")), RawStmt::Expr)(input)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::ast::RawExpr;
    use crate::types::Types;

    fn parse(input: &str) -> RawStmt {
        let (rest, stmt) = statement(input).unwrap();
        assert_eq!(rest, "", "unparsed input");
        stmt
    }

    #[test]
    fn test_declaration_with_initializer() {
        let stmt = parse("const float pi = 3.14159;");
        match stmt {
            RawStmt::Decl { ty, name, init, .. } => {
                assert!(ty.constant);
                assert_eq!(ty.kind, Types::Float);
                assert_eq!(name, "pi");
                assert!(init.is_some());
            }
            other => panic!("expected declaration, got {:?}", other),
        }
    }

    #[test]
    fn test_array_declaration() {
        let stmt = parse("float weights[4] = [0.1, 0.2, 0.3, 0.4];");
        match stmt {
            RawStmt::Decl { array, init, .. } => {
                assert_eq!(array, Some(RawExpr::Integer(4)));
                assert!(matches!(init, Some(RawExpr::Array(_))));
            }
            other => panic!("expected declaration, got {:?}", other),
        }
    }

    #[test]
    fn test_if_else() {
        let stmt = parse("if (flag) { x = 1.0; } else { x = 0.0; }");
        match stmt {
            RawStmt::If(_, _, else_branch) => assert!(else_branch.is_some()),
            other => panic!("expected if, got {:?}", other),
        }
    }

    #[test]
    fn test_for_loop() {
        let stmt = parse("for (i, 0, 3) { x = plus(x, i); }");
        match stmt {
            RawStmt::For { index, start, end, .. } => {
                assert_eq!(index, "i");
                assert_eq!(start, RawExpr::Integer(0));
                assert_eq!(end, RawExpr::Integer(3));
            }
            other => panic!("expected for, got {:?}", other),
        }
    }

    #[test]
    fn test_expression_statement_when_not_a_type() {
        let stmt = parse("floaty = 1.0;");
        assert!(matches!(stmt, RawStmt::Expr(RawExpr::Assign(_, _))));
    }

    #[test]
    fn test_return_statement() {
        let stmt = parse("return 1.0;");
        assert!(matches!(stmt, RawStmt::Expr(RawExpr::Return(_))));
    }
}

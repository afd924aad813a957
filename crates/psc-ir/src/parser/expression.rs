//! Expression parsers.
//!
//! The expression grammar mirrors the IR: assignments, ternaries,
//! short-circuit conditions, unary operators and postfix access exist
//! as syntax; arithmetic and comparisons are written as calls
//! (`plus(a, b)`), because that is what they are in the IR.

use alloc::boxed::Box;
use alloc::string::ToString;
use alloc::vec::Vec;

use nom::branch::alt;
use nom::combinator::{map, opt};
use nom::multi::{many0, separated_list0};
use nom::sequence::{delimited, preceded, terminated, tuple};
use nom::IResult;

use crate::expr::{ConditionOp, UnaryOp};
use crate::parser::ast::RawExpr;
use crate::parser::primitives::{blank, keyword, number, sym, word};

/// Parse a full expression.
pub(crate) fn expression(input: &str) -> IResult<&str, RawExpr> {
    alt((return_expr, assignment))(input)
}

fn return_expr(input: &str) -> IResult<&str, RawExpr> {
    map(preceded(keyword("return"), expression), |value| {
        RawExpr::Return(Box::new(value))
    })(input)
}

fn assignment(input: &str) -> IResult<&str, RawExpr> {
    let (rest, target) = ternary(input)?;
    let (rest, value) = opt(preceded(sym("="), assignment))(rest)?;
    Ok((
        rest,
        match value {
            Some(value) => RawExpr::Assign(Box::new(target), Box::new(value)),
            None => target,
        },
    ))
}

fn ternary(input: &str) -> IResult<&str, RawExpr> {
    let (rest, condition) = or_level(input)?;
    let (rest, branches) = opt(tuple((
        preceded(sym("?"), expression),
        preceded(sym(":"), expression),
    )))(rest)?;
    Ok((
        rest,
        match branches {
            Some((truthy, falsy)) => RawExpr::Ternary(
                Box::new(condition),
                Box::new(truthy),
                Box::new(falsy),
            ),
            None => condition,
        },
    ))
}

fn or_level(input: &str) -> IResult<&str, RawExpr> {
    let (rest, first) = and_level(input)?;
    let (rest, others) = many0(preceded(sym("||"), and_level))(rest)?;
    Ok((rest, fold_condition(ConditionOp::Or, first, others)))
}

fn and_level(input: &str) -> IResult<&str, RawExpr> {
    let (rest, first) = unary_level(input)?;
    let (rest, others) = many0(preceded(sym("&&"), unary_level))(rest)?;
    Ok((rest, fold_condition(ConditionOp::And, first, others)))
}

fn fold_condition(op: ConditionOp, first: RawExpr, others: Vec<RawExpr>) -> RawExpr {
    others.into_iter().fold(first, |left, right| {
        RawExpr::Condition(op, Box::new(left), Box::new(right))
    })
}

fn unary_level(input: &str) -> IResult<&str, RawExpr> {
    let (rest, op) = opt(alt((
        map(sym("++"), |_| UnaryOp::IncrementGet),
        map(sym("--"), |_| UnaryOp::DecrementGet),
        map(sym("!"), |_| UnaryOp::Not),
        map(sym("~"), |_| UnaryOp::BitNot),
        map(sym("-"), |_| UnaryOp::Negative),
        map(sym("+"), |_| UnaryOp::Positive),
    )))(input)?;
    match op {
        Some(op) => {
            let (rest, value) = unary_level(rest)?;
            Ok((rest, RawExpr::Unary(op, Box::new(value))))
        }
        None => postfix_level(rest),
    }
}

enum Postfix {
    Member(alloc::string::String),
    Index(RawExpr),
    Increment,
    Decrement,
}

fn postfix_level(input: &str) -> IResult<&str, RawExpr> {
    let (rest, base) = primary(input)?;
    let (rest, postfixes) = many0(alt((
        map(preceded(sym("."), word), |n| Postfix::Member(n.to_string())),
        map(delimited(sym("["), expression, sym("]")), Postfix::Index),
        map(sym("++"), |_| Postfix::Increment),
        map(sym("--"), |_| Postfix::Decrement),
    )))(rest)?;
    let folded = postfixes.into_iter().fold(base, |value, postfix| match postfix {
        Postfix::Member(name) => RawExpr::Member(Box::new(value), name),
        Postfix::Index(index) => RawExpr::Index(Box::new(value), Box::new(index)),
        Postfix::Increment => RawExpr::Unary(UnaryOp::GetIncrement, Box::new(value)),
        Postfix::Decrement => RawExpr::Unary(UnaryOp::GetDecrement, Box::new(value)),
    });
    Ok((rest, folded))
}

fn primary(input: &str) -> IResult<&str, RawExpr> {
    alt((
        terminated(number, blank),
        array_literal,
        delimited(sym("("), expression, sym(")")),
        name_or_call,
    ))(input)
}

fn array_literal(input: &str) -> IResult<&str, RawExpr> {
    map(
        delimited(
            sym("["),
            separated_list0(sym(","), expression),
            sym("]"),
        ),
        RawExpr::Array,
    )(input)
}

fn name_or_call(input: &str) -> IResult<&str, RawExpr> {
    let (rest, found) = word(input)?;
    match found {
        "true" => return Ok((rest, RawExpr::Boolean(true))),
        "false" => return Ok((rest, RawExpr::Boolean(false))),
        _ => {}
    }
    let (rest, arguments) = opt(delimited(
        sym("("),
        separated_list0(sym(","), expression),
        sym(")"),
    ))(rest)?;
    Ok((
        rest,
        match arguments {
            Some(arguments) => RawExpr::Call(found.to_string(), arguments),
            None => RawExpr::Name(found.to_string()),
        },
    ))
}

//! Shader-level parsers: the `shader { ... }` block and its items.

use alloc::string::ToString;
use alloc::vec::Vec;

use nom::branch::alt;
use nom::combinator::{map, opt};
use nom::multi::{many0, separated_list0};
use nom::sequence::{delimited, preceded, terminated, tuple};
use nom::IResult;

use crate::parser::ast::{RawItem, RawParam, RawType};
use crate::parser::expression::expression;
use crate::parser::primitives::{blank, integer, keyword, raw_type, sym, word};
use crate::parser::statement::{compound, declaration};

/// Parse a whole `shader { ... }` block.
pub(crate) fn shader(input: &str) -> IResult<&str, Vec<RawItem>> {
    let (rest, _) = blank(input)?;
    let (rest, _) = keyword("shader")(rest)?;
    delimited(sym("{"), many0(item), sym("}"))(rest)
}

fn item(input: &str) -> IResult<&str, RawItem> {
    alt((
        property,
        uniform,
        outputs,
        stage,
        function,
        map(declaration, RawItem::Declaration),
    ))(input)
}

fn property(input: &str) -> IResult<&str, RawItem> {
    let (rest, _) = keyword("property")(input)?;
    let (rest, ty) = raw_type(rest)?;
    let (rest, name) = word(rest)?;
    let (rest, _) = sym(";")(rest)?;
    Ok((rest, RawItem::Property(ty, name.to_string())))
}

fn uniform(input: &str) -> IResult<&str, RawItem> {
    let (rest, _) = keyword("uniform")(input)?;
    let (rest, slot) = terminated(integer, blank)(rest)?;
    let (rest, ty) = raw_type(rest)?;
    let (rest, name) = word(rest)?;
    let (rest, array) = opt(delimited(sym("["), expression, sym("]")))(rest)?;
    let (rest, available) = opt(preceded(keyword("if"), expression))(rest)?;
    let (rest, _) = sym(";")(rest)?;
    Ok((
        rest,
        RawItem::Uniform {
            slot: slot as usize,
            ty,
            name: name.to_string(),
            array,
            available,
        },
    ))
}

fn outputs(input: &str) -> IResult<&str, RawItem> {
    let (rest, _) = keyword("outputs")(input)?;
    let (rest, parameters) = parameter_list(rest)?;
    let (rest, _) = sym(";")(rest)?;
    Ok((rest, RawItem::Outputs(parameters)))
}

fn stage(input: &str) -> IResult<&str, RawItem> {
    let (rest, which) = alt((keyword("vertex"), keyword("fragment")))(input)?;
    let (rest, parameters) = parameter_list(rest)?;
    let (rest, body) = compound(rest)?;
    Ok((
        rest,
        match which {
            "vertex" => RawItem::Vertex(parameters, body),
            _ => RawItem::Fragment(parameters, body),
        },
    ))
}

fn function(input: &str) -> IResult<&str, RawItem> {
    let (rest, _) = keyword("fn")(input)?;
    let (rest, returned) = raw_type(rest)?;
    let (rest, name) = word(rest)?;
    let (rest, parameters) = delimited(
        sym("("),
        separated_list0(sym(","), function_parameter),
        sym(")"),
    )(rest)?;
    let (rest, body) = compound(rest)?;
    Ok((
        rest,
        RawItem::Function {
            returned,
            name: name.to_string(),
            parameters,
            body,
        },
    ))
}

fn function_parameter(input: &str) -> IResult<&str, (RawType, alloc::string::String)> {
    map(tuple((raw_type, word)), |(ty, name)| {
        (ty, name.to_string())
    })(input)
}

fn parameter_list(input: &str) -> IResult<&str, Vec<RawParam>> {
    delimited(sym("("), separated_list0(sym(","), parameter), sym(")"))(input)
}

/// `<slot>? <type> <name> (if <guard>)?`; omitted slots mean an
/// implicit location (`-1`).
fn parameter(input: &str) -> IResult<&str, RawParam> {
    let (rest, slot) = opt(terminated(integer, blank))(input)?;
    let (rest, ty) = raw_type(rest)?;
    let (rest, name) = word(rest)?;
    let (rest, available) = opt(preceded(keyword("if"), expression))(rest)?;
    Ok((
        rest,
        RawParam {
            location: slot.map_or(-1, |s| s as i32),
            ty,
            name: name.to_string(),
            available,
        },
    ))
}

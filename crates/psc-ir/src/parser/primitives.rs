//! Primitive parsers for names, numbers, types and punctuation.

use nom::bytes::complete::{tag, take_while1};
use nom::error::{Error, ErrorKind};
use nom::sequence::terminated;
use nom::IResult;

use crate::parser::ast::{RawExpr, RawType};
use crate::types::{Precision, Types};

/// Skip whitespace and `//` line comments.
pub(crate) fn blank(input: &str) -> IResult<&str, ()> {
    let mut rest = input.trim_start();
    while let Some(comment) = rest.strip_prefix("//") {
        rest = match comment.split_once('\n') {
            Some((_, after)) => after.trim_start(),
            None => "",
        };
    }
    Ok((rest, ()))
}

fn err(input: &str, kind: ErrorKind) -> nom::Err<Error<&str>> {
    nom::Err::Error(Error::new(input, kind))
}

/// Parse a bare name: `[A-Za-z_][A-Za-z0-9_]*`. Does not eat blanks.
pub(crate) fn name(input: &str) -> IResult<&str, &str> {
    let (rest, word) = take_while1(|c: char| c.is_ascii_alphanumeric() || c == '_')(input)?;
    if word.starts_with(|c: char| c.is_ascii_digit()) {
        return Err(err(input, ErrorKind::Alpha));
    }
    Ok((rest, word))
}

/// Parse a name followed by blanks.
pub(crate) fn word(input: &str) -> IResult<&str, &str> {
    terminated(name, blank)(input)
}

/// Match one specific keyword, with a word boundary.
pub(crate) fn keyword(expected: &'static str) -> impl Fn(&str) -> IResult<&str, &str> {
    move |input| {
        let (rest, found) = word(input)?;
        if found == expected {
            Ok((rest, found))
        } else {
            Err(err(input, ErrorKind::Tag))
        }
    }
}

/// Match a punctuation token followed by blanks.
pub(crate) fn sym(token: &'static str) -> impl Fn(&str) -> IResult<&str, &str> {
    move |input| terminated(tag(token), blank)(input)
}

/// Parse an unsigned integer literal.
pub(crate) fn integer(input: &str) -> IResult<&str, i64> {
    let (rest, digits) = take_while1(|c: char| c.is_ascii_digit())(input)?;
    match digits.parse::<i64>() {
        Ok(value) => Ok((rest, value)),
        Err(_) => Err(err(input, ErrorKind::Digit)),
    }
}

/// Parse a number literal: integer, or decimal when a `.` is present.
/// Signs are handled by the unary expression level.
pub(crate) fn number(input: &str) -> IResult<&str, RawExpr> {
    let (rest, digits) = take_while1(|c: char| c.is_ascii_digit())(input)?;
    if let Some(after_dot) = rest.strip_prefix('.') {
        let (rest, fraction) = take_while1(|c: char| c.is_ascii_digit())(after_dot)?;
        let end = input.len() - rest.len();
        match input[..end].parse::<f64>() {
            Ok(value) => Ok((rest, RawExpr::Decimal(value))),
            Err(_) => Err(err(input, ErrorKind::Float)),
        }
    } else {
        match digits.parse::<i64>() {
            Ok(value) => Ok((rest, RawExpr::Integer(value))),
            Err(_) => Err(err(input, ErrorKind::Digit)),
        }
    }
}

fn base_type(word: &str) -> Option<Types> {
    Some(match word {
        "void" => Types::Void,
        "float" => Types::Float,
        "int" => Types::Int,
        "bool" => Types::Boolean,
        "vec2" => Types::Vector2,
        "bvec2" => Types::Vector2b,
        "ivec2" => Types::Vector2i,
        "mat2" => Types::Matrix2,
        "vec3" => Types::Vector3,
        "bvec3" => Types::Vector3b,
        "ivec3" => Types::Vector3i,
        "mat3" => Types::Matrix3,
        "vec4" => Types::Vector4,
        "bvec4" => Types::Vector4b,
        "ivec4" => Types::Vector4i,
        "mat4" => Types::Matrix4,
        "sampler2D" => Types::Texture2,
        _ => return None,
    })
}

fn precision(word: &str) -> Option<Precision> {
    Some(match word {
        "lowp" => Precision::Low,
        "mediump" => Precision::Medium,
        "highp" => Precision::High,
        _ => return None,
    })
}

/// Parse a qualified type: `const? (lowp|mediump|highp)? <kind>`.
pub(crate) fn raw_type(input: &str) -> IResult<&str, RawType> {
    let mut rest = input;
    let mut constant = false;
    let mut found_precision = None;

    let (after, first) = word(rest)?;
    let mut current = first;
    rest = after;
    if current == "const" {
        constant = true;
        let (after, next) = word(rest)?;
        current = next;
        rest = after;
    }
    if let Some(p) = precision(current) {
        found_precision = Some(p);
        let (after, next) = word(rest)?;
        current = next;
        rest = after;
    }
    match base_type(current) {
        Some(kind) => Ok((
            rest,
            RawType {
                constant,
                precision: found_precision,
                kind,
            },
        )),
        None => Err(err(input, ErrorKind::Tag)),
    }
}

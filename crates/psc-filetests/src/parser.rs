//! `.sir` test file parsing.
//!
//! A test file interleaves four kinds of lines, classified by prefix:
//! `test <stage> <dialect>` commands, `with <name> = <expr>;` property
//! bindings, filecheck directives (`check:`, `nextln:`, `sameln:`,
//! `not:`, `regex:`, `unordered:`), and everything else, which is
//! collected as the shader IR source.

use alloc::format;
use alloc::string::{String, ToString};
use alloc::vec::Vec;

use psc_glsl::{Dialect, Stage};

const DIRECTIVES: [&str; 6] = ["check:", "nextln:", "sameln:", "not:", "regex:", "unordered:"];

/// One generation run: which stage's output the directives check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TestCommand {
    pub stage: Stage,
    pub dialect: Dialect,
}

/// A parsed test file.
#[derive(Debug, Clone, PartialEq)]
pub struct TestFile {
    pub commands: Vec<TestCommand>,
    pub source: String,
    /// Property bindings as (name, value-expression text).
    pub properties: Vec<(String, String)>,
    pub directives: Vec<String>,
}

/// Parse a test file into its sections.
pub fn parse_test_file(text: &str) -> Result<TestFile, String> {
    let mut commands = Vec::new();
    let mut source = String::new();
    let mut properties = Vec::new();
    let mut directives = Vec::new();

    for line in text.lines() {
        let trimmed = line.trim();
        if let Some(rest) = trimmed.strip_prefix("test ") {
            commands.push(parse_command(rest.trim())?);
        } else if let Some(rest) = trimmed.strip_prefix("with ") {
            properties.push(parse_property(rest.trim())?);
        } else if DIRECTIVES.iter().any(|d| trimmed.starts_with(d)) {
            directives.push(trimmed.to_string());
        } else {
            source.push_str(line);
            source.push('\n');
        }
    }

    if commands.is_empty() {
        return Err(String::from("test file has no 'test' command"));
    }
    if directives.is_empty() {
        return Err(String::from("test file has no filecheck directives"));
    }
    Ok(TestFile {
        commands,
        source,
        properties,
        directives,
    })
}

fn parse_command(rest: &str) -> Result<TestCommand, String> {
    let mut words = rest.split_whitespace();
    let stage = match words.next() {
        Some("vertex") => Stage::Vertex,
        Some("fragment") => Stage::Fragment,
        other => return Err(format!("unknown stage in test command: {:?}", other)),
    };
    let dialect = match words.next() {
        Some("glsl_330") => Dialect::Gl330,
        Some("gles_300") => Dialect::Gles300,
        other => return Err(format!("unknown dialect in test command: {:?}", other)),
    };
    if let Some(extra) = words.next() {
        return Err(format!("trailing token in test command: {}", extra));
    }
    Ok(TestCommand { stage, dialect })
}

fn parse_property(rest: &str) -> Result<(String, String), String> {
    let (name, value) = rest
        .split_once('=')
        .ok_or_else(|| format!("malformed property binding: with {}", rest))?;
    let value = value.trim().trim_end_matches(';').trim();
    if value.is_empty() {
        return Err(format!("empty property value: with {}", rest));
    }
    Ok((name.trim().to_string(), value.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_sections() {
        let text = "\
test fragment glsl_330
test fragment gles_300

shader {
    property bool lit;
    vertex() { }
    fragment() { }
    outputs(0 vec4 out_color);
}

with lit = true;

check: #version
not: if(
";
        let file = parse_test_file(text).unwrap();
        assert_eq!(file.commands.len(), 2);
        assert_eq!(file.commands[0].stage, Stage::Fragment);
        assert_eq!(file.commands[0].dialect, Dialect::Gl330);
        assert_eq!(file.commands[1].dialect, Dialect::Gles300);
        assert_eq!(file.properties, alloc::vec![(
            String::from("lit"),
            String::from("true")
        )]);
        assert_eq!(file.directives.len(), 2);
        assert!(file.source.contains("shader {"));
        assert!(!file.source.contains("check:"));
    }

    #[test]
    fn test_missing_command_is_rejected() {
        assert!(parse_test_file("shader { }\ncheck: x\n").is_err());
    }

    #[test]
    fn test_missing_directives_are_rejected() {
        assert!(parse_test_file("test vertex glsl_330\nshader { }\n").is_err());
    }

    #[test]
    fn test_bad_dialect_is_rejected() {
        assert!(parse_test_file("test vertex glsl_440\ncheck: x\n").is_err());
    }
}

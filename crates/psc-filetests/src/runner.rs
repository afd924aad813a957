//! Test execution: parse, generate, match.

use alloc::collections::BTreeMap;
use alloc::format;
use alloc::string::String;

use psc_glsl::{GlslGenerator, Stage};
use psc_ir::{parse_shader, parse_value_expression};

use crate::filecheck::match_filecheck;
use crate::parser::parse_test_file;

/// Run one `.sir` test file: generate every commanded (stage, dialect)
/// pair and match the directives against each output.
pub fn run_test_file(text: &str) -> Result<(), String> {
    let file = parse_test_file(text)?;
    let shader =
        parse_shader(&file.source).map_err(|e| format!("IR parse failed: {}", e))?;
    let mut properties = BTreeMap::new();
    for (name, value) in &file.properties {
        let expression = parse_value_expression(value)
            .map_err(|e| format!("property '{}' failed to parse: {}", name, e))?;
        properties.insert(name.clone(), expression);
    }

    for command in &file.commands {
        let generator = GlslGenerator::new(command.dialect)
            .map_err(|e| format!("generator construction failed: {}", e))?;
        let program = generator
            .generate(&shader, &properties)
            .map_err(|e| format!("generation failed ({:?}): {}", command, e))?;
        let output: &String = match command.stage {
            Stage::Vertex => &program.vertex,
            Stage::Fragment => &program.fragment,
        };
        match_filecheck(output, &file.directives).map_err(|e| {
            format!(
                "{:?} did not match directives: {}\n--- generated ---\n{}",
                command, e, output
            )
        })?;
    }
    Ok(())
}

//! Directive matching using the filecheck crate.

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

use filecheck::{Checker, CheckerBuilder, NO_VARIABLES};

/// Build a checker from directive lines.
pub fn build_filechecker(directives: &[String]) -> Result<Checker, String> {
    let mut builder = CheckerBuilder::new();
    for directive in directives {
        builder
            .directive(directive)
            .map_err(|e| format!("failed to parse directive '{}': {}", directive, e))?;
    }
    Ok(builder.finish())
}

/// Match generated output against directive lines.
pub fn match_filecheck(actual: &str, directives: &[String]) -> Result<(), String> {
    let checker = build_filechecker(directives)?;
    let matched = checker
        .check(actual, NO_VARIABLES)
        .map_err(|e| format!("filecheck error: {}", e))?;
    if matched {
        return Ok(());
    }
    let (_, explanation) = checker
        .explain(actual, NO_VARIABLES)
        .map_err(|e| format!("failed to explain filecheck result: {}", e))?;
    Err(format!("filecheck failed:\n{}", explanation))
}

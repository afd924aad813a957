//! File-based tests for the GLSL backend.
//!
//! Similar to Cranelift's filetests, these tests read `.sir` files that
//! contain:
//! - Test commands (`test <stage> <dialect>`)
//! - A shader in the textual IR form
//! - Optional property bindings (`with <name> = <expr>;`)
//! - Filecheck directives matched against the generated stage source

#![no_std]

extern crate alloc;

pub mod filecheck;
pub mod parser;
pub mod runner;

pub use filecheck::match_filecheck;
pub use parser::{parse_test_file, TestCommand, TestFile};
pub use runner::run_test_file;

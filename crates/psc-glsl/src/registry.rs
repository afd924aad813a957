//! Caller-owned generator registry.
//!
//! One generator per dialect, constructed once and shared explicitly.
//! Generators are immutable after construction, so a single registry
//! serves any number of concurrent callers.

use crate::error::GenResult;
use crate::program::{Dialect, GlslGenerator};

pub struct GeneratorRegistry {
    gl330: GlslGenerator,
    gles300: GlslGenerator,
}

impl GeneratorRegistry {
    /// Build and validate one generator for every supported dialect.
    pub fn new() -> GenResult<Self> {
        Ok(GeneratorRegistry {
            gl330: GlslGenerator::new(Dialect::Gl330)?,
            gles300: GlslGenerator::new(Dialect::Gles300)?,
        })
    }

    pub fn get(&self, dialect: Dialect) -> &GlslGenerator {
        match dialect {
            Dialect::Gl330 => &self.gl330,
            Dialect::Gles300 => &self.gles300,
        }
    }
}

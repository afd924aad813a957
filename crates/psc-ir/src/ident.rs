//! Identifiers and scopes.
//!
//! An `Identifier` is an opaque handle for a declared name. Equality and
//! ordering use a process-global allocation index, never the name: two
//! declarations of the same name are distinct identifiers.

use alloc::string::String;
use alloc::vec::Vec;
use core::sync::atomic::{AtomicU32, Ordering};

use crate::types::Type;

static NEXT_INDEX: AtomicU32 = AtomicU32::new(0);

/// A declared name: function parameter, local, uniform, varying or
/// property. Carries its declared type; identity lives in the index.
#[derive(Debug, Clone)]
pub struct Identifier {
    index: u32,
    pub name: String,
    pub ty: Type,
}

impl Identifier {
    /// Allocate a fresh identifier. Each call yields a distinct identity,
    /// regardless of the name.
    pub fn new(name: impl Into<String>, ty: Type) -> Self {
        Identifier {
            index: NEXT_INDEX.fetch_add(1, Ordering::Relaxed),
            name: name.into(),
            ty,
        }
    }
}

impl PartialEq for Identifier {
    fn eq(&self, other: &Self) -> bool {
        self.index == other.index
    }
}

impl Eq for Identifier {}

impl PartialOrd for Identifier {
    fn partial_cmp(&self, other: &Self) -> Option<core::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Identifier {
    fn cmp(&self, other: &Self) -> core::cmp::Ordering {
        self.index.cmp(&other.index)
    }
}

impl core::hash::Hash for Identifier {
    fn hash<H: core::hash::Hasher>(&self, state: &mut H) {
        self.index.hash(state);
    }
}

/// Ordered collection of identifiers visible to a stage or function body.
/// The front-end assembles one per shader; the generator only reads it to
/// pre-register bindings before generation begins.
#[derive(Debug, Clone, Default)]
pub struct Scope {
    identifiers: Vec<Identifier>,
}

impl Scope {
    pub fn new() -> Self {
        Scope::default()
    }

    /// Declare a fresh identifier in this scope and return a copy of it.
    pub fn declare(&mut self, name: impl Into<String>, ty: Type) -> Identifier {
        let identifier = Identifier::new(name, ty);
        self.identifiers.push(identifier.clone());
        identifier
    }

    /// Register an identifier declared elsewhere.
    pub fn add(&mut self, identifier: &Identifier) {
        self.identifiers.push(identifier.clone());
    }

    /// Look up an identifier by declared name. Later declarations win.
    pub fn get(&self, name: &str) -> Option<&Identifier> {
        self.identifiers.iter().rev().find(|i| i.name == name)
    }
}

//! Identifier environment.
//!
//! Maps identifiers to the expression emitted whenever they are
//! referenced: pass-through bindings re-emit the declared name,
//! substitution bindings splice in property values, and loop unrolling
//! rebinds the index to integer literals.

use alloc::collections::BTreeMap;

use psc_ir::{Expression, Identifier};

#[derive(Default)]
pub(crate) struct Environment {
    bindings: BTreeMap<Identifier, Expression>,
}

impl Environment {
    pub(crate) fn new() -> Self {
        Environment::default()
    }

    pub(crate) fn bind(&mut self, identifier: &Identifier, expression: Expression) {
        self.bindings.insert(identifier.clone(), expression);
    }

    /// Bind an identifier to itself: referencing it re-emits its
    /// declared name.
    pub(crate) fn bind_passthrough(&mut self, identifier: &Identifier) {
        self.bind(
            identifier,
            Expression::raw(identifier.ty.exported(), identifier.name.clone()),
        );
    }

    pub(crate) fn get(&self, identifier: &Identifier) -> Option<&Expression> {
        self.bindings.get(identifier)
    }

    /// The raw binding map, for the constant folder.
    pub(crate) fn bindings(&self) -> &BTreeMap<Identifier, Expression> {
        &self.bindings
    }
}

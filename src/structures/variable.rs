//! Variables of the logic IR.
//!
//! A variable is just an interned name.
//! Whether it is a parameter or a local is positional: a variable is a parameter of a definition exactly when it appears in the definition's parameter list.

use std::sync::Arc;

/// A node-typed variable of a definition.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Variable(Arc<str>);

impl Variable {
    pub fn new(name: &str) -> Self {
        Variable(Arc::from(name))
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Variable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/*!
Definitions --- named queries in disjunctive normal form.

A definition has a parameter list and one or more clauses, each clause a conjunction of [literals](crate::structures::literal::Literal).
Definitions are shared by [Rc] and compared structurally, which is what makes repeated [lifting](crate::lifting) checkable: lifting the same definition twice at the same modality and concreteness yields structurally equal (in fact, shared) results.

# Example

```rust
use marten_pm::structures::dnf::Dnf;
use marten_pm::structures::literal::Literal;
use marten_pm::structures::symbol::PartialRelation;
use marten_pm::structures::variable::Variable;

let friend = PartialRelation::new("friend", 2);
let x = Variable::new("x");
let y = Variable::new("y");

let sociable = Dnf::builder("sociable")
    .parameters(vec![x.clone()])
    .clause(vec![Literal::call(friend.erased(), vec![x, y])])
    .build();

assert_eq!(sociable.name(), "sociable");
assert_eq!(sociable.parameters().len(), 1);
```
*/

use std::rc::Rc;
use std::sync::Arc;

use crate::structures::{literal::Literal, variable::Variable};

/// A named definition: parameters and clauses in disjunctive normal form.
#[derive(Clone, Debug, PartialEq)]
pub struct Dnf {
    name: Arc<str>,
    parameters: Vec<Variable>,
    clauses: Vec<Vec<Literal>>,
}

impl Dnf {
    pub fn builder(name: &str) -> DnfBuilder {
        DnfBuilder {
            name: Arc::from(name),
            parameters: Vec::new(),
            clauses: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn parameters(&self) -> &[Variable] {
        &self.parameters
    }

    pub fn clauses(&self) -> &[Vec<Literal>] {
        &self.clauses
    }

    pub(crate) fn new(name: Arc<str>, parameters: Vec<Variable>, clauses: Vec<Vec<Literal>>) -> Self {
        Dnf {
            name,
            parameters,
            clauses,
        }
    }
}

/// Builds a [Dnf] clause by clause.
pub struct DnfBuilder {
    name: Arc<str>,
    parameters: Vec<Variable>,
    clauses: Vec<Vec<Literal>>,
}

impl DnfBuilder {
    pub fn parameters(mut self, parameters: Vec<Variable>) -> Self {
        self.parameters = parameters;
        self
    }

    /// Appends a clause: one conjunction of literals.
    pub fn clause(mut self, literals: Vec<Literal>) -> Self {
        self.clauses.push(literals);
        self
    }

    pub fn build(self) -> Rc<Dnf> {
        Rc::new(Dnf {
            name: self.name,
            parameters: self.parameters,
            clauses: self.clauses,
        })
    }
}

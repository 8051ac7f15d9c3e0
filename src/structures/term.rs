/*!
Value-producing terms.

Terms appear inside [check literals](crate::structures::literal::Literal::Check): value or arithmetic subexpressions which are not relation calls are lowered to a term and wrapped as a truth-valued check.

A [partial-function application](Term::Apply) is the one term the [lifter](crate::lifting) rewrites: it resolves through the function's registered rewriter, or is specialized to the function's interpretation read path.
An application of a function no translator was registered for cannot be interpreted, and lifting reports it as such.
*/

use crate::structures::{
    concreteness::Concreteness, modality::Modality, symbol::AnyPartialSymbol, variable::Variable,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UnaryOp {
    Minus,
    Not,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Eq,
    Less,
    LessEq,
}

/// A value-producing expression tree.
#[derive(Clone, Debug, PartialEq)]
pub enum Term {
    /// A reference to a node-typed variable.
    Variable(Variable),

    /// An integer constant.
    Constant(i64),

    Unary {
        op: UnaryOp,
        body: Box<Term>,
    },

    Binary {
        op: BinaryOp,
        left: Box<Term>,
        right: Box<Term>,
    },

    /// An application of a partial function to node arguments.
    ///
    /// `specialized` is `None` until the lifter resolves the application for one modality and concreteness.
    Apply {
        function: AnyPartialSymbol,
        specialized: Option<(Modality, Concreteness)>,
        arguments: Vec<Variable>,
    },
}

impl Term {
    pub fn variable(name: &str) -> Self {
        Term::Variable(Variable::new(name))
    }

    pub fn apply(function: AnyPartialSymbol, arguments: Vec<Variable>) -> Self {
        Term::Apply {
            function,
            specialized: None,
            arguments,
        }
    }
}

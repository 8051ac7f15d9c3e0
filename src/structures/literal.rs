/*!
Literals --- the conjuncts of a definition's clause.

A literal is a boolean constant, a call on a [constraint](Constraint), a node equality/inequality, or a truth-valued [check](Literal::Check) over a term.

Calls may carry a modal annotation.
During [lifting](crate::lifting) an annotated call keeps its own modality (the innermost annotation is authoritative), while an unannotated call takes the modality the enclosing definition is lifted at.
*/

use std::rc::Rc;

use crate::structures::{
    concreteness::Concreteness,
    dnf::Dnf,
    modality::Modality,
    symbol::AnyPartialSymbol,
    term::Term,
    variable::Variable,
};

/// The sign of a call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CallPolarity {
    Positive,
    Negative,
}

/// The callee of a call literal.
#[derive(Clone, Debug, PartialEq)]
pub enum Constraint {
    /// An unspecialized call on a partial relation.
    Relation(AnyPartialSymbol),

    /// A call into the relation's interpretation read path, specialized to one modality and concreteness.
    /// Produced by lifting; copied unchanged if lifted again.
    Interpretation {
        symbol: AnyPartialSymbol,
        modality: Modality,
        concreteness: Concreteness,
    },

    /// A call into a (possibly nested) definition.
    Definition(Rc<Dnf>),
}

impl Constraint {
    pub fn name(&self) -> &str {
        match self {
            Self::Relation(symbol) => symbol.name(),
            Self::Interpretation { symbol, .. } => symbol.name(),
            Self::Definition(dnf) => dnf.name(),
        }
    }
}

/// A call on a constraint, signed and optionally modally annotated.
#[derive(Clone, Debug, PartialEq)]
pub struct CallLiteral {
    pub polarity: CallPolarity,

    /// The modal annotation, if any.
    /// `None` resolves to the modality of the enclosing lift.
    pub modality: Option<Modality>,

    pub constraint: Constraint,

    pub arguments: Vec<Variable>,
}

/// One conjunct of a clause.
#[derive(Clone, Debug, PartialEq)]
pub enum Literal {
    True,
    False,

    Call(CallLiteral),

    /// Node equality (or, negated, inequality) between two node-typed operands.
    Equivalence {
        positive: bool,
        left: Variable,
        right: Variable,
    },

    /// A truth-valued check over a value term.
    Check(Term),
}

impl Literal {
    /// A positive, unannotated call on a partial relation.
    pub fn call(symbol: AnyPartialSymbol, arguments: Vec<Variable>) -> Self {
        Literal::Call(CallLiteral {
            polarity: CallPolarity::Positive,
            modality: None,
            constraint: Constraint::Relation(symbol),
            arguments,
        })
    }

    /// A negative, unannotated call on a partial relation.
    pub fn negated_call(symbol: AnyPartialSymbol, arguments: Vec<Variable>) -> Self {
        Literal::Call(CallLiteral {
            polarity: CallPolarity::Negative,
            modality: None,
            constraint: Constraint::Relation(symbol),
            arguments,
        })
    }

    /// A positive, unannotated call into a definition.
    pub fn definition_call(dnf: Rc<Dnf>, arguments: Vec<Variable>) -> Self {
        Literal::Call(CallLiteral {
            polarity: CallPolarity::Positive,
            modality: None,
            constraint: Constraint::Definition(dnf),
            arguments,
        })
    }
}

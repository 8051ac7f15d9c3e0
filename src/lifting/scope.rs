/*!
Variable occurrence analysis over definitions.

Supports the lifter's two scope questions:
- Which variables does a clause bind?
  Parameters, plus everything occurring in a positive literal.
- Is a local variable *effectively singleton* with respect to one literal?
  That is, referenced in the literal exactly as many times as in the whole enclosing definition, so it cannot be meaningfully bound outside that literal.

The singleton comparison must be exact.
Undercounting the definition-wide total would quantify out a variable which escapes the literal --- unsound.
Overcounting merely keeps a variable in an argument list which could have been dropped, which is safe.
*/

use std::collections::{HashMap, HashSet};

use crate::structures::{
    dnf::Dnf,
    literal::{CallPolarity, Literal},
    term::Term,
    variable::Variable,
};

/// Occurrence counts of every variable across the whole definition.
pub(crate) fn reference_counts(dnf: &Dnf) -> HashMap<Variable, usize> {
    let mut counts = HashMap::new();
    for clause in dnf.clauses() {
        for literal in clause {
            count_literal(literal, &mut counts);
        }
    }
    counts
}

fn count_literal(literal: &Literal, counts: &mut HashMap<Variable, usize>) {
    match literal {
        Literal::True | Literal::False => {}

        Literal::Call(call) => {
            for argument in &call.arguments {
                bump(argument, counts);
            }
        }

        Literal::Equivalence { left, right, .. } => {
            bump(left, counts);
            bump(right, counts);
        }

        Literal::Check(term) => count_term(term, counts),
    }
}

fn count_term(term: &Term, counts: &mut HashMap<Variable, usize>) {
    match term {
        Term::Variable(variable) => bump(variable, counts),

        Term::Constant(_) => {}

        Term::Unary { body, .. } => count_term(body, counts),

        Term::Binary { left, right, .. } => {
            count_term(left, counts);
            count_term(right, counts);
        }

        Term::Apply { arguments, .. } => {
            for argument in arguments {
                bump(argument, counts);
            }
        }
    }
}

fn bump(variable: &Variable, counts: &mut HashMap<Variable, usize>) {
    *counts.entry(variable.clone()).or_insert(0) += 1;
}

/// The variables a clause binds: parameters plus everything occurring in a positive call or positive equivalence.
///
/// Negated calls and check terms consume bindings, they do not produce them.
pub(crate) fn bound_variables(parameters: &[Variable], clause: &[Literal]) -> HashSet<Variable> {
    let mut bound: HashSet<Variable> = parameters.iter().cloned().collect();
    for literal in clause {
        match literal {
            Literal::Call(call) => {
                if call.polarity == CallPolarity::Positive {
                    bound.extend(call.arguments.iter().cloned());
                }
            }

            Literal::Equivalence {
                positive: true,
                left,
                right,
            } => {
                bound.insert(left.clone());
                bound.insert(right.clone());
            }

            _ => {}
        }
    }
    bound
}

/// Whether a variable is effectively singleton with respect to one literal.
///
/// Parameter variables are never eligible: they are bound at the definition's interface.
pub(crate) fn effectively_singleton(
    variable: &Variable,
    parameters: &[Variable],
    in_literal: usize,
    in_definition: usize,
) -> bool {
    if parameters.contains(variable) {
        return false;
    }
    in_literal == in_definition
}

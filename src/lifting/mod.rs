/*!
Query lifting --- rewriting a definition into a modality- and concreteness-specialized equivalent.

Given a [definition](crate::structures::dnf::Dnf) over partial symbols, [DnfLifter::lift] produces a variant in which every reference to a partial symbol has become a call into the symbol's interpretation for one `(modality, concreteness)` pair, so the specialized query evaluates directly against stored and derived values while staying sound for that modality's approximation.

One rule composes structurally over relation calls, function applications, whole clauses, and nested definitions:

- A positive call takes the modality of its own annotation if any (the innermost annotation is authoritative), otherwise the outer modality, and is rewritten through the symbol's registered [RelationRewriter] or the default interpretation read path.
- A negated call first negates the outer modality and merges any inner annotation onto the result, implementing the must/may duality under negation.
  Arguments which are effectively singleton --- referenced in the negated literal exactly as often as in the whole enclosing definition, so bindable nowhere else --- are existentially quantified out: a fresh helper definition restricted to the remaining arguments nests the positive body, and the negation applies to the helper, so no bound variable dangles out of a negated call.
- Node equality is a call on the reserved `equals` relation under the same rules; inequality is the negation of equality at every modality, never specialized away.
- Check terms are lifted recursively, resolving partial-function applications through the function's registered [FunctionRewriter] or the default read path.

Results are produced once per `(definition, modality, concreteness)` and cached, so lifting the same definition at the same specialization twice returns the identical (hence structurally equal) result.

Subexpressions which resolve to no registered symbol fail with [LiftError::UninterpretableExpression], and a variable consumed by a negation or check without being bound by a parameter or positive literal fails with [LiftError::UnknownVariable].
*/

mod scope;

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use std::sync::Arc;

use crate::{
    adapter::equals_symbol,
    misc::log::targets::{self},
    structures::{
        concreteness::Concreteness,
        dnf::Dnf,
        literal::{CallLiteral, CallPolarity, Constraint, Literal},
        modality::Modality,
        symbol::AnyPartialSymbol,
        term::Term,
        variable::Variable,
    },
    types::err::LiftError,
};

/// A custom rule rewriting calls on one partial relation.
pub trait RelationRewriter {
    /// The literals a call on the relation becomes, for the given specialization.
    fn rewrite_call(
        &self,
        modality: Modality,
        concreteness: Concreteness,
        polarity: CallPolarity,
        arguments: &[Variable],
    ) -> Result<Vec<Literal>, LiftError>;
}

/// A custom rule rewriting applications of one partial function.
pub trait FunctionRewriter {
    /// The term an application of the function becomes, for the given specialization.
    fn rewrite_apply(
        &self,
        modality: Modality,
        concreteness: Concreteness,
        arguments: &[Variable],
    ) -> Result<Term, LiftError>;
}

/// The hook a query engine invokes when compiling a query which references partial symbols.
pub trait QueryRewriter {
    fn rewrite(
        &self,
        modality: Modality,
        concreteness: Concreteness,
        query: &Rc<Dnf>,
    ) -> Result<Rc<Dnf>, LiftError>;
}

type LiftKey = (usize, Modality, Concreteness);

/// Rewrites definitions into modality- and concreteness-specialized variants.
pub struct DnfLifter {
    relations: RefCell<HashMap<AnyPartialSymbol, Option<Rc<dyn RelationRewriter>>>>,
    functions: RefCell<HashMap<AnyPartialSymbol, Option<Rc<dyn FunctionRewriter>>>>,
    // Keys are source addresses, so each entry also pins its source: a dropped
    // source would free the address for some later definition to reuse.
    cache: RefCell<HashMap<LiftKey, (Rc<Dnf>, Rc<Dnf>)>>,
}

impl Default for DnfLifter {
    fn default() -> Self {
        Self::new()
    }
}

impl DnfLifter {
    /// A lifter knowing only the reserved `equals` relation.
    pub fn new() -> Self {
        let lifter = DnfLifter {
            relations: RefCell::new(HashMap::new()),
            functions: RefCell::new(HashMap::new()),
            cache: RefCell::new(HashMap::new()),
        };
        lifter
            .relations
            .borrow_mut()
            .insert(equals_symbol().erased(), None);
        lifter
    }

    /// Registers a partial relation, with a custom rewriter or the default interpretation rewrite.
    pub fn add_relation(
        &self,
        symbol: AnyPartialSymbol,
        rewriter: Option<Rc<dyn RelationRewriter>>,
    ) {
        log::debug!(target: targets::LIFTING, "Relation registered: {symbol}");
        self.relations.borrow_mut().insert(symbol, rewriter);
    }

    /// Registers a partial function, with a custom rewriter or the default interpretation rewrite.
    pub fn add_function(
        &self,
        symbol: AnyPartialSymbol,
        rewriter: Option<Rc<dyn FunctionRewriter>>,
    ) {
        log::debug!(target: targets::LIFTING, "Function registered: {symbol}");
        self.functions.borrow_mut().insert(symbol, rewriter);
    }

    /// The definition specialized to the given modality and concreteness.
    ///
    /// Specializing the same definition at the same pair again returns the cached, identical result.
    pub fn lift(
        &self,
        modality: Modality,
        concreteness: Concreteness,
        dnf: &Rc<Dnf>,
    ) -> Result<Rc<Dnf>, LiftError> {
        let key = (Rc::as_ptr(dnf) as usize, modality, concreteness);
        if let Some((_, lifted)) = self.cache.borrow().get(&key) {
            return Ok(lifted.clone());
        }

        log::trace!(
            target: targets::LIFTING,
            "Lifting {} at {modality} {concreteness}",
            dnf.name(),
        );

        let counts = scope::reference_counts(dnf);

        let mut clauses = Vec::with_capacity(dnf.clauses().len());
        for clause in dnf.clauses() {
            let bound = scope::bound_variables(dnf.parameters(), clause);
            let mut literals = Vec::with_capacity(clause.len());
            for literal in clause {
                self.lift_literal(
                    modality,
                    concreteness,
                    dnf,
                    &counts,
                    &bound,
                    literal,
                    &mut literals,
                )?;
            }
            clauses.push(literals);
        }

        let name = format!("{}#{modality}#{concreteness}", dnf.name());
        let lifted = Rc::new(Dnf::new(
            Arc::from(name.as_str()),
            dnf.parameters().to_vec(),
            clauses,
        ));
        self.cache
            .borrow_mut()
            .insert(key, (dnf.clone(), lifted.clone()));
        Ok(lifted)
    }

    #[allow(clippy::too_many_arguments)]
    fn lift_literal(
        &self,
        outer: Modality,
        concreteness: Concreteness,
        dnf: &Dnf,
        counts: &HashMap<Variable, usize>,
        bound: &std::collections::HashSet<Variable>,
        literal: &Literal,
        out: &mut Vec<Literal>,
    ) -> Result<(), LiftError> {
        match literal {
            Literal::True => out.push(Literal::True),

            Literal::False => out.push(Literal::False),

            Literal::Check(term) => {
                let lifted = self.lift_term(outer, concreteness, bound, term)?;
                out.push(Literal::Check(lifted));
            }

            Literal::Equivalence {
                positive,
                left,
                right,
            } => {
                // Inequality is the negation of equality, at every modality.
                let call = CallLiteral {
                    polarity: match positive {
                        true => CallPolarity::Positive,
                        false => CallPolarity::Negative,
                    },
                    modality: None,
                    constraint: Constraint::Relation(equals_symbol().erased()),
                    arguments: vec![left.clone(), right.clone()],
                };
                self.lift_call(outer, concreteness, dnf, counts, bound, &call, out)?;
            }

            Literal::Call(call) => {
                self.lift_call(outer, concreteness, dnf, counts, bound, call, out)?;
            }
        }
        Ok(())
    }

    #[allow(clippy::too_many_arguments)]
    fn lift_call(
        &self,
        outer: Modality,
        concreteness: Concreteness,
        dnf: &Dnf,
        counts: &HashMap<Variable, usize>,
        bound: &std::collections::HashSet<Variable>,
        call: &CallLiteral,
        out: &mut Vec<Literal>,
    ) -> Result<(), LiftError> {
        match call.polarity {
            CallPolarity::Positive => {
                let effective = match call.modality {
                    Some(inner) => inner.merge(outer),
                    None => outer,
                };
                self.rewrite_target(
                    effective,
                    concreteness,
                    CallPolarity::Positive,
                    &call.constraint,
                    &call.arguments,
                    out,
                )
            }

            CallPolarity::Negative => {
                let negated = outer.negate();
                let effective = match call.modality {
                    Some(inner) => inner.merge(negated),
                    None => negated,
                };

                // Quantify out arguments no other literal can bind, keeping the rest.
                let mut filtered: Vec<Variable> = Vec::new();
                let mut quantified = false;
                for argument in &call.arguments {
                    let in_literal = call
                        .arguments
                        .iter()
                        .filter(|other| *other == argument)
                        .count();
                    let in_definition = counts.get(argument).copied().unwrap_or(0);
                    if scope::effectively_singleton(
                        argument,
                        dnf.parameters(),
                        in_literal,
                        in_definition,
                    ) {
                        quantified = true;
                    } else if !filtered.contains(argument) {
                        filtered.push(argument.clone());
                    }
                }

                for argument in &filtered {
                    if !bound.contains(argument) {
                        return Err(LiftError::UnknownVariable(argument.name().to_string()));
                    }
                }

                if quantified {
                    // A helper restricted to the filtered arguments nests the positive body,
                    // so the removed arguments are existentially bound inside the negation.
                    let helper_name = format!("{}#quantified", call.constraint.name());
                    let helper = Dnf::builder(&helper_name)
                        .parameters(filtered.clone())
                        .clause(vec![Literal::Call(CallLiteral {
                            polarity: CallPolarity::Positive,
                            modality: None,
                            constraint: call.constraint.clone(),
                            arguments: call.arguments.clone(),
                        })])
                        .build();
                    let lifted_helper = self.lift(effective, concreteness, &helper)?;
                    out.push(Literal::Call(CallLiteral {
                        polarity: CallPolarity::Negative,
                        modality: None,
                        constraint: Constraint::Definition(lifted_helper),
                        arguments: filtered,
                    }));
                    return Ok(());
                }

                self.rewrite_target(
                    effective,
                    concreteness,
                    CallPolarity::Negative,
                    &call.constraint,
                    &call.arguments,
                    out,
                )
            }
        }
    }

    fn rewrite_target(
        &self,
        modality: Modality,
        concreteness: Concreteness,
        polarity: CallPolarity,
        constraint: &Constraint,
        arguments: &[Variable],
        out: &mut Vec<Literal>,
    ) -> Result<(), LiftError> {
        match constraint {
            Constraint::Relation(symbol) => {
                let registered = self.relations.borrow().get(symbol).cloned();
                match registered {
                    None => Err(LiftError::UninterpretableExpression(symbol.to_string())),

                    Some(Some(rewriter)) => {
                        let literals =
                            rewriter.rewrite_call(modality, concreteness, polarity, arguments)?;
                        out.extend(literals);
                        Ok(())
                    }

                    Some(None) => {
                        out.push(Literal::Call(CallLiteral {
                            polarity,
                            modality: None,
                            constraint: Constraint::Interpretation {
                                symbol: symbol.clone(),
                                modality,
                                concreteness,
                            },
                            arguments: arguments.to_vec(),
                        }));
                        Ok(())
                    }
                }
            }

            // Already specialized, e.g. by an earlier lift. Copied unchanged for idempotence.
            Constraint::Interpretation { .. } => {
                out.push(Literal::Call(CallLiteral {
                    polarity,
                    modality: None,
                    constraint: constraint.clone(),
                    arguments: arguments.to_vec(),
                }));
                Ok(())
            }

            Constraint::Definition(definition) => {
                let lifted = self.lift(modality, concreteness, definition)?;
                out.push(Literal::Call(CallLiteral {
                    polarity,
                    modality: None,
                    constraint: Constraint::Definition(lifted),
                    arguments: arguments.to_vec(),
                }));
                Ok(())
            }
        }
    }

    fn lift_term(
        &self,
        modality: Modality,
        concreteness: Concreteness,
        bound: &std::collections::HashSet<Variable>,
        term: &Term,
    ) -> Result<Term, LiftError> {
        match term {
            Term::Variable(variable) => match bound.contains(variable) {
                true => Ok(term.clone()),
                false => Err(LiftError::UnknownVariable(variable.name().to_string())),
            },

            Term::Constant(_) => Ok(term.clone()),

            Term::Unary { op, body } => Ok(Term::Unary {
                op: *op,
                body: Box::new(self.lift_term(modality, concreteness, bound, body)?),
            }),

            Term::Binary { op, left, right } => Ok(Term::Binary {
                op: *op,
                left: Box::new(self.lift_term(modality, concreteness, bound, left)?),
                right: Box::new(self.lift_term(modality, concreteness, bound, right)?),
            }),

            Term::Apply {
                function,
                specialized,
                arguments,
            } => {
                for argument in arguments {
                    if !bound.contains(argument) {
                        return Err(LiftError::UnknownVariable(argument.name().to_string()));
                    }
                }

                if specialized.is_some() {
                    return Ok(term.clone());
                }

                let registered = self.functions.borrow().get(function).cloned();
                match registered {
                    None => Err(LiftError::UninterpretableExpression(function.to_string())),

                    Some(Some(rewriter)) => {
                        rewriter.rewrite_apply(modality, concreteness, arguments)
                    }

                    Some(None) => Ok(Term::Apply {
                        function: function.clone(),
                        specialized: Some((modality, concreteness)),
                        arguments: arguments.clone(),
                    }),
                }
            }
        }
    }
}

impl QueryRewriter for DnfLifter {
    fn rewrite(
        &self,
        modality: Modality,
        concreteness: Concreteness,
        query: &Rc<Dnf>,
    ) -> Result<Rc<Dnf>, LiftError> {
        self.lift(modality, concreteness, query)
    }
}

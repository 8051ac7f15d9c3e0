/*!
Modality --- how not-yet-decided information is approximated when answering a query.

A `Must` answer is a lower bound: it holds in every concretization of the partial model.
A `May` answer is an upper bound: it holds in at least one concretization.
`Current` is the exact mode, and is only meaningful where evaluation targets a
[candidate](crate::structures::concreteness::Concreteness::Candidate), as no uncertainty remains there.

Two operators structure the modalities:
- [negate](Modality::negate) flips between the bounds, so negation of a literal dualizes its approximation.
- [merge](Modality::merge) composes an inner modal annotation with an outer evaluation context.
  The innermost annotation is authoritative; an unannotated call takes the outer context.
  Call sites represent 'unannotated' with an [Option], resolved before merging.

Both operators are involutive/associative in the ways lifting relies on:
`m.negate().negate() == m` for every `m`, and merging is unaffected by the order
a query tree is rewritten bottom-up.
*/

/// The approximation mode used when answering a query over not-yet-decided facts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Modality {
    /// Lower bound: holds in every concretization.
    Must,

    /// Upper bound: holds in some concretization.
    May,

    /// Exact: no approximation.
    /// Valid only where concreteness is candidate.
    Current,
}

impl Modality {
    /// The dual modality, for use under logical negation.
    ///
    /// The bounds flip --- what must not hold is what may not hold in every concretization --- while the exact mode is self-dual.
    pub fn negate(self) -> Self {
        match self {
            Self::Must => Self::May,
            Self::May => Self::Must,
            Self::Current => Self::Current,
        }
    }

    /// Composes this (inner) modality with an outer evaluation context.
    ///
    /// The innermost annotation is authoritative, so the receiver wins.
    /// Unannotated calls carry no inner modality and resolve to the outer context before any merge happens.
    pub fn merge(self, _outer: Self) -> Self {
        self
    }
}

impl std::fmt::Display for Modality {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Must => write!(f, "must"),
            Self::May => write!(f, "may"),
            Self::Current => write!(f, "current"),
        }
    }
}

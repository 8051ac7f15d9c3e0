//! Concreteness --- whether evaluation targets the symbolic partial model or one realized candidate.

/// The view of a model a query is evaluated against.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Concreteness {
    /// The symbolic, under-construction model.
    /// Facts which are not yet decided remain not decided.
    Partial,

    /// A concretely realized candidate, used for final validation.
    /// No uncertainty remains.
    Candidate,
}

impl Concreteness {
    /// Every concreteness, in declaration order.
    pub const ALL: [Concreteness; 2] = [Concreteness::Partial, Concreteness::Candidate];
}

impl std::fmt::Display for Concreteness {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Partial => write!(f, "partial"),
            Self::Candidate => write!(f, "candidate"),
        }
    }
}

/// A set of concreteness levels, e.g. those a reasoning configuration must support.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ConcretenessSet {
    partial: bool,
    candidate: bool,
}

impl ConcretenessSet {
    /// The set of every concreteness.
    pub fn all() -> Self {
        ConcretenessSet {
            partial: true,
            candidate: true,
        }
    }

    /// The empty set.
    pub fn empty() -> Self {
        ConcretenessSet {
            partial: false,
            candidate: false,
        }
    }

    /// The set holding exactly the given levels.
    pub fn of(levels: &[Concreteness]) -> Self {
        let mut set = Self::empty();
        for level in levels {
            set.insert(*level);
        }
        set
    }

    pub fn insert(&mut self, level: Concreteness) {
        match level {
            Concreteness::Partial => self.partial = true,
            Concreteness::Candidate => self.candidate = true,
        }
    }

    pub fn contains(&self, level: Concreteness) -> bool {
        match level {
            Concreteness::Partial => self.partial,
            Concreteness::Candidate => self.candidate,
        }
    }

    /// The members of the set, in declaration order of [Concreteness].
    pub fn iter(&self) -> impl Iterator<Item = Concreteness> + '_ {
        Concreteness::ALL
            .into_iter()
            .filter(|level| self.contains(*level))
    }
}

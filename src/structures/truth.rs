/*!
The four-valued truth lattice.

Information order, from least to most decided:

```text
        Unknown
        /     \
     True     False
        \     /
         Error
```

`Unknown` carries no information, `True` and `False` are the concrete values, and `Error` records that refinement narrowed a fact both ways.

The [must](TruthValue::must) and [may](TruthValue::may) projections read the lattice as bounds over concretizations:
a fact `must` hold when every concretization decides it true, and `may` hold when at least one does.
`Error` admits no concretization, so `must` is vacuously true of it and `may` is false.
*/

use crate::structures::value::AbstractValue;

/// A partially-decided boolean.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TruthValue {
    True,
    False,
    Unknown,
    Error,
}

impl TruthValue {
    /// The truth value deciding exactly the given boolean.
    pub fn of(value: bool) -> Self {
        match value {
            true => Self::True,
            false => Self::False,
        }
    }

    /// The lower bound: true in every concretization.
    pub fn must(&self) -> bool {
        matches!(self, Self::True | Self::Error)
    }

    /// The upper bound: true in some concretization.
    pub fn may(&self) -> bool {
        matches!(self, Self::True | Self::Unknown)
    }
}

impl AbstractValue<bool> for TruthValue {
    fn unknown() -> Self {
        Self::Unknown
    }

    fn meet(&self, other: &Self) -> Self {
        match (self, other) {
            (Self::Unknown, _) => *other,
            (_, Self::Unknown) => *self,
            _ if self == other => *self,
            _ => Self::Error,
        }
    }

    fn join(&self, other: &Self) -> Self {
        match (self, other) {
            (Self::Error, _) => *other,
            (_, Self::Error) => *self,
            _ if self == other => *self,
            _ => Self::Unknown,
        }
    }

    fn is_error(&self) -> bool {
        matches!(self, Self::Error)
    }

    fn is_concrete(&self) -> bool {
        matches!(self, Self::True | Self::False)
    }

    fn concrete(&self) -> Option<bool> {
        match self {
            Self::True => Some(true),
            Self::False => Some(false),
            Self::Unknown | Self::Error => None,
        }
    }
}

impl std::fmt::Display for TruthValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::True => write!(f, "true"),
            Self::False => write!(f, "false"),
            Self::Unknown => write!(f, "unknown"),
            Self::Error => write!(f, "error"),
        }
    }
}

//! Error types used in the library.
//!
//! - All of these are unrecoverable at the point of detection and propagate synchronously to the caller which triggered configuration, build, lifting, or refinement.
//! - None are retried internally.
//!
//! Names of the error enums --- for the most part --- overlap with corresponding structs.
//  As such, throughout the library err::{self} is often used to prefix use of the types with `err::`.

use crate::structures::concreteness::Concreteness;

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ErrorKind {
    Build(BuildError),
    Lift(LiftError),
    Model(ModelError),
    Refinement(RefinementError),
    Adapter(AdapterError),
}

/// Noted errors while configuring or building a reasoning adapter.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum BuildError {
    /// Two distinct translators were registered for the same partial symbol.
    DuplicateTranslator(String),

    /// Two distinct storage refiners were registered for the same stored symbol.
    DuplicateStorageRefiner(String),

    /// Explicitly registered storage refiners whose symbols are absent from the finalized storage universe.
    /// Every offending symbol is listed.
    UnusedStorageRefiners(Vec<String>),

    /// A registration call was issued after the configuration phase closed.
    /// A programmer error, so there is no recovery path beyond failing loudly.
    Closed,
}

impl From<BuildError> for ErrorKind {
    fn from(e: BuildError) -> Self {
        ErrorKind::Build(e)
    }
}

/// Noted errors while lifting a definition to some modality and concreteness.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum LiftError {
    /// A subexpression which resolves to neither a registered call nor a value term.
    UninterpretableExpression(String),

    /// A variable reference which resolves to nothing in the current lexical scope.
    UnknownVariable(String),
}

impl From<LiftError> for ErrorKind {
    fn from(e: LiftError) -> Self {
        ErrorKind::Lift(e)
    }
}

/// Errors in the model storage boundary.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ModelError {
    /// A symbol absent from the finalized store.
    UnknownSymbol(String),

    /// Typed access to a symbol whose storage holds a different value type.
    TypeMismatch(String),

    /// A tuple whose width disagrees with the arity of the symbol.
    ArityMismatch {
        symbol: String,
        expected: u32,
        found: usize,
    },
}

impl From<ModelError> for ErrorKind {
    fn from(e: ModelError) -> Self {
        ErrorKind::Model(e)
    }
}

/// Noted errors while refining a model, whether storage tuples or interpretations.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum RefinementError {
    /// The underlying storage operation failed.
    Model(ModelError),

    /// A refinement step narrowed some value to the error (inconsistent) element of its lattice.
    Inconsistent(String),
}

impl From<ModelError> for RefinementError {
    fn from(e: ModelError) -> Self {
        RefinementError::Model(e)
    }
}

impl From<RefinementError> for ErrorKind {
    fn from(e: RefinementError) -> Self {
        ErrorKind::Refinement(e)
    }
}

/// Errors when querying a built reasoning adapter.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum AdapterError {
    /// No translator was registered for the partial symbol.
    UnknownPartialSymbol(String),

    /// No interpretation refiner was registered for the partial symbol.
    NoRefiner(String),

    /// The factory registered for the partial symbol answers in a different value type.
    TypeMismatch(String),

    /// The requested concreteness was excluded from the required interpretations, and so never built.
    NotRequired(Concreteness),

    /// The underlying storage operation failed.
    Model(ModelError),
}

impl From<ModelError> for AdapterError {
    fn from(e: ModelError) -> Self {
        AdapterError::Model(e)
    }
}

impl From<AdapterError> for ErrorKind {
    fn from(e: AdapterError) -> Self {
        ErrorKind::Adapter(e)
    }
}

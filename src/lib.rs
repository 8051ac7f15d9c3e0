//! A library for building and evaluating partial models.
//!
//! marten_pm is the reasoning layer of a bounded model generator: it works with graph-shaped models in which facts about relations between nodes may be true, false, or not yet decided, and supports a search procedure which refines such a partial model toward concrete, fully-decided candidates while reasoning soundly about the undecided parts.
//!
//! # Orientation
//!
//! The library is designed around a configuration phase and a frozen runtime artifact.
//!
//! During configuration a [ReasoningBuilder](builder::ReasoningBuilder) collects, per partial symbol, a [translator](translator) naming how the symbol's interpretation is read and refined, together with explicit [storage refiners](refinement), [initializers](refinement::ModelInitializer), and [objectives](objectives).
//! Building freezes everything into an immutable [ReasoningAdapter](adapter::ReasoningAdapter), the only object other subsystems query at runtime, shareable across concurrently explored [model instances](adapter::instance).
//!
//! Queries over partial symbols are never evaluated as written.
//! The [lifter](lifting) rewrites a [definition](structures::dnf) into a variant specialized to a [modality](structures::modality) --- the `must`/`may` approximation bounds over undecided facts --- and a [concreteness](structures::concreteness) --- the symbolic partial view or a realized candidate.
//! The specialized query calls directly into the registered [interpretations](interpretation), so evaluating it against stored values yields a sound answer for that approximation.
//!
//! Population changes flow through [storage refinement](refinement): every node creation or removal runs the per-symbol refiners synchronously, so stored tuples never dangle.
//!
//! Useful starting points:
//! - The [builder](builder) for the configuration lifecycle and its invariants.
//! - The [lifting](lifting) module for the rewrite rules and their soundness reasoning.
//! - The [truth lattice](structures::truth) for the canonical four-valued domain.
//! - The [db](db) module for the narrow storage boundary the core builds on.
//!
//! # Example
//!
//! ```rust
//! use std::rc::Rc;
//!
//! use marten_pm::adapter::ReasoningInstance;
//! use marten_pm::builder::ReasoningBuilder;
//! use marten_pm::config::Config;
//! use marten_pm::db::store::ModelStoreBuilder;
//! use marten_pm::interpretation::storage::StorageInterpretationFactory;
//! use marten_pm::interpretation::PartialInterpretation;
//! use marten_pm::structures::concreteness::Concreteness;
//! use marten_pm::structures::symbol::PartialRelation;
//! use marten_pm::structures::truth::TruthValue;
//! use marten_pm::structures::tuple::Tuple;
//! use marten_pm::translator::{RelationTranslator, SymbolTranslator};
//!
//! let friend = PartialRelation::new("friend", 2);
//! let translator =
//!     RelationTranslator::new(friend.clone(), StorageInterpretationFactory::new(&friend));
//!
//! let mut builder = ReasoningBuilder::from_config(Config::default());
//! builder
//!     .partial_symbol(Rc::new(SymbolTranslator::Relation(translator)))
//!     .unwrap();
//!
//! let adapter = builder.build_with(ModelStoreBuilder::default()).unwrap();
//! let mut instance = ReasoningInstance::new(adapter).unwrap();
//!
//! let a = instance.create_node().unwrap();
//! let b = instance.create_node().unwrap();
//! assert_eq!(instance.node_count(), 2);
//!
//! let reading = instance
//!     .interpretation(&friend, Concreteness::Partial)
//!     .unwrap();
//! assert_eq!(
//!     reading.get(instance.model(), &Tuple::from([a, b])),
//!     TruthValue::Unknown,
//! );
//! ```
//!
//! # Logs
//!
//! To help diagnose issues, calls to [log!](log) are made with a variety of targets so output can be narrowed to the relevant parts of the library.
//! The targets are listed in [misc::log].
//! No log implementation is provided.

#![allow(clippy::single_match)]
#![allow(clippy::collapsible_else_if)]

pub mod adapter;
pub mod builder;
pub mod config;
pub mod db;
pub mod interpretation;
pub mod lifting;
pub mod objectives;
pub mod refinement;
pub mod structures;
pub mod translator;
pub mod types;

pub mod misc;

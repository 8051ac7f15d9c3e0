/*!
The reasoning adapter --- the immutable, runtime-facing bundle produced by a successful build.

An adapter snapshots everything the [builder](crate::builder) collected, bound to one finalized store:
the required concreteness levels, the interpretation and refiner factory maps, the reconciled storage-refiner map, the initializer sequence, and the summed objective (if any objectives were registered).

Created exactly once per model configuration and never mutated afterwards, an adapter is safely shared --- behind an [Arc] --- across any number of concurrently explored model instances.
Per-instance state lives in a [ReasoningInstance], created from the shared factories; see [instance].

Two reserved symbols are wired in regardless of user configuration:
- [equals_symbol], the relation node equality lifts to.
- [node_count_symbol], arity-0 population bookkeeping, registered at build start and excluded from structural state coding so it does not affect equivalence of explored states.
*/

pub mod instance;
pub use instance::ReasoningInstance;

use std::collections::HashMap;
use std::sync::Arc;

use crate::{
    db::{store::ModelStore, SymbolId},
    interpretation::{AnyInterpretationFactory, AnyRefinerFactory},
    objectives::SumObjective,
    refinement::{ModelInitializer, StorageRefinerFactory},
    structures::{
        concreteness::ConcretenessSet,
        symbol::{AnyPartialSymbol, PartialRelation, Symbol},
    },
    types::err::AdapterError,
};

/// The reserved relation node equality is lifted to.
pub fn equals_symbol() -> PartialRelation {
    PartialRelation::new("equals", 2)
}

/// The reserved arity-0 symbol holding the node count of a model.
pub fn node_count_symbol() -> Symbol<i64> {
    Symbol::new("node_count", 0, 0)
}

/// The immutable bundle of factories and initializers bound to one finalized store.
pub struct ReasoningAdapter {
    required_interpretations: ConcretenessSet,
    interpretation_factories: HashMap<AnyPartialSymbol, Arc<dyn AnyInterpretationFactory>>,
    refiner_factories: HashMap<AnyPartialSymbol, Arc<dyn AnyRefinerFactory>>,
    storage_refiners: HashMap<SymbolId, Arc<dyn StorageRefinerFactory>>,
    initializers: Vec<Arc<dyn ModelInitializer>>,
    objective: Option<SumObjective>,
    store: Arc<ModelStore>,
}

impl ReasoningAdapter {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        required_interpretations: ConcretenessSet,
        interpretation_factories: HashMap<AnyPartialSymbol, Arc<dyn AnyInterpretationFactory>>,
        refiner_factories: HashMap<AnyPartialSymbol, Arc<dyn AnyRefinerFactory>>,
        storage_refiners: HashMap<SymbolId, Arc<dyn StorageRefinerFactory>>,
        initializers: Vec<Arc<dyn ModelInitializer>>,
        objective: Option<SumObjective>,
        store: Arc<ModelStore>,
    ) -> Self {
        ReasoningAdapter {
            required_interpretations,
            interpretation_factories,
            refiner_factories,
            storage_refiners,
            initializers,
            objective,
            store,
        }
    }

    pub fn required_interpretations(&self) -> &ConcretenessSet {
        &self.required_interpretations
    }

    /// The finalized store the adapter is bound to.
    pub fn store(&self) -> &Arc<ModelStore> {
        &self.store
    }

    /// The summed objective, where any objectives were registered.
    pub fn objective(&self) -> Option<&SumObjective> {
        self.objective.as_ref()
    }

    /// The initialization steps to run once per fresh model instance, in registration order.
    pub fn initializers(&self) -> &[Arc<dyn ModelInitializer>] {
        &self.initializers
    }

    /// The interpretation factory of a partial symbol.
    pub fn interpretation_factory(
        &self,
        symbol: &AnyPartialSymbol,
    ) -> Result<&Arc<dyn AnyInterpretationFactory>, AdapterError> {
        match self.interpretation_factories.get(symbol) {
            Some(factory) => Ok(factory),
            None => Err(AdapterError::UnknownPartialSymbol(symbol.to_string())),
        }
    }

    /// The interpretation-refiner factory of a partial symbol, where one was configured.
    pub fn refiner_factory(
        &self,
        symbol: &AnyPartialSymbol,
    ) -> Result<&Arc<dyn AnyRefinerFactory>, AdapterError> {
        match self.refiner_factories.get(symbol) {
            Some(factory) => Ok(factory),
            None => Err(AdapterError::NoRefiner(symbol.to_string())),
        }
    }

    /// The storage-refiner factory of a stored symbol, if any.
    ///
    /// Arity-0 symbols without an explicitly configured refiner have none.
    pub fn storage_refiner_factory(
        &self,
        symbol: SymbolId,
    ) -> Option<&Arc<dyn StorageRefinerFactory>> {
        self.storage_refiners.get(&symbol)
    }
}

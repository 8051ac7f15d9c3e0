/*!
A reasoning instance: one model bound to the shared adapter.

The instance owns the per-model state the adapter's factories create --- the model itself and one storage refiner per refined symbol --- and is the object a search driver works through:

- [create_node](ReasoningInstance::create_node) and [remove_node](ReasoningInstance::remove_node) change the population, maintain the reserved node-count symbol, and run every storage refiner synchronously before returning.
  A refiner failure propagates out of the operation which triggered it.
- [interpretation](ReasoningInstance::interpretation) and [refiner](ReasoningInstance::refiner) construct the typed read and write paths of a partial symbol.
- [objective_value](ReasoningInstance::objective_value) scores the current state with the summed objective.

Initializers run once, in registration order, when the instance is created --- before any query is evaluated against the model.
*/

use std::sync::Arc;

use crate::{
    adapter::{node_count_symbol, ReasoningAdapter},
    db::{model::Model, SymbolId},
    interpretation::{InterpretationRefiner, PartialInterpretation},
    misc::log::targets::{self},
    refinement::StorageRefiner,
    structures::{
        concreteness::Concreteness,
        symbol::PartialSymbol,
        tuple::{NodeId, Tuple},
        value::AbstractValue,
    },
    types::err::{AdapterError, ErrorKind, ModelError},
};

/// One model instance with its refiners, created from a shared [ReasoningAdapter].
pub struct ReasoningInstance {
    adapter: Arc<ReasoningAdapter>,
    model: Model,
    refiners: Vec<Box<dyn StorageRefiner>>,
    node_count: SymbolId,
}

impl ReasoningInstance {
    /// A fresh model over the adapter's store, with refiners instantiated and initializers applied.
    pub fn new(adapter: Arc<ReasoningAdapter>) -> Result<Self, ErrorKind> {
        let store = adapter.store().clone();
        let mut model = Model::new(store.clone());

        let node_count = match store.symbol_id(node_count_symbol().info()) {
            Some(id) => id,
            None => {
                return Err(ErrorKind::Model(ModelError::UnknownSymbol(
                    node_count_symbol().info().to_string(),
                )))
            }
        };

        let mut refiners = Vec::new();
        for (id, _) in store.symbols() {
            if let Some(factory) = adapter.storage_refiner_factory(id) {
                refiners.push(factory.create(id, &store));
            }
        }

        for initializer in adapter.initializers() {
            initializer.initialize(&mut model)?;
        }

        log::trace!(target: targets::ADAPTER, "Instance created: {} refiners", refiners.len());

        Ok(ReasoningInstance {
            adapter,
            model,
            refiners,
            node_count,
        })
    }

    pub fn adapter(&self) -> &Arc<ReasoningAdapter> {
        &self.adapter
    }

    pub fn model(&self) -> &Model {
        &self.model
    }

    pub fn model_mut(&mut self) -> &mut Model {
        &mut self.model
    }

    /// The population of the model, read from the reserved node-count symbol.
    pub fn node_count(&self) -> i64 {
        match self.model.storage::<i64>(self.node_count) {
            Ok(storage) => *storage.get(&Tuple::empty()),
            Err(_) => 0,
        }
    }

    /// Creates a node: bumps the node count, then runs every storage refiner.
    ///
    /// The creation is not complete until every refiner has run.
    pub fn create_node(&mut self) -> Result<NodeId, ErrorKind> {
        let node = self.model.fresh_node();
        self.shift_node_count(1)?;
        for refiner in self.refiners.iter_mut() {
            refiner.node_created(&mut self.model, node)?;
        }
        log::trace!(target: targets::ADAPTER, "Node created: {node}");
        Ok(node)
    }

    /// Removes a node: runs every storage refiner, then drops the node from the count.
    ///
    /// The removal is not complete until every refiner has run, and a refiner failure propagates.
    pub fn remove_node(&mut self, node: NodeId) -> Result<(), ErrorKind> {
        for refiner in self.refiners.iter_mut() {
            refiner.node_removed(&mut self.model, node)?;
        }
        self.shift_node_count(-1)?;
        log::trace!(target: targets::ADAPTER, "Node removed: {node}");
        Ok(())
    }

    fn shift_node_count(&mut self, delta: i64) -> Result<(), ModelError> {
        let storage = self.model.storage_mut::<i64>(self.node_count)?;
        let count = *storage.get(&Tuple::empty());
        storage.set(Tuple::empty(), count + delta);
        Ok(())
    }

    /// The typed read path of a partial symbol at the given concreteness.
    ///
    /// Fails for a concreteness outside the required interpretations: no machinery was built for it.
    pub fn interpretation<A, C>(
        &self,
        symbol: &PartialSymbol<A, C>,
        concreteness: Concreteness,
    ) -> Result<Box<dyn PartialInterpretation<A, C>>, AdapterError>
    where
        A: AbstractValue<C> + 'static,
        C: 'static,
    {
        if !self
            .adapter
            .required_interpretations()
            .contains(concreteness)
        {
            return Err(AdapterError::NotRequired(concreteness));
        }

        let factory = self.adapter.interpretation_factory(&symbol.erased())?;
        let erased = factory.create_erased(&self.model, concreteness)?;
        match erased.downcast::<Box<dyn PartialInterpretation<A, C>>>() {
            Ok(interpretation) => Ok(*interpretation),
            Err(_) => Err(AdapterError::TypeMismatch(symbol.name().to_string())),
        }
    }

    /// The typed write path of a partial symbol.
    pub fn refiner<A, C>(
        &self,
        symbol: &PartialSymbol<A, C>,
    ) -> Result<Box<dyn InterpretationRefiner<A, C>>, AdapterError>
    where
        A: AbstractValue<C> + 'static,
        C: 'static,
    {
        let factory = self.adapter.refiner_factory(&symbol.erased())?;
        let erased = factory.create_erased(&self.model)?;
        match erased.downcast::<Box<dyn InterpretationRefiner<A, C>>>() {
            Ok(refiner) => Ok(*refiner),
            Err(_) => Err(AdapterError::TypeMismatch(symbol.name().to_string())),
        }
    }

    /// The current state scored by the summed objective, where objectives were registered.
    pub fn objective_value(&self) -> Option<f64> {
        self.adapter
            .objective()
            .map(|objective| objective.value(&self.model))
    }
}

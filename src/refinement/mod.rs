/*!
Storage refinement --- keeping stored tuples consistent as the node population changes.

A [StorageRefiner] is a per-model stateful updater for one stored symbol, invoked synchronously as part of every node creation or removal; the population change is not complete until every refiner has run, and a refiner failure propagates out of the operation which triggered it.

The [DefaultStorageRefiner] is the conservative policy synthesized at build time for every arity ≥ 1 symbol without an explicit refiner:
- On creation every stored tuple is preserved unchanged, and the new node starts with no tuples of its own.
  Population changes never invent facts.
- On removal every tuple mentioning the removed node in any coordinate is dropped, so removed nodes leave no dangling references.

Arity-0 symbols are exempt by construction --- a tuple which references no nodes cannot be affected by a population change --- and only an explicitly configured refiner may touch them.

A [ModelInitializer] is the other per-model hook: an initialization step applied once to each freshly created model instance, in registration order, before any query is evaluated against it.
*/

use std::sync::Arc;

use crate::{
    db::{model::Model, store::ModelStore, SymbolId},
    misc::log::targets::{self},
    structures::tuple::NodeId,
    types::err::RefinementError,
};

/// A per-model updater keeping one symbol's tuples consistent under population changes.
pub trait StorageRefiner {
    fn node_created(&mut self, model: &mut Model, node: NodeId) -> Result<(), RefinementError>;

    fn node_removed(&mut self, model: &mut Model, node: NodeId) -> Result<(), RefinementError>;
}

/// Creates [StorageRefiner]s bound to one running model.
///
/// At most one factory is registered per stored symbol; symbols without one receive the default at build time.
pub trait StorageRefinerFactory: Send + Sync {
    fn create(&self, symbol: SymbolId, store: &ModelStore) -> Box<dyn StorageRefiner>;
}

/// The conservative default policy: preserve on creation, drop mentions on removal.
pub struct DefaultStorageRefiner {
    symbol: SymbolId,
}

impl DefaultStorageRefiner {
    /// The shared factory installed for every arity ≥ 1 symbol lacking an explicit refiner.
    pub fn factory() -> Arc<dyn StorageRefinerFactory> {
        Arc::new(DefaultStorageRefinerFactory {})
    }
}

impl StorageRefiner for DefaultStorageRefiner {
    fn node_created(&mut self, _model: &mut Model, _node: NodeId) -> Result<(), RefinementError> {
        // A fresh node holds no tuples, and existing tuples are unaffected.
        Ok(())
    }

    fn node_removed(&mut self, model: &mut Model, node: NodeId) -> Result<(), RefinementError> {
        let storage = model.erased_storage_mut(self.symbol)?;
        let before = storage.tuple_count();
        storage.retain_tuples(&mut |tuple| !tuple.mentions(node));
        let dropped = before - storage.tuple_count();
        if dropped > 0 {
            log::trace!(
                target: targets::REFINEMENT,
                "Node {node} removed: {dropped} tuples dropped from symbol {}",
                self.symbol,
            );
        }
        Ok(())
    }
}

struct DefaultStorageRefinerFactory {}

impl StorageRefinerFactory for DefaultStorageRefinerFactory {
    fn create(&self, symbol: SymbolId, _store: &ModelStore) -> Box<dyn StorageRefiner> {
        Box::new(DefaultStorageRefiner { symbol })
    }
}

/// An initialization step applied once per freshly created model instance.
pub trait ModelInitializer: Send + Sync {
    fn initialize(&self, model: &mut Model) -> Result<(), RefinementError>;
}

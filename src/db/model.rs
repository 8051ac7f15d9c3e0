/*!
A model instance: per-symbol tuple storage and a node population.

Models are created from a finalized [ModelStore] and are never shared across search branches --- each explored branch owns its own instance (see the notes on sharing in the [adapter](crate::adapter)).
*/

use std::sync::Arc;

use crate::{
    db::{
        keys::SymbolId,
        storage::{Storage, SymbolStorage},
        store::ModelStore,
    },
    structures::tuple::NodeId,
    types::err::ModelError,
};

/// One mutable model instance over a finalized store.
pub struct Model {
    store: Arc<ModelStore>,
    storages: Vec<Box<dyn SymbolStorage>>,
    next_node: NodeId,
}

impl Model {
    pub fn new(store: Arc<ModelStore>) -> Self {
        let storages = store.create_storages();
        Model {
            store,
            storages,
            next_node: 0,
        }
    }

    pub fn store(&self) -> &Arc<ModelStore> {
        &self.store
    }

    /// Hands out the next node identifier.
    ///
    /// Population bookkeeping (the node-count symbol, storage refinement) belongs to the
    /// [reasoning instance](crate::adapter::instance::ReasoningInstance) which owns the model.
    pub fn fresh_node(&mut self) -> NodeId {
        let node = self.next_node;
        self.next_node += 1;
        node
    }

    /// The erased storage of a symbol.
    pub fn erased_storage(&self, id: SymbolId) -> Result<&dyn SymbolStorage, ModelError> {
        match self.storages.get(id as usize) {
            Some(storage) => Ok(storage.as_ref()),
            None => Err(ModelError::UnknownSymbol(id.to_string())),
        }
    }

    /// The erased storage of a symbol, mutably.
    pub fn erased_storage_mut(
        &mut self,
        id: SymbolId,
    ) -> Result<&mut (dyn SymbolStorage + 'static), ModelError> {
        match self.storages.get_mut(id as usize) {
            Some(storage) => Ok(storage.as_mut()),
            None => Err(ModelError::UnknownSymbol(id.to_string())),
        }
    }

    /// The typed storage of a symbol.
    pub fn storage<T: Clone + PartialEq + Send + 'static>(
        &self,
        id: SymbolId,
    ) -> Result<&Storage<T>, ModelError> {
        let storage = self.erased_storage(id)?;
        match storage.as_any().downcast_ref::<Storage<T>>() {
            Some(typed) => Ok(typed),
            None => Err(ModelError::TypeMismatch(self.symbol_name(id))),
        }
    }

    /// The typed storage of a symbol, mutably.
    pub fn storage_mut<T: Clone + PartialEq + Send + 'static>(
        &mut self,
        id: SymbolId,
    ) -> Result<&mut Storage<T>, ModelError> {
        let name = self.symbol_name(id);
        let storage = self.erased_storage_mut(id)?;
        match storage.as_any_mut().downcast_mut::<Storage<T>>() {
            Some(typed) => Ok(typed),
            None => Err(ModelError::TypeMismatch(name)),
        }
    }

    fn symbol_name(&self, id: SymbolId) -> String {
        match self.store.symbol_info(id) {
            Some(info) => info.to_string(),
            None => id.to_string(),
        }
    }
}

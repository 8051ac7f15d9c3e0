/*!
The store builder and the finalized store.

[ModelStoreBuilder] is the configuration-time face of the storage engine: stored symbols are declared against it, bookkeeping-only symbols are excluded from structural state coding, and the query-rewriting hook is installed on it.
[finalize](ModelStoreBuilder::finalize) freezes the declarations into a [ModelStore] --- the immutable symbol universe every [Model](crate::db::model::Model) instance is created from.

The query-rewriting hook stays on the builder: query compilation is a configuration-time activity, and the finalized store carries no query machinery.
*/

use std::collections::{HashMap, HashSet};
use std::rc::Rc;
use std::sync::Arc;

use crate::{
    db::{
        keys::SymbolId,
        storage::{Storage, SymbolStorage},
    },
    lifting::QueryRewriter,
    misc::log::targets::{self},
    structures::symbol::{Symbol, SymbolInfo},
};

type StorageCtor = Box<dyn Fn() -> Box<dyn SymbolStorage> + Send + Sync>;

/// Collects stored symbol declarations during configuration.
#[derive(Default)]
pub struct ModelStoreBuilder {
    symbols: Vec<(SymbolInfo, StorageCtor)>,
    index: HashMap<SymbolInfo, SymbolId>,
    excluded: HashSet<SymbolInfo>,
    rewriter: Option<Rc<dyn QueryRewriter>>,
}

impl ModelStoreBuilder {
    /// Declares a stored symbol, returning its key.
    /// Declaring the same symbol again returns the existing key.
    pub fn symbol<T: Clone + PartialEq + Send + Sync + 'static>(&mut self, symbol: &Symbol<T>) -> SymbolId {
        if let Some(id) = self.index.get(symbol.info()) {
            return *id;
        }

        let id = self.symbols.len() as SymbolId;
        let arity = symbol.arity();
        let default = symbol.default_value().clone();
        let ctor: StorageCtor = Box::new(move || Box::new(Storage::new(arity, default.clone())));

        log::debug!(target: targets::MODEL, "Symbol declared: {} as {id}", symbol.info());

        self.index.insert(symbol.info().clone(), id);
        self.symbols.push((symbol.info().clone(), ctor));
        id
    }

    /// Excludes a symbol from structural state coding, so it does not affect equivalence of explored states.
    pub fn exclude_from_state_coding(&mut self, info: &SymbolInfo) {
        self.excluded.insert(info.clone());
    }

    /// Installs the query-rewriting hook invoked whenever a query referencing a partial symbol is compiled.
    pub fn query_rewriter(&mut self, rewriter: Rc<dyn QueryRewriter>) {
        self.rewriter = Some(rewriter);
    }

    /// The installed query-rewriting hook, if any.
    pub fn installed_query_rewriter(&self) -> Option<&Rc<dyn QueryRewriter>> {
        self.rewriter.as_ref()
    }

    /// Freezes the declared symbols into an immutable store.
    pub fn finalize(self) -> Arc<ModelStore> {
        let excluded = self
            .symbols
            .iter()
            .enumerate()
            .filter(|(_, (info, _))| self.excluded.contains(info))
            .map(|(id, _)| id as SymbolId)
            .collect();

        Arc::new(ModelStore {
            symbols: self.symbols,
            index: self.index,
            excluded,
        })
    }
}

/// The finalized universe of stored symbols.
pub struct ModelStore {
    symbols: Vec<(SymbolInfo, StorageCtor)>,
    index: HashMap<SymbolInfo, SymbolId>,
    excluded: HashSet<SymbolId>,
}

impl ModelStore {
    pub fn symbol_count(&self) -> usize {
        self.symbols.len()
    }

    /// Every stored symbol with its key, in declaration order.
    pub fn symbols(&self) -> impl Iterator<Item = (SymbolId, &SymbolInfo)> {
        self.symbols
            .iter()
            .enumerate()
            .map(|(id, (info, _))| (id as SymbolId, info))
    }

    pub fn symbol_id(&self, info: &SymbolInfo) -> Option<SymbolId> {
        self.index.get(info).copied()
    }

    pub fn symbol_info(&self, id: SymbolId) -> Option<&SymbolInfo> {
        self.symbols.get(id as usize).map(|(info, _)| info)
    }

    /// Whether the symbol is excluded from structural state coding.
    pub fn is_excluded_from_state_coding(&self, id: SymbolId) -> bool {
        self.excluded.contains(&id)
    }

    /// The symbols which participate in structural state coding.
    pub fn state_coded_symbols(&self) -> impl Iterator<Item = SymbolId> + '_ {
        (0..self.symbols.len() as SymbolId).filter(|id| !self.excluded.contains(id))
    }

    /// Fresh storage for every symbol, in declaration order.
    pub(crate) fn create_storages(&self) -> Vec<Box<dyn SymbolStorage>> {
        self.symbols.iter().map(|(_, ctor)| ctor()).collect()
    }
}

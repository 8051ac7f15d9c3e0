/*!
The reasoning builder --- the configuration-time orchestrator.

A builder collects [translators](crate::translator), explicit [storage refiners](crate::refinement), [initializers](crate::refinement::ModelInitializer), and [objectives](crate::objectives) while the enclosing model configuration is assembled, then freezes everything into an immutable [ReasoningAdapter].

The lifecycle is a one-way street:

```text
Open --- registrations --- configure --- build ---> Closed
```

`Open` is the only mutable state.
Every registration fails once configuration has happened, duplicate registrations fail immediately, and [build](ReasoningBuilder::build) runs at most once.

Configuration is single-threaded by design: no internal locking is offered, and callers serialize registration.
The adapter produced by a build is the shareable artifact.

# Example

```rust
use std::rc::Rc;

use marten_pm::builder::ReasoningBuilder;
use marten_pm::config::Config;
use marten_pm::db::store::ModelStoreBuilder;
use marten_pm::adapter::ReasoningInstance;
use marten_pm::interpretation::storage::StorageInterpretationFactory;
use marten_pm::structures::symbol::PartialRelation;
use marten_pm::translator::{RelationTranslator, SymbolTranslator};

let friend = PartialRelation::new("friend", 2);
let translator = RelationTranslator::new(friend.clone(), StorageInterpretationFactory::new(&friend));

let mut builder = ReasoningBuilder::from_config(Config::default());
builder.partial_symbol(Rc::new(SymbolTranslator::Relation(translator))).unwrap();

let adapter = builder.build_with(ModelStoreBuilder::default()).unwrap();
let mut instance = ReasoningInstance::new(adapter).unwrap();

let _a = instance.create_node().unwrap();
let _b = instance.create_node().unwrap();
assert_eq!(instance.node_count(), 2);
```
*/

use std::collections::{HashMap, HashSet};
use std::rc::Rc;
use std::sync::Arc;

use crate::{
    adapter::{node_count_symbol, ReasoningAdapter},
    config::Config,
    db::{
        store::{ModelStore, ModelStoreBuilder},
        SymbolId,
    },
    interpretation::{AnyInterpretationFactory, AnyRefinerFactory},
    lifting::{DnfLifter, QueryRewriter},
    misc::log::targets::{self},
    objectives::{Objective, SumObjective},
    refinement::{DefaultStorageRefiner, ModelInitializer, StorageRefinerFactory},
    structures::{
        concreteness::{Concreteness, ConcretenessSet},
        dnf::Dnf,
        modality::Modality,
        symbol::{AnyPartialSymbol, Symbol, SymbolInfo},
    },
    translator::SymbolTranslator,
    types::err::{BuildError, ErrorKind, LiftError},
};

#[derive(Debug, PartialEq, Eq)]
enum BuildState {
    Open,
    Configured,
    Closed,
}

/// Collects reasoning configuration and builds the immutable [ReasoningAdapter].
pub struct ReasoningBuilder {
    config: Config,
    lifter: Rc<DnfLifter>,
    translators: Vec<Rc<SymbolTranslator>>,
    translator_index: HashMap<AnyPartialSymbol, usize>,
    interpretation_factories: HashMap<AnyPartialSymbol, Arc<dyn AnyInterpretationFactory>>,
    refiner_factories: HashMap<AnyPartialSymbol, Arc<dyn AnyRefinerFactory>>,
    storage_refiners: Vec<(SymbolInfo, Arc<dyn StorageRefinerFactory>)>,
    storage_refiner_index: HashSet<SymbolInfo>,
    initializers: Vec<Arc<dyn ModelInitializer>>,
    objectives: Vec<Arc<dyn Objective>>,
    state: BuildState,
}

impl ReasoningBuilder {
    pub fn from_config(config: Config) -> Self {
        ReasoningBuilder {
            config,
            lifter: Rc::new(DnfLifter::new()),
            translators: Vec::new(),
            translator_index: HashMap::new(),
            interpretation_factories: HashMap::new(),
            refiner_factories: HashMap::new(),
            storage_refiners: Vec::new(),
            storage_refiner_index: HashSet::new(),
            initializers: Vec::new(),
            objectives: Vec::new(),
            state: BuildState::Open,
        }
    }

    fn check_open(&self) -> Result<(), BuildError> {
        match self.state {
            BuildState::Open => Ok(()),
            BuildState::Configured | BuildState::Closed => Err(BuildError::Closed),
        }
    }

    /// Replaces the default requirement of every concreteness level.
    ///
    /// Takes effect at configuration, so must happen before translators are configured.
    pub fn required_interpretations(
        &mut self,
        required: ConcretenessSet,
    ) -> Result<&mut Self, BuildError> {
        self.check_open()?;
        self.config.required_interpretations = required;
        Ok(self)
    }

    /// Registers a translator for a partial symbol.
    ///
    /// Registering the same translator instance again is a no-op, while a distinct translator for an already translated symbol is a duplicate-configuration error.
    pub fn partial_symbol(
        &mut self,
        translator: Rc<SymbolTranslator>,
    ) -> Result<&mut Self, BuildError> {
        self.check_open()?;
        let symbol = translator.symbol().clone();

        if let Some(index) = self.translator_index.get(&symbol) {
            if Rc::ptr_eq(&self.translators[*index], &translator) {
                return Ok(self);
            }
            return Err(BuildError::DuplicateTranslator(symbol.to_string()));
        }

        // Make the symbol known to the lifter right away, so on-demand lifting
        // works throughout the configuration phase.
        match translator.as_ref() {
            SymbolTranslator::Relation(_) => self
                .lifter
                .add_relation(symbol.clone(), translator.relation_rewriter().cloned()),
            SymbolTranslator::Function(_) => self
                .lifter
                .add_function(symbol.clone(), translator.function_rewriter().cloned()),
            SymbolTranslator::Base(_) => {}
        }

        log::info!(target: targets::BUILDER, "Translator registered: {symbol}");

        self.translator_index.insert(symbol, self.translators.len());
        self.translators.push(translator);
        Ok(self)
    }

    /// Registers an explicit storage refiner for a concretely stored symbol.
    pub fn storage_refiner<T: Clone + PartialEq + Send + 'static>(
        &mut self,
        symbol: &Symbol<T>,
        factory: Arc<dyn StorageRefinerFactory>,
    ) -> Result<&mut Self, BuildError> {
        self.check_open()?;
        if !self.storage_refiner_index.insert(symbol.info().clone()) {
            return Err(BuildError::DuplicateStorageRefiner(
                symbol.info().to_string(),
            ));
        }
        self.storage_refiners.push((symbol.info().clone(), factory));
        Ok(self)
    }

    /// Appends a model-initialization step.
    pub fn initializer(
        &mut self,
        initializer: Arc<dyn ModelInitializer>,
    ) -> Result<&mut Self, BuildError> {
        self.check_open()?;
        self.initializers.push(initializer);
        Ok(self)
    }

    /// Appends a scoring objective.
    pub fn objective(&mut self, objective: Arc<dyn Objective>) -> Result<&mut Self, BuildError> {
        self.check_open()?;
        self.objectives.push(objective);
        Ok(self)
    }

    /// On-demand specialization of an already-built definition.
    ///
    /// Usable whether or not the definition is registered through a translator rewrite.
    pub fn lift(
        &self,
        modality: Modality,
        concreteness: Concreteness,
        dnf: &Rc<Dnf>,
    ) -> Result<Rc<Dnf>, LiftError> {
        self.lifter.lift(modality, concreteness, dnf)
    }

    /// Wires the collected configuration into the store builder.
    ///
    /// Declares the reserved node-count symbol (excluded from state coding), configures every
    /// translator's interpretation factory restricted to the required concreteness levels, and
    /// installs the query-rewriting hook.
    pub fn configure(&mut self, store_builder: &mut ModelStoreBuilder) -> Result<(), ErrorKind> {
        self.check_open()?;

        let bookkeeping = node_count_symbol();
        store_builder.symbol(&bookkeeping);
        store_builder.exclude_from_state_coding(bookkeeping.info());

        let mut interpretations = HashMap::new();
        let mut refiners = HashMap::new();
        for translator in &self.translators {
            let symbol = translator.symbol().clone();
            let factory = translator.interpretation_factory().clone();
            factory.configure(store_builder, &self.config.required_interpretations);
            interpretations.insert(symbol.clone(), factory);
            if let Some(refiner) = translator.refiner_factory() {
                refiners.insert(symbol, refiner.clone());
            }
        }
        self.interpretation_factories = interpretations;
        self.refiner_factories = refiners;

        let hook: Rc<dyn QueryRewriter> = self.lifter.clone();
        store_builder.query_rewriter(hook);

        log::info!(
            target: targets::BUILDER,
            "Configured: {} translators, {} explicit storage refiners",
            self.translators.len(),
            self.storage_refiners.len(),
        );

        self.state = BuildState::Configured;
        Ok(())
    }

    /// Builds the immutable adapter against the finalized store.
    ///
    /// Reconciles explicit storage refiners with the finalized symbol universe: every arity ≥ 1
    /// symbol without an explicit refiner receives the default, arity-0 symbols are skipped, and
    /// explicit refiners left unconsumed fail the build with every offending symbol named.
    pub fn build(&mut self, store: Arc<ModelStore>) -> Result<Arc<ReasoningAdapter>, ErrorKind> {
        match self.state {
            BuildState::Configured => {}
            BuildState::Open | BuildState::Closed => return Err(ErrorKind::Build(BuildError::Closed)),
        }
        // Closed from here on, whether or not reconciliation succeeds.
        self.state = BuildState::Closed;

        let storage_refiners = self.reconcile_storage_refiners(&store)?;

        let objective = SumObjective::sum(std::mem::take(&mut self.objectives));

        Ok(Arc::new(ReasoningAdapter::new(
            self.config.required_interpretations,
            std::mem::take(&mut self.interpretation_factories),
            std::mem::take(&mut self.refiner_factories),
            storage_refiners,
            std::mem::take(&mut self.initializers),
            objective,
            store,
        )))
    }

    /// Configures against the given store builder, finalizes it, and builds the adapter.
    pub fn build_with(
        &mut self,
        mut store_builder: ModelStoreBuilder,
    ) -> Result<Arc<ReasoningAdapter>, ErrorKind> {
        self.configure(&mut store_builder)?;
        let store = store_builder.finalize();
        self.build(store)
    }

    fn reconcile_storage_refiners(
        &mut self,
        store: &ModelStore,
    ) -> Result<HashMap<SymbolId, Arc<dyn StorageRefinerFactory>>, BuildError> {
        let mut registered: HashMap<SymbolInfo, Arc<dyn StorageRefinerFactory>> =
            self.storage_refiners.drain(..).collect();

        let mut reconciled = HashMap::new();
        for (id, info) in store.symbols() {
            match registered.remove(info) {
                Some(factory) => {
                    reconciled.insert(id, factory);
                }

                None => {
                    if info.arity() == 0 {
                        // Unaffected by population changes: no tuple references a node.
                        continue;
                    }
                    reconciled.insert(id, DefaultStorageRefiner::factory());
                }
            }
        }

        if !registered.is_empty() {
            let mut unused: Vec<String> = registered.keys().map(ToString::to_string).collect();
            unused.sort();
            log::error!(target: targets::BUILDER, "Unused storage refiners: {unused:?}");
            return Err(BuildError::UnusedStorageRefiners(unused));
        }

        Ok(reconciled)
    }
}

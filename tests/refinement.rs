use std::rc::Rc;
use std::sync::Arc;

use marten_pm::{
    adapter::ReasoningInstance,
    builder::ReasoningBuilder,
    config::Config,
    db::{model::Model, store::ModelStore, store::ModelStoreBuilder, SymbolId},
    interpretation::{
        storage::{StorageInterpretationFactory, StorageInterpretationRefinerFactory},
        InterpretationRefiner, PartialInterpretation,
    },
    refinement::{ModelInitializer, StorageRefiner, StorageRefinerFactory},
    structures::{
        concreteness::Concreteness,
        symbol::{PartialRelation, Symbol, SymbolInfo},
        truth::TruthValue,
        tuple::{NodeId, Tuple},
    },
    translator::{RelationTranslator, SymbolTranslator},
    types::err::{ModelError, RefinementError},
};

fn friend_instance() -> (PartialRelation, ReasoningInstance, SymbolId) {
    let friend = PartialRelation::new("friend", 2);
    let translator = Rc::new(SymbolTranslator::Relation(
        RelationTranslator::new(friend.clone(), StorageInterpretationFactory::new(&friend))
            .refiner(StorageInterpretationRefinerFactory::new(&friend)),
    ));

    let mut builder = ReasoningBuilder::from_config(Config::default());
    builder.partial_symbol(translator).unwrap();
    let adapter = builder.build_with(ModelStoreBuilder::default()).unwrap();

    let id = adapter
        .store()
        .symbol_id(&SymbolInfo::new("friend", 2))
        .unwrap();
    let instance = ReasoningInstance::new(adapter).unwrap();
    (friend, instance, id)
}

mod default_refiner {
    use super::*;

    #[test]
    fn creation_preserves_removal_drops_mentions() {
        let (_friend, mut instance, id) = friend_instance();

        let a = instance.create_node().unwrap();
        let b = instance.create_node().unwrap();
        let c = instance.create_node().unwrap();

        let storage = instance.model_mut().storage_mut::<TruthValue>(id).unwrap();
        storage.set(Tuple::from([a, b]), TruthValue::True);
        storage.set(Tuple::from([b, c]), TruthValue::True);

        let _d = instance.create_node().unwrap();
        assert_eq!(
            instance.model().erased_storage(id).unwrap().tuple_count(),
            2,
        );

        instance.remove_node(b).unwrap();
        assert_eq!(
            instance.model().erased_storage(id).unwrap().tuple_count(),
            0,
        );

        assert_eq!(instance.node_count(), 3);
    }
}

mod custom_refiners {
    use super::*;

    /// Preserves every tuple, whatever happens to the population.
    struct KeepAllFactory;

    impl StorageRefinerFactory for KeepAllFactory {
        fn create(&self, _symbol: SymbolId, _store: &ModelStore) -> Box<dyn StorageRefiner> {
            Box::new(KeepAll)
        }
    }

    struct KeepAll;

    impl StorageRefiner for KeepAll {
        fn node_created(&mut self, _model: &mut Model, _node: NodeId) -> Result<(), RefinementError> {
            Ok(())
        }

        fn node_removed(&mut self, _model: &mut Model, _node: NodeId) -> Result<(), RefinementError> {
            Ok(())
        }
    }

    #[test]
    fn explicit_refiner_replaces_default() {
        let friend = PartialRelation::new("friend", 2);
        let backing = Symbol::<TruthValue>::new("friend", 2, TruthValue::Unknown);
        let translator = Rc::new(SymbolTranslator::Relation(RelationTranslator::new(
            friend.clone(),
            StorageInterpretationFactory::new(&friend),
        )));

        let mut builder = ReasoningBuilder::from_config(Config::default());
        builder.partial_symbol(translator).unwrap();
        builder
            .storage_refiner(&backing, Arc::new(KeepAllFactory))
            .unwrap();
        let adapter = builder.build_with(ModelStoreBuilder::default()).unwrap();

        let id = adapter
            .store()
            .symbol_id(&SymbolInfo::new("friend", 2))
            .unwrap();
        let mut instance = ReasoningInstance::new(adapter).unwrap();

        let a = instance.create_node().unwrap();
        let b = instance.create_node().unwrap();
        let storage = instance.model_mut().storage_mut::<TruthValue>(id).unwrap();
        storage.set(Tuple::from([a, b]), TruthValue::True);

        // The default would drop the tuple; the explicit policy keeps it.
        instance.remove_node(b).unwrap();
        assert_eq!(
            instance.model().erased_storage(id).unwrap().tuple_count(),
            1,
        );
    }

    /// Tallies creations into an arity-0 symbol.
    struct TallyFactory;

    impl StorageRefinerFactory for TallyFactory {
        fn create(&self, symbol: SymbolId, _store: &ModelStore) -> Box<dyn StorageRefiner> {
            Box::new(Tally { symbol })
        }
    }

    struct Tally {
        symbol: SymbolId,
    }

    impl StorageRefiner for Tally {
        fn node_created(&mut self, model: &mut Model, _node: NodeId) -> Result<(), RefinementError> {
            let storage = model.storage_mut::<i64>(self.symbol)?;
            let count = *storage.get(&Tuple::empty());
            storage.set(Tuple::empty(), count + 1);
            Ok(())
        }

        fn node_removed(&mut self, _model: &mut Model, _node: NodeId) -> Result<(), RefinementError> {
            Ok(())
        }
    }

    #[test]
    fn arity_zero_touched_only_by_explicit_refiner() {
        let tally = Symbol::<i64>::new("created_total", 0, 0);

        let mut builder = ReasoningBuilder::from_config(Config::default());
        builder.storage_refiner(&tally, Arc::new(TallyFactory)).unwrap();

        let mut store_builder = ModelStoreBuilder::default();
        store_builder.symbol(&tally);
        let adapter = builder.build_with(store_builder).unwrap();

        let id = adapter.store().symbol_id(tally.info()).unwrap();
        let mut instance = ReasoningInstance::new(adapter).unwrap();

        instance.create_node().unwrap();
        instance.create_node().unwrap();
        instance.create_node().unwrap();

        let total = *instance
            .model()
            .storage::<i64>(id)
            .unwrap()
            .get(&Tuple::empty());
        assert_eq!(total, 3);
    }
}

mod initializers {
    use super::*;

    /// Appends a digit to an arity-0 trace value, so ordering is observable.
    struct Digit {
        symbol: SymbolInfo,
        value: i64,
    }

    impl ModelInitializer for Digit {
        fn initialize(&self, model: &mut Model) -> Result<(), RefinementError> {
            let id = match model.store().symbol_id(&self.symbol) {
                Some(id) => id,
                None => {
                    return Err(RefinementError::Model(ModelError::UnknownSymbol(
                        self.symbol.to_string(),
                    )))
                }
            };
            let storage = model.storage_mut::<i64>(id)?;
            let trace = *storage.get(&Tuple::empty());
            storage.set(Tuple::empty(), trace * 10 + self.value);
            Ok(())
        }
    }

    #[test]
    fn applied_once_in_registration_order() {
        let trace = Symbol::<i64>::new("trace", 0, 0);

        let mut builder = ReasoningBuilder::from_config(Config::default());
        builder
            .initializer(Arc::new(Digit {
                symbol: trace.info().clone(),
                value: 1,
            }))
            .unwrap();
        builder
            .initializer(Arc::new(Digit {
                symbol: trace.info().clone(),
                value: 2,
            }))
            .unwrap();

        let mut store_builder = ModelStoreBuilder::default();
        store_builder.symbol(&trace);
        let adapter = builder.build_with(store_builder).unwrap();

        let id = adapter.store().symbol_id(trace.info()).unwrap();
        let instance = ReasoningInstance::new(adapter).unwrap();

        let value = *instance
            .model()
            .storage::<i64>(id)
            .unwrap()
            .get(&Tuple::empty());
        assert_eq!(value, 12);
    }
}

mod interpretation_refinement {
    use super::*;

    #[test]
    fn merge_narrows_and_flags_inconsistency() {
        let (friend, mut instance, id) = friend_instance();

        let a = instance.create_node().unwrap();
        let b = instance.create_node().unwrap();
        let tuple = Tuple::from([a, b]);

        let refiner = instance.refiner(&friend).unwrap();

        let consistent = refiner
            .merge(instance.model_mut(), &tuple, TruthValue::True)
            .unwrap();
        assert!(consistent);

        let reading = instance
            .interpretation(&friend, Concreteness::Partial)
            .unwrap();
        assert_eq!(reading.get(instance.model(), &tuple), TruthValue::True);
        assert!(reading.get(instance.model(), &tuple).must());

        // Narrowing the other way lands on the error element.
        let consistent = refiner
            .merge(instance.model_mut(), &tuple, TruthValue::False)
            .unwrap();
        assert!(!consistent);
        assert_eq!(
            *instance
                .model()
                .storage::<TruthValue>(id)
                .unwrap()
                .get(&tuple),
            TruthValue::Error,
        );
    }
}

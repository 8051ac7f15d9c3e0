use std::rc::Rc;
use std::sync::{Arc, Mutex};

use marten_pm::{
    builder::ReasoningBuilder,
    config::Config,
    db::{model::Model, store::ModelStoreBuilder},
    interpretation::{
        storage::StorageInterpretationFactory, InterpretationFactory, PartialInterpretation,
    },
    structures::{
        concreteness::{Concreteness, ConcretenessSet},
        symbol::{PartialRelation, SymbolInfo},
        truth::TruthValue,
        tuple::Tuple,
    },
    translator::{RelationTranslator, SymbolTranslator},
    types::err::{AdapterError, BuildError, ErrorKind},
};

fn relation_translator(relation: &PartialRelation) -> Rc<SymbolTranslator> {
    Rc::new(SymbolTranslator::Relation(RelationTranslator::new(
        relation.clone(),
        StorageInterpretationFactory::new(relation),
    )))
}

mod registration {
    use super::*;

    #[test]
    fn duplicate_translator_rejected() {
        let friend = PartialRelation::new("friend", 2);
        let mut builder = ReasoningBuilder::from_config(Config::default());

        assert!(builder.partial_symbol(relation_translator(&friend)).is_ok());

        let result = builder.partial_symbol(relation_translator(&friend));
        assert!(matches!(
            result,
            Err(BuildError::DuplicateTranslator(ref symbol)) if symbol == "friend/2"
        ));
    }

    #[test]
    fn same_translator_twice_is_noop() {
        let friend = PartialRelation::new("friend", 2);
        let translator = relation_translator(&friend);
        let mut builder = ReasoningBuilder::from_config(Config::default());

        assert!(builder.partial_symbol(translator.clone()).is_ok());
        assert!(builder.partial_symbol(translator).is_ok());

        assert!(builder.build_with(ModelStoreBuilder::default()).is_ok());
    }

    #[test]
    fn duplicate_storage_refiner_rejected() {
        let age = marten_pm::structures::symbol::Symbol::<bool>::new("age", 1, false);
        let mut builder = ReasoningBuilder::from_config(Config::default());

        assert!(builder
            .storage_refiner(&age, Arc::new(doubles::InertRefinerFactory))
            .is_ok());

        let result = builder.storage_refiner(&age, Arc::new(doubles::InertRefinerFactory));
        assert!(matches!(
            result,
            Err(BuildError::DuplicateStorageRefiner(ref symbol)) if symbol == "age/1"
        ));
    }
}

mod reconciliation {
    use super::*;

    #[test]
    fn unused_storage_refiners_enumerated() {
        let ghost_a = marten_pm::structures::symbol::Symbol::<bool>::new("ghost_a", 1, false);
        let ghost_b = marten_pm::structures::symbol::Symbol::<bool>::new("ghost_b", 2, false);

        let mut builder = ReasoningBuilder::from_config(Config::default());
        builder
            .storage_refiner(&ghost_a, Arc::new(doubles::InertRefinerFactory))
            .unwrap();
        builder
            .storage_refiner(&ghost_b, Arc::new(doubles::InertRefinerFactory))
            .unwrap();

        let result = builder.build_with(ModelStoreBuilder::default());
        match result {
            Err(ErrorKind::Build(BuildError::UnusedStorageRefiners(unused))) => {
                assert_eq!(unused, vec!["ghost_a/1".to_string(), "ghost_b/2".to_string()]);
            }
            _ => panic!("Expected unused storage refiners"),
        }
    }

    #[test]
    fn default_refiner_completeness() {
        let friend = PartialRelation::new("friend", 2);
        let flag = marten_pm::structures::symbol::Symbol::<bool>::new("flag", 0, false);

        let mut builder = ReasoningBuilder::from_config(Config::default());
        builder.partial_symbol(relation_translator(&friend)).unwrap();

        let mut store_builder = ModelStoreBuilder::default();
        store_builder.symbol(&flag);

        let adapter = builder.build_with(store_builder).unwrap();
        let store = adapter.store();

        let friend_id = store.symbol_id(&SymbolInfo::new("friend", 2)).unwrap();
        assert!(adapter.storage_refiner_factory(friend_id).is_some());

        let flag_id = store.symbol_id(&SymbolInfo::new("flag", 0)).unwrap();
        assert!(adapter.storage_refiner_factory(flag_id).is_none());

        let count_id = store
            .symbol_id(marten_pm::adapter::node_count_symbol().info())
            .unwrap();
        assert!(adapter.storage_refiner_factory(count_id).is_none());
    }

    #[test]
    fn node_count_registered_and_excluded() {
        let mut builder = ReasoningBuilder::from_config(Config::default());
        let mut store_builder = ModelStoreBuilder::default();

        builder.configure(&mut store_builder).unwrap();
        assert!(store_builder.installed_query_rewriter().is_some());

        let store = store_builder.finalize();
        let count_id = store
            .symbol_id(marten_pm::adapter::node_count_symbol().info())
            .unwrap();
        assert!(store.is_excluded_from_state_coding(count_id));
        assert!(store.state_coded_symbols().all(|id| id != count_id));

        assert!(builder.build(store).is_ok());
    }
}

mod lifecycle {
    use super::*;

    #[test]
    fn post_close_mutation_fails() {
        let friend = PartialRelation::new("friend", 2);
        let mut builder = ReasoningBuilder::from_config(Config::default());
        builder.partial_symbol(relation_translator(&friend)).unwrap();
        builder.build_with(ModelStoreBuilder::default()).unwrap();

        let other = PartialRelation::new("other", 1);
        assert!(matches!(
            builder.partial_symbol(relation_translator(&other)),
            Err(BuildError::Closed)
        ));
        assert!(matches!(
            builder.objective(Arc::new(doubles::Fixed(1.0))),
            Err(BuildError::Closed)
        ));
        assert!(matches!(
            builder.required_interpretations(ConcretenessSet::all()),
            Err(BuildError::Closed)
        ));
    }

    #[test]
    fn build_runs_once() {
        let mut builder = ReasoningBuilder::from_config(Config::default());
        builder.build_with(ModelStoreBuilder::default()).unwrap();

        assert!(matches!(
            builder.build_with(ModelStoreBuilder::default()),
            Err(ErrorKind::Build(BuildError::Closed))
        ));
    }
}

mod required_interpretations {
    use super::*;

    #[test]
    fn unneeded_levels_skipped() {
        let friend = PartialRelation::new("friend", 2);
        let configured = Arc::new(Mutex::new(Vec::new()));
        let factory = doubles::CountingFactory {
            configured: configured.clone(),
        };
        let translator = Rc::new(SymbolTranslator::Relation(RelationTranslator::new(
            friend.clone(),
            factory,
        )));

        let mut builder = ReasoningBuilder::from_config(Config::default());
        builder
            .required_interpretations(ConcretenessSet::of(&[Concreteness::Candidate]))
            .unwrap();
        builder.partial_symbol(translator).unwrap();

        let adapter = builder.build_with(ModelStoreBuilder::default()).unwrap();

        assert_eq!(*configured.lock().unwrap(), vec![Concreteness::Candidate]);

        let instance = marten_pm::adapter::ReasoningInstance::new(adapter).unwrap();
        assert!(instance
            .interpretation(&friend, Concreteness::Candidate)
            .is_ok());
        assert_eq!(
            instance
                .interpretation(&friend, Concreteness::Partial)
                .err(),
            Some(AdapterError::NotRequired(Concreteness::Partial)),
        );
    }
}

mod doubles {
    use super::*;

    use marten_pm::{
        db::{store::ModelStore, SymbolId},
        refinement::{StorageRefiner, StorageRefinerFactory},
        structures::tuple::NodeId,
        types::err::RefinementError,
    };

    pub struct InertRefinerFactory;

    impl StorageRefinerFactory for InertRefinerFactory {
        fn create(&self, _symbol: SymbolId, _store: &ModelStore) -> Box<dyn StorageRefiner> {
            Box::new(InertRefiner)
        }
    }

    struct InertRefiner;

    impl StorageRefiner for InertRefiner {
        fn node_created(&mut self, _model: &mut Model, _node: NodeId) -> Result<(), RefinementError> {
            Ok(())
        }

        fn node_removed(&mut self, _model: &mut Model, _node: NodeId) -> Result<(), RefinementError> {
            Ok(())
        }
    }

    pub struct Fixed(pub f64);

    impl marten_pm::objectives::Objective for Fixed {
        fn value(&self, _model: &Model) -> f64 {
            self.0
        }
    }

    /// Records the concreteness levels its configuration was restricted to.
    pub struct CountingFactory {
        pub configured: Arc<Mutex<Vec<Concreteness>>>,
    }

    impl InterpretationFactory<TruthValue, bool> for CountingFactory {
        fn configure(&self, _store: &mut ModelStoreBuilder, required: &ConcretenessSet) {
            let mut configured = self.configured.lock().unwrap();
            for level in required.iter() {
                configured.push(level);
            }
        }

        fn create(
            &self,
            _model: &Model,
            _concreteness: Concreteness,
        ) -> Result<Box<dyn PartialInterpretation<TruthValue, bool>>, AdapterError> {
            Ok(Box::new(InertInterpretation))
        }
    }

    struct InertInterpretation;

    impl PartialInterpretation<TruthValue, bool> for InertInterpretation {
        fn get(&self, _model: &Model, _tuple: &Tuple) -> TruthValue {
            TruthValue::Unknown
        }
    }
}

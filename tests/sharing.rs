use std::rc::Rc;

use marten_pm::{
    adapter::{ReasoningAdapter, ReasoningInstance},
    builder::ReasoningBuilder,
    config::Config,
    db::store::ModelStoreBuilder,
    interpretation::{
        storage::{StorageInterpretationFactory, StorageInterpretationRefinerFactory},
        InterpretationRefiner, PartialInterpretation,
    },
    structures::{
        concreteness::Concreteness,
        symbol::PartialRelation,
        truth::TruthValue,
        tuple::Tuple,
    },
    translator::{RelationTranslator, SymbolTranslator},
};

fn is_shareable<T: Send + Sync>(_: &T) {}

#[test]
fn adapter_is_shared_across_search_branches() {
    let friend = PartialRelation::new("friend", 2);
    let translator = Rc::new(SymbolTranslator::Relation(
        RelationTranslator::new(friend.clone(), StorageInterpretationFactory::new(&friend))
            .refiner(StorageInterpretationRefinerFactory::new(&friend)),
    ));

    let mut builder = ReasoningBuilder::from_config(Config::default());
    builder.partial_symbol(translator).unwrap();
    let adapter = builder.build_with(ModelStoreBuilder::default()).unwrap();

    is_shareable::<ReasoningAdapter>(&adapter);

    // Each branch owns its own model instance; only the adapter is shared.
    crossbeam::thread::scope(|scope| {
        for branch in 0..4_u32 {
            let adapter = adapter.clone();
            let friend = &friend;
            scope.spawn(move |_| {
                let mut instance = ReasoningInstance::new(adapter).unwrap();

                let mut nodes = Vec::new();
                for _ in 0..=branch {
                    nodes.push(instance.create_node().unwrap());
                }
                let first = nodes[0];

                let tuple = Tuple::from([first, first]);
                let refiner = instance.refiner(friend).unwrap();
                assert!(refiner
                    .merge(instance.model_mut(), &tuple, TruthValue::True)
                    .unwrap());

                let reading = instance
                    .interpretation(friend, Concreteness::Partial)
                    .unwrap();
                assert_eq!(reading.get(instance.model(), &tuple), TruthValue::True);

                instance.remove_node(first).unwrap();
                assert_eq!(instance.node_count(), i64::from(branch));
                assert_eq!(
                    reading.get(instance.model(), &tuple),
                    TruthValue::Unknown,
                );
            });
        }
    })
    .unwrap();
}

#[test]
fn instances_of_one_adapter_are_independent() {
    let friend = PartialRelation::new("friend", 2);
    let translator = Rc::new(SymbolTranslator::Relation(RelationTranslator::new(
        friend.clone(),
        StorageInterpretationFactory::new(&friend),
    )));

    let mut builder = ReasoningBuilder::from_config(Config::default());
    builder.partial_symbol(translator).unwrap();
    let adapter = builder.build_with(ModelStoreBuilder::default()).unwrap();

    let mut left = ReasoningInstance::new(adapter.clone()).unwrap();
    let mut right = ReasoningInstance::new(adapter).unwrap();

    left.create_node().unwrap();
    left.create_node().unwrap();
    right.create_node().unwrap();

    assert_eq!(left.node_count(), 2);
    assert_eq!(right.node_count(), 1);
}

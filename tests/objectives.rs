use std::sync::Arc;

use marten_pm::{
    adapter::{node_count_symbol, ReasoningInstance},
    builder::ReasoningBuilder,
    config::Config,
    db::{model::Model, store::ModelStoreBuilder},
    objectives::Objective,
    structures::tuple::Tuple,
};

struct Fixed(f64);

impl Objective for Fixed {
    fn value(&self, _model: &Model) -> f64 {
        self.0
    }
}

/// Scores a state by its population.
struct Population;

impl Objective for Population {
    fn value(&self, model: &Model) -> f64 {
        match model.store().symbol_id(node_count_symbol().info()) {
            Some(id) => match model.storage::<i64>(id) {
                Ok(storage) => *storage.get(&Tuple::empty()) as f64,
                Err(_) => 0.0,
            },
            None => 0.0,
        }
    }
}

#[test]
fn registered_objectives_sum() {
    let mut builder = ReasoningBuilder::from_config(Config::default());
    builder.objective(Arc::new(Fixed(2.0))).unwrap();
    builder.objective(Arc::new(Fixed(3.5))).unwrap();

    let adapter = builder.build_with(ModelStoreBuilder::default()).unwrap();

    let aggregate = adapter.objective().unwrap();
    assert_eq!(aggregate.terms(), 2);

    let instance = ReasoningInstance::new(adapter.clone()).unwrap();
    assert_eq!(instance.objective_value(), Some(5.5));
}

#[test]
fn zero_objectives_install_nothing() {
    let mut builder = ReasoningBuilder::from_config(Config::default());
    let adapter = builder.build_with(ModelStoreBuilder::default()).unwrap();

    assert!(adapter.objective().is_none());

    let instance = ReasoningInstance::new(adapter).unwrap();
    assert_eq!(instance.objective_value(), None);
}

#[test]
fn objectives_read_the_scored_state() {
    let mut builder = ReasoningBuilder::from_config(Config::default());
    builder.objective(Arc::new(Population)).unwrap();
    builder.objective(Arc::new(Fixed(0.5))).unwrap();

    let adapter = builder.build_with(ModelStoreBuilder::default()).unwrap();
    let mut instance = ReasoningInstance::new(adapter).unwrap();

    assert_eq!(instance.objective_value(), Some(0.5));

    instance.create_node().unwrap();
    instance.create_node().unwrap();
    instance.create_node().unwrap();

    assert_eq!(instance.objective_value(), Some(3.5));
}

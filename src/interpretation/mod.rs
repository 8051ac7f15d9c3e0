/*!
Partial interpretations --- per-symbol read and write strategies.

For every partial symbol a [factory](InterpretationFactory) answers two questions:
how to *read* the symbol's current value for a tuple under a given concreteness, and (through a [refiner](InterpretationRefiner)) how to *write* a refinement --- narrowing the value's lattice position --- into the underlying storage.

Factories are configured once at build time, restricted to the required concreteness levels, and afterwards shared immutably; the interpretations and refiners they create are per-model-instance.

Registries hold factories behind the erased [AnyInterpretationFactory]/[AnyRefinerFactory] faces, since symbols of distinct value types share one map.
Typed access goes through a downcast at the use site, where the [partial symbol](crate::structures::symbol::PartialSymbol) carries the types.

The [storage]-backed implementations are the canonical instances: they read and narrow abstract values held directly in symbol storage.
*/

pub mod storage;

use std::any::Any;
use std::marker::PhantomData;
use std::sync::Arc;

use crate::{
    db::{model::Model, store::ModelStoreBuilder},
    structures::{
        concreteness::{Concreteness, ConcretenessSet},
        tuple::Tuple,
        value::AbstractValue,
    },
    types::err::{AdapterError, RefinementError},
};

/// The read path of one symbol in one model: the current abstract value of a tuple.
pub trait PartialInterpretation<A: AbstractValue<C>, C> {
    fn get(&self, model: &Model, tuple: &Tuple) -> A;
}

/// Creates [PartialInterpretation]s of one symbol, and configures whatever storage they read.
pub trait InterpretationFactory<A: AbstractValue<C>, C>: Send + Sync {
    /// Configuration-time setup, restricted to the required concreteness levels.
    /// Machinery for levels outside the set is never built.
    fn configure(&self, store: &mut ModelStoreBuilder, required: &ConcretenessSet);

    /// A read path into the given model at the given concreteness.
    fn create(
        &self,
        model: &Model,
        concreteness: Concreteness,
    ) -> Result<Box<dyn PartialInterpretation<A, C>>, AdapterError>;
}

/// The write path of one symbol in one model: narrow a tuple's value by meeting it with new information.
pub trait InterpretationRefiner<A: AbstractValue<C>, C> {
    /// Meets the stored value with `value`.
    ///
    /// Returns `false` when the result is the error element, i.e. the refinement is inconsistent with what is already decided.
    fn merge(&self, model: &mut Model, tuple: &Tuple, value: A) -> Result<bool, RefinementError>;
}

/// Creates [InterpretationRefiner]s of one symbol.
pub trait RefinerFactory<A: AbstractValue<C>, C>: Send + Sync {
    fn create(&self, model: &Model) -> Result<Box<dyn InterpretationRefiner<A, C>>, AdapterError>;
}

/// The erased face of an [InterpretationFactory], as held in registries.
pub trait AnyInterpretationFactory: Send + Sync {
    fn configure(&self, store: &mut ModelStoreBuilder, required: &ConcretenessSet);

    /// Creates an interpretation, boxed as [Any] over `Box<dyn PartialInterpretation<A, C>>`.
    fn create_erased(
        &self,
        model: &Model,
        concreteness: Concreteness,
    ) -> Result<Box<dyn Any>, AdapterError>;
}

/// The erased face of a [RefinerFactory], as held in registries.
pub trait AnyRefinerFactory: Send + Sync {
    /// Creates a refiner, boxed as [Any] over `Box<dyn InterpretationRefiner<A, C>>`.
    fn create_erased(&self, model: &Model) -> Result<Box<dyn Any>, AdapterError>;
}

struct ErasedInterpretationFactory<A, C, F> {
    factory: F,
    _value: PhantomData<fn() -> (A, C)>,
}

impl<A, C, F> AnyInterpretationFactory for ErasedInterpretationFactory<A, C, F>
where
    A: AbstractValue<C> + 'static,
    C: 'static,
    F: InterpretationFactory<A, C> + 'static,
{
    fn configure(&self, store: &mut ModelStoreBuilder, required: &ConcretenessSet) {
        self.factory.configure(store, required)
    }

    fn create_erased(
        &self,
        model: &Model,
        concreteness: Concreteness,
    ) -> Result<Box<dyn Any>, AdapterError> {
        let interpretation = self.factory.create(model, concreteness)?;
        Ok(Box::new(interpretation))
    }
}

/// Erases a typed interpretation factory for registry storage.
pub fn erase_interpretation_factory<A, C, F>(factory: F) -> Arc<dyn AnyInterpretationFactory>
where
    A: AbstractValue<C> + 'static,
    C: 'static,
    F: InterpretationFactory<A, C> + 'static,
{
    Arc::new(ErasedInterpretationFactory {
        factory,
        _value: PhantomData::<fn() -> (A, C)>,
    })
}

struct ErasedRefinerFactory<A, C, F> {
    factory: F,
    _value: PhantomData<fn() -> (A, C)>,
}

impl<A, C, F> AnyRefinerFactory for ErasedRefinerFactory<A, C, F>
where
    A: AbstractValue<C> + 'static,
    C: 'static,
    F: RefinerFactory<A, C> + 'static,
{
    fn create_erased(&self, model: &Model) -> Result<Box<dyn Any>, AdapterError> {
        let refiner = self.factory.create(model)?;
        Ok(Box::new(refiner))
    }
}

/// Erases a typed refiner factory for registry storage.
pub fn erase_refiner_factory<A, C, F>(factory: F) -> Arc<dyn AnyRefinerFactory>
where
    A: AbstractValue<C> + 'static,
    C: 'static,
    F: RefinerFactory<A, C> + 'static,
{
    Arc::new(ErasedRefinerFactory {
        factory,
        _value: PhantomData::<fn() -> (A, C)>,
    })
}

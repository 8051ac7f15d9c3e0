/*!
Storage-backed interpretations.

The canonical read and write paths: a symbol's abstract values are held directly in [symbol storage](crate::db::storage), the interpretation reads them, and the refiner narrows them by meet.
Tuples absent from storage hold the backing symbol's default value --- [unknown](AbstractValue::unknown) unless overridden.
*/

use crate::{
    db::{model::Model, store::ModelStoreBuilder, SymbolId},
    interpretation::{
        InterpretationFactory, InterpretationRefiner, PartialInterpretation, RefinerFactory,
    },
    misc::log::targets::{self},
    structures::{
        concreteness::{Concreteness, ConcretenessSet},
        symbol::{PartialSymbol, Symbol},
        tuple::Tuple,
        value::AbstractValue,
    },
    types::err::{AdapterError, ModelError, RefinementError},
};

use std::marker::PhantomData;

/// Reads a symbol's abstract values straight from its storage.
pub struct StorageInterpretation<A> {
    symbol: SymbolId,
    _value: PhantomData<fn() -> A>,
}

impl<A, C> PartialInterpretation<A, C> for StorageInterpretation<A>
where
    A: AbstractValue<C> + Send + 'static,
{
    fn get(&self, model: &Model, tuple: &Tuple) -> A {
        match model.storage::<A>(self.symbol) {
            Ok(storage) => storage.get(tuple).clone(),
            Err(e) => {
                log::error!(target: targets::MODEL, "Interpretation read failed: {e:?}");
                A::unknown()
            }
        }
    }
}

/// Creates [StorageInterpretation]s, declaring the backing symbol at configuration.
pub struct StorageInterpretationFactory<A, C> {
    symbol: Symbol<A>,
    _value: PhantomData<fn() -> C>,
}

impl<A, C> StorageInterpretationFactory<A, C>
where
    A: AbstractValue<C> + Send + 'static,
{
    /// A factory backed by a stored symbol of the same name and arity, defaulting to [unknown](AbstractValue::unknown).
    pub fn new(partial: &PartialSymbol<A, C>) -> Self {
        StorageInterpretationFactory {
            symbol: Symbol::new(partial.name(), partial.arity(), A::unknown()),
            _value: PhantomData,
        }
    }

    /// Replaces the default value tuples hold when absent from storage.
    pub fn with_default(mut self, default: A) -> Self {
        self.symbol = Symbol::new(self.symbol.name(), self.symbol.arity(), default);
        self
    }

    /// The backing stored symbol.
    pub fn symbol(&self) -> &Symbol<A> {
        &self.symbol
    }

    fn resolve(&self, model: &Model) -> Result<SymbolId, AdapterError> {
        match model.store().symbol_id(self.symbol.info()) {
            Some(id) => Ok(id),
            None => Err(AdapterError::Model(ModelError::UnknownSymbol(
                self.symbol.info().to_string(),
            ))),
        }
    }
}

impl<A, C> InterpretationFactory<A, C> for StorageInterpretationFactory<A, C>
where
    A: AbstractValue<C> + Send + Sync + 'static,
    C: 'static,
{
    fn configure(&self, store: &mut ModelStoreBuilder, required: &ConcretenessSet) {
        store.symbol(&self.symbol);
        for level in required.iter() {
            log::trace!(
                target: targets::ADAPTER,
                "Interpretation prepared: {} at {level}",
                self.symbol.info(),
            );
        }
    }

    fn create(
        &self,
        model: &Model,
        _concreteness: Concreteness,
    ) -> Result<Box<dyn PartialInterpretation<A, C>>, AdapterError> {
        let symbol = self.resolve(model)?;
        Ok(Box::new(StorageInterpretation {
            symbol,
            _value: PhantomData,
        }))
    }
}

/// Narrows a symbol's stored abstract values by meet.
pub struct StorageInterpretationRefiner<A> {
    symbol: SymbolId,
    name: String,
    _value: PhantomData<fn() -> A>,
}

impl<A, C> InterpretationRefiner<A, C> for StorageInterpretationRefiner<A>
where
    A: AbstractValue<C> + Send + 'static,
{
    fn merge(&self, model: &mut Model, tuple: &Tuple, value: A) -> Result<bool, RefinementError> {
        let storage = model.storage_mut::<A>(self.symbol)?;
        let old = storage.get(tuple).clone();
        let new = old.meet(&value);
        if new != old {
            log::trace!(
                target: targets::REFINEMENT,
                "Refined {}{tuple}: {old:?} to {new:?}",
                self.name,
            );
            storage.set(tuple.clone(), new.clone());
        }
        Ok(!new.is_error())
    }
}

/// Creates [StorageInterpretationRefiner]s for one symbol.
pub struct StorageInterpretationRefinerFactory<A, C> {
    symbol: Symbol<A>,
    _value: PhantomData<fn() -> C>,
}

impl<A, C> StorageInterpretationRefinerFactory<A, C>
where
    A: AbstractValue<C> + Send + 'static,
{
    /// A refiner factory over the same backing symbol as [StorageInterpretationFactory::new].
    pub fn new(partial: &PartialSymbol<A, C>) -> Self {
        StorageInterpretationRefinerFactory {
            symbol: Symbol::new(partial.name(), partial.arity(), A::unknown()),
            _value: PhantomData,
        }
    }

    /// Replaces the default value; must agree with the interpretation factory's default.
    pub fn with_default(mut self, default: A) -> Self {
        self.symbol = Symbol::new(self.symbol.name(), self.symbol.arity(), default);
        self
    }
}

impl<A, C> RefinerFactory<A, C> for StorageInterpretationRefinerFactory<A, C>
where
    A: AbstractValue<C> + Send + Sync + 'static,
    C: 'static,
{
    fn create(&self, model: &Model) -> Result<Box<dyn InterpretationRefiner<A, C>>, AdapterError> {
        let symbol = match model.store().symbol_id(self.symbol.info()) {
            Some(id) => id,
            None => {
                return Err(AdapterError::Model(ModelError::UnknownSymbol(
                    self.symbol.info().to_string(),
                )))
            }
        };
        Ok(Box::new(StorageInterpretationRefiner {
            symbol,
            name: self.symbol.name().to_string(),
            _value: PhantomData,
        }))
    }
}

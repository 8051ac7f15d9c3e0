/*!
Symbol translators --- the configuration bundle tying one partial symbol to its strategies.

A translator names a partial symbol and carries its [interpretation factory](crate::interpretation::InterpretationFactory), optionally an [interpretation-refiner factory](crate::interpretation::RefinerFactory), and --- for relations and functions referenced from queries --- a custom rewriting rule consumed by the [lifter](crate::lifting).

The translator kinds form a closed set, so [SymbolTranslator] is a tagged union matched exhaustively at the one point the [builder](crate::builder) branches on kind, rather than a trait hierarchy.

At most one translator may be registered per partial symbol.
Translators are shared by [Rc], and registering the same `Rc` twice is a no-op, while a second, distinct translator for the same symbol is a configuration error.
*/

use std::rc::Rc;
use std::sync::Arc;

use crate::{
    interpretation::{
        erase_interpretation_factory, erase_refiner_factory, AnyInterpretationFactory,
        AnyRefinerFactory, InterpretationFactory, RefinerFactory,
    },
    lifting::{FunctionRewriter, RelationRewriter},
    structures::{
        symbol::{AnyPartialSymbol, PartialRelation, PartialSymbol},
        truth::TruthValue,
        value::AbstractValue,
    },
};

/// A translator for a partial relation, optionally rewriting calls on it.
pub struct RelationTranslator {
    symbol: AnyPartialSymbol,
    interpretation: Arc<dyn AnyInterpretationFactory>,
    refiner: Option<Arc<dyn AnyRefinerFactory>>,
    rewriter: Option<Rc<dyn RelationRewriter>>,
}

impl RelationTranslator {
    pub fn new(
        symbol: PartialRelation,
        interpretation: impl InterpretationFactory<TruthValue, bool> + 'static,
    ) -> Self {
        RelationTranslator {
            symbol: symbol.erased(),
            interpretation: erase_interpretation_factory(interpretation),
            refiner: None,
            rewriter: None,
        }
    }

    pub fn refiner(mut self, refiner: impl RefinerFactory<TruthValue, bool> + 'static) -> Self {
        self.refiner = Some(erase_refiner_factory(refiner));
        self
    }

    pub fn rewriter(mut self, rewriter: Rc<dyn RelationRewriter>) -> Self {
        self.rewriter = Some(rewriter);
        self
    }
}

/// A translator for a partial function, optionally rewriting applications of it.
pub struct FunctionTranslator {
    symbol: AnyPartialSymbol,
    interpretation: Arc<dyn AnyInterpretationFactory>,
    refiner: Option<Arc<dyn AnyRefinerFactory>>,
    rewriter: Option<Rc<dyn FunctionRewriter>>,
}

impl FunctionTranslator {
    pub fn new<A, C>(
        symbol: PartialSymbol<A, C>,
        interpretation: impl InterpretationFactory<A, C> + 'static,
    ) -> Self
    where
        A: AbstractValue<C> + 'static,
        C: 'static,
    {
        FunctionTranslator {
            symbol: symbol.erased(),
            interpretation: erase_interpretation_factory(interpretation),
            refiner: None,
            rewriter: None,
        }
    }

    pub fn refiner<A, C>(mut self, refiner: impl RefinerFactory<A, C> + 'static) -> Self
    where
        A: AbstractValue<C> + 'static,
        C: 'static,
    {
        self.refiner = Some(erase_refiner_factory(refiner));
        self
    }

    pub fn rewriter(mut self, rewriter: Rc<dyn FunctionRewriter>) -> Self {
        self.rewriter = Some(rewriter);
        self
    }
}

/// A translator for a partial symbol never referenced from queries, so contributing no rewrite rule.
pub struct BaseTranslator {
    symbol: AnyPartialSymbol,
    interpretation: Arc<dyn AnyInterpretationFactory>,
    refiner: Option<Arc<dyn AnyRefinerFactory>>,
}

impl BaseTranslator {
    pub fn new<A, C>(
        symbol: PartialSymbol<A, C>,
        interpretation: impl InterpretationFactory<A, C> + 'static,
    ) -> Self
    where
        A: AbstractValue<C> + 'static,
        C: 'static,
    {
        BaseTranslator {
            symbol: symbol.erased(),
            interpretation: erase_interpretation_factory(interpretation),
            refiner: None,
        }
    }

    pub fn refiner<A, C>(mut self, refiner: impl RefinerFactory<A, C> + 'static) -> Self
    where
        A: AbstractValue<C> + 'static,
        C: 'static,
    {
        self.refiner = Some(erase_refiner_factory(refiner));
        self
    }
}

/// The closed set of translator kinds.
pub enum SymbolTranslator {
    Relation(RelationTranslator),
    Function(FunctionTranslator),
    Base(BaseTranslator),
}

impl SymbolTranslator {
    /// The erased identity of the translated symbol.
    pub fn symbol(&self) -> &AnyPartialSymbol {
        match self {
            Self::Relation(translator) => &translator.symbol,
            Self::Function(translator) => &translator.symbol,
            Self::Base(translator) => &translator.symbol,
        }
    }

    pub(crate) fn interpretation_factory(&self) -> &Arc<dyn AnyInterpretationFactory> {
        match self {
            Self::Relation(translator) => &translator.interpretation,
            Self::Function(translator) => &translator.interpretation,
            Self::Base(translator) => &translator.interpretation,
        }
    }

    pub(crate) fn refiner_factory(&self) -> Option<&Arc<dyn AnyRefinerFactory>> {
        match self {
            Self::Relation(translator) => translator.refiner.as_ref(),
            Self::Function(translator) => translator.refiner.as_ref(),
            Self::Base(translator) => translator.refiner.as_ref(),
        }
    }

    pub(crate) fn relation_rewriter(&self) -> Option<&Rc<dyn RelationRewriter>> {
        match self {
            Self::Relation(translator) => translator.rewriter.as_ref(),
            Self::Function(_) | Self::Base(_) => None,
        }
    }

    pub(crate) fn function_rewriter(&self) -> Option<&Rc<dyn FunctionRewriter>> {
        match self {
            Self::Function(translator) => translator.rewriter.as_ref(),
            Self::Relation(_) | Self::Base(_) => None,
        }
    }
}

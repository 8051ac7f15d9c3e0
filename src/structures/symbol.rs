/*!
Symbols --- the relation/function identities reasoning is defined over.

Two kinds of symbol appear in the library:
- A [PartialSymbol] names a relation or function whose interpretation is partial, i.e. approximated rather than fully decided.
  It is typed by the pair of an abstract value lattice and the concrete value it refines toward.
- A [Symbol] names concretely stored tuples in the model store, typed by the stored value.

Identity of either kind is the `(name, arity)` pair, and [AnyPartialSymbol] is the erased identity used as a registry key.
Symbols are immutable once created.
*/

use std::marker::PhantomData;
use std::sync::Arc;

use crate::structures::{truth::TruthValue, value::AbstractValue};

/// The erased identity of a partial symbol: its name and arity.
///
/// Used to key translator and factory registries, where symbols of distinct value types mix.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct AnyPartialSymbol {
    name: Arc<str>,
    arity: u32,
}

impl AnyPartialSymbol {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn arity(&self) -> u32 {
        self.arity
    }
}

impl std::fmt::Display for AnyPartialSymbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.name, self.arity)
    }
}

/// A relation or function whose interpretation is partial.
///
/// `A` is the abstract value lattice and `C` the concrete value a decided fact carries.
pub struct PartialSymbol<A, C> {
    name: Arc<str>,
    arity: u32,
    _value: PhantomData<fn() -> (A, C)>,
}

/// A partial relation: a partial symbol over the [truth lattice](TruthValue).
pub type PartialRelation = PartialSymbol<TruthValue, bool>;

impl<A: AbstractValue<C>, C> PartialSymbol<A, C> {
    pub fn new(name: &str, arity: u32) -> Self {
        PartialSymbol {
            name: Arc::from(name),
            arity,
            _value: PhantomData,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn arity(&self) -> u32 {
        self.arity
    }

    /// The erased identity of the symbol.
    pub fn erased(&self) -> AnyPartialSymbol {
        AnyPartialSymbol {
            name: self.name.clone(),
            arity: self.arity,
        }
    }
}

impl<A, C> Clone for PartialSymbol<A, C> {
    fn clone(&self) -> Self {
        PartialSymbol {
            name: self.name.clone(),
            arity: self.arity,
            _value: PhantomData,
        }
    }
}

impl<A, C> std::fmt::Debug for PartialSymbol<A, C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.name, self.arity)
    }
}

/// The identity of a concretely stored symbol: its name and arity.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SymbolInfo {
    name: Arc<str>,
    arity: u32,
}

impl SymbolInfo {
    pub fn new(name: &str, arity: u32) -> Self {
        SymbolInfo {
            name: Arc::from(name),
            arity,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn arity(&self) -> u32 {
        self.arity
    }
}

impl std::fmt::Display for SymbolInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.name, self.arity)
    }
}

/// A concretely stored symbol, typed by the stored value.
///
/// Tuples absent from storage hold the symbol's default value.
pub struct Symbol<T> {
    info: SymbolInfo,
    default: T,
}

impl<T: Clone> Symbol<T> {
    pub fn new(name: &str, arity: u32, default: T) -> Self {
        Symbol {
            info: SymbolInfo::new(name, arity),
            default,
        }
    }

    pub fn info(&self) -> &SymbolInfo {
        &self.info
    }

    pub fn name(&self) -> &str {
        self.info.name()
    }

    pub fn arity(&self) -> u32 {
        self.info.arity()
    }

    pub fn default_value(&self) -> &T {
        &self.default
    }
}

impl<T: Clone> Clone for Symbol<T> {
    fn clone(&self) -> Self {
        Symbol {
            info: self.info.clone(),
            default: self.default.clone(),
        }
    }
}

impl<T> std::fmt::Debug for Symbol<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.info)
    }
}

//! Tuples of nodes, the coordinates stored for a symbol.

/// A node (aka. an object, or model element) of a model.
///
/// Each node is a `u32`, handed out in sequence by the model instance which owns the population.
pub type NodeId = u32;

/// An ordered tuple of nodes, the key under which a symbol stores a value.
///
/// An arity-0 symbol stores its single value under the [empty](Tuple::empty) tuple.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Tuple(Vec<NodeId>);

impl Tuple {
    pub fn new(nodes: Vec<NodeId>) -> Self {
        Tuple(nodes)
    }

    /// The tuple of no nodes, keying arity-0 symbols.
    pub fn empty() -> Self {
        Tuple(Vec::new())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether the tuple mentions the node in any coordinate.
    pub fn mentions(&self, node: NodeId) -> bool {
        self.0.contains(&node)
    }

    pub fn nodes(&self) -> &[NodeId] {
        &self.0
    }
}

impl<const N: usize> From<[NodeId; N]> for Tuple {
    fn from(nodes: [NodeId; N]) -> Self {
        Tuple(nodes.to_vec())
    }
}

impl std::fmt::Display for Tuple {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "(")?;
        for (index, node) in self.0.iter().enumerate() {
            if index > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{node}")?;
        }
        write!(f, ")")
    }
}

/// The key of a stored symbol within a finalized [ModelStore](crate::db::store::ModelStore).
///
/// Symbols are stored in a vector, and the key is the index, assigned in declaration order.
pub type SymbolId = u32;

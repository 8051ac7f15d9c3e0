/*!
The model storage boundary.

The reasoning core builds on a generic tuple store through a narrow interface, given here as concrete minimal types:

- [ModelStoreBuilder](store::ModelStoreBuilder) collects stored symbol declarations, state-coding exclusions, and the query-rewriting hook during configuration.
- [ModelStore](store::ModelStore) is the finalized, immutable symbol universe.
- [Model](model::Model) is one mutable instance: per-symbol tuple [storage](storage) and a node population.

Nothing here implements incremental query evaluation, snapshotting, or transactions --- those belong to the engines the core collaborates with.
*/

mod keys;
pub use keys::SymbolId;

pub mod model;
pub mod storage;
pub mod store;

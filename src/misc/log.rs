/*!
Miscelanous items related to [logging](log).

Calls to the log macro are made throughout the library.
These are intended to provide useful information for extending the library and/or fixing issues.

Note, no log implementation is provided.
For more details, see [log].
*/

/// Targets to be used within a [log]! macro.
pub mod targets {
    /// Logs related to the [reasoning builder](crate::builder)
    pub const BUILDER: &str = "builder";

    /// Logs related to [query lifting](crate::lifting)
    pub const LIFTING: &str = "lifting";

    /// Logs related to [storage refinement](crate::refinement)
    pub const REFINEMENT: &str = "refinement";

    /// Logs related to the [reasoning adapter](crate::adapter)
    pub const ADAPTER: &str = "adapter";

    /// Logs related to [model storage](crate::db)
    pub const MODEL: &str = "model";
}

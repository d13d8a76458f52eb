//! Entity trait: identity + continuity across state changes.

/// Entity marker + minimal interface.
///
/// Persisted line records and products implement this so generic adapters
/// (e.g. in-memory catalogs) can index them by id.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> &Self::Id;
}

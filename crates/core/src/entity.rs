//! Entity trait: identity + continuity across state changes.

/// Entity marker + minimal interface.
///
/// Stock records and orders are entities: their quantities and statuses
/// change, their identifiers never do.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> &Self::Id;
}

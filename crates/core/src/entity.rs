//! Entity trait: identity + continuity across state changes.

/// Entity marker + minimal interface.
///
/// Document stores key their records by this identifier, so it must be stable
/// for the lifetime of the record.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> &Self::Id;
}

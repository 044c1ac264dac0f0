//! Entity trait: identity + continuity across state changes.

/// Entity marker + minimal interface.
///
/// Two values of an entity type are the *same entity* when their ids are equal,
/// regardless of any other field. Stores key their maps through [`Entity::id`]
/// rather than whole-value comparison, so a replacement value with new state
/// still resolves to the existing entry.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Copy + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> Self::Id;

    /// Identity comparison, independent of structural equality.
    fn same_entity(&self, other: &Self) -> bool {
        self.id() == other.id()
    }
}

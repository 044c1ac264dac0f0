//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects are **immutable** and **compared by value**: two instances with
/// the same attributes are interchangeable. To "modify" one, build a new value.
/// Contrast with [`crate::Entity`], where only the id matters.
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}

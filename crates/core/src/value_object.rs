//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects are **immutable** and **compared by value**: two instances
/// holding the same attributes are the same value. [`crate::EmailAddress`] is
/// one; a submission record (which has an `id`) is not.
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}

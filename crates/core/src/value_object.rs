//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects are **immutable** and **compared by value** - two value
/// objects with the same attribute values are equal. To "modify" one,
/// construct a new instance.
///
/// Contrast with entities, which have identity: two entities with the same
/// id are the same entity regardless of attribute values.
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}

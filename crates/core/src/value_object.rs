//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects are **immutable** and **compared by value**. A line item is one:
/// two items with identical fields are the same item, and "editing" an item means
/// building a new one.
///
/// ```ignore
/// #[derive(Debug, Clone, PartialEq, Eq)]
/// struct Measurement {
///     quantity: Decimal,
///     unit: Unit,
/// }
///
/// impl ValueObject for Measurement {}
/// ```
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}

//! Value object trait: equality by value, not identity.
//!
//! Quantities, prices and quantity-change ratios on an order form have no identity
//! of their own; two of them with the same value are interchangeable.

/// Marker trait for value objects.
///
/// Value objects are **immutable** and **compared by value**. To "modify" one,
/// build a new one:
///
/// ```ignore
/// let halved = Ratio::new(1, 2)?;
/// ```
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}

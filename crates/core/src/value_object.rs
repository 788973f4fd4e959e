//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects have **no identity**: two instances holding the same values
/// are the same thing. Sales tables, stock levels and factors are all values;
/// a new upload or a new request produces a new value rather than mutating
/// an old one.
///
/// ```ignore
/// #[derive(Debug, Clone, PartialEq)]
/// struct Factors { safety: f64, reorder: f64 }
///
/// impl ValueObject for Factors {}
/// ```
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}

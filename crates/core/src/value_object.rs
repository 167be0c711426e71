//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects have no identity of their own: two instances holding the
/// same values are interchangeable. `ItemName` and `Category` are value
/// objects; an `Item` is an entity keyed by its `ItemName`.
///
/// ```ignore
/// let a = Category::new("Dairy")?;
/// let b = Category::new(" Dairy ")?;
/// assert_eq!(a, b);
/// ```
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}

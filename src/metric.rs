//! The distance contract items must satisfy to be indexed.

/// An item that lives in a discrete metric space.
///
/// The index never looks inside an item; it only asks for distances.
/// Implementations must make `distance` a true metric:
///
/// - **Deterministic**: the same pair always yields the same value.
/// - **Identity**: `a.distance(b) == 0` exactly when `a` and `b` are equal
///   under the metric.
/// - **Symmetry**: `a.distance(b) == b.distance(a)`.
/// - **Triangle inequality**: `a.distance(c) <= a.distance(b) + b.distance(c)`.
///
/// Search pruning relies on the triangle inequality. A distance that breaks
/// these rules is not detected at runtime; searches over it may silently miss
/// matches.
///
/// Edit distance over strings and Hamming distance over fixed-width hashes
/// are both valid instantiations, see [`crate::distance`].
pub trait Metric {
    /// Compute the distance between `self` and `other`.
    fn distance(&self, other: &Self) -> u32;
}

impl<T: Metric + ?Sized> Metric for &T {
    fn distance(&self, other: &Self) -> u32 {
        (**self).distance(*other)
    }
}

impl<T: Metric + ?Sized> Metric for Box<T> {
    fn distance(&self, other: &Self) -> u32 {
        (**self).distance(&**other)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Absolute difference on integers, the simplest metric there is.
    #[derive(Debug, PartialEq)]
    struct Point(i64);

    impl Metric for Point {
        fn distance(&self, other: &Self) -> u32 {
            (self.0 - other.0).unsigned_abs() as u32
        }
    }

    #[test]
    fn test_borrowed_items_delegate() {
        let a = Point(3);
        let b = Point(10);
        assert_eq!(<&Point as Metric>::distance(&&a, &&b), 7);
        assert_eq!(a.distance(&b), 7);
    }

    #[test]
    fn test_boxed_items_delegate() {
        let a = Box::new(Point(-2));
        let b = Box::new(Point(2));
        assert_eq!(a.distance(&b), 4);
        assert_eq!(b.distance(&a), 4);
    }
}

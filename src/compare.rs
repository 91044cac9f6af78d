//! Ordering policies injected into the tree
//!
//! A tree is parameterised by a `Comparator<T>` chosen once at construction.
//! The comparator must be a consistent total order for the lifetime of the
//! tree: records whose primary field can repeat need an explicit tie-break on
//! a stable identifier.

use std::cmp::Ordering;
use std::fmt;

/// Total order over `T`
pub trait Comparator<T: ?Sized> {
    /// Compare two values
    fn compare(&self, a: &T, b: &T) -> Ordering;

    /// Strict "less than" derived from `compare`
    #[inline]
    fn less(&self, a: &T, b: &T) -> bool {
        self.compare(a, b) == Ordering::Less
    }
}

/// Order by `T: Ord`
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct NaturalOrder;

impl<T: Ord + ?Sized> Comparator<T> for NaturalOrder {
    #[inline]
    fn compare(&self, a: &T, b: &T) -> Ordering {
        a.cmp(b)
    }
}

/// Order by a closure
#[derive(Clone, Copy)]
pub struct FnComparator<F>(pub F);

impl<T: ?Sized, F> Comparator<T> for FnComparator<F>
where
    F: Fn(&T, &T) -> Ordering,
{
    #[inline]
    fn compare(&self, a: &T, b: &T) -> Ordering {
        (self.0)(a, b)
    }
}

impl<F> fmt::Debug for FnComparator<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("FnComparator(..)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_natural_order() {
        assert!(NaturalOrder.less(&1, &2));
        assert!(!NaturalOrder.less(&2, &2));
        assert_eq!(NaturalOrder.compare("b", "a"), Ordering::Greater);
    }

    #[test]
    fn test_fn_comparator_reverses() {
        let rev = FnComparator(|a: &i32, b: &i32| b.cmp(a));
        assert!(rev.less(&5, &3));
        assert_eq!(rev.compare(&1, &1), Ordering::Equal);
    }
}

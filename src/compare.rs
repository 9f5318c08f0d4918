use core::cmp::Ordering;

/// A total order over keys.
///
/// The index never inspects keys except through this trait (for direction) and
/// [`EqualityComparer`] (for matches). Implementations must be a strict weak order that agrees
/// with the equality strategy the index is built with; the tree is only as consistent as the
/// pair it is given.
pub trait Comparer<K: ?Sized> {
    /// Compares `a` with `b`.
    fn compare(&self, a: &K, b: &K) -> Ordering;
}

/// An equality predicate over keys.
pub trait EqualityComparer<K: ?Sized> {
    /// Returns `true` if `a` and `b` name the same entry.
    fn equals(&self, a: &K, b: &K) -> bool;
}

/// The key type's own [`Ord`] and [`Eq`].
///
/// # Examples
///
/// ```
/// use core::cmp::Ordering;
/// use ordered_index::{Comparer, EqualityComparer, Natural};
///
/// assert_eq!(Natural.compare(&1, &2), Ordering::Less);
/// assert!(Natural.equals(&"a", &"a"));
/// ```
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub struct Natural;

impl<K: ?Sized + Ord> Comparer<K> for Natural {
    #[inline]
    fn compare(&self, a: &K, b: &K) -> Ordering {
        a.cmp(b)
    }
}

impl<K: ?Sized + Eq> EqualityComparer<K> for Natural {
    #[inline]
    fn equals(&self, a: &K, b: &K) -> bool {
        a == b
    }
}

/// Inverts another comparer.
///
/// # Examples
///
/// ```
/// use ordered_index::{Natural, OrderedIndex, Reversed};
///
/// let mut index = OrderedIndex::with_strategies(Reversed(Natural), Natural);
/// index.set(1, "a");
/// index.set(3, "c");
/// index.set(2, "b");
///
/// let keys: Vec<_> = index.keys().copied().collect();
/// assert_eq!(keys, [3, 2, 1]);
/// ```
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub struct Reversed<C>(pub C);

impl<K: ?Sized, C: Comparer<K>> Comparer<K> for Reversed<C> {
    #[inline]
    fn compare(&self, a: &K, b: &K) -> Ordering {
        self.0.compare(b, a)
    }
}

/// A [`Comparer`] backed by a closure.
#[derive(Clone, Copy, Debug)]
pub struct FnComparer<F>(F);

impl<F> FnComparer<F> {
    /// Wraps `f` as a comparer over `K`.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_index::{FnComparer, FnEquality, OrderedIndex};
    ///
    /// let by_len = FnComparer::new(|a: &&str, b: &&str| a.len().cmp(&b.len()));
    /// let same_len = FnEquality::new(|a: &&str, b: &&str| a.len() == b.len());
    /// let mut index = OrderedIndex::with_strategies(by_len, same_len);
    /// index.set("ccc", 3);
    /// index.set("a", 1);
    /// index.set("bb", 2);
    /// index.set("z", 26);
    ///
    /// assert_eq!(index.len(), 3);
    /// assert_eq!(index.try_get_value(&"q"), Some(&26));
    /// ```
    pub fn new<K: ?Sized>(f: F) -> Self
    where
        F: Fn(&K, &K) -> Ordering,
    {
        Self(f)
    }
}

impl<K: ?Sized, F: Fn(&K, &K) -> Ordering> Comparer<K> for FnComparer<F> {
    #[inline]
    fn compare(&self, a: &K, b: &K) -> Ordering {
        (self.0)(a, b)
    }
}

/// An [`EqualityComparer`] backed by a closure.
#[derive(Clone, Copy, Debug)]
pub struct FnEquality<F>(F);

impl<F> FnEquality<F> {
    /// Wraps `f` as an equality predicate over `K`.
    pub fn new<K: ?Sized>(f: F) -> Self
    where
        F: Fn(&K, &K) -> bool,
    {
        Self(f)
    }
}

impl<K: ?Sized, F: Fn(&K, &K) -> bool> EqualityComparer<K> for FnEquality<F> {
    #[inline]
    fn equals(&self, a: &K, b: &K) -> bool {
        (self.0)(a, b)
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn closures_are_forwarded() {
        let cmp = FnComparer::new(|a: &i32, b: &i32| a.abs().cmp(&b.abs()));
        let eq = FnEquality::new(|a: &i32, b: &i32| a.abs() == b.abs());
        assert_eq!(cmp.compare(&-3, &2), Ordering::Greater);
        assert!(eq.equals(&-3, &3));
    }

    proptest! {
        #[test]
        fn reversed_inverts_natural(a in any::<i64>(), b in any::<i64>()) {
            prop_assert_eq!(Reversed(Natural).compare(&a, &b), Natural.compare(&a, &b).reverse());
            prop_assert_eq!(Natural.equals(&a, &b), Natural.compare(&a, &b) == Ordering::Equal);
        }
    }
}

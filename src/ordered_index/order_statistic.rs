use alloc::vec::Vec;
use core::ops::Index;

use super::OrderedIndex;
use crate::{Comparer, EqualityComparer, IndexError, Observer, Rank};

impl<K, V, C, E, O> OrderedIndex<K, V, C, E, O> {
    /// Returns the key at position `rank` in sorted order, or `None` if `rank >= len()`.
    ///
    /// # Complexity
    ///
    /// O(depth)
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_index::OrderedIndex;
    ///
    /// let index = OrderedIndex::from([("a", 10), ("c", 30), ("b", 20)]);
    /// assert_eq!(index.try_get_by_index(1), Some(&"b"));
    /// assert_eq!(index.try_get_by_index(3), None);
    /// ```
    #[must_use]
    pub fn try_get_by_index(&self, rank: usize) -> Option<&K> {
        self.raw.select(rank).map(|handle| self.raw.node(handle).key())
    }

    /// Returns the value at position `rank` in key order, or `None` if `rank >= len()`.
    #[must_use]
    pub fn try_get_value_by_index(&self, rank: usize) -> Option<&V> {
        self.raw.select(rank).map(|handle| self.raw.node(handle).value())
    }
}

impl<K, V, C: Comparer<K>, E: EqualityComparer<K>, O: Observer> OrderedIndex<K, V, C, E, O> {
    /// Returns the zero-based rank of `key`: the number of stored keys smaller than it.
    ///
    /// # Errors
    ///
    /// [`IndexError::KeyNotFound`] if `key` is absent. [`rank`](Self::rank) answers the same
    /// question for any key.
    ///
    /// # Complexity
    ///
    /// O(depth)
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_index::{IndexError, OrderedIndex};
    ///
    /// let index = OrderedIndex::from([(10, "a"), (20, "b")]);
    /// assert_eq!(index.index_of(&20), Ok(1));
    /// assert_eq!(index.index_of(&15), Err(IndexError::KeyNotFound));
    /// ```
    pub fn index_of(&self, key: &K) -> Result<usize, IndexError> {
        self.raw.rank_of(key).ok_or(IndexError::KeyNotFound)
    }

    /// Returns the number of stored keys strictly smaller than `key`, whether or not `key`
    /// itself is present.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_index::OrderedIndex;
    ///
    /// let index = OrderedIndex::from([(10, ()), (20, ()), (30, ())]);
    /// assert_eq!(index.rank(&20), 1);
    /// assert_eq!(index.rank(&25), 2);
    /// assert_eq!(index.rank(&99), 3);
    /// ```
    #[must_use]
    pub fn rank(&self, key: &K) -> usize {
        self.raw.count_below(key, false)
    }

    /// Returns every stored key `k` with `from <= k <= to`, in ascending order.
    ///
    /// Neither bound has to be present. Returns `None` when no key falls in the window,
    /// including when `from > to`.
    ///
    /// The window is located by rank and then filled one rank at a time, so this costs
    /// O(depth) per returned key rather than a single walk.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_index::OrderedIndex;
    ///
    /// let index: OrderedIndex<_, _> = (0..10).map(|key| (key * 10, key)).collect();
    /// assert_eq!(index.try_get_range(&25, &50), Some(vec![&30, &40, &50]));
    /// assert_eq!(index.try_get_range(&51, &59), None);
    /// assert_eq!(index.try_get_range(&50, &25), None);
    /// ```
    #[must_use]
    pub fn try_get_range(&self, from: &K, to: &K) -> Option<Vec<&K>> {
        let span = self.raw.rank_span(from, to)?;
        span.map(|rank| self.try_get_by_index(rank)).collect()
    }

    /// Returns the values of every stored key `k` with `from <= k <= to`, in key order.
    ///
    /// Shares the `None` conditions and cost of [`try_get_range`](Self::try_get_range).
    #[must_use]
    pub fn try_get_range_values(&self, from: &K, to: &K) -> Option<Vec<&V>> {
        let span = self.raw.rank_span(from, to)?;
        span.map(|rank| self.try_get_value_by_index(rank)).collect()
    }
}

/// Indexes into the index by rank, returning the value.
///
/// # Panics
///
/// Panics if `rank` is out of bounds.
///
/// # Examples
///
/// ```
/// use ordered_index::{OrderedIndex, Rank};
///
/// let index = OrderedIndex::from([("a", 1), ("b", 2)]);
/// assert_eq!(index[Rank(1)], 2);
/// ```
impl<K, V, C, E, O> Index<Rank> for OrderedIndex<K, V, C, E, O> {
    type Output = V;

    fn index(&self, rank: Rank) -> &Self::Output {
        self.try_get_value_by_index(rank.0).expect("index out of bounds")
    }
}

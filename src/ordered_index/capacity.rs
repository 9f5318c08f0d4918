use super::OrderedIndex;
use crate::raw::RawIndex;
use crate::{Natural, NoopObserver};

impl<K, V> OrderedIndex<K, V> {
    /// Creates an empty index with room for at least `capacity` entries before reallocating.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_index::OrderedIndex;
    ///
    /// let index: OrderedIndex<i32, i32> = OrderedIndex::with_capacity(32);
    /// assert!(index.is_empty());
    /// assert!(index.capacity() >= 32);
    /// ```
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        OrderedIndex {
            raw: RawIndex::with_capacity(capacity, Natural, Natural, NoopObserver),
        }
    }
}

impl<K, V, C, E, O> OrderedIndex<K, V, C, E, O> {
    /// Returns how many entries the index can hold without reallocating.
    ///
    /// Slots freed by removals are reused first, so churn does not grow this.
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.raw.capacity()
    }
}

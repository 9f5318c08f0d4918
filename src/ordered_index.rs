use core::fmt;
use core::ops::Index;

use crate::raw::RawIndex;
use crate::{Comparer, EqualityComparer, IndexError, Natural, NoopObserver, Observer};

mod capacity;
mod iter;
mod order_statistic;

pub use crate::Rank;
pub use iter::{Iter, Keys, Values};

/// An ordered symbol table based on an unbalanced binary search tree, with order-statistic
/// queries.
///
/// Keys are unique and kept in the order given by the comparer `C`. Two keys name the same
/// entry when the equality strategy `E` says so. Both strategies default to [`Natural`], the
/// key type's own [`Ord`] and [`Eq`]. They must agree with each other: `E` must hold exactly
/// when `C` returns [`Equal`](core::cmp::Ordering::Equal). Pairs that disagree give
/// unspecified (though memory-safe) results.
///
/// Every node records the size of the subtree it roots, which lets the index turn keys into
/// ranks and ranks into keys in a single descent:
///
/// - [`index_of`](Self::index_of) and [`rank`](Self::rank) map keys to ranks
/// - [`try_get_by_index`](Self::try_get_by_index) and indexing by [`Rank`] map ranks to keys
/// - [`try_get_range`](Self::try_get_range) extracts a contiguous window of keys
///
/// # Balance
///
/// The tree is **not** self-balancing. Each operation costs O(depth). Depth is O(log n) for
/// keys arriving in random order but O(n) for sorted or reverse-sorted input, which turns the
/// tree into a chain. No operation recurses, so a degenerate tree is slow but never overflows
/// the stack.
///
/// # Observing
///
/// An [`Observer`] installed with [`with_observer`](Self::with_observer) is told about inserts,
/// updates, removals, comparisons and completed traversals. The default [`NoopObserver`]
/// compiles away.
///
/// # Examples
///
/// ```
/// use ordered_index::{IndexError, OrderedIndex};
///
/// let mut index = OrderedIndex::new();
/// for (key, value) in [(13, "m"), (2, "b"), (8, "h"), (21, "u")] {
///     index.set(key, value);
/// }
///
/// assert_eq!(index.get(&8), Ok(&"h"));
/// assert_eq!(index.get(&9), Err(IndexError::KeyNotFound));
/// assert_eq!(index.add(2, "again"), Err(IndexError::DuplicateKey));
///
/// assert_eq!(index.ceil(&9), Ok(&13));
/// assert_eq!(index.floor(&9), Ok(&8));
/// assert_eq!(index.index_of(&13), Ok(2));
/// assert_eq!(index.try_get_range(&3, &20), Some(vec![&8, &13]));
///
/// let keys: Vec<_> = index.keys().copied().collect();
/// assert_eq!(keys, [2, 8, 13, 21]);
/// ```
#[derive(Clone)]
pub struct OrderedIndex<K, V, C = Natural, E = Natural, O = NoopObserver> {
    raw: RawIndex<K, V, C, E, O>,
}

impl<K, V> OrderedIndex<K, V> {
    /// Makes a new, empty `OrderedIndex` ordered by the key's [`Ord`].
    ///
    /// Does not allocate anything on its own.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_index::OrderedIndex;
    ///
    /// let mut index = OrderedIndex::new();
    /// index.set(1, "a");
    /// ```
    #[must_use]
    pub const fn new() -> Self {
        OrderedIndex {
            raw: RawIndex::new(Natural, Natural, NoopObserver),
        }
    }
}

impl<K, V, C, E> OrderedIndex<K, V, C, E> {
    /// Makes a new, empty `OrderedIndex` using `comparer` for order and `equality` for matches.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_index::{FnComparer, FnEquality, OrderedIndex};
    ///
    /// let mut index = OrderedIndex::with_strategies(
    ///     FnComparer::new(|a: &String, b: &String| a.to_lowercase().cmp(&b.to_lowercase())),
    ///     FnEquality::new(|a: &String, b: &String| a.eq_ignore_ascii_case(b)),
    /// );
    /// index.set("Apple".to_string(), 1);
    /// index.set("APPLE".to_string(), 2);
    ///
    /// assert_eq!(index.len(), 1);
    /// assert_eq!(index.try_get_value(&"apple".to_string()), Some(&2));
    /// ```
    #[must_use]
    pub const fn with_strategies(comparer: C, equality: E) -> Self {
        OrderedIndex {
            raw: RawIndex::new(comparer, equality, NoopObserver),
        }
    }
}

impl<K, V, C, E, O> OrderedIndex<K, V, C, E, O> {
    /// Replaces the observer, keeping every entry.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_index::{OrderedIndex, TracingObserver};
    ///
    /// let mut index = OrderedIndex::new().with_observer(TracingObserver);
    /// index.set("k", "v");
    /// ```
    #[must_use]
    pub fn with_observer<P: Observer>(self, observer: P) -> OrderedIndex<K, V, C, E, P> {
        OrderedIndex {
            raw: self.raw.with_observer(observer),
        }
    }

    /// Returns the number of entries.
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub fn len(&self) -> usize {
        self.raw.len()
    }

    /// Returns `true` if the index holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// Removes every entry, keeping the strategies and observer.
    pub fn clear(&mut self) {
        self.raw.clear();
    }

    /// The comparison strategy.
    #[must_use]
    pub fn comparer(&self) -> &C {
        self.raw.comparer()
    }

    /// The equality strategy.
    #[must_use]
    pub fn equality(&self) -> &E {
        self.raw.equality()
    }

    /// The installed observer.
    #[must_use]
    pub fn observer(&self) -> &O {
        self.raw.observer()
    }

    /// The installed observer, mutably.
    pub fn observer_mut(&mut self) -> &mut O {
        self.raw.observer_mut()
    }
}

impl<K, V, C, E, O: Observer> OrderedIndex<K, V, C, E, O> {
    /// Gets an iterator over the keys in ascending order.
    ///
    /// Every call starts a fresh walk over the index as it is now.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_index::OrderedIndex;
    ///
    /// let index = OrderedIndex::from([(3, 'c'), (1, 'a'), (2, 'b')]);
    /// let keys: Vec<_> = index.keys().collect();
    /// assert_eq!(keys, [&1, &2, &3]);
    /// ```
    pub fn keys(&self) -> Keys<'_, K, V, O> {
        Keys::new(self.raw.in_order())
    }

    /// Gets an iterator over the values in key order.
    pub fn values(&self) -> Values<'_, K, V, O> {
        Values::new(self.raw.in_order())
    }

    /// Gets an iterator over the entries in key order.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_index::OrderedIndex;
    ///
    /// let index = OrderedIndex::from([(2, 'b'), (1, 'a')]);
    /// let mut iter = index.iter();
    /// assert_eq!(iter.next(), Some((&1, &'a')));
    /// assert_eq!(iter.next(), Some((&2, &'b')));
    /// assert_eq!(iter.next(), None);
    /// ```
    pub fn iter(&self) -> Iter<'_, K, V, O> {
        Iter::new(self.raw.in_order())
    }
}

impl<K, V, C: Comparer<K>, E: EqualityComparer<K>, O: Observer> OrderedIndex<K, V, C, E, O> {
    /// Returns the value stored for `key`.
    ///
    /// # Errors
    ///
    /// [`IndexError::KeyNotFound`] if `key` is absent.
    ///
    /// # Complexity
    ///
    /// O(depth)
    pub fn get(&self, key: &K) -> Result<&V, IndexError> {
        self.raw.get(key).ok_or(IndexError::KeyNotFound)
    }

    /// Returns the value stored for `key`, or `None` if it is absent.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_index::OrderedIndex;
    ///
    /// let mut index = OrderedIndex::new();
    /// index.set(1, "a");
    /// assert_eq!(index.try_get_value(&1), Some(&"a"));
    /// assert_eq!(index.try_get_value(&2), None);
    /// ```
    #[must_use]
    pub fn try_get_value(&self, key: &K) -> Option<&V> {
        self.raw.get(key)
    }

    /// Returns a mutable reference to the value stored for `key`.
    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        self.raw.get_mut(key)
    }

    /// Returns `true` if `key` is present.
    #[must_use]
    pub fn contains_key(&self, key: &K) -> bool {
        self.raw.search(key).is_some()
    }

    /// Inserts `value` under `key`, replacing and returning any previous value.
    ///
    /// A replaced entry keeps its original key and its place in the tree.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_index::OrderedIndex;
    ///
    /// let mut index = OrderedIndex::new();
    /// assert_eq!(index.set(37, "a"), None);
    /// assert_eq!(index.set(37, "b"), Some("a"));
    /// assert_eq!(index.len(), 1);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(depth)
    pub fn set(&mut self, key: K, value: V) -> Option<V> {
        self.raw.insert(key, value)
    }

    /// Inserts `value` under `key` only if `key` is absent.
    ///
    /// # Errors
    ///
    /// [`IndexError::DuplicateKey`] if `key` is already present; the index is unchanged.
    pub fn add(&mut self, key: K, value: V) -> Result<(), IndexError> {
        if self.contains_key(&key) {
            return Err(IndexError::DuplicateKey);
        }
        self.raw.insert(key, value);
        Ok(())
    }

    /// Removes `key`, returning its value if it was present.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_index::OrderedIndex;
    ///
    /// let mut index = OrderedIndex::from([(1, "a"), (2, "b")]);
    /// assert_eq!(index.try_remove(&1), Some("a"));
    /// assert_eq!(index.try_remove(&1), None);
    /// assert_eq!(index.len(), 1);
    /// ```
    pub fn try_remove(&mut self, key: &K) -> Option<V> {
        self.raw.remove_entry(key).map(|(_, value)| value)
    }

    /// Removes `key`, returning whether it was present.
    pub fn remove(&mut self, key: &K) -> bool {
        self.raw.remove_entry(key).is_some()
    }

    /// Returns the smallest key.
    ///
    /// # Errors
    ///
    /// [`IndexError::EmptyCollection`] if the index is empty.
    pub fn min(&self) -> Result<&K, IndexError> {
        self.raw.first().map(|handle| self.raw.node(handle).key()).ok_or(IndexError::EmptyCollection)
    }

    /// Returns the largest key.
    ///
    /// # Errors
    ///
    /// [`IndexError::EmptyCollection`] if the index is empty.
    pub fn max(&self) -> Result<&K, IndexError> {
        self.raw.last().map(|handle| self.raw.node(handle).key()).ok_or(IndexError::EmptyCollection)
    }

    /// Returns the smallest stored key greater than or equal to `key`.
    ///
    /// When every stored key is smaller than `key` there is no ceiling and the largest key is
    /// returned instead.
    ///
    /// # Errors
    ///
    /// [`IndexError::EmptyCollection`] if the index is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_index::OrderedIndex;
    ///
    /// let index = OrderedIndex::from([(10, ()), (20, ())]);
    /// assert_eq!(index.ceil(&15), Ok(&20));
    /// assert_eq!(index.ceil(&20), Ok(&20));
    /// assert_eq!(index.ceil(&99), Ok(&20));
    /// ```
    pub fn ceil(&self, key: &K) -> Result<&K, IndexError> {
        self.raw.ceil(key).map(|handle| self.raw.node(handle).key()).ok_or(IndexError::EmptyCollection)
    }

    /// Returns the largest stored key less than or equal to `key`.
    ///
    /// When every stored key is larger than `key` there is no floor and the smallest key is
    /// returned instead.
    ///
    /// # Errors
    ///
    /// [`IndexError::EmptyCollection`] if the index is empty.
    pub fn floor(&self, key: &K) -> Result<&K, IndexError> {
        self.raw.floor(key).map(|handle| self.raw.node(handle).key()).ok_or(IndexError::EmptyCollection)
    }
}

impl<K, V, C, E, O> fmt::Debug for OrderedIndex<K, V, C, E, O>
where
    K: fmt::Debug,
    V: fmt::Debug,
    O: Observer,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K, V, C: Default, E: Default, O: Default> Default for OrderedIndex<K, V, C, E, O> {
    /// Creates an empty `OrderedIndex`.
    fn default() -> Self {
        OrderedIndex {
            raw: RawIndex::new(C::default(), E::default(), O::default()),
        }
    }
}

impl<K: Ord, V> FromIterator<(K, V)> for OrderedIndex<K, V> {
    /// Builds an index from pairs; later duplicates overwrite earlier ones.
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut index = OrderedIndex::new();
        index.extend(iter);
        index
    }
}

impl<K, V, C, E, O> Extend<(K, V)> for OrderedIndex<K, V, C, E, O>
where
    C: Comparer<K>,
    E: EqualityComparer<K>,
    O: Observer,
{
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (key, value) in iter {
            self.set(key, value);
        }
    }
}

impl<K: Ord, V, const N: usize> From<[(K, V); N]> for OrderedIndex<K, V> {
    fn from(arr: [(K, V); N]) -> Self {
        arr.into_iter().collect()
    }
}

impl<'a, K, V, C, E, O: Observer> IntoIterator for &'a OrderedIndex<K, V, C, E, O> {
    type Item = &'a K;
    type IntoIter = Keys<'a, K, V, O>;

    /// Iterating an index by reference yields its keys.
    fn into_iter(self) -> Keys<'a, K, V, O> {
        self.keys()
    }
}

impl<K, V, C, E, O> Index<&K> for OrderedIndex<K, V, C, E, O>
where
    C: Comparer<K>,
    E: EqualityComparer<K>,
    O: Observer,
{
    type Output = V;

    /// Returns the value stored for `key`.
    ///
    /// # Panics
    ///
    /// Panics if `key` is absent. Use [`get`](OrderedIndex::get) to handle that case.
    fn index(&self, key: &K) -> &V {
        self.try_get_value(key).expect("no entry found for key")
    }
}

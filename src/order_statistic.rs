/// A zero-based rank into the sorted order of an index.
///
/// # Examples
///
/// ```
/// use ordered_index::{OrderedIndex, Rank};
///
/// let mut index = OrderedIndex::new();
/// index.set("b", 20);
/// index.set("a", 10);
///
/// assert_eq!(index[Rank(0)], 10);
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Rank(pub usize);

use core::cmp::Ordering;
use core::mem;
use core::ops::Range;

use smallvec::SmallVec;

use super::arena::Arena;
use super::handle::Handle;
use super::in_order::InOrder;
use super::node::{Node, Side};
use crate::{Comparer, EqualityComparer, Observer};

/// Handles visited on the way down from the root.
type Path = SmallVec<[Handle; 32]>;

/// The unbalanced, size-augmented binary search tree backing `OrderedIndex`.
#[derive(Clone)]
pub(crate) struct RawIndex<K, V, C, E, O> {
    /// Every live node; children refer to each other by handle.
    nodes: Arena<Node<K, V>>,
    root: Option<Handle>,
    comparer: C,
    equality: E,
    observer: O,
}

impl<K, V, C, E, O> RawIndex<K, V, C, E, O> {
    pub(crate) const fn new(comparer: C, equality: E, observer: O) -> Self {
        Self {
            nodes: Arena::new(),
            root: None,
            comparer,
            equality,
            observer,
        }
    }

    pub(crate) fn with_capacity(capacity: usize, comparer: C, equality: E, observer: O) -> Self {
        Self {
            nodes: Arena::with_capacity(capacity),
            root: None,
            comparer,
            equality,
            observer,
        }
    }

    /// Swaps the observer, keeping every entry.
    pub(crate) fn with_observer<P>(self, observer: P) -> RawIndex<K, V, C, E, P> {
        RawIndex {
            nodes: self.nodes,
            root: self.root,
            comparer: self.comparer,
            equality: self.equality,
            observer,
        }
    }

    /// Number of entries; the root's subtree size.
    pub(crate) fn len(&self) -> usize {
        let len = self.size_of(self.root);
        debug_assert_eq!(len, self.nodes.len(), "`RawIndex::len()` - root size and live slots disagree");
        len
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    pub(crate) fn capacity(&self) -> usize {
        self.nodes.capacity()
    }

    pub(crate) fn clear(&mut self) {
        self.nodes.clear();
        self.root = None;
    }

    pub(crate) fn node(&self, handle: Handle) -> &Node<K, V> {
        self.nodes.get(handle)
    }

    pub(crate) fn comparer(&self) -> &C {
        &self.comparer
    }

    pub(crate) fn equality(&self) -> &E {
        &self.equality
    }

    pub(crate) fn observer(&self) -> &O {
        &self.observer
    }

    pub(crate) fn observer_mut(&mut self) -> &mut O {
        &mut self.observer
    }

    #[inline]
    fn size_of(&self, handle: Option<Handle>) -> usize {
        handle.map_or(0, |handle| self.nodes.get(handle).size())
    }

    /// Handle of the leftmost node.
    pub(crate) fn first(&self) -> Option<Handle> {
        let mut current = self.root?;
        while let Some(left) = self.nodes.get(current).left() {
            current = left;
        }
        Some(current)
    }

    /// Handle of the rightmost node.
    pub(crate) fn last(&self) -> Option<Handle> {
        let mut current = self.root?;
        while let Some(right) = self.nodes.get(current).right() {
            current = right;
        }
        Some(current)
    }

    /// Handle of the node at `rank` in sorted order.
    pub(crate) fn select(&self, rank: usize) -> Option<Handle> {
        if rank >= self.len() {
            return None;
        }

        let mut current = self.root?;
        let mut remaining = rank;
        loop {
            let node = self.nodes.get(current);
            let preceding = self.size_of(node.left());
            match remaining.cmp(&preceding) {
                Ordering::Equal => return Some(current),
                Ordering::Less => current = node.left()?,
                Ordering::Greater => {
                    remaining -= preceding + 1;
                    current = node.right()?;
                }
            }
        }
    }
}

impl<K, V, C, E, O: Observer> RawIndex<K, V, C, E, O> {
    /// Starts a fresh in-order walk over the current tree.
    pub(crate) fn in_order(&self) -> InOrder<'_, K, V, O> {
        InOrder::new(&self.nodes, self.root, &self.observer)
    }
}

impl<K, V, C: Comparer<K>, E: EqualityComparer<K>, O: Observer> RawIndex<K, V, C, E, O> {
    #[inline]
    fn compare(&self, a: &K, b: &K) -> Ordering {
        self.observer.on_compare();
        self.comparer.compare(a, b)
    }

    #[inline]
    fn matches(&self, a: &K, b: &K) -> bool {
        self.equality.equals(a, b)
    }

    /// The side a descent for `key` takes below a node holding `here`.
    #[inline]
    fn side_for(&self, key: &K, here: &K) -> Side {
        if self.compare(key, here) == Ordering::Less {
            Side::Left
        } else {
            Side::Right
        }
    }

    /// Finds the node holding `key`.
    pub(crate) fn search(&self, key: &K) -> Option<Handle> {
        let mut current = self.root?;
        loop {
            let node = self.nodes.get(current);
            if self.matches(key, node.key()) {
                return Some(current);
            }
            current = node.child(self.side_for(key, node.key()))?;
        }
    }

    pub(crate) fn get(&self, key: &K) -> Option<&V> {
        self.search(key).map(|handle| self.nodes.get(handle).value())
    }

    pub(crate) fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        let handle = self.search(key)?;
        Some(self.nodes.get_mut(handle).value_mut())
    }

    /// Inserts or overwrites. Returns the replaced value if `key` was present.
    pub(crate) fn insert(&mut self, key: K, value: V) -> Option<V> {
        let Some(root) = self.root else {
            self.root = Some(self.nodes.alloc(Node::leaf(key, value)));
            self.observer.on_insert(0);
            return None;
        };

        let mut path: Path = SmallVec::new();
        let mut current = root;
        let side = loop {
            let node = self.nodes.get(current);
            if self.matches(&key, node.key()) {
                // Same key: the shape of the tree does not change.
                let old = mem::replace(self.nodes.get_mut(current).value_mut(), value);
                self.observer.on_update(path.len());
                return Some(old);
            }
            path.push(current);
            let side = self.side_for(&key, node.key());
            match node.child(side) {
                Some(child) => current = child,
                None => break side,
            }
        };

        let leaf = self.nodes.alloc(Node::leaf(key, value));
        self.nodes.get_mut(current).set_child(side, Some(leaf));

        let depth = path.len();
        while let Some(ancestor) = path.pop() {
            self.nodes.get_mut(ancestor).grow();
        }
        self.observer.on_insert(depth);
        None
    }

    /// Removes `key`, returning its entry.
    pub(crate) fn remove_entry(&mut self, key: &K) -> Option<(K, V)> {
        let mut path: Path = SmallVec::new();
        let mut link: Option<(Handle, Side)> = None;
        let mut current = self.root?;
        loop {
            let node = self.nodes.get(current);
            if self.matches(key, node.key()) {
                break;
            }
            let side = self.side_for(key, node.key());
            // Missing keys return here, before anything has been touched.
            let child = node.child(side)?;
            path.push(current);
            link = Some((current, side));
            current = child;
        }

        let replacement = self.detach(current);
        match link {
            Some((parent, side)) => self.nodes.get_mut(parent).set_child(side, replacement),
            None => self.root = replacement,
        }

        // Each ancestor's searched subtree was swapped for one exactly one node smaller.
        let depth = path.len();
        while let Some(ancestor) = path.pop() {
            self.nodes.get_mut(ancestor).shrink();
        }

        let entry = self.nodes.take(current).into_entry();
        self.observer.on_remove(depth);
        Some(entry)
    }

    /// Unlinks the subtree below `target` from it and returns what takes its place.
    ///
    /// `target` itself is left in the arena with stale links for the caller to free.
    fn detach(&mut self, target: Handle) -> Option<Handle> {
        let node = self.nodes.get(target);
        let remaining = node.size() - 1;
        let (Some(left), Some(right)) = (node.left(), node.right()) else {
            return node.left().or(node.right());
        };

        // Hibbard deletion: promote the in-order successor.
        let mut between: Path = SmallVec::new();
        let mut successor = right;
        while let Some(next) = self.nodes.get(successor).left() {
            between.push(successor);
            successor = next;
        }

        if let Some(&parent) = between.last() {
            // The successor has no left child; its right subtree takes its place.
            let orphans = self.nodes.get(successor).right();
            self.nodes.get_mut(parent).set_left(orphans);
            for &handle in &between {
                self.nodes.get_mut(handle).shrink();
            }
            self.nodes.get_mut(successor).set_right(Some(right));
        }

        let size = 1 + self.size_of(Some(left)) + self.size_of(self.nodes.get(successor).right());
        debug_assert_eq!(size, remaining, "`RawIndex::detach()` - subtree sizes out of sync");
        let promoted = self.nodes.get_mut(successor);
        promoted.set_left(Some(left));
        promoted.set_size(size);
        Some(successor)
    }

    /// Smallest key `>= key`, or the largest key if every key is smaller.
    pub(crate) fn ceil(&self, key: &K) -> Option<Handle> {
        let mut best = None;
        let mut current = self.root;
        while let Some(handle) = current {
            let node = self.nodes.get(handle);
            match self.compare(node.key(), key) {
                Ordering::Equal => return Some(handle),
                Ordering::Greater => {
                    best = Some(handle);
                    current = node.left();
                }
                Ordering::Less => current = node.right(),
            }
        }
        best.or_else(|| self.last())
    }

    /// Largest key `<= key`, or the smallest key if every key is larger.
    pub(crate) fn floor(&self, key: &K) -> Option<Handle> {
        let mut best = None;
        let mut current = self.root;
        while let Some(handle) = current {
            let node = self.nodes.get(handle);
            match self.compare(node.key(), key) {
                Ordering::Equal => return Some(handle),
                Ordering::Less => {
                    best = Some(handle);
                    current = node.right();
                }
                Ordering::Greater => current = node.left(),
            }
        }
        best.or_else(|| self.first())
    }

    /// Rank of a stored key.
    pub(crate) fn rank_of(&self, key: &K) -> Option<usize> {
        let mut rank = 0;
        let mut current = self.root?;
        loop {
            let node = self.nodes.get(current);
            let preceding = self.size_of(node.left());
            if self.matches(key, node.key()) {
                return Some(rank + preceding);
            }
            current = match self.side_for(key, node.key()) {
                Side::Left => node.left()?,
                Side::Right => {
                    rank += preceding + 1;
                    node.right()?
                }
            };
        }
    }

    /// Number of stored keys below `key`, counting an equal key too when `inclusive`.
    ///
    /// Unlike [`rank_of`](Self::rank_of) this is defined for absent keys.
    pub(crate) fn count_below(&self, key: &K, inclusive: bool) -> usize {
        let mut count = 0;
        let mut current = self.root;
        while let Some(handle) = current {
            let node = self.nodes.get(handle);
            let preceding = self.size_of(node.left());
            match self.compare(key, node.key()) {
                Ordering::Less => current = node.left(),
                Ordering::Equal => return count + preceding + usize::from(inclusive),
                Ordering::Greater => {
                    count += preceding + 1;
                    current = node.right();
                }
            }
        }
        count
    }

    /// Ranks of the keys within `from..=to`, or `None` if there are none.
    pub(crate) fn rank_span(&self, from: &K, to: &K) -> Option<Range<usize>> {
        let lo = self.count_below(from, false);
        let hi = self.count_below(to, true);
        (lo < hi).then_some(lo..hi)
    }
}

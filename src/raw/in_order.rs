use core::iter::FusedIterator;

use smallvec::SmallVec;

use super::arena::Arena;
use super::handle::Handle;
use super::node::Node;
use crate::{NoopObserver, Observer};

/// What the walker still owes a node on the work stack.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Stage {
    /// Its subtree has not been expanded yet.
    Explore,
    /// Everything to its left has been yielded; it is next.
    Yield,
}

/// Lazy in-order walk over a tree, driven by an explicit work stack.
///
/// Stack usage is proportional to the tree's depth, but lives on the heap.
pub(crate) struct InOrder<'a, K, V, O = NoopObserver> {
    nodes: &'a Arena<Node<K, V>>,
    stack: SmallVec<[(Handle, Stage); 32]>,
    remaining: usize,
    yielded: usize,
    /// Set once the completed walk has been reported.
    reported: bool,
    observer: &'a O,
}

impl<'a, K, V, O> InOrder<'a, K, V, O> {
    pub(crate) fn new(nodes: &'a Arena<Node<K, V>>, root: Option<Handle>, observer: &'a O) -> Self {
        let mut stack = SmallVec::new();
        let mut remaining = 0;
        if let Some(root) = root {
            stack.push((root, Stage::Explore));
            remaining = nodes.get(root).size();
        }
        Self {
            nodes,
            stack,
            remaining,
            yielded: 0,
            reported: false,
            observer,
        }
    }
}

impl<K, V, O: Observer> InOrder<'_, K, V, O> {
    fn report(&mut self) {
        if !self.reported {
            self.reported = true;
            self.observer.on_traversal(self.yielded);
        }
    }
}

impl<'a, K, V, O: Observer> Iterator for InOrder<'a, K, V, O> {
    type Item = &'a Node<K, V>;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((handle, stage)) = self.stack.pop() {
            let node = self.nodes.get(handle);
            match stage {
                Stage::Yield => {
                    self.remaining -= 1;
                    self.yielded += 1;
                    if self.remaining == 0 {
                        self.report();
                    }
                    return Some(node);
                }
                Stage::Explore => {
                    // Pushed in reverse: right subtree, the node itself, then left subtree on top.
                    if let Some(right) = node.right() {
                        self.stack.push((right, Stage::Explore));
                    }
                    self.stack.push((handle, Stage::Yield));
                    if let Some(left) = node.left() {
                        self.stack.push((left, Stage::Explore));
                    }
                }
            }
        }
        // An empty tree completes on its first `None`.
        self.report();
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V, O: Observer> ExactSizeIterator for InOrder<'_, K, V, O> {}

impl<K, V, O: Observer> FusedIterator for InOrder<'_, K, V, O> {}

impl<K, V, O> Clone for InOrder<'_, K, V, O> {
    fn clone(&self) -> Self {
        Self {
            nodes: self.nodes,
            stack: self.stack.clone(),
            remaining: self.remaining,
            yielded: self.yielded,
            reported: self.reported,
            observer: self.observer,
        }
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use crate::CountingObserver;
    use alloc::vec::Vec;
    use static_assertions::{assert_impl_all, assert_not_impl_any};

    // Auto traits follow the observer type.
    assert_impl_all!(InOrder<'static, i32, i32>: Send, Sync);
    assert_not_impl_any!(InOrder<'static, i32, i32, CountingObserver>: Send, Sync);

    #[test]
    fn walks_a_hand_built_tree() {
        //       4
        //     /   \
        //    2     5
        //   / \
        //  1   3
        let mut nodes = Arena::new();
        let one = nodes.alloc(Node::leaf(1, ()));
        let three = nodes.alloc(Node::leaf(3, ()));
        let five = nodes.alloc(Node::leaf(5, ()));
        let mut two = Node::leaf(2, ());
        two.set_left(Some(one));
        two.set_right(Some(three));
        two.set_size(3);
        let two = nodes.alloc(two);
        let mut four = Node::leaf(4, ());
        four.set_left(Some(two));
        four.set_right(Some(five));
        four.set_size(5);
        let four = nodes.alloc(four);

        let observer = CountingObserver::default();
        let walk = InOrder::new(&nodes, Some(four), &observer);
        assert_eq!(walk.len(), 5);
        let keys: Vec<i32> = walk.map(|node| *node.key()).collect();
        assert_eq!(keys, [1, 2, 3, 4, 5]);
        assert_eq!(observer.traversals(), 1);
    }

    #[test]
    fn empty_tree_reports_one_traversal() {
        let nodes: Arena<Node<i32, ()>> = Arena::new();
        let observer = CountingObserver::default();
        let mut walk = InOrder::new(&nodes, None, &observer);
        assert_eq!(walk.len(), 0);
        assert!(walk.next().is_none());
        assert!(walk.next().is_none());
        assert_eq!(observer.traversals(), 1);
    }

    #[test]
    fn exhausted_walk_reports_once() {
        let mut nodes = Arena::new();
        let root = nodes.alloc(Node::leaf(1, ()));
        let observer = CountingObserver::default();
        let mut walk = InOrder::new(&nodes, Some(root), &observer);
        assert!(walk.next().is_some());
        assert!(walk.next().is_none());
        assert!(walk.next().is_none());
        assert_eq!(observer.traversals(), 1);
    }

    #[test]
    fn abandoned_walk_is_not_reported() {
        let mut nodes = Arena::new();
        let one = nodes.alloc(Node::leaf(1, ()));
        let mut two = Node::leaf(2, ());
        two.set_left(Some(one));
        two.set_size(2);
        let two = nodes.alloc(two);
        let observer = CountingObserver::default();
        let mut walk = InOrder::new(&nodes, Some(two), &observer);
        assert!(walk.next().is_some());
        drop(walk);
        assert_eq!(observer.traversals(), 0);
    }
}

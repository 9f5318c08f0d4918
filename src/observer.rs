use core::cell::Cell;

/// Receives diagnostic events from an index.
///
/// Every method has an empty default, so an observer only implements what it cares about.
/// Observers see events after the index has finished mutating; they cannot affect results.
///
/// `depth` is the number of edges between the root and the node that was touched.
pub trait Observer {
    /// A new key was attached at `depth`.
    fn on_insert(&self, depth: usize) {
        let _ = depth;
    }

    /// An existing key at `depth` had its value replaced.
    fn on_update(&self, depth: usize) {
        let _ = depth;
    }

    /// The key at `depth` was removed.
    fn on_remove(&self, depth: usize) {
        let _ = depth;
    }

    /// An in-order traversal ran to completion after yielding `yielded` entries.
    ///
    /// A walk over an empty index reports `0` on its first `None`. Walks dropped early are
    /// not reported.
    fn on_traversal(&self, yielded: usize) {
        let _ = yielded;
    }

    /// The index consulted its comparer.
    fn on_compare(&self) {}
}

/// The default observer. Does nothing.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct NoopObserver;

impl Observer for NoopObserver {}

/// Forwards events to [`tracing`] under the `ordered_index` target.
///
/// Structural events are emitted at `TRACE`; completed traversals at `DEBUG`. Comparisons are
/// not reported.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct TracingObserver;

impl Observer for TracingObserver {
    fn on_insert(&self, depth: usize) {
        tracing::trace!(target: "ordered_index", depth, "inserted key");
    }

    fn on_update(&self, depth: usize) {
        tracing::trace!(target: "ordered_index", depth, "replaced value");
    }

    fn on_remove(&self, depth: usize) {
        tracing::trace!(target: "ordered_index", depth, "removed key");
    }

    fn on_traversal(&self, yielded: usize) {
        tracing::debug!(target: "ordered_index", yielded, "in-order traversal complete");
    }
}

/// Counts events.
///
/// # Examples
///
/// ```
/// use ordered_index::{CountingObserver, OrderedIndex};
///
/// let mut index = OrderedIndex::new().with_observer(CountingObserver::default());
/// for key in 0..4 {
///     index.set(key, ());
/// }
/// index.set(0, ());
///
/// assert_eq!(index.observer().inserts(), 4);
/// assert_eq!(index.observer().updates(), 1);
/// // Sorted input degenerates into a chain.
/// assert_eq!(index.observer().deepest(), 3);
/// ```
#[derive(Clone, Debug, Default)]
pub struct CountingObserver {
    inserts: Cell<u64>,
    updates: Cell<u64>,
    removes: Cell<u64>,
    traversals: Cell<u64>,
    compares: Cell<u64>,
    deepest: Cell<usize>,
}

impl CountingObserver {
    /// Keys attached so far.
    #[must_use]
    pub fn inserts(&self) -> u64 {
        self.inserts.get()
    }

    /// Values replaced so far.
    #[must_use]
    pub fn updates(&self) -> u64 {
        self.updates.get()
    }

    /// Keys removed so far.
    #[must_use]
    pub fn removes(&self) -> u64 {
        self.removes.get()
    }

    /// Traversals run to completion so far.
    #[must_use]
    pub fn traversals(&self) -> u64 {
        self.traversals.get()
    }

    /// Comparer invocations so far.
    #[must_use]
    pub fn compares(&self) -> u64 {
        self.compares.get()
    }

    /// The greatest depth any insert has attached a key at.
    #[must_use]
    pub fn deepest(&self) -> usize {
        self.deepest.get()
    }

    /// Zeroes every counter.
    pub fn reset(&self) {
        self.inserts.set(0);
        self.updates.set(0);
        self.removes.set(0);
        self.traversals.set(0);
        self.compares.set(0);
        self.deepest.set(0);
    }
}

fn bump(counter: &Cell<u64>) {
    counter.set(counter.get() + 1);
}

impl Observer for CountingObserver {
    fn on_insert(&self, depth: usize) {
        bump(&self.inserts);
        self.deepest.set(self.deepest.get().max(depth));
    }

    fn on_update(&self, _depth: usize) {
        bump(&self.updates);
    }

    fn on_remove(&self, _depth: usize) {
        bump(&self.removes);
    }

    fn on_traversal(&self, _yielded: usize) {
        bump(&self.traversals);
    }

    fn on_compare(&self) {
        bump(&self.compares);
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn counting_observer_resets() {
        let observer = CountingObserver::default();
        observer.on_insert(7);
        observer.on_update(1);
        observer.on_remove(0);
        observer.on_traversal(3);
        observer.on_compare();
        assert_eq!(
            (observer.inserts(), observer.updates(), observer.removes(), observer.traversals()),
            (1, 1, 1, 1)
        );
        assert_eq!(observer.compares(), 1);
        assert_eq!(observer.deepest(), 7);

        observer.reset();
        assert_eq!(observer.inserts(), 0);
        assert_eq!(observer.deepest(), 0);
    }

    #[test]
    fn tracing_observer_without_subscriber() {
        // No subscriber is installed; events must be dropped silently.
        let observer = TracingObserver;
        observer.on_insert(0);
        observer.on_traversal(0);
    }
}

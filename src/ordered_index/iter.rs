use core::fmt;
use core::iter::FusedIterator;

use crate::raw::InOrder;
use crate::{NoopObserver, Observer};

/// An iterator over the keys of an `OrderedIndex`, in ascending order.
///
/// This `struct` is created by the [`keys`] method on [`OrderedIndex`]. See its
/// documentation for more.
///
/// [`keys`]: super::OrderedIndex::keys
/// [`OrderedIndex`]: super::OrderedIndex
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Keys<'a, K, V, O = NoopObserver> {
    inner: InOrder<'a, K, V, O>,
}

/// An iterator over the values of an `OrderedIndex`, in key order.
///
/// This `struct` is created by the [`values`] method on [`OrderedIndex`]. See its
/// documentation for more.
///
/// [`values`]: super::OrderedIndex::values
/// [`OrderedIndex`]: super::OrderedIndex
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Values<'a, K, V, O = NoopObserver> {
    inner: InOrder<'a, K, V, O>,
}

/// An iterator over the entries of an `OrderedIndex`, in key order.
///
/// This `struct` is created by the [`iter`] method on [`OrderedIndex`]. See its
/// documentation for more.
///
/// [`iter`]: super::OrderedIndex::iter
/// [`OrderedIndex`]: super::OrderedIndex
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Iter<'a, K, V, O = NoopObserver> {
    inner: InOrder<'a, K, V, O>,
}

impl<'a, K, V, O> Keys<'a, K, V, O> {
    pub(super) fn new(inner: InOrder<'a, K, V, O>) -> Self {
        Self { inner }
    }
}

impl<'a, K, V, O> Values<'a, K, V, O> {
    pub(super) fn new(inner: InOrder<'a, K, V, O>) -> Self {
        Self { inner }
    }
}

impl<'a, K, V, O> Iter<'a, K, V, O> {
    pub(super) fn new(inner: InOrder<'a, K, V, O>) -> Self {
        Self { inner }
    }
}

impl<'a, K, V, O: Observer> Iterator for Keys<'a, K, V, O> {
    type Item = &'a K;

    fn next(&mut self) -> Option<&'a K> {
        self.inner.next().map(|node| node.key())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<'a, K, V, O: Observer> Iterator for Values<'a, K, V, O> {
    type Item = &'a V;

    fn next(&mut self) -> Option<&'a V> {
        self.inner.next().map(|node| node.value())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<'a, K, V, O: Observer> Iterator for Iter<'a, K, V, O> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<(&'a K, &'a V)> {
        self.inner.next().map(|node| (node.key(), node.value()))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V, O: Observer> ExactSizeIterator for Keys<'_, K, V, O> {}
impl<K, V, O: Observer> ExactSizeIterator for Values<'_, K, V, O> {}
impl<K, V, O: Observer> ExactSizeIterator for Iter<'_, K, V, O> {}

impl<K, V, O: Observer> FusedIterator for Keys<'_, K, V, O> {}
impl<K, V, O: Observer> FusedIterator for Values<'_, K, V, O> {}
impl<K, V, O: Observer> FusedIterator for Iter<'_, K, V, O> {}

impl<K, V, O> Clone for Keys<'_, K, V, O> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<K, V, O> Clone for Values<'_, K, V, O> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<K, V, O> Clone for Iter<'_, K, V, O> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<K: fmt::Debug, V, O: Observer> fmt::Debug for Keys<'_, K, V, O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

impl<K, V: fmt::Debug, O: Observer> fmt::Debug for Values<'_, K, V, O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

impl<K: fmt::Debug, V: fmt::Debug, O: Observer> fmt::Debug for Iter<'_, K, V, O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

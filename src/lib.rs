//! Order-statistic binary search tree index for Rust.
//!
//! This crate provides [`OrderedIndex`], a symbol table mapping unique keys to values that also
//! answers order-statistic queries in O(depth):
//!
//! - [`index_of`](OrderedIndex::index_of) - The zero-based rank of a stored key
//! - [`try_get_by_index`](OrderedIndex::try_get_by_index) - The key at a given sorted position
//! - [`ceil`](OrderedIndex::ceil) / [`floor`](OrderedIndex::floor) - Successor and predecessor lookups
//! - [`try_get_range`](OrderedIndex::try_get_range) - Every key in an inclusive key window
//!
//! # Example
//!
//! ```
//! use ordered_index::{OrderedIndex, Rank};
//!
//! let mut scores = OrderedIndex::new();
//! scores.set("Alice", 100);
//! scores.set("Bob", 85);
//! scores.set("Carol", 92);
//!
//! assert_eq!(scores.try_get_value(&"Bob"), Some(&85));
//! assert_eq!(scores.len(), 3);
//!
//! // Order-statistic operations
//! assert_eq!(scores.try_get_by_index(1), Some(&"Bob"));
//! assert_eq!(scores.index_of(&"Carol"), Ok(2));
//! assert_eq!(scores[Rank(0)], 100);
//! ```
//!
//! # Features
//!
//! - **`no_std` compatible** - Only requires `alloc`
//! - **Pluggable ordering** - Comparison and equality are injected [`Comparer`] and
//!   [`EqualityComparer`] strategies, defaulting to [`Natural`]
//! - **Observable** - An optional [`Observer`] receives insert, remove and traversal events
//!
//! # Implementation
//!
//! The index is a plain, unbalanced binary search tree whose nodes carry the size of the
//! subtree they root. Nodes live in an arena with a free-list and are linked by handles, so a
//! subtree is only ever reachable from its parent.
//!
//! There are no rotations. Inserting keys in sorted order produces a tree of depth O(n), and
//! every operation degrades to linear time with it. All traversals are iterative, so deep trees
//! cost time but never stack.

#![no_std]
#![forbid(unsafe_code)]
#![forbid(keyword_idents)]
#![forbid(non_ascii_idents)]
#![forbid(unreachable_pub)]
#![warn(clippy::all)]
#![warn(clippy::cargo)]
#![warn(clippy::pedantic)]
// Enable coverage attributes for nightly builds.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

extern crate alloc;

mod compare;
mod error;
mod observer;
mod order_statistic;
mod raw;

pub mod ordered_index;

pub use compare::{Comparer, EqualityComparer, FnComparer, FnEquality, Natural, Reversed};
pub use error::IndexError;
pub use observer::{CountingObserver, NoopObserver, Observer, TracingObserver};
pub use order_statistic::Rank;
pub use ordered_index::OrderedIndex;

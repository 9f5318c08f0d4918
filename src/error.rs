use thiserror::Error;

/// Contract violations reported by [`OrderedIndex`](crate::OrderedIndex).
///
/// Every failing call leaves the index exactly as it found it.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Error)]
pub enum IndexError {
    /// The requested key is not stored in the index.
    #[error("key not found")]
    KeyNotFound,
    /// An insert-only operation found the key already present.
    #[error("key already exists")]
    DuplicateKey,
    /// The operation needs at least one entry.
    #[error("collection is empty")]
    EmptyCollection,
}

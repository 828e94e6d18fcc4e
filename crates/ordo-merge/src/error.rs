//! Error types for the merger.

use std::convert::Infallible;

use ordo_types::Side;

/// A key repeated within one snapshot under
/// [`DuplicateKeys::Reject`](crate::DuplicateKeys::Reject).
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("duplicate key {key} in {side} sequence")]
pub struct DuplicateKeyError {
    /// The snapshot containing the repeat.
    pub side: Side,
    /// Debug rendering of the repeated key.
    pub key: String,
}

/// Errors that can occur during a merge.
///
/// `E` is the departure handler's error type; it is [`Infallible`] for plain
/// closures and the built-in handlers.
#[derive(Debug, thiserror::Error)]
pub enum MergeError<E = Infallible> {
    /// A snapshot repeated a key.
    #[error(transparent)]
    DuplicateKey(#[from] DuplicateKeyError),

    /// The departure handler failed. Decisions already made are not undone.
    #[error("departure handler failed at previous index {index}")]
    Departure {
        /// Position in `previous` of the item being decided.
        index: usize,
        /// The handler's own error, unchanged.
        #[source]
        source: E,
    },
}

impl<E> MergeError<E> {
    /// The handler's error, if the handler is what failed.
    pub fn into_departure(self) -> Option<E> {
        match self {
            Self::Departure { source, .. } => Some(source),
            Self::DuplicateKey(_) => None,
        }
    }

    /// The `previous` index at which the handler failed.
    pub fn departure_index(&self) -> Option<usize> {
        match self {
            Self::Departure { index, .. } => Some(*index),
            Self::DuplicateKey(_) => None,
        }
    }
}

/// Convenience alias for merge results.
pub type MergeResult<T, E = Infallible> = Result<T, MergeError<E>>;

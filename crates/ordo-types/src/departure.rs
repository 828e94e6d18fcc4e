//! The decision returned for an item that the next snapshot no longer contains.

use serde::{Deserialize, Serialize};

/// Outcome of a departure decision.
///
/// A departing item is either dropped from the merged order or kept, usually
/// so an exit transition can finish. A retained item takes the departing
/// key's slot, so the substitute should carry the same key.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Departure<T> {
    /// Keep this item in the departing key's slot.
    Retain(T),
    /// Drop the departing key from the merged order.
    Omit,
}

impl<T> Departure<T> {
    /// Returns `true` if the item is kept.
    pub fn is_retained(&self) -> bool {
        matches!(self, Self::Retain(_))
    }

    /// The retained item, if any.
    pub fn into_retained(self) -> Option<T> {
        match self {
            Self::Retain(item) => Some(item),
            Self::Omit => None,
        }
    }
}

impl<T> From<Option<T>> for Departure<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(item) => Self::Retain(item),
            None => Self::Omit,
        }
    }
}

impl<T> From<Departure<T>> for Option<T> {
    fn from(value: Departure<T>) -> Self {
        value.into_retained()
    }
}

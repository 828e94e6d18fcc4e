use std::fmt;
use std::hash::Hash;

use serde::{Deserialize, Serialize};

/// An item that carries a key identifying it within one snapshot.
///
/// Keys must be unique within a single sequence. The same key may appear in
/// both the previous and the next snapshot; that is how the two are matched.
pub trait Keyed {
    /// The identifying key type.
    type Key: Eq + Hash + fmt::Debug;

    /// The item's key.
    fn key(&self) -> &Self::Key;
}

impl Keyed for String {
    type Key = String;

    fn key(&self) -> &String {
        self
    }
}

impl<K, V> Keyed for (K, V)
where
    K: Eq + Hash + fmt::Debug,
{
    type Key = K;

    fn key(&self) -> &K {
        &self.0
    }
}

impl<T: Keyed + ?Sized> Keyed for &T {
    type Key = T::Key;

    fn key(&self) -> &T::Key {
        (**self).key()
    }
}

/// A string-keyed item with an opaque payload.
///
/// The merger never looks at `data`; it is carried through untouched.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyedItem<T> {
    /// Unique key within one snapshot.
    pub key: String,
    /// Opaque payload.
    #[serde(default)]
    pub data: T,
}

impl<T> KeyedItem<T> {
    /// Create an item from a key and payload.
    pub fn new(key: impl Into<String>, data: T) -> Self {
        Self {
            key: key.into(),
            data,
        }
    }
}

impl<T: Default> KeyedItem<T> {
    /// An item with the default payload.
    pub fn bare(key: impl Into<String>) -> Self {
        Self::new(key, T::default())
    }
}

impl<T> Keyed for KeyedItem<T> {
    type Key = String;

    fn key(&self) -> &String {
        &self.key
    }
}

impl<T> fmt::Display for KeyedItem<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.key)
    }
}

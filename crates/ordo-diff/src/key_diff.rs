//! Key-level diff between two snapshots.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use ordo_types::Keyed;

/// How the key set changed between two snapshots.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyDiff<K> {
    /// Keys only in `next`, in `next` order.
    pub entering: Vec<K>,
    /// Keys only in `previous`, in `previous` order.
    pub leaving: Vec<K>,
    /// Keys in both, in `next` order.
    pub persisting: Vec<K>,
    /// Whether the persisting keys changed relative order.
    pub reordered: bool,
}

impl<K> Default for KeyDiff<K> {
    fn default() -> Self {
        Self {
            entering: Vec::new(),
            leaving: Vec::new(),
            persisting: Vec::new(),
            reordered: false,
        }
    }
}

impl<K> KeyDiff<K> {
    /// Create an empty diff.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of entering keys.
    pub fn entries(&self) -> usize {
        self.entering.len()
    }

    /// Number of leaving keys.
    pub fn exits(&self) -> usize {
        self.leaving.len()
    }

    /// Number of keys present in both snapshots.
    pub fn persists(&self) -> usize {
        self.persisting.len()
    }

    /// Returns `true` if both snapshots hold the same keys in the same order.
    pub fn is_unchanged(&self) -> bool {
        self.entering.is_empty() && self.leaving.is_empty() && !self.reordered
    }
}

/// Classify the keys of `previous` and `next`.
pub fn diff_keys<T>(previous: &[T], next: &[T]) -> KeyDiff<T::Key>
where
    T: Keyed,
    T::Key: Clone,
{
    let previous_pos: HashMap<&T::Key, usize> = previous
        .iter()
        .enumerate()
        .map(|(pos, item)| (item.key(), pos))
        .collect();
    let mut in_next: HashSet<&T::Key> = HashSet::with_capacity(next.len());

    let mut diff = KeyDiff::new();
    let mut last_previous_pos = None;

    for item in next {
        let key = item.key();
        in_next.insert(key);
        match previous_pos.get(key) {
            Some(&pos) => {
                if last_previous_pos.is_some_and(|last| pos < last) {
                    diff.reordered = true;
                }
                last_previous_pos = Some(pos);
                diff.persisting.push(key.clone());
            }
            None => diff.entering.push(key.clone()),
        }
    }

    diff.leaving = previous
        .iter()
        .map(Keyed::key)
        .filter(|key| !in_next.contains(key))
        .cloned()
        .collect();

    diff
}

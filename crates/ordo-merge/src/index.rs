//! Key -> position bookkeeping for one snapshot.

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use tracing::warn;

use ordo_types::{Keyed, Side};

use crate::config::DuplicateKeys;
use crate::error::DuplicateKeyError;

/// Maps each key of a snapshot to its zero-based position.
///
/// Built once per merge and dropped with it. Borrows keys from the snapshot.
/// When a key repeats, the last occurrence owns the key; earlier occurrences
/// are not indexed and the merger skips them.
#[derive(Debug)]
pub(crate) struct KeyIndex<'a, K> {
    positions: HashMap<&'a K, usize>,
}

impl<'a, K> KeyIndex<'a, K>
where
    K: Eq + std::hash::Hash + std::fmt::Debug,
{
    /// Build according to `policy`.
    pub(crate) fn build<T>(
        items: &'a [T],
        side: Side,
        policy: DuplicateKeys,
    ) -> Result<Self, DuplicateKeyError>
    where
        T: Keyed<Key = K>,
    {
        match policy {
            DuplicateKeys::LastWins => Ok(Self::last_wins(items, side)),
            DuplicateKeys::Reject => Self::unique(items, side),
        }
    }

    /// Index where a repeated key points at its last occurrence.
    pub(crate) fn last_wins<T>(items: &'a [T], side: Side) -> Self
    where
        T: Keyed<Key = K>,
    {
        let mut positions = HashMap::with_capacity(items.len());
        for (pos, item) in items.iter().enumerate() {
            let key = item.key();
            if let Some(earlier) = positions.insert(key, pos) {
                warn!(%side, ?key, earlier, pos, "duplicate key; keeping last occurrence");
            }
        }
        Self { positions }
    }

    /// Index that fails on the first repeated key.
    pub(crate) fn unique<T>(items: &'a [T], side: Side) -> Result<Self, DuplicateKeyError>
    where
        T: Keyed<Key = K>,
    {
        let mut positions = HashMap::with_capacity(items.len());
        for (pos, item) in items.iter().enumerate() {
            match positions.entry(item.key()) {
                Entry::Occupied(entry) => {
                    return Err(DuplicateKeyError {
                        side,
                        key: format!("{:?}", entry.key()),
                    });
                }
                Entry::Vacant(entry) => {
                    entry.insert(pos);
                }
            }
        }
        Ok(Self { positions })
    }

    /// Position of `key`, if present.
    pub(crate) fn position(&self, key: &K) -> Option<usize> {
        self.positions.get(key).copied()
    }

    pub(crate) fn contains(&self, key: &K) -> bool {
        self.positions.contains_key(key)
    }

    /// Whether the item at `pos` is the indexed occurrence of `key`.
    pub(crate) fn owns(&self, key: &K, pos: usize) -> bool {
        self.position(key) == Some(pos)
    }

    pub(crate) fn len(&self) -> usize {
        self.positions.len()
    }
}

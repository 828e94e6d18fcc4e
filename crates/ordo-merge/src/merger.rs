//! The merge entry points.

use std::convert::Infallible;

use tracing::{debug, trace};

use ordo_types::{Departure, Keyed, Side};

use crate::config::{MergeConfig, TieBreak};
use crate::error::{MergeError, MergeResult};
use crate::handler::DepartureHandler;
use crate::index::KeyIndex;
use crate::order::{Anchor, OrderContext, Slot};

/// Merge `previous` and `next` with the default [`MergeConfig`].
///
/// `on_departure` is called once per key in `previous` that `next` lacks, in
/// `previous` order, with the item's index in `previous`. Neither input is
/// modified; the result owns clones of the carried items.
///
/// ```
/// use ordo_merge::{merge, Departure};
///
/// let previous = vec!["a".to_string(), "b".to_string()];
/// let next = vec!["c".to_string(), "b".to_string(), "d".to_string()];
/// let merged = merge(&previous, &next, |_, item: &String| Departure::Retain(item.clone()));
/// assert_eq!(merged, ["a", "c", "b", "d"]);
/// ```
pub fn merge<T, F>(previous: &[T], next: &[T], mut on_departure: F) -> Vec<T>
where
    T: Keyed + Clone,
    F: FnMut(usize, &T) -> Departure<T>,
{
    let previous_index = KeyIndex::last_wins(previous, Side::Previous);
    let next_index = KeyIndex::last_wins(next, Side::Next);
    let merged: Result<Vec<T>, (usize, Infallible)> = merge_indexed(
        previous,
        next,
        &previous_index,
        &next_index,
        TieBreak::default(),
        &mut on_departure,
    );
    match merged {
        Ok(merged) => merged,
        Err((_, never)) => match never {},
    }
}

/// A configured merger.
#[derive(Clone, Copy, Debug, Default)]
pub struct Merger {
    config: MergeConfig,
}

impl Merger {
    /// Create a merger with the given configuration.
    pub fn new(config: MergeConfig) -> Self {
        Self { config }
    }

    /// The active configuration.
    pub fn config(&self) -> &MergeConfig {
        &self.config
    }

    /// Merge `previous` and `next`, consulting `handler` for departing items.
    ///
    /// Fails with [`MergeError::DuplicateKey`] under
    /// [`DuplicateKeys::Reject`](crate::DuplicateKeys::Reject) before the
    /// handler is consulted, or with [`MergeError::Departure`] as soon as the
    /// handler fails. No partial result is returned.
    pub fn merge<T, H>(
        &self,
        previous: &[T],
        next: &[T],
        mut handler: H,
    ) -> MergeResult<Vec<T>, H::Error>
    where
        T: Keyed + Clone,
        H: DepartureHandler<T>,
    {
        let previous_index = KeyIndex::build(previous, Side::Previous, self.config.duplicate_keys)?;
        let next_index = KeyIndex::build(next, Side::Next, self.config.duplicate_keys)?;
        merge_indexed(
            previous,
            next,
            &previous_index,
            &next_index,
            self.config.tie_break,
            &mut handler,
        )
        .map_err(|(index, source)| MergeError::Departure { index, source })
    }
}

/// The merge proper, over prebuilt indexes.
///
/// On handler failure returns the failing `previous` index with the error.
fn merge_indexed<T, H>(
    previous: &[T],
    next: &[T],
    previous_index: &KeyIndex<'_, T::Key>,
    next_index: &KeyIndex<'_, T::Key>,
    tie_break: TieBreak,
    handler: &mut H,
) -> Result<Vec<T>, (usize, H::Error)>
where
    T: Keyed + Clone,
    H: DepartureHandler<T>,
{
    let mut arriving = Vec::with_capacity(next.len());
    let mut anchors = Vec::with_capacity(previous_index.len().min(next_index.len()));
    for (pos, item) in next.iter().enumerate() {
        let key = item.key();
        if !next_index.owns(key, pos) {
            continue;
        }
        let previous_pos = previous_index.position(key);
        if let Some(previous_pos) = previous_pos {
            anchors.push(Anchor {
                next: pos,
                previous: previous_pos,
            });
        }
        let slot = Slot::Arriving {
            next: pos,
            previous: previous_pos,
        };
        arriving.push((slot, item.clone()));
    }

    let mut departing = Vec::new();
    let mut omitted = 0usize;
    for (pos, item) in previous.iter().enumerate() {
        let key = item.key();
        if next_index.contains(key) || !previous_index.owns(key, pos) {
            continue;
        }
        match handler.on_departure(pos, item).map_err(|e| (pos, e))? {
            Departure::Retain(kept) => {
                trace!(index = pos, ?key, "retaining departing item");
                departing.push((Slot::Departing { previous: pos }, kept));
            }
            Departure::Omit => {
                trace!(index = pos, ?key, "omitting departing item");
                omitted += 1;
            }
        }
    }

    let retained = departing.len();
    let order = OrderContext::new(anchors, tie_break);
    let merged = order.merge_runs(arriving, departing);

    debug!(
        previous = previous.len(),
        next = next.len(),
        anchors = order.anchor_count(),
        retained,
        omitted,
        merged = merged.len(),
        "merged keyed snapshots"
    );

    Ok(merged)
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;
    use crate::config::DuplicateKeys;
    use crate::handler::{fallible, OmitAll, RetainAll, RetainKeys};
    use ordo_types::KeyedItem;

    fn keys(list: &[&str]) -> Vec<String> {
        list.iter().map(|k| k.to_string()).collect()
    }

    fn retain(_: usize, item: &String) -> Departure<String> {
        Departure::Retain(item.clone())
    }

    fn omit(_: usize, _: &String) -> Departure<String> {
        Departure::Omit
    }

    fn arriving_first() -> Merger {
        Merger::new(MergeConfig::default().with_tie_break(TieBreak::ArrivingFirst))
    }

    // ----------------------------------------------------------
    // Reference scenarios
    // ----------------------------------------------------------

    #[test]
    fn identical_input_is_unchanged() {
        let s = keys(&["a", "b", "c"]);
        let calls = RefCell::new(0);
        let merged = merge(&s, &s, |_, item: &String| {
            *calls.borrow_mut() += 1;
            Departure::Retain(item.clone())
        });
        assert_eq!(merged, s);
        assert_eq!(*calls.borrow(), 0);
    }

    #[test]
    fn omitted_departure_is_dropped() {
        let merged = merge(&keys(&["a", "b"]), &keys(&["c", "b", "d"]), omit);
        assert_eq!(merged, keys(&["c", "b", "d"]));
    }

    #[test]
    fn retained_departure_goes_before_unanchored_arrival() {
        let merged = merge(&keys(&["a", "b"]), &keys(&["c", "b", "d"]), retain);
        assert_eq!(merged, keys(&["a", "c", "b", "d"]));
    }

    #[test]
    fn arriving_first_places_arrival_before_departure() {
        let merged = arriving_first()
            .merge(&keys(&["a", "b"]), &keys(&["c", "b", "d"]), RetainAll)
            .unwrap();
        assert_eq!(merged, keys(&["c", "a", "b", "d"]));
    }

    #[test]
    fn no_shared_anchor_uses_tie_break() {
        let previous = keys(&["a"]);
        let next = keys(&["c"]);
        assert_eq!(merge(&previous, &next, retain), keys(&["a", "c"]));
        assert_eq!(
            arriving_first().merge(&previous, &next, RetainAll).unwrap(),
            keys(&["c", "a"])
        );
    }

    #[test]
    fn empty_previous() {
        let calls = RefCell::new(0);
        let merged = merge(&[], &keys(&["x", "y"]), |_, item: &String| {
            *calls.borrow_mut() += 1;
            Departure::Retain(item.clone())
        });
        assert_eq!(merged, keys(&["x", "y"]));
        assert_eq!(*calls.borrow(), 0);
    }

    #[test]
    fn empty_next_keeps_previous_order() {
        let mut seen = Vec::new();
        let merged = merge(&keys(&["x", "y"]), &[], |index, item: &String| {
            seen.push((index, item.clone()));
            Departure::Retain(item.clone())
        });
        assert_eq!(merged, keys(&["x", "y"]));
        assert_eq!(seen, vec![(0, "x".to_string()), (1, "y".to_string())]);
    }

    #[test]
    fn both_empty() {
        let merged: Vec<String> = merge(&[], &[], retain);
        assert!(merged.is_empty());
    }

    // ----------------------------------------------------------
    // Anchor-driven placement
    // ----------------------------------------------------------

    #[test]
    fn departure_stays_between_its_neighbours() {
        // b leaves from between a and c while x arrives at the end.
        let merged = merge(&keys(&["a", "b", "c"]), &keys(&["a", "c", "x"]), retain);
        assert_eq!(merged, keys(&["a", "b", "c", "x"]));
    }

    #[test]
    fn arrival_before_anchor_precedes_departure_after_it() {
        // previous = [b, a], next = [c, b]: c before b, a after b.
        let merged = merge(&keys(&["b", "a"]), &keys(&["c", "b"]), retain);
        assert_eq!(merged, keys(&["c", "b", "a"]));
    }

    #[test]
    fn departures_keep_previous_relative_order() {
        let merged = merge(&keys(&["p", "q", "m", "r"]), &keys(&["m"]), retain);
        assert_eq!(merged, keys(&["p", "q", "m", "r"]));
    }

    #[test]
    fn substitute_takes_departing_slot() {
        let previous = vec![KeyedItem::new("a", 1), KeyedItem::new("b", 2)];
        let next = vec![KeyedItem::new("b", 20)];
        let merged = merge(&previous, &next, |_, item: &KeyedItem<i32>| {
            Departure::Retain(KeyedItem::new(item.key.clone(), -item.data))
        });
        assert_eq!(merged, vec![KeyedItem::new("a", -1), KeyedItem::new("b", 20)]);
    }

    #[test]
    fn substitute_with_foreign_key_keeps_original_slot() {
        let merged = merge(&keys(&["a", "b"]), &keys(&["b"]), |_, _: &String| {
            Departure::Retain("zz".to_string())
        });
        assert_eq!(merged, keys(&["zz", "b"]));
    }

    #[test]
    fn reordered_anchors_still_preserve_each_snapshot() {
        // x and y swap while p leaves from between them. The pairwise relation
        // is cyclic here (y < x by next, x < p < y by previous); next order and
        // departure order are still respected.
        let merged = merge(&keys(&["x", "p", "y"]), &keys(&["y", "x"]), retain);
        assert_eq!(merged, keys(&["p", "y", "x"]));
    }

    // ----------------------------------------------------------
    // Handlers and errors
    // ----------------------------------------------------------

    #[test]
    fn handler_sees_only_departures_in_previous_order() {
        let mut seen = Vec::new();
        let merged = Merger::default()
            .merge(
                &keys(&["a", "b", "c", "d"]),
                &keys(&["d", "b"]),
                |index: usize, item: &String| -> Departure<String> {
                    seen.push((index, item.clone()));
                    Departure::Omit
                },
            )
            .unwrap();
        assert_eq!(merged, keys(&["d", "b"]));
        assert_eq!(seen, vec![(0, "a".to_string()), (2, "c".to_string())]);
    }

    #[test]
    fn retain_keys_handler() {
        let merged = Merger::default()
            .merge(
                &keys(&["a", "b", "c"]),
                &keys(&["b"]),
                RetainKeys::new(["c".to_string()]),
            )
            .unwrap();
        assert_eq!(merged, keys(&["b", "c"]));
    }

    #[test]
    fn omit_all_handler() {
        let merged = Merger::default()
            .merge(&keys(&["a", "b"]), &keys(&["b"]), OmitAll)
            .unwrap();
        assert_eq!(merged, keys(&["b"]));
    }

    #[test]
    fn handler_error_aborts_after_earlier_decisions() {
        let mut seen = Vec::new();
        let err = Merger::default()
            .merge(
                &keys(&["a", "b", "c"]),
                &keys(&["x"]),
                fallible(|index: usize, item: &String| {
                    seen.push(index);
                    if item == "b" {
                        Err("exit animation refused")
                    } else {
                        Ok(Departure::Retain(item.clone()))
                    }
                }),
            )
            .unwrap_err();
        assert_eq!(err.departure_index(), Some(1));
        assert_eq!(err.into_departure(), Some("exit animation refused"));
        assert_eq!(seen, vec![0, 1]);
    }

    #[test]
    fn reject_policy_reports_duplicate_before_handler_runs() {
        let merger = Merger::new(MergeConfig::default().with_duplicate_keys(DuplicateKeys::Reject));
        let mut called = false;
        let err = merger
            .merge(&keys(&["a", "b", "a"]), &keys(&["c"]), |_: usize, item: &String| {
                called = true;
                Departure::Retain(item.clone())
            })
            .unwrap_err();
        match err {
            MergeError::DuplicateKey(dup) => assert_eq!(dup.side, Side::Previous),
            other => panic!("expected DuplicateKey, got {other:?}"),
        }
        assert!(!called);
    }

    #[test]
    fn reject_policy_checks_next_too() {
        let merger = Merger::new(MergeConfig::default().with_duplicate_keys(DuplicateKeys::Reject));
        let err = merger.merge(&keys(&["a"]), &keys(&["b", "b"]), RetainAll).unwrap_err();
        assert!(matches!(err, MergeError::DuplicateKey(ref d) if d.side == Side::Next));
        assert!(err.into_departure().is_none());
    }

    #[test]
    fn last_wins_skips_earlier_duplicates() {
        let mut seen = Vec::new();
        let merged = merge(&keys(&["a", "b", "a"]), &keys(&["b"]), |index, item: &String| {
            seen.push(index);
            Departure::Retain(item.clone())
        });
        assert_eq!(merged, keys(&["b", "a"]));
        assert_eq!(seen, vec![2]);

        let merged = merge(&keys(&[]), &keys(&["a", "b", "a"]), retain);
        assert_eq!(merged, keys(&["b", "a"]));
    }

    #[test]
    fn config_accessor() {
        let merger = arriving_first();
        assert_eq!(merger.config().tie_break, TieBreak::ArrivingFirst);
    }
}

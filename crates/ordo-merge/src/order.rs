//! Pairwise ordering of the union and the run merge built on it.
//!
//! Every item of the union occupies a [`Slot`]: arriving items (present in
//! `next`) know their `next` position and, if they are also in `previous`,
//! their `previous` position; departing items know only their `previous`
//! position. [`OrderContext::compare`] orders two slots:
//!
//! 1. both in `next`: by `next` position;
//! 2. both in `previous`: by `previous` position;
//! 3. one next-only, one previous-only: the first anchor in `next` that
//!    brackets the pair decides, otherwise the [`TieBreak`] does.
//!
//! # Invariants
//!
//! - Arriving slots arrive in `next` order and departing slots in `previous`
//!   order, so each run is already sorted under cases 1 and 2.
//! - [`OrderContext::merge_runs`] only interleaves the two runs, so the
//!   relative order inside each run survives even when the pairwise relation
//!   is not transitive.

use std::cmp::Ordering;

use crate::config::TieBreak;

/// Ordering facts about one member of the union.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Slot {
    /// Present in `next`; `previous` is set when the key is also an anchor.
    Arriving {
        next: usize,
        previous: Option<usize>,
    },
    /// Present only in `previous`, retained by the departure handler.
    Departing { previous: usize },
}

/// A key present in both snapshots.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Anchor {
    pub(crate) next: usize,
    pub(crate) previous: usize,
}

/// Anchors (in `next` order) plus the tie-break convention.
#[derive(Debug)]
pub(crate) struct OrderContext {
    anchors: Vec<Anchor>,
    tie_break: TieBreak,
}

impl OrderContext {
    /// `anchors` must be in ascending `next` position.
    pub(crate) fn new(anchors: Vec<Anchor>, tie_break: TieBreak) -> Self {
        debug_assert!(anchors.windows(2).all(|w| w[0].next < w[1].next));
        Self { anchors, tie_break }
    }

    pub(crate) fn anchor_count(&self) -> usize {
        self.anchors.len()
    }

    /// Order two distinct slots of the union.
    pub(crate) fn compare(&self, a: Slot, b: Slot) -> Ordering {
        match (a, b) {
            (Slot::Arriving { next: x, .. }, Slot::Arriving { next: y, .. }) => x.cmp(&y),
            (Slot::Departing { previous: x }, Slot::Departing { previous: y }) => x.cmp(&y),
            (
                Slot::Arriving {
                    previous: Some(x), ..
                },
                Slot::Departing { previous: y },
            ) => x.cmp(&y),
            (
                Slot::Departing { previous: x },
                Slot::Arriving {
                    previous: Some(y), ..
                },
            ) => x.cmp(&y),
            (
                Slot::Arriving {
                    next,
                    previous: None,
                },
                Slot::Departing { previous },
            ) => self.resolve(next, previous),
            (
                Slot::Departing { previous },
                Slot::Arriving {
                    next,
                    previous: None,
                },
            ) => self.resolve(next, previous).reverse(),
        }
    }

    /// Order of a next-only item at `next_pos` against a previous-only item
    /// at `previous_pos`.
    ///
    /// Scans anchors in `next` order; the first one that sits between the
    /// two items in both snapshots decides.
    fn resolve(&self, next_pos: usize, previous_pos: usize) -> Ordering {
        for anchor in &self.anchors {
            if next_pos < anchor.next && previous_pos > anchor.previous {
                return Ordering::Less;
            }
            if next_pos > anchor.next && previous_pos < anchor.previous {
                return Ordering::Greater;
            }
        }
        self.tie_break.arriving_order()
    }

    /// Interleave the arriving run with the departing run.
    ///
    /// Both runs must already be sorted (see the module invariants). On a tie
    /// the arriving item goes first; distinct slots never tie in practice.
    pub(crate) fn merge_runs<T>(
        &self,
        arriving: Vec<(Slot, T)>,
        departing: Vec<(Slot, T)>,
    ) -> Vec<T> {
        let mut merged = Vec::with_capacity(arriving.len() + departing.len());
        let mut arriving = arriving.into_iter().peekable();
        let mut departing = departing.into_iter().peekable();

        loop {
            let take_departing = match (arriving.peek(), departing.peek()) {
                (Some((a, _)), Some((d, _))) => self.compare(*d, *a) == Ordering::Less,
                (Some(_), None) => false,
                (None, Some(_)) => true,
                (None, None) => break,
            };
            let taken = if take_departing {
                departing.next()
            } else {
                arriving.next()
            };
            if let Some((_, item)) = taken {
                merged.push(item);
            }
        }

        merged
    }
}

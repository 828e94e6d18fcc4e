//! Departure decisions.
//!
//! A [`DepartureHandler`] is consulted once for each key present in
//! `previous` but absent from `next`, in `previous` order, before any
//! ordering work starts. Plain closures `FnMut(usize, &T) -> Departure<T>`
//! are handlers; [`fallible`] adapts closures that can fail.

use std::collections::HashSet;
use std::convert::Infallible;
use std::hash::Hash;

use ordo_types::{Departure, Keyed};

/// Decides whether a departing item stays in the merged order.
pub trait DepartureHandler<T> {
    /// Error raised by the handler. Aborts the merge.
    type Error;

    /// Decide the fate of `item`, found at `index` in `previous`.
    ///
    /// A retained substitute occupies the departing key's slot.
    fn on_departure(&mut self, index: usize, item: &T) -> Result<Departure<T>, Self::Error>;
}

impl<T, F> DepartureHandler<T> for F
where
    F: FnMut(usize, &T) -> Departure<T>,
{
    type Error = Infallible;

    fn on_departure(&mut self, index: usize, item: &T) -> Result<Departure<T>, Infallible> {
        Ok(self(index, item))
    }
}

/// Handler wrapping a closure that returns a `Result`. See [`fallible`].
#[derive(Clone, Debug)]
pub struct Fallible<F>(F);

/// Adapt a fallible closure into a [`DepartureHandler`].
pub fn fallible<T, E, F>(f: F) -> Fallible<F>
where
    F: FnMut(usize, &T) -> Result<Departure<T>, E>,
{
    Fallible(f)
}

impl<T, E, F> DepartureHandler<T> for Fallible<F>
where
    F: FnMut(usize, &T) -> Result<Departure<T>, E>,
{
    type Error = E;

    fn on_departure(&mut self, index: usize, item: &T) -> Result<Departure<T>, E> {
        (self.0)(index, item)
    }
}

/// Drop every departing item.
#[derive(Clone, Copy, Debug, Default)]
pub struct OmitAll;

impl<T> DepartureHandler<T> for OmitAll {
    type Error = Infallible;

    fn on_departure(&mut self, _index: usize, _item: &T) -> Result<Departure<T>, Infallible> {
        Ok(Departure::Omit)
    }
}

/// Keep every departing item as it was.
#[derive(Clone, Copy, Debug, Default)]
pub struct RetainAll;

impl<T: Clone> DepartureHandler<T> for RetainAll {
    type Error = Infallible;

    fn on_departure(&mut self, _index: usize, item: &T) -> Result<Departure<T>, Infallible> {
        Ok(Departure::Retain(item.clone()))
    }
}

/// Keep departing items whose key is in the set; drop the rest.
#[derive(Clone, Debug)]
pub struct RetainKeys<K> {
    keys: HashSet<K>,
}

impl<K: Eq + Hash> RetainKeys<K> {
    /// Retain exactly the given keys.
    pub fn new(keys: impl IntoIterator<Item = K>) -> Self {
        Self {
            keys: keys.into_iter().collect(),
        }
    }
}

impl<K, T> DepartureHandler<T> for RetainKeys<K>
where
    K: Eq + Hash,
    T: Keyed<Key = K> + Clone,
{
    type Error = Infallible;

    fn on_departure(&mut self, _index: usize, item: &T) -> Result<Departure<T>, Infallible> {
        if self.keys.contains(item.key()) {
            Ok(Departure::Retain(item.clone()))
        } else {
            Ok(Departure::Omit)
        }
    }
}

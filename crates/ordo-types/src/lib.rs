//! Foundation types for Ordo.
//!
//! Ordo merges two keyed snapshots of a list (the order that was rendered last
//! frame and the order wanted next frame) into one order that respects both.
//! This crate holds the vocabulary shared by every other Ordo crate.
//!
//! # Key Types
//!
//! - [`Keyed`] -- Anything that exposes a unique, hashable key
//! - [`KeyedItem`] -- A string key paired with an opaque payload
//! - [`Departure`] -- What to do with an item the next snapshot drops
//! - [`Side`] -- Which of the two snapshots a value belongs to

pub mod departure;
pub mod keyed;
pub mod side;

pub use departure::Departure;
pub use keyed::{Keyed, KeyedItem};
pub use side::Side;

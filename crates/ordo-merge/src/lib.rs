//! Partial-order list merger for Ordo.
//!
//! Given the order rendered on the previous frame and the order desired for
//! the next one, [`merge`] produces a single order that keeps every relative
//! ordering visible in `next`, keeps the relative order of departing items as
//! they were in `previous`, and resolves pairs that neither snapshot orders by
//! searching `next` for an anchor key shared by both snapshots.
//!
//! Departing items (present in `previous`, absent from `next`) are offered to
//! a [`DepartureHandler`], which may keep them around (for an exit transition)
//! or drop them.
//!
//! # Key Types
//!
//! - [`Merger`] / [`MergeConfig`] -- Configured merge entry point
//! - [`TieBreak`] -- Convention for pairs with no ordering evidence
//! - [`DuplicateKeys`] -- Policy for repeated keys within one snapshot
//! - [`DepartureHandler`] -- Decides the fate of departing items
//! - [`MergeError`] -- Duplicate keys or a failed departure decision

pub mod config;
pub mod error;
pub mod handler;
mod index;
pub mod merger;
mod order;

pub use config::{DuplicateKeys, MergeConfig, TieBreak};
pub use error::{DuplicateKeyError, MergeError, MergeResult};
pub use handler::{fallible, DepartureHandler, Fallible, OmitAll, RetainAll, RetainKeys};
pub use merger::{merge, Merger};
pub use ordo_types::{Departure, Keyed, KeyedItem, Side};

//! Key transition classification for Ordo.
//!
//! Compares the keys of two snapshots and reports which keys are entering,
//! leaving, and persisting. An animation driver uses this alongside the merge
//! to start enter and exit transitions.
//!
//! # Key Types
//!
//! - [`KeyDiff`] -- Entering / leaving / persisting keys

pub mod key_diff;

pub use key_diff::{diff_keys, KeyDiff};

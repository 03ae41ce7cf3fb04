//! # veb-set
//!
//! Ordered integer set over a fixed universe [0, 2^num_bits), built as a
//! recursive universe-splitting (van Emde Boas) tree.
//!
//! ## Features
//! - O(log log U) insert, remove, contains — independent of element count
//! - O(1) min/max via hoisted extrema at every node
//! - Lazy allocation: clusters and the auxiliary index are created on demand
//! - no_std compatible (requires alloc)
//!
//! ## Companions
//! - [`SplayTreeSet`]: generic comparable-key ordered set with the same
//!   {insert, remove, contains, len} surface, for keys that are not small
//!   bounded integers. Amortized O(log n), not universe-bounded.
//! - [`array`]: stateless slice utilities (shuffle, sorts, permutations) used
//!   to generate and verify test data.

#![no_std]

extern crate alloc;

#[cfg(test)]
extern crate std;

pub mod array;
mod splay;
mod split;
mod veb;

pub use splay::SplayTreeSet;
pub use veb::{VebError, VebSet};

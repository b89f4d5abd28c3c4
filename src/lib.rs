//! Order-statistic red-black tree collections for Rust.
//!
//! This crate provides [`OSRBTree`], an ordered multimap implemented as a
//! red-black tree with subtree-size augmentation. On top of the usual
//! O(log n) insert, remove, and search, the augmentation buys two extra
//! O(log n) order-statistic operations:
//!
//! - [`select`](OSRBTree::select) - the key at a given one-based position in
//!   sorted order
//! - [`rank`](OSRBTree::rank) - the one-based sorted position of a key
//!
//! # Example
//!
//! ```
//! use osrb_tree::OSRBTree;
//!
//! let mut scores = OSRBTree::new();
//! scores.insert("Alice", 100);
//! scores.insert("Bob", 85);
//! scores.insert("Carol", 92);
//!
//! // Ordinary ordered-map operations.
//! assert_eq!(scores.get(&"Bob"), Some(&85));
//! assert_eq!(scores.len(), 3);
//!
//! // Order-statistic operations (O(log n)).
//! assert_eq!(scores.select(2), Ok((&"Bob", &85))); // second key alphabetically
//! assert_eq!(scores.rank(&"Carol"), Ok(3));
//!
//! // Ordered traversal.
//! let keys: Vec<_> = scores.keys().collect();
//! assert_eq!(keys, [&"Alice", &"Bob", &"Carol"]);
//! ```
//!
//! Duplicate keys are permitted; each `insert` adds another entry, and ties
//! descend into the right subtree. `rank` and `select` count every entry
//! individually, so with duplicates a key's rank is the position of the
//! particular occurrence the search lands on.
//!
//! # Companion containers
//!
//! Three smaller, independent containers ship alongside the tree:
//!
//! - [`CircularArray`] - a growable circular buffer with O(1) indexed access
//!   and amortized O(1) insertion and removal at both ends
//! - [`MinHeap`] - a binary min-heap backed by [`CircularArray`]
//! - [`BinomialHeap`] - a binomial min-heap with forest-merge ([`meld`])
//!   semantics
//!
//! [`meld`]: BinomialHeap::meld
//!
//! # Features
//!
//! - **`no_std` compatible** - only requires `alloc`, no standard library
//!   dependency
//! - **No unsafe code** - nodes live in an arena and refer to each other by
//!   index-like handles instead of pointers
//! - **Single-threaded** - a tree instance owns its nodes exclusively and
//!   carries no internal lock; sharing one instance across threads must be
//!   serialized by the caller
//!
//! # Implementation
//!
//! The tree is a classic red-black tree where every node additionally tracks
//! the number of entries in its subtree. Rotations touch only the two nodes
//! they reorder, descents adjust sizes along the path they walk, and the
//! rank/select descents read the stored sizes instead of counting.

#![no_std]
// These forbid rules and lint groups are meant to be very restrictive.
#![forbid(unsafe_code)]
#![forbid(keyword_idents)]
#![forbid(non_ascii_idents)]
#![forbid(unreachable_pub)]
#![warn(clippy::all)]
#![warn(clippy::cargo)]
#![warn(clippy::pedantic)]
// Enable coverage attributes for nightly builds.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

extern crate alloc;

mod error;
mod order_statistic;
mod raw;

pub mod binomial_heap;
pub mod circular_array;
pub mod min_heap;
pub mod osrb_tree;

pub use binomial_heap::BinomialHeap;
pub use circular_array::CircularArray;
pub use error::Error;
pub use min_heap::MinHeap;
pub use order_statistic::Rank;
pub use osrb_tree::OSRBTree;

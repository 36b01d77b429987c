//! robin-map: a string-keyed, integer-valued hash table using open
//! addressing with Robin Hood displacement and backward-shift deletion.
//!
//! Internal Design:
//!
//! Summary
//! - Goal: a small table whose probe chains stay short and whose deletion
//!   never degrades lookups over time.
//! - Layers:
//!   - `hasher`: unseeded polynomial hash (`h * 31 + byte`) and home index.
//!   - `slots`: fixed-capacity array of typed slots, each empty or holding
//!     `(key, value, displacement)`; fallible allocation.
//!   - `RobinMap`: lookup, insertion, deletion and growth on top of `slots`.
//!   - `protocol`: line-oriented command harness used by the binaries.
//!
//! Invariants
//! - For every occupied slot, `displacement == (index - home) mod capacity`.
//!   Operations may break this transiently; it holds whenever they return.
//! - `len / capacity < MAX_LOAD_FACTOR` after every insertion, so at least
//!   one slot is always empty and every probe loop terminates.
//! - No deleted markers: a slot is either empty or holds a live entry.
//!
//! Lookup
//! - Probe from the home index. Give up at an empty slot, or as soon as the
//!   resident's displacement is smaller than the probe length.
//!
//! Insertion
//! - Updates overwrite in place. A new key first grows the table (doubling)
//!   if it would reach the load-factor threshold, then walks from home; a
//!   resident with a smaller displacement than the travelling entry is
//!   swapped out and carried onward.
//!
//! Deletion
//! - Backward shift: successors with non-zero displacement move back one
//!   slot until an empty slot or an entry at its home index is reached.
//!
//! Ownership and borrowing
//! - Keys are copied into the table (`Box<str>`); callers keep their own.
//! - `put` and `get_mut` hand out `&mut Value` borrowed from the table, so
//!   the compiler rules out holding one across a call that could grow it.
//!
//! Concurrency
//! - Single-threaded. `RobinMap` has no interior mutability; share it across
//!   threads behind a lock.

mod error;
mod hasher;
pub mod protocol;
mod robin_map;
mod robin_map_proptest;
mod slots;

/// Value type stored in the table.
pub type Value = i64;

// Public surface
pub use error::Error;
pub use hasher::hash;
pub use robin_map::{Iter, RobinMap, DEFAULT_CAPACITY, MAX_LOAD_FACTOR, MIN_CAPACITY};
pub use slots::SlotView;

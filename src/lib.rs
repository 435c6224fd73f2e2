//! chained-hashmap: A single-threaded, string-keyed map built as a chained
//! hash table with growth through a fixed schedule of prime capacities.
//!
//! Internal Design:
//!
//! Summary
//! - Goal: a small associative container with fully explicit collision
//!   handling and growth, in safe, verifiable layers so each piece can be
//!   reasoned about independently.
//! - Layers:
//!   - hash: the deterministic multiplicative string hash
//!     (`h = h * 65599 + byte`, wrapping) reduced to a bucket index.
//!   - capacity: the fixed ascending prime schedule (509 .. 65521) that the
//!     bucket-array length steps through.
//!   - ChainedMap<V>: the container. Bindings live in a `slotmap` arena;
//!     each bucket holds the head of a singly linked chain threaded through
//!     arena keys.
//!
//! Constraints
//! - Single-threaded: a plain owned value, all mutation through `&mut self`.
//! - Keys are defensively copied on insert; the map never aliases
//!   caller-owned key memory.
//! - Values are opaque: never cloned, inspected, or fabricated, handed back
//!   exactly once or dropped with the map.
//! - Unique keys; duplicate inserts fail and return the value.
//! - O(1) expected operations; growth keeps the load factor at or below 1.0
//!   until the schedule runs out, after which chains lengthen unbounded.
//!
//! Why this split?
//! - Localize invariants: the hash and the schedule are pure data/functions
//!   with their own tests; all linking discipline sits in one module.
//! - Minimize unsafe: there is none. Chains are `Option<DefaultKey>` links
//!   into the arena, so rehashing is safe relinking; no binding or key is
//!   reallocated when the table grows, and teardown is ordinary drop glue.
//!
//! Growth
//! - Inserting a binding that would push the count past the bucket count
//!   first relinks every node into a bucket array at the next scheduled
//!   capacity, then inserts under the new capacity. Callers observe either
//!   the fully-grown-and-inserted state or (on a rejected duplicate) no
//!   change at all; no partially-rehashed state is ever visible.
//!
//! Traversal
//! - `for_each`/`for_each_mut` walk buckets then chains; `iter`/`iter_mut`
//!   walk the arena. No order is part of the contract. Structural mutation
//!   during traversal is unrepresentable: the map stays borrowed for the
//!   duration.
//!
//! Notes and non-goals
//! - Not thread-safe and not internally synchronized; share-and-serialize is
//!   the caller's problem, by design.
//! - No shrinking: the capacity index never decreases, removals only shorten
//!   chains.
//! - Chain order (newest-first) is an implementation detail, not a contract.
//! - A `cfg(test)`-only linked-list baseline (`list_map`) with the same
//!   interface serves as the oracle in property tests; it is not part of the
//!   public surface.

mod capacity;
mod chained_map;
mod chained_map_proptest;
mod hash;
mod list_map;

// Public surface
pub use chained_map::{ChainedMap, InsertError, Iter, IterMut};

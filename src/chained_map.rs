//! ChainedMap: string-keyed map with separate chaining and scheduled growth.

use crate::capacity;
use crate::hash;
use core::fmt;
use core::mem;
use slotmap::{DefaultKey, SlotMap};

/// One key -> value binding. Nodes live in the map's arena; chains link
/// through arena keys, so growth can relink a node without moving it.
#[derive(Debug)]
struct Binding<V> {
    key: Box<str>,
    value: V,
    next: Option<DefaultKey>,
}

/// A mutable associative container from unique string keys to values of `V`,
/// built as a chained hash table.
///
/// Keys are stored as owned copies: `insert` takes `&str` and the map
/// allocates its own `Box<str>`, so the caller's buffer may be mutated or
/// freed the moment the call returns. Values are opaque to the map; it never
/// clones, inspects, or fabricates a `V`, and hands each one back exactly
/// once (from `remove`, `replace`, or a rejected `insert`) or drops it with
/// the map.
///
/// The bucket array length steps through a fixed schedule of primes starting
/// at 509. An insert that would push the binding count past the current
/// length grows the table first: every existing node is relinked into a fresh
/// bucket array under its recomputed index, in place, without reallocating
/// any binding or key. At the last scheduled capacity the table stops growing
/// and chains simply lengthen.
///
/// Single-threaded by design: all mutation goes through `&mut self`, and the
/// map is a plain owned value.
pub struct ChainedMap<V> {
    /// Chain heads. `buckets.len()` is always one of the scheduled capacities.
    buckets: Vec<Option<DefaultKey>>,
    /// Binding storage with stable keys.
    slots: SlotMap<DefaultKey, Binding<V>>,
    /// Index into the capacity schedule; never decreases.
    cap_index: usize,
}

/// Error returned by [`ChainedMap::insert`] for a key that is already bound.
///
/// Carries the rejected value back to the caller; the map keeps the binding
/// it already had.
#[derive(Debug)]
pub enum InsertError<V> {
    DuplicateKey { value: V },
}

impl<V> fmt::Display for InsertError<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InsertError::DuplicateKey { .. } => f.write_str("duplicate key"),
        }
    }
}

impl<V: fmt::Debug> std::error::Error for InsertError<V> {}

impl<V> ChainedMap<V> {
    /// Create an empty map at the smallest scheduled capacity.
    pub fn new() -> Self {
        Self {
            buckets: vec![None; capacity::INITIAL],
            slots: SlotMap::with_key(),
            cap_index: 0,
        }
    }

    /// Number of bindings in the map.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Current bucket-array length. Starts at the smallest scheduled
    /// capacity and only ever advances along the schedule.
    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    /// Walk `key`'s chain and return its node, if bound.
    fn find_node(&self, key: &str) -> Option<DefaultKey> {
        let mut cur = self.buckets[hash::bucket_index(key, self.buckets.len())];
        while let Some(node) = cur {
            let binding = &self.slots[node];
            if &*binding.key == key {
                return Some(node);
            }
            cur = binding.next;
        }
        None
    }

    /// Shared reference to the value bound to `key`.
    pub fn get(&self, key: &str) -> Option<&V> {
        self.find_node(key).map(|node| &self.slots[node].value)
    }

    /// Mutable reference to the value bound to `key`.
    pub fn get_mut(&mut self, key: &str) -> Option<&mut V> {
        let node = self.find_node(key)?;
        Some(&mut self.slots[node].value)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.find_node(key).is_some()
    }

    /// Bind `key` to `value` if `key` is not already bound.
    ///
    /// On success the map owns a fresh copy of `key` and the binding count
    /// grows by one. If `key` is already bound, the map is left completely
    /// unchanged and the rejected `value` comes back in the error; the stored
    /// value is not updated (that is [`replace`]'s job).
    ///
    /// Growth, when warranted, happens before the insert, so the new binding
    /// is placed under the capacity it will be looked up under.
    ///
    /// [`replace`]: ChainedMap::replace
    pub fn insert(&mut self, key: &str, value: V) -> Result<(), InsertError<V>> {
        if self.find_node(key).is_some() {
            return Err(InsertError::DuplicateKey { value });
        }
        if self.slots.len() + 1 > self.buckets.len() {
            self.grow();
        }
        let idx = hash::bucket_index(key, self.buckets.len());
        let node = self.slots.insert(Binding {
            key: key.into(),
            value,
            next: self.buckets[idx],
        });
        self.buckets[idx] = Some(node);
        Ok(())
    }

    /// Overwrite the value bound to `key` and return the previous value, or
    /// hand `value` back if `key` is not bound. Never allocates; the stored
    /// key copy is untouched.
    pub fn replace(&mut self, key: &str, value: V) -> Result<V, V> {
        match self.find_node(key) {
            Some(node) => Ok(mem::replace(&mut self.slots[node].value, value)),
            None => Err(value),
        }
    }

    /// Unbind `key`, returning its value. The binding's key copy and node are
    /// released; `None` leaves the map unchanged.
    pub fn remove(&mut self, key: &str) -> Option<V> {
        let idx = hash::bucket_index(key, self.buckets.len());
        let mut prev: Option<DefaultKey> = None;
        let mut cur = self.buckets[idx];
        while let Some(node) = cur {
            if &*self.slots[node].key == key {
                let next = self.slots[node].next;
                match prev {
                    Some(p) => self.slots[p].next = next,
                    None => self.buckets[idx] = next,
                }
                return self.slots.remove(node).map(|binding| binding.value);
            }
            prev = cur;
            cur = self.slots[node].next;
        }
        None
    }

    /// Call `visit` once per binding, in bucket order and newest-first within
    /// a chain. The order is an implementation detail and changes across
    /// growth. The borrow on the map for the duration of the call keeps the
    /// visitor from inserting or removing bindings.
    pub fn for_each(&self, mut visit: impl FnMut(&str, &V)) {
        for &head in &self.buckets {
            let mut cur = head;
            while let Some(node) = cur {
                let binding = &self.slots[node];
                cur = binding.next;
                visit(&*binding.key, &binding.value);
            }
        }
    }

    /// Like [`for_each`], with mutable access to each value in place.
    ///
    /// [`for_each`]: ChainedMap::for_each
    pub fn for_each_mut(&mut self, mut visit: impl FnMut(&str, &mut V)) {
        for bucket in 0..self.buckets.len() {
            let mut cur = self.buckets[bucket];
            while let Some(node) = cur {
                let binding = &mut self.slots[node];
                cur = binding.next;
                visit(&*binding.key, &mut binding.value);
            }
        }
    }

    /// Iterate over `(key, value)` pairs in arena order (not the traversal
    /// order of [`for_each`]; neither order is guaranteed).
    ///
    /// [`for_each`]: ChainedMap::for_each
    pub fn iter(&self) -> Iter<'_, V> {
        Iter {
            it: self.slots.iter(),
        }
    }

    /// Iterate with mutable access to each value.
    pub fn iter_mut(&mut self) -> IterMut<'_, V> {
        IterMut {
            it: self.slots.iter_mut(),
        }
    }

    /// Relink every node into a bucket array at the next scheduled capacity.
    /// No binding or key is reallocated; only next-links and chain heads
    /// change. A no-op at the end of the schedule.
    fn grow(&mut self) {
        let new_cap = match capacity::next(self.cap_index) {
            Some(cap) => cap,
            None => return,
        };
        let mut buckets = vec![None; new_cap];
        for (node, binding) in self.slots.iter_mut() {
            let idx = hash::bucket_index(&*binding.key, new_cap);
            binding.next = buckets[idx];
            buckets[idx] = Some(node);
        }
        self.buckets = buckets;
        self.cap_index += 1;
    }

    /// Check structural invariants: every node reachable from exactly the
    /// bucket its key hashes to, no duplicate keys, reachable count equal to
    /// `len`, bucket count on the schedule.
    #[cfg(test)]
    pub(crate) fn audit(&self) {
        assert!(capacity::CAPACITIES.contains(&self.buckets.len()));
        assert_eq!(self.buckets.len(), capacity::CAPACITIES[self.cap_index]);
        let mut seen = std::collections::BTreeSet::new();
        let mut reachable = 0usize;
        for (idx, &head) in self.buckets.iter().enumerate() {
            let mut cur = head;
            while let Some(node) = cur {
                let binding = &self.slots[node];
                assert_eq!(
                    hash::bucket_index(&*binding.key, self.buckets.len()),
                    idx,
                    "binding {:?} linked into the wrong bucket",
                    binding.key
                );
                assert!(seen.insert(binding.key.clone()), "duplicate key {:?}", binding.key);
                reachable += 1;
                cur = binding.next;
            }
        }
        assert_eq!(reachable, self.slots.len());
    }
}

impl<V> Default for ChainedMap<V> {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over immutable entries in `ChainedMap`.
pub struct Iter<'a, V> {
    it: slotmap::basic::Iter<'a, DefaultKey, Binding<V>>,
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = (&'a str, &'a V);
    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.it.next().map(|(_, b)| (&*b.key, &b.value))
    }
}

/// Iterator over mutable entries in `ChainedMap`.
pub struct IterMut<'a, V> {
    it: slotmap::basic::IterMut<'a, DefaultKey, Binding<V>>,
}

impl<'a, V> Iterator for IterMut<'a, V> {
    type Item = (&'a str, &'a mut V);
    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.it.next().map(|(_, b)| (&*b.key, &mut b.value))
    }
}

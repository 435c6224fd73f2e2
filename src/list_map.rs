#![cfg(test)]

//! ListMap: singly-linked-list baseline with the same interface as
//! ChainedMap. Exists only as the oracle for property-based cross-checks;
//! every operation is a linear scan, which makes its correctness easy to see
//! by inspection.

use core::mem;

struct Node<V> {
    key: Box<str>,
    value: V,
    next: Option<Box<Node<V>>>,
}

pub(crate) struct ListMap<V> {
    head: Option<Box<Node<V>>>,
    len: usize,
}

impl<V> ListMap<V> {
    pub(crate) fn new() -> Self {
        Self { head: None, len: 0 }
    }

    pub(crate) fn len(&self) -> usize {
        self.len
    }

    fn find(&self, key: &str) -> Option<&Node<V>> {
        let mut cur = self.head.as_deref();
        while let Some(node) = cur {
            if &*node.key == key {
                return Some(node);
            }
            cur = node.next.as_deref();
        }
        None
    }

    pub(crate) fn get(&self, key: &str) -> Option<&V> {
        self.find(key).map(|node| &node.value)
    }

    pub(crate) fn contains_key(&self, key: &str) -> bool {
        self.find(key).is_some()
    }

    /// Head-insert after a duplicate scan; same contract as
    /// `ChainedMap::insert`, with a bare `Err(value)` standing in for the
    /// duplicate-key error.
    pub(crate) fn insert(&mut self, key: &str, value: V) -> Result<(), V> {
        if self.contains_key(key) {
            return Err(value);
        }
        self.head = Some(Box::new(Node {
            key: key.into(),
            value,
            next: self.head.take(),
        }));
        self.len += 1;
        Ok(())
    }

    pub(crate) fn replace(&mut self, key: &str, value: V) -> Result<V, V> {
        let mut cur = self.head.as_deref_mut();
        while let Some(node) = cur {
            if &*node.key == key {
                return Ok(mem::replace(&mut node.value, value));
            }
            cur = node.next.as_deref_mut();
        }
        Err(value)
    }

    /// Unlink at any position, head included.
    pub(crate) fn remove(&mut self, key: &str) -> Option<V> {
        let mut cur = &mut self.head;
        while cur.as_deref().is_some_and(|node| &*node.key != key) {
            cur = &mut cur.as_mut().expect("checked above").next;
        }
        let node = cur.take()?;
        *cur = node.next;
        self.len -= 1;
        Some(node.value)
    }

    pub(crate) fn for_each(&self, mut visit: impl FnMut(&str, &V)) {
        let mut cur = self.head.as_deref();
        while let Some(node) = cur {
            visit(&*node.key, &node.value);
            cur = node.next.as_deref();
        }
    }
}

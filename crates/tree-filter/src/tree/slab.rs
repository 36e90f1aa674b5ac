//! Heap-backed slab with a freelist, addressed by `NodeId`.
//!
//! Removed slots are recycled, so an id is only meaningful while its node is
//! alive. Trees are rebuilt for every pass, which keeps stale ids from
//! crossing pass boundaries.

use std::ops::{Index, IndexMut};

use super::index_types::NodeId;

/// Internal entry representation for slab slots.
#[derive(Debug, Clone)]
enum Entry<T> {
    /// Slot is free; stores the index of the next free slot in the freelist.
    Vacant(usize),
    /// Slot is occupied by a value.
    Occupied(T),
}

#[derive(Debug, Clone)]
pub struct NodeSlab<T> {
    entries: Vec<Entry<T>>,
    /// Logical element count (occupied slots only).
    len: usize,
    /// Head of the freelist; equals `entries.len()` when the list is empty.
    next: usize,
}

impl<T> Default for NodeSlab<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> NodeSlab<T> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            len: 0,
            next: 0,
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
            len: 0,
            next: 0,
        }
    }

    /// Inserts a value, returning its index.
    pub fn insert(&mut self, value: T) -> NodeId {
        let index = self.next;
        if index == self.entries.len() {
            self.entries.push(Entry::Occupied(value));
            self.next = self.entries.len();
        } else {
            match std::mem::replace(&mut self.entries[index], Entry::Occupied(value)) {
                Entry::Vacant(next) => self.next = next,
                Entry::Occupied(_) => unreachable!("freelist head points at an occupied slot"),
            }
        }
        self.len += 1;
        NodeId::new(index)
    }

    pub fn get(&self, index: NodeId) -> Option<&T> {
        match self.entries.get(index.get()) {
            Some(Entry::Occupied(value)) => Some(value),
            _ => None,
        }
    }

    pub fn get_mut(&mut self, index: NodeId) -> Option<&mut T> {
        match self.entries.get_mut(index.get()) {
            Some(Entry::Occupied(value)) => Some(value),
            _ => None,
        }
    }

    pub fn contains(&self, index: NodeId) -> bool {
        self.get(index).is_some()
    }

    /// Removes the value at `index`, returning it if present.
    pub fn try_remove(&mut self, index: NodeId) -> Option<T> {
        let slot = index.get();
        match self.entries.get(slot) {
            Some(Entry::Occupied(_)) => {}
            _ => return None,
        }
        let previous = std::mem::replace(&mut self.entries[slot], Entry::Vacant(self.next));
        self.next = slot;
        self.len -= 1;
        match previous {
            Entry::Occupied(value) => Some(value),
            Entry::Vacant(_) => None,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Iterates occupied entries in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &T)> {
        self.entries
            .iter()
            .enumerate()
            .filter_map(|(slot, entry)| match entry {
                Entry::Occupied(value) => Some((NodeId::new(slot), value)),
                Entry::Vacant(_) => None,
            })
    }
}

impl<T> Index<NodeId> for NodeSlab<T> {
    type Output = T;

    fn index(&self, index: NodeId) -> &Self::Output {
        match self.get(index) {
            Some(value) => value,
            None => panic!("invalid node id {}", index.get()),
        }
    }
}

impl<T> IndexMut<NodeId> for NodeSlab<T> {
    fn index_mut(&mut self, index: NodeId) -> &mut Self::Output {
        match self.get_mut(index) {
            Some(value) => value,
            None => panic!("invalid node id {}", index.get()),
        }
    }
}

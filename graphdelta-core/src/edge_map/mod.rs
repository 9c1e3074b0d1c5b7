//! Ordered per-vertex edge map backed by an arena-allocated AVL tree.
//!
//! Nodes live in a single contiguous arena and reference each other by slot
//! index. Removing a node vacates its slot and pushes it onto a free list, so
//! the slot index of every other node stays valid; later insertions reuse
//! vacated slots before growing the arena.
//!
//! Inserting a key that is already present overwrites the stored payload in
//! place and returns the previous value. The tree shape is left untouched in
//! that case, so a key can never appear twice.

mod balance;
mod invariants;
mod iter;

use std::{cmp::Ordering, mem};

use crate::error::EdgeMapError;

pub use self::iter::{Iter, Keys, Values};

#[derive(Clone, Debug)]
pub(crate) struct Node<E> {
    key: usize,
    value: E,
    left: Option<usize>,
    right: Option<usize>,
    height: u32,
}

impl<E> Node<E> {
    fn leaf(key: usize, value: E) -> Self {
        Self {
            key,
            value,
            left: None,
            right: None,
            height: 1,
        }
    }
}

/// Ordered map from target vertex id to edge payload.
///
/// # Examples
/// ```
/// use graphdelta_core::OrderedEdgeMap;
///
/// let mut map = OrderedEdgeMap::new();
/// map.insert(7, "seven");
/// map.insert(2, "two");
/// map.insert(9, "nine");
/// map.remove(7);
/// assert_eq!(map.ordered_keys(), vec![2, 9]);
/// assert_eq!(map.get(9), Some(&"nine"));
/// ```
#[derive(Clone, Debug)]
pub struct OrderedEdgeMap<E> {
    slots: Vec<Option<Node<E>>>,
    free: Vec<usize>,
    root: Option<usize>,
    len: usize,
}

impl<E> Default for OrderedEdgeMap<E> {
    fn default() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            root: None,
            len: 0,
        }
    }
}

impl<E> OrderedEdgeMap<E> {
    /// Creates an empty map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` when the map holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the height of the tree; zero for an empty map.
    #[must_use]
    pub fn height(&self) -> usize {
        self.height_of(self.root) as usize
    }

    /// Returns `true` if `key` is present.
    #[must_use]
    pub fn contains_key(&self, key: usize) -> bool {
        self.find(key).is_some()
    }

    /// Returns the payload stored under `key`, or `None` when absent.
    #[must_use]
    pub fn get(&self, key: usize) -> Option<&E> {
        self.find(key).map(|index| &self.node(index).value)
    }

    /// Returns a mutable reference to the payload stored under `key`.
    pub fn get_mut(&mut self, key: usize) -> Option<&mut E> {
        let index = self.find(key)?;
        Some(&mut self.node_mut(index).value)
    }

    /// Replaces the payload of an existing entry and returns the old payload.
    ///
    /// # Errors
    /// Returns [`EdgeMapError::KeyNotFound`] when `key` is absent; the map is
    /// left unchanged.
    pub fn set(&mut self, key: usize, value: E) -> Result<E, EdgeMapError> {
        let slot = self.get_mut(key).ok_or(EdgeMapError::KeyNotFound { key })?;
        Ok(mem::replace(slot, value))
    }

    /// Inserts `value` under `key`.
    ///
    /// Returns `None` when a new node was created, or the previous payload
    /// when `key` was already present and has been overwritten.
    pub fn insert(&mut self, key: usize, value: E) -> Option<E> {
        let (root, previous) = self.insert_at(self.root, key, value);
        self.root = Some(root);
        previous
    }

    /// Removes `key` and returns its payload, or `None` when absent.
    pub fn remove(&mut self, key: usize) -> Option<E> {
        let (root, removed) = self.remove_at(self.root, key);
        self.root = root;
        removed
    }

    /// Removes every entry and releases the arena.
    pub fn clear(&mut self) {
        self.slots.clear();
        self.free.clear();
        self.root = None;
        self.len = 0;
    }

    /// Iterates over `(key, &payload)` pairs in ascending key order.
    #[must_use]
    pub fn iter(&self) -> Iter<'_, E> {
        Iter::new(self)
    }

    /// Iterates over keys in ascending order.
    #[must_use]
    pub fn keys(&self) -> Keys<'_, E> {
        Keys::new(self.iter())
    }

    /// Iterates over payloads in ascending key order.
    #[must_use]
    pub fn values(&self) -> Values<'_, E> {
        Values::new(self.iter())
    }

    /// Collects the keys in ascending order.
    #[must_use]
    pub fn ordered_keys(&self) -> Vec<usize> {
        self.keys().collect()
    }

    /// Collects `(key, payload)` pairs in ascending key order.
    #[must_use]
    pub fn ordered_entries(&self) -> Vec<(usize, E)>
    where
        E: Clone,
    {
        self.iter().map(|(key, value)| (key, value.clone())).collect()
    }

    fn find(&self, key: usize) -> Option<usize> {
        let mut cursor = self.root;
        while let Some(index) = cursor {
            let node = self.node(index);
            cursor = match key.cmp(&node.key) {
                Ordering::Less => node.left,
                Ordering::Greater => node.right,
                Ordering::Equal => return Some(index),
            };
        }
        None
    }

    fn insert_at(&mut self, link: Option<usize>, key: usize, value: E) -> (usize, Option<E>) {
        let Some(index) = link else {
            return (self.allocate(key, value), None);
        };

        let previous = match key.cmp(&self.node(index).key) {
            Ordering::Less => {
                let (child, previous) = self.insert_at(self.node(index).left, key, value);
                self.node_mut(index).left = Some(child);
                previous
            }
            Ordering::Greater => {
                let (child, previous) = self.insert_at(self.node(index).right, key, value);
                self.node_mut(index).right = Some(child);
                previous
            }
            Ordering::Equal => {
                let previous = mem::replace(&mut self.node_mut(index).value, value);
                return (index, Some(previous));
            }
        };

        if previous.is_some() {
            return (index, previous);
        }
        (self.rebalance(index), None)
    }

    fn remove_at(&mut self, link: Option<usize>, key: usize) -> (Option<usize>, Option<E>) {
        let Some(index) = link else {
            return (None, None);
        };

        let removed = match key.cmp(&self.node(index).key) {
            Ordering::Less => {
                let (child, removed) = self.remove_at(self.node(index).left, key);
                self.node_mut(index).left = child;
                removed
            }
            Ordering::Greater => {
                let (child, removed) = self.remove_at(self.node(index).right, key);
                self.node_mut(index).right = child;
                removed
            }
            Ordering::Equal => {
                let Node {
                    value, left, right, ..
                } = self.release(index);
                let Some(right) = right else {
                    return (left, Some(value));
                };
                // Splice the in-order successor into the vacated position.
                let successor = self.find_min(right);
                let rest = self.remove_min(right);
                let node = self.node_mut(successor);
                node.right = rest;
                node.left = left;
                return (Some(self.rebalance(successor)), Some(value));
            }
        };

        match removed {
            Some(value) => (Some(self.rebalance(index)), Some(value)),
            None => (Some(index), None),
        }
    }

    fn find_min(&self, mut index: usize) -> usize {
        while let Some(left) = self.node(index).left {
            index = left;
        }
        index
    }

    fn remove_min(&mut self, index: usize) -> Option<usize> {
        let Some(left) = self.node(index).left else {
            return self.node(index).right;
        };
        let rest = self.remove_min(left);
        self.node_mut(index).left = rest;
        Some(self.rebalance(index))
    }

    fn allocate(&mut self, key: usize, value: E) -> usize {
        self.len += 1;
        let node = Some(Node::leaf(key, value));
        if let Some(index) = self.free.pop() {
            self.slots[index] = node;
            return index;
        }
        self.slots.push(node);
        self.slots.len() - 1
    }

    fn release(&mut self, index: usize) -> Node<E> {
        let Some(node) = self.slots[index].take() else {
            panic!("edge map slot {index} released twice");
        };
        self.free.push(index);
        self.len -= 1;
        node
    }

    fn node(&self, index: usize) -> &Node<E> {
        match &self.slots[index] {
            Some(node) => node,
            None => panic!("edge map slot {index} is vacant"),
        }
    }

    fn node_mut(&mut self, index: usize) -> &mut Node<E> {
        match &mut self.slots[index] {
            Some(node) => node,
            None => panic!("edge map slot {index} is vacant"),
        }
    }
}

impl<E> FromIterator<(usize, E)> for OrderedEdgeMap<E> {
    fn from_iter<I: IntoIterator<Item = (usize, E)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (key, value) in iter {
            map.insert(key, value);
        }
        map
    }
}

impl<'a, E> IntoIterator for &'a OrderedEdgeMap<E> {
    type Item = (usize, &'a E);
    type IntoIter = Iter<'a, E>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

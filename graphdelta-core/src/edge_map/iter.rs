//! In-order iterators over an [`OrderedEdgeMap`].

use std::iter::FusedIterator;

use super::OrderedEdgeMap;

/// Ascending `(key, &payload)` iterator returned by [`OrderedEdgeMap::iter`].
#[derive(Clone, Debug)]
pub struct Iter<'a, E> {
    map: &'a OrderedEdgeMap<E>,
    stack: Vec<usize>,
    remaining: usize,
}

impl<'a, E> Iter<'a, E> {
    pub(super) fn new(map: &'a OrderedEdgeMap<E>) -> Self {
        let mut iter = Self {
            map,
            stack: Vec::with_capacity(map.height()),
            remaining: map.len(),
        };
        iter.descend_left(map.root);
        iter
    }

    fn descend_left(&mut self, mut link: Option<usize>) {
        while let Some(index) = link {
            self.stack.push(index);
            link = self.map.node(index).left;
        }
    }
}

impl<'a, E> Iterator for Iter<'a, E> {
    type Item = (usize, &'a E);

    fn next(&mut self) -> Option<Self::Item> {
        let index = self.stack.pop()?;
        let map = self.map;
        let node = map.node(index);
        self.descend_left(node.right);
        self.remaining -= 1;
        Some((node.key, &node.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<E> ExactSizeIterator for Iter<'_, E> {}

impl<E> FusedIterator for Iter<'_, E> {}

/// Ascending key iterator returned by [`OrderedEdgeMap::keys`].
#[derive(Clone, Debug)]
pub struct Keys<'a, E> {
    inner: Iter<'a, E>,
}

impl<'a, E> Keys<'a, E> {
    pub(super) fn new(inner: Iter<'a, E>) -> Self {
        Self { inner }
    }
}

impl<E> Iterator for Keys<'_, E> {
    type Item = usize;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(key, _)| key)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<E> ExactSizeIterator for Keys<'_, E> {}

impl<E> FusedIterator for Keys<'_, E> {}

/// Payload iterator in ascending key order returned by [`OrderedEdgeMap::values`].
#[derive(Clone, Debug)]
pub struct Values<'a, E> {
    inner: Iter<'a, E>,
}

impl<'a, E> Values<'a, E> {
    pub(super) fn new(inner: Iter<'a, E>) -> Self {
        Self { inner }
    }
}

impl<'a, E> Iterator for Values<'a, E> {
    type Item = &'a E;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, value)| value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<E> ExactSizeIterator for Values<'_, E> {}

impl<E> FusedIterator for Values<'_, E> {}

use std::iter::FusedIterator;

use crate::node::{NodeId, Nodes};

/// Borrowing iterator over a skip set in ascending order.
///
/// Created by [`SkipSet::iter`](crate::SkipSet::iter).
#[derive(Debug)]
pub struct Iter<'a, T> {
    nodes: &'a Nodes<T>,
    cursor: Option<NodeId>,
    remaining: usize,
}

impl<'a, T> Iter<'a, T> {
    pub(crate) fn new(nodes: &'a Nodes<T>, first: Option<NodeId>, len: usize) -> Self {
        Self {
            nodes,
            cursor: first,
            remaining: len,
        }
    }
}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Self { ..*self }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        if self.remaining == 0 {
            return None;
        }
        let id = self.cursor?;
        self.cursor = self.nodes[id].next;
        self.remaining -= 1;
        self.nodes.element(id)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> FusedIterator for Iter<'_, T> {}

/// Borrowing iterator over a sub-range of a skip set.
///
/// Created by [`SkipSet::range`](crate::SkipSet::range). The stop node is
/// resolved up front, so iteration performs no comparisons.
#[derive(Debug)]
pub struct Range<'a, T> {
    nodes: &'a Nodes<T>,
    cursor: Option<NodeId>,
    stop: Option<NodeId>,
}

impl<'a, T> Range<'a, T> {
    pub(crate) fn new(nodes: &'a Nodes<T>, cursor: Option<NodeId>, stop: Option<NodeId>) -> Self {
        Self {
            nodes,
            cursor,
            stop,
        }
    }
}

impl<T> Clone for Range<'_, T> {
    fn clone(&self) -> Self {
        Self { ..*self }
    }
}

impl<'a, T> Iterator for Range<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        if self.cursor == self.stop {
            return None;
        }
        let id = self.cursor?;
        self.cursor = self.nodes[id].next;
        self.nodes.element(id)
    }
}

impl<T> FusedIterator for Range<'_, T> {}

/// Owning iterator over a skip set in ascending order.
#[derive(Debug)]
pub struct IntoIter<T> {
    inner: std::vec::IntoIter<T>,
}

impl<T> IntoIter<T> {
    pub(crate) fn new(values: Vec<T>) -> Self {
        Self {
            inner: values.into_iter(),
        }
    }
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    fn next_back(&mut self) -> Option<T> {
        self.inner.next_back()
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

impl<T> FusedIterator for IntoIter<T> {}

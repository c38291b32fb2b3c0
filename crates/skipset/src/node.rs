//! Arena-backed node storage.
//!
//! Links between nodes are slab keys rather than pointers. Only level-0 nodes
//! own an element; the express-lane nodes above them carry the key of their
//! level-0 node, so every element is stored and dropped exactly once.

use std::ops::{Index, IndexMut};

use slab::Slab;

/// Stable handle to a node in the arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct NodeId(usize);

#[derive(Debug)]
pub(crate) enum Payload<T> {
    /// Level sentinel; carries no element.
    Head,
    /// Level-0 node owning the element.
    Element(T),
    /// Express-lane node referring to the level-0 node of its tower.
    Index(NodeId),
}

#[derive(Debug)]
pub(crate) struct Node<T> {
    pub(crate) payload: Payload<T>,
    pub(crate) next: Option<NodeId>,
    pub(crate) down: Option<NodeId>,
}

impl<T> Node<T> {
    pub(crate) fn head(down: Option<NodeId>) -> Self {
        Self {
            payload: Payload::Head,
            next: None,
            down,
        }
    }
}

#[derive(Debug)]
pub(crate) struct Nodes<T> {
    slab: Slab<Node<T>>,
}

impl<T> Nodes<T> {
    pub(crate) fn new() -> Self {
        Self { slab: Slab::new() }
    }

    pub(crate) fn alloc(&mut self, node: Node<T>) -> NodeId {
        NodeId(self.slab.insert(node))
    }

    pub(crate) fn release(&mut self, id: NodeId) -> Node<T> {
        self.slab.remove(id.0)
    }

    /// Checked lookup for handles that may be stale.
    pub(crate) fn get(&self, id: NodeId) -> Option<&Node<T>> {
        self.slab.get(id.0)
    }

    pub(crate) fn len(&self) -> usize {
        self.slab.len()
    }

    pub(crate) fn clear(&mut self) {
        self.slab.clear();
    }

    /// Element owned by `id` if it is a live level-0 node.
    pub(crate) fn element(&self, id: NodeId) -> Option<&T> {
        match self.slab.get(id.0) {
            Some(Node {
                payload: Payload::Element(value),
                ..
            }) => Some(value),
            _ => None,
        }
    }

    pub(crate) fn element_mut(&mut self, id: NodeId) -> Option<&mut T> {
        match self.slab.get_mut(id.0) {
            Some(Node {
                payload: Payload::Element(value),
                ..
            }) => Some(value),
            _ => None,
        }
    }

    /// Element of the tower `id` belongs to, at any level.
    pub(crate) fn value(&self, id: NodeId) -> Option<&T> {
        match &self[id].payload {
            Payload::Head => None,
            Payload::Element(value) => Some(value),
            Payload::Index(base) => self.element(*base),
        }
    }

    /// Level-0 node of the tower `id` belongs to.
    pub(crate) fn base(&self, id: NodeId) -> Option<NodeId> {
        match self[id].payload {
            Payload::Head => None,
            Payload::Element(_) => Some(id),
            Payload::Index(base) => Some(base),
        }
    }
}

impl<T> Index<NodeId> for Nodes<T> {
    type Output = Node<T>;

    fn index(&self, id: NodeId) -> &Node<T> {
        &self.slab[id.0]
    }
}

impl<T> IndexMut<NodeId> for Nodes<T> {
    fn index_mut(&mut self, id: NodeId) -> &mut Node<T> {
        &mut self.slab[id.0]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_nodes_resolve_through_base() {
        let mut nodes = Nodes::new();
        let base = nodes.alloc(Node {
            payload: Payload::Element(7),
            next: None,
            down: None,
        });
        let express = nodes.alloc(Node {
            payload: Payload::Index(base),
            next: None,
            down: Some(base),
        });
        let head = nodes.alloc(Node::head(None));

        assert_eq!(nodes.value(express), Some(&7));
        assert_eq!(nodes.base(express), Some(base));
        assert_eq!(nodes.value(head), None);
        assert_eq!(nodes.base(head), None);
        assert_eq!(nodes.element(express), None);
        assert_eq!(nodes.len(), 3);
    }

    #[test]
    fn released_slots_are_not_elements() {
        let mut nodes = Nodes::new();
        let id = nodes.alloc(Node {
            payload: Payload::Element("x"),
            next: None,
            down: None,
        });
        let node = nodes.release(id);
        assert!(matches!(node.payload, Payload::Element("x")));
        assert!(nodes.get(id).is_none());
        assert_eq!(nodes.element(id), None);
    }
}

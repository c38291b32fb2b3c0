use crate::node::NodeId;

/// Handle to one element of a [`SkipSet`](crate::SkipSet), or to the end of
/// the sequence.
///
/// Positions are plain copyable handles: two positions are equal when they
/// denote the same node, or when both are the end marker. A position does
/// not borrow the set, so it stays usable across mutations that leave its
/// node alone. After its element is erased (or the set is cleared) the
/// position is stale: looking it up is still memory-safe, but the result is
/// unspecified, and it may even name an element inserted later.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Position {
    node: Option<NodeId>,
}

impl Position {
    /// The past-the-end marker.
    pub const END: Position = Position { node: None };

    pub(crate) fn from_node(node: Option<NodeId>) -> Self {
        Self { node }
    }

    pub(crate) fn node(self) -> Option<NodeId> {
        self.node
    }

    pub fn is_end(&self) -> bool {
        self.node.is_none()
    }
}

use std::cmp::Ordering;

use compare::Compare;

use crate::NodeHandle;

/// An entry of the open list: a node together with its slot in the node arena.
#[derive(Debug)]
pub struct OpenNode<Node> {
    pub node: Node,
    pub handle: NodeHandle,
}

/// Orders open nodes such that a max-heap pops the node that should be expanded next.
///
/// Nodes are compared by their [`Ord`] implementation, ascending.
/// Ties are broken by generation order, i.e. nodes that were opened earlier are expanded earlier.
#[derive(Debug, Default)]
pub struct AStarNodeComparator;

impl<Node> OpenNode<Node> {
    pub fn new(node: Node, handle: NodeHandle) -> Self {
        Self { node, handle }
    }
}

impl<Node: Ord> Compare<OpenNode<Node>> for AStarNodeComparator {
    fn compare(&self, l: &OpenNode<Node>, r: &OpenNode<Node>) -> Ordering {
        l.node
            .cmp(&r.node)
            .reverse()
            .then_with(|| r.handle.cmp(&l.handle))
    }
}

use std::{cmp::Ordering, fmt::Display};

use generic_a_star::{AStarContext, AStarNode, cost::U64Cost};

use super::{cost_table::CostTable, edge::Edge, operation::EditOperation};

/// A partial alignment: how many tokens of each sequence are consumed, at which cost, and by which last edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Node {
    identifier: Identifier,
    cost: U64Cost,
    lower_bound: U64Cost,
    predecessor_edge: Option<Edge>,
}

/// The recombination key of a [`Node`].
///
/// Nodes that consumed the same amount of tokens are only recombined if they arrived via the same kind of edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Identifier {
    pub source_index: usize,
    pub target_index: usize,
    pub arrival: Arrival,
}

/// The kind of edge that produced a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Arrival {
    Root,
    Link,
    SkipSource,
    SkipTarget,
}

#[derive(Debug, Clone)]
pub struct Context<'sequences, Token> {
    source: &'sequences [Token],
    target: &'sequences [Token],
    costs: CostTable,
    cost_limit: Option<U64Cost>,
}

impl<'sequences, Token: Eq> Context<'sequences, Token> {
    pub fn new(
        source: &'sequences [Token],
        target: &'sequences [Token],
        costs: CostTable,
        cost_limit: Option<U64Cost>,
    ) -> Self {
        Self {
            source,
            target,
            costs,
            cost_limit,
        }
    }
}

impl<Token: Eq> AStarContext for Context<'_, Token> {
    type Node = Node;

    fn create_root(&self) -> Self::Node {
        Node::new(
            Identifier::new(0, 0, Arrival::Root),
            0u64.into(),
            self.costs.lower_bound(self.source.len(), self.target.len()),
            None,
        )
    }

    fn generate_successors(&mut self, node: &Self::Node, output: &mut impl Extend<Self::Node>) {
        output.extend(
            EditOperation::ALL.iter().filter_map(|operation| {
                operation.apply(node, self.source, self.target, &self.costs)
            }),
        );
    }

    fn is_target(&self, node: &Self::Node) -> bool {
        node.identifier.source_index == self.source.len()
            && node.identifier.target_index == self.target.len()
    }

    fn cost_limit(&self) -> Option<U64Cost> {
        self.cost_limit
    }
}

impl Node {
    pub(super) fn new(
        identifier: Identifier,
        cost: U64Cost,
        lower_bound: U64Cost,
        predecessor_edge: Option<Edge>,
    ) -> Self {
        Self {
            identifier,
            cost,
            lower_bound,
            predecessor_edge,
        }
    }
}

impl AStarNode for Node {
    type Identifier = Identifier;

    type EdgeType = Edge;

    type Cost = U64Cost;

    fn identifier(&self) -> &Self::Identifier {
        &self.identifier
    }

    fn cost(&self) -> Self::Cost {
        self.cost
    }

    fn a_star_lower_bound(&self) -> Self::Cost {
        self.lower_bound
    }

    fn predecessor_edge_type(&self) -> Option<Self::EdgeType> {
        self.predecessor_edge
    }
}

impl Identifier {
    pub const fn new(source_index: usize, target_index: usize, arrival: Arrival) -> Self {
        Self {
            source_index,
            target_index,
            arrival,
        }
    }

    const fn anti_diagonal(&self) -> usize {
        self.source_index + self.target_index
    }
}

impl PartialOrd for Node {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Node {
    /// Orders by cost plus lower bound, then prefers nodes that consumed more tokens.
    fn cmp(&self, other: &Self) -> Ordering {
        (self.cost + self.lower_bound)
            .cmp(&(other.cost + other.lower_bound))
            .then_with(|| {
                other
                    .identifier
                    .anti_diagonal()
                    .cmp(&self.identifier.anti_diagonal())
            })
    }
}

impl Display for Node {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let Self {
            identifier,
            cost,
            lower_bound,
            predecessor_edge,
        } = self;
        write!(f, "{identifier}; cost: {cost} + {lower_bound}; ")?;
        match predecessor_edge {
            Some(edge) => write!(f, "edge: {edge}"),
            None => write!(f, "root"),
        }
    }
}

impl Display for Identifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "({}, {}, {})",
            self.source_index, self.target_index, self.arrival
        )
    }
}

impl Display for Arrival {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Arrival::Root => write!(f, "R"),
            Arrival::Link => write!(f, "L"),
            Arrival::SkipSource => write!(f, "S"),
            Arrival::SkipTarget => write!(f, "T"),
        }
    }
}

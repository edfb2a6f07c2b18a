use generic_a_star::AStarNode;
use num_traits::CheckedAdd;

use super::{
    context::{Arrival, Identifier, Node},
    cost_table::CostTable,
    edge::Edge,
};

/// An operation that extends a partial alignment by one edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EditOperation {
    /// Link two equal tokens.
    MatchLink,
    /// Link two different tokens.
    SubstituteLink,
    /// Leave the next source token unaligned.
    SkipSource,
    /// Leave the next target token unaligned.
    SkipTarget,
}

impl EditOperation {
    /// All operations in the order in which successors are generated.
    pub const ALL: [Self; 4] = [
        Self::MatchLink,
        Self::SubstituteLink,
        Self::SkipSource,
        Self::SkipTarget,
    ];

    /// Applies this operation to `node`, or returns `None` if it is not applicable.
    ///
    /// At most one of the two link operations is applicable to any node.
    /// Successors whose cost plus lower bound does not fit into the cost type are not generated.
    pub fn apply<Token: Eq>(
        &self,
        node: &Node,
        source: &[Token],
        target: &[Token],
        costs: &CostTable,
    ) -> Option<Node> {
        let Identifier {
            source_index,
            target_index,
            ..
        } = *node.identifier();
        let next_source = source.get(source_index);
        let next_target = target.get(target_index);

        let (edge, identifier) = match self {
            Self::MatchLink | Self::SubstituteLink => {
                let is_match = next_source? == next_target?;
                if is_match != (*self == Self::MatchLink) {
                    return None;
                }
                (
                    Edge::Link {
                        source: source_index,
                        target: target_index,
                    },
                    Identifier::new(source_index + 1, target_index + 1, Arrival::Link),
                )
            }
            Self::SkipSource => {
                next_source?;
                (
                    Edge::SkipSource {
                        source: source_index,
                    },
                    Identifier::new(source_index + 1, target_index, Arrival::SkipSource),
                )
            }
            Self::SkipTarget => {
                next_target?;
                (
                    Edge::SkipTarget {
                        target: target_index,
                    },
                    Identifier::new(source_index, target_index + 1, Arrival::SkipTarget),
                )
            }
        };

        let cost = node.cost().checked_add(&costs.operation_cost(*self))?;
        let lower_bound = costs.lower_bound(
            source.len() - identifier.source_index,
            target.len() - identifier.target_index,
        );
        cost.checked_add(&lower_bound)?;

        Some(Node::new(identifier, cost, lower_bound, Some(edge)))
    }
}

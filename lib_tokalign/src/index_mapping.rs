use rustc_hash::FxHashMap;

use crate::token_aligner::edge::Edge;


/// Maps token positions of the source sequence to token positions of the target sequence.
///
/// Only [`Edge::Link`] edges carry a position on both sides, so skipped tokens are never mapped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IndexMapping {
    source_to_target: FxHashMap<usize, usize>,
}

impl IndexMapping {
    pub fn from_edges<'edges>(edges: impl IntoIterator<Item = &'edges Edge>) -> Self {
        Self {
            source_to_target: edges
                .into_iter()
                .filter_map(|edge| match *edge {
                    Edge::Link { source, target } => Some((source, target)),
                    Edge::SkipSource { .. } | Edge::SkipTarget { .. } => None,
                })
                .collect(),
        }
    }

    pub fn get(&self, source_index: usize) -> Option<usize> {
        self.source_to_target.get(&source_index).copied()
    }

    /// The number of mapped source positions.
    pub fn len(&self) -> usize {
        self.source_to_target.len()
    }

    pub fn is_empty(&self) -> bool {
        self.source_to_target.is_empty()
    }
}

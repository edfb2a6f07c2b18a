use std::fmt::{Display, Formatter, Result};

use generic_a_star::{AStarPerformanceCounters, AStarResult, cost::U64Cost};
use serde::{Deserialize, Serialize};

use super::edge::Edge;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum AlignmentResult {
    WithTarget {
        #[serde(flatten)]
        statistics: AlignmentStatistics,

        edges: Vec<Edge>,
    },

    WithoutTarget {
        #[serde(flatten)]
        statistics: AlignmentStatistics,
    },
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[must_use]
pub struct AlignmentStatistics {
    pub source_length: usize,
    pub target_length: usize,
    pub links: usize,
    pub skipped_source_tokens: usize,
    pub skipped_target_tokens: usize,
    pub duration_seconds: f64,
    pub opened_nodes: usize,
    pub recombined_nodes: usize,
    pub discarded_nodes: usize,
    pub stale_nodes: usize,
    pub expanded_nodes: usize,
    pub result: AStarResult<(), U64Cost>,
}

impl AlignmentResult {
    pub fn new_with_target(
        edges: Vec<Edge>,
        result: AStarResult<(), U64Cost>,
        duration_seconds: f64,
        performance_counters: &AStarPerformanceCounters,
        source_length: usize,
        target_length: usize,
    ) -> Self {
        let mut statistics = AlignmentStatistics::new(
            result,
            duration_seconds,
            performance_counters,
            source_length,
            target_length,
        );
        for edge in &edges {
            match edge {
                Edge::Link { .. } => statistics.links += 1,
                Edge::SkipSource { .. } => statistics.skipped_source_tokens += 1,
                Edge::SkipTarget { .. } => statistics.skipped_target_tokens += 1,
            }
        }

        Self::WithTarget { statistics, edges }
    }

    pub fn new_without_target(
        result: AStarResult<(), U64Cost>,
        duration_seconds: f64,
        performance_counters: &AStarPerformanceCounters,
        source_length: usize,
        target_length: usize,
    ) -> Self {
        Self::WithoutTarget {
            statistics: AlignmentStatistics::new(
                result,
                duration_seconds,
                performance_counters,
                source_length,
                target_length,
            ),
        }
    }

    pub fn statistics(&self) -> &AlignmentStatistics {
        match self {
            Self::WithTarget { statistics, .. } | Self::WithoutTarget { statistics } => statistics,
        }
    }

    /// The edges of the alignment, or `None` if no alignment was found.
    pub fn edges(&self) -> Option<&[Edge]> {
        match self {
            Self::WithTarget { edges, .. } => Some(edges),
            Self::WithoutTarget { .. } => None,
        }
    }

    pub fn into_edges(self) -> Option<Vec<Edge>> {
        match self {
            Self::WithTarget { edges, .. } => Some(edges),
            Self::WithoutTarget { .. } => None,
        }
    }

    /// The cost of the alignment, or `None` if no alignment was found.
    pub fn cost(&self) -> Option<U64Cost> {
        match self.statistics().result {
            AStarResult::FoundTarget { cost, .. } => Some(cost),
            _ => None,
        }
    }
}

impl AlignmentStatistics {
    fn new(
        result: AStarResult<(), U64Cost>,
        duration_seconds: f64,
        performance_counters: &AStarPerformanceCounters,
        source_length: usize,
        target_length: usize,
    ) -> Self {
        let AStarPerformanceCounters {
            opened_nodes,
            recombined_nodes,
            discarded_nodes,
            stale_nodes,
            expanded_nodes,
        } = *performance_counters;

        Self {
            source_length,
            target_length,
            duration_seconds,
            opened_nodes,
            recombined_nodes,
            discarded_nodes,
            stale_nodes,
            expanded_nodes,
            result,
            ..Default::default()
        }
    }
}

impl Display for AlignmentResult {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        let statistics = self.statistics();
        writeln!(f, "{}", statistics.result)?;
        writeln!(
            f,
            "Sequence lengths: {} source tokens, {} target tokens",
            statistics.source_length, statistics.target_length
        )?;

        if self.edges().is_some() {
            writeln!(
                f,
                "Edges: {} links, {} skipped source tokens, {} skipped target tokens",
                statistics.links, statistics.skipped_source_tokens, statistics.skipped_target_tokens
            )?;
        }

        writeln!(
            f,
            "Search: {} expanded, {} opened, {} recombined, {} discarded, {} stale",
            statistics.expanded_nodes,
            statistics.opened_nodes,
            statistics.recombined_nodes,
            statistics.discarded_nodes,
            statistics.stale_nodes
        )?;
        write!(f, "Duration: {:.3}s", statistics.duration_seconds)
    }
}

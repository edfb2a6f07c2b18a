//! Minimum-cost alignment of two token sequences.
//!
//! The alignment is computed by an A* search over partial alignments.
//! Partial alignments that consumed the same amount of tokens and arrived via the same kind of edge are recombined,
//! keeping only the cheapest one.

use std::time::Instant;

use generic_a_star::{AStar, AStarResult, cost::U64Cost, observer::AStarObserver};
use log::{debug, info};

use alignment_result::AlignmentResult;
use context::{Context, Node};
use cost_table::CostTable;
use edge::Edge;

pub mod alignment_result;
pub mod context;
pub mod cost_table;
pub mod edge;
pub mod operation;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AlignmentConfig {
    pub costs: CostTable,

    /// If set, the search gives up once all remaining alignments cost more than this.
    pub cost_limit: Option<U64Cost>,
}

/// Computes a minimum-cost alignment of `source` and `target` with the default costs.
///
/// The edges are ordered by increasing source and target index.
/// Every token of either sequence appears in exactly one edge.
pub fn align<Token: Eq>(source: &[Token], target: &[Token]) -> Vec<Edge> {
    align_with_config(source, target, &AlignmentConfig::default())
        .into_edges()
        .unwrap_or_else(|| unreachable!("without a cost limit, skips always reach the target"))
}

pub fn align_with_config<Token: Eq>(
    source: &[Token],
    target: &[Token],
    config: &AlignmentConfig,
) -> AlignmentResult {
    align_with_observer(source, target, config, ())
}

/// Like [`align_with_config`], but reports all search events to `observer`.
pub fn align_with_observer<Token: Eq>(
    source: &[Token],
    target: &[Token],
    config: &AlignmentConfig,
    observer: impl AStarObserver<Node>,
) -> AlignmentResult {
    debug!(
        "Aligning {} source tokens with {} target tokens",
        source.len(),
        target.len()
    );
    let start_time = Instant::now();

    let context = Context::new(source, target, config.costs, config.cost_limit);
    let mut a_star = AStar::with_observer(context, observer);
    a_star.initialise();
    let result = a_star.search();

    let alignment = if matches!(result, AStarResult::FoundTarget { .. }) {
        let mut edges: Vec<_> = a_star.backtrack().collect();
        edges.reverse();
        Some(edges)
    } else {
        None
    };

    let duration = (Instant::now() - start_time).as_secs_f64();
    info!("{result} after {duration:.3}s");
    debug!("{:?}", a_star.performance_counters());

    if let Some(edges) = alignment {
        AlignmentResult::new_with_target(
            edges,
            result.without_node_identifier(),
            duration,
            a_star.performance_counters(),
            source.len(),
            target.len(),
        )
    } else {
        AlignmentResult::new_without_target(
            result.without_node_identifier(),
            duration,
            a_star.performance_counters(),
            source.len(),
            target.len(),
        )
    }
}

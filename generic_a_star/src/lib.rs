#![forbid(clippy::mod_module_files)]

use std::{
    collections::hash_map::Entry,
    fmt::{Debug, Display},
    hash::Hash,
};

use binary_heap_plus::BinaryHeap;
use comparator::{AStarNodeComparator, OpenNode};
use cost::AStarCost;
use num_traits::Bounded;
use observer::AStarObserver;
use rustc_hash::FxHashMap;

pub mod comparator;
pub mod cost;
pub mod observer;

/// A node of the A* graph.
/// The node must implement [`Ord`], ordering it by its cost plus A* cost, ascending.
/// Secondary criteria of the ordering decide between nodes of equal total cost.
/// The graph defined by the node type must be cycle-free.
pub trait AStarNode: Sized + Ord + Debug + Display {
    /// The recombination key of the node.
    ///
    /// Of all nodes with the same identifier, only the cheapest one is kept.
    /// For example, in case of traditional edit distance, this would be the tuple (i, j) indicating which alignment matrix cell this node belongs to.
    type Identifier: Debug + Clone + Eq + Hash;

    /// The type collecting possible edge types.
    ///
    /// These are used when backtracking a solution.
    type EdgeType: Debug + Clone;

    type Cost: AStarCost;

    /// Returns the identifier of this node.
    fn identifier(&self) -> &Self::Identifier;

    /// Returns the cost of this node.
    ///
    /// This is the cost measured from the root node, and does NOT include the A* lower bound.
    fn cost(&self) -> Self::Cost;

    /// Returns the A* lower bound of this node.
    fn a_star_lower_bound(&self) -> Self::Cost;

    /// Returns the cost plus the A* lower bound of this node.
    fn total_cost(&self) -> Self::Cost {
        self.cost() + self.a_star_lower_bound()
    }

    /// Returns the edge type used to reach this node from the predecessor, or `None` if this is a root node.
    fn predecessor_edge_type(&self) -> Option<Self::EdgeType>;
}

pub trait AStarContext {
    /// The node type used by the A* algorithm.
    type Node: AStarNode;

    /// Create the root node of the A* graph.
    fn create_root(&self) -> Self::Node;

    /// Generate the successors of this node.
    ///
    /// The predecessor of each generated node is `node`.
    fn generate_successors(&mut self, node: &Self::Node, output: &mut impl Extend<Self::Node>);

    /// Returns true if this node is a target node of the A* graph.
    fn is_target(&self, node: &Self::Node) -> bool;

    /// Returns the maximum cost that the target node is allowed to have.
    ///
    /// If no target is found with this cost or lower, then [`AStarResult::ExceededCostLimit`] is returned.
    fn cost_limit(&self) -> Option<<Self::Node as AStarNode>::Cost> {
        None
    }
}

/// Refers to a node stored by an [`AStar`] instance.
///
/// Handles are handed out in the order in which nodes are created, starting from zero for the root.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeHandle(usize);

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct AStarPerformanceCounters {
    /// Successors that reached a recombination key for the first time.
    pub opened_nodes: usize,
    /// Successors that replaced a more expensive node with the same recombination key.
    pub recombined_nodes: usize,
    /// Successors that were dropped because a node with the same recombination key was at least as cheap.
    pub discarded_nodes: usize,
    /// Replaced nodes that were popped from the open list and skipped.
    pub stale_nodes: usize,
    pub expanded_nodes: usize,
}

#[derive(Debug, PartialEq, Eq)]
pub enum AStarState<NodeIdentifier, Cost> {
    /// The algorithm was just created.
    Empty,
    /// The algorithm was just initialised.
    Init,
    /// The algorithm is searching for a target node.
    Searching,
    /// The algorithm terminated.
    Terminated {
        result: AStarResult<NodeIdentifier, Cost>,
    },
}

#[derive(Debug, Clone, Ord, PartialOrd, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "astar_result_type"))]
pub enum AStarResult<NodeIdentifier, Cost> {
    /// The algorithm has found a target node.
    FoundTarget {
        #[cfg_attr(feature = "serde", serde(skip))]
        identifier: NodeIdentifier,
        cost: Cost,
    },

    /// The algorithm terminated before finding a target because the cost limit was reached.
    ExceededCostLimit { cost_limit: Cost },

    /// The algorithm terminated, but did not find a target.
    NoTarget,
}

/// The stored part of a node that is needed after it has left the open list.
#[derive(Debug)]
struct ArenaSlot<EdgeType, Cost> {
    backlink: Option<Backlink<EdgeType>>,
    cost: Cost,
    total_cost: Cost,
    /// Set once a cheaper node with the same identifier was found.
    discarded: bool,
}

#[derive(Debug)]
struct Backlink<EdgeType> {
    predecessor: NodeHandle,
    edge_type: EdgeType,
}

type Arena<Node> = Vec<ArenaSlot<<Node as AStarNode>::EdgeType, <Node as AStarNode>::Cost>>;

type NodeCost<Context> = <<Context as AStarContext>::Node as AStarNode>::Cost;

type NodeEdgeType<Context> = <<Context as AStarContext>::Node as AStarNode>::EdgeType;

/// A best-first search with an admissible lower bound.
///
/// Successors are recombined by their identifier: the open list contains at most one live node per identifier.
/// Replaced nodes stay in the open list, but are marked as discarded and skipped when popped.
#[derive(Debug)]
pub struct AStar<Context: AStarContext, Observer = ()> {
    state: AStarState<NodeHandle, NodeCost<Context>>,
    context: Context,
    observer: Observer,
    arena: Arena<Context::Node>,
    recombination_table: FxHashMap<<Context::Node as AStarNode>::Identifier, NodeHandle>,
    open_list: BinaryHeap<OpenNode<Context::Node>, AStarNodeComparator>,
    performance_counters: AStarPerformanceCounters,
}

/// Routes generated successors through the recombination table into the open list.
struct Recombinator<'a_star, Node: AStarNode, Observer> {
    predecessor: NodeHandle,
    arena: &'a_star mut Arena<Node>,
    recombination_table: &'a_star mut FxHashMap<Node::Identifier, NodeHandle>,
    open_list: &'a_star mut BinaryHeap<OpenNode<Node>, AStarNodeComparator>,
    performance_counters: &'a_star mut AStarPerformanceCounters,
    observer: &'a_star mut Observer,
}

pub struct BacktrackingIterator<'a_star, EdgeType, Cost> {
    arena: &'a_star [ArenaSlot<EdgeType, Cost>],
    current: NodeHandle,
}

pub struct BacktrackingIteratorWithCost<'a_star, EdgeType, Cost> {
    arena: &'a_star [ArenaSlot<EdgeType, Cost>],
    current: NodeHandle,
}

impl<Context: AStarContext> AStar<Context> {
    pub fn new(context: Context) -> Self {
        Self::with_observer(context, ())
    }
}

impl<Context: AStarContext, Observer: AStarObserver<Context::Node>> AStar<Context, Observer> {
    pub fn with_observer(context: Context, observer: Observer) -> Self {
        Self {
            state: AStarState::Empty,
            context,
            observer,
            arena: Default::default(),
            recombination_table: Default::default(),
            open_list: BinaryHeap::from_vec(Vec::new()),
            performance_counters: Default::default(),
        }
    }

    pub fn state(&self) -> &AStarState<NodeHandle, NodeCost<Context>> {
        &self.state
    }

    pub fn performance_counters(&self) -> &AStarPerformanceCounters {
        &self.performance_counters
    }

    /// The number of nodes that were ever created, including discarded ones.
    pub fn node_count(&self) -> usize {
        self.arena.len()
    }

    pub fn initialise(&mut self) {
        self.initialise_with(|context| context.create_root());
    }

    pub fn initialise_with(&mut self, node: impl FnOnce(&Context) -> Context::Node) {
        assert_eq!(self.state, AStarState::Empty);

        let root = node(&self.context);
        debug_assert!(root.predecessor_edge_type().is_none());
        let handle = allocate(&mut self.arena, None, &root);
        self.recombination_table
            .insert(root.identifier().clone(), handle);
        self.open_list.push(OpenNode::new(root, handle));
        self.state = AStarState::Init;
    }

    pub fn search(&mut self) -> AStarResult<NodeHandle, NodeCost<Context>> {
        assert!(matches!(
            self.state,
            AStarState::Init | AStarState::Searching
        ));

        let cost_limit = self
            .context
            .cost_limit()
            .unwrap_or(<NodeCost<Context> as Bounded>::max_value());
        self.state = AStarState::Searching;

        let result = loop {
            let Some(OpenNode { node, handle }) = self.open_list.pop() else {
                break AStarResult::NoTarget;
            };

            if self.arena[handle.0].discarded {
                self.performance_counters.stale_nodes += 1;
                self.observer.on_stale(&node);
                continue;
            }

            // Nodes are ordered by cost plus lower bound.
            if node.total_cost() > cost_limit {
                break AStarResult::ExceededCostLimit { cost_limit };
            }

            self.observer.on_expand(&node);
            self.performance_counters.expanded_nodes += 1;

            if self.context.is_target(&node) {
                break AStarResult::FoundTarget {
                    identifier: handle,
                    cost: node.cost(),
                };
            }

            self.context.generate_successors(
                &node,
                &mut Recombinator {
                    predecessor: handle,
                    arena: &mut self.arena,
                    recombination_table: &mut self.recombination_table,
                    open_list: &mut self.open_list,
                    performance_counters: &mut self.performance_counters,
                    observer: &mut self.observer,
                },
            );
        };

        self.state = AStarState::Terminated {
            result: result.clone(),
        };
        result
    }

    /// Backtrack from the target node to the root node.
    ///
    /// The edges are returned in reverse order, i.e. starting with the edge that reached the target.
    ///
    /// **Panics** if the search has not terminated with a target.
    pub fn backtrack(&self) -> BacktrackingIterator<'_, NodeEdgeType<Context>, NodeCost<Context>> {
        let AStarState::Terminated {
            result: AStarResult::FoundTarget { identifier, .. },
        } = &self.state
        else {
            panic!("Cannot backtrack since no target was found.")
        };

        self.backtrack_from(*identifier).unwrap()
    }

    /// Backtrack from the target node to the root node.
    ///
    /// The elements of the iterator are a pair of an edge and the cost of the node that is reached by the edge.
    /// The cost of the root node is never returned.
    ///
    /// **Panics** if the search has not terminated with a target.
    pub fn backtrack_with_costs(
        &self,
    ) -> BacktrackingIteratorWithCost<'_, NodeEdgeType<Context>, NodeCost<Context>> {
        let AStarState::Terminated {
            result: AStarResult::FoundTarget { identifier, .. },
        } = &self.state
        else {
            panic!("Cannot backtrack since no target was found.")
        };

        BacktrackingIteratorWithCost {
            arena: &self.arena,
            current: *identifier,
        }
    }

    /// Backtrack from the node with the given handle to the root node.
    ///
    /// Returns `None` if no node with this handle exists.
    pub fn backtrack_from(
        &self,
        handle: NodeHandle,
    ) -> Option<BacktrackingIterator<'_, NodeEdgeType<Context>, NodeCost<Context>>> {
        (handle.0 < self.arena.len()).then(|| BacktrackingIterator {
            arena: &self.arena,
            current: handle,
        })
    }
}

fn allocate<Node: AStarNode>(
    arena: &mut Arena<Node>,
    predecessor: Option<NodeHandle>,
    node: &Node,
) -> NodeHandle {
    let handle = NodeHandle(arena.len());
    let backlink = predecessor.map(|predecessor| Backlink {
        predecessor,
        edge_type: node
            .predecessor_edge_type()
            .expect("non-root nodes must have a predecessor edge type"),
    });
    arena.push(ArenaSlot {
        backlink,
        cost: node.cost(),
        total_cost: node.total_cost(),
        discarded: false,
    });
    handle
}

impl<Node: AStarNode, Observer: AStarObserver<Node>> Recombinator<'_, Node, Observer> {
    fn offer(&mut self, successor: Node) {
        match self
            .recombination_table
            .entry(successor.identifier().clone())
        {
            Entry::Vacant(entry) => {
                let handle = allocate(self.arena, Some(self.predecessor), &successor);
                entry.insert(handle);
                self.performance_counters.opened_nodes += 1;
                self.observer.on_open(&successor);
                self.open_list.push(OpenNode::new(successor, handle));
            }
            Entry::Occupied(mut entry) => {
                let existing = &mut self.arena[entry.get().0];
                if existing.total_cost > successor.total_cost() {
                    existing.discarded = true;
                    let handle = allocate(self.arena, Some(self.predecessor), &successor);
                    entry.insert(handle);
                    self.performance_counters.recombined_nodes += 1;
                    self.observer.on_recombine(&successor);
                    self.open_list.push(OpenNode::new(successor, handle));
                } else {
                    self.performance_counters.discarded_nodes += 1;
                    self.observer.on_discard(&successor);
                }
            }
        }
    }
}

impl<Node: AStarNode, Observer: AStarObserver<Node>> Extend<Node>
    for Recombinator<'_, Node, Observer>
{
    fn extend<T: IntoIterator<Item = Node>>(&mut self, iter: T) {
        for successor in iter {
            self.offer(successor);
        }
    }
}

impl<NodeIdentifier, Cost: Copy> AStarResult<NodeIdentifier, Cost> {
    /// Returns the cost of the target, or the cost limit if it was exceeded.
    ///
    /// **Panics** if `self` is [`AStarResult::NoTarget`].
    pub fn cost(&self) -> Cost {
        match self {
            Self::FoundTarget { cost, .. } => *cost,
            Self::ExceededCostLimit { cost_limit } => *cost_limit,
            Self::NoTarget => panic!("AStarResult has no costs"),
        }
    }

    pub fn without_node_identifier(&self) -> AStarResult<(), Cost> {
        match *self {
            Self::FoundTarget { cost, .. } => AStarResult::FoundTarget {
                identifier: (),
                cost,
            },
            Self::ExceededCostLimit { cost_limit } => AStarResult::ExceededCostLimit { cost_limit },
            Self::NoTarget => AStarResult::NoTarget,
        }
    }
}

impl<EdgeType: Clone, Cost> Iterator for BacktrackingIterator<'_, EdgeType, Cost> {
    type Item = EdgeType;

    fn next(&mut self) -> Option<Self::Item> {
        let backlink = self.arena[self.current.0].backlink.as_ref()?;
        self.current = backlink.predecessor;
        Some(backlink.edge_type.clone())
    }
}

impl<EdgeType: Clone, Cost: Copy> Iterator for BacktrackingIteratorWithCost<'_, EdgeType, Cost> {
    type Item = (EdgeType, Cost);

    fn next(&mut self) -> Option<Self::Item> {
        let current = &self.arena[self.current.0];
        let backlink = current.backlink.as_ref()?;
        self.current = backlink.predecessor;
        Some((backlink.edge_type.clone(), current.cost))
    }
}

impl<NodeIdentifier, Cost: Display> Display for AStarResult<NodeIdentifier, Cost> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AStarResult::FoundTarget { cost, .. } => write!(f, "Reached target with cost {cost}"),
            AStarResult::ExceededCostLimit { cost_limit } => {
                write!(f, "Exceeded cost limit of {cost_limit}")
            }
            AStarResult::NoTarget => write!(f, "Found no target"),
        }
    }
}

impl<NodeIdentifier, Cost> Default for AStarResult<NodeIdentifier, Cost> {
    fn default() -> Self {
        Self::NoTarget
    }
}

impl Display for NodeHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

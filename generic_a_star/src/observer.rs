//! Hooks into the events of an A* search.
//!
//! The search itself never logs.
//! Callers that want to see what the search does pass an observer instead.

use std::fmt::Display;

use log::trace;

/// Receives the events of an A* search.
///
/// All methods do nothing by default.
pub trait AStarObserver<Node> {
    /// A node was popped from the open list and is about to be expanded.
    fn on_expand(&mut self, _node: &Node) {}

    /// A successor reached a recombination key for the first time and was opened.
    fn on_open(&mut self, _node: &Node) {}

    /// A successor was cheaper than the live node with the same recombination key and replaced it.
    fn on_recombine(&mut self, _node: &Node) {}

    /// A successor was not cheaper than the live node with the same recombination key and was dropped.
    fn on_discard(&mut self, _node: &Node) {}

    /// A node that was replaced by a cheaper one was popped from the open list and skipped.
    fn on_stale(&mut self, _node: &Node) {}
}

impl<Node> AStarObserver<Node> for () {}

impl<Node, Observer: AStarObserver<Node>> AStarObserver<Node> for &mut Observer {
    fn on_expand(&mut self, node: &Node) {
        (**self).on_expand(node);
    }

    fn on_open(&mut self, node: &Node) {
        (**self).on_open(node);
    }

    fn on_recombine(&mut self, node: &Node) {
        (**self).on_recombine(node);
    }

    fn on_discard(&mut self, node: &Node) {
        (**self).on_discard(node);
    }

    fn on_stale(&mut self, node: &Node) {
        (**self).on_stale(node);
    }
}

/// Forwards all search events to the [`log`] facade at trace level.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogObserver;

impl<Node: Display> AStarObserver<Node> for LogObserver {
    fn on_expand(&mut self, node: &Node) {
        trace!("Expanding: {node}");
    }

    fn on_open(&mut self, node: &Node) {
        trace!("Adding: {node}");
    }

    fn on_recombine(&mut self, node: &Node) {
        trace!("Recombining: {node}");
    }

    fn on_discard(&mut self, node: &Node) {
        trace!("Discarding: {node}");
    }

    fn on_stale(&mut self, node: &Node) {
        trace!("Skipping stale: {node}");
    }
}

//! Arena graph with stable node handles
//!
//! Nodes live in a `petgraph` arena and are addressed by [`NodeId`]. A node may
//! be the child of several parents and may be its own descendant; nothing here
//! rejects either, so the validator can report them instead.

use crate::node::{Node, Shape};
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use std::collections::HashMap;
use std::ops::Index;

/// Stable handle of a node inside a [`TreeGraph`]
pub type NodeId = NodeIndex;

/// Number of incoming edges observed per node
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParentCounts {
    counts: HashMap<NodeId, usize>,
}

impl ParentCounts {
    /// Create an empty table
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parent count of `node` (0 when never seen as a child)
    #[inline]
    #[must_use]
    pub fn get(&self, node: NodeId) -> usize {
        self.counts.get(&node).copied().unwrap_or(0)
    }

    /// Record one more incoming edge for `node`
    pub fn increment(&mut self, node: NodeId) {
        *self.counts.entry(node).or_insert(0) += 1;
    }

    /// Iterate over nodes with at least one parent
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, usize)> + '_ {
        self.counts.iter().map(|(id, count)| (*id, *count))
    }

    /// Number of nodes with at least one parent
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Whether no edge has been recorded
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}

/// Directed graph of named, shaped nodes
#[derive(Debug, Clone, Default)]
pub struct TreeGraph {
    inner: DiGraph<Node, ()>,
    by_name: HashMap<String, NodeId>,
    parent_counts: ParentCounts,
}

impl TreeGraph {
    /// Create an empty graph
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a node
    ///
    /// Returns the existing handle when `name` is already declared; the first
    /// declaration's shape is kept.
    pub fn add_node(&mut self, name: impl Into<String>, shape: Shape) -> NodeId {
        let name = name.into();
        if let Some(&id) = self.by_name.get(&name) {
            return id;
        }
        let id = self.inner.add_node(Node::new(name.clone(), shape));
        self.by_name.insert(name, id);
        id
    }

    /// Append `child` to the children of `parent`
    ///
    /// Duplicate edges and self loops are stored as given.
    pub fn add_edge(&mut self, parent: NodeId, child: NodeId) {
        self.inner.add_edge(parent, child, ());
        self.parent_counts.increment(child);
    }

    /// Children of `node` in insertion order
    #[must_use]
    pub fn children(&self, node: NodeId) -> Vec<NodeId> {
        let mut edges: Vec<_> = self
            .inner
            .edges(node)
            .map(|edge| (edge.id(), edge.target()))
            .collect();
        edges.sort_by_key(|(edge, _)| *edge);
        edges.into_iter().map(|(_, target)| target).collect()
    }

    /// Node payload
    ///
    /// # Panics
    /// Panics if `id` was not produced by this graph.
    #[inline]
    #[must_use]
    pub fn node(&self, id: NodeId) -> &Node {
        &self.inner[id]
    }

    /// Node payload, if `id` belongs to this graph
    #[inline]
    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.inner.node_weight(id)
    }

    /// Node name
    #[inline]
    #[must_use]
    pub fn name(&self, id: NodeId) -> &str {
        &self.inner[id].name
    }

    /// Node shape
    #[inline]
    #[must_use]
    pub fn shape(&self, id: NodeId) -> Shape {
        self.inner[id].shape
    }

    /// Look up a node by name
    #[inline]
    #[must_use]
    pub fn find(&self, name: &str) -> Option<NodeId> {
        self.by_name.get(name).copied()
    }

    /// First declared `Target` node
    #[must_use]
    pub fn target(&self) -> Option<NodeId> {
        self.node_ids()
            .find(|&id| self.inner[id].shape == Shape::Target)
    }

    /// All node handles in declaration order
    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.inner.node_indices()
    }

    /// All `Selected` nodes in declaration order
    pub fn selected(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.node_ids().filter(|&id| self.inner[id].is_selected())
    }

    /// Incoming edge tally
    #[inline]
    #[must_use]
    pub fn parent_counts(&self) -> &ParentCounts {
        &self.parent_counts
    }

    /// Number of nodes
    #[inline]
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.inner.node_count()
    }

    /// Number of edges, duplicates included
    #[inline]
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.inner.edge_count()
    }

    /// Whether the graph has no nodes
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.node_count() == 0
    }

    /// Names of `ids`, in the given order
    #[must_use]
    pub fn names<I>(&self, ids: I) -> Vec<String>
    where
        I: IntoIterator<Item = NodeId>,
    {
        ids.into_iter()
            .map(|id| self.inner[id].name.clone())
            .collect()
    }
}

impl Index<NodeId> for TreeGraph {
    type Output = Node;

    fn index(&self, id: NodeId) -> &Self::Output {
        &self.inner[id]
    }
}

//! Testing utilities for TCA workspace
//!
//! Shared graph fixtures and lookups.

#![allow(missing_docs)]

use tca_graph::{NodeId, Shape, TreeGraph};

/// Chainable graph builder
///
/// Nodes are declared in call order. Edge endpoints that were not declared
/// before become base nodes.
#[derive(Debug, Clone, Default)]
pub struct GraphFixture {
    graph: TreeGraph,
}

impl GraphFixture {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn node(mut self, name: &str, shape: Shape) -> Self {
        self.graph.add_node(name, shape);
        self
    }

    pub fn target(self, name: &str) -> Self {
        self.node(name, Shape::Target)
    }

    pub fn selected(self, name: &str) -> Self {
        self.node(name, Shape::Selected)
    }

    pub fn base(self, name: &str) -> Self {
        self.node(name, Shape::Base)
    }

    pub fn edge(mut self, parent: &str, child: &str) -> Self {
        let parent = self.graph.add_node(parent, Shape::Base);
        let child = self.graph.add_node(child, Shape::Base);
        self.graph.add_edge(parent, child);
        self
    }

    pub fn edges(self, edges: &[(&str, &str)]) -> Self {
        edges
            .iter()
            .fold(self, |fixture, (parent, child)| fixture.edge(parent, child))
    }

    pub fn build(self) -> TreeGraph {
        self.graph
    }
}

/// Target `t` over `layers` pairs `a{i}`, `b{i}`; both nodes of a pair point
/// to both nodes of the next pair, so node `a{i}` is reached by `2^i` paths
pub fn diamond_ladder(layers: usize) -> TreeGraph {
    let mut fixture = GraphFixture::new().target("t");
    if layers == 0 {
        return fixture.build();
    }
    fixture = fixture.edge("t", "a0").edge("t", "b0");
    for layer in 1..layers {
        for from in ["a", "b"] {
            for to in ["a", "b"] {
                let parent = format!("{from}{}", layer - 1);
                let child = format!("{to}{layer}");
                fixture = fixture.edge(&parent, &child);
            }
        }
    }
    fixture.build()
}

/// DOT source for [`diamond_ladder`]
pub fn diamond_ladder_dot(layers: usize) -> String {
    let graph = diamond_ladder(layers);
    let mut source = String::from("digraph ladder {\n    t [shape=square];\n");
    for parent in graph.node_ids() {
        for child in graph.children(parent) {
            source.push_str(&format!("    {} -> {};\n", graph.name(parent), graph.name(child)));
        }
    }
    source.push('}');
    source
}

/// Handle of a node that must exist
pub fn id(graph: &TreeGraph, name: &str) -> NodeId {
    graph
        .find(name)
        .unwrap_or_else(|| panic!("node {name} is not declared"))
}

/// Names of `ids`, sorted
pub fn sorted_names<I>(graph: &TreeGraph, ids: I) -> Vec<String>
where
    I: IntoIterator<Item = NodeId>,
{
    let mut names = graph.names(ids);
    names.sort();
    names
}

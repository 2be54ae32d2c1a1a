//! Statement reader for DOT graphs

use crate::attributes::{is_keyword, parse_attributes, render_attributes, strip_comments};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;
use tca_graph::{Diagnostic, DiagnosticKind, Diagnostics, NodeId, Shape, TreeGraph};

static NODE_STATEMENT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(\w+(?:\s*,\s*\w+)*)\s*\[([^\]]*)\]\s*;").expect("node pattern is valid")
});

static DIRECTED_EDGE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(\w+(?:\s*->\s*\w+)+)\s*(?:\[([^\]]*)\])?\s*;")
        .expect("directed edge pattern is valid")
});

static UNDIRECTED_EDGE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(\w+(?:\s*--\s*\w+)+)\s*(?:\[([^\]]*)\])?\s*;")
        .expect("undirected edge pattern is valid")
});

/// Result of reading one DOT document
#[derive(Debug, Clone, Default)]
pub struct ParsedGraph {
    /// Declared nodes and edges
    pub graph: TreeGraph,
    /// Syntax-level diagnostics in emission order
    pub diagnostics: Diagnostics,
}

impl ParsedGraph {
    /// Whether structural analysis must be skipped
    #[inline]
    #[must_use]
    pub fn has_fatal(&self) -> bool {
        self.diagnostics.has_fatal()
    }
}

/// DOT reader
///
/// Stateless; every call to [`DotParser::parse`] builds a fresh graph.
#[derive(Debug, Clone, Copy, Default)]
pub struct DotParser;

impl DotParser {
    /// Create a parser
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Read `source` into a graph and its syntax diagnostics
    ///
    /// Node statements are read before edges, so a declared shape always wins
    /// over an implicit declaration by an edge. Edges are not read when the
    /// input has no target node.
    #[must_use]
    pub fn parse(&self, source: &str) -> ParsedGraph {
        let mut parsed = ParsedGraph::default();
        let content = strip_comments(source);

        if content.trim().is_empty() {
            parsed
                .diagnostics
                .push(Diagnostic::new(DiagnosticKind::EmptyInput));
            tracing::debug!("DOT input is empty");
            return parsed;
        }

        let rejected = read_nodes(&content, &mut parsed);

        if parsed.graph.target().is_none() {
            parsed
                .diagnostics
                .push(Diagnostic::new(DiagnosticKind::NoTargetNode));
            tracing::debug!("DOT input declares no target node");
            return parsed;
        }

        read_edges(&content, &rejected, &mut parsed);

        tracing::debug!(
            "Parsed DOT input: {} nodes, {} edges, {} diagnostics",
            parsed.graph.node_count(),
            parsed.graph.edge_count(),
            parsed.diagnostics.len()
        );
        parsed
    }
}

/// Parse DOT source with the default parser
#[inline]
#[must_use]
pub fn parse_dot(source: &str) -> ParsedGraph {
    DotParser::new().parse(source)
}

/// Declare nodes from `name[,name...] [attrs];` statements
///
/// Returns the names whose shape was rejected.
fn read_nodes(content: &str, parsed: &mut ParsedGraph) -> HashSet<String> {
    let mut rejected = HashSet::new();

    for caps in NODE_STATEMENT.captures_iter(content) {
        let Some(statement) = caps.get(0) else {
            continue;
        };
        // `a -> b [label=x];` ends like a node statement
        let before = content[..statement.start()].trim_end();
        if before.ends_with("->") || before.ends_with("--") {
            continue;
        }

        let names: Vec<&str> = caps[1]
            .split(',')
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .collect();
        if names.first().is_some_and(|name| is_keyword(name)) {
            continue;
        }

        let mut attributes = parse_attributes(&caps[2]);
        let shape = match attributes.remove("shape") {
            None => Shape::Base,
            Some(keyword) if keyword.trim().is_empty() => Shape::Base,
            Some(keyword) => {
                if let Some(shape) = Shape::from_keyword(&keyword) {
                    shape
                } else {
                    for name in &names {
                        parsed.diagnostics.push(Diagnostic::with_detail(
                            DiagnosticKind::InvalidNodeShape,
                            *name,
                        ));
                        rejected.insert((*name).to_string());
                    }
                    continue;
                }
            }
        };

        if !attributes.is_empty() {
            let extra = render_attributes(&attributes);
            for name in &names {
                parsed.diagnostics.push(Diagnostic::with_detail(
                    DiagnosticKind::ExtraAttribute,
                    format!("{name} {extra}"),
                ));
            }
        }

        for name in names {
            parsed.graph.add_node(name, shape);
        }
    }

    rejected
}

/// Add edges from directed and undirected edge statements
fn read_edges(content: &str, rejected: &HashSet<String>, parsed: &mut ParsedGraph) {
    let mut undirected = false;

    for (pattern, operator, directed) in [
        (&*DIRECTED_EDGE, "->", true),
        (&*UNDIRECTED_EDGE, "--", false),
    ] {
        for caps in pattern.captures_iter(content) {
            if !directed {
                undirected = true;
            }
            let labelled = caps
                .get(2)
                .is_some_and(|attrs| parse_attributes(attrs.as_str()).contains_key("label"));
            let hops: Vec<&str> = caps[1].split(operator).map(str::trim).collect();

            for pair in hops.windows(2) {
                let (from, to) = (pair[0], pair[1]);
                let Some(parent) = resolve(&mut parsed.graph, rejected, from) else {
                    tracing::debug!("Skipping edge {} {} {}: unknown node", from, operator, to);
                    continue;
                };
                let Some(child) = resolve(&mut parsed.graph, rejected, to) else {
                    tracing::debug!("Skipping edge {} {} {}: unknown node", from, operator, to);
                    continue;
                };

                parsed.graph.add_edge(parent, child);
                if !directed {
                    parsed.graph.add_edge(child, parent);
                }
                if labelled {
                    parsed.diagnostics.push(Diagnostic::with_detail(
                        DiagnosticKind::EdgeAttribute,
                        format!("{from} and {to}"),
                    ));
                }
            }
        }
    }

    if undirected {
        parsed
            .diagnostics
            .push(Diagnostic::new(DiagnosticKind::UndirectedEdge));
    }
}

/// Existing node, or an implicit `Base` declaration
fn resolve(graph: &mut TreeGraph, rejected: &HashSet<String>, name: &str) -> Option<NodeId> {
    if let Some(id) = graph.find(name) {
        return Some(id);
    }
    if rejected.contains(name) || is_keyword(name) {
        return None;
    }
    Some(graph.add_node(name, Shape::Base))
}

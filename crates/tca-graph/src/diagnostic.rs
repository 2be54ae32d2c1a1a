//! Diagnostics reported to the author of a graph
//!
//! Two tiers share one type:
//! - syntax-level kinds come from ingestion (`EmptyInput`, `NoTargetNode`, ...)
//! - structural kinds come from the tree validator (`MultiParents`, `Cycle`,
//!   `DisconnectedGraph`)
//!
//! Diagnostics compare by kind only, so "already reported" checks ignore the
//! detail text and the implicated node.

use crate::graph::NodeId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of problem found in the input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    /// Input contained nothing but whitespace
    EmptyInput,
    /// No node has the target shape
    NoTargetNode,
    /// A cycle is reachable from a root
    Cycle,
    /// Some node is unreachable, or roots span independent components
    DisconnectedGraph,
    /// A node has two or more incoming edges
    MultiParents,
    /// A node uses a shape outside the supported vocabulary
    InvalidNodeShape,
    /// An undirected edge was used
    UndirectedEdge,
    /// A node carries attributes other than `shape`
    ExtraAttribute,
    /// An edge carries a label
    EdgeAttribute,
}

impl DiagnosticKind {
    /// Whether this kind stops structural analysis
    #[inline]
    #[must_use]
    pub const fn is_fatal(self) -> bool {
        matches!(self, Self::EmptyInput | Self::NoTargetNode)
    }
}

/// A single reported problem
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Problem kind
    pub kind: DiagnosticKind,
    /// Free-text detail (node name, attribute list, cycle path, ...)
    pub detail: Option<String>,
    /// Implicated node, when one exists in the graph
    #[serde(skip)]
    pub node: Option<NodeId>,
}

impl Diagnostic {
    /// Diagnostic without detail
    #[inline]
    #[must_use]
    pub fn new(kind: DiagnosticKind) -> Self {
        Self {
            kind,
            detail: None,
            node: None,
        }
    }

    /// Diagnostic with a detail string
    #[inline]
    #[must_use]
    pub fn with_detail(kind: DiagnosticKind, detail: impl Into<String>) -> Self {
        Self {
            kind,
            detail: Some(detail.into()),
            node: None,
        }
    }

    /// Attach the implicated node
    #[inline]
    #[must_use]
    pub fn at(mut self, node: NodeId) -> Self {
        self.node = Some(node);
        self
    }

    /// User-facing message
    #[must_use]
    pub fn message(&self) -> String {
        let detail = self.detail.as_deref().filter(|d| !d.is_empty());
        match (self.kind, detail) {
            (DiagnosticKind::EmptyInput, _) => "The input is empty.".to_string(),
            (DiagnosticKind::NoTargetNode, _) => {
                "There is no target node to determine coverage for.".to_string()
            }
            (DiagnosticKind::Cycle, None) => {
                "The graph is not a tree: it contains a cycle.".to_string()
            }
            (DiagnosticKind::Cycle, Some(path)) => {
                format!("The graph is not a tree: it contains the cycle {path}.")
            }
            (DiagnosticKind::DisconnectedGraph, _) => {
                "The graph is not a tree: it is not connected.".to_string()
            }
            (DiagnosticKind::MultiParents, None) => {
                "The graph is not a tree: some nodes have more than one parent.".to_string()
            }
            (DiagnosticKind::MultiParents, Some(name)) => {
                format!("The graph is not a tree: node {name} has more than one parent.")
            }
            (DiagnosticKind::InvalidNodeShape, None) => {
                "A node shape does not meet the requirements.".to_string()
            }
            (DiagnosticKind::InvalidNodeShape, Some(name)) => {
                format!("The shape of node {name} does not meet the requirements.")
            }
            (DiagnosticKind::UndirectedEdge, _) => {
                "Edges between tree nodes must be directed.".to_string()
            }
            (DiagnosticKind::ExtraAttribute, None) => {
                "A node uses an extra attribute.".to_string()
            }
            (DiagnosticKind::ExtraAttribute, Some(attrs)) => format!(
                "Node {attrs}: remove the extra attributes and keep only the name and shape."
            ),
            (DiagnosticKind::EdgeAttribute, None) => "An edge has a label.".to_string(),
            (DiagnosticKind::EdgeAttribute, Some(ends)) => format!(
                "The edge between {ends} has a label that hurts readability; remove it."
            ),
        }
    }
}

impl PartialEq for Diagnostic {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind
    }
}

impl Eq for Diagnostic {}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message())
    }
}

/// Ordered accumulator of diagnostics for one run
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Diagnostics {
    items: Vec<Diagnostic>,
}

impl Diagnostics {
    /// Create an empty accumulator
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a diagnostic
    pub fn push(&mut self, diagnostic: Diagnostic) {
        self.items.push(diagnostic);
    }

    /// Append unless a diagnostic of the same kind is already present
    ///
    /// Returns whether the diagnostic was appended.
    pub fn push_once(&mut self, diagnostic: Diagnostic) -> bool {
        if self.items.contains(&diagnostic) {
            return false;
        }
        self.items.push(diagnostic);
        true
    }

    /// Whether a diagnostic of `kind` is present
    #[must_use]
    pub fn contains(&self, kind: DiagnosticKind) -> bool {
        self.items.iter().any(|d| d.kind == kind)
    }

    /// Number of diagnostics of `kind`
    #[must_use]
    pub fn count(&self, kind: DiagnosticKind) -> usize {
        self.items.iter().filter(|d| d.kind == kind).count()
    }

    /// Whether a diagnostic blocks structural analysis
    #[must_use]
    pub fn has_fatal(&self) -> bool {
        self.items.iter().any(|d| d.kind.is_fatal())
    }

    /// Iterate in emission order
    pub fn iter(&self) -> std::slice::Iter<'_, Diagnostic> {
        self.items.iter()
    }

    /// Kinds in emission order
    #[must_use]
    pub fn kinds(&self) -> Vec<DiagnosticKind> {
        self.items.iter().map(|d| d.kind).collect()
    }

    /// Number of diagnostics
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether nothing was reported
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a Diagnostic;
    type IntoIter = std::slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equality_ignores_detail() {
        let a = Diagnostic::with_detail(DiagnosticKind::Cycle, "a -> b -> a");
        let b = Diagnostic::with_detail(DiagnosticKind::Cycle, "c -> c");
        assert_eq!(a, b);
        assert_ne!(a, Diagnostic::new(DiagnosticKind::MultiParents));
    }

    #[test]
    fn test_push_once_keeps_first_cycle() {
        let mut diagnostics = Diagnostics::new();
        assert!(diagnostics.push_once(Diagnostic::with_detail(DiagnosticKind::Cycle, "a -> a")));
        assert!(!diagnostics.push_once(Diagnostic::with_detail(DiagnosticKind::Cycle, "b -> b")));

        assert_eq!(diagnostics.count(DiagnosticKind::Cycle), 1);
        let first = diagnostics.iter().next().map(|d| d.detail.clone());
        assert_eq!(first, Some(Some("a -> a".to_string())));
    }

    #[test]
    fn test_push_keeps_repeated_kinds() {
        let mut diagnostics = Diagnostics::new();
        diagnostics.push(Diagnostic::with_detail(DiagnosticKind::MultiParents, "b"));
        diagnostics.push(Diagnostic::with_detail(DiagnosticKind::MultiParents, "c"));
        assert_eq!(diagnostics.len(), 2);
        assert!(!diagnostics.has_fatal());

        diagnostics.push(Diagnostic::new(DiagnosticKind::NoTargetNode));
        assert!(diagnostics.has_fatal());
    }

    #[test]
    fn test_messages_mention_detail() {
        let multi = Diagnostic::with_detail(DiagnosticKind::MultiParents, "b");
        assert!(multi.message().contains("node b"));

        let edge = Diagnostic::with_detail(DiagnosticKind::EdgeAttribute, "a and b");
        assert!(edge.to_string().contains("a and b"));

        let empty_detail = Diagnostic::with_detail(DiagnosticKind::Cycle, "");
        assert_eq!(
            empty_detail.message(),
            "The graph is not a tree: it contains a cycle."
        );
    }
}

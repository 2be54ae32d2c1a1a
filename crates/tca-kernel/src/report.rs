//! Verdict rendering
//!
//! One run yields one verdict. Diagnostics win over findings; among findings
//! extra marks win over redundant marks, which win over missing nodes.

use crate::zones::Findings;
use serde::{Deserialize, Serialize};
use std::fmt;
use tca_graph::{Diagnostics, NodeId, TreeGraph};

/// Single outcome of an analysis run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "verdict", content = "items", rename_all = "snake_case")]
pub enum Verdict {
    /// Input has problems; the diagnostic messages in emission order
    Rejected(Vec<String>),
    /// Marks outside the target's subtree
    Extra(Vec<String>),
    /// `(ancestor mark, nested mark)` pairs
    Redundant(Vec<(String, String)>),
    /// Nodes whose marking would complete coverage
    Missing(Vec<String>),
    /// Target is covered by the listed marks
    Covered(Vec<String>),
}

impl Verdict {
    /// Decide the verdict for a finished run
    #[must_use]
    pub fn decide(graph: &TreeGraph, diagnostics: &Diagnostics, findings: &Findings) -> Self {
        if !diagnostics.is_empty() {
            return Self::Rejected(diagnostics.iter().map(|d| d.message()).collect());
        }
        if !findings.extra.is_empty() {
            return Self::Extra(sorted_names(graph, findings.extra.iter().copied()));
        }
        if !findings.redundant.is_empty() {
            let mut pairs: Vec<(String, String)> = findings
                .redundant
                .iter()
                .map(|&(ancestor, node)| {
                    (graph.name(ancestor).to_string(), graph.name(node).to_string())
                })
                .collect();
            pairs.sort();
            return Self::Redundant(pairs);
        }
        if !findings.missing.is_empty() {
            return Self::Missing(sorted_names(graph, findings.missing.iter().copied()));
        }
        Self::Covered(sorted_names(graph, graph.selected()))
    }

    /// Whether the target is covered without remarks
    #[inline]
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Covered(_))
    }

    /// Text written to the output file
    #[must_use]
    pub fn render(&self) -> String {
        match self {
            Self::Rejected(messages) => messages.join("\n"),
            Self::Extra(names) => format!(
                "Marked nodes outside the target's subtree: {}. Remove these marks.",
                names.join(", ")
            ),
            Self::Redundant(pairs) => {
                let pairs: Vec<String> = pairs
                    .iter()
                    .map(|(ancestor, node)| format!("{node} is already covered by {ancestor}"))
                    .collect();
                format!("Redundant marks: {}.", pairs.join("; "))
            }
            Self::Missing(names) => format!(
                "The target is not fully covered. Missing nodes: {}.",
                names.join(", ")
            ),
            Self::Covered(names) if names.is_empty() => "The target is covered.".to_string(),
            Self::Covered(names) => format!("The target is covered by: {}.", names.join(", ")),
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

pub(crate) fn sorted_names(
    graph: &TreeGraph,
    ids: impl IntoIterator<Item = NodeId>,
) -> Vec<String> {
    let mut names = graph.names(ids);
    names.sort();
    names
}

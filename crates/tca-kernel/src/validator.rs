//! Tree Validator
//!
//! Checks that a parsed graph is a rooted tree and reports every violation
//! instead of stopping at the first one:
//! 1. Nodes with two or more parents (`MultiParents`, one per node)
//! 2. Cycles reachable from a root (`Cycle`, reported once per run)
//! 3. Unreachable nodes or independent components (`DisconnectedGraph`)
//!
//! The walk enters a shared node once per path, so its work is bounded by
//! [`TreeValidator::with_max_visits`]; a walk that hits the bound stops and
//! marks the report as exhausted.
//!
//! Validation never fails. When no node is parentless (an all-cyclic graph)
//! the first declared node is used as a root so the coverage analysis still has
//! somewhere to start.

use std::collections::{BTreeSet, HashSet};
use tca_graph::{Diagnostic, DiagnosticKind, Diagnostics, NodeId, ParentCounts, TreeGraph};

/// Structural classification of a graph
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StructureReport {
    /// Root candidates in declaration order
    pub roots: Vec<NodeId>,
    /// Nodes with two or more parents
    pub multi_parents: BTreeSet<NodeId>,
    /// Whether every node is reachable from one connected root set
    pub connected: bool,
    /// Every cycle found, as the path from its entry node back to that node
    pub cycles: BTreeSet<Vec<NodeId>>,
    /// Number of node entries made by the reachability walk
    pub visits: usize,
    /// Whether the walk stopped at the visit bound
    pub exhausted: bool,
}

impl StructureReport {
    /// Root used by the coverage analysis
    #[inline]
    #[must_use]
    pub fn root(&self) -> Option<NodeId> {
        self.roots.first().copied()
    }

    /// Whether no structural violation was found
    #[must_use]
    pub fn is_tree(&self) -> bool {
        self.roots.len() == 1
            && self.multi_parents.is_empty()
            && self.cycles.is_empty()
            && self.connected
    }
}

/// Cycle bookkeeping shared by all walks of one validation run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WalkState {
    /// Cycles found so far
    pub cycles: BTreeSet<Vec<NodeId>>,
    /// Node entries made so far
    pub visits: usize,
    /// Set once the visit bound is reached
    pub exhausted: bool,
}

/// Rooted-tree validator over a graph and its parent tally
#[derive(Debug, Clone, Copy)]
pub struct TreeValidator<'g> {
    graph: &'g TreeGraph,
    parents: &'g ParentCounts,
    max_visits: usize,
}

impl<'g> TreeValidator<'g> {
    /// Validator using the graph's own parent tally
    #[inline]
    #[must_use]
    pub fn new(graph: &'g TreeGraph) -> Self {
        Self {
            graph,
            parents: graph.parent_counts(),
            max_visits: usize::MAX,
        }
    }

    /// Validator using an externally supplied parent tally
    #[inline]
    #[must_use]
    pub fn with_parent_counts(graph: &'g TreeGraph, parents: &'g ParentCounts) -> Self {
        Self {
            graph,
            parents,
            max_visits: usize::MAX,
        }
    }

    /// Stop the walk after `max_visits` node entries
    #[inline]
    #[must_use]
    pub fn with_max_visits(mut self, max_visits: usize) -> Self {
        self.max_visits = max_visits;
        self
    }

    /// Classify the graph, appending structural diagnostics
    pub fn validate(&self, diagnostics: &mut Diagnostics) -> StructureReport {
        let mut report = StructureReport::default();

        for id in self.graph.node_ids() {
            match self.parents.get(id) {
                0 => report.roots.push(id),
                1 => {}
                count => {
                    tracing::warn!(
                        "Node {} has {} parents",
                        self.graph.name(id),
                        count
                    );
                    report.multi_parents.insert(id);
                    diagnostics.push(
                        Diagnostic::with_detail(DiagnosticKind::MultiParents, self.graph.name(id))
                            .at(id),
                    );
                }
            }
        }

        if report.roots.is_empty() {
            if let Some(fallback) = self.graph.node_ids().next() {
                tracing::debug!(
                    "No parentless node, using {} as root",
                    self.graph.name(fallback)
                );
                report.roots.push(fallback);
            }
        }

        let mut state = WalkState::default();
        let mut reached_sets = Vec::with_capacity(report.roots.len());
        for &root in &report.roots {
            if state.exhausted {
                break;
            }
            let mut path = Vec::new();
            let mut reached = HashSet::new();
            self.visit(root, &mut path, &mut reached, &mut state, diagnostics);
            reached_sets.push(reached);
        }

        report.cycles = state.cycles;
        report.visits = state.visits;
        report.exhausted = state.exhausted;
        if report.exhausted {
            tracing::warn!("Reachability walk stopped after {} visits", report.visits);
            return report;
        }
        report.connected = is_connected(self.graph, &reached_sets);
        if !report.connected {
            tracing::warn!("Graph is not connected");
            diagnostics.push(Diagnostic::new(DiagnosticKind::DisconnectedGraph));
        }

        tracing::debug!(
            "Validated graph: {} roots, {} multi-parent nodes, {} cycles, {} visits",
            report.roots.len(),
            report.multi_parents.len(),
            report.cycles.len(),
            report.visits
        );
        report
    }

    /// Depth-first reachability walk from `node`
    ///
    /// `path` holds the current ancestors and `reached` collects every node
    /// entered. Only ancestors stop the descent: a node reached earlier through
    /// another branch is entered again, once per distinct acyclic path.
    pub fn visit(
        &self,
        node: NodeId,
        path: &mut Vec<NodeId>,
        reached: &mut HashSet<NodeId>,
        state: &mut WalkState,
        diagnostics: &mut Diagnostics,
    ) {
        if state.exhausted {
            return;
        }
        if let Some(start) = path.iter().position(|&ancestor| ancestor == node) {
            let mut cycle = path[start..].to_vec();
            cycle.push(node);

            let rendered = self.graph.names(cycle.iter().copied()).join(" -> ");
            let diagnostic = Diagnostic::with_detail(DiagnosticKind::Cycle, rendered.as_str());
            if diagnostics.push_once(diagnostic.at(node)) {
                tracing::warn!("Cycle found: {}", rendered);
            }
            state.cycles.insert(cycle);
            return;
        }

        if state.visits >= self.max_visits {
            state.exhausted = true;
            return;
        }
        state.visits += 1;
        path.push(node);
        reached.insert(node);
        for child in self.graph.children(node) {
            self.visit(child, path, reached, state, diagnostics);
        }
        path.pop();
    }
}

/// Connectedness over the per-root reached sets
///
/// One root: it must reach every node. Several roots: their reached sets must
/// share at least one common node and together reach every node.
#[must_use]
pub fn is_connected(graph: &TreeGraph, reached_sets: &[HashSet<NodeId>]) -> bool {
    match reached_sets {
        [] => graph.is_empty(),
        [only] => graph.node_ids().all(|id| only.contains(&id)),
        [first, rest @ ..] => {
            let overlap = first
                .iter()
                .any(|id| rest.iter().all(|reached| reached.contains(id)));
            let covered = graph
                .node_ids()
                .all(|id| reached_sets.iter().any(|reached| reached.contains(&id)));
            overlap && covered
        }
    }
}

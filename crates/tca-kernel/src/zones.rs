//! Coverage Zone Analyzer
//!
//! Three mutually recursive walks, entered at the validated root:
//! - [`ZoneAnalyzer::extra_zone`] descends until it meets the target. Marks met
//!   on the way are outside the target's subtree.
//! - [`ZoneAnalyzer::missing_zone`] classifies the subtree under the target and
//!   collects the nodes whose marking would complete coverage.
//! - [`ZoneAnalyzer::redundant_zone`] walks beneath a mark and attributes every
//!   nested mark to that first mark.
//!
//! An uncovered subtree is reported through its highest uncovered node: when
//! all children of an unmarked node are uncovered, the children are replaced
//! by the node itself in the missing set.
//!
//! The graph may still contain cycles here. A child already on the current
//! descent path is skipped, and a node whose children are all skipped counts
//! as a leaf. Shared children are entered once per path; the number of node
//! entries is capped by [`ZoneAnalyzer::with_max_visits`].

use crate::error::TcaError;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};
use tca_graph::{NodeId, Shape, TreeGraph};

/// Coverage adequacy of a subtree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CoverageStatus {
    /// Every path below is covered by a mark
    FullyCovered,
    /// Some paths below are covered, some are not
    PartiallyCovered,
    /// No mark covers anything below
    NotCovered,
}

/// Findings accumulated by one analysis run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Findings {
    /// Marks outside the target's subtree
    pub extra: BTreeSet<NodeId>,
    /// Nodes whose marking would complete coverage
    pub missing: BTreeSet<NodeId>,
    /// `(ancestor mark, nested mark)` pairs
    pub redundant: BTreeSet<(NodeId, NodeId)>,
    /// Status of the target, once reached
    pub target_status: Option<CoverageStatus>,
}

impl Findings {
    /// Whether no extra, redundant or missing node was found
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.extra.is_empty() && self.redundant.is_empty() && self.missing.is_empty()
    }
}

/// Per-run analysis context
#[derive(Debug)]
pub struct ZoneAnalyzer<'g> {
    graph: &'g TreeGraph,
    findings: Findings,
    on_path: HashSet<NodeId>,
    visits: usize,
    max_visits: usize,
    exhausted: bool,
}

impl<'g> ZoneAnalyzer<'g> {
    /// Fresh context over `graph`
    #[inline]
    #[must_use]
    pub fn new(graph: &'g TreeGraph) -> Self {
        Self {
            graph,
            findings: Findings::default(),
            on_path: HashSet::new(),
            visits: 0,
            max_visits: usize::MAX,
            exhausted: false,
        }
    }

    /// Stop descending after `max_visits` node entries
    #[inline]
    #[must_use]
    pub fn with_max_visits(mut self, max_visits: usize) -> Self {
        self.max_visits = max_visits;
        self
    }

    /// Run the analysis from `root` and return the findings
    ///
    /// Fails when the walks need more node entries than the visit bound.
    pub fn analyze(mut self, root: Option<NodeId>) -> Result<Findings, TcaError> {
        self.extra_zone(root);
        if self.exhausted {
            tracing::warn!("Zone analysis stopped after {} visits", self.visits);
            return Err(TcaError::LimitExceeded {
                stage: "zone analysis",
                limit: self.max_visits,
            });
        }
        tracing::debug!(
            "Zone analysis: {} extra, {} redundant, {} missing, target {:?}, {} visits",
            self.findings.extra.len(),
            self.findings.redundant.len(),
            self.findings.missing.len(),
            self.findings.target_status,
            self.visits
        );
        Ok(self.findings)
    }

    /// Findings so far
    #[inline]
    #[must_use]
    pub fn findings(&self) -> &Findings {
        &self.findings
    }

    /// Walk towards the target, flagging marks met before it
    pub fn extra_zone(&mut self, node: Option<NodeId>) {
        let Some(node) = node else {
            return;
        };
        match self.graph.shape(node) {
            Shape::Target => {
                let status = self.missing_zone(Some(node));
                self.findings.target_status = Some(status);
            }
            Shape::Selected => {
                self.findings.extra.insert(node);
                self.descend(node, |this, child| this.redundant_zone(Some(child), node));
            }
            Shape::Base => {
                self.descend(node, |this, child| this.extra_zone(Some(child)));
            }
        }
    }

    /// Classify the coverage under `node`, collecting missing nodes
    pub fn missing_zone(&mut self, node: Option<NodeId>) -> CoverageStatus {
        let Some(node) = node else {
            return CoverageStatus::NotCovered;
        };
        match self.graph.shape(node) {
            Shape::Target => {
                let statuses = self.descend(node, |this, child| this.missing_zone(Some(child)));
                target_status(&statuses)
            }
            Shape::Selected => {
                self.descend(node, |this, child| this.redundant_zone(Some(child), node));
                CoverageStatus::FullyCovered
            }
            Shape::Base => {
                let results =
                    self.descend(node, |this, child| (child, this.missing_zone(Some(child))));

                if results.is_empty() {
                    self.findings.missing.insert(node);
                    return CoverageStatus::NotCovered;
                }
                if results
                    .iter()
                    .all(|(_, status)| *status == CoverageStatus::FullyCovered)
                {
                    return CoverageStatus::FullyCovered;
                }
                if results
                    .iter()
                    .all(|(_, status)| *status == CoverageStatus::NotCovered)
                {
                    for (child, _) in &results {
                        self.findings.missing.remove(child);
                    }
                    self.findings.missing.insert(node);
                    return CoverageStatus::NotCovered;
                }
                CoverageStatus::PartiallyCovered
            }
        }
    }

    /// Attribute every mark under `node` to `ancestor`
    ///
    /// Nested marks keep the first ancestor, so a chain
    /// `ancestor -> A -> B` yields `(ancestor, A)` and `(ancestor, B)`.
    pub fn redundant_zone(&mut self, node: Option<NodeId>, ancestor: NodeId) {
        let Some(node) = node else {
            return;
        };
        match self.graph.shape(node) {
            Shape::Target => {
                let statuses = self.descend(node, |this, child| this.missing_zone(Some(child)));
                self.findings.target_status = Some(target_status(&statuses));
            }
            shape => {
                if shape == Shape::Selected {
                    self.findings.redundant.insert((ancestor, node));
                }
                self.descend(node, |this, child| this.redundant_zone(Some(child), ancestor));
            }
        }
    }

    /// Apply `step` to each child of `node` not already on the descent path
    ///
    /// Counts one visit of `node`. Past the visit bound nothing is descended.
    fn descend<R>(
        &mut self,
        node: NodeId,
        mut step: impl FnMut(&mut Self, NodeId) -> R,
    ) -> Vec<R> {
        if self.exhausted {
            return Vec::new();
        }
        if self.visits >= self.max_visits {
            self.exhausted = true;
            return Vec::new();
        }
        self.visits += 1;
        self.on_path.insert(node);
        let children: Vec<NodeId> = self
            .graph
            .children(node)
            .into_iter()
            .filter(|child| !self.on_path.contains(child))
            .collect();
        let results = children
            .into_iter()
            .map(|child| step(self, child))
            .collect();
        self.on_path.remove(&node);
        results
    }
}

/// A target is fully covered only when it has children and all are covered
fn target_status(statuses: &[CoverageStatus]) -> CoverageStatus {
    if !statuses.is_empty()
        && statuses
            .iter()
            .all(|status| *status == CoverageStatus::FullyCovered)
    {
        CoverageStatus::FullyCovered
    } else {
        CoverageStatus::PartiallyCovered
    }
}

//! Run pipeline
//!
//! Parse, bound, validate, analyze, decide. Each run owns fresh accumulators,
//! so one [`CoverageAnalyzer`] can be reused across inputs.

use crate::config::TcaConfig;
use crate::error::TcaError;
use crate::report::{sorted_names, Verdict};
use crate::validator::{StructureReport, TreeValidator};
use crate::zones::{CoverageStatus, Findings, ZoneAnalyzer};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tca_dot::DotParser;
use tca_graph::{Diagnostics, TreeGraph};

/// Everything produced by one run
#[derive(Debug, Clone)]
pub struct AnalysisOutcome {
    /// Parsed graph
    pub graph: TreeGraph,
    /// Syntax and structural diagnostics in emission order
    pub diagnostics: Diagnostics,
    /// Structural classification, absent when parsing was fatal
    pub structure: Option<StructureReport>,
    /// Zone analysis findings
    pub findings: Findings,
    /// Final verdict
    pub verdict: Verdict,
}

impl AnalysisOutcome {
    /// Serializable view with node names instead of handles
    #[must_use]
    pub fn summary(&self) -> OutcomeSummary {
        let graph = &self.graph;

        let mut redundant: Vec<(String, String)> = self
            .findings
            .redundant
            .iter()
            .map(|&(ancestor, node)| {
                (graph.name(ancestor).to_string(), graph.name(node).to_string())
            })
            .collect();
        redundant.sort();

        OutcomeSummary {
            nodes: graph.node_count(),
            edges: graph.edge_count(),
            roots: self
                .structure
                .as_ref()
                .map(|s| graph.names(s.roots.iter().copied()))
                .unwrap_or_default(),
            diagnostics: self.diagnostics.iter().map(|d| d.message()).collect(),
            extra: sorted_names(graph, self.findings.extra.iter().copied()),
            redundant,
            missing: sorted_names(graph, self.findings.missing.iter().copied()),
            target_status: self.findings.target_status,
            success: self.verdict.is_success(),
            verdict: self.verdict.render(),
        }
    }
}

/// JSON-friendly run summary
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutcomeSummary {
    /// Declared node count
    pub nodes: usize,
    /// Edge count
    pub edges: usize,
    /// Root candidates in declaration order
    pub roots: Vec<String>,
    /// Diagnostic messages in emission order
    pub diagnostics: Vec<String>,
    /// Marks outside the target's subtree
    pub extra: Vec<String>,
    /// `(ancestor mark, nested mark)` pairs
    pub redundant: Vec<(String, String)>,
    /// Nodes whose marking would complete coverage
    pub missing: Vec<String>,
    /// Coverage status of the target, when it was reached
    pub target_status: Option<CoverageStatus>,
    /// Whether the verdict is a success
    pub success: bool,
    /// Rendered verdict
    pub verdict: String,
}

/// Coverage analysis entry point
#[derive(Debug, Clone, Default)]
pub struct CoverageAnalyzer {
    config: TcaConfig,
    parser: DotParser,
}

impl CoverageAnalyzer {
    /// Create an analyzer
    #[inline]
    #[must_use]
    pub fn new(config: TcaConfig) -> Self {
        Self {
            config,
            parser: DotParser::new(),
        }
    }

    /// Configuration in use
    #[inline]
    #[must_use]
    pub fn config(&self) -> &TcaConfig {
        &self.config
    }

    /// Analyze DOT source
    pub fn run(&self, source: &str) -> Result<AnalysisOutcome, TcaError> {
        let parsed = self.parser.parse(source);
        let has_fatal = parsed.has_fatal();
        let graph = parsed.graph;
        let mut diagnostics = parsed.diagnostics;

        if has_fatal {
            tracing::debug!("Fatal syntax diagnostics, skipping structural analysis");
            let verdict = Verdict::decide(&graph, &diagnostics, &Findings::default());
            return Ok(AnalysisOutcome {
                graph,
                diagnostics,
                structure: None,
                findings: Findings::default(),
                verdict,
            });
        }

        let limit = self.config.limits.max_nodes;
        if graph.node_count() > limit {
            return Err(TcaError::GraphTooLarge {
                nodes: graph.node_count(),
                limit,
            });
        }

        let max_visits = self.config.limits.max_visits;
        let structure = TreeValidator::new(&graph)
            .with_max_visits(max_visits)
            .validate(&mut diagnostics);
        if structure.exhausted {
            return Err(TcaError::LimitExceeded {
                stage: "tree validation",
                limit: max_visits,
            });
        }
        let findings = ZoneAnalyzer::new(&graph)
            .with_max_visits(max_visits)
            .analyze(structure.root())?;
        let verdict = Verdict::decide(&graph, &diagnostics, &findings);

        tracing::info!(
            "Analyzed {} nodes: {} diagnostics, success: {}",
            graph.node_count(),
            diagnostics.len(),
            verdict.is_success()
        );

        Ok(AnalysisOutcome {
            graph,
            diagnostics,
            structure: Some(structure),
            findings,
            verdict,
        })
    }

    /// Analyze a DOT file
    pub fn analyze_file(&self, path: impl AsRef<Path>) -> Result<AnalysisOutcome, TcaError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|e| TcaError::io(path, e))?;
        tracing::debug!("Read {} bytes from {}", source.len(), path.display());
        self.run(&source)
    }
}

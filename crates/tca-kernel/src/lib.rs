//! TCA Kernel (tca-kernel)
//!
//! Tree validation and coverage analysis over DOT graphs:
//! 1. **Validation**: is the graph a rooted tree? (multi-parent nodes, cycles,
//!    connectedness)
//! 2. **Zone analysis**: are the marks placed under the target, are any of them
//!    redundant, and which nodes still need one?
//! 3. **Verdict**: one message, diagnostics first, then extra, redundant and
//!    missing findings
//!
//! # Quick Start
//!
//! ```rust
//! use tca_kernel::prelude::*;
//!
//! let source = r#"
//!     digraph coverage {
//!         login [shape=square];
//!         form [shape=diamond];
//!         login -> form;
//!         login -> submit;
//!     }
//! "#;
//!
//! let outcome = CoverageAnalyzer::new(TcaConfig::default()).run(source)?;
//! assert_eq!(outcome.verdict, Verdict::Missing(vec!["submit".to_string()]));
//! # Ok::<(), TcaError>(())
//! ```

pub mod config;
pub mod error;
pub mod logging;
pub mod pipeline;
pub mod report;
pub mod validator;
pub mod zones;

// Re-exports
pub use config::{AnalysisLimits, TcaConfig};
pub use error::{ConfigError, TcaError};
pub use pipeline::{AnalysisOutcome, CoverageAnalyzer, OutcomeSummary};
pub use report::Verdict;
pub use validator::{StructureReport, TreeValidator};
pub use zones::{CoverageStatus, Findings, ZoneAnalyzer};

/// Common imports
pub mod prelude {
    pub use crate::config::TcaConfig;
    pub use crate::error::TcaError;
    pub use crate::pipeline::{AnalysisOutcome, CoverageAnalyzer};
    pub use crate::report::Verdict;
    pub use crate::validator::{StructureReport, TreeValidator};
    pub use crate::zones::{CoverageStatus, Findings, ZoneAnalyzer};
    pub use tca_dot::parse_dot;
    pub use tca_graph::{Diagnostic, DiagnosticKind, Diagnostics, NodeId, Shape, TreeGraph};
}

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

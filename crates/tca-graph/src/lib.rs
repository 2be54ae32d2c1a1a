//! TCA Graph (tca-graph)
//!
//! Arena model shared by ingestion and analysis:
//! - [`TreeGraph`]: nodes addressed by stable [`NodeId`] handles, children kept
//!   in edge insertion order, duplicate and cyclic edges allowed
//! - [`ParentCounts`]: incoming edge tally per node
//! - [`Diagnostic`]: the error model reported to the user
//!
//! # Quick Start
//!
//! ```rust
//! use tca_graph::{Shape, TreeGraph};
//!
//! let mut graph = TreeGraph::new();
//! let a = graph.add_node("a", Shape::Target);
//! let b = graph.add_node("b", Shape::Selected);
//! graph.add_edge(a, b);
//!
//! assert_eq!(graph.children(a), vec![b]);
//! assert_eq!(graph.parent_counts().get(b), 1);
//! ```

pub mod diagnostic;
pub mod graph;
pub mod node;

pub use diagnostic::{Diagnostic, DiagnosticKind, Diagnostics};
pub use graph::{NodeId, ParentCounts, TreeGraph};
pub use node::{Node, Shape};

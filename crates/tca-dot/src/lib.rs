//! DOT ingestion for TCA
//!
//! Turns DOT source into a [`TreeGraph`](tca_graph::TreeGraph) plus the
//! syntax-level diagnostics found on the way:
//! - empty input and a missing target node
//! - unsupported shapes, extra node attributes, labelled edges
//! - undirected edges
//!
//! The reader is statement based: it recognises `name [attrs];`,
//! `a -> b [-> c ...] [attrs];` and `a -- b [attrs];` and ignores everything
//! else (graph headers, braces, `graph`/`node`/`edge` defaults).

mod attributes;
mod parser;

pub use parser::{parse_dot, DotParser, ParsedGraph};

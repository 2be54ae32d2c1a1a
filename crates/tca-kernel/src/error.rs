//! Error types for the TCA kernel
//!
//! Problems in the analysed graph are never errors here; they are reported as
//! [`Diagnostic`](tca_graph::Diagnostic)s. These types cover operational
//! failures only: unreadable input, bad configuration, inputs over the
//! configured size bound.

use std::path::PathBuf;

/// Main kernel error type
#[derive(Debug, thiserror::Error)]
pub enum TcaError {
    /// Input or output file could not be accessed
    #[error("failed to access {}: {source}", .path.display())]
    Io {
        /// Offending path
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// Configuration could not be loaded
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Graph exceeds the configured node bound
    #[error("graph has {nodes} nodes, the configured limit is {limit}")]
    GraphTooLarge {
        /// Declared node count
        nodes: usize,
        /// Configured limit
        limit: usize,
    },

    /// A walk entered more nodes than the configured visit bound
    #[error("{stage} stopped after {limit} node visits, the configured limit")]
    LimitExceeded {
        /// Walk that hit the bound
        stage: &'static str,
        /// Configured limit
        limit: usize,
    },
}

impl TcaError {
    /// Wrap an I/O error with the path it concerns
    #[inline]
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File is not valid TOML for the config schema
    #[error("invalid TOML: {0}")]
    Toml(#[from] toml::de::Error),

    /// A field holds an unusable value
    #[error("invalid value for `{field}`: {reason}")]
    Invalid {
        /// Field name
        field: &'static str,
        /// Why the value was rejected
        reason: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_mentions_path() {
        let err = TcaError::io(
            "missing.dot",
            std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"),
        );
        let text = err.to_string();
        assert!(text.contains("missing.dot"));
        assert!(text.contains("no such file"));
    }

    #[test]
    fn test_limit_error_display() {
        let err = TcaError::GraphTooLarge {
            nodes: 12,
            limit: 10,
        };
        assert_eq!(
            err.to_string(),
            "graph has 12 nodes, the configured limit is 10"
        );
    }

    #[test]
    fn test_visit_limit_display() {
        let err = TcaError::LimitExceeded {
            stage: "tree validation",
            limit: 100,
        };
        assert_eq!(
            err.to_string(),
            "tree validation stopped after 100 node visits, the configured limit"
        );
    }
}

//! Analyzer configuration
//!
//! Every field has a default, so an empty TOML file is a valid config:
//!
//! ```toml
//! output = "coverage_result.txt"
//! log_filter = "warn"
//!
//! [limits]
//! max_nodes = 10000
//! max_visits = 1000000
//! ```

use crate::error::{ConfigError, TcaError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default verdict file
pub const DEFAULT_OUTPUT: &str = "coverage_result.txt";

/// Bounds on input size and on traversal work
///
/// The reachability walk and the zone walks re-enter shared subtrees once per
/// path, so their cost grows with the number of paths rather than nodes.
/// `max_visits` caps the node entries of each walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisLimits {
    /// Largest accepted node count
    pub max_nodes: usize,
    /// Largest number of node entries per walk
    pub max_visits: usize,
}

impl Default for AnalysisLimits {
    fn default() -> Self {
        Self {
            max_nodes: 10_000,
            max_visits: 1_000_000,
        }
    }
}

/// Kernel configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TcaConfig {
    /// Where the rendered verdict is written
    pub output: PathBuf,
    /// `tracing` filter used when `RUST_LOG` is unset
    pub log_filter: String,
    /// Input bounds
    pub limits: AnalysisLimits,
}

impl Default for TcaConfig {
    fn default() -> Self {
        Self {
            output: PathBuf::from(DEFAULT_OUTPUT),
            log_filter: "warn".to_string(),
            limits: AnalysisLimits::default(),
        }
    }
}

impl TcaConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With output path
    #[inline]
    #[must_use]
    pub fn with_output(mut self, output: impl Into<PathBuf>) -> Self {
        self.output = output.into();
        self
    }

    /// With log filter
    #[inline]
    #[must_use]
    pub fn with_log_filter(mut self, filter: impl Into<String>) -> Self {
        self.log_filter = filter.into();
        self
    }

    /// With node bound
    #[inline]
    #[must_use]
    pub fn with_max_nodes(mut self, max_nodes: usize) -> Self {
        self.limits.max_nodes = max_nodes;
        self
    }

    /// With visit bound
    #[inline]
    #[must_use]
    pub fn with_max_visits(mut self, max_visits: usize) -> Self {
        self.limits.max_visits = max_visits;
        self
    }

    /// Parse configuration from TOML text
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.check()?;
        Ok(config)
    }

    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TcaError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| TcaError::io(path, e))?;
        let config = Self::from_toml_str(&text)?;
        tracing::debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    fn check(&self) -> Result<(), ConfigError> {
        if self.limits.max_nodes == 0 {
            return Err(ConfigError::Invalid {
                field: "limits.max_nodes",
                reason: "must be at least 1".to_string(),
            });
        }
        if self.limits.max_visits == 0 {
            return Err(ConfigError::Invalid {
                field: "limits.max_visits",
                reason: "must be at least 1".to_string(),
            });
        }
        if self.output.as_os_str().is_empty() {
            return Err(ConfigError::Invalid {
                field: "output",
                reason: "must not be empty".to_string(),
            });
        }
        Ok(())
    }
}

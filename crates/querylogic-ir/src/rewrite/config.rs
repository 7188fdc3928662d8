//! Rewrite engine configuration.

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Configuration for the [`RewriteEngine`](super::RewriteEngine).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RewriteConfig {
    /// Upper bound on local simplification passes per node
    pub max_iterations: usize,
    /// Sort conjunction/disjunction operands into a canonical order
    pub canonical_order: bool,
    /// Allow De Morgan rewrites of negated connectives when they pay off
    pub de_morgan: bool,
}

impl Default for RewriteConfig {
    fn default() -> Self {
        Self {
            max_iterations: 64,
            canonical_order: true,
            de_morgan: true,
        }
    }
}

impl RewriteConfig {
    /// Set maximum iterations.
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Keep operands in their original relative order.
    pub fn without_canonical_order(mut self) -> Self {
        self.canonical_order = false;
        self
    }

    pub fn without_de_morgan(mut self) -> Self {
        self.de_morgan = false;
        self
    }

    /// Load a configuration from JSON; missing keys take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

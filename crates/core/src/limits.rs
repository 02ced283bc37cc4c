//! Traversal limits
//!
//! Both the equality engine and the canonical serializer walk graphs
//! recursively. Inheritance chains and nested object graphs from untrusted
//! streams can be arbitrarily deep, so recursion is bounded by
//! [`Limits::max_depth`] instead of by the native call stack.
//!
//! The default keeps a full-depth walk inside a 2 MB thread stack (the
//! default for spawned threads) in unoptimized builds. Raise it only for
//! callers running on larger stacks.
//!
//! Limits can be given in code or loaded from a TOML document:
//!
//! ```toml
//! # Maximum nesting depth of a single walk (default: 100)
//! max_depth = 64
//! ```

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Default maximum nesting depth
pub const DEFAULT_MAX_DEPTH: usize = 100;

/// Traversal limits shared by equality and canonicalization
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Limits {
    /// Maximum nesting depth of a single walk (default: 100)
    pub max_depth: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Limits {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl Limits {
    /// Create limits with small values for testing
    ///
    /// This is useful for unit tests that need to test limit enforcement
    /// without building extremely deep graphs.
    pub fn with_small_limits() -> Self {
        Limits { max_depth: 8 }
    }

    /// Parse limits from a TOML document
    ///
    /// Missing keys take their default values. A zero `max_depth` is rejected.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let limits: Limits = toml::from_str(s)?;
        if limits.max_depth == 0 {
            return Err(Error::InvalidConfig(
                "max_depth must be at least 1".to_string(),
            ));
        }
        Ok(limits)
    }

    /// Validate a nesting depth
    ///
    /// Returns `Err(Error::CycleBudgetExceeded)` once `depth` is past the maximum.
    pub fn check_depth(&self, depth: usize) -> Result<()> {
        if depth > self.max_depth {
            return Err(Error::CycleBudgetExceeded {
                max_depth: self.max_depth,
            });
        }
        Ok(())
    }
}

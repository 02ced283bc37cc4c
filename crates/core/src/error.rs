//! Error types for object graph access and canonicalization
//!
//! This module defines all error types used throughout the workspace.
//! We use `thiserror` for automatic `Display` and `Error` trait implementations.
//!
//! Structural equality never produces these: every mismatch there resolves to
//! `false`. They surface from graph accessors, the canonical serializer and
//! configuration loading.

use crate::graph::Handle;
use crate::model::ContentKind;
use thiserror::Error;

/// Result type alias for javaobj operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for javaobj
#[derive(Debug, Error)]
pub enum Error {
    /// Handle outside the arena
    #[error("Dangling handle {handle}: graph holds {len} entries")]
    DanglingHandle {
        /// Offending handle
        handle: Handle,
        /// Number of entries in the arena
        len: usize,
    },

    /// Handle reserved but never filled
    #[error("Handle {0} was reserved but never filled")]
    UnfilledHandle(Handle),

    /// Attempt to fill a handle that already holds content
    #[error("Handle {0} is already filled")]
    AlreadyFilled(Handle),

    /// Content has a different kind than the caller asked for
    #[error("Kind mismatch at {handle}: expected {expected}, found {found}")]
    KindMismatch {
        /// Handle that was looked up
        handle: Handle,
        /// Kind the caller required
        expected: &'static str,
        /// Kind actually stored
        found: ContentKind,
    },

    /// Content kind has no canonical representation in this slot
    #[error("Unsupported variant {kind} in {slot}")]
    UnsupportedVariant {
        /// Kind found in the slot
        kind: ContentKind,
        /// Slot description, e.g. "object class descriptor"
        slot: &'static str,
    },

    /// Stored counts disagree with the declared shape
    ///
    /// Raised for objects whose field groups do not line up with the class
    /// chain and for arrays whose element count differs from their length.
    #[error("Shape mismatch at {handle}: expected {expected} {what}, found {found}")]
    ShapeMismatch {
        /// Object or array handle
        handle: Handle,
        /// What was counted
        what: &'static str,
        /// Count required by the descriptor
        expected: usize,
        /// Count actually stored
        found: usize,
    },

    /// Recursion depth budget exhausted
    #[error("Cycle budget exceeded: nesting deeper than {max_depth} levels")]
    CycleBudgetExceeded {
        /// Configured maximum depth
        max_depth: usize,
    },

    /// A reference re-enters content that is still being walked
    #[error("Back-reference cycle through {handle}")]
    BackReferenceCycle {
        /// Handle re-entered
        handle: Handle,
    },

    /// Block payload longer than a block header can declare
    #[error("Block data of {len} bytes exceeds the u32 size header")]
    BlockTooLarge {
        /// Payload length
        len: usize,
    },

    /// Invalid configuration document
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl From<toml::de::Error> for Error {
    fn from(e: toml::de::Error) -> Self {
        Error::InvalidConfig(e.to_string())
    }
}

impl Error {
    /// Stable reason code for reports
    pub fn kind_code(&self) -> &'static str {
        match self {
            Error::DanglingHandle { .. } => "dangling_handle",
            Error::UnfilledHandle(_) => "unfilled_handle",
            Error::AlreadyFilled(_) => "already_filled",
            Error::KindMismatch { .. } => "kind_mismatch",
            Error::UnsupportedVariant { .. } => "unsupported_variant",
            Error::ShapeMismatch { .. } => "shape_mismatch",
            Error::CycleBudgetExceeded { .. } => "cycle_budget_exceeded",
            Error::BackReferenceCycle { .. } => "back_reference_cycle",
            Error::BlockTooLarge { .. } => "block_too_large",
            Error::InvalidConfig(_) => "invalid_config",
        }
    }
}

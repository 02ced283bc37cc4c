//! Canonical form for javaobj graphs
//!
//! This crate turns an [`ObjectGraph`](javaobj_core::ObjectGraph) value into
//! an acyclic, ordered [`Node`] tree meant for inspection and text rendering:
//! - Node: ordered maps, lists and scalars, `serde::Serialize`
//! - canonical: the per-kind schema and the cycle-breaking walk

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod canonical;
pub mod node;

pub use canonical::{canonicalize, canonicalize_handle, Canonicalizer, SELF_MARKER};
pub use node::Node;

//! Core types for javaobj
//!
//! This crate defines the object graph reconstructed from a Java
//! serialization stream and structural equality over it:
//! - Handle / ObjectGraph: arena of handle-bearing stream content
//! - Content: closed set of classes, proxies, objects, arrays, enums, strings,
//!   exceptions and annotation blocks
//! - Value: slot values (primitives, raw text and bytes, arena references)
//! - equality: cycle-safe deep equality
//! - Limits: traversal depth budget
//! - Error: error type hierarchy
//!
//! Reading and writing the binary stream is left to other crates; they build
//! an [`ObjectGraph`] with [`ObjectGraph::insert`], [`ObjectGraph::reserve`]
//! and the `*_mut` accessors.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod equality;
pub mod error;
pub mod graph;
pub mod limits;
pub mod model;
pub mod value;

pub use equality::{equal, equal_across, Equality};
pub use error::{Error, Result};
pub use graph::{Handle, ObjectGraph, BASE_WIRE_HANDLE};
pub use limits::{Limits, DEFAULT_MAX_DEPTH};
pub use model::{
    BlockData, Content, ContentKind, FieldDesc, JavaArray, JavaClass, JavaEnum, JavaException,
    JavaField, JavaObject, JavaString, ProxyClass, PROXY_CLASS_NAME,
};
pub use value::Value;

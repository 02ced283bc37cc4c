//! javaobj - object graphs of Java serialization streams
//!
//! Models the content reconstructed from a Java Object Serialization Stream
//! (classes, proxies, objects, arrays, enums, strings, exceptions and block
//! data), compares graphs structurally and converts them into a canonical
//! tree for rendering as YAML, JSON or similar.
//!
//! # Quick Start
//!
//! ```
//! use javaobj::{canonicalize_handle, equal, JavaClass, JavaField, JavaObject, JavaString, ObjectGraph};
//!
//! let mut graph = ObjectGraph::new();
//! let class = graph.insert(JavaClass::new("Foo", 1, 2));
//! let bar = graph.insert(JavaString::new("bar"));
//! let obj = graph.insert(JavaObject::new(class));
//! graph
//!     .object_mut(obj)?
//!     .push_group(vec![JavaField::new("x", "Ljava/lang/String;", bar)]);
//!
//! assert!(equal(&graph, &obj.into(), &obj.into()));
//! let tree = canonicalize_handle(&graph, obj)?;
//! assert!(tree.get("javaObject").is_some());
//! # Ok::<(), javaobj::Error>(())
//! ```
//!
//! # Architecture
//!
//! - `javaobj-core`: the arena ([`ObjectGraph`]), content model and
//!   structural equality
//! - `javaobj-canon`: the canonical [`Node`] tree and serializer
//!
//! Reading and writing the binary stream itself is out of scope.

pub use javaobj_canon::*;
pub use javaobj_core::*;

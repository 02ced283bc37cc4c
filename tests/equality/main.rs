//! Structural Equality Integration Tests
//!
//! Deep equality over object graphs: reflexivity, kind discrimination,
//! cycle termination and the name-only class comparison.

#[path = "../common/mod.rs"]
mod common;

mod cycles;

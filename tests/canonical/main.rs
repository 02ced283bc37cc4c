//! Canonical Form Integration Tests
//!
//! Canonical tree schema, field-group ordering, byte buffer collapsing,
//! self markers and reported structural errors.

#[path = "../common/mod.rs"]
mod common;

mod errors;

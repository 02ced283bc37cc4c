//! Shared test utilities for all integration test suites.
//!
//! Graph builders for the shapes the suites keep needing: class chains,
//! self-referencing objects, and one sample of every value kind.
//! Import via `#[path = "../common/mod.rs"] mod common;` from a suite's main.rs.

#![allow(dead_code)]
#![allow(unused_imports)]

use std::sync::Once;

pub use javaobj::{
    canonicalize, canonicalize_handle, equal, equal_across, BlockData, Content, Equality,
    FieldDesc, Handle, JavaArray, JavaClass, JavaEnum, JavaException, JavaField, JavaObject,
    JavaString, Limits, Node, ObjectGraph, ProxyClass, Value,
};

// ============================================================================
// Initialization
// ============================================================================

static INIT_TRACING: Once = Once::new();

/// Route `tracing` output through the test harness.
pub fn init_tracing() {
    INIT_TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_test_writer()
            .with_max_level(tracing::Level::DEBUG)
            .try_init();
    });
}

// ============================================================================
// Builders
// ============================================================================

/// Signature used for `String` fields.
pub const STRING_SIG: &str = "Ljava/lang/String;";

/// Insert a `String` content.
pub fn string(graph: &mut ObjectGraph, text: &str) -> Handle {
    graph.insert(JavaString::new(text))
}

/// Insert a class chain, root first. Returns handles root first.
pub fn class_chain(graph: &mut ObjectGraph, names: &[&str]) -> Vec<Handle> {
    let mut handles = Vec::with_capacity(names.len());
    let mut parent: Option<Handle> = None;
    for name in names {
        let mut class = JavaClass::new(*name, 1, 2);
        class.superclass = parent;
        let handle = graph.insert(class);
        handles.push(handle);
        parent = Some(handle);
    }
    handles
}

/// Insert an object of `class_desc` whose single field points at itself.
pub fn self_referencing(graph: &mut ObjectGraph, class_desc: Handle) -> Handle {
    let obj = graph.insert(JavaObject::new(class_desc));
    graph
        .object_mut(obj)
        .expect("object just inserted")
        .push_group(vec![JavaField::new("me", "Ljava/lang/Object;", obj)]);
    obj
}

/// Stack size of a freshly spawned thread.
pub const SPAWNED_STACK_SIZE: usize = 2 * 1024 * 1024;

/// Run `f` on a thread with a 2 MB stack and return its result.
pub fn on_small_stack<T, F>(f: F) -> T
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    std::thread::Builder::new()
        .stack_size(SPAWNED_STACK_SIZE)
        .spawn(f)
        .expect("spawn walker thread")
        .join()
        .expect("walker thread finished")
}

/// Insert `len` `Link` objects, each holding the previous one in `next`.
///
/// Returns the head. The walk from the head reaches depth `len + 1`: one
/// level per object plus the innermost object's class descriptor.
pub fn link_chain(graph: &mut ObjectGraph, len: usize) -> Handle {
    let class = graph.insert(JavaClass::new("Link", 1, 2));
    let mut next = Value::Null;
    let mut head = None;
    for _ in 0..len {
        let obj = graph.insert(JavaObject::new(class));
        graph
            .object_mut(obj)
            .expect("object just inserted")
            .push_group(vec![JavaField::new("next", "LLink;", next)]);
        next = obj.into();
        head = Some(obj);
    }
    head.expect("chain of at least one link")
}

/// Insert `depth` arrays, each holding the next one. Returns the outermost.
pub fn array_tower(graph: &mut ObjectGraph, depth: usize) -> Handle {
    let mut inner = graph.insert(JavaArray::new("[I", 1));
    graph.array_mut(inner).expect("array just inserted").push(0);
    for _ in 1..depth {
        let mut array = JavaArray::new("[Ljava/lang/Object;", 1);
        array.push(inner);
        inner = graph.insert(array);
    }
    inner
}

/// Number of distinct kinds produced by [`sample`].
pub const SAMPLE_KINDS: usize = 17;

/// Build one value of kind `kind` (0..SAMPLE_KINDS), seeded by `text` and `n`.
///
/// Every kind is distinct from every other: no two kinds can compare equal
/// whatever the seeds.
pub fn sample(graph: &mut ObjectGraph, kind: usize, text: &str, n: i64) -> Value {
    match kind {
        0 => Value::Null,
        1 => Value::Bool(n % 2 == 0),
        2 => Value::Int(n),
        3 => Value::Float(n as f64 + 0.5),
        4 => Value::Text(text.to_string()),
        5 => Value::Bytes(text.as_bytes().to_vec()),
        6 => Value::List(vec![Value::Int(n)]),
        7 => graph.insert(JavaClass::new(text, n, 2)).into(),
        8 => graph.insert(ProxyClass::new([text])).into(),
        9 => {
            let class = graph.insert(JavaClass::new(text, n, 2));
            let value = string(graph, text);
            let obj = graph.insert(JavaObject::new(class));
            graph
                .object_mut(obj)
                .expect("object just inserted")
                .push_group(vec![JavaField::new("v", STRING_SIG, value)]);
            obj.into()
        }
        10 => {
            let mut array = JavaArray::new("[J", 1);
            array.push(n);
            graph.insert(array).into()
        }
        11 => {
            let class = graph.insert(JavaClass::new(text, n, 0x12));
            let name = string(graph, text);
            graph.insert(JavaEnum::new(class, name)).into()
        }
        12 => string(graph, text).into(),
        13 => {
            let inner = string(graph, text);
            graph
                .insert(JavaException {
                    exception: inner.into(),
                })
                .into()
        }
        14 => {
            let block = BlockData::new(text.as_bytes().to_vec()).expect("small block");
            graph.insert(Content::BlockData(block)).into()
        }
        15 => {
            let block = BlockData::new(text.as_bytes().to_vec()).expect("small block");
            graph.insert(Content::LongBlockData(block)).into()
        }
        16 => graph.insert(Content::EndBlock).into(),
        _ => panic!("unknown sample kind {kind}"),
    }
}

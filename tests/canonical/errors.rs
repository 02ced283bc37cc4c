//! Reported Error Tests
//!
//! Structural problems surface as errors instead of truncated trees.

use crate::common::*;
use javaobj::{ContentKind, Error};

#[test]
fn group_count_mismatch() {
    let mut graph = ObjectGraph::new();
    let chain = class_chain(&mut graph, &["Base", "Mid", "Leaf"]);
    let obj = graph.insert(JavaObject::new(chain[2]));
    graph.object_mut(obj).unwrap().push_group(vec![]);

    let err = canonicalize_handle(&graph, obj).unwrap_err();
    assert_eq!(err.kind_code(), "shape_mismatch");
    assert!(matches!(
        err,
        Error::ShapeMismatch {
            handle,
            expected: 3,
            found: 1,
            ..
        } if handle == obj
    ));
}

#[test]
fn class_desc_slot_holding_a_string() {
    let mut graph = ObjectGraph::new();
    let bogus = string(&mut graph, "not a class");
    let obj = graph.insert(JavaObject::new(bogus));
    let err = canonicalize_handle(&graph, obj).unwrap_err();
    assert!(matches!(
        err,
        Error::UnsupportedVariant {
            kind: ContentKind::String,
            slot: "object class descriptor"
        }
    ));
}

#[test]
fn superclass_slot_holding_an_object() {
    let mut graph = ObjectGraph::new();
    let base = graph.insert(JavaClass::new("Base", 1, 2));
    let stray = graph.insert(JavaObject::new(base));
    let leaf = graph.insert(JavaClass::new("Leaf", 1, 2).with_superclass(stray));
    let err = canonicalize_handle(&graph, leaf).unwrap_err();
    assert!(matches!(
        err,
        Error::UnsupportedVariant {
            kind: ContentKind::Object,
            slot: "superclass"
        }
    ));
}

#[test]
fn unfilled_reservation() {
    let mut graph = ObjectGraph::new();
    let pending = graph.reserve();
    let err = canonicalize(&graph, &Value::List(vec![pending.into()])).unwrap_err();
    assert!(matches!(err, Error::UnfilledHandle(h) if h == pending));
}

#[test]
fn indirect_cycle_through_array() {
    let mut graph = ObjectGraph::new();
    let class = graph.insert(JavaClass::new("Bag", 1, 2));
    let obj = graph.reserve();
    let mut array = JavaArray::new("[Ljava/lang/Object;", 1);
    array.push(obj);
    let array = graph.insert(array);
    let mut bag = JavaObject::new(class);
    bag.push_group(vec![JavaField::new("items", "[Ljava/lang/Object;", array)]);
    graph.fill(obj, bag).unwrap();

    let err = canonicalize_handle(&graph, obj).unwrap_err();
    assert!(matches!(err, Error::BackReferenceCycle { handle } if handle == obj));
}

#[test]
fn depth_budget_from_toml() {
    let limits = Limits::from_toml_str("max_depth = 4").unwrap();
    let mut graph = ObjectGraph::new();
    let mut inner: Value = string(&mut graph, "core").into();
    for _ in 0..6 {
        inner = graph.insert(JavaException { exception: inner }).into();
    }
    let err = javaobj::Canonicalizer::with_limits(limits)
        .canonicalize(&graph, &inner)
        .unwrap_err();
    assert!(matches!(err, Error::CycleBudgetExceeded { max_depth: 4 }));
}

#[test]
fn serializer_state_is_per_call() {
    // A failed call must not poison the next one.
    let mut graph = ObjectGraph::new();
    let class = graph.insert(JavaClass::new("Pair", 1, 2));
    let x = graph.insert(JavaObject::new(class));
    let y = graph.insert(JavaObject::new(class));
    graph
        .object_mut(x)
        .unwrap()
        .push_group(vec![JavaField::new("other", "LPair;", y)]);
    graph
        .object_mut(y)
        .unwrap()
        .push_group(vec![JavaField::new("other", "LPair;", Value::Null)]);

    let serializer = javaobj::Canonicalizer::new();
    assert!(serializer.canonicalize(&graph, &x.into()).is_ok());
    graph.object_mut(y).unwrap().fields[0][0].value = x.into();
    assert!(serializer.canonicalize(&graph, &x.into()).is_err());
    graph.object_mut(y).unwrap().fields[0][0].value = Value::Null;
    assert!(serializer.canonicalize(&graph, &x.into()).is_ok());
}

//! Cycle Tests
//!
//! Self references, mutual references and deep chains must all terminate.

use crate::common::*;

#[test]
fn self_referencing_object_equals_itself() {
    init_tracing();
    let mut graph = ObjectGraph::new();
    let class = graph.insert(JavaClass::new("Node", 1, 2));
    let obj = self_referencing(&mut graph, class);
    let copy = graph.clone();

    assert!(equal(&graph, &obj.into(), &obj.into()));
    assert!(equal_across(&graph, &obj.into(), &copy, &obj.into()));
}

#[test]
fn two_self_referencing_objects_are_equal() {
    let mut graph = ObjectGraph::new();
    let class = graph.insert(JavaClass::new("Node", 1, 2));
    let a = self_referencing(&mut graph, class);
    let b = self_referencing(&mut graph, class);
    assert!(equal(&graph, &a.into(), &b.into()));
}

#[test]
fn self_reference_against_foreign_reference_differs() {
    let mut graph = ObjectGraph::new();
    let class = graph.insert(JavaClass::new("Node", 1, 2));
    let a = self_referencing(&mut graph, class);
    let other = string(&mut graph, "elsewhere");
    let b = graph.insert(JavaObject::new(class));
    graph
        .object_mut(b)
        .unwrap()
        .push_group(vec![JavaField::new("me", "Ljava/lang/Object;", other)]);
    assert!(!equal(&graph, &a.into(), &b.into()));
}

#[test]
fn nested_object_pointing_at_root_terminates() {
    // root -> child -> root, compared against an independent copy
    let build = |graph: &mut ObjectGraph| {
        let chain = class_chain(graph, &["Holder"]);
        let root = graph.reserve();
        let child = graph.insert(JavaObject::new(chain[0]));
        graph
            .object_mut(child)
            .unwrap()
            .push_group(vec![JavaField::new("parent", "LHolder;", root)]);
        let mut obj = JavaObject::new(chain[0]);
        obj.push_group(vec![JavaField::new("child", "LHolder;", child)]);
        graph.fill(root, obj).unwrap();
        root
    };
    let mut left = ObjectGraph::new();
    let mut right = ObjectGraph::new();
    let l = build(&mut left);
    // Shift handles so identity cannot line up by accident.
    string(&mut right, "padding");
    let r = build(&mut right);
    assert!(equal_across(&left, &l.into(), &right, &r.into()));
}

#[test]
fn self_containing_array_terminates() {
    let mut left = ObjectGraph::new();
    let a = left.insert(JavaArray::new("[Ljava/lang/Object;", 2));
    left.array_mut(a).unwrap().push(a);
    left.array_mut(a).unwrap().push(7);
    let right = left.clone();
    assert!(equal_across(&left, &a.into(), &right, &a.into()));
}

#[test]
fn deep_chain_respects_depth_budget() {
    let mut left = ObjectGraph::new();
    let class = left.insert(JavaClass::new("Link", 1, 2));
    let mut next = Value::Null;
    for _ in 0..64 {
        let obj = left.insert(JavaObject::new(class));
        left.object_mut(obj)
            .unwrap()
            .push_group(vec![JavaField::new("next", "LLink;", next)]);
        next = obj.into();
    }
    let right = left.clone();

    assert!(equal_across(&left, &next, &right, &next));
    let tight = Equality::with_limits(Limits { max_depth: 16 });
    assert!(!tight.equal(&left, &next, &right, &next));
}

#[test]
fn repeated_comparisons_do_not_interfere() {
    // A failing comparison must leave nothing behind for the next call.
    let mut graph = ObjectGraph::new();
    let class = graph.insert(JavaClass::new("Node", 1, 2));
    let a = self_referencing(&mut graph, class);
    let x = string(&mut graph, "x");
    let b = graph.insert(JavaObject::new(class));
    graph
        .object_mut(b)
        .unwrap()
        .push_group(vec![JavaField::new("me", "Ljava/lang/Object;", x)]);
    let c = self_referencing(&mut graph, class);

    let engine = Equality::new();
    for _ in 0..3 {
        assert!(!engine.equal(&graph, &a.into(), &graph, &b.into()));
        assert!(engine.equal(&graph, &a.into(), &graph, &c.into()));
    }
}

#[test]
fn full_default_depth_fits_spawned_stack() {
    let (at_limit, past_limit) = on_small_stack(|| {
        let mut left = ObjectGraph::new();
        let head = link_chain(&mut left, javaobj::DEFAULT_MAX_DEPTH - 1);
        let long = link_chain(&mut left, javaobj::DEFAULT_MAX_DEPTH);
        let right = left.clone();
        (
            equal_across(&left, &head.into(), &right, &head.into()),
            equal_across(&left, &long.into(), &right, &long.into()),
        )
    });
    assert!(at_limit);
    assert!(!past_limit);
}

#[test]
fn nested_lists_share_the_depth_budget() {
    let mut nested = Value::Int(1);
    for _ in 0..javaobj::DEFAULT_MAX_DEPTH {
        nested = Value::List(vec![nested]);
    }
    let graph = ObjectGraph::new();
    assert!(equal(&graph, &nested, &nested.clone()));
    let deeper = Value::List(vec![nested]);
    assert!(!equal(&graph, &deeper, &deeper.clone()));
}

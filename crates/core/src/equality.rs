//! Structural equality over object graphs
//!
//! Deep comparison of two [`Value`]s whose references may point anywhere in
//! their graphs, including back at an object that is still being compared.
//!
//! ## Rules
//!
//! - Different kinds are never equal; no comparison is an error.
//! - `Class` descriptors compare by name only. `suid`, `flags` and declared
//!   fields are ignored, so two incompatible versions of one class compare
//!   equal.
//! - `ProxyClass` descriptors compare interface lists and superclasses.
//! - Sequences (field groups, fields, elements, annotations, interfaces) must
//!   match position for position and in length.
//! - An `Object` or `Array` that is already being compared on the left side
//!   is treated as equal when reached again. This assumes well-formed mutual
//!   cycles and is not full graph isomorphism.
//! - A field holding the object under comparison on both sides (or the roots
//!   of the top-level call on both sides) matches without recursion.
//!
//! The in-progress set and the depth counter belong to one top-level call and
//! are dropped with it. Depth is bounded by [`Limits::max_depth`]; an
//! exhausted budget compares as `false`.

use crate::graph::{Handle, ObjectGraph};
use crate::limits::Limits;
use crate::model::{Content, JavaArray, JavaField, JavaObject, ProxyClass};
use crate::value::Value;
use std::collections::HashSet;
use std::ops::{Deref, DerefMut};
use tracing::{debug, warn};

/// Compare two values of the same graph
pub fn equal(graph: &ObjectGraph, a: &Value, b: &Value) -> bool {
    Equality::new().equal(graph, a, graph, b)
}

/// Compare a value of one graph with a value of another
pub fn equal_across(left: &ObjectGraph, a: &Value, right: &ObjectGraph, b: &Value) -> bool {
    Equality::new().equal(left, a, right, b)
}

/// Structural equality with configurable limits
#[derive(Debug, Clone, Default)]
pub struct Equality {
    limits: Limits,
}

impl Equality {
    /// Create an engine with default limits
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an engine with custom limits
    pub fn with_limits(limits: Limits) -> Self {
        Equality { limits }
    }

    /// Compare `a` in `left` with `b` in `right`
    ///
    /// `left` and `right` may be the same graph.
    pub fn equal(&self, left: &ObjectGraph, a: &Value, right: &ObjectGraph, b: &Value) -> bool {
        let mut cmp = Comparator::new(left, right, &self.limits);
        if let (Value::Ref(l), Value::Ref(r)) = (a, b) {
            cmp.roots = Some((*l, *r));
        }
        cmp.values(a, b)
    }

    /// Compare the content behind two handles
    pub fn equal_handles(
        &self,
        left: &ObjectGraph,
        a: Handle,
        right: &ObjectGraph,
        b: Handle,
    ) -> bool {
        self.equal(left, &Value::Ref(a), right, &Value::Ref(b))
    }
}

/// State of one top-level comparison
struct Comparator<'g> {
    left: &'g ObjectGraph,
    right: &'g ObjectGraph,
    limits: &'g Limits,
    roots: Option<(Handle, Handle)>,
    in_progress: HashSet<Handle>,
    depth: usize,
    budget_exhausted: bool,
}

/// What a [`Scope`] gives back when it is dropped
enum Release {
    Depth,
    InProgress(Handle),
}

/// Scoped acquisition on a [`Comparator`]
///
/// Entering a nested content bumps the depth; starting work on an object or
/// array marks its left handle in progress. Dropping the scope undoes it on
/// every exit path.
struct Scope<'c, 'g> {
    cmp: &'c mut Comparator<'g>,
    release: Release,
}

impl<'g> Deref for Scope<'_, 'g> {
    type Target = Comparator<'g>;

    fn deref(&self) -> &Self::Target {
        self.cmp
    }
}

impl DerefMut for Scope<'_, '_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.cmp
    }
}

impl Drop for Scope<'_, '_> {
    fn drop(&mut self) {
        match self.release {
            Release::Depth => self.cmp.depth -= 1,
            Release::InProgress(handle) => {
                self.cmp.in_progress.remove(&handle);
            }
        }
    }
}

impl<'g> Comparator<'g> {
    fn new(left: &'g ObjectGraph, right: &'g ObjectGraph, limits: &'g Limits) -> Self {
        Comparator {
            left,
            right,
            limits,
            roots: None,
            in_progress: HashSet::new(),
            depth: 0,
            budget_exhausted: false,
        }
    }

    fn same_graph(&self) -> bool {
        std::ptr::eq(self.left, self.right)
    }

    fn descend(&mut self) -> Scope<'_, 'g> {
        self.depth += 1;
        Scope {
            cmp: self,
            release: Release::Depth,
        }
    }

    fn track(&mut self, handle: Handle) -> Scope<'_, 'g> {
        self.in_progress.insert(handle);
        Scope {
            cmp: self,
            release: Release::InProgress(handle),
        }
    }

    fn values(&mut self, a: &Value, b: &Value) -> bool {
        match (a, b) {
            (Value::Ref(l), Value::Ref(r)) => self.handles(*l, *r),
            (Value::List(x), Value::List(y)) => {
                if x.len() != y.len() || !self.within_budget() {
                    return false;
                }
                let mut scope = self.descend();
                x.iter().zip(y).all(|(p, q)| scope.values(p, q))
            }
            _ => a == b,
        }
    }

    /// Whether one more level fits in the depth budget
    fn within_budget(&mut self) -> bool {
        if self.depth < self.limits.max_depth {
            return true;
        }
        if !self.budget_exhausted {
            warn!(target: "javaobj::eq", max_depth = self.limits.max_depth, "Depth budget exhausted, comparing as unequal");
            self.budget_exhausted = true;
        }
        false
    }

    fn handles(&mut self, l: Handle, r: Handle) -> bool {
        if self.same_graph() && l == r {
            return true;
        }
        if !self.within_budget() {
            return false;
        }
        let (left, right) = (self.left, self.right);
        let (lc, rc) = match (left.get(l), right.get(r)) {
            (Ok(lc), Ok(rc)) => (lc, rc),
            (Err(e), _) | (_, Err(e)) => {
                debug!(target: "javaobj::eq", %l, %r, error = %e, "Unresolvable handle");
                return false;
            }
        };
        let mut scope = self.descend();
        let equal = scope.contents(l, lc, r, rc);
        if !equal {
            debug!(target: "javaobj::eq", %l, %r, left = %lc.kind(), right = %rc.kind(), "Contents differ");
        }
        equal
    }

    fn contents(&mut self, l: Handle, lc: &'g Content, r: Handle, rc: &'g Content) -> bool {
        match lc {
            Content::Class(a) => matches!(rc, Content::Class(b) if a.name == b.name),
            Content::ProxyClass(a) => match rc {
                Content::ProxyClass(b) => self.proxies(a, b),
                _ => false,
            },
            Content::Object(a) => match rc {
                Content::Object(b) => self.objects(l, a, r, b),
                _ => false,
            },
            Content::Array(a) => match rc {
                Content::Array(b) => self.arrays(l, a, b),
                _ => false,
            },
            Content::Enum(a) => match rc {
                Content::Enum(b) => {
                    self.handles(a.class_desc, b.class_desc)
                        && self.values(&a.constant_name, &b.constant_name)
                }
                _ => false,
            },
            Content::String(a) => matches!(rc, Content::String(b) if a == b),
            Content::Exception(a) => match rc {
                Content::Exception(b) => self.values(&a.exception, &b.exception),
                _ => false,
            },
            Content::BlockData(a) => matches!(rc, Content::BlockData(b) if a == b),
            Content::LongBlockData(a) => matches!(rc, Content::LongBlockData(b) if a == b),
            Content::EndBlock => matches!(rc, Content::EndBlock),
        }
    }

    fn proxies(&mut self, a: &ProxyClass, b: &ProxyClass) -> bool {
        if a.interfaces != b.interfaces {
            return false;
        }
        match (a.superclass, b.superclass) {
            (None, None) => true,
            (Some(x), Some(y)) => self.handles(x, y),
            _ => false,
        }
    }

    fn objects(&mut self, l: Handle, a: &JavaObject, r: Handle, b: &JavaObject) -> bool {
        if !self.handles(a.class_desc, b.class_desc) {
            return false;
        }
        if a.fields.len() != b.fields.len() {
            return false;
        }
        if self.in_progress.contains(&l) {
            return true;
        }

        let mut scope = self.track(l);
        for (group_a, group_b) in a.fields.iter().zip(&b.fields) {
            if group_a.len() != group_b.len() {
                return false;
            }
            for (fa, fb) in group_a.iter().zip(group_b) {
                if scope.is_self_reference(&fa.value, l, &fb.value, r) {
                    continue;
                }
                if !scope.fields(fa, fb) {
                    return false;
                }
            }
        }

        a.object_annotation.len() == b.object_annotation.len()
            && a.object_annotation
                .iter()
                .zip(&b.object_annotation)
                .all(|(x, y)| scope.values(x, y))
    }

    fn is_self_reference(&self, a: &Value, l: Handle, b: &Value, r: Handle) -> bool {
        match (a, b) {
            (Value::Ref(x), Value::Ref(y)) => {
                (*x == l && *y == r) || self.roots == Some((*x, *y))
            }
            _ => false,
        }
    }

    fn fields(&mut self, a: &JavaField, b: &JavaField) -> bool {
        a.field_name == b.field_name
            && self.values(&a.signature, &b.signature)
            && self.values(&a.value, &b.value)
    }

    fn arrays(&mut self, l: Handle, a: &JavaArray, b: &JavaArray) -> bool {
        if a.length != b.length || a.elements.len() != b.elements.len() {
            return false;
        }
        if self.in_progress.contains(&l) {
            return true;
        }
        let mut scope = self.track(l);
        a.elements
            .iter()
            .zip(&b.elements)
            .all(|(x, y)| scope.values(x, y))
    }
}

//! Canonical serializer
//!
//! Turns a value of an [`ObjectGraph`] into an acyclic [`Node`] tree with a
//! fixed schema per content kind:
//!
//! | Content | Node |
//! |---|---|
//! | Class | `{javaClass: {name, suid, flags, fields, superClass, classAnnotations}}` |
//! | ProxyClass | `{JavaproxyClass: {interfaces, classAnnotations, superClass}}` |
//! | Object | `{javaObject: {classDesc, Values, objectAnnotation}}` |
//! | Array | `{javaArray: {signature, length, values}}` |
//! | Enum | `{javaenum: {classDesc, enumConstantName}}` |
//! | String | `{javaString: text}` |
//! | Exception | `{javaException: inner}` |
//! | BlockData | `{javaBlockData: {size, data}}` |
//! | LongBlockData | `{javaLongBlockData: {size, data}}` |
//! | EndBlock | `{javaEndBLock: "javaEndBLock"}` |
//!
//! Object `Values` hold one `{<className>: [{data: {type, fieldName, value}}]}`
//! entry per class in the inheritance chain, root ancestor first. A field
//! whose value is the object itself is written as the marker `"self"`.
//! Any other reference back into an object, array or class descriptor that is
//! still being written is an error, as is nesting past [`Limits::max_depth`].
//! Every arena entry and every nested list counts as one level.
//!
//! Non-empty runs of raw byte buffers (array elements or bare lists)
//! collapse into one concatenated buffer.

use crate::node::Node;
use javaobj_core::{
    BlockData, Content, Error, Handle, JavaArray, JavaClass, JavaObject, Limits, ObjectGraph,
    ProxyClass, Result, Value,
};
use tracing::{debug, warn};

/// Marker written for a field that refers to its own object
pub const SELF_MARKER: &str = "self";

/// Canonicalize a value with default limits
pub fn canonicalize(graph: &ObjectGraph, value: &Value) -> Result<Node> {
    Canonicalizer::new().canonicalize(graph, value)
}

/// Canonicalize the content behind a handle with default limits
pub fn canonicalize_handle(graph: &ObjectGraph, handle: Handle) -> Result<Node> {
    Canonicalizer::new().canonicalize(graph, &Value::Ref(handle))
}

/// Canonical serializer with configurable limits
#[derive(Debug, Clone, Default)]
pub struct Canonicalizer {
    limits: Limits,
}

impl Canonicalizer {
    /// Create a serializer with default limits
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a serializer with custom limits
    pub fn with_limits(limits: Limits) -> Self {
        Canonicalizer { limits }
    }

    /// Canonicalize `value`
    pub fn canonicalize(&self, graph: &ObjectGraph, value: &Value) -> Result<Node> {
        Walker {
            graph,
            limits: &self.limits,
            in_progress: Vec::new(),
            depth: 0,
        }
        .value(value)
    }
}

/// State of one canonicalization
struct Walker<'g> {
    graph: &'g ObjectGraph,
    limits: &'g Limits,
    in_progress: Vec<Handle>,
    depth: usize,
}

impl<'g> Walker<'g> {
    /// Run `f` one level deeper, with `tracked` marked as being written
    fn enter<T>(
        &mut self,
        tracked: Option<Handle>,
        f: impl FnOnce(&mut Self) -> Result<T>,
    ) -> Result<T> {
        if let Err(e) = self.limits.check_depth(self.depth + 1) {
            warn!(target: "javaobj::canon", max_depth = self.limits.max_depth, "Depth budget exhausted");
            return Err(e);
        }
        self.depth += 1;
        if let Some(handle) = tracked {
            self.in_progress.push(handle);
        }
        let out = f(self);
        if tracked.is_some() {
            self.in_progress.pop();
        }
        self.depth -= 1;
        out
    }

    fn value(&mut self, value: &Value) -> Result<Node> {
        Ok(match value {
            Value::Null => Node::Null,
            Value::Bool(b) => Node::Bool(*b),
            Value::Int(i) => Node::Int(*i),
            Value::Float(f) => Node::Float(*f),
            Value::Text(s) => Node::Str(s.clone()),
            Value::Bytes(b) => Node::Bytes(b.clone()),
            Value::List(items) => match Value::concat_bytes(items) {
                Some(bytes) => Node::Bytes(bytes),
                None => Node::List(self.enter(None, |w| w.values(items))?),
            },
            Value::Ref(handle) => self.handle(*handle)?,
        })
    }

    fn values(&mut self, values: &[Value]) -> Result<Vec<Node>> {
        let mut nodes = Vec::with_capacity(values.len());
        for value in values {
            nodes.push(self.value(value)?);
        }
        Ok(nodes)
    }

    fn handle(&mut self, handle: Handle) -> Result<Node> {
        if self.in_progress.contains(&handle) {
            debug!(target: "javaobj::canon", %handle, "Reference re-enters content being written");
            return Err(Error::BackReferenceCycle { handle });
        }
        let graph = self.graph;
        let content = graph.get(handle)?;
        // Class descriptors are tracked too: a superclass loop is a cycle.
        let tracked = matches!(
            content,
            Content::Object(_) | Content::Array(_) | Content::Class(_) | Content::ProxyClass(_)
        )
        .then_some(handle);
        self.enter(tracked, |w| w.content(handle, content))
    }

    /// Canonicalize a slot that must hold a class or proxy descriptor
    fn class_desc(&mut self, handle: Handle, slot: &'static str) -> Result<Node> {
        let content = self.graph.get(handle)?;
        if !content.is_class_desc() {
            return Err(Error::UnsupportedVariant {
                kind: content.kind(),
                slot,
            });
        }
        self.handle(handle)
    }

    fn content(&mut self, handle: Handle, content: &'g Content) -> Result<Node> {
        Ok(match content {
            Content::Class(class) => self.class(class)?,
            Content::ProxyClass(proxy) => self.proxy(proxy)?,
            Content::Object(object) => self.object(handle, object)?,
            Content::Array(array) => self.array(handle, array)?,
            Content::Enum(e) => Node::map([(
                "javaenum",
                Node::map([
                    ("classDesc", self.class_desc(e.class_desc, "enum class descriptor")?),
                    ("enumConstantName", self.value(&e.constant_name)?),
                ]),
            )]),
            Content::String(s) => Node::map([("javaString", Node::from(s.as_str()))]),
            Content::Exception(e) => Node::map([("javaException", self.value(&e.exception)?)]),
            Content::BlockData(block) => block_node("javaBlockData", block),
            Content::LongBlockData(block) => block_node("javaLongBlockData", block),
            Content::EndBlock => Node::map([("javaEndBLock", Node::from("javaEndBLock"))]),
        })
    }

    fn superclass(&mut self, superclass: Option<Handle>) -> Result<Node> {
        match superclass {
            Some(handle) => self.class_desc(handle, "superclass"),
            None => Ok(Node::Null),
        }
    }

    fn class(&mut self, class: &JavaClass) -> Result<Node> {
        let mut fields = Vec::with_capacity(class.fields.len());
        for field in &class.fields {
            fields.push(Node::map([
                ("name", Node::from(field.name.as_str())),
                ("signature", self.value(&field.signature)?),
            ]));
        }
        Ok(Node::map([(
            "javaClass",
            Node::map([
                ("name", Node::from(class.name.as_str())),
                ("suid", Node::Int(class.suid)),
                ("flags", Node::Int(class.flags.into())),
                ("fields", Node::List(fields)),
                ("superClass", self.superclass(class.superclass)?),
                ("classAnnotations", Node::List(self.values(&class.class_annotations)?)),
            ]),
        )]))
    }

    fn proxy(&mut self, proxy: &ProxyClass) -> Result<Node> {
        let interfaces = proxy
            .interfaces
            .iter()
            .map(|i| Node::from(i.as_str()))
            .collect();
        Ok(Node::map([(
            "JavaproxyClass",
            Node::map([
                ("interfaces", Node::List(interfaces)),
                ("classAnnotations", Node::List(self.values(&proxy.class_annotations)?)),
                ("superClass", self.superclass(proxy.superclass)?),
            ]),
        )]))
    }

    fn object(&mut self, handle: Handle, object: &JavaObject) -> Result<Node> {
        let class_desc = self.class_desc(object.class_desc, "object class descriptor")?;

        // Field groups are stored root ancestor first, like the chain.
        let chain = self.graph.class_chain(object.class_desc)?;
        if chain.len() != object.fields.len() {
            debug!(target: "javaobj::canon", %handle, chain_len = chain.len(), groups = object.fields.len(), "Field groups do not match class chain");
            return Err(Error::ShapeMismatch {
                handle,
                what: "field groups",
                expected: chain.len(),
                found: object.fields.len(),
            });
        }

        let mut values = Vec::with_capacity(chain.len());
        for (&class_handle, group) in chain.iter().zip(&object.fields) {
            let class_name = self
                .graph
                .get(class_handle)?
                .class_name()
                .unwrap_or_default()
                .to_string();
            let mut entries = Vec::with_capacity(group.len());
            for field in group {
                let value = match field.value {
                    Value::Ref(target) if target == handle => Node::from(SELF_MARKER),
                    ref other => self.value(other)?,
                };
                entries.push(Node::map([(
                    "data",
                    Node::map([
                        ("type", self.value(&field.signature)?),
                        ("fieldName", Node::from(field.field_name.as_str())),
                        ("value", value),
                    ]),
                )]));
            }
            values.push(Node::map([(class_name, Node::List(entries))]));
        }

        Ok(Node::map([(
            "javaObject",
            Node::map([
                ("classDesc", class_desc),
                ("Values", Node::List(values)),
                ("objectAnnotation", Node::List(self.values(&object.object_annotation)?)),
            ]),
        )]))
    }

    fn array(&mut self, handle: Handle, array: &JavaArray) -> Result<Node> {
        if !array.is_complete() {
            return Err(Error::ShapeMismatch {
                handle,
                what: "array elements",
                expected: array.length,
                found: array.elements.len(),
            });
        }
        let values = match Value::concat_bytes(&array.elements) {
            Some(bytes) => Node::Bytes(bytes),
            None => Node::List(self.values(&array.elements)?),
        };
        Ok(Node::map([(
            "javaArray",
            Node::map([
                ("signature", self.value(&array.signature)?),
                ("length", Node::Int(array.length as i64)),
                ("values", values),
            ]),
        )]))
    }
}

fn block_node(key: &str, block: &BlockData) -> Node {
    Node::map([(
        key,
        Node::map([
            ("size", Node::Int(block.size.into())),
            ("data", Node::Bytes(block.data.clone())),
        ]),
    )])
}

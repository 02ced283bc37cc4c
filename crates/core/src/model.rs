//! Content types reconstructed from a Java serialization stream
//!
//! Every type here corresponds to one kind of handle-bearing entry in the
//! stream: class descriptors, instances, arrays, enum constants, strings,
//! exceptions and the annotation block markers. They are stored in the
//! [`ObjectGraph`](crate::graph::ObjectGraph) arena as [`Content`].
//!
//! ## Ownership
//!
//! - `Object -> Class` is shared: many objects hold the same descriptor
//!   [`Handle`].
//! - `Class -> Class` (superclass) is a handle as well, normally acyclic.
//! - Field values alias arbitrary arena entries through [`Value::Ref`],
//!   including the owning object itself. This is the only source of cycles.

use crate::error::{Error, Result};
use crate::graph::Handle;
use crate::value::Value;
use std::fmt;

/// Display name shared by every dynamic proxy class descriptor
pub const PROXY_CLASS_NAME: &str = "Dynamic proxy";

/// Declared field of a class descriptor
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDesc {
    /// Field name
    pub name: String,
    /// Type signature: a raw type code or a reference to a `String` content
    pub signature: Value,
}

impl FieldDesc {
    /// Create a field descriptor
    pub fn new(name: impl Into<String>, signature: impl Into<Value>) -> Self {
        FieldDesc {
            name: name.into(),
            signature: signature.into(),
        }
    }
}

/// One class in an inheritance chain
///
/// Equality between classes compares the name only. Two descriptors with the
/// same name but different `suid`, `flags` or fields are considered equal.
#[derive(Debug, Clone)]
pub struct JavaClass {
    /// Fully qualified class name
    pub name: String,
    /// `serialVersionUID`
    pub suid: i64,
    /// `SC_*` flag bits
    pub flags: u8,
    /// Superclass descriptor, if any
    pub superclass: Option<Handle>,
    /// Declared serializable fields in stream order
    pub fields: Vec<FieldDesc>,
    /// Annotations written by `annotateClass`
    pub class_annotations: Vec<Value>,
    /// Whether instances carry `writeObject` block data
    pub has_write_object_data: bool,
}

impl JavaClass {
    /// Create a class descriptor with no superclass, fields or annotations
    pub fn new(name: impl Into<String>, suid: i64, flags: u8) -> Self {
        JavaClass {
            name: name.into(),
            suid,
            flags,
            superclass: None,
            fields: Vec::new(),
            class_annotations: Vec::new(),
            has_write_object_data: false,
        }
    }

    /// Set the superclass descriptor
    pub fn with_superclass(mut self, superclass: Handle) -> Self {
        self.superclass = Some(superclass);
        self
    }

    /// Append a declared field
    pub fn with_field(mut self, field: FieldDesc) -> Self {
        self.fields.push(field);
        self
    }

    /// Append a class annotation
    pub fn with_annotation(mut self, annotation: impl Into<Value>) -> Self {
        self.class_annotations.push(annotation.into());
        self
    }
}

impl fmt::Display for JavaClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "javaclass {}", self.name)
    }
}

/// Dynamic proxy class descriptor
///
/// Proxy classes declare no fields; [`ProxyClass::fields`] is always empty.
#[derive(Debug, Clone, Default)]
pub struct ProxyClass {
    /// Implemented interface names in stream order
    pub interfaces: Vec<String>,
    /// Annotations written by `annotateProxyClass`
    pub class_annotations: Vec<Value>,
    /// Superclass descriptor (almost always absent)
    pub superclass: Option<Handle>,
    /// Whether instances carry `writeObject` block data
    pub has_write_object_data: bool,
}

impl ProxyClass {
    /// Create a proxy descriptor for the given interfaces
    pub fn new<I, S>(interfaces: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ProxyClass {
            interfaces: interfaces.into_iter().map(Into::into).collect(),
            ..ProxyClass::default()
        }
    }

    /// Fixed display name
    pub fn name(&self) -> &'static str {
        PROXY_CLASS_NAME
    }

    /// Declared fields (always empty)
    pub fn fields(&self) -> &[FieldDesc] {
        &[]
    }
}

/// Declared field bound to its runtime value
#[derive(Debug, Clone)]
pub struct JavaField {
    /// Field name
    pub field_name: String,
    /// Type signature, as in [`FieldDesc::signature`]
    pub signature: Value,
    /// Runtime value
    pub value: Value,
}

impl JavaField {
    /// Create a bound field
    pub fn new(
        field_name: impl Into<String>,
        signature: impl Into<Value>,
        value: impl Into<Value>,
    ) -> Self {
        JavaField {
            field_name: field_name.into(),
            signature: signature.into(),
            value: value.into(),
        }
    }
}

/// Instance of a serializable class
///
/// `fields` holds one group per class in the descriptor's inheritance chain,
/// ordered root ancestor first and most derived class last.
#[derive(Debug, Clone)]
pub struct JavaObject {
    /// Class or proxy descriptor
    pub class_desc: Handle,
    /// Field groups, root ancestor first
    pub fields: Vec<Vec<JavaField>>,
    /// Annotations written by `writeObject` / `writeExternal`
    pub object_annotation: Vec<Value>,
}

impl JavaObject {
    /// Create an instance with no field groups yet
    pub fn new(class_desc: Handle) -> Self {
        JavaObject {
            class_desc,
            fields: Vec::new(),
            object_annotation: Vec::new(),
        }
    }

    /// Append the field group of the next class level
    pub fn push_group(&mut self, group: Vec<JavaField>) {
        self.fields.push(group);
    }

    /// Append an object annotation
    pub fn push_annotation(&mut self, annotation: impl Into<Value>) {
        self.object_annotation.push(annotation.into());
    }
}

/// Java array
#[derive(Debug, Clone)]
pub struct JavaArray {
    /// Array class descriptor reference or raw descriptor text
    pub signature: Value,
    /// Declared element count
    pub length: usize,
    /// Elements read so far
    pub elements: Vec<Value>,
}

impl JavaArray {
    /// Create an empty array expecting `length` elements
    pub fn new(signature: impl Into<Value>, length: usize) -> Self {
        JavaArray {
            signature: signature.into(),
            length,
            elements: Vec::with_capacity(length),
        }
    }

    /// Append an element
    pub fn push(&mut self, element: impl Into<Value>) {
        self.elements.push(element.into());
    }

    /// Whether every declared element has been appended
    pub fn is_complete(&self) -> bool {
        self.elements.len() == self.length
    }
}

/// Enum constant
#[derive(Debug, Clone)]
pub struct JavaEnum {
    /// Enum class descriptor
    pub class_desc: Handle,
    /// Constant name, normally a reference to a `String` content
    pub constant_name: Value,
}

impl JavaEnum {
    /// Create an enum constant
    pub fn new(class_desc: Handle, constant_name: impl Into<Value>) -> Self {
        JavaEnum {
            class_desc,
            constant_name: constant_name.into(),
        }
    }
}

/// `java.lang.String` instance
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JavaString {
    /// Raw text content
    pub text: String,
}

impl JavaString {
    /// Create a string
    pub fn new(text: impl Into<String>) -> Self {
        JavaString { text: text.into() }
    }

    /// Prefix test on the raw text
    pub fn starts_with(&self, prefix: &str) -> bool {
        self.text.starts_with(prefix)
    }

    /// Raw text content
    pub fn as_str(&self) -> &str {
        &self.text
    }
}

impl fmt::Display for JavaString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Exception that interrupted stream reconstruction
#[derive(Debug, Clone)]
pub struct JavaException {
    /// The thrown object
    pub exception: Value,
}

/// Annotation data block
///
/// Short (`TC_BLOCKDATA`) and long (`TC_BLOCKDATALONG`) blocks share this
/// payload and are told apart by the [`Content`] variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockData {
    /// Size from the block header
    pub size: u32,
    /// Block bytes
    pub data: Vec<u8>,
}

impl BlockData {
    /// Create a block whose size is the data length
    ///
    /// Fails with `BlockTooLarge` when the length does not fit the header.
    pub fn new(data: Vec<u8>) -> Result<Self> {
        Ok(BlockData {
            size: block_size(data.len())?,
            data,
        })
    }
}

fn block_size(len: usize) -> Result<u32> {
    u32::try_from(len).map_err(|_| Error::BlockTooLarge { len })
}

/// Closed set of arena entries
#[derive(Debug, Clone)]
pub enum Content {
    /// Class descriptor
    Class(JavaClass),
    /// Dynamic proxy class descriptor
    ProxyClass(ProxyClass),
    /// Instance
    Object(JavaObject),
    /// Array
    Array(JavaArray),
    /// Enum constant
    Enum(JavaEnum),
    /// String
    String(JavaString),
    /// Exception marker
    Exception(JavaException),
    /// Block data with an 8-bit length header
    BlockData(BlockData),
    /// Block data with a 32-bit length header
    LongBlockData(BlockData),
    /// End of a block data sequence
    EndBlock,
}

/// Fieldless discriminant of [`Content`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContentKind {
    /// [`Content::Class`]
    Class,
    /// [`Content::ProxyClass`]
    ProxyClass,
    /// [`Content::Object`]
    Object,
    /// [`Content::Array`]
    Array,
    /// [`Content::Enum`]
    Enum,
    /// [`Content::String`]
    String,
    /// [`Content::Exception`]
    Exception,
    /// [`Content::BlockData`]
    BlockData,
    /// [`Content::LongBlockData`]
    LongBlockData,
    /// [`Content::EndBlock`]
    EndBlock,
}

impl ContentKind {
    /// Get the kind name as a string
    pub fn type_name(&self) -> &'static str {
        match self {
            ContentKind::Class => "Class",
            ContentKind::ProxyClass => "ProxyClass",
            ContentKind::Object => "Object",
            ContentKind::Array => "Array",
            ContentKind::Enum => "Enum",
            ContentKind::String => "String",
            ContentKind::Exception => "Exception",
            ContentKind::BlockData => "BlockData",
            ContentKind::LongBlockData => "LongBlockData",
            ContentKind::EndBlock => "EndBlock",
        }
    }
}

impl fmt::Display for ContentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_name())
    }
}

impl Content {
    /// Discriminant of this entry
    pub fn kind(&self) -> ContentKind {
        match self {
            Content::Class(_) => ContentKind::Class,
            Content::ProxyClass(_) => ContentKind::ProxyClass,
            Content::Object(_) => ContentKind::Object,
            Content::Array(_) => ContentKind::Array,
            Content::Enum(_) => ContentKind::Enum,
            Content::String(_) => ContentKind::String,
            Content::Exception(_) => ContentKind::Exception,
            Content::BlockData(_) => ContentKind::BlockData,
            Content::LongBlockData(_) => ContentKind::LongBlockData,
            Content::EndBlock => ContentKind::EndBlock,
        }
    }

    /// Whether this entry is a class or proxy class descriptor
    pub fn is_class_desc(&self) -> bool {
        matches!(self, Content::Class(_) | Content::ProxyClass(_))
    }

    /// Name of a class descriptor
    pub fn class_name(&self) -> Option<&str> {
        match self {
            Content::Class(c) => Some(&c.name),
            Content::ProxyClass(p) => Some(p.name()),
            _ => None,
        }
    }

    /// Superclass of a class descriptor
    pub fn superclass(&self) -> Option<Handle> {
        match self {
            Content::Class(c) => c.superclass,
            Content::ProxyClass(p) => p.superclass,
            _ => None,
        }
    }
}

impl From<JavaClass> for Content {
    fn from(c: JavaClass) -> Self {
        Content::Class(c)
    }
}

impl From<ProxyClass> for Content {
    fn from(p: ProxyClass) -> Self {
        Content::ProxyClass(p)
    }
}

impl From<JavaObject> for Content {
    fn from(o: JavaObject) -> Self {
        Content::Object(o)
    }
}

impl From<JavaArray> for Content {
    fn from(a: JavaArray) -> Self {
        Content::Array(a)
    }
}

impl From<JavaEnum> for Content {
    fn from(e: JavaEnum) -> Self {
        Content::Enum(e)
    }
}

impl From<JavaString> for Content {
    fn from(s: JavaString) -> Self {
        Content::String(s)
    }
}

impl From<JavaException> for Content {
    fn from(e: JavaException) -> Self {
        Content::Exception(e)
    }
}

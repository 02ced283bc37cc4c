//! Slot values for the object graph
//!
//! This module defines:
//! - Value: what a field, array element, annotation or signature slot holds
//!
//! ## Slot Value Model
//!
//! Java primitive field values and raw descriptor text are stored inline.
//! Everything the stream protocol assigns a handle to (objects, classes,
//! strings, arrays, enums, ...) lives in the [`ObjectGraph`] arena and is
//! reached through [`Value::Ref`].
//!
//! ### Type Rules
//!
//! - Different variants are NEVER equal: `Int(1) != Float(1.0)`
//! - `Bytes` are not `Text`
//! - Floats compare by bit pattern, like `java.lang.Double.equals`:
//!   `NaN == NaN`, `-0.0 != 0.0`
//! - `Ref` equality is handle identity here; structural comparison of the
//!   referenced content is the job of [`crate::equality`]
//!
//! [`ObjectGraph`]: crate::graph::ObjectGraph

use crate::graph::Handle;

/// Value held by a field, array element, annotation or signature slot
#[derive(Debug, Clone)]
pub enum Value {
    /// Java `null`
    Null,
    /// `boolean`
    Bool(bool),
    /// `byte`, `short`, `int`, `long` widened to 64 bits
    Int(i64),
    /// `float` and `double`
    Float(f64),
    /// Raw text: primitive type codes, field descriptors, `char` data
    Text(String),
    /// Raw byte buffer
    Bytes(Vec<u8>),
    /// Bare list of values not wrapped in a Java array
    List(Vec<Value>),
    /// Alias to content stored in the arena
    Ref(Handle),
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a.to_bits() == b.to_bits(),
            (Value::Text(a), Value::Text(b)) => a == b,
            (Value::Bytes(a), Value::Bytes(b)) => a == b,
            (Value::List(a), Value::List(b)) => a == b,
            (Value::Ref(a), Value::Ref(b)) => a == b,
            _ => false,
        }
    }
}

impl Value {
    /// Get the type name as a string
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "Null",
            Value::Bool(_) => "Bool",
            Value::Int(_) => "Int",
            Value::Float(_) => "Float",
            Value::Text(_) => "Text",
            Value::Bytes(_) => "Bytes",
            Value::List(_) => "List",
            Value::Ref(_) => "Ref",
        }
    }

    /// Check if this is a null value
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Check if this is a raw byte buffer
    pub fn is_bytes(&self) -> bool {
        matches!(self, Value::Bytes(_))
    }

    /// Check if this is an arena reference
    pub fn is_ref(&self) -> bool {
        matches!(self, Value::Ref(_))
    }

    /// Get as i64 if this is an Int value
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Get as &str if this is a Text value
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Get as &[u8] if this is a Bytes value
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Value::Bytes(b) => Some(b),
            _ => None,
        }
    }

    /// Get the referenced handle if this is a Ref value
    pub fn as_ref_handle(&self) -> Option<Handle> {
        match self {
            Value::Ref(h) => Some(*h),
            _ => None,
        }
    }

    /// Concatenate a non-empty run of byte buffers
    ///
    /// Returns `None` when `values` is empty or any element is not
    /// [`Value::Bytes`]. Used for the `byte[]` chunk collapsing of the
    /// canonical form.
    pub fn concat_bytes(values: &[Value]) -> Option<Vec<u8>> {
        if values.is_empty() {
            return None;
        }
        let mut out = Vec::new();
        for v in values {
            out.extend_from_slice(v.as_bytes()?);
        }
        Some(out)
    }
}

// ============================================================================
// From implementations for ergonomic graph construction
// ============================================================================

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Int(i as i64)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<Vec<u8>> for Value {
    fn from(b: Vec<u8>) -> Self {
        Value::Bytes(b)
    }
}

impl From<&[u8]> for Value {
    fn from(b: &[u8]) -> Self {
        Value::Bytes(b.to_vec())
    }
}

impl From<Vec<Value>> for Value {
    fn from(a: Vec<Value>) -> Self {
        Value::List(a)
    }
}

impl From<Handle> for Value {
    fn from(h: Handle) -> Self {
        Value::Ref(h)
    }
}

impl From<()> for Value {
    fn from(_: ()) -> Self {
        Value::Null
    }
}

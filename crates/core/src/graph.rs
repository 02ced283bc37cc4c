//! Arena of reconstructed stream content
//!
//! The stream protocol numbers every object it writes with a wire handle
//! starting at `0x7e0000`. [`ObjectGraph`] mirrors that: each [`Content`]
//! entry lives at a dense index and is addressed by a [`Handle`]. Aliasing
//! (back references, shared class descriptors, self references) is expressed
//! with handles, so cycle detection works on handle identity.
//!
//! Handles can be reserved before their content is known. The protocol
//! assigns an object's handle before reading its field values, which is what
//! allows a field to refer back to the object that contains it.

use crate::error::{Error, Result};
use crate::model::{Content, JavaArray, JavaClass, JavaObject};
use std::fmt;
use tracing::trace;

/// First wire handle assigned by the stream protocol
pub const BASE_WIRE_HANDLE: u32 = 0x7e_0000;

/// Index of an entry in an [`ObjectGraph`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Handle(u32);

impl Handle {
    /// Create a handle from an arena index
    pub const fn new(index: u32) -> Self {
        Handle(index)
    }

    /// Arena index
    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// Wire handle as written in the stream (`0x7e0000 + index`)
    pub fn wire(self) -> u32 {
        BASE_WIRE_HANDLE.wrapping_add(self.0)
    }
}

impl fmt::Display for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}", self.wire())
    }
}

/// Arena holding every handle-bearing entry of one stream
#[derive(Debug, Clone, Default)]
pub struct ObjectGraph {
    entries: Vec<Option<Content>>,
}

impl ObjectGraph {
    /// Create an empty graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty graph with room for `capacity` entries
    pub fn with_capacity(capacity: usize) -> Self {
        ObjectGraph {
            entries: Vec::with_capacity(capacity),
        }
    }

    /// Number of allocated handles, filled or not
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if no handle has been allocated
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Store content under the next handle
    pub fn insert(&mut self, content: impl Into<Content>) -> Handle {
        let handle = self.next_handle();
        let content = content.into();
        trace!(target: "javaobj::graph", %handle, kind = %content.kind(), "Inserted content");
        self.entries.push(Some(content));
        handle
    }

    /// Allocate a handle whose content is filled in later
    pub fn reserve(&mut self) -> Handle {
        let handle = self.next_handle();
        trace!(target: "javaobj::graph", %handle, "Reserved handle");
        self.entries.push(None);
        handle
    }

    /// Fill a reserved handle
    ///
    /// Returns `AlreadyFilled` if the handle already holds content.
    pub fn fill(&mut self, handle: Handle, content: impl Into<Content>) -> Result<()> {
        let len = self.entries.len();
        let slot = self
            .entries
            .get_mut(handle.index())
            .ok_or(Error::DanglingHandle { handle, len })?;
        if slot.is_some() {
            return Err(Error::AlreadyFilled(handle));
        }
        *slot = Some(content.into());
        Ok(())
    }

    /// Look up the content behind a handle
    pub fn get(&self, handle: Handle) -> Result<&Content> {
        match self.entries.get(handle.index()) {
            Some(Some(content)) => Ok(content),
            Some(None) => Err(Error::UnfilledHandle(handle)),
            None => Err(Error::DanglingHandle {
                handle,
                len: self.entries.len(),
            }),
        }
    }

    /// Look up the content behind a handle for in-place population
    pub fn get_mut(&mut self, handle: Handle) -> Result<&mut Content> {
        let len = self.entries.len();
        match self.entries.get_mut(handle.index()) {
            Some(Some(content)) => Ok(content),
            Some(None) => Err(Error::UnfilledHandle(handle)),
            None => Err(Error::DanglingHandle { handle, len }),
        }
    }

    /// Look up a class descriptor
    pub fn class(&self, handle: Handle) -> Result<&JavaClass> {
        match self.get(handle)? {
            Content::Class(class) => Ok(class),
            other => Err(kind_mismatch(handle, "Class", other)),
        }
    }

    /// Look up an object
    pub fn object(&self, handle: Handle) -> Result<&JavaObject> {
        match self.get(handle)? {
            Content::Object(object) => Ok(object),
            other => Err(kind_mismatch(handle, "Object", other)),
        }
    }

    /// Look up an object for field and annotation population
    pub fn object_mut(&mut self, handle: Handle) -> Result<&mut JavaObject> {
        match self.get_mut(handle)? {
            Content::Object(object) => Ok(object),
            other => Err(kind_mismatch(handle, "Object", other)),
        }
    }

    /// Look up an array for element append
    pub fn array_mut(&mut self, handle: Handle) -> Result<&mut JavaArray> {
        match self.get_mut(handle)? {
            Content::Array(array) => Ok(array),
            other => Err(kind_mismatch(handle, "Array", other)),
        }
    }

    /// Iterate over filled entries in handle order
    pub fn iter(&self) -> impl Iterator<Item = (Handle, &Content)> {
        self.entries
            .iter()
            .enumerate()
            .filter_map(|(i, c)| c.as_ref().map(|c| (Handle::new(i as u32), c)))
    }

    /// Inheritance chain of a class descriptor, root ancestor first
    ///
    /// Every link must be a `Class` or `ProxyClass`. A superclass loop is
    /// reported as `BackReferenceCycle`.
    pub fn class_chain(&self, class_desc: Handle) -> Result<Vec<Handle>> {
        let mut chain = Vec::new();
        let mut current = Some(class_desc);
        while let Some(handle) = current {
            if chain.contains(&handle) {
                return Err(Error::BackReferenceCycle { handle });
            }
            let content = self.get(handle)?;
            if !content.is_class_desc() {
                return Err(Error::UnsupportedVariant {
                    kind: content.kind(),
                    slot: "class chain",
                });
            }
            chain.push(handle);
            current = content.superclass();
        }
        chain.reverse();
        Ok(chain)
    }

    /// One-line summary of an object and its direct superclass
    pub fn describe_object(&self, handle: Handle) -> Result<String> {
        let object = self.object(handle)?;
        let class_desc = self.get(object.class_desc)?;
        let name = class_desc.class_name().unwrap_or("?");
        let extends = match class_desc.superclass() {
            Some(sup) => match self.get(sup)? {
                Content::Class(class) => class.to_string(),
                other => other.class_name().unwrap_or("?").to_string(),
            },
            None => "None".to_string(),
        };
        Ok(format!("className {name}\t extend {extends}"))
    }

    fn next_handle(&self) -> Handle {
        Handle::new(self.entries.len() as u32)
    }
}

fn kind_mismatch(handle: Handle, expected: &'static str, found: &Content) -> Error {
    Error::KindMismatch {
        handle,
        expected,
        found: found.kind(),
    }
}

//! Host adapter: the backing display medium the renderer mutates.
//!
//! The renderer never touches real objects directly. Everything goes through
//! [`Host`], which owns creation, attachment, removal, text updates and prop
//! application. All methods are infallible: a host that cannot carry out a
//! request treats it as a no-op.
//!
//! - [`Recorder`]: wraps any host and logs every call as a [`HostOp`]
//! - [`MemoryHost`]: in-memory arena tree (feature `memory`)

mod record;

#[cfg(feature = "memory")]
mod html;
#[cfg(feature = "memory")]
mod memory;

pub use record::{HostOp, Recorder};

#[cfg(feature = "memory")]
pub use memory::{MemoryHost, NodeId, BOOLEAN_ATTRS};

use std::fmt;
use std::hash::Hash;

use crate::props::PropValue;

/// Backing tree operations consumed by the renderer.
pub trait Host {
    /// Opaque reference to a backing object.
    type Handle: Clone + Eq + Hash + fmt::Debug;

    /// Allocate an element.
    fn create_element(&mut self, tag: &str) -> Self::Handle;

    /// Allocate a text node.
    fn create_text(&mut self, content: &str) -> Self::Handle;

    /// Allocate a comment node.
    fn create_comment(&mut self, content: &str) -> Self::Handle;

    /// Replace the content of a text node.
    fn set_text(&mut self, handle: &Self::Handle, content: &str);

    /// Replace the content of a comment node.
    fn set_comment(&mut self, handle: &Self::Handle, content: &str);

    /// Replace all children of an element with a single text node
    /// (or with nothing, for an empty string).
    fn set_element_text(&mut self, handle: &Self::Handle, content: &str);

    /// Attach `handle` under `parent`, immediately before `anchor`,
    /// or at the end when `anchor` is `None`.
    ///
    /// If `handle` is already attached somewhere it is moved.
    fn insert(&mut self, handle: &Self::Handle, parent: &Self::Handle, anchor: Option<&Self::Handle>);

    /// Current parent of `handle`, if attached.
    fn parent(&self, handle: &Self::Handle) -> Option<Self::Handle>;

    /// Next sibling of `handle` under its current parent.
    fn next_sibling(&self, handle: &Self::Handle) -> Option<Self::Handle>;

    /// Detach `handle` from `parent`.
    fn remove(&mut self, handle: &Self::Handle, parent: &Self::Handle);

    /// Apply, update, or remove one prop. `new == None` signals removal.
    fn patch_prop(
        &mut self,
        handle: &Self::Handle,
        key: &str,
        old: Option<&PropValue>,
        new: Option<&PropValue>,
    );
}

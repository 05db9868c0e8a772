//! Recording host wrapper.
//!
//! Forwards every call to an inner host and keeps an ordered log of
//! [`HostOp`]s, so the exact sequence of host mutations produced by a render
//! can be inspected or replayed.

use rustc_hash::FxHashSet;

use crate::node::Tag;
use crate::props::{PropKey, PropValue};

use super::Host;

// =============================================================================
// HostOp
// =============================================================================

/// One host call, as seen by the host.
#[derive(Debug, Clone, PartialEq)]
pub enum HostOp<H> {
    CreateElement { handle: H, tag: Tag },
    CreateText { handle: H, content: String },
    CreateComment { handle: H, content: String },
    SetText { handle: H, content: String },
    SetComment { handle: H, content: String },
    SetElementText { handle: H, content: String },
    /// Attach before `anchor` (append when `None`)
    Insert {
        handle: H,
        parent: H,
        anchor: Option<H>,
    },
    Remove { handle: H, parent: H },
    /// `new == None` removes the prop
    PatchProp {
        handle: H,
        key: PropKey,
        old: Option<PropValue>,
        new: Option<PropValue>,
    },
}

impl<H> HostOp<H> {
    /// Get the handle this op acts on
    pub fn target(&self) -> &H {
        match self {
            Self::CreateElement { handle, .. }
            | Self::CreateText { handle, .. }
            | Self::CreateComment { handle, .. }
            | Self::SetText { handle, .. }
            | Self::SetComment { handle, .. }
            | Self::SetElementText { handle, .. }
            | Self::Insert { handle, .. }
            | Self::Remove { handle, .. }
            | Self::PatchProp { handle, .. } => handle,
        }
    }

    /// Check if this op allocates a backing object
    pub fn is_create(&self) -> bool {
        matches!(
            self,
            Self::CreateElement { .. } | Self::CreateText { .. } | Self::CreateComment { .. }
        )
    }

    /// Check if this is an Insert
    pub fn is_insert(&self) -> bool {
        matches!(self, Self::Insert { .. })
    }

    /// Check if this is a Remove
    pub fn is_remove(&self) -> bool {
        matches!(self, Self::Remove { .. })
    }
}

// =============================================================================
// Recorder
// =============================================================================

/// Host wrapper that logs every call before forwarding it.
#[derive(Debug, Default)]
pub struct Recorder<H: Host> {
    inner: H,
    ops: Vec<HostOp<H::Handle>>,
}

impl<H: Host> Recorder<H> {
    /// Wrap a host with an empty log.
    pub fn new(inner: H) -> Self {
        Self {
            inner,
            ops: Vec::new(),
        }
    }

    /// Access the wrapped host.
    pub fn inner(&self) -> &H {
        &self.inner
    }

    /// Access the wrapped host mutably. Calls made this way are not logged.
    pub fn inner_mut(&mut self) -> &mut H {
        &mut self.inner
    }

    /// Unwrap, dropping the log.
    pub fn into_inner(self) -> H {
        self.inner
    }

    /// Logged ops in call order.
    pub fn ops(&self) -> &[HostOp<H::Handle>] {
        &self.ops
    }

    /// Take the log, leaving it empty.
    pub fn take_ops(&mut self) -> Vec<HostOp<H::Handle>> {
        std::mem::take(&mut self.ops)
    }

    /// Clear the log.
    pub fn clear(&mut self) {
        self.ops.clear();
    }

    /// Handles inserted in this log that were not created in it: relocations
    /// of objects that were already in the tree.
    pub fn moved_handles(&self) -> Vec<&H::Handle> {
        let created: FxHashSet<&H::Handle> = self
            .ops
            .iter()
            .filter(|op| op.is_create())
            .map(HostOp::target)
            .collect();

        self.ops
            .iter()
            .filter(|op| op.is_insert())
            .map(HostOp::target)
            .filter(|handle| !created.contains(handle))
            .collect()
    }
}

impl<H: Host> Host for Recorder<H> {
    type Handle = H::Handle;

    fn create_element(&mut self, tag: &str) -> Self::Handle {
        let handle = self.inner.create_element(tag);
        self.ops.push(HostOp::CreateElement {
            handle: handle.clone(),
            tag: tag.into(),
        });
        handle
    }

    fn create_text(&mut self, content: &str) -> Self::Handle {
        let handle = self.inner.create_text(content);
        self.ops.push(HostOp::CreateText {
            handle: handle.clone(),
            content: content.to_owned(),
        });
        handle
    }

    fn create_comment(&mut self, content: &str) -> Self::Handle {
        let handle = self.inner.create_comment(content);
        self.ops.push(HostOp::CreateComment {
            handle: handle.clone(),
            content: content.to_owned(),
        });
        handle
    }

    fn set_text(&mut self, handle: &Self::Handle, content: &str) {
        self.ops.push(HostOp::SetText {
            handle: handle.clone(),
            content: content.to_owned(),
        });
        self.inner.set_text(handle, content);
    }

    fn set_comment(&mut self, handle: &Self::Handle, content: &str) {
        self.ops.push(HostOp::SetComment {
            handle: handle.clone(),
            content: content.to_owned(),
        });
        self.inner.set_comment(handle, content);
    }

    fn set_element_text(&mut self, handle: &Self::Handle, content: &str) {
        self.ops.push(HostOp::SetElementText {
            handle: handle.clone(),
            content: content.to_owned(),
        });
        self.inner.set_element_text(handle, content);
    }

    fn insert(&mut self, handle: &Self::Handle, parent: &Self::Handle, anchor: Option<&Self::Handle>) {
        self.ops.push(HostOp::Insert {
            handle: handle.clone(),
            parent: parent.clone(),
            anchor: anchor.cloned(),
        });
        self.inner.insert(handle, parent, anchor);
    }

    fn parent(&self, handle: &Self::Handle) -> Option<Self::Handle> {
        self.inner.parent(handle)
    }

    fn next_sibling(&self, handle: &Self::Handle) -> Option<Self::Handle> {
        self.inner.next_sibling(handle)
    }

    fn remove(&mut self, handle: &Self::Handle, parent: &Self::Handle) {
        self.ops.push(HostOp::Remove {
            handle: handle.clone(),
            parent: parent.clone(),
        });
        self.inner.remove(handle, parent);
    }

    fn patch_prop(
        &mut self,
        handle: &Self::Handle,
        key: &str,
        old: Option<&PropValue>,
        new: Option<&PropValue>,
    ) {
        self.ops.push(HostOp::PatchProp {
            handle: handle.clone(),
            key: key.into(),
            old: old.cloned(),
            new: new.cloned(),
        });
        self.inner.patch_prop(handle, key, old, new);
    }
}

#[cfg(all(test, feature = "memory"))]
mod tests {
    use super::*;
    use crate::host::MemoryHost;

    #[test]
    fn test_recorder_forwards_and_logs() {
        let mut host = Recorder::new(MemoryHost::new());
        let root = host.inner_mut().create_root("div");

        let a = host.create_element("p");
        host.insert(&a, &root, None);
        host.set_element_text(&a, "hi");

        assert_eq!(host.ops().len(), 3);
        assert!(host.ops()[0].is_create());
        assert!(host.ops()[1].is_insert());
        assert_eq!(host.inner().to_html(root), "<div><p>hi</p></div>");
        assert!(host.moved_handles().is_empty());
    }

    #[test]
    fn test_moved_handles() {
        let mut host = Recorder::new(MemoryHost::new());
        let root = host.inner_mut().create_root("ul");
        let a = host.create_element("li");
        let b = host.create_element("li");
        host.insert(&a, &root, None);
        host.insert(&b, &root, None);
        host.clear();

        host.insert(&b, &root, Some(&a));
        assert_eq!(host.moved_handles(), vec![&b]);
        assert_eq!(host.inner().children(root), &[b, a]);
    }
}

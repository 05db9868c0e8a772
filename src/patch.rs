//! Tree patcher: mounts, unmounts and patches single node positions.
//!
//! All host mutations happen eagerly while the trees are compared; there is
//! no separate commit phase. Child sequences are handed to the keyed
//! reconciler in [`crate::algo`].
//!
//! # Dispatch
//!
//! ```text
//! patch(old, new)
//!   kinds differ  -> unmount(old), mount(new) at old's position
//!   no old        -> mount(new)
//!   Element       -> diff props, patch_children
//!   Text/Comment  -> set content if changed
//!   Fragment      -> patch_children directly under the container
//! ```

use crate::host::Host;
use crate::node::{Children, Node, NodeKind};
use crate::props::diff_props;

/// Counters collected while rendering.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RenderStats {
    /// Host objects created
    pub mounted: usize,
    /// Subtrees detached from the host tree
    pub unmounted: usize,
    /// Existing host objects relocated among their siblings
    pub moved: usize,
    /// Nodes whose host object was reused
    pub patched: usize,
    /// Prop changes applied to reused elements
    pub props_updated: usize,
    /// Text, comment or element-text content changes
    pub text_updates: usize,
}

impl RenderStats {
    /// Check if the render changed nothing in the host tree.
    pub fn is_noop(&self) -> bool {
        self.mounted == 0
            && self.unmounted == 0
            && self.moved == 0
            && self.props_updated == 0
            && self.text_updates == 0
    }

    /// Mounts, unmounts and moves combined.
    pub fn structural_ops(&self) -> usize {
        self.mounted + self.unmounted + self.moved
    }
}

/// Mutable state of one render pass.
pub(crate) struct Patcher<'a, H: Host> {
    pub(crate) host: &'a mut H,
    pub(crate) stats: RenderStats,
}

impl<'a, H: Host> Patcher<'a, H> {
    pub(crate) fn new(host: &'a mut H) -> Self {
        Self {
            host,
            stats: RenderStats::default(),
        }
    }

    pub(crate) fn into_stats(self) -> RenderStats {
        self.stats
    }

    /// Reconcile one node position inside `container`.
    ///
    /// `anchor` is where a freshly mounted node goes; `None` appends.
    pub(crate) fn patch(
        &mut self,
        old: Option<&Node<H::Handle>>,
        new: &mut Node<H::Handle>,
        container: &H::Handle,
        anchor: Option<&H::Handle>,
    ) {
        let mut old = old;
        let mut replaced_at = None;

        if let Some(prev) = old
            && !prev.same_kind(new)
        {
            replaced_at = self.next_host_sibling(prev);
            self.unmount(prev);
            old = None;
        }

        match old {
            Some(old) if old.is_fragment() || old.is_mounted() => {
                self.patch_same_kind(old, new, container, anchor)
            }
            _ => {
                let anchor = replaced_at.as_ref().or(anchor);
                self.mount(new, container, anchor)
            }
        }
    }

    /// Create host objects for `node` and its subtree and attach them.
    pub(crate) fn mount(
        &mut self,
        node: &mut Node<H::Handle>,
        container: &H::Handle,
        anchor: Option<&H::Handle>,
    ) {
        let handle = match &node.kind {
            NodeKind::Element(tag) => {
                let el = self.host.create_element(tag);
                match &mut node.children {
                    Children::Text(text) => self.host.set_element_text(&el, text),
                    Children::Nodes(children) => {
                        for child in children.iter_mut() {
                            self.mount(child, &el, None);
                        }
                    }
                    Children::Empty => {}
                }
                for (key, value) in &node.props {
                    self.host.patch_prop(&el, key, None, Some(value));
                }
                el
            }
            NodeKind::Text => self.host.create_text(node.children.as_text().unwrap_or_default()),
            NodeKind::Comment => self.host.create_comment(node.children.as_text().unwrap_or_default()),
            NodeKind::Fragment => {
                if let Some(children) = node.children.as_nodes_mut() {
                    for child in children {
                        self.mount(child, container, anchor);
                    }
                }
                return;
            }
        };

        self.host.insert(&handle, container, anchor);
        node.handle = Some(handle);
        self.stats.mounted += 1;
    }

    /// Detach `node` from the host tree.
    ///
    /// Fragments own no host object, so their children are unmounted one by
    /// one. A node whose handle has no parent is left alone.
    pub(crate) fn unmount(&mut self, node: &Node<H::Handle>) {
        if node.is_fragment() {
            for child in node.child_nodes() {
                self.unmount(child);
            }
            return;
        }

        let Some(handle) = &node.handle else {
            return;
        };
        if let Some(parent) = self.host.parent(handle) {
            self.host.remove(handle, &parent);
            self.stats.unmounted += 1;
        }
    }

    /// Relocate an already mounted node before `anchor`.
    pub(crate) fn move_node(
        &mut self,
        node: &Node<H::Handle>,
        container: &H::Handle,
        anchor: Option<&H::Handle>,
    ) {
        if node.is_fragment() {
            for child in node.child_nodes() {
                self.move_node(child, container, anchor);
            }
            return;
        }
        if let Some(handle) = &node.handle {
            self.host.insert(handle, container, anchor);
        }
    }

    /// Host object that currently follows `node`'s last host object.
    fn next_host_sibling(&self, node: &Node<H::Handle>) -> Option<H::Handle> {
        node.last_handle().and_then(|h| self.host.next_sibling(&h))
    }

    fn patch_same_kind(
        &mut self,
        old: &Node<H::Handle>,
        new: &mut Node<H::Handle>,
        container: &H::Handle,
        anchor: Option<&H::Handle>,
    ) {
        match new.kind {
            NodeKind::Element(_) => self.patch_element(old, new),
            NodeKind::Text | NodeKind::Comment => {
                new.handle = old.handle.clone();
                let content = new.children.as_text().unwrap_or_default();
                if let Some(handle) = &new.handle
                    && old.children.as_text().unwrap_or_default() != content
                {
                    if new.kind == NodeKind::Text {
                        self.host.set_text(handle, content);
                    } else {
                        self.host.set_comment(handle, content);
                    }
                    self.stats.text_updates += 1;
                }
                self.stats.patched += 1;
            }
            NodeKind::Fragment => {
                let tail = self.next_host_sibling(old).or_else(|| anchor.cloned());
                self.patch_children(old, new, container, tail.as_ref());
            }
        }
    }

    fn patch_element(&mut self, old: &Node<H::Handle>, new: &mut Node<H::Handle>) {
        let Some(el) = old.handle.clone() else {
            return;
        };

        for change in diff_props(&old.props, &new.props) {
            self.host.patch_prop(&el, change.key, change.old, change.new);
            self.stats.props_updated += 1;
        }

        self.patch_children(old, new, &el, None);
        new.handle = Some(el);
        self.stats.patched += 1;
    }

    /// Reconcile the children of `old` and `new` under `container`.
    ///
    /// `tail` is the host object that follows this child range, used when
    /// nothing after an insertion point has a host object of its own.
    fn patch_children(
        &mut self,
        old: &Node<H::Handle>,
        new: &mut Node<H::Handle>,
        container: &H::Handle,
        tail: Option<&H::Handle>,
    ) {
        // Fragment children always form a sibling sequence.
        if new.is_fragment() {
            let children = new.children.as_nodes_mut().unwrap_or_default();
            self.patch_keyed_children(old.child_nodes(), children, container, tail);
            return;
        }

        match &mut new.children {
            Children::Text(text) => {
                for child in old.child_nodes() {
                    self.unmount(child);
                }
                if old.children.as_text() != Some(text.as_str()) {
                    self.host.set_element_text(container, text);
                    self.stats.text_updates += 1;
                }
            }
            Children::Nodes(children) => {
                if old.children.as_text().is_some() {
                    self.host.set_element_text(container, "");
                    self.stats.text_updates += 1;
                }
                self.patch_keyed_children(old.child_nodes(), children, container, tail);
            }
            Children::Empty => match &old.children {
                Children::Nodes(children) => {
                    for child in children {
                        self.unmount(child);
                    }
                }
                Children::Text(_) => {
                    self.host.set_element_text(container, "");
                    self.stats.text_updates += 1;
                }
                Children::Empty => {}
            },
        }
    }
}

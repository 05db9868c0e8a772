//! In-memory host: an arena-backed element tree.
//!
//! Mirrors the behavior of a browser DOM adapter closely enough to test the
//! renderer end to end:
//!
//! - `on*` props bind *invokers*. An invoker keeps the current handler list and
//!   the host tick at which it was first attached; rebinding swaps the list
//!   without detaching.
//! - Events bubble from the target to the root. An invoker ignores events
//!   created before it was attached, so a handler bound by an update that ran
//!   while an event was in flight does not see that event.
//! - `class` always sets the class attribute (empty string on removal).
//! - Boolean attributes are present or absent; the empty string counts as
//!   present.

use compact_str::CompactString;
use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use crate::node::Tag;
use crate::props::{is_event_prop, Event, EventHandler, PropValue};

use super::Host;

/// Attributes that are either present or absent.
pub const BOOLEAN_ATTRS: &[&str] = &[
    "allowfullscreen",
    "async",
    "autofocus",
    "checked",
    "defer",
    "disabled",
    "hidden",
    "multiple",
    "novalidate",
    "readonly",
    "required",
    "selected",
];

// =============================================================================
// NodeId
// =============================================================================

/// Handle of a node in a [`MemoryHost`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl NodeId {
    /// Create a NodeId from a raw arena index.
    #[inline]
    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    /// Get the raw arena index
    #[inline]
    pub const fn as_raw(self) -> u32 {
        self.0
    }

    #[inline]
    fn index(self) -> usize {
        self.0 as usize
    }
}

// =============================================================================
// Arena slots
// =============================================================================

#[derive(Debug)]
struct Invoker {
    handlers: SmallVec<[EventHandler; 1]>,
    attached: u64,
}

#[derive(Debug)]
pub(super) struct ElementData {
    pub(super) tag: Tag,
    pub(super) attrs: Vec<(CompactString, CompactString)>,
    invokers: FxHashMap<CompactString, Invoker>,
}

impl ElementData {
    fn set_attr(&mut self, name: &str, value: CompactString) {
        if let Some(attr) = self.attrs.iter_mut().find(|(k, _)| k == name) {
            attr.1 = value;
        } else {
            self.attrs.push((name.into(), value));
        }
    }

    fn remove_attr(&mut self, name: &str) {
        self.attrs.retain(|(k, _)| k != name);
    }
}

#[derive(Debug)]
pub(super) enum Payload {
    Element(ElementData),
    Text(String),
    Comment(String),
}

#[derive(Debug)]
pub(super) struct Slot {
    pub(super) payload: Payload,
    parent: Option<NodeId>,
    pub(super) children: Vec<NodeId>,
}

// =============================================================================
// MemoryHost
// =============================================================================

/// Arena-backed host tree.
///
/// Objects are never freed: a removed node stays in the arena, detached,
/// so stale handles remain valid to inspect.
#[derive(Debug, Default)]
pub struct MemoryHost {
    slots: Vec<Slot>,
    clock: u64,
}

impl MemoryHost {
    /// Create an empty host.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a detached element to use as a render container.
    pub fn create_root(&mut self, tag: &str) -> NodeId {
        self.alloc(Payload::Element(ElementData {
            tag: tag.into(),
            attrs: Vec::new(),
            invokers: FxHashMap::default(),
        }))
    }

    fn alloc(&mut self, payload: Payload) -> NodeId {
        let id = NodeId(self.slots.len() as u32);
        self.slots.push(Slot {
            payload,
            parent: None,
            children: Vec::new(),
        });
        id
    }

    #[inline]
    pub(super) fn slot(&self, id: NodeId) -> Option<&Slot> {
        self.slots.get(id.index())
    }

    #[inline]
    fn slot_mut(&mut self, id: NodeId) -> Option<&mut Slot> {
        self.slots.get_mut(id.index())
    }

    fn element_mut(&mut self, id: NodeId) -> Option<&mut ElementData> {
        match self.slot_mut(id).map(|s| &mut s.payload) {
            Some(Payload::Element(data)) => Some(data),
            _ => None,
        }
    }

    fn detach(&mut self, id: NodeId) {
        let Some(parent) = self.slot(id).and_then(|s| s.parent) else {
            return;
        };
        if let Some(slot) = self.slot_mut(parent) {
            slot.children.retain(|&c| c != id);
        }
        if let Some(slot) = self.slot_mut(id) {
            slot.parent = None;
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Clock and events
    // ─────────────────────────────────────────────────────────────────────────

    /// Advance the host clock and return the new tick.
    pub fn tick(&mut self) -> u64 {
        self.clock += 1;
        self.clock
    }

    /// Current tick.
    pub fn now(&self) -> u64 {
        self.clock
    }

    /// Create an event stamped with a fresh tick.
    pub fn event(&mut self, name: &str) -> Event {
        Event::new(name.to_ascii_lowercase(), self.tick())
    }

    /// Deliver `event` to `target` and bubble it up to the root.
    ///
    /// Returns the number of handlers invoked.
    pub fn dispatch(&self, target: NodeId, event: &Event) -> usize {
        let mut invoked = 0;
        let mut current = Some(target);

        while let Some(id) = current {
            let Some(slot) = self.slot(id) else { break };
            if let Payload::Element(data) = &slot.payload
                && let Some(invoker) = data.invokers.get(&event.name)
                && event.time_stamp >= invoker.attached
            {
                for handler in &invoker.handlers {
                    handler.call(event);
                    invoked += 1;
                }
            }
            current = slot.parent;
        }

        invoked
    }

    /// Check if `id` has a listener bound for `event`.
    pub fn has_listener(&self, id: NodeId, event: &str) -> bool {
        match self.slot(id).map(|s| &s.payload) {
            Some(Payload::Element(data)) => data.invokers.contains_key(event),
            _ => false,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Inspection
    // ─────────────────────────────────────────────────────────────────────────

    /// Number of objects ever allocated (attached or not).
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Check if nothing was ever allocated.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Element tag, if `id` is an element.
    pub fn tag(&self, id: NodeId) -> Option<&str> {
        match self.slot(id).map(|s| &s.payload) {
            Some(Payload::Element(data)) => Some(&data.tag),
            _ => None,
        }
    }

    /// Content of a text or comment node.
    pub fn content(&self, id: NodeId) -> Option<&str> {
        match self.slot(id).map(|s| &s.payload) {
            Some(Payload::Text(text) | Payload::Comment(text)) => Some(text),
            _ => None,
        }
    }

    /// Child handles in order.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.slot(id).map(|s| s.children.as_slice()).unwrap_or(&[])
    }

    /// Attribute value by name.
    pub fn attr(&self, id: NodeId, name: &str) -> Option<&str> {
        match self.slot(id).map(|s| &s.payload) {
            Some(Payload::Element(data)) => data
                .attrs
                .iter()
                .find(|(k, _)| k == name)
                .map(|(_, v)| v.as_str()),
            _ => None,
        }
    }

    fn patch_event(&mut self, id: NodeId, key: &str, new: Option<&PropValue>) {
        let name: CompactString = key[2..].to_ascii_lowercase().into();
        let handlers = new.and_then(PropValue::as_handlers).filter(|h| !h.is_empty());

        // Attach tick is taken before borrowing the element.
        let tick = match handlers {
            Some(_) => self.tick(),
            None => self.clock,
        };
        let Some(data) = self.element_mut(id) else {
            return;
        };

        match handlers {
            Some(handlers) => {
                let handlers = handlers.iter().cloned().collect();
                match data.invokers.get_mut(&name) {
                    Some(invoker) => invoker.handlers = handlers,
                    None => {
                        data.invokers.insert(
                            name,
                            Invoker {
                                handlers,
                                attached: tick,
                            },
                        );
                    }
                }
            }
            None => {
                data.invokers.remove(&name);
            }
        }
    }
}

impl Host for MemoryHost {
    type Handle = NodeId;

    fn create_element(&mut self, tag: &str) -> NodeId {
        self.create_root(tag)
    }

    fn create_text(&mut self, content: &str) -> NodeId {
        self.alloc(Payload::Text(content.to_owned()))
    }

    fn create_comment(&mut self, content: &str) -> NodeId {
        self.alloc(Payload::Comment(content.to_owned()))
    }

    fn set_text(&mut self, handle: &NodeId, content: &str) {
        if let Some(Slot {
            payload: Payload::Text(text),
            ..
        }) = self.slot_mut(*handle)
        {
            content.clone_into(text);
        }
    }

    fn set_comment(&mut self, handle: &NodeId, content: &str) {
        if let Some(Slot {
            payload: Payload::Comment(text),
            ..
        }) = self.slot_mut(*handle)
        {
            content.clone_into(text);
        }
    }

    fn set_element_text(&mut self, handle: &NodeId, content: &str) {
        if self.element_mut(*handle).is_none() {
            return;
        }
        let old = self
            .slot_mut(*handle)
            .map(|s| std::mem::take(&mut s.children))
            .unwrap_or_default();
        for child in old {
            if let Some(slot) = self.slot_mut(child) {
                slot.parent = None;
            }
        }
        if !content.is_empty() {
            let text = self.create_text(content);
            self.insert(&text, handle, None);
        }
    }

    fn insert(&mut self, handle: &NodeId, parent: &NodeId, anchor: Option<&NodeId>) {
        if handle == parent || anchor == Some(handle) || self.slot(*parent).is_none() {
            return;
        }
        self.detach(*handle);

        let Some(parent_slot) = self.slot_mut(*parent) else {
            return;
        };
        let position = anchor.and_then(|a| parent_slot.children.iter().position(|c| c == a));
        match position {
            Some(index) => parent_slot.children.insert(index, *handle),
            None => parent_slot.children.push(*handle),
        }
        if let Some(slot) = self.slot_mut(*handle) {
            slot.parent = Some(*parent);
        }
    }

    fn parent(&self, handle: &NodeId) -> Option<NodeId> {
        self.slot(*handle).and_then(|s| s.parent)
    }

    fn next_sibling(&self, handle: &NodeId) -> Option<NodeId> {
        let parent = self.parent(handle)?;
        let siblings = self.children(parent);
        let index = siblings.iter().position(|c| c == handle)?;
        siblings.get(index + 1).copied()
    }

    fn remove(&mut self, handle: &NodeId, parent: &NodeId) {
        if self.parent(handle) == Some(*parent) {
            self.detach(*handle);
        }
    }

    fn patch_prop(
        &mut self,
        handle: &NodeId,
        key: &str,
        _old: Option<&PropValue>,
        new: Option<&PropValue>,
    ) {
        if is_event_prop(key) {
            self.patch_event(*handle, key, new);
            return;
        }

        let Some(data) = self.element_mut(*handle) else {
            return;
        };

        if key == "class" {
            let class = new.and_then(PropValue::to_attr_string).unwrap_or_default();
            data.set_attr(key, class);
            return;
        }

        if BOOLEAN_ATTRS.contains(&key) {
            let present = match new {
                Some(PropValue::Bool(b)) => *b,
                Some(PropValue::Str(_)) => true,
                Some(PropValue::Int(n)) => *n != 0,
                Some(PropValue::Handlers(_)) | None => false,
            };
            if present {
                data.set_attr(key, CompactString::default());
            } else {
                data.remove_attr(key);
            }
            return;
        }

        match new.and_then(PropValue::to_attr_string) {
            Some(value) => data.set_attr(key, value),
            None => data.remove_attr(key),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    fn counter() -> (Arc<AtomicUsize>, PropValue) {
        let hits = Arc::new(AtomicUsize::new(0));
        let h = Arc::clone(&hits);
        let value = PropValue::handler(move |_| {
            h.fetch_add(1, Ordering::SeqCst);
        });
        (hits, value)
    }

    #[test]
    fn test_insert_before_anchor_and_move() {
        let mut host = MemoryHost::new();
        let root = host.create_root("ul");
        let a = host.create_element("li");
        let b = host.create_element("li");
        let c = host.create_element("li");

        host.insert(&a, &root, None);
        host.insert(&c, &root, None);
        host.insert(&b, &root, Some(&c));
        assert_eq!(host.children(root), &[a, b, c]);

        // moving an attached node relocates it
        host.insert(&c, &root, Some(&a));
        assert_eq!(host.children(root), &[c, a, b]);
        assert_eq!(host.next_sibling(&a), Some(b));
        assert_eq!(host.next_sibling(&b), None);
    }

    #[test]
    fn test_remove_requires_matching_parent() {
        let mut host = MemoryHost::new();
        let root = host.create_root("div");
        let other = host.create_root("div");
        let a = host.create_element("p");
        host.insert(&a, &root, None);

        host.remove(&a, &other);
        assert_eq!(host.parent(&a), Some(root));

        host.remove(&a, &root);
        assert_eq!(host.parent(&a), None);
        assert!(host.children(root).is_empty());

        // removing a detached node is a no-op
        host.remove(&a, &root);
    }

    #[test]
    fn test_set_element_text() {
        let mut host = MemoryHost::new();
        let root = host.create_root("p");
        let span = host.create_element("span");
        host.insert(&span, &root, None);

        host.set_element_text(&root, "hello");
        assert_eq!(host.to_html(root), "<p>hello</p>");
        assert_eq!(host.parent(&span), None);

        host.set_element_text(&root, "");
        assert!(host.children(root).is_empty());
    }

    #[test]
    fn test_boolean_and_class_props() {
        let mut host = MemoryHost::new();
        let input = host.create_root("input");

        host.patch_prop(&input, "disabled", None, Some(&PropValue::from("")));
        assert_eq!(host.attr(input, "disabled"), Some(""));

        host.patch_prop(&input, "disabled", None, Some(&PropValue::Bool(false)));
        assert_eq!(host.attr(input, "disabled"), None);

        host.patch_prop(&input, "class", None, Some(&PropValue::from("big")));
        assert_eq!(host.attr(input, "class"), Some("big"));
        host.patch_prop(&input, "class", None, None);
        assert_eq!(host.attr(input, "class"), Some(""));

        host.patch_prop(&input, "maxlength", None, Some(&PropValue::Int(8)));
        assert_eq!(host.attr(input, "maxlength"), Some("8"));
        host.patch_prop(&input, "maxlength", None, None);
        assert_eq!(host.attr(input, "maxlength"), None);
    }

    #[test]
    fn test_event_bubbles_to_parent() {
        let mut host = MemoryHost::new();
        let root = host.create_root("div");
        let button = host.create_element("button");
        host.insert(&button, &root, None);

        let (root_hits, root_handler) = counter();
        let (button_hits, button_handler) = counter();
        host.patch_prop(&root, "onClick", None, Some(&root_handler));
        host.patch_prop(&button, "onClick", None, Some(&button_handler));

        let event = host.event("click");
        assert_eq!(host.dispatch(button, &event), 2);
        assert_eq!(root_hits.load(Ordering::SeqCst), 1);
        assert_eq!(button_hits.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_handler_attached_after_event_is_skipped() {
        let mut host = MemoryHost::new();
        let root = host.create_root("div");
        let button = host.create_element("button");
        host.insert(&button, &root, None);

        let event = host.event("click");
        let (hits, handler) = counter();
        host.patch_prop(&root, "onClick", None, Some(&handler));

        assert_eq!(host.dispatch(button, &event), 0);
        assert_eq!(hits.load(Ordering::SeqCst), 0);

        let later = host.event("click");
        assert_eq!(host.dispatch(button, &later), 1);
    }

    #[test]
    fn test_rebinding_keeps_attach_time() {
        let mut host = MemoryHost::new();
        let root = host.create_root("div");
        let (first_hits, first) = counter();
        host.patch_prop(&root, "onClick", None, Some(&first));

        let event = host.event("click");
        let (second_hits, second) = counter();
        host.patch_prop(&root, "onClick", Some(&first), Some(&second));

        assert_eq!(host.dispatch(root, &event), 1);
        assert_eq!(first_hits.load(Ordering::SeqCst), 0);
        assert_eq!(second_hits.load(Ordering::SeqCst), 1);

        host.patch_prop(&root, "onClick", Some(&second), None);
        assert!(!host.has_listener(root, "click"));
    }
}

//! Prop system for element nodes
//!
//! Props are kept as an ordered `Vec<(PropKey, PropValue)>`: small, cheap to
//! scan, and the host sees them in declaration order on mount.
//! Keys beginning with `on` carry event handlers by convention.

use std::fmt;
use std::sync::Arc;

use compact_str::CompactString;
use smallvec::SmallVec;

/// Prop name
pub type PropKey = CompactString;

/// Element props as ordered key-value pairs
pub type Props = Vec<(PropKey, PropValue)>;

// =============================================================================
// Event / EventHandler
// =============================================================================

/// An event delivered to handlers bound through `on*` props.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    /// Lowercased event name (`click`, `input`, ...)
    pub name: CompactString,
    /// Host tick at which the event was created
    pub time_stamp: u64,
}

impl Event {
    /// Create an event with the given name and timestamp.
    pub fn new(name: impl Into<CompactString>, time_stamp: u64) -> Self {
        Self {
            name: name.into(),
            time_stamp,
        }
    }
}

/// Shared event callback.
///
/// Equality is identity: two handlers are equal only if they are clones of
/// the same `Arc`, so re-rendering with the same handler is not a prop change.
#[derive(Clone)]
pub struct EventHandler(Arc<dyn Fn(&Event) + Send + Sync>);

impl EventHandler {
    /// Wrap a closure as a handler.
    pub fn new(f: impl Fn(&Event) + Send + Sync + 'static) -> Self {
        Self(Arc::new(f))
    }

    /// Invoke the handler.
    #[inline]
    pub fn call(&self, event: &Event) {
        (self.0)(event)
    }
}

impl PartialEq for EventHandler {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for EventHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("EventHandler(..)")
    }
}

// =============================================================================
// PropValue
// =============================================================================

/// Value of a single prop.
#[derive(Debug, Clone, PartialEq)]
pub enum PropValue {
    /// String attribute value
    Str(CompactString),
    /// Boolean attribute (`disabled`, `checked`, ...)
    Bool(bool),
    /// Integer value, serialized in decimal
    Int(i64),
    /// One or more event handlers, invoked in order
    Handlers(SmallVec<[EventHandler; 1]>),
}

impl PropValue {
    /// Create a prop value holding a single event handler.
    pub fn handler(f: impl Fn(&Event) + Send + Sync + 'static) -> Self {
        Self::Handlers(smallvec::smallvec![EventHandler::new(f)])
    }

    /// Get the string payload, if this is a string value
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Get the handler list, if this is an event binding
    pub fn as_handlers(&self) -> Option<&[EventHandler]> {
        match self {
            Self::Handlers(handlers) => Some(handlers),
            _ => None,
        }
    }

    /// Attribute text for this value.
    ///
    /// `None` means the attribute should be absent (`Bool(false)`, handlers).
    pub fn to_attr_string(&self) -> Option<CompactString> {
        match self {
            Self::Str(s) => Some(s.clone()),
            Self::Bool(true) => Some(CompactString::default()),
            Self::Bool(false) | Self::Handlers(_) => None,
            Self::Int(n) => Some(compact_str::format_compact!("{n}")),
        }
    }
}

impl From<&str> for PropValue {
    fn from(value: &str) -> Self {
        Self::Str(value.into())
    }
}

impl From<String> for PropValue {
    fn from(value: String) -> Self {
        Self::Str(value.into())
    }
}

impl From<CompactString> for PropValue {
    fn from(value: CompactString) -> Self {
        Self::Str(value)
    }
}

impl From<bool> for PropValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for PropValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for PropValue {
    fn from(value: i32) -> Self {
        Self::Int(value.into())
    }
}

impl From<EventHandler> for PropValue {
    fn from(value: EventHandler) -> Self {
        Self::Handlers(smallvec::smallvec![value])
    }
}

// =============================================================================
// PropsExt
// =============================================================================

/// Extension trait for prop operations on Props
pub trait PropsExt {
    /// Get a prop value by name
    fn get_prop(&self, name: &str) -> Option<&PropValue>;

    /// Check if a prop exists
    fn has_prop(&self, name: &str) -> bool;

    /// Set a prop value (insert or update)
    fn set_prop(&mut self, name: impl Into<PropKey>, value: impl Into<PropValue>);

    /// Remove a prop by name, returning the old value if present
    fn remove_prop(&mut self, name: &str) -> Option<PropValue>;
}

impl PropsExt for Props {
    fn get_prop(&self, name: &str) -> Option<&PropValue> {
        self.iter().find(|(k, _)| k == name).map(|(_, v)| v)
    }

    fn has_prop(&self, name: &str) -> bool {
        self.iter().any(|(k, _)| k == name)
    }

    fn set_prop(&mut self, name: impl Into<PropKey>, value: impl Into<PropValue>) {
        let name = name.into();
        let value = value.into();
        if let Some(prop) = self.iter_mut().find(|(k, _)| k == &name) {
            prop.1 = value;
        } else {
            self.push((name, value));
        }
    }

    fn remove_prop(&mut self, name: &str) -> Option<PropValue> {
        self.iter()
            .position(|(k, _)| k == name)
            .map(|pos| self.remove(pos).1)
    }
}

/// Check whether a prop name binds an event (`onClick`, `oninput`).
#[inline]
pub fn is_event_prop(name: &str) -> bool {
    name.len() > 2 && name.starts_with("on")
}

// =============================================================================
// Prop diff
// =============================================================================

/// A single prop change between two renders.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PropChange<'a> {
    pub key: &'a str,
    pub old: Option<&'a PropValue>,
    /// `None` means the prop was removed
    pub new: Option<&'a PropValue>,
}

/// Compute prop changes from `old` to `new`.
///
/// Changed or added props come first in `new`'s order, then removed props
/// in `old`'s order.
pub fn diff_props<'a>(old: &'a Props, new: &'a Props) -> SmallVec<[PropChange<'a>; 4]> {
    let mut changes = SmallVec::new();

    for (key, value) in new {
        let prev = old.get_prop(key);
        if prev != Some(value) {
            changes.push(PropChange {
                key,
                old: prev,
                new: Some(value),
            });
        }
    }

    for (key, value) in old {
        if !new.has_prop(key) {
            changes.push(PropChange {
                key,
                old: Some(value),
                new: None,
            });
        }
    }

    changes
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_props_operations() {
        let mut props: Props = Vec::new();

        props.set_prop("id", "main");
        props.set_prop("disabled", true);
        assert_eq!(props.len(), 2);

        assert_eq!(props.get_prop("id"), Some(&PropValue::from("main")));
        assert_eq!(props.get_prop("disabled"), Some(&PropValue::Bool(true)));
        assert_eq!(props.get_prop("href"), None);

        props.set_prop("id", "wrapper");
        assert_eq!(props.get_prop("id").and_then(PropValue::as_str), Some("wrapper"));
        assert_eq!(props.len(), 2);

        let removed = props.remove_prop("id");
        assert_eq!(removed, Some(PropValue::from("wrapper")));
        assert!(!props.has_prop("id"));
        assert_eq!(props.len(), 1);
    }

    #[test]
    fn test_handler_identity() {
        let a = EventHandler::new(|_| {});
        let b = EventHandler::new(|_| {});
        assert_eq!(a, a.clone());
        assert_ne!(a, b);
        assert_eq!(PropValue::from(a.clone()), PropValue::from(a));
    }

    #[test]
    fn test_attr_string() {
        assert_eq!(PropValue::from("x").to_attr_string().as_deref(), Some("x"));
        assert_eq!(PropValue::Bool(true).to_attr_string().as_deref(), Some(""));
        assert_eq!(PropValue::Bool(false).to_attr_string(), None);
        assert_eq!(PropValue::Int(-4).to_attr_string().as_deref(), Some("-4"));
        assert_eq!(PropValue::handler(|_| {}).to_attr_string(), None);
    }

    #[test]
    fn test_is_event_prop() {
        assert!(is_event_prop("onClick"));
        assert!(is_event_prop("oninput"));
        assert!(!is_event_prop("on"));
        assert!(!is_event_prop("class"));
    }

    #[test]
    fn test_diff_props() {
        let old: Props = vec![
            ("id".into(), "a".into()),
            ("title".into(), "t".into()),
            ("hidden".into(), true.into()),
        ];
        let new: Props = vec![
            ("id".into(), "a".into()),
            ("title".into(), "u".into()),
            ("lang".into(), "en".into()),
        ];

        let changes = diff_props(&old, &new);
        let keys: Vec<_> = changes.iter().map(|c| c.key).collect();
        assert_eq!(keys, vec!["title", "lang", "hidden"]);

        assert_eq!(changes[0].old, Some(&PropValue::from("t")));
        assert_eq!(changes[1].old, None);
        assert_eq!(changes[2].new, None);
    }

    #[test]
    fn test_diff_props_unchanged() {
        let handler = EventHandler::new(|_| {});
        let old: Props = vec![("onClick".into(), handler.clone().into())];
        let new: Props = vec![("onClick".into(), handler.into())];
        assert!(diff_props(&old, &new).is_empty());
    }
}

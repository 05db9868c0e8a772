//! Sibling identity keys

use std::fmt;

use compact_str::{CompactString, ToCompactString};

/// Caller-supplied stable identity of a node among its siblings.
///
/// Keys only need to be unique within one sibling sequence. Numeric keys are
/// stored in their decimal form, so `Key::from(7u32) == Key::from("7")`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Key(CompactString);

impl Key {
    /// Create a key from anything string-like.
    pub fn new(key: impl Into<CompactString>) -> Self {
        Self(key.into())
    }

    /// Get the key as a string slice.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Key {
    fn from(value: &str) -> Self {
        Self(value.into())
    }
}

impl From<String> for Key {
    fn from(value: String) -> Self {
        Self(value.into())
    }
}

impl From<CompactString> for Key {
    fn from(value: CompactString) -> Self {
        Self(value)
    }
}

macro_rules! impl_numeric_key {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Key {
                fn from(value: $ty) -> Self {
                    Self(value.to_compact_string())
                }
            }
        )*
    };
}

impl_numeric_key!(u32, u64, usize, i32, i64);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_keys_match_strings() {
        assert_eq!(Key::from(7u32), Key::from("7"));
        assert_eq!(Key::from(-3i64).as_str(), "-3");
        assert_ne!(Key::from(1usize), Key::from(10usize));
    }

    #[test]
    fn test_key_display() {
        assert_eq!(Key::new("row-9").to_string(), "row-9");
    }
}

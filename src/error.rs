//! Error types for tola-renderer.
//!
//! Reconciliation itself never fails. Errors only come from the key contract
//! check that runs before any host mutation, and from contended shared access.

use thiserror::Error;

use crate::node::Key;

/// Errors that can occur when rendering.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RenderError {
    /// Two siblings in one sequence carry the same key
    #[error("duplicate key `{key}` among siblings")]
    DuplicateKey {
        /// The repeated key
        key: Key,
    },

    /// A sibling sequence mixes keyed and unkeyed nodes
    #[error("sibling at index {index} breaks the all-keyed or all-unkeyed contract")]
    MixedKeys {
        /// Index of the first sibling whose keyedness differs from the first sibling
        index: usize,
    },

    /// A render is already in progress on this renderer
    #[error("renderer is busy: render calls must be serialized")]
    Busy,
}

/// Result type alias for render operations.
pub type RenderResult<T> = Result<T, RenderError>;

impl RenderError {
    /// Create a duplicate key error.
    pub fn duplicate_key(key: impl Into<Key>) -> Self {
        Self::DuplicateKey { key: key.into() }
    }

    /// Check if this error is a violation of the sibling key contract.
    pub fn is_key_violation(&self) -> bool {
        matches!(self, Self::DuplicateKey { .. } | Self::MixedKeys { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = RenderError::duplicate_key("row-1");
        assert_eq!(err.to_string(), "duplicate key `row-1` among siblings");

        let err = RenderError::MixedKeys { index: 3 };
        assert_eq!(
            err.to_string(),
            "sibling at index 3 breaks the all-keyed or all-unkeyed contract"
        );
    }

    #[test]
    fn test_key_violation() {
        assert!(RenderError::duplicate_key(1u32).is_key_violation());
        assert!(RenderError::MixedKeys { index: 0 }.is_key_violation());
        assert!(!RenderError::Busy.is_key_violation());
    }

    #[test]
    fn test_error_is_send_sync() {
        static_assertions::assert_impl_all!(RenderError: Send, Sync);
    }
}

//! Renderer configuration.

/// How strictly sibling keys are checked before a render touches the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCheck {
    /// Trust the caller. Duplicate keys are resolved silently during
    /// reconciliation (the extra node is unmounted).
    Off,
    /// Reject a tree with duplicate keys or mixed keyed/unkeyed siblings
    /// before any host mutation.
    Strict,
}

/// Configuration for [`Renderer`](crate::Renderer).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderConfig {
    /// Key contract checking.
    /// Default: `Strict` in debug builds, `Off` in release builds
    pub key_check: KeyCheck,
}

impl RenderConfig {
    /// Development config (strict key checking).
    pub const DEV: Self = Self {
        key_check: KeyCheck::Strict,
    };

    /// Production config (no key checking).
    pub const PROD: Self = Self {
        key_check: KeyCheck::Off,
    };

    /// Create a config with explicit key checking.
    pub fn new(key_check: KeyCheck) -> Self {
        Self { key_check }
    }

    /// Check if key validation runs before each render.
    #[inline]
    pub fn checks_keys(&self) -> bool {
        self.key_check == KeyCheck::Strict
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        if cfg!(debug_assertions) {
            Self::DEV
        } else {
            Self::PROD
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets() {
        assert!(RenderConfig::DEV.checks_keys());
        assert!(!RenderConfig::PROD.checks_keys());
        assert_eq!(RenderConfig::new(KeyCheck::Off), RenderConfig::PROD);
    }

    #[test]
    fn test_default_follows_build_profile() {
        assert_eq!(RenderConfig::default().checks_keys(), cfg!(debug_assertions));
    }
}

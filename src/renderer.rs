//! Renderer entry point.
//!
//! A [`Renderer`] owns a [`Host`] and remembers, per container, the root
//! node it last rendered there. Each [`Renderer::render`] call reconciles
//! that root against a new tree and mutates the host in place.
//!
//! ```
//! # #[cfg(feature = "memory")] {
//! use tola_renderer::{MemoryHost, Node, Renderer};
//!
//! let mut host = MemoryHost::new();
//! let root = host.create_root("div");
//! let mut renderer = Renderer::new(host);
//!
//! let view = |items: &[&str]| {
//!     Node::element("ul").children(
//!         items.iter().map(|s| Node::element("li").with_key(*s).with_text(*s)),
//!     )
//! };
//!
//! renderer.render(Some(view(&["a", "b"])), &root).unwrap();
//! let stats = renderer.render(Some(view(&["b", "a"])), &root).unwrap();
//!
//! assert_eq!(stats.moved, 1);
//! assert_eq!(
//!     renderer.host().inner_html(root),
//!     "<ul><li>b</li><li>a</li></ul>"
//! );
//! # }
//! ```

use rustc_hash::FxHashMap;

use crate::config::RenderConfig;
use crate::error::RenderResult;
use crate::host::Host;
use crate::node::Node;
use crate::patch::{Patcher, RenderStats};
use crate::validate::check_keys;

/// Reconciles virtual trees onto a host.
pub struct Renderer<H: Host> {
    host: H,
    config: RenderConfig,
    /// Last rendered root per container.
    roots: FxHashMap<H::Handle, Node<H::Handle>>,
}

impl<H: Host> Renderer<H> {
    /// Create a renderer with the default config.
    pub fn new(host: H) -> Self {
        Self::with_config(host, RenderConfig::default())
    }

    /// Create a renderer with an explicit config.
    pub fn with_config(host: H, config: RenderConfig) -> Self {
        Self {
            host,
            config,
            roots: FxHashMap::default(),
        }
    }

    /// Render `node` into `container`.
    ///
    /// The previous root of `container` (if any) is reconciled against
    /// `node`; `None` unmounts it. On success `node` becomes the recorded
    /// root. With key checking enabled a tree that breaks the sibling key
    /// contract is rejected before the host is touched.
    pub fn render(
        &mut self,
        node: Option<Node<H::Handle>>,
        container: &H::Handle,
    ) -> RenderResult<RenderStats> {
        if self.config.checks_keys()
            && let Some(node) = &node
        {
            check_keys(node)?;
        }

        let previous = self.roots.remove(container);
        let mut patcher = Patcher::new(&mut self.host);

        match node {
            Some(mut node) => {
                patcher.patch(previous.as_ref(), &mut node, container, None);
                self.roots.insert(container.clone(), node);
            }
            None => {
                if let Some(previous) = &previous {
                    patcher.unmount(previous);
                }
            }
        }

        let stats = patcher.into_stats();
        tracing::debug!(
            container = ?container,
            mounted = stats.mounted,
            unmounted = stats.unmounted,
            moved = stats.moved,
            patched = stats.patched,
            "render"
        );
        Ok(stats)
    }

    /// Unmount whatever is rendered in `container`.
    pub fn unmount(&mut self, container: &H::Handle) -> RenderStats {
        let Some(previous) = self.roots.remove(container) else {
            return RenderStats::default();
        };
        let mut patcher = Patcher::new(&mut self.host);
        patcher.unmount(&previous);
        patcher.into_stats()
    }

    /// Root currently rendered in `container`.
    pub fn root(&self, container: &H::Handle) -> Option<&Node<H::Handle>> {
        self.roots.get(container)
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    /// Mutable host access. Changes made here are invisible to the next
    /// reconciliation.
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn into_host(self) -> H {
        self.host
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }
}

impl<H: Host + std::fmt::Debug> std::fmt::Debug for Renderer<H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Renderer")
            .field("host", &self.host)
            .field("config", &self.config)
            .field("containers", &self.roots.len())
            .finish()
    }
}

//! Thread-safe renderer handle.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::config::RenderConfig;
use crate::error::{RenderError, RenderResult};
use crate::host::Host;
use crate::node::Node;
use crate::patch::RenderStats;
use crate::renderer::Renderer;

/// Shared [`Renderer`] that serializes renders across threads.
///
/// Uses `parking_lot::Mutex`: renders mutate the host, so there is no
/// read-only fast path worth an `RwLock`.
pub struct SharedRenderer<H: Host> {
    inner: Arc<Mutex<Renderer<H>>>,
}

impl<H: Host> Clone for SharedRenderer<H> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<H: Host> SharedRenderer<H> {
    /// Wrap a host with the default config.
    pub fn new(host: H) -> Self {
        Self::from_renderer(Renderer::new(host))
    }

    pub fn with_config(host: H, config: RenderConfig) -> Self {
        Self::from_renderer(Renderer::with_config(host, config))
    }

    pub fn from_renderer(renderer: Renderer<H>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(renderer)),
        }
    }

    /// Render, blocking until no other render is in progress.
    pub fn render(
        &self,
        node: Option<Node<H::Handle>>,
        container: &H::Handle,
    ) -> RenderResult<RenderStats> {
        self.inner.lock().render(node, container)
    }

    /// Render if no other render is in progress, else fail with
    /// [`RenderError::Busy`].
    ///
    /// A handler that renders from inside a render of the same renderer
    /// gets `Busy` here instead of deadlocking.
    pub fn try_render(
        &self,
        node: Option<Node<H::Handle>>,
        container: &H::Handle,
    ) -> RenderResult<RenderStats> {
        let mut renderer = self.inner.try_lock().ok_or(RenderError::Busy)?;
        renderer.render(node, container)
    }

    /// Execute a closure with exclusive access to the renderer.
    pub fn with_renderer<R>(&self, f: impl FnOnce(&mut Renderer<H>) -> R) -> R {
        f(&mut self.inner.lock())
    }

    /// Execute a closure with exclusive access to the host.
    pub fn with_host<R>(&self, f: impl FnOnce(&mut H) -> R) -> R {
        f(self.inner.lock().host_mut())
    }
}

#[cfg(all(test, feature = "memory"))]
mod tests {
    use std::thread;

    use static_assertions::assert_impl_all;

    use super::*;
    use crate::host::{MemoryHost, NodeId};

    assert_impl_all!(SharedRenderer<MemoryHost>: Send, Sync, Clone);

    fn setup() -> (SharedRenderer<MemoryHost>, NodeId) {
        let mut host = MemoryHost::new();
        let root = host.create_root("ul");
        (SharedRenderer::with_config(host, RenderConfig::DEV), root)
    }

    fn items(keys: &[String]) -> Node<NodeId> {
        Node::fragment(keys.iter().map(|k| Node::element("li").with_key(k.as_str()).with_text(k.as_str())))
    }

    #[test]
    fn test_renders_from_many_threads() {
        let (shared, root) = setup();

        let workers: Vec<_> = (0..4)
            .map(|t| {
                let shared = shared.clone();
                thread::spawn(move || {
                    for round in 0..10 {
                        let keys: Vec<String> = (0..5).map(|i| format!("{}", (i + t + round) % 7)).collect();
                        shared.render(Some(items(&keys)), &root).expect("render");
                    }
                })
            })
            .collect();
        for worker in workers {
            worker.join().expect("worker panicked");
        }

        // whatever render came last, the host matches the recorded root
        shared.with_renderer(|r| {
            let expected: String = r
                .root(&root)
                .map(|n| {
                    n.child_nodes()
                        .iter()
                        .filter_map(|c| c.children.as_text())
                        .collect()
                })
                .unwrap_or_default();
            assert_eq!(r.host().text_content(root), expected);
            assert_eq!(r.host().children(root).len(), 5);
        });
    }

    #[test]
    fn test_try_render_busy_while_locked() {
        let (shared, root) = setup();
        let keys = vec!["a".to_string()];

        let inner = shared.clone();
        let result = shared.with_host(|_| inner.try_render(Some(items(&keys)), &root));
        assert_eq!(result, Err(RenderError::Busy));

        let stats = shared.try_render(Some(items(&keys)), &root).expect("render");
        assert_eq!(stats.mounted, 1);
    }

    #[test]
    fn test_with_host() {
        let (shared, root) = setup();
        shared
            .render(Some(Node::element("li").with_text("x")), &root)
            .expect("render");
        assert_eq!(shared.with_host(|h| h.inner_html(root)), "<li>x</li>");
    }
}

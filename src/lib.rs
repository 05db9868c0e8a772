//! tola-renderer - Retained-mode renderer with keyed reconciliation
//!
//! ## Core Concepts
//!
//! **Virtual nodes**: a [`Node`] describes what a host tree should look like.
//! Once rendered, each node remembers the host object it was materialized
//! into, so the next render can reuse it.
//!
//! **Keyed fast diff**: sibling sequences are reconciled by key. Common
//! prefixes and suffixes are patched in place; the rest is matched through a
//! key index and only nodes outside the longest increasing subsequence of
//! old positions are moved.
//!
//! **Host adapter**: the renderer never touches real objects directly. A
//! [`Host`] implementation owns creation, insertion, removal and props.
//!
//! ## Modules
//! - `node`: Node, NodeKind, Key, Children
//! - `props`: prop values, event handlers, prop diffing
//! - `algo`: keyed reconciliation and LIS
//! - `host`: Host trait, in-memory host, op recorder
//! - `renderer`: the `Renderer` entry point
//! - `shared`: thread-safe renderer handle
//!
//! ## Usage
//!
//! ```
//! # #[cfg(feature = "memory")] {
//! use tola_renderer::prelude::*;
//!
//! let mut host = MemoryHost::new();
//! let app = host.create_root("main");
//! let mut renderer = Renderer::new(host);
//!
//! let todo = |items: &[(u32, &str)]| {
//!     Node::element("ul").prop("class", "todo").children(
//!         items
//!             .iter()
//!             .map(|(id, text)| Node::element("li").with_key(*id).with_text(*text)),
//!     )
//! };
//!
//! renderer.render(Some(todo(&[(1, "milk"), (2, "eggs")])), &app)?;
//! let stats = renderer.render(Some(todo(&[(2, "eggs"), (3, "bread"), (1, "milk")])), &app)?;
//!
//! assert_eq!(stats.mounted, 1);
//! assert_eq!(stats.moved, 1);
//! assert_eq!(
//!     renderer.host().inner_html(app),
//!     r#"<ul class="todo"><li>eggs</li><li>bread</li><li>milk</li></ul>"#
//! );
//! # }
//! # Ok::<(), tola_renderer::RenderError>(())
//! ```

// =============================================================================
// Core modules
// =============================================================================

/// Node types: Node, NodeKind, Key, Children
pub mod node;

/// Props, event handlers and prop diffing
pub mod props;

/// Algorithms: keyed reconciliation, LIS
pub mod algo;

/// Host adapter trait and implementations
pub mod host;

/// Sibling key contract checking
pub mod validate;

/// Renderer configuration
pub mod config;

/// Error types
pub mod error;

/// Prelude for common imports
pub mod prelude;

mod patch;
mod renderer;
mod shared;

// =============================================================================
// Re-exports
// =============================================================================

// Node types
pub use node::{Children, Key, Node, NodeKind, Tag};

// Props
pub use props::{Event, EventHandler, PropKey, PropValue, Props, PropsExt};

// Algorithms
pub use algo::longest_increasing_subsequence;

// Host
pub use host::{Host, HostOp, Recorder};

#[cfg(feature = "memory")]
pub use host::{MemoryHost, NodeId};

// Rendering
pub use config::{KeyCheck, RenderConfig};
pub use patch::RenderStats;
pub use renderer::Renderer;
pub use shared::SharedRenderer;
pub use validate::check_keys;

// Error types
pub use error::{RenderError, RenderResult};

// =============================================================================
// Tests
// =============================================================================

#[cfg(all(test, feature = "memory"))]
mod tests {
    use super::*;

    fn row(id: u32, label: &str, selected: bool) -> Node<NodeId> {
        Node::element("tr")
            .with_key(id)
            .prop("class", if selected { "danger" } else { "" })
            .children([
                Node::element("td").with_text(id.to_string()),
                Node::element("td").child(Node::element("a").with_text(label)),
            ])
    }

    fn table(rows: &[(u32, &str)], selected: Option<u32>) -> Node<NodeId> {
        Node::element("table").child(
            Node::element("tbody").children(
                rows.iter()
                    .map(|&(id, label)| row(id, label, selected == Some(id))),
            ),
        )
    }

    fn labels(r: &Renderer<Recorder<MemoryHost>>, root: NodeId) -> String {
        r.host().inner().text_content(root)
    }

    #[test]
    fn test_table_session() {
        let mut host = Recorder::new(MemoryHost::new());
        let root = host.inner_mut().create_root("div");
        let mut r = Renderer::with_config(host, RenderConfig::DEV);

        let mut rows = vec![(1, "one"), (2, "two"), (3, "three"), (4, "four")];
        r.render(Some(table(&rows, None)), &root).expect("mount");
        assert_eq!(labels(&r, root), "1one2two3three4four");

        // select a row: one prop update, nothing structural
        r.host_mut().clear();
        let stats = r.render(Some(table(&rows, Some(2))), &root).expect("select");
        assert_eq!(stats.props_updated, 1);
        assert_eq!(stats.structural_ops(), 0);

        // swap rows 2 and 4
        rows.swap(1, 3);
        r.host_mut().clear();
        let stats = r.render(Some(table(&rows, Some(2))), &root).expect("swap");
        assert_eq!(labels(&r, root), "1one4four3three2two");
        assert_eq!(stats.moved, 2);
        assert_eq!(stats.mounted, 0);
        assert!(r.host().ops().iter().all(|op| !op.is_create() && !op.is_remove()));

        // delete a row, append another
        rows.remove(0);
        rows.push((5, "five"));
        let stats = r.render(Some(table(&rows, None)), &root).expect("update");
        assert_eq!(labels(&r, root), "4four3three2two5five");
        assert_eq!(stats.unmounted, 1);
        // tr, two td, a
        assert_eq!(stats.mounted, 4);

        // clear
        let stats = r.render(Some(table(&[], None)), &root).expect("clear");
        assert_eq!(stats.unmounted, 4);
        assert_eq!(labels(&r, root), "");
    }

    #[test]
    fn test_numeric_and_string_keys_match() {
        assert_eq!(Key::from(7u32), Key::from("7"));
    }
}

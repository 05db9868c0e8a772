//! Prelude module for common imports.
//!
//! ```
//! use tola_renderer::prelude::*;
//! ```

// Node types
pub use crate::node::{Children, Key, Node, NodeKind};

// Props
pub use crate::props::{Event, EventHandler, PropValue, Props, PropsExt};

// Host
pub use crate::host::{Host, HostOp, Recorder};

#[cfg(feature = "memory")]
pub use crate::host::{MemoryHost, NodeId};

// Rendering
pub use crate::config::{KeyCheck, RenderConfig};
pub use crate::patch::RenderStats;
pub use crate::renderer::Renderer;
pub use crate::shared::SharedRenderer;

// Error
pub use crate::error::{RenderError, RenderResult};

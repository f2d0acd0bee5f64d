//! Backdrop UI: layout nodes bound to renderer scene nodes.
//!
//! The central type is [`LayoutNode`]. A node of kind [`NodeKind::Surface`]
//! owns a backing surface that is recreated after every layout pass and
//! painted, in order of precedence, by its background color, by the first
//! externally supplied paint, or by a transparent default paint.
//!
//! ```rust,ignore
//! use backdrop_ui::prelude::*;
//!
//! let mut node = LayoutNode::surface(handle, &NodeConfig::default(), backend)?;
//! node.set_width(100.0);
//! node.set_height(50.0);
//! node.on_layout_complete(backend)?;               // 100×50 surface, default paint
//! node.set_background_color(Some(PackedColor(0xFF0000FF)), backend)?;
//! node.teardown(backend);
//! ```

pub mod config;
pub mod lifecycle;
pub mod node;
pub mod surface;

pub use node::{LayoutNode, NodeKind, ParentLink};

/// Everything needed to drive nodes from a host layout tree.
pub mod prelude {
    pub use crate::config::{NodeConfig, PaintSetup};
    pub use crate::lifecycle::Lifecycle;
    pub use crate::node::{LayoutNode, NodeKind, ParentLink};
    pub use crate::surface::Dimensions;

    pub use backdrop_engine::backend::{Backend, BackendError};
    pub use backdrop_engine::coords::{Rect, Vec2};
    pub use backdrop_engine::paint::{ColorChannel, PackedColor};
    pub use backdrop_engine::resource::{Handle, Node, Owned, Paint, Surface};
}

//! Renderer backend boundary.
//!
//! The native renderer owns geometry, paints and the scene graph. Layout nodes
//! reach it only through the [`Backend`] trait, passed by `&mut` into every
//! operation that may touch native resources.
//!
//! Capability groups:
//! - surface: create / paint / destroy flat quads
//! - paint: create / configure / destroy shading resources
//! - scene node: assign geometry and body paints to an existing node

mod error;
pub mod recording;

pub use error::BackendError;
pub use recording::{BackendEvent, RecordingBackend};

use crate::paint::{ColorChannel, PackedColor};
use crate::resource::{Handle, Node, Owned, Paint, Surface};

/// Handle-based access to a native renderer.
///
/// Only allocation can fail. Setters on live handles are infallible; calling
/// them with a handle the backend does not know is a caller bug that backends
/// may log but must not panic on.
pub trait Backend {
    // ── surface ───────────────────────────────────────────────────────────

    /// Allocates a flat rectangle of `width × height` logical units.
    fn create_surface(&mut self, width: f32, height: f32) -> Result<Owned<Surface>, BackendError>;

    /// Makes `paint` the paint rendered on `surface`.
    fn set_surface_paint(&mut self, surface: Handle<Surface>, paint: Handle<Paint>);

    fn destroy_surface(&mut self, surface: Owned<Surface>);

    // ── paint ─────────────────────────────────────────────────────────────

    fn create_paint(&mut self) -> Result<Owned<Paint>, BackendError>;

    fn set_paint_color(&mut self, paint: Handle<Paint>, color: PackedColor, channel: ColorChannel);

    fn set_paint_writes_depth(&mut self, paint: Handle<Paint>, enabled: bool);

    fn set_paint_reads_depth(&mut self, paint: Handle<Paint>, enabled: bool);

    fn destroy_paint(&mut self, paint: Owned<Paint>);

    // ── scene node ────────────────────────────────────────────────────────

    /// Assigns `geometry` to `node` without touching the node's body paints.
    fn set_node_geometry(&mut self, node: Handle<Node>, geometry: Handle<Surface>);

    /// Replaces the paints rendered on `node`'s own body.
    fn set_node_paints(&mut self, node: Handle<Node>, paints: &[Handle<Paint>]);
}

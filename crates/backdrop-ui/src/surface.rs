//! Surface-backed node body.
//!
//! A surface body owns one backing surface sized to the node's layout box and
//! decides which paint covers it. Paint precedence, first match wins:
//!
//! 1. background color set → a node-owned color paint
//! 2. external paints non-empty → the first external paint (borrowed)
//! 3. otherwise → the node's transparent default paint
//!
//! Property updates are two-phase. Dimensions are staged until the next layout
//! completion. Colors and external paints are recorded while the body is
//! pending (no surface yet) and applied immediately once a surface is
//! committed.

use backdrop_engine::backend::{Backend, BackendError};
use backdrop_engine::paint::PackedColor;
use backdrop_engine::resource::{Handle, Node, Owned, Paint, Surface};

use crate::config::{NodeConfig, PaintSetup};

/// Requested layout size. Unset sizes are zero.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Dimensions {
    pub width: f32,
    pub height: f32,
}

impl Dimensions {
    #[inline]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// True when either side is zero or negative. Unset sizes are collapsed.
    #[inline]
    pub fn is_collapsed(self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}

/// The surface produced by the most recent layout completion.
#[derive(Debug)]
struct Committed {
    surface: Owned<Surface>,
    size: Dimensions,
    /// Paint currently set on `surface`.
    applied: Option<Handle<Paint>>,
}

#[derive(Debug)]
pub(crate) struct SurfaceBody {
    staged: Dimensions,
    background: Option<PackedColor>,
    paints: Vec<Handle<Paint>>,
    /// `None` while pending: no layout has completed yet, or the last surface
    /// allocation failed.
    committed: Option<Committed>,
    color_paint: Option<Owned<Paint>>,
    default_paint: Owned<Paint>,
    setup: PaintSetup,
}

impl SurfaceBody {
    /// Creates the body and its default paint.
    pub(crate) fn new(config: &NodeConfig, backend: &mut dyn Backend) -> Result<Self, BackendError> {
        let default_paint = backend.create_paint()?;
        config.paint.configure(backend, default_paint.handle(), config.default_color);

        Ok(Self {
            staged: Dimensions::default(),
            background: None,
            paints: Vec::new(),
            committed: None,
            color_paint: None,
            default_paint,
            setup: config.paint,
        })
    }

    // ── staged properties ─────────────────────────────────────────────────

    pub(crate) fn set_width(&mut self, width: f32) {
        self.staged.width = width;
    }

    pub(crate) fn set_height(&mut self, height: f32) {
        self.staged.height = height;
    }

    pub(crate) fn dimensions(&self) -> Dimensions {
        self.staged
    }

    pub(crate) fn background(&self) -> Option<PackedColor> {
        self.background
    }

    pub(crate) fn paints(&self) -> &[Handle<Paint>] {
        &self.paints
    }

    // ── committed state ───────────────────────────────────────────────────

    pub(crate) fn surface(&self) -> Option<Handle<Surface>> {
        self.committed.as_ref().map(|c| c.surface.handle())
    }

    pub(crate) fn surface_size(&self) -> Option<Dimensions> {
        self.committed.as_ref().map(|c| c.size)
    }

    pub(crate) fn applied_paint(&self) -> Option<Handle<Paint>> {
        self.committed.as_ref().and_then(|c| c.applied)
    }

    pub(crate) fn color_paint(&self) -> Option<Handle<Paint>> {
        self.color_paint.as_ref().map(Owned::handle)
    }

    pub(crate) fn default_paint(&self) -> Handle<Paint> {
        self.default_paint.handle()
    }

    // ── operations ────────────────────────────────────────────────────────

    pub(crate) fn set_background_color(
        &mut self,
        color: Option<PackedColor>,
        backend: &mut dyn Backend,
    ) -> Result<(), BackendError> {
        self.background = color;
        self.apply_precedence(backend)
    }

    /// Records external paints as a precedence candidate. The node body itself
    /// is never painted with them.
    pub(crate) fn set_paints(
        &mut self,
        paints: Vec<Handle<Paint>>,
        backend: &mut dyn Backend,
    ) -> Result<(), BackendError> {
        self.paints = paints;
        if self.background.is_none() {
            self.apply_precedence(backend)?;
        }
        Ok(())
    }

    /// Geometry goes straight to the scene node; body paints are left alone.
    pub(crate) fn accept_geometry(
        &self,
        node: Handle<Node>,
        geometry: Handle<Surface>,
        backend: &mut dyn Backend,
    ) {
        backend.set_node_geometry(node, geometry);
    }

    /// Commits staged dimensions: replaces the backing surface, repaints it,
    /// and installs it as the node's geometry.
    ///
    /// Runs on every layout completion, even when nothing changed. If the new
    /// surface cannot be allocated the body is left pending, and the scene
    /// node's geometry still names the destroyed surface until a later
    /// recreation succeeds.
    pub(crate) fn recreate_surface(
        &mut self,
        node: Handle<Node>,
        backend: &mut dyn Backend,
    ) -> Result<(), BackendError> {
        if let Some(old) = self.committed.take() {
            backend.destroy_surface(old.surface);
        }

        let size = self.staged;
        let surface = match backend.create_surface(size.width, size.height) {
            Ok(surface) => surface,
            Err(err) => {
                log::warn!("{node:?}: surface allocation failed: {err}");
                return Err(err);
            }
        };
        let geometry = surface.handle();
        log::debug!("{node:?}: committed {geometry:?} {}x{}", size.width, size.height);
        if size.is_collapsed() {
            log::trace!("{node:?}: {geometry:?} has no visible area");
        }

        self.committed = Some(Committed { surface, size, applied: None });
        self.apply_precedence(backend)?;
        self.accept_geometry(node, geometry, backend);
        Ok(())
    }

    /// Sets the winning paint on the committed surface. No-op while pending.
    ///
    /// When the color paint cannot be allocated the surface falls back to the
    /// default paint before the error is returned.
    fn apply_precedence(&mut self, backend: &mut dyn Backend) -> Result<(), BackendError> {
        let Some(committed) = self.committed.as_mut() else {
            return Ok(());
        };

        let winner = match self.background {
            Some(color) => {
                if let Some(old) = self.color_paint.take() {
                    backend.destroy_paint(old);
                }
                let paint = match backend.create_paint() {
                    Ok(paint) => paint,
                    Err(err) => {
                        let fallback = self.default_paint.handle();
                        backend.set_surface_paint(committed.surface.handle(), fallback);
                        committed.applied = Some(fallback);
                        return Err(err);
                    }
                };
                self.setup.configure(backend, paint.handle(), color);
                self.color_paint.insert(paint).handle()
            }
            None => self
                .paints
                .first()
                .copied()
                .unwrap_or_else(|| self.default_paint.handle()),
        };

        backend.set_surface_paint(committed.surface.handle(), winner);
        committed.applied = Some(winner);

        if self.background.is_none() {
            if let Some(superseded) = self.color_paint.take() {
                backend.destroy_paint(superseded);
            }
        }
        Ok(())
    }

    /// Releases every owned resource. External paints are not touched.
    pub(crate) fn release(self, backend: &mut dyn Backend) {
        if let Some(committed) = self.committed {
            backend.destroy_surface(committed.surface);
        }
        if let Some(paint) = self.color_paint {
            backend.destroy_paint(paint);
        }
        backend.destroy_paint(self.default_paint);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use backdrop_engine::backend::{BackendEvent, RecordingBackend};
    use backdrop_engine::paint::ColorChannel;

    fn body(backend: &mut RecordingBackend) -> SurfaceBody {
        SurfaceBody::new(&NodeConfig::default(), backend).unwrap()
    }

    #[test]
    fn default_paint_is_transparent_and_depth_tested() {
        let mut b = RecordingBackend::new();
        let body = body(&mut b);

        let rec = b.paint(body.default_paint()).unwrap();
        assert_eq!(rec.color(ColorChannel::Diffuse), Some(PackedColor::TRANSPARENT));
        assert!(rec.writes_depth);
        assert!(rec.reads_depth);
        body.release(&mut b);
    }

    #[test]
    fn pending_body_records_color_without_resources() {
        let mut b = RecordingBackend::new();
        let mut body = body(&mut b);
        b.take_events();

        body.set_background_color(Some(PackedColor(0xFF0000FF)), &mut b).unwrap();
        assert!(b.events().is_empty());
        assert_eq!(body.background(), Some(PackedColor(0xFF0000FF)));
        assert!(body.color_paint().is_none());
        body.release(&mut b);
    }

    #[test]
    fn recreate_orders_destroy_before_create() {
        let mut b = RecordingBackend::new();
        let node = b.add_node();
        let mut body = body(&mut b);
        body.recreate_surface(node, &mut b).unwrap();
        let first = body.surface().unwrap();
        b.take_events();

        body.recreate_surface(node, &mut b).unwrap();
        let second = body.surface().unwrap();
        let events = b.take_events();
        assert_eq!(events[0], BackendEvent::SurfaceDestroyed { surface: first });
        assert!(matches!(events[1], BackendEvent::SurfaceCreated { surface, .. } if surface == second));
        assert_eq!(events.last(), Some(&BackendEvent::NodeGeometry { node, geometry: second }));
        body.release(&mut b);
    }

    #[test]
    fn color_paint_is_rebuilt_on_each_application() {
        let mut b = RecordingBackend::new();
        let node = b.add_node();
        let mut body = body(&mut b);
        body.recreate_surface(node, &mut b).unwrap();

        body.set_background_color(Some(PackedColor(0x00FF00FF)), &mut b).unwrap();
        let first = body.color_paint().unwrap();
        body.set_background_color(Some(PackedColor(0x0000FFFF)), &mut b).unwrap();
        let second = body.color_paint().unwrap();

        assert_ne!(first, second);
        assert!(!b.is_live_paint(first));
        assert_eq!(
            b.paint(second).unwrap().color(ColorChannel::Diffuse),
            Some(PackedColor(0x0000FFFF))
        );
        assert_eq!(body.applied_paint(), Some(second));
        body.release(&mut b);
    }

    #[test]
    fn failed_surface_allocation_leaves_body_pending() {
        // One allocation for the default paint, one for the first surface.
        let mut b = RecordingBackend::new().with_allocation_budget(2);
        let node = b.add_node();
        let mut body = body(&mut b);
        body.recreate_surface(node, &mut b).unwrap();

        let err = body.recreate_surface(node, &mut b).unwrap_err();
        assert_eq!(err, BackendError::Exhausted { kind: "surface" });
        assert!(body.surface().is_none());
        assert_eq!(b.live_surfaces(), 0);

        body.set_background_color(Some(PackedColor::WHITE), &mut b).unwrap();
        assert!(body.color_paint().is_none());

        b.set_allocation_budget(None);
        body.recreate_surface(node, &mut b).unwrap();
        assert_eq!(body.applied_paint(), body.color_paint());
        body.release(&mut b);
    }

    #[test]
    fn failed_recreation_leaves_stale_scene_geometry() {
        let mut b = RecordingBackend::new().with_allocation_budget(2);
        let node = b.add_node();
        let mut body = body(&mut b);
        body.recreate_surface(node, &mut b).unwrap();
        let first = body.surface().unwrap();

        body.recreate_surface(node, &mut b).unwrap_err();
        assert!(body.surface().is_none());
        assert_eq!(body.applied_paint(), None);
        assert_eq!(b.node_geometry(node), Some(first));
        assert!(!b.is_live_surface(first));

        b.set_allocation_budget(None);
        body.recreate_surface(node, &mut b).unwrap();
        let restored = body.surface().unwrap();
        assert_eq!(b.node_geometry(node), Some(restored));
        assert!(b.is_live_surface(restored));
        body.release(&mut b);
    }

    #[test]
    fn failed_color_paint_falls_back_to_default() {
        // Default paint, surface, first color paint.
        let mut b = RecordingBackend::new().with_allocation_budget(3);
        let node = b.add_node();
        let mut body = body(&mut b);
        body.recreate_surface(node, &mut b).unwrap();
        body.set_background_color(Some(PackedColor(0xFF0000FF)), &mut b).unwrap();
        let red = body.color_paint().unwrap();

        let err = body
            .set_background_color(Some(PackedColor(0x00FF00FF)), &mut b)
            .unwrap_err();
        assert_eq!(err, BackendError::Exhausted { kind: "paint" });
        assert!(!b.is_live_paint(red));
        assert!(body.color_paint().is_none());

        let surface = body.surface().unwrap();
        let default = body.default_paint();
        assert_eq!(body.applied_paint(), Some(default));
        assert_eq!(b.surface(surface).unwrap().paint, Some(default));
        assert!(b.is_live_paint(default));
        body.release(&mut b);
        assert_eq!(b.live_paints(), 0);
    }

    #[test]
    fn collapsed_dimensions() {
        assert!(Dimensions::default().is_collapsed());
        assert!(Dimensions::new(0.0, 5.0).is_collapsed());
        assert!(!Dimensions::new(1.0, 1.0).is_collapsed());
    }

    #[test]
    fn color_paint_allocation_failure_propagates() {
        let mut b = RecordingBackend::new().with_allocation_budget(2);
        let node = b.add_node();
        let mut body = body(&mut b);
        body.recreate_surface(node, &mut b).unwrap();

        let err = body
            .set_background_color(Some(PackedColor::BLACK), &mut b)
            .unwrap_err();
        assert_eq!(err.kind(), "paint");
        body.release(&mut b);
        assert_eq!(b.live_paints(), 0);
        assert_eq!(b.live_surfaces(), 0);
    }
}

//! Layout nodes.
//!
//! A [`LayoutNode`] is the layout tree's view of one scene-graph node. Node
//! behavior is composed rather than inherited: a [`NodeKind`] chosen at
//! construction selects the body strategy that decides how the node paints,
//! accepts geometry, reacts to props and layout, and computes its 2D position.
//!
//! | kind      | paints                         | geometry                 | layout completion      |
//! |-----------|--------------------------------|--------------------------|------------------------|
//! | `Plain`   | applied to the node body       | assigned, body repainted | nothing                |
//! | `Surface` | precedence candidate only      | assigned, paints kept    | surface recreated      |
//!
//! Every mutating call goes through one dispatcher that drops the call once the
//! node is torn down.

use backdrop_engine::backend::{Backend, BackendError};
use backdrop_engine::coords::{Rect, Vec2};
use backdrop_engine::paint::PackedColor;
use backdrop_engine::resource::{Handle, Node, Paint, Surface};

use crate::config::NodeConfig;
use crate::lifecycle::Lifecycle;
use crate::surface::{Dimensions, SurfaceBody};

// ── NodeKind / ParentLink ─────────────────────────────────────────────────

/// Capability tag selecting a node's body strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// Default scene-node behavior: paints go on the node body.
    Plain,
    /// Owns a backing surface sized to its layout box.
    Surface,
}

/// What a node is attached to, as far as positioning is concerned.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum ParentLink {
    #[default]
    Detached,
    /// Direct child of the scene root.
    SceneRoot,
    /// Child of a plain grouping container that does no layout.
    Group,
    /// Child of a node that lays out its children; `frame` is the parent's box.
    Layout { frame: Rect },
}

impl ParentLink {
    /// True when no flow layout positions the child.
    #[inline]
    pub fn is_unlaid(self) -> bool {
        matches!(self, ParentLink::SceneRoot | ParentLink::Group)
    }
}

// ── bodies ────────────────────────────────────────────────────────────────

/// Default body: external paints are rendered on the node itself.
#[derive(Debug, Default)]
pub(crate) struct PlainBody {
    paints: Vec<Handle<Paint>>,
}

impl PlainBody {
    fn set_paints(&mut self, node: Handle<Node>, paints: Vec<Handle<Paint>>, backend: &mut dyn Backend) {
        self.paints = paints;
        backend.set_node_paints(node, &self.paints);
    }

    /// New geometry resets the body to its own paints.
    fn accept_geometry(&self, node: Handle<Node>, geometry: Handle<Surface>, backend: &mut dyn Backend) {
        backend.set_node_geometry(node, geometry);
        backend.set_node_paints(node, &self.paints);
    }

    fn on_props_set(&self, node: Handle<Node>, backend: &mut dyn Backend) {
        backend.set_node_paints(node, &self.paints);
    }
}

#[derive(Debug)]
pub(crate) enum Body {
    Plain(PlainBody),
    Surface(SurfaceBody),
}

impl Body {
    fn as_surface(&self) -> Option<&SurfaceBody> {
        match self {
            Body::Surface(surface) => Some(surface),
            Body::Plain(_) => None,
        }
    }
}

// ── LayoutNode ────────────────────────────────────────────────────────────

/// Layout-tree node bound to a scene-graph node.
///
/// The scene node handle is borrowed: the scene graph owns the node itself.
/// Resources the body allocates are owned here and released by
/// [`teardown`](Self::teardown). Callers must tear a node down before
/// dropping it, or its native resources leak.
#[derive(Debug)]
pub struct LayoutNode {
    handle: Handle<Node>,
    kind: NodeKind,
    parent: ParentLink,
    pivot: Vec2,
    frame: Rect,
    body: Lifecycle<Body>,
}

impl LayoutNode {
    /// Creates a node of `kind`. Surface nodes allocate their default paint here.
    pub fn new(
        kind: NodeKind,
        handle: Handle<Node>,
        config: &NodeConfig,
        backend: &mut dyn Backend,
    ) -> Result<Self, BackendError> {
        let body = match kind {
            NodeKind::Plain => Body::Plain(PlainBody::default()),
            NodeKind::Surface => Body::Surface(SurfaceBody::new(config, backend)?),
        };
        log::debug!("{handle:?}: created {kind:?} node");
        Ok(Self::with_body(handle, kind, body))
    }

    #[inline]
    pub fn plain(handle: Handle<Node>) -> Self {
        Self::with_body(handle, NodeKind::Plain, Body::Plain(PlainBody::default()))
    }

    fn with_body(handle: Handle<Node>, kind: NodeKind, body: Body) -> Self {
        Self {
            handle,
            kind,
            parent: ParentLink::Detached,
            pivot: Vec2::zero(),
            frame: Rect::default(),
            body: Lifecycle::new(body),
        }
    }

    #[inline]
    pub fn surface(
        handle: Handle<Node>,
        config: &NodeConfig,
        backend: &mut dyn Backend,
    ) -> Result<Self, BackendError> {
        Self::new(NodeKind::Surface, handle, config, backend)
    }

    // ── queries ───────────────────────────────────────────────────────────

    #[inline]
    pub fn handle(&self) -> Handle<Node> {
        self.handle
    }

    #[inline]
    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    #[inline]
    pub fn parent(&self) -> ParentLink {
        self.parent
    }

    #[inline]
    pub fn pivot(&self) -> Vec2 {
        self.pivot
    }

    #[inline]
    pub fn frame(&self) -> Rect {
        self.frame
    }

    #[inline]
    pub fn is_torn_down(&self) -> bool {
        self.body.is_torn_down()
    }

    /// Staged dimensions. Zero for plain nodes and after teardown.
    pub fn dimensions(&self) -> Dimensions {
        self.surface_body().map(SurfaceBody::dimensions).unwrap_or_default()
    }

    pub fn background_color(&self) -> Option<PackedColor> {
        self.surface_body().and_then(SurfaceBody::background)
    }

    /// Paints last given to [`set_paints`](Self::set_paints).
    pub fn paints(&self) -> &[Handle<Paint>] {
        match self.body.active() {
            Some(Body::Plain(plain)) => &plain.paints,
            Some(Body::Surface(surface)) => surface.paints(),
            None => &[],
        }
    }

    /// Current backing surface, if a layout has completed.
    pub fn surface_handle(&self) -> Option<Handle<Surface>> {
        self.surface_body().and_then(SurfaceBody::surface)
    }

    /// Size the current backing surface was created with.
    pub fn surface_size(&self) -> Option<Dimensions> {
        self.surface_body().and_then(SurfaceBody::surface_size)
    }

    /// Paint currently set on the backing surface.
    pub fn applied_paint(&self) -> Option<Handle<Paint>> {
        self.surface_body().and_then(SurfaceBody::applied_paint)
    }

    pub fn color_paint(&self) -> Option<Handle<Paint>> {
        self.surface_body().and_then(SurfaceBody::color_paint)
    }

    pub fn default_paint(&self) -> Option<Handle<Paint>> {
        self.surface_body().map(SurfaceBody::default_paint)
    }

    fn surface_body(&self) -> Option<&SurfaceBody> {
        self.body.active().and_then(Body::as_surface)
    }

    // ── host bookkeeping ──────────────────────────────────────────────────

    // These never touch the backend, so they stay writable after teardown.

    pub fn set_parent(&mut self, parent: ParentLink) {
        self.parent = parent;
    }

    pub fn set_pivot(&mut self, pivot: Vec2) {
        self.pivot = pivot;
    }

    /// Records the box computed for this node by the layout pass.
    pub fn set_frame(&mut self, frame: Rect) {
        self.frame = frame;
    }

    // ── dispatcher ────────────────────────────────────────────────────────

    /// Runs `op` against the active body, or drops the call after teardown.
    fn dispatch<R>(&mut self, op: &'static str, f: impl FnOnce(&mut Body, Handle<Node>) -> R) -> Option<R> {
        match self.body.active_mut() {
            Some(body) => Some(f(body, self.handle)),
            None => {
                log::trace!("{:?}: {op} ignored, node is torn down", self.handle);
                None
            }
        }
    }

    // ── properties ────────────────────────────────────────────────────────

    /// Stages a width for the next layout completion.
    pub fn set_width(&mut self, width: f32) {
        self.dispatch("set_width", |body, node| match body {
            Body::Surface(surface) => surface.set_width(width),
            Body::Plain(_) => log::trace!("{node:?}: plain node ignores width"),
        });
    }

    /// Stages a height for the next layout completion.
    pub fn set_height(&mut self, height: f32) {
        self.dispatch("set_height", |body, node| match body {
            Body::Surface(surface) => surface.set_height(height),
            Body::Plain(_) => log::trace!("{node:?}: plain node ignores height"),
        });
    }

    /// Sets or clears (`None`) the background color.
    ///
    /// `Some(PackedColor(0))` is an explicit transparent color and still wins
    /// over external paints. Applied at once when a surface exists, otherwise
    /// at the next layout completion.
    pub fn set_background_color(
        &mut self,
        color: Option<PackedColor>,
        backend: &mut dyn Backend,
    ) -> Result<(), BackendError> {
        self.dispatch("set_background_color", |body, node| match body {
            Body::Surface(surface) => surface.set_background_color(color, backend),
            Body::Plain(_) => {
                log::trace!("{node:?}: plain node ignores background color");
                Ok(())
            }
        })
        .unwrap_or(Ok(()))
    }

    /// Assigns externally owned paints. The node never destroys them.
    pub fn set_paints(
        &mut self,
        paints: Vec<Handle<Paint>>,
        backend: &mut dyn Backend,
    ) -> Result<(), BackendError> {
        self.dispatch("set_paints", |body, node| match body {
            Body::Plain(plain) => {
                plain.set_paints(node, paints, backend);
                Ok(())
            }
            Body::Surface(surface) => surface.set_paints(paints, backend),
        })
        .unwrap_or(Ok(()))
    }

    pub fn set_geometry(&mut self, geometry: Handle<Surface>, backend: &mut dyn Backend) {
        self.dispatch("set_geometry", |body, node| match body {
            Body::Plain(plain) => plain.accept_geometry(node, geometry, backend),
            Body::Surface(surface) => surface.accept_geometry(node, geometry, backend),
        });
    }

    // ── hooks ─────────────────────────────────────────────────────────────

    /// Called after the host has applied a batch of props.
    ///
    /// Surface nodes do nothing here: their props only take effect once a
    /// layout has completed.
    pub fn on_props_set(&mut self, backend: &mut dyn Backend) {
        self.dispatch("on_props_set", |body, node| match body {
            Body::Plain(plain) => plain.on_props_set(node, backend),
            Body::Surface(_) => log::trace!("{node:?}: props deferred until layout completes"),
        });
    }

    /// Called after every layout pass that finalized this node's box.
    ///
    /// On a surface allocation failure the node is left without a surface and
    /// the scene node's geometry is stale (it names the destroyed surface)
    /// until the next successful layout completion.
    pub fn on_layout_complete(&mut self, backend: &mut dyn Backend) -> Result<(), BackendError> {
        self.dispatch("on_layout_complete", |body, node| match body {
            Body::Surface(surface) => surface.recreate_surface(node, backend),
            Body::Plain(_) => Ok(()),
        })
        .unwrap_or(Ok(()))
    }

    // ── position ──────────────────────────────────────────────────────────

    /// 2D position in scene space (+Y up).
    ///
    /// Surface nodes that are not placed by a flow layout (children of the
    /// scene root or of a plain group) are placed by their pivot. Everything
    /// else is positioned by its layout frame: relative to the parent frame's
    /// centre under a layout parent, relative to the layout origin otherwise.
    pub fn position_2d(&self) -> Vec2 {
        match self.kind {
            NodeKind::Surface if self.parent.is_unlaid() => self.pivot,
            _ => self.layout_position(),
        }
    }

    fn layout_position(&self) -> Vec2 {
        let center = self.frame.center();
        match self.parent {
            ParentLink::Layout { frame } => (center - frame.center()).flip_y(),
            ParentLink::Detached | ParentLink::SceneRoot | ParentLink::Group => center.flip_y(),
        }
    }

    // ── teardown ──────────────────────────────────────────────────────────

    /// Releases every resource this node owns. Later calls are no-ops.
    pub fn teardown(&mut self, backend: &mut dyn Backend) {
        match self.body.tear_down() {
            Some(Body::Surface(surface)) => {
                surface.release(backend);
                log::debug!("{:?}: torn down", self.handle);
            }
            Some(Body::Plain(_)) => log::debug!("{:?}: torn down", self.handle),
            None => log::trace!("{:?}: teardown ignored, already torn down", self.handle),
        }
    }
}

//! In-process backend that records every call.
//!
//! [`RecordingBackend`] allocates sequential ids, keeps the state of every live
//! resource, and appends a [`BackendEvent`] per call. It stands in for the
//! native renderer in tests and in the studio demo, and can simulate
//! allocation failure through an allocation budget.

use std::collections::HashMap;

use crate::paint::{ColorChannel, PackedColor};
use crate::resource::{Handle, Node, Owned, Paint, ResourceKind, Surface};

use super::{Backend, BackendError};

/// One backend call, in call order.
#[derive(Debug, Clone, PartialEq)]
pub enum BackendEvent {
    SurfaceCreated { surface: Handle<Surface>, width: f32, height: f32 },
    SurfacePainted { surface: Handle<Surface>, paint: Handle<Paint> },
    SurfaceDestroyed { surface: Handle<Surface> },
    PaintCreated { paint: Handle<Paint> },
    PaintColored { paint: Handle<Paint>, color: PackedColor, channel: ColorChannel },
    PaintDepthWrites { paint: Handle<Paint>, enabled: bool },
    PaintDepthReads { paint: Handle<Paint>, enabled: bool },
    PaintDestroyed { paint: Handle<Paint> },
    NodeGeometry { node: Handle<Node>, geometry: Handle<Surface> },
    NodePaints { node: Handle<Node>, paints: Vec<Handle<Paint>> },
}

/// State of a live surface.
#[derive(Debug, Clone, PartialEq)]
pub struct SurfaceRecord {
    pub width: f32,
    pub height: f32,
    pub paint: Option<Handle<Paint>>,
}

/// State of a live paint.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PaintRecord {
    pub colors: HashMap<ColorChannel, PackedColor>,
    pub writes_depth: bool,
    pub reads_depth: bool,
}

impl PaintRecord {
    #[inline]
    pub fn color(&self, channel: ColorChannel) -> Option<PackedColor> {
        self.colors.get(&channel).copied()
    }
}

/// Backend double that tracks live resources and records calls.
#[derive(Debug, Default)]
pub struct RecordingBackend {
    next_id: u64,
    events: Vec<BackendEvent>,
    surfaces: HashMap<Handle<Surface>, SurfaceRecord>,
    paints: HashMap<Handle<Paint>, PaintRecord>,
    node_geometry: HashMap<Handle<Node>, Handle<Surface>>,
    node_paints: HashMap<Handle<Node>, Vec<Handle<Paint>>>,
    /// Remaining allocations before `create_*` starts failing. `None` = unlimited.
    budget: Option<usize>,
}

impl RecordingBackend {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Allows `allocations` more `create_*` calls; later ones fail with
    /// [`BackendError::Exhausted`].
    pub fn with_allocation_budget(mut self, allocations: usize) -> Self {
        self.budget = Some(allocations);
        self
    }

    pub fn set_allocation_budget(&mut self, allocations: Option<usize>) {
        self.budget = allocations;
    }

    /// Mints a scene node handle. Nodes belong to the scene graph, so no
    /// ownership token is returned.
    pub fn add_node(&mut self) -> Handle<Node> {
        Handle::from_raw(self.next_raw())
    }

    // ── inspection ────────────────────────────────────────────────────────

    #[inline]
    pub fn events(&self) -> &[BackendEvent] {
        &self.events
    }

    /// Drains the recorded events, keeping resource state.
    pub fn take_events(&mut self) -> Vec<BackendEvent> {
        std::mem::take(&mut self.events)
    }

    #[inline]
    pub fn surface(&self, surface: Handle<Surface>) -> Option<&SurfaceRecord> {
        self.surfaces.get(&surface)
    }

    #[inline]
    pub fn paint(&self, paint: Handle<Paint>) -> Option<&PaintRecord> {
        self.paints.get(&paint)
    }

    #[inline]
    pub fn is_live_surface(&self, surface: Handle<Surface>) -> bool {
        self.surfaces.contains_key(&surface)
    }

    #[inline]
    pub fn is_live_paint(&self, paint: Handle<Paint>) -> bool {
        self.paints.contains_key(&paint)
    }

    #[inline]
    pub fn live_surfaces(&self) -> usize {
        self.surfaces.len()
    }

    #[inline]
    pub fn live_paints(&self) -> usize {
        self.paints.len()
    }

    #[inline]
    pub fn node_geometry(&self, node: Handle<Node>) -> Option<Handle<Surface>> {
        self.node_geometry.get(&node).copied()
    }

    pub fn node_paints(&self, node: Handle<Node>) -> &[Handle<Paint>] {
        self.node_paints.get(&node).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of recorded events matching `pred`.
    pub fn count(&self, pred: impl Fn(&BackendEvent) -> bool) -> usize {
        self.events.iter().filter(|e| pred(*e)).count()
    }

    // ── internal ──────────────────────────────────────────────────────────

    fn next_raw(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }

    fn allocate<K: ResourceKind>(&mut self) -> Result<Owned<K>, BackendError> {
        if let Some(remaining) = self.budget.as_mut() {
            if *remaining == 0 {
                log::warn!("RecordingBackend: {} allocation refused, budget exhausted", K::NAME);
                return Err(BackendError::Exhausted { kind: K::NAME });
            }
            *remaining -= 1;
        }
        Ok(Owned::from_raw(self.next_raw()))
    }

    fn with_paint(&mut self, paint: Handle<Paint>, f: impl FnOnce(&mut PaintRecord)) {
        match self.paints.get_mut(&paint) {
            Some(record) => f(record),
            None => log::warn!("RecordingBackend: {paint:?} is not live"),
        }
    }
}

impl Backend for RecordingBackend {
    fn create_surface(&mut self, width: f32, height: f32) -> Result<Owned<Surface>, BackendError> {
        let owned = self.allocate::<Surface>()?;
        let surface = owned.handle();
        self.surfaces.insert(surface, SurfaceRecord { width, height, paint: None });
        self.events.push(BackendEvent::SurfaceCreated { surface, width, height });
        log::trace!("RecordingBackend: created {surface:?} {width}x{height}");
        Ok(owned)
    }

    fn set_surface_paint(&mut self, surface: Handle<Surface>, paint: Handle<Paint>) {
        if !self.paints.contains_key(&paint) {
            log::warn!("RecordingBackend: painting {surface:?} with {paint:?}, which is not live");
        }
        match self.surfaces.get_mut(&surface) {
            Some(record) => record.paint = Some(paint),
            None => log::warn!("RecordingBackend: {surface:?} is not live"),
        }
        self.events.push(BackendEvent::SurfacePainted { surface, paint });
    }

    fn destroy_surface(&mut self, surface: Owned<Surface>) {
        let surface = Handle::from_raw(surface.into_raw());
        if self.surfaces.remove(&surface).is_none() {
            log::warn!("RecordingBackend: destroying unknown {surface:?}");
        }
        self.events.push(BackendEvent::SurfaceDestroyed { surface });
        log::trace!("RecordingBackend: destroyed {surface:?}");
    }

    fn create_paint(&mut self) -> Result<Owned<Paint>, BackendError> {
        let owned = self.allocate::<Paint>()?;
        let paint = owned.handle();
        self.paints.insert(paint, PaintRecord::default());
        self.events.push(BackendEvent::PaintCreated { paint });
        log::trace!("RecordingBackend: created {paint:?}");
        Ok(owned)
    }

    fn set_paint_color(&mut self, paint: Handle<Paint>, color: PackedColor, channel: ColorChannel) {
        self.with_paint(paint, |r| {
            r.colors.insert(channel, color);
        });
        self.events.push(BackendEvent::PaintColored { paint, color, channel });
        log::trace!("RecordingBackend: {paint:?}.{} = {color:?}", channel.name());
    }

    fn set_paint_writes_depth(&mut self, paint: Handle<Paint>, enabled: bool) {
        self.with_paint(paint, |r| r.writes_depth = enabled);
        self.events.push(BackendEvent::PaintDepthWrites { paint, enabled });
    }

    fn set_paint_reads_depth(&mut self, paint: Handle<Paint>, enabled: bool) {
        self.with_paint(paint, |r| r.reads_depth = enabled);
        self.events.push(BackendEvent::PaintDepthReads { paint, enabled });
    }

    fn destroy_paint(&mut self, paint: Owned<Paint>) {
        let paint = Handle::from_raw(paint.into_raw());
        if self.paints.remove(&paint).is_none() {
            log::warn!("RecordingBackend: destroying unknown {paint:?}");
        }
        self.events.push(BackendEvent::PaintDestroyed { paint });
        log::trace!("RecordingBackend: destroyed {paint:?}");
    }

    fn set_node_geometry(&mut self, node: Handle<Node>, geometry: Handle<Surface>) {
        self.node_geometry.insert(node, geometry);
        self.events.push(BackendEvent::NodeGeometry { node, geometry });
    }

    fn set_node_paints(&mut self, node: Handle<Node>, paints: &[Handle<Paint>]) {
        self.node_paints.insert(node, paints.to_vec());
        self.events.push(BackendEvent::NodePaints { node, paints: paints.to_vec() });
    }
}

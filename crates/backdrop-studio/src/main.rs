use anyhow::{Context, Result};
use backdrop_engine::backend::{BackendEvent, RecordingBackend};
use backdrop_engine::logging::{init_logging, LoggingConfig};
use backdrop_ui::prelude::*;

fn main() -> Result<()> {
    init_logging(LoggingConfig {
        timestamps: false,
        ..LoggingConfig::default()
    });

    let mut backend = RecordingBackend::new();

    surface_lifecycle(&mut backend).context("surface lifecycle scenario failed")?;
    dump_trace("surface lifecycle", &mut backend);

    external_paints(&mut backend).context("external paint scenario failed")?;
    dump_trace("external paints", &mut backend);

    placement(&mut backend).context("placement scenario failed")?;
    dump_trace("placement", &mut backend);

    log::info!(
        "done: {} live surfaces, {} live paints",
        backend.live_surfaces(),
        backend.live_paints()
    );
    Ok(())
}

/// Size → layout → color → clear → teardown.
fn surface_lifecycle(backend: &mut RecordingBackend) -> Result<()> {
    let handle = backend.add_node();
    let mut node = LayoutNode::surface(handle, &NodeConfig::default(), backend)?;

    node.set_width(100.0);
    node.set_height(50.0);
    node.on_layout_complete(backend)?;
    node.set_background_color(Some(PackedColor(0xFF00_00FF)), backend)?;
    node.set_background_color(None, backend)?;
    node.teardown(backend);
    Ok(())
}

/// External paints lose to a background color and are never destroyed by the node.
fn external_paints(backend: &mut RecordingBackend) -> Result<()> {
    let handle = backend.add_node();
    let mut node = LayoutNode::surface(handle, &NodeConfig::default(), backend)?;
    let texture = backend.create_paint()?;

    node.set_width(64.0);
    node.set_height(64.0);
    node.on_layout_complete(backend)?;
    node.set_paints(vec![texture.handle()], backend)?;
    node.set_background_color(Some(PackedColor::TRANSPARENT), backend)?;
    node.set_background_color(None, backend)?;
    node.teardown(backend);

    log::info!("external {:?} still live: {}", texture.handle(), backend.is_live_paint(texture.handle()));
    backend.destroy_paint(texture);
    Ok(())
}

/// Pivot placement for unlaid parents, frame placement under a layout parent.
fn placement(backend: &mut RecordingBackend) -> Result<()> {
    let handle = backend.add_node();
    let mut node = LayoutNode::surface(handle, &NodeConfig::default(), backend)?;
    node.set_pivot(Vec2::new(0.5, 0.5));
    node.set_frame(Rect::new(10.0, 10.0, 40.0, 20.0));

    for parent in [
        ParentLink::SceneRoot,
        ParentLink::Group,
        ParentLink::Layout { frame: Rect::new(0.0, 0.0, 200.0, 100.0) },
    ] {
        node.set_parent(parent);
        log::info!("{parent:?} → position {:?}", node.position_2d());
    }

    node.teardown(backend);
    Ok(())
}

fn dump_trace(title: &str, backend: &mut RecordingBackend) {
    log::info!("── {title} ──");
    for event in backend.take_events() {
        match event {
            BackendEvent::SurfaceCreated { surface, width, height } => {
                log::info!("  create  {surface:?} {width}x{height}");
            }
            BackendEvent::SurfaceDestroyed { surface } => log::info!("  destroy {surface:?}"),
            BackendEvent::PaintCreated { paint } => log::info!("  create  {paint:?}"),
            BackendEvent::PaintDestroyed { paint } => log::info!("  destroy {paint:?}"),
            BackendEvent::SurfacePainted { surface, paint } => {
                log::info!("  paint   {surface:?} with {paint:?}");
            }
            other => log::debug!("  {other:?}"),
        }
    }
}

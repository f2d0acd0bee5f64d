use backdrop_engine::backend::Backend;
use backdrop_engine::paint::{ColorChannel, PackedColor};
use backdrop_engine::resource::{Handle, Paint};

/// How node-created paints are configured on the backend.
///
/// Applied identically to the default paint and to background-color paints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaintSetup {
    /// Channel the node's color is written to.
    pub channel: ColorChannel,
    pub writes_depth: bool,
    pub reads_depth: bool,
}

impl Default for PaintSetup {
    fn default() -> Self {
        Self {
            channel: ColorChannel::Diffuse,
            writes_depth: true,
            reads_depth: true,
        }
    }
}

impl PaintSetup {
    /// Writes depth flags and `color` onto a freshly created paint.
    pub fn configure(&self, backend: &mut dyn Backend, paint: Handle<Paint>, color: PackedColor) {
        backend.set_paint_writes_depth(paint, self.writes_depth);
        backend.set_paint_reads_depth(paint, self.reads_depth);
        backend.set_paint_color(paint, color, self.channel);
    }
}

/// Per-node construction parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeConfig {
    pub paint: PaintSetup,
    /// Color of the fallback paint used when neither a background color nor
    /// external paints are given.
    pub default_color: PackedColor,
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            paint: PaintSetup::default(),
            default_color: PackedColor::TRANSPARENT,
        }
    }
}

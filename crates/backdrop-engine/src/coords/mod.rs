//! Coordinate and geometry types shared between the layout tree and backends.
//!
//! Layout space:
//! - Logical units
//! - Origin top-left
//! - +X right, +Y down
//!
//! Scene-space positions reported by nodes flip Y so that +Y is up.

mod rect;
mod vec2;

pub use rect::Rect;
pub use vec2::Vec2;

//! Paint values that cross the backend boundary.
//!
//! Scope:
//! - packed color representation (`0xRRGGBBAA`)
//! - named color channels on a paint resource
//!
//! Paint *resources* are opaque backend handles, see [`crate::resource`].

pub mod channel;
pub mod color;

pub use channel::ColorChannel;
pub use color::PackedColor;

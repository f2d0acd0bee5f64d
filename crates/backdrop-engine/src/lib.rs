//! Backdrop engine crate.
//!
//! This crate owns the renderer boundary used by higher layers: typed resource
//! handles, the [`backend::Backend`] capability trait, and the small value types
//! (coordinates, packed colors) that cross it.

pub mod backend;
pub mod coords;
pub mod logging;
pub mod paint;
pub mod resource;

//! Typed handles to backend-owned resources.
//!
//! A backend hands out resources as [`Owned<K>`]: a move-only token that marks
//! its holder as the single owner. Anyone can look at a resource through a
//! copyable [`Handle<K>`], but only the owner can give it back to the backend
//! for destruction, because every destroy call consumes an `Owned<K>`.
//!
//! ```rust,ignore
//! let paint = backend.create_paint()?;     // Owned<Paint>
//! let view = paint.handle();               // Handle<Paint>, freely copied
//! node.set_paints(vec![view], backend)?;   // node borrows, cannot destroy
//! backend.destroy_paint(paint);            // only the owner can do this
//! ```

use core::fmt;
use core::hash::{Hash, Hasher};
use core::marker::PhantomData;

/// Marker for a category of backend resource.
pub trait ResourceKind: 'static {
    /// Short name used in logs and error messages.
    const NAME: &'static str;
}

/// Renderable flat quad.
#[derive(Debug)]
pub enum Surface {}

/// Shading resource attachable to a surface or node.
#[derive(Debug)]
pub enum Paint {}

/// Scene-graph node. Nodes are owned by the scene graph, never by layout nodes.
#[derive(Debug)]
pub enum Node {}

impl ResourceKind for Surface {
    const NAME: &'static str = "surface";
}

impl ResourceKind for Paint {
    const NAME: &'static str = "paint";
}

impl ResourceKind for Node {
    const NAME: &'static str = "node";
}

// ── Handle ────────────────────────────────────────────────────────────────

/// Borrowed, copyable reference to a backend resource.
///
/// A handle carries no ownership. Holding one never obliges (or allows) the
/// holder to destroy the resource.
pub struct Handle<K> {
    raw: u64,
    _kind: PhantomData<fn() -> K>,
}

impl<K> Handle<K> {
    /// Wraps a raw backend id.
    #[inline]
    pub const fn from_raw(raw: u64) -> Self {
        Self { raw, _kind: PhantomData }
    }

    #[inline]
    pub const fn raw(self) -> u64 {
        self.raw
    }
}

// Manual impls: derives would put bounds on `K`, which is uninhabited.
impl<K> Clone for Handle<K> {
    #[inline]
    fn clone(&self) -> Self {
        *self
    }
}

impl<K> Copy for Handle<K> {}

impl<K> PartialEq for Handle<K> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.raw == other.raw
    }
}

impl<K> Eq for Handle<K> {}

impl<K> Hash for Handle<K> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.raw.hash(state);
    }
}

impl<K: ResourceKind> fmt::Debug for Handle<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", K::NAME, self.raw)
    }
}

// ── Owned ─────────────────────────────────────────────────────────────────

/// Exclusive ownership of a backend resource.
///
/// Not `Clone`, not `Copy`. Return it to the backend's matching `destroy_*`
/// call exactly once; dropping it without doing so leaks the native resource.
#[must_use = "an owned resource must be returned to the backend to be destroyed"]
pub struct Owned<K> {
    handle: Handle<K>,
}

impl<K> Owned<K> {
    /// Claims ownership of a freshly allocated raw id.
    ///
    /// Intended for [`crate::backend::Backend`] implementations only: the
    /// caller asserts that no other `Owned` exists for `raw`.
    #[inline]
    pub const fn from_raw(raw: u64) -> Self {
        Self { handle: Handle::from_raw(raw) }
    }

    #[inline]
    pub const fn handle(&self) -> Handle<K> {
        self.handle
    }

    /// Gives up the ownership token, returning the raw id.
    ///
    /// Intended for backend `destroy_*` implementations.
    #[inline]
    pub const fn into_raw(self) -> u64 {
        self.handle.raw
    }
}

impl<K: ResourceKind> fmt::Debug for Owned<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Owned({:?})", self.handle)
    }
}

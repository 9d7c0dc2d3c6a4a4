//! Host element abstraction
//!
//! The engine never owns rendering: the host environment (a UI framework, a
//! DOM bridge, a test harness) exposes its scrollable viewport and the
//! viewport's direct children through these traits. Handles are cheap
//! reference-counted trait objects; the engine holds them only for the
//! duration of one attachment and reads children fresh on every computation.

use std::sync::Arc;

use crate::events::EventTarget;
use crate::geometry::{Axis, Point, Rect};

/// Shared handle to a host element
pub type ElementRef = Arc<dyn Element>;

/// Shared handle to a host scroll container
pub type ContainerRef = Arc<dyn ScrollContainer>;

/// Scroll animation behavior
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScrollBehavior {
    /// Instant scroll (no animation)
    #[default]
    Auto,
    /// Smooth animated scroll
    Smooth,
}

/// Snap alignment applied to an item's presentation state
///
/// Only [`SnapAlign::Start`] is produced by the engine (pages align their
/// lead item to the viewport's near edge); the other variants exist so host
/// adapters can map the full platform vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SnapAlign {
    /// Align the item's near edge to the viewport's near edge
    #[default]
    Start,
    /// Align the item's center to the viewport's center
    Center,
    /// Align the item's far edge to the viewport's far edge
    End,
}

/// A measurable host element
///
/// `bounding_rect` is viewport-relative (the `getBoundingClientRect`
/// analogue) and therefore shifts as ancestors scroll; use
/// [`crate::geometry::offset_rect`] for scroll-invariant coordinates.
pub trait Element: Send + Sync {
    /// Viewport-relative bounding box of this element
    fn bounding_rect(&self) -> Rect;

    /// This element's own current scroll offsets
    fn scroll_offset(&self) -> Point;

    /// Parent element, if any
    fn parent(&self) -> Option<ElementRef>;

    /// Set or clear the inline snap alignment on this element
    fn set_snap_align(&self, align: Option<SnapAlign>);

    /// Add a presentation marker class
    fn add_class(&self, class: &str);

    /// Remove a presentation marker class
    fn remove_class(&self, class: &str);
}

/// A scrollable host viewport
///
/// The container is also the [`EventTarget`] for its own scroll events;
/// window-level resize/orientation events come from a separate target
/// supplied by the host.
pub trait ScrollContainer: EventTarget {
    /// Viewport-relative bounding box of the container itself
    fn bounding_rect(&self) -> Rect;

    /// Current scroll offset along an axis
    fn scroll_offset(&self, axis: Axis) -> f32;

    /// Visible extent along an axis (client size)
    fn viewport_extent(&self, axis: Axis) -> f32;

    /// Total scrollable content extent along an axis
    fn scroll_extent(&self, axis: Axis) -> f32;

    /// The container's direct children, in document order.
    ///
    /// Read live at computation time; callers must not cache across
    /// computations since the host may add or remove items at any time.
    fn children(&self) -> Vec<ElementRef>;

    /// Issue a fire-and-forget scroll command along an axis.
    ///
    /// The host owns the animation; a second command supersedes any
    /// in-flight one.
    fn scroll_to(&self, axis: Axis, offset: f32, behavior: ScrollBehavior);
}

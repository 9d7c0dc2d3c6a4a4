//! Core geometry types and scroll-invariant measurement
//!
//! The engine reasons about positions in the *unscrolled content flow*: a
//! host's native bounding-box query reports viewport-relative coordinates
//! that shift whenever any ancestor scrolls, which makes them useless as
//! scroll targets. [`offset_rect`] adds ancestor scroll offsets back onto the
//! native box so the result is stable across scrolling, and
//! [`offset_rect_relative_to`] re-expresses that box against an ancestor's
//! own adjusted box.

use crate::element::Element;

// ─────────────────────────────────────────────────────────────────────────────
// Core Geometry Types
// ─────────────────────────────────────────────────────────────────────────────

/// 2D point
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const ZERO: Point = Point { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// 2D size
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const ZERO: Size = Size {
        width: 0.0,
        height: 0.0,
    };

    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// 2D rectangle
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub origin: Point,
    pub size: Size,
}

impl Rect {
    pub const ZERO: Rect = Rect {
        origin: Point::ZERO,
        size: Size::ZERO,
    };

    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            origin: Point::new(x, y),
            size: Size::new(width, height),
        }
    }

    pub fn x(&self) -> f32 {
        self.origin.x
    }

    pub fn y(&self) -> f32 {
        self.origin.y
    }

    pub fn width(&self) -> f32 {
        self.size.width
    }

    pub fn height(&self) -> f32 {
        self.size.height
    }

    /// Left edge (same as `x()`)
    pub fn left(&self) -> f32 {
        self.origin.x
    }

    /// Top edge (same as `y()`)
    pub fn top(&self) -> f32 {
        self.origin.y
    }

    /// Right edge
    pub fn right(&self) -> f32 {
        self.origin.x + self.size.width
    }

    /// Bottom edge
    pub fn bottom(&self) -> f32 {
        self.origin.y + self.size.height
    }

    /// Get the size of this rect
    pub fn size(&self) -> Size {
        self.size
    }

    /// Offset the rect by a delta
    pub fn offset(&self, dx: f32, dy: f32) -> Self {
        Rect {
            origin: Point::new(self.origin.x + dx, self.origin.y + dy),
            size: self.size,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Scroll Axis
// ─────────────────────────────────────────────────────────────────────────────

/// The single scroll direction an engine attachment operates along.
///
/// Selects which geometry fields (extent, near/far edge, scroll-offset
/// component) are consulted throughout the engine.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Axis {
    /// Horizontal scrolling (left/right edges, width extents)
    #[default]
    X,
    /// Vertical scrolling (top/bottom edges, height extents)
    Y,
}

impl Axis {
    /// Near edge of a rect along this axis (left or top)
    pub fn near_edge(&self, rect: &Rect) -> f32 {
        match self {
            Axis::X => rect.left(),
            Axis::Y => rect.top(),
        }
    }

    /// Far edge of a rect along this axis (right or bottom)
    pub fn far_edge(&self, rect: &Rect) -> f32 {
        match self {
            Axis::X => rect.right(),
            Axis::Y => rect.bottom(),
        }
    }

    /// Extent of a size along this axis (width or height)
    pub fn extent(&self, size: Size) -> f32 {
        match self {
            Axis::X => size.width,
            Axis::Y => size.height,
        }
    }

    /// Component of a point along this axis
    pub fn component(&self, point: Point) -> f32 {
        match self {
            Axis::X => point.x,
            Axis::Y => point.y,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Scroll-Invariant Measurement
// ─────────────────────────────────────────────────────────────────────────────

/// Bounding box of an element within the unscrolled content flow.
///
/// Takes the native viewport-relative box and walks the ancestor chain,
/// summing each ancestor's current scroll offsets back onto the box's edges.
pub fn offset_rect(el: &dyn Element) -> Rect {
    let rect = el.bounding_rect();
    let mut scroll = Point::ZERO;
    let mut parent = el.parent();
    while let Some(ancestor) = parent {
        let offset = ancestor.scroll_offset();
        scroll.x += offset.x;
        scroll.y += offset.y;
        parent = ancestor.parent();
    }
    rect.offset(scroll.x, scroll.y)
}

/// Like [`offset_rect`], re-expressed relative to an ancestor's own
/// (similarly adjusted) box.
pub fn offset_rect_relative_to(el: &dyn Element, ancestor: &dyn Element) -> Rect {
    let rect = offset_rect(el);
    let relative = offset_rect(ancestor);
    rect.offset(-relative.x(), -relative.y())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{MockContainer, MockElement};
    use std::sync::Arc;

    #[test]
    fn test_rect_edges() {
        let rect = Rect::new(10.0, 20.0, 100.0, 50.0);
        assert_eq!(rect.left(), 10.0);
        assert_eq!(rect.top(), 20.0);
        assert_eq!(rect.right(), 110.0);
        assert_eq!(rect.bottom(), 70.0);
    }

    #[test]
    fn test_axis_selectors() {
        let rect = Rect::new(10.0, 20.0, 100.0, 50.0);
        assert_eq!(Axis::X.near_edge(&rect), 10.0);
        assert_eq!(Axis::X.far_edge(&rect), 110.0);
        assert_eq!(Axis::Y.near_edge(&rect), 20.0);
        assert_eq!(Axis::Y.far_edge(&rect), 70.0);
        assert_eq!(Axis::X.extent(rect.size()), 100.0);
        assert_eq!(Axis::Y.extent(rect.size()), 50.0);
    }

    #[test]
    fn test_offset_rect_factors_out_parent_scroll() {
        let container = MockContainer::new(Rect::new(0.0, 0.0, 300.0, 100.0));
        let item = MockElement::new(Rect::new(450.0, 0.0, 150.0, 100.0));
        container.push_child(Arc::clone(&item));

        // Scrolling the container shifts the viewport-relative box but the
        // offset rect stays pinned to the content flow.
        let before = offset_rect(&*item);
        container.set_scroll_offset(Point::new(200.0, 0.0));
        let after = offset_rect(&*item);
        assert_eq!(before, after);
        assert_eq!(after.left(), 450.0);

        // Viewport-relative box did move.
        assert_eq!(item.bounding_rect().left(), 250.0);
    }

    #[test]
    fn test_offset_rect_relative_to_container() {
        let container = MockContainer::new(Rect::new(40.0, 0.0, 300.0, 100.0));
        let item = MockElement::new(Rect::new(190.0, 0.0, 150.0, 100.0));
        container.push_child(Arc::clone(&item));
        container.set_scroll_offset(Point::new(75.0, 0.0));

        let rect = offset_rect_relative_to(&*item, &*container.element());
        assert_eq!(rect.left(), 150.0);
        assert_eq!(rect.right(), 300.0);
    }
}

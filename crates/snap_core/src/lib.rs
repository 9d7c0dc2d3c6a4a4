//! Snap Core
//!
//! Host abstraction and geometry for the snap carousel engine:
//!
//! - **Geometry**: points, sizes, rects, scroll-axis selection, and
//!   scroll-invariant offset-rect measurement
//! - **Elements**: traits the host environment implements to expose its
//!   scrollable viewport and items
//! - **Events**: listener registration for scroll/resize/orientation events
//! - **Mock host**: an in-memory implementation for tests and adapter
//!   development
//!
//! # Example
//!
//! ```rust
//! use snap_core::{offset_rect, Rect};
//! use snap_core::mock::{MockContainer, MockElement};
//!
//! let container = MockContainer::new(Rect::new(0.0, 0.0, 300.0, 100.0));
//! let item = MockElement::new(Rect::new(150.0, 0.0, 150.0, 100.0));
//! container.push_child(item.clone());
//!
//! // Offset rects are stable across scrolling.
//! assert_eq!(offset_rect(&*item).left(), 150.0);
//! ```

pub mod element;
pub mod events;
pub mod geometry;
pub mod mock;

pub use element::{ContainerRef, Element, ElementRef, ScrollBehavior, ScrollContainer, SnapAlign};
pub use events::{EventKind, EventTarget, EventTargetRef, Listener, ListenerId};
pub use geometry::{offset_rect, offset_rect_relative_to, Axis, Point, Rect, Size};

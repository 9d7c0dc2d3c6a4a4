//! Snap Carousel
//!
//! A headless scroll-snap carousel engine over host-native scrolling:
//!
//! - **Page partitioning**: groups a container's children into logical pages,
//!   each sized to fit one viewport extent along the scroll axis
//! - **Active-page tracking**: follows the page closest to the scroll origin
//!   as the user scrolls or the container resizes
//! - **Navigation**: `next`/`prev`/`go_to` animate the scroll position to
//!   page boundaries via the host's scroll API
//! - **Snap points**: marks each page's lead item so native scroll snapping
//!   aligns on page boundaries
//!
//! Rendering, styling, and pagination-control UI stay with the caller; the
//! engine publishes `{pages, active page}` plus navigation and reacts to
//! host events. Touch handling and scroll physics are deliberately left to
//! the platform.
//!
//! # Example
//!
//! ```rust
//! use snap_carousel::{CarouselOptions, SnapCarousel};
//! use snap_core::mock::{MockContainer, MockElement};
//! use snap_core::Rect;
//!
//! let container = MockContainer::new(Rect::new(0.0, 0.0, 300.0, 100.0));
//! for i in 0..9 {
//!     container.push_child(MockElement::new(Rect::new(
//!         i as f32 * 100.0, 0.0, 100.0, 100.0,
//!     )));
//! }
//!
//! let carousel = SnapCarousel::new(CarouselOptions::default());
//! carousel.set_container(Some(container.clone()));
//!
//! assert_eq!(carousel.pages().len(), 3);
//! assert!(carousel.has_next_page());
//! carousel.next(); // issues a smooth scroll command targeting item 3
//! ```

pub mod carousel;
pub mod partition;
pub mod state;

pub use carousel::{CarouselOptions, SnapCarousel, TriggerCallback};
pub use partition::{compute_active_page, compute_pages};
pub use state::{AttachState, CarouselState, Page, StateTransitions};

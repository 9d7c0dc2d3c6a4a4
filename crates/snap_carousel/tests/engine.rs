//! End-to-end engine behavior against the mock host

use std::sync::Arc;

use snap_carousel::{CarouselOptions, SnapCarousel};
use snap_core::mock::{MockContainer, MockElement};
use snap_core::{Axis, EventKind, Point, Rect, ScrollBehavior, ScrollContainer};

const VIEWPORT: f32 = 300.0;

fn container_with_items(widths: &[f32]) -> (Arc<MockContainer>, Vec<Arc<MockElement>>) {
    let container = MockContainer::new(Rect::new(0.0, 0.0, VIEWPORT, 100.0));
    let mut x = 0.0;
    let mut items = Vec::new();
    for &width in widths {
        let item = MockElement::new(Rect::new(x, 0.0, width, 100.0));
        container.push_child(Arc::clone(&item));
        items.push(item);
        x += width;
    }
    (container, items)
}

/// 18 equal items, each exactly a third of the viewport: 6 pages of 3.
#[test]
fn test_eighteen_thirds_make_six_pages_of_three() {
    let (container, _) = container_with_items(&[VIEWPORT / 3.0; 18]);
    let carousel = SnapCarousel::default();
    carousel.set_container(Some(container.clone()));

    let pages = carousel.pages();
    assert_eq!(pages.len(), 6);
    for (page_index, page) in pages.iter().enumerate() {
        assert_eq!(page.len(), 3);
        assert_eq!(page.lead(), page_index * 3);
    }

    // next() from page 0 targets item 3's unscrolled near edge.
    assert_eq!(carousel.active_page_index(), Some(0));
    carousel.next();
    let commands = container.take_commands();
    assert_eq!(commands.len(), 1);
    assert_eq!(commands[0].offset, 3.0 * (VIEWPORT / 3.0));
    assert_eq!(commands[0].behavior, ScrollBehavior::Smooth);

    // The host applied the offset; a scroll event lands us on page 1.
    container.dispatch(EventKind::Scroll);
    assert_eq!(carousel.active_page_index(), Some(1));
    assert!(carousel.has_prev_page());
}

/// One item wider than the viewport, then five narrow items that fit jointly.
#[test]
fn test_oversized_item_pages_solo() {
    let (container, _) = container_with_items(&[450.0, 50.0, 50.0, 50.0, 50.0, 50.0]);
    let carousel = SnapCarousel::default();
    carousel.set_container(Some(container.clone()));

    let pages = carousel.pages();
    assert_eq!(pages.len(), 2);
    assert_eq!(pages[0].items(), &[0]);
    assert_eq!(pages[1].items(), &[1, 2, 3, 4, 5]);
}

/// Union of page indices covers every item exactly once, contiguously.
#[test]
fn test_partition_coverage() {
    let widths: Vec<f32> = (0..13)
        .map(|i| 60.0 + 25.0 * ((i * 7) % 5) as f32)
        .collect();
    let (container, _) = container_with_items(&widths);
    let carousel = SnapCarousel::default();
    carousel.set_container(Some(container.clone()));

    let mut covered = Vec::new();
    for page in carousel.pages() {
        assert!(!page.is_empty());
        covered.extend_from_slice(page.items());
    }
    let expected: Vec<usize> = (0..widths.len()).collect();
    assert_eq!(covered, expected);
}

/// No page exceeds the viewport extent unless it holds a single oversized item.
#[test]
fn test_non_overflow() {
    let widths: Vec<f32> = (0..13)
        .map(|i| 60.0 + 25.0 * ((i * 7) % 5) as f32)
        .collect();
    let (container, items) = container_with_items(&widths);
    let carousel = SnapCarousel::default();
    carousel.set_container(Some(container.clone()));

    for page in carousel.pages() {
        let near = items[page.lead()].content_rect().left();
        let far = items[*page.items().last().unwrap()].content_rect().right();
        let extent = far - if page.lead() == 0 { 0.0 } else { near };
        if page.len() > 1 {
            assert!(extent <= VIEWPORT.ceil());
        }
    }
}

#[test]
fn test_end_of_scroll_pins_last_page() {
    let (container, _) = container_with_items(&[150.0; 7]);
    let carousel = SnapCarousel::default();
    carousel.set_container(Some(container.clone()));
    assert_eq!(carousel.pages().len(), 4);

    // Scroll to the capped end: the remaining distance fits the viewport,
    // so the last page is active even though its lead item (index 6, at
    // x=900) sits 150px inside the viewport.
    container.set_scroll_offset(Point::new(750.0, 0.0));
    container.dispatch(EventKind::Scroll);
    assert_eq!(carousel.active_page_index(), Some(3));
    assert!(!carousel.has_next_page());
}

#[test]
fn test_navigation_boundary_noops() {
    let (container, _) = container_with_items(&[150.0; 6]);
    let carousel = SnapCarousel::default();
    carousel.set_container(Some(container.clone()));

    let before = carousel.state();

    // prev() at page 0 and goTo past the end change nothing.
    carousel.prev();
    carousel.go_to(carousel.pages().len());
    assert!(container.commands().is_empty());
    assert_eq!(carousel.state(), before);
}

#[test]
fn test_refresh_picks_up_external_item_changes() {
    let (container, _) = container_with_items(&[150.0; 4]);
    let carousel = SnapCarousel::default();
    carousel.set_container(Some(container.clone()));
    assert_eq!(carousel.pages().len(), 2);

    // Items appended behind the engine's back are invisible until refresh.
    container.push_child(MockElement::new(Rect::new(600.0, 0.0, 150.0, 100.0)));
    container.push_child(MockElement::new(Rect::new(750.0, 0.0, 150.0, 100.0)));
    assert_eq!(carousel.pages().len(), 2);

    carousel.refresh();
    assert_eq!(carousel.pages().len(), 3);
}

#[test]
fn test_vertical_carousel_end_to_end() {
    let container = MockContainer::new(Rect::new(0.0, 0.0, 100.0, VIEWPORT));
    for i in 0..8 {
        container.push_child(MockElement::new(Rect::new(
            0.0,
            i as f32 * 150.0,
            100.0,
            150.0,
        )));
    }
    let carousel = SnapCarousel::new(CarouselOptions::vertical());
    carousel.set_container(Some(container.clone()));

    assert_eq!(carousel.pages().len(), 4);
    carousel.go_to(2);
    let commands = container.take_commands();
    assert_eq!(commands[0].axis, Axis::Y);
    assert_eq!(commands[0].offset, 600.0);

    container.dispatch(EventKind::Scroll);
    assert_eq!(carousel.active_page_index(), Some(2));
    assert!(carousel.has_next_page());
    assert!(carousel.has_prev_page());
}

/// Navigation targets stay correct while the container is mid-scroll, since
/// targets are computed in unscrolled content coordinates.
#[test]
fn test_navigation_target_is_scroll_invariant() {
    let (container, _) = container_with_items(&[150.0; 8]);
    let carousel = SnapCarousel::default();
    carousel.set_container(Some(container.clone()));

    container.set_scroll_offset(Point::new(437.0, 0.0));
    container.dispatch(EventKind::Scroll);
    carousel.go_to(3);

    let commands = container.take_commands();
    // Page 3 leads with item 6 at x=900 regardless of the current offset.
    assert_eq!(commands[0].offset, 900.0);
}

#[test]
fn test_superseding_navigation_issues_new_command() {
    let (container, _) = container_with_items(&[150.0; 8]);
    let carousel = SnapCarousel::default();
    carousel.set_container(Some(container.clone()));

    // Two back-to-back commands: the engine does not await completion, the
    // second simply supersedes the first.
    carousel.go_to(1);
    carousel.go_to(2);
    let commands = container.take_commands();
    assert_eq!(commands.len(), 2);
    assert_eq!(commands[0].offset, 300.0);
    assert_eq!(commands[1].offset, 600.0);
}

#[test]
fn test_marker_class_moves_with_repartition() {
    let container = MockContainer::new(Rect::new(0.0, 0.0, VIEWPORT, 100.0));
    let items: Vec<_> = (0..6)
        .map(|i| MockElement::new(Rect::new(i as f32 * 150.0, 0.0, 150.0, 100.0)))
        .collect();
    for item in &items {
        container.push_child(Arc::clone(item));
    }
    let window = snap_core::mock::MockWindow::new();
    let carousel = SnapCarousel::new(CarouselOptions::with_marker_class("snap"));
    carousel.bind_window(window.clone());
    carousel.set_container(Some(container.clone()));

    // 3 pages: leads 0, 2, 4.
    assert!(items[0].has_class("snap"));
    assert!(items[2].has_class("snap"));
    assert!(!items[1].has_class("snap"));

    // After shrinking to one item per page, every item leads a page.
    container.set_viewport_rect(Rect::new(0.0, 0.0, 150.0, 100.0));
    window.dispatch(EventKind::Resize);
    assert!(items.iter().all(|item| item.has_class("snap")));

    // Growing back clears the superseded markers.
    container.set_viewport_rect(Rect::new(0.0, 0.0, VIEWPORT, 100.0));
    window.dispatch(EventKind::Resize);
    assert!(!items[1].has_class("snap"));
    assert!(items[2].has_class("snap"));
}

#[test]
fn test_scroll_extent_sanity() {
    let (container, _) = container_with_items(&[150.0; 6]);
    assert_eq!(container.scroll_extent(Axis::X), 900.0);
    assert_eq!(container.viewport_extent(Axis::X), VIEWPORT);
}

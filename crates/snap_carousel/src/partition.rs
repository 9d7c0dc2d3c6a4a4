//! Page partitioning and active-page tracking
//!
//! The two core computations over a live container:
//!
//! - [`compute_pages`] partitions the container's children into contiguous
//!   pages, each sized to fit one viewport extent along the scroll axis.
//! - [`compute_active_page`] finds the page whose lead item sits closest to
//!   the viewport's near edge at the current scroll offset.
//!
//! Both read the child list fresh from the host; nothing is cached.

use snap_core::{
    offset_rect, offset_rect_relative_to, Axis, ElementRef, Rect, ScrollContainer,
};

use crate::state::Page;

/// Bounding box of an item in the unscrolled content flow, relative to its
/// parent (the container). Marginal extents fall out of these coordinates:
/// gaps and margins introduced by layout are absorbed because each item's far
/// edge already includes the space consumed before it.
pub(crate) fn parent_relative_rect(item: &ElementRef) -> Rect {
    match item.parent() {
        Some(parent) => offset_rect_relative_to(&**item, &*parent),
        None => offset_rect(&**item),
    }
}

/// Partition the container's children into pages along `axis`.
///
/// Pages partition the item indices contiguously and exhaustively: every item
/// belongs to exactly one page and the first item always starts the first
/// page. An item is pushed to a new page when its far edge would overflow the
/// viewport extent measured from the current page's start position; the
/// viewport extent is ceiled so sub-pixel rendering cannot force spurious
/// breaks, and the overflow test is strict so an exact fit stays on the
/// current page. An item wider than the viewport still occupies a page of
/// its own.
pub fn compute_pages(container: &dyn ScrollContainer, axis: Axis) -> Vec<Page> {
    let items = container.children();
    let viewport_extent = axis.extent(container.bounding_rect().size()).ceil();

    let mut pages: Vec<Page> = Vec::new();
    let mut page_start = 0.0_f32;
    for (index, item) in items.iter().enumerate() {
        if index == 0 {
            // The first page starts at content offset zero even when leading
            // padding or margin pushes the item inward.
            pages.push(Page::with_lead(0));
            continue;
        }
        let rect = parent_relative_rect(item);
        if axis.far_edge(&rect) - page_start > viewport_extent {
            page_start = axis.near_edge(&rect);
            pages.push(Page::with_lead(index));
        } else if let Some(page) = pages.last_mut() {
            page.push(index);
        }
    }

    tracing::trace!(
        items = items.len(),
        pages = pages.len(),
        "partitioned items into pages"
    );
    pages
}

/// Find the index of the page currently closest to the scroll origin.
///
/// Returns `None` when there are no pages. When the remaining scrollable
/// distance fits within the visible extent (compared on floored values, plus
/// `end_tolerance`), the last page is reported unconditionally: hosts cap the
/// scroll offset at the end of content, so the last page's lead item may
/// never align with the viewport edge. Otherwise the page whose lead item's
/// near edge is nearest the viewport's near edge wins; ties go to the lowest
/// page index.
pub fn compute_active_page(
    container: &dyn ScrollContainer,
    axis: Axis,
    pages: &[Page],
    end_tolerance: f32,
) -> Option<usize> {
    if pages.is_empty() {
        return None;
    }

    let remaining = (container.scroll_extent(axis) - container.scroll_offset(axis)).floor();
    if remaining <= container.viewport_extent(axis) + end_tolerance {
        return Some(pages.len() - 1);
    }

    let items = container.children();
    let port_near = axis.near_edge(&container.bounding_rect());
    let mut best: Option<(usize, f32)> = None;
    for (page_index, page) in pages.iter().enumerate() {
        let Some(lead) = items.get(page.lead()) else {
            // Stale page after external item removal; skip until refresh.
            continue;
        };
        let distance = (axis.near_edge(&lead.bounding_rect()) - port_near).abs();
        if best.is_none_or(|(_, min)| distance < min) {
            best = Some((page_index, distance));
        }
    }
    best.map(|(page_index, _)| page_index)
}

#[cfg(test)]
mod tests {
    use super::*;
    use snap_core::mock::{MockContainer, MockElement};
    use snap_core::Point;
    use std::sync::Arc;

    /// A 300px-wide viewport with `count` items of `width` px laid out in a
    /// row with `gap` px between them.
    fn row(count: usize, width: f32, gap: f32) -> Arc<MockContainer> {
        let container = MockContainer::new(Rect::new(0.0, 0.0, 300.0, 100.0));
        for i in 0..count {
            let x = i as f32 * (width + gap);
            container.push_child(MockElement::new(Rect::new(x, 0.0, width, 100.0)));
        }
        container
    }

    fn page_indices(pages: &[Page]) -> Vec<Vec<usize>> {
        pages.iter().map(|p| p.items().to_vec()).collect()
    }

    #[test]
    fn test_zero_children_zero_pages() {
        let container = MockContainer::new(Rect::new(0.0, 0.0, 300.0, 100.0));
        assert!(compute_pages(&*container, Axis::X).is_empty());
        assert_eq!(
            compute_active_page(&*container, Axis::X, &[], 0.0),
            None
        );
    }

    #[test]
    fn test_single_item_single_page() {
        let container = row(1, 150.0, 0.0);
        let pages = compute_pages(&*container, Axis::X);
        assert_eq!(page_indices(&pages), vec![vec![0]]);
    }

    #[test]
    fn test_exact_fit_stays_on_page() {
        // Three 100px items fill the 300px viewport exactly.
        let container = row(6, 100.0, 0.0);
        let pages = compute_pages(&*container, Axis::X);
        assert_eq!(page_indices(&pages), vec![vec![0, 1, 2], vec![3, 4, 5]]);
    }

    #[test]
    fn test_gaps_count_toward_page_extent() {
        // 140px items with 40px gaps: item 1 ends at 320 > 300, so each page
        // holds a single item despite two raw widths fitting.
        let container = row(3, 140.0, 40.0);
        let pages = compute_pages(&*container, Axis::X);
        assert_eq!(page_indices(&pages), vec![vec![0], vec![1], vec![2]]);
    }

    #[test]
    fn test_oversized_item_gets_solo_page() {
        let container = MockContainer::new(Rect::new(0.0, 0.0, 300.0, 100.0));
        container.push_child(MockElement::new(Rect::new(0.0, 0.0, 450.0, 100.0)));
        for i in 0..5 {
            container.push_child(MockElement::new(Rect::new(
                450.0 + i as f32 * 50.0,
                0.0,
                50.0,
                100.0,
            )));
        }
        let pages = compute_pages(&*container, Axis::X);
        assert_eq!(
            page_indices(&pages),
            vec![vec![0], vec![1, 2, 3, 4, 5]]
        );
    }

    #[test]
    fn test_partition_is_scroll_invariant() {
        let container = row(9, 150.0, 0.0);
        let before = compute_pages(&*container, Axis::X);
        container.set_scroll_offset(Point::new(425.0, 0.0));
        let after = compute_pages(&*container, Axis::X);
        assert_eq!(before, after);
    }

    #[test]
    fn test_vertical_axis() {
        let container = MockContainer::new(Rect::new(0.0, 0.0, 100.0, 300.0));
        for i in 0..4 {
            container.push_child(MockElement::new(Rect::new(
                0.0,
                i as f32 * 150.0,
                100.0,
                150.0,
            )));
        }
        let pages = compute_pages(&*container, Axis::Y);
        assert_eq!(page_indices(&pages), vec![vec![0, 1], vec![2, 3]]);
    }

    #[test]
    fn test_active_page_tracks_scroll_offset() {
        let container = row(9, 150.0, 0.0);
        let pages = compute_pages(&*container, Axis::X);
        assert_eq!(pages.len(), 5);

        assert_eq!(
            compute_active_page(&*container, Axis::X, &pages, 0.0),
            Some(0)
        );

        // Page 1 leads with item 2 at x=300.
        container.set_scroll_offset(Point::new(300.0, 0.0));
        assert_eq!(
            compute_active_page(&*container, Axis::X, &pages, 0.0),
            Some(1)
        );

        // Nearest lead wins mid-scroll.
        container.set_scroll_offset(Point::new(400.0, 0.0));
        assert_eq!(
            compute_active_page(&*container, Axis::X, &pages, 0.0),
            Some(1)
        );
    }

    #[test]
    fn test_active_page_is_deterministic() {
        let container = row(9, 150.0, 0.0);
        let pages = compute_pages(&*container, Axis::X);
        // Equidistant between page 0 (lead at 0) and page 1 (lead at 300):
        // the lower index wins, and recomputation agrees with itself.
        container.set_scroll_offset(Point::new(150.0, 0.0));
        let first = compute_active_page(&*container, Axis::X, &pages, 0.0);
        let second = compute_active_page(&*container, Axis::X, &pages, 0.0);
        assert_eq!(first, Some(0));
        assert_eq!(first, second);
    }

    #[test]
    fn test_end_of_scroll_pins_last_page() {
        // 7 items of 150px: content 1050px, viewport 300px, max offset 750.
        // The last page's lead (item 6 at x=900) can never reach offset 0.
        let container = row(7, 150.0, 0.0);
        let pages = compute_pages(&*container, Axis::X);
        assert_eq!(pages.len(), 4);

        container.set_scroll_offset(Point::new(750.0, 0.0));
        assert_eq!(
            compute_active_page(&*container, Axis::X, &pages, 0.0),
            Some(3)
        );
    }

    #[test]
    fn test_end_tolerance_widens_the_pin() {
        let container = row(7, 150.0, 0.0);
        let pages = compute_pages(&*container, Axis::X);

        // 4px short of the capped end: bare comparison does not pin...
        container.set_scroll_offset(Point::new(746.0, 0.0));
        assert_ne!(
            compute_active_page(&*container, Axis::X, &pages, 0.0),
            Some(3)
        );
        // ...a 5px tolerance does.
        assert_eq!(
            compute_active_page(&*container, Axis::X, &pages, 5.0),
            Some(3)
        );
    }
}

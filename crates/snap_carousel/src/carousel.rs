//! The carousel engine
//!
//! [`SnapCarousel`] owns the relationship between a scrollable host container,
//! its direct children, and the derived page/active-index state. It reacts to
//! container scroll, window resize, and orientation-change events, and
//! exposes imperative navigation that scrolls to page boundaries.
//!
//! The handle is cheaply clonable and shares one inner state; hosts with a
//! reactive system construct it via [`SnapCarousel::with_trigger`] so state
//! changes schedule a re-render, while immediate-mode hosts poll
//! [`SnapCarousel::take_dirty`] each frame.
//!
//! # Example
//!
//! ```rust
//! use snap_carousel::{CarouselOptions, SnapCarousel};
//! use snap_core::mock::{MockContainer, MockElement};
//! use snap_core::Rect;
//!
//! let container = MockContainer::new(Rect::new(0.0, 0.0, 300.0, 100.0));
//! for i in 0..6 {
//!     container.push_child(MockElement::new(Rect::new(
//!         i as f32 * 150.0, 0.0, 150.0, 100.0,
//!     )));
//! }
//!
//! let carousel = SnapCarousel::new(CarouselOptions::default());
//! carousel.set_container(Some(container.clone()));
//!
//! assert_eq!(carousel.pages().len(), 3);
//! assert_eq!(carousel.active_page_index(), Some(0));
//! carousel.next();
//! ```

use std::sync::{Arc, Mutex};

use rustc_hash::FxHashSet;

use snap_core::{
    Axis, ContainerRef, ElementRef, EventKind, EventTargetRef, Listener, ListenerId,
    ScrollBehavior, SnapAlign,
};

use crate::partition::{compute_active_page, compute_pages, parent_relative_rect};
use crate::state::{engine_events, AttachState, CarouselState, Page, StateTransitions};

// ============================================================================
// Options
// ============================================================================

/// Configuration fixed for the life of one engine attachment
#[derive(Debug, Clone)]
pub struct CarouselOptions {
    /// Scroll direction the engine operates along (default: horizontal)
    pub axis: Axis,
    /// Marker class applied to snap-point items. When `None`, snap points
    /// are marked via inline snap alignment instead.
    pub snap_marker_class: Option<String>,
    /// Animation behavior for navigation scroll commands (default: smooth)
    pub scroll_behavior: ScrollBehavior,
    /// Extra slack, in pixels, for the end-of-scroll active-page shortcut.
    /// The comparison already floors to tolerate sub-pixel drift; raise this
    /// for hosts with zoom-dependent rounding.
    pub end_tolerance: f32,
}

impl Default for CarouselOptions {
    fn default() -> Self {
        Self {
            axis: Axis::X,
            snap_marker_class: None,
            scroll_behavior: ScrollBehavior::Smooth,
            end_tolerance: 0.0,
        }
    }
}

impl CarouselOptions {
    /// Options for a vertically scrolling carousel
    pub fn vertical() -> Self {
        Self {
            axis: Axis::Y,
            ..Default::default()
        }
    }

    /// Options marking snap points with a class instead of inline alignment
    pub fn with_marker_class(class: impl Into<String>) -> Self {
        Self {
            snap_marker_class: Some(class.into()),
            ..Default::default()
        }
    }
}

// ============================================================================
// Shared Inner State
// ============================================================================

/// Callback type for triggering host re-renders
pub type TriggerCallback = Arc<dyn Fn() + Send + Sync>;

struct CarouselInner {
    options: CarouselOptions,
    container: Option<ContainerRef>,
    window: Option<EventTargetRef>,
    state: CarouselState,
    attach_state: AttachState,
    /// Scroll listener registered on the container
    container_listener: Option<ListenerId>,
    /// Resize/orientation listeners registered on the window target
    window_listeners: Vec<ListenerId>,
    /// Items that received snap markers in the last application, kept so
    /// markers can be reverted even after items leave the child list
    marked_items: Vec<ElementRef>,
    /// Whether published state changed since the last `take_dirty`
    dirty: bool,
}

impl CarouselInner {
    fn new(options: CarouselOptions) -> Self {
        Self {
            options,
            container: None,
            window: None,
            state: CarouselState::default(),
            attach_state: AttachState::Unattached,
            container_listener: None,
            window_listeners: Vec::new(),
            marked_items: Vec::new(),
            dirty: false,
        }
    }

    fn advance(&mut self, event: u32) {
        if let Some(next) = self.attach_state.on_event(event) {
            self.attach_state = next;
        }
    }
}

type SharedInner = Arc<Mutex<CarouselInner>>;

// ============================================================================
// Engine Handle
// ============================================================================

/// Scroll-snap carousel engine over a host scroll container
#[derive(Clone)]
pub struct SnapCarousel {
    inner: SharedInner,
    /// Callback invoked after published state changes
    trigger: TriggerCallback,
}

impl std::fmt::Debug for SnapCarousel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SnapCarousel")
            .field("attach_state", &self.attach_state())
            .finish()
    }
}

impl Default for SnapCarousel {
    fn default() -> Self {
        Self::new(CarouselOptions::default())
    }
}

impl SnapCarousel {
    /// Create a standalone engine (no re-render integration)
    pub fn new(options: CarouselOptions) -> Self {
        let noop_trigger: TriggerCallback = Arc::new(|| {});
        Self::with_trigger(options, noop_trigger)
    }

    /// Create an engine whose state changes invoke `trigger`
    pub fn with_trigger(options: CarouselOptions, trigger: TriggerCallback) -> Self {
        Self {
            inner: Arc::new(Mutex::new(CarouselInner::new(options))),
            trigger,
        }
    }

    // =========================================================================
    // Attachment
    // =========================================================================

    /// Register (or unregister, with `None`) the scrollable container.
    ///
    /// This is the engine's registration callback: hosts call it with the
    /// container when the viewport mounts and with `None` when it unmounts.
    /// Registration subscribes the engine to the container's scroll events
    /// and synchronously computes pages and the active page, so state is
    /// ready before first paint. Unregistration removes every listener the
    /// engine added and reverts snap markers.
    pub fn set_container(&self, container: Option<ContainerRef>) {
        let was_attached = self.teardown();
        let Some(container) = container else {
            if was_attached {
                tracing::debug!("carousel detached");
                (self.trigger)();
            }
            return;
        };

        // Scroll only moves the viewport, so it re-runs active-page tracking
        // alone; re-partitioning is reserved for layout-changing events.
        let scroll_listener = self.listener(refresh_active_page);
        let container_listener = container.add_listener(EventKind::Scroll, scroll_listener);

        let window = self.lock(|inner| inner.window.clone());
        let window_listeners = self.subscribe_window(window.as_ref());

        self.lock(|inner| {
            inner.container = Some(Arc::clone(&container));
            inner.container_listener = Some(container_listener);
            inner.window_listeners = window_listeners;
            inner.advance(engine_events::ATTACH);
        });
        tracing::debug!("carousel attached");

        recompute(&self.inner, &self.trigger);
    }

    /// Bind the window-level event target supplying resize and
    /// orientation-change events.
    ///
    /// May be called before or after a container is registered; rebinding
    /// unsubscribes from the previous target first.
    pub fn bind_window(&self, window: EventTargetRef) {
        let (previous, stale_ids, attached) = self.lock(|inner| {
            (
                inner.window.replace(Arc::clone(&window)),
                std::mem::take(&mut inner.window_listeners),
                inner.attach_state.is_attached(),
            )
        });
        if let Some(previous) = previous {
            for id in stale_ids {
                previous.remove_listener(id);
            }
        }
        if attached {
            let ids = self.subscribe_window(Some(&window));
            self.lock(|inner| inner.window_listeners = ids);
        }
    }

    /// Recompute pages and the active page for the current layout.
    ///
    /// Call after content changes the engine cannot observe (asynchronous
    /// item insertion/removal). No-op while unattached.
    pub fn refresh(&self) {
        recompute(&self.inner, &self.trigger);
    }

    // =========================================================================
    // Navigation
    // =========================================================================

    /// Scroll to a page with the configured default behavior.
    ///
    /// Out-of-range indices are silently ignored so callers can wire
    /// controls without boundary special-casing.
    pub fn go_to(&self, page_index: usize) {
        let behavior = self.lock(|inner| inner.options.scroll_behavior);
        self.go_to_with_behavior(page_index, behavior);
    }

    /// Scroll to a page with an explicit animation behavior
    pub fn go_to_with_behavior(&self, page_index: usize, behavior: ScrollBehavior) {
        let Some((container, axis, lead_index)) = self.lock(|inner| {
            let container = inner.container.clone()?;
            let page = inner.state.pages.get(page_index)?;
            Some((container, inner.options.axis, page.lead()))
        }) else {
            return;
        };
        let items = container.children();
        let Some(lead) = items.get(lead_index) else {
            // Page set is stale (items were removed without a refresh).
            return;
        };
        let target = axis.near_edge(&parent_relative_rect(lead));
        tracing::debug!(page_index, target, "carousel navigating to page");
        container.scroll_to(axis, target, behavior);
    }

    /// Scroll to the page after the active one
    pub fn next(&self) {
        let behavior = self.lock(|inner| inner.options.scroll_behavior);
        self.next_with_behavior(behavior);
    }

    /// Scroll to the page after the active one with an explicit behavior
    pub fn next_with_behavior(&self, behavior: ScrollBehavior) {
        if let Some(active) = self.active_page_index() {
            self.go_to_with_behavior(active + 1, behavior);
        }
    }

    /// Scroll to the page before the active one
    pub fn prev(&self) {
        let behavior = self.lock(|inner| inner.options.scroll_behavior);
        self.prev_with_behavior(behavior);
    }

    /// Scroll to the page before the active one with an explicit behavior
    pub fn prev_with_behavior(&self, behavior: ScrollBehavior) {
        if let Some(target) = self.active_page_index().and_then(|i| i.checked_sub(1)) {
            self.go_to_with_behavior(target, behavior);
        }
    }

    // =========================================================================
    // Published State
    // =========================================================================

    /// The current atomic `{pages, active page}` snapshot
    pub fn state(&self) -> CarouselState {
        self.lock(|inner| inner.state.clone())
    }

    /// The current pages
    pub fn pages(&self) -> Vec<Page> {
        self.lock(|inner| inner.state.pages.clone())
    }

    /// Index of the currently active page, `None` when there are no pages
    pub fn active_page_index(&self) -> Option<usize> {
        self.lock(|inner| inner.state.active_page_index)
    }

    /// Whether a page exists after the active one
    pub fn has_next_page(&self) -> bool {
        self.lock(|inner| inner.state.has_next_page())
    }

    /// Whether a page exists before the active one
    pub fn has_prev_page(&self) -> bool {
        self.lock(|inner| inner.state.has_prev_page())
    }

    /// Item indices that lead a page (the snap points)
    pub fn snap_point_indexes(&self) -> FxHashSet<usize> {
        self.lock(|inner| inner.state.pages.iter().map(Page::lead).collect())
    }

    /// Whether the item at `index` leads a page
    pub fn is_snap_point(&self, index: usize) -> bool {
        self.lock(|inner| inner.state.pages.iter().any(|page| page.lead() == index))
    }

    /// Current attachment lifecycle state
    pub fn attach_state(&self) -> AttachState {
        self.lock(|inner| inner.attach_state)
    }

    /// Check and clear the dirty flag (for immediate-mode hosts that poll)
    pub fn take_dirty(&self) -> bool {
        self.lock(|inner| std::mem::take(&mut inner.dirty))
    }

    // =========================================================================
    // Internal
    // =========================================================================

    /// Run `f` under the inner lock, tolerating poisoning like the rest of
    /// the shared-handle types in this stack.
    fn lock<R: Default>(&self, f: impl FnOnce(&mut CarouselInner) -> R) -> R {
        match self.inner.lock() {
            Ok(mut inner) => f(&mut inner),
            Err(_) => R::default(),
        }
    }

    /// Build a listener that re-enters the engine through a weak handle
    fn listener(&self, f: fn(&SharedInner, &TriggerCallback)) -> Listener {
        let weak = Arc::downgrade(&self.inner);
        let trigger = Arc::clone(&self.trigger);
        Arc::new(move || {
            if let Some(inner) = weak.upgrade() {
                f(&inner, &trigger);
            }
        })
    }

    fn subscribe_window(&self, window: Option<&EventTargetRef>) -> Vec<ListenerId> {
        let Some(window) = window else {
            return Vec::new();
        };
        // Resize and orientation change both invalidate the partition.
        [EventKind::Resize, EventKind::OrientationChange]
            .into_iter()
            .map(|kind| window.add_listener(kind, self.listener(recompute)))
            .collect()
    }

    /// Remove listeners, revert markers, and discard container state.
    /// Returns whether a container was attached.
    fn teardown(&self) -> bool {
        let Ok(mut inner) = self.inner.lock() else {
            return false;
        };
        let container = inner.container.take();
        let container_listener = inner.container_listener.take();
        let window = inner.window.clone();
        let window_listeners = std::mem::take(&mut inner.window_listeners);
        let marked = std::mem::take(&mut inner.marked_items);
        let marker_class = inner.options.snap_marker_class.clone();
        let was_attached = inner.attach_state.is_attached();
        inner.state = CarouselState::default();
        inner.advance(engine_events::DETACH);
        if was_attached {
            inner.dirty = true;
        }
        drop(inner);

        if let (Some(container), Some(id)) = (&container, container_listener) {
            container.remove_listener(id);
        }
        if let Some(window) = &window {
            for id in window_listeners {
                window.remove_listener(id);
            }
        }
        for item in &marked {
            clear_marker(item, marker_class.as_deref());
        }
        was_attached
    }
}

impl Drop for SnapCarousel {
    fn drop(&mut self) {
        // Last handle going away must not leave listeners or markers behind.
        if Arc::strong_count(&self.inner) == 1 {
            self.teardown();
        }
    }
}

// ============================================================================
// Recompute Routines
// ============================================================================

/// Full recompute: partition pages, track the active page, refresh snap
/// markers, and publish the new state atomically.
fn recompute(shared: &SharedInner, trigger: &TriggerCallback) {
    let Some((container, options)) = lock_with(shared, |inner| {
        inner
            .container
            .clone()
            .map(|container| (container, inner.options.clone()))
    }) else {
        return;
    };

    let pages = compute_pages(&*container, options.axis);
    let active = compute_active_page(&*container, options.axis, &pages, options.end_tolerance);
    let items = container.children();

    let previous = lock_with(shared, |inner| {
        Some(std::mem::take(&mut inner.marked_items))
    })
    .unwrap_or_default();
    apply_snap_markers(&previous, &items, &pages, options.snap_marker_class.as_deref());

    tracing::debug!(
        items = items.len(),
        pages = pages.len(),
        active = ?active,
        "carousel recomputed"
    );

    let changed = lock_with(shared, |inner| {
        inner.marked_items = items;
        let next = CarouselState {
            pages,
            active_page_index: active,
        };
        let changed = inner.state != next;
        inner.state = next;
        inner.advance(engine_events::RECOMPUTE);
        if changed {
            inner.dirty = true;
        }
        Some(changed)
    })
    .unwrap_or(false);

    if changed {
        trigger();
    }
}

/// Scroll-path recompute: pages are unchanged by scrolling alone, so only the
/// active page is re-derived.
fn refresh_active_page(shared: &SharedInner, trigger: &TriggerCallback) {
    let Some((container, options, pages)) = lock_with(shared, |inner| {
        inner
            .container
            .clone()
            .map(|container| (container, inner.options.clone(), inner.state.pages.clone()))
    }) else {
        return;
    };

    let active = compute_active_page(&*container, options.axis, &pages, options.end_tolerance);
    tracing::trace!(active = ?active, "carousel active page refreshed");

    let changed = lock_with(shared, |inner| {
        let next = CarouselState {
            pages,
            active_page_index: active,
        };
        let changed = inner.state != next;
        inner.state = next;
        if changed {
            inner.dirty = true;
        }
        Some(changed)
    })
    .unwrap_or(false);

    if changed {
        trigger();
    }
}

fn lock_with<R>(
    shared: &SharedInner,
    f: impl FnOnce(&mut CarouselInner) -> Option<R>,
) -> Option<R> {
    f(&mut *shared.lock().ok()?)
}

// ============================================================================
// Snap Markers
// ============================================================================

fn set_marker(item: &ElementRef, class: Option<&str>) {
    match class {
        Some(class) => item.add_class(class),
        None => item.set_snap_align(Some(SnapAlign::Start)),
    }
}

fn clear_marker(item: &ElementRef, class: Option<&str>) {
    match class {
        Some(class) => item.remove_class(class),
        None => item.set_snap_align(None),
    }
}

/// Revert the previous application, then mark each page's lead item.
fn apply_snap_markers(
    previous: &[ElementRef],
    items: &[ElementRef],
    pages: &[Page],
    class: Option<&str>,
) {
    for item in previous {
        clear_marker(item, class);
    }
    let leads: FxHashSet<usize> = pages.iter().map(Page::lead).collect();
    for (index, item) in items.iter().enumerate() {
        if leads.contains(&index) {
            set_marker(item, class);
        } else {
            clear_marker(item, class);
        }
    }
}

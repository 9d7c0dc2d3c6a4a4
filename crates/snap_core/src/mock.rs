//! In-memory host implementation
//!
//! A minimal host environment for engine tests and for adapter authors
//! verifying their bindings. Elements store their *unscrolled* content rects
//! and derive viewport-relative boxes from ancestor scroll offsets, so the
//! scroll-invariant measurement in [`crate::geometry`] is exercised against
//! the same inversion a real host performs.
//!
//! [`MockContainer`] records every scroll command it is issued and can
//! dispatch host events to registered listeners.

use std::sync::{Arc, Mutex, Weak};

use rustc_hash::FxHashSet;
use slotmap::SlotMap;

use crate::element::{Element, ElementRef, ScrollBehavior, ScrollContainer, SnapAlign};
use crate::events::{EventKind, EventTarget, Listener, ListenerId};
use crate::geometry::{Axis, Point, Rect};

// ─────────────────────────────────────────────────────────────────────────────
// Listener Table
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Default)]
struct ListenerTable {
    listeners: Mutex<SlotMap<ListenerId, (EventKind, Listener)>>,
}

impl ListenerTable {
    fn add(&self, kind: EventKind, listener: Listener) -> ListenerId {
        self.listeners
            .lock()
            .expect("listener table poisoned")
            .insert((kind, listener))
    }

    fn remove(&self, id: ListenerId) {
        self.listeners
            .lock()
            .expect("listener table poisoned")
            .remove(id);
    }

    fn dispatch(&self, kind: EventKind) {
        // Clone matching listeners out of the lock so a listener can
        // re-enter add/remove without deadlocking.
        let matching: Vec<Listener> = self
            .listeners
            .lock()
            .expect("listener table poisoned")
            .values()
            .filter(|(k, _)| *k == kind)
            .map(|(_, l)| Arc::clone(l))
            .collect();
        tracing::trace!(?kind, listeners = matching.len(), "dispatching mock event");
        for listener in matching {
            listener();
        }
    }

    fn len(&self) -> usize {
        self.listeners.lock().expect("listener table poisoned").len()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Mock Element
// ─────────────────────────────────────────────────────────────────────────────

struct MockElementInner {
    /// Unscrolled bounding box in absolute content coordinates
    content_rect: Rect,
    scroll_offset: Point,
    parent: Option<Weak<MockElement>>,
    snap_align: Option<SnapAlign>,
    classes: FxHashSet<String>,
}

/// A host element with settable geometry and inspectable presentation state
pub struct MockElement {
    inner: Mutex<MockElementInner>,
}

impl MockElement {
    /// Create an element from its unscrolled content rect
    pub fn new(content_rect: Rect) -> Arc<Self> {
        Arc::new(Self {
            inner: Mutex::new(MockElementInner {
                content_rect,
                scroll_offset: Point::ZERO,
                parent: None,
                snap_align: None,
                classes: FxHashSet::default(),
            }),
        })
    }

    /// Replace the unscrolled content rect (simulates relayout)
    pub fn set_content_rect(&self, rect: Rect) {
        self.lock().content_rect = rect;
    }

    /// The unscrolled content rect
    pub fn content_rect(&self) -> Rect {
        self.lock().content_rect
    }

    /// Set this element's own scroll offsets
    pub fn set_scroll_offset(&self, offset: Point) {
        self.lock().scroll_offset = offset;
    }

    /// Currently applied inline snap alignment, if any
    pub fn snap_align(&self) -> Option<SnapAlign> {
        self.lock().snap_align
    }

    /// Whether a marker class is currently applied
    pub fn has_class(&self, class: &str) -> bool {
        self.lock().classes.contains(class)
    }

    fn set_parent(&self, parent: &Arc<MockElement>) {
        self.lock().parent = Some(Arc::downgrade(parent));
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, MockElementInner> {
        self.inner.lock().expect("mock element poisoned")
    }

    /// Sum of scroll offsets over all ancestors
    fn ancestor_scroll(&self) -> Point {
        let mut total = Point::ZERO;
        let mut parent = self.lock().parent.as_ref().and_then(Weak::upgrade);
        while let Some(ancestor) = parent {
            let guard = ancestor.lock();
            total.x += guard.scroll_offset.x;
            total.y += guard.scroll_offset.y;
            let next = guard.parent.as_ref().and_then(Weak::upgrade);
            drop(guard);
            parent = next;
        }
        total
    }
}

impl Element for MockElement {
    fn bounding_rect(&self) -> Rect {
        let scroll = self.ancestor_scroll();
        self.lock().content_rect.offset(-scroll.x, -scroll.y)
    }

    fn scroll_offset(&self) -> Point {
        self.lock().scroll_offset
    }

    fn parent(&self) -> Option<ElementRef> {
        let parent = self.lock().parent.as_ref().and_then(Weak::upgrade)?;
        Some(parent as ElementRef)
    }

    fn set_snap_align(&self, align: Option<SnapAlign>) {
        self.lock().snap_align = align;
    }

    fn add_class(&self, class: &str) {
        self.lock().classes.insert(class.to_string());
    }

    fn remove_class(&self, class: &str) {
        self.lock().classes.remove(class);
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Mock Container
// ─────────────────────────────────────────────────────────────────────────────

/// One scroll command issued via [`ScrollContainer::scroll_to`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollCommand {
    pub axis: Axis,
    pub offset: f32,
    pub behavior: ScrollBehavior,
}

/// A scrollable host viewport backed by mock elements
pub struct MockContainer {
    element: Arc<MockElement>,
    children: Mutex<Vec<Arc<MockElement>>>,
    commands: Mutex<Vec<ScrollCommand>>,
    table: ListenerTable,
}

impl MockContainer {
    /// Create a container from its viewport rect
    pub fn new(viewport_rect: Rect) -> Arc<Self> {
        Arc::new(Self {
            element: MockElement::new(viewport_rect),
            children: Mutex::new(Vec::new()),
            commands: Mutex::new(Vec::new()),
            table: ListenerTable::default(),
        })
    }

    /// The container's own element node (items' parent in the mock tree)
    pub fn element(&self) -> ElementRef {
        Arc::clone(&self.element) as ElementRef
    }

    /// Append a child item
    pub fn push_child(&self, child: Arc<MockElement>) {
        child.set_parent(&self.element);
        self.children
            .lock()
            .expect("mock container poisoned")
            .push(child);
    }

    /// Drop children beyond `len` (simulates external item removal)
    pub fn truncate_children(&self, len: usize) {
        self.children
            .lock()
            .expect("mock container poisoned")
            .truncate(len);
    }

    /// Replace the viewport rect (simulates a resize)
    pub fn set_viewport_rect(&self, rect: Rect) {
        self.element.set_content_rect(rect);
    }

    /// Set the container's scroll offset directly (simulates user scrolling)
    pub fn set_scroll_offset(&self, offset: Point) {
        self.element.set_scroll_offset(offset);
    }

    /// All scroll commands issued so far
    pub fn commands(&self) -> Vec<ScrollCommand> {
        self.commands
            .lock()
            .expect("mock container poisoned")
            .clone()
    }

    /// Drain and return issued scroll commands
    pub fn take_commands(&self) -> Vec<ScrollCommand> {
        std::mem::take(&mut *self.commands.lock().expect("mock container poisoned"))
    }

    /// Fire an event to registered listeners
    pub fn dispatch(&self, kind: EventKind) {
        self.table.dispatch(kind);
    }

    /// Number of currently registered listeners
    pub fn listener_count(&self) -> usize {
        self.table.len()
    }

    fn max_child_far_edge(&self, axis: Axis) -> Option<f32> {
        let near = axis.near_edge(&self.element.content_rect());
        self.children
            .lock()
            .expect("mock container poisoned")
            .iter()
            .map(|child| axis.far_edge(&child.content_rect()) - near)
            .fold(None, |acc, far| Some(acc.map_or(far, |a: f32| a.max(far))))
    }
}

impl EventTarget for MockContainer {
    fn add_listener(&self, kind: EventKind, listener: Listener) -> ListenerId {
        self.table.add(kind, listener)
    }

    fn remove_listener(&self, id: ListenerId) {
        self.table.remove(id);
    }
}

impl ScrollContainer for MockContainer {
    fn bounding_rect(&self) -> Rect {
        self.element.bounding_rect()
    }

    fn scroll_offset(&self, axis: Axis) -> f32 {
        axis.component(self.element.scroll_offset())
    }

    fn viewport_extent(&self, axis: Axis) -> f32 {
        axis.extent(self.element.content_rect().size())
    }

    fn scroll_extent(&self, axis: Axis) -> f32 {
        let viewport = self.viewport_extent(axis);
        self.max_child_far_edge(axis)
            .map_or(viewport, |far| far.max(viewport))
    }

    fn children(&self) -> Vec<ElementRef> {
        self.children
            .lock()
            .expect("mock container poisoned")
            .iter()
            .map(|child| Arc::clone(child) as ElementRef)
            .collect()
    }

    fn scroll_to(&self, axis: Axis, offset: f32, behavior: ScrollBehavior) {
        self.commands
            .lock()
            .expect("mock container poisoned")
            .push(ScrollCommand {
                axis,
                offset,
                behavior,
            });
        // Hosts cap the applied offset at the end of content.
        let max = (self.scroll_extent(axis) - self.viewport_extent(axis)).max(0.0);
        let applied = offset.clamp(0.0, max);
        let mut point = self.element.scroll_offset();
        match axis {
            Axis::X => point.x = applied,
            Axis::Y => point.y = applied,
        }
        self.element.set_scroll_offset(point);
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Mock Window
// ─────────────────────────────────────────────────────────────────────────────

/// A window-level event target for resize/orientation events
#[derive(Default)]
pub struct MockWindow {
    table: ListenerTable,
}

impl MockWindow {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Fire an event to registered listeners
    pub fn dispatch(&self, kind: EventKind) {
        self.table.dispatch(kind);
    }

    /// Number of currently registered listeners
    pub fn listener_count(&self) -> usize {
        self.table.len()
    }
}

impl EventTarget for MockWindow {
    fn add_listener(&self, kind: EventKind, listener: Listener) -> ListenerId {
        self.table.add(kind, listener)
    }

    fn remove_listener(&self, id: ListenerId) {
        self.table.remove(id);
    }
}

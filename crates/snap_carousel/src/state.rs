//! Carousel state model
//!
//! Pages and the active page index live in one [`CarouselState`] value that
//! is always replaced wholesale, never patched field-by-field, so an
//! observer can never see an active index referring to a since-removed page.
//! Attachment lifecycle is a small state machine in the style of the
//! interaction FSMs elsewhere in the stack.

use smallvec::SmallVec;

// ============================================================================
// Pages
// ============================================================================

/// A contiguous run of item indices sized to fit one viewport extent.
///
/// Pages are never empty: an item larger than the viewport still occupies a
/// page of its own. The first index is the page's *lead item*, the scroll
/// target for navigation and the snap point for native scroll snapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    items: SmallVec<[usize; 8]>,
}

impl Page {
    pub(crate) fn with_lead(lead: usize) -> Self {
        let mut items = SmallVec::new();
        items.push(lead);
        Self { items }
    }

    pub(crate) fn push(&mut self, index: usize) {
        self.items.push(index);
    }

    /// The first item index of this page
    pub fn lead(&self) -> usize {
        self.items[0]
    }

    /// All item indices on this page, in document order
    pub fn items(&self) -> &[usize] {
        &self.items
    }

    /// Number of items on this page (always at least 1)
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Whether an item index belongs to this page
    pub fn contains(&self, index: usize) -> bool {
        self.items.contains(&index)
    }
}

// ============================================================================
// Carousel State
// ============================================================================

/// The atomic `{pages, active page}` tuple published to the host
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CarouselState {
    /// Logical pages partitioning the item indices
    pub pages: Vec<Page>,
    /// Index of the page currently closest to the scroll origin.
    ///
    /// `None` while unattached or when the item list is empty.
    pub active_page_index: Option<usize>,
}

impl CarouselState {
    /// Whether there is a page after the active one
    pub fn has_next_page(&self) -> bool {
        self.active_page_index
            .is_some_and(|index| index + 1 < self.pages.len())
    }

    /// Whether there is a page before the active one
    pub fn has_prev_page(&self) -> bool {
        self.active_page_index.is_some_and(|index| index > 0)
    }

    /// Whether there are no pages
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}

// ============================================================================
// Attachment FSM
// ============================================================================

/// Engine lifecycle events
pub mod engine_events {
    /// A container was registered
    pub const ATTACH: u32 = 1;
    /// Pages and active index were recomputed for the current layout
    pub const RECOMPUTE: u32 = 2;
    /// The container was unregistered
    pub const DETACH: u32 = 3;
}

/// State machines that advance on discrete events
pub trait StateTransitions: Sized {
    /// Returns the next state, or `None` if the event does not transition
    fn on_event(&self, event: u32) -> Option<Self>;
}

/// Engine attachment lifecycle
///
/// ```text
///                   ATTACH              RECOMPUTE
///   Unattached ──────────► AttachedStale ──────────► AttachedFresh
///       ▲                        │                        │
///       └────────── DETACH ──────┴────────────────────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AttachState {
    /// No container registered; every operation is a no-op
    #[default]
    Unattached,
    /// Container registered, pages not yet computed for the current layout
    AttachedStale,
    /// Pages computed, listeners active
    AttachedFresh,
}

impl AttachState {
    /// Whether a container is currently registered
    pub fn is_attached(&self) -> bool {
        !matches!(self, AttachState::Unattached)
    }
}

impl StateTransitions for AttachState {
    fn on_event(&self, event: u32) -> Option<Self> {
        use engine_events::*;

        match (self, event) {
            (AttachState::Unattached, ATTACH) => Some(AttachState::AttachedStale),
            (AttachState::AttachedStale, RECOMPUTE) => Some(AttachState::AttachedFresh),
            // Fresh -> Fresh on recompute: no transition needed
            (AttachState::AttachedFresh, RECOMPUTE) => None,
            (AttachState::AttachedStale, DETACH) => Some(AttachState::Unattached),
            (AttachState::AttachedFresh, DETACH) => Some(AttachState::Unattached),
            _ => None,
        }
    }
}

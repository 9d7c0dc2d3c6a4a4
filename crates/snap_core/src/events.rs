//! Host event subscription
//!
//! The engine subscribes to the events it cares about (container scroll,
//! window resize and orientation change) and removes every listener it added
//! when it detaches. Listener identity uses slotmap keys so removal is
//! symmetric and idempotent: removing an already-removed key is a no-op.

use std::sync::Arc;

slotmap::new_key_type! {
    /// Key identifying one registered listener on one target
    pub struct ListenerId;
}

/// Host event kinds the engine subscribes to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// The container's scroll position changed
    Scroll,
    /// The host viewport was resized
    Resize,
    /// The device orientation changed
    OrientationChange,
}

/// Callback invoked when a subscribed event fires
pub type Listener = Arc<dyn Fn() + Send + Sync>;

/// An event source the engine can subscribe to
pub trait EventTarget: Send + Sync {
    /// Register a listener for an event kind
    fn add_listener(&self, kind: EventKind, listener: Listener) -> ListenerId;

    /// Remove a previously registered listener.
    ///
    /// Unknown or already-removed ids are ignored.
    fn remove_listener(&self, id: ListenerId);
}

/// Shared handle to a host event target (e.g. the window)
pub type EventTargetRef = Arc<dyn EventTarget>;

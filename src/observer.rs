//! Publish/subscribe for popup lifecycle events.
//!
//! Each event kind has an explicit subscribe/unsubscribe pair. Every
//! subscriber of a kind is called exactly once per emitted event, in
//! subscription order.

use crate::suggestion::Suggestion;

/// Something that happened to the popup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PopupEvent {
    /// The popup became visible.
    Show,
    /// The popup was hidden.
    Hide,
    /// A row was highlighted (`Some`) or the highlight was cleared (`None`).
    Highlight {
        /// Text the user typed.
        query: String,
        /// Highlighted row.
        suggestion: Option<Suggestion>,
    },
    /// A row was committed.
    Select {
        /// Text the user typed.
        query: String,
        /// Committed row.
        suggestion: Suggestion,
    },
    /// The bound field gained focus.
    FocusGained,
    /// The bound field lost focus.
    FocusLost,
}

impl PopupEvent {
    /// The kind used to route this event.
    pub fn kind(&self) -> EventKind {
        match self {
            PopupEvent::Show => EventKind::Show,
            PopupEvent::Hide => EventKind::Hide,
            PopupEvent::Highlight { .. } => EventKind::Highlight,
            PopupEvent::Select { .. } => EventKind::Select,
            PopupEvent::FocusGained => EventKind::FocusGained,
            PopupEvent::FocusLost => EventKind::FocusLost,
        }
    }
}

/// Event kinds a callback can subscribe to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// See [`PopupEvent::Show`].
    Show,
    /// See [`PopupEvent::Hide`].
    Hide,
    /// See [`PopupEvent::Highlight`].
    Highlight,
    /// See [`PopupEvent::Select`].
    Select,
    /// See [`PopupEvent::FocusGained`].
    FocusGained,
    /// See [`PopupEvent::FocusLost`].
    FocusLost,
}

/// Handle returned by [`Observers::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Callback invoked with each matching event.
pub type Callback = Box<dyn FnMut(&PopupEvent) + Send>;

struct Subscriber {
    id: SubscriptionId,
    kind: EventKind,
    callback: Callback,
}

/// Registry of event callbacks.
#[derive(Default)]
pub struct Observers {
    next_id: u64,
    subscribers: Vec<Subscriber>,
}

impl std::fmt::Debug for Observers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Observers")
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}

impl Observers {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `callback` for events of `kind`.
    ///
    /// ```rust
    /// use bubbletea_suggest::observer::{EventKind, Observers, PopupEvent};
    /// use std::sync::atomic::{AtomicUsize, Ordering};
    /// use std::sync::Arc;
    ///
    /// let shown = Arc::new(AtomicUsize::new(0));
    /// let counter = Arc::clone(&shown);
    /// let mut observers = Observers::new();
    /// let id = observers.subscribe(EventKind::Show, move |_| {
    ///     counter.fetch_add(1, Ordering::SeqCst);
    /// });
    ///
    /// observers.emit(&PopupEvent::Show);
    /// observers.emit(&PopupEvent::Hide);
    /// assert_eq!(shown.load(Ordering::SeqCst), 1);
    /// assert!(observers.unsubscribe(id));
    /// ```
    pub fn subscribe<F>(&mut self, kind: EventKind, callback: F) -> SubscriptionId
    where
        F: FnMut(&PopupEvent) + Send + 'static,
    {
        self.next_id += 1;
        let id = SubscriptionId(self.next_id);
        self.subscribers.push(Subscriber {
            id,
            kind,
            callback: Box::new(callback),
        });
        id
    }

    /// Removes a subscription. Returns `false` if it was already removed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|s| s.id != id);
        self.subscribers.len() != before
    }

    /// Number of subscriptions for `kind`.
    pub fn count(&self, kind: EventKind) -> usize {
        self.subscribers.iter().filter(|s| s.kind == kind).count()
    }

    /// Delivers `event` to every subscriber of its kind.
    pub fn emit(&mut self, event: &PopupEvent) {
        let kind = event.kind();
        for subscriber in self.subscribers.iter_mut().filter(|s| s.kind == kind) {
            (subscriber.callback)(event);
        }
    }
}

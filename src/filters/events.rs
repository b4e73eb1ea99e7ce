//! Filter notifications and listener registration
//!
//! The filter controller announces every transition with one [`FilterEvent`].
//! Listeners register a callback with [`Listeners::subscribe`] and keep the
//! returned [`ListenerId`] to unsubscribe later.
//!
//! The payload shapes are part of the public contract:
//!
//! - `filter-applied { selection, visible_count }`
//! - `filter-cleared {}`

use super::types::Selection;
use serde::Serialize;
use slotmap::{SlotMap, new_key_type};
use std::fmt;

new_key_type! {
    /// Handle returned by [`Listeners::subscribe`]
    pub struct ListenerId;
}

/// Notification emitted after each filter transition
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "kebab-case")]
pub enum FilterEvent {
    /// A partial selection was evaluated
    FilterApplied {
        selection: Selection,
        visible_count: usize,
    },
    /// The select-all state was (re)entered; listeners restore their
    /// unfiltered presentation
    FilterCleared,
}

impl FilterEvent {
    /// Event name as used on the wire
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::FilterApplied { .. } => "filter-applied",
            Self::FilterCleared => "filter-cleared",
        }
    }
}

impl fmt::Display for FilterEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FilterApplied {
                selection,
                visible_count,
            } => write!(f, "{} [{selection}] -> {visible_count} item(s)", self.name()),
            Self::FilterCleared => f.write_str(self.name()),
        }
    }
}

type Callback = Box<dyn FnMut(&FilterEvent)>;

/// Registered filter listeners of one container
#[derive(Default)]
pub struct Listeners {
    callbacks: SlotMap<ListenerId, Callback>,
}

impl Listeners {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a callback invoked synchronously for every event
    pub fn subscribe(&mut self, callback: impl FnMut(&FilterEvent) + 'static) -> ListenerId {
        self.callbacks.insert(Box::new(callback))
    }

    /// Remove a listener, returning false if it was not registered
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        self.callbacks.remove(id).is_some()
    }

    /// Deliver `event` to every registered listener
    pub fn emit(&mut self, event: &FilterEvent) {
        tracing::trace!(
            event = event.name(),
            listeners = self.callbacks.len(),
            "emitting filter event"
        );
        for callback in self.callbacks.values_mut() {
            callback(event);
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.callbacks.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.callbacks.is_empty()
    }
}

impl fmt::Debug for Listeners {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Listeners")
            .field("count", &self.callbacks.len())
            .finish()
    }
}

//! Host environment the browser runs in: navigation history, the scrolled
//! viewport, and the listener registry for their events.

mod history;
mod viewport;

use std::collections::{BTreeSet, HashMap};

pub use history::{History, HistoryEntry, PopState};
pub use viewport::Viewport;

/// Host event kinds a component can listen to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HostEvent {
    /// Viewport scroll position changed.
    Scroll,
    /// History cursor moved backwards.
    PopState,
}

/// Registration handle returned by [`EventTarget::add_listener`].
///
/// Move-only: removing a listener consumes its handle, so a listener can
/// neither be removed twice nor used after removal.
#[derive(Debug, PartialEq, Eq)]
#[must_use = "dropping a listener handle leaks the registration"]
pub struct Listener {
    event: HostEvent,
    id: u64,
}

/// Registry of live listeners per event kind.
#[derive(Debug, Default)]
pub struct EventTarget {
    next_id: u64,
    live: HashMap<HostEvent, BTreeSet<u64>>,
}

impl EventTarget {
    /// Registers a listener for `event`.
    pub fn add_listener(&mut self, event: HostEvent) -> Listener {
        let id = self.next_id;
        self.next_id = self.next_id.wrapping_add(1);
        self.live.entry(event).or_default().insert(id);
        Listener { event, id }
    }

    /// Deregisters a listener.
    pub fn remove_listener(&mut self, listener: Listener) {
        if let Some(ids) = self.live.get_mut(&listener.event) {
            ids.remove(&listener.id);
        }
    }

    /// Whether `listener` is still registered.
    #[must_use]
    pub fn is_listening(&self, listener: &Listener) -> bool {
        self.live
            .get(&listener.event)
            .is_some_and(|ids| ids.contains(&listener.id))
    }

    /// Number of live listeners for `event`.
    #[cfg(test)]
    pub fn listener_count(&self, event: HostEvent) -> usize {
        self.live.get(&event).map_or(0, BTreeSet::len)
    }
}

/// Everything the coordinator borrows from its surroundings.
#[derive(Debug)]
pub struct Host {
    /// Navigation history.
    pub history: History,
    /// Scrollable result viewport.
    pub viewport: Viewport,
    /// Listener registry.
    pub events: EventTarget,
}

impl Host {
    /// Creates a host with a single-entry history and the given scroll threshold.
    #[must_use]
    pub fn new(scroll_threshold: u16) -> Self {
        Self {
            history: History::new(),
            viewport: Viewport::new(scroll_threshold),
            events: EventTarget::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_and_remove_listener() {
        // Arrange
        let mut target = EventTarget::default();

        // Act
        let scroll = target.add_listener(HostEvent::Scroll);
        let pop = target.add_listener(HostEvent::PopState);

        // Assert
        assert!(target.is_listening(&scroll));
        assert_eq!(target.listener_count(HostEvent::Scroll), 1);
        assert_eq!(target.listener_count(HostEvent::PopState), 1);

        target.remove_listener(scroll);
        assert_eq!(target.listener_count(HostEvent::Scroll), 0);
        assert!(target.is_listening(&pop));
        target.remove_listener(pop);
        assert_eq!(target.listener_count(HostEvent::PopState), 0);
    }

    #[test]
    fn test_handles_are_distinct() {
        // Arrange
        let mut target = EventTarget::default();

        // Act
        let a = target.add_listener(HostEvent::PopState);
        let b = target.add_listener(HostEvent::PopState);

        // Assert
        assert_ne!(a, b);
        assert_eq!(a.event, HostEvent::PopState);
        assert_eq!(target.listener_count(HostEvent::PopState), 2);
        target.remove_listener(a);
        assert!(target.is_listening(&b));
        target.remove_listener(b);
    }
}

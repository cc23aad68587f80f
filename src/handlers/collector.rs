use std::sync::{Arc, Mutex};

use crate::{Event, EventHandler};

/// A handler that accumulates every published event for later inspection.
///
/// Clones share the same underlying store: subscribe one clone and keep the
/// other to assert on what arrived.
///
/// # Example
///
/// ```rust
/// use warden::{Event, EventBus, handlers::Collector};
///
/// let bus = EventBus::new();
/// let collector = Collector::new();
/// bus.subscribe(collector.clone());
///
/// bus.publish(&Event::not_found("process 'worker' not found"));
/// assert_eq!(collector.events()[0].message(), "process 'worker' not found");
/// ```
#[derive(Debug, Clone, Default)]
pub struct Collector {
    events: Arc<Mutex<Vec<Event>>>,
}

impl Collector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything received so far, in delivery order.
    pub fn events(&self) -> Vec<Event> {
        self.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<Event>> {
        self.events.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl EventHandler for Collector {
    fn handle(&self, event: &Event) {
        self.lock().push(event.clone());
    }
}

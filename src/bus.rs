use std::{
    fmt,
    panic::{AssertUnwindSafe, catch_unwind},
    sync::Mutex,
};

use crate::{Event, EventHandler};

/// Unique identifier for a registered handler.
pub type HandlerId = u64;

struct Registry {
    handlers: Vec<(HandlerId, Box<dyn EventHandler>)>,
    last_id: HandlerId,
}

/// Publish/subscribe dispatcher decoupling monitors from handlers.
///
/// Constructed once and shared (typically as `Arc<EventBus>`) between every
/// monitor and the control code that registers handlers. The bus holds no
/// state besides its handler registry; scheduling belongs to the monitors.
///
/// Delivery guarantees:
/// - [`publish`](Self::publish) invokes every currently registered handler
///   synchronously, in registration order.
/// - Registration is not deduplicated: subscribing the same handler twice
///   yields two ids and two deliveries per event.
/// - A panicking handler is isolated and logged; the remaining handlers
///   still receive the event and the panicking handler stays registered.
///
/// # Example
///
/// ```rust
/// use warden::{Event, EventBus, handlers::Collector};
///
/// let bus = EventBus::new();
/// let collector = Collector::new();
/// let id = bus.subscribe(collector.clone());
///
/// bus.publish(&Event::breach("over limit"));
/// assert_eq!(collector.len(), 1);
///
/// bus.unsubscribe(id);
/// bus.publish(&Event::breach("again"));
/// assert_eq!(collector.len(), 1);
/// ```
pub struct EventBus {
    inner: Mutex<Registry>,
}

impl EventBus {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Registry {
                handlers: Vec::new(),
                last_id: 0,
            }),
        }
    }

    /// Append a handler to the registry and return its id.
    ///
    /// Insertion order is notification order. No duplicate detection.
    pub fn subscribe(&self, handler: impl EventHandler + 'static) -> HandlerId {
        let mut inner = self.lock();
        let id = inner.last_id;
        inner.last_id += 1;
        inner.handlers.push((id, Box::new(handler)));
        id
    }

    /// Remove the registration with the given id.
    ///
    /// Silent no-op if the id is not present, so unsubscribe racing with
    /// publish from another task never crashes the publisher.
    pub fn unsubscribe(&self, id: HandlerId) {
        let mut inner = self.lock();
        if let Some(pos) = inner.handlers.iter().position(|(h, _)| *h == id) {
            inner.handlers.remove(pos);
        }
    }

    /// Synchronously deliver `event` to every registered handler, in
    /// registration order.
    ///
    /// A handler panic is caught, logged, and delivery continues with the
    /// remaining handlers.
    pub fn publish(&self, event: &Event) {
        let inner = self.lock();
        for (id, handler) in &inner.handlers {
            let result = catch_unwind(AssertUnwindSafe(|| handler.handle(event)));
            if result.is_err() {
                tracing::error!(
                    handler_id = %id,
                    event_id = %event.id(),
                    "handler panicked during publish"
                );
            }
        }
    }

    /// Number of currently registered handlers.
    pub fn handler_count(&self) -> usize {
        self.lock().handlers.len()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Registry> {
        // A poisoned lock only means a handler panicked on another thread;
        // the registry itself is still consistent.
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for EventBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventBus")
            .field("handlers.len()", &self.handler_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::handlers::Collector;

    /// Appends its label to a shared log on every delivery.
    struct Probe {
        label: &'static str,
        log: Arc<Mutex<Vec<&'static str>>>,
        panics: bool,
    }

    impl Probe {
        fn new(label: &'static str, log: &Arc<Mutex<Vec<&'static str>>>) -> Self {
            Self {
                label,
                log: log.clone(),
                panics: false,
            }
        }

        fn panicking(label: &'static str, log: &Arc<Mutex<Vec<&'static str>>>) -> Self {
            Self {
                label,
                log: log.clone(),
                panics: true,
            }
        }
    }

    impl EventHandler for Probe {
        fn handle(&self, _event: &Event) {
            self.log.lock().unwrap().push(self.label);
            if self.panics {
                panic!("probe {} exploded", self.label);
            }
        }
    }

    #[test]
    fn delivers_in_registration_order() {
        let bus = EventBus::new();
        let log = Arc::new(Mutex::new(Vec::new()));
        bus.subscribe(Probe::new("first", &log));
        bus.subscribe(Probe::new("second", &log));
        bus.subscribe(Probe::new("third", &log));

        bus.publish(&Event::breach("x"));

        assert_eq!(*log.lock().unwrap(), vec!["first", "second", "third"]);
    }

    #[test]
    fn panicking_handler_does_not_starve_the_rest() {
        let bus = EventBus::new();
        let log = Arc::new(Mutex::new(Vec::new()));
        bus.subscribe(Probe::new("first", &log));
        bus.subscribe(Probe::panicking("second", &log));
        bus.subscribe(Probe::new("third", &log));

        bus.publish(&Event::breach("x"));

        assert_eq!(*log.lock().unwrap(), vec!["first", "second", "third"]);

        // The panicking handler stays registered and delivery still works.
        bus.publish(&Event::breach("y"));
        assert_eq!(log.lock().unwrap().len(), 6);
    }

    #[test]
    fn same_handler_twice_receives_twice() {
        let bus = EventBus::new();
        let collector = Collector::new();
        bus.subscribe(collector.clone());
        bus.subscribe(collector.clone());

        bus.publish(&Event::breach("x"));

        assert_eq!(collector.len(), 2);
    }

    #[test]
    fn unsubscribe_stops_future_deliveries_only() {
        let bus = EventBus::new();
        let collector = Collector::new();
        let id = bus.subscribe(collector.clone());

        bus.publish(&Event::breach("before"));
        bus.unsubscribe(id);
        bus.publish(&Event::breach("after"));

        let events = collector.events();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].message(), "before");
    }

    #[test]
    fn unsubscribe_unknown_id_is_a_no_op() {
        let bus = EventBus::new();
        bus.subscribe(Collector::new());
        bus.unsubscribe(12345);
        assert_eq!(bus.handler_count(), 1);
    }

    #[test]
    fn unsubscribing_one_of_two_registrations_keeps_the_other() {
        let bus = EventBus::new();
        let collector = Collector::new();
        let first = bus.subscribe(collector.clone());
        let _second = bus.subscribe(collector.clone());

        bus.unsubscribe(first);
        bus.publish(&Event::breach("x"));

        assert_eq!(collector.len(), 1);
    }
}

use crate::Event;

/// Trait for consumers of published events.
///
/// Implement this for anything that should react to alerts: a logger, a
/// pager integration, a test collector. Handlers are invoked synchronously
/// by [`EventBus::publish`](crate::EventBus::publish) from whichever task is
/// publishing, so they must be `Send + Sync` and should return quickly.
///
/// A handler must not subscribe or unsubscribe from within `handle`; the
/// bus holds its registry lock across a delivery.
///
/// # Example
///
/// ```rust
/// use warden::{Event, EventHandler};
///
/// struct Stderr;
///
/// impl EventHandler for Stderr {
///     fn handle(&self, event: &Event) {
///         eprintln!("[{}] {}", event.kind(), event.message());
///     }
/// }
/// ```
pub trait EventHandler: Send + Sync {
    /// React to a single published event.
    fn handle(&self, event: &Event);
}

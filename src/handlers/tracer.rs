use crate::{Event, EventHandler, EventKind};

/// A handler that logs every published event to the `tracing` crate.
///
/// Log levels: breaches and missing resources at `warn`, monitoring
/// failures at `error`.
///
/// # Example
///
/// ```ignore
/// use warden::handlers::Tracer;
///
/// bus.subscribe(Tracer);
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct Tracer;

impl EventHandler for Tracer {
    fn handle(&self, event: &Event) {
        match event.kind() {
            EventKind::ThresholdBreach | EventKind::ResourceNotFound => {
                tracing::warn!(
                    event_id = %event.id(),
                    kind = %event.kind(),
                    "{}",
                    event.message()
                );
            }
            EventKind::MonitoringError => {
                tracing::error!(
                    event_id = %event.id(),
                    kind = %event.kind(),
                    "{}",
                    event.message()
                );
            }
        }
    }
}

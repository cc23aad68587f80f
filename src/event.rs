use std::{fmt, time::SystemTime};

use uuid::Uuid;

use crate::EventKind;

/// An immutable notification describing a breach, absence, or failure.
///
/// Events are created by monitors as a direct consequence of threshold
/// evaluation and travel through the [`EventBus`](crate::EventBus) to every
/// subscribed handler. The message is the human-readable payload; the
/// [`EventKind`] discriminator lets handlers route without parsing it.
///
/// # Panics
///
/// Constructors panic if the system clock is set before the Unix epoch.
#[derive(Debug, Clone)]
pub struct Event {
    id: Uuid,
    kind: EventKind,
    message: String,
    timestamp: u64,
}

impl Event {
    fn new(kind: EventKind, message: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            message,
            timestamp: SystemTime::now()
                .duration_since(SystemTime::UNIX_EPOCH)
                .expect("SystemTime before Unix epoch")
                .as_nanos() as u64,
        }
    }

    /// An observed metric value crossed its configured limit.
    pub fn breach(message: impl Into<String>) -> Self {
        Self::new(EventKind::ThresholdBreach, message.into())
    }

    /// A configured target matched no live resource instance.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(EventKind::ResourceNotFound, message.into())
    }

    /// Sampling or connecting to the resource failed.
    pub fn monitoring_error(message: impl Into<String>) -> Self {
        Self::new(EventKind::MonitoringError, message.into())
    }

    /// Unique identifier for this event.
    #[inline]
    pub fn id(&self) -> Uuid {
        self.id
    }

    #[inline]
    pub fn kind(&self) -> EventKind {
        self.kind
    }

    /// The human-readable message.
    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Creation time in nanoseconds since the Unix epoch.
    #[inline]
    pub fn timestamp(&self) -> u64 {
        self.timestamp
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors_set_kind() {
        assert_eq!(Event::breach("b").kind(), EventKind::ThresholdBreach);
        assert_eq!(Event::not_found("n").kind(), EventKind::ResourceNotFound);
        assert_eq!(Event::monitoring_error("e").kind(), EventKind::MonitoringError);
    }

    #[test]
    fn display_is_the_message() {
        let event = Event::breach("cpu over limit");
        assert_eq!(event.to_string(), "cpu over limit");
    }

    #[test]
    fn events_are_timestamped_and_unique() {
        let a = Event::breach("a");
        let b = Event::breach("b");
        assert!(a.timestamp() > 0);
        assert_ne!(a.id(), b.id());
    }
}

use std::fmt;

/// Category of a raised [`Event`](crate::Event).
///
/// There are exactly three emission paths in the system, one per variant:
/// a metric crossing its configured limit, a target matching no live
/// resource instance, and a sampling or connection failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// An observed metric value is strictly greater than its configured limit.
    ThresholdBreach,
    /// The target identity matched no live resource instance this poll.
    ResourceNotFound,
    /// Obtaining the sample itself failed (I/O, driver, connection).
    MonitoringError,
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventKind::ThresholdBreach => write!(f, "threshold breach"),
            EventKind::ResourceNotFound => write!(f, "resource not found"),
            EventKind::MonitoringError => write!(f, "monitoring error"),
        }
    }
}

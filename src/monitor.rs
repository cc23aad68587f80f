use std::{fmt, future::Future};

/// Connection lifecycle of a monitor.
///
/// Monitors that hold no real connection (process monitors) report
/// `Connected` while open. The `Connected -> Unconnected` edge is the
/// recovery action: a monitor that hit a query failure drops back to
/// `Unconnected` so the next poll reattempts connect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ConnectionState {
    #[default]
    Unconnected,
    Connected,
    Closed,
}

impl fmt::Display for ConnectionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConnectionState::Unconnected => write!(f, "unconnected"),
            ConnectionState::Connected => write!(f, "connected"),
            ConnectionState::Closed => write!(f, "closed"),
        }
    }
}

/// Capability trait for per-resource polling monitors.
///
/// A monitor samples exactly one resource kind and publishes zero or more
/// events per poll through the shared [`EventBus`](crate::EventBus). The
/// trait is intentionally tiny so the abstraction generalizes beyond
/// threshold checks to arbitrary per-poll reactive work (see
/// [`StreamMonitor`](crate::monitors::StreamMonitor)).
///
/// Error contract: `poll` and `close` are infallible at this boundary.
/// Sampling, connection, and release failures are absorbed inside the
/// monitor and published as monitoring-error events, so one failing
/// resource never halts monitoring of the others.
///
/// Methods return futures but can be implemented as `async fn` directly;
/// no `#[async_trait]` macro is required.
pub trait Monitor: Send {
    /// Sample the resource once and publish any resulting events.
    ///
    /// Safe to call repeatedly; polling a closed monitor is a no-op.
    fn poll(&mut self) -> impl Future<Output = ()> + Send;

    /// Release held resources.
    ///
    /// Idempotent. Errors during release surface as events, never as
    /// propagated faults.
    fn close(&mut self) -> impl Future<Output = ()> + Send;

    /// Current connection lifecycle state.
    fn state(&self) -> ConnectionState;
}

use std::{future::Future, sync::Arc};

use crate::{
    ConnectionState, Error, EventBus, MetricSample, Monitor, ResourceId, ResourceKind, Result,
    Thresholds, threshold, well_known::ACTIVE_SESSIONS,
};

/// Result rows from a database query.
///
/// A deliberately narrow, numeric-only view: the session monitor runs count
/// queries and only ever reads one scalar.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RowSet {
    rows: Vec<Vec<f64>>,
}

impl RowSet {
    pub fn new(rows: Vec<Vec<f64>>) -> Self {
        Self { rows }
    }

    /// First column of the first row, if any.
    pub fn scalar(&self) -> Option<f64> {
        self.rows.first().and_then(|row| row.first()).copied()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Narrow interface to a database driver.
///
/// The real client (connection pool, TLS, credentials) stays outside the
/// core; the monitor only needs connect, execute, and close.
pub trait DatabaseClient: Send {
    fn connect(&mut self) -> impl Future<Output = Result<()>> + Send;
    fn execute(&mut self, query: &str) -> impl Future<Output = Result<RowSet>> + Send;
    fn close(&mut self) -> impl Future<Output = Result<()>> + Send;
}

/// The one query this monitor runs.
pub const ACTIVE_SESSIONS_QUERY: &str =
    "SELECT COUNT(*) FROM v$session WHERE status = 'ACTIVE'";

/// Watches the count of active database sessions.
///
/// The connection is established lazily on the first poll and reattempted
/// after any failure: a query error drops the monitor back to
/// `Unconnected`, so the next poll reconnects. Connect, query, and close
/// failures all surface as monitoring-error events, never as faults.
pub struct DatabaseMonitor<C> {
    name: Arc<str>,
    thresholds: Thresholds,
    client: C,
    bus: Arc<EventBus>,
    state: ConnectionState,
}

impl<C: DatabaseClient> DatabaseMonitor<C> {
    /// `session_limit` is the configured active-session limit; `None`
    /// disables the check (the monitor still exercises the connection).
    pub fn new(name: &str, session_limit: Option<f64>, client: C, bus: Arc<EventBus>) -> Self {
        Self {
            name: Arc::from(name),
            thresholds: Thresholds::new().with(ACTIVE_SESSIONS, session_limit),
            client,
            bus,
            state: ConnectionState::Unconnected,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    fn target(&self) -> ResourceId {
        ResourceId::new(ResourceKind::Database, &self.name)
    }

    async fn ensure_connected(&mut self) -> Result<()> {
        if self.state != ConnectionState::Connected {
            self.client.connect().await?;
            self.state = ConnectionState::Connected;
            tracing::debug!(database = %self.name, "connected");
        }
        Ok(())
    }
}

impl<C: DatabaseClient> Monitor for DatabaseMonitor<C> {
    async fn poll(&mut self) {
        if self.state == ConnectionState::Closed {
            return;
        }

        if let Err(e) = self.ensure_connected().await {
            self.bus
                .publish(&threshold::monitoring_failure(&self.target(), &e));
            return;
        }

        let rows = match self.client.execute(ACTIVE_SESSIONS_QUERY).await {
            Ok(rows) => rows,
            Err(e) => {
                // Stale connection; reconnect on the next poll.
                self.state = ConnectionState::Unconnected;
                self.bus
                    .publish(&threshold::monitoring_failure(&self.target(), &e));
                return;
            }
        };

        let Some(active) = rows.scalar() else {
            let e = Error::query("active session count returned no rows");
            self.bus
                .publish(&threshold::monitoring_failure(&self.target(), &e));
            return;
        };

        let sample = MetricSample::new(self.target()).with_metric(ACTIVE_SESSIONS, active);
        for event in threshold::evaluate(&sample, &self.thresholds) {
            self.bus.publish(&event);
        }
        tracing::trace!(database = %self.name, active_sessions = active, "poll complete");
    }

    async fn close(&mut self) {
        if self.state == ConnectionState::Connected {
            if let Err(e) = self.client.close().await {
                self.bus
                    .publish(&threshold::monitoring_failure(&self.target(), &e));
            }
        }
        self.state = ConnectionState::Closed;
    }

    fn state(&self) -> ConnectionState {
        self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{EventKind, handlers::Collector};

    /// Scripted fake: one `Result<RowSet>` per expected execute call, plus
    /// call counters to assert on reconnect behavior.
    struct FakeDb {
        connect_results: Vec<Result<()>>,
        execute_results: Vec<Result<RowSet>>,
        connects: usize,
        closes: usize,
    }

    impl FakeDb {
        fn sessions(counts: Vec<Result<f64>>) -> Self {
            Self {
                connect_results: Vec::new(),
                execute_results: counts
                    .into_iter()
                    .map(|r| r.map(|n| RowSet::new(vec![vec![n]])))
                    .collect(),
                connects: 0,
                closes: 0,
            }
        }
    }

    impl DatabaseClient for FakeDb {
        async fn connect(&mut self) -> Result<()> {
            self.connects += 1;
            if self.connect_results.is_empty() {
                Ok(())
            } else {
                self.connect_results.remove(0)
            }
        }

        async fn execute(&mut self, _query: &str) -> Result<RowSet> {
            self.execute_results.remove(0)
        }

        async fn close(&mut self) -> Result<()> {
            self.closes += 1;
            Ok(())
        }
    }

    fn wired(client: FakeDb, limit: Option<f64>) -> (DatabaseMonitor<FakeDb>, Collector) {
        let bus = Arc::new(EventBus::new());
        let collector = Collector::new();
        bus.subscribe(collector.clone());
        let monitor = DatabaseMonitor::new("primary", limit, client, bus);
        (monitor, collector)
    }

    #[tokio::test]
    async fn session_count_over_limit_breaches_once() {
        let (mut monitor, collector) = wired(FakeDb::sessions(vec![Ok(150.0)]), Some(100.0));

        monitor.poll().await;

        let events = collector.events();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].kind(), EventKind::ThresholdBreach);
        assert_eq!(
            events[0].message(),
            "active_sessions of database 'primary' exceeds 100: 150.00"
        );
    }

    #[tokio::test]
    async fn session_count_at_limit_is_quiet() {
        let (mut monitor, collector) = wired(FakeDb::sessions(vec![Ok(100.0)]), Some(100.0));

        monitor.poll().await;

        assert!(collector.events().is_empty());
    }

    #[tokio::test]
    async fn disabled_limit_still_exercises_the_connection() {
        let (mut monitor, collector) = wired(FakeDb::sessions(vec![Ok(10_000.0)]), None);

        monitor.poll().await;

        assert!(collector.events().is_empty());
        assert_eq!(monitor.state(), ConnectionState::Connected);
    }

    #[tokio::test]
    async fn query_failure_reports_once_and_reconnects_next_poll() {
        let client = FakeDb::sessions(vec![
            Err(Error::query("ORA-03113: end-of-file on channel")),
            Ok(50.0),
        ]);
        let (mut monitor, collector) = wired(client, Some(100.0));

        monitor.poll().await;
        assert_eq!(monitor.state(), ConnectionState::Unconnected);

        let events = collector.events();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].kind(), EventKind::MonitoringError);
        assert!(events[0].message().contains("database 'primary'"));

        // Next poll reattempts connect and succeeds quietly.
        monitor.poll().await;
        assert_eq!(monitor.state(), ConnectionState::Connected);
        assert_eq!(collector.len(), 1);
        assert_eq!(monitor.client.connects, 2);
    }

    #[tokio::test]
    async fn connect_failure_becomes_an_event() {
        let mut client = FakeDb::sessions(Vec::new());
        client.connect_results = vec![Err(Error::connection("refused"))];
        let (mut monitor, collector) = wired(client, Some(100.0));

        monitor.poll().await;

        let events = collector.events();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].kind(), EventKind::MonitoringError);
        assert_eq!(monitor.state(), ConnectionState::Unconnected);
    }

    #[tokio::test]
    async fn empty_row_set_becomes_an_event() {
        let client = FakeDb {
            connect_results: Vec::new(),
            execute_results: vec![Ok(RowSet::default())],
            connects: 0,
            closes: 0,
        };
        let (mut monitor, collector) = wired(client, Some(100.0));

        monitor.poll().await;

        let events = collector.events();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].kind(), EventKind::MonitoringError);
    }

    #[tokio::test]
    async fn close_releases_the_connection_once() {
        let (mut monitor, collector) = wired(FakeDb::sessions(vec![Ok(10.0)]), Some(100.0));

        monitor.poll().await;
        monitor.close().await;
        monitor.close().await;

        assert_eq!(monitor.state(), ConnectionState::Closed);
        assert_eq!(monitor.client.closes, 1);
        assert!(collector.events().is_empty());

        // Polling after close is a no-op.
        monitor.poll().await;
        assert!(collector.events().is_empty());
    }

    #[tokio::test]
    async fn close_before_connect_never_touches_the_client() {
        let (mut monitor, _collector) = wired(FakeDb::sessions(Vec::new()), Some(100.0));

        monitor.close().await;

        assert_eq!(monitor.client.closes, 0);
        assert_eq!(monitor.state(), ConnectionState::Closed);
    }
}

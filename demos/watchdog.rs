//! End-to-end demo: a process monitor, a database session monitor, and a
//! stream intake monitor, all backed by in-memory fakes, publishing to a
//! shared bus with a tracing handler subscribed.
//!
//! Run with `cargo run --example watchdog`.

use std::{
    sync::{
        Arc,
        atomic::{AtomicU64, Ordering},
    },
    time::Duration,
};

use warden::{
    Config, EventBus, Result, Scheduler,
    handlers::Tracer,
    monitors::{
        DatabaseClient, DatabaseMonitor, ProcessInstance, ProcessMonitor, ProcessSource, RowSet,
        StreamClient, StreamMessage, StreamMonitor,
    },
};

const CONFIG: &str = r#"{
    "processes": [
        { "name": "worker", "memory_threshold_mb": 500, "cpu_threshold_percent": 80 },
        { "name": "ghost", "memory_threshold_mb": 100 }
    ],
    "stream": { "topic": "orders" },
    "database": { "host": "db1", "port": 1521, "user": "wd", "password": "secret" }
}"#;

/// Fake process table: "worker" has two instances, one of them over the
/// memory limit; any other name matches nothing.
struct ProcTable;

impl ProcessSource for ProcTable {
    async fn instances(&mut self, name: &str) -> Result<Vec<ProcessInstance>> {
        if name != "worker" {
            return Ok(Vec::new());
        }
        Ok(vec![
            ProcessInstance {
                pid: 100,
                memory_bytes: 300 * 1024 * 1024,
                cpu_percent: 12.0,
                threads: 8,
                handles: None,
            },
            ProcessInstance {
                pid: 200,
                memory_bytes: 612 * 1024 * 1024,
                cpu_percent: 35.0,
                threads: 8,
                handles: None,
            },
        ])
    }
}

/// Fake database whose active session count climbs past the limit.
struct SessionCounter {
    active: AtomicU64,
}

impl DatabaseClient for SessionCounter {
    async fn connect(&mut self) -> Result<()> {
        Ok(())
    }

    async fn execute(&mut self, _query: &str) -> Result<RowSet> {
        let active = self.active.fetch_add(30, Ordering::Relaxed);
        Ok(RowSet::new(vec![vec![active as f64]]))
    }

    async fn close(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Fake broker consumer that yields a message every other poll.
struct TopicFeed {
    polls: u64,
}

impl StreamClient for TopicFeed {
    async fn connect(&mut self) -> Result<()> {
        Ok(())
    }

    async fn poll(&mut self) -> Result<Option<StreamMessage>> {
        self.polls += 1;
        if self.polls % 2 == 0 {
            Ok(Some(StreamMessage::new(format!("order #{}", self.polls / 2))))
        } else {
            Ok(None)
        }
    }

    async fn close(&mut self) -> Result<()> {
        Ok(())
    }
}

#[tokio::main]
async fn main() -> Result {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,warden=debug".into()),
        )
        .init();

    let config = Config::from_json(CONFIG)?;

    let bus = Arc::new(EventBus::new());
    bus.subscribe(Tracer);

    let mut scheduler = Scheduler::new(bus.clone());

    for target in &config.processes {
        let monitor =
            ProcessMonitor::new(&target.name, target.thresholds(), ProcTable, bus.clone());
        scheduler.add_monitor(&target.name, monitor, Duration::from_millis(500));
    }

    let db = SessionCounter {
        active: AtomicU64::new(40),
    };
    scheduler.add_monitor(
        &config.database.host,
        DatabaseMonitor::new(
            &config.database.host,
            config.database.session_threshold,
            db,
            bus.clone(),
        ),
        Duration::from_millis(700),
    );

    scheduler.add_monitor(
        &config.stream.topic,
        StreamMonitor::new(
            &config.stream.topic,
            TopicFeed { polls: 0 },
            |message: &StreamMessage| {
                tracing::info!(payload = message.payload(), "processing message");
            },
            bus.clone(),
        ),
        Duration::from_millis(300),
    );

    scheduler.start();
    tokio::time::sleep(Duration::from_secs(3)).await;
    scheduler.stop().await;
    Ok(())
}

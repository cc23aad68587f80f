//! # Warden
//!
//! A threshold-driven resource watchdog with decoupled alert dispatch.
//!
//! Warden polls heterogeneous resources (OS processes, a database, a message
//! stream) on per-monitor intervals, evaluates each sample against configured
//! thresholds, and raises alert events through a publish/subscribe
//! [`EventBus`] so producers never know who consumes their alerts.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::{sync::Arc, time::Duration};
//!
//! use warden::{
//!     Config, EventBus, Result, Scheduler,
//!     handlers::Tracer,
//!     monitors::{ProcessInstance, ProcessMonitor, ProcessSource},
//! };
//!
//! // The real process table lives behind the ProcessSource seam.
//! struct ProcTable;
//!
//! impl ProcessSource for ProcTable {
//!     async fn instances(&mut self, _name: &str) -> Result<Vec<ProcessInstance>> {
//!         Ok(vec![ProcessInstance {
//!             pid: 4242,
//!             memory_bytes: 650 * 1024 * 1024,
//!             cpu_percent: 12.5,
//!             threads: 16,
//!             handles: None,
//!         }])
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() -> Result {
//!     let config = Config::from_file("monitoring.json")?;
//!
//!     let bus = Arc::new(EventBus::new());
//!     bus.subscribe(Tracer);
//!
//!     let mut scheduler = Scheduler::new(bus.clone());
//!     for target in &config.processes {
//!         let monitor =
//!             ProcessMonitor::new(&target.name, target.thresholds(), ProcTable, bus.clone());
//!         scheduler.add_monitor(&target.name, monitor, Duration::from_secs(5));
//!     }
//!
//!     scheduler.start();
//!     tokio::time::sleep(Duration::from_secs(30)).await;
//!     scheduler.stop().await;
//!     Ok(())
//! }
//! ```
//!
//! ## Core Types
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Event`] | Immutable notification describing a breach, absence, or failure |
//! | [`EventBus`] | Publish/subscribe dispatcher decoupling monitors from handlers |
//! | [`EventHandler`] | Trait for consumers of published events |
//! | [`Monitor`] | Trait for per-resource polling monitors (`poll`/`close`) |
//! | [`Thresholds`] | Declaration-ordered per-metric limits with first-class "unset" |
//! | [`MetricSample`] | One poll's observed metrics for a single resource instance |
//! | [`Scheduler`] | One Tokio task per monitor, shared bus, graceful shutdown |
//! | [`Config`] | JSON configuration for process, stream, and database targets |
//!
//! ## Error Model
//!
//! A single resource's failure is absorbed and reported, never propagated:
//! sampling and connection errors become [`EventKind::MonitoringError`]
//! events at the monitor boundary, a vanished target becomes
//! [`EventKind::ResourceNotFound`], and a crossed limit becomes
//! [`EventKind::ThresholdBreach`]. Only configuration errors return
//! [`Error`] to the caller, since they occur before monitoring starts.

mod bus;
mod config;
mod error;
mod event;
mod event_kind;
mod handler;
mod metric;
mod monitor;
mod resource;
mod sample;
mod scheduler;

pub mod handlers;
pub mod monitors;
pub mod threshold;

pub use bus::{EventBus, HandlerId};
pub use config::{Config, DatabaseTarget, ProcessTarget, StreamTarget};
pub use error::Error;
pub use event::Event;
pub use event_kind::EventKind;
pub use handler::EventHandler;
pub use metric::{MetricName, well_known};
pub use monitor::{ConnectionState, Monitor};
pub use resource::{ResourceId, ResourceKind};
pub use sample::MetricSample;
pub use scheduler::Scheduler;
pub use threshold::{Threshold, Thresholds, evaluate};

/// Convenience alias for `Result<T, warden::Error>`.
pub type Result<T = ()> = std::result::Result<T, Error>;

use std::{future::Future, sync::Arc};

use crate::{
    ConnectionState, EventBus, MetricSample, Monitor, ResourceId, ResourceKind, Result, Thresholds,
    threshold,
    well_known::{CPU_PERCENT, HANDLE_COUNT, MEMORY_MB, THREAD_COUNT},
};

/// One live OS process matching a monitored name.
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessInstance {
    pub pid: u32,
    /// Resident memory, in bytes.
    pub memory_bytes: u64,
    pub cpu_percent: f64,
    pub threads: u32,
    /// Open handle count; `None` on platforms that do not expose it.
    pub handles: Option<u32>,
}

/// Enumerates live process instances by name.
///
/// The real process table lives behind this seam; tests and demos plug in
/// fakes. Implementations should fail fast rather than block the poll loop.
pub trait ProcessSource: Send {
    fn instances(&mut self, name: &str) -> impl Future<Output = Result<Vec<ProcessInstance>>> + Send;
}

/// Polls every live instance of a named process and evaluates each one
/// against the configured thresholds.
///
/// Per poll: zero matching instances publish exactly one not-found event
/// (never one per configured threshold); an enumeration failure publishes
/// exactly one monitoring-error event; otherwise each instance is sampled
/// and evaluated independently, so two instances of the same name can
/// breach separately.
pub struct ProcessMonitor<S> {
    name: Arc<str>,
    thresholds: Thresholds,
    source: S,
    bus: Arc<EventBus>,
    state: ConnectionState,
}

impl<S: ProcessSource> ProcessMonitor<S> {
    pub fn new(name: &str, thresholds: Thresholds, source: S, bus: Arc<EventBus>) -> Self {
        Self {
            name: Arc::from(name),
            thresholds,
            source,
            bus,
            state: ConnectionState::Connected,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    fn target(&self) -> ResourceId {
        ResourceId::new(ResourceKind::Process, &self.name)
    }

    fn sample_for(&self, instance: &ProcessInstance) -> MetricSample {
        let resource = self.target().with_instance(u64::from(instance.pid));
        let mut sample = MetricSample::new(resource)
            .with_metric(MEMORY_MB, instance.memory_bytes as f64 / (1024.0 * 1024.0))
            .with_metric(CPU_PERCENT, instance.cpu_percent)
            .with_metric(THREAD_COUNT, f64::from(instance.threads));
        if let Some(handles) = instance.handles {
            sample.record(HANDLE_COUNT, f64::from(handles));
        }
        sample
    }
}

impl<S: ProcessSource> Monitor for ProcessMonitor<S> {
    async fn poll(&mut self) {
        if self.state == ConnectionState::Closed {
            return;
        }

        let instances = match self.source.instances(&self.name).await {
            Ok(instances) => instances,
            Err(e) => {
                self.bus
                    .publish(&threshold::monitoring_failure(&self.target(), &e));
                return;
            }
        };

        if instances.is_empty() {
            self.bus.publish(&threshold::not_found(&self.target()));
            return;
        }

        for instance in &instances {
            let sample = self.sample_for(instance);
            for event in threshold::evaluate(&sample, &self.thresholds) {
                self.bus.publish(&event);
            }
        }
        tracing::trace!(process = %self.name, instances = instances.len(), "poll complete");
    }

    async fn close(&mut self) {
        self.state = ConnectionState::Closed;
    }

    fn state(&self) -> ConnectionState {
        self.state
    }
}

use crate::{MetricName, ResourceId};

/// One poll's worth of observed metrics for a single resource instance.
///
/// The metric list is partial by design: a metric absent from a sample means
/// "not observed this poll", which is distinct from an observed value of
/// zero. Metrics keep their insertion order so evaluation is deterministic.
#[derive(Debug, Clone)]
pub struct MetricSample {
    resource: ResourceId,
    metrics: Vec<(MetricName, f64)>,
}

impl MetricSample {
    pub fn new(resource: ResourceId) -> Self {
        Self {
            resource,
            metrics: Vec::new(),
        }
    }

    /// Builder-style [`record`](Self::record).
    pub fn with_metric(mut self, name: impl Into<MetricName>, value: f64) -> Self {
        self.record(name, value);
        self
    }

    /// Record an observed value for a metric.
    pub fn record(&mut self, name: impl Into<MetricName>, value: f64) {
        self.metrics.push((name.into(), value));
    }

    /// The observed value for `name`, or `None` if it was not observed
    /// this poll.
    pub fn get(&self, name: &MetricName) -> Option<f64> {
        self.metrics
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| *v)
    }

    #[inline]
    pub fn resource(&self) -> &ResourceId {
        &self.resource
    }

    /// All observed metrics, in insertion order.
    pub fn metrics(&self) -> &[(MetricName, f64)] {
        &self.metrics
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ResourceKind, well_known};

    #[test]
    fn absent_metric_is_none_not_zero() {
        let sample = MetricSample::new(ResourceId::new(ResourceKind::Process, "worker"))
            .with_metric(well_known::CPU_PERCENT, 0.0);

        assert_eq!(sample.get(&well_known::CPU_PERCENT.into()), Some(0.0));
        assert_eq!(sample.get(&well_known::MEMORY_MB.into()), None);
    }

    #[test]
    fn metrics_keep_insertion_order() {
        let sample = MetricSample::new(ResourceId::new(ResourceKind::Process, "worker"))
            .with_metric("b", 2.0)
            .with_metric("a", 1.0);

        let names: Vec<_> = sample.metrics().iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, vec!["b", "a"]);
    }
}

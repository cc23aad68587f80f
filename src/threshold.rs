//! Threshold configuration and the evaluation core.
//!
//! [`evaluate`] is a pure function from one [`MetricSample`] and one
//! [`Thresholds`] configuration to a lazy sequence of breach events. The two
//! non-breach emission paths ([`not_found`], [`monitoring_failure`]) live
//! here as well so every event message is produced in one place.

use crate::{Error, Event, MetricName, MetricSample, ResourceId};

/// A configured limit for one metric.
///
/// The limit is a real tri-state: `Some(limit)` enables the check, `None`
/// disables it entirely. An unset limit is never conflated with zero.
#[derive(Debug, Clone)]
pub struct Threshold {
    metric: MetricName,
    limit: Option<f64>,
}

impl Threshold {
    pub fn new(metric: impl Into<MetricName>, limit: Option<f64>) -> Self {
        Self {
            metric: metric.into(),
            limit,
        }
    }

    #[inline]
    pub fn metric(&self) -> &MetricName {
        &self.metric
    }

    #[inline]
    pub fn limit(&self) -> Option<f64> {
        self.limit
    }

    /// Whether this threshold is actually checked.
    pub fn is_set(&self) -> bool {
        self.limit.is_some()
    }
}

/// Declaration-ordered threshold configuration for one resource target.
///
/// The order thresholds are added is the order they are checked, so when
/// several metrics breach on the same poll the resulting events appear in a
/// stable, reproducible order.
#[derive(Debug, Clone, Default)]
pub struct Thresholds(Vec<Threshold>);

impl Thresholds {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Append a threshold. `None` records the metric as explicitly unchecked.
    pub fn with(mut self, metric: impl Into<MetricName>, limit: Option<f64>) -> Self {
        self.push(Threshold::new(metric, limit));
        self
    }

    pub fn push(&mut self, threshold: Threshold) {
        self.0.push(threshold);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Threshold> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Evaluate one sample against a threshold configuration.
///
/// Lazy: yields one [`EventKind::ThresholdBreach`](crate::EventKind) event
/// per violated metric, in declaration order. A metric breaches when its
/// observed value is strictly greater than the limit; equality does not
/// fire. Unset limits and metrics not observed this poll are skipped
/// outright.
pub fn evaluate<'a>(
    sample: &'a MetricSample,
    thresholds: &'a Thresholds,
) -> impl Iterator<Item = Event> + 'a {
    thresholds.iter().filter_map(move |t| {
        let limit = t.limit()?;
        let observed = sample.get(t.metric())?;
        (observed > limit).then(|| breach(sample.resource(), t.metric(), limit, observed))
    })
}

fn breach(resource: &ResourceId, metric: &MetricName, limit: f64, observed: f64) -> Event {
    Event::breach(format!(
        "{metric} of {resource} exceeds {limit}: {observed:.2}"
    ))
}

/// Exactly one event for a target that matched no live instance this poll.
pub fn not_found(resource: &ResourceId) -> Event {
    Event::not_found(format!("{resource} not found"))
}

/// Exactly one event for a sampling or connection failure.
pub fn monitoring_failure(resource: &ResourceId, error: &Error) -> Event {
    Event::monitoring_error(format!("error monitoring {resource}: {error}"))
}

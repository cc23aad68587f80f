use std::{fmt, hash::Hash, sync::Arc};

/// Name of a sampled metric.
///
/// Cheap to clone and safe to use as a lookup key. Equality compares string
/// content with a fast path for names sharing the same allocation.
#[derive(Debug, Clone)]
pub struct MetricName(Arc<str>);

impl MetricName {
    pub fn new(name: &str) -> Self {
        Self(Arc::from(name))
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl PartialEq for MetricName {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0) || self.0 == other.0
    }
}

impl Eq for MetricName {}

impl Hash for MetricName {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.0.hash(state);
    }
}

impl fmt::Display for MetricName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for MetricName {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for MetricName {
    fn from(s: String) -> Self {
        Self(Arc::from(s))
    }
}

/// Well-known metric names used by the built-in monitors.
pub mod well_known {
    /// Resident memory, in megabytes.
    pub const MEMORY_MB: &str = "memory_mb";
    /// CPU utilization, in percent.
    pub const CPU_PERCENT: &str = "cpu_percent";
    /// Live thread count.
    pub const THREAD_COUNT: &str = "thread_count";
    /// Open handle count. Only sampled on platforms that expose it.
    pub const HANDLE_COUNT: &str = "handle_count";
    /// Active database sessions.
    pub const ACTIVE_SESSIONS: &str = "active_sessions";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equality_compares_content() {
        let a = MetricName::from("cpu_percent");
        let b = MetricName::from("cpu_percent");
        let c = a.clone();
        assert_eq!(a, b);
        assert_eq!(a, c);
        assert_ne!(a, MetricName::from("memory_mb"));
    }
}

use std::{fmt, sync::Arc};

/// Kind of monitored resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Process,
    Database,
    Stream,
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceKind::Process => write!(f, "process"),
            ResourceKind::Database => write!(f, "database"),
            ResourceKind::Stream => write!(f, "stream"),
        }
    }
}

/// Identity of one monitored resource instance.
///
/// Pairs the resource kind with its configured name and, where the kind has
/// multiple live instances (processes), the numeric instance id. Every
/// [`MetricSample`](crate::MetricSample) carries exactly one `ResourceId`,
/// so a sample can never mix identities.
///
/// Cheap to clone; the name is shared via `Arc<str>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResourceId {
    kind: ResourceKind,
    name: Arc<str>,
    instance: Option<u64>,
}

impl ResourceId {
    pub fn new(kind: ResourceKind, name: &str) -> Self {
        Self {
            kind,
            name: Arc::from(name),
            instance: None,
        }
    }

    /// Tag this identity with a numeric instance id (a pid, for processes).
    pub fn with_instance(mut self, instance: u64) -> Self {
        self.instance = Some(instance);
        self
    }

    #[inline]
    pub fn kind(&self) -> ResourceKind {
        self.kind
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn instance(&self) -> Option<u64> {
        self.instance
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} '{}'", self.kind, self.name)?;
        if let Some(instance) = self.instance {
            match self.kind {
                ResourceKind::Process => write!(f, " (pid {instance})")?,
                _ => write!(f, " (instance {instance})")?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_pid_for_processes() {
        let id = ResourceId::new(ResourceKind::Process, "worker").with_instance(42);
        assert_eq!(id.to_string(), "process 'worker' (pid 42)");
    }

    #[test]
    fn display_without_instance() {
        let id = ResourceId::new(ResourceKind::Database, "primary");
        assert_eq!(id.to_string(), "database 'primary'");
    }
}

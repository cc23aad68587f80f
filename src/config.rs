use std::path::Path;

use serde::Deserialize;

use crate::{
    Result, Thresholds,
    well_known::{CPU_PERCENT, HANDLE_COUNT, MEMORY_MB, THREAD_COUNT},
};

/// Top-level monitoring configuration.
///
/// Loaded from a JSON document with three sections: process targets, a
/// stream target, and a database target. A malformed document or a missing
/// required field is the one hard-failure path in the crate; it propagates
/// as [`Error`](crate::Error) before any monitor is constructed.
///
/// ```json
/// {
///   "processes": [
///     { "name": "worker", "memory_threshold_mb": 500, "cpu_threshold_percent": 80 }
///   ],
///   "stream": { "topic": "orders" },
///   "database": { "host": "db1", "port": 1521, "user": "wd", "password": "secret" }
/// }
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub processes: Vec<ProcessTarget>,
    pub stream: StreamTarget,
    pub database: DatabaseTarget,
}

/// One monitored process name with its per-metric limits.
///
/// A missing threshold field means "unset" (that metric is never checked),
/// not zero.
#[derive(Debug, Clone, Deserialize)]
pub struct ProcessTarget {
    pub name: String,
    #[serde(default)]
    pub memory_threshold_mb: Option<f64>,
    #[serde(default)]
    pub cpu_threshold_percent: Option<f64>,
    #[serde(default)]
    pub thread_threshold: Option<f64>,
    #[serde(default)]
    pub handle_threshold: Option<f64>,
}

impl ProcessTarget {
    /// Declaration-ordered thresholds: memory, cpu, threads, handles.
    ///
    /// The order fixes the order breach events appear in when several
    /// metrics cross their limits on the same poll.
    pub fn thresholds(&self) -> Thresholds {
        Thresholds::new()
            .with(MEMORY_MB, self.memory_threshold_mb)
            .with(CPU_PERCENT, self.cpu_threshold_percent)
            .with(THREAD_COUNT, self.thread_threshold)
            .with(HANDLE_COUNT, self.handle_threshold)
    }
}

/// The stream topic to watch.
#[derive(Debug, Clone, Deserialize)]
pub struct StreamTarget {
    pub topic: String,
}

fn default_session_threshold() -> Option<f64> {
    Some(100.0)
}

/// Connection coordinates and session limit for the monitored database.
///
/// `session_threshold` defaults to 100 active sessions when the field is
/// absent; an explicit `null` disables the check entirely.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseTarget {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    #[serde(default = "default_session_threshold")]
    pub session_threshold: Option<f64>,
}

impl Config {
    /// Parse a configuration document.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(Into::into)
    }

    /// Read and parse a configuration file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }
}

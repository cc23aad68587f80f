use std::sync::Arc;

/// The single error type for all warden operations.
///
/// Every fallible warden API returns `warden::Result<T>` (alias for
/// `Result<T, warden::Error>`). Note that most failures inside a running
/// monitor never surface here: sampling and connection problems are absorbed
/// at the monitor boundary and published as [`Event`](crate::Event)s instead.
/// Configuration errors are the exception and propagate hard, since they
/// occur before any monitor exists.
#[derive(Debug, Clone, thiserror::Error)]
pub enum Error {
    #[error("invalid configuration: {0}")]
    Config(#[source] Arc<serde_json::Error>),

    #[error("connection failed: {0}")]
    Connection(String),

    #[error("query failed: {0}")]
    Query(String),

    #[error("external error: {0}")]
    External(#[source] Arc<dyn std::error::Error + Send + Sync>),

    #[error("IO error: {0}")]
    Io(#[source] Arc<std::io::Error>),
}

impl Error {
    /// Wrap an error from an external data source (process table, database
    /// driver, stream client) so it can travel through `warden::Result`.
    pub fn external(e: impl std::error::Error + Send + Sync + 'static) -> Self {
        Error::External(Arc::new(e))
    }

    pub fn connection(msg: impl Into<String>) -> Self {
        Error::Connection(msg.into())
    }

    pub fn query(msg: impl Into<String>) -> Self {
        Error::Query(msg.into())
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::Io(Arc::new(e))
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Config(Arc::new(e))
    }
}

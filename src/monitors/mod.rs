//! Built-in monitors, one per resource kind.
//!
//! Each monitor is generic over a narrow data-source trait
//! ([`ProcessSource`], [`DatabaseClient`], [`StreamClient`]) so the real
//! process table, database driver, or broker client stays outside the core
//! and tests can substitute fakes.

mod database;
mod process;
mod stream;

pub use database::{ACTIVE_SESSIONS_QUERY, DatabaseClient, DatabaseMonitor, RowSet};
pub use process::{ProcessInstance, ProcessMonitor, ProcessSource};
pub use stream::{MessageProcessor, StreamClient, StreamMessage, StreamMonitor};

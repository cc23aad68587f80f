//! Reference event handlers.
//!
//! [`Tracer`] is the production default (structured logs); [`Collector`]
//! accumulates events so tests and tooling can assert on event flow.

mod collector;
mod tracer;

pub use collector::Collector;
pub use tracer::Tracer;

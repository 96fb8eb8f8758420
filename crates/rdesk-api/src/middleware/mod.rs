//! Request middleware: counters and tracing.

pub mod metrics;
pub mod tracing_layer;

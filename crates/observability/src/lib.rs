//! Observability glue for mercato services.

pub mod tracing;

pub use tracing::init;

//! Domain & integration event plumbing.
//!
//! Domain events are raised inside aggregates; this crate defines the
//! contract they satisfy plus the outbound side: a flattened integration
//! message and the sink it is published through.

pub mod event;
pub mod in_memory_sink;
pub mod sink;

pub use event::DomainEvent;
pub use in_memory_sink::{InMemorySink, InMemorySinkError};
pub use sink::{EventSink, OutboundMessage};

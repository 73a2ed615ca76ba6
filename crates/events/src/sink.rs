//! Outbound event dispatch abstraction (mechanics only).
//!
//! The sink is the **transport boundary** for integration events. It is
//! called strictly after a successful persistence commit; a publish failure
//! must never roll back the state change that produced the message, so
//! callers log and move on rather than propagate.
//!
//! Delivery guarantees (at-least-once, ordering, retries) belong to the
//! sink implementation, not to the domain.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// A fully-formed outbound message: flattened payload plus addressing.
///
/// The payload carries only primitive identifier values and scalars - no
/// internal value-object types cross this boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutboundMessage {
    pub topic: String,
    pub routing_key: String,
    pub payload: serde_json::Value,
}

impl OutboundMessage {
    pub fn new(
        topic: impl Into<String>,
        routing_key: impl Into<String>,
        payload: serde_json::Value,
    ) -> Self {
        Self {
            topic: topic.into(),
            routing_key: routing_key.into(),
            payload,
        }
    }
}

/// Transport-agnostic dispatch sink for outbound messages.
///
/// Implementations must be safe to share across threads; many requests may
/// publish concurrently.
pub trait EventSink: Send + Sync {
    type Error: core::fmt::Debug + Send + Sync + 'static;

    fn publish(&self, message: OutboundMessage) -> Result<(), Self::Error>;
}

impl<S> EventSink for Arc<S>
where
    S: EventSink + ?Sized,
{
    type Error = S::Error;

    fn publish(&self, message: OutboundMessage) -> Result<(), Self::Error> {
        (**self).publish(message)
    }
}

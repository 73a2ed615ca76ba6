//! In-memory dispatch sink for tests/dev.

use std::sync::Mutex;

use crate::sink::{EventSink, OutboundMessage};

#[derive(Debug)]
pub enum InMemorySinkError {
    /// Publish failed due to internal lock poisoning.
    Poisoned,
}

/// Records published messages in order.
///
/// - No IO / no async
/// - Tests assert against `published()`
#[derive(Debug, Default)]
pub struct InMemorySink {
    messages: Mutex<Vec<OutboundMessage>>,
}

impl InMemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything published so far, in publish order.
    pub fn published(&self) -> Vec<OutboundMessage> {
        self.messages
            .lock()
            .map(|m| m.clone())
            .unwrap_or_default()
    }
}

impl EventSink for InMemorySink {
    type Error = InMemorySinkError;

    fn publish(&self, message: OutboundMessage) -> Result<(), Self::Error> {
        let mut messages = self
            .messages
            .lock()
            .map_err(|_| InMemorySinkError::Poisoned)?;
        messages.push(message);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn publish_records_messages_in_order() {
        let sink = InMemorySink::new();
        sink.publish(OutboundMessage::new("t", "a", serde_json::json!({"n": 1})))
            .unwrap();
        sink.publish(OutboundMessage::new("t", "b", serde_json::json!({"n": 2})))
            .unwrap();

        let published = sink.published();
        assert_eq!(published.len(), 2);
        assert_eq!(published[0].routing_key, "a");
        assert_eq!(published[1].routing_key, "b");
    }
}

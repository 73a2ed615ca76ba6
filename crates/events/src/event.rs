use chrono::{DateTime, Utc};

use mercato_core::EventId;

/// A domain event raised by an aggregate.
///
/// Events are:
/// - **immutable** (treat them as facts)
/// - **uniquely identified** (one `EventId` per occurrence)
/// - **versioned** (schema evolution)
pub trait DomainEvent: Clone + core::fmt::Debug + Send + Sync + 'static {
    /// Stable event name/type identifier (e.g. "catalog.product.created").
    fn event_type(&self) -> &'static str;

    /// Unique identity of this occurrence.
    fn event_id(&self) -> EventId;

    /// Schema version for this event type.
    fn schema_version(&self) -> u32 {
        1
    }

    /// When the event occurred (business time, UTC).
    fn occurred_at(&self) -> DateTime<Utc>;
}

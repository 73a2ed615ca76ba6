//! Entity metadata and the aggregate-root interface.
//!
//! Aggregates embed [`EntityMeta`] (composition, no base-class emulation)
//! and expose it through the small [`AggregateRoot`] trait.

use chrono::{DateTime, Utc};

use crate::id::TenantId;

/// Identity + ownership + change-tracking metadata shared by every entity.
///
/// `updated_at` is persistence change-tracking metadata, not a concurrency
/// token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityMeta<Id> {
    id: Id,
    tenant_id: TenantId,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl<Id> EntityMeta<Id> {
    pub fn new(id: Id, tenant_id: TenantId, now: DateTime<Utc>) -> Self {
        Self {
            id,
            tenant_id,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn id(&self) -> &Id {
        &self.id
    }

    pub fn tenant_id(&self) -> TenantId {
        self.tenant_id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Stamp the "updated" marker. Every mutating aggregate operation calls this.
    pub fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = now;
    }
}

/// Aggregate root marker + minimal interface.
///
/// Mutation happens only through the aggregate's named operations; this
/// trait gives the orchestration layer read access to identity and to the
/// pending-event buffer.
pub trait AggregateRoot {
    /// Strongly-typed aggregate identifier.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    /// Domain events the aggregate can raise.
    type Event: Clone + core::fmt::Debug;

    /// Returns the aggregate identifier.
    fn id(&self) -> &Self::Id;

    /// Tenant that owns the aggregate.
    fn tenant_id(&self) -> TenantId;

    /// Change-tracking marker stamped by every mutating operation.
    fn updated_at(&self) -> DateTime<Utc>;

    /// Events raised since the last drain, in emission order.
    fn pending_events(&self) -> &[Self::Event];

    /// Drain the pending-event buffer.
    ///
    /// The orchestrating unit of work calls this exactly once, after a
    /// successful commit, and dispatches the drained events.
    fn take_events(&mut self) -> Vec<Self::Event>;
}

//! `mercato-core` — domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns).

pub mod clock;
pub mod entity;
pub mod error;
pub mod id;
pub mod value_object;

pub use clock::{Clock, FixedClock, IdGen, SequentialIdGen, SystemClock, UuidV7Gen};
pub use entity::{AggregateRoot, EntityMeta};
pub use error::{DomainError, DomainResult};
pub use id::{CategoryId, EventId, ProductId, ProductPriceId, ProductVariantId, TenantId};
pub use value_object::ValueObject;

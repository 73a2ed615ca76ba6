//! Strongly-typed identifiers used across the domain.
//!
//! Identifier kinds never coerce into one another; construction is explicit
//! and rejects the nil UUID.

use core::str::FromStr;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::clock::IdGen;
use crate::error::DomainError;

/// Identifier of a tenant (multi-tenant boundary).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TenantId(Uuid);

/// Identifier of a product aggregate.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(Uuid);

/// Identifier of a category aggregate.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryId(Uuid);

/// Identifier of a price entry owned by a product.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductPriceId(Uuid);

/// Identifier of a variant owned by a product.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductVariantId(Uuid);

/// Identifier of a domain event instance.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventId(Uuid);

macro_rules! impl_uuid_newtype {
    ($t:ty, $name:literal) => {
        impl $t {
            /// Mint a fresh identifier from the injected generator.
            pub fn generate(ids: &dyn IdGen) -> Self {
                Self(ids.next_id())
            }

            /// Build from an existing UUID; the nil UUID is rejected.
            pub fn from_uuid(uuid: Uuid) -> Result<Self, DomainError> {
                if uuid.is_nil() {
                    return Err(DomainError::invalid_id(concat!($name, " cannot be nil")));
                }
                Ok(Self(uuid))
            }

            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }
        }

        impl core::fmt::Display for $t {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                core::fmt::Display::fmt(&self.0, f)
            }
        }

        impl FromStr for $t {
            type Err = DomainError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let uuid = Uuid::from_str(s)
                    .map_err(|e| DomainError::invalid_id(format!("{}: {}", $name, e)))?;
                Self::from_uuid(uuid)
            }
        }
    };
}

impl_uuid_newtype!(TenantId, "TenantId");
impl_uuid_newtype!(ProductId, "ProductId");
impl_uuid_newtype!(CategoryId, "CategoryId");
impl_uuid_newtype!(ProductPriceId, "ProductPriceId");
impl_uuid_newtype!(ProductVariantId, "ProductVariantId");
impl_uuid_newtype!(EventId, "EventId");

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::SequentialIdGen;

    #[test]
    fn nil_uuid_is_rejected() {
        let err = ProductId::from_uuid(Uuid::nil()).unwrap_err();
        assert!(matches!(err, DomainError::InvalidId(_)));
    }

    #[test]
    fn nil_uuid_string_is_rejected() {
        let err = "00000000-0000-0000-0000-000000000000"
            .parse::<CategoryId>()
            .unwrap_err();
        assert!(matches!(err, DomainError::InvalidId(_)));
    }

    #[test]
    fn garbage_string_is_rejected() {
        let err = "not-a-uuid".parse::<TenantId>().unwrap_err();
        assert!(matches!(err, DomainError::InvalidId(_)));
    }

    #[test]
    fn equality_follows_underlying_value() {
        let uuid = Uuid::from_u128(42);
        let a = ProductId::from_uuid(uuid).unwrap();
        let b = ProductId::from_uuid(uuid).unwrap();
        assert_eq!(a, b);

        let other = ProductId::from_uuid(Uuid::from_u128(43)).unwrap();
        assert_ne!(a, other);
    }

    #[test]
    fn generated_identifiers_are_distinct() {
        let ids = SequentialIdGen::new();
        let a = ProductId::generate(&ids);
        let b = ProductId::generate(&ids);
        assert_ne!(a, b);
    }

    #[test]
    fn display_round_trips_through_from_str() {
        let ids = SequentialIdGen::new();
        let id = ProductVariantId::generate(&ids);
        let parsed: ProductVariantId = id.to_string().parse().unwrap();
        assert_eq!(id, parsed);
    }
}

//! Domain events raised by the catalog aggregates.
//!
//! One struct per event plus an enum per aggregate, following the
//! struct-per-fact convention. Events are immutable facts: they carry a
//! unique identity, a UTC business timestamp, and the identifiers involved.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use mercato_core::{CategoryId, EventId, ProductId, ProductVariantId, TenantId};
use mercato_events::DomainEvent;
use rust_decimal::Decimal;

/// Event: a product was created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductCreated {
    pub event_id: EventId,
    pub product_id: ProductId,
    pub tenant_id: TenantId,
    pub name: String,
    pub sku: String,
    pub category_id: CategoryId,
    pub occurred_at: DateTime<Utc>,
}

/// Event: product details (name/description/category) changed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductUpdated {
    pub event_id: EventId,
    pub product_id: ProductId,
    pub tenant_id: TenantId,
    pub occurred_at: DateTime<Utc>,
}

/// Event: a price was set for a currency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductPriceChanged {
    pub event_id: EventId,
    pub product_id: ProductId,
    pub tenant_id: TenantId,
    pub amount: Decimal,
    pub currency: String,
    pub occurred_at: DateTime<Utc>,
}

/// Event: stock quantity changed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductInventoryUpdated {
    pub event_id: EventId,
    pub product_id: ProductId,
    pub tenant_id: TenantId,
    pub old_quantity: i64,
    pub new_quantity: i64,
    pub occurred_at: DateTime<Utc>,
}

/// Event: stock dropped to or below the minimum level (but above zero).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductLowStock {
    pub event_id: EventId,
    pub product_id: ProductId,
    pub tenant_id: TenantId,
    pub current_quantity: i64,
    pub min_stock_level: i64,
    pub occurred_at: DateTime<Utc>,
}

/// Event: a variant was added to a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductVariantAdded {
    pub event_id: EventId,
    pub product_id: ProductId,
    pub tenant_id: TenantId,
    pub variant_id: ProductVariantId,
    pub variant_name: String,
    pub variant_sku: String,
    pub occurred_at: DateTime<Utc>,
}

/// Event: product was discontinued.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductDeactivated {
    pub event_id: EventId,
    pub product_id: ProductId,
    pub tenant_id: TenantId,
    pub occurred_at: DateTime<Utc>,
}

/// Event: a discontinued product was reactivated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductActivated {
    pub event_id: EventId,
    pub product_id: ProductId,
    pub tenant_id: TenantId,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProductEvent {
    Created(ProductCreated),
    Updated(ProductUpdated),
    PriceChanged(ProductPriceChanged),
    InventoryUpdated(ProductInventoryUpdated),
    LowStock(ProductLowStock),
    VariantAdded(ProductVariantAdded),
    Deactivated(ProductDeactivated),
    Activated(ProductActivated),
}

impl DomainEvent for ProductEvent {
    fn event_type(&self) -> &'static str {
        match self {
            ProductEvent::Created(_) => "catalog.product.created",
            ProductEvent::Updated(_) => "catalog.product.updated",
            ProductEvent::PriceChanged(_) => "catalog.product.price_changed",
            ProductEvent::InventoryUpdated(_) => "catalog.product.inventory_updated",
            ProductEvent::LowStock(_) => "catalog.product.low_stock",
            ProductEvent::VariantAdded(_) => "catalog.product.variant_added",
            ProductEvent::Deactivated(_) => "catalog.product.deactivated",
            ProductEvent::Activated(_) => "catalog.product.activated",
        }
    }

    fn event_id(&self) -> EventId {
        match self {
            ProductEvent::Created(e) => e.event_id,
            ProductEvent::Updated(e) => e.event_id,
            ProductEvent::PriceChanged(e) => e.event_id,
            ProductEvent::InventoryUpdated(e) => e.event_id,
            ProductEvent::LowStock(e) => e.event_id,
            ProductEvent::VariantAdded(e) => e.event_id,
            ProductEvent::Deactivated(e) => e.event_id,
            ProductEvent::Activated(e) => e.event_id,
        }
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            ProductEvent::Created(e) => e.occurred_at,
            ProductEvent::Updated(e) => e.occurred_at,
            ProductEvent::PriceChanged(e) => e.occurred_at,
            ProductEvent::InventoryUpdated(e) => e.occurred_at,
            ProductEvent::LowStock(e) => e.occurred_at,
            ProductEvent::VariantAdded(e) => e.occurred_at,
            ProductEvent::Deactivated(e) => e.occurred_at,
            ProductEvent::Activated(e) => e.occurred_at,
        }
    }
}

/// Event: a category was created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCreated {
    pub event_id: EventId,
    pub category_id: CategoryId,
    pub tenant_id: TenantId,
    pub name: String,
    pub parent_category_id: Option<CategoryId>,
    pub occurred_at: DateTime<Utc>,
}

/// Event: category details changed (raised unconditionally on update).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryUpdated {
    pub event_id: EventId,
    pub category_id: CategoryId,
    pub tenant_id: TenantId,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CategoryEvent {
    Created(CategoryCreated),
    Updated(CategoryUpdated),
}

impl DomainEvent for CategoryEvent {
    fn event_type(&self) -> &'static str {
        match self {
            CategoryEvent::Created(_) => "catalog.category.created",
            CategoryEvent::Updated(_) => "catalog.category.updated",
        }
    }

    fn event_id(&self) -> EventId {
        match self {
            CategoryEvent::Created(e) => e.event_id,
            CategoryEvent::Updated(e) => e.event_id,
        }
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            CategoryEvent::Created(e) => e.occurred_at,
            CategoryEvent::Updated(e) => e.occurred_at,
        }
    }
}

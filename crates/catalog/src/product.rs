//! Product aggregate root.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use mercato_core::{
    AggregateRoot, CategoryId, Clock, DomainError, DomainResult, EntityMeta, EventId, IdGen,
    ProductId, ProductPriceId, ProductVariantId, TenantId,
};

use crate::events::{
    ProductActivated, ProductCreated, ProductDeactivated, ProductEvent, ProductInventoryUpdated,
    ProductLowStock, ProductPriceChanged, ProductUpdated, ProductVariantAdded,
};
use crate::price::{self, ProductPrice};
use crate::variant::{normalize_sku, ProductVariant};

const NAME_MAX_LEN: usize = 255;
const DESCRIPTION_MAX_LEN: usize = 2000;

/// Product status lifecycle. Discontinuation is the terminal business
/// state; products are never physically deleted in-core.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductStatus {
    Active,
    Discontinued,
}

/// Aggregate root: Product.
///
/// Owns its price and variant collections exclusively; all mutation goes
/// through the named operations below. Either an operation fully applies
/// and raises its events, or it fails and leaves the aggregate untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    meta: EntityMeta<ProductId>,
    name: String,
    description: String,
    sku: String,
    category_id: CategoryId,
    status: ProductStatus,
    stock_quantity: i64,
    min_stock_level: i64,
    discontinued_at: Option<DateTime<Utc>>,
    prices: Vec<ProductPrice>,
    variants: Vec<ProductVariant>,
    pending_events: Vec<ProductEvent>,
}

impl Product {
    /// Factory: a new product starts Active with zero stock and no minimum
    /// level, and raises `ProductCreated`.
    ///
    /// SKU uniqueness per tenant is enforced by the persistence layer, and
    /// category existence by the orchestrating handler; neither is checked
    /// here.
    pub fn create(
        ids: &dyn IdGen,
        clock: &dyn Clock,
        tenant_id: TenantId,
        name: &str,
        description: &str,
        sku: &str,
        category_id: CategoryId,
    ) -> DomainResult<Self> {
        let name = validate_name(name)?;
        let description = validate_description(description)?;
        let sku = normalize_sku(sku)?;

        let id = ProductId::generate(ids);
        let now = clock.now();

        let mut product = Self {
            meta: EntityMeta::new(id, tenant_id, now),
            name: name.clone(),
            description,
            sku: sku.clone(),
            category_id,
            status: ProductStatus::Active,
            stock_quantity: 0,
            min_stock_level: 0,
            discontinued_at: None,
            prices: Vec::new(),
            variants: Vec::new(),
            pending_events: Vec::new(),
        };

        product.raise(ProductEvent::Created(ProductCreated {
            event_id: EventId::generate(ids),
            product_id: id,
            tenant_id,
            name,
            sku,
            category_id,
            occurred_at: now,
        }));

        Ok(product)
    }

    /// Change name/description/category. Raises `ProductUpdated` only when
    /// at least one field actually changed; a no-op update raises nothing,
    /// avoiding spurious downstream notifications.
    pub fn update_details(
        &mut self,
        ids: &dyn IdGen,
        clock: &dyn Clock,
        name: &str,
        description: &str,
        category_id: CategoryId,
    ) -> DomainResult<()> {
        let name = validate_name(name)?;
        let description = validate_description(description)?;

        let mut changed = false;

        if self.name != name {
            self.name = name;
            changed = true;
        }
        if self.description != description {
            self.description = description;
            changed = true;
        }
        if self.category_id != category_id {
            self.category_id = category_id;
            changed = true;
        }

        if changed {
            let now = clock.now();
            self.meta.touch(now);
            self.raise(ProductEvent::Updated(ProductUpdated {
                event_id: EventId::generate(ids),
                product_id: *self.meta.id(),
                tenant_id: self.meta.tenant_id(),
                occurred_at: now,
            }));
        }

        Ok(())
    }

    /// Set the price for one currency. An existing entry for the currency
    /// is updated in place (keeping its identity and effective window);
    /// otherwise a new entry is appended. Always raises
    /// `ProductPriceChanged` - setting a price is a meaningful event even
    /// when the amount is unchanged.
    pub fn set_price(
        &mut self,
        ids: &dyn IdGen,
        clock: &dyn Clock,
        amount: Decimal,
        currency: &str,
    ) -> DomainResult<()> {
        let currency = price::normalize_currency(currency)?;
        let now = clock.now();

        let amount = match self.prices.iter_mut().find(|p| p.currency() == currency) {
            Some(existing) => {
                existing.update_amount(amount)?;
                existing.amount()
            }
            None => {
                let entry = ProductPrice::new(ProductPriceId::generate(ids), amount, &currency, now)?;
                let amount = entry.amount();
                self.prices.push(entry);
                amount
            }
        };

        self.meta.touch(now);
        self.raise(ProductEvent::PriceChanged(ProductPriceChanged {
            event_id: EventId::generate(ids),
            product_id: *self.meta.id(),
            tenant_id: self.meta.tenant_id(),
            amount,
            currency,
            occurred_at: now,
        }));

        Ok(())
    }

    /// Replace the stock quantity. Always raises
    /// `ProductInventoryUpdated`; additionally raises `ProductLowStock`
    /// when the new quantity is at or below the minimum level but above
    /// zero. Zero stock is "out of stock", not "low stock".
    pub fn update_inventory(
        &mut self,
        ids: &dyn IdGen,
        clock: &dyn Clock,
        new_quantity: i64,
    ) -> DomainResult<()> {
        if new_quantity < 0 {
            return Err(DomainError::invalid_argument(
                "stock quantity cannot be negative",
            ));
        }

        let old_quantity = self.stock_quantity;
        self.stock_quantity = new_quantity;
        let now = clock.now();
        self.meta.touch(now);

        self.raise(ProductEvent::InventoryUpdated(ProductInventoryUpdated {
            event_id: EventId::generate(ids),
            product_id: *self.meta.id(),
            tenant_id: self.meta.tenant_id(),
            old_quantity,
            new_quantity,
            occurred_at: now,
        }));

        if new_quantity <= self.min_stock_level && new_quantity > 0 {
            self.raise(ProductEvent::LowStock(ProductLowStock {
                event_id: EventId::generate(ids),
                product_id: *self.meta.id(),
                tenant_id: self.meta.tenant_id(),
                current_quantity: new_quantity,
                min_stock_level: self.min_stock_level,
                occurred_at: now,
            }));
        }

        Ok(())
    }

    /// Set the low-stock threshold. Updates the marker only; no event.
    pub fn set_min_stock_level(&mut self, clock: &dyn Clock, min_level: i64) -> DomainResult<()> {
        if min_level < 0 {
            return Err(DomainError::invalid_argument(
                "minimum stock level cannot be negative",
            ));
        }

        self.min_stock_level = min_level;
        self.meta.touch(clock.now());
        Ok(())
    }

    /// Add a variant. Variant SKUs are unique (case-insensitive) within
    /// the product; a collision fails with `DuplicateVariant` and leaves
    /// the variant list unchanged.
    pub fn add_variant(
        &mut self,
        ids: &dyn IdGen,
        clock: &dyn Clock,
        name: &str,
        sku: &str,
        attributes: HashMap<String, String>,
    ) -> DomainResult<()> {
        let normalized = normalize_sku(sku)?;
        if self.variants.iter().any(|v| v.sku() == normalized) {
            return Err(DomainError::duplicate_variant(format!(
                "variant with SKU {normalized} already exists"
            )));
        }

        let variant = ProductVariant::new(ProductVariantId::generate(ids), name, sku, attributes)?;
        let now = clock.now();

        let event = ProductEvent::VariantAdded(ProductVariantAdded {
            event_id: EventId::generate(ids),
            product_id: *self.meta.id(),
            tenant_id: self.meta.tenant_id(),
            variant_id: variant.id(),
            variant_name: variant.name().to_string(),
            variant_sku: variant.sku().to_string(),
            occurred_at: now,
        });

        self.variants.push(variant);
        self.meta.touch(now);
        self.raise(event);

        Ok(())
    }

    /// Set the stock quantity of one variant, addressed by SKU. Variant
    /// stock is tracked per variant and raises no product-level events.
    pub fn update_variant_stock(
        &mut self,
        clock: &dyn Clock,
        sku: &str,
        quantity: i64,
    ) -> DomainResult<()> {
        self.find_variant_mut(sku)?.update_stock(quantity)?;
        self.meta.touch(clock.now());
        Ok(())
    }

    /// Replace a variant's attribute map.
    pub fn update_variant_attributes(
        &mut self,
        clock: &dyn Clock,
        sku: &str,
        attributes: HashMap<String, String>,
    ) -> DomainResult<()> {
        self.find_variant_mut(sku)?.update_attributes(attributes);
        self.meta.touch(clock.now());
        Ok(())
    }

    pub fn activate_variant(&mut self, clock: &dyn Clock, sku: &str) -> DomainResult<()> {
        self.find_variant_mut(sku)?.activate();
        self.meta.touch(clock.now());
        Ok(())
    }

    pub fn deactivate_variant(&mut self, clock: &dyn Clock, sku: &str) -> DomainResult<()> {
        self.find_variant_mut(sku)?.deactivate();
        self.meta.touch(clock.now());
        Ok(())
    }

    /// Set the validity window of the price entry for one currency.
    /// `to`, when present, must be strictly after `from`.
    pub fn set_price_effective_period(
        &mut self,
        clock: &dyn Clock,
        currency: &str,
        from: DateTime<Utc>,
        to: Option<DateTime<Utc>>,
    ) -> DomainResult<()> {
        let wanted = price::normalize_currency(currency)?;
        let entry = self
            .prices
            .iter_mut()
            .find(|p| p.currency() == wanted)
            .ok_or_else(|| {
                DomainError::invalid_argument(format!("no price set for currency {wanted}"))
            })?;
        entry.set_effective_period(from, to)?;
        self.meta.touch(clock.now());
        Ok(())
    }

    /// Discontinue the product. Fails if already discontinued.
    pub fn deactivate(&mut self, ids: &dyn IdGen, clock: &dyn Clock) -> DomainResult<()> {
        if self.status == ProductStatus::Discontinued {
            return Err(DomainError::invalid_state("product is already discontinued"));
        }

        let now = clock.now();
        self.status = ProductStatus::Discontinued;
        self.discontinued_at = Some(now);
        self.meta.touch(now);

        self.raise(ProductEvent::Deactivated(ProductDeactivated {
            event_id: EventId::generate(ids),
            product_id: *self.meta.id(),
            tenant_id: self.meta.tenant_id(),
            occurred_at: now,
        }));

        Ok(())
    }

    /// Reactivate a discontinued product. Silently a no-op (no event) when
    /// the product is already active.
    pub fn activate(&mut self, ids: &dyn IdGen, clock: &dyn Clock) -> DomainResult<()> {
        if self.status == ProductStatus::Active {
            return Ok(());
        }

        let now = clock.now();
        self.status = ProductStatus::Active;
        self.discontinued_at = None;
        self.meta.touch(now);

        self.raise(ProductEvent::Activated(ProductActivated {
            event_id: EventId::generate(ids),
            product_id: *self.meta.id(),
            tenant_id: self.meta.tenant_id(),
            occurred_at: now,
        }));

        Ok(())
    }

    pub fn is_in_stock(&self) -> bool {
        self.stock_quantity > 0
    }

    pub fn is_low_stock(&self) -> bool {
        self.stock_quantity <= self.min_stock_level && self.stock_quantity > 0
    }

    /// Amount for the given currency, or `None` when no price is set.
    pub fn get_price(&self, currency: &str) -> Option<Decimal> {
        let wanted = currency.trim().to_ascii_uppercase();
        self.prices
            .iter()
            .find(|p| p.currency() == wanted)
            .map(|p| p.amount())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn sku(&self) -> &str {
        &self.sku
    }

    pub fn category_id(&self) -> CategoryId {
        self.category_id
    }

    pub fn status(&self) -> ProductStatus {
        self.status
    }

    pub fn stock_quantity(&self) -> i64 {
        self.stock_quantity
    }

    pub fn min_stock_level(&self) -> i64 {
        self.min_stock_level
    }

    pub fn discontinued_at(&self) -> Option<DateTime<Utc>> {
        self.discontinued_at
    }

    pub fn prices(&self) -> &[ProductPrice] {
        &self.prices
    }

    pub fn variants(&self) -> &[ProductVariant] {
        &self.variants
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.meta.created_at()
    }

    fn raise(&mut self, event: ProductEvent) {
        self.pending_events.push(event);
    }

    fn find_variant_mut(&mut self, sku: &str) -> DomainResult<&mut ProductVariant> {
        let wanted = normalize_sku(sku)?;
        self.variants
            .iter_mut()
            .find(|v| v.sku() == wanted)
            .ok_or_else(|| {
                DomainError::invalid_argument(format!("no variant with SKU {wanted}"))
            })
    }
}

impl AggregateRoot for Product {
    type Id = ProductId;
    type Event = ProductEvent;

    fn id(&self) -> &ProductId {
        self.meta.id()
    }

    fn tenant_id(&self) -> TenantId {
        self.meta.tenant_id()
    }

    fn updated_at(&self) -> DateTime<Utc> {
        self.meta.updated_at()
    }

    fn pending_events(&self) -> &[ProductEvent] {
        &self.pending_events
    }

    fn take_events(&mut self) -> Vec<ProductEvent> {
        std::mem::take(&mut self.pending_events)
    }
}

fn validate_name(name: &str) -> DomainResult<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(DomainError::invalid_argument("product name cannot be empty"));
    }
    if trimmed.chars().count() > NAME_MAX_LEN {
        return Err(DomainError::invalid_argument(format!(
            "product name cannot exceed {NAME_MAX_LEN} characters"
        )));
    }
    Ok(trimmed.to_string())
}

fn validate_description(description: &str) -> DomainResult<String> {
    let trimmed = description.trim();
    if trimmed.chars().count() > DESCRIPTION_MAX_LEN {
        return Err(DomainError::invalid_argument(format!(
            "product description cannot exceed {DESCRIPTION_MAX_LEN} characters"
        )));
    }
    Ok(trimmed.to_string())
}

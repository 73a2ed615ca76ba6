//! Response shapes built from read-only aggregate projections.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use mercato_catalog::{Category, Product, ProductPrice, ProductStatus, ProductVariant};
use mercato_core::AggregateRoot;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductResponse {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub sku: String,
    pub category_id: Uuid,
    pub status: ProductStatus,
    pub stock_quantity: i64,
    pub min_stock_level: i64,
    pub prices: Vec<ProductPriceResponse>,
    pub variants: Vec<ProductVariantResponse>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductPriceResponse {
    pub id: Uuid,
    pub amount: Decimal,
    pub currency: String,
    pub effective_from: DateTime<Utc>,
    pub effective_to: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductVariantResponse {
    pub id: Uuid,
    pub name: String,
    pub sku: String,
    pub attributes: HashMap<String, String>,
    pub stock_quantity: i64,
    pub is_active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryResponse {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub slug: String,
    pub parent_category_id: Option<Uuid>,
    pub sort_order: i32,
    pub is_active: bool,
}

impl From<&Product> for ProductResponse {
    fn from(product: &Product) -> Self {
        Self {
            id: *AggregateRoot::id(product).as_uuid(),
            name: product.name().to_string(),
            description: product.description().to_string(),
            sku: product.sku().to_string(),
            category_id: *product.category_id().as_uuid(),
            status: product.status(),
            stock_quantity: product.stock_quantity(),
            min_stock_level: product.min_stock_level(),
            prices: product.prices().iter().map(ProductPriceResponse::from).collect(),
            variants: product.variants().iter().map(ProductVariantResponse::from).collect(),
            created_at: product.created_at(),
        }
    }
}

impl From<&ProductPrice> for ProductPriceResponse {
    fn from(price: &ProductPrice) -> Self {
        Self {
            id: *price.id().as_uuid(),
            amount: price.amount(),
            currency: price.currency().to_string(),
            effective_from: price.effective_from(),
            effective_to: price.effective_to(),
        }
    }
}

impl From<&ProductVariant> for ProductVariantResponse {
    fn from(variant: &ProductVariant) -> Self {
        Self {
            id: *variant.id().as_uuid(),
            name: variant.name().to_string(),
            sku: variant.sku().to_string(),
            attributes: variant.attributes().clone(),
            stock_quantity: variant.stock_quantity(),
            is_active: variant.is_active(),
        }
    }
}

impl From<&Category> for CategoryResponse {
    fn from(category: &Category) -> Self {
        Self {
            id: *AggregateRoot::id(category).as_uuid(),
            name: category.name().to_string(),
            description: category.description().to_string(),
            slug: category.slug().to_string(),
            parent_category_id: category.parent_category_id().map(|id| *id.as_uuid()),
            sort_order: category.sort_order(),
            is_active: category.is_active(),
        }
    }
}

//! Catalog domain module.
//!
//! This crate contains the business rules for products and categories,
//! implemented purely as deterministic domain logic (no IO, no HTTP, no
//! storage). Each aggregate is loaded, mutated through named operations,
//! and saved within a single request-scoped unit of work; domain events
//! accumulate on the aggregate and are drained after a successful commit.

pub mod category;
pub mod events;
pub mod integration;
pub mod price;
pub mod product;
pub mod slug;
pub mod variant;

pub use category::Category;
pub use events::{
    CategoryCreated, CategoryEvent, CategoryUpdated, ProductActivated, ProductCreated,
    ProductDeactivated, ProductEvent, ProductInventoryUpdated, ProductLowStock,
    ProductPriceChanged, ProductUpdated, ProductVariantAdded,
};
pub use integration::{translate_product_event, ProductInventoryUpdatedIntegration, INTEGRATION_TOPIC};
pub use price::ProductPrice;
pub use product::{Product, ProductStatus};
pub use slug::Slug;
pub use variant::ProductVariant;

//! Application orchestration for the catalog.
//!
//! Handlers load an aggregate, call its operations, persist through the
//! unit of work, and only then drain and dispatch the aggregate's domain
//! events. Every failure is folded into a single `(code, message)` value;
//! raw storage or transport errors never escape unwrapped.

pub mod commands;
pub mod dto;
pub mod error;
pub mod handlers;
pub mod repository;

pub use commands::{
    ActivateProduct, AddProductVariant, CreateCategory, CreateProduct, DeactivateProduct,
    SetCategoryParent, SetProductMinStockLevel, SetProductPrice, UpdateCategory, UpdateProduct,
    UpdateProductInventory,
};
pub use dto::{CategoryResponse, ProductPriceResponse, ProductResponse, ProductVariantResponse};
pub use error::AppError;
pub use handlers::CatalogService;
pub use repository::{
    CategoryRepository, InMemoryCatalogStore, ProductRepository, StoreError, UnitOfWork,
};

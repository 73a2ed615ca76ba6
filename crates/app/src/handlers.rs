//! Command handlers: load, mutate, persist, then dispatch.
//!
//! The ordering is the contract: aggregate events are drained only after
//! the unit of work commits, and a publish failure never rolls back the
//! committed state change - it is logged and left to out-of-band retry.

use std::sync::Arc;

use mercato_catalog::{
    translate_product_event, Category, CategoryEvent, Product, ProductEvent,
};
use mercato_core::{AggregateRoot, CategoryId, Clock, IdGen, ProductId, TenantId};
use mercato_events::{DomainEvent, EventSink};

use crate::commands::{
    ActivateProduct, AddProductVariant, CreateCategory, CreateProduct, DeactivateProduct,
    SetCategoryParent, SetProductMinStockLevel, SetProductPrice, UpdateCategory, UpdateProduct,
    UpdateProductInventory,
};
use crate::dto::{CategoryResponse, ProductResponse};
use crate::error::AppError;
use crate::repository::{CategoryRepository, ProductRepository, UnitOfWork};

/// Application service orchestrating the catalog aggregates.
///
/// Each handler runs within one request-scoped unit of work: the aggregate
/// is loaded fresh, mutated through its named operations, staged, and
/// committed. Cross-request races on the same aggregate are resolved by
/// the storage layer (last-writer-wins; no optimistic token is modeled).
pub struct CatalogService<S: EventSink> {
    products: Arc<dyn ProductRepository>,
    categories: Arc<dyn CategoryRepository>,
    uow: Arc<dyn UnitOfWork>,
    sink: S,
    ids: Arc<dyn IdGen>,
    clock: Arc<dyn Clock>,
}

impl<S: EventSink> CatalogService<S> {
    pub fn new(
        products: Arc<dyn ProductRepository>,
        categories: Arc<dyn CategoryRepository>,
        uow: Arc<dyn UnitOfWork>,
        sink: S,
        ids: Arc<dyn IdGen>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            products,
            categories,
            uow,
            sink,
            ids,
            clock,
        }
    }

    pub fn create_product(&self, cmd: CreateProduct) -> Result<ProductId, AppError> {
        if self.categories.get(cmd.tenant_id, cmd.category_id)?.is_none() {
            return Err(AppError::not_found("category"));
        }

        if self.products.get_by_sku(cmd.tenant_id, &cmd.sku)?.is_some() {
            return Err(AppError::new(
                "sku_exists",
                "product with this SKU already exists",
            ));
        }

        let mut product = Product::create(
            self.ids.as_ref(),
            self.clock.as_ref(),
            cmd.tenant_id,
            &cmd.name,
            &cmd.description,
            &cmd.sku,
            cmd.category_id,
        )?;
        product.set_price(self.ids.as_ref(), self.clock.as_ref(), cmd.price, &cmd.currency)?;
        product.update_inventory(self.ids.as_ref(), self.clock.as_ref(), cmd.stock_quantity)?;

        let id = *AggregateRoot::id(&product);
        self.products.save(&product)?;
        self.uow.commit()?;
        self.dispatch_product_events(product.take_events());

        tracing::info!(product_id = %id, sku = product.sku(), "product created");
        Ok(id)
    }

    pub fn update_product(&self, cmd: UpdateProduct) -> Result<(), AppError> {
        let mut product = self.load_product(cmd.tenant_id, cmd.product_id)?;

        if self.categories.get(cmd.tenant_id, cmd.category_id)?.is_none() {
            return Err(AppError::not_found("category"));
        }

        product.update_details(
            self.ids.as_ref(),
            self.clock.as_ref(),
            &cmd.name,
            &cmd.description,
            cmd.category_id,
        )?;

        self.products.save(&product)?;
        self.uow.commit()?;
        self.dispatch_product_events(product.take_events());
        Ok(())
    }

    pub fn set_product_price(&self, cmd: SetProductPrice) -> Result<(), AppError> {
        let mut product = self.load_product(cmd.tenant_id, cmd.product_id)?;
        product.set_price(self.ids.as_ref(), self.clock.as_ref(), cmd.price, &cmd.currency)?;

        self.products.save(&product)?;
        self.uow.commit()?;
        self.dispatch_product_events(product.take_events());
        Ok(())
    }

    pub fn update_product_inventory(&self, cmd: UpdateProductInventory) -> Result<(), AppError> {
        let mut product = self.load_product(cmd.tenant_id, cmd.product_id)?;
        product.update_inventory(self.ids.as_ref(), self.clock.as_ref(), cmd.quantity)?;

        self.products.save(&product)?;
        self.uow.commit()?;
        self.dispatch_product_events(product.take_events());
        Ok(())
    }

    pub fn set_product_min_stock_level(
        &self,
        cmd: SetProductMinStockLevel,
    ) -> Result<(), AppError> {
        let mut product = self.load_product(cmd.tenant_id, cmd.product_id)?;
        product.set_min_stock_level(self.clock.as_ref(), cmd.min_level)?;

        self.products.save(&product)?;
        self.uow.commit()?;
        self.dispatch_product_events(product.take_events());
        Ok(())
    }

    pub fn add_product_variant(&self, cmd: AddProductVariant) -> Result<(), AppError> {
        let mut product = self.load_product(cmd.tenant_id, cmd.product_id)?;
        product.add_variant(
            self.ids.as_ref(),
            self.clock.as_ref(),
            &cmd.name,
            &cmd.sku,
            cmd.attributes,
        )?;

        self.products.save(&product)?;
        self.uow.commit()?;
        self.dispatch_product_events(product.take_events());
        Ok(())
    }

    pub fn deactivate_product(&self, cmd: DeactivateProduct) -> Result<(), AppError> {
        let mut product = self.load_product(cmd.tenant_id, cmd.product_id)?;
        product.deactivate(self.ids.as_ref(), self.clock.as_ref())?;

        self.products.save(&product)?;
        self.uow.commit()?;
        self.dispatch_product_events(product.take_events());
        Ok(())
    }

    pub fn activate_product(&self, cmd: ActivateProduct) -> Result<(), AppError> {
        let mut product = self.load_product(cmd.tenant_id, cmd.product_id)?;
        product.activate(self.ids.as_ref(), self.clock.as_ref())?;

        self.products.save(&product)?;
        self.uow.commit()?;
        self.dispatch_product_events(product.take_events());
        Ok(())
    }

    pub fn get_product(
        &self,
        tenant_id: TenantId,
        product_id: ProductId,
    ) -> Result<ProductResponse, AppError> {
        let product = self.load_product(tenant_id, product_id)?;
        Ok(ProductResponse::from(&product))
    }

    pub fn create_category(&self, cmd: CreateCategory) -> Result<CategoryId, AppError> {
        if let Some(parent_id) = cmd.parent_category_id {
            if self.categories.get(cmd.tenant_id, parent_id)?.is_none() {
                return Err(AppError::new("parent_category.not_found", "parent category not found"));
            }
        }

        let mut category = Category::create(
            self.ids.as_ref(),
            self.clock.as_ref(),
            cmd.tenant_id,
            &cmd.name,
            &cmd.description,
            cmd.parent_category_id,
        )?;

        let id = *AggregateRoot::id(&category);
        self.categories.save(&category)?;
        self.uow.commit()?;
        self.dispatch_category_events(category.take_events());

        tracing::info!(category_id = %id, slug = %category.slug(), "category created");
        Ok(id)
    }

    pub fn update_category(&self, cmd: UpdateCategory) -> Result<(), AppError> {
        let mut category = self.load_category(cmd.tenant_id, cmd.category_id)?;
        category.update_details(
            self.ids.as_ref(),
            self.clock.as_ref(),
            &cmd.name,
            &cmd.description,
        )?;

        self.categories.save(&category)?;
        self.uow.commit()?;
        self.dispatch_category_events(category.take_events());
        Ok(())
    }

    pub fn set_category_parent(&self, cmd: SetCategoryParent) -> Result<(), AppError> {
        if let Some(parent_id) = cmd.parent_category_id {
            if parent_id != cmd.category_id
                && self.categories.get(cmd.tenant_id, parent_id)?.is_none()
            {
                return Err(AppError::new("parent_category.not_found", "parent category not found"));
            }
        }

        let mut category = self.load_category(cmd.tenant_id, cmd.category_id)?;
        category.set_parent(self.clock.as_ref(), cmd.parent_category_id)?;

        self.categories.save(&category)?;
        self.uow.commit()?;
        self.dispatch_category_events(category.take_events());
        Ok(())
    }

    pub fn get_category(
        &self,
        tenant_id: TenantId,
        category_id: CategoryId,
    ) -> Result<CategoryResponse, AppError> {
        let category = self.load_category(tenant_id, category_id)?;
        Ok(CategoryResponse::from(&category))
    }

    fn load_product(&self, tenant_id: TenantId, id: ProductId) -> Result<Product, AppError> {
        self.products
            .get(tenant_id, id)?
            .ok_or_else(|| AppError::not_found("product"))
    }

    fn load_category(&self, tenant_id: TenantId, id: CategoryId) -> Result<Category, AppError> {
        self.categories
            .get(tenant_id, id)?
            .ok_or_else(|| AppError::not_found("category"))
    }

    /// Runs strictly after a successful commit. Publish failures are
    /// reported through observability channels only.
    fn dispatch_product_events(&self, events: Vec<ProductEvent>) {
        for event in events {
            tracing::debug!(
                event_type = event.event_type(),
                event_id = %event.event_id(),
                "domain event committed"
            );
            if let Some(message) = translate_product_event(&event) {
                if let Err(err) = self.sink.publish(message) {
                    tracing::warn!(
                        ?err,
                        event_type = event.event_type(),
                        "integration event publish failed; committed state is unaffected"
                    );
                }
            }
        }
    }

    fn dispatch_category_events(&self, events: Vec<CategoryEvent>) {
        for event in events {
            tracing::debug!(
                event_type = event.event_type(),
                event_id = %event.event_id(),
                "domain event committed"
            );
        }
    }
}

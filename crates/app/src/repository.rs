//! Persistence collaborators at their interface boundary.
//!
//! The domain never sees SQL or transactions; it talks to these traits.
//! The in-memory implementation below backs tests and dev, staging writes
//! until `commit` so the save/commit/dispatch ordering is observable.

use std::collections::HashMap;
use std::sync::Mutex;

use thiserror::Error;

use mercato_catalog::{Category, Product};
use mercato_core::{AggregateRoot, CategoryId, ProductId, TenantId};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// Uniqueness violation surfaced at commit time (duplicate sku/slug per tenant).
    #[error("conflict: {0}")]
    Conflict(String),

    /// Backend failure (connection loss, poisoned lock, ...).
    #[error("storage failure: {0}")]
    Backend(String),
}

/// Product lookup and staging.
pub trait ProductRepository: Send + Sync {
    fn get(&self, tenant_id: TenantId, id: ProductId) -> Result<Option<Product>, StoreError>;

    /// Lookup by normalized SKU, used for pre-create uniqueness checks.
    fn get_by_sku(&self, tenant_id: TenantId, sku: &str) -> Result<Option<Product>, StoreError>;

    /// Stage the aggregate's state for the next commit.
    fn save(&self, product: &Product) -> Result<(), StoreError>;
}

/// Category lookup and staging.
pub trait CategoryRepository: Send + Sync {
    fn get(&self, tenant_id: TenantId, id: CategoryId) -> Result<Option<Category>, StoreError>;

    fn save(&self, category: &Category) -> Result<(), StoreError>;
}

/// Transactional boundary: persists all staged mutations atomically.
pub trait UnitOfWork: Send + Sync {
    /// Returns the number of affected records.
    fn commit(&self) -> Result<usize, StoreError>;
}

#[derive(Debug, Default)]
struct StoreInner {
    products: HashMap<(TenantId, ProductId), Product>,
    categories: HashMap<(TenantId, CategoryId), Category>,
    staged_products: Vec<Product>,
    staged_categories: Vec<Category>,
}

/// In-memory catalog store implementing all three collaborator traits.
///
/// Commit enforces the per-tenant unique constraints the reference schema
/// declares: product SKU and category slug.
#[derive(Debug, Default)]
pub struct InMemoryCatalogStore {
    inner: Mutex<StoreInner>,
}

impl InMemoryCatalogStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, StoreInner>, StoreError> {
        self.inner
            .lock()
            .map_err(|_| StoreError::Backend("store lock poisoned".into()))
    }
}

impl ProductRepository for InMemoryCatalogStore {
    fn get(&self, tenant_id: TenantId, id: ProductId) -> Result<Option<Product>, StoreError> {
        let inner = self.lock()?;
        Ok(inner.products.get(&(tenant_id, id)).cloned())
    }

    fn get_by_sku(&self, tenant_id: TenantId, sku: &str) -> Result<Option<Product>, StoreError> {
        let wanted = sku.trim().to_uppercase();
        let inner = self.lock()?;
        Ok(inner
            .products
            .values()
            .find(|p| p.tenant_id() == tenant_id && p.sku() == wanted)
            .cloned())
    }

    fn save(&self, product: &Product) -> Result<(), StoreError> {
        let mut inner = self.lock()?;
        // Pending events are never persisted; the handler drains them
        // from its own instance after commit.
        let mut snapshot = product.clone();
        snapshot.take_events();
        inner.staged_products.push(snapshot);
        Ok(())
    }
}

impl CategoryRepository for InMemoryCatalogStore {
    fn get(&self, tenant_id: TenantId, id: CategoryId) -> Result<Option<Category>, StoreError> {
        let inner = self.lock()?;
        Ok(inner.categories.get(&(tenant_id, id)).cloned())
    }

    fn save(&self, category: &Category) -> Result<(), StoreError> {
        let mut inner = self.lock()?;
        let mut snapshot = category.clone();
        snapshot.take_events();
        inner.staged_categories.push(snapshot);
        Ok(())
    }
}

impl UnitOfWork for InMemoryCatalogStore {
    fn commit(&self) -> Result<usize, StoreError> {
        let mut inner = self.lock()?;

        // Unique (tenant, sku) over committed products, excluding the row
        // being replaced.
        let sku_clash = inner
            .staged_products
            .iter()
            .find(|staged| {
                inner.products.values().any(|existing| {
                    existing.tenant_id() == staged.tenant_id()
                        && existing.sku() == staged.sku()
                        && AggregateRoot::id(existing) != AggregateRoot::id(*staged)
                })
            })
            .map(|staged| staged.sku().to_string());
        if let Some(sku) = sku_clash {
            inner.staged_products.clear();
            inner.staged_categories.clear();
            return Err(StoreError::Conflict(format!(
                "product SKU {sku} already exists for tenant"
            )));
        }

        // Unique (tenant, slug) over committed categories.
        let slug_clash = inner
            .staged_categories
            .iter()
            .find(|staged| {
                inner.categories.values().any(|existing| {
                    existing.tenant_id() == staged.tenant_id()
                        && existing.slug() == staged.slug()
                        && AggregateRoot::id(existing) != AggregateRoot::id(*staged)
                })
            })
            .map(|staged| staged.slug().to_string());
        if let Some(slug) = slug_clash {
            inner.staged_products.clear();
            inner.staged_categories.clear();
            return Err(StoreError::Conflict(format!(
                "category slug {slug} already exists for tenant"
            )));
        }

        let affected = inner.staged_products.len() + inner.staged_categories.len();

        let staged_products = std::mem::take(&mut inner.staged_products);
        for product in staged_products {
            let key = (product.tenant_id(), *AggregateRoot::id(&product));
            inner.products.insert(key, product);
        }

        let staged_categories = std::mem::take(&mut inner.staged_categories);
        for category in staged_categories {
            let key = (category.tenant_id(), *AggregateRoot::id(&category));
            inner.categories.insert(key, category);
        }

        Ok(affected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mercato_core::{FixedClock, SequentialIdGen};
    use uuid::Uuid;

    fn tenant() -> TenantId {
        TenantId::from_uuid(Uuid::from_u128(7)).unwrap()
    }

    fn other_tenant() -> TenantId {
        TenantId::from_uuid(Uuid::from_u128(8)).unwrap()
    }

    fn category_id() -> CategoryId {
        CategoryId::from_uuid(Uuid::from_u128(9)).unwrap()
    }

    fn product(ids: &SequentialIdGen, tenant_id: TenantId, sku: &str) -> Product {
        let clock = FixedClock::epoch_2024();
        Product::create(ids, &clock, tenant_id, "Widget", "", sku, category_id()).unwrap()
    }

    #[test]
    fn save_is_invisible_until_commit() {
        let ids = SequentialIdGen::new();
        let store = InMemoryCatalogStore::new();
        let p = product(&ids, tenant(), "WID-1");
        let id = *AggregateRoot::id(&p);

        ProductRepository::save(&store, &p).unwrap();
        assert!(ProductRepository::get(&store, tenant(),id).unwrap().is_none());

        assert_eq!(store.commit().unwrap(), 1);
        assert!(ProductRepository::get(&store, tenant(),id).unwrap().is_some());
    }

    #[test]
    fn loaded_aggregates_carry_no_pending_events() {
        let ids = SequentialIdGen::new();
        let store = InMemoryCatalogStore::new();
        let p = product(&ids, tenant(), "WID-1");
        let id = *AggregateRoot::id(&p);

        ProductRepository::save(&store, &p).unwrap();
        store.commit().unwrap();

        let loaded = ProductRepository::get(&store, tenant(),id).unwrap().unwrap();
        assert!(loaded.pending_events().is_empty());
    }

    #[test]
    fn duplicate_sku_for_same_tenant_conflicts_at_commit() {
        let ids = SequentialIdGen::new();
        let store = InMemoryCatalogStore::new();
        ProductRepository::save(&store, &product(&ids, tenant(), "WID-1")).unwrap();
        store.commit().unwrap();

        ProductRepository::save(&store, &product(&ids, tenant(), "wid-1 ")).unwrap();
        let err = store.commit().unwrap_err();
        assert!(matches!(err, StoreError::Conflict(_)));
    }

    #[test]
    fn same_sku_for_different_tenants_is_allowed() {
        let ids = SequentialIdGen::new();
        let store = InMemoryCatalogStore::new();
        ProductRepository::save(&store, &product(&ids, tenant(), "WID-1")).unwrap();
        store.commit().unwrap();

        ProductRepository::save(&store, &product(&ids, other_tenant(), "WID-1")).unwrap();
        assert_eq!(store.commit().unwrap(), 1);
    }

    #[test]
    fn resaving_the_same_product_is_an_update_not_a_conflict() {
        let ids = SequentialIdGen::new();
        let clock = FixedClock::epoch_2024();
        let store = InMemoryCatalogStore::new();
        let mut p = product(&ids, tenant(), "WID-1");
        ProductRepository::save(&store, &p).unwrap();
        store.commit().unwrap();

        p.update_inventory(&ids, &clock, 5).unwrap();
        ProductRepository::save(&store, &p).unwrap();
        assert_eq!(store.commit().unwrap(), 1);

        let loaded = ProductRepository::get(&store, tenant(),*AggregateRoot::id(&p)).unwrap().unwrap();
        assert_eq!(loaded.stock_quantity(), 5);
    }

    #[test]
    fn duplicate_slug_for_same_tenant_conflicts_at_commit() {
        let ids = SequentialIdGen::new();
        let clock = FixedClock::epoch_2024();
        let store = InMemoryCatalogStore::new();

        let a = Category::create(&ids, &clock, tenant(), "Home & Garden", "", None).unwrap();
        CategoryRepository::save(&store, &a).unwrap();
        store.commit().unwrap();

        // Distinct name, same derived slug.
        let b = Category::create(&ids, &clock, tenant(), "home and garden", "", None).unwrap();
        CategoryRepository::save(&store, &b).unwrap();
        let err = store.commit().unwrap_err();
        assert!(matches!(err, StoreError::Conflict(_)));
    }

    #[test]
    fn get_by_sku_normalizes_the_lookup() {
        let ids = SequentialIdGen::new();
        let store = InMemoryCatalogStore::new();
        ProductRepository::save(&store, &product(&ids, tenant(), "WID-1")).unwrap();
        store.commit().unwrap();

        assert!(store.get_by_sku(tenant(), " wid-1 ").unwrap().is_some());
        assert!(store.get_by_sku(other_tenant(), "WID-1").unwrap().is_none());
    }
}

//! Category aggregate root.

use chrono::{DateTime, Utc};

use mercato_core::{
    AggregateRoot, CategoryId, Clock, DomainError, DomainResult, EntityMeta, EventId, IdGen,
    TenantId,
};

use crate::events::{CategoryCreated, CategoryEvent, CategoryUpdated};
use crate::slug::Slug;

/// Aggregate root: Category.
///
/// Categories form a tree via `parent_category_id`. Only immediate
/// self-parenting is rejected in-core; deeper cycles are not checked here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    meta: EntityMeta<CategoryId>,
    name: String,
    description: String,
    slug: Slug,
    parent_category_id: Option<CategoryId>,
    sort_order: i32,
    is_active: bool,
    pending_events: Vec<CategoryEvent>,
}

impl Category {
    /// Factory: derives the slug from the name and raises `CategoryCreated`.
    ///
    /// Parent existence is checked by the orchestrating handler; slug
    /// uniqueness per tenant is a persistence-layer constraint surfaced at
    /// commit time.
    pub fn create(
        ids: &dyn IdGen,
        clock: &dyn Clock,
        tenant_id: TenantId,
        name: &str,
        description: &str,
        parent_category_id: Option<CategoryId>,
    ) -> DomainResult<Self> {
        let name = validate_name(name)?;
        let slug = Slug::from_name(&name);

        let id = CategoryId::generate(ids);
        let now = clock.now();

        let mut category = Self {
            meta: EntityMeta::new(id, tenant_id, now),
            name: name.clone(),
            description: description.trim().to_string(),
            slug,
            parent_category_id,
            sort_order: 0,
            is_active: true,
            pending_events: Vec::new(),
        };

        category.raise(CategoryEvent::Created(CategoryCreated {
            event_id: EventId::generate(ids),
            category_id: id,
            tenant_id,
            name,
            parent_category_id,
            occurred_at: now,
        }));

        Ok(category)
    }

    /// Change name/description. The slug is recomputed from the new name
    /// and `CategoryUpdated` is raised unconditionally - unlike
    /// `Product::update_details`, there is no change-detection gate here.
    pub fn update_details(
        &mut self,
        ids: &dyn IdGen,
        clock: &dyn Clock,
        name: &str,
        description: &str,
    ) -> DomainResult<()> {
        let name = validate_name(name)?;

        self.slug = Slug::from_name(&name);
        self.name = name;
        self.description = description.trim().to_string();

        let now = clock.now();
        self.meta.touch(now);
        self.raise(CategoryEvent::Updated(CategoryUpdated {
            event_id: EventId::generate(ids),
            category_id: *self.meta.id(),
            tenant_id: self.meta.tenant_id(),
            occurred_at: now,
        }));

        Ok(())
    }

    /// Re-parent the category. A category cannot be its own parent; deeper
    /// cycles are the caller's concern.
    pub fn set_parent(
        &mut self,
        clock: &dyn Clock,
        parent_category_id: Option<CategoryId>,
    ) -> DomainResult<()> {
        if parent_category_id == Some(*self.meta.id()) {
            return Err(DomainError::invalid_state("category cannot be its own parent"));
        }

        self.parent_category_id = parent_category_id;
        self.meta.touch(clock.now());
        Ok(())
    }

    pub fn set_sort_order(&mut self, clock: &dyn Clock, sort_order: i32) {
        self.sort_order = sort_order;
        self.meta.touch(clock.now());
    }

    pub fn activate(&mut self, clock: &dyn Clock) {
        self.is_active = true;
        self.meta.touch(clock.now());
    }

    pub fn deactivate(&mut self, clock: &dyn Clock) {
        self.is_active = false;
        self.meta.touch(clock.now());
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn slug(&self) -> &Slug {
        &self.slug
    }

    pub fn parent_category_id(&self) -> Option<CategoryId> {
        self.parent_category_id
    }

    pub fn sort_order(&self) -> i32 {
        self.sort_order
    }

    pub fn is_active(&self) -> bool {
        self.is_active
    }

    fn raise(&mut self, event: CategoryEvent) {
        self.pending_events.push(event);
    }
}

impl AggregateRoot for Category {
    type Id = CategoryId;
    type Event = CategoryEvent;

    fn id(&self) -> &CategoryId {
        self.meta.id()
    }

    fn tenant_id(&self) -> TenantId {
        self.meta.tenant_id()
    }

    fn updated_at(&self) -> DateTime<Utc> {
        self.meta.updated_at()
    }

    fn pending_events(&self) -> &[CategoryEvent] {
        &self.pending_events
    }

    fn take_events(&mut self) -> Vec<CategoryEvent> {
        std::mem::take(&mut self.pending_events)
    }
}

fn validate_name(name: &str) -> DomainResult<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(DomainError::invalid_argument("category name cannot be empty"));
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use mercato_core::{FixedClock, SequentialIdGen};

    fn tenant() -> TenantId {
        TenantId::from_uuid(uuid::Uuid::from_u128(7)).unwrap()
    }

    fn sample_category(ids: &SequentialIdGen, clock: &FixedClock) -> Category {
        Category::create(ids, clock, tenant(), "Electronics", "Gadgets", None).unwrap()
    }

    #[test]
    fn create_derives_slug_and_raises_category_created() {
        let ids = SequentialIdGen::new();
        let clock = FixedClock::epoch_2024();

        let category =
            Category::create(&ids, &clock, tenant(), "Home & Garden", "", None).unwrap();

        assert_eq!(category.slug().as_str(), "home-and-garden");
        assert_eq!(category.sort_order(), 0);
        assert!(category.is_active());
        assert_eq!(category.pending_events().len(), 1);
        match &category.pending_events()[0] {
            CategoryEvent::Created(e) => {
                assert_eq!(e.name, "Home & Garden");
                assert_eq!(e.parent_category_id, None);
            }
            other => panic!("expected CategoryCreated, got {other:?}"),
        }
    }

    #[test]
    fn create_rejects_empty_name() {
        let ids = SequentialIdGen::new();
        let clock = FixedClock::epoch_2024();

        let err = Category::create(&ids, &clock, tenant(), "   ", "", None).unwrap_err();
        assert!(matches!(err, DomainError::InvalidArgument(_)));
    }

    #[test]
    fn update_details_recomputes_slug_and_always_raises() {
        let ids = SequentialIdGen::new();
        let clock = FixedClock::epoch_2024();
        let mut category = sample_category(&ids, &clock);
        category.take_events();

        // Identical values still raise: no change-detection gate on categories.
        category.update_details(&ids, &clock, "Electronics", "Gadgets").unwrap();
        assert_eq!(category.pending_events().len(), 1);
        assert!(matches!(category.pending_events()[0], CategoryEvent::Updated(_)));

        category.update_details(&ids, &clock, "Toys & Games", "Gadgets").unwrap();
        assert_eq!(category.slug().as_str(), "toys-and-games");
        assert_eq!(category.pending_events().len(), 2);
    }

    #[test]
    fn update_details_rejects_empty_name() {
        let ids = SequentialIdGen::new();
        let clock = FixedClock::epoch_2024();
        let mut category = sample_category(&ids, &clock);
        category.take_events();

        let err = category.update_details(&ids, &clock, "", "desc").unwrap_err();

        assert!(matches!(err, DomainError::InvalidArgument(_)));
        assert_eq!(category.name(), "Electronics");
        assert!(category.pending_events().is_empty());
    }

    #[test]
    fn set_parent_rejects_self_reference() {
        let ids = SequentialIdGen::new();
        let clock = FixedClock::epoch_2024();
        let mut category = sample_category(&ids, &clock);
        let own_id = *AggregateRoot::id(&category);

        let err = category.set_parent(&clock, Some(own_id)).unwrap_err();

        assert!(matches!(err, DomainError::InvalidState(_)));
        assert_eq!(category.parent_category_id(), None);
    }

    #[test]
    fn set_parent_accepts_another_category_and_none() {
        let ids = SequentialIdGen::new();
        let clock = FixedClock::epoch_2024();
        let mut category = sample_category(&ids, &clock);
        let parent = CategoryId::generate(&ids);

        category.set_parent(&clock, Some(parent)).unwrap();
        assert_eq!(category.parent_category_id(), Some(parent));

        category.set_parent(&clock, None).unwrap();
        assert_eq!(category.parent_category_id(), None);
    }

    #[test]
    fn sort_order_and_active_flags_raise_no_events() {
        let ids = SequentialIdGen::new();
        let clock = FixedClock::epoch_2024();
        let mut category = sample_category(&ids, &clock);
        category.take_events();

        category.set_sort_order(&clock, 5);
        category.deactivate(&clock);
        category.activate(&clock);

        assert_eq!(category.sort_order(), 5);
        assert!(category.is_active());
        assert!(category.pending_events().is_empty());
    }
}

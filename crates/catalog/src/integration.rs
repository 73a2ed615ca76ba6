//! Domain-event → integration-event translation.
//!
//! Translation runs strictly after a successful save: one domain event of
//! interest becomes exactly one outbound message with a flattened, stable
//! payload (primitive identifier values and scalars only). Currently only
//! `ProductInventoryUpdated` is wired; the one-event → one-(topic, key)
//! mapping generalizes to any other event a deployment chooses to publish.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use mercato_events::OutboundMessage;

use crate::events::ProductEvent;

/// Topic every catalog integration event is published to.
pub const INTEGRATION_TOPIC: &str = "integration.events";

const INVENTORY_UPDATED_KEY: &str = "product.inventory.updated";

/// Outbound schema for an inventory update. Field layout is stable; treat
/// changes as schema evolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductInventoryUpdatedIntegration {
    pub product_id: Uuid,
    pub tenant_id: Uuid,
    pub old_quantity: i64,
    pub new_quantity: i64,
}

/// Map a product domain event to its outbound message, if any.
///
/// Returns `None` for events with no integration counterpart.
pub fn translate_product_event(event: &ProductEvent) -> Option<OutboundMessage> {
    match event {
        ProductEvent::InventoryUpdated(e) => {
            let payload = ProductInventoryUpdatedIntegration {
                product_id: *e.product_id.as_uuid(),
                tenant_id: *e.tenant_id.as_uuid(),
                old_quantity: e.old_quantity,
                new_quantity: e.new_quantity,
            };
            // Serialization of a plain struct with primitive fields cannot fail.
            let payload = serde_json::to_value(payload).ok()?;
            Some(OutboundMessage::new(
                INTEGRATION_TOPIC,
                INVENTORY_UPDATED_KEY,
                payload,
            ))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::product::Product;
    use mercato_core::{AggregateRoot, CategoryId, FixedClock, SequentialIdGen, TenantId};

    fn sample_product(ids: &SequentialIdGen, clock: &FixedClock) -> Product {
        let tenant = TenantId::from_uuid(Uuid::from_u128(7)).unwrap();
        let category = CategoryId::from_uuid(Uuid::from_u128(9)).unwrap();
        Product::create(ids, clock, tenant, "Widget", "", "WID-1", category).unwrap()
    }

    #[test]
    fn inventory_updated_translates_to_flattened_message() {
        let ids = SequentialIdGen::new();
        let clock = FixedClock::epoch_2024();
        let mut product = sample_product(&ids, &clock);
        product.take_events();
        product.update_inventory(&ids, &clock, 12).unwrap();

        let events = product.take_events();
        let message = translate_product_event(&events[0]).unwrap();

        assert_eq!(message.topic, INTEGRATION_TOPIC);
        assert_eq!(message.routing_key, "product.inventory.updated");
        assert_eq!(message.payload["old_quantity"], 0);
        assert_eq!(message.payload["new_quantity"], 12);
        assert_eq!(
            message.payload["product_id"],
            serde_json::json!(AggregateRoot::id(&product).as_uuid())
        );
    }

    #[test]
    fn other_events_have_no_integration_counterpart() {
        let ids = SequentialIdGen::new();
        let clock = FixedClock::epoch_2024();
        let mut product = sample_product(&ids, &clock);

        for event in product.take_events() {
            assert!(translate_product_event(&event).is_none());
        }
    }
}

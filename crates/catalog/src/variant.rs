//! Variant entry owned by a product aggregate.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use mercato_core::{DomainError, DomainResult, ProductVariantId};

/// A sellable variation of a product (size, color, ...), exclusively owned
/// by its product. Variant SKUs are normalized to uppercase and unique
/// within the owning product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductVariant {
    id: ProductVariantId,
    name: String,
    sku: String,
    attributes: HashMap<String, String>,
    stock_quantity: i64,
    is_active: bool,
}

impl ProductVariant {
    pub(crate) fn new(
        id: ProductVariantId,
        name: &str,
        sku: &str,
        attributes: HashMap<String, String>,
    ) -> DomainResult<Self> {
        let name = name.trim();
        if name.is_empty() {
            return Err(DomainError::invalid_argument("variant name cannot be empty"));
        }

        let sku = normalize_sku(sku)?;

        Ok(Self {
            id,
            name: name.to_string(),
            sku,
            attributes,
            stock_quantity: 0,
            is_active: true,
        })
    }

    pub(crate) fn update_stock(&mut self, quantity: i64) -> DomainResult<()> {
        if quantity < 0 {
            return Err(DomainError::invalid_argument(
                "variant stock quantity cannot be negative",
            ));
        }
        self.stock_quantity = quantity;
        Ok(())
    }

    pub(crate) fn update_attributes(&mut self, attributes: HashMap<String, String>) {
        self.attributes = attributes;
    }

    pub(crate) fn activate(&mut self) {
        self.is_active = true;
    }

    pub(crate) fn deactivate(&mut self) {
        self.is_active = false;
    }

    pub fn id(&self) -> ProductVariantId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn sku(&self) -> &str {
        &self.sku
    }

    pub fn attributes(&self) -> &HashMap<String, String> {
        &self.attributes
    }

    pub fn stock_quantity(&self) -> i64 {
        self.stock_quantity
    }

    pub fn is_active(&self) -> bool {
        self.is_active
    }
}

/// Trim, reject empty, uppercase. Shared by variants and the product's own SKU.
pub(crate) fn normalize_sku(sku: &str) -> DomainResult<String> {
    let trimmed = sku.trim();
    if trimmed.is_empty() {
        return Err(DomainError::invalid_argument("SKU cannot be empty"));
    }
    if trimmed.chars().count() > 50 {
        return Err(DomainError::invalid_argument("SKU cannot exceed 50 characters"));
    }
    Ok(trimmed.to_uppercase())
}

#[cfg(test)]
mod tests {
    use super::*;
    use mercato_core::SequentialIdGen;

    fn variant_id() -> ProductVariantId {
        ProductVariantId::generate(&SequentialIdGen::new())
    }

    #[test]
    fn new_variant_normalizes_name_and_sku() {
        let variant =
            ProductVariant::new(variant_id(), "  Red / XL  ", " wid-1-red-xl ", HashMap::new())
                .unwrap();
        assert_eq!(variant.name(), "Red / XL");
        assert_eq!(variant.sku(), "WID-1-RED-XL");
        assert_eq!(variant.stock_quantity(), 0);
        assert!(variant.is_active());
    }

    #[test]
    fn empty_name_is_rejected() {
        let err = ProductVariant::new(variant_id(), "  ", "SKU-1", HashMap::new()).unwrap_err();
        assert!(matches!(err, DomainError::InvalidArgument(_)));
    }

    #[test]
    fn empty_sku_is_rejected() {
        let err = ProductVariant::new(variant_id(), "Red", "  ", HashMap::new()).unwrap_err();
        assert!(matches!(err, DomainError::InvalidArgument(_)));
    }

    #[test]
    fn oversized_sku_is_rejected() {
        let err =
            ProductVariant::new(variant_id(), "Red", &"X".repeat(51), HashMap::new()).unwrap_err();
        assert!(matches!(err, DomainError::InvalidArgument(_)));
    }

    #[test]
    fn sku_length_is_counted_in_characters_not_bytes() {
        // 50 two-byte characters: within the limit.
        let variant =
            ProductVariant::new(variant_id(), "Red", &"Ö".repeat(50), HashMap::new()).unwrap();
        assert_eq!(variant.sku().chars().count(), 50);
    }

    #[test]
    fn stock_and_flags_are_mutable_by_the_owning_aggregate() {
        let mut variant =
            ProductVariant::new(variant_id(), "Red", "SKU-1", HashMap::new()).unwrap();

        variant.update_stock(7).unwrap();
        assert_eq!(variant.stock_quantity(), 7);

        let err = variant.update_stock(-1).unwrap_err();
        assert!(matches!(err, DomainError::InvalidArgument(_)));
        assert_eq!(variant.stock_quantity(), 7);

        variant.deactivate();
        assert!(!variant.is_active());
        variant.activate();
        assert!(variant.is_active());

        variant.update_attributes(HashMap::from([("size".to_string(), "XL".to_string())]));
        assert_eq!(variant.attributes().get("size"), Some(&"XL".to_string()));
    }
}

//! Price entry owned by a product aggregate.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use mercato_core::{DomainError, DomainResult, ProductPriceId};

/// A price for one currency, exclusively owned by its product.
///
/// At most one entry exists per currency on a product; the aggregate
/// enforces that and updates the entry in place when the currency already
/// has a price.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductPrice {
    id: ProductPriceId,
    amount: Decimal,
    currency: String,
    effective_from: DateTime<Utc>,
    effective_to: Option<DateTime<Utc>>,
}

impl ProductPrice {
    /// Build a validated price entry.
    ///
    /// Amounts are rounded to 2 decimal places; currency codes are trimmed
    /// and normalized to uppercase.
    pub(crate) fn new(
        id: ProductPriceId,
        amount: Decimal,
        currency: &str,
        now: DateTime<Utc>,
    ) -> DomainResult<Self> {
        let amount = validate_amount(amount)?;
        let currency = normalize_currency(currency)?;

        Ok(Self {
            id,
            amount,
            currency,
            effective_from: now,
            effective_to: None,
        })
    }

    pub(crate) fn update_amount(&mut self, amount: Decimal) -> DomainResult<()> {
        self.amount = validate_amount(amount)?;
        Ok(())
    }

    /// Set the validity window. `to`, when present, must be strictly after `from`.
    pub fn set_effective_period(
        &mut self,
        from: DateTime<Utc>,
        to: Option<DateTime<Utc>>,
    ) -> DomainResult<()> {
        if let Some(to) = to {
            if to <= from {
                return Err(DomainError::invalid_argument(
                    "effective-to date must be after effective-from date",
                ));
            }
        }
        self.effective_from = from;
        self.effective_to = to;
        Ok(())
    }

    /// Whether the price applies at `date`.
    pub fn is_effective(&self, date: DateTime<Utc>) -> bool {
        date >= self.effective_from && self.effective_to.is_none_or(|to| date <= to)
    }

    pub fn id(&self) -> ProductPriceId {
        self.id
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }

    pub fn currency(&self) -> &str {
        &self.currency
    }

    pub fn effective_from(&self) -> DateTime<Utc> {
        self.effective_from
    }

    pub fn effective_to(&self) -> Option<DateTime<Utc>> {
        self.effective_to
    }
}

fn validate_amount(amount: Decimal) -> DomainResult<Decimal> {
    if amount < Decimal::ZERO {
        return Err(DomainError::invalid_argument("price cannot be negative"));
    }
    Ok(amount.round_dp(2))
}

pub(crate) fn normalize_currency(currency: &str) -> DomainResult<String> {
    let trimmed = currency.trim();
    if trimmed.len() != 3 || !trimmed.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(DomainError::invalid_argument(
            "currency must be a 3-letter code",
        ));
    }
    Ok(trimmed.to_ascii_uppercase())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use mercato_core::SequentialIdGen;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    fn price_id() -> ProductPriceId {
        ProductPriceId::generate(&SequentialIdGen::new())
    }

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
    }

    #[test]
    fn amount_is_rounded_to_two_decimals() {
        let price = ProductPrice::new(price_id(), dec("9.999"), "usd", t0()).unwrap();
        assert_eq!(price.amount(), dec("10.00"));
        assert_eq!(price.currency(), "USD");
    }

    #[test]
    fn negative_amount_is_rejected() {
        let err = ProductPrice::new(price_id(), dec("-0.01"), "USD", t0()).unwrap_err();
        assert!(matches!(err, DomainError::InvalidArgument(_)));
    }

    #[test]
    fn malformed_currency_is_rejected() {
        for bad in ["", "US", "USDX", "U1D"] {
            let err = ProductPrice::new(price_id(), dec("1.00"), bad, t0()).unwrap_err();
            assert!(matches!(err, DomainError::InvalidArgument(_)), "{bad:?}");
        }
    }

    #[test]
    fn effective_period_must_be_ordered() {
        let mut price = ProductPrice::new(price_id(), dec("5.00"), "EUR", t0()).unwrap();
        let from = t0();

        let err = price.set_effective_period(from, Some(from)).unwrap_err();
        assert!(matches!(err, DomainError::InvalidArgument(_)));

        price
            .set_effective_period(from, Some(from + chrono::Duration::days(30)))
            .unwrap();
        assert!(price.is_effective(from + chrono::Duration::days(1)));
        assert!(!price.is_effective(from + chrono::Duration::days(31)));
        assert!(!price.is_effective(from - chrono::Duration::days(1)));
    }

    #[test]
    fn open_ended_period_is_effective_forever() {
        let price = ProductPrice::new(price_id(), dec("5.00"), "EUR", t0()).unwrap();
        assert!(price.is_effective(t0() + chrono::Duration::days(10_000)));
    }
}

use std::collections::BTreeMap;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::constants;
use crate::error::{Result, RowError, SalesError};
use crate::types::SaleRecord;

/// Decimal places kept on subtotals and totals
pub const MONEY_SCALE: u32 = 2;

/// Round a money amount to cents, halves away from zero
pub fn round_money(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(MONEY_SCALE, RoundingStrategy::MidpointAwayFromZero)
}

/// Tax and discount rules used when pricing a sale
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PricingConfig {
    /// Region assigned to rows that leave the column blank
    pub default_region: String,
    /// Quantities strictly above this get the bulk discount
    pub bulk_discount_threshold: i64,
    /// Multiplier applied to discounted subtotals
    pub bulk_discount_rate: Decimal,
    /// Tax multiplier per region code; unlisted regions are untaxed
    pub tax_rates: BTreeMap<String, Decimal>,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            default_region: constants::DEFAULT_REGION.to_string(),
            bulk_discount_threshold: constants::BULK_DISCOUNT_THRESHOLD,
            bulk_discount_rate: constants::BULK_DISCOUNT_RATE,
            tax_rates: constants::default_tax_rates()
                .into_iter()
                .map(|(region, rate)| (region.to_string(), rate))
                .collect(),
        }
    }
}

impl PricingConfig {
    /// Replace or add the tax multiplier for one region
    pub fn with_tax_rate(mut self, region: impl Into<String>, rate: Decimal) -> Self {
        self.tax_rates.insert(region.into(), rate);
        self
    }

    pub fn tax_rate(&self, region: &str) -> Decimal {
        self.tax_rates
            .get(region)
            .copied()
            .unwrap_or(constants::NO_TAX)
    }

    pub fn validate(&self) -> Result<()> {
        if self.default_region.trim().is_empty() {
            return Err(SalesError::Config("default_region must not be empty".to_string()));
        }
        if self.bulk_discount_threshold < 0 {
            return Err(SalesError::Config(format!(
                "bulk_discount_threshold must not be negative, got {}",
                self.bulk_discount_threshold
            )));
        }
        if self.bulk_discount_rate <= Decimal::ZERO || self.bulk_discount_rate > Decimal::ONE {
            return Err(SalesError::Config(format!(
                "bulk_discount_rate must be in (0, 1], got {}",
                self.bulk_discount_rate
            )));
        }
        if let Some((region, rate)) = self.tax_rates.iter().find(|(_, rate)| **rate <= Decimal::ZERO) {
            return Err(SalesError::Config(format!(
                "tax rate for region '{region}' must be positive, got {rate}"
            )));
        }
        Ok(())
    }
}

/// Computes taxed, discounted subtotals for validated sales
#[derive(Debug, Clone, Default)]
pub struct PricingCalculator {
    config: PricingConfig,
}

impl PricingCalculator {
    pub fn new(config: PricingConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PricingConfig {
        &self.config
    }

    pub fn qualifies_for_bulk_discount(&self, quantity: i64) -> bool {
        quantity > self.config.bulk_discount_threshold
    }

    /// Subtotal for one sale, rounded to cents.
    ///
    /// The bulk discount is applied before regional tax; swapping the order
    /// changes the rounded result. Products beyond the decimal range come back
    /// as [`RowError::Overflow`].
    pub fn calculate(&self, record: &SaleRecord) -> std::result::Result<Decimal, RowError> {
        let mut subtotal = checked_mul(Decimal::from(record.quantity()), record.unit_price())?;

        if self.qualifies_for_bulk_discount(record.quantity()) {
            subtotal = checked_mul(subtotal, self.config.bulk_discount_rate)?;
        }

        subtotal = checked_mul(subtotal, self.config.tax_rate(record.region()))?;

        Ok(round_money(subtotal))
    }
}

fn checked_mul(lhs: Decimal, rhs: Decimal) -> std::result::Result<Decimal, RowError> {
    lhs.checked_mul(rhs)
        .ok_or(RowError::Overflow { operation: "subtotal" })
}

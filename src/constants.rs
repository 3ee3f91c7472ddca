//! Column names and pricing defaults shared across the pipeline.
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

// CSV column names
pub const PRODUCT_ID_FIELD: &str = "product_id";
pub const QUANTITY_FIELD: &str = "quantity";
pub const UNIT_PRICE_FIELD: &str = "unit_price";
pub const REGION_FIELD: &str = "region";
pub const DATE_FIELD: &str = "date";

/// Columns that must be present and non-empty on every row
pub const REQUIRED_FIELDS: [&str; 3] = [PRODUCT_ID_FIELD, QUANTITY_FIELD, UNIT_PRICE_FIELD];

pub const DEFAULT_REGION: &str = "US";

// Bulk discount applies when quantity is strictly greater than the threshold
pub const BULK_DISCOUNT_THRESHOLD: i64 = 100;
pub const BULK_DISCOUNT_RATE: Decimal = dec!(0.90);

/// Multiplier for regions without a configured tax rate
pub const NO_TAX: Decimal = Decimal::ONE;

/// Date layout accepted on input and the layout it is rendered in
pub const INPUT_DATE_FORMAT: &str = "%Y-%m-%d";
pub const DISPLAY_DATE_FORMAT: &str = "%m/%d/%Y";
pub const MISSING_DATE: &str = "N/A";

/// Built-in regional tax multipliers
pub fn default_tax_rates() -> Vec<(&'static str, Decimal)> {
    vec![("EU", dec!(1.20)), ("UK", dec!(1.20)), ("CA", dec!(1.13))]
}

// Pipeline processing: per-row validation, pricing and formatting

pub mod date_format;
pub mod pricing;
pub mod validate;

pub use date_format::format_date;
pub use pricing::{round_money, PricingCalculator, PricingConfig};
pub use validate::validate_row;

use crate::error::RowError;
use crate::types::{RawRow, ResultRow};

/// Run one raw row through validation, pricing and date formatting
pub fn process_row(row: &RawRow, calculator: &PricingCalculator) -> Result<ResultRow, RowError> {
    let record = validate_row(row, &calculator.config().default_region)?;
    let subtotal = calculator.calculate(&record)?;

    Ok(ResultRow {
        product_id: record.product_id().to_string(),
        quantity: record.quantity(),
        unit_price: record.unit_price(),
        subtotal,
        region: record.region().to_string(),
        date: format_date(record.date()),
    })
}

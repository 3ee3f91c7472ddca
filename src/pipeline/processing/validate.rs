use std::str::FromStr;

use rust_decimal::Decimal;

use crate::constants::{DATE_FIELD, PRODUCT_ID_FIELD, QUANTITY_FIELD, REGION_FIELD, REQUIRED_FIELDS, UNIT_PRICE_FIELD};
use crate::error::RowError;
use crate::types::{RawRow, SaleRecord};

/// Turn a raw CSV row into a [`SaleRecord`].
///
/// Rows missing a required field or carrying a non-positive quantity or
/// price are rejected. Numeric text that does not parse comes back as
/// [`RowError::Parse`] for the caller to record.
pub fn validate_row(row: &RawRow, default_region: &str) -> Result<SaleRecord, RowError> {
    let missing: Vec<&'static str> = REQUIRED_FIELDS
        .iter()
        .copied()
        .filter(|field| row.non_empty(field).is_none())
        .collect();
    if !missing.is_empty() {
        return Err(RowError::MissingFields { fields: missing });
    }

    // Checked non-empty above
    let product_id = row.get(PRODUCT_ID_FIELD).unwrap_or_default();
    let quantity_raw = row.get(QUANTITY_FIELD).unwrap_or_default();
    let price_raw = row.get(UNIT_PRICE_FIELD).unwrap_or_default();

    let quantity = parse_quantity(quantity_raw)?;
    let unit_price = parse_unit_price(price_raw)?;

    if quantity <= 0 || unit_price <= Decimal::ZERO {
        return Err(RowError::InvalidValues {
            quantity: quantity_raw.to_string(),
            unit_price: price_raw.to_string(),
        });
    }

    let region = row
        .non_empty(REGION_FIELD)
        .unwrap_or(default_region)
        .to_string();
    let date = row.get(DATE_FIELD).unwrap_or_default().to_string();

    Ok(SaleRecord::new(
        product_id.to_string(),
        quantity,
        unit_price,
        region,
        date,
    ))
}

fn parse_quantity(text: &str) -> Result<i64, RowError> {
    text.trim().parse::<i64>().map_err(|e| RowError::Parse {
        field: QUANTITY_FIELD,
        value: text.to_string(),
        reason: e.to_string(),
    })
}

fn parse_unit_price(text: &str) -> Result<Decimal, RowError> {
    let trimmed = text.trim();
    Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .map_err(|e| RowError::Parse {
            field: UNIT_PRICE_FIELD,
            value: text.to_string(),
            reason: e.to_string(),
        })
}

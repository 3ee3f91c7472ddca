use std::fmt;

use csv::StringRecord;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One CSV record keyed by header name, in header order.
///
/// Nothing about a raw row is trusted: fields may be missing, empty or
/// malformed. Cells beyond the header width are dropped and headers without
/// a cell are simply absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRow {
    fields: Vec<(String, String)>,
}

impl RawRow {
    /// Pair a decoded record with the header row it was read under
    pub fn from_record(headers: &StringRecord, record: &StringRecord) -> Self {
        headers
            .iter()
            .zip(record.iter())
            .map(|(name, value)| (name.to_string(), value.to_string()))
            .collect()
    }

    /// Value of a field. When a header repeats, the last column wins.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .rev()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Value of a field, treating an empty cell the same as a missing one
    pub fn non_empty(&self, name: &str) -> Option<&str> {
        self.get(name).filter(|value| !value.is_empty())
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for RawRow {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(name, value)| (name.into(), value.into()))
                .collect(),
        }
    }
}

impl fmt::Display for RawRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, (name, value)) in self.fields.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{name}: {value:?}")?;
        }
        write!(f, "}}")
    }
}

/// A validated sale. Only the row validator builds these, so every field is
/// known to be well formed.
#[derive(Debug, Clone, PartialEq)]
pub struct SaleRecord {
    product_id: String,
    quantity: i64,
    unit_price: Decimal,
    region: String,
    date: String,
}

impl SaleRecord {
    pub(crate) fn new(
        product_id: String,
        quantity: i64,
        unit_price: Decimal,
        region: String,
        date: String,
    ) -> Self {
        Self {
            product_id,
            quantity,
            unit_price,
            region,
            date,
        }
    }

    pub fn product_id(&self) -> &str {
        &self.product_id
    }

    pub fn quantity(&self) -> i64 {
        self.quantity
    }

    pub fn unit_price(&self) -> Decimal {
        self.unit_price
    }

    pub fn region(&self) -> &str {
        &self.region
    }

    /// Raw date text; may be empty or unparseable
    pub fn date(&self) -> &str {
        &self.date
    }
}

/// A priced sale as it appears in the batch output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultRow {
    pub product_id: String,
    pub quantity: i64,
    #[serde(with = "rust_decimal::serde::float")]
    pub unit_price: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub subtotal: Decimal,
    pub region: String,
    /// `MM/DD/YYYY`, or `N/A` when the input date was empty or invalid
    pub date: String,
}

/// Everything a batch run produces: priced rows, their total and the
/// descriptions of rows that were skipped.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BatchResult {
    pub results: Vec<ResultRow>,
    #[serde(with = "rust_decimal::serde::float")]
    pub total: Decimal,
    pub errors: Vec<String>,
}

impl BatchResult {
    pub fn processed_count(&self) -> usize {
        self.results.len()
    }

    pub fn error_count(&self) -> usize {
        self.errors.len()
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

// Sales batch pipeline: read CSV rows, process each one, aggregate

pub mod processing;

use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::ReaderBuilder;
use metrics::counter;
use rust_decimal::Decimal;
use tracing::{debug, info, instrument, warn};

use crate::error::{Result, RowError, RowErrorReason, SalesError};
use crate::types::{BatchResult, RawRow};
use processing::{process_row, round_money, PricingCalculator, PricingConfig};

/// Describe a skipped row for the batch error list
pub fn describe_row_error(row: &RawRow, error: &RowError) -> String {
    match error.reason() {
        RowErrorReason::MissingFields => format!("Row missing fields: {row}"),
        RowErrorReason::InvalidValues => format!("Invalid values in row: {row}"),
        RowErrorReason::ParseFailure | RowErrorReason::ArithmeticOverflow => {
            format!("Error processing row {row}: {error}")
        }
    }
}

/// Reads a sales CSV and prices every row against one pricing configuration
#[derive(Debug, Clone, Default)]
pub struct BatchProcessor {
    calculator: PricingCalculator,
}

impl BatchProcessor {
    pub fn new(config: PricingConfig) -> Self {
        Self {
            calculator: PricingCalculator::new(config),
        }
    }

    /// Process the CSV file at `path`.
    ///
    /// Only a source that cannot be opened or decoded fails the call; bad
    /// rows end up in [`BatchResult::errors`].
    #[instrument(skip(self, path), fields(path = %path.as_ref().display()))]
    pub fn process<P: AsRef<Path>>(&self, path: P) -> Result<BatchResult> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| SalesError::SourceUnavailable {
            path: path.to_path_buf(),
            source,
        })?;
        debug!("Opened sales source");

        // The handle is dropped when `process_reader` returns, on success or error
        self.process_reader(file)
    }

    /// Process CSV text from any reader; the first record is the header row
    pub fn process_reader<R: Read>(&self, source: R) -> Result<BatchResult> {
        counter!("sales_batches_total").increment(1);

        let mut reader = ReaderBuilder::new().flexible(true).from_reader(source);
        let headers = reader.headers()?.clone();

        let mut results = Vec::new();
        let mut errors = Vec::new();
        let mut total = Decimal::ZERO;

        for record in reader.records() {
            let record = record?;
            let row = RawRow::from_record(&headers, &record);

            let outcome = process_row(&row, &self.calculator).and_then(|result| {
                let running = total
                    .checked_add(result.subtotal)
                    .ok_or(RowError::Overflow { operation: "batch total" })?;
                Ok((result, running))
            });

            match outcome {
                Ok((result, running)) => {
                    total = running;
                    results.push(result);
                }
                Err(e) => {
                    debug!(reason = e.reason().as_str(), "Skipping row: {}", e);
                    counter!("sales_row_errors_total", "reason" => e.reason().as_str()).increment(1);
                    errors.push(describe_row_error(&row, &e));
                }
            }
        }

        let total = round_money(total);
        counter!("sales_rows_processed_total").increment(results.len() as u64);

        info!("Processed {} sales, total revenue: {:.2}", results.len(), total);
        if !errors.is_empty() {
            warn!("{} errors encountered during processing", errors.len());
        }

        Ok(BatchResult {
            results,
            total,
            errors,
        })
    }
}

/// Process a sales CSV with the built-in pricing rules
pub fn process<P: AsRef<Path>>(path: P) -> Result<BatchResult> {
    BatchProcessor::default().process(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_process_reader_mixes_results_and_errors() {
        let csv = "product_id,quantity,unit_price,region,date\n\
                   A1,150,10.00,EU,2024-01-15\n\
                   ,5,2.00,,\n\
                   B2,0,3.00,US,\n\
                   C3,2,abc,CA,\n\
                   D4,100,1.00,UK,bad-date\n";

        let result = BatchProcessor::default().process_reader(csv.as_bytes()).unwrap();

        assert_eq!(result.processed_count(), 2);
        assert_eq!(result.results[0].subtotal, dec!(1620.00));
        assert_eq!(result.results[1].subtotal, dec!(120.00));
        assert_eq!(result.results[1].date, "N/A");
        assert_eq!(result.total, dec!(1740.00));

        assert_eq!(result.error_count(), 3);
        assert!(result.errors[0].starts_with("Row missing fields: "));
        assert!(result.errors[1].starts_with("Invalid values in row: "));
        assert!(result.errors[2].starts_with("Error processing row "));
        assert!(result.errors[2].contains("abc"));
    }

    #[test]
    fn test_overflowing_subtotal_is_recorded_and_batch_continues() {
        let csv = "product_id,quantity,unit_price\n\
                   BIG,9223372036854775807,100000000000\n\
                   OK,1,1.00\n";

        let result = BatchProcessor::default().process_reader(csv.as_bytes()).unwrap();

        assert_eq!(result.processed_count(), 1);
        assert_eq!(result.results[0].product_id, "OK");
        assert_eq!(result.total, dec!(1.00));
        assert_eq!(result.error_count(), 1);
        assert!(result.errors[0].starts_with("Error processing row "));
        assert!(result.errors[0].contains("BIG"));
        assert!(result.errors[0].contains("subtotal overflowed"));
    }

    #[test]
    fn test_row_overflowing_the_total_is_rejected() {
        let csv = "product_id,quantity,unit_price\n\
                   A,1,50000000000000000000000000000\n\
                   B,1,50000000000000000000000000000\n\
                   C,2,1\n";

        let result = BatchProcessor::default().process_reader(csv.as_bytes()).unwrap();

        let ids: Vec<&str> = result.results.iter().map(|r| r.product_id.as_str()).collect();
        assert_eq!(ids, vec!["A", "C"]);
        assert_eq!(result.total, dec!(50000000000000000000000000002));
        assert_eq!(result.error_count(), 1);
        assert!(result.errors[0].contains(r#"product_id: "B""#));
        assert!(result.errors[0].contains("batch total overflowed"));
    }

    #[test]
    fn test_describe_row_error_includes_raw_row() {
        let row: RawRow = vec![("product_id", "A1"), ("quantity", "-2"), ("unit_price", "1")]
            .into_iter()
            .collect();
        let error = RowError::InvalidValues {
            quantity: "-2".to_string(),
            unit_price: "1".to_string(),
        };

        assert_eq!(
            describe_row_error(&row, &error),
            r#"Invalid values in row: {product_id: "A1", quantity: "-2", unit_price: "1"}"#
        );
    }

    #[test]
    fn test_header_only_source_yields_empty_batch() {
        let result = BatchProcessor::default()
            .process_reader("product_id,quantity,unit_price\n".as_bytes())
            .unwrap();
        assert_eq!(result, BatchResult::default());
    }

    #[test]
    fn test_extra_columns_are_ignored() {
        let csv = "sku_note,product_id,quantity,unit_price\nignored,Z9,2,0.50\n";
        let result = BatchProcessor::default().process_reader(csv.as_bytes()).unwrap();
        assert_eq!(result.results[0].product_id, "Z9");
        assert_eq!(result.results[0].region, "US");
        assert_eq!(result.total, dec!(1.00));
    }

    #[test]
    fn test_missing_file_is_source_unavailable() {
        let err = process("definitely/not/here.csv").unwrap_err();
        assert!(matches!(err, SalesError::SourceUnavailable { .. }));
    }
}

//! Batch processing for sales-data CSV exports.
//!
//! Each row is validated into a typed sale, priced with a bulk discount and
//! regional tax, and its date reformatted for display. Rows that fail any
//! step are described in the batch error list instead of aborting the run.

pub mod config;
pub mod constants;
pub mod error;
pub mod logging;
pub mod pipeline;
pub mod types;

pub use error::{Result, RowError, SalesError};
pub use pipeline::{process, BatchProcessor};
pub use types::{BatchResult, RawRow, ResultRow, SaleRecord};

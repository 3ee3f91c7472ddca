use chrono::NaiveDate;

use crate::constants::{DISPLAY_DATE_FORMAT, INPUT_DATE_FORMAT, MISSING_DATE};

/// Render an ISO `YYYY-MM-DD` date as `MM/DD/YYYY`.
///
/// Empty input, a year that is not exactly four digits, and anything chrono
/// cannot parse all become `N/A`.
pub fn format_date(date: &str) -> String {
    if !has_four_digit_year(date) {
        return MISSING_DATE.to_string();
    }

    match NaiveDate::parse_from_str(date, INPUT_DATE_FORMAT) {
        Ok(day) => day.format(DISPLAY_DATE_FORMAT).to_string(),
        Err(_) => MISSING_DATE.to_string(),
    }
}

// chrono's %Y also takes short, signed or space-padded years
fn has_four_digit_year(date: &str) -> bool {
    let bytes = date.as_bytes();
    bytes.len() > 4 && bytes[..4].iter().all(u8::is_ascii_digit) && bytes[4] == b'-'
}

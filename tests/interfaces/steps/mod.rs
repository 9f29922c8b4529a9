//! Step definitions.

pub mod churn_risk;
pub mod forecast;
pub mod lifecycle;

use chrono::NaiveDate;

/// Parse a `YYYY-MM-DD` step argument.
pub fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").expect("Invalid date in step")
}

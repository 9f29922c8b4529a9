//! Report configuration types.

use chrono::NaiveDate;
use serde::Deserialize;

/// Thresholds for the high-risk rule.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ChurnRiskConfig {
    /// Rows must pay strictly more than this MRR.
    pub mrr_threshold: u32,
    /// Rows must show strictly less usage than this.
    pub usage_threshold: u64,
    /// Rows printed to the console.
    pub top_n: usize,
}

impl Default for ChurnRiskConfig {
    fn default() -> Self {
        Self {
            mrr_threshold: 20,
            usage_threshold: 1000,
            top_n: 10,
        }
    }
}

/// Forecast horizon and chart settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ForecastConfig {
    /// Months projected past the last historical month.
    pub months_ahead: usize,
    /// Historical months averaged for the monthly delta.
    pub trailing_months: usize,
    /// Processing date for open-ended periods. Defaults to today.
    pub as_of: Option<NaiveDate>,
    /// Chart width in pixels.
    pub chart_width: u32,
    /// Chart height in pixels.
    pub chart_height: u32,
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            months_ahead: 6,
            trailing_months: 6,
            as_of: None,
            chart_width: 1500,
            chart_height: 750,
        }
    }
}

impl ForecastConfig {
    /// Resolve the processing date.
    pub fn as_of_or_today(&self) -> NaiveDate {
        self.as_of
            .unwrap_or_else(|| chrono::Local::now().date_naive())
    }
}

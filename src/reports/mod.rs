//! Reports over a generated dataset.

pub mod chart;
pub mod churn_risk;
pub mod forecast;
pub mod stats;

pub use chart::{render_chart, ChartError, MRR_CHART_FILE};
pub use churn_risk::{ChurnRiskReport, RiskRow, RiskRule, HIGH_RISK_FILE};
pub use forecast::{
    build_monthly_mrr, straight_line_forecast, Forecast, ForecastSummary, MonthlyPoint,
};

use crate::tables::TableError;

/// Errors raised while building or writing a report.
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("No subscription history to forecast from")]
    EmptyHistory,

    #[error(transparent)]
    Table(#[from] TableError),

    #[error(transparent)]
    Chart(#[from] ChartError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

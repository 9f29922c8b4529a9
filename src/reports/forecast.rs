//! Monthly MRR history and straight-line forecast.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{Datelike, Months, NaiveDate};
use num_format::{Locale, ToFormattedString};
use tracing::{debug, info};

use super::ReportError;
use crate::model::SubscriptionPeriod;

/// MRR for the month starting on `month`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonthlyPoint {
    pub month: NaiveDate,
    pub mrr: f64,
}

/// First day of `date`'s month.
pub fn month_start(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

/// First day of the month after `month`.
pub fn next_month(month: NaiveDate) -> NaiveDate {
    month
        .checked_add_months(Months::new(1))
        .unwrap_or(NaiveDate::MAX)
}

/// Sum MRR per calendar month.
///
/// Every period counts in each month it touches, partial months included.
/// Open periods run through `as_of`. Months inside the observed range with
/// no active period appear with zero MRR, so the series is gap-free.
pub fn build_monthly_mrr(subscriptions: &[SubscriptionPeriod], as_of: NaiveDate) -> Vec<MonthlyPoint> {
    let mut totals: BTreeMap<NaiveDate, u64> = BTreeMap::new();

    for period in subscriptions {
        let last = month_start(period.end_or(as_of));
        let mut current = month_start(period.start_date);
        while current <= last {
            *totals.entry(current).or_insert(0) += period.mrr as u64;
            current = next_month(current);
        }
    }

    let (Some(&first), Some(&last)) = (totals.keys().next(), totals.keys().next_back()) else {
        return Vec::new();
    };

    let mut series = Vec::new();
    let mut month = first;
    while month <= last {
        series.push(MonthlyPoint {
            month,
            mrr: totals.get(&month).copied().unwrap_or(0) as f64,
        });
        month = next_month(month);
    }
    series
}

/// Mean month-over-month change across the last `trailing` points.
///
/// The first point of the window only contributes when it has a
/// predecessor. Zero when there is no change to measure.
pub fn average_change(history: &[MonthlyPoint], trailing: usize) -> f64 {
    let window_start = history.len().saturating_sub(trailing).max(1);
    let deltas: Vec<f64> = (window_start..history.len())
        .map(|i| history[i].mrr - history[i - 1].mrr)
        .collect();

    if deltas.is_empty() {
        0.0
    } else {
        deltas.iter().sum::<f64>() / deltas.len() as f64
    }
}

/// Straight-line projection.
#[derive(Debug, Clone, PartialEq)]
pub struct Forecast {
    pub avg_change: f64,
    pub points: Vec<MonthlyPoint>,
}

/// Project `months_ahead` months past the last history point.
///
/// The running value is never floored, only the reported points are, so a
/// series that dips below zero keeps its slope.
pub fn straight_line_forecast(
    history: &[MonthlyPoint],
    months_ahead: usize,
    trailing: usize,
) -> Result<Forecast, ReportError> {
    let last = history.last().ok_or(ReportError::EmptyHistory)?;
    let avg_change = average_change(history, trailing);

    let mut month = last.month;
    let mut running = last.mrr;
    let mut points = Vec::with_capacity(months_ahead);
    for _ in 0..months_ahead {
        month = next_month(month);
        running += avg_change;
        points.push(MonthlyPoint {
            month,
            mrr: running.max(0.0),
        });
    }

    debug!(avg_change, months_ahead, "Forecast projected");
    Ok(Forecast { avg_change, points })
}

/// Headline numbers for the console.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ForecastSummary {
    pub current_mrr: f64,
    pub future_mrr: f64,
    pub months_ahead: usize,
    /// `None` when current MRR is zero.
    pub growth_pct: Option<f64>,
}

impl ForecastSummary {
    pub fn new(history: &[MonthlyPoint], forecast: &Forecast) -> Result<Self, ReportError> {
        let current_mrr = history.last().ok_or(ReportError::EmptyHistory)?.mrr;
        let future_mrr = forecast.points.last().map(|p| p.mrr).unwrap_or(current_mrr);
        let growth_pct = growth_pct(current_mrr, future_mrr);

        info!(current_mrr, future_mrr, ?growth_pct, "Forecast summary");
        Ok(Self {
            current_mrr,
            future_mrr,
            months_ahead: forecast.points.len(),
            growth_pct,
        })
    }
}

/// Percentage change, undefined for a zero or non-finite base.
pub fn growth_pct(current: f64, future: f64) -> Option<f64> {
    if current == 0.0 || !current.is_finite() || !future.is_finite() {
        return None;
    }
    Some((future - current) / current * 100.0)
}

/// Format a whole-euro amount with thousands separators.
///
/// Halves round to even, so `2.5` shows as `€2`.
pub fn format_eur(value: f64) -> String {
    let rounded = value.round_ties_even() as i64;
    format!("€{}", rounded.to_formatted_string(&Locale::en))
}

impl fmt::Display for ForecastSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rule = "==============================";
        writeln!(f, "{}", rule)?;
        writeln!(f, "REVENUE FORECAST SUMMARY")?;
        writeln!(f, "{}", rule)?;
        writeln!(f, "Current MRR:         {}", format_eur(self.current_mrr))?;
        writeln!(
            f,
            "MRR in {} months:     {}",
            self.months_ahead,
            format_eur(self.future_mrr)
        )?;
        match self.growth_pct {
            Some(pct) => writeln!(
                f,
                "Expected growth:     {:+.1}% over {} months",
                pct, self.months_ahead
            )?,
            None => writeln!(f, "Expected growth:     undefined (current MRR is zero)")?,
        }
        write!(f, "{}", rule)
    }
}

/// Render points as a two-column table.
pub fn format_points(points: &[MonthlyPoint]) -> String {
    let mut out = String::from("month        mrr\n");
    for p in points {
        out.push_str(&format!("{}   {:.2}\n", p.month.format("%Y-%m"), p.mrr));
    }
    out
}

//! High churn-risk report.
//!
//! Joins every subscription row with its customer's total usage and flags
//! rows that pay above the MRR threshold while using below the usage
//! threshold. Flagged rows are ranked by MRR, highest first.

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use super::stats::ColumnStats;
use crate::config::ChurnRiskConfig;
use crate::model::{PlanTier, SubscriptionPeriod, UsageEvent};
use crate::tables::{self, TableRow};

/// Export file name.
pub const HIGH_RISK_FILE: &str = "high_risk_customers.csv";

/// A subscription row joined with its customer's total usage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskRow {
    pub customer_id: String,
    pub plan_tier: PlanTier,
    pub mrr: u32,
    pub total_usage: u64,
}

impl TableRow for RiskRow {
    const HEADERS: &'static [&'static str] = &["customer_id", "plan_tier", "mrr", "total_usage"];
}

/// Sum of `event_count` per customer.
pub fn total_usage_by_customer(events: &[UsageEvent]) -> BTreeMap<String, u64> {
    let mut totals = BTreeMap::new();
    for event in events {
        *totals.entry(event.customer_id.clone()).or_insert(0) += event.event_count as u64;
    }
    totals
}

/// Left join of usage totals onto subscription rows. Missing usage is zero.
pub fn join_usage(
    subscriptions: &[SubscriptionPeriod],
    totals: &BTreeMap<String, u64>,
) -> Vec<RiskRow> {
    subscriptions
        .iter()
        .map(|s| RiskRow {
            customer_id: s.customer_id.clone(),
            plan_tier: s.plan_tier,
            mrr: s.mrr,
            total_usage: totals.get(&s.customer_id).copied().unwrap_or(0),
        })
        .collect()
}

/// Threshold rule for high churn risk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RiskRule {
    pub mrr_threshold: u32,
    pub usage_threshold: u64,
}

impl RiskRule {
    /// Strictly above the MRR threshold and strictly below the usage threshold.
    pub fn is_high_risk(&self, row: &RiskRow) -> bool {
        row.mrr > self.mrr_threshold && row.total_usage < self.usage_threshold
    }
}

impl From<&ChurnRiskConfig> for RiskRule {
    fn from(config: &ChurnRiskConfig) -> Self {
        Self {
            mrr_threshold: config.mrr_threshold,
            usage_threshold: config.usage_threshold,
        }
    }
}

/// Joined rows plus the flagged, ranked subset.
#[derive(Debug, Clone)]
pub struct ChurnRiskReport {
    pub rule: RiskRule,
    pub joined: Vec<RiskRow>,
    pub flagged: Vec<RiskRow>,
}

impl ChurnRiskReport {
    pub fn build(
        subscriptions: &[SubscriptionPeriod],
        events: &[UsageEvent],
        rule: RiskRule,
    ) -> Self {
        let totals = total_usage_by_customer(events);
        let joined = join_usage(subscriptions, &totals);

        let mut flagged: Vec<RiskRow> = joined
            .iter()
            .filter(|row| rule.is_high_risk(row))
            .cloned()
            .collect();
        // Stable: ties keep subscription order.
        flagged.sort_by(|a, b| b.mrr.cmp(&a.mrr));

        info!(
            joined = joined.len(),
            flagged = flagged.len(),
            mrr_threshold = rule.mrr_threshold,
            usage_threshold = rule.usage_threshold,
            "Churn risk computed"
        );

        Self {
            rule,
            joined,
            flagged,
        }
    }

    /// Highest-paying flagged rows.
    pub fn top(&self, n: usize) -> &[RiskRow] {
        &self.flagged[..n.min(self.flagged.len())]
    }

    pub fn mrr_stats(&self) -> Option<ColumnStats> {
        let values: Vec<f64> = self.joined.iter().map(|r| r.mrr as f64).collect();
        ColumnStats::describe(&values)
    }

    pub fn usage_stats(&self) -> Option<ColumnStats> {
        let values: Vec<f64> = self.joined.iter().map(|r| r.total_usage as f64).collect();
        ColumnStats::describe(&values)
    }

    /// Write every flagged row.
    pub fn export(&self, path: &Path) -> tables::Result<()> {
        tables::write_table(path, &self.flagged)?;
        info!(path = %path.display(), rows = self.flagged.len(), "High-risk export written");
        Ok(())
    }

    /// Console view limited to `top_n` rows.
    pub fn display(&self, top_n: usize) -> ChurnRiskDisplay<'_> {
        ChurnRiskDisplay {
            report: self,
            top_n,
        }
    }
}

/// Console rendering of a [`ChurnRiskReport`].
pub struct ChurnRiskDisplay<'a> {
    report: &'a ChurnRiskReport,
    top_n: usize,
}

impl fmt::Display for ChurnRiskDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let report = self.report;

        writeln!(f, "--- Data Stats ---")?;
        if let Some(stats) = report.mrr_stats() {
            writeln!(f, "mrr:         {}", stats)?;
        }
        if let Some(stats) = report.usage_stats() {
            writeln!(f, "total_usage: {}", stats)?;
        }

        writeln!(f)?;
        writeln!(f, "HIGH CHURN RISK ALERT")?;
        writeln!(
            f,
            "Found {} customers paying > {} EUR with usage < {}.",
            report.flagged.len(),
            report.rule.mrr_threshold,
            report.rule.usage_threshold
        )?;
        writeln!(
            f,
            "{:<12} {:<11} {:>5} {:>11}",
            "customer_id", "plan_tier", "mrr", "total_usage"
        )?;
        for row in report.top(self.top_n) {
            writeln!(
                f,
                "{:<12} {:<11} {:>5} {:>11}",
                row.customer_id,
                row.plan_tier.as_str(),
                row.mrr,
                row.total_usage
            )?;
        }
        Ok(())
    }
}

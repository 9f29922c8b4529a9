//! Row types for the four generated tables.
//!
//! Every row is write-once: generators create them, the table layer
//! serializes them, and the reports only read them back.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

mod ids;

pub use ids::{company_name, customer_id, event_id, sales_rep, subscription_id, touch_id};

/// Ordered service level. Declaration order is the upgrade order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PlanTier {
    Starter,
    Growth,
    Enterprise,
}

impl PlanTier {
    pub const ALL: [PlanTier; 3] = [PlanTier::Starter, PlanTier::Growth, PlanTier::Enterprise];

    /// Monthly recurring revenue in EUR.
    pub fn mrr(self) -> u32 {
        match self {
            PlanTier::Starter => 49,
            PlanTier::Growth => 149,
            PlanTier::Enterprise => 499,
        }
    }

    /// Base churn rate per month of a period.
    pub fn churn_base_rate(self) -> f64 {
        match self {
            PlanTier::Starter => 0.08,
            PlanTier::Growth => 0.04,
            PlanTier::Enterprise => 0.02,
        }
    }

    /// Mean usage events per 30-day step.
    pub fn usage_intensity(self) -> f64 {
        match self {
            PlanTier::Starter => 15.0,
            PlanTier::Growth => 30.0,
            PlanTier::Enterprise => 60.0,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PlanTier::Starter => "Starter",
            PlanTier::Growth => "Growth",
            PlanTier::Enterprise => "Enterprise",
        }
    }
}

impl std::str::FromStr for PlanTier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PlanTier::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| format!("Unknown plan tier: {}", s))
    }
}

impl std::fmt::Display for PlanTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

/// Status of a subscription period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubscriptionStatus {
    Active,
    Churned,
    Upgraded,
}

impl SubscriptionStatus {
    /// Active and churned periods close a customer's chain.
    pub fn is_terminal(self) -> bool {
        !matches!(self, SubscriptionStatus::Upgraded)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SubscriptionStatus::Active => "active",
            SubscriptionStatus::Churned => "churned",
            SubscriptionStatus::Upgraded => "upgraded",
        }
    }
}

impl std::fmt::Display for SubscriptionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub customer_id: String,
    pub company_name: String,
    pub industry: String,
    pub country: String,
    pub acquisition_channel: String,
    pub signup_date: NaiveDate,
    pub employee_count: u32,
}

/// One segment of a customer's subscription chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscriptionPeriod {
    pub subscription_id: String,
    pub customer_id: String,
    pub plan_tier: PlanTier,
    pub mrr: u32,
    pub start_date: NaiveDate,
    /// `None` while the period is still open at the window end.
    pub end_date: Option<NaiveDate>,
    pub status: SubscriptionStatus,
}

impl SubscriptionPeriod {
    /// Last day of the period, substituting `open_until` for an open end.
    pub fn end_or(&self, open_until: NaiveDate) -> NaiveDate {
        self.end_date.unwrap_or(open_until)
    }

    /// Whether `date` falls inside `[start, end]`.
    pub fn covers(&self, date: NaiveDate, open_until: NaiveDate) -> bool {
        date >= self.start_date && date <= self.end_or(open_until)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsageEvent {
    pub event_id: String,
    pub customer_id: String,
    pub event_type: String,
    pub event_date: NaiveDate,
    pub event_count: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalesTouch {
    pub touch_id: String,
    pub customer_id: String,
    pub touch_type: String,
    pub touch_date: NaiveDate,
    pub outcome: String,
    pub sales_rep: String,
}

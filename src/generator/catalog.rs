//! Fixed categorical domains the generators draw from.

use crate::model::PlanTier;
use crate::sampling::{Result, WeightedTable};

pub const INDUSTRIES: [&str; 8] = [
    "SaaS",
    "E-commerce",
    "Finance",
    "Healthcare",
    "Manufacturing",
    "Consulting",
    "Media",
    "Education",
];

pub const COUNTRY_WEIGHTS: [(&str, f64); 7] = [
    ("Germany", 0.35),
    ("UK", 0.20),
    ("France", 0.15),
    ("Netherlands", 0.10),
    ("Spain", 0.08),
    ("Italy", 0.07),
    ("Other EU", 0.05),
];

pub const CHANNEL_WEIGHTS: [(&str, f64); 5] = [
    ("Direct", 0.25),
    ("Paid Ads", 0.30),
    ("Referral", 0.20),
    ("Partner", 0.15),
    ("Events", 0.10),
];

pub const EMPLOYEE_COUNTS: [u32; 7] = [10, 25, 50, 100, 250, 500, 1000];

pub const PLAN_WEIGHTS: [(PlanTier, f64); 3] = [
    (PlanTier::Starter, 0.45),
    (PlanTier::Growth, 0.35),
    (PlanTier::Enterprise, 0.20),
];

pub const EVENT_TYPES: [&str; 7] = [
    "login",
    "feature_use",
    "export",
    "api_call",
    "invite_user",
    "dashboard_view",
    "report_run",
];

pub const TOUCH_TYPES: [&str; 7] = [
    "email",
    "call",
    "meeting",
    "demo",
    "qbr",
    "support_ticket",
    "webinar",
];

pub const TOUCH_OUTCOME_WEIGHTS: [(&str, f64); 4] = [
    ("positive", 0.30),
    ("neutral", 0.40),
    ("no_response", 0.25),
    ("negative", 0.05),
];

/// Number of sales reps, numbered from 1.
pub const SALES_REPS: u32 = 15;

/// Sampling tables for every categorical column.
#[derive(Debug, Clone)]
pub struct Catalog {
    pub industries: WeightedTable<&'static str>,
    pub countries: WeightedTable<&'static str>,
    pub channels: WeightedTable<&'static str>,
    pub employee_counts: WeightedTable<u32>,
    pub plan_tiers: WeightedTable<PlanTier>,
    pub event_types: WeightedTable<&'static str>,
    pub touch_types: WeightedTable<&'static str>,
    pub touch_outcomes: WeightedTable<&'static str>,
    pub sales_reps: WeightedTable<u32>,
}

impl Catalog {
    /// Tables for the standard dataset.
    pub fn standard() -> Result<Self> {
        Ok(Self {
            industries: WeightedTable::uniform(INDUSTRIES)?,
            countries: WeightedTable::new(COUNTRY_WEIGHTS)?,
            channels: WeightedTable::new(CHANNEL_WEIGHTS)?,
            employee_counts: WeightedTable::uniform(EMPLOYEE_COUNTS)?,
            plan_tiers: WeightedTable::new(PLAN_WEIGHTS)?,
            event_types: WeightedTable::uniform(EVENT_TYPES)?,
            touch_types: WeightedTable::uniform(TOUCH_TYPES)?,
            touch_outcomes: WeightedTable::new(TOUCH_OUTCOME_WEIGHTS)?,
            sales_reps: WeightedTable::uniform(1..=SALES_REPS)?,
        })
    }
}

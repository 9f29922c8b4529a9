//! Pure lifecycle transition.
//!
//! Given the current segment and its draws, decide the period that gets
//! emitted and whether the chain continues. No randomness lives here, so
//! the churn/window tie-break can be exercised with hand-picked draws.

use chrono::{Duration, NaiveDate};

use crate::model::{PlanTier, SubscriptionStatus};

/// Bounds on a segment's length in months.
pub const MIN_SEGMENT_MONTHS: u32 = 2;
pub const MAX_SEGMENT_MONTHS: u32 = 18;
/// A segment month is a fixed 30 days.
pub const DAYS_PER_MONTH: i64 = 30;
/// Scales `base_rate * months` into a churn probability.
pub const CHURN_HAZARD_FACTOR: f64 = 0.5;
/// Probability a Starter upgrade lands on Growth instead of Enterprise.
pub const STARTER_TO_GROWTH: f64 = 0.7;

/// Where a customer's subscription chain stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleState {
    /// A segment at `tier` begins on `start`.
    Open { tier: PlanTier, start: NaiveDate },
    /// The terminal period has been emitted.
    Closed,
}

/// Random inputs to one transition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentDraw {
    pub months: u32,
    pub churned: bool,
}

/// A resolved period, before identifiers are attached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment {
    pub tier: PlanTier,
    pub start: NaiveDate,
    pub end: Option<NaiveDate>,
    pub status: SubscriptionStatus,
}

/// Outcome of one transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Emit `segment` (status upgraded); the next segment starts on `next_start`.
    Continue { segment: Segment, next_start: NaiveDate },
    /// Emit `segment` (status active or churned) and close the chain.
    Stop { segment: Segment },
}

impl Transition {
    pub fn segment(&self) -> &Segment {
        match self {
            Transition::Continue { segment, .. } | Transition::Stop { segment } => segment,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Transition::Stop { .. })
    }
}

/// Churn probability for a segment, before clamping.
pub fn churn_probability(tier: PlanTier, months: u32) -> f64 {
    tier.churn_base_rate() * months as f64 * CHURN_HAZARD_FACTOR
}

/// Candidate end of a segment, capped at the window end.
pub fn candidate_end(start: NaiveDate, months: u32, window_end: NaiveDate) -> NaiveDate {
    let uncapped = start + Duration::days(DAYS_PER_MONTH * months as i64);
    uncapped.min(window_end)
}

/// Resolve one segment.
///
/// Checks run in a fixed order. A churn draw only counts when the segment
/// ends before the window does; reaching the window end always yields an
/// open active period. Enterprise has nowhere to upgrade, so an unchurned
/// Enterprise segment ending inside the window closes as active.
pub fn resolve(
    tier: PlanTier,
    start: NaiveDate,
    draw: SegmentDraw,
    window_end: NaiveDate,
) -> Transition {
    let end = candidate_end(start, draw.months, window_end);

    if draw.churned && end < window_end {
        return Transition::Stop {
            segment: Segment {
                tier,
                start,
                end: Some(end),
                status: SubscriptionStatus::Churned,
            },
        };
    }

    if end >= window_end {
        return Transition::Stop {
            segment: Segment {
                tier,
                start,
                end: None,
                status: SubscriptionStatus::Active,
            },
        };
    }

    if tier == PlanTier::Enterprise {
        return Transition::Stop {
            segment: Segment {
                tier,
                start,
                end: Some(end),
                status: SubscriptionStatus::Active,
            },
        };
    }

    Transition::Continue {
        segment: Segment {
            tier,
            start,
            end: Some(end),
            status: SubscriptionStatus::Upgraded,
        },
        next_start: end + Duration::days(1),
    }
}

/// Tier for the segment after an upgrade.
///
/// `roll` is a uniform draw in `[0, 1)`; only Starter consults it.
pub fn next_tier(tier: PlanTier, roll: f64) -> PlanTier {
    match tier {
        PlanTier::Starter if roll < STARTER_TO_GROWTH => PlanTier::Growth,
        PlanTier::Starter => PlanTier::Enterprise,
        PlanTier::Growth | PlanTier::Enterprise => PlanTier::Enterprise,
    }
}

/// Advance the state machine past a transition.
pub fn apply(transition: &Transition, next_tier: PlanTier) -> LifecycleState {
    match transition {
        Transition::Continue { next_start, .. } => LifecycleState::Open {
            tier: next_tier,
            start: *next_start,
        },
        Transition::Stop { .. } => LifecycleState::Closed,
    }
}

//! Subscription lifecycle simulation.
//!
//! Each customer starts in an open segment at a weighted initial tier on
//! their signup date. Segments are resolved one at a time by
//! [`transition::resolve`] until a terminal period closes the chain.

pub mod transition;


use chrono::NaiveDate;
use rand::Rng;
use tracing::{trace, warn};

pub use transition::{
    apply, candidate_end, churn_probability, next_tier, resolve, LifecycleState, Segment,
    SegmentDraw, Transition, MAX_SEGMENT_MONTHS, MIN_SEGMENT_MONTHS,
};

use super::{Catalog, RowIds};
use crate::model::{Customer, PlanTier, SubscriptionPeriod};
use crate::sampling::chance;

/// Draw the random inputs for one segment.
///
/// Months are drawn before the churn decision, which depends on them.
pub fn draw_segment<R: Rng + ?Sized>(rng: &mut R, tier: PlanTier) -> SegmentDraw {
    let months = rng.random_range(MIN_SEGMENT_MONTHS..=MAX_SEGMENT_MONTHS);
    let churned = chance(rng, churn_probability(tier, months));
    SegmentDraw { months, churned }
}

/// Draw the tier following an upgraded segment.
fn draw_next_tier<R: Rng + ?Sized>(rng: &mut R, tier: PlanTier) -> PlanTier {
    match tier {
        PlanTier::Starter => next_tier(tier, rng.random::<f64>()),
        _ => next_tier(tier, 0.0),
    }
}

/// Simulate one customer's subscription chain.
pub fn simulate_customer<R: Rng + ?Sized>(
    rng: &mut R,
    catalog: &Catalog,
    customer: &Customer,
    window_end: NaiveDate,
    ids: &mut RowIds,
) -> Vec<SubscriptionPeriod> {
    let mut state = LifecycleState::Open {
        tier: *catalog.plan_tiers.sample(rng),
        start: customer.signup_date,
    };
    let mut periods = Vec::new();

    while let LifecycleState::Open { tier, start } = state {
        if start > window_end {
            warn!(
                customer = %customer.customer_id,
                %start,
                "Segment starts after window end, closing chain"
            );
            break;
        }

        let draw = draw_segment(rng, tier);
        let transition = resolve(tier, start, draw, window_end);
        let segment = transition.segment();

        trace!(
            customer = %customer.customer_id,
            tier = %segment.tier,
            months = draw.months,
            churned = draw.churned,
            status = ?segment.status,
            "Segment resolved"
        );

        periods.push(SubscriptionPeriod {
            subscription_id: ids.next_subscription(),
            customer_id: customer.customer_id.clone(),
            plan_tier: segment.tier,
            mrr: segment.tier.mrr(),
            start_date: segment.start,
            end_date: segment.end,
            status: segment.status,
        });

        let upcoming = if transition.is_terminal() {
            tier
        } else {
            draw_next_tier(rng, tier)
        };
        state = apply(&transition, upcoming);
    }

    periods
}

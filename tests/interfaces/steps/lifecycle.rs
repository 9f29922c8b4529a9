//! Subscription lifecycle step definitions.

use std::collections::BTreeMap;

use chrono::{Duration, NaiveDate};
use churnsim::config::SimulationConfig;
use churnsim::generator::generate;
use churnsim::generator::lifecycle::{
    apply, next_tier, resolve, LifecycleState, Segment, SegmentDraw, Transition,
};
use churnsim::model::{PlanTier, SubscriptionPeriod, SubscriptionStatus};
use cucumber::{given, then, when, World};

use super::date;

/// Test context for lifecycle scenarios.
#[derive(Debug, Default, World)]
pub struct LifecycleWorld {
    window_end: Option<NaiveDate>,
    state: Option<LifecycleState>,
    pending: Option<Transition>,
    segments: Vec<Segment>,
    datasets: Vec<Vec<SubscriptionPeriod>>,
}

impl LifecycleWorld {
    fn window_end(&self) -> NaiveDate {
        self.window_end.expect("Window not configured")
    }

    /// Periods grouped by customer, in emission order.
    fn chains(&self) -> Vec<Vec<&SubscriptionPeriod>> {
        let mut chains = Vec::new();
        for subscriptions in &self.datasets {
            let mut by_customer: BTreeMap<&str, Vec<&SubscriptionPeriod>> = BTreeMap::new();
            for s in subscriptions {
                by_customer.entry(s.customer_id.as_str()).or_default().push(s);
            }
            chains.extend(by_customer.into_values());
        }
        chains
    }
}

// --- Given steps ---

#[given(expr = "a simulation window ending {word}")]
fn given_window(world: &mut LifecycleWorld, end: String) {
    world.window_end = Some(date(&end));
}

#[given(regex = r"^an? (\w+) customer signing up on (\S+)$")]
fn given_customer(world: &mut LifecycleWorld, tier: String, signup: String) {
    let tier: PlanTier = tier.parse().expect("Unknown tier");
    world.state = Some(LifecycleState::Open {
        tier,
        start: date(&signup),
    });
}

#[given(expr = "{int} generated datasets of {int} customers")]
fn given_datasets(world: &mut LifecycleWorld, count: u64, customers: usize) {
    world.datasets = (0..count)
        .map(|seed| {
            let config = SimulationConfig {
                seed,
                customers,
                ..Default::default()
            };
            generate(&config).expect("Generation failed").subscriptions
        })
        .collect();
}

// --- When steps ---

#[when(regex = r"^the (?:first|next) segment draws (\d+) months (with|without) churn$")]
fn when_segment_draws(world: &mut LifecycleWorld, months: u32, churn: String) {
    let Some(LifecycleState::Open { tier, start }) = world.state else {
        panic!("Lifecycle is not open");
    };
    let draw = SegmentDraw {
        months,
        churned: churn == "with",
    };
    let transition = resolve(tier, start, draw, world.window_end());
    world.segments.push(*transition.segment());

    if transition.is_terminal() {
        world.state = Some(apply(&transition, tier));
        world.pending = None;
    } else {
        world.pending = Some(transition);
    }
}

#[when(expr = "the upgrade roll is {float}")]
fn when_upgrade_roll(world: &mut LifecycleWorld, roll: f64) {
    let transition = world.pending.take().expect("No upgrade pending");
    let tier = transition.segment().tier;
    world.state = Some(apply(&transition, next_tier(tier, roll)));
}

// --- Then steps ---

#[then(regex = r"^exactly (\d+) periods? (?:is|are) emitted$")]
fn then_period_count(world: &mut LifecycleWorld, count: usize) {
    assert_eq!(world.segments.len(), count);
    assert_eq!(world.state, Some(LifecycleState::Closed));
}

fn check_period(
    world: &LifecycleWorld,
    index: usize,
    tier: &str,
    start: &str,
    end: Option<NaiveDate>,
    status: &str,
) {
    let segment = &world.segments[index - 1];
    assert_eq!(segment.tier, tier.parse::<PlanTier>().expect("Unknown tier"));
    assert_eq!(segment.start, date(start));
    assert_eq!(segment.end, end);
    assert_eq!(segment.status.as_str(), status);
}

#[then(regex = r#"^period (\d+) is (\w+) from (\S+) with no end and status "(\w+)"$"#)]
fn then_open_period(
    world: &mut LifecycleWorld,
    index: usize,
    tier: String,
    start: String,
    status: String,
) {
    check_period(world, index, &tier, &start, None, &status);
}

#[then(regex = r#"^period (\d+) is (\w+) from (\S+) ending (\S+) with status "(\w+)"$"#)]
fn then_closed_period(
    world: &mut LifecycleWorld,
    index: usize,
    tier: String,
    start: String,
    end: String,
    status: String,
) {
    check_period(world, index, &tier, &start, Some(date(&end)), &status);
}

#[then("every customer's periods are contiguous")]
fn then_contiguous(world: &mut LifecycleWorld) {
    for chain in world.chains() {
        for pair in chain.windows(2) {
            let end = pair[0].end_date.expect("Non-terminal period without end");
            assert_eq!(pair[1].start_date, end + Duration::days(1));
        }
    }
}

#[then("every customer has exactly one terminal period as its last")]
fn then_one_terminal(world: &mut LifecycleWorld) {
    for chain in world.chains() {
        let (last, rest) = chain.split_last().expect("Customer without periods");
        assert!(last.status.is_terminal());
        assert!(rest.iter().all(|s| s.status == SubscriptionStatus::Upgraded));
    }
}

#[then("upgrades never move to a lower tier")]
fn then_tiers_rise(world: &mut LifecycleWorld) {
    for chain in world.chains() {
        for pair in chain.windows(2) {
            assert!(pair[1].plan_tier >= pair[0].plan_tier);
        }
    }
}

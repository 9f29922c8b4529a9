//! Revenue forecast step definitions.

use chrono::NaiveDate;
use churnsim::model::{PlanTier, SubscriptionPeriod, SubscriptionStatus};
use churnsim::reports::{
    build_monthly_mrr, straight_line_forecast, Forecast, ForecastSummary, MonthlyPoint,
};
use cucumber::gherkin::Step;
use cucumber::{given, then, when, World};

use super::date;

const TRAILING_MONTHS: usize = 6;

/// Test context for forecast scenarios.
#[derive(Debug, Default, World)]
pub struct ForecastWorld {
    subscriptions: Vec<SubscriptionPeriod>,
    history: Vec<MonthlyPoint>,
    forecast: Option<Forecast>,
}

impl ForecastWorld {
    fn add(&mut self, tier: &str, start: &str, end: Option<NaiveDate>) {
        let tier: PlanTier = tier.parse().expect("Unknown tier");
        let n = self.subscriptions.len() + 1;
        self.subscriptions.push(SubscriptionPeriod {
            subscription_id: format!("SUB_{:05}", n),
            customer_id: format!("CUST_{:04}", n),
            plan_tier: tier,
            mrr: tier.mrr(),
            start_date: date(start),
            end_date: end,
            status: if end.is_some() {
                SubscriptionStatus::Churned
            } else {
                SubscriptionStatus::Active
            },
        });
    }

    fn forecast(&self) -> &Forecast {
        self.forecast.as_ref().expect("Forecast not built")
    }
}

/// Compare a `| month | mrr |` table against points.
fn assert_points(step: &Step, points: &[MonthlyPoint]) {
    let table = step.table.as_ref().expect("Step needs a table");
    let expected: Vec<(String, f64)> = table
        .rows
        .iter()
        .skip(1)
        .map(|row| (row[0].clone(), row[1].parse().expect("Invalid mrr")))
        .collect();
    let actual: Vec<(String, f64)> = points
        .iter()
        .map(|p| (p.month.format("%Y-%m").to_string(), p.mrr))
        .collect();
    assert_eq!(actual, expected);
}

// --- Given steps ---

#[given(regex = r"^an? (\w+) subscription from (\S+) to (\S+)$")]
fn given_closed_subscription(world: &mut ForecastWorld, tier: String, start: String, end: String) {
    world.add(&tier, &start, Some(date(&end)));
}

#[given(regex = r"^an? (\w+) subscription from (\S+) that is still open$")]
fn given_open_subscription(world: &mut ForecastWorld, tier: String, start: String) {
    world.add(&tier, &start, None);
}

// --- When steps ---

#[when(expr = "the forecast is built as of {word} for {int} months")]
fn when_forecast_built(world: &mut ForecastWorld, as_of: String, months: usize) {
    world.history = build_monthly_mrr(&world.subscriptions, date(&as_of));
    world.forecast = Some(
        straight_line_forecast(&world.history, months, TRAILING_MONTHS)
            .expect("Forecast failed"),
    );
}

// --- Then steps ---

#[then("the history is")]
fn then_history_is(world: &mut ForecastWorld, step: &Step) {
    assert_points(step, &world.history);
}

#[then("the forecast is")]
fn then_forecast_is(world: &mut ForecastWorld, step: &Step) {
    assert_points(step, &world.forecast().points);
}

#[then(expr = "every forecast point is {int}")]
fn then_every_point(world: &mut ForecastWorld, value: i64) {
    assert!(!world.forecast().points.is_empty());
    assert!(world
        .forecast()
        .points
        .iter()
        .all(|p| p.mrr == value as f64));
}

#[then(expr = "the growth is {float} percent")]
fn then_growth(world: &mut ForecastWorld, pct: f64) {
    let summary = ForecastSummary::new(&world.history, world.forecast()).expect("Empty history");
    let growth = summary.growth_pct.expect("Growth undefined");
    assert!((growth - pct).abs() < 1e-9, "growth was {}", growth);
}

#[then(expr = "the history has {int} months ending {word}")]
fn then_history_len(world: &mut ForecastWorld, count: usize, last: String) {
    assert_eq!(world.history.len(), count);
    let month = world.history.last().expect("Empty history").month;
    assert_eq!(month.format("%Y-%m").to_string(), last);
}

//! Churn risk step definitions.

use chrono::NaiveDate;
use churnsim::config::ChurnRiskConfig;
use churnsim::model::{PlanTier, SubscriptionPeriod, SubscriptionStatus, UsageEvent};
use churnsim::reports::{ChurnRiskReport, RiskRule};
use cucumber::{given, then, when, World};

/// Test context for churn risk scenarios.
#[derive(Debug, Default, World)]
pub struct ChurnRiskWorld {
    rule: Option<RiskRule>,
    subscriptions: Vec<SubscriptionPeriod>,
    events: Vec<UsageEvent>,
    report: Option<ChurnRiskReport>,
}

impl ChurnRiskWorld {
    fn add_customer(&mut self, customer: String, tier: &str) {
        let tier: PlanTier = tier.parse().expect("Unknown tier");
        let n = self.subscriptions.len() + 1;
        self.subscriptions.push(SubscriptionPeriod {
            subscription_id: format!("SUB_{:05}", n),
            customer_id: customer,
            plan_tier: tier,
            mrr: tier.mrr(),
            start_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            end_date: None,
            status: SubscriptionStatus::Active,
        });
    }

    fn report(&self) -> &ChurnRiskReport {
        self.report.as_ref().expect("Report not built")
    }
}

// --- Given steps ---

#[given("the default churn risk thresholds")]
fn given_default_rule(world: &mut ChurnRiskWorld) {
    world.rule = Some(RiskRule::from(&ChurnRiskConfig::default()));
}

#[given(expr = "customer {string} on {word} with usage {int}")]
fn given_customer_with_usage(world: &mut ChurnRiskWorld, customer: String, tier: String, usage: u32) {
    world.events.push(UsageEvent {
        event_id: format!("EVT_{:07}", world.events.len() + 1),
        customer_id: customer.clone(),
        event_type: "api_call".to_string(),
        event_date: NaiveDate::from_ymd_opt(2024, 1, 5).unwrap(),
        event_count: usage,
    });
    world.add_customer(customer, &tier);
}

#[given(expr = "customer {string} on {word} with no usage")]
fn given_customer_without_usage(world: &mut ChurnRiskWorld, customer: String, tier: String) {
    world.add_customer(customer, &tier);
}

// --- When steps ---

#[when("the churn risk report is built")]
fn when_report_built(world: &mut ChurnRiskWorld) {
    let rule = world.rule.expect("Thresholds not set");
    world.report = Some(ChurnRiskReport::build(
        &world.subscriptions,
        &world.events,
        rule,
    ));
}

// --- Then steps ---

#[then(regex = r"^(\d+) rows? (?:is|are) flagged$")]
fn then_flagged_count(world: &mut ChurnRiskWorld, count: usize) {
    assert_eq!(world.report().flagged.len(), count);
}

#[then(expr = "flagged row {int} is {string} with mrr {int} and usage {int}")]
fn then_flagged_row(
    world: &mut ChurnRiskWorld,
    index: usize,
    customer: String,
    mrr: u32,
    usage: u64,
) {
    let row = &world.report().flagged[index - 1];
    assert_eq!(row.customer_id, customer);
    assert_eq!(row.mrr, mrr);
    assert_eq!(row.total_usage, usage);
}

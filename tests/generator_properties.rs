//! Generator properties checked across many seeds.

use std::collections::BTreeMap;

use churnsim::config::SimulationConfig;
use churnsim::generator::customers::generate_customers;
use churnsim::generator::lifecycle::simulate_customer;
use churnsim::generator::usage::simulate_usage;
use churnsim::generator::{generate, Catalog, Dataset, RowIds};
use churnsim::model::{SubscriptionPeriod, UsageEvent};
use churnsim::sampling::seeded;
use churnsim::tables::write_rows;

const SEEDS: u64 = 40;

fn dataset(seed: u64) -> (SimulationConfig, Dataset) {
    let config = SimulationConfig {
        seed,
        customers: 25,
        ..Default::default()
    };
    let dataset = generate(&config).unwrap();
    (config, dataset)
}

fn periods_by_customer(dataset: &Dataset) -> BTreeMap<&str, Vec<&SubscriptionPeriod>> {
    let mut map: BTreeMap<&str, Vec<&SubscriptionPeriod>> = BTreeMap::new();
    for s in &dataset.subscriptions {
        map.entry(s.customer_id.as_str()).or_default().push(s);
    }
    map
}

/// Replay the generator's draw order, keeping each period's usage apart.
fn usage_per_period(config: &SimulationConfig) -> Vec<(SubscriptionPeriod, Vec<UsageEvent>)> {
    let catalog = Catalog::standard().unwrap();
    let mut rng = seeded(config.seed);
    let mut ids = RowIds::default();

    let customers = generate_customers(
        &mut rng,
        &catalog,
        config.customers,
        config.window_start,
        config.latest_signup().unwrap(),
    );
    let periods: Vec<SubscriptionPeriod> = customers
        .iter()
        .flat_map(|c| simulate_customer(&mut rng, &catalog, c, config.window_end, &mut ids))
        .collect();
    periods
        .into_iter()
        .map(|p| {
            let events = simulate_usage(&mut rng, &catalog, &p, config.window_end, &mut ids);
            (p, events)
        })
        .collect()
}

#[test]
fn usage_dates_fall_inside_their_own_period() {
    for seed in 0..SEEDS {
        let (config, dataset) = dataset(seed);
        let grouped = usage_per_period(&config);

        // The replay must reproduce the generated table exactly.
        let replayed: Vec<&UsageEvent> = grouped.iter().flat_map(|(_, e)| e).collect();
        assert_eq!(replayed, dataset.usage_events.iter().collect::<Vec<_>>());

        for (period, events) in &grouped {
            for event in events {
                assert_eq!(event.customer_id, period.customer_id);
                assert!(
                    event.event_date >= period.start_date
                        && event.event_date <= period.end_or(config.window_end),
                    "seed {}: {} on {} outside {}",
                    seed,
                    event.event_id,
                    event.event_date,
                    period.subscription_id
                );
            }
        }
    }
}

#[test]
fn every_date_lies_inside_the_window() {
    for seed in 0..SEEDS {
        let (config, dataset) = dataset(seed);
        for c in &dataset.customers {
            assert!(c.signup_date >= config.window_start);
            assert!(c.signup_date <= config.latest_signup().unwrap());
        }
        for s in &dataset.subscriptions {
            assert!(s.start_date <= config.window_end);
            if let Some(end) = s.end_date {
                assert!(end < config.window_end);
            }
        }
        for t in &dataset.sales_touches {
            assert!(t.touch_date <= config.window_end);
        }
    }
}

#[test]
fn first_period_starts_on_signup() {
    for seed in 0..SEEDS {
        let (_, dataset) = dataset(seed);
        let periods = periods_by_customer(&dataset);
        for c in &dataset.customers {
            assert_eq!(periods[c.customer_id.as_str()][0].start_date, c.signup_date);
        }
    }
}

#[test]
fn mrr_matches_tier_price() {
    for seed in 0..SEEDS {
        let (_, dataset) = dataset(seed);
        assert!(dataset
            .subscriptions
            .iter()
            .all(|s| s.mrr == s.plan_tier.mrr()));
    }
}

#[test]
fn equal_seeds_give_byte_identical_tables() {
    fn bytes(dataset: &Dataset) -> Vec<Vec<u8>> {
        let mut out = vec![Vec::new(), Vec::new(), Vec::new(), Vec::new()];
        write_rows(&mut out[0], &dataset.customers).unwrap();
        write_rows(&mut out[1], &dataset.subscriptions).unwrap();
        write_rows(&mut out[2], &dataset.usage_events).unwrap();
        write_rows(&mut out[3], &dataset.sales_touches).unwrap();
        out
    }

    for seed in [0, 7, 42] {
        let (_, a) = dataset(seed);
        let (_, b) = dataset(seed);
        assert_eq!(bytes(&a), bytes(&b));
    }
}

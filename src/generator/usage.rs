//! Usage event generation.

use chrono::{Duration, NaiveDate};
use rand::Rng;

use super::{Catalog, RowIds};
use crate::model::{SubscriptionPeriod, UsageEvent};
use crate::sampling::poisson;

/// Days between usage anchors.
pub const STEP_DAYS: i64 = 30;
/// Events land up to this many days after their anchor.
pub const MAX_OFFSET_DAYS: i64 = 29;
/// Bounds on a single event's count.
pub const MIN_EVENT_COUNT: u32 = 1;
pub const MAX_EVENT_COUNT: u32 = 10;

/// Simulate usage for one subscription period.
///
/// Walks the period in 30-day steps. Each step draws a Poisson number of
/// candidate events at the tier's intensity; candidates landing after the
/// period end are dropped without drawing their type or count.
pub fn simulate_usage<R: Rng + ?Sized>(
    rng: &mut R,
    catalog: &Catalog,
    period: &SubscriptionPeriod,
    window_end: NaiveDate,
    ids: &mut RowIds,
) -> Vec<UsageEvent> {
    let end = period.end_or(window_end);
    let intensity = period.plan_tier.usage_intensity();
    let mut events = Vec::new();
    let mut anchor = period.start_date;

    while anchor <= end {
        let candidates = poisson(rng, intensity);
        for _ in 0..candidates {
            let event_date = anchor + Duration::days(rng.random_range(0..=MAX_OFFSET_DAYS));
            if event_date > end {
                continue;
            }
            let event_type = catalog.event_types.sample(rng).to_string();
            let event_count = rng.random_range(MIN_EVENT_COUNT..=MAX_EVENT_COUNT);
            events.push(UsageEvent {
                event_id: ids.next_event(),
                customer_id: period.customer_id.clone(),
                event_type,
                event_date,
                event_count,
            });
        }
        anchor += Duration::days(STEP_DAYS);
    }

    events
}

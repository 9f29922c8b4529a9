//! Sales touch generation. Independent of subscription state.

use chrono::NaiveDate;
use rand::Rng;

use super::{Catalog, RowIds};
use crate::model::{sales_rep, Customer, SalesTouch};
use crate::sampling::{poisson, uniform_date};

/// Mean of the Poisson part of the per-customer touch count.
pub const MEAN_EXTRA_TOUCHES: f64 = 4.0;

/// Simulate outreach for one customer. Always yields at least one touch.
///
/// Draw order per touch: date, type, outcome, rep.
pub fn simulate_touches<R: Rng + ?Sized>(
    rng: &mut R,
    catalog: &Catalog,
    customer: &Customer,
    window_end: NaiveDate,
    ids: &mut RowIds,
) -> Vec<SalesTouch> {
    let count = poisson(rng, MEAN_EXTRA_TOUCHES) + 1;

    (0..count)
        .map(|_| {
            let touch_date = uniform_date(rng, customer.signup_date, window_end);
            let touch_type = catalog.touch_types.sample(rng).to_string();
            let outcome = catalog.touch_outcomes.sample(rng).to_string();
            let rep = *catalog.sales_reps.sample(rng);
            SalesTouch {
                touch_id: ids.next_touch(),
                customer_id: customer.customer_id.clone(),
                touch_type,
                touch_date,
                outcome,
                sales_rep: sales_rep(rep),
            }
        })
        .collect()
}

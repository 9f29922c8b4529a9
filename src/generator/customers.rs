//! Customer generation.

use chrono::NaiveDate;
use rand::Rng;

use super::Catalog;
use crate::model::{company_name, customer_id, Customer};
use crate::sampling::uniform_date;

/// Draw one customer. `n` is the 1-based row number.
///
/// Draw order: signup date, industry, country, channel, employee count.
pub fn generate_customer<R: Rng + ?Sized>(
    rng: &mut R,
    catalog: &Catalog,
    n: usize,
    window_start: NaiveDate,
    latest_signup: NaiveDate,
) -> Customer {
    let signup_date = uniform_date(rng, window_start, latest_signup);
    let industry = catalog.industries.sample(rng).to_string();
    let country = catalog.countries.sample(rng).to_string();
    let acquisition_channel = catalog.channels.sample(rng).to_string();
    let employee_count = *catalog.employee_counts.sample(rng);

    Customer {
        customer_id: customer_id(n),
        company_name: company_name(n),
        industry,
        country,
        acquisition_channel,
        signup_date,
        employee_count,
    }
}

/// Draw `count` independent customers.
pub fn generate_customers<R: Rng + ?Sized>(
    rng: &mut R,
    catalog: &Catalog,
    count: usize,
    window_start: NaiveDate,
    latest_signup: NaiveDate,
) -> Vec<Customer> {
    (1..=count)
        .map(|n| generate_customer(rng, catalog, n, window_start, latest_signup))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::catalog::{CHANNEL_WEIGHTS, COUNTRY_WEIGHTS, INDUSTRIES};
    use crate::sampling::seeded;

    #[test]
    fn test_customers_within_domains() {
        let catalog = Catalog::standard().unwrap();
        let start = NaiveDate::from_ymd_opt(2023, 7, 1).unwrap();
        let latest = NaiveDate::from_ymd_opt(2024, 11, 1).unwrap();
        let mut rng = seeded(42);

        let customers = generate_customers(&mut rng, &catalog, 200, start, latest);

        assert_eq!(customers.len(), 200);
        assert_eq!(customers[0].customer_id, "CUST_0001");
        assert_eq!(customers[199].customer_id, "CUST_0200");
        for c in &customers {
            assert!(c.signup_date >= start && c.signup_date <= latest);
            assert!(INDUSTRIES.contains(&c.industry.as_str()));
            assert!(COUNTRY_WEIGHTS.iter().any(|(k, _)| *k == c.country));
            assert!(CHANNEL_WEIGHTS.iter().any(|(k, _)| *k == c.acquisition_channel));
        }
    }
}

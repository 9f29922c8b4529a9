//! Synthetic dataset generation.
//!
//! Produces the four relational tables in a fixed draw order from a single
//! explicitly passed random source:
//!
//! ```text
//! customers ──> subscription lifecycles ──> usage events
//!     └───────> sales touches
//! ```
//!
//! All customers are drawn first, then every lifecycle in customer order,
//! then usage in subscription order, then touches in customer order. The
//! same seed therefore always yields the same tables.

pub mod catalog;
pub mod customers;
pub mod lifecycle;
pub mod touches;
pub mod usage;

use chrono::NaiveDate;
use rand::Rng;
use tracing::{debug, info};

pub use catalog::Catalog;

use crate::config::{ConfigError, SimulationConfig};
use crate::model::{
    event_id, subscription_id, touch_id, Customer, SalesTouch, SubscriptionPeriod, UsageEvent,
};
use crate::sampling::{seeded, SamplingError};

/// Errors that prevent generation from starting.
#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
    #[error("Sampling setup failed: {0}")]
    Sampling(#[from] SamplingError),

    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),
}

/// Running row counters for the globally numbered tables.
#[derive(Debug, Default)]
pub struct RowIds {
    subscriptions: usize,
    events: usize,
    touches: usize,
}

impl RowIds {
    pub fn next_subscription(&mut self) -> String {
        self.subscriptions += 1;
        subscription_id(self.subscriptions)
    }

    pub fn next_event(&mut self) -> String {
        self.events += 1;
        event_id(self.events)
    }

    pub fn next_touch(&mut self) -> String {
        self.touches += 1;
        touch_id(self.touches)
    }
}

/// The four generated tables.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dataset {
    pub customers: Vec<Customer>,
    pub subscriptions: Vec<SubscriptionPeriod>,
    pub usage_events: Vec<UsageEvent>,
    pub sales_touches: Vec<SalesTouch>,
}

impl Dataset {
    /// Row counts per table.
    pub fn summary(&self) -> DatasetSummary {
        DatasetSummary {
            customers: self.customers.len(),
            subscriptions: self.subscriptions.len(),
            usage_events: self.usage_events.len(),
            sales_touches: self.sales_touches.len(),
        }
    }
}

/// Row counts for a generated dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DatasetSummary {
    pub customers: usize,
    pub subscriptions: usize,
    pub usage_events: usize,
    pub sales_touches: usize,
}

impl std::fmt::Display for DatasetSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Generated:")?;
        writeln!(f, "   - {} customers", self.customers)?;
        writeln!(f, "   - {} subscriptions", self.subscriptions)?;
        writeln!(f, "   - {} usage events", self.usage_events)?;
        write!(f, "   - {} sales touches", self.sales_touches)
    }
}

/// Generator bound to a validated configuration.
pub struct Generator {
    config: SimulationConfig,
    latest_signup: NaiveDate,
    catalog: Catalog,
}

impl Generator {
    /// Create a generator with the standard catalog.
    pub fn new(config: SimulationConfig) -> Result<Self, GenerateError> {
        config.validate()?;
        let latest_signup = config.latest_signup().ok_or_else(|| {
            ConfigError::InvalidWindow("signup margin out of range".to_string())
        })?;
        Ok(Self {
            config,
            latest_signup,
            catalog: Catalog::standard()?,
        })
    }

    /// Generate a dataset, drawing from `rng`.
    pub fn generate_with<R: Rng + ?Sized>(&self, rng: &mut R) -> Dataset {
        let window_end = self.config.window_end;
        let mut ids = RowIds::default();

        let customers = customers::generate_customers(
            rng,
            &self.catalog,
            self.config.customers,
            self.config.window_start,
            self.latest_signup,
        );
        debug!(count = customers.len(), "Customers generated");

        let subscriptions: Vec<SubscriptionPeriod> = customers
            .iter()
            .flat_map(|c| {
                lifecycle::simulate_customer(rng, &self.catalog, c, window_end, &mut ids)
            })
            .collect();
        debug!(count = subscriptions.len(), "Subscriptions generated");

        let usage_events: Vec<UsageEvent> = subscriptions
            .iter()
            .flat_map(|s| usage::simulate_usage(rng, &self.catalog, s, window_end, &mut ids))
            .collect();
        debug!(count = usage_events.len(), "Usage events generated");

        let sales_touches: Vec<SalesTouch> = customers
            .iter()
            .flat_map(|c| touches::simulate_touches(rng, &self.catalog, c, window_end, &mut ids))
            .collect();
        debug!(count = sales_touches.len(), "Sales touches generated");

        Dataset {
            customers,
            subscriptions,
            usage_events,
            sales_touches,
        }
    }

    /// Generate a dataset from the configured seed.
    pub fn generate(&self) -> Dataset {
        info!(
            seed = self.config.seed,
            customers = self.config.customers,
            window_start = %self.config.window_start,
            window_end = %self.config.window_end,
            "Generating dataset"
        );
        let mut rng = seeded(self.config.seed);
        self.generate_with(&mut rng)
    }
}

/// Generate a dataset for `config` from its seed.
pub fn generate(config: &SimulationConfig) -> Result<Dataset, GenerateError> {
    Ok(Generator::new(config.clone())?.generate())
}

//! Flat CSV tables.
//!
//! Each table is a header row followed by one record per row. Headers are
//! written from [`TableRow::HEADERS`] rather than inferred from the first
//! record, so an empty table still carries its header.

use std::fs::File;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, info};

use crate::generator::Dataset;
use crate::model::{Customer, SalesTouch, SubscriptionPeriod, UsageEvent};


pub const CUSTOMERS_FILE: &str = "customers.csv";
pub const SUBSCRIPTIONS_FILE: &str = "subscriptions.csv";
pub const USAGE_EVENTS_FILE: &str = "usage_events.csv";
pub const SALES_TOUCHES_FILE: &str = "sales_touches.csv";

/// Result type for table operations.
pub type Result<T> = std::result::Result<T, TableError>;

/// Errors reading or writing a table.
#[derive(Debug, thiserror::Error)]
pub enum TableError {
    #[error("Input file not found: {}", .0.display())]
    Missing(PathBuf),

    #[error("IO error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed table {}: {source}", .path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

impl TableError {
    fn io(path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    fn csv(path: &Path, source: csv::Error) -> Self {
        Self::Csv {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// A row type with a fixed column order.
pub trait TableRow: Serialize + DeserializeOwned {
    const HEADERS: &'static [&'static str];
}

impl TableRow for Customer {
    const HEADERS: &'static [&'static str] = &[
        "customer_id",
        "company_name",
        "industry",
        "country",
        "acquisition_channel",
        "signup_date",
        "employee_count",
    ];
}

impl TableRow for SubscriptionPeriod {
    const HEADERS: &'static [&'static str] = &[
        "subscription_id",
        "customer_id",
        "plan_tier",
        "mrr",
        "start_date",
        "end_date",
        "status",
    ];
}

impl TableRow for UsageEvent {
    const HEADERS: &'static [&'static str] = &[
        "event_id",
        "customer_id",
        "event_type",
        "event_date",
        "event_count",
    ];
}

impl TableRow for SalesTouch {
    const HEADERS: &'static [&'static str] = &[
        "touch_id",
        "customer_id",
        "touch_type",
        "touch_date",
        "outcome",
        "sales_rep",
    ];
}

/// Serialize rows to any writer.
pub fn write_rows<T: TableRow, W: std::io::Write>(writer: W, rows: &[T]) -> csv::Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    writer.write_record(T::HEADERS)?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

/// Write a table file, replacing any existing one.
pub fn write_table<T: TableRow>(path: &Path, rows: &[T]) -> Result<()> {
    let file = File::create(path).map_err(|e| TableError::io(path, e))?;
    write_rows(file, rows).map_err(|e| TableError::csv(path, e))?;
    debug!(path = %path.display(), rows = rows.len(), "Table written");
    Ok(())
}

/// Read a table file.
pub fn read_table<T: TableRow>(path: &Path) -> Result<Vec<T>> {
    if !path.exists() {
        return Err(TableError::Missing(path.to_path_buf()));
    }
    let mut reader = csv::Reader::from_path(path).map_err(|e| TableError::csv(path, e))?;
    let rows = reader
        .deserialize()
        .collect::<csv::Result<Vec<T>>>()
        .map_err(|e| TableError::csv(path, e))?;
    debug!(path = %path.display(), rows = rows.len(), "Table read");
    Ok(rows)
}

/// Write all four tables into `dir`, creating it if needed.
pub fn write_dataset(dir: &Path, dataset: &Dataset) -> Result<()> {
    std::fs::create_dir_all(dir).map_err(|e| TableError::io(dir, e))?;

    write_table(&dir.join(CUSTOMERS_FILE), &dataset.customers)?;
    write_table(&dir.join(SUBSCRIPTIONS_FILE), &dataset.subscriptions)?;
    write_table(&dir.join(USAGE_EVENTS_FILE), &dataset.usage_events)?;
    write_table(&dir.join(SALES_TOUCHES_FILE), &dataset.sales_touches)?;

    info!(dir = %dir.display(), "Dataset written");
    Ok(())
}

/// Read all four tables from `dir`.
pub fn read_dataset(dir: &Path) -> Result<Dataset> {
    Ok(Dataset {
        customers: read_table(&dir.join(CUSTOMERS_FILE))?,
        subscriptions: read_subscriptions(dir)?,
        usage_events: read_usage_events(dir)?,
        sales_touches: read_table(&dir.join(SALES_TOUCHES_FILE))?,
    })
}

pub fn read_subscriptions(dir: &Path) -> Result<Vec<SubscriptionPeriod>> {
    read_table(&dir.join(SUBSCRIPTIONS_FILE))
}

pub fn read_usage_events(dir: &Path) -> Result<Vec<UsageEvent>> {
    read_table(&dir.join(USAGE_EVENTS_FILE))
}

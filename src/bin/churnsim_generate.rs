//! churnsim-generate: Synthetic dataset generator
//!
//! Draws customers, subscription lifecycles, usage events and sales touches
//! from the configured seed and writes them as CSV tables.
//!
//! ## Output
//! ```text
//! <data_dir>/customers.csv
//! <data_dir>/subscriptions.csv
//! <data_dir>/usage_events.csv
//! <data_dir>/sales_touches.csv
//! ```
//!
//! ## Configuration
//! - First argument: path to a YAML config file (optional)
//! - CHURNSIM_CONFIG: path to a YAML config file (optional)
//! - CHURNSIM__SIMULATION__SEED, CHURNSIM__PATHS__DATA_DIR, ...: overrides
//! - CHURNSIM_LOG: tracing filter (default: info)

use tracing::{error, info};

use churnsim::generator::Generator;
use churnsim::tables::write_dataset;
use churnsim::utils::bootstrap::{init_tracing, load_config};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let config = load_config().inspect_err(|e| error!(error = %e, "Configuration failed"))?;
    let generator = Generator::new(config.simulation)
        .inspect_err(|e| error!(error = %e, "Generator setup failed"))?;

    let dataset = generator.generate();

    let data_dir = &config.paths.data_dir;
    write_dataset(data_dir, &dataset)
        .inspect_err(|e| error!(error = %e, "Failed to write dataset"))?;

    info!(data_dir = %data_dir.display(), "churnsim-generate finished");
    println!("{}", dataset.summary());
    println!("Tables saved to {}", data_dir.display());
    Ok(())
}

//! churnsim-churn-risk: High churn-risk report
//!
//! Reads subscriptions and usage events, flags paying customers with low
//! product usage, prints the highest-paying ones and exports the full list.
//!
//! ## Configuration
//! - First argument: path to a YAML config file (optional)
//! - CHURNSIM__CHURN_RISK__MRR_THRESHOLD (default: 20)
//! - CHURNSIM__CHURN_RISK__USAGE_THRESHOLD (default: 1000)
//! - CHURNSIM__CHURN_RISK__TOP_N (default: 10)
//! - CHURNSIM_LOG: tracing filter (default: info)

use tracing::{error, info};

use churnsim::model::SubscriptionPeriod;
use churnsim::reports::{ChurnRiskReport, RiskRule, HIGH_RISK_FILE};
use churnsim::tables::{read_subscriptions, read_usage_events};
use churnsim::utils::bootstrap::{init_tracing, load_config, output_path};

const PREVIEW_ROWS: usize = 5;

fn print_preview(subscriptions: &[SubscriptionPeriod]) {
    println!("--- Subscriptions (first {}) ---", PREVIEW_ROWS);
    for s in subscriptions.iter().take(PREVIEW_ROWS) {
        let end = s
            .end_date
            .map(|d| d.to_string())
            .unwrap_or_default();
        println!(
            "{} {} {:<10} {:>3} {} {:<10} {}",
            s.subscription_id, s.customer_id, s.plan_tier, s.mrr, s.start_date, end, s.status
        );
    }
    println!();
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let config = load_config().inspect_err(|e| error!(error = %e, "Configuration failed"))?;
    let data_dir = &config.paths.data_dir;

    let subscriptions = read_subscriptions(data_dir)
        .inspect_err(|e| error!(error = %e, "Run churnsim-generate first"))?;
    let usage = read_usage_events(data_dir)
        .inspect_err(|e| error!(error = %e, "Run churnsim-generate first"))?;
    info!(
        subscriptions = subscriptions.len(),
        usage_events = usage.len(),
        "Tables loaded"
    );

    print_preview(&subscriptions);

    let rule = RiskRule::from(&config.churn_risk);
    let report = ChurnRiskReport::build(&subscriptions, &usage, rule);
    println!("{}", report.display(config.churn_risk.top_n));

    let path = output_path(&config.paths.output_dir, HIGH_RISK_FILE)?;
    report
        .export(&path)
        .inspect_err(|e| error!(error = %e, "Export failed"))?;
    println!("Saved {}", path.display());
    Ok(())
}

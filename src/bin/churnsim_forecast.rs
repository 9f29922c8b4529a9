//! churnsim-forecast: MRR trend and straight-line forecast
//!
//! Builds the monthly MRR series from the subscription table, projects it
//! forward by the mean of recent month-over-month changes and saves a
//! trend chart.
//!
//! ## Configuration
//! - First argument: path to a YAML config file (optional)
//! - CHURNSIM__FORECAST__MONTHS_AHEAD (default: 6)
//! - CHURNSIM__FORECAST__AS_OF: processing date for open periods (default: today)
//! - CHURNSIM_LOG: tracing filter (default: info)

use tracing::{error, info};

use churnsim::reports::forecast::format_points;
use churnsim::reports::{
    build_monthly_mrr, render_chart, straight_line_forecast, ForecastSummary, MRR_CHART_FILE,
};
use churnsim::tables::read_subscriptions;
use churnsim::utils::bootstrap::{init_tracing, load_config, output_path};

const HISTORY_TAIL: usize = 6;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let config = load_config().inspect_err(|e| error!(error = %e, "Configuration failed"))?;
    let settings = &config.forecast;

    let subscriptions = read_subscriptions(&config.paths.data_dir)
        .inspect_err(|e| error!(error = %e, "Run churnsim-generate first"))?;

    let as_of = settings.as_of_or_today();
    let history = build_monthly_mrr(&subscriptions, as_of);
    info!(%as_of, months = history.len(), "Monthly MRR built");

    let tail = &history[history.len().saturating_sub(HISTORY_TAIL)..];
    println!("--- Last {} months ---", tail.len());
    print!("{}", format_points(tail));

    let forecast = straight_line_forecast(&history, settings.months_ahead, settings.trailing_months)
        .inspect_err(|e| error!(error = %e, "Forecast failed"))?;
    println!();
    println!("--- Forecast (avg change {:.2}/month) ---", forecast.avg_change);
    print!("{}", format_points(&forecast.points));

    let path = output_path(&config.paths.output_dir, MRR_CHART_FILE)?;
    render_chart(
        &history,
        &forecast.points,
        settings.chart_width,
        settings.chart_height,
        &path,
    )
    .inspect_err(|e| error!(error = %e, "Chart rendering failed"))?;
    println!("Saved {}", path.display());

    let summary = ForecastSummary::new(&history, &forecast)?;
    println!();
    println!("{}", summary);
    Ok(())
}

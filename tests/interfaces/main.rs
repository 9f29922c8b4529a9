//! Interface tests for the generator and reports using Cucumber.
//!
//! ```bash
//! cargo test --test interfaces
//! ```

mod steps;

use cucumber::World;
use steps::churn_risk::ChurnRiskWorld;
use steps::forecast::ForecastWorld;
use steps::lifecycle::LifecycleWorld;

#[tokio::main]
async fn main() {
    println!("\n=== Running Subscription Lifecycle Tests ===\n");
    LifecycleWorld::cucumber()
        .fail_on_skipped()
        .run("tests/interfaces/features/subscription_lifecycle.feature")
        .await;

    println!("\n=== Running Churn Risk Tests ===\n");
    ChurnRiskWorld::cucumber()
        .fail_on_skipped()
        .run("tests/interfaces/features/churn_risk.feature")
        .await;

    println!("\n=== Running Forecast Tests ===\n");
    ForecastWorld::cucumber()
        .fail_on_skipped()
        .run("tests/interfaces/features/forecast.feature")
        .await;
}

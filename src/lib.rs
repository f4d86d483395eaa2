// Analytics core for the employee performance KPI dashboard.
//
// The pipeline runs generator → metrics → filter → aggregate → report. The
// generated table is cached per parameter set; everything downstream builds
// fresh views from it and never mutates it.
pub mod aggregate;
pub mod config;
pub mod error;
pub mod filter;
pub mod generator;
pub mod metrics;
pub mod output;
pub mod report;
pub mod telemetry;
pub mod types;
pub mod util;

pub use aggregate::GroupKey;
pub use config::ScoringConfig;
pub use error::DashboardError;
pub use filter::{FilterSet, ScoreRange, Selection};
pub use generator::{dataset, generate, GeneratorParams};
pub use report::DashboardView;
pub use types::{Dataset, Department, Employee, Metric, PerformanceBand, Project, Role};

/// Install logging and check the scoring constants. Call once before any
/// dataset is generated; a malformed weight vector or band table stops here.
pub fn startup(log_level: &str) -> Result<(), DashboardError> {
    telemetry::init(log_level)?;
    ScoringConfig::standard().validate()?;
    tracing::debug!("scoring configuration validated");
    Ok(())
}

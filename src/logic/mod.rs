pub mod aggregate;
pub mod report;
pub mod rules;
pub mod thresholds;

pub use aggregate::{aggregate_24h, aggregate_7d, aggregate_window, WindowTotal};
pub use report::{RegionOverview, WeatherService};
pub use rules::{evaluate, RulesEngine};
pub use thresholds::{ThresholdSet, ThresholdTable};

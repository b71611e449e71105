pub mod cyclone;
pub mod drought;
pub mod engine;
pub mod flood;
pub mod heatwave;
pub mod landslide;

pub use engine::{evaluate, rule_for, RulesEngine};
pub use flood::FLOOD_WARNING_PRECIPITATION_24H_MM;
pub use heatwave::HEATWAVE_WARNING_TEMPERATURE_C;

use crate::logic::thresholds::ThresholdSet;
use crate::models::{HazardKind, RegionalProfile, Severity, WeatherSample};

/// What a triggered rule reports. The engine turns it into an `Alert`.
#[derive(Debug, Clone, PartialEq)]
pub struct Finding {
    pub severity: Severity,
    pub title: String,
    pub description: String,
}

impl Finding {
    pub fn new(
        severity: Severity,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            severity,
            title: title.into(),
            description: description.into(),
        }
    }
}

/// Trait for hazard rules
pub trait Rule: Send + Sync {
    /// Hazard this rule classifies
    fn kind(&self) -> HazardKind;

    /// Human-readable name
    fn name(&self) -> &'static str;

    /// Evaluate the rule and return a finding if its trigger condition is met.
    /// Implementations pick the single highest applicable severity.
    fn evaluate(
        &self,
        sample: &WeatherSample,
        profile: &RegionalProfile,
        thresholds: &ThresholdSet,
    ) -> Option<Finding>;
}

/// Formats an optional reading for alert text.
pub(crate) fn reading(value: Option<f64>, precision: usize, unit: &str) -> String {
    match value {
        Some(v) => format!("{:.*}{}", precision, v, unit),
        None => "n/a".to_string(),
    }
}

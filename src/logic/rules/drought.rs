use super::{Finding, Rule};
use crate::logic::thresholds::ThresholdSet;
use crate::models::{HazardKind, RegionalProfile, Severity, WeatherSample};

/// Drought rule - a dry week under high temperatures. Always Advisory.
pub struct DroughtRule;

impl Rule for DroughtRule {
    fn kind(&self) -> HazardKind {
        HazardKind::Drought
    }

    fn name(&self) -> &'static str {
        "Drought"
    }

    fn evaluate(
        &self,
        sample: &WeatherSample,
        profile: &RegionalProfile,
        thresholds: &ThresholdSet,
    ) -> Option<Finding> {
        let t = &thresholds.drought;
        let precipitation = sample
            .precipitation_7d()
            .filter(|p| *p < t.precipitation_7d_mm)?;
        let temperature = sample.temperature().filter(|temp| *temp > t.temperature_c)?;

        let description = format!(
            "Low rainfall in {}: {:.1}mm in 7 days. Temperature: {:.0}°C. \
             Water conservation measures advised.",
            profile.name, precipitation, temperature
        );

        Some(Finding::new(
            Severity::Advisory,
            "Drought Conditions",
            description,
        ))
    }
}

use super::{Finding, Rule};
use crate::logic::thresholds::ThresholdSet;
use crate::models::{HazardKind, RegionalProfile, Severity, WeatherSample};

/// Cyclone rule - coastal regions only
///
/// Conditions:
/// - region is coastal
/// - wind speed above the cyclone wind threshold
/// - 24h precipitation above the cyclone rain threshold
///
/// Always Warning.
pub struct CycloneRule;

impl Rule for CycloneRule {
    fn kind(&self) -> HazardKind {
        HazardKind::Cyclone
    }

    fn name(&self) -> &'static str {
        "Cyclone"
    }

    fn evaluate(
        &self,
        sample: &WeatherSample,
        profile: &RegionalProfile,
        thresholds: &ThresholdSet,
    ) -> Option<Finding> {
        if !profile.coastal {
            return None;
        }

        let t = &thresholds.cyclone;
        let wind = sample.wind_speed().filter(|w| *w > t.wind_speed_kmh)?;
        let precipitation = sample
            .precipitation_24h()
            .filter(|p| *p > t.precipitation_24h_mm)?;

        let description = format!(
            "Cyclonic conditions detected along the {} coast. Wind speed: {:.0} km/h, \
             heavy rainfall: {:.1}mm. Coastal areas at high risk.",
            profile.name, wind, precipitation
        );

        Some(Finding::new(Severity::Warning, "Cyclone Alert", description))
    }
}

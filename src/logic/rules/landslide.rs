use super::{Finding, Rule};
use crate::logic::thresholds::ThresholdSet;
use crate::models::{HazardKind, RegionalProfile, Severity, WeatherSample};

/// Landslide rule - heavy rain over mountainous terrain. Always Warning.
pub struct LandslideRule;

impl Rule for LandslideRule {
    fn kind(&self) -> HazardKind {
        HazardKind::Landslide
    }

    fn name(&self) -> &'static str {
        "Landslide"
    }

    fn evaluate(
        &self,
        sample: &WeatherSample,
        profile: &RegionalProfile,
        thresholds: &ThresholdSet,
    ) -> Option<Finding> {
        if !profile.mountainous {
            return None;
        }

        let precipitation = sample
            .precipitation_24h()
            .filter(|p| *p > thresholds.landslide.precipitation_24h_mm)?;

        let description = format!(
            "Heavy rainfall in the mountainous terrain of {}: {:.1}mm in 24 hours. \
             High risk of landslides. Avoid hilly routes.",
            profile.name, precipitation
        );

        Some(Finding::new(Severity::Warning, "Landslide Risk", description))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(precipitation_24h_mm: f64) -> WeatherSample {
        WeatherSample {
            temperature_c: 18.0,
            humidity_pct: 80.0,
            wind_speed_kmh: 15.0,
            precipitation_24h_mm,
            precipitation_7d_mm: 300.0,
        }
    }

    #[test]
    fn mountain_downpour_is_warning() {
        let profile = RegionalProfile::new("sikkim", "Sikkim").mountainous(true);
        let finding = LandslideRule
            .evaluate(&sample(130.0), &profile, &ThresholdSet::default())
            .unwrap();
        assert_eq!(finding.severity, Severity::Warning);
        assert!(finding.description.contains("130.0mm"));
        assert!(finding.description.contains("Sikkim"));
    }

    #[test]
    fn flat_region_never_gets_landslide() {
        let profile = RegionalProfile::new("kerala", "Kerala").coastal(true);
        assert!(LandslideRule
            .evaluate(&sample(300.0), &profile, &ThresholdSet::default())
            .is_none());
    }

    #[test]
    fn threshold_is_strict() {
        let profile = RegionalProfile::new("sikkim", "Sikkim").mountainous(true);
        assert!(LandslideRule
            .evaluate(&sample(100.0), &profile, &ThresholdSet::default())
            .is_none());
    }
}

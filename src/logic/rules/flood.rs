use super::{reading, Finding, Rule};
use crate::logic::thresholds::ThresholdSet;
use crate::models::{HazardKind, RegionalProfile, Severity, WeatherSample};

/// Flood rule - heavy rain or saturated air
///
/// Conditions:
/// - 24h precipitation above the flood threshold, OR
/// - relative humidity above the flood humidity threshold
///
/// Severity levels:
/// - Warning: 24h precipitation above the warning cut-off (100 mm)
/// - Watch: otherwise, including humidity-only triggers
pub struct FloodRule;

/// 24h precipitation above which a flood alert escalates to Warning.
pub const FLOOD_WARNING_PRECIPITATION_24H_MM: f64 = 100.0;

impl Rule for FloodRule {
    fn kind(&self) -> HazardKind {
        HazardKind::Flood
    }

    fn name(&self) -> &'static str {
        "Flood"
    }

    fn evaluate(
        &self,
        sample: &WeatherSample,
        profile: &RegionalProfile,
        thresholds: &ThresholdSet,
    ) -> Option<Finding> {
        let t = &thresholds.flood;
        let precipitation = sample.precipitation_24h();
        let humidity = sample.humidity();

        let heavy_rain = precipitation.is_some_and(|p| p > t.precipitation_24h_mm);
        let saturated = humidity.is_some_and(|h| h > t.humidity_pct);
        if !heavy_rain && !saturated {
            return None;
        }

        // Severity is keyed on rainfall alone, so a humidity-only trigger never
        // escalates past Watch.
        let severity = if precipitation.is_some_and(|p| p > FLOOD_WARNING_PRECIPITATION_24H_MM) {
            Severity::Warning
        } else {
            Severity::Watch
        };

        Some(self.build_finding(severity, profile, precipitation, humidity))
    }
}

impl FloodRule {
    fn build_finding(
        &self,
        severity: Severity,
        profile: &RegionalProfile,
        precipitation: Option<f64>,
        humidity: Option<f64>,
    ) -> Finding {
        let title = match severity {
            Severity::Warning => "Flood Warning",
            _ => "Flood Watch",
        };

        let description = format!(
            "Heavy rainfall detected in {}: {} in 24 hours. Humidity at {}. \
             Risk of flooding in low-lying areas.",
            profile.name,
            reading(precipitation, 1, "mm"),
            reading(humidity, 0, "%"),
        );

        Finding::new(severity, title, description)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(precipitation_24h_mm: f64, humidity_pct: f64) -> WeatherSample {
        WeatherSample {
            temperature_c: 25.0,
            humidity_pct,
            wind_speed_kmh: 10.0,
            precipitation_24h_mm,
            precipitation_7d_mm: 80.0,
        }
    }

    fn eval(s: WeatherSample) -> Option<Finding> {
        let profile = RegionalProfile::new("kerala", "Kerala");
        FloodRule.evaluate(&s, &profile, &ThresholdSet::default())
    }

    #[test]
    fn dry_and_comfortable_is_quiet() {
        assert!(eval(sample(10.0, 60.0)).is_none());
    }

    #[test]
    fn thresholds_are_strict() {
        assert!(eval(sample(50.0, 85.0)).is_none());
    }

    #[test]
    fn heavy_rain_is_watch() {
        let finding = eval(sample(75.0, 60.0)).unwrap();
        assert_eq!(finding.severity, Severity::Watch);
        assert!(finding.description.contains("75.0mm"));
        assert!(finding.description.contains("Kerala"));
    }

    #[test]
    fn extreme_rain_is_warning() {
        let finding = eval(sample(120.0, 60.0)).unwrap();
        assert_eq!(finding.severity, Severity::Warning);
        assert_eq!(finding.title, "Flood Warning");
    }

    #[test]
    fn exactly_100mm_stays_watch() {
        let finding = eval(sample(100.0, 60.0)).unwrap();
        assert_eq!(finding.severity, Severity::Watch);
    }

    #[test]
    fn lowered_trigger_does_not_move_warning_cut_off() {
        let mut t = ThresholdSet::default();
        t.flood.precipitation_24h_mm = 0.0;
        let profile = RegionalProfile::new("kerala", "Kerala");
        let finding = FloodRule.evaluate(&sample(5.0, 90.0), &profile, &t).unwrap();
        assert_eq!(finding.severity, Severity::Watch);
    }

    #[test]
    fn humidity_alone_triggers_watch() {
        let finding = eval(sample(0.0, 95.0)).unwrap();
        assert_eq!(finding.severity, Severity::Watch);
        assert!(finding.description.contains("95%"));
    }

    #[test]
    fn unusable_rain_falls_back_to_humidity() {
        let finding = eval(sample(f64::NAN, 92.0)).unwrap();
        assert_eq!(finding.severity, Severity::Watch);
        assert!(finding.description.contains("n/a"));

        assert!(eval(sample(f64::NAN, 60.0)).is_none());
    }
}

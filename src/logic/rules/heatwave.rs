use super::{Finding, Rule};
use crate::logic::thresholds::ThresholdSet;
use crate::models::{HazardKind, RegionalProfile, Severity, WeatherSample};

/// Heatwave rule - current temperature above the heat threshold
///
/// Severity levels:
/// - Warning: above the warning cut-off (40°C)
/// - Advisory: otherwise
pub struct HeatwaveRule;

/// Temperature above which a heatwave alert escalates to Warning.
pub const HEATWAVE_WARNING_TEMPERATURE_C: f64 = 40.0;

impl Rule for HeatwaveRule {
    fn kind(&self) -> HazardKind {
        HazardKind::Heatwave
    }

    fn name(&self) -> &'static str {
        "Heatwave"
    }

    fn evaluate(
        &self,
        sample: &WeatherSample,
        profile: &RegionalProfile,
        thresholds: &ThresholdSet,
    ) -> Option<Finding> {
        let t = &thresholds.heatwave;
        let temperature = sample.temperature().filter(|temp| *temp > t.temperature_c)?;

        let severity = if temperature > HEATWAVE_WARNING_TEMPERATURE_C {
            Severity::Warning
        } else {
            Severity::Advisory
        };

        let title = match severity {
            Severity::Warning => "Heatwave Warning",
            _ => "Heatwave Advisory",
        };

        let description = format!(
            "Extreme temperatures detected in {}: {:.0}°C. Stay hydrated and avoid \
             outdoor activities during peak hours.",
            profile.name, temperature
        );

        Some(Finding::new(severity, title, description))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn eval(temperature_c: f64) -> Option<Finding> {
        let s = WeatherSample {
            temperature_c,
            humidity_pct: 40.0,
            wind_speed_kmh: 10.0,
            precipitation_24h_mm: 0.0,
            precipitation_7d_mm: 20.0,
        };
        let profile = RegionalProfile::new("rajasthan", "Rajasthan");
        HeatwaveRule.evaluate(&s, &profile, &ThresholdSet::default())
    }

    #[test]
    fn mild_is_quiet() {
        assert!(eval(30.0).is_none());
        assert!(eval(35.0).is_none());
    }

    #[test]
    fn hot_is_advisory() {
        let finding = eval(37.0).unwrap();
        assert_eq!(finding.severity, Severity::Advisory);
        assert!(finding.description.contains("37°C"));
        assert!(finding.description.contains("Rajasthan"));
    }

    #[test]
    fn exactly_40_stays_advisory() {
        assert_eq!(eval(40.0).unwrap().severity, Severity::Advisory);
    }

    #[test]
    fn extreme_is_warning() {
        let finding = eval(41.0).unwrap();
        assert_eq!(finding.severity, Severity::Warning);
        assert_eq!(finding.title, "Heatwave Warning");
    }

    #[test]
    fn raised_trigger_keeps_fixed_warning_cut_off() {
        let mut t = ThresholdSet::default();
        t.heatwave.temperature_c = 38.0;
        let s = WeatherSample {
            temperature_c: 41.0,
            humidity_pct: 20.0,
            wind_speed_kmh: 10.0,
            precipitation_24h_mm: 0.0,
            precipitation_7d_mm: 20.0,
        };
        let profile = RegionalProfile::new("rajasthan", "Rajasthan");
        let finding = HeatwaveRule.evaluate(&s, &profile, &t).unwrap();
        assert_eq!(finding.severity, Severity::Warning);
    }

    #[test]
    fn implausible_temperature_is_ignored() {
        assert!(eval(f64::NAN).is_none());
        assert!(eval(90.0).is_none());
    }
}

use crate::error::{HazardError, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && (-90.0..=90.0).contains(&self.latitude)
            && (-180.0..=180.0).contains(&self.longitude)
    }
}

/// Static characteristics of a region. Loaded once and never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionalProfile {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub coastal: bool,
    #[serde(default)]
    pub mountainous: bool,
    pub baseline_annual_precipitation_mm: f64,
    pub baseline_temperature_c: f64,
    pub baseline_humidity_pct: f64,
    #[serde(default)]
    pub coordinates: Option<Coordinates>,
}

impl RegionalProfile {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            coastal: false,
            mountainous: false,
            baseline_annual_precipitation_mm: 0.0,
            baseline_temperature_c: 0.0,
            baseline_humidity_pct: 0.0,
            coordinates: None,
        }
    }

    pub fn coastal(mut self, coastal: bool) -> Self {
        self.coastal = coastal;
        self
    }

    pub fn mountainous(mut self, mountainous: bool) -> Self {
        self.mountainous = mountainous;
        self
    }

    pub fn with_baseline(
        mut self,
        annual_precipitation_mm: f64,
        temperature_c: f64,
        humidity_pct: f64,
    ) -> Self {
        self.baseline_annual_precipitation_mm = annual_precipitation_mm;
        self.baseline_temperature_c = temperature_c;
        self.baseline_humidity_pct = humidity_pct;
        self
    }

    pub fn at(mut self, latitude: f64, longitude: f64) -> Self {
        self.coordinates = Some(Coordinates::new(latitude, longitude));
        self
    }

    /// Rejects profiles that cannot be evaluated or fetched for.
    pub fn validate(&self) -> Result<()> {
        if self.id.trim().is_empty() {
            return Err(HazardError::InvalidProfile(format!(
                "profile '{}' is missing an id",
                self.name
            )));
        }
        if self.name.trim().is_empty() {
            return Err(HazardError::InvalidProfile(format!(
                "profile '{}' is missing a name",
                self.id
            )));
        }

        let baselines = [
            (
                "baseline_annual_precipitation_mm",
                self.baseline_annual_precipitation_mm,
            ),
            ("baseline_temperature_c", self.baseline_temperature_c),
            ("baseline_humidity_pct", self.baseline_humidity_pct),
        ];
        for (field, value) in baselines {
            if !value.is_finite() {
                return Err(HazardError::InvalidProfile(format!(
                    "profile '{}': {} is not a finite number",
                    self.id, field
                )));
            }
        }

        if self.baseline_annual_precipitation_mm < 0.0 {
            return Err(HazardError::InvalidProfile(format!(
                "profile '{}': annual precipitation cannot be negative",
                self.id
            )));
        }
        if !(0.0..=100.0).contains(&self.baseline_humidity_pct) {
            return Err(HazardError::InvalidProfile(format!(
                "profile '{}': humidity baseline {} is outside 0-100%",
                self.id, self.baseline_humidity_pct
            )));
        }
        if let Some(coords) = self.coordinates {
            if !coords.is_valid() {
                return Err(HazardError::InvalidProfile(format!(
                    "profile '{}': coordinates ({}, {}) are out of range",
                    self.id, coords.latitude, coords.longitude
                )));
            }
        }

        Ok(())
    }

    /// Upper-cased first three characters of the id, used as the alert id prefix.
    pub fn alert_prefix(&self) -> String {
        self.id.chars().take(3).collect::<String>().to_uppercase()
    }

    pub fn terrain(&self) -> &'static str {
        match (self.coastal, self.mountainous) {
            (true, true) => "Coastal, Mountainous",
            (true, false) => "Coastal",
            (false, true) => "Mountainous",
            (false, false) => "Inland",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid() -> RegionalProfile {
        RegionalProfile::new("kerala", "Kerala")
            .coastal(true)
            .with_baseline(3000.0, 27.0, 80.0)
            .at(10.85, 76.27)
    }

    #[test]
    fn valid_profile_passes() {
        assert!(valid().validate().is_ok());
    }

    #[test]
    fn missing_id_is_rejected() {
        let mut profile = valid();
        profile.id = "  ".into();
        assert!(matches!(
            profile.validate(),
            Err(HazardError::InvalidProfile(_))
        ));
    }

    #[test]
    fn missing_name_is_rejected() {
        let mut profile = valid();
        profile.name = String::new();
        assert!(matches!(
            profile.validate(),
            Err(HazardError::InvalidProfile(_))
        ));
    }

    #[test]
    fn non_finite_baseline_is_rejected() {
        let profile = valid().with_baseline(f64::NAN, 27.0, 80.0);
        assert!(profile.validate().is_err());
    }

    #[test]
    fn humidity_baseline_out_of_range_is_rejected() {
        let profile = valid().with_baseline(3000.0, 27.0, 120.0);
        assert!(profile.validate().is_err());
    }

    #[test]
    fn bad_coordinates_are_rejected() {
        let profile = valid().at(95.0, 76.0);
        assert!(profile.validate().is_err());
    }

    #[test]
    fn alert_prefix_uses_first_three_chars() {
        assert_eq!(valid().alert_prefix(), "KER");
        assert_eq!(RegionalProfile::new("goa", "Goa").alert_prefix(), "GOA");
        assert_eq!(RegionalProfile::new("dl", "Delhi").alert_prefix(), "DL");
    }

    #[test]
    fn profile_deserializes_with_defaults() {
        let yaml = r#"
id: delhi
name: Delhi
baseline_annual_precipitation_mm: 790
baseline_temperature_c: 25
baseline_humidity_pct: 55
"#;
        let profile: RegionalProfile = serde_yaml::from_str(yaml).unwrap();
        assert!(!profile.coastal);
        assert!(!profile.mountainous);
        assert!(profile.coordinates.is_none());
        assert_eq!(profile.terrain(), "Inland");
    }
}

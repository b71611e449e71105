use crate::error::{HazardError, Result};
use crate::models::RegionalProfile;
use crate::regions::RegionStore;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// Trigger values only. The Warning cut-offs are fixed in the rules themselves,
// and unknown keys are rejected so a config cannot appear to move them.

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FloodThresholds {
    pub precipitation_24h_mm: f64,
    pub humidity_pct: f64,
}

impl Default for FloodThresholds {
    fn default() -> Self {
        Self {
            precipitation_24h_mm: 50.0,
            humidity_pct: 85.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HeatwaveThresholds {
    pub temperature_c: f64,
}

impl Default for HeatwaveThresholds {
    fn default() -> Self {
        Self {
            temperature_c: 35.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CycloneThresholds {
    pub wind_speed_kmh: f64,
    pub precipitation_24h_mm: f64,
}

impl Default for CycloneThresholds {
    fn default() -> Self {
        Self {
            wind_speed_kmh: 60.0,
            precipitation_24h_mm: 30.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DroughtThresholds {
    pub precipitation_7d_mm: f64,
    pub temperature_c: f64,
}

impl Default for DroughtThresholds {
    fn default() -> Self {
        Self {
            precipitation_7d_mm: 5.0,
            temperature_c: 30.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LandslideThresholds {
    pub precipitation_24h_mm: f64,
}

impl Default for LandslideThresholds {
    fn default() -> Self {
        Self {
            precipitation_24h_mm: 100.0,
        }
    }
}

/// Trigger values for every weather-derived hazard. Missing fields in config
/// fall back to the defaults.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ThresholdSet {
    pub flood: FloodThresholds,
    pub heatwave: HeatwaveThresholds,
    pub cyclone: CycloneThresholds,
    pub drought: DroughtThresholds,
    pub landslide: LandslideThresholds,
}

impl ThresholdSet {
    fn values(&self) -> [(&'static str, f64); 8] {
        [
            ("flood.precipitation_24h_mm", self.flood.precipitation_24h_mm),
            ("flood.humidity_pct", self.flood.humidity_pct),
            ("heatwave.temperature_c", self.heatwave.temperature_c),
            ("cyclone.wind_speed_kmh", self.cyclone.wind_speed_kmh),
            ("cyclone.precipitation_24h_mm", self.cyclone.precipitation_24h_mm),
            ("drought.precipitation_7d_mm", self.drought.precipitation_7d_mm),
            ("drought.temperature_c", self.drought.temperature_c),
            (
                "landslide.precipitation_24h_mm",
                self.landslide.precipitation_24h_mm,
            ),
        ]
    }

    pub fn validate(&self) -> Result<()> {
        for (field, value) in self.values() {
            // Temperatures may legitimately sit below zero; everything else is a
            // quantity that cannot.
            let allow_negative = field.ends_with("temperature_c");
            if !value.is_finite() || (!allow_negative && value < 0.0) {
                return Err(HazardError::Config(format!(
                    "threshold {} has invalid value {}",
                    field, value
                )));
            }
        }
        Ok(())
    }
}

/// Default thresholds plus optional per-region overrides, fixed at load time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ThresholdTable {
    #[serde(default)]
    pub default: ThresholdSet,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub overrides: BTreeMap<String, ThresholdSet>,
}

impl ThresholdTable {
    pub fn new(default: ThresholdSet) -> Self {
        Self {
            default,
            overrides: BTreeMap::new(),
        }
    }

    pub fn with_override(mut self, region_id: impl Into<String>, set: ThresholdSet) -> Self {
        self.overrides.insert(region_id.into(), set);
        self
    }

    /// Checks every set and that each override names a known region.
    pub fn validate(&self, regions: &RegionStore) -> Result<()> {
        self.default.validate()?;
        for (region_id, set) in &self.overrides {
            regions.get(region_id)?;
            set.validate()?;
        }
        Ok(())
    }

    pub fn for_region(&self, profile: &RegionalProfile) -> &ThresholdSet {
        self.overrides.get(&profile.id).unwrap_or(&self.default)
    }
}

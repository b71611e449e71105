use crate::error::{HazardError, Result};
use crate::models::RegionalProfile;
use std::collections::BTreeMap;
use std::path::Path;

/// Immutable lookup of regional profiles keyed by id.
#[derive(Debug, Clone)]
pub struct RegionStore {
    profiles: BTreeMap<String, RegionalProfile>,
}

impl RegionStore {
    /// Builds a store, validating every profile and rejecting duplicate ids.
    pub fn new(profiles: Vec<RegionalProfile>) -> Result<Self> {
        let mut map = BTreeMap::new();
        for profile in profiles {
            profile.validate()?;
            if map.contains_key(&profile.id) {
                return Err(HazardError::InvalidProfile(format!(
                    "duplicate region id '{}'",
                    profile.id
                )));
            }
            map.insert(profile.id.clone(), profile);
        }

        if map.is_empty() {
            return Err(HazardError::InvalidProfile(
                "region table contains no profiles".into(),
            ));
        }

        Ok(Self { profiles: map })
    }

    /// The bundled table of Indian states and union territories.
    pub fn builtin() -> Result<Self> {
        Self::new(builtin_profiles())
    }

    /// Loads a replacement table from a YAML list of profiles.
    pub fn from_yaml_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            HazardError::Config(format!("Failed to read regions file {:?}: {}", path, e))
        })?;
        Self::from_yaml_str(&content)
    }

    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let profiles: Vec<RegionalProfile> = serde_yaml::from_str(content)?;
        Self::new(profiles)
    }

    pub fn get(&self, id: &str) -> Result<&RegionalProfile> {
        self.profiles
            .get(id)
            .ok_or_else(|| HazardError::UnknownRegion(id.to_string()))
    }

    /// Looks a region up by id or display name, ignoring case.
    pub fn find(&self, query: &str) -> Result<&RegionalProfile> {
        if let Some(profile) = self.profiles.get(query) {
            return Ok(profile);
        }

        let needle = query.trim().to_lowercase();
        self.profiles
            .values()
            .find(|p| p.id.to_lowercase() == needle || p.name.to_lowercase() == needle)
            .ok_or_else(|| HazardError::UnknownRegion(query.to_string()))
    }

    pub fn iter(&self) -> impl Iterator<Item = &RegionalProfile> {
        self.profiles.values()
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}

fn region(
    id: &str,
    name: &str,
    coastal: bool,
    mountainous: bool,
    (annual_mm, temp_c, humidity): (f64, f64, f64),
    (lat, lon): (f64, f64),
) -> RegionalProfile {
    RegionalProfile::new(id, name)
        .coastal(coastal)
        .mountainous(mountainous)
        .with_baseline(annual_mm, temp_c, humidity)
        .at(lat, lon)
}

// Baselines are long-term annual rainfall (mm), mean temperature (°C) and mean
// relative humidity (%).
#[rustfmt::skip]
fn builtin_profiles() -> Vec<RegionalProfile> {
    vec![
        region("andaman-and-nicobar-islands", "Andaman and Nicobar Islands", true, false, (3000.0, 27.0, 80.0), (11.7401, 92.6586)),
        region("andhra-pradesh", "Andhra Pradesh", true, false, (940.0, 28.0, 65.0), (15.9129, 79.7400)),
        region("arunachal-pradesh", "Arunachal Pradesh", false, true, (2780.0, 18.0, 80.0), (28.2180, 94.7278)),
        region("assam", "Assam", false, true, (2820.0, 24.0, 82.0), (26.2006, 92.9376)),
        region("bihar", "Bihar", false, false, (1200.0, 26.0, 68.0), (25.0961, 85.3131)),
        region("chandigarh", "Chandigarh", false, false, (1100.0, 23.0, 60.0), (30.7333, 76.7794)),
        region("chhattisgarh", "Chhattisgarh", false, false, (1400.0, 26.0, 62.0), (21.2787, 81.8661)),
        region("dadra-and-nagar-haveli-and-daman-and-diu", "Dadra and Nagar Haveli and Daman and Diu", true, false, (2000.0, 27.0, 70.0), (20.1809, 73.0169)),
        region("delhi", "Delhi", false, false, (790.0, 25.0, 55.0), (28.7041, 77.1025)),
        region("goa", "Goa", true, false, (3000.0, 27.0, 78.0), (15.2993, 74.1240)),
        region("gujarat", "Gujarat", true, false, (830.0, 27.0, 60.0), (22.2587, 71.1924)),
        region("haryana", "Haryana", false, false, (615.0, 25.0, 55.0), (29.0588, 76.0856)),
        region("himachal-pradesh", "Himachal Pradesh", false, true, (1250.0, 15.0, 62.0), (31.1048, 77.1734)),
        region("jammu-and-kashmir", "Jammu and Kashmir", false, true, (1010.0, 13.0, 60.0), (33.7782, 76.5762)),
        region("jharkhand", "Jharkhand", false, false, (1300.0, 25.0, 65.0), (23.6102, 85.2799)),
        region("karnataka", "Karnataka", true, false, (1150.0, 25.0, 68.0), (15.3173, 75.7139)),
        region("kerala", "Kerala", true, false, (3050.0, 27.0, 80.0), (10.8505, 76.2711)),
        region("ladakh", "Ladakh", false, true, (100.0, 5.0, 35.0), (34.1526, 77.5771)),
        region("lakshadweep", "Lakshadweep", true, false, (1640.0, 28.0, 78.0), (10.5667, 72.6417)),
        region("madhya-pradesh", "Madhya Pradesh", false, false, (1160.0, 25.0, 58.0), (22.9734, 78.6569)),
        region("maharashtra", "Maharashtra", false, false, (1180.0, 26.0, 62.0), (19.7515, 75.7139)),
        region("manipur", "Manipur", false, true, (1470.0, 21.0, 75.0), (24.6637, 93.9063)),
        region("meghalaya", "Meghalaya", false, true, (2820.0, 19.0, 82.0), (25.4670, 91.3662)),
        region("mizoram", "Mizoram", false, true, (2540.0, 21.0, 78.0), (23.1645, 92.9376)),
        region("nagaland", "Nagaland", false, true, (1880.0, 20.0, 78.0), (26.1584, 94.5624)),
        region("odisha", "Odisha", true, false, (1450.0, 27.0, 72.0), (20.9517, 85.0985)),
        region("puducherry", "Puducherry", true, false, (1300.0, 29.0, 75.0), (11.9416, 79.8083)),
        region("punjab", "Punjab", false, false, (650.0, 24.0, 58.0), (31.1471, 75.3412)),
        region("rajasthan", "Rajasthan", false, false, (420.0, 27.0, 45.0), (27.0238, 74.2179)),
        region("sikkim", "Sikkim", false, true, (2740.0, 15.0, 82.0), (27.5330, 88.5122)),
        region("tamil-nadu", "Tamil Nadu", true, false, (950.0, 29.0, 70.0), (11.1271, 78.6569)),
        region("telangana", "Telangana", false, false, (900.0, 27.0, 58.0), (18.1124, 79.0193)),
        region("tripura", "Tripura", false, false, (2200.0, 25.0, 78.0), (23.9408, 91.9882)),
        region("uttar-pradesh", "Uttar Pradesh", false, false, (990.0, 26.0, 62.0), (26.8467, 80.9462)),
        region("uttarakhand", "Uttarakhand", false, true, (1500.0, 18.0, 65.0), (30.0668, 79.0193)),
        region("west-bengal", "West Bengal", true, false, (1750.0, 26.0, 75.0), (22.9868, 87.8550)),
    ]
}

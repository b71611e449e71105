use crate::error::{HazardError, Result};
use crate::logic::thresholds::ThresholdTable;
use crate::models::DataSourceKind;
use crate::regions::RegionStore;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

const DATA_SOURCE_ENV: &str = "HAZARDWATCH_DATA_SOURCE";

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    #[serde(default = "default_data_source")]
    pub data_source: DataSourceKind,
    #[serde(default)]
    pub open_meteo: OpenMeteoConfig,
    #[serde(default)]
    pub mock: MockConfig,
    #[serde(default)]
    pub thresholds: ThresholdTable,
    /// YAML list of profiles replacing the bundled region table.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub regions_file: Option<PathBuf>,
    #[serde(default = "default_max_concurrent_fetches")]
    pub max_concurrent_fetches: usize,
}

fn default_data_source() -> DataSourceKind {
    DataSourceKind::OpenMeteo
}

fn default_max_concurrent_fetches() -> usize {
    6
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct OpenMeteoConfig {
    pub forecast_url: String,
    pub geocoding_url: String,
    pub forecast_days: u32,
    pub timeout_secs: u64,
    pub retries: u32,
}

impl Default for OpenMeteoConfig {
    fn default() -> Self {
        Self {
            forecast_url: "https://api.open-meteo.com/v1/forecast".into(),
            geocoding_url: "https://geocoding-api.open-meteo.com/v1/search".into(),
            forecast_days: 7,
            timeout_secs: 10,
            retries: 1,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct MockConfig {
    /// Simulated network delay per fetch.
    pub latency_ms: u64,
}

impl Config {
    /// Load config from the override path or the standard locations. With no
    /// override and no file on disk, defaults are used.
    pub fn load(config_override: Option<PathBuf>) -> Result<Self> {
        let config_path = match config_override {
            Some(p) => {
                if !p.exists() {
                    return Err(HazardError::Config(format!(
                        "Config file not found at {:?}",
                        p
                    )));
                }
                Some(p)
            }
            None => Self::find_config_path(),
        };

        let mut config = match config_path {
            Some(path) => {
                tracing::debug!("Loading config from {:?}", path);
                let config_str = std::fs::read_to_string(&path)
                    .map_err(|e| HazardError::Config(format!("Failed to read config: {}", e)))?;
                Self::from_yaml_str(&config_str)?
            }
            None => {
                tracing::debug!("No config file found, using defaults");
                Config::default()
            }
        };

        if let Ok(value) = std::env::var(DATA_SOURCE_ENV) {
            config.data_source = parse_data_source(&value)?;
        }

        Ok(config)
    }

    pub fn from_yaml_str(content: &str) -> Result<Self> {
        // Substitute environment variables
        let content = Self::substitute_env_vars(content)?;

        serde_yaml::from_str(&content)
            .map_err(|e| HazardError::Config(format!("Failed to parse config: {}", e)))
    }

    /// Search for config.yaml in standard locations.
    fn find_config_path() -> Option<PathBuf> {
        // Try current directory first
        let local_config = PathBuf::from("config/config.yaml");
        if local_config.exists() {
            return Some(local_config);
        }

        // Try XDG config directory
        Self::default_config_path().filter(|p| p.exists())
    }

    /// Default config location (~/.config/hazardwatch/config.yaml).
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("hazardwatch").join("config.yaml"))
    }

    /// The region table: the configured file if any, otherwise the bundled one.
    pub fn load_regions(&self) -> Result<RegionStore> {
        match &self.regions_file {
            Some(path) => RegionStore::from_yaml_file(path),
            None => RegionStore::builtin(),
        }
    }

    /// Checks settings that serde cannot, including that threshold overrides
    /// name known regions.
    pub fn validate(&self, regions: &RegionStore) -> Result<()> {
        if !(1..=16).contains(&self.open_meteo.forecast_days) {
            return Err(HazardError::Config(format!(
                "open_meteo.forecast_days must be between 1 and 16, got {}",
                self.open_meteo.forecast_days
            )));
        }
        if self.max_concurrent_fetches == 0 {
            return Err(HazardError::Config(
                "max_concurrent_fetches must be at least 1".into(),
            ));
        }
        self.thresholds.validate(regions)
    }

    fn substitute_env_vars(content: &str) -> Result<String> {
        let mut result = content.to_string();

        // Find all ${VAR_NAME} patterns and substitute
        let re = regex_lite::Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
            .map_err(|e| HazardError::Config(format!("Invalid substitution pattern: {}", e)))?;

        for cap in re.captures_iter(content) {
            let var_name = &cap[1];
            let placeholder = &cap[0];
            if let Ok(value) = std::env::var(var_name) {
                result = result.replace(placeholder, &value);
            }
        }

        Ok(result)
    }
}

fn parse_data_source(value: &str) -> Result<DataSourceKind> {
    match value.trim().to_lowercase().as_str() {
        "mock" => Ok(DataSourceKind::Mock),
        "open_meteo" | "open-meteo" | "openmeteo" => Ok(DataSourceKind::OpenMeteo),
        other => Err(HazardError::Config(format!(
            "{} must be 'mock' or 'open_meteo', got '{}'",
            DATA_SOURCE_ENV, other
        ))),
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_source: default_data_source(),
            open_meteo: OpenMeteoConfig::default(),
            mock: MockConfig::default(),
            thresholds: ThresholdTable::default(),
            regions_file: None,
            max_concurrent_fetches: default_max_concurrent_fetches(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_yaml_gives_defaults() {
        let config = Config::from_yaml_str("{}").unwrap();
        assert_eq!(config.data_source, DataSourceKind::OpenMeteo);
        assert_eq!(config.open_meteo.forecast_days, 7);
        assert_eq!(config.max_concurrent_fetches, 6);
        assert_eq!(config.thresholds, ThresholdTable::default());
        assert!(config.validate(&RegionStore::builtin().unwrap()).is_ok());
    }

    #[test]
    fn full_yaml_parses() {
        let yaml = r#"
data_source: mock
mock:
  latency_ms: 250
open_meteo:
  forecast_days: 3
  retries: 0
thresholds:
  default:
    heatwave:
      temperature_c: 37
  overrides:
    sikkim:
      landslide:
        precipitation_24h_mm: 70
max_concurrent_fetches: 2
"#;
        let config = Config::from_yaml_str(yaml).unwrap();
        assert_eq!(config.data_source, DataSourceKind::Mock);
        assert_eq!(config.mock.latency_ms, 250);
        assert_eq!(config.open_meteo.forecast_days, 3);
        assert_eq!(config.open_meteo.retries, 0);
        assert_eq!(
            config.open_meteo.forecast_url,
            "https://api.open-meteo.com/v1/forecast"
        );
        assert_eq!(config.thresholds.default.heatwave.temperature_c, 37.0);
        assert_eq!(
            config.thresholds.overrides["sikkim"]
                .landslide
                .precipitation_24h_mm,
            70.0
        );
        assert_eq!(config.max_concurrent_fetches, 2);
        assert!(config.validate(&RegionStore::builtin().unwrap()).is_ok());
    }

    #[test]
    fn env_vars_are_substituted() {
        std::env::set_var("HAZARDWATCH_TEST_FORECAST_URL", "http://localhost:9999/forecast");
        let yaml = "open_meteo:\n  forecast_url: ${HAZARDWATCH_TEST_FORECAST_URL}\n";
        let config = Config::from_yaml_str(yaml).unwrap();
        assert_eq!(
            config.open_meteo.forecast_url,
            "http://localhost:9999/forecast"
        );
    }

    #[test]
    fn unset_env_var_is_left_in_place() {
        let yaml = "open_meteo:\n  geocoding_url: ${HAZARDWATCH_TEST_UNSET_VAR}\n";
        let config = Config::from_yaml_str(yaml).unwrap();
        assert_eq!(
            config.open_meteo.geocoding_url,
            "${HAZARDWATCH_TEST_UNSET_VAR}"
        );
    }

    #[test]
    fn unknown_data_source_is_rejected() {
        assert!(Config::from_yaml_str("data_source: satellite").is_err());
        assert!(parse_data_source("satellite").is_err());
        assert_eq!(parse_data_source("Mock").unwrap(), DataSourceKind::Mock);
        assert_eq!(
            parse_data_source("open-meteo").unwrap(),
            DataSourceKind::OpenMeteo
        );
    }

    #[test]
    fn override_for_unknown_region_fails_validation() {
        let yaml = r#"
thresholds:
  overrides:
    atlantis:
      flood:
        humidity_pct: 70
"#;
        let config = Config::from_yaml_str(yaml).unwrap();
        assert!(matches!(
            config.validate(&RegionStore::builtin().unwrap()),
            Err(HazardError::UnknownRegion(_))
        ));
    }

    #[test]
    fn out_of_range_settings_fail_validation() {
        let regions = RegionStore::builtin().unwrap();

        let mut config = Config::default();
        config.open_meteo.forecast_days = 0;
        assert!(config.validate(&regions).is_err());

        let mut config = Config::default();
        config.max_concurrent_fetches = 0;
        assert!(config.validate(&regions).is_err());
    }

    #[test]
    fn example_config_keeps_fixed_warning_cut_offs() {
        use crate::logic::rules::evaluate;
        use crate::models::{HazardKind, Severity, WeatherSample};

        let config =
            Config::from_yaml_str(include_str!("../config/config.yaml.example")).unwrap();
        let regions = RegionStore::builtin().unwrap();
        assert!(config.validate(&regions).is_ok());

        let rajasthan = regions.get("rajasthan").unwrap();
        let thresholds = config.thresholds.for_region(rajasthan);
        for temperature_c in [41.0, 44.0] {
            let sample = WeatherSample {
                temperature_c,
                humidity_pct: 20.0,
                wind_speed_kmh: 10.0,
                precipitation_24h_mm: 0.0,
                precipitation_7d_mm: 20.0,
            };
            let alerts = evaluate(&sample, rajasthan, thresholds);
            let kinds: Vec<_> = alerts.iter().map(|a| (a.kind, a.severity)).collect();
            assert_eq!(kinds, vec![(HazardKind::Heatwave, Severity::Warning)]);
        }
    }

    #[test]
    fn warning_cut_off_in_config_is_rejected() {
        let yaml = r#"
thresholds:
  default:
    flood:
      warning_precipitation_24h_mm: 0
"#;
        assert!(matches!(
            Config::from_yaml_str(yaml),
            Err(HazardError::Config(_))
        ));
    }

    #[test]
    fn missing_override_path_is_an_error() {
        let result = Config::load(Some(PathBuf::from("/nonexistent/hazardwatch.yaml")));
        assert!(matches!(result, Err(HazardError::Config(_))));
    }

    #[test]
    fn missing_regions_file_is_an_error() {
        let config = Config {
            regions_file: Some(PathBuf::from("/nonexistent/regions.yaml")),
            ..Config::default()
        };
        assert!(config.load_regions().is_err());
    }
}

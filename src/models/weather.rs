use super::hazard::Alert;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

const HUMIDITY_RANGE: std::ops::RangeInclusive<f64> = 0.0..=100.0;
const TEMPERATURE_RANGE_C: std::ops::RangeInclusive<f64> = -90.0..=60.0;

/// Point-in-time metrics the rule engine evaluates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeatherSample {
    pub temperature_c: f64,
    pub humidity_pct: f64,
    pub wind_speed_kmh: f64,
    pub precipitation_24h_mm: f64,
    pub precipitation_7d_mm: f64,
}

impl WeatherSample {
    // Accessors return None when a value is NaN, infinite, or physically
    // impossible, so rule conditions that depend on it are simply not met.

    pub fn temperature(&self) -> Option<f64> {
        usable(self.temperature_c, &TEMPERATURE_RANGE_C)
    }

    pub fn humidity(&self) -> Option<f64> {
        usable(self.humidity_pct, &HUMIDITY_RANGE)
    }

    pub fn wind_speed(&self) -> Option<f64> {
        non_negative(self.wind_speed_kmh)
    }

    pub fn precipitation_24h(&self) -> Option<f64> {
        non_negative(self.precipitation_24h_mm)
    }

    pub fn precipitation_7d(&self) -> Option<f64> {
        non_negative(self.precipitation_7d_mm)
    }
}

fn usable(value: f64, range: &std::ops::RangeInclusive<f64>) -> Option<f64> {
    (value.is_finite() && range.contains(&value)).then_some(value)
}

fn non_negative(value: f64) -> Option<f64> {
    (value.is_finite() && value >= 0.0).then_some(value)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum WeatherCondition {
    Sunny,
    PartlyCloudy,
    #[default]
    Cloudy,
    Foggy,
    Rainy,
    Snowy,
    Thunderstorm,
}

impl WeatherCondition {
    /// Maps a WMO weather interpretation code.
    pub fn from_wmo_code(code: u32) -> Self {
        match code {
            0 => WeatherCondition::Sunny,
            1..=3 => WeatherCondition::PartlyCloudy,
            45..=48 => WeatherCondition::Foggy,
            51..=67 | 80..=82 => WeatherCondition::Rainy,
            71..=77 | 85..=86 => WeatherCondition::Snowy,
            95..=99 => WeatherCondition::Thunderstorm,
            _ => WeatherCondition::Cloudy,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            WeatherCondition::Sunny => "Sunny",
            WeatherCondition::PartlyCloudy => "Partly Cloudy",
            WeatherCondition::Cloudy => "Cloudy",
            WeatherCondition::Foggy => "Foggy",
            WeatherCondition::Rainy => "Rainy",
            WeatherCondition::Snowy => "Snowy",
            WeatherCondition::Thunderstorm => "Thunderstorm",
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            WeatherCondition::Sunny => "☀",
            WeatherCondition::PartlyCloudy => "⛅",
            WeatherCondition::Cloudy => "☁",
            WeatherCondition::Foggy => "🌫",
            WeatherCondition::Rainy => "🌧",
            WeatherCondition::Snowy => "❄",
            WeatherCondition::Thunderstorm => "⛈",
        }
    }
}

impl std::fmt::Display for WeatherCondition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentConditions {
    pub location: String,
    pub temperature_c: f64,
    pub condition: WeatherCondition,
    pub humidity_pct: f64,
    pub wind_speed_kmh: f64,
    pub feels_like_c: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyForecast {
    pub date: NaiveDate,
    /// Short weekday name, e.g. "Mon".
    pub day: String,
    pub high_c: f64,
    pub low_c: f64,
    pub condition: WeatherCondition,
}

impl DailyForecast {
    pub fn new(date: NaiveDate, high_c: f64, low_c: f64, condition: WeatherCondition) -> Self {
        Self {
            date,
            day: date.format("%a").to_string(),
            high_c,
            low_c,
            condition,
        }
    }
}

/// Normalized provider output. Precipitation sequences are in window order:
/// the first entries are the ones the aggregator sums.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderSnapshot {
    pub region_id: String,
    pub current: CurrentConditions,
    pub forecast: Vec<DailyForecast>,
    pub hourly_precipitation_mm: Vec<f64>,
    pub daily_precipitation_mm: Vec<f64>,
    /// Notices supplied by the source itself rather than derived from metrics.
    #[serde(default)]
    pub external_alerts: Vec<Alert>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataSourceKind {
    Mock,
    OpenMeteo,
}

impl DataSourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DataSourceKind::Mock => "Mock data",
            DataSourceKind::OpenMeteo => "Open-Meteo",
        }
    }
}

impl std::fmt::Display for DataSourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherReport {
    pub region_id: String,
    pub region_name: String,
    pub source: DataSourceKind,
    pub current: CurrentConditions,
    pub forecast: Vec<DailyForecast>,
    pub sample: WeatherSample,
    pub alerts: Vec<Alert>,
    pub generated_at: DateTime<Utc>,
}

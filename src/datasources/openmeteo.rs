use crate::config::OpenMeteoConfig;
use crate::error::{HazardError, Result};
use crate::models::{
    Coordinates, CurrentConditions, DailyForecast, ProviderSnapshot, RegionalProfile,
    WeatherCondition,
};
use chrono::NaiveDate;
use reqwest::Url;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

const CURRENT_FIELDS: &str = "temperature_2m,relativehumidity_2m,precipitation,windspeed_10m,weathercode";
const HOURLY_FIELDS: &str = "temperature_2m,relativehumidity_2m,precipitation,windspeed_10m,weathercode";
const DAILY_FIELDS: &str = "temperature_2m_max,temperature_2m_min,weathercode,precipitation_sum";
const FORECAST_DISPLAY_DAYS: usize = 5;
const RETRY_BACKOFF: Duration = Duration::from_millis(500);

#[derive(Clone)]
pub struct OpenMeteoClient {
    client: reqwest::Client,
    config: OpenMeteoConfig,
    geocode_cache: Arc<RwLock<HashMap<String, Coordinates>>>,
}

// Open-Meteo API response structures
#[derive(Debug, Deserialize)]
struct OmForecastResponse {
    #[serde(default)]
    current: Option<OmCurrent>,
    #[serde(default)]
    hourly: Option<OmHourly>,
    #[serde(default)]
    daily: Option<OmDaily>,
}

#[derive(Debug, Deserialize)]
struct OmCurrent {
    temperature_2m: f64,
    relativehumidity_2m: f64,
    windspeed_10m: f64,
    #[serde(default)]
    weathercode: u32,
}

#[derive(Debug, Deserialize)]
struct OmHourly {
    #[serde(default)]
    precipitation: Vec<Option<f64>>,
}

#[derive(Debug, Deserialize)]
struct OmDaily {
    time: Vec<String>,
    temperature_2m_max: Vec<Option<f64>>,
    temperature_2m_min: Vec<Option<f64>>,
    #[serde(default)]
    weathercode: Vec<Option<u32>>,
    #[serde(default)]
    precipitation_sum: Vec<Option<f64>>,
}

#[derive(Debug, Deserialize)]
struct OmGeocodingResponse {
    #[serde(default)]
    results: Option<Vec<OmGeocodingResult>>,
}

#[derive(Debug, Deserialize)]
struct OmGeocodingResult {
    latitude: f64,
    longitude: f64,
}

impl OpenMeteoClient {
    pub fn new(config: OpenMeteoConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            config,
            geocode_cache: Arc::new(RwLock::new(HashMap::new())),
        })
    }

    /// Fetch current conditions, hourly precipitation and the daily forecast.
    pub async fn fetch(&self, profile: &RegionalProfile) -> Result<ProviderSnapshot> {
        let coords = self.coordinates_for(profile).await?;
        let forecast_days = self.config.forecast_days.to_string();
        let url = build_url(
            &self.config.forecast_url,
            &[
                ("latitude", coords.latitude.to_string().as_str()),
                ("longitude", coords.longitude.to_string().as_str()),
                ("current", CURRENT_FIELDS),
                ("hourly", HOURLY_FIELDS),
                ("daily", DAILY_FIELDS),
                ("timezone", "auto"),
                ("forecast_days", forecast_days.as_str()),
            ],
        )?;

        let response: OmForecastResponse = self.get_json(url).await?;
        tracing::debug!(region = %profile.id, "Open-Meteo forecast received");
        convert_response(profile, response)
    }

    /// Test connection to the forecast API
    pub async fn test_connection(&self) -> Result<bool> {
        let url = build_url(
            &self.config.forecast_url,
            &[
                ("latitude", "28.7041"),
                ("longitude", "77.1025"),
                ("current", "temperature_2m"),
            ],
        )?;

        let response = self.client.get(url).send().await.map_err(|e| {
            HazardError::DataSourceUnavailable(format!("Open-Meteo: {}", e))
        })?;

        Ok(response.status().is_success())
    }

    /// Profile coordinates, falling back to the geocoding API by region name.
    async fn coordinates_for(&self, profile: &RegionalProfile) -> Result<Coordinates> {
        if let Some(coords) = profile.coordinates {
            return Ok(coords);
        }

        if let Some(coords) = self.geocode_cache.read().await.get(&profile.name) {
            return Ok(*coords);
        }

        let url = build_url(
            &self.config.geocoding_url,
            &[
                ("name", profile.name.as_str()),
                ("count", "1"),
                ("language", "en"),
                ("format", "json"),
            ],
        )?;

        let response: OmGeocodingResponse = self.get_json(url).await?;
        let result = response
            .results
            .and_then(|r| r.into_iter().next())
            .ok_or_else(|| {
                HazardError::InvalidData(format!("Location \"{}\" not found", profile.name))
            })?;

        let coords = Coordinates::new(result.latitude, result.longitude);
        tracing::info!(
            region = %profile.id,
            latitude = coords.latitude,
            longitude = coords.longitude,
            "Geocoded region"
        );
        self.geocode_cache
            .write()
            .await
            .insert(profile.name.clone(), coords);

        Ok(coords)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T> {
        let mut attempt = 0;
        loop {
            match self.try_get_json(url.clone()).await {
                Ok(value) => return Ok(value),
                Err(e) if attempt < self.config.retries => {
                    attempt += 1;
                    tracing::warn!("Open-Meteo request failed (attempt {}): {}", attempt, e);
                    tokio::time::sleep(RETRY_BACKOFF * attempt).await;
                }
                Err(e) => return Err(e),
            }
        }
    }

    async fn try_get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T> {
        let response =
            self.client.get(url).send().await.map_err(|e| {
                HazardError::DataSourceUnavailable(format!("Open-Meteo: {}", e))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(HazardError::DataSourceUnavailable(format!(
                "Open-Meteo returned {}: {}",
                status, body
            )));
        }

        response.json().await.map_err(|e| {
            HazardError::DataSourceUnavailable(format!(
                "Failed to parse Open-Meteo response: {}",
                e
            ))
        })
    }
}

fn build_url(base: &str, params: &[(&str, &str)]) -> Result<Url> {
    Url::parse_with_params(base, params)
        .map_err(|e| HazardError::Config(format!("Invalid Open-Meteo URL {}: {}", base, e)))
}

fn convert_response(
    profile: &RegionalProfile,
    response: OmForecastResponse,
) -> Result<ProviderSnapshot> {
    let current = response.current.ok_or_else(|| {
        HazardError::InvalidData("No current weather data available from Open-Meteo".into())
    })?;
    let daily = response.daily.ok_or_else(|| {
        HazardError::InvalidData("No daily forecast data available from Open-Meteo".into())
    })?;

    let temperature_c = current.temperature_2m.round();
    let current = CurrentConditions {
        location: profile.name.clone(),
        temperature_c,
        condition: WeatherCondition::from_wmo_code(current.weathercode),
        humidity_pct: current.relativehumidity_2m.round(),
        wind_speed_kmh: current.windspeed_10m.round(),
        feels_like_c: temperature_c + 2.0,
    };

    let forecast = convert_daily(&daily)?;

    // Missing readings become NaN so the aggregator skips them.
    let hourly_precipitation_mm = response
        .hourly
        .map(|h| h.precipitation)
        .unwrap_or_default()
        .into_iter()
        .map(|p| p.unwrap_or(f64::NAN))
        .collect();
    let daily_precipitation_mm = daily
        .precipitation_sum
        .iter()
        .map(|p| p.unwrap_or(f64::NAN))
        .collect();

    Ok(ProviderSnapshot {
        region_id: profile.id.clone(),
        current,
        forecast,
        hourly_precipitation_mm,
        daily_precipitation_mm,
        external_alerts: Vec::new(),
    })
}

fn convert_daily(daily: &OmDaily) -> Result<Vec<DailyForecast>> {
    daily
        .time
        .iter()
        .take(FORECAST_DISPLAY_DAYS)
        .enumerate()
        .map(|(i, time)| {
            let date = NaiveDate::parse_from_str(time, "%Y-%m-%d").map_err(|e| {
                HazardError::InvalidData(format!("Invalid forecast date '{}': {}", time, e))
            })?;
            let high = daily.temperature_2m_max.get(i).copied().flatten();
            let low = daily.temperature_2m_min.get(i).copied().flatten();
            let (Some(high), Some(low)) = (high, low) else {
                return Err(HazardError::InvalidData(format!(
                    "Missing temperatures for forecast day {}",
                    time
                )));
            };
            let code = daily.weathercode.get(i).copied().flatten().unwrap_or(3);

            Ok(DailyForecast::new(
                date,
                high.round(),
                low.round(),
                WeatherCondition::from_wmo_code(code),
            ))
        })
        .collect()
}

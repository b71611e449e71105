use crate::config::MockConfig;
use crate::error::Result;
use crate::models::{
    Alert, CurrentConditions, DailyForecast, HazardKind, ProviderSnapshot, RegionalProfile,
    Severity, WeatherCondition,
};
use chrono::{Duration, NaiveDate, Utc};

const FORECAST_DAYS: i64 = 5;
const CALM_WIND_KMH: f64 = 12.0;

/// Offline provider. Conditions follow each region's climate baseline, with a
/// handful of regions pinned to hazardous scenarios so every rule has something
/// to fire on.
#[derive(Debug, Clone)]
pub struct MockProvider {
    latency: std::time::Duration,
}

struct Scenario {
    temperature_c: f64,
    humidity_pct: f64,
    wind_speed_kmh: f64,
    hourly_mm: f64,
    daily_mm: f64,
    condition: WeatherCondition,
}

impl MockProvider {
    pub fn new(config: &MockConfig) -> Self {
        Self {
            latency: std::time::Duration::from_millis(config.latency_ms),
        }
    }

    pub async fn fetch(&self, profile: &RegionalProfile) -> Result<ProviderSnapshot> {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        Ok(snapshot_for(profile, Utc::now().date_naive()))
    }
}

pub fn snapshot_for(profile: &RegionalProfile, today: NaiveDate) -> ProviderSnapshot {
    let scenario = scenario_for(&profile.id).unwrap_or_else(|| baseline_scenario(profile));

    let current = CurrentConditions {
        location: profile.name.clone(),
        temperature_c: scenario.temperature_c,
        condition: scenario.condition,
        humidity_pct: scenario.humidity_pct,
        wind_speed_kmh: scenario.wind_speed_kmh,
        feels_like_c: scenario.temperature_c + 2.0,
    };

    let swing = [0.0, 1.0, -1.0, 2.0, 0.0];
    let forecast = (0..FORECAST_DAYS)
        .map(|offset| {
            let delta = swing[offset as usize % swing.len()];
            DailyForecast::new(
                today + Duration::days(offset),
                (scenario.temperature_c + 4.0 + delta).round(),
                (scenario.temperature_c - 5.0 + delta).round(),
                scenario.condition,
            )
        })
        .collect();

    ProviderSnapshot {
        region_id: profile.id.clone(),
        current,
        forecast,
        hourly_precipitation_mm: vec![scenario.hourly_mm; 24],
        daily_precipitation_mm: vec![scenario.daily_mm; 7],
        external_alerts: external_notices(profile),
    }
}

fn baseline_scenario(profile: &RegionalProfile) -> Scenario {
    let daily_mm = profile.baseline_annual_precipitation_mm / 365.0;
    let condition = if profile.baseline_temperature_c <= 0.0 && daily_mm > 0.0 {
        WeatherCondition::Snowy
    } else if daily_mm > 5.0 {
        WeatherCondition::Rainy
    } else if profile.baseline_humidity_pct >= 70.0 {
        WeatherCondition::Cloudy
    } else if profile.baseline_humidity_pct >= 50.0 {
        WeatherCondition::PartlyCloudy
    } else {
        WeatherCondition::Sunny
    };

    Scenario {
        temperature_c: profile.baseline_temperature_c,
        humidity_pct: profile.baseline_humidity_pct,
        wind_speed_kmh: CALM_WIND_KMH,
        hourly_mm: daily_mm / 24.0,
        daily_mm,
        condition,
    }
}

fn scenario_for(region_id: &str) -> Option<Scenario> {
    let scenario = match region_id {
        // Monsoon burst: 120 mm in a day
        "kerala" => Scenario {
            temperature_c: 27.0,
            humidity_pct: 92.0,
            wind_speed_kmh: 35.0,
            hourly_mm: 5.0,
            daily_mm: 60.0,
            condition: WeatherCondition::Thunderstorm,
        },
        "rajasthan" => Scenario {
            temperature_c: 42.0,
            humidity_pct: 18.0,
            wind_speed_kmh: 20.0,
            hourly_mm: 0.0,
            daily_mm: 0.0,
            condition: WeatherCondition::Sunny,
        },
        // Landfalling cyclone
        "odisha" => Scenario {
            temperature_c: 28.0,
            humidity_pct: 88.0,
            wind_speed_kmh: 95.0,
            hourly_mm: 2.5,
            daily_mm: 40.0,
            condition: WeatherCondition::Thunderstorm,
        },
        // Cloudburst over the hills
        "uttarakhand" => Scenario {
            temperature_c: 19.0,
            humidity_pct: 90.0,
            wind_speed_kmh: 25.0,
            hourly_mm: 5.0,
            daily_mm: 45.0,
            condition: WeatherCondition::Rainy,
        },
        _ => return None,
    };
    Some(scenario)
}

/// Seismic and snowpack notices the mock source publishes directly.
fn external_notices(profile: &RegionalProfile) -> Vec<Alert> {
    let prefix = profile.alert_prefix();
    let notices: &[(HazardKind, Severity, &str, &str)] = match profile.id.as_str() {
        "andaman-and-nicobar-islands" => &[(
            HazardKind::Earthquake,
            Severity::Advisory,
            "Minor Tremor Advisory",
            "Increased seismic activity detected along the Andaman subduction zone. \
             Minor tremors possible over the next 48 hours.",
        )],
        "himachal-pradesh" => &[(
            HazardKind::Avalanche,
            Severity::Warning,
            "High Avalanche Danger",
            "Extreme avalanche danger on high passes. Travel in avalanche terrain is \
             discouraged. Natural and human-triggered avalanches are very likely.",
        )],
        "ladakh" => &[(
            HazardKind::Avalanche,
            Severity::Watch,
            "Avalanche Watch",
            "Fresh snowfall over unstable layers. Avoid steep slopes above 4,000 m.",
        )],
        _ => &[],
    };

    notices
        .iter()
        .enumerate()
        .map(|(i, (kind, severity, title, description))| {
            Alert::new(
                format!("{}-{}-MOCK{}", prefix, kind.code(), i + 1),
                *kind,
                *severity,
                *title,
                *description,
                profile.id.clone(),
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::aggregate::{aggregate_24h, aggregate_7d};
    use crate::regions::RegionStore;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 3).unwrap()
    }

    #[test]
    fn baseline_snapshot_follows_profile() {
        let store = RegionStore::builtin().unwrap();
        let delhi = store.get("delhi").unwrap();
        let snapshot = snapshot_for(delhi, today());

        assert_eq!(snapshot.region_id, "delhi");
        assert_eq!(snapshot.current.temperature_c, 25.0);
        assert_eq!(snapshot.current.humidity_pct, 55.0);
        assert_eq!(snapshot.current.feels_like_c, 27.0);
        assert_eq!(snapshot.hourly_precipitation_mm.len(), 24);
        assert_eq!(snapshot.daily_precipitation_mm.len(), 7);
        let weekly = aggregate_7d(&snapshot.daily_precipitation_mm);
        assert!((weekly - 790.0 / 365.0 * 7.0).abs() < 1e-9);
        assert!(snapshot.external_alerts.is_empty());
    }

    #[test]
    fn forecast_covers_five_days_from_today() {
        let store = RegionStore::builtin().unwrap();
        let snapshot = snapshot_for(store.get("goa").unwrap(), today());
        assert_eq!(snapshot.forecast.len(), 5);
        assert_eq!(snapshot.forecast[0].date, today());
        assert_eq!(snapshot.forecast[0].day, "Mon");
        assert_eq!(snapshot.forecast[4].day, "Fri");
        assert!(snapshot.forecast.iter().all(|d| d.high_c > d.low_c));
    }

    #[test]
    fn kerala_scenario_is_a_monsoon_burst() {
        let store = RegionStore::builtin().unwrap();
        let snapshot = snapshot_for(store.get("kerala").unwrap(), today());
        assert_eq!(aggregate_24h(&snapshot.hourly_precipitation_mm), 120.0);
        assert_eq!(
            snapshot.current.condition,
            WeatherCondition::Thunderstorm
        );
    }

    #[test]
    fn external_notices_for_seismic_and_snow_regions() {
        let store = RegionStore::builtin().unwrap();

        let andaman = snapshot_for(store.get("andaman-and-nicobar-islands").unwrap(), today());
        assert_eq!(andaman.external_alerts.len(), 1);
        assert_eq!(andaman.external_alerts[0].kind, HazardKind::Earthquake);
        assert_eq!(andaman.external_alerts[0].id, "AND-EQK-MOCK1");

        let himachal = snapshot_for(store.get("himachal-pradesh").unwrap(), today());
        assert_eq!(himachal.external_alerts[0].kind, HazardKind::Avalanche);
        assert_eq!(himachal.external_alerts[0].severity, Severity::Warning);
        assert_eq!(himachal.external_alerts[0].area, "himachal-pradesh");
    }

    #[test]
    fn dry_cold_baseline_condition() {
        let profile = RegionalProfile::new("tundra", "Tundra").with_baseline(0.0, -10.0, 30.0);
        let snapshot = snapshot_for(&profile, today());
        assert_eq!(snapshot.current.condition, WeatherCondition::Sunny);
        assert_eq!(aggregate_24h(&snapshot.hourly_precipitation_mm), 0.0);
    }

    #[tokio::test]
    async fn fetch_returns_snapshot() {
        let provider = MockProvider::new(&MockConfig { latency_ms: 0 });
        let store = RegionStore::builtin().unwrap();
        let snapshot = provider.fetch(store.get("assam").unwrap()).await.unwrap();
        assert_eq!(snapshot.region_id, "assam");
    }
}

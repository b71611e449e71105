use super::aggregate::{aggregate_window, DAYS_PER_WEEK, HOURS_PER_DAY};
use super::rules::RulesEngine;
use super::thresholds::{ThresholdSet, ThresholdTable};
use crate::config::Config;
use crate::datasources::DataProvider;
use crate::error::Result;
use crate::models::{
    sort_by_severity, Alert, AlertSummary, HazardKind, ProviderSnapshot, RegionalProfile,
    WeatherReport, WeatherSample,
};
use crate::regions::RegionStore;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::{self, JoinSet};

type OverviewResult = (String, Result<WeatherReport>);

/// Per-region line of the all-regions overview.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegionOverview {
    pub region_id: String,
    pub region_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<AlertSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Runs provider data through the aggregator and the rules engine.
pub struct WeatherService {
    provider: DataProvider,
    regions: Arc<RegionStore>,
    thresholds: Arc<ThresholdTable>,
    engine: RulesEngine,
    max_concurrent_fetches: usize,
}

impl WeatherService {
    pub fn new(
        provider: DataProvider,
        regions: Arc<RegionStore>,
        thresholds: Arc<ThresholdTable>,
        max_concurrent_fetches: usize,
    ) -> Self {
        Self {
            provider,
            regions,
            thresholds,
            engine: RulesEngine::new(),
            max_concurrent_fetches: max_concurrent_fetches.max(1),
        }
    }

    /// Loads the region table, validates the config against it and builds the
    /// configured provider.
    pub fn from_config(config: &Config) -> Result<Self> {
        let regions = config.load_regions()?;
        config.validate(&regions)?;
        let provider = DataProvider::from_config(config)?;

        tracing::info!("Loaded {} region profiles", regions.len());

        Ok(Self::new(
            provider,
            Arc::new(regions),
            Arc::new(config.thresholds.clone()),
            config.max_concurrent_fetches,
        ))
    }

    pub fn regions(&self) -> &RegionStore {
        &self.regions
    }

    pub fn provider(&self) -> &DataProvider {
        &self.provider
    }

    pub fn thresholds_for(&self, query: &str) -> Result<(&RegionalProfile, &ThresholdSet)> {
        let profile = self.regions.find(query)?;
        Ok((profile, self.thresholds.for_region(profile)))
    }

    /// Evaluates a caller-supplied sample without touching the provider.
    pub fn evaluate_sample(&self, query: &str, sample: &WeatherSample) -> Result<Vec<Alert>> {
        let (profile, thresholds) = self.thresholds_for(query)?;
        Ok(self.engine.evaluate(sample, profile, thresholds))
    }

    pub async fn report(&self, query: &str) -> Result<WeatherReport> {
        let profile = self.regions.find(query)?;
        let snapshot = self.provider.fetch(profile).await?;
        Ok(self.build_report(profile, snapshot))
    }

    /// Report alerts, optionally limited to one hazard kind.
    pub async fn alerts(&self, query: &str, kind: Option<HazardKind>) -> Result<Vec<Alert>> {
        let report = self.report(query).await?;
        Ok(report
            .alerts
            .into_iter()
            .filter(|a| kind.is_none_or(|k| a.kind == k))
            .collect())
    }

    pub fn build_report(
        &self,
        profile: &RegionalProfile,
        snapshot: ProviderSnapshot,
    ) -> WeatherReport {
        let rain_24h = aggregate_window(&snapshot.hourly_precipitation_mm, HOURS_PER_DAY);
        let rain_7d = aggregate_window(&snapshot.daily_precipitation_mm, DAYS_PER_WEEK);
        if !rain_24h.complete || !rain_7d.complete {
            tracing::debug!(
                region = %profile.id,
                hourly_samples = rain_24h.samples,
                daily_samples = rain_7d.samples,
                "Precipitation totals cover a partial window"
            );
        }

        let sample = WeatherSample {
            temperature_c: snapshot.current.temperature_c,
            humidity_pct: snapshot.current.humidity_pct,
            wind_speed_kmh: snapshot.current.wind_speed_kmh,
            precipitation_24h_mm: rain_24h.total_mm,
            precipitation_7d_mm: rain_7d.total_mm,
        };

        let thresholds = self.thresholds.for_region(profile);
        let mut alerts = self.engine.evaluate(&sample, profile, thresholds);
        alerts.extend(snapshot.external_alerts);
        sort_by_severity(&mut alerts);

        WeatherReport {
            region_id: profile.id.clone(),
            region_name: profile.name.clone(),
            source: self.provider.kind(),
            current: snapshot.current,
            forecast: snapshot.forecast,
            sample,
            alerts,
            generated_at: Utc::now(),
        }
    }

    /// Alert summaries for every region, fetched concurrently. A failing region
    /// is reported in its own entry and does not abort the rest.
    pub async fn overview(self: &Arc<Self>) -> Vec<RegionOverview> {
        let permits = Arc::new(Semaphore::new(self.max_concurrent_fetches));
        let mut tasks = JoinSet::new();
        let mut pending = HashMap::new();

        for profile in self.regions.iter() {
            let service = Arc::clone(self);
            let permits = Arc::clone(&permits);
            let region_id = profile.id.clone();
            let handle = tasks.spawn(async move {
                let _permit = permits.acquire_owned().await.ok();
                let result = service.report(&region_id).await;
                (region_id, result)
            });
            pending.insert(handle.id(), profile.id.clone());
        }

        self.collect_overview(tasks, pending).await
    }

    /// Drains overview tasks. A task that dies without returning still yields an
    /// error entry for its region, found through `pending`.
    async fn collect_overview(
        &self,
        mut tasks: JoinSet<OverviewResult>,
        pending: HashMap<task::Id, String>,
    ) -> Vec<RegionOverview> {
        let mut overview = Vec::with_capacity(pending.len());
        while let Some(joined) = tasks.join_next_with_id().await {
            let entry = match joined {
                Ok((_, (region_id, Ok(report)))) => RegionOverview {
                    region_name: self.region_name(&region_id),
                    region_id,
                    summary: Some(AlertSummary::from_alerts(&report.alerts)),
                    error: None,
                },
                Ok((_, (region_id, Err(e)))) => {
                    tracing::warn!("Failed to fetch weather for {}: {}", region_id, e);
                    self.failed_entry(region_id, e.to_string())
                }
                Err(e) => {
                    let Some(region_id) = pending.get(&e.id()).cloned() else {
                        tracing::warn!("Untracked overview task failed: {}", e);
                        continue;
                    };
                    tracing::warn!("Overview task for {} failed: {}", region_id, e);
                    self.failed_entry(region_id, format!("fetch task failed: {}", e))
                }
            };
            overview.push(entry);
        }

        overview.sort_by(|a, b| a.region_id.cmp(&b.region_id));
        overview
    }

    fn failed_entry(&self, region_id: String, error: String) -> RegionOverview {
        RegionOverview {
            region_name: self.region_name(&region_id),
            region_id,
            summary: None,
            error: Some(error),
        }
    }

    fn region_name(&self, region_id: &str) -> String {
        self.regions
            .get(region_id)
            .map(|p| p.name.clone())
            .unwrap_or_else(|_| region_id.to_string())
    }

    pub async fn test_connection(&self) -> Result<bool> {
        self.provider.test_connection().await
    }
}

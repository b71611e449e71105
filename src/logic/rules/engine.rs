use super::{
    cyclone::CycloneRule, drought::DroughtRule, flood::FloodRule, heatwave::HeatwaveRule,
    landslide::LandslideRule, Finding, Rule,
};
use crate::logic::thresholds::ThresholdSet;
use crate::models::{sort_by_severity, Alert, HazardKind, RegionalProfile, WeatherSample};
use chrono::{DateTime, Utc};

/// The rule that classifies `kind`, if it can be derived from weather metrics.
pub fn rule_for(kind: HazardKind) -> Option<Box<dyn Rule>> {
    match kind {
        HazardKind::Flood => Some(Box::new(FloodRule)),
        HazardKind::Heatwave => Some(Box::new(HeatwaveRule)),
        HazardKind::Cyclone => Some(Box::new(CycloneRule)),
        HazardKind::Drought => Some(Box::new(DroughtRule)),
        HazardKind::Landslide => Some(Box::new(LandslideRule)),
        HazardKind::Earthquake | HazardKind::Avalanche => None,
    }
}

/// Evaluates a sample against every weather-derived rule.
pub fn evaluate(
    sample: &WeatherSample,
    profile: &RegionalProfile,
    thresholds: &ThresholdSet,
) -> Vec<Alert> {
    RulesEngine::new().evaluate(sample, profile, thresholds)
}

pub struct RulesEngine {
    rules: Vec<Box<dyn Rule>>,
}

impl RulesEngine {
    pub fn new() -> Self {
        let rules: Vec<Box<dyn Rule>> = HazardKind::ALL
            .into_iter()
            .filter_map(rule_for)
            .collect();

        Self { rules }
    }

    pub fn evaluate(
        &self,
        sample: &WeatherSample,
        profile: &RegionalProfile,
        thresholds: &ThresholdSet,
    ) -> Vec<Alert> {
        self.evaluate_at(sample, profile, thresholds, Utc::now())
    }

    /// Like `evaluate`, with an explicit issue time for the alert ids.
    pub fn evaluate_at(
        &self,
        sample: &WeatherSample,
        profile: &RegionalProfile,
        thresholds: &ThresholdSet,
        issued_at: DateTime<Utc>,
    ) -> Vec<Alert> {
        let prefix = profile.alert_prefix();
        let stamp = issued_at.timestamp_millis();

        let mut alerts: Vec<Alert> = self
            .rules
            .iter()
            .filter_map(|rule| {
                let finding = rule.evaluate(sample, profile, thresholds)?;
                Some(build_alert(rule.kind(), finding, profile, &prefix, stamp))
            })
            .collect();

        sort_by_severity(&mut alerts);

        tracing::debug!(
            region = %profile.id,
            alerts = alerts.len(),
            "Evaluated hazard rules"
        );

        alerts
    }

    pub fn evaluate_rule(
        &self,
        kind: HazardKind,
        sample: &WeatherSample,
        profile: &RegionalProfile,
        thresholds: &ThresholdSet,
    ) -> Option<Alert> {
        let rule = self.rules.iter().find(|r| r.kind() == kind)?;
        let finding = rule.evaluate(sample, profile, thresholds)?;
        let stamp = Utc::now().timestamp_millis();
        Some(build_alert(kind, finding, profile, &profile.alert_prefix(), stamp))
    }

    pub fn list_rules(&self) -> Vec<(HazardKind, &'static str)> {
        self.rules.iter().map(|r| (r.kind(), r.name())).collect()
    }
}

fn build_alert(
    kind: HazardKind,
    finding: Finding,
    profile: &RegionalProfile,
    prefix: &str,
    stamp: i64,
) -> Alert {
    Alert::new(
        format!("{}-{}-{}", prefix, kind.code(), stamp),
        kind,
        finding.severity,
        finding.title,
        finding.description,
        profile.id.clone(),
    )
}

impl Default for RulesEngine {
    fn default() -> Self {
        Self::new()
    }
}

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum HazardKind {
    Flood,
    Earthquake,
    Avalanche,
    Heatwave,
    Cyclone,
    Drought,
    Landslide,
}

impl HazardKind {
    pub const ALL: [HazardKind; 7] = [
        HazardKind::Flood,
        HazardKind::Earthquake,
        HazardKind::Avalanche,
        HazardKind::Heatwave,
        HazardKind::Cyclone,
        HazardKind::Drought,
        HazardKind::Landslide,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            HazardKind::Flood => "Flood",
            HazardKind::Earthquake => "Earthquake",
            HazardKind::Avalanche => "Avalanche",
            HazardKind::Heatwave => "Heatwave",
            HazardKind::Cyclone => "Cyclone",
            HazardKind::Drought => "Drought",
            HazardKind::Landslide => "Landslide",
        }
    }

    /// Short code embedded in alert ids.
    pub fn code(&self) -> &'static str {
        match self {
            HazardKind::Flood => "FLOOD",
            HazardKind::Earthquake => "EQK",
            HazardKind::Avalanche => "AVAL",
            HazardKind::Heatwave => "HEAT",
            HazardKind::Cyclone => "CYCL",
            HazardKind::Drought => "DRGT",
            HazardKind::Landslide => "LAND",
        }
    }

    /// Whether the kind can be derived from weather metrics. Seismic and snowpack
    /// hazards only arrive as externally supplied notices.
    pub fn is_weather_derived(&self) -> bool {
        !matches!(self, HazardKind::Earthquake | HazardKind::Avalanche)
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "flood" => Some(HazardKind::Flood),
            "earthquake" | "quake" => Some(HazardKind::Earthquake),
            "avalanche" => Some(HazardKind::Avalanche),
            "heatwave" | "heat wave" | "heat" => Some(HazardKind::Heatwave),
            "cyclone" => Some(HazardKind::Cyclone),
            "drought" => Some(HazardKind::Drought),
            "landslide" => Some(HazardKind::Landslide),
            _ => None,
        }
    }
}

impl std::fmt::Display for HazardKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Alert severity, least to most severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Severity {
    Advisory,
    Watch,
    Warning,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Advisory => "Advisory",
            Severity::Watch => "Watch",
            Severity::Warning => "Warning",
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Severity::Advisory => "→",
            Severity::Watch => "⚠",
            Severity::Warning => "!",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: HazardKind,
    pub severity: Severity,
    pub title: String,
    pub description: String,
    pub area: String,
}

impl Alert {
    pub fn new(
        id: impl Into<String>,
        kind: HazardKind,
        severity: Severity,
        title: impl Into<String>,
        description: impl Into<String>,
        area: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            kind,
            severity,
            title: title.into(),
            description: description.into(),
            area: area.into(),
        }
    }
}

/// Orders alerts most severe first. The sort is stable, so equal severities keep
/// their incoming order.
pub fn sort_by_severity(alerts: &mut [Alert]) {
    alerts.sort_by(|a, b| b.severity.cmp(&a.severity));
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AlertSummary {
    pub total: usize,
    pub advisory: usize,
    pub watch: usize,
    pub warning: usize,
    pub highest: Option<Severity>,
    pub kinds: Vec<HazardKind>,
}

impl AlertSummary {
    pub fn from_alerts(alerts: &[Alert]) -> Self {
        let mut summary = AlertSummary {
            total: alerts.len(),
            ..Default::default()
        };

        for alert in alerts {
            match alert.severity {
                Severity::Advisory => summary.advisory += 1,
                Severity::Watch => summary.watch += 1,
                Severity::Warning => summary.warning += 1,
            }
            if summary.highest.is_none_or(|h| alert.severity > h) {
                summary.highest = Some(alert.severity);
            }
            if !summary.kinds.contains(&alert.kind) {
                summary.kinds.push(alert.kind);
            }
        }

        summary.kinds.sort();
        summary
    }

    pub fn is_clear(&self) -> bool {
        self.total == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alert(kind: HazardKind, severity: Severity) -> Alert {
        Alert::new("X", kind, severity, "t", "d", "region")
    }

    #[test]
    fn severity_ordering() {
        assert!(Severity::Advisory < Severity::Watch);
        assert!(Severity::Watch < Severity::Warning);
        assert_eq!(
            [Severity::Watch, Severity::Warning, Severity::Advisory]
                .iter()
                .max(),
            Some(&Severity::Warning)
        );
    }

    #[test]
    fn hazard_kind_from_str() {
        assert_eq!(HazardKind::from_str("flood"), Some(HazardKind::Flood));
        assert_eq!(HazardKind::from_str("Heat Wave"), Some(HazardKind::Heatwave));
        assert_eq!(HazardKind::from_str("CYCLONE"), Some(HazardKind::Cyclone));
        assert_eq!(HazardKind::from_str("tornado"), None);
        assert_eq!(HazardKind::from_str(""), None);
    }

    #[test]
    fn hazard_kind_debug_round_trips() {
        for kind in HazardKind::ALL {
            let debug_str = format!("{:?}", kind);
            assert_eq!(HazardKind::from_str(&debug_str), Some(kind));
        }
    }

    #[test]
    fn only_seismic_and_snowpack_kinds_are_external() {
        let external: Vec<_> = HazardKind::ALL
            .into_iter()
            .filter(|k| !k.is_weather_derived())
            .collect();
        assert_eq!(external, vec![HazardKind::Earthquake, HazardKind::Avalanche]);
    }

    #[test]
    fn alert_serializes_kind_as_type() {
        let json = serde_json::to_value(alert(HazardKind::Flood, Severity::Watch)).unwrap();
        assert_eq!(json["type"], "Flood");
        assert_eq!(json["severity"], "Watch");
        assert!(json.get("kind").is_none());
    }

    #[test]
    fn sort_puts_warnings_first() {
        let mut alerts = vec![
            alert(HazardKind::Drought, Severity::Advisory),
            alert(HazardKind::Flood, Severity::Watch),
            alert(HazardKind::Cyclone, Severity::Warning),
        ];
        sort_by_severity(&mut alerts);
        let severities: Vec<_> = alerts.iter().map(|a| a.severity).collect();
        assert_eq!(
            severities,
            vec![Severity::Warning, Severity::Watch, Severity::Advisory]
        );
    }

    #[test]
    fn summary_counts() {
        let alerts = vec![
            alert(HazardKind::Flood, Severity::Watch),
            alert(HazardKind::Earthquake, Severity::Warning),
            alert(HazardKind::Earthquake, Severity::Advisory),
        ];
        let summary = AlertSummary::from_alerts(&alerts);
        assert_eq!(summary.total, 3);
        assert_eq!(summary.advisory, 1);
        assert_eq!(summary.watch, 1);
        assert_eq!(summary.warning, 1);
        assert_eq!(summary.highest, Some(Severity::Warning));
        assert_eq!(
            summary.kinds,
            vec![HazardKind::Flood, HazardKind::Earthquake]
        );
    }

    #[test]
    fn empty_summary_is_clear() {
        let summary = AlertSummary::from_alerts(&[]);
        assert!(summary.is_clear());
        assert_eq!(summary.highest, None);
    }
}

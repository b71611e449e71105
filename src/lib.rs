//! hazardwatch: natural-hazard alerts for Indian states and union territories.
//!
//! Weather observations for a region are reduced to a [`WeatherSample`] and run
//! through the hazard rules (flood, heatwave, cyclone, drought, landslide).
//! Seismic and avalanche notices come straight from the data provider.
//!
//! ```text
//! hazardwatch
//! ├── models       alerts, hazard kinds, severities, regional profiles, weather
//! ├── regions      the bundled region table and lookup
//! ├── config       config.yaml loading (data source, thresholds, provider settings)
//! ├── datasources  mock and Open-Meteo providers
//! └── logic
//!     ├── aggregate   24h / 7d precipitation totals
//!     ├── thresholds  per-hazard trigger values with per-region overrides
//!     ├── rules       one rule per weather-derived hazard, plus the engine
//!     └── report      fetch -> aggregate -> evaluate pipeline
//! ```

pub mod config;
pub mod datasources;
pub mod error;
pub mod logic;
pub mod models;
pub mod regions;

pub use config::Config;
pub use error::{HazardError, Result};
pub use logic::{
    aggregate_24h, aggregate_7d, evaluate, RegionOverview, RulesEngine, ThresholdSet,
    ThresholdTable, WeatherService,
};
pub use models::{Alert, HazardKind, RegionalProfile, Severity, WeatherReport, WeatherSample};
pub use regions::RegionStore;

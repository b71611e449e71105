pub mod mock;
pub mod openmeteo;

pub use mock::MockProvider;
pub use openmeteo::OpenMeteoClient;

use crate::config::Config;
use crate::error::Result;
use crate::models::{DataSourceKind, ProviderSnapshot, RegionalProfile};

/// The configured source of weather data.
pub enum DataProvider {
    Mock(MockProvider),
    OpenMeteo(OpenMeteoClient),
}

impl DataProvider {
    pub fn from_config(config: &Config) -> Result<Self> {
        let provider = match config.data_source {
            DataSourceKind::Mock => DataProvider::Mock(MockProvider::new(&config.mock)),
            DataSourceKind::OpenMeteo => {
                DataProvider::OpenMeteo(OpenMeteoClient::new(config.open_meteo.clone())?)
            }
        };
        tracing::info!("Using {} for weather data", provider.kind());
        Ok(provider)
    }

    pub fn kind(&self) -> DataSourceKind {
        match self {
            DataProvider::Mock(_) => DataSourceKind::Mock,
            DataProvider::OpenMeteo(_) => DataSourceKind::OpenMeteo,
        }
    }

    pub async fn fetch(&self, profile: &RegionalProfile) -> Result<ProviderSnapshot> {
        match self {
            DataProvider::Mock(provider) => provider.fetch(profile).await,
            DataProvider::OpenMeteo(client) => client.fetch(profile).await,
        }
    }

    pub async fn test_connection(&self) -> Result<bool> {
        match self {
            DataProvider::Mock(_) => Ok(true),
            DataProvider::OpenMeteo(client) => client.test_connection().await,
        }
    }
}

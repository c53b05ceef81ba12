pub mod geocoding;
pub mod openmeteo;

pub use geocoding::{GeoLocation, GeocodingClient};
pub use openmeteo::OpenMeteoClient;

use crate::config::Config;
use crate::error::{HarvestError, Result};
use crate::models::ForecastBundle;

/// Connection probe results for the `check` subcommand.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConnectionStatus {
    pub geocoder: bool,
    pub forecast: bool,
}

/// Orchestrates the two sequential external reads: resolve the place
/// name first, then fetch the forecast for the resulting coordinates.
/// Either a complete bundle comes back or an error does; the decision
/// logic never sees anything in between.
pub struct ForecastService {
    geocoding_client: GeocodingClient,
    openmeteo_client: OpenMeteoClient,
}

impl ForecastService {
    pub fn new(config: &Config) -> Self {
        Self {
            geocoding_client: GeocodingClient::new(),
            openmeteo_client: OpenMeteoClient::new(config.forecast.clone()),
        }
    }

    pub async fn load(&self, place: &str) -> Result<ForecastBundle> {
        let location = self.geocoding_client.search(place).await?;
        tracing::info!(
            "Resolved '{}' to {:.4}, {:.4}",
            place,
            location.latitude,
            location.longitude
        );

        let bundle = self.openmeteo_client.fetch_forecast(&location).await?;
        tracing::info!(
            "Fetched forecast: {} daily entries, {} hourly samples",
            bundle.daily.len(),
            bundle.hourly.len()
        );

        if bundle.daily.is_empty() {
            return Err(HarvestError::DataSourceUnavailable(
                "forecast response contained no daily data".into(),
            ));
        }
        if bundle.hourly.is_empty() {
            tracing::warn!("No hourly data in forecast; humidity falls back to daily maxima");
        }

        Ok(bundle)
    }

    pub async fn check_connections(&self) -> ConnectionStatus {
        ConnectionStatus {
            geocoder: self
                .geocoding_client
                .test_connection()
                .await
                .unwrap_or(false),
            forecast: self
                .openmeteo_client
                .test_connection()
                .await
                .unwrap_or(false),
        }
    }
}

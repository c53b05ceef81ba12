use crate::config::ForecastConfig;
use crate::error::{HarvestError, Result};
use crate::models::{DailyForecast, ForecastBundle, ForecastLocation, HourlySample};
use chrono::{NaiveDate, NaiveDateTime, Utc};
use serde::Deserialize;

use super::geocoding::GeoLocation;

const API_BASE_URL: &str = "https://api.open-meteo.com/v1";

const DAILY_FIELDS: &str = "temperature_2m_max,temperature_2m_min,precipitation_sum,\
precipitation_probability_max,relative_humidity_2m_max";
const HOURLY_FIELDS: &str = "temperature_2m,precipitation_probability,relative_humidity_2m";

pub struct OpenMeteoClient {
    client: reqwest::Client,
    config: ForecastConfig,
}

// Open-Meteo response: parallel arrays per field, times as local ISO
// strings in the requested timezone.
#[derive(Debug, Deserialize)]
struct OmForecastResponse {
    daily: OmDaily,
    #[serde(default)]
    hourly: Option<OmHourly>,
}

#[derive(Debug, Deserialize)]
struct OmDaily {
    time: Vec<String>,
    temperature_2m_max: Vec<f64>,
    temperature_2m_min: Vec<f64>,
    precipitation_sum: Vec<f64>,
    precipitation_probability_max: Vec<f64>,
    #[serde(default)]
    relative_humidity_2m_max: Option<Vec<f64>>,
}

#[derive(Debug, Deserialize)]
struct OmHourly {
    time: Vec<String>,
    temperature_2m: Vec<f64>,
    precipitation_probability: Vec<f64>,
    relative_humidity_2m: Vec<f64>,
}

impl OpenMeteoClient {
    pub fn new(config: ForecastConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    /// Fetch the multi-day daily + hourly forecast for resolved
    /// coordinates, all aligned to the single configured timezone so day
    /// boundaries are unambiguous.
    pub async fn fetch_forecast(&self, location: &GeoLocation) -> Result<ForecastBundle> {
        let url = format!("{}/forecast", API_BASE_URL);
        let days = self.config.days.to_string();

        let response = self
            .client
            .get(&url)
            .query(&[
                ("latitude", location.latitude.to_string().as_str()),
                ("longitude", location.longitude.to_string().as_str()),
                ("timezone", self.config.timezone.as_str()),
                ("forecast_days", days.as_str()),
                ("daily", DAILY_FIELDS),
                ("hourly", HOURLY_FIELDS),
            ])
            .send()
            .await
            .map_err(|e| HarvestError::DataSourceUnavailable(format!("Open-Meteo: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(HarvestError::DataSourceUnavailable(format!(
                "Open-Meteo returned {}: {}",
                status, body
            )));
        }

        let om_response: OmForecastResponse = response.json().await.map_err(|e| {
            HarvestError::DataSourceUnavailable(format!(
                "Failed to parse Open-Meteo response: {}",
                e
            ))
        })?;

        convert_response(om_response, location)
    }

    /// Probe the forecast endpoint with a minimal request.
    pub async fn test_connection(&self) -> Result<bool> {
        let url = format!("{}/forecast", API_BASE_URL);
        let response = self
            .client
            .get(&url)
            .query(&[
                ("latitude", "53.55"),
                ("longitude", "9.99"),
                ("forecast_days", "1"),
                ("daily", "temperature_2m_max"),
            ])
            .send()
            .await
            .map_err(|e| HarvestError::DataSourceUnavailable(format!("Open-Meteo: {}", e)))?;
        Ok(response.status().is_success())
    }
}

/// Zip the provider's parallel arrays into per-day and per-hour structs.
/// Any malformed timestamp invalidates the whole fetch; the decision
/// logic must never see a partially-populated bundle.
fn convert_response(response: OmForecastResponse, location: &GeoLocation) -> Result<ForecastBundle> {
    let d = &response.daily;
    let n = d.time.len();
    if d.temperature_2m_max.len() != n
        || d.temperature_2m_min.len() != n
        || d.precipitation_sum.len() != n
        || d.precipitation_probability_max.len() != n
        || d.relative_humidity_2m_max.as_ref().is_some_and(|v| v.len() != n)
    {
        return Err(HarvestError::InvalidData(
            "daily field arrays have mismatched lengths".into(),
        ));
    }

    let mut daily = Vec::with_capacity(n);
    for i in 0..n {
        let date = NaiveDate::parse_from_str(&d.time[i], "%Y-%m-%d")
            .map_err(|_| HarvestError::InvalidData(format!("bad daily date '{}'", d.time[i])))?;
        daily.push(DailyForecast {
            date,
            temp_max_c: d.temperature_2m_max[i],
            temp_min_c: d.temperature_2m_min[i],
            precipitation_sum_mm: d.precipitation_sum[i],
            precipitation_prob_max: d.precipitation_probability_max[i],
            relative_humidity_max: d.relative_humidity_2m_max.as_ref().map(|v| v[i]),
        });
    }

    let hourly = match &response.hourly {
        Some(h) => convert_hourly(h)?,
        None => Vec::new(),
    };

    Ok(ForecastBundle {
        fetched_at: Utc::now(),
        location: ForecastLocation {
            name: location.name.clone(),
            latitude: location.latitude,
            longitude: location.longitude,
        },
        daily,
        hourly,
    })
}

fn convert_hourly(h: &OmHourly) -> Result<Vec<HourlySample>> {
    let n = h.time.len();
    if h.temperature_2m.len() != n
        || h.precipitation_probability.len() != n
        || h.relative_humidity_2m.len() != n
    {
        return Err(HarvestError::InvalidData(
            "hourly field arrays have mismatched lengths".into(),
        ));
    }

    let mut hourly = Vec::with_capacity(n);
    for i in 0..n {
        let timestamp = NaiveDateTime::parse_from_str(&h.time[i], "%Y-%m-%dT%H:%M")
            .map_err(|_| HarvestError::InvalidData(format!("bad hourly time '{}'", h.time[i])))?;
        hourly.push(HourlySample {
            timestamp,
            temperature_c: h.temperature_2m[i],
            precipitation_probability: h.precipitation_probability[i],
            relative_humidity: h.relative_humidity_2m[i],
        });
    }
    Ok(hourly)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hamburg() -> GeoLocation {
        GeoLocation {
            name: "Hamburg, Germany".into(),
            latitude: 53.55,
            longitude: 9.99,
        }
    }

    const FIXTURE: &str = r#"{
        "daily": {
            "time": ["2025-09-01", "2025-09-02"],
            "temperature_2m_max": [24.1, 19.8],
            "temperature_2m_min": [13.0, 11.2],
            "precipitation_sum": [0.0, 4.2],
            "precipitation_probability_max": [10.0, 80.0],
            "relative_humidity_2m_max": [72.0, 93.0]
        },
        "hourly": {
            "time": ["2025-09-01T00:00", "2025-09-01T01:00"],
            "temperature_2m": [14.2, 13.9],
            "precipitation_probability": [0.0, 5.0],
            "relative_humidity_2m": [81.0, 83.0]
        }
    }"#;

    #[test]
    fn converts_parallel_arrays_into_structs() {
        let response: OmForecastResponse = serde_json::from_str(FIXTURE).unwrap();
        let bundle = convert_response(response, &hamburg()).unwrap();

        assert_eq!(bundle.daily.len(), 2);
        assert_eq!(bundle.daily[0].temp_max_c, 24.1);
        assert_eq!(bundle.daily[1].precipitation_sum_mm, 4.2);
        assert_eq!(bundle.daily[1].relative_humidity_max, Some(93.0));
        assert_eq!(
            bundle.daily[0].date,
            NaiveDate::from_ymd_opt(2025, 9, 1).unwrap()
        );

        assert_eq!(bundle.hourly.len(), 2);
        assert_eq!(bundle.hourly[1].relative_humidity, 83.0);
        assert_eq!(bundle.hourly[0].hour_label(), "00:00");
        assert_eq!(bundle.location.name, "Hamburg, Germany");
    }

    #[test]
    fn missing_hourly_block_degrades_to_empty_vec() {
        let json = r#"{
            "daily": {
                "time": ["2025-09-01"],
                "temperature_2m_max": [24.1],
                "temperature_2m_min": [13.0],
                "precipitation_sum": [0.0],
                "precipitation_probability_max": [10.0]
            }
        }"#;
        let response: OmForecastResponse = serde_json::from_str(json).unwrap();
        let bundle = convert_response(response, &hamburg()).unwrap();

        assert!(bundle.hourly.is_empty());
        assert_eq!(bundle.daily[0].relative_humidity_max, None);
    }

    #[test]
    fn mismatched_array_lengths_invalidate_the_fetch() {
        let json = r#"{
            "daily": {
                "time": ["2025-09-01", "2025-09-02"],
                "temperature_2m_max": [24.1],
                "temperature_2m_min": [13.0, 11.2],
                "precipitation_sum": [0.0, 4.2],
                "precipitation_probability_max": [10.0, 80.0]
            }
        }"#;
        let response: OmForecastResponse = serde_json::from_str(json).unwrap();
        assert!(matches!(
            convert_response(response, &hamburg()),
            Err(HarvestError::InvalidData(_))
        ));
    }
}

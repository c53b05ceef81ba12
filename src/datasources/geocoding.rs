use crate::error::{HarvestError, Result};
use serde::Deserialize;

const API_BASE_URL: &str = "https://nominatim.openstreetmap.org";
const USER_AGENT: &str = concat!("harvestcast/", env!("CARGO_PKG_VERSION"));

/// Free-text place name resolution via Nominatim.
pub struct GeocodingClient {
    client: reqwest::Client,
}

// Nominatim search response entry. Coordinates arrive as strings.
#[derive(Debug, Deserialize)]
struct NominatimPlace {
    lat: String,
    lon: String,
    display_name: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GeoLocation {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl GeocodingClient {
    pub fn new() -> Self {
        Self {
            // Nominatim's usage policy requires an identifying User-Agent.
            client: reqwest::Client::builder()
                .user_agent(USER_AGENT)
                .build()
                .unwrap_or_default(),
        }
    }

    /// Resolve a place name to coordinates, taking the best match only.
    pub async fn search(&self, query: &str) -> Result<GeoLocation> {
        let url = format!("{}/search", API_BASE_URL);

        let response = self
            .client
            .get(&url)
            .query(&[("format", "json"), ("limit", "1"), ("q", query)])
            .send()
            .await
            .map_err(|e| HarvestError::DataSourceUnavailable(format!("Nominatim: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            return Err(HarvestError::DataSourceUnavailable(format!(
                "Nominatim returned {}",
                status
            )));
        }

        let places: Vec<NominatimPlace> = response.json().await.map_err(|e| {
            HarvestError::DataSourceUnavailable(format!("Failed to parse Nominatim response: {}", e))
        })?;

        let place = places
            .into_iter()
            .next()
            .ok_or_else(|| HarvestError::LocationNotFound(query.to_string()))?;

        convert_place(place)
    }

    /// Probe the geocoder with a request that should always resolve.
    pub async fn test_connection(&self) -> Result<bool> {
        Ok(self.search("Hamburg").await.is_ok())
    }
}

impl Default for GeocodingClient {
    fn default() -> Self {
        Self::new()
    }
}

fn convert_place(place: NominatimPlace) -> Result<GeoLocation> {
    let latitude: f64 = place
        .lat
        .parse()
        .map_err(|_| HarvestError::InvalidData(format!("bad latitude '{}'", place.lat)))?;
    let longitude: f64 = place
        .lon
        .parse()
        .map_err(|_| HarvestError::InvalidData(format!("bad longitude '{}'", place.lon)))?;

    Ok(GeoLocation {
        name: place.display_name,
        latitude,
        longitude,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_nominatim_payload() {
        let json = r#"[{"lat":"53.550341","lon":"10.000654","display_name":"Hamburg, Germany"}]"#;
        let places: Vec<NominatimPlace> = serde_json::from_str(json).unwrap();
        let location = convert_place(places.into_iter().next().unwrap()).unwrap();

        assert_eq!(location.name, "Hamburg, Germany");
        assert!((location.latitude - 53.550341).abs() < 1e-9);
        assert!((location.longitude - 10.000654).abs() < 1e-9);
    }

    #[test]
    fn unparseable_coordinates_are_invalid_data() {
        let place = NominatimPlace {
            lat: "not-a-number".into(),
            lon: "10.0".into(),
            display_name: "Nowhere".into(),
        };
        assert!(matches!(
            convert_place(place),
            Err(HarvestError::InvalidData(_))
        ));
    }

    #[test]
    fn empty_result_list_means_location_not_found() {
        let places: Vec<NominatimPlace> = serde_json::from_str("[]").unwrap();
        let err = places
            .into_iter()
            .next()
            .ok_or_else(|| HarvestError::LocationNotFound("Atlantis".to_string()))
            .map(convert_place)
            .unwrap_err();
        assert!(matches!(err, HarvestError::LocationNotFound(_)));
    }
}

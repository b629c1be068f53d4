//! Reverse geocoding of the vehicle position.
//!
//! The status readout shows where the car is parked; coordinates from the
//! drive state are resolved to a municipality and road via the public
//! Nominatim endpoint.

use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

/// Nominatim reverse-geocoding endpoint.
const NOMINATIM_URL: &str = "https://nominatim.openstreetmap.org/reverse.php";

/// User agent sent to Nominatim; requests without one are rejected.
const USER_AGENT: &str = concat!("valet/", env!("CARGO_PKG_VERSION"));

/// Errors that can occur while resolving a position.
#[derive(Debug, Error)]
pub enum GeocodeError {
    /// HTTP request failed or the response was not valid JSON.
    #[error("geocoding request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The request URL could not be built.
    #[error("invalid geocoding URL: {0}")]
    Url(#[from] url::ParseError),
}

/// A resolved place. Either field may be missing for remote coordinates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Place {
    /// Municipality (town/city level).
    pub municipality: Option<String>,
    /// Road name.
    pub road: Option<String>,
}

#[derive(Debug, Deserialize)]
struct NominatimResponse {
    #[serde(default)]
    address: NominatimAddress,
}

#[derive(Debug, Default, Deserialize)]
struct NominatimAddress {
    municipality: Option<String>,
    town: Option<String>,
    city: Option<String>,
    village: Option<String>,
    road: Option<String>,
}

impl From<NominatimResponse> for Place {
    fn from(resp: NominatimResponse) -> Self {
        let addr = resp.address;
        Self {
            municipality: addr
                .municipality
                .or(addr.town)
                .or(addr.city)
                .or(addr.village),
            road: addr.road,
        }
    }
}

/// Resolve coordinates to a [`Place`].
pub async fn reverse_geocode(
    client: &reqwest::Client,
    latitude: f64,
    longitude: f64,
) -> Result<Place, GeocodeError> {
    let url = url::Url::parse_with_params(
        NOMINATIM_URL,
        &[
            ("lat", latitude.to_string()),
            ("lon", longitude.to_string()),
            ("format", "jsonv2".to_string()),
        ],
    )?;

    let resp: NominatimResponse = client
        .get(url)
        .header(reqwest::header::USER_AGENT, USER_AGENT)
        .send()
        .await?
        .error_for_status()?
        .json()
        .await?;

    let place = Place::from(resp);
    debug!(?place, lat = latitude, lon = longitude, "Resolved vehicle position");
    Ok(place)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_place_from_full_address() {
        let json = r#"{
            "address": {
                "road": "Baker Street",
                "municipality": "Westminster",
                "country": "United Kingdom"
            }
        }"#;

        let resp: NominatimResponse = serde_json::from_str(json).unwrap();
        let place = Place::from(resp);
        assert_eq!(place.municipality.as_deref(), Some("Westminster"));
        assert_eq!(place.road.as_deref(), Some("Baker Street"));
    }

    #[test]
    fn test_place_falls_back_to_town_then_city() {
        let json = r#"{"address": {"town": "Gouda", "road": "Markt"}}"#;
        let resp: NominatimResponse = serde_json::from_str(json).unwrap();
        let place = Place::from(resp);
        assert_eq!(place.municipality.as_deref(), Some("Gouda"));

        let json = r#"{"address": {"city": "Rotterdam"}}"#;
        let resp: NominatimResponse = serde_json::from_str(json).unwrap();
        let place = Place::from(resp);
        assert_eq!(place.municipality.as_deref(), Some("Rotterdam"));
        assert_eq!(place.road, None);
    }

    #[test]
    fn test_place_from_empty_response() {
        let resp: NominatimResponse = serde_json::from_str("{}").unwrap();
        let place = Place::from(resp);
        assert_eq!(place, Place::default());
    }
}

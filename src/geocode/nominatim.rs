/// Forward geocoding against a Nominatim-compatible search endpoint
use anyhow::{anyhow, Result};
use log::{debug, warn};
use serde::Deserialize;
use tokio::time::{sleep, Duration};

use crate::models::Accesspoint;
use crate::utils::coordinate_value;

// The public Nominatim instance requires an identifying user agent
const USER_AGENT: &str = "unifi-ap-report/0.1";

#[derive(Debug, Deserialize)]
struct Place {
    lat: serde_json::Value,
    lon: serde_json::Value,
}

pub struct Nominatim {
    http: reqwest::Client,
    base_url: String,
    pacing: Duration,
}

impl Nominatim {
    /// Create a geocoder for the given endpoint.
    ///
    /// Every outbound call waits for `pacing` first. The public service
    /// expects at least one second between requests; tests pass zero.
    pub fn new(base_url: &str, pacing: Duration) -> Result<Self> {
        let http = reqwest::Client::builder().user_agent(USER_AGENT).build()?;

        Ok(Nominatim {
            http,
            base_url: base_url.trim().trim_end_matches('/').to_string(),
            pacing,
        })
    }

    /// Resolve a free-text address to (latitude, longitude).
    ///
    /// Tries once and retries once with identical arguments on any failure.
    pub async fn resolve(&self, address: &str) -> Result<(f64, f64)> {
        match self.query(address).await {
            Ok(coordinates) => Ok(coordinates),
            Err(e) => {
                debug!("Retrying geocode for '{}': {}", address, e);
                self.query(address).await
            }
        }
    }

    async fn query(&self, address: &str) -> Result<(f64, f64)> {
        // Unconditional pacing delay before every outbound call
        sleep(self.pacing).await;

        let url = format!("{}/search", self.base_url);
        let places: Vec<Place> = self
            .http
            .get(&url)
            .query(&[("q", address), ("format", "jsonv2"), ("limit", "1")])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let place = places
            .first()
            .ok_or_else(|| anyhow!("no match for '{}'", address))?;

        let latitude = coordinate_value(&place.lat)
            .ok_or_else(|| anyhow!("malformed latitude for '{}'", address))?;
        let longitude = coordinate_value(&place.lon)
            .ok_or_else(|| anyhow!("malformed longitude for '{}'", address))?;

        Ok((latitude, longitude))
    }
}

/// Fill in coordinates for every access point carrying a location string
///
/// Geocoding failures are logged and leave the default (0.0, 0.0) in place.
/// Access points without a location string never reach the geocoder.
pub async fn enrich_coordinates(accesspoints: &mut [Accesspoint], geocoder: &Nominatim) {
    for accesspoint in accesspoints.iter_mut() {
        let location = match &accesspoint.snmp_location {
            Some(location) => location,
            None => continue,
        };

        match geocoder.resolve(location).await {
            Ok((latitude, longitude)) => {
                accesspoint.latitude = latitude;
                accesspoint.longitude = longitude;
            }
            Err(e) => {
                warn!(
                    "Failed to geocode '{}' for {}: {}",
                    location, accesspoint.name, e
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Nothing listens on the discard port, so every attempt fails fast
    const UNREACHABLE_URL: &str = "http://127.0.0.1:9";

    fn accesspoint(name: &str, location: Option<&str>) -> Accesspoint {
        Accesspoint {
            name: name.to_string(),
            mac: Some("aa:bb".to_string()),
            snmp_location: location.map(str::to_string),
            client_count: 0,
            latitude: 0.0,
            longitude: 0.0,
        }
    }

    #[test]
    fn test_place_parses_string_and_number_coordinates() {
        let place: Place = serde_json::from_str(r#"{"lat": "48.1", "lon": 11.5}"#).unwrap();
        assert_eq!(coordinate_value(&place.lat), Some(48.1));
        assert_eq!(coordinate_value(&place.lon), Some(11.5));
    }

    #[test]
    fn test_new_trims_trailing_slash() {
        let geocoder = Nominatim::new("https://nominatim.example.com/", Duration::ZERO).unwrap();
        assert_eq!(geocoder.base_url, "https://nominatim.example.com");
    }

    #[tokio::test]
    async fn test_resolve_fails_after_single_retry() {
        let geocoder = Nominatim::new(UNREACHABLE_URL, Duration::ZERO).unwrap();
        assert!(geocoder.resolve("Main St").await.is_err());
    }

    #[tokio::test]
    async fn test_enrich_keeps_defaults_when_geocoding_fails() {
        let geocoder = Nominatim::new(UNREACHABLE_URL, Duration::ZERO).unwrap();
        let mut accesspoints = vec![accesspoint("AP1", Some("Main St"))];

        enrich_coordinates(&mut accesspoints, &geocoder).await;

        assert_eq!(accesspoints[0].latitude, 0.0);
        assert_eq!(accesspoints[0].longitude, 0.0);
    }

    #[tokio::test]
    async fn test_enrich_skips_accesspoints_without_location() {
        let geocoder = Nominatim::new(UNREACHABLE_URL, Duration::ZERO).unwrap();
        let mut accesspoints = vec![accesspoint("AP1", None)];

        enrich_coordinates(&mut accesspoints, &geocoder).await;

        assert_eq!(accesspoints[0].latitude, 0.0);
        assert_eq!(accesspoints[0].longitude, 0.0);
    }
}

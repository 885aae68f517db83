//! Address suggestions via the OpenStreetMap Nominatim API.

use serde::Deserialize;
use tracing::debug;
use url::Url;

use volhub_core::geo::{Coordinates, Place};
use volhub_core::{HubError, HubResult};

use crate::client::net;

pub const DEFAULT_GEOCODER_URL: &str = "https://nominatim.openstreetmap.org";

/// Nominatim asks API users to identify themselves.
const USER_AGENT: &str = concat!("volhub/", env!("CARGO_PKG_VERSION"), " (+https://volhub.app)");

const SUGGESTION_LIMIT: usize = 5;

pub struct Geocoder {
    http: reqwest::Client,
    base_url: String,
}

#[derive(Deserialize)]
struct NominatimPlace {
    #[serde(default)]
    name: String,
    display_name: String,
    lat: String,
    lon: String,
}

impl Geocoder {
    pub fn new(base_url: impl Into<String>) -> Geocoder {
        Geocoder { http: reqwest::Client::new(), base_url: base_url.into() }
    }

    /// Up to five candidate places for a free-text query. Blank input
    /// yields no candidates without a remote call.
    pub async fn search(&self, query: &str) -> HubResult<Vec<Place>> {
        if query.trim().is_empty() {
            return Ok(Vec::new());
        }

        let mut url = Url::parse(&format!("{}/search", self.base_url))
            .map_err(|e| HubError::Config(format!("invalid geocoder URL: {e}")))?;
        url.query_pairs_mut()
            .append_pair("q", query)
            .append_pair("format", "jsonv2")
            .append_pair("limit", &SUGGESTION_LIMIT.to_string());

        debug!(%url, "geocoding");
        let resp = self
            .http
            .get(url)
            .header(reqwest::header::USER_AGENT, USER_AGENT)
            .send()
            .await
            .map_err(net)?;

        if !resp.status().is_success() {
            return Err(HubError::Geocoding(format!(
                "geocoder answered with status {}",
                resp.status()
            )));
        }

        let raw: Vec<NominatimPlace> = resp
            .json()
            .await
            .map_err(|e| HubError::Geocoding(format!("unreadable geocoder response: {e}")))?;

        Ok(raw.into_iter().filter_map(to_place).take(SUGGESTION_LIMIT).collect())
    }
}

/// Map one Nominatim result onto a `Place`. Results with unparsable
/// coordinates are dropped.
fn to_place(raw: NominatimPlace) -> Option<Place> {
    let latitude: f64 = raw.lat.parse().ok()?;
    let longitude: f64 = raw.lon.parse().ok()?;

    let name = if raw.name.trim().is_empty() {
        // Nominatim leaves `name` empty for plain addresses; fall back to
        // the first segment of the display name.
        raw.display_name
            .split(',')
            .next()
            .unwrap_or(&raw.display_name)
            .trim()
            .to_string()
    } else {
        raw.name.clone()
    };

    Some(Place {
        name,
        address: raw.display_name,
        coordinates: Coordinates { latitude, longitude },
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(name: &str, display: &str, lat: &str, lon: &str) -> NominatimPlace {
        NominatimPlace {
            name: name.to_string(),
            display_name: display.to_string(),
            lat: lat.to_string(),
            lon: lon.to_string(),
        }
    }

    // --- to_place ---

    #[test]
    fn named_results_keep_their_name() {
        let place = to_place(raw("Town Hall", "Town Hall, 1 Main St, Springfield", "47.6", "-122.3"))
            .unwrap();
        assert_eq!(place.name, "Town Hall");
        assert_eq!(place.address, "Town Hall, 1 Main St, Springfield");
        assert_eq!(place.coordinates.latitude, 47.6);
    }

    #[test]
    fn unnamed_results_use_the_first_address_segment() {
        let place = to_place(raw("", "5 Main St, Springfield, USA", "1.5", "2.5")).unwrap();
        assert_eq!(place.name, "5 Main St");
    }

    #[test]
    fn unparsable_coordinates_drop_the_result() {
        assert!(to_place(raw("X", "X", "not-a-number", "2.5")).is_none());
    }

    #[test]
    fn suggestion_labels_compose_name_and_address() {
        let place = to_place(raw("Library", "5 Main St, Springfield", "1.0", "2.0")).unwrap();
        assert_eq!(place.label(), "Library (5 Main St, Springfield)");
    }

    // --- search ---

    #[tokio::test]
    async fn blank_queries_do_not_call_the_geocoder() {
        // The base URL is unroutable; a blank query must return before any
        // request is attempted.
        let geocoder = Geocoder::new("http://127.0.0.1:1");
        let places = geocoder.search("   ").await.unwrap();
        assert!(places.is_empty());
    }
}

pub mod delete;
pub mod edit;
pub mod events;
pub mod login;
pub mod logout;
pub mod mine;
pub mod new;
pub mod profile;
pub mod register;
pub mod rsvp;
pub mod show;

use anyhow::Result;
use owo_colors::OwoColorize;
use volhub_api::{Geocoder, HubClient, Session};
use volhub_core::HubError;
use volhub_core::geo::Coordinates;
use volhub_core::store::{EventSnapshot, EventStore};

use crate::config::Config;
use crate::utils;

/// The API client plus the viewer's uid when a session exists.
/// Browsing works logged out; membership marks need the session.
pub async fn client_and_viewer(config: &Config) -> Result<(HubClient, Option<String>)> {
    if Session::exists() {
        let session = Session::load_valid(&config.api_url).await?;
        let client = session.client(&config.api_url);
        Ok((client, Some(session.uid)))
    } else {
        Ok((HubClient::new(&config.api_url), None))
    }
}

/// Where distances are measured from: an explicit `--near` value (either
/// "LAT,LON" or a place name looked up via the geocoder), falling back to
/// the configured home location.
pub async fn viewer_location(config: &Config, near: Option<&str>) -> Result<Option<Coordinates>> {
    let Some(input) = near else {
        return Ok(config.location.as_ref().map(|h| h.coordinates()));
    };

    if let Some(coordinates) = parse_coordinates(input) {
        return Ok(Some(coordinates));
    }

    let geocoder = Geocoder::new(&config.geocoder_url);
    let mut places = geocoder.search(input).await?;
    if places.is_empty() {
        anyhow::bail!("No place found for '{input}'");
    }
    let place = places.remove(0);
    println!("{}", format!("Distances from {}", place.label()).dimmed());
    Ok(Some(place.coordinates))
}

/// Parse a "LAT,LON" pair.
fn parse_coordinates(input: &str) -> Option<Coordinates> {
    let (latitude, longitude) = input.split_once(',')?;
    Some(Coordinates {
        latitude: latitude.trim().parse().ok()?,
        longitude: longitude.trim().parse().ok()?,
    })
}

/// Fetch one event, turning a missing id into its terminal user message.
pub async fn fetch_event(client: &HubClient, event_id: &str) -> Result<EventSnapshot> {
    let spinner = utils::create_spinner("Fetching event".to_string());
    let result = client.get(event_id).await;
    spinner.finish_and_clear();
    result.map_err(not_found_message)
}

/// A missing event is a terminal message, not an error chain.
pub fn not_found_message(err: HubError) -> anyhow::Error {
    match err {
        HubError::NotFound(_) => anyhow::anyhow!("Event not found."),
        other => other.into(),
    }
}

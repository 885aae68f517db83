use anyhow::Result;
use volhub_core::browse::EventListing;
use volhub_core::geo;

use crate::config::Config;
use crate::render::event_details;

pub async fn run(config: &Config, event_id: &str) -> Result<()> {
    let (client, viewer_uid) = super::client_and_viewer(config).await?;
    let viewer = super::viewer_location(config, None).await?;

    let snapshot = super::fetch_event(&client, event_id).await?;

    let listing = EventListing {
        distance_km: match (viewer, snapshot.event.coordinates()) {
            (Some(viewer), Some(at)) => Some(geo::distance_km(viewer, at)),
            _ => None,
        },
        event: snapshot.event,
    };

    println!("{}", event_details(&listing, viewer_uid.as_deref()));

    Ok(())
}

use anyhow::{Context, Result};
use dialoguer::{Input, Select};
use owo_colors::OwoColorize;
use volhub_api::{Geocoder, Session, client};
use volhub_core::draft::EventDraft;
use volhub_core::event::EventCategory;
use volhub_core::geo::Place;
use volhub_core::store::EventStore;

use crate::config::Config;
use crate::utils;

pub async fn run(config: &Config, session: &Session) -> Result<()> {
    let mut draft = EventDraft {
        title: Input::new().with_prompt("  Title").interact_text()?,
        description: Input::new().with_prompt("  Description").interact_text()?,
        date: Input::new().with_prompt("  Date (dd-mm-yyyy)").interact_text()?,
        time: Input::new().with_prompt("  Time (hh:mm)").interact_text()?,
        participants: Input::new()
            .with_prompt("  Max participants (skip for unlimited)")
            .default(String::new())
            .show_default(false)
            .interact_text()?,
        ..EventDraft::default()
    };

    let labels: Vec<&str> = EventCategory::ALL.iter().map(|c| c.label()).collect();
    let selection = Select::new()
        .with_prompt("  Category")
        .items(&labels)
        .default(0)
        .interact()?;
    draft.category = Some(EventCategory::ALL[selection]);

    let location: String = Input::new().with_prompt("  Location").interact_text()?;
    match pick_place(config, &location).await? {
        Some(place) => {
            draft.location = place.label();
            draft.coordinates = Some(place.coordinates);
        }
        None => draft.location = location,
    }

    let image: String = Input::new()
        .with_prompt("  Image (URL or file path, skip)")
        .default(String::new())
        .show_default(false)
        .interact_text()?;
    draft.image_url = resolve_image(config, session, &image).await?;

    let event = draft.into_event(&session.uid)?;

    let client = session.client(&config.api_url);
    let spinner = utils::create_spinner("Creating event".to_string());
    let result = client.create(&event).await;
    spinner.finish_and_clear();

    let created = result.context("Failed to create event. Try again.")?;

    println!();
    println!(
        "{}",
        format!("  Created: {} ({})", created.title, created.id).green()
    );

    Ok(())
}

/// Look the location text up and let the user pick a candidate, or keep the
/// text as typed (attaching no coordinates).
pub(crate) async fn pick_place(config: &Config, location: &str) -> Result<Option<Place>> {
    let geocoder = Geocoder::new(&config.geocoder_url);

    let spinner = utils::create_spinner("Looking up location".to_string());
    let result = geocoder.search(location).await;
    spinner.finish_and_clear();

    // Suggestions are optional; a geocoder outage never blocks submission.
    let places = match result {
        Ok(places) => places,
        Err(e) => {
            eprintln!("  {}", format!("Location lookup failed: {e}").yellow());
            return Ok(None);
        }
    };

    if places.is_empty() {
        return Ok(None);
    }

    let mut items: Vec<String> = places.iter().map(|p| p.label()).collect();
    items.push(format!("Keep \"{location}\" as typed"));

    let selection = Select::new()
        .with_prompt("  Did you mean")
        .items(&items)
        .default(0)
        .interact()?;

    // The trailing "keep as typed" row is one past the candidates.
    Ok(places.into_iter().nth(selection))
}

/// Resolve the image prompt: blank means none, a URL is used as-is, and a
/// local path is uploaded to the platform first.
pub(crate) async fn resolve_image(
    config: &Config,
    session: &Session,
    input: &str,
) -> Result<Option<String>> {
    if input.trim().is_empty() {
        return Ok(None);
    }
    if input.starts_with("http://") || input.starts_with("https://") {
        return Ok(Some(input.to_string()));
    }

    let path = std::path::Path::new(input);
    let bytes =
        std::fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let content_type = client::image_content_type(path);

    let hub = session.client(&config.api_url);
    let spinner = utils::create_spinner("Uploading image".to_string());
    let result = hub.upload_image(bytes, content_type).await;
    spinner.finish_and_clear();

    Ok(Some(result.context("Failed to upload image")?))
}

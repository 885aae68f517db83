use anyhow::{Context, Result};
use dialoguer::{Input, Select};
use owo_colors::OwoColorize;
use volhub_api::Session;
use volhub_core::draft::EventDraft;
use volhub_core::event::EventCategory;
use volhub_core::store::EventStore;

use crate::config::Config;
use crate::utils;

pub async fn run(config: &Config, session: &Session, event_id: &str) -> Result<()> {
    let client = session.client(&config.api_url);

    let snapshot = super::fetch_event(&client, event_id).await?;
    let mut event = snapshot.event;

    if !event.is_created_by(&session.uid) {
        anyhow::bail!("You do not have permission to edit this event.");
    }

    let mut draft = EventDraft::from_event(&event);

    draft.title = prompt_default("  Title", &draft.title)?;
    draft.description = prompt_default("  Description", &draft.description)?;
    draft.date = prompt_default("  Date (dd-mm-yyyy)", &draft.date)?;
    draft.time = prompt_default("  Time (hh:mm)", &draft.time)?;
    draft.participants = Input::new()
        .with_prompt("  Max participants (blank for unlimited)")
        .default(draft.participants.clone())
        .interact_text()?;

    let labels: Vec<&str> = EventCategory::ALL.iter().map(|c| c.label()).collect();
    let current = EventCategory::ALL
        .iter()
        .position(|c| Some(*c) == draft.category)
        .unwrap_or(0);
    let selection = Select::new()
        .with_prompt("  Category")
        .items(&labels)
        .default(current)
        .interact()?;
    draft.category = Some(EventCategory::ALL[selection]);

    // Only a changed location goes back through the geocoder; an untouched
    // one keeps whatever coordinates the event already had.
    let location = prompt_default("  Location", &draft.location)?;
    if location != draft.location {
        match super::new::pick_place(config, &location).await? {
            Some(place) => {
                draft.location = place.label();
                draft.coordinates = Some(place.coordinates);
            }
            None => draft.location = location,
        }
    }

    let image: String = Input::new()
        .with_prompt("  Image (URL or file path, skip)")
        .default(draft.image_url.clone().unwrap_or_default())
        .interact_text()?;
    draft.image_url = super::new::resolve_image(config, session, &image).await?;

    draft.apply(&mut event)?;

    let spinner = utils::create_spinner("Saving event".to_string());
    let result = client.put(event_id, &event).await;
    spinner.finish_and_clear();

    result.context("Failed to update event. Try again.")?;

    println!();
    println!("{}", format!("  Updated: {}", event.title).green());

    Ok(())
}

fn prompt_default(prompt: &str, current: &str) -> Result<String> {
    Ok(Input::new()
        .with_prompt(prompt)
        .default(current.to_string())
        .interact_text()?)
}

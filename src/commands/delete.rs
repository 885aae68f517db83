use anyhow::Result;
use dialoguer::Confirm;
use owo_colors::OwoColorize;
use volhub_api::Session;
use volhub_core::store::EventStore;

use crate::config::Config;
use crate::utils;

pub async fn run(config: &Config, session: &Session, event_id: &str, yes: bool) -> Result<()> {
    let client = session.client(&config.api_url);

    let snapshot = super::fetch_event(&client, event_id).await?;
    let event = snapshot.event;

    if !event.is_created_by(&session.uid) {
        anyhow::bail!("You do not have permission to delete this event.");
    }

    if !yes {
        let confirmed = Confirm::new()
            .with_prompt(format!("Delete \"{}\"?", event.title))
            .default(false)
            .interact()?;

        if !confirmed {
            return Ok(());
        }
    }

    let spinner = utils::create_spinner("Deleting event".to_string());
    let result = client.delete(event_id).await;
    spinner.finish_and_clear();

    result.map_err(super::not_found_message)?;

    println!("{}", format!("Deleted: {}", event.title).green());

    Ok(())
}

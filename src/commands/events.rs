use anyhow::Result;
use owo_colors::OwoColorize;
use volhub_core::browse::{CategoryFilter, EventBrowser};
use volhub_core::event::EventCategory;

use crate::config::Config;
use crate::render::event_card;
use crate::utils;

pub async fn run(
    config: &Config,
    category: Option<&str>,
    search: Option<&str>,
    near: Option<&str>,
) -> Result<()> {
    let filter = match category {
        Some(raw) => {
            let parsed = raw.parse::<EventCategory>().map_err(|e| anyhow::anyhow!(e))?;
            CategoryFilter::Only(parsed)
        }
        None => CategoryFilter::All,
    };

    let (client, viewer_uid) = super::client_and_viewer(config).await?;
    let viewer = super::viewer_location(config, near).await?;

    let mut browser = EventBrowser::new(viewer);

    let spinner = utils::create_spinner("Fetching events".to_string());
    let fetched = browser.set_category(&client, filter).await;
    spinner.finish_and_clear();
    fetched?;

    if let Some(text) = search {
        browser.set_search(text);
    }

    let listings = browser.visible();
    if listings.is_empty() {
        println!("{}", "No events found".dimmed());
        return Ok(());
    }

    for (i, listing) in listings.iter().enumerate() {
        if i > 0 {
            println!();
        }
        println!("{}", event_card(listing, viewer_uid.as_deref()));
    }

    Ok(())
}

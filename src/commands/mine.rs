use anyhow::Result;
use owo_colors::OwoColorize;
use volhub_api::Session;
use volhub_core::browse::{EventListing, sort_by_event_date};
use volhub_core::event::Event;
use volhub_core::store::{EventQuery, EventStore};

use crate::config::Config;
use crate::render::Render;
use crate::utils;

/// Three independent queries against the events collection. An event the
/// user both created and joined shows up in each matching section.
pub async fn run(config: &Config, session: &Session) -> Result<()> {
    let client = session.client(&config.api_url);
    let uid = session.uid.clone();

    let spinner = utils::create_spinner("Fetching your events".to_string());
    let created = client.query(&EventQuery::CreatedBy(uid.clone())).await;
    let interested = client.query(&EventQuery::InterestedBy(uid.clone())).await;
    let going = client.query(&EventQuery::GoingBy(uid)).await;
    spinner.finish_and_clear();

    print_section("Created by me", created?);
    println!();
    print_section("Interested", interested?);
    println!();
    print_section("Going", going?);

    Ok(())
}

fn print_section(heading: &str, mut events: Vec<Event>) {
    sort_by_event_date(&mut events);

    println!("{}", heading.bold());
    if events.is_empty() {
        println!("   {}", "None yet".dimmed());
        return;
    }
    for event in events {
        let listing = EventListing { event, distance_km: None };
        println!("{}", listing.render());
    }
}

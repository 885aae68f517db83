use anyhow::Result;
use owo_colors::OwoColorize;
use volhub_api::Session;
use volhub_core::store::{self, Roster};

use crate::config::Config;
use crate::utils;

pub async fn run(
    config: &Config,
    session: &Session,
    event_id: &str,
    roster: Roster,
    member: bool,
) -> Result<()> {
    let client = session.client(&config.api_url);

    let spinner = utils::create_spinner(format!("Updating {} list", roster.label()));
    let result = store::set_membership(&client, event_id, &session.uid, roster, member).await;
    spinner.finish_and_clear();

    let update = result.map_err(super::not_found_message)?;

    let phrase = match roster {
        Roster::Interested => "interested in",
        Roster::Going => "going to",
    };
    let title = &update.event.title;
    match (member, update.changed) {
        (true, true) => println!("{}", format!("You are now {} {}", phrase, title).green()),
        (true, false) => println!("{}", format!("Already {} {}", phrase, title).dimmed()),
        (false, true) => println!("No longer {} {}", phrase, title),
        (false, false) => println!("{}", format!("You were not {} {}", phrase, title).dimmed()),
    }
    println!("   {}", update.event.going_summary().dimmed());

    Ok(())
}

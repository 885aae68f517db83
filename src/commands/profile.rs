use anyhow::Result;
use chrono::Local;
use owo_colors::OwoColorize;
use volhub_api::Session;
use volhub_core::profile::{attended_count, days_until_label, upcoming_going};
use volhub_core::store::{EventQuery, EventStore};

use crate::config::Config;
use crate::utils;

pub async fn run(config: &Config, session: &Session) -> Result<()> {
    let client = session.client(&config.api_url);
    let uid = &session.uid;

    let spinner = utils::create_spinner("Fetching profile".to_string());
    let user = client.get_user(uid).await;
    let going = client.query(&EventQuery::GoingBy(uid.clone())).await;
    let created = client.query(&EventQuery::CreatedBy(uid.clone())).await;
    spinner.finish_and_clear();

    let user = user?;
    let going = going?;
    let created = created?;

    let today = Local::now().date_naive();

    println!("{}", user.name.bold());
    println!("{}", user.email.dimmed());
    println!();
    println!("Attended   {}", attended_count(&going, uid, today));
    println!("Organized  {}", created.len());
    println!();

    let upcoming = upcoming_going(&going, uid, today);
    if upcoming.is_empty() {
        println!("{}", "No upcoming events".dimmed());
        return Ok(());
    }

    println!("{}", "Upcoming".bold());
    for event in &upcoming {
        let badge = event
            .parsed_date()
            .map(|d| days_until_label(d, today))
            .unwrap_or_default();
        println!("   {}  {}  {}", event.date.dimmed(), event.title, badge.cyan());
    }

    Ok(())
}

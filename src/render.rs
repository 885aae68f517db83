//! Terminal rendering for Volhub types.
//!
//! This module provides an extension trait and helpers that add colored
//! terminal rendering to volhub-core types using owo_colors.

use owo_colors::OwoColorize;
use volhub_core::browse::EventListing;
use volhub_core::event::split_location_label;

/// Extension trait for TUI rendering with colors.
pub trait Render {
    fn render(&self) -> String;
}

impl Render for EventListing {
    fn render(&self) -> String {
        event_card(self, None)
    }
}

/// Two-line listing card: id, title and category on top, the dimmed
/// logistics underneath. Membership marks appear when a viewer is known.
pub fn event_card(listing: &EventListing, viewer_uid: Option<&str>) -> String {
    let event = &listing.event;

    let mut header = format!(
        "{}  {}  {}",
        event.id.dimmed(),
        event.title.bold(),
        format!("[{}]", event.category).dimmed()
    );
    if let Some(uid) = viewer_uid {
        if event.is_created_by(uid) {
            header.push_str(&format!("  {}", "my event".yellow()));
        }
        if event.is_going(uid) {
            header.push_str(&format!("  {}", "going".green()));
        } else if event.is_interested(uid) {
            header.push_str(&format!("  {}", "interested".cyan()));
        }
    }

    // The card shows only the place name of a composite label; the full
    // address belongs to the details view.
    let place = match split_location_label(&event.location) {
        Some((name, _)) => name,
        None => event.location.as_str(),
    };
    let mut details = format!("{} {}  {}", event.date, event.time, place);
    if let Some(distance) = listing.distance_label() {
        details.push_str(&format!("  {}", distance));
    }
    details.push_str(&format!("  {}", event.going_summary()));

    format!("{}\n   {}", header, details.dimmed())
}

/// The full details block for one event.
pub fn event_details(listing: &EventListing, viewer_uid: Option<&str>) -> String {
    let event = &listing.event;
    let mut lines = Vec::new();

    let mut title = event.title.bold().to_string();
    if viewer_uid.is_some_and(|uid| event.is_created_by(uid)) {
        title.push_str(&format!("  {}", "My Event".yellow()));
    }
    lines.push(title);
    lines.push(format!("[{}]", event.category).dimmed().to_string());
    lines.push(String::new());

    lines.push(format!("When   {} at {}", event.date, event.time));
    match split_location_label(&event.location) {
        Some((name, address)) => {
            lines.push(format!("Where  {}", name));
            lines.push(format!("       {}", address.dimmed()));
        }
        None => lines.push(format!("Where  {}", event.location)),
    }
    if let Some(distance) = listing.distance_label() {
        lines.push(format!("       {}", distance.dimmed()));
    }

    lines.push(String::new());
    lines.push(event.description.clone());
    lines.push(String::new());

    lines.push(format!(
        "{}  {} interested",
        event.going_summary(),
        event.interested_users.len()
    ));

    if let Some(uid) = viewer_uid {
        let mut marks = Vec::new();
        if event.is_interested(uid) {
            marks.push("interested");
        }
        if event.is_going(uid) {
            marks.push("going");
        }
        if !marks.is_empty() {
            lines.push(format!("You are {}", marks.join(" and ")).green().to_string());
        }
    }

    if let Some(url) = &event.image_url {
        lines.push(format!("Image  {}", url.dimmed()));
    }

    lines.join("\n")
}

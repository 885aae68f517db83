//! Event documents and categories.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::geo::{Coordinates, Place};

/// Textual date format used by event documents (dd-MM-yyyy).
pub const DATE_FORMAT: &str = "%d-%m-%Y";

/// Textual 24-hour time format used by event documents (HH:mm).
pub const TIME_FORMAT: &str = "%H:%M";

/// Fixed set of event categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventCategory {
    #[serde(rename = "Community Service")]
    CommunityService,
    Education,
    Environmental,
    Health,
    #[serde(rename = "Animal Welfare")]
    AnimalWelfare,
    #[serde(rename = "Arts & Culture")]
    ArtsAndCulture,
    #[serde(rename = "Sports & Recreation")]
    SportsAndRecreation,
    Fundraising,
}

impl EventCategory {
    pub const ALL: [EventCategory; 8] = [
        EventCategory::CommunityService,
        EventCategory::Education,
        EventCategory::Environmental,
        EventCategory::Health,
        EventCategory::AnimalWelfare,
        EventCategory::ArtsAndCulture,
        EventCategory::SportsAndRecreation,
        EventCategory::Fundraising,
    ];

    /// The label stored in event documents and shown to users.
    pub fn label(&self) -> &'static str {
        match self {
            EventCategory::CommunityService => "Community Service",
            EventCategory::Education => "Education",
            EventCategory::Environmental => "Environmental",
            EventCategory::Health => "Health",
            EventCategory::AnimalWelfare => "Animal Welfare",
            EventCategory::ArtsAndCulture => "Arts & Culture",
            EventCategory::SportsAndRecreation => "Sports & Recreation",
            EventCategory::Fundraising => "Fundraising",
        }
    }
}

impl fmt::Display for EventCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for EventCategory {
    type Err = String;

    /// Accepts the document label in any casing, with `&`/`and`, spaces,
    /// dashes and underscores treated as equivalent (e.g. `community-service`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = normalize_category(s);
        EventCategory::ALL
            .into_iter()
            .find(|c| normalize_category(c.label()) == needle)
            .ok_or_else(|| {
                let known: Vec<&str> = EventCategory::ALL.iter().map(|c| c.label()).collect();
                format!("Unknown category '{}'. Expected one of: {}", s, known.join(", "))
            })
    }
}

fn normalize_category(s: &str) -> String {
    s.to_lowercase()
        .replace("and", "")
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .collect()
}

/// A volunteering event document.
///
/// Field names mirror the platform's document schema (camelCase keys, with
/// the category stored under `type`). Distance is never part of the document;
/// it is a per-viewer annotation computed in `browse`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    /// Store-assigned identifier, immutable after creation.
    /// Empty only on a document that has not been created yet.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,

    pub title: String,

    pub description: String,

    /// Calendar date in dd-MM-yyyy form.
    pub date: String,

    /// 24-hour clock time in HH:mm form.
    pub time: String,

    /// Optional capacity. `None` means unlimited.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub participants: Option<u32>,

    #[serde(rename = "type")]
    pub category: EventCategory,

    /// Free-text place label, optionally a `Name (full address)` composite.
    pub location: String,

    /// Set only when the location came from a geocoding suggestion.
    /// Always paired with `longitude`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,

    /// Authoring user. Immutable; only the creator may edit or delete.
    #[serde(default)]
    pub creator_uid: String,

    /// User ids that marked interest. Membership only, each id at most once.
    #[serde(default)]
    pub interested_users: Vec<String>,

    /// User ids that marked attendance. Same semantics as `interested_users`.
    #[serde(default)]
    pub going_users: Vec<String>,
}

impl Event {
    /// The coordinate pair, when the location was geocoded.
    /// A half-set pair (bad document) reads as no coordinate.
    pub fn coordinates(&self) -> Option<Coordinates> {
        match (self.latitude, self.longitude) {
            (Some(latitude), Some(longitude)) => Some(Coordinates { latitude, longitude }),
            _ => None,
        }
    }

    /// Parse the document's date field. `None` when it does not parse.
    pub fn parsed_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.date, DATE_FORMAT).ok()
    }

    pub fn is_interested(&self, uid: &str) -> bool {
        self.interested_users.iter().any(|u| u == uid)
    }

    pub fn is_going(&self, uid: &str) -> bool {
        self.going_users.iter().any(|u| u == uid)
    }

    pub fn is_created_by(&self, uid: &str) -> bool {
        self.creator_uid == uid
    }

    /// Replace the free-text location. Any attached coordinate pair is
    /// dropped, since it described the previous text.
    pub fn edit_location(&mut self, text: &str) {
        if self.location != text {
            self.location = text.to_string();
            self.latitude = None;
            self.longitude = None;
        }
    }

    /// Take the location from a geocoding suggestion: composite label plus
    /// the suggestion's coordinates.
    pub fn set_place(&mut self, place: &Place) {
        self.location = place.label();
        self.latitude = Some(place.coordinates.latitude);
        self.longitude = Some(place.coordinates.longitude);
    }

    /// Attendance summary, e.g. "3/10 people going" or "3 people going"
    /// when the capacity is unlimited.
    pub fn going_summary(&self) -> String {
        match self.participants {
            Some(max) => format!("{}/{} people going", self.going_users.len(), max),
            None => format!("{} people going", self.going_users.len()),
        }
    }
}

/// Split a `Name (full address)` composite location label into its parts.
/// Returns `None` for labels that do not carry the composite shape.
pub fn split_location_label(location: &str) -> Option<(&str, &str)> {
    if !location.ends_with(')') {
        return None;
    }
    let (name, rest) = location.split_once(" (")?;
    let address = rest.strip_suffix(')').unwrap_or(rest);
    if name.is_empty() || address.is_empty() {
        return None;
    }
    Some((name, address))
}

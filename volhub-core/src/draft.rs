//! Event submission drafts and their validation.
//!
//! A draft carries the proposed field values exactly as entered. Validation
//! produces the first applicable error in a fixed priority order: required
//! fields, then date, then capacity, then time-of-day. The clock is passed
//! in explicitly so outcomes are deterministic under test.

use chrono::{Local, NaiveDate, NaiveTime};
use thiserror::Error;

use crate::event::{DATE_FORMAT, Event, EventCategory, TIME_FORMAT};
use crate::geo::Coordinates;

/// Field values proposed for a new or edited event, as entered.
#[derive(Debug, Clone, Default)]
pub struct EventDraft {
    pub title: String,
    pub description: String,
    /// Calendar date as entered, expected in dd-MM-yyyy form.
    pub date: String,
    /// Clock time as entered, expected in HH:mm form.
    pub time: String,
    /// Capacity as entered. Blank means unlimited.
    pub participants: String,
    /// `None` when no category was chosen.
    pub category: Option<EventCategory>,
    pub location: String,
    /// Present only when the location was picked from a geocoding
    /// suggestion; carried onto the event together with the label.
    pub coordinates: Option<Coordinates>,
    pub image_url: Option<String>,
}

/// Why a draft was rejected. The message texts are shown to users verbatim.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("All fields except image and participants are required.")]
    MissingRequiredFields,

    #[error("Date must be today or in the future.")]
    DateNotTodayOrFuture,

    #[error("Participants must be a valid number.")]
    ParticipantsNotANumber,

    #[error("Participants must be a positive number.")]
    ParticipantsNotPositive,

    #[error("Time must be in the future.")]
    TimeInPast,
}

impl EventDraft {
    /// Prefill a draft from an existing event, for editing.
    pub fn from_event(event: &Event) -> EventDraft {
        EventDraft {
            title: event.title.clone(),
            description: event.description.clone(),
            date: event.date.clone(),
            time: event.time.clone(),
            participants: event.participants.map(|p| p.to_string()).unwrap_or_default(),
            category: Some(event.category),
            location: event.location.clone(),
            coordinates: None,
            image_url: event.image_url.clone(),
        }
    }

    /// Check submittability against the given clock. Returns the first
    /// applicable error:
    ///
    /// 1. a blank required field (everything except image and capacity)
    /// 2. a date that does not parse or lies before today
    /// 3. a non-blank capacity that is not an integer
    /// 4. a capacity of zero or less
    /// 5. a time already passed, when the date is today and the time parses
    ///
    /// An unparsable time is an invalid value, not an error here; only
    /// check 5 looks at it, and only when it parses.
    pub fn validate_at(&self, today: NaiveDate, now: NaiveTime) -> Result<(), ValidationError> {
        self.checked(today, now).map(|_| ())
    }

    /// `validate_at` against the local clock.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let now = Local::now();
        self.validate_at(now.date_naive(), now.time())
    }

    /// Validate and build a new event document authored by `creator_uid`.
    /// The id stays empty until the store assigns one.
    pub fn into_event_at(
        self,
        creator_uid: &str,
        today: NaiveDate,
        now: NaiveTime,
    ) -> Result<Event, ValidationError> {
        let (category, participants) = self.checked(today, now)?;

        Ok(Event {
            id: String::new(),
            title: self.title,
            description: self.description,
            date: self.date,
            time: self.time,
            participants,
            category,
            location: self.location,
            latitude: self.coordinates.map(|c| c.latitude),
            longitude: self.coordinates.map(|c| c.longitude),
            image_url: self.image_url,
            creator_uid: creator_uid.to_string(),
            interested_users: Vec::new(),
            going_users: Vec::new(),
        })
    }

    /// `into_event_at` against the local clock.
    pub fn into_event(self, creator_uid: &str) -> Result<Event, ValidationError> {
        let now = Local::now();
        self.into_event_at(creator_uid, now.date_naive(), now.time())
    }

    /// Validate and write the draft's values onto an existing event.
    ///
    /// The id, creator and membership sets are untouched. A changed
    /// location without fresh coordinates drops the old coordinate pair.
    pub fn apply_at(
        &self,
        event: &mut Event,
        today: NaiveDate,
        now: NaiveTime,
    ) -> Result<(), ValidationError> {
        let (category, participants) = self.checked(today, now)?;

        event.title = self.title.clone();
        event.description = self.description.clone();
        event.date = self.date.clone();
        event.time = self.time.clone();
        event.participants = participants;
        event.category = category;
        event.image_url = self.image_url.clone();

        match self.coordinates {
            Some(c) => {
                event.location = self.location.clone();
                event.latitude = Some(c.latitude);
                event.longitude = Some(c.longitude);
            }
            None => event.edit_location(&self.location),
        }

        Ok(())
    }

    /// `apply_at` against the local clock.
    pub fn apply(&self, event: &mut Event) -> Result<(), ValidationError> {
        let now = Local::now();
        self.apply_at(event, now.date_naive(), now.time())
    }

    fn checked(
        &self,
        today: NaiveDate,
        now: NaiveTime,
    ) -> Result<(EventCategory, Option<u32>), ValidationError> {
        let blank = [&self.title, &self.description, &self.date, &self.time, &self.location]
            .iter()
            .any(|f| f.trim().is_empty());
        let category = match self.category {
            Some(c) if !blank => c,
            _ => return Err(ValidationError::MissingRequiredFields),
        };

        let date = match NaiveDate::parse_from_str(&self.date, DATE_FORMAT) {
            Ok(d) if d >= today => d,
            _ => return Err(ValidationError::DateNotTodayOrFuture),
        };

        let participants = if self.participants.trim().is_empty() {
            None
        } else {
            match self.participants.parse::<i32>() {
                Err(_) => return Err(ValidationError::ParticipantsNotANumber),
                Ok(n) if n <= 0 => return Err(ValidationError::ParticipantsNotPositive),
                Ok(n) => Some(n as u32),
            }
        };

        if date == today {
            if let Ok(time) = NaiveTime::parse_from_str(&self.time, TIME_FORMAT) {
                if time < now {
                    return Err(ValidationError::TimeInPast);
                }
            }
        }

        Ok((category, participants))
    }
}

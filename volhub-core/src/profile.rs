//! Per-user statistics over the event set.

use chrono::NaiveDate;

use crate::browse::sort_by_event_date;
use crate::event::Event;

/// How many upcoming events the profile shows.
pub const UPCOMING_LIMIT: usize = 5;

/// Number of going-events that already took place. An event whose date
/// does not parse is never counted as attended.
pub fn attended_count(events: &[Event], uid: &str, today: NaiveDate) -> usize {
    events
        .iter()
        .filter(|e| e.is_going(uid))
        .filter(|e| e.parsed_date().unwrap_or(NaiveDate::MAX) < today)
        .count()
}

/// The user's going-events from today on, soonest first, capped at
/// `UPCOMING_LIMIT`. Events with unparsable dates sort after dated ones.
pub fn upcoming_going(events: &[Event], uid: &str, today: NaiveDate) -> Vec<Event> {
    let mut upcoming: Vec<Event> = events
        .iter()
        .filter(|e| e.is_going(uid))
        .filter(|e| e.parsed_date().unwrap_or(NaiveDate::MAX) >= today)
        .cloned()
        .collect();
    sort_by_event_date(&mut upcoming);
    upcoming.truncate(UPCOMING_LIMIT);
    upcoming
}

/// "Today", "Tomorrow", or "In N days".
pub fn days_until_label(date: NaiveDate, today: NaiveDate) -> String {
    match (date - today).num_days() {
        0 => "Today".to_string(),
        1 => "Tomorrow".to_string(),
        n => format!("In {} days", n),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::EventCategory;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 6, 15).unwrap()
    }

    fn going_event(id: &str, date: &str) -> Event {
        Event {
            id: id.to_string(),
            title: "Event".to_string(),
            description: String::new(),
            date: date.to_string(),
            time: "10:00".to_string(),
            participants: None,
            category: EventCategory::Health,
            location: "Somewhere".to_string(),
            latitude: None,
            longitude: None,
            image_url: None,
            creator_uid: "creator".to_string(),
            interested_users: Vec::new(),
            going_users: vec!["me".to_string()],
        }
    }

    // --- attended_count ---

    #[test]
    fn attended_counts_only_past_going_events() {
        let mut not_mine = going_event("ev4", "01-01-2026");
        not_mine.going_users = vec!["someone-else".to_string()];

        let events = vec![
            going_event("ev1", "01-01-2026"),  // past, attended
            going_event("ev2", "15-06-2026"),  // today, not yet attended
            going_event("ev3", "01-07-2026"),  // future
            not_mine,                          // past, but not going
            going_event("ev5", "not a date"),  // unparsable
        ];

        assert_eq!(attended_count(&events, "me", today()), 1);
    }

    // --- upcoming_going ---

    #[test]
    fn upcoming_is_sorted_and_excludes_the_past() {
        let events = vec![
            going_event("past", "01-01-2026"),
            going_event("later", "01-08-2026"),
            going_event("today", "15-06-2026"),
            going_event("soon", "20-06-2026"),
        ];

        let upcoming = upcoming_going(&events, "me", today());
        let ids: Vec<&str> = upcoming.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["today", "soon", "later"]);
    }

    #[test]
    fn upcoming_is_capped() {
        let events: Vec<Event> = (0..8)
            .map(|i| going_event(&format!("ev{i}"), &format!("{:02}-07-2026", i + 1)))
            .collect();

        assert_eq!(upcoming_going(&events, "me", today()).len(), UPCOMING_LIMIT);
    }

    #[test]
    fn undated_events_trail_the_upcoming_list() {
        let events = vec![
            going_event("undated", "sometime"),
            going_event("dated", "20-06-2026"),
        ];

        let upcoming = upcoming_going(&events, "me", today());
        let ids: Vec<&str> = upcoming.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["dated", "undated"]);
    }

    // --- days_until_label ---

    #[test]
    fn labels_for_near_dates() {
        let base = today();
        assert_eq!(days_until_label(base, base), "Today");
        assert_eq!(days_until_label(base + chrono::Duration::days(1), base), "Tomorrow");
        assert_eq!(days_until_label(base + chrono::Duration::days(9), base), "In 9 days");
    }
}

//! The event browsing pipeline: category fetch, local search, distance.

use chrono::NaiveDate;

use crate::error::HubResult;
use crate::event::{Event, EventCategory};
use crate::geo::{self, Coordinates};
use crate::store::{EventQuery, EventStore};

/// Category selection for the events listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(EventCategory),
}

impl CategoryFilter {
    pub fn label(&self) -> &'static str {
        match self {
            CategoryFilter::All => "All",
            CategoryFilter::Only(c) => c.label(),
        }
    }

    fn query(&self) -> EventQuery {
        match self {
            CategoryFilter::All => EventQuery::AllByDate,
            CategoryFilter::Only(c) => EventQuery::Category(*c),
        }
    }
}

/// One event prepared for display: the document plus the viewer-relative
/// distance when both sides have coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct EventListing {
    pub event: Event,
    pub distance_km: Option<f64>,
}

impl EventListing {
    pub fn distance_label(&self) -> Option<String> {
        self.distance_km.map(geo::format_distance)
    }
}

/// Sort events by parsed date ascending. Events whose date does not parse
/// keep their relative order at the end.
pub fn sort_by_event_date(events: &mut [Event]) {
    events.sort_by_key(|e| e.parsed_date().unwrap_or(NaiveDate::MAX));
}

/// Case-insensitive substring match over title and description.
/// A blank search matches everything.
pub fn matches_search(event: &Event, search: &str) -> bool {
    if search.trim().is_empty() {
        return true;
    }
    let needle = search.to_lowercase();
    event.title.to_lowercase().contains(&needle)
        || event.description.to_lowercase().contains(&needle)
}

/// View state for the events screen.
///
/// One remote fetch per category selection; the search string only
/// re-filters the already fetched set. `visible` is a pure function of the
/// held state, so rendering stays a separate concern.
#[derive(Debug)]
pub struct EventBrowser {
    filter: CategoryFilter,
    search: String,
    viewer: Option<Coordinates>,
    fetched: Vec<Event>,
}

impl EventBrowser {
    pub fn new(viewer: Option<Coordinates>) -> Self {
        EventBrowser {
            filter: CategoryFilter::All,
            search: String::new(),
            viewer,
            fetched: Vec::new(),
        }
    }

    pub fn filter(&self) -> CategoryFilter {
        self.filter
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    /// Fetch the current category's events. Category `All` arrives in the
    /// store's date order; a concrete category arrives unordered and is
    /// sorted here by parsed date.
    pub async fn refresh<S: EventStore>(&mut self, store: &S) -> HubResult<()> {
        let mut events = store.query(&self.filter.query()).await?;
        if let CategoryFilter::Only(_) = self.filter {
            sort_by_event_date(&mut events);
        }
        self.fetched = events;
        Ok(())
    }

    /// Switch category and re-fetch.
    pub async fn set_category<S: EventStore>(
        &mut self,
        store: &S,
        filter: CategoryFilter,
    ) -> HubResult<()> {
        self.filter = filter;
        self.refresh(store).await
    }

    /// Change the search string. Re-filters only; never re-fetches.
    pub fn set_search(&mut self, search: &str) {
        self.search = search.to_string();
    }

    /// The listings currently visible: fetched events passing the search,
    /// annotated with distance where both coordinates are known.
    pub fn visible(&self) -> Vec<EventListing> {
        self.fetched
            .iter()
            .filter(|e| matches_search(e, &self.search))
            .map(|e| EventListing {
                distance_km: match (self.viewer, e.coordinates()) {
                    (Some(viewer), Some(at)) => Some(geo::distance_km(viewer, at)),
                    _ => None,
                },
                event: e.clone(),
            })
            .collect()
    }
}

//! The platform's events collection, exposed as an `EventStore`.
//!
//! Event documents are revisioned by the store. Reads return the revision
//! alongside the document; writes may carry `expectedRevision` to become
//! conditional, with 409 signalling a lost race.

use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use url::Url;

use volhub_core::event::Event;
use volhub_core::store::{EventQuery, EventSnapshot, EventStore};
use volhub_core::{HubError, HubResult};

use crate::client::{HubClient, de, error_from, net};

#[derive(Deserialize)]
struct EventDocument {
    revision: u64,
    event: Event,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PutEventRequest<'a> {
    event: &'a Event,
    #[serde(skip_serializing_if = "Option::is_none")]
    expected_revision: Option<u64>,
}

fn events_query_url(base_url: &str, query: &EventQuery) -> HubResult<Url> {
    let mut url = Url::parse(&format!("{base_url}/events"))
        .map_err(|e| HubError::Config(format!("invalid API base URL: {e}")))?;

    {
        let mut pairs = url.query_pairs_mut();
        match query {
            EventQuery::AllByDate => {
                pairs.append_pair("order", "date");
            }
            EventQuery::All => {}
            EventQuery::Category(category) => {
                pairs.append_pair("category", category.label());
            }
            EventQuery::InterestedBy(uid) => {
                pairs.append_pair("interested", uid);
            }
            EventQuery::GoingBy(uid) => {
                pairs.append_pair("going", uid);
            }
            EventQuery::CreatedBy(uid) => {
                pairs.append_pair("creator", uid);
            }
        }
    }

    Ok(url)
}

/// Decode a listing leniently: a document that does not decode as an event
/// is skipped, never fatal for the whole listing.
fn decode_events(values: Vec<serde_json::Value>) -> Vec<Event> {
    values
        .into_iter()
        .filter_map(|value| match serde_json::from_value::<Event>(value) {
            Ok(event) => Some(event),
            Err(err) => {
                warn!(%err, "skipping undecodable event document");
                None
            }
        })
        .collect()
}

impl EventStore for HubClient {
    /// POST /events
    async fn create(&self, event: &Event) -> HubResult<Event> {
        debug!(title = %event.title, "creating event");
        let resp = self
            .authed(self.http.post(format!("{}/events", self.base_url)))
            .json(event)
            .send()
            .await
            .map_err(net)?;

        if !resp.status().is_success() {
            return Err(error_from(resp, "event creation").await);
        }

        let doc: EventDocument = resp.json().await.map_err(de)?;
        Ok(doc.event)
    }

    /// GET /events/:id
    async fn get(&self, id: &str) -> HubResult<EventSnapshot> {
        let resp = self
            .authed(self.http.get(format!("{}/events/{}", self.base_url, id)))
            .send()
            .await
            .map_err(net)?;

        if !resp.status().is_success() {
            return Err(error_from(resp, &format!("Event {id}")).await);
        }

        let doc: EventDocument = resp.json().await.map_err(de)?;
        Ok(EventSnapshot { revision: doc.revision, event: doc.event })
    }

    /// PUT /events/:id, last write wins
    async fn put(&self, id: &str, event: &Event) -> HubResult<()> {
        debug!(id, "updating event");
        let resp = self
            .authed(self.http.put(format!("{}/events/{}", self.base_url, id)))
            .json(&PutEventRequest { event, expected_revision: None })
            .send()
            .await
            .map_err(net)?;

        if !resp.status().is_success() {
            return Err(error_from(resp, &format!("Event {id}")).await);
        }

        Ok(())
    }

    /// PUT /events/:id with expectedRevision; 409 means the revision moved
    async fn put_if(&self, id: &str, revision: u64, event: &Event) -> HubResult<bool> {
        debug!(id, revision, "conditionally updating event");
        let resp = self
            .authed(self.http.put(format!("{}/events/{}", self.base_url, id)))
            .json(&PutEventRequest { event, expected_revision: Some(revision) })
            .send()
            .await
            .map_err(net)?;

        if resp.status() == StatusCode::CONFLICT {
            return Ok(false);
        }
        if !resp.status().is_success() {
            return Err(error_from(resp, &format!("Event {id}")).await);
        }

        Ok(true)
    }

    /// DELETE /events/:id
    async fn delete(&self, id: &str) -> HubResult<()> {
        debug!(id, "deleting event");
        let resp = self
            .authed(self.http.delete(format!("{}/events/{}", self.base_url, id)))
            .send()
            .await
            .map_err(net)?;

        if !resp.status().is_success() {
            return Err(error_from(resp, &format!("Event {id}")).await);
        }

        Ok(())
    }

    /// GET /events with the query's parameters
    async fn query(&self, query: &EventQuery) -> HubResult<Vec<Event>> {
        let url = events_query_url(&self.base_url, query)?;
        debug!(%url, "querying events");
        let resp = self.authed(self.http.get(url)).send().await.map_err(net)?;

        if !resp.status().is_success() {
            return Err(error_from(resp, "event query").await);
        }

        let values: Vec<serde_json::Value> = resp.json().await.map_err(de)?;
        Ok(decode_events(values))
    }
}

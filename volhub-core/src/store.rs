//! The event store abstraction and membership transactions.
//!
//! The hosted platform keeps events as revisioned documents: every read
//! carries a revision counter and writes can be made conditional on it.
//! That pair is what makes the membership toggle safe under concurrent
//! writers without any client-side merging.

use crate::error::{HubError, HubResult};
use crate::event::{Event, EventCategory};

/// How many optimistic attempts a membership update makes before giving up.
const MAX_TOGGLE_ATTEMPTS: u32 = 5;

/// A remote query over the events collection. This is the entire query
/// surface the platform offers: equality, array membership, and ordering
/// by the stored date value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventQuery {
    /// Every event, ascending by the raw date field (the store's native
    /// ordering of the stored string).
    AllByDate,
    /// Every event, unordered.
    All,
    /// Events of one category, unordered.
    Category(EventCategory),
    /// Events whose interested set contains the user.
    InterestedBy(String),
    /// Events whose going set contains the user.
    GoingBy(String),
    /// Events created by the user.
    CreatedBy(String),
}

/// One read of an event document, paired with the revision it was read at.
#[derive(Debug, Clone, PartialEq)]
pub struct EventSnapshot {
    pub revision: u64,
    pub event: Event,
}

/// One of the two membership sets on an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Roster {
    Interested,
    Going,
}

impl Roster {
    pub fn label(&self) -> &'static str {
        match self {
            Roster::Interested => "interested",
            Roster::Going => "going",
        }
    }

    pub fn members<'a>(&self, event: &'a Event) -> &'a [String] {
        match self {
            Roster::Interested => &event.interested_users,
            Roster::Going => &event.going_users,
        }
    }

    fn members_mut<'a>(&self, event: &'a mut Event) -> &'a mut Vec<String> {
        match self {
            Roster::Interested => &mut event.interested_users,
            Roster::Going => &mut event.going_users,
        }
    }
}

/// Storage operations the platform offers over the events collection.
#[allow(async_fn_in_trait)]
pub trait EventStore {
    /// Create a new event document. The store assigns the id and returns
    /// the stored form.
    async fn create(&self, event: &Event) -> HubResult<Event>;

    /// Read one event with its current revision.
    async fn get(&self, id: &str) -> HubResult<EventSnapshot>;

    /// Overwrite one event unconditionally, last write wins.
    async fn put(&self, id: &str, event: &Event) -> HubResult<()>;

    /// Overwrite one event only if its revision is still `revision`.
    /// `Ok(false)` means another write landed first.
    async fn put_if(&self, id: &str, revision: u64, event: &Event) -> HubResult<bool>;

    /// Delete one event.
    async fn delete(&self, id: &str) -> HubResult<()>;

    /// Run one remote query.
    async fn query(&self, query: &EventQuery) -> HubResult<Vec<Event>>;
}

/// Outcome of a membership update: the confirmed event state and whether
/// the update changed anything.
#[derive(Debug, Clone, PartialEq)]
pub struct MembershipUpdate {
    pub event: Event,
    pub changed: bool,
}

/// Set `user_id`'s membership in one of `event_id`'s rosters.
///
/// The membership list is read and conditionally rewritten in one atomic
/// step: read at a revision, write only if that revision still stands,
/// retry on contention. Concurrent updates by other users are therefore
/// never overwritten. Adding an id that is already present, or removing
/// one that is absent, changes nothing and performs no write.
///
/// Errors surface as-is and the update is not re-attempted beyond the
/// contention cap; callers should treat their local state as unchanged
/// until they hold a confirmed result.
pub async fn set_membership<S: EventStore>(
    store: &S,
    event_id: &str,
    user_id: &str,
    roster: Roster,
    member: bool,
) -> HubResult<MembershipUpdate> {
    for _ in 0..MAX_TOGGLE_ATTEMPTS {
        let EventSnapshot { revision, mut event } = store.get(event_id).await?;

        let members = roster.members_mut(&mut event);
        let changed = if member {
            if members.iter().any(|u| u == user_id) {
                false
            } else {
                members.push(user_id.to_string());
                true
            }
        } else {
            let before = members.len();
            members.retain(|u| u != user_id);
            members.len() != before
        };

        if !changed {
            return Ok(MembershipUpdate { event, changed: false });
        }

        if store.put_if(event_id, revision, &event).await? {
            return Ok(MembershipUpdate { event, changed: true });
        }
    }

    Err(HubError::Conflict(format!(
        "the {} list of event {} kept changing underneath us",
        roster.label(),
        event_id
    )))
}


#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, Ordering};

    use super::memory::MemoryStore;
    use super::*;
    use crate::event::EventCategory;

    fn event(id: &str) -> Event {
        Event {
            id: id.to_string(),
            title: "Park cleanup".to_string(),
            description: "Bring gloves".to_string(),
            date: "15-06-2026".to_string(),
            time: "10:00".to_string(),
            participants: None,
            category: EventCategory::Environmental,
            location: "North Park".to_string(),
            latitude: None,
            longitude: None,
            image_url: None,
            creator_uid: "creator".to_string(),
            interested_users: Vec::new(),
            going_users: Vec::new(),
        }
    }

    // --- set_membership ---

    #[tokio::test]
    async fn add_then_remove_restores_the_original_set() {
        let store = MemoryStore::with_events(vec![event("ev1")]);

        let added = set_membership(&store, "ev1", "u1", Roster::Interested, true)
            .await
            .unwrap();
        assert!(added.changed);
        assert!(added.event.is_interested("u1"));

        let removed = set_membership(&store, "ev1", "u1", Roster::Interested, false)
            .await
            .unwrap();
        assert!(removed.changed);
        assert!(removed.event.interested_users.is_empty());
    }

    #[tokio::test]
    async fn adding_a_present_member_writes_nothing() {
        let mut ev = event("ev1");
        ev.going_users.push("u1".to_string());
        let store = MemoryStore::with_events(vec![ev]);
        let before = store.revision_of("ev1");

        let update = set_membership(&store, "ev1", "u1", Roster::Going, true)
            .await
            .unwrap();

        assert!(!update.changed);
        assert_eq!(update.event.going_users, vec!["u1".to_string()]);
        assert_eq!(store.revision_of("ev1"), before);
    }

    #[tokio::test]
    async fn removing_an_absent_member_writes_nothing() {
        let store = MemoryStore::with_events(vec![event("ev1")]);
        let before = store.revision_of("ev1");

        let update = set_membership(&store, "ev1", "ghost", Roster::Interested, false)
            .await
            .unwrap();

        assert!(!update.changed);
        assert_eq!(store.revision_of("ev1"), before);
    }

    #[tokio::test]
    async fn membership_is_independent_per_roster() {
        let store = MemoryStore::with_events(vec![event("ev1")]);

        set_membership(&store, "ev1", "u1", Roster::Interested, true)
            .await
            .unwrap();
        let update = set_membership(&store, "ev1", "u1", Roster::Going, true)
            .await
            .unwrap();

        assert!(update.event.is_interested("u1"));
        assert!(update.event.is_going("u1"));
    }

    #[tokio::test]
    async fn concurrent_toggles_by_different_users_both_land() {
        let store = Arc::new(MemoryStore::with_events(vec![event("ev1")]));

        let a = {
            let store = Arc::clone(&store);
            tokio::spawn(async move {
                set_membership(&*store, "ev1", "alice", Roster::Going, true).await
            })
        };
        let b = {
            let store = Arc::clone(&store);
            tokio::spawn(async move {
                set_membership(&*store, "ev1", "bob", Roster::Going, true).await
            })
        };
        a.await.unwrap().unwrap();
        b.await.unwrap().unwrap();

        let final_state = store.get("ev1").await.unwrap().event;
        assert!(final_state.is_going("alice"));
        assert!(final_state.is_going("bob"));
    }

    #[tokio::test]
    async fn missing_event_surfaces_not_found() {
        let store = MemoryStore::new();
        let err = set_membership(&store, "nope", "u1", Roster::Going, true)
            .await
            .unwrap_err();
        assert!(matches!(err, HubError::NotFound(_)));
    }

    // A store that lets one competing write land between our read and our
    // conditional write, exactly once.
    struct RacingStore {
        inner: MemoryStore,
        raced: AtomicBool,
    }

    impl RacingStore {
        fn new(events: Vec<Event>) -> Self {
            RacingStore {
                inner: MemoryStore::with_events(events),
                raced: AtomicBool::new(false),
            }
        }
    }

    impl EventStore for RacingStore {
        async fn create(&self, event: &Event) -> HubResult<Event> {
            self.inner.create(event).await
        }

        async fn get(&self, id: &str) -> HubResult<EventSnapshot> {
            let snapshot = self.inner.get(id).await?;
            if !self.raced.swap(true, Ordering::SeqCst) {
                let mut rival = snapshot.event.clone();
                rival.going_users.push("rival".to_string());
                self.inner.put(id, &rival).await?;
            }
            Ok(snapshot)
        }

        async fn put(&self, id: &str, event: &Event) -> HubResult<()> {
            self.inner.put(id, event).await
        }

        async fn put_if(&self, id: &str, revision: u64, event: &Event) -> HubResult<bool> {
            self.inner.put_if(id, revision, event).await
        }

        async fn delete(&self, id: &str) -> HubResult<()> {
            self.inner.delete(id).await
        }

        async fn query(&self, query: &EventQuery) -> HubResult<Vec<Event>> {
            self.inner.query(query).await
        }
    }

    #[tokio::test]
    async fn stale_read_is_retried_and_no_update_is_lost() {
        let store = RacingStore::new(vec![event("ev1")]);

        let update = set_membership(&store, "ev1", "alice", Roster::Going, true)
            .await
            .unwrap();

        assert!(update.changed);
        assert!(update.event.is_going("alice"));
        assert!(update.event.is_going("rival"), "the competing write must survive");
    }

    // A store whose conditional writes never succeed.
    struct ContendedStore {
        inner: MemoryStore,
    }

    impl EventStore for ContendedStore {
        async fn create(&self, event: &Event) -> HubResult<Event> {
            self.inner.create(event).await
        }

        async fn get(&self, id: &str) -> HubResult<EventSnapshot> {
            self.inner.get(id).await
        }

        async fn put(&self, id: &str, event: &Event) -> HubResult<()> {
            self.inner.put(id, event).await
        }

        async fn put_if(&self, _id: &str, _revision: u64, _event: &Event) -> HubResult<bool> {
            Ok(false)
        }

        async fn delete(&self, id: &str) -> HubResult<()> {
            self.inner.delete(id).await
        }

        async fn query(&self, query: &EventQuery) -> HubResult<Vec<Event>> {
            self.inner.query(query).await
        }
    }

    #[tokio::test]
    async fn unrelenting_contention_becomes_a_conflict_error() {
        let store = ContendedStore { inner: MemoryStore::with_events(vec![event("ev1")]) };

        let err = set_membership(&store, "ev1", "u1", Roster::Going, true)
            .await
            .unwrap_err();

        assert!(matches!(err, HubError::Conflict(_)));
    }

    // --- stale conditional writes ---

    #[tokio::test]
    async fn put_if_rejects_a_stale_revision() {
        let store = MemoryStore::with_events(vec![event("ev1")]);
        let snapshot = store.get("ev1").await.unwrap();

        let mut first = snapshot.event.clone();
        first.going_users.push("u1".to_string());
        assert!(store.put_if("ev1", snapshot.revision, &first).await.unwrap());

        let mut second = snapshot.event.clone();
        second.going_users.push("u2".to_string());
        assert!(!store.put_if("ev1", snapshot.revision, &second).await.unwrap());
    }

    // --- queries ---

    #[tokio::test]
    async fn queries_filter_by_category_membership_and_creator() {
        let mut education = event("ev1");
        education.category = EventCategory::Education;
        education.interested_users.push("u1".to_string());

        let mut environmental = event("ev2");
        environmental.going_users.push("u1".to_string());
        environmental.creator_uid = "u1".to_string();

        let store = MemoryStore::with_events(vec![education, environmental]);

        let by_category = store
            .query(&EventQuery::Category(EventCategory::Education))
            .await
            .unwrap();
        assert_eq!(by_category.len(), 1);
        assert_eq!(by_category[0].id, "ev1");

        let interested = store
            .query(&EventQuery::InterestedBy("u1".to_string()))
            .await
            .unwrap();
        assert_eq!(interested.len(), 1);
        assert_eq!(interested[0].id, "ev1");

        let going = store.query(&EventQuery::GoingBy("u1".to_string())).await.unwrap();
        assert_eq!(going.len(), 1);
        assert_eq!(going[0].id, "ev2");

        let created = store.query(&EventQuery::CreatedBy("u1".to_string())).await.unwrap();
        assert_eq!(created.len(), 1);
        assert_eq!(created[0].id, "ev2");
    }

    #[tokio::test]
    async fn all_by_date_uses_the_raw_field_order() {
        let mut feb = event("ev1");
        feb.date = "01-02-2026".to_string();
        let mut jan = event("ev2");
        jan.date = "02-01-2026".to_string();

        let store = MemoryStore::with_events(vec![feb, jan]);
        let events = store.query(&EventQuery::AllByDate).await.unwrap();

        // Ascending over the stored string, not the parsed date.
        assert_eq!(events[0].date, "01-02-2026");
        assert_eq!(events[1].date, "02-01-2026");
    }
}

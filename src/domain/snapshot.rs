//! Immutable dataset snapshots with atomic swap-on-refresh.
//!
//! [`DatasetSnapshot`] is the full materialized dataset the analytics
//! engine computes over. It is built off to the side by the record
//! source and published through [`SnapshotStore`] in a single swap, so
//! an in-flight computation never observes a half-updated dataset: it
//! keeps its `Arc` to the old snapshot until it finishes.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use super::ids::{EventId, OrgId};
use super::records::{Event, FieldDefinition, Registration, Transaction};

/// One fully-loaded, immutable view of the platform's data.
///
/// Holds every organization's rows; org scoping happens at query time in
/// the facade. Construction normalizes iteration orders once (events by
/// case-insensitive name, fields by id ascending) so downstream output
/// is deterministic.
#[derive(Debug)]
pub struct DatasetSnapshot {
    events: Vec<Event>,
    registrations: HashMap<EventId, Vec<Registration>>,
    transactions: HashMap<EventId, Vec<Transaction>>,
    fields: HashMap<EventId, Vec<FieldDefinition>>,
    loaded_at: DateTime<Utc>,
}

impl DatasetSnapshot {
    /// Builds a snapshot from loose record lists, grouping per-event data
    /// and fixing iteration orders.
    #[must_use]
    pub fn new(
        mut events: Vec<Event>,
        registrations: Vec<Registration>,
        transactions: Vec<Transaction>,
        fields: Vec<FieldDefinition>,
    ) -> Self {
        events.sort_by_key(|e| e.name.to_lowercase());

        let mut regs_by_event: HashMap<EventId, Vec<Registration>> = HashMap::new();
        for reg in registrations {
            regs_by_event.entry(reg.event_id).or_default().push(reg);
        }

        let mut txs_by_event: HashMap<EventId, Vec<Transaction>> = HashMap::new();
        for tx in transactions {
            txs_by_event.entry(tx.event_id).or_default().push(tx);
        }

        let mut fields_by_event: HashMap<EventId, Vec<FieldDefinition>> = HashMap::new();
        for field in fields {
            fields_by_event.entry(field.event_id).or_default().push(field);
        }
        for defs in fields_by_event.values_mut() {
            defs.sort_by_key(|f| f.id);
        }

        Self {
            events,
            registrations: regs_by_event,
            transactions: txs_by_event,
            fields: fields_by_event,
            loaded_at: Utc::now(),
        }
    }

    /// An empty snapshot, used before the first successful load.
    #[must_use]
    pub fn empty() -> Self {
        Self::new(Vec::new(), Vec::new(), Vec::new(), Vec::new())
    }

    /// Events belonging to one organization, in listing order.
    pub fn events_for_org(&self, org_id: OrgId) -> impl Iterator<Item = &Event> {
        self.events.iter().filter(move |e| e.org_id == org_id)
    }

    /// Resolves an event within an organization's scope. Returns `None`
    /// for events of other organizations even when the id exists.
    #[must_use]
    pub fn event(&self, org_id: OrgId, event_id: EventId) -> Option<&Event> {
        self.events
            .iter()
            .find(|e| e.id == event_id && e.org_id == org_id)
    }

    /// Counted registrations for an event. Empty slice when none exist.
    #[must_use]
    pub fn registrations(&self, event_id: EventId) -> &[Registration] {
        self.registrations
            .get(&event_id)
            .map_or(&[], Vec::as_slice)
    }

    /// Revenue-eligible transactions for an event.
    #[must_use]
    pub fn transactions(&self, event_id: EventId) -> &[Transaction] {
        self.transactions.get(&event_id).map_or(&[], Vec::as_slice)
    }

    /// Dynamic-field definitions for an event, id ascending.
    #[must_use]
    pub fn fields(&self, event_id: EventId) -> &[FieldDefinition] {
        self.fields.get(&event_id).map_or(&[], Vec::as_slice)
    }

    /// When this snapshot was materialized.
    #[must_use]
    pub const fn loaded_at(&self) -> DateTime<Utc> {
        self.loaded_at
    }

    /// Total number of events across all organizations.
    #[must_use]
    pub fn event_count(&self) -> usize {
        self.events.len()
    }
}

/// Holder of the current snapshot, exchanged wholesale at refresh time.
///
/// Readers clone the inner `Arc` and drop the lock immediately; the
/// refresher replaces the `Arc` under a short write lock. No reader ever
/// sees a partially loaded dataset.
#[derive(Debug)]
pub struct SnapshotStore {
    current: RwLock<Arc<DatasetSnapshot>>,
}

impl SnapshotStore {
    /// Creates a store seeded with an initial snapshot.
    #[must_use]
    pub fn new(initial: DatasetSnapshot) -> Self {
        Self {
            current: RwLock::new(Arc::new(initial)),
        }
    }

    /// Returns a handle to the current snapshot.
    pub async fn load(&self) -> Arc<DatasetSnapshot> {
        Arc::clone(&*self.current.read().await)
    }

    /// Publishes a freshly built snapshot, replacing the current one.
    pub async fn swap(&self, next: DatasetSnapshot) {
        let mut guard = self.current.write().await;
        *guard = Arc::new(next);
    }
}

impl Default for SnapshotStore {
    fn default() -> Self {
        Self::new(DatasetSnapshot::empty())
    }
}

//! Immutable domain records as supplied by the record source.
//!
//! None of these are mutated after a snapshot is built; every analytics
//! computation produces new derived values. Filtering invariants (only
//! counted registration statuses, only revenue-eligible transactions)
//! are the record source's responsibility — the engine assumes them.

use chrono::{DateTime, Utc};

use super::ids::{EventId, OrgId};

/// One event as configured by an organization.
#[derive(Debug, Clone)]
pub struct Event {
    /// Canonical event key.
    pub id: EventId,
    /// Owning organization.
    pub org_id: OrgId,
    /// Display name.
    pub name: String,
    /// When the event was created on the platform. The lead-time window
    /// for every chart runs from here to `start_date`.
    pub created_at: DateTime<Utc>,
    /// When the event starts.
    pub start_date: DateTime<Utc>,
    /// Registration goal used for the daily-target KPI.
    pub target_registrations: u32,
}

/// One counted registration. Only its timestamp and existence matter to
/// the engine; the serialized dynamic-field answers ride along for the
/// distribution analyzer.
#[derive(Debug, Clone)]
pub struct Registration {
    /// Registration key (the transaction table references it).
    pub id: i64,
    /// Event this registration belongs to.
    pub event_id: EventId,
    /// When the registrant signed up.
    pub created_at: DateTime<Utc>,
    /// Raw serialized dynamic-field answers, zero or more
    /// `"<field_id>: <value>"` lines. Empty when the registrant answered
    /// nothing.
    pub answers_serial: String,
}

/// One revenue-eligible monetary transaction.
#[derive(Debug, Clone)]
pub struct Transaction {
    /// Registration the money moved against.
    pub registration_id: i64,
    /// Event, resolved through the registration.
    pub event_id: EventId,
    /// Raw textual amount with a decimal comma (e.g. `"10,50"`).
    pub amount: String,
    /// `true` for credits (money in), `false` for debits (refunds,
    /// chargebacks).
    pub credit: bool,
    /// When the transaction happened.
    pub occurred_at: DateTime<Utc>,
}

/// Definition of an organization-defined custom question on an event's
/// registration form.
#[derive(Debug, Clone)]
pub struct FieldDefinition {
    /// Field key, referenced by id from the serialized answer blobs.
    pub id: u64,
    /// Event the field belongs to.
    pub event_id: EventId,
    /// Human-readable question label.
    pub label: String,
}

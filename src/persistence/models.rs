//! Raw row shapes as they come off the platform's tables.
//!
//! These mirror the mirror-database columns, nullable where the schema
//! is, and normalize into domain records: absent answer blobs become
//! empty strings, an absent registration target becomes zero. Rows that
//! fail the record source's completeness filters never reach this
//! layer.

use chrono::NaiveDateTime;

use crate::domain::{Event, EventId, FieldDefinition, OrgId, Registration, Transaction};

/// An `events` row.
#[derive(Debug, Clone)]
pub struct EventRow {
    /// Primary key.
    pub id: i64,
    /// Owning organization key.
    pub organization_id: i64,
    /// Display name.
    pub name: String,
    /// Creation timestamp (naive in the database, UTC by convention).
    pub created_at: NaiveDateTime,
    /// Start timestamp.
    pub start_date: NaiveDateTime,
    /// Registration goal; `NULL` for events without one.
    pub target_registrations: Option<i64>,
}

impl From<EventRow> for Event {
    fn from(row: EventRow) -> Self {
        Self {
            id: EventId::new(row.id),
            org_id: OrgId::new(row.organization_id),
            name: row.name,
            created_at: row.created_at.and_utc(),
            start_date: row.start_date.and_utc(),
            target_registrations: row
                .target_registrations
                .and_then(|t| u32::try_from(t).ok())
                .unwrap_or(0),
        }
    }
}

/// A counted `registrations` row.
#[derive(Debug, Clone)]
pub struct RegistrationRow {
    /// Primary key.
    pub id: i64,
    /// Event foreign key.
    pub event_id: i64,
    /// Sign-up timestamp.
    pub created_at: NaiveDateTime,
    /// Serialized dynamic-field answers; `NULL` when nothing was asked
    /// or answered.
    pub dynamic_fields_serial: Option<String>,
}

impl From<RegistrationRow> for Registration {
    fn from(row: RegistrationRow) -> Self {
        Self {
            id: row.id,
            event_id: EventId::new(row.event_id),
            created_at: row.created_at.and_utc(),
            answers_serial: row.dynamic_fields_serial.unwrap_or_default(),
        }
    }
}

/// A revenue-eligible `transactions` row, joined to its event.
#[derive(Debug, Clone)]
pub struct TransactionRow {
    /// Registration foreign key.
    pub registration_id: i64,
    /// Event key resolved through the registration.
    pub event_id: i64,
    /// Raw textual amount (decimal comma).
    pub amount: String,
    /// Credit flag.
    pub credit: bool,
    /// Transaction timestamp.
    pub transaction_date: NaiveDateTime,
}

impl From<TransactionRow> for Transaction {
    fn from(row: TransactionRow) -> Self {
        Self {
            registration_id: row.registration_id,
            event_id: EventId::new(row.event_id),
            amount: row.amount,
            credit: row.credit,
            occurred_at: row.transaction_date.and_utc(),
        }
    }
}

/// An `event_fields` definition row.
#[derive(Debug, Clone)]
pub struct FieldRow {
    /// Primary key, referenced by id from answer blobs.
    pub id: i64,
    /// Event foreign key.
    pub event_id: i64,
    /// Question label.
    pub label: String,
}

impl From<FieldRow> for FieldDefinition {
    fn from(row: FieldRow) -> Self {
        Self {
            id: row.id.unsigned_abs(),
            event_id: EventId::new(row.event_id),
            label: row.label,
        }
    }
}

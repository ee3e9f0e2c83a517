//! Domain layer: identifiers, immutable records, and dataset snapshots.
//!
//! This module contains the server-side domain model: organization and
//! event identity, the record types the engine computes over, and the
//! snapshot store that publishes a consistent dataset to every query.

pub mod ids;
pub mod records;
pub mod snapshot;

pub use ids::{EventId, OrgId};
pub use records::{Event, FieldDefinition, Registration, Transaction};
pub use snapshot::{DatasetSnapshot, SnapshotStore};

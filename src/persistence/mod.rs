//! Record source: materializes dataset snapshots from the platform's
//! MySQL mirror.
//!
//! Provides the [`RecordSource`] trait for loading one complete,
//! immutable [`DatasetSnapshot`](crate::domain::DatasetSnapshot), the
//! sqlx-backed implementation, and the periodic refresh loop that swaps
//! fresh snapshots into the store.

pub mod models;
pub mod mysql;
pub mod refresh;

use std::future::Future;

use crate::domain::DatasetSnapshot;
use crate::error::AnalyticsError;

pub use mysql::MySqlRecordSource;

/// Supplies complete dataset snapshots.
///
/// Implementations own all row-level filtering (counted registration
/// statuses, revenue-eligible transaction classifications, complete
/// monetary rows) — the analytics engine assumes those preconditions
/// and never re-validates them.
pub trait RecordSource {
    /// Loads one complete snapshot of the platform's data.
    ///
    /// # Errors
    ///
    /// Returns [`AnalyticsError::Persistence`] when the upstream store
    /// is unreachable or a query fails; the caller decides whether to
    /// propagate (initial load) or keep the previous snapshot (refresh).
    fn load_snapshot(
        &self,
    ) -> impl Future<Output = Result<DatasetSnapshot, AnalyticsError>> + Send;
}

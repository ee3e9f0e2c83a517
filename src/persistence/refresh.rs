//! Periodic snapshot refresh.
//!
//! A single background task re-pulls the full dataset on a fixed
//! interval and publishes it through the store's atomic swap. A failed
//! pull keeps the previous snapshot — stale data beats no data, and the
//! next tick retries anyway.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{error, info};

use super::RecordSource;
use crate::domain::SnapshotStore;

/// Loads one fresh snapshot and swaps it in. Returns whether the swap
/// happened.
pub async fn refresh_once<S: RecordSource>(store: &SnapshotStore, source: &S) -> bool {
    match source.load_snapshot().await {
        Ok(snapshot) => {
            let events = snapshot.event_count();
            store.swap(snapshot).await;
            info!(events, "dataset snapshot refreshed");
            true
        }
        Err(reason) => {
            error!(%reason, "snapshot refresh failed; keeping previous dataset");
            false
        }
    }
}

/// Spawns the refresh loop. The first tick fires one full interval
/// after startup — the caller has already performed the initial load.
pub fn spawn_refresh_loop<S>(
    store: Arc<SnapshotStore>,
    source: S,
    interval_secs: u64,
) -> JoinHandle<()>
where
    S: RecordSource + Send + Sync + 'static,
{
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(Duration::from_secs(interval_secs.max(1)));
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // interval() yields immediately once; the startup load covers
        // that slot.
        ticker.tick().await;
        loop {
            ticker.tick().await;
            refresh_once(&store, &source).await;
        }
    })
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::domain::DatasetSnapshot;
    use crate::error::AnalyticsError;

    struct FixtureSource {
        fail: bool,
    }

    impl RecordSource for FixtureSource {
        async fn load_snapshot(&self) -> Result<DatasetSnapshot, AnalyticsError> {
            if self.fail {
                Err(AnalyticsError::Persistence("mirror unreachable".to_string()))
            } else {
                Ok(DatasetSnapshot::empty())
            }
        }
    }

    #[tokio::test]
    async fn successful_refresh_swaps_the_snapshot() {
        let store = SnapshotStore::default();
        let before = store.load().await;

        let swapped = refresh_once(&store, &FixtureSource { fail: false }).await;

        assert!(swapped);
        let after = store.load().await;
        assert!(!Arc::ptr_eq(&before, &after));
    }

    #[tokio::test]
    async fn failed_refresh_keeps_the_previous_snapshot() {
        let store = SnapshotStore::default();
        let before = store.load().await;

        let swapped = refresh_once(&store, &FixtureSource { fail: true }).await;

        assert!(!swapped);
        let after = store.load().await;
        assert!(Arc::ptr_eq(&before, &after));
    }
}

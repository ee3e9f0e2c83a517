//! Shared application state injected into all Axum handlers.

use std::sync::Arc;

use crate::service::AnalyticsService;

/// Shared application state available to all handlers via Axum's
/// `State` extractor.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Analytics facade for all business logic.
    pub analytics: Arc<AnalyticsService>,
}

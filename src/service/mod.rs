//! Service layer: business logic orchestration.
//!
//! [`AnalyticsService`] coordinates the org-scoped queries, delegates
//! computation to the [`crate::analytics`] engine, and assembles the
//! externally visible views.

pub mod analytics_service;

pub use analytics_service::{
    AnalyticsService, EventDetails, EventSummary, RegistrationView, RevenueView,
};

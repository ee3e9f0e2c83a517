//! Event listing and bulk-detail DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::analytics_dto::{RegistrationViewDto, RevenueViewDto};
use crate::service::{EventDetails, EventSummary};

/// Sidebar entry for `GET /events`.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct EventSummaryDto {
    /// Opaque event id.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Start timestamp.
    pub start_date: DateTime<Utc>,
    /// Registration goal.
    pub target_registrations: u32,
}

impl From<EventSummary> for EventSummaryDto {
    fn from(summary: EventSummary) -> Self {
        Self {
            id: summary.id,
            name: summary.name,
            created_at: summary.created_at,
            start_date: summary.start_date,
            target_registrations: summary.target_registrations,
        }
    }
}

/// Request body for `POST /events/bulk`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct BulkEventsRequest {
    /// Opaque event ids to preload, between 1 and 5.
    pub event_ids: Vec<String>,
}

/// Combined per-event payload for the bulk preload endpoint.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct EventDetailsDto {
    /// Opaque event id.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Registration analytics.
    pub registrations: RegistrationViewDto,
    /// Revenue analytics.
    pub revenue: RevenueViewDto,
    /// Whole days until the start, zero once underway.
    pub days_remaining: i64,
    /// Registrations needed per remaining day to hit the target.
    pub daily_target: f64,
    /// `true` while the event has not started.
    pub is_active: bool,
}

impl From<EventDetails> for EventDetailsDto {
    fn from(details: EventDetails) -> Self {
        Self {
            id: details.id,
            name: details.name,
            registrations: details.registrations.into(),
            revenue: details.revenue.into(),
            days_remaining: details.days_remaining,
            daily_target: details.daily_target,
            is_active: details.is_active,
        }
    }
}

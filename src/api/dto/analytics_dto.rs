//! Per-event analytics view DTOs.

use std::collections::BTreeMap;

use serde::Serialize;
use utoipa::ToSchema;

use super::common_dto::{CountSeriesDto, RevenueSeriesDto};
use crate::analytics::FieldDistribution;
use crate::service::{RegistrationView, RevenueView};

/// Response body for `GET /events/{id}/registrations`.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RegistrationViewDto {
    /// Opaque event id.
    pub id: String,
    /// Cumulative registration chart.
    pub series: CountSeriesDto,
    /// Current counted registrations.
    pub current_count: u64,
    /// Average registrations per elapsed day.
    pub average_per_day: f64,
    /// Registration goal.
    pub target: u32,
}

impl From<RegistrationView> for RegistrationViewDto {
    fn from(view: RegistrationView) -> Self {
        Self {
            id: view.id,
            series: view.series.into(),
            current_count: view.current_count,
            average_per_day: view.average_per_day,
            target: view.target,
        }
    }
}

/// Response body for `GET /events/{id}/revenue`.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RevenueViewDto {
    /// Opaque event id.
    pub id: String,
    /// Cumulative revenue chart.
    pub series: RevenueSeriesDto,
    /// Mean credit amount — the effective ticket price.
    pub ticket_price: f64,
    /// Signed revenue total.
    pub total_revenue: f64,
}

impl From<RevenueView> for RevenueViewDto {
    fn from(view: RevenueView) -> Self {
        Self {
            id: view.id,
            series: view.series.into(),
            ticket_price: view.ticket_price,
            total_revenue: view.total_revenue,
        }
    }
}

/// Response body for `GET /events/{id}/fields`.
///
/// `labels` names every dynamic field on the event; `distribution` only
/// carries the chartable ones, so callers can tell "exists" from
/// "chartable".
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct FieldDistributionDto {
    /// All field labels, id ascending.
    pub labels: Vec<String>,
    /// Label → (answer value → occurrence count).
    pub distribution: BTreeMap<String, BTreeMap<String, u64>>,
}

impl From<FieldDistribution> for FieldDistributionDto {
    fn from(dist: FieldDistribution) -> Self {
        Self {
            labels: dist.labels,
            distribution: dist.distribution,
        }
    }
}

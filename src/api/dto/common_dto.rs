//! Shared DTO types used across multiple endpoints.

use serde::Serialize;
use utoipa::ToSchema;

use crate::analytics::{CountSeries, RevenueSeries};

/// Cumulative registration chart payload: lead days descending, one
/// running count per day.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CountSeriesDto {
    /// Lead days, widest first.
    pub remaining_days: Vec<i64>,
    /// Cumulative registration counts.
    pub registrations: Vec<u64>,
}

impl From<CountSeries> for CountSeriesDto {
    fn from(series: CountSeries) -> Self {
        Self {
            remaining_days: series.remaining_days,
            registrations: series.counts,
        }
    }
}

/// Cumulative revenue chart payload: lead days ascending, one running
/// signed total per day.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RevenueSeriesDto {
    /// Lead days, `0..=max_lead`.
    pub remaining_days: Vec<i64>,
    /// Cumulative signed revenue, 2-decimal rounded.
    pub revenue: Vec<f64>,
}

impl From<RevenueSeries> for RevenueSeriesDto {
    fn from(series: RevenueSeries) -> Self {
        Self {
            remaining_days: series.remaining_days,
            revenue: series.amounts,
        }
    }
}
